//! Error types for tessera.
//!
//! This module defines all error types used throughout the library.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Coarse classification of a [`MeshError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Upstream output or caller input broke a structural contract.
    /// Not recoverable by retrying.
    ContractViolation,
    /// The mesh has no usable extent for rendering. The mesh itself is valid.
    DegenerateGeometry,
    /// An output target could not be created or written.
    Resource,
    /// An option value was rejected.
    InvalidInput,
}

/// Errors that can occur during mesh operations.
#[derive(Error, Debug)]
pub enum MeshError {
    /// The triangulation arrays are inconsistent with each other.
    #[error("malformed triangulation: {details}")]
    MalformedTriangulation {
        /// Description of the inconsistency.
        details: String,
    },

    /// An edge or element references a node outside the node array.
    #[error("{entity} {index} references node {node}, but only {node_count} nodes exist")]
    InvalidNodeIndex {
        /// Kind of the referencing entity ("edge" or "element").
        entity: &'static str,
        /// Index of the referencing entity.
        index: usize,
        /// The out-of-range node index.
        node: usize,
        /// Number of nodes available.
        node_count: usize,
    },

    /// An edge or element repeats one of its nodes.
    #[error("{entity} {index} is degenerate (has duplicate nodes)")]
    DegenerateEntity {
        /// Kind of the entity ("edge" or "element").
        entity: &'static str,
        /// Index of the entity.
        index: usize,
    },

    /// No edge in the edge list bounds the given element side.
    #[error("incomplete topology: no edge joins nodes ({}, {}) on side {side} of element {element}", nodes.0, nodes.1)]
    IncompleteTopology {
        /// The element index.
        element: usize,
        /// Local side index (opposite local vertex `side`).
        side: usize,
        /// Global node indices the missing edge should join.
        nodes: (usize, usize),
    },

    /// A domain segment references a missing point or joins a point to itself.
    #[error("segment {segment} references point {point}, but only {point_count} points exist")]
    InvalidSegment {
        /// The segment index.
        segment: usize,
        /// The offending point index.
        point: usize,
        /// Number of points available.
        point_count: usize,
    },

    /// The triangulator rejected its input.
    #[error("triangulation failed: {message}")]
    Triangulation {
        /// Error message.
        message: String,
    },

    /// The mesh bounding box has no extent, so no canvas scale exists.
    #[error("degenerate geometry: bounding box is {width} x {height}")]
    DegenerateGeometry {
        /// Bounding box width.
        width: f64,
        /// Bounding box height.
        height: f64,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error saving output to a file.
    #[error("failed to save {path}: {message}")]
    SaveError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl MeshError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MeshError::MalformedTriangulation { .. }
            | MeshError::InvalidNodeIndex { .. }
            | MeshError::DegenerateEntity { .. }
            | MeshError::IncompleteTopology { .. }
            | MeshError::InvalidSegment { .. }
            | MeshError::Triangulation { .. } => ErrorKind::ContractViolation,
            MeshError::DegenerateGeometry { .. } => ErrorKind::DegenerateGeometry,
            MeshError::Io(_) | MeshError::SaveError { .. } => ErrorKind::Resource,
            MeshError::InvalidParameter { .. } => ErrorKind::InvalidInput,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        let err = MeshError::IncompleteTopology {
            element: 3,
            side: 1,
            nodes: (4, 7),
        };
        assert_eq!(err.kind(), ErrorKind::ContractViolation);
        assert_eq!(
            err.to_string(),
            "incomplete topology: no edge joins nodes (4, 7) on side 1 of element 3"
        );

        let err = MeshError::DegenerateGeometry {
            width: 0.0,
            height: 0.0,
        };
        assert_eq!(err.kind(), ErrorKind::DegenerateGeometry);

        let err: MeshError = std::io::Error::new(std::io::ErrorKind::Other, "disk full").into();
        assert_eq!(err.kind(), ErrorKind::Resource);

        let err = MeshError::invalid_param("max_area", -1.0, "must be positive");
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(
            err.to_string(),
            "invalid parameter: max_area = -1 (must be positive)"
        );
    }
}
