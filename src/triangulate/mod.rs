//! Triangulation boundary.
//!
//! The triangulator is an injected capability: anything implementing
//! [`Triangulator`] turns a [`PlanarGraph`] and an area constraint into a
//! [`RawTriangulation`]. The raw result is flat and carries no
//! cross-references; [`assemble`](crate::mesh::assemble) turns it into a
//! connected [`Mesh`](crate::mesh::Mesh).
//!
//! [`SpadeTriangulator`] is the bundled implementation.

mod cdt;

pub use self::cdt::SpadeTriangulator;

use crate::domain::{DomainDescription, Marker};
use crate::error::{MeshError, Result};

/// Flat triangulator input: points, constraint segments, and hole markers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanarGraph {
    /// Point coordinates.
    pub points: Vec<[f64; 2]>,
    /// One marker per point.
    pub point_markers: Vec<Marker>,
    /// Segment endpoint indices into `points`.
    pub segments: Vec<[usize; 2]>,
    /// One marker per segment.
    pub segment_markers: Vec<Marker>,
    /// Points inside holes.
    pub holes: Vec<[f64; 2]>,
}

impl PlanarGraph {
    /// Check that every segment joins two distinct, existing points and that
    /// the marker arrays match their entity arrays.
    pub fn validate(&self) -> Result<()> {
        if self.point_markers.len() != self.points.len() {
            return Err(MeshError::MalformedTriangulation {
                details: format!(
                    "{} point markers for {} points",
                    self.point_markers.len(),
                    self.points.len()
                ),
            });
        }
        if self.segment_markers.len() != self.segments.len() {
            return Err(MeshError::MalformedTriangulation {
                details: format!(
                    "{} segment markers for {} segments",
                    self.segment_markers.len(),
                    self.segments.len()
                ),
            });
        }

        let point_count = self.points.len();
        for (si, &[a, b]) in self.segments.iter().enumerate() {
            for point in [a, b] {
                if point >= point_count {
                    return Err(MeshError::InvalidSegment {
                        segment: si,
                        point,
                        point_count,
                    });
                }
            }
            if a == b {
                return Err(MeshError::DegenerateEntity {
                    entity: "segment",
                    index: si,
                });
            }
        }

        Ok(())
    }
}

impl From<&DomainDescription> for PlanarGraph {
    fn from(domain: &DomainDescription) -> Self {
        Self {
            points: domain.points.iter().map(|p| [p.x, p.y]).collect(),
            point_markers: domain.points.iter().map(|p| p.bc.into()).collect(),
            segments: domain.segments.iter().map(|s| [s.start, s.end]).collect(),
            segment_markers: domain.segments.iter().map(|s| s.bc.into()).collect(),
            holes: domain.holes.iter().map(|h| [h.x, h.y]).collect(),
        }
    }
}

/// Flat triangulator output.
///
/// Entities are tied together only by shared point indices: triangles and
/// edges both name points, but nothing says which edge bounds which
/// triangle side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTriangulation {
    /// Point coordinates. May contain more points than the input.
    pub points: Vec<[f64; 2]>,
    /// One marker per point.
    pub point_markers: Vec<Marker>,
    /// Triangle corner indices, in the triangulator's winding.
    pub triangles: Vec<[usize; 3]>,
    /// Edge endpoint indices.
    pub edges: Vec<[usize; 2]>,
    /// One marker per edge.
    pub edge_markers: Vec<Marker>,
}

/// Options for triangulation.
#[derive(Debug, Clone)]
pub struct TriangulateOptions {
    /// Maximum triangle area.
    pub max_area: f64,

    /// Minimum interior angle in degrees (`None` disables the quality
    /// constraint). Default: 30.
    pub min_angle: Option<f64>,

    /// Upper bound on inserted points. Default: derived from the domain
    /// area and `max_area`.
    pub max_steiner_points: Option<usize>,
}

impl TriangulateOptions {
    /// Create options with the given maximum triangle area.
    pub fn new(max_area: f64) -> Self {
        Self {
            max_area,
            min_angle: Some(30.0),
            max_steiner_points: None,
        }
    }

    /// Set the minimum angle constraint.
    pub fn with_min_angle(mut self, degrees: f64) -> Self {
        self.min_angle = Some(degrees);
        self
    }

    /// Disable the minimum angle constraint.
    pub fn without_min_angle(mut self) -> Self {
        self.min_angle = None;
        self
    }

    /// Limit the number of inserted points.
    pub fn with_max_steiner_points(mut self, limit: usize) -> Self {
        self.max_steiner_points = Some(limit);
        self
    }

    /// Reject non-finite or non-positive constraints.
    pub fn validate(&self) -> Result<()> {
        if !self.max_area.is_finite() || self.max_area <= 0.0 {
            return Err(MeshError::invalid_param(
                "max_area",
                self.max_area,
                "must be finite and positive",
            ));
        }
        if let Some(angle) = self.min_angle {
            // refinement is only known to terminate up to 30 degrees
            if !angle.is_finite() || !(0.0..=30.0).contains(&angle) {
                return Err(MeshError::invalid_param(
                    "min_angle",
                    angle,
                    "must lie within [0, 30] degrees",
                ));
            }
        }
        Ok(())
    }
}

/// A constrained, refining triangulator.
pub trait Triangulator {
    /// Triangulate `graph`, keeping every segment as a union of output edges,
    /// removing hole regions, and refining until no triangle is larger than
    /// `options.max_area`.
    ///
    /// The result must list every edge of every triangle together with
    /// boundary markers.
    fn triangulate(&self, graph: &PlanarGraph, options: &TriangulateOptions)
        -> Result<RawTriangulation>;
}
