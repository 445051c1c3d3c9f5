//! # Tessera
//!
//! Planar triangular meshes for finite-element work.
//!
//! Tessera turns a planar straight-line domain (boundary vertices, boundary
//! segments, hole markers) into a connected triangular mesh whose elements
//! know their bounding edges and carry the geometric quantities a
//! finite-element solver needs, and renders meshes to EPS for inspection.
//!
//! ## Pipeline
//!
//! - [`domain::DomainDescription`] describes the region to mesh
//! - a [`triangulate::Triangulator`] turns it into a flat
//!   [`triangulate::RawTriangulation`] honoring a maximum triangle area
//! - [`mesh::assemble`] cross-references the raw output into a [`mesh::Mesh`]
//! - [`io::eps`] draws the mesh
//!
//! ## Quick Start
//!
//! ```
//! use tessera::prelude::*;
//! use tessera::domain::samples;
//!
//! let mesh = mesh_domain(
//!     &samples::square(),
//!     &SpadeTriangulator,
//!     &TriangulateOptions::new(0.1),
//!     &AssembleOptions::default(),
//! )
//! .unwrap();
//!
//! println!(
//!     "nodes: {}, edges: {}, elements: {}",
//!     mesh.num_nodes(),
//!     mesh.num_edges(),
//!     mesh.num_elements()
//! );
//!
//! for el in mesh.elements() {
//!     let [e0, e1, e2] = el.edges();
//!     assert!(el.area() > 0.0);
//!     # let _ = (e0, e1, e2);
//! }
//! ```
//!
//! ## Rendering
//!
//! ```no_run
//! use tessera::prelude::*;
//! use tessera::io::eps;
//! # use tessera::domain::samples;
//! # let mesh = mesh_domain(&samples::square(), &SpadeTriangulator,
//! #     &TriangulateOptions::new(0.1), &AssembleOptions::default()).unwrap();
//!
//! eps::save(&mesh, "square.eps", &RenderOptions::default()).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod error;
pub mod io;
pub mod mesh;
pub mod triangulate;

use domain::DomainDescription;
use error::Result;
use mesh::{assemble, AssembleOptions, Mesh};
use triangulate::{PlanarGraph, TriangulateOptions, Triangulator};

/// Triangulate `domain` and assemble the result into a mesh.
pub fn mesh_domain<T: Triangulator + ?Sized>(
    domain: &DomainDescription,
    triangulator: &T,
    triangulate_options: &TriangulateOptions,
    assemble_options: &AssembleOptions,
) -> Result<Mesh> {
    let graph = PlanarGraph::from(domain);
    let raw = triangulator.triangulate(&graph, triangulate_options)?;
    assemble(&raw, assemble_options)
}

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use tessera::prelude::*;
/// ```
pub mod prelude {
    pub use crate::domain::{BoundaryCondition, DomainDescription, Marker};
    pub use crate::error::{ErrorKind, MeshError, Result};
    pub use crate::io::{RenderOptions, Rgb};
    pub use crate::mesh::{
        assemble, AssembleOptions, Edge, EdgeId, EdgeMatching, Element, ElementGeometry,
        ElementId, Mesh, Node, NodeId,
    };
    pub use crate::mesh_domain;
    pub use crate::triangulate::{
        PlanarGraph, RawTriangulation, SpadeTriangulator, TriangulateOptions, Triangulator,
    };
}

// Re-export nalgebra types for convenience
pub use nalgebra;
