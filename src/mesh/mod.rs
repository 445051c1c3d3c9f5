//! Core mesh data structures.
//!
//! This module provides the assembled triangular mesh and the assembler that
//! builds it from raw triangulator output.
//!
//! # Overview
//!
//! The primary type is [`Mesh`], an arena owning every [`Node`], [`Edge`], and
//! [`Element`]. Elements know their corner nodes, their three bounding edges,
//! and cached geometric quantities ([`ElementGeometry`]) needed by
//! finite-element assembly.
//!
//! # Index Types
//!
//! Entities are identified by type-safe index wrappers:
//! - [`NodeId`] - Identifies a node
//! - [`EdgeId`] - Identifies an edge
//! - [`ElementId`] - Identifies an element
//!
//! # Construction
//!
//! Meshes are built by [`assemble`] from a
//! [`RawTriangulation`](crate::triangulate::RawTriangulation), usually via
//! [`mesh_domain`](crate::mesh_domain).

mod builder;
mod entity;
mod geometry;
mod index;

pub use builder::{assemble, AssembleOptions, EdgeMatching};
pub use entity::{Edge, Element, Mesh, Node};
pub use geometry::ElementGeometry;
pub use index::{EdgeId, ElementId, NodeId};
