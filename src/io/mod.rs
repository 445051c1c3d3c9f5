//! Mesh output.
//!
//! # Supported Formats
//!
//! | Format | Extension | Notes |
//! |--------|-----------|-------|
//! | Encapsulated PostScript | `.eps` | Filled elements with stroked edges |
//!
//! # Usage
//!
//! ```no_run
//! use tessera::io::eps::{self, RenderOptions};
//! use tessera::mesh::Mesh;
//!
//! # let mesh = Mesh::default();
//! eps::save(&mesh, "square.eps", &RenderOptions::default()).unwrap();
//! ```

pub mod eps;

pub use eps::{CanvasTransform, RenderOptions, Rgb};
