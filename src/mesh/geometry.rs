//! Per-element geometric quantities.
//!
//! Finite-element assembly needs, for every triangle, the three edge vectors
//! and the signed area. They are a pure function of the corner coordinates,
//! computed once when the mesh is assembled.

use nalgebra::{Point3, Vector2};

/// Cached edge vectors and signed area of a triangle.
///
/// Slot `i` holds the vector from local vertex `(i+1)%3` to local vertex
/// `(i+2)%3`, i.e. the side opposite local vertex `i`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementGeometry {
    edge_vectors: [Vector2<f64>; 3],
    area: f64,
}

impl ElementGeometry {
    /// Derive the geometry of a triangle from its corners, in element order.
    ///
    /// Only the x and y coordinates take part.
    ///
    /// # Example
    /// ```
    /// use tessera::mesh::ElementGeometry;
    /// use nalgebra::Point3;
    ///
    /// let g = ElementGeometry::from_corners(&[
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(1.0, 0.0, 0.0),
    ///     Point3::new(0.0, 1.0, 0.0),
    /// ]);
    /// assert_eq!(g.area(), 0.5);
    /// ```
    pub fn from_corners(corners: &[Point3<f64>; 3]) -> Self {
        let edge_vectors = std::array::from_fn(|i| {
            let from = &corners[(i + 1) % 3];
            let to = &corners[(i + 2) % 3];
            Vector2::new(to.x - from.x, to.y - from.y)
        });

        Self {
            edge_vectors,
            area: signed_area(&edge_vectors),
        }
    }

    /// The edge vector opposite local vertex `i`.
    #[inline]
    pub fn edge_vector(&self, i: usize) -> Vector2<f64> {
        self.edge_vectors[i]
    }

    /// The x components of the three edge vectors.
    pub fn edge_vector_x(&self) -> [f64; 3] {
        self.edge_vectors.map(|v| v.x)
    }

    /// The y components of the three edge vectors.
    pub fn edge_vector_y(&self) -> [f64; 3] {
        self.edge_vectors.map(|v| v.y)
    }

    /// Signed area; positive when the corners wind counter-clockwise.
    #[inline]
    pub fn area(&self) -> f64 {
        self.area
    }
}

fn signed_area(edge_vectors: &[Vector2<f64>; 3]) -> f64 {
    let [e0, e1, _] = edge_vectors;
    (e0.x * e1.y - e1.x * e0.y) / 2.0
}
