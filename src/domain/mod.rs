//! Planar domain descriptions.
//!
//! A [`DomainDescription`] lists the boundary vertices, the boundary segments
//! joining them, and one interior point per hole. It is the input to the
//! triangulation stage; this crate does not check that the segments form a
//! closed simple boundary.
//!
//! Sample domains live in [`samples`].

pub mod samples;

use std::fmt;

/// Boundary condition attached to a domain point or segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundaryCondition {
    /// Prescribed value.
    Dirichlet,
    /// Prescribed normal flux.
    Neumann,
}

impl BoundaryCondition {
    /// The integer code carried through the triangulator.
    pub const fn code(self) -> i32 {
        match self {
            BoundaryCondition::Dirichlet => 2,
            BoundaryCondition::Neumann => 3,
        }
    }
}

/// Boundary marker copied through triangulation onto nodes and edges.
///
/// Interior entities carry [`Marker::INTERIOR`]; boundary entities carry the
/// code of their [`BoundaryCondition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Marker(pub i32);

impl Marker {
    /// Marker of entities not on any boundary segment.
    pub const INTERIOR: Marker = Marker(0);

    /// The boundary condition this marker encodes, if any.
    pub fn condition(self) -> Option<BoundaryCondition> {
        match self.0 {
            2 => Some(BoundaryCondition::Dirichlet),
            3 => Some(BoundaryCondition::Neumann),
            _ => None,
        }
    }

    /// Whether this marker is the interior marker.
    #[inline]
    pub fn is_interior(self) -> bool {
        self == Marker::INTERIOR
    }
}

impl From<BoundaryCondition> for Marker {
    fn from(bc: BoundaryCondition) -> Self {
        Marker(bc.code())
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A boundary vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainPoint {
    /// Position in the point list (zero-based).
    pub id: usize,
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Boundary condition at this vertex.
    pub bc: BoundaryCondition,
}

/// A boundary segment joining two domain points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainSegment {
    /// Position in the segment list (zero-based).
    pub id: usize,
    /// Index of the first endpoint.
    pub start: usize,
    /// Index of the second endpoint.
    pub end: usize,
    /// Boundary condition along this segment.
    pub bc: BoundaryCondition,
}

/// An arbitrary point strictly inside a hole.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hole {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

/// Points, segments, and holes describing a planar domain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DomainDescription {
    /// Boundary vertices.
    pub points: Vec<DomainPoint>,
    /// Boundary segments.
    pub segments: Vec<DomainSegment>,
    /// One marker point per hole.
    pub holes: Vec<Hole>,
}

impl DomainDescription {
    /// Create an empty description.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a point and return its index.
    pub fn add_point(&mut self, x: f64, y: f64, bc: BoundaryCondition) -> usize {
        let id = self.points.len();
        self.points.push(DomainPoint { id, x, y, bc });
        id
    }

    /// Append a segment between two existing points and return its index.
    pub fn add_segment(&mut self, start: usize, end: usize, bc: BoundaryCondition) -> usize {
        let id = self.segments.len();
        self.segments.push(DomainSegment { id, start, end, bc });
        id
    }

    /// Append a closed loop: the points in order plus the segments joining
    /// consecutive points, last back to first. Returns the first point index.
    pub fn add_loop(&mut self, coords: &[[f64; 2]], bc: BoundaryCondition) -> usize {
        let first = self.points.len();
        for &[x, y] in coords {
            self.add_point(x, y, bc);
        }
        let n = coords.len();
        for i in 0..n {
            self.add_segment(first + i, first + (i + 1) % n, bc);
        }
        first
    }

    /// Mark the region containing `(x, y)` as a hole.
    pub fn add_hole(&mut self, x: f64, y: f64) {
        self.holes.push(Hole { x, y });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_roundtrip() {
        for bc in [BoundaryCondition::Dirichlet, BoundaryCondition::Neumann] {
            assert_eq!(Marker::from(bc).condition(), Some(bc));
        }
        assert_eq!(Marker::INTERIOR.condition(), None);
        assert!(Marker::default().is_interior());
        assert_eq!(Marker::from(BoundaryCondition::Dirichlet), Marker(2));
    }

    #[test]
    fn test_add_loop() {
        let mut domain = DomainDescription::new();
        let first = domain.add_loop(
            &[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]],
            BoundaryCondition::Neumann,
        );
        assert_eq!(first, 0);
        assert_eq!(domain.points.len(), 3);
        assert_eq!(domain.segments.len(), 3);

        let last = domain.segments[2];
        assert_eq!((last.start, last.end), (2, 0));
        assert_eq!(last.id, 2);
        assert_eq!(last.bc, BoundaryCondition::Neumann);
    }
}
