//! Mesh entities and the owning [`Mesh`] arena.
//!
//! # Structure
//!
//! - A **node** is a point with a boundary marker
//! - An **edge** joins two nodes and carries a boundary marker
//! - An **element** is a triangle: three nodes in the triangulator's winding,
//!   the three edges bounding it, and its cached [`ElementGeometry`]
//!
//! Local side `i` of an element lies opposite local vertex `i`, joining local
//! vertices `(i+1)%3` and `(i+2)%3`.
//!
//! All entities are stored in arrays owned by the mesh; references between
//! them are indices. Entities are immutable once the mesh is assembled.

use nalgebra::Point3;

use super::geometry::ElementGeometry;
use super::index::{EdgeId, ElementId, NodeId};
use crate::domain::Marker;

/// A mesh node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) position: Point3<f64>,
    pub(crate) marker: Marker,
}

impl Node {
    /// This node's index in its mesh.
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Position; `z` is zero for planar meshes.
    #[inline]
    pub fn position(&self) -> &Point3<f64> {
        &self.position
    }

    /// X coordinate.
    #[inline]
    pub fn x(&self) -> f64 {
        self.position.x
    }

    /// Y coordinate.
    #[inline]
    pub fn y(&self) -> f64 {
        self.position.y
    }

    /// Boundary marker inherited from the triangulator.
    #[inline]
    pub fn marker(&self) -> Marker {
        self.marker
    }
}

/// A mesh edge joining two nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub(crate) id: EdgeId,
    pub(crate) nodes: [NodeId; 2],
    pub(crate) marker: Marker,
}

impl Edge {
    /// This edge's index in its mesh.
    #[inline]
    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// The two endpoints, in triangulator order.
    #[inline]
    pub fn nodes(&self) -> [NodeId; 2] {
        self.nodes
    }

    /// Boundary marker inherited from the triangulator.
    #[inline]
    pub fn marker(&self) -> Marker {
        self.marker
    }

    /// Whether this edge joins `a` and `b`, in either order.
    #[inline]
    pub fn joins(&self, a: NodeId, b: NodeId) -> bool {
        let [m1, m2] = self.nodes;
        (m1 == a && m2 == b) || (m1 == b && m2 == a)
    }

    /// Endpoints as a (smaller, larger) pair.
    #[inline]
    pub fn canonical_nodes(&self) -> (NodeId, NodeId) {
        let [a, b] = self.nodes;
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}

/// A triangular element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    pub(crate) id: ElementId,
    pub(crate) nodes: [NodeId; 3],
    pub(crate) edges: [EdgeId; 3],
    pub(crate) geometry: ElementGeometry,
}

impl Element {
    /// This element's index in its mesh.
    #[inline]
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Corner nodes in triangulator winding.
    #[inline]
    pub fn nodes(&self) -> [NodeId; 3] {
        self.nodes
    }

    /// Bounding edges; entry `i` lies opposite corner `i`.
    #[inline]
    pub fn edges(&self) -> [EdgeId; 3] {
        self.edges
    }

    /// Nodes joined by local side `i`.
    #[inline]
    pub fn side_nodes(&self, i: usize) -> (NodeId, NodeId) {
        (self.nodes[(i + 1) % 3], self.nodes[(i + 2) % 3])
    }

    /// Cached edge vectors and signed area.
    #[inline]
    pub fn geometry(&self) -> &ElementGeometry {
        &self.geometry
    }

    /// Signed area.
    #[inline]
    pub fn area(&self) -> f64 {
        self.geometry.area()
    }
}

/// An assembled triangular mesh.
///
/// The mesh owns every node, edge, and element; it is read-only once
/// [`assemble`](super::assemble) returns it and is dropped as a unit.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub(crate) nodes: Vec<Node>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) elements: Vec<Element>,
}

impl Mesh {
    // ==================== Accessors ====================

    /// Get the number of nodes.
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Get the number of edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Get the number of elements.
    #[inline]
    pub fn num_elements(&self) -> usize {
        self.elements.len()
    }

    /// Get a node by ID.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Get an edge by ID.
    #[inline]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    /// Get an element by ID.
    #[inline]
    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.index()]
    }

    /// All nodes, indexed by [`NodeId`].
    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All edges, indexed by [`EdgeId`].
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// All elements, indexed by [`ElementId`].
    #[inline]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Iterate over edges carrying a boundary marker.
    pub fn boundary_edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(|e| !e.marker.is_interior())
    }

    /// Corner positions of an element.
    pub fn element_positions(&self, id: ElementId) -> [Point3<f64>; 3] {
        self.element(id).nodes.map(|n| self.node(n).position)
    }

    /// Derive the geometry of an element from the current node positions.
    ///
    /// Always equals the cached [`Element::geometry`].
    pub fn derive_geometry(&self, id: ElementId) -> ElementGeometry {
        ElementGeometry::from_corners(&self.element_positions(id))
    }

    /// Compute the bounding box of the mesh, as (min, max) corners.
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let first = self.nodes.first()?;
        let mut min = first.position;
        let mut max = first.position;

        for n in &self.nodes[1..] {
            for i in 0..3 {
                min[i] = min[i].min(n.position[i]);
                max[i] = max[i].max(n.position[i]);
            }
        }

        Some((min, max))
    }

    /// Sum of unsigned element areas.
    pub fn total_area(&self) -> f64 {
        self.elements.iter().map(|e| e.area().abs()).sum()
    }

    // ==================== Validation ====================

    /// Check every structural invariant: dense ids, in-range references,
    /// distinct nodes per entity, and each element side bounded by the edge
    /// joining that side's nodes.
    pub fn is_valid(&self) -> bool {
        let node_count = self.nodes.len();
        let edge_count = self.edges.len();

        for (i, n) in self.nodes.iter().enumerate() {
            if n.id.index() != i {
                return false;
            }
        }

        for (i, e) in self.edges.iter().enumerate() {
            let [a, b] = e.nodes;
            if e.id.index() != i || a == b {
                return false;
            }
            if a.index() >= node_count || b.index() >= node_count {
                return false;
            }
        }

        for (i, el) in self.elements.iter().enumerate() {
            if el.id.index() != i {
                return false;
            }
            let [n0, n1, n2] = el.nodes;
            if n0 == n1 || n1 == n2 || n0 == n2 {
                return false;
            }
            if el.nodes.iter().any(|n| n.index() >= node_count) {
                return false;
            }
            let [e0, e1, e2] = el.edges;
            if e0 == e1 || e1 == e2 || e0 == e2 {
                return false;
            }
            for side in 0..3 {
                let edge = el.edges[side];
                if edge.index() >= edge_count {
                    return false;
                }
                let (a, b) = el.side_nodes(side);
                if !self.edge(edge).joins(a, b) {
                    return false;
                }
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_mesh() {
        let mesh = Mesh::default();
        assert_eq!(mesh.num_nodes(), 0);
        assert_eq!(mesh.num_edges(), 0);
        assert_eq!(mesh.num_elements(), 0);
        assert!(mesh.bounding_box().is_none());
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_edge_joins_either_order() {
        let edge = Edge {
            id: EdgeId::new(0),
            nodes: [NodeId::new(4), NodeId::new(1)],
            marker: Marker::INTERIOR,
        };
        assert!(edge.joins(NodeId::new(4), NodeId::new(1)));
        assert!(edge.joins(NodeId::new(1), NodeId::new(4)));
        assert!(!edge.joins(NodeId::new(1), NodeId::new(2)));
        assert_eq!(edge.canonical_nodes(), (NodeId::new(1), NodeId::new(4)));
    }
}
