//! Mesh assembly from raw triangulator output.
//!
//! A [`RawTriangulation`] names triangle corners and edge endpoints by point
//! index, but never says which edge bounds which triangle side. Assembly
//! copies nodes, edges, and elements into a [`Mesh`], then matches every
//! element side against the edge list by shared node identity and caches the
//! per-element geometry.

use std::collections::HashMap;

use nalgebra::Point3;
use rayon::prelude::*;

use super::entity::{Edge, Element, Mesh, Node};
use super::geometry::ElementGeometry;
use super::index::{EdgeId, ElementId, NodeId};
use crate::error::{MeshError, Result};
use crate::triangulate::RawTriangulation;

/// How element sides are matched to edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeMatching {
    /// Look sides up in a map keyed by the sorted node pair.
    /// Near-linear; preferred beyond a few thousand elements.
    #[default]
    Hashed,
    /// Scan the whole edge list for every side.
    /// Cost grows with elements x edges.
    Exhaustive,
}

/// Options for mesh assembly.
#[derive(Debug, Clone)]
pub struct AssembleOptions {
    /// Side-to-edge matching strategy.
    pub matching: EdgeMatching,

    /// Whether to match elements in parallel (default: true).
    pub parallel: bool,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            matching: EdgeMatching::Hashed,
            parallel: true,
        }
    }
}

impl AssembleOptions {
    /// Set the matching strategy.
    pub fn with_matching(mut self, matching: EdgeMatching) -> Self {
        self.matching = matching;
        self
    }

    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Create options for single-threaded execution.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// Assemble a connected mesh from raw triangulator output.
///
/// # Errors
///
/// Every failure is a contract violation by the triangulator; no partial mesh
/// is returned.
/// - [`MeshError::MalformedTriangulation`] if marker arrays do not match
///   their entity arrays
/// - [`MeshError::InvalidNodeIndex`] if an edge or triangle names a missing point
/// - [`MeshError::DegenerateEntity`] if an edge or triangle repeats a point
/// - [`MeshError::IncompleteTopology`] if some triangle side has no edge
///
/// # Example
/// ```
/// use tessera::domain::Marker;
/// use tessera::mesh::{assemble, AssembleOptions};
/// use tessera::triangulate::RawTriangulation;
///
/// let raw = RawTriangulation {
///     points: vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]],
///     point_markers: vec![Marker(2); 3],
///     triangles: vec![[0, 1, 2]],
///     edges: vec![[0, 1], [1, 2], [2, 0]],
///     edge_markers: vec![Marker(2); 3],
/// };
///
/// let mesh = assemble(&raw, &AssembleOptions::default()).unwrap();
/// assert_eq!(mesh.num_elements(), 1);
/// assert_eq!(mesh.elements()[0].area(), 0.5);
/// ```
pub fn assemble(raw: &RawTriangulation, options: &AssembleOptions) -> Result<Mesh> {
    check_marker_lengths(raw)?;

    let nodes = build_nodes(raw);
    let edges = build_edges(raw)?;
    let corners = build_corners(raw)?;

    let sides = match options.matching {
        EdgeMatching::Hashed => {
            let lookup = edge_lookup(&edges);
            match_sides(&corners, options.parallel, |el, corner_nodes| {
                match_element_hashed(&lookup, el, corner_nodes)
            })?
        }
        EdgeMatching::Exhaustive => {
            match_sides(&corners, options.parallel, |el, corner_nodes| {
                match_element_exhaustive(&edges, el, corner_nodes)
            })?
        }
    };

    let elements = corners
        .iter()
        .zip(sides)
        .enumerate()
        .map(|(i, (&corner_nodes, edge_ids))| Element {
            id: ElementId::new(i),
            nodes: corner_nodes,
            edges: edge_ids,
            geometry: ElementGeometry::from_corners(
                &corner_nodes.map(|n| nodes[n.index()].position),
            ),
        })
        .collect();

    let mesh = Mesh {
        nodes,
        edges,
        elements,
    };

    log::debug!(
        "assembled mesh: {} nodes, {} edges, {} elements ({:?} matching)",
        mesh.num_nodes(),
        mesh.num_edges(),
        mesh.num_elements(),
        options.matching
    );

    Ok(mesh)
}

fn check_marker_lengths(raw: &RawTriangulation) -> Result<()> {
    if raw.point_markers.len() != raw.points.len() {
        return Err(MeshError::MalformedTriangulation {
            details: format!(
                "{} point markers for {} points",
                raw.point_markers.len(),
                raw.points.len()
            ),
        });
    }
    if raw.edge_markers.len() != raw.edges.len() {
        return Err(MeshError::MalformedTriangulation {
            details: format!(
                "{} edge markers for {} edges",
                raw.edge_markers.len(),
                raw.edges.len()
            ),
        });
    }
    Ok(())
}

fn build_nodes(raw: &RawTriangulation) -> Vec<Node> {
    raw.points
        .iter()
        .zip(&raw.point_markers)
        .enumerate()
        .map(|(i, (&[x, y], &marker))| Node {
            id: NodeId::new(i),
            position: Point3::new(x, y, 0.0),
            marker,
        })
        .collect()
}

/// Resolve a raw point index, rejecting out-of-range references.
fn node_ref(entity: &'static str, index: usize, node: usize, node_count: usize) -> Result<NodeId> {
    if node >= node_count {
        return Err(MeshError::InvalidNodeIndex {
            entity,
            index,
            node,
            node_count,
        });
    }
    Ok(NodeId::new(node))
}

fn build_edges(raw: &RawTriangulation) -> Result<Vec<Edge>> {
    let node_count = raw.points.len();

    raw.edges
        .iter()
        .zip(&raw.edge_markers)
        .enumerate()
        .map(|(i, (&[a, b], &marker))| {
            let a = node_ref("edge", i, a, node_count)?;
            let b = node_ref("edge", i, b, node_count)?;
            if a == b {
                return Err(MeshError::DegenerateEntity {
                    entity: "edge",
                    index: i,
                });
            }
            Ok(Edge {
                id: EdgeId::new(i),
                nodes: [a, b],
                marker,
            })
        })
        .collect()
}

fn build_corners(raw: &RawTriangulation) -> Result<Vec<[NodeId; 3]>> {
    let node_count = raw.points.len();

    raw.triangles
        .iter()
        .enumerate()
        .map(|(i, triangle)| {
            let mut corners = [NodeId::new(0); 3];
            for (slot, &node) in corners.iter_mut().zip(triangle) {
                *slot = node_ref("element", i, node, node_count)?;
            }
            let [n0, n1, n2] = corners;
            if n0 == n1 || n1 == n2 || n0 == n2 {
                return Err(MeshError::DegenerateEntity {
                    entity: "element",
                    index: i,
                });
            }
            Ok(corners)
        })
        .collect()
}

/// Map sorted node pairs to edges. The first edge listed wins on duplicates.
fn edge_lookup(edges: &[Edge]) -> HashMap<(NodeId, NodeId), EdgeId> {
    let mut lookup = HashMap::with_capacity(edges.len());
    for edge in edges {
        lookup.entry(edge.canonical_nodes()).or_insert(edge.id);
    }
    lookup
}

/// Run `match_element` for every element. Each call only produces the edge
/// slots of its own element, so elements can be matched independently.
fn match_sides<F>(corners: &[[NodeId; 3]], parallel: bool, match_element: F) -> Result<Vec<[EdgeId; 3]>>
where
    F: Fn(usize, &[NodeId; 3]) -> Result<[EdgeId; 3]> + Sync,
{
    if parallel {
        corners
            .par_iter()
            .enumerate()
            .map(|(el, corner_nodes)| match_element(el, corner_nodes))
            .collect()
    } else {
        corners
            .iter()
            .enumerate()
            .map(|(el, corner_nodes)| match_element(el, corner_nodes))
            .collect()
    }
}

fn side_pair(corner_nodes: &[NodeId; 3], side: usize) -> (NodeId, NodeId) {
    (corner_nodes[(side + 1) % 3], corner_nodes[(side + 2) % 3])
}

fn incomplete(element: usize, side: usize, (a, b): (NodeId, NodeId)) -> MeshError {
    MeshError::IncompleteTopology {
        element,
        side,
        nodes: (a.index(), b.index()),
    }
}

fn match_element_hashed(
    lookup: &HashMap<(NodeId, NodeId), EdgeId>,
    element: usize,
    corner_nodes: &[NodeId; 3],
) -> Result<[EdgeId; 3]> {
    let mut edges = [EdgeId::new(0); 3];
    for (side, slot) in edges.iter_mut().enumerate() {
        let (a, b) = side_pair(corner_nodes, side);
        let key = if a <= b { (a, b) } else { (b, a) };
        *slot = *lookup
            .get(&key)
            .ok_or_else(|| incomplete(element, side, (a, b)))?;
    }
    Ok(edges)
}

fn match_element_exhaustive(
    all_edges: &[Edge],
    element: usize,
    corner_nodes: &[NodeId; 3],
) -> Result<[EdgeId; 3]> {
    let mut edges = [EdgeId::new(0); 3];
    for (side, slot) in edges.iter_mut().enumerate() {
        let (a, b) = side_pair(corner_nodes, side);
        *slot = all_edges
            .iter()
            .find(|e| e.joins(a, b))
            .map(|e| e.id)
            .ok_or_else(|| incomplete(element, side, (a, b)))?;
    }
    Ok(edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Marker;

    const DIRICHLET: Marker = Marker(2);

    fn single_triangle() -> RawTriangulation {
        RawTriangulation {
            points: vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]],
            point_markers: vec![DIRICHLET; 3],
            triangles: vec![[0, 1, 2]],
            edges: vec![[0, 1], [1, 2], [2, 0]],
            edge_markers: vec![DIRICHLET; 3],
        }
    }

    fn unit_square() -> RawTriangulation {
        // Two triangles sharing the diagonal 0-2; edges listed in an order
        // unrelated to the triangle sides
        RawTriangulation {
            points: vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
            point_markers: vec![DIRICHLET; 4],
            triangles: vec![[0, 1, 2], [0, 2, 3]],
            edges: vec![[3, 0], [2, 0], [1, 2], [0, 1], [2, 3]],
            edge_markers: vec![DIRICHLET, Marker::INTERIOR, DIRICHLET, DIRICHLET, DIRICHLET],
        }
    }

    fn all_options() -> Vec<AssembleOptions> {
        let mut out = Vec::new();
        for matching in [EdgeMatching::Hashed, EdgeMatching::Exhaustive] {
            for parallel in [false, true] {
                out.push(
                    AssembleOptions::default()
                        .with_matching(matching)
                        .with_parallel(parallel),
                );
            }
        }
        out
    }

    #[test]
    fn test_single_triangle() {
        let mesh = assemble(&single_triangle(), &AssembleOptions::default()).unwrap();

        assert_eq!(mesh.num_nodes(), 3);
        assert_eq!(mesh.num_edges(), 3);
        assert_eq!(mesh.num_elements(), 1);
        assert!(mesh.is_valid());

        let el = &mesh.elements()[0];
        // Side 0 joins corners 1 and 2, which is edge 1
        assert_eq!(el.edges(), [EdgeId::new(1), EdgeId::new(2), EdgeId::new(0)]);
        assert!((el.area() - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_nodes_copy_coordinates_and_markers() {
        let mut raw = unit_square();
        raw.point_markers[3] = Marker(3);
        let mesh = assemble(&raw, &AssembleOptions::default()).unwrap();

        let n = mesh.node(NodeId::new(3));
        assert_eq!(n.id(), NodeId::new(3));
        assert_eq!((n.x(), n.y(), n.position().z), (0.0, 1.0, 0.0));
        assert_eq!(n.marker(), Marker(3));

        let e = mesh.edge(EdgeId::new(1));
        assert_eq!(e.nodes(), [NodeId::new(2), NodeId::new(0)]);
        assert_eq!(e.marker(), Marker::INTERIOR);
        assert_eq!(mesh.boundary_edges().count(), 4);
    }

    #[test]
    fn test_strategies_agree() {
        let raw = unit_square();
        let reference = assemble(&raw, &AssembleOptions::default().sequential()).unwrap();

        for options in all_options() {
            let mesh = assemble(&raw, &options).unwrap();
            assert!(mesh.is_valid());
            for (a, b) in mesh.elements().iter().zip(reference.elements()) {
                assert_eq!(a.edges(), b.edges());
            }
        }
    }

    #[test]
    fn test_every_side_matches_its_edge() {
        let mesh = assemble(&unit_square(), &AssembleOptions::default()).unwrap();

        for el in mesh.elements() {
            for side in 0..3 {
                let (a, b) = el.side_nodes(side);
                let [m1, m2] = mesh.edge(el.edges()[side]).nodes();
                assert!((m1, m2) == (a, b) || (m1, m2) == (b, a));
            }
        }
        // Both triangles share the diagonal
        let diagonal = EdgeId::new(1);
        assert!(mesh.elements().iter().all(|el| el.edges().contains(&diagonal)));
    }

    #[test]
    fn test_winding_preserved() {
        let mesh = assemble(&unit_square(), &AssembleOptions::default()).unwrap();
        let el = mesh.element(ElementId::new(1));
        assert_eq!(el.nodes(), [NodeId::new(0), NodeId::new(2), NodeId::new(3)]);
        assert!(mesh.elements().iter().all(|e| e.area() > 0.0));
        assert!((mesh.total_area() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_geometry_rederivation_is_identical() {
        let mesh = assemble(&unit_square(), &AssembleOptions::default()).unwrap();
        for el in mesh.elements() {
            let again = mesh.derive_geometry(el.id());
            assert_eq!(&again, el.geometry());
            assert_eq!(again.area().to_bits(), el.area().to_bits());
        }
    }

    #[test]
    fn test_missing_edge_is_incomplete_topology() {
        let mut raw = unit_square();
        // Drop the diagonal
        raw.edges.remove(1);
        raw.edge_markers.remove(1);

        for options in all_options() {
            let result = assemble(&raw, &options);
            assert!(
                matches!(result, Err(MeshError::IncompleteTopology { .. })),
                "expected incomplete topology with {:?}",
                options
            );
        }

        // Sequential matching reports the first broken side
        let result = assemble(&raw, &AssembleOptions::default().sequential());
        assert!(matches!(
            result,
            Err(MeshError::IncompleteTopology {
                element: 0,
                side: 1,
                nodes: (2, 0),
            })
        ));
    }

    #[test]
    fn test_no_edges_is_incomplete_topology() {
        let mut raw = single_triangle();
        raw.edges.clear();
        raw.edge_markers.clear();

        let err = assemble(&raw, &AssembleOptions::default()).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::ContractViolation);
    }

    #[test]
    fn test_invalid_node_index() {
        let mut raw = single_triangle();
        raw.triangles[0] = [0, 1, 7];

        let result = assemble(&raw, &AssembleOptions::default());
        assert!(matches!(
            result,
            Err(MeshError::InvalidNodeIndex {
                entity: "element",
                index: 0,
                node: 7,
                node_count: 3,
            })
        ));

        let mut raw = single_triangle();
        raw.edges[2] = [2, 3];
        assert!(matches!(
            assemble(&raw, &AssembleOptions::default()),
            Err(MeshError::InvalidNodeIndex { entity: "edge", .. })
        ));
    }

    #[test]
    fn test_degenerate_element() {
        let mut raw = single_triangle();
        raw.triangles[0] = [0, 0, 2];

        let result = assemble(&raw, &AssembleOptions::default());
        assert!(matches!(
            result,
            Err(MeshError::DegenerateEntity { entity: "element", index: 0 })
        ));
    }

    #[test]
    fn test_marker_length_mismatch() {
        let mut raw = single_triangle();
        raw.edge_markers.pop();

        let result = assemble(&raw, &AssembleOptions::default());
        assert!(matches!(result, Err(MeshError::MalformedTriangulation { .. })));
    }

    #[test]
    fn test_duplicate_edges_resolve_to_first() {
        let mut raw = single_triangle();
        raw.edges.push([2, 1]);
        raw.edge_markers.push(Marker::INTERIOR);

        for options in all_options() {
            let mesh = assemble(&raw, &options).unwrap();
            assert_eq!(mesh.elements()[0].edges()[0], EdgeId::new(1));
        }
    }
}
