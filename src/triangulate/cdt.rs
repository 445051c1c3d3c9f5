//! [`Triangulator`] backed by spade's constrained Delaunay triangulation.
//!
//! Segments become constraint edges. Refinement inserts points until every
//! triangle satisfies the area and angle constraints. Afterwards, faces
//! reachable from the convex hull exterior or from a hole marker without
//! crossing a segment are dropped; everything a segment loop encloses stays.

use std::collections::{HashSet, VecDeque};

use nalgebra::Vector2;
use spade::handles::{FixedFaceHandle, FixedVertexHandle, InnerTag};
use spade::{
    AngleLimit, ConstrainedDelaunayTriangulation, Point2, PositionInTriangulation,
    RefinementParameters, Triangulation,
};

use super::{PlanarGraph, RawTriangulation, TriangulateOptions, Triangulator};
use crate::domain::Marker;
use crate::error::{MeshError, Result};

type Cdt = ConstrainedDelaunayTriangulation<Point2<f64>>;

/// Triangulator built on [`spade`].
///
/// # Example
/// ```
/// use tessera::domain::samples;
/// use tessera::triangulate::{PlanarGraph, SpadeTriangulator, TriangulateOptions, Triangulator};
///
/// let graph = PlanarGraph::from(&samples::square());
/// let raw = SpadeTriangulator
///     .triangulate(&graph, &TriangulateOptions::new(0.1))
///     .unwrap();
/// assert!(raw.triangles.len() > 0);
/// assert_eq!(raw.edges.len(), raw.edge_markers.len());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SpadeTriangulator;

impl Triangulator for SpadeTriangulator {
    fn triangulate(
        &self,
        graph: &PlanarGraph,
        options: &TriangulateOptions,
    ) -> Result<RawTriangulation> {
        options.validate()?;
        graph.validate()?;

        let mut cdt = Cdt::new();
        let handles = insert_points(&mut cdt, graph)?;

        // No points, or all of them collinear
        if cdt.num_inner_faces() == 0 {
            log::debug!("{} input points span no triangle", graph.points.len());
            return Ok(RawTriangulation::default());
        }

        insert_segments(&mut cdt, graph, &handles)?;

        refine(&mut cdt, graph, options);

        let mut seeds = hole_faces(&cdt, &graph.holes);
        if !graph.segments.is_empty() {
            seeds.extend(hull_faces(&cdt));
        }
        let excluded = flood_unconstrained(&cdt, seeds);

        let raw = extract(&cdt, graph, &handles, &excluded);
        log::debug!(
            "triangulated {} input points into {} points, {} triangles, {} edges",
            graph.points.len(),
            raw.points.len(),
            raw.triangles.len(),
            raw.edges.len()
        );
        Ok(raw)
    }
}

fn insert_points(cdt: &mut Cdt, graph: &PlanarGraph) -> Result<Vec<FixedVertexHandle>> {
    graph
        .points
        .iter()
        .enumerate()
        .map(|(i, &[x, y])| {
            cdt.insert(Point2::new(x, y))
                .map_err(|e| MeshError::Triangulation {
                    message: format!("point {} at ({}, {}): {:?}", i, x, y, e),
                })
        })
        .collect()
}

fn insert_segments(cdt: &mut Cdt, graph: &PlanarGraph, handles: &[FixedVertexHandle]) -> Result<()> {
    for (si, &[a, b]) in graph.segments.iter().enumerate() {
        let (from, to) = (handles[a], handles[b]);
        // Distinct input points may still coincide
        if from == to {
            return Err(MeshError::DegenerateEntity {
                entity: "segment",
                index: si,
            });
        }
        if !cdt.can_add_constraint(from, to) {
            return Err(MeshError::Triangulation {
                message: format!("segment {} crosses another segment", si),
            });
        }
        cdt.add_constraint(from, to);
    }
    Ok(())
}

/// Upper bound on inserted points when none is configured.
const MAX_STEINER_POINTS: usize = 1 << 24;

/// Refine in place over the whole convex hull.
fn refine(cdt: &mut Cdt, graph: &PlanarGraph, options: &TriangulateOptions) {
    // An angle limit of zero disables angle refinement
    let angle_limit = AngleLimit::from_deg(options.min_angle.unwrap_or(0.0));
    let max_steiner_points = options
        .max_steiner_points
        .unwrap_or_else(|| default_steiner_limit(graph, options.max_area));

    let params = RefinementParameters::<f64>::new()
        .with_max_allowed_area(options.max_area)
        .with_angle_limit(angle_limit)
        .with_max_additional_vertices(max_steiner_points);

    let result = cdt.refine(params);
    if !result.refinement_complete {
        log::warn!(
            "refinement stopped after {} inserted points; some triangles exceed the constraints",
            max_steiner_points
        );
    }
}

/// Enough room to cover the bounding box with triangles of `max_area`,
/// plus slack for the angle constraint, capped at [`MAX_STEINER_POINTS`].
fn default_steiner_limit(graph: &PlanarGraph, max_area: f64) -> usize {
    let mut min = [f64::INFINITY; 2];
    let mut max = [f64::NEG_INFINITY; 2];
    for p in &graph.points {
        for i in 0..2 {
            min[i] = min[i].min(p[i]);
            max[i] = max[i].max(p[i]);
        }
    }
    let box_area = (max[0] - min[0]) * (max[1] - min[1]);
    let estimate = 4.0 * box_area / max_area;

    let fill = if estimate.is_finite() && estimate >= 0.0 {
        estimate.ceil().min(MAX_STEINER_POINTS as f64) as usize
    } else {
        MAX_STEINER_POINTS
    };
    fill.saturating_add(graph.points.len().saturating_mul(16))
        .saturating_add(1024)
        .min(MAX_STEINER_POINTS)
}

/// Faces containing a hole marker.
///
/// Refinement may have inserted a point on the marker itself; such a point
/// lies inside one region, so every face around it is taken. Markers on a
/// segment or outside the hull name no region.
fn hole_faces(cdt: &Cdt, holes: &[[f64; 2]]) -> Vec<FixedFaceHandle<InnerTag>> {
    let mut faces = Vec::new();
    for &[x, y] in holes {
        let around: Vec<_> = match cdt.locate(Point2::new(x, y)) {
            PositionInTriangulation::OnFace(face) => vec![face],
            PositionInTriangulation::OnEdge(edge) => {
                let edge = cdt.directed_edge(edge);
                if cdt.is_constraint_edge(edge.as_undirected().fix()) {
                    Vec::new()
                } else {
                    [edge.face(), edge.rev().face()]
                        .into_iter()
                        .filter_map(|f| f.as_inner())
                        .map(|f| f.fix())
                        .collect()
                }
            }
            PositionInTriangulation::OnVertex(vertex) => {
                let vertex = cdt.vertex(vertex);
                let on_segment = vertex
                    .out_edges()
                    .any(|e| cdt.is_constraint_edge(e.as_undirected().fix()));
                if on_segment {
                    Vec::new()
                } else {
                    vertex
                        .out_edges()
                        .filter_map(|e| e.face().as_inner())
                        .map(|f| f.fix())
                        .collect()
                }
            }
            PositionInTriangulation::OutsideOfConvexHull(_)
            | PositionInTriangulation::NoTriangulation => Vec::new(),
        };
        if around.is_empty() {
            log::debug!("hole marker ({}, {}) lies in no region; ignored", x, y);
        }
        faces.extend(around);
    }
    faces
}

/// Inner faces across an unconstrained convex hull edge.
fn hull_faces(cdt: &Cdt) -> Vec<FixedFaceHandle<InnerTag>> {
    cdt.directed_edges()
        .filter(|edge| edge.face().as_inner().is_none())
        .filter(|edge| !cdt.is_constraint_edge(edge.as_undirected().fix()))
        .filter_map(|edge| edge.rev().face().as_inner())
        .map(|face| face.fix())
        .collect()
}

/// Every face reachable from `seeds` without crossing a constraint.
fn flood_unconstrained(
    cdt: &Cdt,
    seeds: Vec<FixedFaceHandle<InnerTag>>,
) -> HashSet<FixedFaceHandle<InnerTag>> {
    let mut queue = VecDeque::from(seeds);
    let mut visited = HashSet::new();
    while let Some(face) = queue.pop_front() {
        if !visited.insert(face) {
            continue;
        }
        for edge in cdt.face(face).adjacent_edges() {
            if cdt.is_constraint_edge(edge.as_undirected().fix()) {
                continue;
            }
            if let Some(neighbor) = edge.rev().face().as_inner() {
                queue.push_back(neighbor.fix());
            }
        }
    }
    visited
}

fn extract(
    cdt: &Cdt,
    graph: &PlanarGraph,
    handles: &[FixedVertexHandle],
    excluded: &HashSet<FixedFaceHandle<InnerTag>>,
) -> RawTriangulation {
    let vertex_count = cdt.num_vertices();

    let kept: Vec<_> = cdt
        .inner_faces()
        .filter(|f| !excluded.contains(&f.fix()))
        .collect();

    let mut used = vec![false; vertex_count];
    for face in &kept {
        for v in face.vertices() {
            used[v.fix().index()] = true;
        }
    }

    let mut markers = vec![Marker::INTERIOR; vertex_count];
    let mut is_input = vec![false; vertex_count];
    for (handle, &marker) in handles.iter().zip(&graph.point_markers) {
        markers[handle.index()] = marker;
        is_input[handle.index()] = true;
    }

    // Edges bounding at least one retained face; constraint edges take the
    // marker of the segment they lie on and pass it to inserted endpoints.
    let mut edges = Vec::new();
    let mut edge_markers = Vec::new();
    for edge in cdt.undirected_edges() {
        let directed = edge.as_directed();
        let bounds_kept = [directed.face(), directed.rev().face()]
            .into_iter()
            .filter_map(|f| f.as_inner())
            .any(|f| !excluded.contains(&f.fix()));
        if !bounds_kept {
            continue;
        }

        let [a, b] = edge.vertices();
        let marker = if cdt.is_constraint_edge(edge.fix()) {
            let marker = owning_segment_marker(graph, a.position(), b.position());
            for v in [a, b] {
                let i = v.fix().index();
                if !is_input[i] {
                    markers[i] = marker;
                }
            }
            marker
        } else {
            Marker::INTERIOR
        };

        edges.push([a.fix().index(), b.fix().index()]);
        edge_markers.push(marker);
    }

    // Dense renumbering in insertion order, so input points come first
    let mut remap = vec![usize::MAX; vertex_count];
    let mut points = Vec::new();
    let mut point_markers = Vec::new();
    for v in cdt.vertices() {
        let i = v.fix().index();
        if used[i] {
            remap[i] = points.len();
            let p = v.position();
            points.push([p.x, p.y]);
            point_markers.push(markers[i]);
        }
    }

    let triangles = kept
        .iter()
        .map(|f| f.vertices().map(|v| remap[v.fix().index()]))
        .collect();
    for edge in &mut edges {
        *edge = edge.map(|i| remap[i]);
    }

    RawTriangulation {
        points,
        point_markers,
        triangles,
        edges,
        edge_markers,
    }
}

/// Marker of the input segment closest to the midpoint of `a`-`b`.
fn owning_segment_marker(graph: &PlanarGraph, a: Point2<f64>, b: Point2<f64>) -> Marker {
    let mid = Vector2::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
    let vec = |i: usize| Vector2::new(graph.points[i][0], graph.points[i][1]);

    graph
        .segments
        .iter()
        .zip(&graph.segment_markers)
        .map(|(&[s, t], &marker)| (distance_to_segment(mid, vec(s), vec(t)), marker))
        .min_by(|x, y| x.0.total_cmp(&y.0))
        .map_or(Marker::INTERIOR, |(_, marker)| marker)
}

fn distance_to_segment(p: Vector2<f64>, a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    let ab = b - a;
    let len2 = ab.norm_squared();
    let t = if len2 > 0.0 {
        ((p - a).dot(&ab) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    (a + ab * t - p).norm()
}
