//! Benchmarks for mesh assembly and triangulation.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use tessera::domain::samples;
use tessera::prelude::*;

/// Raw triangulation of an `n` x `n` grid of unit squares, two triangles each.
fn create_grid_triangulation(n: usize) -> RawTriangulation {
    let mut points = Vec::with_capacity((n + 1) * (n + 1));
    let mut triangles = Vec::with_capacity(n * n * 2);
    let mut edges = Vec::new();

    for j in 0..=n {
        for i in 0..=n {
            points.push([i as f64, j as f64]);
        }
    }

    for j in 0..=n {
        for i in 0..=n {
            let v = j * (n + 1) + i;
            if i < n {
                edges.push([v, v + 1]);
            }
            if j < n {
                edges.push([v, v + n + 1]);
            }
        }
    }

    for j in 0..n {
        for i in 0..n {
            let v00 = j * (n + 1) + i;
            let v10 = v00 + 1;
            let v01 = v00 + (n + 1);
            let v11 = v01 + 1;

            triangles.push([v00, v10, v11]);
            triangles.push([v00, v11, v01]);
            edges.push([v00, v11]);
        }
    }

    let point_markers = vec![Marker::INTERIOR; points.len()];
    let edge_markers = vec![Marker::INTERIOR; edges.len()];

    RawTriangulation {
        points,
        point_markers,
        triangles,
        edges,
        edge_markers,
    }
}

fn bench_assembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("assemble");

    for n in [10, 40] {
        let raw = create_grid_triangulation(n);

        group.bench_with_input(BenchmarkId::new("hashed", n), &raw, |b, raw| {
            let options = AssembleOptions::default();
            b.iter(|| assemble(raw, &options).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("hashed_sequential", n), &raw, |b, raw| {
            let options = AssembleOptions::default().sequential();
            b.iter(|| assemble(raw, &options).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("exhaustive", n), &raw, |b, raw| {
            let options = AssembleOptions::default().with_matching(EdgeMatching::Exhaustive);
            b.iter(|| assemble(raw, &options).unwrap());
        });
    }

    group.finish();
}

fn bench_triangulation(c: &mut Criterion) {
    let domain = samples::square();
    let graph = PlanarGraph::from(&domain);
    let options = TriangulateOptions::new(0.01);

    c.bench_function("triangulate_square", |b| {
        b.iter(|| SpadeTriangulator.triangulate(&graph, &options).unwrap());
    });

    c.bench_function("mesh_square", |b| {
        let assemble_options = AssembleOptions::default();
        b.iter(|| mesh_domain(&domain, &SpadeTriangulator, &options, &assemble_options).unwrap());
    });
}

criterion_group!(benches, bench_assembly, bench_triangulation);
criterion_main!(benches);
