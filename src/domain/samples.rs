//! Sample domains used by the demo driver and the tests.
//!
//! All boundaries carry Dirichlet conditions.

use std::f64::consts::PI;

use super::{BoundaryCondition, DomainDescription};

/// Inner radius of [`annulus`]. With outer radius `2 * ANNULUS_INNER_RADIUS`
/// the ring area is close to one.
pub const ANNULUS_INNER_RADIUS: f64 = 0.325;

/// A 1 x 3 rectangle with a square hole near its bottom.
///
/// Points 0..4 are the rectangle corners `(0,0) (1,0) (1,3) (0,3)`,
/// points 4..8 the hole corners spanning `[0.25, 0.75]^2`.
pub fn square() -> DomainDescription {
    let bc = BoundaryCondition::Dirichlet;
    let mut domain = DomainDescription::new();
    domain.add_loop(&[[0.0, 0.0], [1.0, 0.0], [1.0, 3.0], [0.0, 3.0]], bc);
    domain.add_loop(
        &[[0.25, 0.25], [0.75, 0.25], [0.75, 0.75], [0.25, 0.75]],
        bc,
    );
    domain.add_hole(0.5, 0.5);
    domain
}

/// A triangle with a rectangular hole.
pub fn triangle_with_hole() -> DomainDescription {
    let bc = BoundaryCondition::Dirichlet;
    let mut domain = DomainDescription::new();
    domain.add_loop(&[[-1.0, 0.0], [1.0, 0.0], [0.0, 2.0]], bc);
    domain.add_loop(
        &[[-0.25, 0.25], [0.25, 0.25], [0.25, 1.0], [-0.25, 1.0]],
        bc,
    );
    domain.add_hole(0.0, 0.5);
    domain
}

/// A ring between two concentric regular `n`-gons centred at the origin.
///
/// Points `0..n` lie on the inner polygon, points `n..2n` on the outer one,
/// both starting on the positive x axis.
pub fn annulus(n: usize) -> DomainDescription {
    let bc = BoundaryCondition::Dirichlet;
    let a = ANNULUS_INNER_RADIUS;
    let b = 2.0 * a;

    let polygon = |r: f64| -> Vec<[f64; 2]> {
        (0..n)
            .map(|i| {
                let t = 2.0 * PI * i as f64 / n as f64;
                [r * t.cos(), r * t.sin()]
            })
            .collect()
    };

    let mut domain = DomainDescription::new();
    domain.add_loop(&polygon(a), bc);
    domain.add_loop(&polygon(b), bc);
    domain.add_hole(0.0, 0.0);
    domain
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_layout() {
        let domain = square();
        assert_eq!(domain.points.len(), 8);
        assert_eq!(domain.segments.len(), 8);
        assert_eq!(domain.holes.len(), 1);
        assert_eq!((domain.points[2].x, domain.points[2].y), (1.0, 3.0));
        assert_eq!((domain.segments[7].start, domain.segments[7].end), (7, 4));
    }

    #[test]
    fn test_annulus_closes_both_loops() {
        let n = 24;
        let domain = annulus(n);
        assert_eq!(domain.points.len(), 2 * n);
        assert_eq!(domain.segments.len(), 2 * n);

        assert_eq!(domain.segments[n - 1].end, 0);
        assert_eq!(domain.segments[2 * n - 1].end, n);

        for p in &domain.points[..n] {
            assert!((p.x.hypot(p.y) - ANNULUS_INNER_RADIUS).abs() < 1e-12);
        }
        for p in &domain.points[n..] {
            assert!((p.x.hypot(p.y) - 2.0 * ANNULUS_INNER_RADIUS).abs() < 1e-12);
        }
    }

    #[test]
    fn test_triangle_with_hole_layout() {
        let domain = triangle_with_hole();
        assert_eq!(domain.points.len(), 7);
        assert_eq!(domain.segments.len(), 7);
        assert_eq!((domain.segments[2].start, domain.segments[2].end), (2, 0));
        assert_eq!((domain.segments[6].start, domain.segments[6].end), (6, 3));
    }
}
