// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D reference curves and tolerance-based comparisons.
//!
//! Grid reference curves are either infinite lines (origin + direction) or
//! full arcs (center + radius), matching what the host geometry kernel hands
//! over. Direction signs are deliberately not normalized away: antiparallel
//! directions are distinct classification keys (duplex grids), and merging
//! them is an explicit step in the rectangular pass.

use nalgebra::{Point2, Vector2};

/// Tolerance for vector / point coordinate comparison.
pub const VECTOR_EPS: f64 = 1.0e-6;

/// Tolerance for elevation comparison when merging coincident levels.
pub const ELEVATION_EPS: f64 = 1.0e-6;

/// Vertical search extension when matching elements to storeys, the
/// "10 cm equivalent" in project units (meters).
pub const LEVEL_EXTENSION: f64 = 0.1;

/// A 2D reference curve in plan view.
#[derive(Debug, Clone, PartialEq)]
pub enum RefCurve {
    /// Infinite line through `origin` along `direction` (unit length,
    /// sign-carrying).
    Line {
        origin: Point2<f64>,
        direction: Vector2<f64>,
    },
    /// Full circular arc around `center`.
    Arc { center: Point2<f64>, radius: f64 },
}

impl RefCurve {
    /// Line constructor that normalizes the direction (sign preserved).
    pub fn line(origin: Point2<f64>, direction: Vector2<f64>) -> Self {
        let norm = direction.norm();
        let direction = if norm > VECTOR_EPS {
            direction / norm
        } else {
            direction
        };
        RefCurve::Line { origin, direction }
    }

    /// Arc constructor.
    pub fn arc(center: Point2<f64>, radius: f64) -> Self {
        RefCurve::Arc { center, radius }
    }

    /// Returns `true` for the `Line` variant.
    pub fn is_line(&self) -> bool {
        matches!(self, RefCurve::Line { .. })
    }

    /// Returns `true` for the `Arc` variant.
    pub fn is_arc(&self) -> bool {
        matches!(self, RefCurve::Arc { .. })
    }
}

/// Component-wise vector comparison within [`VECTOR_EPS`].
///
/// Antiparallel vectors are NOT equal under this test.
pub fn vectors_almost_equal(a: &Vector2<f64>, b: &Vector2<f64>) -> bool {
    (a.x - b.x).abs() <= VECTOR_EPS && (a.y - b.y).abs() <= VECTOR_EPS
}

/// Component-wise point comparison within [`VECTOR_EPS`].
pub fn points_almost_equal(a: &Point2<f64>, b: &Point2<f64>) -> bool {
    (a.x - b.x).abs() <= VECTOR_EPS && (a.y - b.y).abs() <= VECTOR_EPS
}

/// `true` if `a` and `b` point in opposite directions (dot ≈ -1 for unit
/// vectors).
pub fn directions_antiparallel(a: &Vector2<f64>, b: &Vector2<f64>) -> bool {
    vectors_almost_equal(a, &-b)
}

/// `true` if `a` and `b` are perpendicular (dot ≈ 0).
pub fn directions_orthogonal(a: &Vector2<f64>, b: &Vector2<f64>) -> bool {
    a.dot(b).abs() <= VECTOR_EPS
}

/// `true` if the infinite extension of the line `(origin, direction)` passes
/// through `point` within tolerance (perpendicular distance ≈ 0).
pub fn line_passes_through(
    origin: &Point2<f64>,
    direction: &Vector2<f64>,
    point: &Point2<f64>,
) -> bool {
    let norm = direction.norm();
    if norm <= VECTOR_EPS {
        // Degenerate direction: fall back to point coincidence
        return points_almost_equal(origin, point);
    }
    let to_point = point - origin;
    let cross = direction.x * to_point.y - direction.y * to_point.x;
    (cross / norm).abs() <= VECTOR_EPS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_constructor_normalizes_direction() {
        let curve = RefCurve::line(Point2::new(0.0, 0.0), Vector2::new(3.0, 4.0));
        match curve {
            RefCurve::Line { direction, .. } => {
                assert!((direction.norm() - 1.0).abs() < 1e-12);
                assert!(direction.x > 0.0 && direction.y > 0.0);
            }
            _ => panic!("expected line"),
        }
    }

    #[test]
    fn antiparallel_is_not_equal() {
        let a = Vector2::new(1.0, 0.0);
        let b = Vector2::new(-1.0, 0.0);
        assert!(!vectors_almost_equal(&a, &b));
        assert!(directions_antiparallel(&a, &b));
    }

    #[test]
    fn orthogonal_detection() {
        let a = Vector2::new(1.0, 0.0);
        let b = Vector2::new(0.0, 1.0);
        let c = Vector2::new(1.0, 1.0).normalize();
        assert!(directions_orthogonal(&a, &b));
        assert!(!directions_orthogonal(&a, &c));
    }

    #[test]
    fn passes_through_uses_infinite_extension() {
        // Line through (10, 0) pointing along +x passes through the origin
        let origin = Point2::new(10.0, 0.0);
        let dir = Vector2::new(1.0, 0.0);
        assert!(line_passes_through(&origin, &dir, &Point2::new(0.0, 0.0)));
        assert!(!line_passes_through(&origin, &dir, &Point2::new(0.0, 2.0)));
    }

    #[test]
    fn passes_through_within_tolerance() {
        let origin = Point2::new(0.0, 0.0);
        let dir = Vector2::new(1.0, 0.0);
        assert!(line_passes_through(
            &origin,
            &dir,
            &Point2::new(5.0, 0.5e-6)
        ));
    }
}
