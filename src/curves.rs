//! Curve analysis for single-tuple *relative* cubic Bézier curves.
//!
//! All functions here treat the curve's start point as the local origin;
//! callers must split multi-tuple commands and convert absolute curves to
//! relative form first. Numeric degeneracies (parallel bisectors, infinite
//! radii) are expected outcomes of probing arbitrary curves and yield `None`
//! rather than errors.

use crate::command::CubicParameter;
use crate::math::{Circle, LineSegment, Point};

/// Radii at or beyond this are indistinguishable from a straight line.
const RADIUS_LIMIT: f64 = 1e7;

/// Cubic Bernstein evaluation relative to the curve's local origin.
pub fn interpolate(curve: &CubicParameter, t: f64) -> Point {
    let u = 1.0 - t;
    curve.start_control * (3.0 * t * u * u)
        + curve.end_control * (3.0 * t * t * u)
        + curve.end * (t * t * t)
}

/// Fit a circle through the curve's origin, midpoint, and endpoint.
///
/// Two chords (origin→midpoint, midpoint→endpoint) give two perpendicular
/// bisectors; their intersection is the candidate center. The fit is accepted
/// only if the points at t = 0.25 and t = 0.75 sit within `2 * tolerance` of
/// the candidate radius and the radius is finite and below a degeneracy
/// limit.
pub fn fit_circle(curve: &CubicParameter, tolerance: f64) -> Option<Circle> {
    let mid = interpolate(curve, 0.5);
    let end = curve.end;

    // Perpendicular bisector of each chord: through the chord midpoint,
    // along the chord normal.
    let m1 = mid * 0.5;
    let d1 = Point::new(-mid.y, mid.x);
    let m2 = (mid + end) * 0.5;
    let chord2 = end - mid;
    let d2 = Point::new(-chord2.y, chord2.x);

    let denominator = d1.cross(d2);
    if denominator.abs() <= 1e-12 {
        return None;
    }

    let t = (m2 - m1).cross(d2) / denominator;
    let center = m1 + d1 * t;
    let radius = center.length();

    if !radius.is_finite() || radius >= RADIUS_LIMIT {
        return None;
    }

    for sample_t in [0.25, 0.75] {
        let deviation = (center.distance(interpolate(curve, sample_t)) - radius).abs();
        if deviation > tolerance * 2.0 {
            return None;
        }
    }

    Some(Circle::new(center, radius))
}

/// Whether the curve's control polygon is convex.
///
/// The polygon over (origin, startControl, endControl, end) is convex iff its
/// diagonals (origin↔endControl, startControl↔end) cross at a point interior
/// to both, with per-axis sign consistency against the intersection.
pub fn is_convex(curve: &CubicParameter) -> bool {
    let tolerance = 1e-3;
    let diagonal_a = LineSegment::new(Point::ZERO, curve.end_control);
    let diagonal_b = LineSegment::new(curve.start_control, curve.end);

    let Some(intersection) = diagonal_a.intersection(&diagonal_b, tolerance) else {
        return false;
    };

    interior(diagonal_a, intersection, tolerance) && interior(diagonal_b, intersection, tolerance)
}

fn interior(segment: LineSegment, p: Point, tolerance: f64) -> bool {
    let along = |a: f64, b: f64, v: f64| (v - a) * (b - v) >= -tolerance;
    along(segment.start.x, segment.end.x, p.x) && along(segment.start.y, segment.end.y, p.y)
}

/// Whether the sampled curve stays on the circle's perimeter. The allowed
/// deviation shrinks with the radius so that large circles are not matched by
/// loosely-fitting curves.
pub fn lies_on_circle(curve: &CubicParameter, circle: &Circle, tolerance: f64) -> bool {
    let limit = (tolerance * 2.0).min(0.5 * circle.radius / 100.0);
    [0.0, 0.25, 0.5, 0.75, 1.0].into_iter().all(|t| {
        (circle.center.distance(interpolate(curve, t)) - circle.radius).abs() <= limit
    })
}

/// Angle (radians) subtended at the circle's center between the curve's
/// origin and endpoint, via the law of cosines on the dot product.
pub fn find_arc_angle(curve: &CubicParameter, circle: &Circle) -> f64 {
    let a = -circle.center;
    let b = curve.end - circle.center;
    let cos = (a.dot(b) / (a.length() * b.length())).clamp(-1.0, 1.0);
    cos.acos()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Kappa constant for approximating a quarter circle with one cubic.
    const KAPPA: f64 = 0.552_284_749_8;

    /// A relative cubic tracing a quarter of a radius-10 circle centered at
    /// (0, 10), from (0, 0) to (10, 10).
    fn quarter_circle() -> CubicParameter {
        CubicParameter {
            start_control: Point::new(KAPPA * 10.0, 0.0),
            end_control: Point::new(10.0, 10.0 - KAPPA * 10.0),
            end: Point::new(10.0, 10.0),
        }
    }

    #[test]
    fn test_interpolate_endpoints() {
        let curve = quarter_circle();
        assert!(interpolate(&curve, 0.0).approx_eq(Point::ZERO, 1e-12));
        assert!(interpolate(&curve, 1.0).approx_eq(curve.end, 1e-12));
    }

    #[test]
    fn test_fit_circle_quarter_arc() {
        let circle = fit_circle(&quarter_circle(), 0.01).unwrap();
        assert!(circle.center.approx_eq(Point::new(0.0, 10.0), 0.05));
        assert!((circle.radius - 10.0).abs() < 0.05);
    }

    #[test]
    fn test_fit_circle_rejects_straight_line() {
        // Control points on the chord: infinite (or enormous) radius.
        let line = CubicParameter {
            start_control: Point::new(1.0, 1.0),
            end_control: Point::new(2.0, 2.0),
            end: Point::new(3.0, 3.0),
        };
        assert!(fit_circle(&line, 0.01).is_none());
    }

    #[test]
    fn test_fit_circle_rejects_s_shape() {
        let s_curve = CubicParameter {
            start_control: Point::new(5.0, 10.0),
            end_control: Point::new(10.0, -10.0),
            end: Point::new(15.0, 0.0),
        };
        assert!(fit_circle(&s_curve, 0.01).is_none());
    }

    #[test]
    fn test_is_convex_quarter_arc() {
        assert!(is_convex(&quarter_circle()));
    }

    #[test]
    fn test_is_not_convex_s_shape() {
        let s_curve = CubicParameter {
            start_control: Point::new(5.0, 10.0),
            end_control: Point::new(10.0, -10.0),
            end: Point::new(15.0, 0.0),
        };
        assert!(!is_convex(&s_curve));
    }

    #[test]
    fn test_lies_on_circle() {
        let curve = quarter_circle();
        let circle = Circle::new(Point::new(0.0, 10.0), 10.0);
        assert!(lies_on_circle(&curve, &circle, 0.01));

        let elsewhere = Circle::new(Point::new(5.0, 5.0), 3.0);
        assert!(!lies_on_circle(&curve, &elsewhere, 0.01));
    }

    #[test]
    fn test_find_arc_angle_quarter() {
        let curve = quarter_circle();
        let circle = Circle::new(Point::new(0.0, 10.0), 10.0);
        let angle = find_arc_angle(&curve, &circle);
        assert!((angle - std::f64::consts::FRAC_PI_2).abs() < 1e-3);
    }
}
