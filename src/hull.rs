//! Convex hulls and hull/hull intersection.
//!
//! The hull is a cheap conservative proxy for a path's filled area: two paths
//! whose sampled hulls do not intersect cannot overlap when drawn.

use crate::math::Point;

/// GJK termination bound: degenerate geometry is reported as non-intersecting
/// rather than looping.
const MAX_ITERATIONS: usize = 100;

const TOLERANCE: f64 = 1e-3;

/// Andrew's monotone chain. Points are sorted by (x, y); the lower and upper
/// chains drop any point making a non-left turn. Inputs of fewer than three
/// points are returned unchanged.
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));

    let mut hull: Vec<Point> = Vec::with_capacity(sorted.len() + 1);

    // Lower chain.
    for &p in &sorted {
        while hull.len() >= 2 && turn(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(p);
    }

    // Upper chain, continuing in the same buffer. The first reversed point is
    // the lower chain's last, so it is skipped.
    let lower_len = hull.len();
    for &p in sorted.iter().rev().skip(1) {
        while hull.len() > lower_len && turn(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(p);
    }

    // The upper chain closes back onto the lower chain's first point.
    hull.pop();
    hull
}

fn turn(a: Point, b: Point, c: Point) -> f64 {
    (b - a).cross(c - a)
}

/// GJK intersection test between two convex hulls.
///
/// Iterates Minkowski-difference support points, growing a simplex of up to
/// three points; intersection is reported once the origin is bounded by a
/// simplex triangle. Shapes that merely touch count as intersecting.
pub fn hulls_intersect(a: &[Point], b: &[Point]) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a.len() == 1 && b.len() == 1 {
        return a[0].approx_eq(b[0], TOLERANCE);
    }

    let mut direction = centroid(a) - centroid(b);
    if direction.length() <= TOLERANCE {
        direction = Point::new(1.0, 0.0);
    }

    let mut simplex = vec![support(a, b, direction)];
    direction = -simplex[0];

    for _ in 0..MAX_ITERATIONS {
        if direction.length() <= 1e-12 {
            // The origin sits on the simplex itself.
            return true;
        }

        let point = support(a, b, direction);
        if point.dot(direction) < -TOLERANCE {
            // No support point past the origin: the shapes are separated.
            return false;
        }
        simplex.push(point);

        if refine_simplex(&mut simplex, &mut direction) {
            return true;
        }
    }

    false
}

/// Support point of the Minkowski difference A − B along `direction`.
fn support(a: &[Point], b: &[Point], direction: Point) -> Point {
    farthest(a, direction) - farthest(b, -direction)
}

fn farthest(points: &[Point], direction: Point) -> Point {
    *points
        .iter()
        .max_by(|p, q| p.dot(direction).total_cmp(&q.dot(direction)))
        .expect("hull is non-empty")
}

fn centroid(points: &[Point]) -> Point {
    let sum = points.iter().fold(Point::ZERO, |acc, &p| acc + p);
    sum * (1.0 / points.len() as f64)
}

/// Advance the simplex toward the origin. Returns true when the origin is
/// enclosed.
fn refine_simplex(simplex: &mut Vec<Point>, direction: &mut Point) -> bool {
    match simplex.len() {
        2 => {
            let a = simplex[1];
            let b = simplex[0];
            let ab = b - a;
            let ao = -a;
            if ab.dot(ao) > 0.0 {
                // Origin is beside the edge: search perpendicular to it.
                *direction = perpendicular_toward(ab, ao);
            } else {
                // Origin is behind the newest point: drop the far one.
                simplex.remove(0);
                *direction = ao;
            }
            false
        }
        3 => {
            let a = simplex[2];
            let b = simplex[1];
            let c = simplex[0];
            let ab = b - a;
            let ac = c - a;
            let ao = -a;

            let ab_normal = perpendicular_away(ab, ac);
            let ac_normal = perpendicular_away(ac, ab);

            if ab_normal.dot(ao) > TOLERANCE {
                simplex.remove(0);
                *direction = ab_normal;
                false
            } else if ac_normal.dot(ao) > TOLERANCE {
                simplex.remove(1);
                *direction = ac_normal;
                false
            } else {
                true
            }
        }
        _ => false,
    }
}

/// Perpendicular of `v` pointing toward `toward`.
fn perpendicular_toward(v: Point, toward: Point) -> Point {
    let perp = Point::new(-v.y, v.x);
    if perp.dot(toward) >= 0.0 { perp } else { -perp }
}

/// Perpendicular of `v` pointing away from `away`.
fn perpendicular_away(v: Point, away: Point) -> Point {
    let perp = Point::new(-v.y, v.x);
    if perp.dot(away) <= 0.0 { perp } else { -perp }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(origin: Point, size: f64) -> Vec<Point> {
        vec![
            origin,
            origin + Point::new(size, 0.0),
            origin + Point::new(size, size),
            origin + Point::new(0.0, size),
        ]
    }

    #[test]
    fn test_convex_hull_drops_interior_points() {
        let mut points = square(Point::ZERO, 10.0);
        points.push(Point::new(5.0, 5.0));
        points.push(Point::new(2.0, 3.0));
        let hull = convex_hull(&points);
        assert_eq!(hull.len(), 4);
        assert!(!hull.contains(&Point::new(5.0, 5.0)));
    }

    #[test]
    fn test_convex_hull_small_inputs_unchanged() {
        let two = vec![Point::ZERO, Point::new(1.0, 1.0)];
        assert_eq!(convex_hull(&two), two);
    }

    #[test]
    fn test_convex_hull_collinear() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
            Point::new(3.0, 3.0),
        ];
        let hull = convex_hull(&points);
        assert_eq!(hull.len(), 2);
    }

    #[test]
    fn test_overlapping_squares_intersect() {
        let a = square(Point::ZERO, 2.0);
        let b = square(Point::new(1.0, 1.0), 2.0);
        assert!(hulls_intersect(&a, &b));
    }

    #[test]
    fn test_touching_squares_intersect() {
        let a = square(Point::ZERO, 1.0);
        let b = square(Point::new(1.0, 0.0), 1.0);
        assert!(hulls_intersect(&a, &b));
    }

    #[test]
    fn test_separated_squares_do_not_intersect() {
        let a = square(Point::ZERO, 1.0);
        let b = square(Point::new(3.0, 3.0), 1.0);
        assert!(!hulls_intersect(&a, &b));
    }

    #[test]
    fn test_single_points() {
        let p = vec![Point::new(4.0, 4.0)];
        let q = vec![Point::new(4.0, 4.0)];
        let r = vec![Point::new(4.5, 4.0)];
        assert!(hulls_intersect(&p, &q));
        assert!(!hulls_intersect(&p, &r));
    }

    #[test]
    fn test_empty_hull() {
        assert!(!hulls_intersect(&[], &square(Point::ZERO, 1.0)));
    }

    #[test]
    fn test_point_inside_square() {
        let a = square(Point::ZERO, 4.0);
        let b = vec![Point::new(2.0, 2.0)];
        assert!(hulls_intersect(&a, &b));
    }
}
