//! Geometric primitives: points, affine matrices, segments, rectangles, circles.

use std::ops::{Add, Mul, Neg, Sub};

/// A 2-D point (or vector; the distinction is contextual).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// 2-D cross product (z component of the 3-D cross product).
    pub fn cross(self, other: Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn distance(self, other: Point) -> f64 {
        (self - other).length()
    }

    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn approx_eq(self, other: Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

/// A 3×3 affine transformation matrix, row-major.
///
/// Only the top two rows carry information for 2-D transforms; the bottom row
/// is (0, 0, 1) for every matrix this crate constructs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3 {
    pub m: [[f64; 3]; 3],
}

impl Matrix3 {
    pub const IDENTITY: Matrix3 = Matrix3 {
        m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    pub fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        Self { m: rows }
    }

    /// SVG `matrix(a b c d e f)` column ordering.
    pub fn from_svg(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self {
            m: [[a, c, e], [b, d, f], [0.0, 0.0, 1.0]],
        }
    }

    pub fn translate(tx: f64, ty: f64) -> Self {
        Self::from_svg(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Self::from_svg(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    pub fn rotate(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::from_svg(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// The `matrix(a b c d e f)` coefficients, inverse of [`Matrix3::from_svg`].
    pub fn to_svg(&self) -> [f64; 6] {
        [
            self.m[0][0],
            self.m[1][0],
            self.m[0][1],
            self.m[1][1],
            self.m[0][2],
            self.m[1][2],
        ]
    }

    /// Equality within a per-entry tolerance. Transforms that differ by less
    /// than the default tolerance are treated as the same transform
    /// everywhere in the optimizer.
    pub fn approx_eq(&self, other: &Matrix3, tolerance: f64) -> bool {
        self.m
            .iter()
            .flatten()
            .zip(other.m.iter().flatten())
            .all(|(a, b)| (a - b).abs() <= tolerance)
    }

    pub fn is_identity(&self) -> bool {
        self.approx_eq(&Matrix3::IDENTITY, 1e-3)
    }

    /// Map a point through the matrix as a homogeneous (x, y, 1) vector.
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.m[0][0] * p.x + self.m[0][1] * p.y + self.m[0][2],
            self.m[1][0] * p.x + self.m[1][1] * p.y + self.m[1][2],
        )
    }
}

impl Mul for Matrix3 {
    type Output = Matrix3;

    fn mul(self, rhs: Matrix3) -> Matrix3 {
        let mut out = [[0.0; 3]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| self.m[i][k] * rhs.m[k][j]).sum();
            }
        }
        Matrix3::from_rows(out)
    }
}

/// A bounded line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub start: Point,
    pub end: Point,
}

impl LineSegment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Intersection of the two bounded segments, solving the 2×2 linear
    /// system for the underlying lines. Returns None for near-parallel lines
    /// or an intersection outside either segment.
    pub fn intersection(&self, other: &LineSegment, tolerance: f64) -> Option<Point> {
        let d1 = self.end - self.start;
        let d2 = other.end - other.start;

        let denominator = d1.cross(d2);
        if denominator.abs() <= tolerance {
            return None;
        }

        let gap = other.start - self.start;
        let t = gap.cross(d2) / denominator;
        let u = gap.cross(d1) / denominator;

        if !(-tolerance..=1.0 + tolerance).contains(&t)
            || !(-tolerance..=1.0 + tolerance).contains(&u)
        {
            return None;
        }

        Some(self.start + d1 * t)
    }
}

/// An axis-aligned rectangle in SVG coordinates: a larger y is lower on the
/// canvas, so `top <= bottom` numerically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rectangle {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// A degenerate rectangle at a single point, ready to be expanded.
    pub fn at(p: Point) -> Self {
        Self::new(p.x, p.y, p.x, p.y)
    }

    pub fn expand(&mut self, p: Point) {
        self.left = self.left.min(p.x);
        self.top = self.top.min(p.y);
        self.right = self.right.max(p.x);
        self.bottom = self.bottom.max(p.y);
    }

    pub fn intersects(&self, other: &Rectangle) -> bool {
        self.left <= other.right
            && self.right >= other.left
            && self.top <= other.bottom
            && self.bottom >= other.top
    }
}

/// A circle, the target shape for curve-to-arc conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(3.0, -1.0);
        assert_eq!(a + b, Point::new(4.0, 1.0));
        assert_eq!(a - b, Point::new(-2.0, 3.0));
        assert_eq!(a * 2.0, Point::new(2.0, 4.0));
        assert_eq!(a.dot(b), 1.0);
        assert_eq!(a.cross(b), -7.0);
    }

    #[test]
    fn test_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
    }

    #[test]
    fn test_matrix_identity_apply() {
        let p = Point::new(5.0, -2.0);
        assert_eq!(Matrix3::IDENTITY.apply(p), p);
        assert!(Matrix3::IDENTITY.is_identity());
    }

    #[test]
    fn test_matrix_translate() {
        let m = Matrix3::translate(14.0, 14.0);
        assert_eq!(m.apply(Point::new(10.0, 10.0)), Point::new(24.0, 24.0));
        assert!(!m.is_identity());
    }

    #[test]
    fn test_matrix_compose() {
        let m = Matrix3::translate(10.0, 0.0) * Matrix3::scale(2.0, 2.0);
        // Scale first, then translate.
        assert_eq!(m.apply(Point::new(1.0, 1.0)), Point::new(12.0, 2.0));
    }

    #[test]
    fn test_matrix_rotate() {
        let m = Matrix3::rotate(std::f64::consts::FRAC_PI_2);
        let p = m.apply(Point::new(1.0, 0.0));
        assert!(p.approx_eq(Point::new(0.0, 1.0), 1e-9));
    }

    #[test]
    fn test_matrix_approx_eq_tolerance() {
        let near = Matrix3::from_svg(1.0, 0.0, 0.0, 1.0, 0.0005, 0.0);
        assert!(near.is_identity());
        let far = Matrix3::translate(0.01, 0.0);
        assert!(!far.is_identity());
    }

    #[test]
    fn test_segment_intersection() {
        let a = LineSegment::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        let b = LineSegment::new(Point::new(0.0, 10.0), Point::new(10.0, 0.0));
        let p = a.intersection(&b, 1e-9).unwrap();
        assert!(p.approx_eq(Point::new(5.0, 5.0), 1e-9));
    }

    #[test]
    fn test_segment_intersection_parallel() {
        let a = LineSegment::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        let b = LineSegment::new(Point::new(0.0, 1.0), Point::new(10.0, 1.0));
        assert!(a.intersection(&b, 1e-9).is_none());
    }

    #[test]
    fn test_segment_intersection_out_of_bounds() {
        let a = LineSegment::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0));
        let b = LineSegment::new(Point::new(5.0, 0.0), Point::new(5.0, 10.0));
        assert!(a.intersection(&b, 1e-9).is_none());
    }

    #[test]
    fn test_rectangle_intersects() {
        let a = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        let b = Rectangle::new(5.0, 5.0, 15.0, 15.0);
        let c = Rectangle::new(11.0, 11.0, 20.0, 20.0);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        // Shared edge counts as overlap.
        let d = Rectangle::new(10.0, 0.0, 20.0, 10.0);
        assert!(a.intersects(&d));
    }

    #[test]
    fn test_rectangle_expand() {
        let mut r = Rectangle::at(Point::new(3.0, 3.0));
        r.expand(Point::new(-1.0, 7.0));
        assert_eq!(r, Rectangle::new(-1.0, 3.0, 3.0, 7.0));
    }
}
