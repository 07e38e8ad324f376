//! Bounding-box and perimeter-sample computation over a command list.
//!
//! The surveyor walks a path's commands, converting each to absolute form on
//! the fly with the same current-point/subpath-start tracking the resolver
//! uses. Curved commands are bounded by sampling four parametric points
//! (t = 0, 0.25, 0.75, 1); elliptical arcs get their own closed-form bounds.
//! The same samples feed convex-hull construction for overlap testing.

use crate::command::{ArcParameter, Command, CommandVariant, SweepFlag};
use crate::math::{Point, Rectangle};
use crate::resolver::Resolver;

const SAMPLES: [f64; 4] = [0.0, 0.25, 0.75, 1.0];

/// Axis-aligned bounds of everything the command list draws, or None for a
/// list that draws nothing.
pub fn find_bounding_box(commands: &[Command]) -> Option<Rectangle> {
    let mut points = sample_points(commands).into_iter();
    let mut bounds = Rectangle::at(points.next()?);
    for p in points {
        bounds.expand(p);
    }
    Some(bounds)
}

/// Absolute points outlining everything the command list draws: endpoints of
/// every tuple plus parametric samples along each curve.
pub fn sample_points(commands: &[Command]) -> Vec<Point> {
    let mut resolver = Resolver::new();
    let mut points = Vec::new();
    // Absolute trailing control points, for smooth-curve reflection.
    let mut prev_cubic_control: Option<Point> = None;
    let mut prev_quad_control: Option<Point> = None;

    for command in commands {
        let start = resolver.current_point();
        let absolute = resolver.resolve(command, CommandVariant::Absolute);

        match &absolute {
            Command::MoveTo(_, parameters) | Command::LineTo(_, parameters) => {
                if matches!(command, Command::LineTo(..)) {
                    points.push(start);
                }
                points.extend(parameters.iter().copied());
            }
            Command::HorizontalLineTo(_, parameters) => {
                points.push(start);
                points.extend(parameters.iter().map(|x| Point::new(*x, start.y)));
            }
            Command::VerticalLineTo(_, parameters) => {
                points.push(start);
                points.extend(parameters.iter().map(|y| Point::new(start.x, *y)));
            }
            Command::CubicBezierCurve(_, parameters) => {
                let mut s = start;
                for p in parameters {
                    points.extend(
                        SAMPLES
                            .iter()
                            .map(|t| cubic_point(s, p.start_control, p.end_control, p.end, *t)),
                    );
                    prev_cubic_control = Some(p.end_control);
                    s = p.end;
                }
            }
            Command::SmoothCubicBezierCurve(_, parameters) => {
                let mut s = start;
                for p in parameters {
                    let start_control = reflect(prev_cubic_control, s);
                    points.extend(
                        SAMPLES
                            .iter()
                            .map(|t| cubic_point(s, start_control, p.end_control, p.end, *t)),
                    );
                    prev_cubic_control = Some(p.end_control);
                    s = p.end;
                }
            }
            Command::QuadraticBezierCurve(_, parameters) => {
                let mut s = start;
                for p in parameters {
                    points.extend(
                        SAMPLES
                            .iter()
                            .map(|t| quadratic_point(s, p.control, p.end, *t)),
                    );
                    prev_quad_control = Some(p.control);
                    s = p.end;
                }
            }
            Command::SmoothQuadraticBezierCurve(_, parameters) => {
                let mut s = start;
                for end in parameters {
                    let control = reflect(prev_quad_control, s);
                    points.extend(SAMPLES.iter().map(|t| quadratic_point(s, control, *end, *t)));
                    prev_quad_control = Some(control);
                    s = *end;
                }
            }
            Command::EllipticalArcCurve(_, parameters) => {
                let mut s = start;
                for p in parameters {
                    points.extend(arc_bounds(s, p));
                    s = p.end;
                }
            }
            Command::ClosePath => {}
        }

        // A different command kind breaks the smooth-reflection chain.
        match command {
            Command::CubicBezierCurve(..) | Command::SmoothCubicBezierCurve(..) => {
                prev_quad_control = None;
            }
            Command::QuadraticBezierCurve(..) | Command::SmoothQuadraticBezierCurve(..) => {
                prev_cubic_control = None;
            }
            _ => {
                prev_cubic_control = None;
                prev_quad_control = None;
            }
        }
    }

    points
}

fn reflect(control: Option<Point>, about: Point) -> Point {
    match control {
        Some(c) => about + (about - c),
        None => about,
    }
}

fn cubic_point(s: Point, c1: Point, c2: Point, e: Point, t: f64) -> Point {
    let u = 1.0 - t;
    s * (u * u * u) + c1 * (3.0 * t * u * u) + c2 * (3.0 * t * t * u) + e * (t * t * t)
}

fn quadratic_point(s: Point, c: Point, e: Point, t: f64) -> Point {
    let u = 1.0 - t;
    s * (u * u) + c * (2.0 * t * u) + e * (t * t)
}

/// Points bounding one absolute elliptical arc: the two endpoints plus every
/// axis extreme of the ellipse that falls inside the swept angle range.
/// Follows the endpoint→center conversion of the SVG arc definition.
fn arc_bounds(start: Point, p: &ArcParameter) -> Vec<Point> {
    let mut points = vec![start, p.end];

    let Some((center, rx, ry, phi, theta1, delta)) = endpoint_to_center(start, p) else {
        return points;
    };

    // Angles of the axis-aligned extremes of the rotated ellipse.
    let theta_x = (-ry * phi.tan() / rx).atan();
    let theta_y = (ry / (rx * phi.tan())).atan();
    let candidates = [
        theta_x,
        theta_x + std::f64::consts::PI,
        theta_y,
        theta_y + std::f64::consts::PI,
    ];

    for theta in candidates {
        if theta.is_finite() && angle_in_sweep(theta, theta1, delta) {
            points.push(ellipse_point(center, rx, ry, phi, theta));
        }
    }

    points
}

/// SVG endpoint parameterization → center parameterization. Returns None for
/// degenerate arcs (zero radius or coincident endpoints), which draw as a
/// line or nothing.
fn endpoint_to_center(
    start: Point,
    p: &ArcParameter,
) -> Option<(Point, f64, f64, f64, f64, f64)> {
    let mut rx = p.radius_x.abs();
    let mut ry = p.radius_y.abs();
    if rx == 0.0 || ry == 0.0 || start.approx_eq(p.end, 1e-12) {
        return None;
    }

    let phi = p.rotation.to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();

    let half = (start - p.end) * 0.5;
    let x1p = cos_phi * half.x + sin_phi * half.y;
    let y1p = -sin_phi * half.x + cos_phi * half.y;

    // Radii too small to span the endpoints get scaled up uniformly.
    let lambda = x1p * x1p / (rx * rx) + y1p * y1p / (ry * ry);
    if lambda > 1.0 {
        let scale = lambda.sqrt();
        rx *= scale;
        ry *= scale;
    }

    let large = p.arc == crate::command::ArcFlag::Large;
    let sweep = p.sweep == SweepFlag::Clockwise;

    let numerator = rx * rx * ry * ry - rx * rx * y1p * y1p - ry * ry * x1p * x1p;
    let denominator = rx * rx * y1p * y1p + ry * ry * x1p * x1p;
    let mut coefficient = (numerator.max(0.0) / denominator).sqrt();
    if large == sweep {
        coefficient = -coefficient;
    }

    let cxp = coefficient * rx * y1p / ry;
    let cyp = -coefficient * ry * x1p / rx;

    let mid = (start + p.end) * 0.5;
    let center = Point::new(
        cos_phi * cxp - sin_phi * cyp + mid.x,
        sin_phi * cxp + cos_phi * cyp + mid.y,
    );

    let theta1 = ((y1p - cyp) / ry).atan2((x1p - cxp) / rx);
    let theta2 = ((-y1p - cyp) / ry).atan2((-x1p - cxp) / rx);
    let mut delta = theta2 - theta1;
    if sweep && delta < 0.0 {
        delta += std::f64::consts::TAU;
    } else if !sweep && delta > 0.0 {
        delta -= std::f64::consts::TAU;
    }

    Some((center, rx, ry, phi, theta1, delta))
}

fn ellipse_point(center: Point, rx: f64, ry: f64, phi: f64, theta: f64) -> Point {
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_t, cos_t) = theta.sin_cos();
    Point::new(
        center.x + rx * cos_t * cos_phi - ry * sin_t * sin_phi,
        center.y + rx * cos_t * sin_phi + ry * sin_t * cos_phi,
    )
}

fn angle_in_sweep(theta: f64, theta1: f64, delta: f64) -> bool {
    let tau = std::f64::consts::TAU;
    let normalized = (theta - theta1).rem_euclid(tau);
    if delta >= 0.0 {
        normalized <= delta
    } else {
        normalized - tau >= delta
    }
}
