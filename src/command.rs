//! The path command model.
//!
//! Commands mirror SVG path syntax: every variant except [`Command::ClosePath`]
//! carries an absolute/relative tag and one *or more* parameter tuples. A
//! multi-tuple command encodes the path-grammar shorthand of repeating a
//! command without restating its letter, so `l1 2 3 4` is one `LineTo` with
//! two tuples.

use crate::math::Point;

/// Whether a command's parameters are absolute coordinates or offsets from
/// the current point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandVariant {
    Absolute,
    Relative,
}

/// Elliptical arc size flag: take the smaller or the larger of the two
/// candidate arcs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcFlag {
    Small,
    Large,
}

/// Elliptical arc sweep direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepFlag {
    Anticlockwise,
    Clockwise,
}

/// Parameter tuple for a cubic Bézier curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicParameter {
    pub start_control: Point,
    pub end_control: Point,
    pub end: Point,
}

/// Parameter tuple for a smooth cubic Bézier curve. The start control point
/// is implicit: the reflection of the previous curve's end control about the
/// current point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothCubicParameter {
    pub end_control: Point,
    pub end: Point,
}

/// Parameter tuple for a quadratic Bézier curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticParameter {
    pub control: Point,
    pub end: Point,
}

/// Parameter tuple for an elliptical arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcParameter {
    pub radius_x: f64,
    pub radius_y: f64,
    /// Rotation of the ellipse's x-axis, in degrees.
    pub rotation: f64,
    pub arc: ArcFlag,
    pub sweep: SweepFlag,
    pub end: Point,
}

/// A path-drawing instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    MoveTo(CommandVariant, Vec<Point>),
    LineTo(CommandVariant, Vec<Point>),
    HorizontalLineTo(CommandVariant, Vec<f64>),
    VerticalLineTo(CommandVariant, Vec<f64>),
    CubicBezierCurve(CommandVariant, Vec<CubicParameter>),
    SmoothCubicBezierCurve(CommandVariant, Vec<SmoothCubicParameter>),
    QuadraticBezierCurve(CommandVariant, Vec<QuadraticParameter>),
    SmoothQuadraticBezierCurve(CommandVariant, Vec<Point>),
    EllipticalArcCurve(CommandVariant, Vec<ArcParameter>),
    ClosePath,
}

impl Command {
    /// The command's coordinate variant; ClosePath has none.
    pub fn variant(&self) -> Option<CommandVariant> {
        match self {
            Command::MoveTo(v, _)
            | Command::LineTo(v, _)
            | Command::HorizontalLineTo(v, _)
            | Command::VerticalLineTo(v, _)
            | Command::CubicBezierCurve(v, _)
            | Command::SmoothCubicBezierCurve(v, _)
            | Command::QuadraticBezierCurve(v, _)
            | Command::SmoothQuadraticBezierCurve(v, _)
            | Command::EllipticalArcCurve(v, _) => Some(*v),
            Command::ClosePath => None,
        }
    }

    /// Number of parameter tuples; 0 for ClosePath.
    pub fn parameter_count(&self) -> usize {
        match self {
            Command::MoveTo(_, p) | Command::LineTo(_, p) | Command::SmoothQuadraticBezierCurve(_, p) => p.len(),
            Command::HorizontalLineTo(_, p) | Command::VerticalLineTo(_, p) => p.len(),
            Command::CubicBezierCurve(_, p) => p.len(),
            Command::SmoothCubicBezierCurve(_, p) => p.len(),
            Command::QuadraticBezierCurve(_, p) => p.len(),
            Command::EllipticalArcCurve(_, p) => p.len(),
            Command::ClosePath => 0,
        }
    }

    /// True when both commands have the same kind and the same variant, i.e.
    /// their parameter tuples could legally live on one command.
    pub fn same_shape(&self, other: &Command) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
            && self.variant() == other.variant()
    }
}
