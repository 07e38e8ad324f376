//! Drops commands that provably do not change the rendered path: relative
//! no-ops whose every stated offset is zero, and a final ClosePath whose
//! subpath already ends where it started.
//!
//! Smooth curves and arcs are never dropped; a zero-offset smooth curve can
//! still bulge through its reflected control, and a zero-offset arc's flags
//! can select a full sweep. A zero curve is also kept when a smooth curve of
//! the same family follows, since that successor reflects the zero curve's
//! control, not an earlier one's.

use crate::command::{Command, CommandVariant};
use crate::element::Element;
use crate::math::Point;
use crate::resolver::Resolver;
use crate::traversal::Visitor;

const EPSILON: f64 = 1e-3;

pub struct RemoveRedundantCommands;

impl Visitor for RemoveRedundantCommands {
    fn visit(&mut self, element: &mut Element) {
        let Some(path) = element.as_path_mut() else {
            return;
        };

        let mut resolver = Resolver::new();
        let mut subpath_starts: Vec<Point> = Vec::new();

        let previous = std::mem::take(&mut path.commands);
        let last = previous.len().saturating_sub(1);
        for (i, command) in previous.iter().enumerate() {
            if !path.commands.is_empty()
                && is_zero_displacement(command)
                && !reflected_by_successor(command, previous.get(i + 1))
            {
                // Zero displacement: skipping it leaves resolver state as-is.
                continue;
            }

            match command {
                Command::ClosePath => {
                    let redundant = i == last
                        && subpath_starts
                            .last()
                            .is_some_and(|start| resolver.current_point().approx_eq(*start, EPSILON));
                    if redundant {
                        continue;
                    }
                    subpath_starts.pop();
                }
                Command::MoveTo(variant, points) => {
                    if let Some(first) = points.first() {
                        let start = match variant {
                            CommandVariant::Absolute => *first,
                            CommandVariant::Relative => resolver.current_point() + *first,
                        };
                        subpath_starts.push(start);
                    }
                }
                _ => {}
            }
            resolver.advance(command);
            path.commands.push(command.clone());
        }
    }
}

/// Whether every stated offset of a droppable relative command is zero.
fn is_zero_displacement(command: &Command) -> bool {
    let zero = |v: f64| v.abs() <= EPSILON;
    let zero_point = |p: &Point| p.approx_eq(Point::ZERO, EPSILON);
    match command {
        Command::MoveTo(CommandVariant::Relative, points)
        | Command::LineTo(CommandVariant::Relative, points) => points.iter().all(zero_point),
        Command::HorizontalLineTo(CommandVariant::Relative, coords)
        | Command::VerticalLineTo(CommandVariant::Relative, coords) => {
            coords.iter().copied().all(zero)
        }
        Command::CubicBezierCurve(CommandVariant::Relative, params) => params.iter().all(|p| {
            zero_point(&p.start_control) && zero_point(&p.end_control) && zero_point(&p.end)
        }),
        Command::QuadraticBezierCurve(CommandVariant::Relative, params) => params
            .iter()
            .all(|p| zero_point(&p.control) && zero_point(&p.end)),
        _ => false,
    }
}

fn reflected_by_successor(command: &Command, next: Option<&Command>) -> bool {
    match (command, next) {
        (
            Command::CubicBezierCurve(..),
            Some(Command::SmoothCubicBezierCurve(..)),
        ) => true,
        (
            Command::QuadraticBezierCurve(..),
            Some(Command::SmoothQuadraticBezierCurve(..)),
        ) => true,
        _ => false,
    }
}
