//! Splits multi-tuple commands into one command per tuple. A move's trailing
//! tuples are implicit line-tos, so they come back out as explicit `LineTo`
//! commands of the same variant.
//!
//! Downstream passes rewrite commands tuple by tuple; running after this pass
//! lets them reason about exactly one tuple per command. `Polycommands` at
//! the end of the pipeline re-fuses whatever remained adjacent.

use crate::command::Command;
use crate::element::Element;
use crate::traversal::Visitor;

pub struct BreakoutImplicitCommands;

impl Visitor for BreakoutImplicitCommands {
    fn visit(&mut self, element: &mut Element) {
        let Some(path) = element.as_path_mut() else {
            return;
        };

        let previous = std::mem::take(&mut path.commands);
        for command in previous {
            breakout(command, &mut path.commands);
        }
    }
}

fn breakout(command: Command, out: &mut Vec<Command>) {
    match command {
        Command::MoveTo(variant, points) => {
            let mut points = points.into_iter();
            if let Some(first) = points.next() {
                out.push(Command::MoveTo(variant, vec![first]));
            }
            out.extend(points.map(|p| Command::LineTo(variant, vec![p])));
        }
        Command::LineTo(variant, points) => {
            out.extend(points.into_iter().map(|p| Command::LineTo(variant, vec![p])));
        }
        Command::HorizontalLineTo(variant, coords) => out.extend(
            coords
                .into_iter()
                .map(|c| Command::HorizontalLineTo(variant, vec![c])),
        ),
        Command::VerticalLineTo(variant, coords) => out.extend(
            coords
                .into_iter()
                .map(|c| Command::VerticalLineTo(variant, vec![c])),
        ),
        Command::CubicBezierCurve(variant, params) => out.extend(
            params
                .into_iter()
                .map(|p| Command::CubicBezierCurve(variant, vec![p])),
        ),
        Command::SmoothCubicBezierCurve(variant, params) => out.extend(
            params
                .into_iter()
                .map(|p| Command::SmoothCubicBezierCurve(variant, vec![p])),
        ),
        Command::QuadraticBezierCurve(variant, params) => out.extend(
            params
                .into_iter()
                .map(|p| Command::QuadraticBezierCurve(variant, vec![p])),
        ),
        Command::SmoothQuadraticBezierCurve(variant, points) => out.extend(
            points
                .into_iter()
                .map(|p| Command::SmoothQuadraticBezierCurve(variant, vec![p])),
        ),
        Command::EllipticalArcCurve(variant, params) => out.extend(
            params
                .into_iter()
                .map(|p| Command::EllipticalArcCurve(variant, vec![p])),
        ),
        Command::ClosePath => out.push(Command::ClosePath),
    }
}
