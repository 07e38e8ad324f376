//! Fuses consecutive commands of the same kind and variant back into one
//! multi-tuple command, undoing `BreakoutImplicitCommands` before emission.
//! Adjacent same-letter commands then print without the repeated letter. A
//! line following a move of the same variant folds into the move's tuple
//! list, where it serializes as an implicit line-to.

use crate::command::Command;
use crate::element::Element;
use crate::traversal::Visitor;

pub struct Polycommands;

impl Visitor for Polycommands {
    fn visit(&mut self, element: &mut Element) {
        let Some(path) = element.as_path_mut() else {
            return;
        };

        let previous = std::mem::take(&mut path.commands);
        for command in previous {
            if let Some(last) = path.commands.last_mut() {
                if fuse(last, &command) {
                    continue;
                }
            }
            path.commands.push(command);
        }
    }
}

/// Append `next`'s tuples onto `last` when the pair prints as one command.
fn fuse(last: &mut Command, next: &Command) -> bool {
    use Command::*;
    match (last, next) {
        // A move's trailing tuples serialize as implicit line-tos, so a line
        // may fold into a preceding move. Two moves never fuse: the second
        // tuple would stop being a move.
        (MoveTo(v1, a), LineTo(v2, b))
        | (LineTo(v1, a), LineTo(v2, b))
        | (SmoothQuadraticBezierCurve(v1, a), SmoothQuadraticBezierCurve(v2, b))
            if v1 == v2 =>
        {
            a.extend_from_slice(b);
            true
        }
        (HorizontalLineTo(v1, a), HorizontalLineTo(v2, b))
        | (VerticalLineTo(v1, a), VerticalLineTo(v2, b))
            if v1 == v2 =>
        {
            a.extend_from_slice(b);
            true
        }
        (CubicBezierCurve(v1, a), CubicBezierCurve(v2, b)) if v1 == v2 => {
            a.extend_from_slice(b);
            true
        }
        (SmoothCubicBezierCurve(v1, a), SmoothCubicBezierCurve(v2, b)) if v1 == v2 => {
            a.extend_from_slice(b);
            true
        }
        (QuadraticBezierCurve(v1, a), QuadraticBezierCurve(v2, b)) if v1 == v2 => {
            a.extend_from_slice(b);
            true
        }
        (EllipticalArcCurve(v1, a), EllipticalArcCurve(v2, b)) if v1 == v2 => {
            a.extend_from_slice(b);
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandVariant::*;
    use crate::element::Path;
    use crate::math::Point;

    fn run(commands: Vec<Command>) -> Vec<Command> {
        let mut element = Element::Path(Path::with_commands(commands));
        Polycommands.visit(&mut element);
        element.as_path().unwrap().commands.clone()
    }

    #[test]
    fn test_lines_fuse() {
        let result = run(vec![
            Command::LineTo(Relative, vec![Point::new(1.0, 0.0)]),
            Command::LineTo(Relative, vec![Point::new(0.0, 1.0)]),
        ]);
        assert_eq!(
            result,
            vec![Command::LineTo(
                Relative,
                vec![Point::new(1.0, 0.0), Point::new(0.0, 1.0)]
            )]
        );
    }

    #[test]
    fn test_line_folds_into_move() {
        let result = run(vec![
            Command::MoveTo(Relative, vec![Point::new(1.0, 1.0)]),
            Command::LineTo(Relative, vec![Point::new(2.0, 2.0)]),
        ]);
        assert_eq!(
            result,
            vec![Command::MoveTo(
                Relative,
                vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0)]
            )]
        );
    }

    #[test]
    fn test_mixed_variants_stay_apart() {
        let commands = vec![
            Command::LineTo(Relative, vec![Point::new(1.0, 0.0)]),
            Command::LineTo(Absolute, vec![Point::new(5.0, 5.0)]),
        ];
        assert_eq!(run(commands.clone()), commands);
    }

    #[test]
    fn test_close_path_breaks_runs() {
        let commands = vec![
            Command::LineTo(Relative, vec![Point::new(1.0, 0.0)]),
            Command::ClosePath,
            Command::LineTo(Relative, vec![Point::new(0.0, 1.0)]),
        ];
        assert_eq!(run(commands.clone()), commands);
    }

    #[test]
    fn test_horizontal_runs_fuse() {
        let result = run(vec![
            Command::HorizontalLineTo(Relative, vec![2.0]),
            Command::HorizontalLineTo(Relative, vec![-3.0]),
        ]);
        assert_eq!(
            result,
            vec![Command::HorizontalLineTo(Relative, vec![2.0, -3.0])]
        );
    }
}
