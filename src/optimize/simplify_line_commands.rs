//! Rewrites axis-aligned relative lines into single-coordinate commands and
//! coalesces adjacent runs along the same axis.
//!
//! Only single-tuple relative lines are rewritten; a multi-tuple line has no
//! single simplification target. Adjacent same-axis offsets are summed only
//! when they share a sign: an opposite-sign pair is a deliberate direction
//! reversal and stays two commands.

use crate::command::{Command, CommandVariant};
use crate::element::Element;
use crate::traversal::Visitor;

pub struct SimplifyLineCommands {
    tolerance: f64,
}

impl SimplifyLineCommands {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }
}

impl Visitor for SimplifyLineCommands {
    fn visit(&mut self, element: &mut Element) {
        let Some(path) = element.as_path_mut() else {
            return;
        };

        let previous = std::mem::take(&mut path.commands);
        for command in previous {
            let simplified = self.simplify(command);
            match coalesce(path.commands.last(), &simplified) {
                Some(coalesced) => {
                    path.commands.pop();
                    path.commands.push(coalesced);
                }
                None => path.commands.push(simplified),
            }
        }
    }
}

impl SimplifyLineCommands {
    fn simplify(&self, command: Command) -> Command {
        let Command::LineTo(CommandVariant::Relative, points) = &command else {
            return command;
        };
        let [p] = points.as_slice() else {
            return command;
        };

        if p.x.abs() <= self.tolerance {
            Command::VerticalLineTo(CommandVariant::Relative, vec![p.y])
        } else if p.y.abs() <= self.tolerance {
            Command::HorizontalLineTo(CommandVariant::Relative, vec![p.x])
        } else {
            command
        }
    }
}

fn coalesce(last: Option<&Command>, next: &Command) -> Option<Command> {
    use CommandVariant::Relative;
    match (last?, next) {
        (
            Command::HorizontalLineTo(Relative, a),
            Command::HorizontalLineTo(Relative, b),
        ) => match (a.as_slice(), b.as_slice()) {
            ([a], [b]) if a * b > 0.0 => {
                Some(Command::HorizontalLineTo(Relative, vec![a + b]))
            }
            _ => None,
        },
        (Command::VerticalLineTo(Relative, a), Command::VerticalLineTo(Relative, b)) => {
            match (a.as_slice(), b.as_slice()) {
                ([a], [b]) if a * b > 0.0 => {
                    Some(Command::VerticalLineTo(Relative, vec![a + b]))
                }
                _ => None,
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandVariant::*;
    use crate::element::Path;
    use crate::math::Point;

    fn run(tolerance: f64, commands: Vec<Command>) -> Vec<Command> {
        let mut element = Element::Path(Path::with_commands(commands));
        SimplifyLineCommands::new(tolerance).visit(&mut element);
        element.as_path().unwrap().commands.clone()
    }

    #[test]
    fn test_vertical_line() {
        let result = run(
            0.0,
            vec![Command::LineTo(Relative, vec![Point::new(0.0, 6.0)])],
        );
        assert_eq!(result, vec![Command::VerticalLineTo(Relative, vec![6.0])]);
    }

    #[test]
    fn test_horizontal_line_within_tolerance() {
        let result = run(
            0.01,
            vec![Command::LineTo(Relative, vec![Point::new(4.0, 0.005)])],
        );
        assert_eq!(result, vec![Command::HorizontalLineTo(Relative, vec![4.0])]);
    }

    #[test]
    fn test_diagonal_line_unchanged() {
        let commands = vec![Command::LineTo(Relative, vec![Point::new(3.0, 4.0)])];
        assert_eq!(run(0.0, commands.clone()), commands);
    }

    #[test]
    fn test_multi_tuple_line_unchanged() {
        let commands = vec![Command::LineTo(
            Relative,
            vec![Point::new(0.0, 2.0), Point::new(0.0, 3.0)],
        )];
        assert_eq!(run(0.0, commands.clone()), commands);
    }

    #[test]
    fn test_same_sign_offsets_coalesce() {
        let result = run(
            0.0,
            vec![
                Command::VerticalLineTo(Relative, vec![5.0]),
                Command::VerticalLineTo(Relative, vec![15.0]),
            ],
        );
        assert_eq!(result, vec![Command::VerticalLineTo(Relative, vec![20.0])]);
    }

    #[test]
    fn test_opposite_sign_offsets_stay_distinct() {
        let commands = vec![
            Command::VerticalLineTo(Relative, vec![12.0]),
            Command::VerticalLineTo(Relative, vec![-5.0]),
        ];
        assert_eq!(run(0.0, commands.clone()), commands);
    }

    #[test]
    fn test_simplified_lines_coalesce_across_conversion() {
        let result = run(
            0.0,
            vec![
                Command::LineTo(Relative, vec![Point::new(2.0, 0.0)]),
                Command::LineTo(Relative, vec![Point::new(3.0, 0.0)]),
            ],
        );
        assert_eq!(result, vec![Command::HorizontalLineTo(Relative, vec![5.0])]);
    }
}
