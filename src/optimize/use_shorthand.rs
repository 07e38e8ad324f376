//! Rewrites explicit curves into their smooth shorthand where the shorthand
//! reconstructs the same control point.
//!
//! A cubic qualifies when its start control equals the reflection of the
//! preceding curve's end control about the current point; with no preceding
//! curve the shorthand's implicit control is the current point itself.
//! Quadratics follow the same rule against their single control point.

use crate::command::{Command, CommandVariant, SmoothCubicParameter};
use crate::element::Element;
use crate::math::Point;
use crate::resolver::Resolver;
use crate::traversal::Visitor;

const TOLERANCE: f64 = 1e-3;

pub struct UseShorthand;

impl Visitor for UseShorthand {
    fn visit(&mut self, element: &mut Element) {
        let Some(path) = element.as_path_mut() else {
            return;
        };

        let mut resolver = Resolver::new();
        // Absolute end controls of the directly preceding curve, if any.
        let mut prev_cubic_control: Option<Point> = None;
        let mut prev_quad_control: Option<Point> = None;

        let previous = std::mem::take(&mut path.commands);
        for command in previous {
            let current = resolver.current_point();
            let absolute = resolver
                .clone()
                .resolve(&command, CommandVariant::Absolute);
            resolver.advance(&command);

            let rewritten = match (&command, &absolute) {
                (
                    Command::CubicBezierCurve(variant, params),
                    Command::CubicBezierCurve(_, abs_params),
                ) if params.len() == 1 => {
                    let implied = reflect_or_current(prev_cubic_control, current);
                    prev_cubic_control = Some(abs_params[0].end_control);
                    prev_quad_control = None;
                    if abs_params[0].start_control.approx_eq(implied, TOLERANCE) {
                        Command::SmoothCubicBezierCurve(
                            *variant,
                            vec![SmoothCubicParameter {
                                end_control: params[0].end_control,
                                end: params[0].end,
                            }],
                        )
                    } else {
                        command
                    }
                }
                (
                    Command::QuadraticBezierCurve(variant, params),
                    Command::QuadraticBezierCurve(_, abs_params),
                ) if params.len() == 1 => {
                    let implied = reflect_or_current(prev_quad_control, current);
                    prev_quad_control = Some(abs_params[0].control);
                    prev_cubic_control = None;
                    if abs_params[0].control.approx_eq(implied, TOLERANCE) {
                        Command::SmoothQuadraticBezierCurve(*variant, vec![params[0].end])
                    } else {
                        command
                    }
                }
                (_, Command::CubicBezierCurve(_, abs_params)) => {
                    prev_cubic_control = abs_params.last().map(|p| p.end_control);
                    prev_quad_control = None;
                    command
                }
                (_, Command::SmoothCubicBezierCurve(_, abs_params)) => {
                    prev_cubic_control = abs_params.last().map(|p| p.end_control);
                    prev_quad_control = None;
                    command
                }
                (_, Command::QuadraticBezierCurve(_, abs_params)) => {
                    prev_quad_control = abs_params.last().map(|p| p.control);
                    prev_cubic_control = None;
                    command
                }
                (_, Command::SmoothQuadraticBezierCurve(_, abs_points)) => {
                    // A shorthand quadratic's control is itself implicit;
                    // track the reflection chain tuple by tuple.
                    let mut point = current;
                    for end in abs_points {
                        prev_quad_control =
                            Some(reflect_or_current(prev_quad_control, point));
                        point = *end;
                    }
                    prev_cubic_control = None;
                    command
                }
                _ => {
                    prev_cubic_control = None;
                    prev_quad_control = None;
                    command
                }
            };
            path.commands.push(rewritten);
        }
    }
}

fn reflect_or_current(control: Option<Point>, about: Point) -> Point {
    match control {
        Some(c) => about + (about - c),
        None => about,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandVariant::*;
    use crate::command::{CubicParameter, QuadraticParameter};
    use crate::element::Path;

    fn run(commands: Vec<Command>) -> Vec<Command> {
        let mut element = Element::Path(Path::with_commands(commands));
        UseShorthand.visit(&mut element);
        element.as_path().unwrap().commands.clone()
    }

    fn cubic(
        sc: (f64, f64),
        ec: (f64, f64),
        end: (f64, f64),
        variant: CommandVariant,
    ) -> Command {
        Command::CubicBezierCurve(
            variant,
            vec![CubicParameter {
                start_control: Point::new(sc.0, sc.1),
                end_control: Point::new(ec.0, ec.1),
                end: Point::new(end.0, end.1),
            }],
        )
    }

    #[test]
    fn test_reflected_cubic_becomes_smooth() {
        // The first curve ends at (4, 0) with end control (3, 2); reflecting
        // that control about the endpoint gives (5, -2), which is exactly the
        // second curve's start control.
        let result = run(vec![
            Command::MoveTo(Absolute, vec![Point::new(0.0, 0.0)]),
            cubic((1.0, 2.0), (3.0, 2.0), (4.0, 0.0), Absolute),
            cubic((5.0, -2.0), (7.0, -2.0), (8.0, 0.0), Absolute),
        ]);
        assert!(matches!(
            result[2],
            Command::SmoothCubicBezierCurve(Absolute, _)
        ));
    }

    #[test]
    fn test_unreflected_cubic_unchanged() {
        let commands = vec![
            Command::MoveTo(Absolute, vec![Point::new(0.0, 0.0)]),
            cubic((1.0, 2.0), (3.0, 2.0), (4.0, 0.0), Absolute),
            cubic((4.0, 3.0), (7.0, -2.0), (8.0, 0.0), Absolute),
        ];
        assert_eq!(run(commands.clone()), commands);
    }

    #[test]
    fn test_first_cubic_with_control_at_start_becomes_smooth() {
        // No preceding curve: the shorthand's implicit control is the
        // current point, so a curve starting with zero tangent qualifies.
        let result = run(vec![
            Command::MoveTo(Absolute, vec![Point::new(2.0, 2.0)]),
            cubic((2.0, 2.0), (5.0, 4.0), (6.0, 2.0), Absolute),
        ]);
        assert!(matches!(
            result[1],
            Command::SmoothCubicBezierCurve(Absolute, _)
        ));
    }

    #[test]
    fn test_relative_curves_compared_in_absolute_space() {
        let result = run(vec![
            Command::MoveTo(Absolute, vec![Point::new(0.0, 0.0)]),
            cubic((1.0, 2.0), (3.0, 2.0), (4.0, 0.0), Relative),
            cubic((1.0, -2.0), (3.0, -2.0), (4.0, 0.0), Relative),
        ]);
        assert!(matches!(
            result[2],
            Command::SmoothCubicBezierCurve(Relative, _)
        ));
    }

    #[test]
    fn test_quadratic_shorthand() {
        let result = run(vec![
            Command::MoveTo(Absolute, vec![Point::new(0.0, 0.0)]),
            Command::QuadraticBezierCurve(
                Absolute,
                vec![QuadraticParameter {
                    control: Point::new(2.0, 2.0),
                    end: Point::new(4.0, 0.0),
                }],
            ),
            Command::QuadraticBezierCurve(
                Absolute,
                vec![QuadraticParameter {
                    control: Point::new(6.0, -2.0),
                    end: Point::new(8.0, 0.0),
                }],
            ),
        ]);
        assert_eq!(
            result[2],
            Command::SmoothQuadraticBezierCurve(Absolute, vec![Point::new(8.0, 0.0)])
        );
    }

    #[test]
    fn test_intervening_line_breaks_the_chain() {
        let commands = vec![
            Command::MoveTo(Absolute, vec![Point::new(0.0, 0.0)]),
            cubic((1.0, 2.0), (3.0, 2.0), (4.0, 0.0), Absolute),
            Command::LineTo(Absolute, vec![Point::new(4.0, 4.0)]),
            cubic((5.0, 6.0), (7.0, 6.0), (8.0, 4.0), Absolute),
        ];
        assert_eq!(run(commands.clone()), commands);
    }
}
