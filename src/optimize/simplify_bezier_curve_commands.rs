//! Straightens curves whose control points sit on the chord and normalizes
//! shorthand forms.
//!
//! All work happens on single-tuple relative curves, so the chord runs from
//! the origin to the tuple's endpoint and a preceding curve's reflected
//! control is `prev.end - prev.end_control` in the successor's frame. When a
//! curve collapses to a line, a following shorthand curve loses the
//! predecessor its implicit control reflects, so it is rewritten into
//! explicit form with that control spelled out. A shorthand with no
//! preceding curve at all cannot infer a control point and is demoted the
//! same way.

use crate::command::{Command, CommandVariant, CubicParameter, QuadraticParameter};
use crate::element::Element;
use crate::math::Point;
use crate::traversal::Visitor;

pub struct SimplifyBezierCurveCommands {
    tolerance: f64,
}

/// What the previous command contributes to a shorthand successor.
#[derive(Clone, Copy)]
enum Chain {
    /// Not a curve; a shorthand here has no control point to reflect.
    None,
    /// A curve we emitted; its reflected control, in the successor's frame.
    Curve(Point),
    /// A curve this pass replaced with a line; a shorthand successor must be
    /// rewritten explicit with this control to render the same.
    Removed(Point),
    /// A curve outside this pass's shape (absolute or multi-tuple); leave
    /// any shorthand successor untouched.
    Foreign,
}

impl SimplifyBezierCurveCommands {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Perpendicular deviation of a control point from the chord.
    fn on_chord(&self, control: Point, end: Point) -> bool {
        let length = end.length();
        if length <= self.tolerance {
            return control.length() <= self.tolerance;
        }
        (end.cross(control) / length).abs() <= self.tolerance
    }

    fn cubic_is_straight(&self, p: &CubicParameter) -> bool {
        self.on_chord(p.start_control, p.end) && self.on_chord(p.end_control, p.end)
    }

    /// Emit a relative cubic in its best form: line if straight, shorthand if
    /// the start control matches the chain's implied control, else explicit.
    fn emit_cubic(&self, p: CubicParameter, chain: Chain, out: &mut Vec<Command>) -> Chain {
        use CommandVariant::Relative;
        if self.cubic_is_straight(&p) {
            out.push(Command::LineTo(Relative, vec![p.end]));
            return Chain::Removed(p.end - p.end_control);
        }
        let implied = match chain {
            Chain::Curve(rc) => rc,
            _ => Point::ZERO,
        };
        let next = Chain::Curve(p.end - p.end_control);
        if !matches!(chain, Chain::Foreign) && p.start_control.approx_eq(implied, self.tolerance) {
            out.push(Command::SmoothCubicBezierCurve(
                Relative,
                vec![crate::command::SmoothCubicParameter {
                    end_control: p.end_control,
                    end: p.end,
                }],
            ));
        } else {
            out.push(Command::CubicBezierCurve(Relative, vec![p]));
        }
        next
    }

    fn emit_quadratic(
        &self,
        p: QuadraticParameter,
        chain: Chain,
        out: &mut Vec<Command>,
    ) -> Chain {
        use CommandVariant::Relative;
        if self.on_chord(p.control, p.end) {
            out.push(Command::LineTo(Relative, vec![p.end]));
            return Chain::Removed(p.end - p.control);
        }
        let implied = match chain {
            Chain::Curve(rc) => rc,
            _ => Point::ZERO,
        };
        let next = Chain::Curve(p.end - p.control);
        if !matches!(chain, Chain::Foreign) && p.control.approx_eq(implied, self.tolerance) {
            out.push(Command::SmoothQuadraticBezierCurve(Relative, vec![p.end]));
        } else {
            out.push(Command::QuadraticBezierCurve(Relative, vec![p]));
        }
        next
    }
}

impl Visitor for SimplifyBezierCurveCommands {
    fn visit(&mut self, element: &mut Element) {
        use CommandVariant::Relative;
        let Some(path) = element.as_path_mut() else {
            return;
        };

        let mut cubic_chain = Chain::None;
        let mut quad_chain = Chain::None;

        let previous = std::mem::take(&mut path.commands);
        for command in previous {
            match command {
                Command::CubicBezierCurve(Relative, ref params) if params.len() == 1 => {
                    cubic_chain = self.emit_cubic(params[0], cubic_chain, &mut path.commands);
                    quad_chain = Chain::None;
                }
                Command::SmoothCubicBezierCurve(Relative, ref params)
                    if params.len() == 1 =>
                {
                    match cubic_chain {
                        Chain::Foreign => {
                            path.commands.push(command);
                            cubic_chain = Chain::Foreign;
                        }
                        Chain::Curve(rc) | Chain::Removed(rc) => {
                            let explicit = CubicParameter {
                                start_control: rc,
                                end_control: params[0].end_control,
                                end: params[0].end,
                            };
                            cubic_chain =
                                self.emit_cubic(explicit, cubic_chain, &mut path.commands);
                        }
                        Chain::None => {
                            // No curve to reflect: the implicit control
                            // degenerates to the current point. Spell the
                            // curve out rather than promote it back.
                            let explicit = CubicParameter {
                                start_control: Point::ZERO,
                                end_control: params[0].end_control,
                                end: params[0].end,
                            };
                            if self.cubic_is_straight(&explicit) {
                                path.commands
                                    .push(Command::LineTo(Relative, vec![explicit.end]));
                                cubic_chain =
                                    Chain::Removed(explicit.end - explicit.end_control);
                            } else {
                                cubic_chain = Chain::Curve(explicit.end - explicit.end_control);
                                path.commands
                                    .push(Command::CubicBezierCurve(Relative, vec![explicit]));
                            }
                        }
                    }
                    quad_chain = Chain::None;
                }
                Command::QuadraticBezierCurve(Relative, ref params) if params.len() == 1 => {
                    quad_chain = self.emit_quadratic(params[0], quad_chain, &mut path.commands);
                    cubic_chain = Chain::None;
                }
                Command::SmoothQuadraticBezierCurve(Relative, ref points)
                    if points.len() == 1 =>
                {
                    match quad_chain {
                        Chain::Foreign => {
                            path.commands.push(command);
                            quad_chain = Chain::Foreign;
                        }
                        Chain::Curve(rc) | Chain::Removed(rc) => {
                            let explicit = QuadraticParameter {
                                control: rc,
                                end: points[0],
                            };
                            quad_chain =
                                self.emit_quadratic(explicit, quad_chain, &mut path.commands);
                        }
                        Chain::None => {
                            // No control to infer at all: the quadratic
                            // degenerates to its chord.
                            path.commands.push(Command::LineTo(Relative, vec![points[0]]));
                            quad_chain = Chain::Removed(points[0]);
                        }
                    }
                    cubic_chain = Chain::None;
                }
                Command::CubicBezierCurve(..) | Command::SmoothCubicBezierCurve(..) => {
                    cubic_chain = Chain::Foreign;
                    quad_chain = Chain::None;
                    path.commands.push(command);
                }
                Command::QuadraticBezierCurve(..)
                | Command::SmoothQuadraticBezierCurve(..) => {
                    quad_chain = Chain::Foreign;
                    cubic_chain = Chain::None;
                    path.commands.push(command);
                }
                other => {
                    cubic_chain = Chain::None;
                    quad_chain = Chain::None;
                    path.commands.push(other);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandVariant::*;
    use crate::command::SmoothCubicParameter;
    use crate::element::Path;

    fn run(tolerance: f64, commands: Vec<Command>) -> Vec<Command> {
        let mut element = Element::Path(Path::with_commands(commands));
        SimplifyBezierCurveCommands::new(tolerance).visit(&mut element);
        element.as_path().unwrap().commands.clone()
    }

    fn cubic(sc: (f64, f64), ec: (f64, f64), end: (f64, f64)) -> Command {
        Command::CubicBezierCurve(
            Relative,
            vec![CubicParameter {
                start_control: Point::new(sc.0, sc.1),
                end_control: Point::new(ec.0, ec.1),
                end: Point::new(end.0, end.1),
            }],
        )
    }

    #[test]
    fn test_straight_cubic_becomes_line() {
        let result = run(
            0.01,
            vec![cubic((1.0, 0.0), (3.0, 0.0), (4.0, 0.0))],
        );
        assert_eq!(
            result,
            vec![Command::LineTo(Relative, vec![Point::new(4.0, 0.0)])]
        );
    }

    #[test]
    fn test_bent_cubic_unchanged() {
        let commands = vec![cubic((1.0, 2.0), (3.0, 2.0), (4.0, 0.0))];
        assert_eq!(run(0.01, commands.clone()), commands);
    }

    #[test]
    fn test_shorthand_after_removed_curve_made_explicit() {
        // The straight curve goes away; the shorthand that reflected its end
        // control must carry the control explicitly.
        let result = run(
            0.01,
            vec![
                cubic((1.0, 0.0), (3.0, 0.0), (4.0, 0.0)),
                Command::SmoothCubicBezierCurve(
                    Relative,
                    vec![SmoothCubicParameter {
                        end_control: Point::new(3.0, 2.0),
                        end: Point::new(4.0, 0.0),
                    }],
                ),
            ],
        );
        assert_eq!(
            result,
            vec![
                Command::LineTo(Relative, vec![Point::new(4.0, 0.0)]),
                cubic((1.0, 0.0), (3.0, 2.0), (4.0, 0.0)),
            ]
        );
    }

    #[test]
    fn test_shorthand_with_no_predecessor_demoted() {
        let result = run(
            0.01,
            vec![Command::SmoothCubicBezierCurve(
                Relative,
                vec![SmoothCubicParameter {
                    end_control: Point::new(3.0, 2.0),
                    end: Point::new(4.0, 0.0),
                }],
            )],
        );
        assert_eq!(result, vec![cubic((0.0, 0.0), (3.0, 2.0), (4.0, 0.0))]);
    }

    #[test]
    fn test_promotes_reflected_cubic_to_shorthand() {
        let result = run(
            0.01,
            vec![
                cubic((1.0, 2.0), (3.0, 2.0), (4.0, 0.0)),
                cubic((1.0, -2.0), (3.0, -2.0), (4.0, 0.0)),
            ],
        );
        assert_eq!(
            result[1],
            Command::SmoothCubicBezierCurve(
                Relative,
                vec![SmoothCubicParameter {
                    end_control: Point::new(3.0, -2.0),
                    end: Point::new(4.0, 0.0),
                }]
            )
        );
    }

    #[test]
    fn test_quadratic_shorthand_without_predecessor_is_its_chord() {
        let result = run(
            0.01,
            vec![Command::SmoothQuadraticBezierCurve(
                Relative,
                vec![Point::new(5.0, 5.0)],
            )],
        );
        assert_eq!(
            result,
            vec![Command::LineTo(Relative, vec![Point::new(5.0, 5.0)])]
        );
    }

    #[test]
    fn test_legal_shorthand_kept() {
        let commands = vec![
            cubic((1.0, 2.0), (3.0, 2.0), (4.0, 0.0)),
            Command::SmoothCubicBezierCurve(
                Relative,
                vec![SmoothCubicParameter {
                    end_control: Point::new(3.0, -6.0),
                    end: Point::new(4.0, 0.0),
                }],
            ),
        ];
        assert_eq!(run(0.01, commands.clone()), commands);
    }
}
