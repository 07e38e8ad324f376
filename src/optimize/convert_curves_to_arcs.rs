//! Replaces runs of circular cubic curves with elliptical arc commands.
//!
//! A relative cubic is a candidate when a circle fits through its sampled
//! points and its control polygon is convex. The match extends greedily over
//! following cubics that keep lying on the same circle (recentered into each
//! successor's frame), capped at one full turn. The candidate arc only
//! replaces the run when it wins under the configured criterion: fewer
//! commands, or a shorter printed form under the target format's printer.
//!
//! Emitted arcs use equal radii and zero rotation. A run spanning more than a
//! half turn cannot be expressed by one small-flag tuple, so the run is cut
//! into half-turn chunks, one arc tuple per chunk.

use std::f64::consts::PI;

/// Slack for angle-sum comparisons; exact quarter/half turns accumulate
/// floating-point error right at the chunk boundaries.
const ANGLE_SLACK: f64 = 1e-9;

use crate::command::{
    ArcFlag, ArcParameter, Command, CommandVariant, CubicParameter, SweepFlag,
};
use crate::curves::{find_arc_angle, fit_circle, is_convex, lies_on_circle};
use crate::element::Element;
use crate::math::{Circle, Point};
use crate::printer::CommandPrinter;
use crate::traversal::Visitor;

pub enum ArcCriterion {
    FewestCommands,
    ShortestPath(Box<dyn CommandPrinter>),
}

pub struct ConvertCurvesToArcs {
    tolerance: f64,
    criterion: ArcCriterion,
}

impl ConvertCurvesToArcs {
    pub fn new(tolerance: f64, criterion: ArcCriterion) -> Self {
        Self {
            tolerance,
            criterion,
        }
    }
}

impl Visitor for ConvertCurvesToArcs {
    fn visit(&mut self, element: &mut Element) {
        let Some(path) = element.as_path_mut() else {
            return;
        };

        let commands = normalize_smooth(std::mem::take(&mut path.commands));
        let mut i = 0;
        while i < commands.len() {
            let Some((curve, circle)) = candidate(&commands[i], self.tolerance) else {
                path.commands.push(commands[i].clone());
                i += 1;
                continue;
            };

            let run = extend_run(&commands[i..], curve, &circle, self.tolerance);
            let arc = arc_command(&run, &circle);
            if self.accepts(&run, &arc) {
                path.commands.push(arc);
                i += run.curves.len();
            } else {
                path.commands.push(commands[i].clone());
                i += 1;
            }
        }
    }
}

impl ConvertCurvesToArcs {
    fn accepts(&self, run: &Run, arc: &Command) -> bool {
        match &self.criterion {
            ArcCriterion::FewestCommands => run.curves.len() > 1,
            ArcCriterion::ShortestPath(printer) => {
                let original: usize = run
                    .curves
                    .iter()
                    .map(|c| {
                        printer
                            .print(&Command::CubicBezierCurve(
                                CommandVariant::Relative,
                                vec![*c],
                            ))
                            .len()
                    })
                    .sum();
                printer.print(arc).len() < original
            }
        }
    }
}

/// Rewrite smooth cubics into explicit form so every curve in the path can be
/// probed for circle membership. The reflected control in a successor's frame
/// is `prev.end - prev.end_control`.
fn normalize_smooth(commands: Vec<Command>) -> Vec<Command> {
    use CommandVariant::Relative;
    let mut out = Vec::with_capacity(commands.len());
    let mut reflected: Option<Point> = None;
    for command in commands {
        match command {
            Command::SmoothCubicBezierCurve(Relative, ref params) if params.len() == 1 => {
                let p = CubicParameter {
                    start_control: reflected.unwrap_or(Point::ZERO),
                    end_control: params[0].end_control,
                    end: params[0].end,
                };
                reflected = Some(p.end - p.end_control);
                out.push(Command::CubicBezierCurve(Relative, vec![p]));
            }
            Command::CubicBezierCurve(Relative, ref params) if params.len() == 1 => {
                reflected = Some(params[0].end - params[0].end_control);
                out.push(command);
            }
            other => {
                reflected = None;
                out.push(other);
            }
        }
    }
    out
}

fn candidate(command: &Command, tolerance: f64) -> Option<(CubicParameter, Circle)> {
    let Command::CubicBezierCurve(CommandVariant::Relative, params) = command else {
        return None;
    };
    let [p] = params.as_slice() else {
        return None;
    };
    if !is_convex(p) {
        return None;
    }
    let circle = fit_circle(p, tolerance)?;
    Some((*p, circle))
}

struct Run {
    curves: Vec<CubicParameter>,
    /// Angle subtended by each curve, in order.
    angles: Vec<f64>,
    sweep: SweepFlag,
}

/// Consume following cubics that stay on the (recentered) circle, stopping
/// before the accumulated angle exceeds a full turn.
fn extend_run(commands: &[Command], first: CubicParameter, circle: &Circle, tolerance: f64) -> Run {
    use CommandVariant::Relative;

    let sweep = if first.start_control.cross(first.end) > 0.0 {
        SweepFlag::Clockwise
    } else {
        SweepFlag::Anticlockwise
    };

    let mut run = Run {
        angles: vec![find_arc_angle(&first, circle)],
        curves: vec![first],
        sweep,
    };
    let mut center = circle.center - first.end;

    for command in &commands[1..] {
        let Command::CubicBezierCurve(Relative, params) = command else {
            break;
        };
        let [p] = params.as_slice() else {
            break;
        };
        let recentered = Circle::new(center, circle.radius);
        if !lies_on_circle(p, &recentered, tolerance) {
            break;
        }
        let angle = find_arc_angle(p, &recentered);
        if run.angles.iter().sum::<f64>() + angle > 2.0 * PI + ANGLE_SLACK {
            break;
        }
        run.angles.push(angle);
        run.curves.push(*p);
        center = center - p.end;
    }
    run
}

/// One relative arc command covering the run: one tuple per half-turn chunk.
fn arc_command(run: &Run, circle: &Circle) -> Command {
    let mut tuples: Vec<ArcParameter> = Vec::new();
    let mut chunk_angle = 0.0;
    let mut chunk_end = Point::ZERO;

    let flush = |angle: f64, end: Point, tuples: &mut Vec<ArcParameter>| {
        tuples.push(ArcParameter {
            radius_x: circle.radius,
            radius_y: circle.radius,
            rotation: 0.0,
            arc: if angle > PI + ANGLE_SLACK {
                ArcFlag::Large
            } else {
                ArcFlag::Small
            },
            sweep: run.sweep,
            end,
        });
    };

    for (curve, angle) in run.curves.iter().zip(&run.angles) {
        if chunk_angle > 0.0 && chunk_angle + angle > PI + ANGLE_SLACK {
            flush(chunk_angle, chunk_end, &mut tuples);
            chunk_angle = 0.0;
            chunk_end = Point::ZERO;
        }
        chunk_angle += angle;
        chunk_end = chunk_end + curve.end;
    }
    flush(chunk_angle, chunk_end, &mut tuples);

    Command::EllipticalArcCurve(CommandVariant::Relative, tuples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Path;
    use crate::printer::SvgPrinter;
    use CommandVariant::*;

    const KAPPA: f64 = 0.552_284_749_8;

    /// Quarter of a radius-10 circle centered at (0, 10), starting at the
    /// local origin heading along +x.
    fn quarter(radius: f64) -> CubicParameter {
        CubicParameter {
            start_control: Point::new(KAPPA * radius, 0.0),
            end_control: Point::new(radius, radius - KAPPA * radius),
            end: Point::new(radius, radius),
        }
    }

    /// The next quarter of the same circle, in its own relative frame.
    fn second_quarter(radius: f64) -> CubicParameter {
        CubicParameter {
            start_control: Point::new(0.0, KAPPA * radius),
            end_control: Point::new(-radius + KAPPA * radius, radius),
            end: Point::new(-radius, radius),
        }
    }

    fn run_pass(criterion: ArcCriterion, commands: Vec<Command>) -> Vec<Command> {
        let mut element = Element::Path(Path::with_commands(commands));
        ConvertCurvesToArcs::new(0.01, criterion).visit(&mut element);
        element.as_path().unwrap().commands.clone()
    }

    #[test]
    fn test_two_quarters_become_one_arc() {
        let result = run_pass(
            ArcCriterion::FewestCommands,
            vec![
                Command::MoveTo(Absolute, vec![Point::new(0.0, 0.0)]),
                Command::CubicBezierCurve(Relative, vec![quarter(10.0)]),
                Command::CubicBezierCurve(Relative, vec![second_quarter(10.0)]),
            ],
        );
        assert_eq!(result.len(), 2);
        let Command::EllipticalArcCurve(Relative, tuples) = &result[1] else {
            panic!("expected an arc, got {:?}", result[1]);
        };
        assert_eq!(tuples.len(), 1);
        assert!((tuples[0].radius_x - 10.0).abs() < 0.05);
        assert_eq!(tuples[0].sweep, SweepFlag::Clockwise);
        assert!(tuples[0].end.approx_eq(Point::new(0.0, 20.0), 1e-6));
    }

    #[test]
    fn test_single_curve_not_fewer_commands() {
        let commands = vec![Command::CubicBezierCurve(Relative, vec![quarter(10.0)])];
        let result = run_pass(ArcCriterion::FewestCommands, commands.clone());
        assert_eq!(result, commands);
    }

    #[test]
    fn test_single_curve_converts_when_printed_shorter() {
        let result = run_pass(
            ArcCriterion::ShortestPath(Box::new(SvgPrinter::default())),
            vec![Command::CubicBezierCurve(Relative, vec![quarter(10.0)])],
        );
        // "a10 10 0 0 1 10 10" beats "c5.523 0 10 4.477 10 10".
        assert!(matches!(result[0], Command::EllipticalArcCurve(..)));
    }

    #[test]
    fn test_non_circular_curve_untouched() {
        let commands = vec![Command::CubicBezierCurve(
            Relative,
            vec![CubicParameter {
                start_control: Point::new(1.0, 8.0),
                end_control: Point::new(9.0, 8.0),
                end: Point::new(10.0, 0.0),
            }],
        )];
        let result = run_pass(
            ArcCriterion::ShortestPath(Box::new(SvgPrinter::default())),
            commands.clone(),
        );
        assert_eq!(result, commands);
    }

    #[test]
    fn test_smooth_continuation_joins_run() {
        // The second quarter happens to mirror the first's end control, so it
        // can arrive as shorthand and still join the run after normalization.
        let smooth = crate::command::SmoothCubicParameter {
            end_control: second_quarter(10.0).end_control,
            end: second_quarter(10.0).end,
        };
        let result = run_pass(
            ArcCriterion::FewestCommands,
            vec![
                Command::CubicBezierCurve(Relative, vec![quarter(10.0)]),
                Command::SmoothCubicBezierCurve(Relative, vec![smooth]),
            ],
        );
        assert_eq!(result.len(), 1);
        assert!(matches!(result[0], Command::EllipticalArcCurve(..)));
    }

    #[test]
    fn test_full_circle_splits_into_half_turn_tuples() {
        let quarters = [
            quarter(10.0),
            second_quarter(10.0),
            CubicParameter {
                start_control: Point::new(-KAPPA * 10.0, 0.0),
                end_control: Point::new(-10.0, -10.0 + KAPPA * 10.0),
                end: Point::new(-10.0, -10.0),
            },
            CubicParameter {
                start_control: Point::new(0.0, -KAPPA * 10.0),
                end_control: Point::new(10.0 - KAPPA * 10.0, -10.0),
                end: Point::new(10.0, -10.0),
            },
        ];
        let commands = quarters
            .iter()
            .map(|q| Command::CubicBezierCurve(Relative, vec![*q]))
            .collect();
        let result = run_pass(ArcCriterion::FewestCommands, commands);
        assert_eq!(result.len(), 1);
        let Command::EllipticalArcCurve(Relative, tuples) = &result[0] else {
            panic!("expected an arc");
        };
        // Two half-turn tuples, each ending on the circle's diameter.
        assert_eq!(tuples.len(), 2);
        assert!(tuples[0].end.approx_eq(Point::new(0.0, 20.0), 1e-6));
        assert!(tuples[1].end.approx_eq(Point::new(0.0, -20.0), 1e-6));
    }
}
