//! Folds group transforms directly into descendant path coordinates, so the
//! transform itself can be dropped: one matrix multiply less per render, and
//! decorative-only groups collapse away.

use crate::command::{Command, CommandVariant};
use crate::element::{Element, Group};
use crate::math::{Matrix3, Point};
use crate::resolver::Resolver;
use crate::traversal::Visitor;

pub struct BakeTransformations;

/// How a matrix acts on elliptical-arc parameters.
enum TransformKind {
    Translation,
    /// Uniform scale + rotation: radii scale, the x-axis rotation shifts.
    Similarity { scale: f64, degrees: f64 },
    /// Shear or non-uniform scale: not expressible on arc parameters.
    General,
}

impl Visitor for BakeTransformations {
    fn visit(&mut self, element: &mut Element) {
        let Element::Group(group) = element else {
            return;
        };

        inline_decorative_groups(group);

        if group.transform.is_identity() {
            return;
        }
        if !group.children.iter().all(Element::is_path) {
            return;
        }

        let kind = classify(&group.transform);
        if matches!(kind, TransformKind::General) && any_path_has_arcs(group) {
            return;
        }

        let transform = group.transform;
        for child in &mut group.children {
            if let Element::Path(path) = child {
                path.commands = apply_transform(&path.commands, &transform, &kind);
            }
        }
        group.transform = Matrix3::IDENTITY;
    }
}

/// A child group with nothing of its own (no id, identity transform, no
/// foreign attributes) whose children are all paths contributes nothing; its
/// children replace it in this group's list.
fn inline_decorative_groups(group: &mut Group) {
    let children = std::mem::take(&mut group.children);
    for child in children {
        match child {
            Element::Group(inner)
                if inner.is_unmarked() && inner.children.iter().all(Element::is_path) =>
            {
                group.children.extend(inner.children);
            }
            other => group.children.push(other),
        }
    }
}

fn any_path_has_arcs(group: &Group) -> bool {
    group.children.iter().any(|child| {
        child
            .as_path()
            .is_some_and(|p| {
                p.commands
                    .iter()
                    .any(|c| matches!(c, Command::EllipticalArcCurve(..)))
            })
    })
}

fn classify(m: &Matrix3) -> TransformKind {
    let a = m.m[0][0];
    let c = m.m[0][1];
    let b = m.m[1][0];
    let d = m.m[1][1];

    let tolerance = 1e-9;
    if (a - 1.0).abs() <= tolerance
        && (d - 1.0).abs() <= tolerance
        && b.abs() <= tolerance
        && c.abs() <= tolerance
    {
        return TransformKind::Translation;
    }
    // Rotation by θ with uniform scale s: a = d = s·cosθ, b = -c = s·sinθ.
    if (a - d).abs() <= tolerance && (b + c).abs() <= tolerance {
        let scale = (a * a + b * b).sqrt();
        let degrees = b.atan2(a).to_degrees();
        return TransformKind::Similarity { scale, degrees };
    }
    TransformKind::General
}

/// Resolve everything to absolute coordinates, widen axis-aligned line
/// commands to general lines (rotation and shear break axis alignment), and
/// map every positional field through the matrix.
fn apply_transform(commands: &[Command], m: &Matrix3, kind: &TransformKind) -> Vec<Command> {
    let absolute = widen_axis_lines(&crate::resolver::convert(
        commands,
        CommandVariant::Absolute,
    ));

    absolute
        .into_iter()
        .map(|command| match command {
            Command::MoveTo(v, ps) => Command::MoveTo(v, ps.iter().map(|p| m.apply(*p)).collect()),
            Command::LineTo(v, ps) => Command::LineTo(v, ps.iter().map(|p| m.apply(*p)).collect()),
            Command::CubicBezierCurve(v, ps) => Command::CubicBezierCurve(
                v,
                ps.iter()
                    .map(|p| crate::command::CubicParameter {
                        start_control: m.apply(p.start_control),
                        end_control: m.apply(p.end_control),
                        end: m.apply(p.end),
                    })
                    .collect(),
            ),
            Command::SmoothCubicBezierCurve(v, ps) => Command::SmoothCubicBezierCurve(
                v,
                ps.iter()
                    .map(|p| crate::command::SmoothCubicParameter {
                        end_control: m.apply(p.end_control),
                        end: m.apply(p.end),
                    })
                    .collect(),
            ),
            Command::QuadraticBezierCurve(v, ps) => Command::QuadraticBezierCurve(
                v,
                ps.iter()
                    .map(|p| crate::command::QuadraticParameter {
                        control: m.apply(p.control),
                        end: m.apply(p.end),
                    })
                    .collect(),
            ),
            Command::SmoothQuadraticBezierCurve(v, ps) => Command::SmoothQuadraticBezierCurve(
                v,
                ps.iter().map(|p| m.apply(*p)).collect(),
            ),
            Command::EllipticalArcCurve(v, ps) => Command::EllipticalArcCurve(
                v,
                ps.iter()
                    .map(|p| {
                        let (radius_x, radius_y, rotation) = match kind {
                            TransformKind::Translation => (p.radius_x, p.radius_y, p.rotation),
                            TransformKind::Similarity { scale, degrees } => {
                                (p.radius_x * scale, p.radius_y * scale, p.rotation + degrees)
                            }
                            TransformKind::General => (p.radius_x, p.radius_y, p.rotation),
                        };
                        crate::command::ArcParameter {
                            radius_x,
                            radius_y,
                            rotation,
                            end: m.apply(p.end),
                            ..*p
                        }
                    })
                    .collect(),
            ),
            other @ (Command::HorizontalLineTo(..)
            | Command::VerticalLineTo(..)
            | Command::ClosePath) => other,
        })
        .collect()
}

/// Replace Horizontal/VerticalLineTo with general LineTo. Input must already
/// be absolute; a resolver supplies the cross-axis coordinate.
fn widen_axis_lines(commands: &[Command]) -> Vec<Command> {
    let mut resolver = Resolver::new();
    commands
        .iter()
        .map(|command| {
            let current = resolver.current_point();
            resolver.advance(command);
            match command {
                Command::HorizontalLineTo(v, xs) => {
                    Command::LineTo(*v, xs.iter().map(|x| Point::new(*x, current.y)).collect())
                }
                Command::VerticalLineTo(v, ys) => {
                    Command::LineTo(*v, ys.iter().map(|y| Point::new(current.x, *y)).collect())
                }
                other => other.clone(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Path;
    use crate::math::Point;
    use CommandVariant::*;

    fn group_with_path(transform: Matrix3, commands: Vec<Command>) -> Element {
        Element::Group(Group {
            transform,
            children: vec![Element::Path(Path::with_commands(commands))],
            ..Group::default()
        })
    }

    #[test]
    fn test_bake_translation() {
        let mut element = group_with_path(
            Matrix3::translate(14.0, 14.0),
            vec![
                Command::MoveTo(Absolute, vec![Point::new(10.0, 10.0)]),
                Command::LineTo(Absolute, vec![Point::new(40.0, 4.0)]),
            ],
        );
        BakeTransformations.visit(&mut element);

        let Element::Group(group) = &element else {
            unreachable!()
        };
        assert!(group.transform.is_identity());
        let path = group.children[0].as_path().unwrap();
        assert_eq!(
            path.commands,
            vec![
                Command::MoveTo(Absolute, vec![Point::new(24.0, 24.0)]),
                Command::LineTo(Absolute, vec![Point::new(54.0, 18.0)]),
            ]
        );
    }

    #[test]
    fn test_bake_widens_axis_lines_and_resolves_relative() {
        let mut element = group_with_path(
            Matrix3::rotate(std::f64::consts::FRAC_PI_2),
            vec![
                Command::MoveTo(Absolute, vec![Point::new(1.0, 0.0)]),
                Command::HorizontalLineTo(Relative, vec![2.0]),
            ],
        );
        BakeTransformations.visit(&mut element);

        let Element::Group(group) = &element else {
            unreachable!()
        };
        let path = group.children[0].as_path().unwrap();
        let Command::LineTo(Absolute, points) = &path.commands[1] else {
            panic!("horizontal line not widened: {:?}", path.commands[1]);
        };
        // (3, 0) rotated 90° is (0, 3).
        assert!(points[0].approx_eq(Point::new(0.0, 3.0), 1e-9));
    }

    #[test]
    fn test_skips_group_with_non_path_children() {
        let inner = Element::Group(Group {
            id: Some("kept".into()),
            ..Group::default()
        });
        let mut element = Element::Group(Group {
            transform: Matrix3::translate(5.0, 5.0),
            children: vec![inner],
            ..Group::default()
        });
        BakeTransformations.visit(&mut element);

        let Element::Group(group) = &element else {
            unreachable!()
        };
        assert!(!group.transform.is_identity());
    }

    #[test]
    fn test_inlines_decorative_child_group() {
        let decorative = Element::Group(Group {
            children: vec![Element::Path(Path::default())],
            ..Group::default()
        });
        let mut element = Element::Group(Group {
            children: vec![decorative],
            ..Group::default()
        });
        BakeTransformations.visit(&mut element);

        let Element::Group(group) = &element else {
            unreachable!()
        };
        assert_eq!(group.children.len(), 1);
        assert!(group.children[0].is_path());
    }

    #[test]
    fn test_arcs_block_shear_bake() {
        use crate::command::{ArcFlag, ArcParameter, SweepFlag};
        let shear = Matrix3::from_svg(1.0, 0.0, 1.5, 1.0, 0.0, 0.0);
        let mut element = group_with_path(
            shear,
            vec![
                Command::MoveTo(Absolute, vec![Point::ZERO]),
                Command::EllipticalArcCurve(
                    Absolute,
                    vec![ArcParameter {
                        radius_x: 5.0,
                        radius_y: 5.0,
                        rotation: 0.0,
                        arc: ArcFlag::Small,
                        sweep: SweepFlag::Clockwise,
                        end: Point::new(10.0, 0.0),
                    }],
                ),
            ],
        );
        BakeTransformations.visit(&mut element);

        let Element::Group(group) = &element else {
            unreachable!()
        };
        assert!(!group.transform.is_identity());
    }
}
