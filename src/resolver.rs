//! Conversion of command sequences between absolute and relative coordinate
//! spaces.
//!
//! The resolver is stateful per path: it tracks the current point and a stack
//! of subpath start points. A MoveTo pushes the stack; a ClosePath pops it
//! and restores the current point. State advances tuple by tuple, so a
//! multi-tuple command updates the current point once per tuple, not once per
//! command. A fresh resolver is created per path visit; state never leaks
//! across paths.

use crate::command::{Command, CommandVariant};
use crate::math::Point;

/// Per-path coordinate-space state.
#[derive(Debug, Clone)]
pub struct Resolver {
    current: Point,
    subpath_start: Vec<Point>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver {
    pub fn new() -> Self {
        Self {
            current: Point::ZERO,
            subpath_start: Vec::new(),
        }
    }

    pub fn current_point(&self) -> Point {
        self.current
    }

    /// Rewrite one command into the target variant, advancing state.
    ///
    /// The first MoveTo of a path is always an absolute displacement from the
    /// origin regardless of its stated variant; because the current point
    /// starts at the origin, the general per-tuple translation handles that
    /// rule without a special case.
    pub fn resolve(&mut self, command: &Command, target: CommandVariant) -> Command {
        use CommandVariant::*;
        match command {
            Command::MoveTo(variant, parameters) => {
                let mut out = Vec::with_capacity(parameters.len());
                for (i, p) in parameters.iter().enumerate() {
                    let absolute = match variant {
                        Absolute => *p,
                        Relative => self.current + *p,
                    };
                    out.push(match target {
                        Absolute => absolute,
                        Relative => absolute - self.current,
                    });
                    self.current = absolute;
                    if i == 0 {
                        self.subpath_start.push(absolute);
                    }
                }
                Command::MoveTo(target, out)
            }
            Command::LineTo(variant, parameters) => {
                let mut out = Vec::with_capacity(parameters.len());
                for p in parameters {
                    let absolute = match variant {
                        Absolute => *p,
                        Relative => self.current + *p,
                    };
                    out.push(match target {
                        Absolute => absolute,
                        Relative => absolute - self.current,
                    });
                    self.current = absolute;
                }
                Command::LineTo(target, out)
            }
            Command::HorizontalLineTo(variant, parameters) => {
                let mut out = Vec::with_capacity(parameters.len());
                for x in parameters {
                    let absolute = match variant {
                        Absolute => *x,
                        Relative => self.current.x + *x,
                    };
                    out.push(match target {
                        Absolute => absolute,
                        Relative => absolute - self.current.x,
                    });
                    self.current.x = absolute;
                }
                Command::HorizontalLineTo(target, out)
            }
            Command::VerticalLineTo(variant, parameters) => {
                let mut out = Vec::with_capacity(parameters.len());
                for y in parameters {
                    let absolute = match variant {
                        Absolute => *y,
                        Relative => self.current.y + *y,
                    };
                    out.push(match target {
                        Absolute => absolute,
                        Relative => absolute - self.current.y,
                    });
                    self.current.y = absolute;
                }
                Command::VerticalLineTo(target, out)
            }
            Command::CubicBezierCurve(variant, parameters) => {
                let mut out = Vec::with_capacity(parameters.len());
                for p in parameters {
                    let offset = match variant {
                        Absolute => Point::ZERO,
                        Relative => self.current,
                    };
                    let absolute = crate::command::CubicParameter {
                        start_control: p.start_control + offset,
                        end_control: p.end_control + offset,
                        end: p.end + offset,
                    };
                    let back = match target {
                        Absolute => Point::ZERO,
                        Relative => self.current,
                    };
                    out.push(crate::command::CubicParameter {
                        start_control: absolute.start_control - back,
                        end_control: absolute.end_control - back,
                        end: absolute.end - back,
                    });
                    self.current = absolute.end;
                }
                Command::CubicBezierCurve(target, out)
            }
            Command::SmoothCubicBezierCurve(variant, parameters) => {
                let mut out = Vec::with_capacity(parameters.len());
                for p in parameters {
                    let offset = match variant {
                        Absolute => Point::ZERO,
                        Relative => self.current,
                    };
                    let absolute = crate::command::SmoothCubicParameter {
                        end_control: p.end_control + offset,
                        end: p.end + offset,
                    };
                    let back = match target {
                        Absolute => Point::ZERO,
                        Relative => self.current,
                    };
                    out.push(crate::command::SmoothCubicParameter {
                        end_control: absolute.end_control - back,
                        end: absolute.end - back,
                    });
                    self.current = absolute.end;
                }
                Command::SmoothCubicBezierCurve(target, out)
            }
            Command::QuadraticBezierCurve(variant, parameters) => {
                let mut out = Vec::with_capacity(parameters.len());
                for p in parameters {
                    let offset = match variant {
                        Absolute => Point::ZERO,
                        Relative => self.current,
                    };
                    let absolute = crate::command::QuadraticParameter {
                        control: p.control + offset,
                        end: p.end + offset,
                    };
                    let back = match target {
                        Absolute => Point::ZERO,
                        Relative => self.current,
                    };
                    out.push(crate::command::QuadraticParameter {
                        control: absolute.control - back,
                        end: absolute.end - back,
                    });
                    self.current = absolute.end;
                }
                Command::QuadraticBezierCurve(target, out)
            }
            Command::SmoothQuadraticBezierCurve(variant, parameters) => {
                let mut out = Vec::with_capacity(parameters.len());
                for p in parameters {
                    let absolute = match variant {
                        Absolute => *p,
                        Relative => self.current + *p,
                    };
                    out.push(match target {
                        Absolute => absolute,
                        Relative => absolute - self.current,
                    });
                    self.current = absolute;
                }
                Command::SmoothQuadraticBezierCurve(target, out)
            }
            Command::EllipticalArcCurve(variant, parameters) => {
                let mut out = Vec::with_capacity(parameters.len());
                for p in parameters {
                    let absolute_end = match variant {
                        Absolute => p.end,
                        Relative => self.current + p.end,
                    };
                    let end = match target {
                        Absolute => absolute_end,
                        Relative => absolute_end - self.current,
                    };
                    out.push(crate::command::ArcParameter { end, ..*p });
                    self.current = absolute_end;
                }
                Command::EllipticalArcCurve(target, out)
            }
            Command::ClosePath => {
                self.current = self
                    .subpath_start
                    .pop()
                    .expect("ClosePath without an open subpath");
                Command::ClosePath
            }
        }
    }

    /// Advance state past a command without rewriting it.
    pub fn advance(&mut self, command: &Command) {
        if let Some(variant) = command.variant() {
            self.resolve(command, variant);
        } else {
            self.resolve(command, CommandVariant::Absolute);
        }
    }
}

/// Rewrite a whole command list into the target variant.
pub fn convert(commands: &[Command], target: CommandVariant) -> Vec<Command> {
    let mut resolver = Resolver::new();
    commands
        .iter()
        .map(|c| resolver.resolve(c, target))
        .collect()
}
