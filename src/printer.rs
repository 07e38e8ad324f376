//! The command-printing capability.
//!
//! Several passes decide between two representations by comparing printed
//! lengths ("compact" variant selection, curve-to-arc conversion, the
//! length-constrained merge mode). They only require `print(&Command) ->
//! String` and look at nothing but the string's length, so the target format
//! supplies the printer.

use crate::command::{ArcParameter, Command, CommandVariant, SweepFlag};

/// Stringify one command into its serialized textual form.
pub trait CommandPrinter {
    fn print(&self, command: &Command) -> String;
}

/// SVG path-data printer with a fixed decimal precision.
#[derive(Debug, Clone, Copy)]
pub struct SvgPrinter {
    pub precision: u8,
}

impl Default for SvgPrinter {
    fn default() -> Self {
        Self { precision: 3 }
    }
}

impl SvgPrinter {
    pub fn new(precision: u8) -> Self {
        Self { precision }
    }

    pub fn command_letter(command: &Command) -> char {
        let upper = match command {
            Command::MoveTo(..) => 'M',
            Command::LineTo(..) => 'L',
            Command::HorizontalLineTo(..) => 'H',
            Command::VerticalLineTo(..) => 'V',
            Command::CubicBezierCurve(..) => 'C',
            Command::SmoothCubicBezierCurve(..) => 'S',
            Command::QuadraticBezierCurve(..) => 'Q',
            Command::SmoothQuadraticBezierCurve(..) => 'T',
            Command::EllipticalArcCurve(..) => 'A',
            Command::ClosePath => 'Z',
        };
        match command.variant() {
            Some(CommandVariant::Relative) => upper.to_ascii_lowercase(),
            _ => upper,
        }
    }

    pub(crate) fn numbers(&self, command: &Command) -> Vec<String> {
        let n = |v: f64| format_number(v, self.precision);
        match command {
            Command::MoveTo(_, ps)
            | Command::LineTo(_, ps)
            | Command::SmoothQuadraticBezierCurve(_, ps) => {
                ps.iter().flat_map(|p| [n(p.x), n(p.y)]).collect()
            }
            Command::HorizontalLineTo(_, ps) | Command::VerticalLineTo(_, ps) => {
                ps.iter().map(|v| n(*v)).collect()
            }
            Command::CubicBezierCurve(_, ps) => ps
                .iter()
                .flat_map(|p| {
                    [
                        n(p.start_control.x),
                        n(p.start_control.y),
                        n(p.end_control.x),
                        n(p.end_control.y),
                        n(p.end.x),
                        n(p.end.y),
                    ]
                })
                .collect(),
            Command::SmoothCubicBezierCurve(_, ps) => ps
                .iter()
                .flat_map(|p| {
                    [
                        n(p.end_control.x),
                        n(p.end_control.y),
                        n(p.end.x),
                        n(p.end.y),
                    ]
                })
                .collect(),
            Command::QuadraticBezierCurve(_, ps) => ps
                .iter()
                .flat_map(|p| [n(p.control.x), n(p.control.y), n(p.end.x), n(p.end.y)])
                .collect(),
            Command::EllipticalArcCurve(_, ps) => {
                ps.iter().flat_map(|p| arc_numbers(p, self.precision)).collect()
            }
            Command::ClosePath => Vec::new(),
        }
    }
}

fn arc_numbers(p: &ArcParameter, precision: u8) -> [String; 7] {
    [
        format_number(p.radius_x, precision),
        format_number(p.radius_y, precision),
        format_number(p.rotation, precision),
        if p.arc == crate::command::ArcFlag::Large {
            "1".into()
        } else {
            "0".into()
        },
        if p.sweep == SweepFlag::Clockwise {
            "1".into()
        } else {
            "0".into()
        },
        format_number(p.end.x, precision),
        format_number(p.end.y, precision),
    ]
}

impl CommandPrinter for SvgPrinter {
    fn print(&self, command: &Command) -> String {
        let mut out = String::new();
        out.push(Self::command_letter(command));
        append_numbers(&mut out, &self.numbers(command));
        out
    }
}

/// Append numbers with minimal separators: whitespace only where two tokens
/// would otherwise fuse into one number.
pub(crate) fn append_numbers(out: &mut String, numbers: &[String]) {
    for number in numbers {
        if needs_separator(out, number) {
            out.push(' ');
        }
        out.push_str(number);
    }
}

fn needs_separator(out: &str, next: &str) -> bool {
    let Some(last) = out.chars().last() else {
        return false;
    };
    let Some(first) = next.chars().next() else {
        return false;
    };
    (last.is_ascii_digit() || last == '.') && (first.is_ascii_digit() || first == '.')
}

/// Format a number with the given precision, dropping redundant characters:
/// trailing zeros, a trailing decimal point, and a leading zero before the
/// decimal point.
pub fn format_number(n: f64, precision: u8) -> String {
    let factor = 10f64.powi(precision as i32);
    let rounded = (n * factor).round() / factor;

    if rounded == 0.0 {
        return "0".into();
    }
    if rounded.fract() == 0.0 && rounded.abs() < i64::MAX as f64 {
        return format!("{}", rounded as i64);
    }

    let mut buffer = ryu::Buffer::new();
    let mut s = buffer.format(rounded).to_string();

    if s.contains('.') {
        s = s.trim_end_matches('0').trim_end_matches('.').to_string();
    }
    if let Some(rest) = s.strip_prefix("0.") {
        s = format!(".{rest}");
    } else if let Some(rest) = s.strip_prefix("-0.") {
        s = format!("-.{rest}");
    }

    s
}
