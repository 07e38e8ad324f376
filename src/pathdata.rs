//! SVG path-data parsing and writing.
//!
//! Path syntax: https://www.w3.org/TR/SVG/paths.html
//!
//! Repeated parameter tuples after one command letter stay attached to that
//! command as extra tuples, so `l1 2 3 4` parses to one LineTo with two
//! tuples. This matches how the command model encodes the repeat-without-
//! restating-the-letter shorthand.

use crate::command::{
    ArcFlag, ArcParameter, Command, CommandVariant, CubicParameter, QuadraticParameter,
    SmoothCubicParameter, SweepFlag,
};
use crate::error::WhittleError;
use crate::math::Point;
use crate::printer::{append_numbers, SvgPrinter};

/// Parse SVG path data into the command model.
pub fn parse_path_data(d: &str) -> Result<Vec<Command>, WhittleError> {
    PathDataParser::new(d).parse()
}

/// Write a command list as SVG path data, eliding repeated command letters
/// (including the implicit LineTo after a MoveTo of the same variant).
pub fn write_path_data(commands: &[Command], printer: &SvgPrinter) -> String {
    let mut out = String::new();
    let mut prev_letter: Option<char> = None;

    for command in commands {
        let letter = SvgPrinter::command_letter(command);
        // A repeated M letter cannot be elided: the extra tuples would turn
        // into implicit line-tos on reparse.
        let elide = match prev_letter {
            Some(prev) => {
                (prev == letter && !matches!(letter, 'Z' | 'z' | 'M' | 'm'))
                    || (prev == 'M' && letter == 'L')
                    || (prev == 'm' && letter == 'l')
            }
            None => false,
        };
        if !elide {
            out.push(letter);
        }
        append_numbers(&mut out, &printer.numbers(command));
        prev_letter = Some(letter);
    }

    out
}

struct PathDataParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> PathDataParser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn parse(&mut self) -> Result<Vec<Command>, WhittleError> {
        let mut commands = Vec::new();

        self.skip_whitespace();
        while !self.is_eof() {
            let Some(letter) = self.peek().filter(|c| c.is_ascii_alphabetic()) else {
                return Err(WhittleError::InvalidPath(format!(
                    "expected command letter at offset {}",
                    self.pos
                )));
            };
            self.advance();
            commands.push(self.parse_command(letter)?);
            self.skip_whitespace_and_comma();
        }

        Ok(commands)
    }

    fn parse_command(&mut self, letter: char) -> Result<Command, WhittleError> {
        let variant = if letter.is_ascii_lowercase() {
            CommandVariant::Relative
        } else {
            CommandVariant::Absolute
        };

        match letter.to_ascii_lowercase() {
            'm' => Ok(Command::MoveTo(variant, self.parse_points()?)),
            'l' => Ok(Command::LineTo(variant, self.parse_points()?)),
            'h' => Ok(Command::HorizontalLineTo(variant, self.parse_scalars()?)),
            'v' => Ok(Command::VerticalLineTo(variant, self.parse_scalars()?)),
            'c' => {
                let tuples = self.parse_tuples(|p| {
                    Ok(CubicParameter {
                        start_control: p.parse_point()?,
                        end_control: p.parse_point()?,
                        end: p.parse_point()?,
                    })
                })?;
                Ok(Command::CubicBezierCurve(variant, tuples))
            }
            's' => {
                let tuples = self.parse_tuples(|p| {
                    Ok(SmoothCubicParameter {
                        end_control: p.parse_point()?,
                        end: p.parse_point()?,
                    })
                })?;
                Ok(Command::SmoothCubicBezierCurve(variant, tuples))
            }
            'q' => {
                let tuples = self.parse_tuples(|p| {
                    Ok(QuadraticParameter {
                        control: p.parse_point()?,
                        end: p.parse_point()?,
                    })
                })?;
                Ok(Command::QuadraticBezierCurve(variant, tuples))
            }
            't' => Ok(Command::SmoothQuadraticBezierCurve(
                variant,
                self.parse_points()?,
            )),
            'a' => {
                let tuples = self.parse_tuples(|p| {
                    let radius_x = p.parse_number()?;
                    let radius_y = p.parse_number()?;
                    let rotation = p.parse_number()?;
                    let arc = if p.parse_flag()? {
                        ArcFlag::Large
                    } else {
                        ArcFlag::Small
                    };
                    let sweep = if p.parse_flag()? {
                        SweepFlag::Clockwise
                    } else {
                        SweepFlag::Anticlockwise
                    };
                    let end = p.parse_point()?;
                    Ok(ArcParameter {
                        radius_x,
                        radius_y,
                        rotation,
                        arc,
                        sweep,
                        end,
                    })
                })?;
                Ok(Command::EllipticalArcCurve(variant, tuples))
            }
            'z' => Ok(Command::ClosePath),
            other => Err(WhittleError::InvalidPath(format!(
                "unknown command: {other}"
            ))),
        }
    }

    /// One or more tuples: keep consuming while the next token starts a
    /// number.
    fn parse_tuples<T>(
        &mut self,
        mut tuple: impl FnMut(&mut Self) -> Result<T, WhittleError>,
    ) -> Result<Vec<T>, WhittleError> {
        let mut tuples = vec![tuple(self)?];
        loop {
            self.skip_whitespace_and_comma();
            match self.peek() {
                Some(c) if c.is_ascii_digit() || c == '-' || c == '+' || c == '.' => {
                    tuples.push(tuple(self)?);
                }
                _ => break,
            }
        }
        Ok(tuples)
    }

    fn parse_points(&mut self) -> Result<Vec<Point>, WhittleError> {
        self.parse_tuples(|p| p.parse_point())
    }

    fn parse_scalars(&mut self) -> Result<Vec<f64>, WhittleError> {
        self.parse_tuples(|p| p.parse_number())
    }

    fn parse_point(&mut self) -> Result<Point, WhittleError> {
        let x = self.parse_number()?;
        let y = self.parse_number()?;
        Ok(Point::new(x, y))
    }

    fn parse_number(&mut self) -> Result<f64, WhittleError> {
        self.skip_whitespace_and_comma();

        let start = self.pos;

        if matches!(self.peek(), Some('-') | Some('+')) {
            self.advance();
        }
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        if self.peek() == Some('.') {
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }
        if matches!(self.peek(), Some('e') | Some('E')) {
            self.advance();
            if matches!(self.peek(), Some('-') | Some('+')) {
                self.advance();
            }
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        let s = &self.input[start..self.pos];
        if s.is_empty() {
            return Err(WhittleError::InvalidPath(format!(
                "expected number at offset {start}"
            )));
        }
        s.parse()
            .map_err(|_| WhittleError::InvalidPath(format!("invalid number: {s}")))
    }

    fn parse_flag(&mut self) -> Result<bool, WhittleError> {
        self.skip_whitespace_and_comma();
        match self.next_char() {
            Some('0') => Ok(false),
            Some('1') => Ok(true),
            Some(c) => Err(WhittleError::InvalidPath(format!(
                "expected flag (0 or 1), got: {c}"
            ))),
            None => Err(WhittleError::InvalidPath("expected flag".into())),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.advance();
        }
    }

    fn skip_whitespace_and_comma(&mut self) {
        self.skip_whitespace();
        if self.peek() == Some(',') {
            self.advance();
        }
        self.skip_whitespace();
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn next_char(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }
}
