//! Parsing paths from their textual form.
//!
//! The grammar is a superset of SVG path data: the commands
//! `M L H V C S Q T A Z` with their SVG meanings (lower case for relative
//! coordinates), plus `E` for a native arc given as two auxiliary points and
//! an endpoint. Numbers are separated by whitespace or commas. Bare
//! coordinates repeat the previous command, except after a close where they
//! start a new contour. Parsing is all-or-nothing: an error discards
//! everything.

use crate::builder::PathBuilder;
use crate::geom::ArcFlags;
use crate::math::{point, vector, Angle, Point};
use crate::path::Path;
use std::str::Chars;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid number at line {line} column {column}")]
    Number { line: u32, column: u32 },
    #[error("expected a 0 or 1 flag at line {line} column {column}")]
    Flag { line: u32, column: u32 },
    #[error("invalid command {command:?} at line {line} column {column}")]
    Command {
        command: char,
        line: u32,
        column: u32,
    },
    #[error("expected a move-to command at line {line} column {column}")]
    MissingMoveTo { line: u32, column: u32 },
    #[error("negative arc radius at line {line} column {column}")]
    Radius { line: u32, column: u32 },
}

/// Parse a path from its textual form.
pub fn parse(src: &str) -> Result<Path, ParseError> {
    PathParser::new(src).parse()
}

struct Source<'l> {
    chars: Chars<'l>,
    current: Option<char>,
    line: u32,
    column: u32,
}

impl<'l> Source<'l> {
    fn new(src: &'l str) -> Self {
        let mut chars = src.chars();
        let current = chars.next();
        Source {
            chars,
            current,
            line: 1,
            column: 1,
        }
    }

    fn advance(&mut self) {
        if self.current == Some('\n') {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.current = self.chars.next();
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.clone().next()
    }

    // Commas count as whitespace so that coordinates can be comma separated.
    fn skip_whitespace(&mut self) {
        while let Some(c) = self.current {
            if !c.is_whitespace() && c != ',' {
                break;
            }
            self.advance();
        }
    }

    fn number_error(&self) -> ParseError {
        ParseError::Number {
            line: self.line,
            column: self.column,
        }
    }

    fn parse_number(&mut self) -> Result<f32, ParseError> {
        self.skip_whitespace();
        let error = self.number_error();

        let mut buffer = String::new();
        if let Some(c @ ('-' | '+')) = self.current {
            buffer.push(c);
            self.advance();
        }
        while let Some(c @ '0'..='9') = self.current {
            buffer.push(c);
            self.advance();
        }
        if self.current == Some('.') {
            buffer.push('.');
            self.advance();
            while let Some(c @ '0'..='9') = self.current {
                buffer.push(c);
                self.advance();
            }
        }
        // An exponent only if something follows that can belong to it,
        // otherwise the 'e' is the arc command.
        if let Some(c @ ('e' | 'E')) = self.current {
            let next = self.peek_next();
            if matches!(next, Some('0'..='9' | '-' | '+')) {
                buffer.push(c);
                self.advance();
                if let Some(c @ ('-' | '+')) = self.current {
                    buffer.push(c);
                    self.advance();
                }
                let mut has_digits = false;
                while let Some(c @ '0'..='9') = self.current {
                    buffer.push(c);
                    self.advance();
                    has_digits = true;
                }
                if !has_digits {
                    return Err(self.number_error());
                }
            }
        }

        buffer.parse::<f32>().map_err(|_| error)
    }

    fn parse_flag(&mut self) -> Result<bool, ParseError> {
        self.skip_whitespace();
        let flag = match self.current {
            Some('0') => false,
            Some('1') => true,
            _ => {
                return Err(ParseError::Flag {
                    line: self.line,
                    column: self.column,
                })
            }
        };
        self.advance();
        Ok(flag)
    }
}

struct PathParser<'l> {
    src: Source<'l>,
    builder: PathBuilder,
    current: Point,
    first: Point,
    last_cmd: char,
    last_quad_ctrl: Point,
    last_cubic_ctrl: Point,
}

impl<'l> PathParser<'l> {
    fn new(src: &'l str) -> Self {
        PathParser {
            src: Source::new(src),
            builder: PathBuilder::new(),
            current: Point::zero(),
            first: Point::zero(),
            last_cmd: '\u{0}',
            last_quad_ctrl: Point::zero(),
            last_cubic_ctrl: Point::zero(),
        }
    }

    fn parse(mut self) -> Result<Path, ParseError> {
        loop {
            self.src.skip_whitespace();
            let c = match self.src.current {
                Some(c) => c,
                None => break,
            };

            let cmd = if c.is_ascii_alphabetic() {
                self.src.advance();
                c
            } else {
                // Bare coordinates repeat the previous command; after a
                // close they start a new contour.
                match self.last_cmd {
                    'm' => 'l',
                    'M' => 'L',
                    'z' => 'm',
                    'Z' => 'M',
                    '\u{0}' => {
                        return Err(ParseError::MissingMoveTo {
                            line: self.src.line,
                            column: self.src.column,
                        })
                    }
                    cmd => cmd,
                }
            };

            if self.last_cmd == '\u{0}' && !matches!(cmd, 'm' | 'M') {
                return Err(ParseError::MissingMoveTo {
                    line: self.src.line,
                    column: self.src.column,
                });
            }

            self.run_command(cmd)?;
            self.last_cmd = cmd;
        }

        Ok(self.builder.build())
    }

    fn parse_pair(&mut self, relative: bool) -> Result<Point, ParseError> {
        let x = self.src.parse_number()?;
        let y = self.src.parse_number()?;
        let p = point(x, y);
        Ok(if relative {
            self.current + p.to_vector()
        } else {
            p
        })
    }

    fn run_command(&mut self, cmd: char) -> Result<(), ParseError> {
        let relative = cmd.is_ascii_lowercase();
        let mut quad_ctrl = None;
        let mut cubic_ctrl = None;

        match cmd {
            'm' | 'M' => {
                let to = self.parse_pair(relative)?;
                self.builder.move_to(to);
                self.first = to;
                self.current = to;
            }
            'l' | 'L' => {
                let to = self.parse_pair(relative)?;
                self.builder.line_to(to);
                self.current = to;
            }
            'h' | 'H' => {
                let x = self.src.parse_number()?;
                let to = if relative {
                    point(self.current.x + x, self.current.y)
                } else {
                    point(x, self.current.y)
                };
                self.builder.line_to(to);
                self.current = to;
            }
            'v' | 'V' => {
                let y = self.src.parse_number()?;
                let to = if relative {
                    point(self.current.x, self.current.y + y)
                } else {
                    point(self.current.x, y)
                };
                self.builder.line_to(to);
                self.current = to;
            }
            'q' | 'Q' => {
                let ctrl = self.parse_pair(relative)?;
                let to = self.parse_pair(relative)?;
                self.builder.quadratic_bezier_to(ctrl, to);
                quad_ctrl = Some(ctrl);
                self.current = to;
            }
            't' | 'T' => {
                let to = self.parse_pair(relative)?;
                let ctrl = if matches!(self.last_cmd, 'q' | 'Q' | 't' | 'T') {
                    self.current + (self.current - self.last_quad_ctrl)
                } else {
                    self.current
                };
                self.builder.quadratic_bezier_to(ctrl, to);
                quad_ctrl = Some(ctrl);
                self.current = to;
            }
            'c' | 'C' => {
                let ctrl1 = self.parse_pair(relative)?;
                let ctrl2 = self.parse_pair(relative)?;
                let to = self.parse_pair(relative)?;
                self.builder.cubic_bezier_to(ctrl1, ctrl2, to);
                cubic_ctrl = Some(ctrl2);
                self.current = to;
            }
            's' | 'S' => {
                let ctrl2 = self.parse_pair(relative)?;
                let to = self.parse_pair(relative)?;
                let ctrl1 = if matches!(self.last_cmd, 'c' | 'C' | 's' | 'S') {
                    self.current + (self.current - self.last_cubic_ctrl)
                } else {
                    self.current
                };
                self.builder.cubic_bezier_to(ctrl1, ctrl2, to);
                cubic_ctrl = Some(ctrl2);
                self.current = to;
            }
            'e' | 'E' => {
                let ctrl1 = self.parse_pair(relative)?;
                let ctrl2 = self.parse_pair(relative)?;
                let to = self.parse_pair(relative)?;
                self.builder.arc_to(ctrl1, ctrl2, to);
                self.current = to;
            }
            'a' | 'A' => {
                self.src.skip_whitespace();
                let radius_position = (self.src.line, self.src.column);
                let rx = self.src.parse_number()?;
                let ry = self.src.parse_number()?;
                if rx < 0.0 || ry < 0.0 {
                    return Err(ParseError::Radius {
                        line: radius_position.0,
                        column: radius_position.1,
                    });
                }
                let rotation = self.src.parse_number()?;
                let large_arc = self.src.parse_flag()?;
                let sweep = self.src.parse_flag()?;
                let to = self.parse_pair(relative)?;
                self.builder.svg_arc_to(
                    vector(rx, ry),
                    Angle::degrees(rotation),
                    ArcFlags { large_arc, sweep },
                    to,
                );
                self.current = to;
            }
            'z' | 'Z' => {
                self.builder.close();
                self.current = self.first;
            }
            _ => {
                return Err(ParseError::Command {
                    command: cmd,
                    line: self.src.line,
                    column: self.src.column,
                })
            }
        }

        self.last_quad_ctrl = quad_ctrl.unwrap_or(self.current);
        self.last_cubic_ctrl = cubic_ctrl.unwrap_or(self.current);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathOperation;
    use crate::ForeachFlags;

    fn operations(path: &Path) -> Vec<PathOperation> {
        let mut ops = Vec::new();
        path.for_each_default(ForeachFlags::all(), &mut |op| {
            ops.push(*op);
            true
        });
        ops
    }

    #[test]
    fn empty() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("   \n\t ").unwrap().is_empty());
    }

    #[test]
    fn simple_square() {
        let path = parse("M 0 0 L 1 0 L 1 1 L 0 1 Z").unwrap();
        assert_eq!(
            operations(&path),
            vec![
                PathOperation::Move { to: point(0.0, 0.0) },
                PathOperation::Line {
                    from: point(0.0, 0.0),
                    to: point(1.0, 0.0)
                },
                PathOperation::Line {
                    from: point(1.0, 0.0),
                    to: point(1.0, 1.0)
                },
                PathOperation::Line {
                    from: point(1.0, 1.0),
                    to: point(0.0, 1.0)
                },
                PathOperation::Close {
                    from: point(0.0, 1.0),
                    to: point(0.0, 0.0)
                },
            ]
        );
    }

    #[test]
    fn implicit_polyline() {
        // Bare pairs repeat the previous command.
        let a = parse("M 0 0 L 1 0 2 1 3 0").unwrap();
        let b = parse("M 0 0 L 1 0 L 2 1 L 3 0").unwrap();
        assert_eq!(operations(&a), operations(&b));

        // After a move, bare pairs draw lines.
        let c = parse("M 0 0 1 0 2 1 3 0").unwrap();
        assert_eq!(operations(&a), operations(&c));
    }

    #[test]
    fn implicit_move_after_close() {
        let a = parse("M 1 1 L 2 1 Z 3 3 L 4 4").unwrap();
        let b = parse("M 1 1 L 2 1 Z M 3 3 L 4 4").unwrap();
        assert_eq!(operations(&a), operations(&b));

        // A relative close reopens relative to the contour start.
        let c = parse("m 1 1 l 1 0 z 2 2 l 1 1").unwrap();
        let d = parse("M 1 1 L 2 1 Z M 3 3 L 4 4").unwrap();
        assert_eq!(operations(&c), operations(&d));
    }

    #[test]
    fn drawing_after_close_reopens_the_contour_start() {
        let path = parse("M 1 1 L 2 1 Z L 0 0").unwrap();
        let ops = operations(&path);
        assert_eq!(ops[3], PathOperation::Move { to: point(1.0, 1.0) });
        assert_eq!(
            ops[4],
            PathOperation::Line {
                from: point(1.0, 1.0),
                to: point(0.0, 0.0)
            }
        );
    }

    #[test]
    fn relative_commands() {
        let a = parse("m 1 2 l 3 0 v 2 h -3 z").unwrap();
        let b = parse("M 1 2 L 4 2 L 4 4 L 1 4 Z").unwrap();
        assert_eq!(operations(&a), operations(&b));
    }

    #[test]
    fn smooth_curves() {
        let path = parse("M 0 0 C 1 1 2 1 3 0 S 5 -1 6 0").unwrap();
        let ops = operations(&path);
        assert_eq!(
            ops[2],
            PathOperation::Cubic {
                from: point(3.0, 0.0),
                // The reflection of the previous control point.
                ctrl1: point(4.0, -1.0),
                ctrl2: point(5.0, -1.0),
                to: point(6.0, 0.0),
            }
        );

        // Without a preceding curve of the same family the current point is
        // used as the control point.
        let path = parse("M 0 0 L 1 0 T 3 0").unwrap();
        let ops = operations(&path);
        assert_eq!(
            ops[2],
            PathOperation::Quadratic {
                from: point(1.0, 0.0),
                ctrl: point(1.0, 0.0),
                to: point(3.0, 0.0),
            }
        );
    }

    #[test]
    fn smooth_quadratic_chain() {
        let path = parse("M 0 0 Q 1 1 2 0 T 4 0").unwrap();
        let ops = operations(&path);
        assert_eq!(
            ops[2],
            PathOperation::Quadratic {
                from: point(2.0, 0.0),
                ctrl: point(3.0, -1.0),
                to: point(4.0, 0.0),
            }
        );
    }

    #[test]
    fn numbers() {
        let path = parse("M 1e1 -2E-1").unwrap();
        let start = path.start_point().unwrap();
        assert_eq!(start.position(&path), Some(point(10.0, -0.2)));

        // Two numbers can share a decimal point boundary.
        let path = parse("M 0.6.5").unwrap();
        let start = path.start_point().unwrap();
        assert_eq!(start.position(&path), Some(point(0.6, 0.5)));

        let path = parse("M .5 -.5").unwrap();
        let start = path.start_point().unwrap();
        assert_eq!(start.position(&path), Some(point(0.5, -0.5)));

        // Commas work as separators.
        let path = parse("M 1,2 L 3,4").unwrap();
        assert_eq!(
            operations(&path)[1],
            PathOperation::Line {
                from: point(1.0, 2.0),
                to: point(3.0, 4.0)
            }
        );
    }

    #[test]
    fn exponent_vs_arc_command() {
        // The 'e' in 1e1 is an exponent, the later one is the arc command.
        let path = parse("M 0 0 L 1e1 0 E 11 1 12 1 13 0").unwrap();
        let ops = operations(&path);
        assert_eq!(
            ops[1],
            PathOperation::Line {
                from: point(0.0, 0.0),
                to: point(10.0, 0.0)
            }
        );
        assert!(matches!(ops[2], PathOperation::Arc { .. }));
    }

    #[test]
    fn native_arc() {
        let path = parse("M 0 0 E 1 2 3 2 4 0 e 1 2 3 2 4 0").unwrap();
        let ops = operations(&path);
        assert_eq!(
            ops[1],
            PathOperation::Arc {
                from: point(0.0, 0.0),
                ctrl1: point(1.0, 2.0),
                ctrl2: point(3.0, 2.0),
                to: point(4.0, 0.0),
            }
        );
        assert_eq!(
            ops[2],
            PathOperation::Arc {
                from: point(4.0, 0.0),
                ctrl1: point(5.0, 2.0),
                ctrl2: point(7.0, 2.0),
                to: point(8.0, 0.0),
            }
        );
    }

    #[test]
    fn svg_arc() {
        let path = parse("M 0 0 A 5 5 0 0 1 10 0").unwrap();
        let ops = operations(&path);
        assert!(ops.len() >= 2);
        for op in &ops[1..] {
            assert!(matches!(op, PathOperation::Arc { .. }));
        }
        match ops.last().unwrap() {
            PathOperation::Arc { to, .. } => assert_eq!(*to, point(10.0, 0.0)),
            other => panic!("expected an arc, got {:?}", other),
        }

        assert_eq!(
            parse("M 0 0 A -5 5 0 0 1 10 0").err(),
            Some(ParseError::Radius { line: 1, column: 9 })
        );
    }

    #[test]
    fn missing_move_to() {
        assert!(matches!(
            parse("L 1 0"),
            Err(ParseError::MissingMoveTo { .. })
        ));
        assert!(matches!(
            parse("1 0 2 0"),
            Err(ParseError::MissingMoveTo { .. })
        ));
    }

    #[test]
    fn invalid_command() {
        assert_eq!(
            parse("M 0 0\nP 1 1").err(),
            Some(ParseError::Command {
                command: 'P',
                line: 2,
                column: 2,
            })
        );
    }

    #[test]
    fn bad_numbers() {
        for src in ["M 0 0 L 1 abc", "M 1", "M 1 2 L", "M - 1", "M 1e 2"] {
            assert!(
                matches!(parse(src), Err(ParseError::Number { .. })),
                "{:?} should fail",
                src
            );
        }
    }

    #[test]
    fn bad_flags() {
        assert!(matches!(
            parse("M 0 0 A 5 5 0 2 1 10 0"),
            Err(ParseError::Flag { .. })
        ));
    }

    #[test]
    fn errors_discard_everything() {
        assert!(parse("M 0 0 L 10 0 L 10 10 Z M 5 5 L x").is_err());
    }
}
