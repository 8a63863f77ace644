// Copyright 2026 the Diskspline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Polyline-and-arc paths, and their SVG path data representation.
//!
//! Outlines are emitted as straight segments between adaptively placed
//! samples, with elliptical arcs only for round end caps, so the path type
//! here covers exactly the `M`, `L`, `A` and `Z` commands.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Write as _};

use crate::{Point, Vec2};

/// A path made of lines and SVG elliptical arcs, possibly with several subpaths.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Path(Vec<PathEl>);

/// An element of a [`Path`].
///
/// A valid path has `MoveTo` at the beginning of each subpath.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathEl {
    /// `M`: start a new subpath at the given point.
    MoveTo(Point),
    /// `L`: straight line from the current point.
    LineTo(Point),
    /// `A`: elliptical arc from the current point.
    ArcTo(SvgArc),
    /// `Z`: close the current subpath.
    ClosePath,
}

/// The parameters of an SVG `A` command.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SvgArc {
    /// The x and y radii of the ellipse.
    pub radii: Vec2,
    /// Rotation of the ellipse's x axis, in degrees.
    pub x_rotation: f64,
    /// Take the longer of the two candidate arcs.
    pub large_arc: bool,
    /// Sweep in the positive-angle direction.
    pub sweep: bool,
    /// The end point.
    pub to: Point,
}

impl SvgArc {
    /// A half circle of the given radius ending at `to`.
    pub fn semicircle(radius: f64, sweep: bool, to: Point) -> SvgArc {
        SvgArc {
            radii: Vec2::new(radius, radius),
            x_rotation: 0.0,
            large_arc: false,
            sweep,
            to,
        }
    }
}

impl PathEl {
    /// The point this element ends at, if it has one.
    pub fn end_point(&self) -> Option<Point> {
        match *self {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(p),
            PathEl::ArcTo(arc) => Some(arc.to),
            PathEl::ClosePath => None,
        }
    }
}

impl Path {
    /// Create a new, empty path.
    pub fn new() -> Path {
        Path::default()
    }

    /// Create a path from a vector of path elements.
    pub fn from_vec(v: Vec<PathEl>) -> Path {
        Path(v)
    }

    /// Push a generic path element onto the path.
    pub fn push(&mut self, el: PathEl) {
        self.0.push(el);
    }

    /// Push a "move to" element onto the path.
    pub fn move_to<P: Into<Point>>(&mut self, p: P) {
        self.push(PathEl::MoveTo(p.into()));
    }

    /// Push a "line to" element onto the path.
    pub fn line_to<P: Into<Point>>(&mut self, p: P) {
        self.push(PathEl::LineTo(p.into()));
    }

    /// Push an arc element onto the path.
    pub fn arc_to(&mut self, arc: SvgArc) {
        self.push(PathEl::ArcTo(arc));
    }

    /// Push a "close path" element onto the path.
    pub fn close_path(&mut self) {
        self.push(PathEl::ClosePath);
    }

    /// Get the path elements.
    pub fn elements(&self) -> &[PathEl] {
        &self.0
    }

    /// Returns `true` if the path has no elements at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the end points of the elements, in order.
    ///
    /// `ClosePath` elements contribute nothing.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.0.iter().filter_map(PathEl::end_point)
    }

    /// Returns `true` if the path contains an arc.
    pub fn has_arcs(&self) -> bool {
        self.0.iter().any(|el| matches!(el, PathEl::ArcTo(_)))
    }

    /// Convert the path to an SVG path string representation.
    ///
    /// Coordinates are written at full precision; no attempt is made to
    /// shorten the string.
    pub fn to_svg(&self) -> String {
        let mut result = String::new();
        // Writing into a String cannot fail.
        let _ = write!(result, "{self}");
        result
    }

    /// Parse SVG path data made of `M`, `L`, `A` and `Z` commands.
    ///
    /// Relative (lower-case) commands and implicitly repeated arguments are
    /// accepted; the result holds absolute coordinates.
    pub fn from_svg(data: &str) -> Result<Path, SvgParseError> {
        let mut lexer = SvgLexer::new(data);
        let mut path = Path::new();
        let mut last_cmd = 0;
        let mut subpath_start = Point::ZERO;
        while let Some(c) = lexer.get_cmd(last_cmd)? {
            if path.is_empty() && c != b'M' && c != b'm' {
                return Err(SvgParseError::MissingMoveTo);
            }
            match c {
                b'M' | b'm' => {
                    let pt = lexer.get_maybe_relative(c)?;
                    path.move_to(pt);
                    lexer.last_pt = pt;
                    subpath_start = pt;
                    // Further coordinate pairs are implicit line commands.
                    last_cmd = if c == b'm' { b'l' } else { b'L' };
                }
                b'L' | b'l' => {
                    let pt = lexer.get_maybe_relative(c)?;
                    path.line_to(pt);
                    lexer.last_pt = pt;
                    last_cmd = c;
                }
                b'A' | b'a' => {
                    let rx = lexer.get_number()?;
                    let ry = lexer.get_number()?;
                    let x_rotation = lexer.get_number()?;
                    let large_arc = lexer.get_flag()?;
                    let sweep = lexer.get_flag()?;
                    let to = lexer.get_maybe_relative(c)?;
                    path.arc_to(SvgArc {
                        radii: Vec2::new(rx, ry),
                        x_rotation,
                        large_arc,
                        sweep,
                        to,
                    });
                    lexer.last_pt = to;
                    last_cmd = c;
                }
                b'Z' | b'z' => {
                    path.close_path();
                    lexer.last_pt = subpath_start;
                    last_cmd = 0;
                }
                _ => return Err(SvgParseError::UnknownCommand(c as char)),
            }
        }
        Ok(path)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut iter = self.0.iter();
        if let Some(el) = iter.next() {
            write!(f, "{el}")?;
        }
        for el in iter {
            write!(f, " {el}")?;
        }
        Ok(())
    }
}

impl fmt::Display for PathEl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathEl::MoveTo(p) => write!(f, "M{} {}", p.x, p.y),
            PathEl::LineTo(p) => write!(f, "L{} {}", p.x, p.y),
            PathEl::ArcTo(arc) => write!(
                f,
                "A{} {} {} {} {} {} {}",
                arc.radii.x,
                arc.radii.y,
                arc.x_rotation,
                u8::from(arc.large_arc),
                u8::from(arc.sweep),
                arc.to.x,
                arc.to.y
            ),
            PathEl::ClosePath => write!(f, "Z"),
        }
    }
}

/// An error which can be returned when parsing SVG path data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum SvgParseError {
    /// A number or flag was expected.
    Wrong,
    /// The input string ended while still expecting input.
    UnexpectedEof,
    /// Encountered a command letter outside `M`, `L`, `A` and `Z`.
    UnknownCommand(char),
    /// The path did not start with a move command.
    MissingMoveTo,
}

impl fmt::Display for SvgParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SvgParseError::Wrong => write!(f, "Unable to parse a number"),
            SvgParseError::UnexpectedEof => write!(f, "Unexpected EOF"),
            SvgParseError::UnknownCommand(letter) => write!(f, "Unknown command, \"{letter}\""),
            SvgParseError::MissingMoveTo => write!(f, "Path data must start with a move command"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SvgParseError {}

struct SvgLexer<'a> {
    data: &'a str,
    ix: usize,
    last_pt: Point,
}

impl<'a> SvgLexer<'a> {
    fn new(data: &'a str) -> SvgLexer<'a> {
        SvgLexer {
            data,
            ix: 0,
            last_pt: Point::ZERO,
        }
    }

    fn skip_ws(&mut self) {
        while let Some(&c) = self.data.as_bytes().get(self.ix) {
            if !(c == b' ' || c == 9 || c == 10 || c == 12 || c == 13) {
                break;
            }
            self.ix += 1;
        }
    }

    fn get_cmd(&mut self, last_cmd: u8) -> Result<Option<u8>, SvgParseError> {
        self.skip_ws();
        let Some(c) = self.get_byte() else {
            return Ok(None);
        };
        if c.is_ascii_alphabetic() {
            Ok(Some(c))
        } else if last_cmd != 0 && (c == b'-' || c == b'+' || c == b'.' || c.is_ascii_digit()) {
            // Plausible number start: the previous command repeats.
            self.unget();
            Ok(Some(last_cmd))
        } else {
            Err(SvgParseError::Wrong)
        }
    }

    fn get_byte(&mut self) -> Option<u8> {
        self.data.as_bytes().get(self.ix).map(|&c| {
            self.ix += 1;
            c
        })
    }

    fn unget(&mut self) {
        self.ix -= 1;
    }

    fn get_number(&mut self) -> Result<f64, SvgParseError> {
        self.skip_ws();
        let start = self.ix;
        let c = self.get_byte().ok_or(SvgParseError::UnexpectedEof)?;
        if !(c == b'-' || c == b'+') {
            self.unget();
        }
        let mut digit_count = 0;
        let mut seen_period = false;
        while let Some(c) = self.get_byte() {
            if c.is_ascii_digit() {
                digit_count += 1;
            } else if c == b'.' && !seen_period {
                seen_period = true;
            } else {
                self.unget();
                break;
            }
        }
        // Optional exponent, as written by `f64`'s `Display` for tiny values.
        if digit_count > 0 && matches!(self.peek(), Some(b'e' | b'E')) {
            self.ix += 1;
            if matches!(self.peek(), Some(b'-' | b'+')) {
                self.ix += 1;
            }
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.ix += 1;
            }
        }
        let result = if digit_count > 0 {
            self.data[start..self.ix]
                .parse()
                .map_err(|_| SvgParseError::Wrong)
        } else {
            Err(SvgParseError::Wrong)
        };
        self.opt_comma();
        result
    }

    fn get_flag(&mut self) -> Result<bool, SvgParseError> {
        self.skip_ws();
        let flag = match self.get_byte() {
            Some(b'0') => false,
            Some(b'1') => true,
            Some(_) => return Err(SvgParseError::Wrong),
            None => return Err(SvgParseError::UnexpectedEof),
        };
        self.opt_comma();
        Ok(flag)
    }

    fn get_maybe_relative(&mut self, cmd: u8) -> Result<Point, SvgParseError> {
        let x = self.get_number()?;
        let y = self.get_number()?;
        if cmd.is_ascii_lowercase() {
            Ok(self.last_pt + Vec2::new(x, y))
        } else {
            Ok(Point::new(x, y))
        }
    }

    fn peek(&self) -> Option<u8> {
        self.data.as_bytes().get(self.ix).copied()
    }

    fn opt_comma(&mut self) {
        self.skip_ws();
        if let Some(c) = self.get_byte() {
            if c != b',' {
                self.unget();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_all_commands() {
        let mut path = Path::new();
        path.move_to((0.0, 1.0));
        path.line_to((2.5, 1.0));
        path.arc_to(SvgArc::semicircle(1.0, true, Point::new(2.5, -1.0)));
        path.close_path();
        assert_eq!(path.to_svg(), "M0 1 L2.5 1 A1 1 0 0 1 2.5 -1 Z");
    }

    #[test]
    fn parse_round_trip() {
        let data = "M0 1 L2.5 1 A1 1 0 0 1 2.5 -1 Z";
        let path = Path::from_svg(data).unwrap();
        assert_eq!(path.elements().len(), 4);
        assert_eq!(path.to_svg(), data);
    }

    #[test]
    fn parse_relative_and_implicit() {
        let path = Path::from_svg("m10 10 100 0 0 100 -100 0z").unwrap();
        let pts: Vec<_> = path.points().collect();
        assert_eq!(
            pts,
            vec![
                Point::new(10.0, 10.0),
                Point::new(110.0, 10.0),
                Point::new(110.0, 110.0),
                Point::new(10.0, 110.0),
            ]
        );
        assert!(matches!(path.elements()[4], PathEl::ClosePath));
    }

    #[test]
    fn parse_compact_arc_flags() {
        let path = Path::from_svg("M0,0 a5,5 0 01 10,0").unwrap();
        match path.elements()[1] {
            PathEl::ArcTo(arc) => {
                assert!(!arc.large_arc);
                assert!(arc.sweep);
                assert_eq!(arc.to, Point::new(10.0, 0.0));
                assert_eq!(arc.radii, Vec2::new(5.0, 5.0));
            }
            el => panic!("expected an arc, got {el:?}"),
        }
    }

    #[test]
    fn parse_exponent() {
        let path = Path::from_svg("M1e-7 2.5E2").unwrap();
        assert_eq!(path.points().next(), Some(Point::new(1e-7, 250.0)));
    }

    #[test]
    fn parse_errors() {
        assert_eq!(Path::from_svg("L1 2"), Err(SvgParseError::MissingMoveTo));
        assert_eq!(
            Path::from_svg("M0 0 C1 1 2 2 3 3"),
            Err(SvgParseError::UnknownCommand('C'))
        );
        assert_eq!(Path::from_svg("M0"), Err(SvgParseError::UnexpectedEof));
        assert_eq!(Path::from_svg("M0 0 A1 1 0 2 0 1 1"), Err(SvgParseError::Wrong));
        assert!(Path::from_svg("").unwrap().is_empty());
    }
}
