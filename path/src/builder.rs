//! Path construction.
//!
//! Paths are immutable; a [`PathBuilder`] accumulates contours and produces
//! the [`Path`] at the end.

use crate::contour::Contour;
use crate::curve::Curve;
use crate::geom::{ArcFlags, ArcSegment, CubicBezierSegment, QuadraticBezierSegment, SvgArc};
use crate::math::{Angle, Point, Size, Vector};
use crate::path::Path;

/// Builds a path from a sequence of commands.
///
/// Drawing commands issued before any `move_to` start a contour at the
/// current position, which is initially the origin. After closing a contour,
/// the current position is the closed contour's starting point, and further
/// drawing commands open a new contour there.
#[derive(Clone, Debug)]
pub struct PathBuilder {
    contours: Vec<Contour>,
    curves: Vec<Curve>,
    first_position: Point,
    current_position: Point,
    need_moveto: bool,
    in_contour: bool,
}

impl PathBuilder {
    pub fn new() -> Self {
        PathBuilder {
            contours: Vec::new(),
            curves: Vec::new(),
            first_position: Point::zero(),
            current_position: Point::zero(),
            need_moveto: true,
            in_contour: false,
        }
    }

    pub fn current_position(&self) -> Point {
        self.current_position
    }

    /// Start a new contour at `to`.
    ///
    /// A `move_to` followed by nothing else produces a contour that is a
    /// single point.
    pub fn move_to(&mut self, to: Point) {
        self.end_contour(false);
        self.first_position = to;
        self.current_position = to;
        self.need_moveto = false;
        self.in_contour = true;
    }

    pub fn rel_move_to(&mut self, delta: Vector) {
        self.move_to(self.current_position + delta);
    }

    pub fn line_to(&mut self, to: Point) {
        self.begin_if_needed();
        self.curves.push(Curve::line(self.current_position, to));
        self.current_position = to;
    }

    pub fn rel_line_to(&mut self, delta: Vector) {
        self.line_to(self.current_position + delta);
    }

    pub fn quadratic_bezier_to(&mut self, ctrl: Point, to: Point) {
        self.begin_if_needed();
        self.curves.push(Curve::Quadratic(QuadraticBezierSegment {
            from: self.current_position,
            ctrl,
            to,
        }));
        self.current_position = to;
    }

    pub fn cubic_bezier_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.begin_if_needed();
        self.curves.push(Curve::Cubic(CubicBezierSegment {
            from: self.current_position,
            ctrl1,
            ctrl2,
            to,
        }));
        self.current_position = to;
    }

    /// Add an arc from its two auxiliary points and endpoint.
    ///
    /// The auxiliary points are taken verbatim; see
    /// [`ArcSegment`](crate::geom::ArcSegment) for what they encode.
    pub fn arc_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.begin_if_needed();
        self.curves.push(Curve::Arc(ArcSegment {
            from: self.current_position,
            ctrl1,
            ctrl2,
            to,
        }));
        self.current_position = to;
    }

    /// Add an arc from a single control point, with the fixed weight at which
    /// a quarter circle is exact.
    pub fn conic_to(&mut self, ctrl: Point, to: Point) {
        self.begin_if_needed();
        self.curves.push(Curve::Arc(ArcSegment::from_control(
            self.current_position,
            ctrl,
            to,
        )));
        self.current_position = to;
    }

    /// Add an SVG endpoint-parameterized elliptical arc.
    ///
    /// Degenerate radii produce a line segment, per the SVG rules, and
    /// coincident endpoints produce nothing.
    pub fn svg_arc_to(&mut self, radii: Vector, x_rotation: Angle, flags: ArcFlags, to: Point) {
        if to == self.current_position {
            return;
        }

        let arc = SvgArc {
            from: self.current_position,
            to,
            radii,
            x_rotation,
            flags,
        };
        if arc.is_straight_line() {
            self.line_to(to);
            return;
        }

        self.begin_if_needed();
        let curves = &mut self.curves;
        arc.for_each_arc_segment(&mut |segment| {
            curves.push(Curve::Arc(*segment));
        });
        self.current_position = to;
    }

    /// Close the current contour with a line back to its starting point.
    ///
    /// The closing line is always added, even when the contour already ends
    /// at its starting point; it is what a `Z` prints as. Closing when no
    /// contour is in progress does nothing.
    pub fn close(&mut self) {
        if !self.in_contour {
            return;
        }

        self.curves
            .push(Curve::line(self.current_position, self.first_position));
        self.current_position = self.first_position;
        self.end_contour(true);
    }

    /// Add an axis-aligned rectangle as its own contour.
    pub fn add_rect(&mut self, origin: Point, size: Size) {
        self.end_contour(false);
        self.contours.push(Contour::Rect { origin, size });
        self.first_position = origin;
        self.current_position = origin;
        self.need_moveto = true;
    }

    /// Add a circle as its own contour.
    pub fn add_circle(&mut self, center: Point, radius: f32) {
        self.end_contour(false);
        self.contours.push(Contour::Circle { center, radius });
        let start = self.contours.last().map(|c| c.start_point()).unwrap_or(center);
        self.first_position = start;
        self.current_position = start;
        self.need_moveto = true;
    }

    /// Append all contours of another path.
    pub fn add_path(&mut self, path: &Path) {
        self.end_contour(false);
        self.contours.extend(path.contours().iter().cloned());
        self.need_moveto = true;
    }

    /// Append the contours of another path, each traversed backwards.
    ///
    /// Flips the winding of every contour. Shape contours are genericized in
    /// the process.
    pub fn add_reversed_path(&mut self, path: &Path) {
        for contour in path.contours().iter().rev() {
            if let Contour::Standard { start, curves, .. } = contour {
                if curves.is_empty() {
                    self.move_to(*start);
                    continue;
                }
            }

            let closed = contour.is_closed();
            self.move_to(contour.end_point());
            for idx in (0..contour.n_segments()).rev() {
                let curve = match contour.segment(idx) {
                    Some(curve) => curve,
                    None => break,
                };
                // The original's first curve ends the reversed contour;
                // when it is a line, the close below recreates it.
                if closed && idx == 0 {
                    if let Curve::Line(_) = curve {
                        break;
                    }
                }
                self.push_curve(curve.reverse());
            }
            if closed {
                self.close();
            }
        }
    }

    pub fn build(mut self) -> Path {
        self.end_contour(false);
        Path::from_contours(self.contours)
    }

    fn push_curve(&mut self, curve: Curve) {
        self.begin_if_needed();
        self.current_position = curve.end_point();
        self.curves.push(curve);
    }

    fn begin_if_needed(&mut self) {
        if self.need_moveto {
            self.first_position = self.current_position;
            self.need_moveto = false;
            self.in_contour = true;
        }
    }

    fn end_contour(&mut self, closed: bool) {
        if !self.in_contour {
            return;
        }

        let curves = std::mem::take(&mut self.curves);
        self.contours
            .push(Contour::standard(self.first_position, curves, closed));
        self.in_contour = false;
        self.need_moveto = true;
    }
}

impl Default for PathBuilder {
    fn default() -> Self {
        Self::new()
    }
}
