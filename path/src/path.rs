//! The path data structure.

use crate::builder::PathBuilder;
use crate::contour::Contour;
use crate::curve::Curve;
use crate::geom::{ArcSegment, CubicBezierSegment, LineSegment, QuadraticBezierSegment};
use crate::math::{Box2D, Point};
use crate::parser;
use crate::path_point::PathPoint;
use crate::stroke::Stroke;
use crate::{FillRule, ForeachFlags, ParseError, DEFAULT_TOLERANCE};

use std::fmt;
use std::str::FromStr;

/// An immutable sequence of contours.
///
/// Paths are cheap to clone and safe to share between threads; wrap one in an
/// `Arc` to share without copying. All mutation happens in a
/// [`PathBuilder`](crate::builder::PathBuilder) before the path exists.
#[derive(Clone, Debug)]
pub struct Path {
    contours: Box<[Contour]>,
    closed: bool,
    flat: bool,
}

/// One operation of a traversed path.
///
/// Every operation carries the points it needs, including its starting point,
/// so an operation can be interpreted without its predecessors.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PathOperation {
    Move {
        to: Point,
    },
    Line {
        from: Point,
        to: Point,
    },
    Quadratic {
        from: Point,
        ctrl: Point,
        to: Point,
    },
    Cubic {
        from: Point,
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    },
    Arc {
        from: Point,
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    },
    /// The line segment closing a contour. `to` is always the contour's
    /// starting point.
    Close {
        from: Point,
        to: Point,
    },
}

impl PathOperation {
    pub(crate) fn from_curve(curve: &Curve) -> Self {
        match *curve {
            Curve::Line(s) => PathOperation::Line {
                from: s.from,
                to: s.to,
            },
            Curve::Quadratic(s) => PathOperation::Quadratic {
                from: s.from,
                ctrl: s.ctrl,
                to: s.to,
            },
            Curve::Cubic(s) => PathOperation::Cubic {
                from: s.from,
                ctrl1: s.ctrl1,
                ctrl2: s.ctrl2,
                to: s.to,
            },
            Curve::Arc(s) => PathOperation::Arc {
                from: s.from,
                ctrl1: s.ctrl1,
                ctrl2: s.ctrl2,
                to: s.to,
            },
        }
    }

    /// The curve traced by this operation. `Move` traces nothing, `Close`
    /// traces its line segment.
    pub fn to_curve(&self) -> Option<Curve> {
        match *self {
            PathOperation::Move { .. } => None,
            PathOperation::Line { from, to } | PathOperation::Close { from, to } => {
                Some(Curve::Line(LineSegment { from, to }))
            }
            PathOperation::Quadratic { from, ctrl, to } => {
                Some(Curve::Quadratic(QuadraticBezierSegment { from, ctrl, to }))
            }
            PathOperation::Cubic {
                from,
                ctrl1,
                ctrl2,
                to,
            } => Some(Curve::Cubic(CubicBezierSegment {
                from,
                ctrl1,
                ctrl2,
                to,
            })),
            PathOperation::Arc {
                from,
                ctrl1,
                ctrl2,
                to,
            } => Some(Curve::Arc(ArcSegment {
                from,
                ctrl1,
                ctrl2,
                to,
            })),
        }
    }

    /// The points defining the operation, endpoints included.
    pub fn points(&self) -> ([Point; 4], usize) {
        match *self {
            PathOperation::Move { to } => ([to, to, to, to], 1),
            PathOperation::Line { from, to } | PathOperation::Close { from, to } => {
                ([from, to, to, to], 2)
            }
            PathOperation::Quadratic { from, ctrl, to } => ([from, ctrl, to, to], 3),
            PathOperation::Cubic {
                from,
                ctrl1,
                ctrl2,
                to,
            }
            | PathOperation::Arc {
                from,
                ctrl1,
                ctrl2,
                to,
            } => ([from, ctrl1, ctrl2, to], 4),
        }
    }
}

impl Path {
    pub(crate) fn from_contours(contours: Vec<Contour>) -> Self {
        let closed = contours.len() == 1 && contours[0].is_closed();
        let flat = contours.iter().all(|c| c.is_flat());

        Path {
            contours: contours.into_boxed_slice(),
            closed,
            flat,
        }
    }

    /// Create a builder to assemble a new path.
    pub fn builder() -> PathBuilder {
        PathBuilder::new()
    }

    /// Parse a path from its textual form.
    ///
    /// Equivalent to the `FromStr` implementation.
    pub fn parse(src: &str) -> Result<Path, ParseError> {
        parser::parse(src)
    }

    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    /// Whether the path is a single closed contour.
    ///
    /// The empty path is not closed: there is no seam joining a start to an
    /// end.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Whether every curve of the path is a line segment.
    pub fn is_flat(&self) -> bool {
        self.flat
    }

    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    /// A rectangle containing the path, or `None` for the empty path.
    ///
    /// A single-point path yields a zero-size rectangle, which is distinct
    /// from no rectangle at all.
    pub fn bounds(&self) -> Option<Box2D> {
        let mut bounds: Option<Box2D> = None;
        for contour in self.contours.iter() {
            let b = contour.bounds();
            bounds = Some(match bounds {
                Some(prev) => prev.union(&b),
                None => b,
            });
        }
        bounds
    }

    /// A rectangle containing the path if it were stroked with `stroke`, or
    /// `None` for the empty path.
    pub fn stroke_bounds(&self, stroke: &Stroke) -> Option<Box2D> {
        let margin = stroke.bound_margin();
        self.bounds().map(|b| b.inflate(margin, margin))
    }

    /// Whether `p` is inside the filled area of the path under `fill_rule`.
    ///
    /// Open contours are implicitly closed for filling.
    pub fn in_fill(&self, p: Point, fill_rule: FillRule) -> bool {
        let mut winding = 0;
        for contour in self.contours.iter() {
            winding += contour.winding(p);
        }
        fill_rule.is_in(winding)
    }

    /// The first addressable point of the path, or `None` if it is empty.
    pub fn start_point(&self) -> Option<PathPoint> {
        if self.contours.is_empty() {
            return None;
        }
        Some(PathPoint::new(0, 0, 0.0))
    }

    /// The last addressable point of the path, or `None` if it is empty.
    pub fn end_point(&self) -> Option<PathPoint> {
        let contour = self.contours.len().checked_sub(1)?;
        let idx = self.contours[contour].n_segments() - 1;
        Some(PathPoint::new(contour, idx, 1.0))
    }

    /// The closest point of the path within `threshold` of `p`, with its
    /// distance.
    ///
    /// Candidates from later contours must strictly improve on the best
    /// distance so far, so ties resolve to the earliest contour.
    pub fn closest_point(&self, p: Point, threshold: f32) -> Option<(PathPoint, f32)> {
        let mut best: Option<(PathPoint, f32)> = None;
        let mut limit = threshold;
        for (i, contour) in self.contours.iter().enumerate() {
            if let Some((idx, t, d)) = contour.closest_point(p, limit) {
                let improves = match best {
                    Some((_, bd)) => d < bd,
                    None => true,
                };
                if improves {
                    best = Some((PathPoint::new(i, idx, t), d));
                    limit = d;
                }
            }
        }
        best
    }

    /// Feed every operation of the path to `cb`, rewriting curves to the
    /// kinds `flags` allows, within `tolerance`.
    ///
    /// Returns `false` as soon as `cb` does, without visiting the rest of the
    /// path.
    pub fn for_each<F>(&self, flags: ForeachFlags, tolerance: f32, cb: &mut F) -> bool
    where
        F: FnMut(&PathOperation) -> bool,
    {
        for contour in self.contours.iter() {
            if !contour.for_each(flags, tolerance, cb) {
                return false;
            }
        }
        true
    }

    /// [`for_each`](Self::for_each) with the default tolerance.
    pub fn for_each_default<F>(&self, flags: ForeachFlags, cb: &mut F) -> bool
    where
        F: FnMut(&PathOperation) -> bool,
    {
        self.for_each(flags, DEFAULT_TOLERANCE, cb)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        crate::serializer::write_path(self, f)
    }
}

impl FromStr for Path {
    type Err = ParseError;

    fn from_str(src: &str) -> Result<Path, ParseError> {
        parser::parse(src)
    }
}
