//! A single sub-path of a path.

use crate::curve::Curve;
use crate::geom::{ArcSegment, LineSegment};
use crate::math::{point, Box2D, Point, Size};
use crate::path::PathOperation;
use crate::path_point::Direction;
use crate::stroke::Stroke;
use crate::{ForeachFlags, DEFAULT_TOLERANCE};

/// A connected run of curves, possibly closed.
///
/// Axis-aligned rectangles and circles keep their own compact representation
/// and synthesize curves on the fly when traversed; no cached conversion
/// exists, so traversing them twice synthesizes twice.
#[derive(Clone, Debug)]
pub enum Contour {
    Standard {
        /// Where the contour starts. Redundant with the first curve except
        /// for a contour that is a single point.
        start: Point,
        /// For a closed contour, the last curve is the closing line segment
        /// back to `start`.
        curves: Box<[Curve]>,
        closed: bool,
        /// Whether every curve is a line segment.
        flat: bool,
    },
    Rect {
        origin: Point,
        /// May be negative on either axis; the winding direction follows the
        /// signs.
        size: Size,
    },
    Circle {
        center: Point,
        radius: f32,
    },
}

impl Contour {
    pub(crate) fn standard(start: Point, curves: Vec<Curve>, closed: bool) -> Self {
        let flat = curves.iter().all(|c| matches!(c, Curve::Line(_)));

        Contour::Standard {
            start,
            curves: curves.into_boxed_slice(),
            closed,
            flat,
        }
    }

    pub fn is_closed(&self) -> bool {
        match self {
            Contour::Standard { closed, .. } => *closed,
            Contour::Rect { .. } | Contour::Circle { .. } => true,
        }
    }

    pub fn is_flat(&self) -> bool {
        match self {
            Contour::Standard { flat, .. } => *flat,
            Contour::Rect { .. } => true,
            Contour::Circle { radius, .. } => *radius == 0.0,
        }
    }

    pub fn start_point(&self) -> Point {
        match self {
            Contour::Standard { start, .. } => *start,
            Contour::Rect { origin, .. } => *origin,
            Contour::Circle { center, radius } => point(center.x + radius, center.y),
        }
    }

    pub fn end_point(&self) -> Point {
        match self {
            Contour::Standard { start, curves, .. } => {
                curves.last().map(|c| c.end_point()).unwrap_or(*start)
            }
            Contour::Rect { .. } | Contour::Circle { .. } => self.start_point(),
        }
    }

    /// The number of addressable segments. A single-point contour still has
    /// one (zero-length) segment so that it can be addressed.
    pub fn n_segments(&self) -> usize {
        match self {
            Contour::Standard { curves, .. } => curves.len().max(1),
            Contour::Rect { .. } | Contour::Circle { .. } => 4,
        }
    }

    /// The curve for a segment index, synthesized for shape contours.
    pub fn segment(&self, idx: usize) -> Option<Curve> {
        match self {
            Contour::Standard { start, curves, .. } => {
                if curves.is_empty() && idx == 0 {
                    return Some(Curve::line(*start, *start));
                }
                curves.get(idx).copied()
            }
            Contour::Rect { origin, size } => {
                let corners = [
                    *origin,
                    point(origin.x + size.width, origin.y),
                    point(origin.x + size.width, origin.y + size.height),
                    point(origin.x, origin.y + size.height),
                ];
                if idx >= 4 {
                    return None;
                }
                Some(Curve::line(corners[idx], corners[(idx + 1) % 4]))
            }
            Contour::Circle { center, radius } => {
                let (c, r) = (*center, *radius);
                let on = [
                    point(c.x + r, c.y),
                    point(c.x, c.y + r),
                    point(c.x - r, c.y),
                    point(c.x, c.y - r),
                ];
                let ctrl = [
                    point(c.x + r, c.y + r),
                    point(c.x - r, c.y + r),
                    point(c.x - r, c.y - r),
                    point(c.x + r, c.y - r),
                ];
                if idx >= 4 {
                    return None;
                }
                Some(Curve::Arc(ArcSegment::from_control(
                    on[idx],
                    ctrl[idx],
                    on[(idx + 1) % 4],
                )))
            }
        }
    }

    /// A rectangle containing the contour.
    ///
    /// Exact for shape contours; for standard contours the union of the
    /// control-point boxes, which can be loose but never misses the contour.
    pub fn bounds(&self) -> Box2D {
        match self {
            Contour::Standard { start, curves, .. } => {
                let mut b = Box2D::new(*start, *start);
                for curve in curves.iter() {
                    b = b.union(&curve.fast_bounding_box());
                }
                b
            }
            Contour::Rect { origin, size } => {
                let opposite = point(origin.x + size.width, origin.y + size.height);
                Box2D::new(origin.min(opposite), origin.max(opposite))
            }
            Contour::Circle { center, radius } => {
                let r = radius.abs();
                Box2D::new(
                    point(center.x - r, center.y - r),
                    point(center.x + r, center.y + r),
                )
            }
        }
    }

    /// A rectangle containing the contour if it were stroked with `stroke`.
    pub fn stroke_bounds(&self, stroke: &Stroke) -> Box2D {
        let margin = stroke.bound_margin();
        self.bounds().inflate(margin, margin)
    }

    /// The winding number of `p` with respect to this contour.
    ///
    /// Open contours are implicitly closed with a line back to their start.
    pub fn winding(&self, p: Point) -> i32 {
        match self {
            Contour::Circle { center, radius } => {
                // The synthesized circle runs counterclockwise, which counts
                // as -1 under the crossing convention used below.
                if (p - *center).length() < radius.abs() {
                    -1
                } else {
                    0
                }
            }
            Contour::Rect { .. } => self.winding_from_segments(p),
            Contour::Standard {
                start,
                curves,
                closed,
                ..
            } => {
                let mut winding = self.winding_from_segments(p);
                if !*closed {
                    if let Some(last) = curves.last() {
                        let seg = LineSegment {
                            from: last.end_point(),
                            to: *start,
                        };
                        if let Some((dir, x)) = seg.horizontal_crossing(p.y) {
                            if x <= p.x {
                                winding += dir;
                            }
                        }
                    }
                }
                winding
            }
        }
    }

    // Crossings of the horizontal line through p, counted at or left of p:
    // +1 for a segment going up in y, -1 going down.
    fn winding_from_segments(&self, p: Point) -> i32 {
        let mut winding = 0;
        for idx in 0..self.n_segments() {
            let curve = match self.segment(idx) {
                Some(curve) => curve,
                None => break,
            };
            // A crossing needs a y strictly above p.y on one side and an x
            // not greater than p.x.
            let bb = curve.fast_bounding_box();
            if bb.max.y <= p.y || bb.min.y > p.y || bb.min.x > p.x {
                continue;
            }
            curve.for_each_line(DEFAULT_TOLERANCE, &mut |from, to, _, _| {
                let seg = LineSegment { from, to };
                if let Some((dir, x)) = seg.horizontal_crossing(p.y) {
                    if x <= p.x {
                        winding += dir;
                    }
                }
                true
            });
        }
        winding
    }

    /// The closest point of the contour within `threshold` of `p`, as a
    /// segment index, parameter and distance.
    ///
    /// Among equally distant candidates the first in traversal order wins.
    pub fn closest_point(&self, p: Point, threshold: f32) -> Option<(usize, f32, f32)> {
        let mut best: Option<(usize, f32, f32)> = None;
        let mut limit = threshold;
        for idx in 0..self.n_segments() {
            let curve = self.segment(idx)?;
            let (t, d) = curve.closest_point(p);
            let improves = match best {
                Some((_, _, bd)) => d < bd,
                None => d < limit,
            };
            if improves {
                best = Some((idx, t, d));
                limit = d;
            }
        }
        best
    }

    /// The position at (segment, parameter).
    pub fn position(&self, idx: usize, t: f32) -> Option<Point> {
        Some(self.segment(idx)?.sample(t))
    }

    /// The unit tangent at (segment, parameter).
    ///
    /// At a boundary between two segments the incoming and outgoing tangents
    /// can differ; `direction` picks which one to report.
    pub fn tangent(&self, idx: usize, t: f32, direction: Direction) -> Option<crate::math::Vector> {
        let n = self.n_segments();
        if idx >= n {
            return None;
        }

        if t == 0.0 && direction == Direction::Incoming {
            let prev = if idx > 0 {
                Some(idx - 1)
            } else if self.is_closed() {
                Some(n - 1)
            } else {
                None
            };
            if let Some(prev) = prev {
                return Some(self.segment(prev)?.tangent(1.0));
            }
        }
        if t == 1.0 && direction == Direction::Outgoing {
            let next = if idx + 1 < n {
                Some(idx + 1)
            } else if self.is_closed() {
                Some(0)
            } else {
                None
            };
            if let Some(next) = next {
                return Some(self.segment(next)?.tangent(0.0));
            }
        }

        Some(self.segment(idx)?.tangent(t))
    }

    /// The signed curvature at (segment, parameter), with the center of the
    /// osculating circle when it exists.
    pub fn curvature(&self, idx: usize, t: f32) -> Option<(f32, Option<Point>)> {
        Some(self.segment(idx)?.curvature(t))
    }

    /// Feed the contour's operations to `cb`, rewriting curves to the kinds
    /// `flags` allows. Stops and returns `false` as soon as `cb` does.
    pub fn for_each<F>(&self, flags: ForeachFlags, tolerance: f32, cb: &mut F) -> bool
    where
        F: FnMut(&PathOperation) -> bool,
    {
        let start = self.start_point();
        if !cb(&PathOperation::Move { to: start }) {
            return false;
        }

        match self {
            Contour::Standard { curves, closed, .. } => {
                let n = curves.len();
                for (i, curve) in curves.iter().enumerate() {
                    if *closed && i + 1 == n {
                        return cb(&PathOperation::Close {
                            from: curve.start_point(),
                            to: curve.end_point(),
                        });
                    }
                    let ok = curve
                        .for_each_curve(flags, tolerance, &mut |c| cb(&PathOperation::from_curve(c)));
                    if !ok {
                        return false;
                    }
                }
                true
            }
            Contour::Rect { .. } => {
                for idx in 0..4 {
                    let curve = match self.segment(idx) {
                        Some(curve) => curve,
                        None => return true,
                    };
                    if idx == 3 {
                        return cb(&PathOperation::Close {
                            from: curve.start_point(),
                            to: curve.end_point(),
                        });
                    }
                    if !cb(&PathOperation::from_curve(&curve)) {
                        return false;
                    }
                }
                true
            }
            Contour::Circle { .. } => {
                for idx in 0..4 {
                    let curve = match self.segment(idx) {
                        Some(curve) => curve,
                        None => return true,
                    };
                    let ok = curve
                        .for_each_curve(flags, tolerance, &mut |c| cb(&PathOperation::from_curve(c)));
                    if !ok {
                        return false;
                    }
                }
                // The fourth arc already ends at the start point.
                cb(&PathOperation::Close {
                    from: start,
                    to: start,
                })
            }
        }
    }
}
