//! Elliptical arc segments.
//!
//! An arc is stored as four points, like a cubic bézier: the endpoints and two
//! auxiliary points. The auxiliary points are the exact degree elevation of a
//! rational quadratic bézier (a conic) with control point `Q` and weight `w`:
//!
//! ```text
//! ctrl1 = from + (2w / (1 + 2w)) * (Q - from)
//! ctrl2 = to   + (2w / (1 + 2w)) * (Q - to)
//! ```
//!
//! This representation keeps the start tangent along `ctrl1 - from` and the
//! end tangent along `to - ctrl2`, carries an arbitrary positive weight, and
//! reduces to the quadratic-to-cubic elevation identity at `w = 1`. Splitting
//! an arc yields two arcs, so the type is closed under subdivision.
//!
//! Four points that do not decode to a conic (for example hand-written data)
//! never cause a failure: the segment then behaves as the cubic bézier over
//! its stored points.

use crate::cubic_bezier::CubicBezierSegment;
use crate::math::{point, vector, Angle, Box2D, Point, Vector};
use crate::line::LineSegment;
use std::f32::consts::{FRAC_1_SQRT_2, FRAC_PI_2, PI};

/// An elliptical arc segment stored as four points.
///
/// See the [module documentation](crate::arc) for the encoding.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ArcSegment {
    pub from: Point,
    pub ctrl1: Point,
    pub ctrl2: Point,
    pub to: Point,
}

/// Flag parameters for SVG arcs as described by the SVG specification.
///
/// For most situations using the SVG arc notation, the sweep and large arc flags
/// are easier to use than the center parameterization.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct ArcFlags {
    /// Of the four candidate arc sweeps, two will represent an arc sweep of greater
    /// than or equal to 180 degrees (the "large arc"), and two will represent an arc
    /// sweep of less than or equal to 180 degrees (the "small arc"). If large_arc
    /// is `true`, then one of the two larger arc sweeps will be chosen; otherwise,
    /// if large_arc is `false`, one of the smaller arc sweeps will be chosen.
    pub large_arc: bool,
    /// If sweep is `true`, then the arc will be drawn in a "positive-angle" direction.
    /// A value of `false` causes the arc to be drawn in a "negative-angle" direction.
    pub sweep: bool,
}

/// An elliptical arc in endpoint parameterization, as it appears in SVG path data.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SvgArc {
    pub from: Point,
    pub to: Point,
    pub radii: Vector,
    pub x_rotation: Angle,
    pub flags: ArcFlags,
}

impl ArcSegment {
    /// The conic weight at which a quarter of a circle or ellipse is exact.
    pub const QUARTER_WEIGHT: f32 = FRAC_1_SQRT_2;

    /// Build an arc from a conic control triangle and weight.
    ///
    /// The weight must be positive and finite.
    pub fn from_conic(from: Point, ctrl: Point, to: Point, weight: f32) -> Self {
        let r = 2.0 * weight / (1.0 + 2.0 * weight);

        ArcSegment {
            from,
            ctrl1: from + (ctrl - from) * r,
            ctrl2: to + (ctrl - to) * r,
            to,
        }
    }

    /// Build an arc from a single control point, using the fixed weight at
    /// which a quarter circle is exact.
    pub fn from_control(from: Point, ctrl: Point, to: Point) -> Self {
        Self::from_conic(from, ctrl, to, Self::QUARTER_WEIGHT)
    }

    /// Decode the conic control point and weight from the stored points.
    ///
    /// Returns `None` when the stored points are not a conic elevation, in
    /// which case the segment is treated as a cubic bézier.
    pub fn conic(&self) -> Option<(Point, f32)> {
        let d = self.from - self.to;
        let e = self.ctrl1 - self.ctrl2;
        let e2 = e.square_length();
        let d2 = d.square_length();
        if e2 == 0.0 || d2 == 0.0 {
            return None;
        }

        // ctrl1 - ctrl2 must be parallel to from - to for a conic elevation.
        if d.cross(e).abs() > 1e-3 * (d2 * e2).sqrt() {
            return None;
        }

        // |from - to| / |ctrl1 - ctrl2| = 1 + 2w, measured with a sign.
        let s = d.dot(e) / e2;
        if !s.is_finite() || s <= 1.0 {
            return None;
        }
        let w = (s - 1.0) * 0.5;
        let ctrl = self.from + (self.ctrl1 - self.from) * (s / (s - 1.0));

        Some((ctrl, w))
    }

    /// The cubic bézier over the stored points, used as the fallback
    /// interpretation for non-conic encodings.
    #[inline]
    pub fn as_cubic(&self) -> CubicBezierSegment {
        CubicBezierSegment {
            from: self.from,
            ctrl1: self.ctrl1,
            ctrl2: self.ctrl2,
            to: self.to,
        }
    }

    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: f32) -> Point {
        match self.conic() {
            Some((ctrl, w)) => {
                let one_t = 1.0 - t;
                let num = self.from.to_vector() * (one_t * one_t)
                    + ctrl.to_vector() * (2.0 * w * one_t * t)
                    + self.to.to_vector() * (t * t);
                let den = one_t * one_t + 2.0 * w * one_t * t + t * t;

                (num / den).to_point()
            }
            None => self.as_cubic().sample(t),
        }
    }

    /// Sample the curve's derivative at t (expecting t between 0 and 1).
    pub fn derivative(&self, t: f32) -> Vector {
        match self.conic() {
            Some((ctrl, w)) => {
                let (n, dn, d, dd) = self.rational_parts(ctrl, w, t);

                (dn * d - n * dd) / (d * d)
            }
            None => self.as_cubic().derivative(t),
        }
    }

    /// Sample the curve's second derivative at t (expecting t between 0 and 1).
    pub fn second_derivative(&self, t: f32) -> Vector {
        match self.conic() {
            Some((ctrl, w)) => {
                let (n, dn, d, dd) = self.rational_parts(ctrl, w, t);
                let ddn = (self.from.to_vector() - ctrl.to_vector() * (2.0 * w)
                    + self.to.to_vector())
                    * 2.0;
                let ddd = 2.0 * (2.0 - 2.0 * w);

                ((ddn * d - n * ddd) * d - (dn * d - n * dd) * (2.0 * dd)) / (d * d * d)
            }
            None => self.as_cubic().second_derivative(t),
        }
    }

    // Numerator, denominator and their first derivatives at t.
    fn rational_parts(&self, ctrl: Point, w: f32, t: f32) -> (Vector, Vector, f32, f32) {
        let one_t = 1.0 - t;
        let p0 = self.from.to_vector();
        let p1 = ctrl.to_vector() * w;
        let p2 = self.to.to_vector();

        let n = p0 * (one_t * one_t) + p1 * (2.0 * one_t * t) + p2 * (t * t);
        let dn = (p1 - p0) * (2.0 * one_t) + (p2 - p1) * (2.0 * t);
        let d = one_t * one_t + 2.0 * w * one_t * t + t * t;
        let dd = 2.0 * one_t * (w - 1.0) + 2.0 * t * (1.0 - w);

        (n, dn, d, dd)
    }

    /// Split this curve into two sub-arcs.
    pub fn split(&self, t: f32) -> (ArcSegment, ArcSegment) {
        let (ctrl, w) = match self.conic() {
            Some(conic) => conic,
            None => {
                let (a, b) = self.as_cubic().split(t);
                return (
                    ArcSegment {
                        from: a.from,
                        ctrl1: a.ctrl1,
                        ctrl2: a.ctrl2,
                        to: a.to,
                    },
                    ArcSegment {
                        from: b.from,
                        ctrl1: b.ctrl1,
                        ctrl2: b.ctrl2,
                        to: b.to,
                    },
                );
            }
        };

        // Rational de Casteljau with homogeneous weights (1, w, 1), then a
        // projective reparameterization so each half has unit endpoint weights.
        let one_t = 1.0 - t;
        let w01 = one_t + t * w;
        let w12 = one_t * w + t;
        let w012 = one_t * w01 + t * w12;

        let q01 = (self.from.to_vector() * one_t + ctrl.to_vector() * (t * w)) / w01;
        let q12 = (ctrl.to_vector() * (one_t * w) + self.to.to_vector() * t) / w12;
        let mid = ((q01 * (one_t * w01) + q12 * (t * w12)) / w012).to_point();

        let norm = w012.sqrt();

        (
            ArcSegment::from_conic(self.from, q01.to_point(), mid, w01 / norm),
            ArcSegment::from_conic(mid, q12.to_point(), self.to, w12 / norm),
        )
    }

    /// Returns a conservative rectangle that contains the curve.
    ///
    /// A positive-weight conic lies in its control triangle, so the box over
    /// the stored points and the decoded control point always contains it.
    pub fn fast_bounding_box(&self) -> Box2D {
        let mut min = self.from.min(self.ctrl1).min(self.ctrl2).min(self.to);
        let mut max = self.from.max(self.ctrl1).max(self.ctrl2).max(self.to);
        if let Some((ctrl, _)) = self.conic() {
            min = min.min(ctrl);
            max = max.max(ctrl);
        }

        Box2D::new(min, max)
    }
}

impl SvgArc {
    /// Whether the arc degrades to a line segment per the SVG rules
    /// (zero radius on either axis, or coincident endpoints).
    pub fn is_straight_line(&self) -> bool {
        self.radii.x == 0.0 || self.radii.y == 0.0 || self.from == self.to
    }

    /// The line segment this arc degrades to when [`is_straight_line`] is true.
    ///
    /// [`is_straight_line`]: Self::is_straight_line
    pub fn to_line_segment(&self) -> LineSegment {
        LineSegment {
            from: self.from,
            to: self.to,
        }
    }

    /// Approximate the arc with a sequence of arc segments of at most a
    /// quarter turn each.
    ///
    /// The pieces are exact (each is the conic for its portion of the
    /// ellipse); only the piece boundaries are a choice. Does nothing when
    /// the arc is a straight line.
    pub fn for_each_arc_segment<F>(&self, cb: &mut F)
    where
        F: FnMut(&ArcSegment),
    {
        if self.is_straight_line() {
            return;
        }

        let (center, radii, start_angle, sweep_angle) = self.center_parameterization();
        let cos_phi = self.x_rotation.radians.cos();
        let sin_phi = self.x_rotation.radians.sin();
        let ellipse_point = |angle: f32| -> Point {
            let x = radii.x * angle.cos();
            let y = radii.y * angle.sin();
            point(
                center.x + cos_phi * x - sin_phi * y,
                center.y + sin_phi * x + cos_phi * y,
            )
        };

        let num_segments = (sweep_angle.abs() / FRAC_PI_2).ceil().max(1.0);
        let step = sweep_angle / num_segments;
        let weight = (step * 0.5).cos();
        let num_segments = num_segments as u32;

        let mut from = self.from;
        for i in 0..num_segments {
            let a0 = start_angle + step * i as f32;
            let a1 = a0 + step;
            let mid = (a0 + a1) * 0.5;

            // The conic control point for this portion of the ellipse is the
            // image of the circle-space control point at the mid angle.
            let ctrl = {
                let x = radii.x * mid.cos() / weight;
                let y = radii.y * mid.sin() / weight;
                point(
                    center.x + cos_phi * x - sin_phi * y,
                    center.y + sin_phi * x + cos_phi * y,
                )
            };
            let to = if i + 1 == num_segments {
                self.to
            } else {
                ellipse_point(a1)
            };

            cb(&ArcSegment::from_conic(from, ctrl, to, weight));
            from = to;
        }
    }

    // Endpoint to center conversion, following the SVG implementation notes
    // (sections F.6.5 and F.6.6 for out of range radii).
    fn center_parameterization(&self) -> (Point, Vector, f32, f32) {
        let mut rx = self.radii.x.abs();
        let mut ry = self.radii.y.abs();
        let cos_phi = self.x_rotation.radians.cos();
        let sin_phi = self.x_rotation.radians.sin();

        let hd = (self.from - self.to) * 0.5;
        let p = vector(
            cos_phi * hd.x + sin_phi * hd.y,
            -sin_phi * hd.x + cos_phi * hd.y,
        );

        // Scale the radii up if they cannot span the endpoints.
        let lambda = (p.x / rx) * (p.x / rx) + (p.y / ry) * (p.y / ry);
        if lambda > 1.0 {
            let s = lambda.sqrt();
            rx *= s;
            ry *= s;
        }

        let rxry = rx * rx * ry * ry;
        let rxpy = rx * rx * p.y * p.y;
        let rypx = ry * ry * p.x * p.x;
        let radicand = ((rxry - rxpy - rypx) / (rxpy + rypx)).max(0.0);
        let sign = if self.flags.large_arc != self.flags.sweep {
            1.0
        } else {
            -1.0
        };
        let coef = sign * radicand.sqrt();
        let cp = vector(coef * rx * p.y / ry, -coef * ry * p.x / rx);

        let mid = (self.from.to_vector() + self.to.to_vector()) * 0.5;
        let center = point(
            cos_phi * cp.x - sin_phi * cp.y + mid.x,
            sin_phi * cp.x + cos_phi * cp.y + mid.y,
        );

        let v1 = vector((p.x - cp.x) / rx, (p.y - cp.y) / ry);
        let v2 = vector((-p.x - cp.x) / rx, (-p.y - cp.y) / ry);
        let start_angle = v1.y.atan2(v1.x);
        let mut sweep_angle = (v1.cross(v2)).atan2(v1.dot(v2));
        if !self.flags.sweep && sweep_angle > 0.0 {
            sweep_angle -= 2.0 * PI;
        } else if self.flags.sweep && sweep_angle < 0.0 {
            sweep_angle += 2.0 * PI;
        }

        (center, vector(rx, ry), start_angle, sweep_angle)
    }
}
