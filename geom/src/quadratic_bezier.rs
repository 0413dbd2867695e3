use crate::cubic_bezier::CubicBezierSegment;
use crate::math::{Box2D, Point, Vector};
use arrayvec::ArrayVec;

/// A 2d curve segment defined by three points: the beginning of the segment, a control
/// point and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)² * from + 2 * (1 - t) * t * ctrl + t² * to```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct QuadraticBezierSegment {
    pub from: Point,
    pub ctrl: Point,
    pub to: Point,
}

impl QuadraticBezierSegment {
    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: f32) -> Point {
        let t2 = t * t;
        let one_t = 1.0 - t;
        let one_t2 = one_t * one_t;

        self.from * one_t2 + self.ctrl.to_vector() * 2.0 * one_t * t + self.to.to_vector() * t2
    }

    /// Sample the curve's derivative at t (expecting t between 0 and 1).
    pub fn derivative(&self, t: f32) -> Vector {
        ((self.ctrl - self.from) * (1.0 - t) + (self.to - self.ctrl) * t) * 2.0
    }

    /// Sample the curve's second derivative, which is constant.
    pub fn second_derivative(&self, _t: f32) -> Vector {
        ((self.to - self.ctrl) - (self.ctrl - self.from)) * 2.0
    }

    /// Split this curve into two sub-curves.
    pub fn split(&self, t: f32) -> (QuadraticBezierSegment, QuadraticBezierSegment) {
        let split_point = self.sample(t);

        (
            QuadraticBezierSegment {
                from: self.from,
                ctrl: self.from.lerp(self.ctrl, t),
                to: split_point,
            },
            QuadraticBezierSegment {
                from: split_point,
                ctrl: self.ctrl.lerp(self.to, t),
                to: self.to,
            },
        )
    }

    /// Elevate this curve to a cubic bézier.
    ///
    /// The conversion is exact: the cubic traces the same points at the same
    /// parameters.
    pub fn to_cubic(&self) -> CubicBezierSegment {
        let frac = 2.0 / 3.0;

        CubicBezierSegment {
            from: self.from,
            ctrl1: self.from + (self.ctrl - self.from) * frac,
            ctrl2: self.to + (self.ctrl - self.to) * frac,
            to: self.to,
        }
    }

    /// Returns a conservative rectangle that contains the curve.
    pub fn fast_bounding_box(&self) -> Box2D {
        Box2D::new(
            self.from.min(self.ctrl).min(self.to),
            self.from.max(self.ctrl).max(self.to),
        )
    }

    /// Parameters in ]0, 1[ at which the curve is locally extremal on either axis.
    pub fn local_extrema(&self) -> ArrayVec<f32, 2> {
        let mut result = ArrayVec::new();

        // The derivative (1 - t) * d0 + t * d1 vanishes on an axis
        // at t = d0 / (d0 - d1).
        let d0 = self.ctrl - self.from;
        let d1 = self.to - self.ctrl;
        for (a, b) in [(d0.x, d1.x), (d0.y, d1.y)] {
            let denom = a - b;
            if denom != 0.0 {
                let t = a / denom;
                if t > 0.0 && t < 1.0 {
                    result.push(t);
                }
            }
        }

        result
    }

    /// The smallest rectangle that contains the curve.
    pub fn bounding_box(&self) -> Box2D {
        let mut min = self.from.min(self.to);
        let mut max = self.from.max(self.to);
        for t in self.local_extrema() {
            let p = self.sample(t);
            min = min.min(p);
            max = max.max(p);
        }

        Box2D::new(min, max)
    }
}
