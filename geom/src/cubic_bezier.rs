use crate::math::{Box2D, Point, Vector};
use crate::quadratic_bezier::QuadraticBezierSegment;
use arrayvec::ArrayVec;

/// A 2d curve segment defined by four points: the beginning of the segment, two control
/// points and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)³ * from + 3 * (1 - t)² * t * ctrl1 + 3 * t² * (1 - t) * ctrl2 + t³ * to```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CubicBezierSegment {
    pub from: Point,
    pub ctrl1: Point,
    pub ctrl2: Point,
    pub to: Point,
}

impl CubicBezierSegment {
    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: f32) -> Point {
        let t2 = t * t;
        let t3 = t2 * t;
        let one_t = 1.0 - t;
        let one_t2 = one_t * one_t;
        let one_t3 = one_t2 * one_t;

        self.from * one_t3
            + self.ctrl1.to_vector() * 3.0 * one_t2 * t
            + self.ctrl2.to_vector() * 3.0 * one_t * t2
            + self.to.to_vector() * t3
    }

    /// Sample the curve's derivative at t (expecting t between 0 and 1).
    pub fn derivative(&self, t: f32) -> Vector {
        let one_t = 1.0 - t;

        ((self.ctrl1 - self.from) * one_t * one_t
            + (self.ctrl2 - self.ctrl1) * 2.0 * one_t * t
            + (self.to - self.ctrl2) * t * t)
            * 3.0
    }

    /// Sample the curve's second derivative at t (expecting t between 0 and 1).
    pub fn second_derivative(&self, t: f32) -> Vector {
        let one_t = 1.0 - t;

        ((self.ctrl2 - self.ctrl1 * 2.0 + self.from.to_vector()) * one_t
            + (self.to - self.ctrl2 * 2.0 + self.ctrl1.to_vector()) * t)
            * 6.0
    }

    /// Split this curve into two sub-curves.
    pub fn split(&self, t: f32) -> (CubicBezierSegment, CubicBezierSegment) {
        let ctrl1a = self.from.lerp(self.ctrl1, t);
        let ctrl2a = self.ctrl1.lerp(self.ctrl2, t);
        let ctrl1aa = ctrl1a.lerp(ctrl2a, t);
        let ctrl3a = self.ctrl2.lerp(self.to, t);
        let ctrl2aa = ctrl2a.lerp(ctrl3a, t);
        let ctrl1aaa = ctrl1aa.lerp(ctrl2aa, t);

        (
            CubicBezierSegment {
                from: self.from,
                ctrl1: ctrl1a,
                ctrl2: ctrl1aa,
                to: ctrl1aaa,
            },
            CubicBezierSegment {
                from: ctrl1aaa,
                ctrl1: ctrl2aa,
                ctrl2: ctrl3a,
                to: self.to,
            },
        )
    }

    /// A single quadratic approximation of this curve, matching it at the
    /// endpoints and at t = 0.5.
    ///
    /// Only close to the cubic when the cubic is close to being a quadratic
    /// already; callers subdivide until that is the case.
    pub fn to_quadratic(&self) -> QuadraticBezierSegment {
        let c = (self.ctrl1.to_vector() + self.ctrl2.to_vector()) * 3.0
            - self.from.to_vector()
            - self.to.to_vector();

        QuadraticBezierSegment {
            from: self.from,
            ctrl: (c * 0.25).to_point(),
            to: self.to,
        }
    }

    /// Returns a conservative rectangle that contains the curve.
    pub fn fast_bounding_box(&self) -> Box2D {
        Box2D::new(
            self.from.min(self.ctrl1).min(self.ctrl2).min(self.to),
            self.from.max(self.ctrl1).max(self.ctrl2).max(self.to),
        )
    }

    /// Parameters in ]0, 1[ at which the curve is locally extremal on either axis.
    pub fn local_extrema(&self) -> ArrayVec<f32, 4> {
        let mut result = ArrayVec::new();

        // The derivative is a quadratic a t² + b t + c per axis.
        let d0 = self.ctrl1 - self.from;
        let d1 = self.ctrl2 - self.ctrl1;
        let d2 = self.to - self.ctrl2;
        for (d0, d1, d2) in [(d0.x, d1.x, d2.x), (d0.y, d1.y, d2.y)] {
            let a = d0 - 2.0 * d1 + d2;
            let b = 2.0 * (d1 - d0);
            let c = d0;

            if a == 0.0 {
                if b != 0.0 {
                    let t = -c / b;
                    if t > 0.0 && t < 1.0 {
                        result.push(t);
                    }
                }
                continue;
            }

            let discriminant = b * b - 4.0 * a * c;
            if discriminant < 0.0 {
                continue;
            }
            let sqrt_d = discriminant.sqrt();
            for t in [(-b - sqrt_d) / (2.0 * a), (-b + sqrt_d) / (2.0 * a)] {
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
