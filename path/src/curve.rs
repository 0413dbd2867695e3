//! A single curve segment of a contour.

use crate::geom::{ArcSegment, CubicBezierSegment, LineSegment, QuadraticBezierSegment};
use crate::math::{vector, Box2D, Point, Vector};
use crate::{ForeachFlags, MIN_PROGRESS};

/// One segment of a contour.
///
/// Every variant carries its own endpoints, so a curve can be evaluated
/// without knowing the contour it came from. Consecutive curves of a contour
/// share their boundary point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Curve {
    Line(LineSegment),
    Quadratic(QuadraticBezierSegment),
    Cubic(CubicBezierSegment),
    Arc(ArcSegment),
}

impl Curve {
    pub fn line(from: Point, to: Point) -> Self {
        Curve::Line(LineSegment { from, to })
    }

    #[inline]
    pub fn start_point(&self) -> Point {
        match self {
            Curve::Line(s) => s.from,
            Curve::Quadratic(s) => s.from,
            Curve::Cubic(s) => s.from,
            Curve::Arc(s) => s.from,
        }
    }

    #[inline]
    pub fn end_point(&self) -> Point {
        match self {
            Curve::Line(s) => s.to,
            Curve::Quadratic(s) => s.to,
            Curve::Cubic(s) => s.to,
            Curve::Arc(s) => s.to,
        }
    }

    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: f32) -> Point {
        match self {
            Curve::Line(s) => s.sample(t),
            Curve::Quadratic(s) => s.sample(t),
            Curve::Cubic(s) => s.sample(t),
            Curve::Arc(s) => s.sample(t),
        }
    }

    /// Sample the curve's derivative at t.
    pub fn derivative(&self, t: f32) -> Vector {
        match self {
            Curve::Line(s) => s.to_vector(),
            Curve::Quadratic(s) => s.derivative(t),
            Curve::Cubic(s) => s.derivative(t),
            Curve::Arc(s) => s.derivative(t),
        }
    }

    fn second_derivative(&self, t: f32) -> Vector {
        match self {
            Curve::Line(_) => vector(0.0, 0.0),
            Curve::Quadratic(s) => s.second_derivative(t),
            Curve::Cubic(s) => s.second_derivative(t),
            Curve::Arc(s) => s.second_derivative(t),
        }
    }

    /// The unit tangent at t.
    ///
    /// When the derivative vanishes (coincident control points, zero-length
    /// curves) the direction between the nearest distinct control points is
    /// used instead. Returns the zero vector only when every point of the
    /// curve coincides.
    pub fn tangent(&self, t: f32) -> Vector {
        let d = self.derivative(t);
        if d.square_length() > 1e-12 {
            return d.normalize();
        }

        let (points, n) = self.control_points();
        if t < 0.5 {
            for i in 1..n {
                let d = points[i] - points[0];
                if d.square_length() > 1e-12 {
                    return d.normalize();
                }
            }
        } else {
            for i in (0..n - 1).rev() {
                let d = points[n - 1] - points[i];
                if d.square_length() > 1e-12 {
                    return d.normalize();
                }
            }
        }

        vector(0.0, 0.0)
    }

    /// The signed curvature at t and the center of the osculating circle.
    ///
    /// Lines and locally straight points have curvature zero and no center.
    pub fn curvature(&self, t: f32) -> (f32, Option<Point>) {
        if let Curve::Line(_) = self {
            return (0.0, None);
        }

        let d1 = self.derivative(t);
        let d2 = self.second_derivative(t);
        let speed2 = d1.square_length();
        if speed2 < 1e-12 {
            return (0.0, None);
        }

        let k = d1.cross(d2) / (speed2 * speed2.sqrt());
        if k == 0.0 || !k.is_finite() {
            return (0.0, None);
        }

        let u = d1.normalize();
        let normal = vector(-u.y, u.x);
        let center = self.sample(t) + normal / k;

        (k, Some(center))
    }

    /// Split this curve in two at t. Both halves are of the same kind as the
    /// original curve and share the point at t.
    pub fn split(&self, t: f32) -> (Curve, Curve) {
        match self {
            Curve::Line(s) => {
                let (a, b) = s.split(t);
                (Curve::Line(a), Curve::Line(b))
            }
            Curve::Quadratic(s) => {
                let (a, b) = s.split(t);
                (Curve::Quadratic(a), Curve::Quadratic(b))
            }
            Curve::Cubic(s) => {
                let (a, b) = s.split(t);
                (Curve::Cubic(a), Curve::Cubic(b))
            }
            Curve::Arc(s) => {
                let (a, b) = s.split(t);
                (Curve::Arc(a), Curve::Arc(b))
            }
        }
    }

    /// The same curve, traversed in the opposite direction.
    pub fn reverse(&self) -> Curve {
        match *self {
            Curve::Line(s) => Curve::Line(s.flip()),
            Curve::Quadratic(s) => Curve::Quadratic(QuadraticBezierSegment {
                from: s.to,
                ctrl: s.ctrl,
                to: s.from,
            }),
            Curve::Cubic(s) => Curve::Cubic(CubicBezierSegment {
                from: s.to,
                ctrl1: s.ctrl2,
                ctrl2: s.ctrl1,
                to: s.from,
            }),
            Curve::Arc(s) => Curve::Arc(ArcSegment {
                from: s.to,
                ctrl1: s.ctrl2,
                ctrl2: s.ctrl1,
                to: s.from,
            }),
        }
    }

    /// A conservative rectangle that contains the curve.
    pub fn fast_bounding_box(&self) -> Box2D {
        match self {
            Curve::Line(s) => s.bounding_box(),
            Curve::Quadratic(s) => s.fast_bounding_box(),
            Curve::Cubic(s) => s.fast_bounding_box(),
            Curve::Arc(s) => s.fast_bounding_box(),
        }
    }

    /// The smallest rectangle that contains the curve, except for arcs where
    /// the control-polygon box is used.
    pub fn bounding_box(&self) -> Box2D {
        match self {
            Curve::Line(s) => s.bounding_box(),
            Curve::Quadratic(s) => s.bounding_box(),
            Curve::Cubic(s) => s.bounding_box(),
            Curve::Arc(s) => s.fast_bounding_box(),
        }
    }

    /// The parameter of the point on the curve closest to `p`, and its
    /// distance to `p`.
    pub fn closest_point(&self, p: Point) -> (f32, f32) {
        if let Curve::Line(s) = self {
            let t = s.closest_point(p);
            return (t, (s.sample(t) - p).length());
        }

        // Coarse sampling, then golden section refinement around the best
        // sample. Good enough at f32 precision for well behaved curves.
        const SAMPLES: usize = 32;
        let mut best_t = 0.0;
        let mut best_d = f32::MAX;
        for i in 0..=SAMPLES {
            let t = i as f32 / SAMPLES as f32;
            let d = (self.sample(t) - p).square_length();
            if d < best_d {
                best_d = d;
                best_t = t;
            }
        }

        let window = 1.0 / SAMPLES as f32;
        let mut lo = (best_t - window).max(0.0);
        let mut hi = (best_t + window).min(1.0);
        let inv_phi = 0.618_034;
        let mut t1 = hi - (hi - lo) * inv_phi;
        let mut t2 = lo + (hi - lo) * inv_phi;
        let mut d1 = (self.sample(t1) - p).square_length();
        let mut d2 = (self.sample(t2) - p).square_length();
        for _ in 0..30 {
            if d1 < d2 {
                hi = t2;
                t2 = t1;
                d2 = d1;
                t1 = hi - (hi - lo) * inv_phi;
                d1 = (self.sample(t1) - p).square_length();
            } else {
                lo = t1;
                t1 = t2;
                d1 = d2;
                t2 = lo + (hi - lo) * inv_phi;
                d2 = (self.sample(t2) - p).square_length();
            }
        }

        let t = (lo + hi) * 0.5;
        let d = (self.sample(t) - p).length();
        if best_d.sqrt() < d {
            (best_t, best_d.sqrt())
        } else {
            (t, d)
        }
    }

    /// Approximate the curve with line segments and feed them to `cb`, in
    /// increasing parameter order, together with the parameter range each
    /// segment covers.
    ///
    /// Subdivision stops once the Manhattan distance between the curve and
    /// the chord midpoint is within `tolerance`, and always stops below
    /// parameter intervals of 1/1024. At least one segment is emitted and the
    /// last one always ends at parameter 1.
    ///
    /// Returns `false` as soon as `cb` does, without emitting further
    /// segments.
    pub fn for_each_line<F>(&self, tolerance: f32, cb: &mut F) -> bool
    where
        F: FnMut(Point, Point, f32, f32) -> bool,
    {
        if let Curve::Line(s) = self {
            return cb(s.from, s.to, 0.0, 1.0);
        }

        self.flatten_recursive(tolerance, self.start_point(), self.end_point(), 0.0, 1.0, cb)
    }

    fn flatten_recursive<F>(
        &self,
        tolerance: f32,
        from: Point,
        to: Point,
        t0: f32,
        t1: f32,
        cb: &mut F,
    ) -> bool
    where
        F: FnMut(Point, Point, f32, f32) -> bool,
    {
        let tm = (t0 + t1) * 0.5;
        let mid = self.sample(tm);
        let chord_mid = from.lerp(to, 0.5);
        let error = (mid.x - chord_mid.x).abs() + (mid.y - chord_mid.y).abs();
        if error <= tolerance || t1 - t0 < MIN_PROGRESS {
            return cb(from, to, t0, t1);
        }

        self.flatten_recursive(tolerance, from, mid, t0, tm, cb)
            && self.flatten_recursive(tolerance, mid, to, tm, t1, cb)
    }

    /// Rewrite the curve in terms of the allowed curve kinds and feed the
    /// pieces to `cb` in order.
    ///
    /// A curve of an allowed kind passes through unchanged. Otherwise it is
    /// approximated with the richest allowed kind within `tolerance`: arcs
    /// become cubics, cubics become quadratics (the exact elevation is used
    /// for quadratics turned into cubics), and with no flags set everything
    /// is flattened into lines.
    ///
    /// Returns `false` as soon as `cb` does.
    pub fn for_each_curve<F>(&self, flags: ForeachFlags, tolerance: f32, cb: &mut F) -> bool
    where
        F: FnMut(&Curve) -> bool,
    {
        // 1/1024 of the curve, matching the flattening floor.
        const MAX_DEPTH: u32 = 10;

        match self {
            Curve::Line(_) => cb(self),
            Curve::Quadratic(s) => {
                if flags.contains(ForeachFlags::ALLOW_QUAD) {
                    cb(self)
                } else if flags.contains(ForeachFlags::ALLOW_CUBIC) {
                    cb(&Curve::Cubic(s.to_cubic()))
                } else {
                    self.flatten_into(tolerance, cb)
                }
            }
            Curve::Cubic(s) => {
                if flags.contains(ForeachFlags::ALLOW_CUBIC) {
                    cb(self)
                } else if flags.contains(ForeachFlags::ALLOW_QUAD) {
                    cubic_to_quadratics(s, tolerance, MAX_DEPTH, cb)
                } else {
                    self.flatten_into(tolerance, cb)
                }
            }
            Curve::Arc(s) => {
                if flags.contains(ForeachFlags::ALLOW_ARC) {
                    cb(self)
                } else if flags.contains(ForeachFlags::ALLOW_CUBIC) {
                    arc_to_cubics(s, tolerance, MAX_DEPTH, cb)
                } else if flags.contains(ForeachFlags::ALLOW_QUAD) {
                    arc_to_quadratics(s, tolerance, MAX_DEPTH, cb)
                } else {
                    self.flatten_into(tolerance, cb)
                }
            }
        }
    }

    fn flatten_into<F>(&self, tolerance: f32, cb: &mut F) -> bool
    where
        F: FnMut(&Curve) -> bool,
    {
        self.for_each_line(tolerance, &mut |from, to, _, _| cb(&Curve::line(from, to)))
    }

    fn control_points(&self) -> ([Point; 4], usize) {
        match *self {
            Curve::Line(s) => ([s.from, s.to, s.to, s.to], 2),
            Curve::Quadratic(s) => ([s.from, s.ctrl, s.to, s.to], 3),
            Curve::Cubic(s) => ([s.from, s.ctrl1, s.ctrl2, s.to], 4),
            Curve::Arc(s) => ([s.from, s.ctrl1, s.ctrl2, s.to], 4),
        }
    }
}

fn manhattan(a: Point, b: Point) -> f32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

fn cubic_to_quadratics<F>(
    curve: &CubicBezierSegment,
    tolerance: f32,
    depth: u32,
    cb: &mut F,
) -> bool
where
    F: FnMut(&Curve) -> bool,
{
    let approx = curve.to_quadratic();
    // The quadratic interpolates the cubic's midpoint, so measure at the
    // quarter points instead.
    let error = manhattan(approx.sample(0.25), curve.sample(0.25))
        .max(manhattan(approx.sample(0.75), curve.sample(0.75)));
    if error <= tolerance || depth == 0 {
        return cb(&Curve::Quadratic(approx));
    }

    let (a, b) = curve.split(0.5);
    cubic_to_quadratics(&a, tolerance, depth - 1, cb)
        && cubic_to_quadratics(&b, tolerance, depth - 1, cb)
}

fn arc_to_cubics<F>(arc: &ArcSegment, tolerance: f32, depth: u32, cb: &mut F) -> bool
where
    F: FnMut(&Curve) -> bool,
{
    // The stored points double as a cubic approximant with the right
    // endpoint tangents.
    let approx = arc.as_cubic();
    let error = manhattan(approx.sample(0.5), arc.sample(0.5))
        .max(manhattan(approx.sample(0.25), arc.sample(0.25)));
    if error <= tolerance || depth == 0 {
        return cb(&Curve::Cubic(approx));
    }

    let (a, b) = arc.split(0.5);
    arc_to_cubics(&a, tolerance, depth - 1, cb) && arc_to_cubics(&b, tolerance, depth - 1, cb)
}

fn arc_to_quadratics<F>(arc: &ArcSegment, tolerance: f32, depth: u32, cb: &mut F) -> bool
where
    F: FnMut(&Curve) -> bool,
{
    let approx = match arc.conic() {
        Some((ctrl, _)) => QuadraticBezierSegment {
            from: arc.from,
            ctrl,
            to: arc.to,
        },
        None => arc.as_cubic().to_quadratic(),
    };
    let error = manhattan(approx.sample(0.5), arc.sample(0.5))
        .max(manhattan(approx.sample(0.25), arc.sample(0.25)));
    if error <= tolerance || depth == 0 {
        return cb(&Curve::Quadratic(approx));
    }

    let (a, b) = arc.split(0.5);
    arc_to_quadratics(&a, tolerance, depth - 1, cb)
        && arc_to_quadratics(&b, tolerance, depth - 1, cb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::point;
    use crate::DEFAULT_TOLERANCE;

    fn curves() -> Vec<Curve> {
        vec![
            Curve::line(point(0.0, 0.0), point(10.0, 5.0)),
            Curve::Quadratic(QuadraticBezierSegment {
                from: point(0.0, 0.0),
                ctrl: point(25.0, 50.0),
                to: point(50.0, 0.0),
            }),
            Curve::Cubic(CubicBezierSegment {
                from: point(0.0, 0.0),
                ctrl1: point(10.0, 40.0),
                ctrl2: point(40.0, -40.0),
                to: point(50.0, 10.0),
            }),
            Curve::Arc(ArcSegment::from_control(
                point(50.0, 0.0),
                point(50.0, 50.0),
                point(0.0, 50.0),
            )),
        ]
    }

    #[test]
    fn tangents_are_unit_length() {
        for curve in curves() {
            for i in 0..=16 {
                let t = i as f32 / 16.0;
                let tangent = curve.tangent(t);
                assert!(
                    (tangent.length() - 1.0).abs() < 1e-4,
                    "{:?} at t = {}",
                    curve,
                    t
                );
            }
        }
    }

    #[test]
    fn endpoint_tangents_follow_the_control_polygon() {
        let c = Curve::Cubic(CubicBezierSegment {
            from: point(0.0, 0.0),
            ctrl1: point(0.0, 10.0),
            ctrl2: point(10.0, 10.0),
            to: point(10.0, 0.0),
        });

        assert!((c.tangent(0.0) - vector(0.0, 1.0)).length() < 1e-5);
        assert!((c.tangent(1.0) - vector(0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn degenerate_tangent_uses_distinct_points() {
        let c = Curve::Cubic(CubicBezierSegment {
            from: point(0.0, 0.0),
            ctrl1: point(0.0, 0.0),
            ctrl2: point(10.0, 0.0),
            to: point(10.0, 0.0),
        });

        assert!((c.tangent(0.0) - vector(1.0, 0.0)).length() < 1e-5);
        assert!((c.tangent(1.0) - vector(1.0, 0.0)).length() < 1e-5);

        let zero = Curve::line(point(1.0, 1.0), point(1.0, 1.0));
        assert_eq!(zero.tangent(0.5), vector(0.0, 0.0));
    }

    #[test]
    fn flattening_respects_the_tolerance() {
        for curve in curves() {
            let mut count = 0;
            let mut prev_t = 0.0;
            let mut last_t = 0.0;
            let ok = curve.for_each_line(DEFAULT_TOLERANCE, &mut |from, to, t0, t1| {
                count += 1;
                assert_eq!(t0, prev_t);
                assert!(t1 > t0);
                prev_t = t1;
                last_t = t1;

                // The subdivision criterion, unless the progress floor kicked in.
                if t1 - t0 > MIN_PROGRESS {
                    let mid = curve.sample((t0 + t1) * 0.5);
                    let chord_mid = from.lerp(to, 0.5);
                    let d = (mid.x - chord_mid.x).abs() + (mid.y - chord_mid.y).abs();
                    assert!(d <= DEFAULT_TOLERANCE, "{:?}: error {}", curve, d);
                }
                true
            });

            assert!(ok);
            assert!(count >= 1);
            assert_eq!(last_t, 1.0);
        }
    }

    #[test]
    fn flattening_stops_early() {
        let curve = &curves()[1];
        let mut count = 0;
        let ok = curve.for_each_line(0.01, &mut |_, _, _, _| {
            count += 1;
            count < 3
        });

        assert!(!ok);
        assert_eq!(count, 3);
    }

    #[test]
    fn split_invariants() {
        for curve in curves() {
            for i in 1..10 {
                let t = i as f32 / 10.0;
                let (a, b) = curve.split(t);

                assert_eq!(a.start_point(), curve.start_point());
                assert_eq!(b.end_point(), curve.end_point());
                assert!((a.end_point() - b.start_point()).length() < 0.005);
                assert!((a.end_point() - curve.sample(t)).length() < 0.005);

                let tangent = curve.tangent(t);
                assert!((a.tangent(1.0) - tangent).length() < 0.005);
                assert!((b.tangent(0.0) - tangent).length() < 0.005);

                if let Curve::Arc(_) = curve {
                    // Splitting an arc renormalizes its weight, so the halves
                    // are not linear reparameterizations of the original.
                    // Their samples still lie on it.
                    let (_, d) = curve.closest_point(a.sample(0.5));
                    assert!(d < 0.005);
                    let (_, d) = curve.closest_point(b.sample(0.5));
                    assert!(d < 0.005);
                } else {
                    assert!((a.sample(0.5) - curve.sample(t * 0.5)).length() < 0.005);
                    assert!((b.sample(0.5) - curve.sample(t + (1.0 - t) * 0.5)).length() < 0.005);
                }
            }
        }
    }

    #[test]
    fn rewriting_to_subsets_stays_close() {
        let all = [
            ForeachFlags::empty(),
            ForeachFlags::ALLOW_QUAD,
            ForeachFlags::ALLOW_CUBIC,
            ForeachFlags::ALLOW_QUAD | ForeachFlags::ALLOW_CUBIC,
        ];

        for curve in curves() {
            for &flags in &all {
                let mut pieces = Vec::new();
                curve.for_each_curve(flags, DEFAULT_TOLERANCE, &mut |c| {
                    pieces.push(*c);
                    true
                });

                assert!(!pieces.is_empty());
                assert_eq!(pieces.first().unwrap().start_point(), curve.start_point());
                assert_eq!(pieces.last().unwrap().end_point(), curve.end_point());
                for piece in &pieces {
                    match piece {
                        Curve::Arc(_) => panic!("arc emitted without the arc flag"),
                        Curve::Cubic(_) => assert!(flags.contains(ForeachFlags::ALLOW_CUBIC)),
                        Curve::Quadratic(_) => assert!(flags.contains(ForeachFlags::ALLOW_QUAD)),
                        Curve::Line(_) => {}
                    }
                }
                // Pieces are contiguous.
                for pair in pieces.windows(2) {
                    assert_eq!(pair[0].end_point(), pair[1].start_point());
                }
            }
        }
    }

    #[test]
    fn quadratic_passes_through_as_cubic() {
        let q = curves()[1];
        let mut pieces = Vec::new();
        q.for_each_curve(ForeachFlags::ALLOW_CUBIC, DEFAULT_TOLERANCE, &mut |c| {
            pieces.push(*c);
            true
        });

        // The exact elevation, in one piece.
        assert_eq!(pieces.len(), 1);
        match pieces[0] {
            Curve::Cubic(c) => {
                for i in 0..=8 {
                    let t = i as f32 / 8.0;
                    assert!((c.sample(t) - q.sample(t)).length() < 1e-3);
                }
            }
            ref other => panic!("expected a cubic, got {:?}", other),
        }
    }

    #[test]
    fn closest_point_on_curves() {
        let q = curves()[1];
        let (t, d) = q.closest_point(q.sample(0.37));
        assert!((t - 0.37).abs() < 1e-3);
        assert!(d < 1e-3);

        let arc = curves()[3];
        let (_, d) = arc.closest_point(point(0.0, 0.0));
        assert!((d - 50.0).abs() < 0.01);
    }

    #[test]
    fn curvature_of_a_circle_is_its_inverse_radius() {
        let arc = ArcSegment::from_control(point(50.0, 0.0), point(50.0, 50.0), point(0.0, 50.0));
        let curve = Curve::Arc(arc);

        for i in 0..=8 {
            let t = i as f32 / 8.0;
            let (k, center) = curve.curvature(t);
            assert!((k.abs() - 1.0 / 50.0).abs() < 1e-4, "t = {}: k = {}", t, k);
            let center = center.unwrap();
            assert!((center - point(0.0, 0.0)).length() < 0.05, "{:?}", center);
        }

        let line = Curve::line(point(0.0, 0.0), point(5.0, 5.0));
        assert_eq!(line.curvature(0.5), (0.0, None));
    }
}
