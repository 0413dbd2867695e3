use crate::math::{Box2D, Point, Vector};

/// A linear segment.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LineSegment {
    pub from: Point,
    pub to: Point,
}

impl LineSegment {
    /// Sample the segment at t (expecting t between 0 and 1).
    #[inline]
    pub fn sample(&self, t: f32) -> Point {
        self.from.lerp(self.to, t)
    }

    /// Sample the x coordinate of the segment at t (expecting t between 0 and 1).
    #[inline]
    pub fn x(&self, t: f32) -> f32 {
        self.from.x * (1.0 - t) + self.to.x * t
    }

    /// Sample the y coordinate of the segment at t (expecting t between 0 and 1).
    #[inline]
    pub fn y(&self, t: f32) -> f32 {
        self.from.y * (1.0 - t) + self.to.y * t
    }

    #[inline]
    pub fn to_vector(&self) -> Vector {
        self.to - self.from
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.to_vector().length()
    }

    #[inline]
    pub fn square_length(&self) -> f32 {
        self.to_vector().square_length()
    }

    /// Returns an inverted version of this segment where the beginning and the end
    /// points are swapped.
    #[inline]
    pub fn flip(&self) -> Self {
        LineSegment {
            from: self.to,
            to: self.from,
        }
    }

    /// Split this curve into two sub-segments.
    #[inline]
    pub fn split(&self, t: f32) -> (Self, Self) {
        let split_point = self.sample(t);

        (
            LineSegment {
                from: self.from,
                to: split_point,
            },
            LineSegment {
                from: split_point,
                to: self.to,
            },
        )
    }

    /// The parameter of the point on the segment closest to `p`, clamped to [0, 1].
    pub fn closest_point(&self, p: Point) -> f32 {
        let v = self.to_vector();
        let l2 = v.square_length();
        if l2 == 0.0 {
            return 0.0;
        }

        ((p - self.from).dot(v) / l2).max(0.0).min(1.0)
    }

    /// The distance from `p` to the closest point on the segment.
    pub fn distance_to_point(&self, p: Point) -> f32 {
        (self.sample(self.closest_point(p)) - p).length()
    }

    pub fn bounding_box(&self) -> Box2D {
        Box2D::new(self.from.min(self.to), self.from.max(self.to))
    }

    /// Whether the segment crosses the horizontal line at `y`, using the
    /// half-open convention: the lower endpoint is on the line, the upper
    /// endpoint is not.
    ///
    /// Returns the winding contribution (+1 upward-in-y, -1 downward) and the
    /// x coordinate of the crossing.
    pub fn horizontal_crossing(&self, y: f32) -> Option<(i32, f32)> {
        if self.from.y <= y && self.to.y > y {
            Some((1, self.x(self.solve_t_for_y(y))))
        } else if self.to.y <= y && self.from.y > y {
            Some((-1, self.x(self.solve_t_for_y(y))))
        } else {
            None
        }
    }

    pub fn solve_t_for_y(&self, y: f32) -> f32 {
        let dy = self.to.y - self.from.y;
        if dy == 0.0 {
            return 0.0;
        }

        (y - self.from.y) / dy
    }
}
