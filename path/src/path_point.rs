//! Addressing points on a path.

use crate::math::{Point, Vector};
use crate::path::Path;
use std::cmp::Ordering;

/// Which tangent to report at a point where two segments meet.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    /// The direction the path travels into the point.
    Incoming,
    /// The direction the path leaves the point.
    Outgoing,
}

/// A point on a path, addressed by contour, segment and parameter.
///
/// A `PathPoint` does not hold a reference to its path; queries take the path
/// explicitly, and a point is only meaningful for the path it was obtained
/// from.
///
/// The end of one segment and the start of the next address the same
/// location, and compare equal. The start and end of a closed contour do
/// *not*: whether they coincide is a property of a concrete path, answered by
/// [`Path::is_closed`].
#[derive(Copy, Clone, Debug)]
pub struct PathPoint {
    contour: usize,
    idx: usize,
    t: f32,
}

impl PathPoint {
    pub(crate) fn new(contour: usize, idx: usize, t: f32) -> Self {
        PathPoint { contour, idx, t }
    }

    pub fn contour(&self) -> usize {
        self.contour
    }

    pub fn segment(&self) -> usize {
        self.idx
    }

    pub fn t(&self) -> f32 {
        self.t
    }

    /// The position of the point.
    ///
    /// `None` if the point does not address a segment of this path.
    pub fn position(&self, path: &Path) -> Option<Point> {
        path.contours()
            .get(self.contour)?
            .position(self.idx, self.t)
    }

    /// The unit tangent at the point.
    ///
    /// At a sharp joint the tangent going into the point and the one leaving
    /// it differ; `direction` selects which one is returned.
    pub fn tangent(&self, path: &Path, direction: Direction) -> Option<Vector> {
        path.contours()
            .get(self.contour)?
            .tangent(self.idx, self.t, direction)
    }

    /// The angle between the tangent and the x axis, in degrees.
    pub fn rotation(&self, path: &Path, direction: Direction) -> Option<f32> {
        let tangent = self.tangent(path, direction)?;
        Some(tangent.y.atan2(tangent.x).to_degrees())
    }

    /// The signed curvature at the point and, when the path is locally
    /// curved, the center of the osculating circle.
    pub fn curvature(&self, path: &Path) -> Option<(f32, Option<Point>)> {
        path.contours()
            .get(self.contour)?
            .curvature(self.idx, self.t)
    }
}

impl PartialEq for PathPoint {
    /// Whether two points refer to the same location on all paths.
    fn eq(&self, other: &Self) -> bool {
        self.contour == other.contour
            && ((self.idx == other.idx && self.t == other.t)
                || (self.idx + 1 == other.idx && self.t == 1.0 && other.t == 0.0)
                || (self.idx == other.idx + 1 && self.t == 0.0 && other.t == 1.0))
    }
}

impl PartialOrd for PathPoint {
    /// Traversal order. Points that compare equal under the seam rule are
    /// equal here as well, whichever encoding each uses.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            return Some(Ordering::Equal);
        }

        Some(
            self.contour
                .cmp(&other.contour)
                .then(self.idx.cmp(&other.idx))
                .then(self.t.partial_cmp(&other.t)?),
        )
    }
}
