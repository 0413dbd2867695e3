//! Stroke parameters.
//!
//! Only the parameters and the conservative bound computation live here; the
//! stroker itself belongs to a renderer.

use std::f32::consts::SQRT_2;

/// The shape drawn at the unclosed ends of a stroked contour.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

/// The shape drawn where two stroked segments meet.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LineJoin {
    Miter,
    Round,
    Bevel,
}

/// How a path would be stroked.
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    pub line_width: f32,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    /// Maximum ratio between the miter length and the line width before a
    /// miter join is clipped.
    pub miter_limit: f32,
    /// Alternating on/off dash lengths. Empty means a solid stroke.
    pub dash: Vec<f32>,
    pub dash_offset: f32,
}

impl Default for Stroke {
    fn default() -> Self {
        Stroke {
            line_width: 2.0,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            miter_limit: 4.0,
            dash: Vec::new(),
            dash_offset: 0.0,
        }
    }
}

impl Stroke {
    pub fn new(line_width: f32) -> Self {
        Stroke {
            line_width,
            ..Self::default()
        }
    }

    /// How far the stroked outline can extend beyond the path, on each side.
    ///
    /// Miter joins can reach `miter_limit` half-widths from the path and
    /// square caps extend by half the cap's diagonal; round and bevel
    /// features stay within a half-width.
    pub fn bound_margin(&self) -> f32 {
        let mut factor: f32 = 1.0;
        if self.line_join == LineJoin::Miter {
            factor = factor.max(self.miter_limit);
        }
        if self.line_cap == LineCap::Square {
            factor = factor.max(SQRT_2);
        }

        0.5 * self.line_width * factor
    }
}
