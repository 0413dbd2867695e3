#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::many_single_char_names)]

//! Simple 2D geometric primitives on top of euclid.
//!
//! This crate is reexported in [tracery](https://docs.rs/tracery/).
//!
//! It implements the math needed to work with:
//!
//! - line segments,
//! - quadratic and cubic bézier curves,
//! - elliptical arc segments, stored as four points (see [`ArcSegment`]),
//! - conversion from SVG endpoint-parameterized arcs.
//!
//! All types are `f32`. The [`math`] module provides the euclid aliases used
//! throughout.

// Reexport dependencies.
pub use arrayvec;
pub use euclid;

pub mod arc;
pub mod cubic_bezier;
pub mod line;
pub mod quadratic_bezier;

#[doc(inline)]
pub use crate::arc::{ArcFlags, ArcSegment, SvgArc};
#[doc(inline)]
pub use crate::cubic_bezier::CubicBezierSegment;
#[doc(inline)]
pub use crate::line::LineSegment;
#[doc(inline)]
pub use crate::quadratic_bezier::QuadraticBezierSegment;

pub mod math {
    //! f32 euclid aliases used everywhere. Most other tracery crates reexport them.

    /// Alias for `euclid::default::Point2D<f32>`.
    pub type Point = euclid::default::Point2D<f32>;

    /// Alias for `euclid::default::Vector2D<f32>`.
    pub type Vector = euclid::default::Vector2D<f32>;

    /// Alias for `euclid::default::Size2D<f32>`.
    pub type Size = euclid::default::Size2D<f32>;

    /// Alias for `euclid::default::Box2D<f32>`.
    pub type Box2D = euclid::default::Box2D<f32>;

    /// An angle in radians.
    pub type Angle = euclid::Angle<f32>;

    /// Shorthand for `Point::new`.
    #[inline]
    pub fn point(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    /// Shorthand for `Vector::new`.
    #[inline]
    pub fn vector(x: f32, y: f32) -> Vector {
        Vector::new(x, y)
    }

    /// Shorthand for `Size::new`.
    #[inline]
    pub fn size(w: f32, h: f32) -> Size {
        Size::new(w, h)
    }
}
