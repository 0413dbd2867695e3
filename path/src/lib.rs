#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::match_like_matches_macro)]

//! Data structures and queries for immutable 2D vector paths.
//!
//! A [`Path`] is a sequence of [`Contour`]s, each made of [`Curve`] segments
//! (lines, quadratic and cubic béziers, elliptical arcs). Paths are built
//! once, with a [`builder::PathBuilder`] or by parsing the text format, and
//! never mutated afterwards.
//!
//! This crate is reexported in [tracery](https://docs.rs/tracery/).
//!
//! # Examples
//!
//! ```
//! use tracery_path::math::point;
//! use tracery_path::{FillRule, Path};
//!
//! let mut builder = Path::builder();
//! builder.move_to(point(0.0, 0.0));
//! builder.line_to(point(10.0, 0.0));
//! builder.line_to(point(10.0, 10.0));
//! builder.close();
//! let path = builder.build();
//!
//! assert_eq!(path.to_string(), "M 0 0 L 10 0 L 10 10 Z");
//! assert!(path.in_fill(point(5.0, 2.0), FillRule::EvenOdd));
//! ```

pub use tracery_geom as geom;

pub mod builder;
mod contour;
mod curve;
pub mod parser;
mod path;
mod path_point;
mod serializer;
mod stroke;

#[doc(inline)]
pub use crate::builder::PathBuilder;
#[doc(inline)]
pub use crate::contour::Contour;
#[doc(inline)]
pub use crate::curve::Curve;
#[doc(inline)]
pub use crate::parser::ParseError;
#[doc(inline)]
pub use crate::path::{Path, PathOperation};
#[doc(inline)]
pub use crate::path_point::{Direction, PathPoint};
#[doc(inline)]
pub use crate::stroke::{LineCap, LineJoin, Stroke};

pub mod math {
    //! The f32 euclid aliases from [tracery_geom](crate::geom), reexported.

    pub use tracery_geom::math::*;
}

/// Default tolerance for flattening and curve conversion, in the unit of the
/// path's coordinates.
///
/// The tolerance bounds the distance between a curve and its approximation.
pub const DEFAULT_TOLERANCE: f32 = 0.5;

// Subdivision never recurses below intervals of this width, whatever the
// tolerance asks for.
pub(crate) const MIN_PROGRESS: f32 = 1.0 / 1024.0;

/// The fill rule defining the interior of a path.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FillRule {
    EvenOdd,
    NonZero,
}

impl FillRule {
    /// Whether a winding number counts as inside under this rule.
    #[inline]
    pub fn is_in(self, winding: i32) -> bool {
        match self {
            FillRule::EvenOdd => winding % 2 != 0,
            FillRule::NonZero => winding != 0,
        }
    }
}

bitflags::bitflags! {
    /// The curve types a traversal is allowed to emit.
    ///
    /// Curves of a kind that is not allowed are rewritten in terms of the
    /// richest allowed kind: arcs degrade to cubics, cubics to quadratics,
    /// and ultimately everything to line segments. An empty set of flags
    /// yields a flattened path.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct ForeachFlags: u32 {
        /// Quadratic bézier operations may be emitted.
        const ALLOW_QUAD = 1 << 0;
        /// Cubic bézier operations may be emitted.
        const ALLOW_CUBIC = 1 << 1;
        /// Elliptical arc operations may be emitted.
        const ALLOW_ARC = 1 << 2;
    }
}
