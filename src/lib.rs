#![deny(bare_trait_objects)]

//! Immutable 2D vector paths with curve math, fill queries and a textual
//! format that is a superset of SVG path data.
//!
//! # Crates
//!
//! This meta-crate (`tracery`) reexports the following sub-crates for convenience:
//!
//! * **tracery_path** - Paths, contours, traversal, hit testing and the text format.
//! * **tracery_geom** - Line segment, bézier and elliptical arc math.
//!
//! Each `tracery_<name>` crate is reexported as a `<name>` module. For example
//! `tracery_path::Path` is also available as `tracery::path::Path`.
//!
//! # Examples
//!
//! ```
//! use tracery::math::point;
//! use tracery::path::{FillRule, Path};
//!
//! fn main() {
//!     let path: Path = "M 0 0 L 10 0 L 10 10 Z".parse().unwrap();
//!
//!     assert!(path.in_fill(point(5.0, 5.0), FillRule::EvenOdd));
//!     assert!(!path.in_fill(point(20.0, 20.0), FillRule::EvenOdd));
//! }
//! ```

pub use tracery_geom as geom;
pub use tracery_path as path;

pub use tracery_path::math;
