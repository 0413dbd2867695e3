//! The textual form of a path.
//!
//! Printing is the inverse of [parsing](crate::parser): absolute coordinates,
//! one letter per operation, tokens separated by single spaces. Arcs print as
//! the `E` command with their two auxiliary points and endpoint; a closed
//! contour's closing line prints as `Z`.

use crate::path::{Path, PathOperation};
use crate::{ForeachFlags, DEFAULT_TOLERANCE};
use std::fmt::{self, Write};

pub(crate) fn write_path(path: &Path, f: &mut fmt::Formatter) -> fmt::Result {
    let mut out = String::new();
    path.for_each(ForeachFlags::all(), DEFAULT_TOLERANCE, &mut |op| {
        if !out.is_empty() {
            out.push(' ');
        }
        write_operation(&mut out, op);
        true
    });

    f.write_str(&out)
}

fn write_operation(out: &mut String, op: &PathOperation) {
    // Writing to a String cannot fail.
    let _ = match *op {
        PathOperation::Move { to } => write!(out, "M {} {}", to.x, to.y),
        PathOperation::Line { from: _, to } => write!(out, "L {} {}", to.x, to.y),
        PathOperation::Quadratic { from: _, ctrl, to } => {
            write!(out, "Q {} {} {} {}", ctrl.x, ctrl.y, to.x, to.y)
        }
        PathOperation::Cubic {
            from: _,
            ctrl1,
            ctrl2,
            to,
        } => write!(
            out,
            "C {} {} {} {} {} {}",
            ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y
        ),
        PathOperation::Arc {
            from: _,
            ctrl1,
            ctrl2,
            to,
        } => write!(
            out,
            "E {} {} {} {} {} {}",
            ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y
        ),
        PathOperation::Close { .. } => write!(out, "Z"),
    };
}
