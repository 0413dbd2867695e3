//! Randomized whole-path properties: printing and reparsing, concatenation,
//! and fill queries under composition and rotation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use tracery_path::math::{point, size, Point};
use tracery_path::{
    FillRule, ForeachFlags, Path, PathBuilder, PathOperation, DEFAULT_TOLERANCE,
};

fn random_point(rng: &mut StdRng, range: f32) -> Point {
    point(rng.gen_range(-range..range), rng.gen_range(-range..range))
}

fn random_standard_contour(rng: &mut StdRng, builder: &mut PathBuilder, range: f32) {
    builder.move_to(random_point(rng, range));
    for _ in 0..rng.gen_range(1..=8) {
        match rng.gen_range(0..4) {
            0 => builder.line_to(random_point(rng, range)),
            1 => builder.quadratic_bezier_to(random_point(rng, range), random_point(rng, range)),
            2 => builder.cubic_bezier_to(
                random_point(rng, range),
                random_point(rng, range),
                random_point(rng, range),
            ),
            _ => builder.conic_to(random_point(rng, range), random_point(rng, range)),
        }
    }
    if rng.gen_bool(0.5) {
        builder.close();
    }
}

fn random_degenerate_contour(rng: &mut StdRng, builder: &mut PathBuilder, range: f32) {
    match rng.gen_range(0..5) {
        // A single point, open or closed.
        0 => builder.move_to(random_point(rng, range)),
        1 => {
            builder.move_to(random_point(rng, range));
            builder.close();
        }
        // A zero-length line.
        2 => {
            let p = random_point(rng, range);
            builder.move_to(p);
            builder.line_to(p);
        }
        // A cubic that starts and ends at the same point.
        3 => {
            let p = random_point(rng, range);
            builder.move_to(p);
            builder.cubic_bezier_to(random_point(rng, range), random_point(rng, range), p);
            builder.close();
        }
        // An empty rectangle.
        _ => builder.add_rect(random_point(rng, range), size(0.0, rng.gen_range(0.0..range))),
    }
}

fn random_path(rng: &mut StdRng, range: f32, allow_shapes: bool) -> Path {
    let mut builder = Path::builder();
    for _ in 0..rng.gen_range(1..=4) {
        if rng.gen_bool(0.05) {
            random_degenerate_contour(rng, &mut builder, range);
        } else if allow_shapes && rng.gen_bool(0.3) {
            if rng.gen_bool(0.5) {
                builder.add_rect(
                    random_point(rng, range),
                    size(
                        rng.gen_range(-range..range),
                        rng.gen_range(-range..range),
                    ),
                );
            } else {
                builder.add_circle(random_point(rng, range), rng.gen_range(1.0..range));
            }
        } else {
            random_standard_contour(rng, &mut builder, range);
        }
    }

    builder.build()
}

fn operations(path: &Path) -> Vec<PathOperation> {
    let mut ops = Vec::new();
    path.for_each(ForeachFlags::all(), DEFAULT_TOLERANCE, &mut |op| {
        ops.push(*op);
        true
    });

    ops
}

fn assert_operations_match(a: &[PathOperation], b: &[PathOperation]) {
    assert_eq!(a.len(), b.len(), "{:?} vs {:?}", a, b);
    for (x, y) in a.iter().zip(b.iter()) {
        assert_eq!(std::mem::discriminant(x), std::mem::discriminant(y));
        let (xp, n) = x.points();
        let (yp, m) = y.points();
        assert_eq!(n, m);
        for i in 0..n {
            assert!(
                (xp[i] - yp[i]).length() <= 1.0 / 1024.0,
                "{:?} vs {:?}",
                x,
                y
            );
        }
    }
}

#[test]
fn print_parse_round_trip() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..1000 {
        let path = random_path(&mut rng, 1000.0, true);
        let text = path.to_string();
        let reparsed: Path = text.parse().unwrap_or_else(|e| {
            panic!("failed to parse {:?}: {}", text, e);
        });

        assert_operations_match(&operations(&path), &operations(&reparsed));
    }
}

#[test]
fn concatenation_concatenates_the_texts() {
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..200 {
        let a = random_path(&mut rng, 1000.0, true);
        let b = random_path(&mut rng, 1000.0, true);

        let text_a = a.to_string();
        let text_b = b.to_string();
        let mut text = text_a.clone();
        if !text_a.is_empty() && !text_b.is_empty() {
            text.push(' ');
        }
        text.push_str(&text_b);

        let mut builder = Path::builder();
        builder.add_path(&a);
        builder.add_path(&b);
        assert_eq!(builder.build().to_string(), text);

        let parsed: Path = text.parse().unwrap();
        let mut expected = operations(&a);
        expected.extend(operations(&b));
        assert_operations_match(&expected, &operations(&parsed));
    }
}

#[test]
fn in_fill_of_a_union() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..50 {
        let parts = [
            random_path(&mut rng, 100.0, true),
            random_path(&mut rng, 100.0, true),
            random_path(&mut rng, 100.0, true),
        ];
        let mut builder = Path::builder();
        for part in &parts {
            builder.add_path(part);
        }
        let union = builder.build();

        for _ in 0..10 {
            let p = random_point(&mut rng, 110.0);

            let odd = parts
                .iter()
                .filter(|part| part.in_fill(p, FillRule::EvenOdd))
                .count()
                % 2
                == 1;
            assert_eq!(union.in_fill(p, FillRule::EvenOdd), odd);

            if parts.iter().all(|part| !part.in_fill(p, FillRule::NonZero)) {
                assert!(!union.in_fill(p, FillRule::NonZero));
            }
        }
    }
}

fn rotate(p: Point) -> Point {
    point(p.y, -p.x)
}

/// Rebuilds a path rotated by a quarter turn. Coordinates only get swapped
/// and negated, so the rotated curves are exact.
fn rotated_path(path: &Path) -> Path {
    let mut builder = Path::builder();
    path.for_each(ForeachFlags::all(), DEFAULT_TOLERANCE, &mut |op| {
        match *op {
            PathOperation::Move { to } => builder.move_to(rotate(to)),
            PathOperation::Line { to, .. } => builder.line_to(rotate(to)),
            PathOperation::Quadratic { ctrl, to, .. } => {
                builder.quadratic_bezier_to(rotate(ctrl), rotate(to))
            }
            PathOperation::Cubic {
                ctrl1, ctrl2, to, ..
            } => builder.cubic_bezier_to(rotate(ctrl1), rotate(ctrl2), rotate(to)),
            PathOperation::Arc {
                ctrl1, ctrl2, to, ..
            } => builder.arc_to(rotate(ctrl1), rotate(ctrl2), rotate(to)),
            PathOperation::Close { .. } => builder.close(),
        }
        true
    });

    builder.build()
}

#[test]
fn in_fill_is_rotation_invariant() {
    let mut rng = StdRng::seed_from_u64(8);
    for _ in 0..100 {
        let path = random_path(&mut rng, 100.0, false);
        let rotated = rotated_path(&path);

        for _ in 0..10 {
            let p = random_point(&mut rng, 110.0);
            for rule in [FillRule::EvenOdd, FillRule::NonZero] {
                assert_eq!(
                    path.in_fill(p, rule),
                    rotated.in_fill(rotate(p), rule),
                    "at {:?} of {}",
                    p,
                    path
                );
            }
        }
    }
}

#[test]
fn degenerate_paths_round_trip() {
    for text in [
        "",
        "M 1 2",
        "M 1 2 Z",
        "M 0 0 L 0 0",
        "M 0 0 L 0 0 Z",
        "M 5 5 C 5 5 5 5 5 5",
    ] {
        let path: Path = text.parse().unwrap();
        assert_eq!(path.to_string(), text);
    }

    let mut builder = Path::builder();
    builder.add_rect(point(0.0, 0.0), size(0.0, 0.0));
    builder.add_circle(point(3.0, 4.0), 0.0);
    let path = builder.build();
    let reparsed: Path = path.to_string().parse().unwrap();
    assert_operations_match(&operations(&path), &operations(&reparsed));
}

#[test]
fn points_in_a_composite_path() {
    let mut builder = Path::builder();
    builder.add_rect(point(0.0, 0.0), size(10.0, 10.0));
    builder.add_circle(point(30.0, 5.0), 4.0);
    let path = builder.build();

    assert!(path.in_fill(point(5.0, 5.0), FillRule::NonZero));
    assert!(path.in_fill(point(30.0, 5.0), FillRule::EvenOdd));
    assert!(!path.in_fill(point(20.0, 5.0), FillRule::NonZero));

    let (pp, d) = path.closest_point(point(31.0, 5.0), 100.0).unwrap();
    assert_eq!(pp.contour(), 1);
    assert!((d - 3.0).abs() < 0.05);
}
