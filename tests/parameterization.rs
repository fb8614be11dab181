//! Tests of the two parameterizations shared by every kind of path.

use assert_approx_eq::assert_approx_eq;
use geom_kernel::{
    math::{BezierCurve, Ellipse, LineSegment, Norm, Rect, Spiral},
    Context, Displacement, Locator, OffsetCurve, Path, PolygonalPath, RectPath, SequencePath,
    Simplified,
};
use geom_kernel::{Point2d, Vector2d};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f64::consts::PI;

fn pt(x: f64, y: f64) -> Point2d {
    Point2d::new(x, y)
}

fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Path {
    LineSegment::from_points(pt(x1, y1), pt(x2, y2)).unwrap().into()
}

fn bezier() -> Path {
    BezierCurve::new([pt(0.0, 0.0), pt(4.0, 8.0), pt(12.0, -4.0), pt(16.0, 4.0)]).unwrap().into()
}

fn arc() -> Path {
    Ellipse::from_radii(pt(2.0, 1.0), 8.0, 5.0, 0.3).unwrap().arc(0.2, 2.5).unwrap().into()
}

fn assert_near(a: Point2d, b: Point2d) {
    assert!(Norm::L2.distance_between(a, b) < 1e-9, "{:?} is not {:?}", a, b);
}

/// One of every kind of path.
fn paths(ctx: &Context) -> Vec<Path> {
    let spiral: Path = Spiral::new(pt(0.0, 0.0), 0.0, 3.0 * PI, 2.0, 8.0).unwrap().into();
    let offset: Path = OffsetCurve::new(arc(), Displacement::linear(0.5, 1.5), ctx).unwrap().into();
    let polygon: Path = PolygonalPath::builder()
        .add_points([pt(0.0, 0.0), pt(3.0, 0.0), pt(3.0, 4.0), pt(-2.0, 6.0)])
        .build()
        .unwrap()
        .into();
    let rect: Path = RectPath::new(Rect::new(-1.0, -2.0, 5.0, 1.0).unwrap(), false).into();
    vec![line(1.0, 1.0, 7.0, -2.0), bezier(), arc(), spiral, offset, polygon, rect, sequence()]
}

/// A line, a curve and a line, joined end to end.
fn sequence() -> Path {
    let curve = bezier();
    let before = line(-5.0, 0.0, 0.0, 0.0);
    let after = line(16.0, 4.0, 16.0, 10.0);
    SequencePath::new(vec![before, curve, after], false).unwrap().into()
}

/// Test that converting a parameter to a length and back recovers it.
#[test]
fn intrinsic_and_length_are_inverse() {
    let ctx = Context::default();
    for path in paths(&ctx) {
        let by_intrinsic = path.by_intrinsic(&ctx);
        let by_length = path.by_length(&ctx);
        assert_approx_eq!(by_length.maximum(), path.length(&ctx));
        for i in 0..=20 {
            let p = i as f64 / 20.0;
            let s = by_intrinsic.length_at(p);
            assert_approx_eq!(by_length.intrinsic_at(s), p, 1e-4);
            assert_approx_eq!(by_length.point_at(s).x, by_intrinsic.point_at(p).x, 1e-3);
            assert_approx_eq!(by_length.point_at(s).y, by_intrinsic.point_at(p).y, 1e-3);
        }
    }
}

/// Test that the ends of a Bézier curve are its first and last control points.
#[test]
fn bezier_curves_meet_their_ends_exactly() {
    let ctx = Context::default();
    let mut rng = StdRng::from_seed(*b"the ends of every bezier curve!!");
    for order in 1..8 {
        let points: Vec<Point2d> =
            (0..=order).map(|_| pt(rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0))).collect();
        let path: Path = BezierCurve::new(points.clone()).unwrap().into();
        let z = path.by_intrinsic(&ctx);
        assert_eq!(z.point_at(0.0), points[0]);
        assert_eq!(z.point_at(1.0), points[order]);
        let z = path.by_length(&ctx);
        assert_eq!(z.point_at(0.0), points[0]);
        assert_eq!(z.point_at(z.maximum()), points[order]);
    }
}

/// Test that points along a sequence are the points along its parts.
#[test]
fn sequences_defer_to_their_parts() {
    let ctx = Context::default();
    let parts = vec![
        line(-5.0, 0.0, 0.0, 0.0),
        bezier(),
        line(16.0, 4.0, 16.0, 10.0),
        line(16.0, 10.0, 10.0, 10.0),
    ];
    let path: Path = SequencePath::new(parts.clone(), false).unwrap().into();
    let z = path.by_length(&ctx);
    let mut before = 0.0;
    for part in &parts {
        let length = part.length(&ctx);
        for i in 0..10 {
            let s = length * (i as f64 + 0.5) / 10.0;
            let expected = part.by_length(&ctx).point_at(s);
            let actual = z.point_at(before + s);
            assert_approx_eq!(actual.x, expected.x, 1e-9);
            assert_approx_eq!(actual.y, expected.y, 1e-9);
        }
        before += length;
    }
    assert_approx_eq!(before, path.length(&ctx));
}

/// Test that the halves of a split path trace the original path.
#[test]
fn split_halves_trace_the_path() {
    let ctx = Context::default();
    let mut rng = StdRng::from_seed(*b"split every path in two anywhere");
    for path in paths(&ctx) {
        let original = path.linearized(&ctx);
        for _ in 0..5 {
            let p: f64 = rng.gen_range(0.05..0.95);
            let (first, second) = path.by_intrinsic(&ctx).split_at(p);
            assert_near(first.start(), path.start());
            assert_near(second.finish(), path.finish());
            assert_near(first.finish(), second.start());
            assert_approx_eq!(first.length(&ctx) + second.length(&ctx), path.length(&ctx), 1e-3);

            let mut joined = first.linearized(&ctx);
            joined.extend(second.linearized(&ctx).into_iter().skip(1));
            for vertex in joined {
                let nearest = original
                    .windows(2)
                    .filter_map(|w| LineSegment::from_points(w[0], w[1]).ok())
                    .map(|segment| segment.nearest_point_to(vertex))
                    .map(|q| Norm::L2.distance_between(vertex, q))
                    .fold(f64::INFINITY, f64::min);
                assert!(nearest < 0.5, "{:?} lies {} from the path", vertex, nearest);
            }
        }
    }
}

/// Test that arc length grows along the path as measured by the locator.
#[test]
fn arc_length_is_monotonic() {
    let ctx = Context::default();
    let path = sequence();
    let z = path.by_length(&ctx);
    let steps = 40;
    let mut last = 0.0;
    for i in 0..=steps {
        let s = z.maximum() * i as f64 / steps as f64;
        let located = Locator::new(z.point_at(s)).locate(&path, &ctx);
        assert!(located >= last, "{} located before {}", s, last);
        assert_approx_eq!(located, s, 0.02 * z.maximum());
        last = located;
    }
}

/// Test that simplifying a linear path leaves it as it was.
#[test]
fn simplifying_lines_changes_nothing() {
    let ctx = Context::default();
    let path = line(1.0, 2.0, 4.0, 6.0);
    let Simplified::Linear(segment) = path.simplify(&ctx) else {
        panic!("a line simplifies to itself");
    };
    assert_eq!(segment.start(), path.start());
    assert_eq!(segment.finish(), path.finish());
    assert_eq!(Path::from(segment).linearized(&ctx), path.linearized(&ctx));
    assert!(ctx.simplify(&path).ptr_eq(&path));

    let polygon: Path =
        PolygonalPath::builder().add_points([pt(0.0, 0.0), pt(0.0, 3.0)]).build().unwrap().into();
    let Simplified::Linear(segment) = polygon.simplify(&ctx) else {
        panic!("a single edge is linear");
    };
    assert_eq!(segment.finish(), pt(0.0, 3.0));
    assert_eq!(polygon.by_intrinsic(&ctx).tangent_at(0.5), Vector2d::new(0.0, 1.0));
}
