//! Paths: the traced, directed images of curves and of compositions of curves.
//!
//! A [Path] is a cheaply clonable handle over a [PathKind]. Every path can be
//! queried through two parameterizations, by intrinsic parameter over `[0, 1]`
//! and by arc length over `[0, length]`, can be simplified one step at a time
//! and can be linearized into a polyline.

use crate::helper::PointConsumer;
use crate::math::{
    BezierCurve, EllipticalArc, LineSegment, Point2d, Rect, Spiral, Transform, Vector2d,
};
use crate::{Context, Result};
use curve::Curve;
use index::Parameterizations;
use log::debug;
use once_cell::sync::OnceCell;
use parameterization::Reparameterization;
use std::{fmt, sync::Arc};

pub use corner::Corner;
pub use location::Location;
pub use offset::{Displacement, OffsetCurve};
pub use parameterization::Parameterization;
pub use point::PointPath;
pub use polygonal::{PolygonalPath, PolygonalPathBuilder};
pub use rect::RectPath;
pub use sequence::{SequencePath, SequencePathBuilder, SequencePolicy};
pub use split::SplitPath;

mod corner;
mod curve;
mod index;
mod linear;
mod location;
mod offset;
mod parameterization;
mod point;
mod polygonal;
mod rect;
mod sequence;
mod split;

/// The geometry underlying a [Path].
#[derive(Clone, Debug)]
pub enum PathKind {
    Linear(LineSegment),
    Point(PointPath),
    Bezier(BezierCurve),
    EllipticalArc(EllipticalArc),
    Spiral(Spiral),
    Offset(OffsetCurve),
    Rect(RectPath),
    Polygonal(PolygonalPath),
    Sequence(SequencePath),
    Split(SplitPath),
}

/// A path decomposed by one step of simplification.
#[derive(Clone, Debug)]
pub enum Simplified {
    /// The path is, or is close enough to, a single line segment.
    Linear(LineSegment),
    /// The path splits into two simpler paths, in order.
    Split(Path, Path),
}

/// The operations every kind of path provides.
trait Trace {
    fn start(&self) -> Point2d;

    fn finish(&self) -> Point2d;

    fn is_closed(&self) -> bool;

    fn is_rectilinear(&self) -> bool;

    fn compute_length(&self, ctx: &Context) -> f64;

    fn compute_bounds(&self) -> Rect;

    fn simplify(&self, this: &Path, ctx: &Context) -> Simplified;

    fn reverse(&self, this: &Path) -> Path;

    fn apply(&self, this: &Path, t: &Transform) -> Result<Path>;
}

/// A path evaluated directly from its own geometry, in the intrinsic domain.
trait Simple: Trace {
    fn point_at(&self, t: f64, ctx: &Context) -> Point2d;

    fn tangent_at(&self, t: f64, ctx: &Context) -> Vector2d;

    /// Splits the path at `t`. Splitting at an end returns the path itself
    /// alongside a point path.
    fn split_at(&self, this: &Path, t: f64, ctx: &Context) -> (Path, Path);

    /// The part of the path between two ordered parameters.
    fn segment(&self, this: &Path, t0: f64, t1: f64, ctx: &Context) -> Path;

    /// Conversion between the intrinsic and length domains.
    fn reparameterization<'a>(&'a self, this: &'a Path, ctx: &'a Context)
        -> Reparameterization<'a>;

    fn corners(&self, _ctx: &Context) -> Vec<Corner> {
        Vec::new()
    }

    /// The intrinsic parameter of the nearest point on the path.
    fn nearest_intrinsic(&self, this: &Path, pt: Point2d, ctx: &Context) -> f64 {
        let s = crate::Locator::new(pt).locate(this, ctx);
        self.reparameterization(this, ctx).intrinsic_at(s)
    }
}

/// A path composed of an ordered list of contiguous sub-paths.
trait Composite: Trace {
    fn count(&self) -> usize;

    fn subpath(&self, index: usize) -> Path;

    fn index(&self, ctx: &Context) -> &Parameterizations;
}

enum Form<'a> {
    Simple(&'a dyn Simple),
    Composite(&'a dyn Composite),
}

struct Node {
    kind: PathKind,
    length: OnceCell<f64>,
    bounds: OnceCell<Rect>,
}

/// A directed path in the plane.
///
/// Paths are immutable. Length and bounds are computed on first access and
/// cached; the length is fixed by the [Context] in force at that time.
#[derive(Clone)]
pub struct Path(Arc<Node>);

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.kind.fmt(f)
    }
}

impl Path {
    fn new(kind: PathKind) -> Self {
        Self(Arc::new(Node { kind, length: OnceCell::new(), bounds: OnceCell::new() }))
    }

    pub fn kind(&self) -> &PathKind {
        &self.0.kind
    }

    /// True if both handles refer to the same path.
    pub fn ptr_eq(&self, other: &Path) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    fn trace(&self) -> &dyn Trace {
        match &self.0.kind {
            PathKind::Linear(p) => p,
            PathKind::Point(p) => p,
            PathKind::Bezier(p) => p,
            PathKind::EllipticalArc(p) => p,
            PathKind::Spiral(p) => p,
            PathKind::Offset(p) => p,
            PathKind::Rect(p) => p,
            PathKind::Polygonal(p) => p,
            PathKind::Sequence(p) => p,
            PathKind::Split(p) => p,
        }
    }

    fn form(&self) -> Form<'_> {
        match &self.0.kind {
            PathKind::Linear(p) => Form::Simple(p),
            PathKind::Point(p) => Form::Simple(p),
            PathKind::Bezier(p) => Form::Simple(p),
            PathKind::EllipticalArc(p) => Form::Simple(p),
            PathKind::Spiral(p) => Form::Simple(p),
            PathKind::Offset(p) => Form::Simple(p),
            PathKind::Rect(p) => Form::Simple(p),
            PathKind::Polygonal(p) => Form::Composite(p),
            PathKind::Sequence(p) => Form::Composite(p),
            PathKind::Split(p) => Form::Composite(p),
        }
    }

    fn curve(&self) -> Option<&dyn Curve> {
        match &self.0.kind {
            PathKind::Bezier(c) => Some(c),
            PathKind::EllipticalArc(c) => Some(c),
            PathKind::Spiral(c) => Some(c),
            PathKind::Offset(c) => Some(c),
            _ => None,
        }
    }

    pub fn start(&self) -> Point2d {
        self.trace().start()
    }

    pub fn finish(&self) -> Point2d {
        self.trace().finish()
    }

    pub fn is_closed(&self) -> bool {
        self.trace().is_closed()
    }

    /// True if every part of the path runs parallel to an axis.
    pub fn is_rectilinear(&self) -> bool {
        self.trace().is_rectilinear()
    }

    /// True if the path is a single curve.
    pub fn is_curve(&self) -> bool {
        self.curve().is_some()
    }

    pub fn length(&self, ctx: &Context) -> f64 {
        *self.0.length.get_or_init(|| self.trace().compute_length(ctx))
    }

    pub fn bounds(&self) -> Rect {
        *self.0.bounds.get_or_init(|| self.trace().compute_bounds())
    }

    /// True if the path has no corners.
    pub fn is_smooth(&self, ctx: &Context) -> bool {
        self.by_intrinsic(ctx).corners().is_empty()
    }

    pub fn by_intrinsic<'a>(&'a self, ctx: &'a Context) -> Parameterization<'a> {
        Parameterization::intrinsic(self, ctx)
    }

    pub fn by_length<'a>(&'a self, ctx: &'a Context) -> Parameterization<'a> {
        Parameterization::length(self, ctx)
    }

    /// The segment joining the ends of the path. For a path that returns to
    /// its start this is a zero length segment facing along the path.
    pub fn chord(&self, ctx: &Context) -> LineSegment {
        let (start, finish) = (self.start(), self.finish());
        match LineSegment::from_points(start, finish) {
            Ok(segment) => segment,
            Err(_) => LineSegment::at_point(start, self.by_intrinsic(ctx).tangent_at(0.0)),
        }
    }

    /// Decomposes the path by one step.
    pub fn simplify(&self, ctx: &Context) -> Simplified {
        self.trace().simplify(self, ctx)
    }

    /// The same trace in the opposite direction.
    pub fn reverse(&self) -> Path {
        self.trace().reverse(self)
    }

    pub fn apply(&self, t: &Transform) -> Result<Path> {
        if t.is_identity() {
            return Ok(self.clone());
        }
        self.trace().apply(self, t)
    }

    /// Partitions the path into its maximal smooth runs, in order.
    ///
    /// For a closed path whose seam is smooth, the run before the seam and
    /// the run after it are joined into one.
    pub fn split_at_corners(&self, ctx: &Context) -> Vec<Path> {
        let z = self.by_intrinsic(ctx);
        let corners = z.corners();
        if corners.is_empty() {
            return vec![self.clone()];
        }
        let seam = corners.iter().any(|c| c.parameter() <= 0.0 || c.parameter() >= 1.0);
        let mut runs = Vec::new();
        let mut previous = 0.0;
        let interior = corners.iter().map(Corner::parameter).filter(|&p| p > 0.0 && p < 1.0);
        for p in interior.chain(std::iter::once(1.0)) {
            if p > previous {
                runs.push(z.segment_unchecked(previous, p));
                previous = p;
            }
        }
        if self.is_closed() && !seam && runs.len() > 1 {
            let first = runs.remove(0);
            if let Some(last) = runs.pop() {
                runs.push(SequencePath::from_parts(vec![last, first], false).into());
            }
        }
        runs
    }

    /// Feeds a polyline approximating the path to a consumer: the start, then
    /// each vertex after it.
    pub fn linearize<C: PointConsumer + ?Sized>(&self, ctx: &Context, consumer: &mut C) {
        consumer.add_point(self.start());
        let limit = ctx.tolerances().split_recursion_limit();
        let mut stack = vec![(self.clone(), 0)];
        while let Some((path, depth)) = stack.pop() {
            match path.kind() {
                PathKind::Linear(segment) => {
                    if !segment.is_zero_length() {
                        consumer.add_point(segment.finish());
                    }
                }
                PathKind::Point(_) => {}
                PathKind::Polygonal(polygon) => {
                    for &pt in &polygon.points()[1..] {
                        consumer.add_point(pt);
                    }
                }
                PathKind::Rect(rect) => {
                    let vertices = rect.vertices();
                    let mut last = vertices[0];
                    for &pt in vertices[1..].iter().chain(&vertices[..1]) {
                        if pt != last {
                            consumer.add_point(pt);
                            last = pt;
                        }
                    }
                }
                PathKind::Sequence(sequence) => {
                    stack.extend(sequence.paths().iter().rev().map(|p| (p.clone(), depth)));
                }
                PathKind::Split(split) => {
                    stack.push((split.second().clone(), depth));
                    stack.push((split.first().clone(), depth));
                }
                PathKind::Bezier(_)
                | PathKind::EllipticalArc(_)
                | PathKind::Spiral(_)
                | PathKind::Offset(_) => {
                    let Some(curve) = path.curve() else { continue };
                    if depth >= limit {
                        debug!("curve subdivision stopped at depth {}", depth);
                        consumer.add_point(path.finish());
                    } else if curve.is_linear(ctx) {
                        consumer.add_point(path.finish());
                    } else {
                        let (first, second) = curve.split(curve.default_split_param(), ctx);
                        stack.push((ctx.simplify(&second), depth + 1));
                        stack.push((ctx.simplify(&first), depth + 1));
                    }
                }
            }
        }
    }

    /// The vertices of the polyline approximating the path.
    pub fn linearized(&self, ctx: &Context) -> Vec<Point2d> {
        let mut points = Vec::new();
        self.linearize(ctx, &mut points);
        points
    }
}

macro_rules! path_from {
    ($($kind:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Path {
                fn from(value: $ty) -> Self {
                    Path::new(PathKind::$kind(value))
                }
            }
        )*
    };
}

path_from!(
    Linear(LineSegment),
    Point(PointPath),
    Bezier(BezierCurve),
    EllipticalArc(EllipticalArc),
    Spiral(Spiral),
    Offset(OffsetCurve),
    Rect(RectPath),
    Polygonal(PolygonalPath),
    Sequence(SequencePath),
    Split(SplitPath),
);

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::{Ellipse, UNIT_X};
    use assert_approx_eq::assert_approx_eq;
    use std::f64::consts::PI;

    fn quarter_circle() -> Path {
        let circle = Ellipse::from_radius(Point2d::new(0.0, 0.0), 10.0).unwrap();
        circle.arc(0.0, 0.5 * PI).unwrap().into()
    }

    #[test]
    fn lengths_are_cached() {
        let ctx = Context::default();
        let path = quarter_circle();
        let length = path.length(&ctx);
        assert_approx_eq!(length, 5.0 * PI, 1e-6);
        let coarse = Context::new(
            crate::Tolerances::default().builder().quadrature_steps(2).build().unwrap(),
            crate::Policy::ThrowException,
        );
        assert_eq!(path.length(&coarse), length);
    }

    #[test]
    fn linearized_curves_stay_on_the_curve() {
        let ctx = Context::default();
        let points = quarter_circle().linearized(&ctx);
        assert!(points.len() > 2);
        assert_eq!(points[0], Point2d::new(10.0, 0.0));
        for pt in &points {
            assert_approx_eq!((pt.x * pt.x + pt.y * pt.y).sqrt(), 10.0, 1e-9);
        }
        for pair in points.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }

    #[test]
    fn recursion_limit_bounds_linearization() {
        let tolerances = crate::Tolerances::default()
            .builder()
            .split_recursion_limit(1)
            .shortest_non_linear_curve(1e-9)
            .least_non_linear_deviation(1e-9)
            .build()
            .unwrap();
        let ctx = Context::new(tolerances, crate::Policy::ThrowException);
        let points = quarter_circle().linearized(&ctx);
        assert_eq!(points.len(), 3);
    }

    #[test]
    fn chord_of_a_closed_path_follows_the_tangent() {
        let ctx = Context::default();
        let circle = Ellipse::from_radius(Point2d::new(0.0, 0.0), 1.0).unwrap();
        let path: Path = circle.complete_arc().into();
        let chord = path.chord(&ctx);
        assert!(chord.is_zero_length());
        assert_approx_eq!(chord.tangent().y, 1.0);

        let line: Path = LineSegment::from_points(Point2d::new(0.0, 0.0), Point2d::new(2.0, 0.0))
            .unwrap()
            .into();
        assert_eq!(line.chord(&ctx).tangent(), UNIT_X);
    }

    #[test]
    fn smooth_runs_of_a_rectangle() {
        let ctx = Context::default();
        let rect: Path = RectPath::new(Rect::new(0.0, 0.0, 4.0, 2.0).unwrap(), true).into();
        let runs = rect.split_at_corners(&ctx);
        assert_eq!(runs.len(), 4);
        assert_eq!(runs[0].start(), Point2d::new(0.0, 0.0));
        assert_eq!(runs[1].start(), Point2d::new(4.0, 0.0));
        assert_eq!(runs[3].finish(), Point2d::new(0.0, 0.0));
        for run in &runs {
            assert!(run.is_smooth(&ctx));
        }
    }

    #[test]
    fn smooth_seams_are_joined() {
        let ctx = Context::default();
        // a teardrop: a corner at the tip, smooth where the loop closes
        let polygon = PolygonalPath::builder()
            .add_points([
                Point2d::new(0.0, 0.0),
                Point2d::new(5.0, 0.0),
                Point2d::new(5.0, 5.0),
                Point2d::new(-5.0, 0.0),
                Point2d::new(0.0, 0.0),
            ])
            .build()
            .unwrap();
        let path: Path = polygon.into();
        let runs = path.split_at_corners(&ctx);
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].start(), Point2d::new(5.0, 0.0));
        assert_eq!(runs[2].start(), Point2d::new(-5.0, 0.0));
        assert_eq!(runs[2].finish(), Point2d::new(5.0, 0.0));
        assert_eq!(runs[2].length(&ctx), 10.0);
    }
}
