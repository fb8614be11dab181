use super::{Path, PointPath, Reparameterization, Simple, Simplified, Trace};
use crate::math::{
    arc_length, BezierCurve, EllipticalArc, LineSegment, ParametricCurve2d, Point2d, Rect, Spiral,
    Transform, Vector2d, UNIT_X,
};
use crate::{Context, Result};
use cgmath::prelude::*;

/// A smooth curve over the intrinsic domain `[0, 1]`.
pub(crate) trait Curve {
    fn start(&self) -> Point2d;

    fn finish(&self) -> Point2d;

    fn point_at(&self, t: f64, ctx: &Context) -> Point2d;

    /// The derivative with respect to the intrinsic parameter, estimated by a
    /// forward difference unless the curve knows better.
    fn derivative_at(&self, t: f64, ctx: &Context) -> Vector2d {
        let h = ctx.tolerances().differential();
        let (t0, t1) = if t + h > 1.0 { (t - h, t) } else { (t, t + h) };
        (self.point_at(t1, ctx) - self.point_at(t0, ctx)) / h
    }

    fn tangent_at(&self, t: f64, ctx: &Context) -> Vector2d {
        let derivative = self.derivative_at(t, ctx);
        if !derivative.is_zero() {
            return derivative.normalize();
        }
        let chord = self.finish() - self.start();
        if chord.is_zero() {
            UNIT_X
        } else {
            chord.normalize()
        }
    }

    /// Splits the curve at a parameter strictly inside its domain.
    fn split(&self, t: f64, ctx: &Context) -> (Path, Path);

    /// The curve between two ordered parameters.
    fn subcurve(&self, t0: f64, t1: f64, ctx: &Context) -> Path;

    /// True if the curve is exactly its chord.
    fn is_linear(&self, ctx: &Context) -> bool;

    fn is_closed(&self) -> bool;

    fn is_rectilinear(&self) -> bool {
        false
    }

    fn default_split_param(&self) -> f64 {
        0.5
    }

    fn reversed(&self) -> Path;

    fn transformed(&self, t: &Transform) -> Result<Path>;

    fn bounds(&self) -> Rect;
}

/// Samples a curve under a context, for the arc length algorithms.
#[derive(Copy, Clone)]
pub(crate) struct Sampled<'a> {
    pub curve: &'a dyn Curve,
    pub ctx: &'a Context,
}

impl ParametricCurve2d for Sampled<'_> {
    fn sample(&self, t: f64) -> Point2d {
        self.curve.point_at(t, self.ctx)
    }

    fn sample_dt(&self, t: f64) -> Vector2d {
        self.curve.derivative_at(t, self.ctx)
    }
}

impl<C: Curve> Trace for C {
    fn start(&self) -> Point2d {
        Curve::start(self)
    }

    fn finish(&self) -> Point2d {
        Curve::finish(self)
    }

    fn is_closed(&self) -> bool {
        Curve::is_closed(self)
    }

    fn is_rectilinear(&self) -> bool {
        Curve::is_rectilinear(self)
    }

    fn compute_length(&self, ctx: &Context) -> f64 {
        let sampled = Sampled { curve: self, ctx };
        arc_length(&sampled, 0.0, 1.0, ctx.tolerances().quadrature_steps())
    }

    fn compute_bounds(&self) -> Rect {
        Curve::bounds(self)
    }

    fn simplify(&self, _this: &Path, ctx: &Context) -> Simplified {
        if Curve::is_linear(self, ctx) {
            let (start, finish) = (Curve::start(self), Curve::finish(self));
            let segment = LineSegment::from_points(start, finish)
                .unwrap_or_else(|_| LineSegment::at_point(start, Curve::tangent_at(self, 0.5, ctx)));
            return Simplified::Linear(segment);
        }
        let (first, second) = self.split(self.default_split_param(), ctx);
        Simplified::Split(ctx.simplify(&first), ctx.simplify(&second))
    }

    fn reverse(&self, _this: &Path) -> Path {
        self.reversed()
    }

    fn apply(&self, _this: &Path, t: &Transform) -> Result<Path> {
        self.transformed(t)
    }
}

impl<C: Curve> Simple for C {
    fn point_at(&self, t: f64, ctx: &Context) -> Point2d {
        Curve::point_at(self, t, ctx)
    }

    fn tangent_at(&self, t: f64, ctx: &Context) -> Vector2d {
        Curve::tangent_at(self, t, ctx)
    }

    fn split_at(&self, this: &Path, t: f64, ctx: &Context) -> (Path, Path) {
        if t <= 0.0 {
            let start = PointPath::at(Curve::start(self), Curve::tangent_at(self, 0.0, ctx));
            (start.into(), this.clone())
        } else if t >= 1.0 {
            let finish = PointPath::at(Curve::finish(self), Curve::tangent_at(self, 1.0, ctx));
            (this.clone(), finish.into())
        } else {
            self.split(t, ctx)
        }
    }

    fn segment(&self, this: &Path, t0: f64, t1: f64, ctx: &Context) -> Path {
        if t0 <= 0.0 && t1 >= 1.0 {
            this.clone()
        } else if t0 >= t1 {
            PointPath::at(Curve::point_at(self, t0, ctx), Curve::tangent_at(self, t0, ctx)).into()
        } else {
            self.subcurve(t0, t1, ctx)
        }
    }

    fn reparameterization<'a>(&'a self, this: &'a Path, ctx: &'a Context) -> Reparameterization<'a> {
        Reparameterization::ArcLength { curve: Sampled { curve: self, ctx }, length: this.length(ctx) }
    }
}

impl Curve for BezierCurve {
    fn start(&self) -> Point2d {
        BezierCurve::start(self)
    }

    fn finish(&self) -> Point2d {
        BezierCurve::finish(self)
    }

    fn point_at(&self, t: f64, _ctx: &Context) -> Point2d {
        self.sample(t)
    }

    fn derivative_at(&self, t: f64, _ctx: &Context) -> Vector2d {
        self.sample_dt(t)
    }

    fn tangent_at(&self, t: f64, _ctx: &Context) -> Vector2d {
        BezierCurve::tangent_at(self, t)
    }

    fn split(&self, t: f64, _ctx: &Context) -> (Path, Path) {
        let (first, second) = self.split_at(t);
        (first.into(), second.into())
    }

    fn subcurve(&self, t0: f64, t1: f64, _ctx: &Context) -> Path {
        self.segment(t0, t1).into()
    }

    fn is_linear(&self, _ctx: &Context) -> bool {
        BezierCurve::is_linear(self)
    }

    fn is_closed(&self) -> bool {
        self.order() > 0 && self.start() == self.finish()
    }

    fn is_rectilinear(&self) -> bool {
        self.order() == 1 && crate::math::is_rectilinear(self.finish() - self.start())
    }

    fn reversed(&self) -> Path {
        BezierCurve::reversed(self).into()
    }

    fn transformed(&self, t: &Transform) -> Result<Path> {
        Ok(BezierCurve::transformed(self, t).into())
    }

    fn bounds(&self) -> Rect {
        self.control_bounds()
    }
}

impl Curve for EllipticalArc {
    fn start(&self) -> Point2d {
        self.sample(0.0)
    }

    fn finish(&self) -> Point2d {
        self.sample(1.0)
    }

    fn point_at(&self, t: f64, _ctx: &Context) -> Point2d {
        self.sample(t)
    }

    fn derivative_at(&self, t: f64, _ctx: &Context) -> Vector2d {
        self.sample_dt(t)
    }

    fn tangent_at(&self, t: f64, _ctx: &Context) -> Vector2d {
        EllipticalArc::tangent_at(self, t)
    }

    fn split(&self, t: f64, _ctx: &Context) -> (Path, Path) {
        let (first, second) = self.split_at(t);
        (first.into(), second.into())
    }

    fn subcurve(&self, t0: f64, t1: f64, _ctx: &Context) -> Path {
        self.segment(t0, t1).into()
    }

    fn is_linear(&self, _ctx: &Context) -> bool {
        EllipticalArc::is_linear(self)
    }

    fn is_closed(&self) -> bool {
        EllipticalArc::is_closed(self)
    }

    fn reversed(&self) -> Path {
        EllipticalArc::reversed(self).into()
    }

    fn transformed(&self, t: &Transform) -> Result<Path> {
        Ok(EllipticalArc::transformed(self, t)?.into())
    }

    fn bounds(&self) -> Rect {
        EllipticalArc::bounds(self)
    }
}

impl Curve for Spiral {
    fn start(&self) -> Point2d {
        self.sample(0.0)
    }

    fn finish(&self) -> Point2d {
        self.sample(1.0)
    }

    fn point_at(&self, t: f64, _ctx: &Context) -> Point2d {
        self.sample(t.clamp(0.0, 1.0))
    }

    fn derivative_at(&self, t: f64, _ctx: &Context) -> Vector2d {
        self.sample_dt(t.clamp(0.0, 1.0))
    }

    fn tangent_at(&self, t: f64, _ctx: &Context) -> Vector2d {
        Spiral::tangent_at(self, t)
    }

    fn split(&self, t: f64, _ctx: &Context) -> (Path, Path) {
        let (first, second) = self.split_at(t);
        (first.into(), second.into())
    }

    fn subcurve(&self, t0: f64, t1: f64, _ctx: &Context) -> Path {
        self.segment(t0, t1).into()
    }

    fn is_linear(&self, _ctx: &Context) -> bool {
        Spiral::is_linear(self)
    }

    fn is_closed(&self) -> bool {
        false
    }

    fn reversed(&self) -> Path {
        Spiral::reversed(self).into()
    }

    fn transformed(&self, t: &Transform) -> Result<Path> {
        Ok(Spiral::transformed(self, t)?.into())
    }

    fn bounds(&self) -> Rect {
        Spiral::bounds(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::Ellipse;
    use assert_approx_eq::assert_approx_eq;
    use std::f64::consts::PI;

    fn cubic() -> Path {
        BezierCurve::new([
            Point2d::new(0.0, 0.0),
            Point2d::new(0.0, 50.0),
            Point2d::new(50.0, 50.0),
            Point2d::new(50.0, 0.0),
        ])
        .unwrap()
        .into()
    }

    #[test]
    fn bezier_ends_are_exact() {
        let ctx = Context::default();
        let path = cubic();
        let z = path.by_intrinsic(&ctx);
        assert_eq!(z.point_at(0.0), Point2d::new(0.0, 0.0));
        assert_eq!(z.point_at(1.0), Point2d::new(50.0, 0.0));
        assert_eq!(path.by_length(&ctx).point_at(path.length(&ctx)), Point2d::new(50.0, 0.0));
    }

    #[test]
    fn splits_at_the_ends_return_the_curve() {
        let ctx = Context::default();
        let path = cubic();
        let (first, second) = path.by_intrinsic(&ctx).split_at(0.0);
        assert!(matches!(first.kind(), crate::PathKind::Point(_)));
        assert!(second.ptr_eq(&path));
        let (first, _) = path.by_intrinsic(&ctx).split_at(1.0);
        assert!(first.ptr_eq(&path));
    }

    #[test]
    fn simplified_halves_meet() {
        let ctx = Context::default();
        match cubic().simplify(&ctx) {
            Simplified::Split(a, b) => {
                assert_eq!(a.finish(), b.start());
                assert_eq!(a.start(), Point2d::new(0.0, 0.0));
                assert_eq!(b.finish(), Point2d::new(50.0, 0.0));
            }
            Simplified::Linear(_) => panic!("cubic is not linear"),
        }
    }

    #[test]
    fn tiny_arcs_simplify_to_lines() {
        let ctx = Context::default();
        let circle = Ellipse::from_radius(Point2d::new(0.0, 0.0), 1.0).unwrap();
        let arc: Path = circle.arc(0.0, 0.01).unwrap().into();
        assert!(matches!(arc.simplify(&ctx), Simplified::Linear(_)));
    }

    #[test]
    fn spiral_length_matches_integral() {
        let ctx = Context::default();
        let spiral: Path = Spiral::new(Point2d::new(0.0, 0.0), 0.0, PI, 0.0, PI).unwrap().into();
        // r = theta over [0, pi]
        let exact = 0.5 * (PI * (1.0 + PI * PI).sqrt() + (PI + (1.0 + PI * PI).sqrt()).ln());
        assert_approx_eq!(spiral.length(&ctx), exact, 1e-3);
    }
}
