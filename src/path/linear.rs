use super::{Path, PointPath, Reparameterization, Simple, Simplified, Trace};
use crate::math::{LineSegment, Point2d, Rect, Transform, Vector2d};
use crate::{Context, Result};

impl Trace for LineSegment {
    fn start(&self) -> Point2d {
        LineSegment::start(self)
    }

    fn finish(&self) -> Point2d {
        LineSegment::finish(self)
    }

    fn is_closed(&self) -> bool {
        self.is_zero_length()
    }

    fn is_rectilinear(&self) -> bool {
        LineSegment::is_rectilinear(self)
    }

    fn compute_length(&self, _ctx: &Context) -> f64 {
        self.length()
    }

    fn compute_bounds(&self) -> Rect {
        self.bounds()
    }

    fn simplify(&self, _this: &Path, _ctx: &Context) -> Simplified {
        Simplified::Linear(*self)
    }

    fn reverse(&self, _this: &Path) -> Path {
        LineSegment::reverse(self).into()
    }

    fn apply(&self, _this: &Path, t: &Transform) -> Result<Path> {
        Ok(self.transformed(t).into())
    }
}

impl Simple for LineSegment {
    fn point_at(&self, t: f64, _ctx: &Context) -> Point2d {
        self.interpolate(t)
    }

    fn tangent_at(&self, _t: f64, _ctx: &Context) -> Vector2d {
        self.tangent()
    }

    fn split_at(&self, this: &Path, t: f64, _ctx: &Context) -> (Path, Path) {
        if t <= 0.0 {
            (PointPath::at(self.start(), self.tangent()).into(), this.clone())
        } else if t >= 1.0 {
            (this.clone(), PointPath::at(self.finish(), self.tangent()).into())
        } else {
            let pt = self.interpolate(t);
            (
                self.subsegment(self.start(), pt).into(),
                self.subsegment(pt, self.finish()).into(),
            )
        }
    }

    fn segment(&self, this: &Path, t0: f64, t1: f64, _ctx: &Context) -> Path {
        if t0 <= 0.0 && t1 >= 1.0 {
            this.clone()
        } else {
            self.subsegment(self.interpolate(t0), self.interpolate(t1)).into()
        }
    }

    fn reparameterization<'a>(&'a self, _this: &'a Path, _ctx: &'a Context) -> Reparameterization<'a> {
        Reparameterization::Proportional(self.length())
    }

    fn nearest_intrinsic(&self, _this: &Path, pt: Point2d, _ctx: &Context) -> f64 {
        self.nearest_param(pt)
    }
}
