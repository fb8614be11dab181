use super::{Path, Reparameterization, Simple, Simplified, Trace};
use crate::math::{is_finite, LineSegment, Point2d, Rect, Transform, Vector2d};
use crate::{Context, GeomError, Result};
use cgmath::prelude::*;

/// A path of zero length: a single point with a direction.
///
/// Point paths stand in for a position on another path, so they keep the
/// tangent of the path they came from.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointPath {
    point: Point2d,
    tangent: Vector2d,
}

impl PointPath {
    pub fn new(point: Point2d, tangent: Vector2d) -> Result<Self> {
        if !is_finite(point) {
            return Err(GeomError::InvalidCoordinate("non-finite point"));
        }
        if tangent.is_zero() {
            return Err(GeomError::ZeroVector("point path tangent"));
        }
        Ok(Self { point, tangent: tangent.normalize() })
    }

    /// A point path with a tangent already known to be a unit vector.
    pub(crate) fn at(point: Point2d, tangent: Vector2d) -> Self {
        Self { point, tangent }
    }

    pub fn point(&self) -> Point2d {
        self.point
    }

    pub fn tangent(&self) -> Vector2d {
        self.tangent
    }
}

impl Trace for PointPath {
    fn start(&self) -> Point2d {
        self.point
    }

    fn finish(&self) -> Point2d {
        self.point
    }

    fn is_closed(&self) -> bool {
        true
    }

    fn is_rectilinear(&self) -> bool {
        true
    }

    fn compute_length(&self, _ctx: &Context) -> f64 {
        0.0
    }

    fn compute_bounds(&self) -> Rect {
        Rect::at_point(self.point)
    }

    fn simplify(&self, _this: &Path, _ctx: &Context) -> Simplified {
        Simplified::Linear(LineSegment::at_point(self.point, self.tangent))
    }

    fn reverse(&self, _this: &Path) -> Path {
        Self { tangent: -self.tangent, ..*self }.into()
    }

    fn apply(&self, _this: &Path, t: &Transform) -> Result<Path> {
        Ok(Self::new(t.transform_point(self.point), t.transform_vector(self.tangent))?.into())
    }
}

impl Simple for PointPath {
    fn point_at(&self, _t: f64, _ctx: &Context) -> Point2d {
        self.point
    }

    fn tangent_at(&self, _t: f64, _ctx: &Context) -> Vector2d {
        self.tangent
    }

    fn split_at(&self, this: &Path, _t: f64, _ctx: &Context) -> (Path, Path) {
        (this.clone(), this.clone())
    }

    fn segment(&self, this: &Path, _t0: f64, _t1: f64, _ctx: &Context) -> Path {
        this.clone()
    }

    fn reparameterization<'a>(&'a self, _this: &'a Path, _ctx: &'a Context) -> Reparameterization<'a> {
        Reparameterization::Proportional(0.0)
    }

    fn nearest_intrinsic(&self, _this: &Path, _pt: Point2d, _ctx: &Context) -> f64 {
        0.0
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::UNIT_Y;

    #[test]
    fn answers_every_query() {
        let ctx = Context::default();
        let path: Path = PointPath::new(Point2d::new(2.0, 3.0), Vector2d::new(0.0, 4.0)).unwrap().into();
        assert_eq!(path.length(&ctx), 0.0);
        assert!(path.is_closed());
        assert!(path.is_smooth(&ctx));
        let z = path.by_length(&ctx);
        assert_eq!(z.point_at(5.0), Point2d::new(2.0, 3.0));
        assert_eq!(z.tangent_at(5.0), UNIT_Y);
        assert_eq!(z.parameter_nearest(Point2d::new(9.0, 9.0)), 0.0);
        assert_eq!(path.linearized(&ctx), vec![Point2d::new(2.0, 3.0)]);
        let (a, b) = z.split_at(0.0);
        assert!(a.ptr_eq(&path) && b.ptr_eq(&path));
        match path.simplify(&ctx) {
            Simplified::Linear(segment) => {
                assert!(segment.is_zero_length());
                assert_eq!(segment.tangent(), UNIT_Y);
            }
            Simplified::Split(..) => panic!("points do not split"),
        }
    }

    #[test]
    fn zero_tangents_are_rejected() {
        assert_eq!(
            PointPath::new(Point2d::new(0.0, 0.0), Vector2d::new(0.0, 0.0)),
            Err(GeomError::ZeroVector("point path tangent"))
        );
    }
}
