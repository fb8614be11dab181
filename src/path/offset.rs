use super::curve::Curve;
use super::Path;
use crate::math::{midpoint, rot90, Norm, Point2d, Rect, Transform, Vector2d};
use crate::util::Interval;
use crate::{Context, GeomError, Result};
use cgmath::prelude::*;
use std::{fmt, sync::Arc};

/// A signed distance that varies along a path, as a function of the path's
/// intrinsic parameter.
///
/// Positive values lie to the left of the path (anticlockwise from its
/// tangent).
#[derive(Clone)]
pub struct Displacement {
    f: Arc<dyn Fn(f64) -> f64 + Send + Sync>,
    /// The part of the function's domain which `[0, 1]` maps onto.
    domain: Interval<f64>,
    scale: f64,
    range: Interval<f64>,
}

impl Displacement {
    /// A displacement from a function whose values over `[0, 1]` lie within `range`.
    pub fn new(range: Interval<f64>, f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Result<Self> {
        if !range.min.is_finite() || !range.max.is_finite() {
            return Err(GeomError::InvalidArgument("non-finite displacement range"));
        }
        if range.min > range.max {
            return Err(GeomError::InvalidArgument("displacement range is reversed"));
        }
        Ok(Self { f: Arc::new(f), domain: Interval::new(0.0, 1.0), scale: 1.0, range })
    }

    pub fn constant(d: f64) -> Self {
        Self { f: Arc::new(move |_| d), domain: Interval::new(0.0, 1.0), scale: 1.0, range: Interval::new(d, d) }
    }

    /// A displacement varying linearly from `from` to `to`.
    pub fn linear(from: f64, to: f64) -> Self {
        Self {
            f: Arc::new(move |t| from + (to - from) * t),
            domain: Interval::new(0.0, 1.0),
            scale: 1.0,
            range: Interval::new(from.min(to), from.max(to)),
        }
    }

    pub fn at(&self, t: f64) -> f64 {
        if self.is_constant() {
            return self.range.min;
        }
        self.scale * (self.f)(self.domain.lerp(t.clamp(0.0, 1.0)))
    }

    /// Bounds on the values of the displacement.
    pub fn range(&self) -> Interval<f64> {
        self.range
    }

    pub fn is_constant(&self) -> bool {
        self.range.is_zero_size()
    }

    /// The largest distance from the path.
    pub fn max_magnitude(&self) -> f64 {
        self.range.min.abs().max(self.range.max.abs())
    }

    /// The displacement over `[t0, t1]`, stretched over `[0, 1]`.
    pub fn subinterval(&self, t0: f64, t1: f64) -> Self {
        Self { domain: self.domain.subinterval(Interval::new(t0, t1)), ..self.clone() }
    }

    /// The displacement run backwards.
    pub fn reversed(&self) -> Self {
        Self { domain: self.domain.reversed(), ..self.clone() }
    }

    /// Every value multiplied by a factor.
    pub fn scaled(&self, factor: f64) -> Self {
        Self { scale: self.scale * factor, range: self.range * factor, ..self.clone() }
    }
}

impl fmt::Debug for Displacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Displacement")
            .field("domain", &self.domain)
            .field("scale", &self.scale)
            .field("range", &self.range)
            .finish()
    }
}

/// The curve traced by displacing each point of a smooth path along its
/// normal.
///
/// The intrinsic parameter of the curve is the proportion of the base path's
/// length.
#[derive(Clone, Debug)]
pub struct OffsetCurve {
    base: Path,
    displacement: Displacement,
    start: Point2d,
    finish: Point2d,
}

impl OffsetCurve {
    pub fn new(base: Path, displacement: Displacement, ctx: &Context) -> Result<Self> {
        if !base.is_smooth(ctx) {
            return Err(GeomError::NotSmooth);
        }
        Ok(Self::from_smooth(base, displacement, ctx))
    }

    fn from_smooth(base: Path, displacement: Displacement, ctx: &Context) -> Self {
        let z = base.by_intrinsic(ctx);
        let (start, finish) = (z.point_tangent_at(0.0), z.point_tangent_at(1.0));
        let start = start.point() + rot90(start.tangent()) * displacement.at(0.0);
        let finish = finish.point() + rot90(finish.tangent()) * displacement.at(1.0);
        Self { base, displacement, start, finish }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn displacement(&self) -> &Displacement {
        &self.displacement
    }
}

impl Curve for OffsetCurve {
    fn start(&self) -> Point2d {
        self.start
    }

    fn finish(&self) -> Point2d {
        self.finish
    }

    fn point_at(&self, t: f64, ctx: &Context) -> Point2d {
        if t <= 0.0 {
            return self.start;
        }
        if t >= 1.0 {
            return self.finish;
        }
        let z = self.base.by_length(ctx);
        let pt = z.point_tangent_at(t * z.maximum());
        pt.point() + rot90(pt.tangent()) * self.displacement.at(t)
    }

    fn tangent_at(&self, t: f64, ctx: &Context) -> Vector2d {
        let z = self.base.by_length(ctx);
        let base = z.tangent_at(t * z.maximum());
        if self.displacement.is_constant() {
            return base;
        }
        let derivative = self.derivative_at(t, ctx);
        if derivative.is_zero() {
            base
        } else {
            derivative.normalize()
        }
    }

    fn split(&self, t: f64, ctx: &Context) -> (Path, Path) {
        let z = self.base.by_length(ctx);
        let (first, second) = z.split_at(t * z.maximum());
        (
            Self::from_smooth(first, self.displacement.subinterval(0.0, t), ctx).into(),
            Self::from_smooth(second, self.displacement.subinterval(t, 1.0), ctx).into(),
        )
    }

    fn subcurve(&self, t0: f64, t1: f64, ctx: &Context) -> Path {
        let z = self.base.by_length(ctx);
        let base = z.segment_unchecked(t0 * z.maximum(), t1 * z.maximum());
        Self::from_smooth(base, self.displacement.subinterval(t0, t1), ctx).into()
    }

    fn is_linear(&self, ctx: &Context) -> bool {
        let chord = self.finish - self.start;
        if chord.is_zero() {
            // a closed offset must still be split; only a point is linear
            return self.base.length(ctx) == 0.0;
        }
        let z = self.base.by_length(ctx);
        let halfway = z.point_tangent_at(0.5 * z.maximum());
        let pt = halfway.point() + rot90(halfway.tangent()) * self.displacement.at(0.5);
        if Norm::L2.pow_distance_between(midpoint(self.start, self.finish), pt) > 1e-5 {
            return false;
        }
        (1.0 - self.tangent_at(0.5, ctx).dot(chord.normalize())).abs() <= 1e-3
    }

    fn is_closed(&self) -> bool {
        self.base.is_closed() && self.displacement.at(0.0) == self.displacement.at(1.0)
    }

    fn reversed(&self) -> Path {
        // reversing the base flips its normal
        Self {
            base: self.base.reverse(),
            displacement: self.displacement.reversed().scaled(-1.0),
            start: self.finish,
            finish: self.start,
        }
        .into()
    }

    fn transformed(&self, t: &Transform) -> Result<Path> {
        if !t.is_circle_preserving() {
            return Err(GeomError::Unsupported("offset curves transform under similarities only"));
        }
        let factor = if t.is_chiral_preserving() { t.scale_factor() } else { -t.scale_factor() };
        Ok(Self {
            base: self.base.apply(t)?,
            displacement: self.displacement.scaled(factor),
            start: t.transform_point(self.start),
            finish: t.transform_point(self.finish),
        }
        .into())
    }

    fn bounds(&self) -> Rect {
        self.base.bounds().outset(self.displacement.max_magnitude())
    }
}
