use super::{from_angle, is_finite, rot90, ParametricCurve2d, Point2d, Rect, Transform, Vector2d};
use crate::{GeomError, Result};
use cgmath::prelude::*;

const BOUND_SAMPLES: usize = 32;

/// An Archimedean spiral segment: the radius about the centre varies
/// linearly as the angle sweeps from start to finish.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Spiral {
    center: Point2d,
    start_angle: f64,
    finish_angle: f64,
    start_radius: f64,
    finish_radius: f64,
}

impl Spiral {
    pub fn new(
        center: Point2d,
        start_angle: f64,
        finish_angle: f64,
        start_radius: f64,
        finish_radius: f64,
    ) -> Result<Self> {
        if !is_finite(center) {
            return Err(GeomError::InvalidCoordinate("non-finite spiral center"));
        }
        if ![start_angle, finish_angle, start_radius, finish_radius].iter().all(|v| v.is_finite()) {
            return Err(GeomError::InvalidArgument("non-finite spiral parameter"));
        }
        Ok(Self { center, start_angle, finish_angle, start_radius, finish_radius })
    }

    pub fn center(&self) -> Point2d {
        self.center
    }

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    pub fn finish_angle(&self) -> f64 {
        self.finish_angle
    }

    pub fn start_radius(&self) -> f64 {
        self.start_radius
    }

    pub fn finish_radius(&self) -> f64 {
        self.finish_radius
    }

    fn angle(&self, t: f64) -> f64 {
        self.start_angle + (self.finish_angle - self.start_angle) * t
    }

    fn radius(&self, t: f64) -> f64 {
        if t <= 0.0 {
            self.start_radius
        } else if t >= 1.0 {
            self.finish_radius
        } else {
            self.start_radius * (1.0 - t) + self.finish_radius * t
        }
    }

    /// A spiral with no sweep is a radial line.
    pub fn is_linear(&self) -> bool {
        self.start_angle == self.finish_angle
    }

    pub fn tangent_at(&self, t: f64) -> Vector2d {
        let dt = self.sample_dt(t.clamp(0.0, 1.0));
        if !dt.is_zero() {
            return dt.normalize();
        }
        let radial = from_angle(self.angle(t.clamp(0.0, 1.0)));
        if self.finish_radius < self.start_radius {
            -radial
        } else {
            radial
        }
    }

    pub fn split_at(&self, t: f64) -> (Spiral, Spiral) {
        let t = t.clamp(0.0, 1.0);
        let (angle, radius) = (self.angle(t), self.radius(t));
        (
            Self { finish_angle: angle, finish_radius: radius, ..*self },
            Self { start_angle: angle, start_radius: radius, ..*self },
        )
    }

    pub fn segment(&self, t0: f64, t1: f64) -> Spiral {
        let (t0, t1) = (t0.clamp(0.0, 1.0), t1.clamp(0.0, 1.0));
        Self {
            start_angle: self.angle(t0),
            finish_angle: self.angle(t1),
            start_radius: self.radius(t0),
            finish_radius: self.radius(t1),
            ..*self
        }
    }

    pub fn reversed(&self) -> Spiral {
        Self {
            start_angle: self.finish_angle,
            finish_angle: self.start_angle,
            start_radius: self.finish_radius,
            finish_radius: self.start_radius,
            ..*self
        }
    }

    /// The image of the spiral under a similarity.
    ///
    /// Other transforms do not map spirals to spirals and are not supported.
    pub fn transformed(&self, t: &Transform) -> Result<Spiral> {
        if t.is_identity() {
            return Ok(*self);
        }
        if !t.is_circle_preserving() {
            return Err(GeomError::Unsupported("spiral under a non-similarity transform"));
        }
        let scale = t.scale_factor();
        Ok(Self {
            center: t.transform_point(self.center),
            start_angle: t.transform_angle(self.start_angle),
            finish_angle: t.transform_angle(self.finish_angle),
            start_radius: self.start_radius * scale,
            finish_radius: self.finish_radius * scale,
        })
    }

    /// Bounds of the spiral, from samples outset by the greatest deviation
    /// of a circular arc from its chord over one sampling step.
    pub fn bounds(&self) -> Rect {
        let step = (self.finish_angle - self.start_angle).abs() / BOUND_SAMPLES as f64;
        let max_radius = self.start_radius.abs().max(self.finish_radius.abs());
        let sagitta = max_radius * (1.0 - (0.5 * step.min(std::f64::consts::PI)).cos());
        (1..=BOUND_SAMPLES)
            .map(|i| self.sample(i as f64 / BOUND_SAMPLES as f64))
            .fold(Rect::at_point(self.sample(0.0)), |r, p| r.union(&Rect::at_point(p)))
            .outset(sagitta)
    }
}

impl ParametricCurve2d for Spiral {
    fn sample(&self, t: f64) -> Point2d {
        self.center + from_angle(self.angle(t)) * self.radius(t)
    }

    fn sample_dt(&self, t: f64) -> Vector2d {
        let radial = from_angle(self.angle(t));
        let dr = self.finish_radius - self.start_radius;
        let da = self.finish_angle - self.start_angle;
        radial * dr + rot90(radial) * (self.radius(t) * da)
    }
}
