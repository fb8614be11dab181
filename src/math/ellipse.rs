use std::f64::consts::{PI, TAU};

use super::{from_angle, is_finite, ParametricCurve2d, Point2d, Rect, Transform, Vector2d};
use crate::{GeomError, Result};
use cgmath::prelude::*;

/// True if some angle equivalent to `angle` lies in `[lo, hi]`.
fn sweep_contains(lo: f64, hi: f64, angle: f64) -> bool {
    let k = ((lo - angle) / TAU).ceil();
    angle + k * TAU <= hi
}

/// An ellipse, represented as the image of the unit circle under a transform.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ellipse {
    transform: Transform,
}

impl Ellipse {
    pub fn from_transform(transform: Transform) -> Self {
        Self { transform }
    }

    /// A circle.
    pub fn from_radius(center: Point2d, radius: f64) -> Result<Self> {
        Self::from_radii(center, radius, radius, 0.0)
    }

    /// An ellipse with the given radii, rotated anticlockwise by `rotation` radians.
    pub fn from_radii(center: Point2d, rx: f64, ry: f64, rotation: f64) -> Result<Self> {
        if rx == 0.0 || ry == 0.0 {
            return Err(GeomError::InvalidArgument("zero ellipse radius"));
        }
        if !is_finite(center) {
            return Err(GeomError::InvalidCoordinate("non-finite ellipse center"));
        }
        let mut transform = Transform::scale_xy(rx, ry)?;
        if rotation != 0.0 {
            transform = transform.then(&Transform::rotation(rotation)?)?;
        }
        if center != Point2d::origin() {
            transform = transform.then(&Transform::translation(center.to_vec())?)?;
        }
        Ok(Self { transform })
    }

    /// The axis aligned ellipse inscribed in a rectangle.
    pub fn from_rect(rect: &Rect) -> Result<Self> {
        Self::from_radii(rect.center(), 0.5 * rect.width(), 0.5 * rect.height(), 0.0)
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn center(&self) -> Point2d {
        self.transform.transform_point(Point2d::origin())
    }

    pub fn is_circular(&self) -> bool {
        self.transform.is_circle_preserving()
    }

    /// The point on the ellipse at an angle of the underlying unit circle.
    pub fn point_at(&self, angle: f64) -> Point2d {
        self.transform.transform_point(Point2d::from_vec(from_angle(angle)))
    }

    /// The unit tangent at an angle, in the direction of increasing angle.
    ///
    /// This is the image of the circle's tangent under the transform, which
    /// differs from a circular tangent when the ellipse is not a circle.
    pub fn tangent_at(&self, angle: f64) -> Vector2d {
        self.transform.transform_vector(from_angle(angle + 0.5 * PI)).normalize()
    }

    /// The exact bounds of the whole ellipse.
    pub fn bounds(&self) -> Rect {
        let [m00, m10, m01, m11, ..] = self.transform.as_array();
        let (hw, hh) = (m00.hypot(m01), m10.hypot(m11));
        let c = self.center();
        Rect::at_points(Point2d::new(c.x - hw, c.y - hh), Point2d::new(c.x + hw, c.y + hh))
    }

    /// An arc between two angles (in radians) of the underlying unit circle.
    pub fn arc(&self, start_angle: f64, finish_angle: f64) -> Result<EllipticalArc> {
        EllipticalArc::new(*self, start_angle, finish_angle)
    }

    /// The arc running once anticlockwise around the ellipse from angle zero.
    pub fn complete_arc(&self) -> EllipticalArc {
        EllipticalArc { ellipse: *self, start_angle: 0.0, finish_angle: TAU }
    }

    pub fn transformed(&self, t: &Transform) -> Result<Self> {
        Ok(Self { transform: self.transform.then(t)? })
    }
}

/// A section of an ellipse, swept between two angles of the underlying unit
/// circle. The sweep may run in either direction and may exceed a full turn.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EllipticalArc {
    ellipse: Ellipse,
    start_angle: f64,
    finish_angle: f64,
}

impl EllipticalArc {
    pub fn new(ellipse: Ellipse, start_angle: f64, finish_angle: f64) -> Result<Self> {
        if !start_angle.is_finite() || !finish_angle.is_finite() {
            return Err(GeomError::InvalidArgument("non-finite arc angle"));
        }
        Ok(Self { ellipse, start_angle, finish_angle })
    }

    /// The circular arc that starts at `p1`, passes through `p2` and finishes at `p3`.
    pub fn circular_arc_through_three_points(p1: Point2d, p2: Point2d, p3: Point2d) -> Result<Self> {
        let (x1, y1, x2, y2, x3, y3) = (p1.x, p1.y, p2.x, p2.y, p3.x, p3.y);
        let d = 2.0 * (x1 - x3) * (y3 - y2) + 2.0 * (x2 - x3) * (y1 - y3);
        if d == 0.0 {
            return Err(GeomError::InvalidArgument("collinear arc points"));
        }
        let m1 = x1 * x1 - x3 * x3 + y1 * y1 - y3 * y3;
        let m2 = x3 * x3 - x2 * x2 + y3 * y3 - y2 * y2;
        let center = Point2d::new(
            (m1 * (y3 - y2) + m2 * (y3 - y1)) / d,
            (m1 * (x2 - x3) + m2 * (x1 - x3)) / d,
        );
        let radius = center.distance(p1);
        let angle = |p: Point2d| (p.y - center.y).atan2(p.x - center.x);
        let (a1, a2, a3) = (angle(p1), angle(p2), angle(p3));
        let adjust = if a1 < a3 {
            if a1 <= a2 && a2 <= a3 {
                0.0
            } else {
                -TAU
            }
        } else if a3 <= a2 && a2 <= a1 {
            0.0
        } else {
            TAU
        };
        Self::new(Ellipse::from_radius(center, radius)?, a1, a3 + adjust)
    }

    pub fn ellipse(&self) -> &Ellipse {
        &self.ellipse
    }

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    pub fn finish_angle(&self) -> f64 {
        self.finish_angle
    }

    /// The signed angle swept by the arc.
    pub fn sweep(&self) -> f64 {
        self.finish_angle - self.start_angle
    }

    fn angle_at(&self, t: f64) -> f64 {
        if t <= 0.0 {
            self.start_angle
        } else if t >= 1.0 {
            self.finish_angle
        } else {
            self.start_angle + self.sweep() * t
        }
    }

    /// True if the arc is short enough to be treated as its chord.
    pub fn is_linear(&self) -> bool {
        self.sweep().abs() * self.ellipse.bounds().diagonal_length() < 0.1
    }

    /// True if the sweep is a whole, non-zero, number of turns.
    pub fn is_closed(&self) -> bool {
        let sweep = self.sweep();
        sweep != 0.0 && sweep.rem_euclid(TAU) == 0.0
    }

    pub fn tangent_at(&self, t: f64) -> Vector2d {
        let tangent = self.ellipse.tangent_at(self.angle_at(t));
        if self.sweep() < 0.0 {
            -tangent
        } else {
            tangent
        }
    }

    pub fn split_at(&self, t: f64) -> (EllipticalArc, EllipticalArc) {
        let angle = self.angle_at(t);
        (
            Self { finish_angle: angle, ..*self },
            Self { start_angle: angle, ..*self },
        )
    }

    pub fn segment(&self, t0: f64, t1: f64) -> EllipticalArc {
        Self { start_angle: self.angle_at(t0), finish_angle: self.angle_at(t1), ..*self }
    }

    pub fn reversed(&self) -> EllipticalArc {
        Self { start_angle: self.finish_angle, finish_angle: self.start_angle, ..*self }
    }

    pub fn transformed(&self, t: &Transform) -> Result<EllipticalArc> {
        Ok(Self { ellipse: self.ellipse.transformed(t)?, ..*self })
    }

    /// The exact bounds of the arc.
    ///
    /// Combines the end points with those extremes of the ellipse along each
    /// axis that fall within the sweep.
    pub fn bounds(&self) -> Rect {
        let (lo, hi) = if self.start_angle <= self.finish_angle {
            (self.start_angle, self.finish_angle)
        } else {
            (self.finish_angle, self.start_angle)
        };
        if hi - lo >= TAU {
            return self.ellipse.bounds();
        }
        let [m00, m10, m01, m11, ..] = self.ellipse.transform.as_array();
        let x_extreme = m01.atan2(m00);
        let y_extreme = m11.atan2(m10);
        [x_extreme, x_extreme + PI, y_extreme, y_extreme + PI]
            .into_iter()
            .filter(|&a| sweep_contains(lo, hi, a))
            .map(|a| self.ellipse.point_at(a))
            .fold(
                Rect::at_points(self.ellipse.point_at(lo), self.ellipse.point_at(hi)),
                |r, p| r.union(&Rect::at_point(p)),
            )
    }
}

impl ParametricCurve2d for EllipticalArc {
    fn sample(&self, t: f64) -> Point2d {
        // a closed arc finishes exactly where it starts
        if t >= 1.0 && self.is_closed() {
            return self.ellipse.point_at(self.start_angle);
        }
        self.ellipse.point_at(self.angle_at(t))
    }

    fn sample_dt(&self, t: f64) -> Vector2d {
        let angle = self.angle_at(t);
        self.ellipse.transform.transform_vector(from_angle(angle + 0.5 * PI)) * self.sweep()
    }
}
