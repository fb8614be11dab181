use crate::math::{Point2d, Vector2d};
use cgmath::prelude::*;

/// A point on a path at which the tangent changes direction abruptly.
///
/// The parameter is in the domain of the parameterization that reported
/// the corner.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Corner {
    parameter: f64,
    point: Point2d,
    start_tangent: Vector2d,
    finish_tangent: Vector2d,
}

impl Corner {
    pub(crate) fn new(
        parameter: f64,
        point: Point2d,
        start_tangent: Vector2d,
        finish_tangent: Vector2d,
    ) -> Self {
        Self { parameter, point, start_tangent, finish_tangent }
    }

    pub fn parameter(&self) -> f64 {
        self.parameter
    }

    pub fn point(&self) -> Point2d {
        self.point
    }

    /// The tangent of the path arriving at the corner.
    pub fn start_tangent(&self) -> Vector2d {
        self.start_tangent
    }

    /// The tangent of the path leaving the corner.
    pub fn finish_tangent(&self) -> Vector2d {
        self.finish_tangent
    }

    /// The signed angle turned at the corner, anticlockwise positive.
    pub fn turn(&self) -> f64 {
        self.start_tangent.perp_dot(self.finish_tangent).atan2(self.start_tangent.dot(self.finish_tangent))
    }

    /// The same corner at a parameter of another domain.
    pub fn reparameterize(&self, parameter: f64) -> Corner {
        Self { parameter, ..*self }
    }
}
