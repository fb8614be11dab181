//! Mathematical structs and functions.
//!
//! Everything in here is free of tolerances: the primitives, the affine
//! [Transform] and the analytic curve family. The tolerance driven
//! algorithms live alongside [Path](crate::Path).

use cgmath::{Point2, Vector2};
pub use bezier::BezierCurve;
pub use curve::{arc_length, parameter_at_length, ParametricCurve2d};
pub use ellipse::{Ellipse, EllipticalArc};
pub use line::Line;
pub use norm::Norm;
pub use rect::Rect;
pub use segment::LineSegment;
pub use spiral::Spiral;
pub use transform::Transform;
pub use util::*;

mod bezier;
mod curve;
mod ellipse;
mod line;
mod norm;
mod rect;
mod segment;
mod spiral;
mod transform;
mod util;

/// A 2D point
pub type Point2d = Point2<f64>;

/// A 2D vector
pub type Vector2d = Vector2<f64>;
