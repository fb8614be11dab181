use super::{Point2d, Vector2d};
use cgmath::prelude::*;

/// The unit vector along the positive x-axis.
pub const UNIT_X: Vector2d = Vector2d::new(1.0, 0.0);

/// The unit vector along the positive y-axis.
pub const UNIT_Y: Vector2d = Vector2d::new(0.0, 1.0);

/// Rotates a vector 90 degrees anticlockwise.
pub fn rot90(vec: Vector2d) -> Vector2d {
    Vector2d::new(-vec.y, vec.x)
}

/// Rotates a vector through a whole number of quarter turns.
///
/// Positive turns are anticlockwise. Exact: no trigonometry is involved.
pub fn rotate_right_angles(vec: Vector2d, quarter_turns: i32) -> Vector2d {
    match quarter_turns.rem_euclid(4) {
        0 => vec,
        1 => Vector2d::new(-vec.y, vec.x),
        2 => Vector2d::new(-vec.x, -vec.y),
        _ => Vector2d::new(vec.y, -vec.x),
    }
}

/// Normalizes a vector, leaving the zero vector unchanged.
pub fn normalized(vec: Vector2d) -> Vector2d {
    if vec.is_zero() {
        vec
    } else {
        vec.normalize()
    }
}

/// Returns true if the vector is parallel to one of the axes.
pub fn is_rectilinear(vec: Vector2d) -> bool {
    vec.x == 0.0 || vec.y == 0.0
}

/// The unit vector at the given angle (in radians) from the positive x-axis.
pub fn from_angle(angle: f64) -> Vector2d {
    let (s, c) = angle.sin_cos();
    Vector2d::new(c, s)
}

/// The angle (in radians) of a vector from the positive x-axis.
pub fn angle_of(vec: Vector2d) -> f64 {
    vec.y.atan2(vec.x)
}

/// The point halfway between two points.
pub fn midpoint(a: Point2d, b: Point2d) -> Point2d {
    Point2d::new(0.5 * (a.x + b.x), 0.5 * (a.y + b.y))
}

/// Linearly interpolates between two points.
///
/// Returns the end points exactly when `t` is 0 or 1.
pub fn interpolate(a: Point2d, b: Point2d, t: f64) -> Point2d {
    if t == 0.0 {
        a
    } else if t == 1.0 {
        b
    } else {
        Point2d::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

/// Returns true if both coordinates of the point are finite.
pub fn is_finite(point: Point2d) -> bool {
    point.x.is_finite() && point.y.is_finite()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn right_angle_rotation_is_exact() {
        let v = Vector2d::new(3.0, 4.0);
        assert_eq!(rotate_right_angles(v, 1), rot90(v));
        assert_eq!(rotate_right_angles(v, 2), -v);
        assert_eq!(rotate_right_angles(v, -1), Vector2d::new(4.0, -3.0));
        assert_eq!(rotate_right_angles(v, 4), v);
    }

    #[test]
    fn zero_vector_normalizes_to_zero() {
        assert_eq!(normalized(Vector2d::zero()), Vector2d::zero());
        assert_eq!(normalized(Vector2d::new(0.0, -2.0)), Vector2d::new(0.0, -1.0));
    }
}
