use std::f64::consts::FRAC_PI_2;

use super::{angle_of, from_angle, rotate_right_angles, Point2d, Rect, Vector2d};
use crate::{GeomError, Result};
use cgmath::{prelude::*, Matrix2};

const ORIGIN_PRESERVING: u8 = 0x01; // no translation
const SKEW_FREE: u8 = 0x02; // diagonal linear part
const SCALE_PRESERVING: u8 = 0x04; // |det| == 1
const CHIRAL_PRESERVING: u8 = 0x08; // det > 0
const CIRCLE_PRESERVING: u8 = 0x10; // a similarity
const RECTILINEAR_PRESERVING: u8 = 0x20; // diagonal or anti-diagonal

fn flags_of(linear: &Matrix2<f64>, translation: Vector2d) -> u8 {
    let det = linear.determinant();
    let (m00, m10, m01, m11) = (linear.x.x, linear.x.y, linear.y.x, linear.y.y);
    let mut flags = 0;
    if translation.x == 0.0 && translation.y == 0.0 {
        flags |= ORIGIN_PRESERVING;
    }
    if m10 == 0.0 && m01 == 0.0 {
        flags |= SKEW_FREE | RECTILINEAR_PRESERVING;
    }
    if m00 == 0.0 && m11 == 0.0 {
        flags |= RECTILINEAR_PRESERVING;
    }
    if det.abs() == 1.0 {
        flags |= SCALE_PRESERVING;
    }
    if det > 0.0 {
        flags |= CHIRAL_PRESERVING;
    }
    if (m00 == m11 && m10 == -m01) || (m00 == -m11 && m10 == m01) {
        flags |= CIRCLE_PRESERVING;
    }

    flags
}

/// An invertible affine transformation of the plane.
///
/// A point `p` maps to `M p + t` where `M` is the linear part, with columns
/// `(m00, m10)` and `(m01, m11)`, and `t` is the translation `(m02, m12)`.
/// The algebraic properties that curves and paths use to select specialised
/// code paths are computed once, on construction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform {
    linear: Matrix2<f64>,
    translation: Vector2d,
    flags: u8,
}

impl Transform {
    fn from_parts(linear: Matrix2<f64>, translation: Vector2d) -> Result<Self> {
        let det = linear.determinant();
        if det.is_nan() || translation.x.is_nan() || translation.y.is_nan() {
            return Err(GeomError::InvalidTransform("NaN component"));
        }
        if det.is_infinite() || translation.x.is_infinite() || translation.y.is_infinite() {
            return Err(GeomError::InvalidTransform("overflowing component"));
        }
        if det == 0.0 {
            return Err(GeomError::NonInvertible);
        }

        Ok(Self { linear, translation, flags: flags_of(&linear, translation) })
    }

    /// Creates a transform from its six components.
    pub fn components(m00: f64, m10: f64, m01: f64, m11: f64, m02: f64, m12: f64) -> Result<Self> {
        Self::from_parts(Matrix2::new(m00, m10, m01, m11), Vector2d::new(m02, m12))
    }

    /// The transform that leaves every point where it is.
    pub fn identity() -> Self {
        Self::from_linear(Matrix2::identity())
    }

    fn from_linear(linear: Matrix2<f64>) -> Self {
        let translation = Vector2d::zero();
        Self { linear, translation, flags: flags_of(&linear, translation) }
    }

    pub fn translation(v: Vector2d) -> Result<Self> {
        Self::from_parts(Matrix2::identity(), v)
    }

    /// An anticlockwise rotation through whole quarter turns, exactly.
    pub fn rotate_right_angles(quarter_turns: i32) -> Self {
        let x = rotate_right_angles(Vector2d::unit_x(), quarter_turns);
        let y = rotate_right_angles(Vector2d::unit_y(), quarter_turns);
        Self::from_linear(Matrix2::from_cols(x, y))
    }

    /// An anticlockwise rotation about the origin (in radians).
    ///
    /// Angles that are whole multiples of a right angle produce exact,
    /// rectilinear preserving rotations.
    pub fn rotation(angle: f64) -> Result<Self> {
        let turns = angle / FRAC_PI_2;
        if (turns - turns.round()).abs() < 1e-12 {
            return Ok(Self::rotate_right_angles(turns.round() as i32));
        }
        let (s, c) = angle.sin_cos();
        Self::from_parts(Matrix2::new(c, s, -s, c), Vector2d::zero())
    }

    /// An anticlockwise rotation about an arbitrary point.
    pub fn rotation_about(pt: Point2d, angle: f64) -> Result<Self> {
        let to_origin = Self::translation(-pt.to_vec())?;
        let back = Self::translation(pt.to_vec())?;
        to_origin.then(&Self::rotation(angle)?)?.then(&back)
    }

    /// A uniform scale about the origin.
    pub fn scale(s: f64) -> Result<Self> {
        Self::scale_xy(s, s)
    }

    /// A scale about the origin with independent factors for each axis.
    pub fn scale_xy(sx: f64, sy: f64) -> Result<Self> {
        Self::from_parts(Matrix2::new(sx, 0.0, 0.0, sy), Vector2d::zero())
    }

    /// A scale that leaves `pt` fixed.
    pub fn scale_about(pt: Point2d, sx: f64, sy: f64) -> Result<Self> {
        Self::from_parts(
            Matrix2::new(sx, 0.0, 0.0, sy),
            Vector2d::new((1.0 - sx) * pt.x, (1.0 - sy) * pt.y),
        )
    }

    /// The transform which maps one rectangle onto another, without rotation.
    pub fn translate_and_scale(from: &Rect, to: &Rect) -> Result<Self> {
        if from.is_degenerate() || to.is_degenerate() {
            return Err(GeomError::NonInvertible);
        }
        let sx = to.width() / from.width();
        let sy = to.height() / from.height();
        let (cf, ct) = (from.center(), to.center());
        Self::from_parts(
            Matrix2::new(sx, 0.0, 0.0, sy),
            Vector2d::new(ct.x - cf.x * sx, ct.y - cf.y * sy),
        )
    }

    /// A shear: x gains `sx` times y, and y gains `sy` times x.
    pub fn skew(sx: f64, sy: f64) -> Result<Self> {
        Self::from_parts(Matrix2::new(1.0, sy, sx, 1.0), Vector2d::zero())
    }

    /// The components in the order `m00, m10, m01, m11, m02, m12`.
    pub fn as_array(&self) -> [f64; 6] {
        let m = &self.linear;
        [m.x.x, m.x.y, m.y.x, m.y.y, self.translation.x, self.translation.y]
    }

    pub fn determinant(&self) -> f64 {
        self.linear.determinant()
    }

    /// The factor by which the transform scales lengths, for similarities.
    pub fn scale_factor(&self) -> f64 {
        self.determinant().abs().sqrt()
    }

    pub fn is_identity(&self) -> bool {
        self.linear == Matrix2::identity() && self.is_origin_preserving()
    }

    pub fn is_origin_preserving(&self) -> bool {
        self.flags & ORIGIN_PRESERVING != 0
    }

    /// True if the linear part is diagonal.
    pub fn is_skew_free(&self) -> bool {
        self.flags & SKEW_FREE != 0
    }

    pub fn is_scale_preserving(&self) -> bool {
        self.flags & SCALE_PRESERVING != 0
    }

    /// True if the transform preserves orientation, i.e. it is not a reflection.
    pub fn is_chiral_preserving(&self) -> bool {
        self.flags & CHIRAL_PRESERVING != 0
    }

    /// True if circles map to circles, which is to say the transform is a similarity.
    pub fn is_circle_preserving(&self) -> bool {
        self.flags & CIRCLE_PRESERVING != 0
    }

    /// True if axis aligned rectangles map to axis aligned rectangles.
    pub fn is_rectilinear_preserving(&self) -> bool {
        self.flags & RECTILINEAR_PRESERVING != 0
    }

    /// The inverse transform.
    pub fn inverse(&self) -> Result<Self> {
        let inverse = self.linear.invert().ok_or(GeomError::NonInvertible)?;
        Self::from_parts(inverse, -(inverse * self.translation))
    }

    /// The transform which applies `self` and then `other`.
    pub fn then(&self, other: &Transform) -> Result<Self> {
        if self.is_identity() {
            return Ok(*other);
        }
        if other.is_identity() {
            return Ok(*self);
        }
        Self::from_parts(
            other.linear * self.linear,
            other.linear * self.translation + other.translation,
        )
    }

    pub fn transform_point(&self, pt: Point2d) -> Point2d {
        Point2d::from_vec(self.linear * pt.to_vec() + self.translation)
    }

    /// Transforms a vector, ignoring translation.
    pub fn transform_vector(&self, v: Vector2d) -> Vector2d {
        self.linear * v
    }

    /// Transforms a direction, given as an angle from the x-axis.
    ///
    /// For similarities the result is unwrapped, so that a sweep of angles
    /// maps onto a sweep of the same extent.
    pub fn transform_angle(&self, angle: f64) -> f64 {
        if self.is_circle_preserving() {
            let phi = self.linear.x.y.atan2(self.linear.x.x);
            if self.is_chiral_preserving() {
                angle + phi
            } else {
                phi - angle
            }
        } else {
            angle_of(self.transform_vector(from_angle(angle)))
        }
    }

    /// Transforms a rectangle, which is only possible for rectilinear preserving transforms.
    pub fn transform_rect(&self, rect: &Rect) -> Result<Rect> {
        if !self.is_rectilinear_preserving() {
            return Err(GeomError::NotRectilinearPreserving);
        }
        Ok(Rect::at_points(
            self.transform_point(Point2d::new(rect.min_x, rect.min_y)),
            self.transform_point(Point2d::new(rect.max_x, rect.max_y)),
        ))
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use std::f64::consts::PI;

    fn assert_points_close(a: Point2d, b: Point2d) {
        assert_approx_eq!(a.x, b.x, 1e-9);
        assert_approx_eq!(a.y, b.y, 1e-9);
    }

    #[test]
    fn singular_transforms_are_rejected() {
        assert_eq!(Transform::scale(0.0), Err(GeomError::NonInvertible));
        assert_eq!(Transform::skew(1.0, 1.0), Err(GeomError::NonInvertible));
        assert!(Transform::components(1.0, 0.0, 0.0, 1.0, f64::NAN, 0.0).is_err());
        assert!(Transform::components(f64::INFINITY, 0.0, 0.0, 1.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn inverse_undoes_transform() {
        let t = Transform::components(2.0, 1.0, -0.5, 3.0, 4.0, -7.0).unwrap();
        let inv = t.inverse().unwrap();
        let p = Point2d::new(1.5, -2.5);
        assert_points_close(inv.transform_point(t.transform_point(p)), p);
        assert!(t.then(&inv).unwrap().transform_point(p).distance(p) < 1e-9);
    }

    #[test]
    fn composition_order() {
        let rotate = Transform::rotate_right_angles(1);
        let shift = Transform::translation(Vector2d::new(10.0, 0.0)).unwrap();
        let p = Point2d::new(1.0, 0.0);
        assert_points_close(rotate.then(&shift).unwrap().transform_point(p), Point2d::new(10.0, 1.0));
        assert_points_close(shift.then(&rotate).unwrap().transform_point(p), Point2d::new(0.0, 11.0));
    }

    #[test]
    fn capability_flags() {
        let quarter = Transform::rotation(PI / 2.0).unwrap();
        assert!(quarter.is_rectilinear_preserving());
        assert!(quarter.is_circle_preserving());
        assert!(quarter.is_scale_preserving());

        let rotation = Transform::rotation(0.3).unwrap();
        assert!(!rotation.is_rectilinear_preserving());
        assert!(rotation.is_circle_preserving());
        assert!(rotation.is_chiral_preserving());

        let mirror = Transform::scale_xy(-1.0, 1.0).unwrap();
        assert!(!mirror.is_chiral_preserving());
        assert!(mirror.is_circle_preserving());
        assert!(mirror.is_rectilinear_preserving());

        let stretch = Transform::scale_xy(2.0, 1.0).unwrap();
        assert!(!stretch.is_circle_preserving());
        assert!(stretch.is_skew_free());

        let shear = Transform::skew(0.5, 0.0).unwrap();
        assert!(!shear.is_rectilinear_preserving());
        assert!(shear.is_scale_preserving());
    }

    #[test]
    fn transform_rect_requires_rectilinear() {
        let rect = Rect::new(0.0, 0.0, 2.0, 1.0).unwrap();
        let rotated = Transform::rotate_right_angles(1).transform_rect(&rect).unwrap();
        assert_eq!(rotated, Rect::new(-1.0, 0.0, 0.0, 2.0).unwrap());
        let sheared = Transform::skew(1.0, 0.0).unwrap();
        assert_eq!(sheared.transform_rect(&rect), Err(GeomError::NotRectilinearPreserving));
    }

    #[test]
    fn similarity_angles_unwrap() {
        let mirror = Transform::scale_xy(1.0, -1.0).unwrap();
        assert_approx_eq!(mirror.transform_angle(3.0 * PI), -3.0 * PI);
        let rotate = Transform::rotation(0.5).unwrap();
        assert_approx_eq!(rotate.transform_angle(4.0 * PI), 4.0 * PI + 0.5);
    }
}
