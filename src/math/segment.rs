use super::{
    interpolate, is_finite, midpoint, rot90, Line, ParametricCurve2d, Point2d, Rect, Transform,
    Vector2d,
};
use crate::{util::Interval, GeomError, Result};
use cgmath::prelude::*;

/// Returns -1, 0 or 1 as `v` lies below, within or above `[min, max]`.
fn rel_pos(v: f64, min: f64, max: f64) -> i32 {
    if v < min {
        -1
    } else if v > max {
        1
    } else {
        0
    }
}

/// Clips the parameter range `[t0, t1]` of `start + t * delta` to the slab `[min, max]`.
fn clip_axis(start: f64, delta: f64, min: f64, max: f64, t: &mut Interval<f64>) -> bool {
    if delta == 0.0 {
        return start >= min && start <= max;
    }
    let (a, b) = ((min - start) / delta, (max - start) / delta);
    let (a, b) = if a <= b { (a, b) } else { (b, a) };
    t.min = t.min.max(a);
    t.max = t.max.min(b);
    t.min <= t.max
}

/// A directed line segment.
///
/// A segment always carries a unit tangent. This allows a segment whose
/// start and finish coincide to exist, provided it was given a direction.
#[derive(Copy, Clone, Debug)]
pub struct LineSegment {
    start: Point2d,
    finish: Point2d,
    tangent: Vector2d,
}

impl PartialEq for LineSegment {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.finish == other.finish
    }
}

impl LineSegment {
    /// Creates the segment between two distinct points.
    pub fn from_points(start: Point2d, finish: Point2d) -> Result<Self> {
        if !is_finite(start) || !is_finite(finish) {
            return Err(GeomError::InvalidCoordinate("non-finite segment end"));
        }
        if start == finish {
            return Err(GeomError::CoincidentPoints);
        }
        Ok(Self { start, finish, tangent: (finish - start).normalize() })
    }

    /// Creates a zero length segment at a point, facing along `tangent`.
    pub fn from_point(point: Point2d, tangent: Vector2d) -> Result<Self> {
        if !is_finite(point) {
            return Err(GeomError::InvalidCoordinate("non-finite segment point"));
        }
        if tangent.is_zero() {
            return Err(GeomError::ZeroVector("segment tangent"));
        }
        Ok(Self { start: point, finish: point, tangent: tangent.normalize() })
    }

    /// Creates the segment from `start` to `start + vector`.
    pub fn from_vector(start: Point2d, vector: Vector2d) -> Result<Self> {
        if vector.is_zero() {
            return Err(GeomError::ZeroVector("segment vector"));
        }
        Self::from_points(start, start + vector)
    }

    /// A zero length segment facing along a tangent already known to be a unit vector.
    pub(crate) fn at_point(point: Point2d, tangent: Vector2d) -> Self {
        Self { start: point, finish: point, tangent }
    }

    /// The segment between two points already known to be distinct and finite.
    pub(crate) fn between(start: Point2d, finish: Point2d) -> Self {
        Self { start, finish, tangent: (finish - start).normalize() }
    }

    /// A segment between two points which inherits this segment's direction
    /// if the points coincide.
    pub(crate) fn subsegment(&self, start: Point2d, finish: Point2d) -> Self {
        let tangent = if start == finish { self.tangent } else { (finish - start).normalize() };
        Self { start, finish, tangent }
    }

    pub fn start(&self) -> Point2d {
        self.start
    }

    pub fn finish(&self) -> Point2d {
        self.finish
    }

    /// The unit direction of the segment.
    pub fn tangent(&self) -> Vector2d {
        self.tangent
    }

    /// The tangent rotated anticlockwise through a right angle.
    pub fn normal(&self) -> Vector2d {
        rot90(self.tangent)
    }

    /// The vector from start to finish.
    pub fn vector(&self) -> Vector2d {
        self.finish - self.start
    }

    pub fn midpoint(&self) -> Point2d {
        midpoint(self.start, self.finish)
    }

    pub fn length(&self) -> f64 {
        self.start.distance(self.finish)
    }

    pub fn is_zero_length(&self) -> bool {
        self.start == self.finish
    }

    /// True if the segment runs parallel to an axis.
    pub fn is_rectilinear(&self) -> bool {
        self.tangent.x == 0.0 || self.tangent.y == 0.0
    }

    pub fn bounds(&self) -> Rect {
        Rect::at_points(self.start, self.finish)
    }

    /// The infinite line through the segment, oriented the same way.
    pub fn line(&self) -> Line {
        Line::through(self.start, self.tangent)
    }

    /// The point a proportion `t` of the way along the segment, clamped to its ends.
    pub fn interpolate(&self, t: f64) -> Point2d {
        if t <= 0.0 {
            self.start
        } else if t >= 1.0 {
            self.finish
        } else {
            interpolate(self.start, self.finish, t)
        }
    }

    /// The proportion along the segment of the point nearest to `pt`.
    pub fn nearest_param(&self, pt: Point2d) -> f64 {
        let v = self.vector();
        let len2 = v.magnitude2();
        if len2 == 0.0 {
            return 0.0;
        }
        ((pt - self.start).dot(v) / len2).clamp(0.0, 1.0)
    }

    pub fn nearest_point_to(&self, pt: Point2d) -> Point2d {
        self.interpolate(self.nearest_param(pt))
    }

    /// Which side of the segment's line a point lies on.
    ///
    /// Returns 1 to the left (anticlockwise), -1 to the right and 0 on the line.
    pub fn side_of(&self, pt: Point2d) -> i32 {
        let det = self.tangent.perp_dot(pt - self.start);
        if det == 0.0 {
            0
        } else if det < 0.0 {
            -1
        } else {
            1
        }
    }

    /// The point at which two segments cross, if they do.
    ///
    /// Parallel segments never intersect, even when they overlap.
    pub fn intersection_with(&self, that: &LineSegment) -> Option<Point2d> {
        let a = self.vector();
        let b = that.vector();
        let d = a.y * b.x - a.x * b.y;
        if d == 0.0 {
            return None;
        }
        let e = that.start - self.start;
        let s = e.y * b.x - e.x * b.y;
        if (d > 0.0 && (s < 0.0 || s > d)) || (d < 0.0 && (s > 0.0 || s < d)) {
            return None;
        }
        let t = e.y * a.x - e.x * a.y;
        if (d > 0.0 && (t < 0.0 || t > d)) || (d < 0.0 && (t > 0.0 || t < d)) {
            return None;
        }
        let s = s / d;
        Some(Point2d::new(self.start.x + s * a.x, self.start.y + s * a.y))
    }

    /// True if the segment touches or lies within the rectangle.
    pub fn intersects_rect(&self, rect: &Rect) -> bool {
        if rect.contains_point(self.start) || rect.contains_point(self.finish) {
            return true;
        }
        let bounds = self.bounds();
        if bounds.max_x < rect.min_x
            || bounds.min_x > rect.max_x
            || bounds.max_y < rect.min_y
            || bounds.min_y > rect.max_y
        {
            return false;
        }
        let sides: i32 = rect.corners().iter().map(|&c| self.side_of(c)).sum();
        if sides.abs() == 4 {
            return false;
        }
        let sx = rel_pos(self.start.x, rect.min_x, rect.max_x);
        let sy = rel_pos(self.start.y, rect.min_y, rect.max_y);
        let fx = rel_pos(self.finish.x, rect.min_x, rect.max_x);
        let fy = rel_pos(self.finish.y, rect.min_y, rect.max_y);
        if sy == 0 && sx != 0 && fx == sx {
            return false;
        }
        if sx == 0 && sy != 0 && fy == sy {
            return false;
        }
        (sx - fx).abs() + (sy - fy).abs() >= 2
    }

    /// The part of the segment that lies within the rectangle.
    pub fn bounded(&self, rect: &Rect) -> Option<LineSegment> {
        if rect.contains_rect(&self.bounds()) {
            return Some(*self);
        }
        let v = self.vector();
        let mut t = Interval::new(0.0, 1.0);
        if !clip_axis(self.start.x, v.x, rect.min_x, rect.max_x, &mut t)
            || !clip_axis(self.start.y, v.y, rect.min_y, rect.max_y, &mut t)
        {
            return None;
        }
        Some(self.subsegment(self.interpolate(t.min), self.interpolate(t.max)))
    }

    /// The segment running the other way.
    pub fn reverse(&self) -> Self {
        Self { start: self.finish, finish: self.start, tangent: -self.tangent }
    }

    /// Scales the segment about its start.
    ///
    /// A negative scale produces a segment pointing the other way.
    pub fn scale_length(&self, scale: f64) -> Self {
        if self.is_zero_length() || scale == 1.0 {
            return *self;
        }
        let finish = self.start + self.vector() * scale;
        let tangent = if scale < 0.0 { -self.tangent } else { self.tangent };
        Self { start: self.start, finish, tangent }
    }

    /// The image of the segment under a transform.
    pub fn transformed(&self, t: &Transform) -> Self {
        if t.is_identity() {
            return *self;
        }
        let start = t.transform_point(self.start);
        let finish = t.transform_point(self.finish);
        let tangent = if start == finish {
            t.transform_vector(self.tangent).normalize()
        } else {
            (finish - start).normalize()
        };
        Self { start, finish, tangent }
    }
}

impl ParametricCurve2d for LineSegment {
    fn sample(&self, t: f64) -> Point2d {
        interpolate(self.start, self.finish, t)
    }

    fn sample_dt(&self, _t: f64) -> Vector2d {
        self.vector()
    }
}
