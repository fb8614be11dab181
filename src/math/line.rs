use super::{from_angle, rot90, LineSegment, Point2d, Rect, Transform, Vector2d};
use crate::{GeomError, Result};
use cgmath::prelude::*;

/// An infinite directed line.
///
/// Stored in normal form: the unit normal points away from the origin and
/// `distance` is the (non-negative) distance from the origin to the line.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Line {
    tangent: Vector2d,
    normal: Vector2d,
    distance: f64,
}

impl Line {
    pub const X_AXIS: Line = Line {
        tangent: Vector2d::new(1.0, 0.0),
        normal: Vector2d::new(0.0, 1.0),
        distance: 0.0,
    };

    pub const Y_AXIS: Line = Line {
        tangent: Vector2d::new(0.0, 1.0),
        normal: Vector2d::new(-1.0, 0.0),
        distance: 0.0,
    };

    /// A line whose tangent makes `angle` with the x-axis, at a distance from the origin.
    pub fn from_angle(angle: f64, distance: f64) -> Result<Self> {
        if distance.is_nan() || distance < 0.0 || !angle.is_finite() {
            return Err(GeomError::InvalidArgument("line distance must be non-negative"));
        }
        let tangent = from_angle(angle);
        Ok(Self { tangent, normal: rot90(tangent), distance })
    }

    /// The line through `pt` running in the direction of `tangent`.
    pub fn from_tangent_at_point(tangent: Vector2d, pt: Point2d) -> Result<Self> {
        if tangent.is_zero() {
            return Err(GeomError::ZeroVector("line tangent"));
        }
        if !pt.x.is_finite() || !pt.y.is_finite() {
            return Err(GeomError::InvalidCoordinate("non-finite line point"));
        }
        Ok(Self::through(pt, tangent.normalize()))
    }

    /// The line through two distinct points, directed from the first to the second.
    pub fn from_points(p1: Point2d, p2: Point2d) -> Result<Self> {
        if p1 == p2 {
            return Err(GeomError::CoincidentPoints);
        }
        Self::from_tangent_at_point(p2 - p1, p1)
    }

    /// Assumes a unit tangent.
    pub(crate) fn through(pt: Point2d, tangent: Vector2d) -> Self {
        let normal = rot90(tangent);
        let distance = normal.dot(pt.to_vec());
        if distance < 0.0 {
            // the tangent keeps its direction, the normal flips to face away
            Self { tangent, normal: -normal, distance: -distance }
        } else {
            Self { tangent, normal, distance }
        }
    }

    pub fn tangent(&self) -> Vector2d {
        self.tangent
    }

    /// The unit normal, pointing away from the origin.
    pub fn normal(&self) -> Vector2d {
        self.normal
    }

    pub fn distance_from_origin(&self) -> f64 {
        self.distance
    }

    pub fn is_through_origin(&self) -> bool {
        self.distance == 0.0
    }

    pub fn nearest_point_to_origin(&self) -> Point2d {
        Point2d::from_vec(self.normal * self.distance)
    }

    pub fn nearest_point_to(&self, pt: Point2d) -> Point2d {
        let d = self.normal.dot(pt.to_vec());
        if d == self.distance {
            pt
        } else {
            pt + self.normal * (self.distance - d)
        }
    }

    /// The parallel line passing through a point, with the same direction.
    pub fn parallel_line_through(&self, pt: Point2d) -> Self {
        Self::through(pt, self.tangent)
    }

    /// Which side of the line a point lies on.
    ///
    /// Returns 1 to the left of the tangent, -1 to the right and 0 on the line.
    pub fn side_of(&self, pt: Point2d) -> i32 {
        let det = self.tangent.perp_dot(pt - self.nearest_point_to_origin());
        if det == 0.0 {
            0
        } else if det < 0.0 {
            -1
        } else {
            1
        }
    }

    /// The part of the line inside the rectangle, oriented along the line.
    pub fn bounded(&self, rect: &Rect) -> Option<LineSegment> {
        let origin = self.nearest_point_to_origin();
        let mut s = (f64::NEG_INFINITY, f64::INFINITY);
        for (p, d, min, max) in [
            (origin.x, self.tangent.x, rect.min_x, rect.max_x),
            (origin.y, self.tangent.y, rect.min_y, rect.max_y),
        ] {
            if d == 0.0 {
                if p < min || p > max {
                    return None;
                }
                continue;
            }
            let (a, b) = ((min - p) / d, (max - p) / d);
            s.0 = s.0.max(a.min(b));
            s.1 = s.1.min(a.max(b));
        }
        if s.0 > s.1 {
            return None;
        }
        let start = origin + self.tangent * s.0;
        let finish = origin + self.tangent * s.1;
        if start == finish {
            LineSegment::from_point(start, self.tangent).ok()
        } else {
            LineSegment::from_points(start, finish).ok()
        }
    }

    pub fn transformed(&self, t: &Transform) -> Result<Self> {
        Self::from_tangent_at_point(
            t.transform_vector(self.tangent),
            t.transform_point(self.nearest_point_to_origin()),
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn normal_faces_away_from_origin() {
        let below = Line::from_points(Point2d::new(0.0, -2.0), Point2d::new(1.0, -2.0)).unwrap();
        assert_eq!(below.normal(), Vector2d::new(0.0, -1.0));
        assert_approx_eq!(below.distance_from_origin(), 2.0);
        assert_eq!(below.tangent(), Vector2d::new(1.0, 0.0));
    }

    #[test]
    fn nearest_point_projects_onto_line() {
        let line = Line::from_points(Point2d::new(0.0, 0.0), Point2d::new(1.0, 1.0)).unwrap();
        let p = line.nearest_point_to(Point2d::new(2.0, 0.0));
        assert_approx_eq!(p.x, 1.0);
        assert_approx_eq!(p.y, 1.0);
    }

    #[test]
    fn sides() {
        let line = Line::from_points(Point2d::new(0.0, 3.0), Point2d::new(1.0, 3.0)).unwrap();
        assert_eq!(line.side_of(Point2d::new(0.0, 4.0)), 1);
        assert_eq!(line.side_of(Point2d::new(0.0, 2.0)), -1);
        assert_eq!(line.side_of(Point2d::new(7.0, 3.0)), 0);
    }

    #[test]
    fn bounded_by_rect() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0).unwrap();
        let seg = Line::from_points(Point2d::new(0.0, 5.0), Point2d::new(-1.0, 5.0))
            .unwrap()
            .bounded(&r)
            .unwrap();
        assert_eq!(seg.start(), Point2d::new(10.0, 5.0));
        assert_eq!(seg.finish(), Point2d::new(0.0, 5.0));
        assert!(Line::X_AXIS.parallel_line_through(Point2d::new(0.0, 11.0)).bounded(&r).is_none());
    }
}
