use super::{Intersector, PointConsumer};
use crate::math::{LineSegment, Point2d};
use crate::{Context, Contour};

/// Counts the windings of contours around points.
///
/// A ray is cast from the point to just beyond the nearest edge of the
/// contour's bounds, and each crossing of the ray by the contour adds or
/// removes a winding according to the direction in which it crosses.
/// Anticlockwise contours wind positively.
#[derive(Clone, Copy, Debug, Default)]
pub struct Winder;

/// The axis direction in which a ray is cast.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Ray {
    IncX,
    DecX,
    IncY,
    DecY,
}

/// Totals crossings reported as a triple: the start of the crossing segment,
/// the crossing and the finish of the crossing segment.
struct Counter {
    ray: Ray,
    count: usize,
    start: Point2d,
    winding: i32,
}

impl Counter {
    fn new(ray: Ray) -> Self {
        Self { ray, count: 0, start: Point2d::new(0.0, 0.0), winding: 0 }
    }
}

impl PointConsumer for Counter {
    fn add_point(&mut self, pt: Point2d) {
        match self.count {
            0 => {
                self.start = pt;
                self.count = 1;
            }
            1 => self.count = 2,
            _ => {
                let positive = match self.ray {
                    Ray::IncX => pt.y > self.start.y,
                    Ray::DecX => pt.y < self.start.y,
                    Ray::IncY => pt.x < self.start.x,
                    Ray::DecY => pt.x > self.start.x,
                };
                self.winding += if positive { 1 } else { -1 };
                self.count = 0;
            }
        }
    }
}

impl Winder {
    pub fn new() -> Self {
        Self
    }

    /// The number of times the contour winds around the point.
    ///
    /// Points outside the contour's bounds have no windings. Points on the
    /// boundary of the bounds lie on the contour, and wind once.
    pub fn count_windings(&self, contour: &Contour, pt: Point2d, ctx: &Context) -> i32 {
        let bounds = contour.bounds();
        if !bounds.contains_point(pt) {
            return 0;
        }
        let nearest = bounds.nearest_point_to(pt, true);
        if nearest == pt {
            return 1;
        }
        let Ok(ray) = LineSegment::from_points(pt, nearest) else { return 1 };
        let ray = ray.scale_length(1.001);
        let direction = if pt.y == nearest.y {
            if pt.x < nearest.x {
                Ray::IncX
            } else {
                Ray::DecX
            }
        } else if pt.y < nearest.y {
            Ray::IncY
        } else {
            Ray::DecY
        };
        let mut counter = Counter::new(direction);
        Intersector::new(&mut counter)
            .reporting_previous_vertex(true)
            .reporting_next_vertex(true)
            .intersect(contour.path(), &ray.into(), ctx);
        counter.winding
    }
}
