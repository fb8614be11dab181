use super::{Norm, Point2d, Transform, Vector2d};
use crate::{util::Interval, GeomError, Result};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis aligned rectangle.
///
/// Always satisfies `min_x <= max_x` and `min_y <= max_y`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Rect {
    /// The square `[0, 1] x [0, 1]`.
    pub const UNIT_SQUARE: Rect = Rect::from_ordered(0.0, 0.0, 1.0, 1.0);

    /// The square `[-1, 1] x [-1, 1]`, which bounds the unit circle.
    pub const BASIS_SQUARE: Rect = Rect::from_ordered(-1.0, -1.0, 1.0, 1.0);

    const fn from_ordered(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    /// Creates a rectangle from its extents.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Self> {
        if ![min_x, min_y, max_x, max_y].iter().all(|v| v.is_finite()) {
            return Err(GeomError::InvalidCoordinate("non-finite rectangle extent"));
        }
        if min_x > max_x || min_y > max_y {
            return Err(GeomError::InvalidArgument("rectangle minimum exceeds maximum"));
        }
        Ok(Self::from_ordered(min_x, min_y, max_x, max_y))
    }

    /// The smallest rectangle containing both points.
    pub fn at_points(a: Point2d, b: Point2d) -> Self {
        Self::from_ordered(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
    }

    /// The degenerate rectangle containing only the given point.
    pub fn at_point(pt: Point2d) -> Self {
        Self::from_ordered(pt.x, pt.y, pt.x, pt.y)
    }

    /// A rectangle with the given centre and dimensions.
    pub fn at_center(center: Point2d, width: f64, height: f64) -> Result<Self> {
        if width < 0.0 || height < 0.0 {
            return Err(GeomError::InvalidArgument("negative rectangle dimension"));
        }
        let (hw, hh) = (0.5 * width, 0.5 * height);
        Self::new(center.x - hw, center.y - hh, center.x + hw, center.y + hh)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point2d {
        Point2d::new(0.5 * (self.min_x + self.max_x), 0.5 * (self.min_y + self.max_y))
    }

    /// The corners in the order: min/min, max/min, max/max, min/max.
    pub fn corners(&self) -> [Point2d; 4] {
        [
            Point2d::new(self.min_x, self.min_y),
            Point2d::new(self.max_x, self.min_y),
            Point2d::new(self.max_x, self.max_y),
            Point2d::new(self.min_x, self.max_y),
        ]
    }

    pub fn x_range(&self) -> Interval<f64> {
        Interval::new(self.min_x, self.max_x)
    }

    pub fn y_range(&self) -> Interval<f64> {
        Interval::new(self.min_y, self.max_y)
    }

    /// True if the width or height is zero.
    pub fn is_degenerate(&self) -> bool {
        self.min_x == self.max_x || self.min_y == self.max_y
    }

    pub fn diagonal_length(&self) -> f64 {
        Norm::L2.magnitude(Vector2d::new(self.width(), self.height()))
    }

    pub fn perimeter_length(&self) -> f64 {
        2.0 * (self.width() + self.height())
    }

    /// Moves the rectangle by the given vector.
    pub fn translate(&self, v: Vector2d) -> Self {
        Self::from_ordered(self.min_x + v.x, self.min_y + v.y, self.max_x + v.x, self.max_y + v.y)
    }

    /// Grows the rectangle by `amount` on every side.
    ///
    /// A negative amount shrinks it; a rectangle shrunk past nothing
    /// collapses about its centre line rather than inverting.
    pub fn outset(&self, amount: f64) -> Self {
        if amount == 0.0 {
            return *self;
        }
        Self::at_points(
            Point2d::new(self.min_x - amount, self.min_y - amount),
            Point2d::new(self.max_x + amount, self.max_y + amount),
        )
    }

    /// The smallest rectangle containing both rectangles.
    pub fn union(&self, other: &Rect) -> Self {
        Self::from_ordered(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    /// True if the interiors of the rectangles overlap.
    ///
    /// Rectangles which only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.max_x > other.min_x
            && self.min_x < other.max_x
            && self.max_y > other.min_y
            && self.min_y < other.max_y
    }

    /// The overlap of two rectangles, if it has an interior.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let min_x = self.min_x.max(other.min_x);
        let min_y = self.min_y.max(other.min_y);
        let max_x = self.max_x.min(other.max_x);
        let max_y = self.max_y.min(other.max_y);
        (min_x < max_x && min_y < max_y).then(|| Self::from_ordered(min_x, min_y, max_x, max_y))
    }

    pub fn contains_point(&self, pt: Point2d) -> bool {
        pt.x >= self.min_x && pt.x <= self.max_x && pt.y >= self.min_y && pt.y <= self.max_y
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.min_x <= other.min_x
            && self.max_x >= other.max_x
            && self.min_y <= other.min_y
            && self.max_y >= other.max_y
    }

    /// Finds the point of the rectangle nearest to `pt`.
    ///
    /// # Parameters
    /// * `pt` - The point to approach
    /// * `edge_only` - Whether a point inside the rectangle should be moved
    ///   onto its nearest edge rather than being returned as is
    pub fn nearest_point_to(&self, pt: Point2d, edge_only: bool) -> Point2d {
        let Point2d { x, y } = pt;
        //  0 | 1 | 2
        // ---+---+---
        //  3 | 4 | 5
        // ---+---+---
        //  6 | 7 | 8
        let mut region = 0;
        if x >= self.min_x {
            region += 1;
        }
        if x > self.max_x {
            region += 1;
        }
        if y >= self.min_y {
            region += 3;
        }
        if y > self.max_y {
            region += 3;
        }
        match region {
            0 => Point2d::new(self.min_x, self.min_y),
            1 => Point2d::new(x, self.min_y),
            2 => Point2d::new(self.max_x, self.min_y),
            3 => Point2d::new(self.min_x, y),
            5 => Point2d::new(self.max_x, y),
            6 => Point2d::new(self.min_x, self.max_y),
            7 => Point2d::new(x, self.max_y),
            8 => Point2d::new(self.max_x, self.max_y),
            _ if !edge_only => pt,
            _ => {
                let dx_min = x - self.min_x;
                let dx_max = self.max_x - x;
                let dy_min = y - self.min_y;
                let dy_max = self.max_y - y;
                if dx_min == 0.0 || dx_max == 0.0 || dy_min == 0.0 || dy_max == 0.0 {
                    return pt;
                }
                let (dx, ex) = if dx_min <= dx_max { (dx_min, self.min_x) } else { (dx_max, self.max_x) };
                let (dy, ey) = if dy_min <= dy_max { (dy_min, self.min_y) } else { (dy_max, self.max_y) };
                if dx <= dy {
                    Point2d::new(ex, y)
                } else {
                    Point2d::new(x, ey)
                }
            }
        }
    }

    /// The corner of the rectangle furthest from `pt`.
    pub fn furthest_point_to(&self, pt: Point2d) -> Point2d {
        let c = self.center();
        Point2d::new(
            if pt.x <= c.x { self.max_x } else { self.min_x },
            if pt.y <= c.y { self.max_y } else { self.min_y },
        )
    }

    /// The bounds of the rectangle's image under a transform.
    pub fn transformed(&self, t: &Transform) -> Rect {
        let [a, b, c, d] = self.corners().map(|p| t.transform_point(p));
        Rect::at_points(a, c).union(&Rect::at_points(b, d))
    }
}
