//! Closed paths as the boundaries of regions.

use crate::helper::Winder;
use crate::math::{Ellipse, Point2d, Rect, Transform};
use crate::{Context, GeomError, Path, RectPath, Result, SequencePath};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Decides from a winding number whether a point lies inside a region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WindingRule {
    /// Inside where the winding number is odd.
    EvenOdd,
    /// Inside where the winding number is not zero.
    NonZero,
}

impl WindingRule {
    pub fn is_interior(&self, winding_number: i32) -> bool {
        match self {
            WindingRule::EvenOdd => winding_number & 1 == 1,
            WindingRule::NonZero => winding_number != 0,
        }
    }
}

/// A closed path.
#[derive(Clone, Debug)]
pub struct Contour {
    path: Path,
}

impl Contour {
    pub fn new(path: Path) -> Result<Self> {
        if !path.is_closed() {
            return Err(GeomError::OpenContour);
        }
        Ok(Self { path })
    }

    /// The boundary of a rectangle, starting from its minimum corner.
    pub fn from_rect(rect: Rect, positive_rotation: bool) -> Self {
        Self { path: RectPath::new(rect, positive_rotation).into() }
    }

    /// The boundary of an ellipse, starting from the image of the unit
    /// circle's point on the x axis.
    pub fn from_ellipse(ellipse: Ellipse, positive_rotation: bool) -> Self {
        let path: Path = ellipse.complete_arc().into();
        Self { path: if positive_rotation { path } else { path.reverse() } }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bounds(&self) -> Rect {
        self.path.bounds()
    }

    /// The contour traced the other way round.
    pub fn reversed(&self) -> Self {
        Self { path: self.path.reverse() }
    }

    pub fn apply(&self, t: &Transform) -> Result<Self> {
        Ok(Self { path: self.path.apply(t)? })
    }

    /// The path of the contour, starting at the point of the contour nearest
    /// to `pt`.
    pub fn path_starting_at(&self, pt: Point2d, ctx: &Context) -> Path {
        if pt == self.path.start() {
            return self.path.clone();
        }
        let mut location = self.path.by_length(ctx).location();
        location.move_closest_to(pt);
        if location.is_at_start() || location.is_at_finish() {
            return self.path.clone();
        }
        let (first, second) = location.split();
        SequencePath::from_parts(vec![second, first], true).into()
    }

    pub fn winding_number(&self, pt: Point2d, ctx: &Context) -> i32 {
        Winder::new().count_windings(self, pt, ctx)
    }

    pub fn contains(&self, pt: Point2d, rule: WindingRule, ctx: &Context) -> bool {
        rule.is_interior(self.winding_number(pt, ctx))
    }
}

/// A region bounded by any number of contours.
#[derive(Clone, Debug)]
pub struct Shape {
    rule: WindingRule,
    contours: Vec<Contour>,
    bounds: Rect,
}

impl Shape {
    pub fn new(rule: WindingRule, contours: Vec<Contour>) -> Result<Self> {
        let mut bounds = contours.iter().map(Contour::bounds);
        let Some(first) = bounds.next() else {
            return Err(GeomError::InvalidArgument("a shape needs at least one contour"));
        };
        let bounds = bounds.fold(first, |a, b| a.union(&b));
        Ok(Self { rule, contours, bounds })
    }

    pub fn winding_rule(&self) -> WindingRule {
        self.rule
    }

    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// The sum of the windings of every contour around the point.
    pub fn winding_number(&self, pt: Point2d, ctx: &Context) -> i32 {
        let winder = Winder::new();
        self.contours.iter().map(|c| winder.count_windings(c, pt, ctx)).sum()
    }

    pub fn contains(&self, pt: Point2d, ctx: &Context) -> bool {
        self.rule.is_interior(self.winding_number(pt, ctx))
    }

    pub fn apply(&self, t: &Transform) -> Result<Self> {
        let contours = self.contours.iter().map(|c| c.apply(t)).collect::<Result<Vec<_>>>()?;
        Self::new(self.rule, contours)
    }
}
