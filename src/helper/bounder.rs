use super::PointConsumer;
use crate::math::{Point2d, Rect};

/// Accumulates the bounding rectangle of the points it is given.
#[derive(Clone, Copy, Debug, Default)]
pub struct Bounder {
    bounds: Option<Rect>,
}

impl Bounder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The smallest rectangle containing every point so far, or `None` if
    /// no point has been added.
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }
}

impl PointConsumer for Bounder {
    fn add_point(&mut self, pt: Point2d) {
        let r = Rect::at_point(pt);
        self.bounds = Some(match self.bounds {
            Some(bounds) => bounds.union(&r),
            None => r,
        });
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Context, Path, RectPath};

    #[test]
    fn empty_bounder_has_no_bounds() {
        assert_eq!(Bounder::new().bounds(), None);
    }

    #[test]
    fn bounds_grow_with_points() {
        let mut bounder = Bounder::new();
        bounder.add_point(Point2d::new(1.0, 2.0));
        assert_eq!(bounder.bounds(), Some(Rect::at_point(Point2d::new(1.0, 2.0))));
        bounder.add_point(Point2d::new(-1.0, 5.0));
        bounder.add_point(Point2d::new(0.0, 3.0));
        assert_eq!(bounder.bounds(), Some(Rect::new(-1.0, 2.0, 1.0, 5.0).unwrap()));
    }

    #[test]
    fn linearized_rect_bounds() {
        let rect = Rect::new(2.0, 3.0, 7.0, 4.0).unwrap();
        let path: Path = RectPath::new(rect, false).into();
        let mut bounder = Bounder::new();
        path.linearize(&Context::default(), &mut bounder);
        assert_eq!(bounder.bounds(), Some(rect));
    }
}
