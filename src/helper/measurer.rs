use super::PointConsumer;
use crate::math::{Norm, Point2d};

/// Accumulates the length of the polyline through the points it is given.
#[derive(Clone, Copy, Debug, Default)]
pub struct Measurer {
    norm: Norm,
    length: f64,
    last: Option<Point2d>,
}

impl Measurer {
    /// A measurer using the euclidean norm.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_norm(norm: Norm) -> Self {
        Self { norm, ..Self::default() }
    }

    pub fn norm(&self) -> Norm {
        self.norm
    }

    pub fn length(&self) -> f64 {
        self.length
    }
}

impl PointConsumer for Measurer {
    fn add_point(&mut self, pt: Point2d) {
        if let Some(last) = self.last {
            self.length += self.norm.distance_between(last, pt);
        }
        self.last = Some(pt);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::{Ellipse, Rect};
    use crate::{Context, Path, RectPath};
    use assert_approx_eq::assert_approx_eq;
    use std::f64::consts::PI;

    #[test]
    fn measures_each_step() {
        let mut measurer = Measurer::new();
        assert_eq!(measurer.length(), 0.0);
        measurer.add_point(Point2d::new(0.0, 0.0));
        measurer.add_point(Point2d::new(3.0, 4.0));
        assert_eq!(measurer.length(), 5.0);
        measurer.add_point(Point2d::new(3.0, 0.0));
        assert_eq!(measurer.length(), 9.0);
    }

    #[test]
    fn norms_change_the_measure() {
        let mut measurer = Measurer::with_norm(Norm::L1);
        measurer.add_point(Point2d::new(0.0, 0.0));
        measurer.add_point(Point2d::new(3.0, 4.0));
        assert_eq!(measurer.length(), 7.0);
    }

    #[test]
    fn perimeter_of_linearized_paths() {
        let ctx = Context::default();
        let rect: Path = RectPath::new(Rect::new(0.0, 0.0, 3.0, 2.0).unwrap(), true).into();
        let mut measurer = Measurer::new();
        rect.linearize(&ctx, &mut measurer);
        assert_eq!(measurer.length(), 10.0);

        let circle: Path =
            Ellipse::from_radius(Point2d::new(0.0, 0.0), 20.0).unwrap().complete_arc().into();
        let mut measurer = Measurer::new();
        circle.linearize(&ctx, &mut measurer);
        assert!(measurer.length() <= 40.0 * PI);
        assert_approx_eq!(measurer.length(), 40.0 * PI, 1.5);
    }
}
