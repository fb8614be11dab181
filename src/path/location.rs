use super::parameterization::Domain;
use super::{Corner, Parameterization, Path, PointPath};
use crate::math::{Point2d, Vector2d};
use crate::{GeomError, Result};
use once_cell::unsync::OnceCell;

/// A movable position along a path, under one of its parameterizations.
///
/// Values derived from the parameter are computed on demand and remembered
/// until the location moves.
#[derive(Clone)]
pub struct Location<'a> {
    z: Parameterization<'a>,
    parameter: f64,
    corners: OnceCell<Vec<Corner>>,
    point_tangent: OnceCell<PointPath>,
    other: OnceCell<f64>,
}

impl<'a> Location<'a> {
    pub(crate) fn new(z: Parameterization<'a>, parameter: f64) -> Self {
        Self {
            parameter: z.clamp(parameter),
            z,
            corners: OnceCell::new(),
            point_tangent: OnceCell::new(),
            other: OnceCell::new(),
        }
    }

    pub fn parameterization(&self) -> Parameterization<'a> {
        self.z
    }

    pub fn path(&self) -> &'a Path {
        self.z.path()
    }

    pub fn parameter(&self) -> f64 {
        self.parameter
    }

    pub fn is_at_start(&self) -> bool {
        self.parameter == 0.0
    }

    pub fn is_at_finish(&self) -> bool {
        self.parameter == self.z.maximum()
    }

    fn corners(&self) -> &[Corner] {
        self.corners.get_or_init(|| self.z.corners())
    }

    /// The corner at this location, if there is one.
    pub fn corner(&self) -> Option<&Corner> {
        self.corners().iter().find(|c| c.parameter() == self.parameter)
    }

    pub fn is_at_corner(&self) -> bool {
        self.corner().is_some()
    }

    pub fn point_tangent(&self) -> PointPath {
        *self.point_tangent.get_or_init(|| self.z.point_tangent_at(self.parameter))
    }

    pub fn point(&self) -> Point2d {
        self.point_tangent().point()
    }

    pub fn tangent(&self) -> Vector2d {
        self.point_tangent().tangent()
    }

    fn other(&self) -> f64 {
        *self.other.get_or_init(|| match self.z.domain() {
            Domain::Intrinsic => self.z.length_at(self.parameter),
            Domain::Length => self.z.intrinsic_at(self.parameter),
        })
    }

    /// The arc length from the start of the path.
    pub fn length(&self) -> f64 {
        match self.z.domain() {
            Domain::Length => self.parameter,
            Domain::Intrinsic => self.other(),
        }
    }

    pub fn intrinsic(&self) -> f64 {
        match self.z.domain() {
            Domain::Intrinsic => self.parameter,
            Domain::Length => self.other(),
        }
    }

    /// Splits the path at this location.
    pub fn split(&self) -> (Path, Path) {
        self.z.split_at(self.parameter)
    }

    fn set(&mut self, parameter: f64) -> &mut Self {
        let parameter = self.z.clamp(parameter);
        if parameter != self.parameter {
            self.parameter = parameter;
            self.point_tangent = OnceCell::new();
            self.other = OnceCell::new();
        }
        self
    }

    pub fn move_to_start(&mut self) -> &mut Self {
        self.set(0.0)
    }

    pub fn move_to_finish(&mut self) -> &mut Self {
        let max = self.z.maximum();
        self.set(max)
    }

    pub fn move_to(&mut self, parameter: f64) -> &mut Self {
        self.set(parameter)
    }

    pub fn move_by(&mut self, delta: f64) -> &mut Self {
        self.set(self.parameter + delta)
    }

    /// Moves to the point on the path nearest to `pt`.
    pub fn move_closest_to(&mut self, pt: Point2d) -> &mut Self {
        let p = self.z.parameter_nearest(pt);
        self.set(p)
    }

    /// Moves to another location on the same path, which may be under the
    /// other parameterization.
    pub fn move_to_location(&mut self, location: &Location<'_>) -> Result<&mut Self> {
        if !location.path().ptr_eq(self.path()) {
            return Err(GeomError::MismatchedPath);
        }
        let p = if location.z.domain() == self.z.domain() {
            location.parameter
        } else {
            match self.z.domain() {
                Domain::Length => location.length(),
                Domain::Intrinsic => location.intrinsic(),
            }
        };
        Ok(self.set(p))
    }

    /// Moves to the first corner after this location, or to the finish.
    pub fn move_to_next_corner(&mut self) -> &mut Self {
        let next = self.corners().iter().map(Corner::parameter).find(|&p| p > self.parameter);
        match next {
            Some(p) => self.set(p),
            None => self.move_to_finish(),
        }
    }

    /// Moves to the last corner before this location, or to the start.
    pub fn move_to_previous_corner(&mut self) -> &mut Self {
        let previous = self.corners().iter().rev().map(Corner::parameter).find(|&p| p < self.parameter);
        self.set(previous.unwrap_or(0.0))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::Rect;
    use crate::{Context, RectPath};

    fn rect() -> Path {
        RectPath::new(Rect::new(0.0, 0.0, 4.0, 2.0).unwrap(), true).into()
    }

    #[test]
    fn parameters_are_clamped() {
        let ctx = Context::default();
        let path = rect();
        let mut location = path.by_length(&ctx).location_at(-3.0);
        assert!(location.is_at_start());
        location.move_by(20.0);
        assert!(location.is_at_finish());
        assert_eq!(location.parameter(), 12.0);
    }

    #[test]
    fn memoized_values_follow_moves() {
        let ctx = Context::default();
        let path = rect();
        let mut location = path.by_length(&ctx).location();
        assert_eq!(location.point(), Point2d::new(0.0, 0.0));
        location.move_to(5.0);
        assert_eq!(location.point(), Point2d::new(4.0, 1.0));
        assert_eq!(location.intrinsic(), 0.375);
        location.move_by(-1.0);
        assert_eq!(location.intrinsic(), 0.25);
        assert!(location.is_at_corner());
        assert_eq!(location.corner().map(Corner::parameter), Some(4.0));
    }

    #[test]
    fn corners_are_visited_in_both_directions() {
        let ctx = Context::default();
        let path = rect();
        let mut location = path.by_length(&ctx).location_at(5.0);
        assert_eq!(location.move_to_next_corner().parameter(), 6.0);
        assert_eq!(location.move_to_next_corner().parameter(), 10.0);
        assert_eq!(location.move_to_next_corner().parameter(), 12.0);
        assert_eq!(location.move_to_previous_corner().parameter(), 10.0);
        location.move_to(3.0);
        assert_eq!(location.move_to_previous_corner().parameter(), 0.0);
    }

    #[test]
    fn locations_translate_between_domains() {
        let ctx = Context::default();
        let path = rect();
        let other = rect();
        let by_length = path.by_length(&ctx).location_at(6.0);
        let mut by_intrinsic = path.by_intrinsic(&ctx).location();
        by_intrinsic.move_to_location(&by_length).unwrap();
        assert_eq!(by_intrinsic.parameter(), 0.5);
        let foreign = other.by_length(&ctx).location();
        assert_eq!(by_intrinsic.move_to_location(&foreign).err(), Some(GeomError::MismatchedPath));
    }

    #[test]
    fn closest_points_and_splits() {
        let ctx = Context::default();
        let path = rect();
        let mut location = path.by_length(&ctx).location();
        location.move_closest_to(Point2d::new(5.0, 1.0));
        assert_eq!(location.parameter(), 5.0);
        let (first, second) = location.split();
        assert_eq!(first.finish(), Point2d::new(4.0, 1.0));
        assert_eq!(second.start(), Point2d::new(4.0, 1.0));
    }
}
