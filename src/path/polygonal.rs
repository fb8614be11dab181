use super::index::Parameterizations;
use super::{Composite, Path, PointPath, Simplified, Trace};
use crate::helper::PointConsumer;
use crate::math::{LineSegment, Point2d, Rect, Transform, Vector2d};
use crate::{Context, GeomError, Result};
use itertools::Itertools;
use once_cell::sync::OnceCell;

/// A path through a sequence of points, joined by straight edges.
///
/// There are always at least two points and no two consecutive points are
/// equal. The path is closed when the last point equals the first.
#[derive(Clone, Debug)]
pub struct PolygonalPath {
    points: Vec<Point2d>,
    rectilinear: bool,
    index: OnceCell<Parameterizations>,
}

impl PolygonalPath {
    pub fn builder() -> PolygonalPathBuilder {
        PolygonalPathBuilder::default()
    }

    fn from_points(points: Vec<Point2d>, rectilinear: bool) -> Self {
        Self { points, rectilinear, index: OnceCell::new() }
    }

    pub fn points(&self) -> &[Point2d] {
        &self.points
    }

    /// The edges of the path, in order.
    pub fn segments(&self) -> impl Iterator<Item = LineSegment> + '_ {
        self.points.iter().tuple_windows().map(|(&a, &b)| LineSegment::between(a, b))
    }

    /// The points from `from` to `to` inclusive, as the simplest path that
    /// traces them.
    fn slice(&self, from: usize, to: usize) -> Path {
        if to - from == 1 {
            LineSegment::between(self.points[from], self.points[to]).into()
        } else {
            Self::from_points(self.points[from..=to].to_vec(), self.rectilinear).into()
        }
    }
}

impl Trace for PolygonalPath {
    fn start(&self) -> Point2d {
        self.points[0]
    }

    fn finish(&self) -> Point2d {
        self.points[self.points.len() - 1]
    }

    fn is_closed(&self) -> bool {
        self.start() == self.finish()
    }

    fn is_rectilinear(&self) -> bool {
        self.rectilinear
    }

    fn compute_length(&self, ctx: &Context) -> f64 {
        self.index(ctx).length()
    }

    fn compute_bounds(&self) -> Rect {
        self.points[1..].iter().fold(Rect::at_point(self.points[0]), |r, &pt| {
            r.union(&Rect::at_point(pt))
        })
    }

    fn simplify(&self, _this: &Path, _ctx: &Context) -> Simplified {
        let n = self.points.len();
        if n == 2 {
            return Simplified::Linear(LineSegment::between(self.points[0], self.points[1]));
        }
        let middle = n / 2;
        Simplified::Split(self.slice(0, middle), self.slice(middle, n - 1))
    }

    fn reverse(&self, _this: &Path) -> Path {
        let points = self.points.iter().rev().copied().collect();
        Self::from_points(points, self.rectilinear).into()
    }

    fn apply(&self, _this: &Path, t: &Transform) -> Result<Path> {
        let points = self.points.iter().map(|&pt| t.transform_point(pt));
        Ok(PolygonalPath::builder().add_points(points).build()?.into())
    }
}

impl Composite for PolygonalPath {
    fn count(&self) -> usize {
        self.points.len() - 1
    }

    fn subpath(&self, index: usize) -> Path {
        LineSegment::between(self.points[index], self.points[index + 1]).into()
    }

    fn index(&self, _ctx: &Context) -> &Parameterizations {
        self.index.get_or_init(|| Parameterizations::new(self.segments().map(|s| s.length())))
    }
}

/// Accumulates the points of a [PolygonalPath].
#[derive(Clone, Debug)]
pub struct PolygonalPathBuilder {
    points: Vec<Point2d>,
    rectilinear: bool,
}

impl Default for PolygonalPathBuilder {
    fn default() -> Self {
        Self { points: Vec::new(), rectilinear: true }
    }
}

impl PolygonalPathBuilder {
    fn push(&mut self, pt: Point2d) {
        if let Some(&last) = self.points.last() {
            if last == pt {
                return;
            }
            if last.x != pt.x && last.y != pt.y {
                self.rectilinear = false;
            }
        }
        self.points.push(pt);
    }

    /// Appends a point, unless it repeats the last one.
    pub fn add_point(mut self, pt: Point2d) -> Self {
        self.push(pt);
        self
    }

    pub fn add_points(mut self, points: impl IntoIterator<Item = Point2d>) -> Self {
        for pt in points {
            self.push(pt);
        }
        self
    }

    /// Appends the vertices of a linearization of a path.
    pub fn add_path(mut self, path: &Path, ctx: &Context) -> Self {
        path.linearize(ctx, &mut self);
        self
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn build(self) -> Result<PolygonalPath> {
        if self.points.len() < 2 {
            return Err(GeomError::InsufficientPoints("a polygonal path needs two distinct points"));
        }
        Ok(PolygonalPath::from_points(self.points, self.rectilinear))
    }

    /// Returns to the first point, then builds.
    pub fn close_and_build(mut self) -> Result<PolygonalPath> {
        if let Some(&first) = self.points.first() {
            self.push(first);
        }
        self.build()
    }
}

impl PointConsumer for PolygonalPathBuilder {
    fn add_point(&mut self, pt: Point2d) {
        self.push(pt);
    }
}

/// The simplest path through some points: a point path, a segment or a
/// polygonal path. Consecutive duplicates are dropped, and `tangent` gives
/// the direction of a path that reduces to a single point.
///
/// There must be at least one point.
pub(crate) fn polyline(points: impl IntoIterator<Item = Point2d>, tangent: Vector2d) -> Path {
    let PolygonalPathBuilder { points, rectilinear } = PolygonalPath::builder().add_points(points);
    match points.len() {
        0 | 1 => {
            let pt = points.first().copied().unwrap_or_else(|| Point2d::new(0.0, 0.0));
            PointPath::at(pt, tangent).into()
        }
        2 => LineSegment::between(points[0], points[1]).into(),
        _ => PolygonalPath::from_points(points, rectilinear).into(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::PathKind;
    use assert_approx_eq::assert_approx_eq;

    fn square() -> Path {
        PolygonalPath::builder()
            .add_points([
                Point2d::new(0.0, 0.0),
                Point2d::new(2.0, 0.0),
                Point2d::new(2.0, 0.0),
                Point2d::new(2.0, 2.0),
                Point2d::new(0.0, 2.0),
            ])
            .close_and_build()
            .unwrap()
            .into()
    }

    #[test]
    fn builder_drops_repeated_points() {
        let path = square();
        let PathKind::Polygonal(polygon) = path.kind() else { panic!("expected a polygon") };
        assert_eq!(polygon.points().len(), 5);
        assert!(path.is_closed());
        assert!(path.is_rectilinear());
        assert_eq!(path.length(&Context::default()), 8.0);
    }

    #[test]
    fn too_few_points() {
        let result = PolygonalPath::builder()
            .add_point(Point2d::new(1.0, 1.0))
            .add_point(Point2d::new(1.0, 1.0))
            .build();
        assert!(matches!(result, Err(GeomError::InsufficientPoints(_))));
    }

    #[test]
    fn closed_polygons_have_a_corner_at_the_seam() {
        let ctx = Context::default();
        let corners = square().by_length(&ctx).corners();
        let parameters: Vec<f64> = corners.iter().map(|c| c.parameter()).collect();
        assert_eq!(parameters, vec![0.0, 2.0, 4.0, 6.0]);
    }

    #[test]
    fn collinear_vertices_are_not_corners() {
        let ctx = Context::default();
        let path: Path = PolygonalPath::builder()
            .add_points([Point2d::new(0.0, 0.0), Point2d::new(1.0, 1.0), Point2d::new(3.0, 3.0)])
            .build()
            .unwrap()
            .into();
        assert!(path.is_smooth(&ctx));
        assert!(!path.is_rectilinear());
    }

    #[test]
    fn simplify_splits_at_the_middle_vertex() {
        let ctx = Context::default();
        let path = square();
        let Simplified::Split(first, second) = path.simplify(&ctx) else {
            panic!("a square is not a line");
        };
        assert_eq!(first.finish(), Point2d::new(2.0, 2.0));
        assert_eq!(second.start(), Point2d::new(2.0, 2.0));
        assert_eq!(first.length(&ctx) + second.length(&ctx), 8.0);
    }

    #[test]
    fn reverse_and_transform() {
        let ctx = Context::default();
        let path = square();
        let reversed = path.reverse();
        assert_eq!(reversed.by_length(&ctx).point_at(1.0), Point2d::new(0.0, 1.0));
        let rotated = path.apply(&Transform::rotation(0.5).unwrap()).unwrap();
        assert!(!rotated.is_rectilinear());
        assert_approx_eq!(rotated.length(&ctx), 8.0);
    }

    #[test]
    fn polylines_collapse() {
        let pt = Point2d::new(1.0, 2.0);
        let tangent = Vector2d::new(0.0, 1.0);
        assert!(matches!(polyline([pt, pt], tangent).kind(), PathKind::Point(_)));
        let segment = polyline([pt, pt, Point2d::new(3.0, 2.0)], tangent);
        assert!(matches!(segment.kind(), PathKind::Linear(_)));
    }
}
