use super::index::Parameterizations;
use super::{Composite, Path, PointPath, PolygonalPath, Simplified, Trace};
use crate::math::{BezierCurve, LineSegment, Point2d, Rect, Transform, UNIT_X};
use crate::{Context, GeomError, Result};
use itertools::Itertools;
use once_cell::sync::OnceCell;
use std::collections::VecDeque;

/// A path made of other paths, each starting where the previous one finished.
#[derive(Clone, Debug)]
pub struct SequencePath {
    paths: Vec<Path>,
    closed: bool,
    rectilinear: bool,
    index: OnceCell<Parameterizations>,
}

impl SequencePath {
    /// Creates a sequence over contiguous paths. A closed sequence must also
    /// finish where it starts.
    pub fn new(paths: Vec<Path>, closed: bool) -> Result<Self> {
        if paths.is_empty() {
            return Err(GeomError::InsufficientPoints("a sequence needs at least one path"));
        }
        for (a, b) in paths.iter().tuple_windows() {
            let (finish, start) = (a.finish(), b.start());
            if finish != start {
                return Err(GeomError::Disjoint { finish, start });
            }
        }
        let (start, finish) = (paths[0].start(), paths[paths.len() - 1].finish());
        if closed && start != finish {
            return Err(GeomError::Disjoint { finish, start });
        }
        Ok(Self::from_parts(paths, closed))
    }

    /// Creates a sequence over paths already known to be contiguous.
    pub(crate) fn from_parts(paths: Vec<Path>, closed: bool) -> Self {
        let rectilinear = paths.iter().all(Path::is_rectilinear);
        Self { paths, closed, rectilinear, index: OnceCell::new() }
    }

    pub fn builder() -> SequencePathBuilder {
        SequencePathBuilder::default()
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    /// The paths in a range, as a single path.
    fn part(&self, paths: &[Path]) -> Path {
        match paths {
            [path] => path.clone(),
            _ => Self::from_parts(paths.to_vec(), false).into(),
        }
    }
}

impl Trace for SequencePath {
    fn start(&self) -> Point2d {
        self.paths[0].start()
    }

    fn finish(&self) -> Point2d {
        self.paths[self.paths.len() - 1].finish()
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    fn is_rectilinear(&self) -> bool {
        self.rectilinear
    }

    fn compute_length(&self, ctx: &Context) -> f64 {
        self.index(ctx).length()
    }

    fn compute_bounds(&self) -> Rect {
        self.paths[1..].iter().fold(self.paths[0].bounds(), |r, p| r.union(&p.bounds()))
    }

    fn simplify(&self, _this: &Path, ctx: &Context) -> Simplified {
        let n = self.paths.len();
        if n == 1 {
            return self.paths[0].simplify(ctx);
        }
        let (head, tail) = self.paths.split_at(n / 2);
        Simplified::Split(self.part(head), self.part(tail))
    }

    fn reverse(&self, _this: &Path) -> Path {
        let paths = self.paths.iter().rev().map(Path::reverse).collect();
        Self::from_parts(paths, self.closed).into()
    }

    fn apply(&self, _this: &Path, t: &Transform) -> Result<Path> {
        let mut paths: Vec<Path> = Vec::with_capacity(self.paths.len());
        for path in &self.paths {
            let path = path.apply(t)?;
            if let Some(previous) = paths.last() {
                // rounding may separate ends which met exactly
                if let Ok(gap) = LineSegment::from_points(previous.finish(), path.start()) {
                    paths.push(gap.into());
                }
            }
            paths.push(path);
        }
        if self.closed {
            if let Ok(gap) = LineSegment::from_points(paths[paths.len() - 1].finish(), paths[0].start()) {
                paths.push(gap.into());
            }
        }
        Ok(Self::from_parts(paths, self.closed).into())
    }
}

impl Composite for SequencePath {
    fn count(&self) -> usize {
        self.paths.len()
    }

    fn subpath(&self, index: usize) -> Path {
        self.paths[index].clone()
    }

    fn index(&self, ctx: &Context) -> &Parameterizations {
        self.index.get_or_init(|| Parameterizations::new(self.paths.iter().map(|p| p.length(ctx))))
    }
}

/// How a [SequencePathBuilder] treats a path that does not start where the
/// previous path finished.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SequencePolicy {
    /// Reject the path.
    #[default]
    Fail,
    /// Insert a line segment across the gap.
    Join,
    /// Move the path so that it starts at the previous finish.
    Translate,
    /// Accept the path as it is.
    Ignore,
}

/// Accumulates the paths of a [SequencePath].
///
/// Points may be added too, but they must then be converted into paths with
/// one of the `as_` methods before further paths are added. Each conversion
/// starts from the finish of the last path, if there is one.
#[derive(Clone, Debug, Default)]
pub struct SequencePathBuilder {
    policy: SequencePolicy,
    paths: Vec<Path>,
    points: VecDeque<Point2d>,
    endpoint: Option<Point2d>,
}

impl SequencePathBuilder {
    pub fn with_policy(mut self, policy: SequencePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// The finish of the sequence so far.
    pub fn endpoint(&self) -> Option<Point2d> {
        self.endpoint
    }

    /// Points added but not yet converted into paths.
    pub fn remaining_points(&self) -> impl Iterator<Item = Point2d> + '_ {
        self.points.iter().copied()
    }

    fn check_no_points(&self) -> Result<()> {
        if self.points.is_empty() {
            Ok(())
        } else {
            Err(GeomError::InvalidArgument("points must be converted before paths are added"))
        }
    }

    fn push_path(&mut self, mut path: Path) -> Result<()> {
        if let Some(finish) = self.endpoint {
            let start = path.start();
            if finish != start {
                match self.policy {
                    SequencePolicy::Fail => return Err(GeomError::Disjoint { finish, start }),
                    SequencePolicy::Join => self.paths.push(LineSegment::between(finish, start).into()),
                    SequencePolicy::Translate => {
                        path = path.apply(&Transform::translation(finish - start)?)?;
                    }
                    SequencePolicy::Ignore => {}
                }
            }
        }
        self.endpoint = Some(path.finish());
        self.paths.push(path);
        Ok(())
    }

    pub fn add_path(mut self, path: Path) -> Result<Self> {
        self.check_no_points()?;
        self.push_path(path)?;
        Ok(self)
    }

    pub fn add_paths(mut self, paths: impl IntoIterator<Item = Path>) -> Result<Self> {
        self.check_no_points()?;
        for path in paths {
            self.push_path(path)?;
        }
        Ok(self)
    }

    pub fn add_point(mut self, pt: Point2d) -> Self {
        self.points.push_back(pt);
        self
    }

    pub fn add_points(mut self, points: impl IntoIterator<Item = Point2d>) -> Self {
        self.points.extend(points);
        self
    }

    fn available(&self) -> usize {
        self.points.len() + usize::from(self.endpoint.is_some())
    }

    fn take_first(&mut self) -> Option<Point2d> {
        match self.endpoint {
            Some(pt) => Some(pt),
            None => self.points.pop_front(),
        }
    }

    /// Converts the next point into a line segment.
    pub fn as_linear_path(mut self) -> Result<Self> {
        if self.available() < 2 {
            return Err(GeomError::InsufficientPoints("a line needs two points"));
        }
        let (Some(start), Some(finish)) = (self.take_first(), self.points.pop_front()) else {
            return Err(GeomError::InsufficientPoints("a line needs two points"));
        };
        if start == finish {
            self.endpoint = Some(start);
        } else {
            self.push_path(LineSegment::between(start, finish).into())?;
        }
        Ok(self)
    }

    /// Converts every remaining point into a run of line segments.
    pub fn as_linear_paths(mut self) -> Result<Self> {
        if self.available() < 2 {
            return Err(GeomError::InsufficientPoints("lines need two points"));
        }
        let Some(mut previous) = self.take_first() else {
            return Err(GeomError::InsufficientPoints("lines need two points"));
        };
        while let Some(next) = self.points.pop_front() {
            if next != previous {
                self.push_path(LineSegment::between(previous, next).into())?;
            }
            previous = next;
        }
        self.endpoint = Some(previous);
        Ok(self)
    }

    /// Converts every remaining point into one polygonal path.
    pub fn as_polygonal_path(mut self) -> Result<Self> {
        let polygon = PolygonalPath::builder()
            .add_points(self.endpoint)
            .add_points(self.points.drain(..))
            .build()?;
        self.push_path(polygon.into())?;
        Ok(self)
    }

    /// Converts the next `order` points into a Bézier curve.
    pub fn as_bezier_curve(mut self, order: usize) -> Result<Self> {
        if order < 1 {
            return Err(GeomError::InvalidArgument("a curve needs a positive order"));
        }
        if self.available() <= order {
            return Err(GeomError::InsufficientPoints("too few points for the curve order"));
        }
        if order == 1 {
            return self.as_linear_path();
        }
        let Some(first) = self.take_first() else {
            return Err(GeomError::InsufficientPoints("too few points for the curve order"));
        };
        let mut controls = Vec::with_capacity(order + 1);
        controls.push(first);
        controls.extend(self.points.drain(..order));
        if controls.iter().all(|&pt| pt == first) {
            self.endpoint = Some(first);
            return Ok(self);
        }
        self.push_path(BezierCurve::new(controls)?.into())?;
        Ok(self)
    }

    pub fn build(self) -> Result<SequencePath> {
        self.finish(false)
    }

    /// Joins the finish back to the start, then builds.
    pub fn close_and_build(self) -> Result<SequencePath> {
        self.finish(true)
    }

    fn finish(mut self, closed: bool) -> Result<SequencePath> {
        self.check_no_points()?;
        let Some(endpoint) = self.endpoint else {
            return Err(GeomError::InsufficientPoints("a sequence needs at least one path"));
        };
        if self.paths.is_empty() {
            // everything added had zero length
            self.paths.push(PointPath::at(endpoint, UNIT_X).into());
        } else if closed {
            let start = self.paths[0].start();
            if start != endpoint {
                self.push_path(LineSegment::between(endpoint, start).into())?;
            }
        }
        Ok(SequencePath::from_parts(self.paths, closed))
    }
}
