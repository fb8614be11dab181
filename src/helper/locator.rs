use super::decompose;
use crate::math::{Norm, Point2d};
use crate::{Context, Path, Simplified};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Finds the point of a path nearest to a fixed point.
///
/// The path is decomposed best first: the part whose bounds lie closest to
/// the point is always decomposed next, and parts whose bounds lie further
/// away than some other part's furthest corner, or than the best point found
/// so far, are never decomposed at all.
#[derive(Clone, Copy, Debug)]
pub struct Locator {
    pt: Point2d,
}

/// A part of the path still to be searched.
struct Candidate {
    /// Squared distance to the nearest point of the part's bounds.
    lower: f64,
    path: Path,
    /// Length of the path before this part.
    offset: f64,
    depth: usize,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // nearest first
        other.lower.total_cmp(&self.lower).then_with(|| other.offset.total_cmp(&self.offset))
    }
}

/// The best point found so far.
#[derive(Clone, Copy, Debug)]
struct Nearest {
    distance: f64,
    length: f64,
    point: Point2d,
}

impl Locator {
    pub fn new(pt: Point2d) -> Self {
        Self { pt }
    }

    pub fn point(&self) -> Point2d {
        self.pt
    }

    /// The distance along the path to the point of the path nearest to the
    /// locator's point. Of several equally near points, the first is chosen.
    pub fn locate(&self, path: &Path, ctx: &Context) -> f64 {
        self.search(path, ctx).length
    }

    /// The point of the path nearest to the locator's point.
    pub fn nearest_point(&self, path: &Path, ctx: &Context) -> Point2d {
        self.search(path, ctx).point
    }

    /// The distance from the locator's point to the path.
    pub fn distance_to(&self, path: &Path, ctx: &Context) -> f64 {
        self.search(path, ctx).distance.sqrt()
    }

    fn candidate(&self, path: Path, offset: f64, depth: usize) -> (Candidate, f64) {
        let bounds = path.bounds();
        let lower = Norm::L2.pow_distance_between(self.pt, bounds.nearest_point_to(self.pt, false));
        let upper = Norm::L2.pow_distance_between(self.pt, bounds.furthest_point_to(self.pt));
        (Candidate { lower, path, offset, depth }, upper)
    }

    fn search(&self, path: &Path, ctx: &Context) -> Nearest {
        let mut best = Nearest { distance: f64::INFINITY, length: 0.0, point: path.start() };
        let (root, mut upper) = self.candidate(path.clone(), 0.0, 0);
        let mut queue = BinaryHeap::from([root]);
        while let Some(c) = queue.pop() {
            if c.lower > best.distance {
                break;
            }
            match decompose(&c.path, c.depth, ctx) {
                (Simplified::Linear(segment), _) => {
                    let t = segment.nearest_param(self.pt);
                    let point = segment.interpolate(t);
                    let distance = Norm::L2.pow_distance_between(self.pt, point);
                    // approximate for a curve cut off at the recursion limit:
                    // t runs along its chord, not its arc
                    let length = c.offset + t * c.path.length(ctx);
                    if distance < best.distance || (distance == best.distance && length < best.length) {
                        best = Nearest { distance, length, point };
                        upper = upper.min(distance);
                    }
                }
                (Simplified::Split(first, second), depth) => {
                    let offset = c.offset + first.length(ctx);
                    for (part, offset) in [(first, c.offset), (second, offset)] {
                        let (candidate, bound) = self.candidate(part, offset, depth);
                        if candidate.lower <= upper {
                            upper = upper.min(bound);
                            queue.push(candidate);
                        }
                    }
                }
            }
        }
        best
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::{BezierCurve, Ellipse, LineSegment, Rect};
    use crate::{PolygonalPath, RectPath};
    use assert_approx_eq::assert_approx_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Path {
        LineSegment::from_points(Point2d::new(x1, y1), Point2d::new(x2, y2)).unwrap().into()
    }

    #[test]
    fn nearest_point_on_a_line() {
        let ctx = Context::default();
        let path = line(0.0, 0.0, 10.0, 0.0);
        let locator = Locator::new(Point2d::new(3.0, 5.0));
        assert_approx_eq!(locator.locate(&path, &ctx), 3.0);
        assert_eq!(locator.nearest_point(&path, &ctx), Point2d::new(3.0, 0.0));
        assert_approx_eq!(locator.distance_to(&path, &ctx), 5.0);
        assert_eq!(Locator::new(Point2d::new(-4.0, 1.0)).locate(&path, &ctx), 0.0);
        assert_approx_eq!(Locator::new(Point2d::new(14.0, 1.0)).locate(&path, &ctx), 10.0);
    }

    #[test]
    fn lengths_accumulate_over_parts() {
        let ctx = Context::default();
        let polygon: Path = PolygonalPath::builder()
            .add_points([
                Point2d::new(0.0, 0.0),
                Point2d::new(4.0, 0.0),
                Point2d::new(4.0, 3.0),
                Point2d::new(0.0, 3.0),
                Point2d::new(0.0, 10.0),
            ])
            .build()
            .unwrap()
            .into();
        assert_approx_eq!(Locator::new(Point2d::new(5.0, 1.0)).locate(&polygon, &ctx), 5.0);
        assert_approx_eq!(Locator::new(Point2d::new(1.0, 3.5)).locate(&polygon, &ctx), 10.0);
        assert_approx_eq!(Locator::new(Point2d::new(-1.0, 8.0)).locate(&polygon, &ctx), 16.0);
    }

    #[test]
    fn closed_paths_prefer_their_start() {
        let ctx = Context::default();
        let rect: Path = RectPath::new(Rect::new(0.0, 0.0, 2.0, 2.0).unwrap(), true).into();
        assert_eq!(Locator::new(Point2d::new(-1.0, -1.0)).locate(&rect, &ctx), 0.0);
        assert_approx_eq!(Locator::new(Point2d::new(1.0, 2.5)).locate(&rect, &ctx), 5.0);
    }

    #[test]
    fn points_near_a_circle() {
        let ctx = Context::default();
        let circle: Path =
            Ellipse::from_radius(Point2d::new(0.0, 0.0), 10.0).unwrap().complete_arc().into();
        let length = circle.length(&ctx);
        let s = Locator::new(Point2d::new(0.0, 20.0)).locate(&circle, &ctx);
        assert_approx_eq!(s / length, 0.25, 0.01);
        let pt = Locator::new(Point2d::new(-3.0, 0.0)).nearest_point(&circle, &ctx);
        assert_approx_eq!(pt.x, -10.0, 0.1);
    }

    #[test]
    fn matches_exhaustive_search() {
        let ctx = Context::default();
        let curve: Path = BezierCurve::new([
            Point2d::new(0.0, 0.0),
            Point2d::new(30.0, 60.0),
            Point2d::new(70.0, -40.0),
            Point2d::new(100.0, 20.0),
        ])
        .unwrap()
        .into();
        let vertices = curve.linearized(&ctx);
        let mut rng = StdRng::from_seed(*b"a nearest point on every curve!!");
        for _ in 0..50 {
            let pt = Point2d::new(rng.gen_range(-20.0..120.0), rng.gen_range(-50.0..70.0));
            let nearest = Locator::new(pt).distance_to(&curve, &ctx);
            let exhaustive = vertices
                .windows(2)
                .map(|w| LineSegment::between(w[0], w[1]).nearest_point_to(pt))
                .map(|p| Norm::L2.distance_between(pt, p))
                .fold(f64::INFINITY, f64::min);
            assert_approx_eq!(nearest, exhaustive, 1.0);
        }
    }
}
