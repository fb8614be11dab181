//! Consumers of linearized paths and the query engines built on path
//! decomposition.

use crate::math::{Point2d, Rect};
use crate::{Context, Path, Simplified};
use log::debug;

pub use bounder::Bounder;
pub use intersector::Intersector;
pub use locator::Locator;
pub use measurer::Measurer;
pub use winder::Winder;

mod bounder;
mod intersector;
mod locator;
mod measurer;
mod winder;

/// A sink for a stream of points.
pub trait PointConsumer {
    fn add_point(&mut self, pt: Point2d);
}

impl PointConsumer for Vec<Point2d> {
    fn add_point(&mut self, pt: Point2d) {
        self.push(pt);
    }
}

impl<C: PointConsumer + ?Sized> PointConsumer for &mut C {
    fn add_point(&mut self, pt: Point2d) {
        (**self).add_point(pt);
    }
}

/// Decomposes a path by one step, where `depth` counts the curve splits
/// made so far. Returns the parts along with the depth of any split parts.
///
/// A curve reached at the recursion limit is taken as its chord.
fn decompose(path: &Path, depth: usize, ctx: &Context) -> (Simplified, usize) {
    if !path.is_curve() {
        return (path.simplify(ctx), depth);
    }
    if depth >= ctx.tolerances().split_recursion_limit() {
        debug!("curve decomposition stopped at depth {}", depth);
        return (Simplified::Linear(path.chord(ctx)), depth);
    }
    (path.simplify(ctx), depth + 1)
}

/// True if the rectangles overlap or touch.
fn touches(a: &Rect, b: &Rect) -> bool {
    a.min_x <= b.max_x && b.min_x <= a.max_x && a.min_y <= b.max_y && b.min_y <= a.max_y
}
