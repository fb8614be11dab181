use super::index::Parameterizations;
use super::{Composite, Path, Simplified, Trace};
use crate::math::{Point2d, Rect, Transform};
use crate::{Context, Result};
use once_cell::sync::OnceCell;

/// A path in two parts.
#[derive(Clone, Debug)]
pub struct SplitPath {
    first: Path,
    second: Path,
    index: OnceCell<Parameterizations>,
}

impl SplitPath {
    /// Joins two paths. Whether the second must start exactly where the first
    /// finishes is decided by the continuity tolerance and policy of the context.
    pub fn new(first: Path, second: Path, ctx: &Context) -> Result<Self> {
        ctx.check_continuity(first.finish(), second.start())?;
        Ok(Self::joined(first, second))
    }

    pub(crate) fn joined(first: Path, second: Path) -> Self {
        Self { first, second, index: OnceCell::new() }
    }

    pub fn first(&self) -> &Path {
        &self.first
    }

    pub fn second(&self) -> &Path {
        &self.second
    }
}

impl Trace for SplitPath {
    fn start(&self) -> Point2d {
        self.first.start()
    }

    fn finish(&self) -> Point2d {
        self.second.finish()
    }

    fn is_closed(&self) -> bool {
        self.start() == self.finish()
    }

    fn is_rectilinear(&self) -> bool {
        self.first.is_rectilinear() && self.second.is_rectilinear()
    }

    fn compute_length(&self, ctx: &Context) -> f64 {
        self.index(ctx).length()
    }

    fn compute_bounds(&self) -> Rect {
        self.first.bounds().union(&self.second.bounds())
    }

    fn simplify(&self, _this: &Path, _ctx: &Context) -> Simplified {
        Simplified::Split(self.first.clone(), self.second.clone())
    }

    fn reverse(&self, _this: &Path) -> Path {
        Self::joined(self.second.reverse(), self.first.reverse()).into()
    }

    fn apply(&self, _this: &Path, t: &Transform) -> Result<Path> {
        Ok(Self::joined(self.first.apply(t)?, self.second.apply(t)?).into())
    }
}

impl Composite for SplitPath {
    fn count(&self) -> usize {
        2
    }

    fn subpath(&self, index: usize) -> Path {
        if index == 0 {
            self.first.clone()
        } else {
            self.second.clone()
        }
    }

    fn index(&self, ctx: &Context) -> &Parameterizations {
        self.index
            .get_or_init(|| Parameterizations::new([self.first.length(ctx), self.second.length(ctx)]))
    }
}
