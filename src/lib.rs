//! A 2D vector geometry kernel.
//!
//! Paths are built from line segments, Bézier curves, elliptical arcs,
//! spirals, offset curves, polygons and rectangles, and can be composed into
//! sequences. Every path can be evaluated by its intrinsic parameter or by
//! arc length, linearized for display, and queried for intersections,
//! nearest points and winding numbers.
//!
//! Numeric thresholds are supplied by an explicit [Context], which every
//! tolerance sensitive operation takes as an argument.

pub use cgmath;
pub use context::{Context, Policy, Tolerances, TolerancesBuilder};
pub use contour::{Contour, Shape, WindingRule};
pub use helper::{Bounder, Intersector, Locator, Measurer, PointConsumer, Winder};
pub use math::{Point2d, Vector2d};
pub use path::{
    Corner, Displacement, Location, OffsetCurve, Parameterization, Path, PathKind, PointPath,
    PolygonalPath, PolygonalPathBuilder, RectPath, SequencePath, SequencePathBuilder,
    SequencePolicy, Simplified, SplitPath,
};
pub use util::Interval;

mod context;
mod contour;
mod helper;
pub mod math;
mod path;
mod util;

/// Result type for geometric operations.
pub type Result<T> = std::result::Result<T, GeomError>;

/// The errors raised when constructing or querying geometry.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum GeomError {
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(&'static str),

    #[error("points are coincident")]
    CoincidentPoints,

    #[error("zero vector: {0}")]
    ZeroVector(&'static str),

    #[error("transform is not invertible")]
    NonInvertible,

    #[error("invalid transform: {0}")]
    InvalidTransform(&'static str),

    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("invalid tolerance: {0}")]
    InvalidTolerance(&'static str),

    #[error("insufficient points: {0}")]
    InsufficientPoints(&'static str),

    #[error("path finishing at {finish:?} does not meet path starting at {start:?}")]
    Disjoint { finish: Point2d, start: Point2d },

    #[error("discontinuity between {finish:?} and {start:?}")]
    Discontinuous { finish: Point2d, start: Point2d },

    #[error("path has corners")]
    NotSmooth,

    #[error("path is not closed")]
    OpenContour,

    #[error("transform is not rectilinear preserving")]
    NotRectilinearPreserving,

    #[error("location belongs to a different path")]
    MismatchedPath,

    #[error("no context to exit")]
    NoContextToExit,

    #[error("not supported: {0}")]
    Unsupported(&'static str),
}
