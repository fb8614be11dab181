use crate::math::{midpoint, LineSegment, Norm, Point2d, Vector2d};
use crate::{GeomError, Path, PathKind, Result};
use cgmath::prelude::*;
use log::{error, warn};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a context responds to a tolerance violation, such as joining two
/// paths whose ends do not quite meet.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Policy {
    /// The violation is silently accepted.
    Ignore,
    /// The violation is accepted and a warning is logged.
    LogMessage,
    /// The violation is accepted and logged as an error.
    LogException,
    /// The violation is returned as an error.
    ThrowException,
}

/// The numeric thresholds used by tolerance sensitive algorithms.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tolerances {
    iteration_steps: usize,
    quadrature_steps: usize,
    differential: f64,
    continuity_tolerance: f64,
    split_recursion_limit: usize,
    corner_tolerance: f64,
    shortest_non_linear_curve: f64,
    least_non_linear_deviation: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            iteration_steps: 20,
            quadrature_steps: 20,
            differential: 0.001,
            continuity_tolerance: 1.0,
            split_recursion_limit: 20,
            corner_tolerance: 0.005,
            shortest_non_linear_curve: 1.0,
            least_non_linear_deviation: 0.05,
        }
    }
}

impl Tolerances {
    /// A builder initialized with these tolerances.
    pub fn builder(&self) -> TolerancesBuilder {
        TolerancesBuilder { tolerances: *self }
    }

    /// Bisection steps used to invert arc length.
    pub fn iteration_steps(&self) -> usize {
        self.iteration_steps
    }

    /// Intervals used to integrate arc length.
    pub fn quadrature_steps(&self) -> usize {
        self.quadrature_steps
    }

    /// Parameter step used to estimate tangents numerically.
    pub fn differential(&self) -> f64 {
        self.differential
    }

    /// Greatest distance between two points considered to be joined.
    pub fn continuity_tolerance(&self) -> f64 {
        self.continuity_tolerance
    }

    /// Deepest subdivision of a curve before it is taken as its chord.
    pub fn split_recursion_limit(&self) -> usize {
        self.split_recursion_limit
    }

    /// Greatest difference from 1 of the dot product of two unit tangents
    /// that are not considered a corner.
    pub fn corner_tolerance(&self) -> f64 {
        self.corner_tolerance
    }

    /// Curves with chords shorter than this are always linear.
    pub fn shortest_non_linear_curve(&self) -> f64 {
        self.shortest_non_linear_curve
    }

    /// Midpoint deviation from the chord, as a proportion of the chord
    /// length, below which a curve is linear.
    pub fn least_non_linear_deviation(&self) -> f64 {
        self.least_non_linear_deviation
    }
}

/// Builds validated [Tolerances].
#[derive(Clone, Debug, Default)]
pub struct TolerancesBuilder {
    tolerances: Tolerances,
}

impl TolerancesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iteration_steps(mut self, steps: usize) -> Self {
        self.tolerances.iteration_steps = steps;
        self
    }

    pub fn quadrature_steps(mut self, steps: usize) -> Self {
        self.tolerances.quadrature_steps = steps;
        self
    }

    pub fn differential(mut self, differential: f64) -> Self {
        self.tolerances.differential = differential;
        self
    }

    pub fn continuity_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerances.continuity_tolerance = tolerance;
        self
    }

    pub fn split_recursion_limit(mut self, limit: usize) -> Self {
        self.tolerances.split_recursion_limit = limit;
        self
    }

    pub fn corner_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerances.corner_tolerance = tolerance;
        self
    }

    pub fn shortest_non_linear_curve(mut self, length: f64) -> Self {
        self.tolerances.shortest_non_linear_curve = length;
        self
    }

    pub fn least_non_linear_deviation(mut self, deviation: f64) -> Self {
        self.tolerances.least_non_linear_deviation = deviation;
        self
    }

    pub fn build(self) -> Result<Tolerances> {
        let t = self.tolerances;
        if t.iteration_steps < 1 {
            return Err(GeomError::InvalidTolerance("iteration steps"));
        }
        if t.quadrature_steps < 1 {
            return Err(GeomError::InvalidTolerance("quadrature steps"));
        }
        if t.split_recursion_limit < 1 {
            return Err(GeomError::InvalidTolerance("split recursion limit"));
        }
        if t.differential.is_nan() || t.differential <= 0.0 {
            return Err(GeomError::InvalidTolerance("differential"));
        }
        if t.shortest_non_linear_curve.is_nan() || t.shortest_non_linear_curve <= 0.0 {
            return Err(GeomError::InvalidTolerance("shortest non-linear curve"));
        }
        if t.least_non_linear_deviation.is_nan() || t.least_non_linear_deviation <= 0.0 {
            return Err(GeomError::InvalidTolerance("least non-linear deviation"));
        }
        if t.continuity_tolerance.is_nan() || t.continuity_tolerance < 0.0 {
            return Err(GeomError::InvalidTolerance("continuity tolerance"));
        }
        if t.corner_tolerance.is_nan() || t.corner_tolerance < 0.0 {
            return Err(GeomError::InvalidTolerance("corner tolerance"));
        }
        Ok(t)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct Frame {
    tolerances: Tolerances,
    policy: Policy,
}

/// The configuration in force for geometric algorithms.
///
/// A context is a stack of frames, each holding [Tolerances] and a
/// [Policy]. Entering a context pushes a frame that overrides some or all of
/// its parent's values; exiting pops it again. The root frame can never be
/// exited. Algorithms read the top frame whenever they are invoked.
#[derive(Clone, Debug)]
pub struct Context {
    frames: Vec<Frame>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new(Tolerances::default(), Policy::ThrowException)
    }
}

impl Context {
    pub fn new(tolerances: Tolerances, policy: Policy) -> Self {
        Self { frames: vec![Frame { tolerances, policy }] }
    }

    fn top(&self) -> &Frame {
        // the root frame is never popped
        &self.frames[self.frames.len() - 1]
    }

    pub fn tolerances(&self) -> &Tolerances {
        &self.top().tolerances
    }

    pub fn policy(&self) -> Policy {
        self.top().policy
    }

    /// The number of frames entered above the root.
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    /// Pushes a frame. Values which are not given are inherited.
    pub fn enter(&mut self, tolerances: Option<Tolerances>, policy: Option<Policy>) -> &mut Self {
        let top = *self.top();
        self.frames.push(Frame {
            tolerances: tolerances.unwrap_or(top.tolerances),
            policy: policy.unwrap_or(top.policy),
        });
        self
    }

    /// Pops the most recently entered frame.
    pub fn exit(&mut self) -> Result<&mut Self> {
        if self.frames.len() == 1 {
            return Err(GeomError::NoContextToExit);
        }
        self.frames.pop();
        Ok(self)
    }

    /// Runs a closure with a frame pushed for its duration.
    pub fn scoped<R>(
        &mut self,
        tolerances: Option<Tolerances>,
        policy: Option<Policy>,
        f: impl FnOnce(&Context) -> R,
    ) -> R {
        self.enter(tolerances, policy);
        let result = f(self);
        self.frames.pop();
        result
    }

    /// Reports a tolerance violation according to the policy.
    pub fn report(&self, err: GeomError) -> Result<()> {
        match self.policy() {
            Policy::Ignore => Ok(()),
            Policy::LogMessage => {
                warn!("{}", err);
                Ok(())
            }
            Policy::LogException => {
                error!("{:?}: {}", err, err);
                Ok(())
            }
            Policy::ThrowException => Err(err),
        }
    }

    /// True if two points are within the continuity tolerance of each other.
    pub fn is_continuous(&self, p1: Point2d, p2: Point2d) -> bool {
        let tolerance = self.tolerances().continuity_tolerance;
        if tolerance == 0.0 {
            p1 == p2
        } else {
            Norm::L2.pow_distance_between(p1, p2) <= tolerance * tolerance
        }
    }

    /// Checks that a path finishing at `finish` may be joined to one starting
    /// at `start`, applying the policy if it may not.
    pub fn check_continuity(&self, finish: Point2d, start: Point2d) -> Result<()> {
        if self.policy() == Policy::Ignore || self.is_continuous(finish, start) {
            return Ok(());
        }
        self.report(GeomError::Discontinuous { finish, start })
    }

    /// True if two unit tangents meet at a corner.
    pub fn is_corner(&self, v1: Vector2d, v2: Vector2d) -> bool {
        let tolerance = self.tolerances().corner_tolerance;
        if tolerance == 0.0 {
            v1 != v2
        } else {
            (1.0 - v1.dot(v2)).abs() > tolerance
        }
    }

    /// True if a curve with these end points, which passes through `halfway`
    /// at its midpoint parameter, is close enough to its chord to be treated
    /// as a line.
    pub fn is_approx_linear(&self, start: Point2d, finish: Point2d, halfway: Point2d) -> bool {
        let t = self.tolerances();
        let length = Norm::L2.pow_distance_between(start, finish);
        if length < t.shortest_non_linear_curve * t.shortest_non_linear_curve {
            return true;
        }
        let dist = Norm::L2.pow_distance_between(midpoint(start, finish), halfway);
        dist / length < t.least_non_linear_deviation * t.least_non_linear_deviation
    }

    /// Replaces a path with a line or point if it is close enough to one.
    pub fn simplify(&self, path: &Path) -> Path {
        if matches!(path.kind(), PathKind::Linear(_) | PathKind::Point(_)) {
            return path.clone();
        }
        let (start, finish) = (path.start(), path.finish());
        let intrinsic = path.by_intrinsic(self);
        if start == finish {
            return intrinsic.point_tangent_at(0.0).into();
        }
        let halfway = intrinsic.point_at(0.5);
        if self.is_approx_linear(start, finish, halfway) {
            if let Ok(segment) = LineSegment::from_points(start, finish) {
                return segment.into();
            }
        }
        path.clone()
    }
}
