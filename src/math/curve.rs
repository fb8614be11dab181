use super::{Point2d, Vector2d};
use crate::util::Interval;
pub use algorithms::{arc_length, parameter_at_length};

mod algorithms;

/// A parametric curve in 2D space.
pub trait ParametricCurve2d {
    /// Samples the parametric curve.
    fn sample(&self, t: f64) -> Point2d;

    /// Returns the minimum and maximum t-values over which the curve is defined.
    fn domain(&self) -> Interval<f64> {
        Interval::new(0.0, 1.0)
    }

    /// Samples the derivative of the parametric curve.
    ///
    /// The default implementation approximates the derivative by sampling
    /// two very nearby points along the curve.
    fn sample_dt(&self, t: f64) -> Vector2d {
        let domain = self.domain();
        let delta = domain.length() * 0.0001;
        // step backwards at the end of the domain
        let (t1, t2) = if t + delta > domain.max { (t - delta, t) } else { (t, t + delta) };
        (self.sample(t2) - self.sample(t1)) / delta
    }
}

impl<T: ParametricCurve2d + ?Sized> ParametricCurve2d for &T {
    fn sample(&self, t: f64) -> Point2d {
        (**self).sample(t)
    }

    fn domain(&self) -> Interval<f64> {
        (**self).domain()
    }

    fn sample_dt(&self, t: f64) -> Vector2d {
        (**self).sample_dt(t)
    }
}
