use super::{Point2d, Vector2d};
use crate::{GeomError, Result};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A member of the Lp family of norms on the plane.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Norm {
    /// The taxicab norm.
    L1,
    /// The Euclidean norm.
    L2,
    /// The maximum norm.
    Linf,
    /// The general norm for `1 < p < ∞`, excluding 2.
    Lp(f64),
}

impl Default for Norm {
    fn default() -> Self {
        Norm::L2
    }
}

impl Norm {
    /// Creates the Lp norm for the given `p`.
    ///
    /// Returns one of the named norms when `p` is 1, 2 or infinite.
    pub fn lp(p: f64) -> Result<Self> {
        if p.is_nan() || p < 1.0 {
            return Err(GeomError::InvalidArgument("norm exponent less than 1"));
        }
        Ok(if p == 1.0 {
            Norm::L1
        } else if p == 2.0 {
            Norm::L2
        } else if p == f64::INFINITY {
            Norm::Linf
        } else {
            Norm::Lp(p)
        })
    }

    /// The magnitude of a vector under this norm.
    pub fn magnitude(&self, v: Vector2d) -> f64 {
        let (x, y) = (v.x.abs(), v.y.abs());
        match *self {
            Norm::L1 => x + y,
            Norm::L2 => {
                if x == 0.0 {
                    y
                } else if y == 0.0 {
                    x
                } else {
                    x.hypot(y)
                }
            }
            Norm::Linf => x.max(y),
            Norm::Lp(p) => {
                if x == 0.0 {
                    y
                } else if y == 0.0 {
                    x
                } else {
                    (x.powf(p) + y.powf(p)).powf(1.0 / p)
                }
            }
        }
    }

    /// The magnitude raised to the power of the norm, which avoids the root.
    ///
    /// For [Norm::Linf] this is zero for the zero vector and infinite otherwise.
    pub fn pow_magnitude(&self, v: Vector2d) -> f64 {
        let (x, y) = (v.x.abs(), v.y.abs());
        match *self {
            Norm::L1 => x + y,
            Norm::L2 => x * x + y * y,
            Norm::Linf => {
                if x == 0.0 && y == 0.0 {
                    0.0
                } else {
                    f64::INFINITY
                }
            }
            Norm::Lp(p) => x.powf(p) + y.powf(p),
        }
    }

    /// The distance between two points.
    pub fn distance_between(&self, a: Point2d, b: Point2d) -> f64 {
        self.magnitude(a - b)
    }

    /// The distance between two points, raised to the power of the norm.
    pub fn pow_distance_between(&self, a: Point2d, b: Point2d) -> f64 {
        self.pow_magnitude(a - b)
    }

    /// Scales a vector to unit magnitude under this norm.
    ///
    /// The zero vector is returned unchanged.
    pub fn normalize(&self, v: Vector2d) -> Vector2d {
        let m = self.magnitude(v);
        if m == 0.0 {
            v
        } else {
            v / m
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn named_norms_are_canonical() {
        assert_eq!(Norm::lp(1.0).unwrap(), Norm::L1);
        assert_eq!(Norm::lp(2.0).unwrap(), Norm::L2);
        assert_eq!(Norm::lp(f64::INFINITY).unwrap(), Norm::Linf);
        assert_eq!(Norm::lp(3.0).unwrap(), Norm::Lp(3.0));
        assert!(Norm::lp(0.5).is_err());
    }

    #[test]
    fn magnitudes() {
        let v = Vector2d::new(-3.0, 4.0);
        assert_approx_eq!(Norm::L1.magnitude(v), 7.0);
        assert_approx_eq!(Norm::L2.magnitude(v), 5.0);
        assert_approx_eq!(Norm::Linf.magnitude(v), 4.0);
        assert_approx_eq!(Norm::Lp(3.0).magnitude(v), 91f64.powf(1.0 / 3.0));
        assert_approx_eq!(Norm::L2.pow_magnitude(v), 25.0);
    }

    #[test]
    fn normalize_under_norm() {
        let v = Norm::L1.normalize(Vector2d::new(2.0, -2.0));
        assert_approx_eq!(Norm::L1.magnitude(v), 1.0);
        assert_eq!(Norm::L2.normalize(Vector2d::new(0.0, 0.0)), Vector2d::new(0.0, 0.0));
    }
}
