//! Miscellaneous utility structs and functions.

use std::fmt::Debug;

use cgmath::num_traits::Float;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An interval on the real number line.
///
/// The bounds are not required to be ordered: a reversed interval
/// interpolates from `min` down to `max`, which is how reversed
/// parameter ranges are represented.
#[derive(Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Interval<T> {
    pub min: T,
    pub max: T,
}

impl<T> Interval<T> {
    /// Creates a new interval.
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<T: std::ops::Sub<T, Output = T> + Copy> Interval<T> {
    /// Gets the magnitude of the interval.
    pub fn length(&self) -> T {
        self.max - self.min
    }
}

impl<T: Copy> Interval<T> {
    /// Swaps the ends of the interval.
    pub fn reversed(&self) -> Self {
        Self::new(self.max, self.min)
    }
}

impl<T: Float> Interval<T> {
    /// Clamps a value so that it lies within the interval.
    pub fn clamp(&self, value: T) -> T {
        if value <= self.min {
            self.min
        } else if value >= self.max {
            self.max
        } else {
            value
        }
    }

    /// Returns true if the interval contains no more than a single value.
    pub fn is_zero_size(&self) -> bool {
        self.min == self.max
    }

    /// Maps `t` in `[0, 1]` onto the interval.
    pub fn lerp(&self, t: T) -> T {
        self.min + t * (self.max - self.min)
    }

    /// Maps a value in the interval back onto `[0, 1]`.
    pub fn inv_lerp(&self, value: T) -> T {
        (value - self.min) / (self.max - self.min)
    }

    /// The sub-interval which `[0, 1]`'s sub-interval `t` maps onto.
    pub fn subinterval(&self, t: Interval<T>) -> Self {
        Self::new(self.lerp(t.min), self.lerp(t.max))
    }
}

impl<T: Float> std::ops::Mul<T> for Interval<T> {
    type Output = Interval<T>;

    fn mul(self, rhs: T) -> Self::Output {
        if rhs < T::zero() {
            Self::new(self.max * rhs, self.min * rhs)
        } else {
            Self::new(self.min * rhs, self.max * rhs)
        }
    }
}

impl<T: Debug> Debug for Interval<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Interval({:?}, {:?})", &self.min, &self.max)
    }
}
