use super::ParametricCurve2d;
use cgmath::prelude::*;

/// Approximates the arc length of a curve between two parameters.
///
/// Integrates the speed of the curve with Simpson's rule over `steps`
/// intervals, rounded up to an even number.
pub fn arc_length(curve: &impl ParametricCurve2d, t0: f64, t1: f64, steps: usize) -> f64 {
    if t0 == t1 {
        return 0.0;
    }
    let n = (steps.max(2) + 1) & !1;
    let h = (t1 - t0) / n as f64;
    let speed = |t: f64| curve.sample_dt(t).magnitude();
    let inner: f64 = (1..n)
        .map(|i| {
            let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
            weight * speed(t0 + h * i as f64)
        })
        .sum();
    (speed(t0) + inner + speed(t1)) * h / 3.0
}

/// Finds the parameter at which the arc length from the start of the curve
/// reaches `length`.
///
/// Bisects the domain `iterations` times, integrating each probe with
/// [arc_length]. Lengths outside the curve clamp to the ends of the domain.
pub fn parameter_at_length(
    curve: &impl ParametricCurve2d,
    length: f64,
    steps: usize,
    iterations: usize,
) -> f64 {
    let domain = curve.domain();
    if length <= 0.0 {
        return domain.min;
    }
    let (mut lo, mut hi) = (domain.min, domain.max);
    let mut lo_length = 0.0;
    for _ in 0..iterations {
        let mid = 0.5 * (lo + hi);
        let mid_length = lo_length + arc_length(curve, lo, mid, steps);
        if mid_length < length {
            lo = mid;
            lo_length = mid_length;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::{LineSegment, Point2d, Vector2d};
    use assert_approx_eq::assert_approx_eq;

    struct Parabola;

    impl ParametricCurve2d for Parabola {
        fn sample(&self, t: f64) -> Point2d {
            Point2d::new(t, t * t)
        }

        fn sample_dt(&self, t: f64) -> Vector2d {
            Vector2d::new(1.0, 2.0 * t)
        }
    }

    #[test]
    fn line_length_is_exact() {
        for i in 1..20 {
            let len = 0.5 * i as f64;
            let segment = LineSegment::from_vector(Point2d::new(10.0, 10.0), Vector2d::new(len, 0.0))
                .unwrap();
            assert_approx_eq!(arc_length(&segment, 0.0, 1.0, 4), len);
        }
    }

    #[test]
    fn parabola_length_converges() {
        // closed form for y = x^2 on [0, 1]
        let exact = 0.5 * 5f64.sqrt() + 0.25 * (2.0 + 5f64.sqrt()).ln();
        assert_approx_eq!(arc_length(&Parabola, 0.0, 1.0, 40), exact, 1e-4);
    }

    #[test]
    pub fn parameter_at_length_inverts_arc_length() {
        for i in 0..=10 {
            let t = 0.1 * i as f64;
            let length = arc_length(&Parabola, 0.0, t, 40);
            assert_approx_eq!(parameter_at_length(&Parabola, length, 40, 30), t, 1e-4);
        }
    }

    #[test]
    fn out_of_range_lengths_clamp() {
        assert_eq!(parameter_at_length(&Parabola, -1.0, 10, 10), 0.0);
        assert_approx_eq!(parameter_at_length(&Parabola, 10.0, 10, 30), 1.0, 1e-6);
    }
}
