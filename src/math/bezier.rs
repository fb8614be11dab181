use super::{interpolate, is_finite, ParametricCurve2d, Point2d, Rect, Transform, Vector2d, UNIT_X};
use crate::{GeomError, Result};
use cgmath::prelude::*;
use smallvec::SmallVec;

type Points = SmallVec<[Point2d; 4]>;

/// A bezier curve of any order.
///
/// Evaluated with De Casteljau's algorithm, so that points, tangents and
/// subdivisions all come from the same triangular table of intermediate
/// control points.
#[derive(Clone, Debug, PartialEq)]
pub struct BezierCurve {
    points: Points,
}

impl BezierCurve {
    /// Creates a curve from its control points. The order is one less than
    /// the number of points.
    pub fn new(points: impl IntoIterator<Item = Point2d>) -> Result<Self> {
        let points: Points = points.into_iter().collect();
        if points.is_empty() {
            return Err(GeomError::InsufficientPoints("bezier curve needs a control point"));
        }
        if !points.iter().copied().all(is_finite) {
            return Err(GeomError::InvalidCoordinate("non-finite control point"));
        }
        Ok(Self { points })
    }

    /// A straight line as a first order curve.
    pub fn line(start: Point2d, finish: Point2d) -> Self {
        Self { points: smallvec::smallvec![start, finish] }
    }

    pub fn order(&self) -> usize {
        self.points.len() - 1
    }

    pub fn points(&self) -> &[Point2d] {
        &self.points
    }

    pub fn start(&self) -> Point2d {
        self.points[0]
    }

    pub fn finish(&self) -> Point2d {
        self.points[self.order()]
    }

    /// True if the curve is a point or a straight line.
    pub fn is_linear(&self) -> bool {
        self.order() <= 1
    }

    /// Reduces the control points to the two points of the penultimate row
    /// of the De Casteljau table.
    fn penultimate(&self, t: f64) -> (Point2d, Point2d) {
        let mut row = self.points.clone();
        while row.len() > 2 {
            for i in 0..row.len() - 1 {
                row[i] = interpolate(row[i], row[i + 1], t);
            }
            row.pop();
        }
        (row[0], row[row.len() - 1])
    }

    /// Returns the control points of the two curves either side of `t`.
    fn subdivide(&self, t: f64) -> (Points, Points) {
        let mut row = self.points.clone();
        let mut head = Points::new();
        let mut tail = Points::new();
        head.push(row[0]);
        tail.push(row[row.len() - 1]);
        while row.len() > 1 {
            for i in 0..row.len() - 1 {
                row[i] = interpolate(row[i], row[i + 1], t);
            }
            row.pop();
            head.push(row[0]);
            tail.push(row[row.len() - 1]);
        }
        tail.reverse();
        (head, tail)
    }

    /// The unit tangent at `t`.
    ///
    /// At the ends of the curve the tangent comes from the first control
    /// point that differs from the end point, so coincident control points do
    /// not produce a zero tangent.
    pub fn tangent_at(&self, t: f64) -> Vector2d {
        let n = self.order();
        if n == 0 {
            return UNIT_X;
        }
        if t <= 0.0 {
            let p0 = self.points[0];
            return self.points[1..]
                .iter()
                .map(|&p| p - p0)
                .find(|v| !v.is_zero())
                .map_or(UNIT_X, |v| v.normalize());
        }
        if t >= 1.0 {
            let pn = self.points[n];
            return self.points[..n]
                .iter()
                .rev()
                .map(|&p| pn - p)
                .find(|v| !v.is_zero())
                .map_or(UNIT_X, |v| v.normalize());
        }
        let (a, b) = self.penultimate(t);
        let v = b - a;
        if v.is_zero() {
            let chord = self.finish() - self.start();
            if chord.is_zero() {
                UNIT_X
            } else {
                chord.normalize()
            }
        } else {
            v.normalize()
        }
    }

    /// Splits the curve into two curves of the same order.
    pub fn split_at(&self, t: f64) -> (BezierCurve, BezierCurve) {
        let (head, tail) = self.subdivide(t.clamp(0.0, 1.0));
        (Self { points: head }, Self { points: tail })
    }

    /// The part of the curve between two parameters.
    pub fn segment(&self, t0: f64, t1: f64) -> BezierCurve {
        let (t0, t1) = (t0.clamp(0.0, 1.0), t1.clamp(0.0, 1.0));
        if t0 <= 0.0 {
            return self.split_at(t1).0;
        }
        if t0 >= 1.0 {
            return Self { points: smallvec::smallvec![self.finish(); self.points.len()] };
        }
        let (_, tail) = self.split_at(t0);
        tail.split_at((t1 - t0) / (1.0 - t0)).0
    }

    /// The hodograph: the curve of derivatives, one order lower.
    pub fn derivative(&self) -> BezierCurve {
        let n = self.order();
        if n == 0 {
            return Self { points: smallvec::smallvec![Point2d::origin()] };
        }
        let scale = n as f64;
        let points = self
            .points
            .windows(2)
            .map(|w| Point2d::from_vec((w[1] - w[0]) * scale))
            .collect();
        Self { points }
    }

    pub fn reversed(&self) -> BezierCurve {
        Self { points: self.points.iter().rev().copied().collect() }
    }

    pub fn transformed(&self, t: &Transform) -> BezierCurve {
        Self { points: self.points.iter().map(|&p| t.transform_point(p)).collect() }
    }

    /// The bounds of the control polygon, which contain the curve.
    pub fn control_bounds(&self) -> Rect {
        self.points
            .iter()
            .skip(1)
            .fold(Rect::at_point(self.points[0]), |r, &p| r.union(&Rect::at_point(p)))
    }
}

impl ParametricCurve2d for BezierCurve {
    fn sample(&self, t: f64) -> Point2d {
        if t <= 0.0 {
            return self.start();
        }
        if t >= 1.0 {
            return self.finish();
        }
        match self.order() {
            0 => self.start(),
            1 => interpolate(self.points[0], self.points[1], t),
            _ => {
                let (a, b) = self.penultimate(t);
                interpolate(a, b, t)
            }
        }
    }

    fn sample_dt(&self, t: f64) -> Vector2d {
        match self.order() {
            0 => Vector2d::zero(),
            n => {
                let (a, b) = self.penultimate(t.clamp(0.0, 1.0));
                (b - a) * n as f64
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use rand::prelude::*;

    fn random_curve(rng: &mut StdRng, order: usize) -> BezierCurve {
        BezierCurve::new((0..=order).map(|_| {
            Point2d::new(rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0))
        }))
        .unwrap()
    }

    #[test]
    fn end_points_are_exact() {
        let mut rng = StdRng::from_seed(*b"bezier end points are exact!!!!!");
        for order in 0..8 {
            let curve = random_curve(&mut rng, order);
            assert_eq!(curve.sample(0.0), curve.points()[0]);
            assert_eq!(curve.sample(1.0), curve.points()[order]);
        }
    }

    #[test]
    fn split_halves_meet() {
        let mut rng = StdRng::from_seed(*b"split halves meet at the split!!");
        for order in 1..6 {
            let curve = random_curve(&mut rng, order);
            let t = rng.gen_range(0.05..0.95);
            let (a, b) = curve.split_at(t);
            let p = curve.sample(t);
            assert_eq!(a.finish(), b.start());
            assert_approx_eq!(a.finish().x, p.x, 1e-9);
            assert_approx_eq!(a.finish().y, p.y, 1e-9);
            let q = curve.sample(t + 0.5 * (1.0 - t));
            let r = b.sample(0.5);
            assert_approx_eq!(q.x, r.x, 1e-9);
            assert_approx_eq!(q.y, r.y, 1e-9);
        }
    }

    #[test]
    fn segment_matches_curve() {
        let curve = BezierCurve::new([
            Point2d::new(0.0, 0.0),
            Point2d::new(0.0, 10.0),
            Point2d::new(10.0, 10.0),
            Point2d::new(10.0, 0.0),
        ])
        .unwrap();
        let seg = curve.segment(0.25, 0.75);
        for (s, t) in [(0.0, 0.25), (0.5, 0.5), (1.0, 0.75)] {
            let (a, b) = (seg.sample(s), curve.sample(t));
            assert_approx_eq!(a.x, b.x, 1e-9);
            assert_approx_eq!(a.y, b.y, 1e-9);
        }
    }

    #[test]
    fn hodograph_matches_derivative() {
        let mut rng = StdRng::from_seed(*b"the hodograph is the derivative!");
        let curve = random_curve(&mut rng, 4);
        let hodograph = curve.derivative();
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            let d = curve.sample_dt(t);
            let h = hodograph.sample(t);
            assert_approx_eq!(d.x, h.x, 1e-9);
            assert_approx_eq!(d.y, h.y, 1e-9);
        }
    }

    #[test]
    fn end_tangents_skip_coincident_controls() {
        let curve = BezierCurve::new([
            Point2d::new(0.0, 0.0),
            Point2d::new(0.0, 0.0),
            Point2d::new(0.0, 5.0),
            Point2d::new(5.0, 5.0),
        ])
        .unwrap();
        assert_eq!(curve.tangent_at(0.0), Vector2d::new(0.0, 1.0));
        assert_eq!(curve.tangent_at(1.0), Vector2d::new(1.0, 0.0));
        assert_eq!(curve.reversed().tangent_at(1.0), Vector2d::new(0.0, -1.0));
    }

    #[test]
    fn empty_curves_are_rejected() {
        assert!(BezierCurve::new(Vec::new()).is_err());
    }
}
