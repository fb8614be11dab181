use super::curve::Sampled;
use super::{
    Composite, Corner, Form, Location, Path, PathKind, PointPath, RectPath, SequencePath, Simple,
};
use crate::math::{arc_length, parameter_at_length, Point2d, Vector2d};
use crate::{Context, GeomError, Result};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Domain {
    Intrinsic,
    Length,
}

/// Conversion between the intrinsic parameter of a simple path and the arc
/// length along it.
pub(crate) enum Reparameterization<'a> {
    /// Length grows in proportion to the parameter.
    Proportional(f64),
    /// Length is the integrated speed of a curve.
    ArcLength { curve: Sampled<'a>, length: f64 },
    /// Length runs along the edges of a rectangle, a quarter of the domain each.
    Rect(&'a RectPath),
}

impl Reparameterization<'_> {
    pub fn length_at(&self, t: f64) -> f64 {
        match self {
            Reparameterization::Proportional(length) => length * t.clamp(0.0, 1.0),
            Reparameterization::ArcLength { curve, length } => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    *length
                } else {
                    let steps = curve.ctx.tolerances().quadrature_steps();
                    arc_length(curve, 0.0, t, steps)
                }
            }
            Reparameterization::Rect(rect) => rect.length_at(t),
        }
    }

    pub fn intrinsic_at(&self, s: f64) -> f64 {
        match self {
            Reparameterization::Proportional(length) => {
                if *length == 0.0 {
                    0.0
                } else {
                    (s / length).clamp(0.0, 1.0)
                }
            }
            Reparameterization::ArcLength { curve, length } => {
                if s <= 0.0 {
                    0.0
                } else if s >= *length {
                    1.0
                } else {
                    let tolerances = curve.ctx.tolerances();
                    parameter_at_length(
                        curve,
                        s,
                        tolerances.quadrature_steps(),
                        tolerances.iteration_steps(),
                    )
                }
            }
            Reparameterization::Rect(rect) => rect.intrinsic_at(s),
        }
    }
}

/// Combines consecutive pieces of a path into one path.
fn join(mut pieces: Vec<Path>) -> Path {
    if pieces.len() == 1 {
        pieces.remove(0)
    } else {
        SequencePath::from_parts(pieces, false).into()
    }
}

/// A view of a path as a function of one parameter.
///
/// By intrinsic parameter the domain is `[0, 1]`; by length it is
/// `[0, length]`. Parameters outside the domain are clamped to it.
#[derive(Copy, Clone)]
pub struct Parameterization<'a> {
    path: &'a Path,
    ctx: &'a Context,
    domain: Domain,
}

impl<'a> Parameterization<'a> {
    pub(crate) fn intrinsic(path: &'a Path, ctx: &'a Context) -> Self {
        Self { path, ctx, domain: Domain::Intrinsic }
    }

    pub(crate) fn length(path: &'a Path, ctx: &'a Context) -> Self {
        Self { path, ctx, domain: Domain::Length }
    }

    fn within<'b>(&self, path: &'b Path) -> Parameterization<'b>
    where
        'a: 'b,
    {
        Parameterization { path, ctx: self.ctx, domain: self.domain }
    }

    pub fn path(&self) -> &'a Path {
        self.path
    }

    pub fn context(&self) -> &'a Context {
        self.ctx
    }

    pub fn is_by_length(&self) -> bool {
        self.domain == Domain::Length
    }

    pub(crate) fn domain(&self) -> Domain {
        self.domain
    }

    /// The parameterization of the same path over the other domain.
    pub fn other(&self) -> Parameterization<'a> {
        let domain = match self.domain {
            Domain::Intrinsic => Domain::Length,
            Domain::Length => Domain::Intrinsic,
        };
        Self { domain, ..*self }
    }

    /// The upper end of the domain.
    pub fn maximum(&self) -> f64 {
        match self.domain {
            Domain::Intrinsic => 1.0,
            Domain::Length => self.path.length(self.ctx),
        }
    }

    pub fn clamp(&self, p: f64) -> f64 {
        if p.is_nan() || p <= 0.0 {
            0.0
        } else {
            p.min(self.maximum())
        }
    }

    /// The intrinsic parameter of a simple path at a parameter of this domain.
    fn simple_param(&self, simple: &dyn Simple, p: f64) -> f64 {
        match self.domain {
            Domain::Intrinsic => self.clamp(p),
            Domain::Length => simple.reparameterization(self.path, self.ctx).intrinsic_at(p),
        }
    }

    /// The end of a sub-path's domain.
    fn extent(&self, composite: &dyn Composite, index: usize) -> f64 {
        match self.domain {
            Domain::Intrinsic => 1.0,
            Domain::Length => composite.index(self.ctx).extent(Domain::Length, index),
        }
    }

    pub fn point_at(&self, p: f64) -> Point2d {
        match self.path.form() {
            Form::Simple(s) => s.point_at(self.simple_param(s, p), self.ctx),
            Form::Composite(c) => {
                let (i, q) = c.index(self.ctx).locate(self.domain, p);
                self.within(&c.subpath(i)).point_at(q)
            }
        }
    }

    /// The unit tangent at a parameter.
    pub fn tangent_at(&self, p: f64) -> Vector2d {
        match self.path.form() {
            Form::Simple(s) => s.tangent_at(self.simple_param(s, p), self.ctx),
            Form::Composite(c) => {
                let (i, q) = c.index(self.ctx).locate(self.domain, p);
                self.within(&c.subpath(i)).tangent_at(q)
            }
        }
    }

    /// The point and tangent at a parameter, as a point path.
    pub fn point_tangent_at(&self, p: f64) -> PointPath {
        match self.path.form() {
            Form::Simple(s) => {
                let t = self.simple_param(s, p);
                PointPath::at(s.point_at(t, self.ctx), s.tangent_at(t, self.ctx))
            }
            Form::Composite(c) => {
                let (i, q) = c.index(self.ctx).locate(self.domain, p);
                self.within(&c.subpath(i)).point_tangent_at(q)
            }
        }
    }

    /// Splits the path in two at a parameter.
    pub fn split_at(&self, p: f64) -> (Path, Path) {
        match self.path.form() {
            Form::Simple(s) => s.split_at(self.path, self.simple_param(s, p), self.ctx),
            Form::Composite(c) => {
                let count = c.count();
                let (i, q) = c.index(self.ctx).locate(self.domain, p);
                let (first, second) = self.within(&c.subpath(i)).split_at(q);
                let mut head: Vec<Path> = (0..i).map(|j| c.subpath(j)).collect();
                if head.is_empty() || !matches!(first.kind(), PathKind::Point(_)) {
                    head.push(first);
                }
                let mut tail = Vec::with_capacity(count - i);
                if i + 1 == count || !matches!(second.kind(), PathKind::Point(_)) {
                    tail.push(second);
                }
                tail.extend((i + 1..count).map(|j| c.subpath(j)));
                (join(head), join(tail))
            }
        }
    }

    /// The part of the path between two parameters.
    pub fn segment(&self, p0: f64, p1: f64) -> Result<Path> {
        if p0 > p1 {
            return Err(GeomError::InvalidArgument("segment parameters out of order"));
        }
        Ok(self.segment_unchecked(p0, p1))
    }

    pub(crate) fn segment_unchecked(&self, p0: f64, p1: f64) -> Path {
        match self.path.form() {
            Form::Simple(s) => {
                let (t0, t1) = (self.simple_param(s, p0), self.simple_param(s, p1));
                s.segment(self.path, t0, t1, self.ctx)
            }
            Form::Composite(c) => {
                let (p0, p1) = (self.clamp(p0), self.clamp(p1));
                if p0 <= 0.0 && p1 >= self.maximum() {
                    return self.path.clone();
                }
                let index = c.index(self.ctx);
                let (i0, q0) = index.locate(self.domain, p0);
                let (i1, q1) = index.locate(self.domain, p1);
                if i0 == i1 {
                    return self.within(&c.subpath(i0)).segment_unchecked(q0, q1);
                }
                let mut pieces = Vec::with_capacity(i1 - i0 + 1);
                let end = self.extent(c, i0);
                if q0 < end {
                    pieces.push(self.within(&c.subpath(i0)).segment_unchecked(q0, end));
                }
                pieces.extend((i0 + 1..i1).map(|i| c.subpath(i)));
                if q1 > 0.0 {
                    pieces.push(self.within(&c.subpath(i1)).segment_unchecked(0.0, q1));
                }
                if pieces.is_empty() {
                    return self.point_tangent_at(p0).into();
                }
                join(pieces)
            }
        }
    }

    /// The arc length from the start of the path to a parameter.
    pub fn length_at(&self, p: f64) -> f64 {
        if self.domain == Domain::Length {
            return self.clamp(p);
        }
        match self.path.form() {
            Form::Simple(s) => s.reparameterization(self.path, self.ctx).length_at(self.clamp(p)),
            Form::Composite(c) => {
                let index = c.index(self.ctx);
                let (i, q) = index.locate(Domain::Intrinsic, p);
                index.pre_sum(Domain::Length, i) + c.subpath(i).by_intrinsic(self.ctx).length_at(q)
            }
        }
    }

    /// The intrinsic parameter at a parameter.
    pub fn intrinsic_at(&self, p: f64) -> f64 {
        if self.domain == Domain::Intrinsic {
            return self.clamp(p);
        }
        match self.path.form() {
            Form::Simple(s) => s.reparameterization(self.path, self.ctx).intrinsic_at(p),
            Form::Composite(c) => {
                let index = c.index(self.ctx);
                let (i, q) = index.locate(Domain::Length, p);
                let local = c.subpath(i).by_length(self.ctx).intrinsic_at(q);
                (i as f64 + local) / index.count() as f64
            }
        }
    }

    /// The parameter of the point on the path nearest to `pt`.
    pub fn parameter_nearest(&self, pt: Point2d) -> f64 {
        match self.path.form() {
            Form::Simple(s) => {
                let t = s.nearest_intrinsic(self.path, pt, self.ctx);
                match self.domain {
                    Domain::Intrinsic => t,
                    Domain::Length => s.reparameterization(self.path, self.ctx).length_at(t),
                }
            }
            Form::Composite(_) => {
                let s = crate::Locator::new(pt).locate(self.path, self.ctx);
                match self.domain {
                    Domain::Intrinsic => self.other().intrinsic_at(s),
                    Domain::Length => s,
                }
            }
        }
    }

    /// The corners of the path, in order.
    ///
    /// A closed path whose seam is a corner reports it at the start.
    pub fn corners(&self) -> Vec<Corner> {
        match self.path.form() {
            Form::Simple(s) => {
                let corners = s.corners(self.ctx);
                match self.domain {
                    Domain::Intrinsic => corners,
                    Domain::Length => {
                        let z = s.reparameterization(self.path, self.ctx);
                        corners.iter().map(|c| c.reparameterize(z.length_at(c.parameter()))).collect()
                    }
                }
            }
            Form::Composite(c) => self.composite_corners(c),
        }
    }

    fn composite_corners(&self, c: &dyn Composite) -> Vec<Corner> {
        let ctx = self.ctx;
        let count = c.count();
        let index = c.index(ctx);
        let subpaths: Vec<Path> = (0..count).map(|i| c.subpath(i)).collect();
        let mut corners = Vec::new();
        if self.path.is_closed() {
            let arriving = subpaths[count - 1].by_intrinsic(ctx).tangent_at(1.0);
            let leaving = subpaths[0].by_intrinsic(ctx).tangent_at(0.0);
            if ctx.is_corner(arriving, leaving) {
                corners.push(Corner::new(0.0, self.path.start(), arriving, leaving));
            }
        }
        for (i, sub) in subpaths.iter().enumerate() {
            let offset = index.pre_sum(self.domain, i);
            if i > 0 {
                let arriving = subpaths[i - 1].by_intrinsic(ctx).tangent_at(1.0);
                let leaving = sub.by_intrinsic(ctx).tangent_at(0.0);
                if ctx.is_corner(arriving, leaving) {
                    corners.push(Corner::new(offset, sub.start(), arriving, leaving));
                }
            }
            let end = self.extent(c, i);
            for corner in self.within(sub).corners() {
                let p = corner.parameter();
                if p <= 0.0 || p >= end {
                    continue;
                }
                let p = match self.domain {
                    Domain::Intrinsic => (i as f64 + p) / count as f64,
                    Domain::Length => offset + p,
                };
                corners.push(corner.reparameterize(p));
            }
        }
        corners
    }

    /// A cursor at the start of the path.
    pub fn location(&self) -> Location<'a> {
        Location::new(*self, 0.0)
    }

    /// A cursor at a parameter.
    pub fn location_at(&self, p: f64) -> Location<'a> {
        Location::new(*self, p)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::{BezierCurve, Ellipse, LineSegment, Rect};
    use crate::{PolygonalPath, RectPath};
    use assert_approx_eq::assert_approx_eq;

    fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Path {
        LineSegment::from_points(Point2d::new(x1, y1), Point2d::new(x2, y2)).unwrap().into()
    }

    #[test]
    fn lines_are_proportional() {
        let ctx = Context::default();
        let path = line(0.0, 0.0, 10.0, 0.0);
        let z = path.by_length(&ctx);
        assert_eq!(z.maximum(), 10.0);
        assert_eq!(z.point_at(2.5), Point2d::new(2.5, 0.0));
        assert_eq!(z.intrinsic_at(2.5), 0.25);
        assert_eq!(z.other().length_at(0.25), 2.5);
        assert_eq!(z.point_at(20.0), Point2d::new(10.0, 0.0));
    }

    #[test]
    fn curves_invert_arc_length() {
        let ctx = Context::default();
        let bezier: Path = BezierCurve::new([
            Point2d::new(0.0, 0.0),
            Point2d::new(30.0, 60.0),
            Point2d::new(60.0, -20.0),
            Point2d::new(100.0, 10.0),
        ])
        .unwrap()
        .into();
        let z = bezier.by_intrinsic(&ctx);
        for i in 0..=20 {
            let t = i as f64 / 20.0;
            let s = z.length_at(t);
            assert_approx_eq!(z.other().intrinsic_at(s), t, 1e-4);
        }
    }

    #[test]
    fn composite_points_come_from_their_sub_path() {
        let ctx = Context::default();
        let polygon: Path = PolygonalPath::builder()
            .add_points([
                Point2d::new(0.0, 0.0),
                Point2d::new(3.0, 0.0),
                Point2d::new(3.0, 4.0),
                Point2d::new(10.0, 4.0),
            ])
            .build()
            .unwrap()
            .into();
        let z = polygon.by_length(&ctx);
        assert_eq!(z.maximum(), 14.0);
        assert_eq!(z.point_at(5.0), Point2d::new(3.0, 2.0));
        assert_approx_eq!(z.point_at(8.0).x, 4.0);
        assert_eq!(z.point_at(8.0).y, 4.0);
        assert_approx_eq!(z.intrinsic_at(5.0), 0.5);
        assert_approx_eq!(z.other().length_at(0.5), 5.0);
        assert_eq!(z.corners().len(), 2);
        assert_eq!(z.corners()[1].parameter(), 7.0);
    }

    #[test]
    fn composite_segments_span_sub_paths() {
        let ctx = Context::default();
        let rect: Path = RectPath::new(Rect::new(0.0, 0.0, 4.0, 2.0).unwrap(), true).into();
        let polygon = rect.split_at_corners(&ctx);
        let sequence: Path = SequencePath::new(polygon, true).unwrap().into();
        let z = sequence.by_length(&ctx);
        let segment = z.segment(3.0, 7.0).unwrap();
        assert_eq!(segment.start(), Point2d::new(3.0, 0.0));
        assert_eq!(segment.finish(), Point2d::new(3.0, 2.0));
        assert_eq!(segment.length(&ctx), 4.0);
        assert!(z.segment(7.0, 3.0).is_err());
        assert!(z.segment(0.0, 12.0).unwrap().ptr_eq(&sequence));
    }

    #[test]
    fn splits_avoid_point_pieces() {
        let ctx = Context::default();
        let sequence: Path =
            SequencePath::new(vec![line(0.0, 0.0, 1.0, 0.0), line(1.0, 0.0, 1.0, 1.0)], false)
                .unwrap()
                .into();
        let (first, second) = sequence.by_length(&ctx).split_at(1.0);
        assert!(matches!(first.kind(), PathKind::Linear(_)));
        assert!(matches!(second.kind(), PathKind::Linear(_)));
        assert_eq!(second.start(), Point2d::new(1.0, 0.0));
    }

    #[test]
    fn closed_curves_have_no_corners() {
        let ctx = Context::default();
        let circle: Path =
            Ellipse::from_radius(Point2d::new(0.0, 0.0), 5.0).unwrap().complete_arc().into();
        assert!(circle.is_closed());
        assert!(circle.by_length(&ctx).corners().is_empty());
        assert!(circle.is_smooth(&ctx));
    }
}
