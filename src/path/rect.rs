use super::polygonal::polyline;
use super::{Corner, Path, Reparameterization, Simple, Simplified, Trace};
use crate::math::{interpolate, Point2d, Rect, Transform, Vector2d, UNIT_X, UNIT_Y};
use crate::{Context, Result};

/// The closed path around the edge of a rectangle.
///
/// The path starts at the minimum corner. With positive rotation it runs
/// along the minimum y edge first (anticlockwise when y points up); otherwise
/// it runs along the minimum x edge first. Each edge occupies a quarter of
/// the intrinsic domain.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RectPath {
    rect: Rect,
    positive_rotation: bool,
}

impl RectPath {
    pub fn new(rect: Rect, positive_rotation: bool) -> Self {
        Self { rect, positive_rotation }
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    pub fn is_positive_rotation(&self) -> bool {
        self.positive_rotation
    }

    /// The corners in the order they are visited, from the start.
    pub fn vertices(&self) -> [Point2d; 4] {
        let [a, b, c, d] = self.rect.corners();
        if self.positive_rotation {
            [a, b, c, d]
        } else {
            [a, d, c, b]
        }
    }

    fn edge_tangents(&self) -> [Vector2d; 4] {
        if self.positive_rotation {
            [UNIT_X, UNIT_Y, -UNIT_X, -UNIT_Y]
        } else {
            [UNIT_Y, UNIT_X, -UNIT_Y, -UNIT_X]
        }
    }

    fn edge_lengths(&self) -> [f64; 4] {
        let (w, h) = (self.rect.width(), self.rect.height());
        if self.positive_rotation {
            [w, h, w, h]
        } else {
            [h, w, h, w]
        }
    }

    /// The edge containing an intrinsic parameter strictly inside the
    /// domain, and the proportion along it.
    fn edge_at(t: f64) -> (usize, f64) {
        let p = 4.0 * t;
        let edge = (p as usize).min(3);
        (edge, p - edge as f64)
    }

    pub(crate) fn length_at(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return self.rect.perimeter_length();
        }
        let lengths = self.edge_lengths();
        let (edge, p) = Self::edge_at(t);
        lengths[..edge].iter().sum::<f64>() + lengths[edge] * p
    }

    pub(crate) fn intrinsic_at(&self, s: f64) -> f64 {
        if s <= 0.0 {
            return 0.0;
        }
        let mut previous = 0.0;
        for (edge, length) in self.edge_lengths().into_iter().enumerate() {
            let next = previous + length;
            if s < next {
                return 0.25 * (edge as f64 + (s - previous) / length);
            }
            previous = next;
        }
        1.0
    }

    fn transformed(&self, t: &Transform) -> Result<Path> {
        let vertices = self.vertices().map(|v| t.transform_point(v));
        if t.is_rectilinear_preserving() {
            let positive = self.positive_rotation == t.is_chiral_preserving();
            let candidate = Self::new(t.transform_rect(&self.rect)?, positive);
            // the image must still start at the minimum corner
            if candidate.vertices() == vertices {
                return Ok(candidate.into());
            }
        }
        let closed = vertices.iter().chain(&vertices[..1]).copied();
        Ok(polyline(closed, t.transform_vector(self.edge_tangents()[0])))
    }
}

impl Trace for RectPath {
    fn start(&self) -> Point2d {
        self.vertices()[0]
    }

    fn finish(&self) -> Point2d {
        self.vertices()[0]
    }

    fn is_closed(&self) -> bool {
        true
    }

    fn is_rectilinear(&self) -> bool {
        true
    }

    fn compute_length(&self, _ctx: &Context) -> f64 {
        self.rect.perimeter_length()
    }

    fn compute_bounds(&self) -> Rect {
        self.rect
    }

    fn simplify(&self, _this: &Path, _ctx: &Context) -> Simplified {
        let [a, b, c, d] = self.vertices();
        let tangents = self.edge_tangents();
        Simplified::Split(polyline([a, b, c], tangents[0]), polyline([c, d, a], tangents[2]))
    }

    fn reverse(&self, _this: &Path) -> Path {
        Self { positive_rotation: !self.positive_rotation, ..*self }.into()
    }

    fn apply(&self, _this: &Path, t: &Transform) -> Result<Path> {
        self.transformed(t)
    }
}

impl Simple for RectPath {
    fn point_at(&self, t: f64, _ctx: &Context) -> Point2d {
        let vertices = self.vertices();
        if t <= 0.0 || t >= 1.0 {
            return vertices[0];
        }
        let (edge, p) = Self::edge_at(t);
        interpolate(vertices[edge], vertices[(edge + 1) % 4], p)
    }

    fn tangent_at(&self, t: f64, _ctx: &Context) -> Vector2d {
        let tangents = self.edge_tangents();
        if t <= 0.0 {
            tangents[0]
        } else if t >= 1.0 {
            tangents[3]
        } else {
            tangents[Self::edge_at(t).0]
        }
    }

    fn split_at(&self, this: &Path, t: f64, ctx: &Context) -> (Path, Path) {
        let tangents = self.edge_tangents();
        let vertices = self.vertices();
        if t <= 0.0 {
            return (polyline([vertices[0]], tangents[0]), this.clone());
        }
        if t >= 1.0 {
            return (this.clone(), polyline([vertices[0]], tangents[3]));
        }
        let (edge, _) = Self::edge_at(t);
        let pt = self.point_at(t, ctx);
        let head = vertices[..=edge].iter().copied().chain([pt]);
        let tail = [pt].into_iter().chain(vertices[edge + 1..].iter().copied()).chain([vertices[0]]);
        (polyline(head, tangents[0]), polyline(tail, tangents[edge]))
    }

    fn segment(&self, this: &Path, t0: f64, t1: f64, ctx: &Context) -> Path {
        if t0 <= 0.0 && t1 >= 1.0 {
            return this.clone();
        }
        let vertices = self.vertices();
        let between = (1..4).filter(|&i| t0 < 0.25 * i as f64 && 0.25 * i as f64 <= t1);
        let points = [self.point_at(t0, ctx)]
            .into_iter()
            .chain(between.map(|i| vertices[i]))
            .chain([self.point_at(t1, ctx)]);
        polyline(points, self.tangent_at(t0, ctx))
    }

    fn reparameterization<'a>(&'a self, _this: &'a Path, _ctx: &'a Context) -> Reparameterization<'a> {
        Reparameterization::Rect(self)
    }

    fn corners(&self, _ctx: &Context) -> Vec<Corner> {
        let vertices = self.vertices();
        let tangents = self.edge_tangents();
        (0..4)
            .map(|i| Corner::new(0.25 * i as f64, vertices[i], tangents[(i + 3) % 4], tangents[i]))
            .collect()
    }

    fn nearest_intrinsic(&self, _this: &Path, pt: Point2d, _ctx: &Context) -> f64 {
        let r = &self.rect;
        let pt = r.nearest_point_to(pt, true);
        let (w, h) = (r.width(), r.height());
        let s = if self.positive_rotation {
            if pt.y == r.min_y {
                pt.x - r.min_x
            } else if pt.x == r.max_x {
                w + (pt.y - r.min_y)
            } else if pt.y == r.max_y {
                w + h + (r.max_x - pt.x)
            } else {
                w + h + w + (r.max_y - pt.y)
            }
        } else if pt.x == r.min_x {
            pt.y - r.min_y
        } else if pt.y == r.max_y {
            h + (pt.x - r.min_x)
        } else if pt.x == r.max_x {
            h + w + (r.max_y - pt.y)
        } else {
            h + w + h + (r.max_x - pt.x)
        };
        self.intrinsic_at(s)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::PathKind;
    use assert_approx_eq::assert_approx_eq;

    fn rect(positive: bool) -> Path {
        RectPath::new(Rect::new(0.0, 0.0, 4.0, 2.0).unwrap(), positive).into()
    }

    #[test]
    fn edges_take_a_quarter_each() {
        let ctx = Context::default();
        let path = rect(true);
        let z = path.by_intrinsic(&ctx);
        assert_eq!(z.point_at(0.125), Point2d::new(2.0, 0.0));
        assert_eq!(z.point_at(0.375), Point2d::new(4.0, 1.0));
        assert_eq!(z.point_at(0.625), Point2d::new(2.0, 2.0));
        assert_eq!(z.tangent_at(0.875), -UNIT_Y);
        assert_eq!(z.length_at(0.375), 5.0);
        assert_eq!(path.by_length(&ctx).intrinsic_at(5.0), 0.375);
        assert_eq!(path.length(&ctx), 12.0);
    }

    #[test]
    fn negative_rotation_runs_up_first() {
        let ctx = Context::default();
        let path = rect(false);
        let z = path.by_length(&ctx);
        assert_eq!(z.point_at(1.0), Point2d::new(0.0, 1.0));
        assert_eq!(z.point_at(3.0), Point2d::new(1.0, 2.0));
        assert_eq!(z.tangent_at(3.0), UNIT_X);
    }

    #[test]
    fn nearest_points_are_on_the_edge() {
        let ctx = Context::default();
        let path = rect(true);
        let z = path.by_length(&ctx);
        assert_approx_eq!(z.parameter_nearest(Point2d::new(1.0, -3.0)), 1.0);
        assert_approx_eq!(z.parameter_nearest(Point2d::new(5.0, 1.5)), 5.5);
        assert_approx_eq!(z.parameter_nearest(Point2d::new(1.0, 1.8)), 7.0);
        assert_approx_eq!(z.parameter_nearest(Point2d::new(-1.0, 0.5)), 11.5);
    }

    #[test]
    fn four_corners() {
        let ctx = Context::default();
        let path = rect(true);
        let corners = path.by_length(&ctx).corners();
        let parameters: Vec<f64> = corners.iter().map(|c| c.parameter()).collect();
        assert_eq!(parameters, vec![0.0, 4.0, 6.0, 10.0]);
        assert_approx_eq!(corners[1].turn(), 0.5 * std::f64::consts::PI);
    }

    #[test]
    fn splits_become_polylines() {
        let ctx = Context::default();
        let path = rect(true);
        let (a, b) = path.by_length(&ctx).split_at(5.0);
        assert_eq!(a.finish(), Point2d::new(4.0, 1.0));
        assert_eq!(b.start(), Point2d::new(4.0, 1.0));
        assert_eq!(a.length(&ctx), 5.0);
        assert_eq!(b.length(&ctx), 7.0);
        assert_eq!(b.finish(), Point2d::new(0.0, 0.0));
    }

    #[test]
    fn rectilinear_transforms_keep_rects() {
        let path = rect(true);
        let scaled = path.apply(&Transform::scale(2.0).unwrap()).unwrap();
        assert!(matches!(scaled.kind(), PathKind::Rect(r) if r.is_positive_rotation()));

        let mirror = Transform::scale_xy(1.0, -1.0).unwrap();
        let mirrored = path.apply(&mirror).unwrap();
        // the minimum corner of the image is not the image of the start
        assert!(matches!(mirrored.kind(), PathKind::Polygonal(_)));
        assert_eq!(mirrored.start(), Point2d::new(0.0, 0.0));
        assert_eq!(mirrored.by_intrinsic(&Context::default()).point_at(0.25), Point2d::new(4.0, 0.0));

        let rotated = path.apply(&Transform::rotation(0.3).unwrap()).unwrap();
        assert!(matches!(rotated.kind(), PathKind::Polygonal(_)));
        assert!(rotated.is_closed());
    }

    #[test]
    fn reversing_flips_rotation() {
        let path = rect(true);
        let reversed = path.reverse();
        assert!(matches!(reversed.kind(), PathKind::Rect(r) if !r.is_positive_rotation()));
        assert_eq!(reversed.start(), path.start());
    }
}
