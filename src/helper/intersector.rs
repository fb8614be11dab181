use super::{decompose, touches, PointConsumer};
use crate::math::{LineSegment, Point2d};
use crate::{Context, Path, Simplified};
use log::trace;

/// Finds the points at which two paths cross.
///
/// Both paths are decomposed recursively, and any pair of parts whose bounds
/// do not meet is discarded before it is decomposed further. Crossings are
/// reported to the consumer in order along the first path.
///
/// A crossing equal to the one reported immediately before it is dropped, so
/// a crossing at the join of two parts is only reported once. Two genuinely
/// distinct crossings at the same point are reported once as well.
#[derive(Debug)]
pub struct Intersector<C: PointConsumer> {
    consumer: C,
    reporting_previous_vertex: bool,
    reporting_next_vertex: bool,
    last_point: Option<Point2d>,
    bounds_checks: usize,
    rect_checks: usize,
    line_checks: usize,
}

impl<C: PointConsumer> Intersector<C> {
    pub fn new(consumer: C) -> Self {
        Self {
            consumer,
            reporting_previous_vertex: false,
            reporting_next_vertex: false,
            last_point: None,
            bounds_checks: 0,
            rect_checks: 0,
            line_checks: 0,
        }
    }

    /// Whether each crossing is preceded by the start of the segment of the
    /// first path on which it lies.
    pub fn reporting_previous_vertex(mut self, reporting: bool) -> Self {
        self.reporting_previous_vertex = reporting;
        self
    }

    /// Whether each crossing is followed by the finish of the segment of the
    /// first path on which it lies.
    pub fn reporting_next_vertex(mut self, reporting: bool) -> Self {
        self.reporting_next_vertex = reporting;
        self
    }

    pub fn is_reporting_previous_vertex(&self) -> bool {
        self.reporting_previous_vertex
    }

    pub fn is_reporting_next_vertex(&self) -> bool {
        self.reporting_next_vertex
    }

    pub fn consumer(&self) -> &C {
        &self.consumer
    }

    pub fn into_consumer(self) -> C {
        self.consumer
    }

    /// Number of times the bounds of two paths have been compared.
    pub fn bounds_checks(&self) -> usize {
        self.bounds_checks
    }

    /// Number of times a segment has been tested against the bounds of a path.
    pub fn rect_checks(&self) -> usize {
        self.rect_checks
    }

    /// Number of times two segments have been intersected.
    pub fn line_checks(&self) -> usize {
        self.line_checks
    }

    /// Reports the crossings of two paths to the consumer.
    pub fn intersect(&mut self, p1: &Path, p2: &Path, ctx: &Context) -> &mut Self {
        self.paths(p1, 0, p2, 0, ctx);
        trace!(
            "intersector: {} bounds checks, {} rect checks, {} line checks",
            self.bounds_checks,
            self.rect_checks,
            self.line_checks
        );
        self
    }

    fn paths(&mut self, p1: &Path, d1: usize, p2: &Path, d2: usize, ctx: &Context) {
        self.bounds_checks += 1;
        if !touches(&p1.bounds(), &p2.bounds()) {
            return;
        }
        let (s1, d1) = decompose(p1, d1, ctx);
        let (s2, d2) = decompose(p2, d2, ctx);
        match (s1, s2) {
            (Simplified::Linear(l1), Simplified::Linear(l2)) => self.lines(&l1, &l2),
            (Simplified::Linear(l1), Simplified::Split(a2, b2)) => {
                self.line_path(&l1, &a2, d2, ctx);
                self.line_path(&l1, &b2, d2, ctx);
            }
            (Simplified::Split(a1, b1), Simplified::Linear(l2)) => {
                self.path_line(&a1, d1, &l2, ctx);
                self.path_line(&b1, d1, &l2, ctx);
            }
            (Simplified::Split(a1, b1), Simplified::Split(a2, b2)) => {
                self.paths(&a1, d1, &a2, d2, ctx);
                self.paths(&a1, d1, &b2, d2, ctx);
                self.paths(&b1, d1, &a2, d2, ctx);
                self.paths(&b1, d1, &b2, d2, ctx);
            }
        }
    }

    fn line_path(&mut self, l1: &LineSegment, p2: &Path, d2: usize, ctx: &Context) {
        self.rect_checks += 1;
        if !l1.intersects_rect(&p2.bounds()) {
            return;
        }
        match decompose(p2, d2, ctx) {
            (Simplified::Linear(l2), _) => self.lines(l1, &l2),
            (Simplified::Split(a2, b2), d2) => {
                self.line_path(l1, &a2, d2, ctx);
                self.line_path(l1, &b2, d2, ctx);
            }
        }
    }

    fn path_line(&mut self, p1: &Path, d1: usize, l2: &LineSegment, ctx: &Context) {
        self.rect_checks += 1;
        if !l2.intersects_rect(&p1.bounds()) {
            return;
        }
        match decompose(p1, d1, ctx) {
            (Simplified::Linear(l1), _) => self.lines(&l1, l2),
            (Simplified::Split(a1, b1), d1) => {
                self.path_line(&a1, d1, l2, ctx);
                self.path_line(&b1, d1, l2, ctx);
            }
        }
    }

    fn lines(&mut self, l1: &LineSegment, l2: &LineSegment) {
        self.line_checks += 1;
        let Some(pt) = l1.intersection_with(l2) else { return };
        if self.last_point == Some(pt) {
            return;
        }
        if self.reporting_previous_vertex {
            self.consumer.add_point(l1.start());
        }
        self.consumer.add_point(pt);
        if self.reporting_next_vertex {
            self.consumer.add_point(l1.finish());
        }
        self.last_point = Some(pt);
    }
}
