// Pointer strokes captured between press and release

use crate::geometry::rect::Rect;

/// Samples closer than this (squared px) to the last kept point are
/// dropped at capture time
const MIN_POINT_DISTANCE_SQ: f64 = 4.0;

/// A single pointer sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_sq(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// An ordered pointer trail
///
/// Transient: captured between pointer-down and pointer-up, classified
/// once, then discarded.
#[derive(Debug, Clone, Default)]
pub struct Stroke {
    points: Vec<Point>,
}

impl Stroke {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Build a stroke from raw samples, applying the same thinning as
    /// live capture
    pub fn from_points(samples: &[(f64, f64)]) -> Self {
        let mut stroke = Self::new();
        for &(x, y) in samples {
            stroke.push(x, y);
        }
        stroke
    }

    /// Append a pointer sample. Samples within 2px of the last kept
    /// point are dropped to keep the trail sparse.
    pub fn push(&mut self, x: f64, y: f64) {
        let point = Point::new(x, y);
        match self.points.last() {
            Some(last) if last.distance_sq(&point) < MIN_POINT_DISTANCE_SQ => {}
            _ => self.points.push(point),
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Axis-aligned bounding box over all samples, with degenerate sides
    /// clamped to 1px so intersection tests stay well-defined. `None`
    /// for an empty stroke.
    pub fn bounding_box(&self) -> Option<Rect> {
        let first = self.points.first()?;
        let mut min_x = first.x;
        let mut min_y = first.y;
        let mut max_x = first.x;
        let mut max_y = first.y;
        for p in &self.points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        let x = min_x.floor() as i32;
        let y = min_y.floor() as i32;
        let w = ((max_x - min_x).ceil() as i32).max(1);
        let h = ((max_y - min_y).ceil() as i32).max(1);
        Some(Rect::new(x, y, w, h))
    }
}
