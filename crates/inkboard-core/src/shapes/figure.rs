//! Two-point vector shapes: rectangles, circles and lines.

use super::{Element, ElementId, Rgba, now_millis};
use kurbo::{BezPath, Circle, Line, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tolerance used when flattening circles to Bézier paths.
const PATH_TOLERANCE: f64 = 0.1;

/// The kind of two-point shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Line,
}

/// A shape defined by the drag start and end points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub(crate) id: ElementId,
    pub kind: ShapeKind,
    pub start: Point,
    pub end: Point,
    pub color: Rgba,
    pub stroke_width: f64,
    pub(crate) timestamp: i64,
}

impl Shape {
    /// Start a new shape with both points at `start`.
    pub fn new(kind: ShapeKind, color: Rgba, stroke_width: f64, start: Point) -> Self {
        let stroke_width = if stroke_width.is_finite() && stroke_width > 0.0 {
            stroke_width
        } else {
            1.0
        };
        Self {
            id: Uuid::new_v4(),
            kind,
            start,
            end: start,
            color,
            stroke_width,
            timestamp: now_millis(),
        }
    }

    /// Rectangle spanned by the two corners, normalized.
    pub fn normalized_rect(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    /// Circle radius: distance from the start (center) to the end point.
    ///
    /// Asymmetric drags still produce a true circle.
    pub fn radius(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// Get the outline path for rendering.
    pub fn to_path(&self) -> BezPath {
        match self.kind {
            ShapeKind::Rectangle => self.normalized_rect().to_path(PATH_TOLERANCE),
            ShapeKind::Circle => Circle::new(self.start, self.radius()).to_path(PATH_TOLERANCE),
            ShapeKind::Line => Line::new(self.start, self.end).to_path(PATH_TOLERANCE),
        }
    }
}

impl Element for Shape {
    fn id(&self) -> ElementId {
        self.id
    }

    fn timestamp(&self) -> i64 {
        self.timestamp
    }

    fn extent_points(&self) -> Vec<Point> {
        vec![self.start, self.end]
    }
}
