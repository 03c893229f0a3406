//! Freehand strokes.

use super::{ERASE_COLOR, Element, ElementId, Rgba, now_millis};
use kurbo::{BezPath, Point};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which freehand tool produced a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeTool {
    Pen,
    Brush,
    Eraser,
}

/// A freehand drawing (series of points).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub(crate) id: ElementId,
    /// Points in the path, in world coordinates.
    pub points: Vec<Point>,
    pub color: Rgba,
    /// Line width in world units, always positive.
    pub width: f64,
    pub tool: StrokeTool,
    pub(crate) timestamp: i64,
}

impl Stroke {
    /// Start a new stroke seeded with a single point.
    ///
    /// Eraser strokes always record [`ERASE_COLOR`]. A non-positive or
    /// non-finite width falls back to 1.
    pub fn new(tool: StrokeTool, color: Rgba, width: f64, start: Point) -> Self {
        let color = if tool == StrokeTool::Eraser { ERASE_COLOR } else { color };
        let width = if width.is_finite() && width > 0.0 { width } else { 1.0 };
        Self {
            id: Uuid::new_v4(),
            points: vec![start],
            color,
            width,
            tool,
            timestamp: now_millis(),
        }
    }

    /// Add a point to the path.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_eraser(&self) -> bool {
        self.tool == StrokeTool::Eraser
    }

    /// Strokes with fewer than two points stay in the model but paint nothing.
    pub fn is_renderable(&self) -> bool {
        self.points.len() >= 2
    }

    /// Smoothed path through the points.
    ///
    /// Each segment is a quadratic curve using the previous point as control
    /// and ending at the midpoint to the current one. Empty for strokes that
    /// are not renderable.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        if !self.is_renderable() {
            return path;
        }

        path.move_to(self.points[0]);
        for pair in self.points.windows(2) {
            let (prev, curr) = (pair[0], pair[1]);
            path.quad_to(prev, prev.midpoint(curr));
        }
        path
    }
}

impl Element for Stroke {
    fn id(&self) -> ElementId {
        self.id
    }

    fn timestamp(&self) -> i64 {
        self.timestamp
    }

    fn extent_points(&self) -> Vec<Point> {
        self.points.clone()
    }
}
