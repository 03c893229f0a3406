//! Drawable elements of the whiteboard.

mod color;
mod figure;
mod stroke;
mod text;

pub use color::{ColorError, ERASE_COLOR, PALETTE, Rgba};
pub use figure::{Shape, ShapeKind};
pub use stroke::{Stroke, StrokeTool};
pub use text::{DEFAULT_FONT_FAMILY, MIN_FONT_SIZE, TextElement, font_size_for_brush};

use kurbo::{Point, Rect};
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Current wall-clock time in Unix milliseconds, used for element timestamps.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Common trait for committed and in-progress elements.
pub trait Element {
    /// Get the unique identifier.
    fn id(&self) -> ElementId;

    /// Creation time in Unix milliseconds.
    fn timestamp(&self) -> i64;

    /// Points that define the element's extent for export framing.
    ///
    /// Strokes contribute every point, shapes their two endpoints and texts
    /// their anchor.
    fn extent_points(&self) -> Vec<Point>;

    /// Axis-aligned bounds of [`Element::extent_points`], `None` when empty.
    fn bounds(&self) -> Option<Rect> {
        bounds_of(self.extent_points())
    }
}

/// Axis-aligned bounding box of a set of points.
pub fn bounds_of(points: impl IntoIterator<Item = Point>) -> Option<Rect> {
    points.into_iter().fold(None, |acc: Option<Rect>, p| {
        Some(match acc {
            Some(r) => r.union_pt(p),
            None => Rect::from_points(p, p),
        })
    })
}
