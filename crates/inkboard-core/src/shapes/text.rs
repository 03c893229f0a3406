//! Text annotations.

use super::{Element, ElementId, Rgba, now_millis};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Font family recorded on every text element.
pub const DEFAULT_FONT_FAMILY: &str = "Arial, sans-serif";

/// Smallest font size a text element is created with.
pub const MIN_FONT_SIZE: f64 = 12.0;

/// Font size derived from the brush size at creation time.
pub fn font_size_for_brush(brush_size: f64) -> f64 {
    (brush_size * 2.0).max(MIN_FONT_SIZE)
}

/// A single-line text annotation anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    pub(crate) id: ElementId,
    /// Position (top-left corner of the text).
    pub position: Point,
    /// The text content.
    pub content: String,
    pub color: Rgba,
    /// Font size in world units.
    pub font_size: f64,
    pub font_family: String,
    pub(crate) timestamp: i64,
}

impl TextElement {
    /// Create a text element, or `None` when the content is blank.
    ///
    /// Surrounding whitespace is trimmed; the font size is floored at
    /// [`MIN_FONT_SIZE`].
    pub fn new(position: Point, content: &str, color: Rgba, font_size: f64) -> Option<Self> {
        let content = content.trim();
        if content.is_empty() {
            return None;
        }
        let font_size = if font_size.is_finite() {
            font_size.max(MIN_FONT_SIZE)
        } else {
            MIN_FONT_SIZE
        };
        Some(Self {
            id: Uuid::new_v4(),
            position,
            content: content.to_string(),
            color,
            font_size,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            timestamp: now_millis(),
        })
    }
}

impl Element for TextElement {
    fn id(&self) -> ElementId {
        self.id
    }

    fn timestamp(&self) -> i64 {
        self.timestamp
    }

    fn extent_points(&self) -> Vec<Point> {
        vec![self.position]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text_rejected() {
        assert!(TextElement::new(Point::ZERO, "   ", Rgba::black(), 20.0).is_none());
        assert!(TextElement::new(Point::ZERO, "", Rgba::black(), 20.0).is_none());
    }

    #[test]
    fn test_text_trimmed() {
        let text = TextElement::new(Point::ZERO, "  hello \n", Rgba::black(), 20.0).unwrap();
        assert_eq!(text.content, "hello");
        assert_eq!(text.font_family, DEFAULT_FONT_FAMILY);
    }

    #[test]
    fn test_font_size_floor() {
        assert!((font_size_for_brush(2.0) - MIN_FONT_SIZE).abs() < f64::EPSILON);
        assert!((font_size_for_brush(10.0) - 20.0).abs() < f64::EPSILON);
        let text = TextElement::new(Point::ZERO, "x", Rgba::black(), 4.0).unwrap();
        assert!((text.font_size - MIN_FONT_SIZE).abs() < f64::EPSILON);
    }
}
