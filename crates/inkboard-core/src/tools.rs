//! Tool selection for the whiteboard.

use crate::shapes::{ShapeKind, StrokeTool};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Pen,
    Brush,
    Eraser,
    Rectangle,
    Circle,
    Line,
    Text,
}

impl ToolKind {
    /// Get all tools in toolbar order.
    pub fn all() -> &'static [ToolKind] {
        &[
            ToolKind::Pen,
            ToolKind::Brush,
            ToolKind::Eraser,
            ToolKind::Rectangle,
            ToolKind::Circle,
            ToolKind::Line,
            ToolKind::Text,
        ]
    }

    /// Lowercase identifier, as shown in the status bar.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Pen => "pen",
            ToolKind::Brush => "brush",
            ToolKind::Eraser => "eraser",
            ToolKind::Rectangle => "rectangle",
            ToolKind::Circle => "circle",
            ToolKind::Line => "line",
            ToolKind::Text => "text",
        }
    }

    /// Get display name for UI.
    pub fn display_name(self) -> &'static str {
        match self {
            ToolKind::Pen => "Pen",
            ToolKind::Brush => "Brush",
            ToolKind::Eraser => "Eraser",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Circle => "Circle",
            ToolKind::Line => "Line",
            ToolKind::Text => "Text",
        }
    }

    /// The stroke tag this tool produces, if it draws freehand.
    pub fn stroke_tool(self) -> Option<StrokeTool> {
        match self {
            ToolKind::Pen => Some(StrokeTool::Pen),
            ToolKind::Brush => Some(StrokeTool::Brush),
            ToolKind::Eraser => Some(StrokeTool::Eraser),
            _ => None,
        }
    }

    /// The shape kind this tool produces, if it draws shapes.
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            ToolKind::Rectangle => Some(ShapeKind::Rectangle),
            ToolKind::Circle => Some(ShapeKind::Circle),
            ToolKind::Line => Some(ShapeKind::Line),
            _ => None,
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_categories_are_disjoint() {
        for tool in ToolKind::all() {
            let freehand = tool.stroke_tool().is_some();
            let shape = tool.shape_kind().is_some();
            assert!(!(freehand && shape), "{tool} is both");
            assert_eq!(*tool == ToolKind::Text, !freehand && !shape);
        }
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&ToolKind::Rectangle).unwrap();
        assert_eq!(json, "\"rectangle\"");
        let tool: ToolKind = serde_json::from_str("\"eraser\"").unwrap();
        assert_eq!(tool, ToolKind::Eraser);
    }
}
