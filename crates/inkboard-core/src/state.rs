//! The drawing state value model.
//!
//! [`DrawingState`] is immutable: every mutation takes `&self` and returns a
//! new value. Committed collections sit behind `Arc`s, so snapshots kept by
//! the history share them until one side appends.

use crate::camera::Camera;
use crate::shapes::{Element, Rgba, Shape, Stroke, TextElement, bounds_of};
use crate::tools::ToolKind;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Smallest brush size the toolbar offers.
pub const MIN_BRUSH_SIZE: f64 = 1.0;
/// Largest brush size the toolbar offers.
pub const MAX_BRUSH_SIZE: f64 = 50.0;
/// Brush size of a fresh session.
pub const DEFAULT_BRUSH_SIZE: f64 = 5.0;

/// The single in-progress element of a drag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActiveElement {
    Stroke(Stroke),
    Shape(Shape),
}

/// Aggregate root of the whiteboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingState {
    strokes: Arc<Vec<Stroke>>,
    shapes: Arc<Vec<Shape>>,
    texts: Arc<Vec<TextElement>>,
    active: Option<ActiveElement>,
    tool: ToolKind,
    color: Rgba,
    brush_size: f64,
    camera: Camera,
}

impl Default for DrawingState {
    fn default() -> Self {
        Self::new(ToolKind::default(), Rgba::black(), DEFAULT_BRUSH_SIZE)
    }
}

/// Copy-on-append for a shared collection.
fn appended<T: Clone>(items: &Arc<Vec<T>>, item: T) -> Arc<Vec<T>> {
    let mut items = Arc::clone(items);
    Arc::make_mut(&mut items).push(item);
    items
}

fn clamp_brush_size(requested: f64, current: f64) -> f64 {
    if requested.is_finite() {
        requested.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE)
    } else {
        current
    }
}

impl DrawingState {
    /// Create an empty state with the given tool settings.
    pub fn new(tool: ToolKind, color: Rgba, brush_size: f64) -> Self {
        Self {
            strokes: Arc::new(Vec::new()),
            shapes: Arc::new(Vec::new()),
            texts: Arc::new(Vec::new()),
            active: None,
            tool,
            color,
            brush_size: clamp_brush_size(brush_size, DEFAULT_BRUSH_SIZE),
            camera: Camera::default(),
        }
    }

    /// Committed strokes, back to front.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// Committed shapes, back to front.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Committed texts, back to front.
    pub fn texts(&self) -> &[TextElement] {
        &self.texts
    }

    pub fn active(&self) -> Option<&ActiveElement> {
        self.active.as_ref()
    }

    pub fn active_stroke(&self) -> Option<&Stroke> {
        match &self.active {
            Some(ActiveElement::Stroke(stroke)) => Some(stroke),
            _ => None,
        }
    }

    pub fn active_shape(&self) -> Option<&Shape> {
        match &self.active {
            Some(ActiveElement::Shape(shape)) => Some(shape),
            _ => None,
        }
    }

    /// True exactly while a stroke or shape is being dragged out.
    pub fn is_drawing(&self) -> bool {
        self.active.is_some()
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    pub fn brush_size(&self) -> f64 {
        self.brush_size
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    pub fn zoom(&self) -> f64 {
        self.camera.zoom
    }

    pub fn pan(&self) -> Point {
        self.camera.pan
    }

    /// Start a freehand stroke. Non-freehand tools leave the state unchanged.
    ///
    /// An element still active from an unfinished drag is committed first.
    pub fn begin_stroke(&self, tool: ToolKind, color: Rgba, width: f64, point: Point) -> Self {
        let Some(stroke_tool) = tool.stroke_tool() else {
            return self.clone();
        };
        let base = self.commit_active();
        Self {
            active: Some(ActiveElement::Stroke(Stroke::new(stroke_tool, color, width, point))),
            ..base
        }
    }

    /// Start a shape with start = end = `point`. Non-shape tools leave the
    /// state unchanged.
    pub fn begin_shape(&self, tool: ToolKind, color: Rgba, width: f64, point: Point) -> Self {
        let Some(kind) = tool.shape_kind() else {
            return self.clone();
        };
        let base = self.commit_active();
        Self {
            active: Some(ActiveElement::Shape(Shape::new(kind, color, width, point))),
            ..base
        }
    }

    /// Extend the active stroke, or move the active shape's end point.
    pub fn append_to_active(&self, point: Point) -> Self {
        let active = match &self.active {
            Some(ActiveElement::Stroke(stroke)) => {
                let mut stroke = stroke.clone();
                stroke.add_point(point);
                ActiveElement::Stroke(stroke)
            }
            Some(ActiveElement::Shape(shape)) => ActiveElement::Shape(Shape {
                end: point,
                ..shape.clone()
            }),
            None => return self.clone(),
        };
        Self {
            active: Some(active),
            ..self.clone()
        }
    }

    /// Move the active element into its committed collection.
    pub fn commit_active(&self) -> Self {
        match &self.active {
            Some(ActiveElement::Stroke(stroke)) => Self {
                strokes: appended(&self.strokes, stroke.clone()),
                active: None,
                ..self.clone()
            },
            Some(ActiveElement::Shape(shape)) => Self {
                shapes: appended(&self.shapes, shape.clone()),
                active: None,
                ..self.clone()
            },
            None => self.clone(),
        }
    }

    /// Append a text element. Blank text leaves the state unchanged.
    pub fn commit_text(&self, position: Point, text: &str, color: Rgba, font_size: f64) -> Self {
        match TextElement::new(position, text, color, font_size) {
            Some(element) => Self {
                texts: appended(&self.texts, element),
                ..self.clone()
            },
            None => self.clone(),
        }
    }

    pub fn with_tool(&self, tool: ToolKind) -> Self {
        Self {
            tool,
            ..self.clone()
        }
    }

    pub fn with_color(&self, color: Rgba) -> Self {
        Self {
            color,
            ..self.clone()
        }
    }

    /// Replace the brush size, clamped to `[MIN_BRUSH_SIZE, MAX_BRUSH_SIZE]`.
    pub fn with_brush_size(&self, brush_size: f64) -> Self {
        Self {
            brush_size: clamp_brush_size(brush_size, self.brush_size),
            ..self.clone()
        }
    }

    /// Replace the zoom, clamped to `[MIN_ZOOM, MAX_ZOOM]`.
    pub fn with_zoom(&self, zoom: f64) -> Self {
        self.with_camera(self.camera.with_zoom(zoom))
    }

    pub fn with_pan(&self, pan: Point) -> Self {
        self.with_camera(self.camera.with_pan(pan))
    }

    /// Replace the camera, re-clamping its zoom.
    pub fn with_camera(&self, camera: Camera) -> Self {
        let camera = Camera::default()
            .with_zoom(camera.zoom)
            .with_pan(camera.pan);
        Self {
            camera,
            ..self.clone()
        }
    }

    /// True when nothing is committed or active.
    pub fn is_empty(&self) -> bool {
        self.element_count() == 0 && self.active.is_none()
    }

    /// Number of committed strokes, shapes and texts.
    pub fn element_count(&self) -> usize {
        self.strokes.len() + self.shapes.len() + self.texts.len()
    }

    fn committed_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.strokes
            .iter()
            .flat_map(Element::extent_points)
            .chain(self.shapes.iter().flat_map(Element::extent_points))
            .chain(self.texts.iter().flat_map(Element::extent_points))
    }

    /// Bounding box over every stroke point, shape endpoint and text anchor,
    /// including the active element.
    pub fn content_bounds(&self) -> Option<Rect> {
        let active = match &self.active {
            Some(ActiveElement::Stroke(stroke)) => stroke.extent_points(),
            Some(ActiveElement::Shape(shape)) => shape.extent_points(),
            None => Vec::new(),
        };
        bounds_of(self.committed_points().chain(active))
    }

    /// Like [`content_bounds`](Self::content_bounds), ignoring the active element.
    pub fn committed_bounds(&self) -> Option<Rect> {
        bounds_of(self.committed_points())
    }
}
