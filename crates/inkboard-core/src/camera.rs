//! Camera module for pan/zoom transforms.
//!
//! World coordinates relate to screen coordinates (canvas-relative,
//! device-independent pixels) by `world = screen / zoom + pan`, where `pan`
//! is the world-space point shown at the viewport's top-left corner.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest allowed zoom factor.
pub const MIN_ZOOM: f64 = 0.1;
/// Largest allowed zoom factor.
pub const MAX_ZOOM: f64 = 5.0;

/// Convert a screen point to world coordinates.
pub fn to_world(screen: Point, zoom: f64, pan: Point) -> Point {
    Point::new(screen.x / zoom + pan.x, screen.y / zoom + pan.y)
}

/// Convert a world point to screen coordinates.
///
/// Only overlays need this (e.g. placing the text-entry field); the renderer
/// applies [`Camera::transform`] to its surface instead.
pub fn to_screen(world: Point, zoom: f64, pan: Point) -> Point {
    Point::new((world.x - pan.x) * zoom, (world.y - pan.y) * zoom)
}

/// Clamp a requested zoom into `[MIN_ZOOM, MAX_ZOOM]`.
///
/// Non-finite requests fall back to `current`.
pub fn clamp_zoom(requested: f64, current: f64) -> f64 {
    if requested.is_finite() {
        requested.clamp(MIN_ZOOM, MAX_ZOOM)
    } else {
        current
    }
}

/// Camera manages the view transform for the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// World-space origin of the viewport's top-left corner.
    pub pan: Point,
    /// Current zoom level, always within `[MIN_ZOOM, MAX_ZOOM]`.
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            pan: Point::ORIGIN,
            zoom: 1.0,
        }
    }
}

impl Camera {
    /// Create a new camera at 100% looking at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the affine transform for rendering (world to screen).
    ///
    /// Scale by zoom, then translate by `-pan`.
    pub fn transform(&self) -> Affine {
        Affine::scale(self.zoom) * Affine::translate(-self.pan.to_vec2())
    }

    /// Get the inverse transform for input handling (screen to world).
    pub fn inverse_transform(&self) -> Affine {
        Affine::translate(self.pan.to_vec2()) * Affine::scale(1.0 / self.zoom)
    }

    /// Convert a screen point to world coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        to_world(screen_point, self.zoom, self.pan)
    }

    /// Convert a world point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        to_screen(world_point, self.zoom, self.pan)
    }

    /// Return a camera with the given zoom, clamped.
    pub fn with_zoom(self, zoom: f64) -> Self {
        Self {
            zoom: clamp_zoom(zoom, self.zoom),
            ..self
        }
    }

    /// Return a camera with the given pan. Non-finite coordinates are ignored.
    pub fn with_pan(self, pan: Point) -> Self {
        if pan.is_finite() { Self { pan, ..self } } else { self }
    }

    /// Return a camera panned by a screen-space drag delta.
    ///
    /// Dragging right moves the content right, so the world origin moves left.
    pub fn panned_by_screen_delta(self, delta: Vec2) -> Self {
        self.with_pan(self.pan - delta / self.zoom)
    }

    /// Return a camera zoomed by `factor`, keeping the world point under
    /// `screen_point` fixed on screen.
    pub fn zoom_at(self, screen_point: Point, factor: f64) -> Self {
        let new_zoom = clamp_zoom(self.zoom * factor, self.zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return self;
        }

        let world_point = self.screen_to_world(screen_point);
        let ratio = self.zoom / new_zoom;
        let pan = Point::new(
            world_point.x - (world_point.x - self.pan.x) * ratio,
            world_point.y - (world_point.y - self.pan.y) * ratio,
        );

        Self {
            pan,
            zoom: new_zoom,
        }
    }
}
