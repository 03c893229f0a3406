//! Renderer trait abstraction.

use inkboard_core::DrawingState;
use inkboard_core::shapes::Rgba;
use kurbo::{Affine, Rect, Size};
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    /// The surface could not be allocated, usually because the viewport is
    /// zero-sized. Skip the frame and retry on the next resize.
    #[error("Surface unavailable for a {width}x{height} viewport")]
    SurfaceUnavailable { width: u32, height: u32 },
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Grid display style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridStyle {
    /// No grid (plain background).
    None,
    /// Adaptive minor and major lines.
    #[default]
    Lines,
}

impl GridStyle {
    /// Toggle between the styles.
    pub fn next(self) -> Self {
        match self {
            GridStyle::None => GridStyle::Lines,
            GridStyle::Lines => GridStyle::None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GridStyle::None => "None",
            GridStyle::Lines => "Lines",
        }
    }
}

/// Context for a single render frame.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// The state to render.
    pub state: &'a DrawingState,
    /// Viewport size in logical pixels.
    pub viewport_size: Size,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
    /// Background color.
    pub background: Rgba,
    /// Grid display style.
    pub grid_style: GridStyle,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(state: &'a DrawingState, viewport_size: Size) -> Self {
        Self {
            state,
            viewport_size,
            scale_factor: 1.0,
            background: Rgba::white(),
            grid_style: GridStyle::Lines,
        }
    }

    /// Set the scale factor for HiDPI. Non-positive values are ignored.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        if scale_factor.is_finite() && scale_factor > 0.0 {
            self.scale_factor = scale_factor;
        }
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Rgba) -> Self {
        self.background = color;
        self
    }

    /// Set the grid style.
    pub fn with_grid(mut self, style: GridStyle) -> Self {
        self.grid_style = style;
        self
    }

    /// Surface size in physical pixels.
    pub fn surface_size(&self) -> (u32, u32) {
        let physical = |logical: f64| {
            let px = (logical * self.scale_factor).round();
            if px.is_finite() && px > 0.0 {
                px.min(u32::MAX as f64) as u32
            } else {
                0
            }
        };
        (
            physical(self.viewport_size.width),
            physical(self.viewport_size.height),
        )
    }

    /// World to physical pixel transform.
    pub fn transform(&self) -> Affine {
        Affine::scale(self.scale_factor) * self.state.camera().transform()
    }

    /// The world-space rectangle covered by the viewport.
    pub fn visible_world_rect(&self) -> Rect {
        let camera = self.state.camera();
        Rect::from_points(
            camera.screen_to_world(kurbo::Point::ZERO),
            camera.screen_to_world(kurbo::Point::new(
                self.viewport_size.width,
                self.viewport_size.height,
            )),
        )
    }
}

/// Trait for rendering backends.
pub trait Renderer: Send + Sync {
    /// Paint one frame of `ctx.state`.
    ///
    /// The same state and viewport always produce identical output.
    fn render(&mut self, ctx: &RenderContext) -> RenderResult<()>;

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Rgba {
        ctx.background
    }
}
