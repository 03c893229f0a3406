//! CPU renderer backed by tiny-skia.

use crate::grid::{GRID_COLOR, GridSpec, MAJOR_OPACITY, MINOR_OPACITY};
use crate::paint::{paint_content, paint_lines, skia_color, skia_transform};
use crate::renderer::{GridStyle, RenderContext, RenderResult, Renderer, RendererError};
use tiny_skia::{Color, Pixmap, PixmapPaint, Transform};

/// Renders into an owned pixmap sized to the viewport in physical pixels.
///
/// Content is painted onto a separate transparent layer and composited over
/// the background and grid, so eraser strokes only remove ink.
#[derive(Debug, Default)]
pub struct SkiaRenderer {
    frame: Option<Pixmap>,
    layer: Option<Pixmap>,
}

/// Reuse `slot` when it already has the requested size.
fn surface(slot: &mut Option<Pixmap>, width: u32, height: u32) -> RenderResult<&mut Pixmap> {
    let reusable = matches!(slot, Some(p) if p.width() == width && p.height() == height);
    if !reusable {
        *slot = Pixmap::new(width, height);
    }
    slot.as_mut()
        .ok_or(RendererError::SurfaceUnavailable { width, height })
}

impl SkiaRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last rendered frame (premultiplied RGBA).
    pub fn frame(&self) -> Option<&Pixmap> {
        self.frame.as_ref()
    }

    fn paint_grid(pixmap: &mut Pixmap, ctx: &RenderContext, transform: Transform) {
        let zoom = ctx.state.zoom();
        let visible = ctx.visible_world_rect();
        let spec = GridSpec::compute(zoom, visible);

        let minor = spec.minor_lines(visible);
        if !minor.is_empty() {
            paint_lines(
                pixmap,
                &minor,
                GRID_COLOR.with_opacity(MINOR_OPACITY),
                GridSpec::minor_width(zoom),
                transform,
            );
        }
        paint_lines(
            pixmap,
            &spec.major_lines(visible),
            GRID_COLOR.with_opacity(MAJOR_OPACITY),
            GridSpec::major_width(zoom),
            transform,
        );
    }
}

impl Renderer for SkiaRenderer {
    fn render(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        let (width, height) = ctx.surface_size();
        let transform = skia_transform(ctx.transform());
        let background = skia_color(self.background_color(ctx));

        let layer = match surface(&mut self.layer, width, height) {
            Ok(layer) => layer,
            Err(err) => {
                log::warn!("Skipping frame: {err}");
                return Err(err);
            }
        };
        layer.fill(Color::TRANSPARENT);
        paint_content(layer, ctx.state, transform, true);

        let frame = surface(&mut self.frame, width, height)?;
        frame.fill(background);
        if ctx.grid_style == GridStyle::Lines {
            Self::paint_grid(frame, ctx, transform);
        }
        if let Some(layer) = &self.layer {
            frame.draw_pixmap(
                0,
                0,
                layer.as_ref(),
                &PixmapPaint::default(),
                Transform::identity(),
                None,
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkboard_core::shapes::Rgba;
    use inkboard_core::{DrawingState, ToolKind};
    use kurbo::{Point, Size};

    fn pixel(pixmap: &Pixmap, x: u32, y: u32) -> (u8, u8, u8, u8) {
        let p = pixmap.pixel(x, y).unwrap().demultiply();
        (p.red(), p.green(), p.blue(), p.alpha())
    }

    fn stroked_state() -> DrawingState {
        DrawingState::default()
            .begin_stroke(ToolKind::Pen, Rgba::rgb(0, 0, 255), 8.0, Point::new(0.0, 25.0))
            .append_to_active(Point::new(50.0, 25.0))
            .append_to_active(Point::new(100.0, 25.0))
            .commit_active()
    }

    #[test]
    fn test_zero_viewport_is_unavailable() {
        let state = DrawingState::default();
        let mut renderer = SkiaRenderer::new();
        let result = renderer.render(&RenderContext::new(&state, Size::new(0.0, 100.0)));
        assert!(matches!(result, Err(RendererError::SurfaceUnavailable { width: 0, .. })));
    }

    #[test]
    fn test_background_and_content() {
        let state = stroked_state();
        let mut renderer = SkiaRenderer::new();
        let ctx = RenderContext::new(&state, Size::new(100.0, 50.0)).with_grid(GridStyle::None);
        renderer.render(&ctx).unwrap();

        let frame = renderer.frame().unwrap();
        assert_eq!((frame.width(), frame.height()), (100, 50));
        assert_eq!(pixel(frame, 5, 5), (255, 255, 255, 255));
        assert_eq!(pixel(frame, 25, 25), (0, 0, 255, 255));
    }

    #[test]
    fn test_eraser_reveals_background() {
        let state = stroked_state()
            .begin_stroke(ToolKind::Eraser, Rgba::black(), 20.0, Point::new(25.0, 0.0))
            .append_to_active(Point::new(25.0, 50.0))
            .commit_active();
        let mut renderer = SkiaRenderer::new();
        let ctx = RenderContext::new(&state, Size::new(100.0, 50.0))
            .with_grid(GridStyle::None)
            .with_background(Rgba::rgb(10, 20, 30));
        renderer.render(&ctx).unwrap();
        assert_eq!(pixel(renderer.frame().unwrap(), 25, 25), (10, 20, 30, 255));
    }

    #[test]
    fn test_hidpi_and_idempotence() {
        let state = stroked_state().with_zoom(2.0);
        let mut renderer = SkiaRenderer::new();
        let ctx = RenderContext::new(&state, Size::new(60.0, 40.0)).with_scale_factor(2.0);
        renderer.render(&ctx).unwrap();
        let first = renderer.frame().unwrap().clone();
        assert_eq!((first.width(), first.height()), (120, 80));

        renderer.render(&ctx).unwrap();
        assert_eq!(renderer.frame().unwrap().data(), first.data());
    }

    #[test]
    fn test_grid_draws_faint_lines() {
        let state = DrawingState::default();
        let mut renderer = SkiaRenderer::new();
        let ctx = RenderContext::new(&state, Size::new(50.0, 50.0));
        renderer.render(&ctx).unwrap();
        let frame = renderer.frame().unwrap();
        // Minor line at x = 20 darkens the background slightly.
        let (r, _, _, a) = pixel(frame, 20, 5);
        assert!(r < 255);
        assert_eq!(a, 255);
        assert_eq!(pixel(frame, 30, 5), (255, 255, 255, 255));
    }
}
