//! Painting model elements onto a tiny-skia pixmap.

use crate::fonts::{self, TextAnchor};
use inkboard_core::shapes::{Rgba, Shape, Stroke, TextElement};
use inkboard_core::{ActiveElement, DrawingState};
use kurbo::{Affine, BezPath, Line, PathEl};
use tiny_skia::{
    BlendMode, Color, FillRule, LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap, Transform,
};

pub(crate) fn skia_color(color: Rgba) -> Color {
    Color::from_rgba8(color.r, color.g, color.b, color.a)
}

/// kurbo affine to tiny-skia transform. Both use the `[a b c d e f]` layout.
pub(crate) fn skia_transform(affine: Affine) -> Transform {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
}

/// Convert a kurbo path. Returns `None` for paths tiny-skia rejects (empty
/// or a lone move).
pub(crate) fn skia_path(path: &BezPath) -> Option<Path> {
    let mut pb = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p) => pb.quad_to(p1.x as f32, p1.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(p1, p2, p) => pb.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

fn line_style(width: f64, cap: LineCap, join: LineJoin) -> tiny_skia::Stroke {
    tiny_skia::Stroke {
        width: width as f32,
        line_cap: cap,
        line_join: join,
        ..Default::default()
    }
}

/// Paint a freehand stroke. Eraser strokes clear whatever is beneath them.
pub(crate) fn paint_stroke(pixmap: &mut Pixmap, stroke: &Stroke, transform: Transform) {
    if !stroke.is_renderable() {
        return;
    }
    let Some(path) = skia_path(&stroke.to_path()) else {
        return;
    };

    let mut paint = Paint::default();
    paint.anti_alias = true;
    if stroke.is_eraser() {
        paint.set_color(Color::BLACK);
        paint.blend_mode = BlendMode::DestinationOut;
    } else {
        paint.set_color(skia_color(stroke.color));
    }
    let style = line_style(stroke.width, LineCap::Round, LineJoin::Round);
    pixmap.stroke_path(&path, &paint, &style, transform, None);
}

pub(crate) fn paint_shape(pixmap: &mut Pixmap, shape: &Shape, transform: Transform) {
    let Some(path) = skia_path(&shape.to_path()) else {
        return;
    };
    let mut paint = Paint::default();
    paint.anti_alias = true;
    paint.set_color(skia_color(shape.color));
    let style = line_style(shape.stroke_width, LineCap::Round, LineJoin::Round);
    pixmap.stroke_path(&path, &paint, &style, transform, None);
}

/// Fill glyph outlines for `content`. Skipped when no font is available.
pub(crate) fn paint_label(
    pixmap: &mut Pixmap,
    content: &str,
    font_size: f64,
    origin: kurbo::Point,
    anchor: TextAnchor,
    color: Rgba,
    transform: Transform,
) {
    let Some(outline) = fonts::text_outline(content, font_size, origin, anchor) else {
        return;
    };
    let Some(path) = skia_path(&outline) else {
        return;
    };
    let mut paint = Paint::default();
    paint.anti_alias = true;
    paint.set_color(skia_color(color));
    pixmap.fill_path(&path, &paint, FillRule::Winding, transform, None);
}

pub(crate) fn paint_text(pixmap: &mut Pixmap, text: &TextElement, transform: Transform) {
    paint_label(
        pixmap,
        &text.content,
        text.font_size,
        text.position,
        TextAnchor::Top,
        text.color,
        transform,
    );
}

/// Paint straight lines with butt caps, used for the grid.
pub(crate) fn paint_lines(
    pixmap: &mut Pixmap,
    lines: &[Line],
    color: Rgba,
    width: f64,
    transform: Transform,
) {
    let mut pb = PathBuilder::new();
    for line in lines {
        pb.move_to(line.p0.x as f32, line.p0.y as f32);
        pb.line_to(line.p1.x as f32, line.p1.y as f32);
    }
    let Some(path) = pb.finish() else {
        return;
    };
    let mut paint = Paint::default();
    paint.anti_alias = true;
    paint.set_color(skia_color(color));
    let style = line_style(width, LineCap::Butt, LineJoin::Miter);
    pixmap.stroke_path(&path, &paint, &style, transform, None);
}

/// Paint every element in z-order: strokes, shapes, then texts. With
/// `include_active`, each committed list is followed by its active element.
pub(crate) fn paint_content(
    pixmap: &mut Pixmap,
    state: &DrawingState,
    transform: Transform,
    include_active: bool,
) {
    let active = if include_active { state.active() } else { None };

    for stroke in state.strokes() {
        paint_stroke(pixmap, stroke, transform);
    }
    if let Some(ActiveElement::Stroke(stroke)) = active {
        paint_stroke(pixmap, stroke, transform);
    }

    for shape in state.shapes() {
        paint_shape(pixmap, shape, transform);
    }
    if let Some(ActiveElement::Shape(shape)) = active {
        paint_shape(pixmap, shape, transform);
    }

    for text in state.texts() {
        paint_text(pixmap, text, transform);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkboard_core::ToolKind;
    use kurbo::Point;

    fn pixel(pixmap: &Pixmap, x: u32, y: u32) -> (u8, u8, u8, u8) {
        let p = pixmap.pixel(x, y).unwrap().demultiply();
        (p.red(), p.green(), p.blue(), p.alpha())
    }

    #[test]
    fn test_transform_matches_affine() {
        let affine = Affine::scale(2.0) * Affine::translate((-3.0, 4.0));
        let mut point = tiny_skia::Point::from_xy(1.0, 1.0);
        skia_transform(affine).map_point(&mut point);
        let expected = affine * Point::new(1.0, 1.0);
        assert!((point.x as f64 - expected.x).abs() < 1e-6);
        assert!((point.y as f64 - expected.y).abs() < 1e-6);
    }

    #[test]
    fn test_path_conversion() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.quad_to((5.0, 0.0), (10.0, 5.0));
        path.close_path();
        let converted = skia_path(&path).unwrap();
        assert_eq!(converted.len(), 3);
        assert!(skia_path(&BezPath::new()).is_none());
    }

    #[test]
    fn test_eraser_clears_ink() {
        let mut pixmap = Pixmap::new(20, 20).unwrap();
        let state = DrawingState::default()
            .begin_stroke(ToolKind::Pen, Rgba::black(), 6.0, Point::new(0.0, 10.0))
            .append_to_active(Point::new(20.0, 10.0))
            .commit_active();
        paint_content(&mut pixmap, &state, Transform::identity(), true);
        assert_eq!(pixel(&pixmap, 10, 10).3, 255);

        let erased = state
            .begin_stroke(ToolKind::Eraser, Rgba::black(), 10.0, Point::new(10.0, 0.0))
            .append_to_active(Point::new(10.0, 20.0))
            .commit_active();
        paint_content(&mut pixmap, &erased, Transform::identity(), true);
        assert_eq!(pixel(&pixmap, 10, 10).3, 0);
        assert_eq!(pixel(&pixmap, 1, 10).3, 255);
    }

    #[test]
    fn test_single_point_stroke_not_painted() {
        let mut pixmap = Pixmap::new(10, 10).unwrap();
        let state = DrawingState::default()
            .begin_stroke(ToolKind::Pen, Rgba::black(), 6.0, Point::new(5.0, 5.0))
            .commit_active();
        paint_content(&mut pixmap, &state, Transform::identity(), true);
        assert!(pixmap.pixels().iter().all(|p| p.alpha() == 0));
    }

    #[test]
    fn test_active_shape_painted() {
        let mut pixmap = Pixmap::new(30, 30).unwrap();
        let state = DrawingState::default()
            .begin_shape(ToolKind::Line, Rgba::rgb(255, 0, 0), 4.0, Point::new(0.0, 15.0))
            .append_to_active(Point::new(30.0, 15.0));
        paint_content(&mut pixmap, &state, Transform::identity(), true);
        assert_eq!(pixel(&pixmap, 15, 15), (255, 0, 0, 255));

        let mut committed_only = Pixmap::new(30, 30).unwrap();
        paint_content(&mut committed_only, &state, Transform::identity(), false);
        assert!(committed_only.pixels().iter().all(|p| p.alpha() == 0));
    }
}
