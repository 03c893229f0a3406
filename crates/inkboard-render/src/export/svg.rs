use super::{ExportOptions, ExportResult, ExportedFile, metadata_stamp, padded_bounds};
use inkboard_core::DrawingState;
use inkboard_core::shapes::{Rgba, Shape, ShapeKind, Stroke, TextElement};
use std::fmt::Write as _;

/// Serialize the drawing to a standalone SVG document.
///
/// Eraser strokes have no vector equivalent and are left out.
pub fn export_vector(state: &DrawingState, options: &ExportOptions) -> ExportResult<ExportedFile> {
    let bounds = padded_bounds(state)?;
    let (width, height) = (bounds.width(), bounds.height());

    let mut out = String::new();
    let _ = writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="{} {} {width} {height}">"#,
        bounds.x0, bounds.y0
    );
    let _ = writeln!(out, "  <style>");
    let _ = writeln!(
        out,
        "    .stroke, .shape {{ fill: none; stroke-linecap: round; stroke-linejoin: round; }}"
    );
    let _ = writeln!(out, "  </style>");

    for stroke in state.strokes() {
        write_stroke(&mut out, stroke);
    }
    for shape in state.shapes() {
        write_shape(&mut out, shape);
    }
    for text in state.texts() {
        write_text(&mut out, text);
    }

    if options.include_metadata {
        let _ = writeln!(
            out,
            "  <text x=\"{}\" y=\"{}\" font-family=\"Arial\" font-size=\"12\" fill=\"#666666\">{}</text>",
            bounds.x0 + 10.0,
            bounds.y1 - 10.0,
            escape_xml(&metadata_stamp())
        );
    }
    let _ = writeln!(out, "</svg>");

    log::info!("Exported {}x{} SVG ({} bytes)", width, height, out.len());
    Ok(ExportedFile::new("svg", "image/svg+xml", out.into_bytes()))
}

/// `stroke` and `stroke-opacity` attributes for a color.
fn paint_attrs(color: Rgba) -> String {
    if color.a == 255 {
        format!("stroke=\"{}\"", color.to_rgb_hex())
    } else {
        format!(
            "stroke=\"{}\" stroke-opacity=\"{:.3}\"",
            color.to_rgb_hex(),
            color.opacity()
        )
    }
}

fn write_stroke(out: &mut String, stroke: &Stroke) {
    if stroke.is_eraser() || !stroke.is_renderable() {
        return;
    }
    let _ = writeln!(
        out,
        "  <path class=\"stroke\" d=\"{}\" {} stroke-width=\"{}\" />",
        stroke.to_path().to_svg(),
        paint_attrs(stroke.color),
        stroke.width
    );
}

fn write_shape(out: &mut String, shape: &Shape) {
    let common = format!(
        "class=\"shape\" {} stroke-width=\"{}\"",
        paint_attrs(shape.color),
        shape.stroke_width
    );
    let _ = match shape.kind {
        ShapeKind::Rectangle => {
            let rect = shape.normalized_rect();
            writeln!(
                out,
                "  <rect {common} x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" />",
                rect.x0,
                rect.y0,
                rect.width(),
                rect.height()
            )
        }
        ShapeKind::Circle => writeln!(
            out,
            "  <circle {common} cx=\"{}\" cy=\"{}\" r=\"{}\" />",
            shape.start.x,
            shape.start.y,
            shape.radius()
        ),
        ShapeKind::Line => writeln!(
            out,
            "  <line {common} x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" />",
            shape.start.x, shape.start.y, shape.end.x, shape.end.y
        ),
    };
}

fn write_text(out: &mut String, text: &TextElement) {
    // Positions are top-left anchored.
    let _ = writeln!(
        out,
        "  <text x=\"{}\" y=\"{}\" dominant-baseline=\"hanging\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\"{}>{}</text>",
        text.position.x,
        text.position.y,
        escape_xml(&text.font_family),
        text.font_size,
        text.color.to_rgb_hex(),
        if text.color.a == 255 {
            String::new()
        } else {
            format!(" fill-opacity=\"{:.3}\"", text.color.opacity())
        },
        escape_xml(&text.content)
    );
}

fn escape_xml(input: &str) -> String {
    let mut s = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => s.push_str("&amp;"),
            '<' => s.push_str("&lt;"),
            '>' => s.push_str("&gt;"),
            '"' => s.push_str("&quot;"),
            _ => s.push(ch),
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ExportError;
    use inkboard_core::ToolKind;
    use kurbo::Point;

    fn plain() -> ExportOptions {
        ExportOptions {
            include_metadata: false,
            ..ExportOptions::default()
        }
    }

    fn svg_text(state: &DrawingState, options: &ExportOptions) -> String {
        let file = export_vector(state, options).unwrap();
        assert_eq!(file.mime_type, "image/svg+xml");
        assert!(file.file_name.ends_with(".svg"));
        String::from_utf8(file.bytes).unwrap()
    }

    #[test]
    fn test_empty_drawing_rejected() {
        assert!(matches!(
            export_vector(&DrawingState::default(), &plain()),
            Err(ExportError::NothingToExport)
        ));
    }

    #[test]
    fn test_viewbox_and_stroke_path() {
        let state = DrawingState::default()
            .begin_stroke(ToolKind::Pen, Rgba::black(), 5.0, Point::new(0.0, 0.0))
            .append_to_active(Point::new(10.0, 10.0))
            .commit_active();
        let svg = svg_text(&state, &plain());
        assert!(svg.contains(r#"width="110" height="110" viewBox="-50 -50 110 110""#));
        assert!(svg.contains(r##"<path class="stroke" d="M0,0 Q0,0 5,5" stroke="#000000" stroke-width="5" />"##));
        assert!(!svg.contains("Whiteboard Export"));
    }

    #[test]
    fn test_eraser_and_dots_omitted() {
        let state = DrawingState::default()
            .begin_stroke(ToolKind::Eraser, Rgba::black(), 5.0, Point::new(0.0, 0.0))
            .append_to_active(Point::new(10.0, 10.0))
            .commit_active()
            .begin_stroke(ToolKind::Pen, Rgba::black(), 5.0, Point::new(3.0, 3.0))
            .commit_active();
        let svg = svg_text(&state, &plain());
        assert!(!svg.contains("<path"));
    }

    #[test]
    fn test_shapes_and_text() {
        let state = DrawingState::default()
            .begin_shape(ToolKind::Rectangle, Rgba::rgb(255, 0, 0), 2.0, Point::new(10.0, 10.0))
            .append_to_active(Point::new(0.0, 0.0))
            .begin_shape(ToolKind::Circle, Rgba::black(), 2.0, Point::new(0.0, 0.0))
            .append_to_active(Point::new(3.0, 4.0))
            .begin_shape(ToolKind::Line, Rgba::black(), 2.0, Point::new(1.0, 2.0))
            .append_to_active(Point::new(3.0, 4.0))
            .commit_active()
            .commit_text(Point::new(5.0, 5.0), "a < b & c", Rgba::black(), 12.0);
        let svg = svg_text(&state, &plain());

        assert!(svg.contains(r##"<rect class="shape" stroke="#ff0000" stroke-width="2" x="0" y="0" width="10" height="10" />"##));
        assert!(svg.contains(r#"cx="0" cy="0" r="5""#));
        assert!(svg.contains(r#"x1="1" y1="2" x2="3" y2="4""#));
        assert!(svg.contains("a &lt; b &amp; c</text>"));

        let rect = svg.find("<rect").unwrap();
        let text = svg.find("<text").unwrap();
        assert!(rect < text);
    }

    #[test]
    fn test_metadata_position() {
        let state = DrawingState::default().commit_text(Point::new(0.0, 0.0), "x", Rgba::black(), 12.0);
        let svg = svg_text(&state, &ExportOptions::default());
        assert!(svg.contains(r##"<text x="-40" y="40" font-family="Arial" font-size="12" fill="#666666">Whiteboard Export - "##));
    }
}
