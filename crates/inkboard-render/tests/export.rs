//! Exports driven from a live session.

use inkboard_core::{PointerEvent, Session, ToolKind};
use inkboard_render::{
    ExportError, ExportOptions, GridStyle, RenderContext, Renderer, SkiaRenderer, export_raster,
    export_vector,
};
use kurbo::{Point, Size};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn drag(session: &mut Session, from: Point, to: Point) {
    session.handle_pointer(&PointerEvent::down(from));
    session.handle_pointer(&PointerEvent::moved(to));
    session.handle_pointer(&PointerEvent::up(to));
}

fn png_size(bytes: &[u8]) -> (u32, u32) {
    // IHDR width and height follow the 8-byte signature and 8-byte chunk header.
    let word = |at: usize| u32::from_be_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]]);
    (word(16), word(20))
}

#[test]
fn empty_session_has_nothing_to_export() {
    init_logger();
    let session = Session::new();
    let options = ExportOptions::default();
    assert!(matches!(
        export_raster(session.state(), &options),
        Err(ExportError::NothingToExport)
    ));
    assert!(matches!(
        export_vector(session.state(), &options),
        Err(ExportError::NothingToExport)
    ));
}

#[test]
fn export_ignores_camera() {
    init_logger();
    let mut session = Session::new();
    drag(&mut session, Point::new(0.0, 0.0), Point::new(10.0, 10.0));
    let (w, h) = png_size(&export_raster(session.state(), &ExportOptions::default()).unwrap().bytes);
    assert_eq!((w, h), (110, 110));

    session.set_zoom(3.0);
    let zoomed = export_raster(session.state(), &ExportOptions::default()).unwrap();
    assert_eq!(png_size(&zoomed.bytes), (110, 110));
}

#[test]
fn vector_export_lists_every_element() {
    init_logger();
    let mut session = Session::new();
    drag(&mut session, Point::new(0.0, 0.0), Point::new(20.0, 20.0));
    session.set_tool(ToolKind::Circle);
    drag(&mut session, Point::new(50.0, 50.0), Point::new(60.0, 50.0));
    session.set_tool(ToolKind::Text);
    session.handle_pointer(&PointerEvent::down(Point::new(100.0, 100.0)));
    session.update_text_entry("Label");
    session.confirm_text();

    let file = export_vector(session.state(), &ExportOptions::default()).unwrap();
    let svg = String::from_utf8(file.bytes).unwrap();
    assert!(svg.contains("<path"));
    assert!(svg.contains("<circle"));
    assert!(svg.contains(">Label</text>"));
    assert!(svg.contains("Whiteboard Export - "));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn render_live_session() {
    init_logger();
    let mut session = Session::new();
    drag(&mut session, Point::new(10.0, 10.0), Point::new(90.0, 10.0));

    let mut renderer = SkiaRenderer::new();
    let ctx = RenderContext::new(session.state(), Size::new(100.0, 40.0)).with_grid(GridStyle::Lines);
    renderer.render(&ctx).unwrap();
    let frame = renderer.frame().unwrap();
    assert_eq!((frame.width(), frame.height()), (100, 40));
}
