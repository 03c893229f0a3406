//! End-to-end session scenarios driven through pointer events.

use inkboard_core::{
    DrawingState, MAX_ZOOM, MIN_ZOOM, Modifiers, MouseButton, PointerEvent, Rgba, Session,
    StrokeTool, ToolKind, TouchEvent,
};
use kurbo::{Point, Vec2};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn drag(session: &mut Session, from: Point, to: Point) {
    session.handle_pointer(&PointerEvent::down(from));
    session.handle_pointer(&PointerEvent::moved(to));
    session.handle_pointer(&PointerEvent::up(to));
}

#[test]
fn pen_stroke_then_undo_everything() {
    init_logger();
    let mut session = Session::new();
    drag(&mut session, Point::new(0.0, 0.0), Point::new(10.0, 0.0));

    let state = session.state();
    assert_eq!(state.strokes().len(), 1);
    assert_eq!(state.strokes()[0].points.len(), 2);
    assert!(!state.is_drawing());

    while session.undo() {}
    assert_eq!(session.state(), &DrawingState::default());
    assert!(session.can_redo());
}

#[test]
fn shapes_and_eraser_accumulate() {
    init_logger();
    let mut session = Session::new();
    for tool in [ToolKind::Rectangle, ToolKind::Circle, ToolKind::Line] {
        session.set_tool(tool);
        drag(&mut session, Point::new(10.0, 10.0), Point::new(40.0, 30.0));
    }
    assert_eq!(session.state().shapes().len(), 3);

    session.set_tool(ToolKind::Eraser);
    session.set_color(Rgba::rgb(0, 0, 255));
    drag(&mut session, Point::new(0.0, 0.0), Point::new(50.0, 50.0));

    let state = session.state();
    assert_eq!(state.shapes().len(), 3);
    assert_eq!(state.strokes().len(), 1);
    assert_eq!(state.strokes()[0].tool, StrokeTool::Eraser);
    assert_eq!(state.strokes()[0].color, Rgba::white());
}

#[test]
fn pan_then_draw_lands_in_world_space() {
    init_logger();
    let mut session = Session::new();
    session.handle_pointer(&PointerEvent::Down {
        position: Point::new(100.0, 100.0),
        button: MouseButton::Middle,
        modifiers: Modifiers::default(),
    });
    session.handle_pointer(&PointerEvent::moved(Point::new(150.0, 100.0)));
    session.handle_pointer(&PointerEvent::Leave);
    assert_eq!(session.state().pan(), Point::new(-50.0, 0.0));
    assert!(session.state().strokes().is_empty());

    drag(&mut session, Point::new(0.0, 0.0), Point::new(10.0, 0.0));
    assert_eq!(session.state().strokes()[0].points[0], Point::new(-50.0, 0.0));
}

#[test]
fn wheel_zoom_stays_clamped() {
    init_logger();
    let mut session = Session::new();
    let wheel = |dy: f64| PointerEvent::Wheel {
        position: Point::new(200.0, 150.0),
        delta: Vec2::new(0.0, dy),
    };
    for _ in 0..40 {
        let outcome = session.handle_pointer(&wheel(-1.0));
        assert!(outcome.suppress_default);
    }
    assert_eq!(session.state().zoom(), MAX_ZOOM);
    for _ in 0..80 {
        session.handle_pointer(&wheel(1.0));
    }
    assert_eq!(session.state().zoom(), MIN_ZOOM);
}

#[test]
fn touch_draws_like_mouse() {
    init_logger();
    let mut session = Session::new();
    session.handle_touch(TouchEvent::Start { position: Point::new(5.0, 5.0) });
    session.handle_touch(TouchEvent::Move { position: Point::new(6.0, 8.0) });
    let outcome = session.handle_touch(TouchEvent::End);
    assert!(outcome.changed);
    assert_eq!(session.state().strokes().len(), 1);
}

#[test]
fn history_is_bounded() {
    init_logger();
    let mut session = Session::new();
    for i in 0..30 {
        let x = i as f64;
        drag(&mut session, Point::new(x, 0.0), Point::new(x, 10.0));
    }
    let mut undos = 0;
    while session.undo() {
        undos += 1;
    }
    assert_eq!(undos, 50);
    assert!(!session.state().strokes().is_empty());
}
