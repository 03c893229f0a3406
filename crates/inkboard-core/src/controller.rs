//! Pointer state machine translating raw input into drawing state mutations.

use crate::config::ZoomConfig;
use crate::input::{PointerEvent, TouchEvent};
use crate::state::DrawingState;
use crate::tools::ToolKind;
use kurbo::Point;

/// What the pointer is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Mode {
    #[default]
    Idle,
    /// A stroke or shape is being dragged out.
    Drawing,
    /// The view is being dragged; `anchor` is the last screen position seen.
    Panning { anchor: Point },
}

/// How a mutation relates to the current gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    /// Starts something the user will want to undo on its own.
    Checkpoint,
    /// Continues or finishes a gesture (moves, commits, pans, wheel zooms).
    Transient,
}

/// A new state produced by an event.
#[derive(Debug, Clone)]
pub struct Mutation {
    pub state: DrawingState,
    pub kind: MutationKind,
}

/// Result flags reported back to the host for each event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventOutcome {
    /// The visible state changed and a repaint is needed.
    pub changed: bool,
    /// The host should suppress the platform default (context menu, page scroll).
    pub suppress_default: bool,
}

impl EventOutcome {
    pub const UNCHANGED: Self = Self {
        changed: false,
        suppress_default: false,
    };

    pub fn merge(self, other: Self) -> Self {
        Self {
            changed: self.changed || other.changed,
            suppress_default: self.suppress_default || other.suppress_default,
        }
    }
}

/// Request to open a text-entry overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextRequest {
    pub world_position: Point,
    pub screen_position: Point,
}

/// Everything an event produced.
#[derive(Debug, Clone, Default)]
pub struct Response {
    pub outcome: EventOutcome,
    pub mutation: Option<Mutation>,
    pub text_request: Option<TextRequest>,
}

impl Response {
    fn mutated(state: DrawingState, kind: MutationKind) -> Self {
        Self {
            outcome: EventOutcome {
                changed: true,
                suppress_default: false,
            },
            mutation: Some(Mutation { state, kind }),
            text_request: None,
        }
    }

    fn suppressing(mut self) -> Self {
        self.outcome.suppress_default = true;
        self
    }
}

/// Explicit pointer state machine.
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    mode: Mode,
    zoom: ZoomConfig,
    last_touch: Point,
}

impl InteractionController {
    pub fn new(zoom: ZoomConfig) -> Self {
        Self {
            mode: Mode::Idle,
            zoom,
            last_touch: Point::ZERO,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Drop any gesture in progress without touching the state.
    pub fn reset(&mut self) {
        self.mode = Mode::Idle;
    }

    /// Handle a mouse event against `state`.
    pub fn handle_pointer(&mut self, state: &DrawingState, event: &PointerEvent) -> Response {
        log::trace!("Pointer event {:?} in mode {:?}", event, self.mode);
        match *event {
            PointerEvent::Down {
                position,
                button,
                modifiers,
            } => self.pointer_down(state, position, button.is_primary() && !modifiers.requests_pan()),
            PointerEvent::Move { position } => self.pointer_move(state, position),
            PointerEvent::Up { .. } | PointerEvent::Leave => self.pointer_release(state),
            PointerEvent::Wheel { position, delta } => {
                let factor = if delta.y > 0.0 {
                    self.zoom.wheel_out
                } else {
                    self.zoom.wheel_in
                };
                let camera = state.camera().zoom_at(position, factor);
                let response = if camera == state.camera() {
                    Response::default()
                } else {
                    Response::mutated(state.with_camera(camera), MutationKind::Transient)
                };
                response.suppressing()
            }
            PointerEvent::ContextMenu => Response::default().suppressing(),
        }
    }

    /// Handle a touch event as the equivalent primary-button pointer event.
    pub fn handle_touch(&mut self, state: &DrawingState, event: TouchEvent) -> Response {
        let pointer = event.to_pointer(self.last_touch);
        if let TouchEvent::Start { position } | TouchEvent::Move { position } = event {
            self.last_touch = position;
        }
        self.handle_pointer(state, &pointer).suppressing()
    }

    fn pointer_down(&mut self, state: &DrawingState, position: Point, draws: bool) -> Response {
        if self.mode != Mode::Idle {
            return Response::default();
        }
        if !draws {
            self.mode = Mode::Panning { anchor: position };
            return Response::default();
        }

        let world = state.camera().screen_to_world(position);
        let tool = state.tool();
        if tool == ToolKind::Text {
            return Response {
                text_request: Some(TextRequest {
                    world_position: world,
                    screen_position: position,
                }),
                ..Response::default()
            };
        }

        let next = if tool.stroke_tool().is_some() {
            state.begin_stroke(tool, state.color(), state.brush_size(), world)
        } else {
            state.begin_shape(tool, state.color(), state.brush_size(), world)
        };
        self.mode = Mode::Drawing;
        Response::mutated(next, MutationKind::Checkpoint)
    }

    fn pointer_move(&mut self, state: &DrawingState, position: Point) -> Response {
        match self.mode {
            Mode::Idle => Response::default(),
            Mode::Drawing => {
                if !state.is_drawing() {
                    // The active element went away underneath us (undo mid-drag).
                    self.mode = Mode::Idle;
                    return Response::default();
                }
                let world = state.camera().screen_to_world(position);
                Response::mutated(state.append_to_active(world), MutationKind::Transient)
            }
            Mode::Panning { anchor } => {
                self.mode = Mode::Panning { anchor: position };
                let delta = position - anchor;
                if delta.hypot2() == 0.0 {
                    return Response::default();
                }
                let camera = state.camera().panned_by_screen_delta(delta);
                Response::mutated(state.with_camera(camera), MutationKind::Transient)
            }
        }
    }

    fn pointer_release(&mut self, state: &DrawingState) -> Response {
        let mode = std::mem::take(&mut self.mode);
        if mode == Mode::Drawing && state.is_drawing() {
            return Response::mutated(state.commit_active(), MutationKind::Transient);
        }
        Response::default()
    }
}
