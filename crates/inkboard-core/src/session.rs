//! A whiteboard editing session: history, pointer controller and toolbar actions.

use crate::camera::to_screen;
use crate::config::{ConfigResult, HistoryGranularity, WhiteboardConfig};
use crate::controller::{EventOutcome, InteractionController, Mode, Mutation, MutationKind, Response};
use crate::history::History;
use crate::input::{PointerEvent, TouchEvent};
use crate::shapes::{Rgba, font_size_for_brush};
use crate::state::DrawingState;
use crate::tools::ToolKind;
use kurbo::Point;

/// Pending text entry, anchored in world space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEntry {
    pub world_position: Point,
    pub value: String,
}

impl TextEntry {
    /// Where the overlay field goes under the current camera.
    pub fn screen_position(&self, state: &DrawingState) -> Point {
        to_screen(self.world_position, state.zoom(), state.pan())
    }
}

/// Snapshot of what the toolbar displays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolbarStatus {
    pub tool: ToolKind,
    pub color: Rgba,
    pub brush_size: f64,
    pub zoom: f64,
    pub can_undo: bool,
    pub can_redo: bool,
}

impl ToolbarStatus {
    /// Zoom as a rounded percentage.
    pub fn zoom_percent(&self) -> i64 {
        (self.zoom * 100.0).round() as i64
    }
}

/// Owns the drawing history and routes input into it.
#[derive(Debug, Clone)]
pub struct Session {
    history: History,
    controller: InteractionController,
    config: WhiteboardConfig,
    text_entry: Option<TextEntry>,
}

impl Default for Session {
    fn default() -> Self {
        Self::build(WhiteboardConfig::default())
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session from a validated configuration.
    pub fn with_config(config: WhiteboardConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: WhiteboardConfig) -> Self {
        Self {
            history: History::with_config(config.initial_state(), &config.history),
            controller: InteractionController::new(config.zoom),
            config,
            text_entry: None,
        }
    }

    /// The live drawing state, for rendering and export.
    pub fn state(&self) -> &DrawingState {
        self.history.present()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &WhiteboardConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.controller.mode()
    }

    /// Route a mouse event. A press while a text entry is open confirms it first.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> EventOutcome {
        let confirmed = self.confirm_before_press(matches!(event, PointerEvent::Down { .. }));
        let response = self.controller.handle_pointer(self.history.present(), event);
        confirmed.merge(self.apply(response))
    }

    /// Route a touch event.
    pub fn handle_touch(&mut self, event: TouchEvent) -> EventOutcome {
        let confirmed = self.confirm_before_press(matches!(event, TouchEvent::Start { .. }));
        let response = self.controller.handle_touch(self.history.present(), event);
        confirmed.merge(self.apply(response))
    }

    fn confirm_before_press(&mut self, is_press: bool) -> EventOutcome {
        if is_press && self.text_entry.is_some() {
            EventOutcome {
                changed: self.confirm_text(),
                suppress_default: false,
            }
        } else {
            EventOutcome::UNCHANGED
        }
    }

    fn apply(&mut self, response: Response) -> EventOutcome {
        let mut outcome = response.outcome;
        if let Some(mutation) = response.mutation {
            self.apply_mutation(mutation);
        }
        if let Some(request) = response.text_request {
            self.text_entry = Some(TextEntry {
                world_position: request.world_position,
                value: String::new(),
            });
            outcome.changed = true;
        }
        outcome
    }

    fn apply_mutation(&mut self, mutation: Mutation) {
        let committed = mutation.state.element_count() > self.state().element_count();
        match (self.config.history.granularity, mutation.kind) {
            (HistoryGranularity::PerGesture, MutationKind::Transient) => {
                self.history.replace_present(mutation.state)
            }
            _ => self.history.record(mutation.state),
        }
        if committed {
            log::debug!(
                "Committed element ({} total, {} undo steps)",
                self.state().element_count(),
                self.history.undo_depth()
            );
        }
    }

    fn record(&mut self, next: DrawingState) -> bool {
        if &next == self.state() {
            return false;
        }
        self.history.record(next);
        true
    }

    /// The open text entry, if any.
    pub fn text_entry(&self) -> Option<&TextEntry> {
        self.text_entry.as_ref()
    }

    /// Replace the text typed into the open entry.
    pub fn update_text_entry(&mut self, value: &str) {
        if let Some(entry) = &mut self.text_entry {
            entry.value = value.to_string();
        }
    }

    /// Close the entry and commit its text with the current color and a
    /// font size derived from the brush. Returns whether a text was added.
    pub fn confirm_text(&mut self) -> bool {
        let Some(entry) = self.text_entry.take() else {
            return false;
        };
        let state = self.state();
        let next = state.commit_text(
            entry.world_position,
            &entry.value,
            state.color(),
            font_size_for_brush(state.brush_size()),
        );
        let added = self.record(next);
        if added {
            log::debug!("Committed text at {:?}", entry.world_position);
        }
        added
    }

    /// Close the entry without committing.
    pub fn cancel_text(&mut self) {
        self.text_entry = None;
    }

    pub fn set_tool(&mut self, tool: ToolKind) -> bool {
        let next = self.state().with_tool(tool);
        self.record(next)
    }

    pub fn set_color(&mut self, color: Rgba) -> bool {
        let next = self.state().with_color(color);
        self.record(next)
    }

    /// Set the brush size, clamped to the toolbar range.
    pub fn set_brush_size(&mut self, brush_size: f64) -> bool {
        let next = self.state().with_brush_size(brush_size);
        self.record(next)
    }

    /// Set the zoom directly, clamped.
    pub fn set_zoom(&mut self, zoom: f64) -> bool {
        let next = self.state().with_zoom(zoom);
        self.record(next)
    }

    pub fn set_pan(&mut self, pan: Point) -> bool {
        let next = self.state().with_pan(pan);
        self.record(next)
    }

    pub fn zoom_in(&mut self) -> bool {
        self.set_zoom(self.state().zoom() * self.config.zoom.button_in)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.set_zoom(self.state().zoom() * self.config.zoom.button_out)
    }

    /// Reset to zoom 1 with the world origin at the top-left.
    pub fn fit_to_screen(&mut self) -> bool {
        let next = self.state().with_zoom(1.0).with_pan(Point::ZERO);
        self.record(next)
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn status(&self) -> ToolbarStatus {
        let state = self.state();
        ToolbarStatus {
            tool: state.tool(),
            color: state.color(),
            brush_size: state.brush_size(),
            zoom: state.zoom(),
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        }
    }

    /// Status bar text, e.g. `Tool: pen | Color: #000000 | Size: 5px | Zoom: 100%`.
    pub fn status_line(&self) -> String {
        let status = self.status();
        format!(
            "Tool: {} | Color: {} | Size: {}px | Zoom: {}%",
            status.tool.name(),
            status.color.to_rgb_hex(),
            status.brush_size,
            status.zoom_percent()
        )
    }
}
