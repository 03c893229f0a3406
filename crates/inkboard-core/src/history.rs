//! Bounded linear undo/redo over drawing state snapshots.

use crate::config::{DEFAULT_HISTORY_DEPTH, HistoryConfig};
use crate::state::DrawingState;
use std::collections::VecDeque;

/// Undo/redo log: `past` (oldest first), `present`, `future` (next redo first).
#[derive(Debug, Clone)]
pub struct History {
    past: VecDeque<DrawingState>,
    present: DrawingState,
    future: VecDeque<DrawingState>,
    max_depth: usize,
}

impl History {
    /// Create a history with the default depth.
    pub fn new(initial: DrawingState) -> Self {
        Self::with_depth(initial, DEFAULT_HISTORY_DEPTH)
    }

    /// Create a history from configuration.
    pub fn with_config(initial: DrawingState, config: &HistoryConfig) -> Self {
        Self::with_depth(initial, config.max_depth)
    }

    /// Create a history keeping at most `max_depth` undo steps (at least one).
    pub fn with_depth(initial: DrawingState, max_depth: usize) -> Self {
        Self {
            past: VecDeque::new(),
            present: initial,
            future: VecDeque::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// The live state.
    pub fn present(&self) -> &DrawingState {
        &self.present
    }

    /// Make `state` the present, pushing the old present as an undo step.
    ///
    /// Clears the redo buffer and evicts the oldest step past the depth limit.
    pub fn record(&mut self, state: DrawingState) {
        let previous = std::mem::replace(&mut self.present, state);
        self.past.push_back(previous);
        while self.past.len() > self.max_depth {
            self.past.pop_front();
        }
        self.future.clear();
    }

    /// Swap the present without creating an undo step.
    pub fn replace_present(&mut self, state: DrawingState) {
        self.present = state;
    }

    /// Step back. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop_back() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, previous);
        self.future.push_front(current);
        log::debug!(
            "Undo: {} undo / {} redo steps left",
            self.past.len(),
            self.future.len()
        );
        true
    }

    /// Step forward. Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop_front() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, next);
        self.past.push_back(current);
        log::debug!(
            "Redo: {} undo / {} redo steps left",
            self.past.len(),
            self.future.len()
        );
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}
