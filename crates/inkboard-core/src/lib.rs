//! Inkboard Core Library
//!
//! Platform-agnostic drawing model, undo history and pointer handling for the
//! Inkboard whiteboard.

pub mod camera;
pub mod config;
pub mod controller;
pub mod history;
pub mod input;
pub mod session;
pub mod shapes;
pub mod state;
pub mod tools;

pub use camera::{Camera, MAX_ZOOM, MIN_ZOOM};
pub use config::{ConfigError, ConfigResult, HistoryGranularity, WhiteboardConfig};
pub use controller::{EventOutcome, InteractionController, Mode};
pub use history::History;
pub use input::{Modifiers, MouseButton, PointerEvent, TouchEvent};
pub use session::{Session, TextEntry, ToolbarStatus};
pub use shapes::{Rgba, Shape, ShapeKind, Stroke, StrokeTool, TextElement};
pub use state::{ActiveElement, DrawingState};
pub use tools::ToolKind;
