//! PNG and SVG export of the whole drawing.
//!
//! Both formats cover the content bounding box padded by [`EXPORT_PADDING`]
//! at 1:1 world scale, independent of the current camera.

mod raster;
mod svg;

pub use raster::export_raster;
pub use svg::export_vector;

use chrono::Local;
use inkboard_core::DrawingState;
use inkboard_core::shapes::{Rgba, now_millis};
use kurbo::Rect;
use thiserror::Error;

/// Margin around the content, in world units.
pub const EXPORT_PADDING: f64 = 50.0;

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Nothing to export: the drawing is empty")]
    NothingToExport,
    #[error("Cannot allocate a {width}x{height} export surface")]
    Surface { width: u32, height: u32 },
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] png::EncodingError),
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Export settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportOptions {
    /// Fill behind the content (raster only).
    pub background_color: Rgba,
    /// Append the "Whiteboard Export - <time>" stamp.
    pub include_metadata: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            background_color: Rgba::white(),
            include_metadata: true,
        }
    }
}

/// An encoded export ready to be saved or downloaded.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedFile {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportedFile {
    pub(crate) fn new(extension: &str, mime_type: &'static str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: format!("whiteboard-{}.{}", now_millis(), extension),
            mime_type,
            bytes,
        }
    }
}

/// Content bounds grown by [`EXPORT_PADDING`] on every side.
pub fn padded_bounds(state: &DrawingState) -> ExportResult<Rect> {
    if state.element_count() == 0 {
        return Err(ExportError::NothingToExport);
    }
    state
        .committed_bounds()
        .map(|bounds| bounds.inflate(EXPORT_PADDING, EXPORT_PADDING))
        .ok_or(ExportError::NothingToExport)
}

/// Text of the export stamp, using local time.
pub(crate) fn metadata_stamp() -> String {
    format!(
        "Whiteboard Export - {}",
        Local::now().format("%-m/%-d/%Y, %-I:%M:%S %p")
    )
}
