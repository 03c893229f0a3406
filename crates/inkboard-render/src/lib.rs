//! Inkboard Render Library
//!
//! Renderer abstraction, a tiny-skia CPU implementation, and PNG/SVG export.

pub mod export;
pub mod fonts;
pub mod grid;
mod paint;
mod renderer;
mod skia_impl;

pub use export::{
    EXPORT_PADDING, ExportError, ExportOptions, ExportResult, ExportedFile, export_raster,
    export_vector,
};
pub use grid::GridSpec;
pub use renderer::{GridStyle, RenderContext, RenderResult, Renderer, RendererError};
pub use skia_impl::SkiaRenderer;
