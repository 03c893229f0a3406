use super::{ExportError, ExportOptions, ExportResult, ExportedFile, metadata_stamp, padded_bounds};
use crate::fonts::TextAnchor;
use crate::paint::{paint_content, paint_label, skia_color, skia_transform};
use inkboard_core::DrawingState;
use inkboard_core::shapes::Rgba;
use kurbo::{Affine, Point};
use tiny_skia::{Color, Pixmap, PixmapPaint, Transform};

const STAMP_COLOR: Rgba = Rgba::rgb(0x66, 0x66, 0x66);
const STAMP_FONT_SIZE: f64 = 12.0;

/// Render the drawing to a PNG.
pub fn export_raster(state: &DrawingState, options: &ExportOptions) -> ExportResult<ExportedFile> {
    let bounds = padded_bounds(state)?;
    let width = bounds.width().ceil() as u32;
    let height = bounds.height().ceil() as u32;
    let new_surface = || Pixmap::new(width, height).ok_or(ExportError::Surface { width, height });

    let mut layer = new_surface()?;
    layer.fill(Color::TRANSPARENT);
    let transform = skia_transform(Affine::translate(-bounds.origin().to_vec2()));
    paint_content(&mut layer, state, transform, false);

    let mut image = new_surface()?;
    image.fill(skia_color(options.background_color));
    image.draw_pixmap(0, 0, layer.as_ref(), &PixmapPaint::default(), Transform::identity(), None);

    if options.include_metadata {
        paint_label(
            &mut image,
            &metadata_stamp(),
            STAMP_FONT_SIZE,
            Point::new(10.0, height as f64 - 10.0),
            TextAnchor::Baseline,
            STAMP_COLOR,
            Transform::identity(),
        );
    }

    let bytes = encode_png(&image)?;
    log::info!("Exported {}x{} PNG ({} bytes)", width, height, bytes.len());
    Ok(ExportedFile::new("png", "image/png", bytes))
}

/// Encode as 8-bit straight-alpha RGBA.
fn encode_png(pixmap: &Pixmap) -> ExportResult<Vec<u8>> {
    let rgba: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();

    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, pixmap.width(), pixmap.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&rgba)?;
        writer.finish()?;
    }
    Ok(png_data)
}
