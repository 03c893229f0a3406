//! System font lookup and text outlines.

use fontdb::{Database, Family, Query};
use kurbo::{BezPath, Point};
use rusttype::{Font, OutlineBuilder, Scale, point as rt_point};
use std::sync::OnceLock;

/// Where a text origin sits relative to the glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    /// Origin is the top-left corner of the line box.
    Top,
    /// Origin is on the alphabetic baseline.
    Baseline,
}

/// The sans-serif face used for every text element, loaded once.
///
/// Logs a warning the first time no usable font is found.
pub fn system_font() -> Option<&'static Font<'static>> {
    static FONT: OnceLock<Option<Font<'static>>> = OnceLock::new();
    FONT.get_or_init(|| {
        let font = load_system_font();
        if font.is_none() {
            log::warn!("No sans-serif system font found; text will not be rendered");
        }
        font
    })
    .as_ref()
}

fn load_system_font() -> Option<Font<'static>> {
    let mut db = Database::new();
    db.load_system_fonts();

    let families = [Family::Name("Arial"), Family::SansSerif];
    let query = Query {
        families: &families,
        ..Query::default()
    };
    let id = db.query(&query)?;
    let font = db
        .with_face_data(id, |data, index| {
            Font::try_from_vec_and_index(data.to_vec(), index)
        })
        .flatten()?;
    log::debug!("Loaded text font {:?}", db.face(id).map(|face| &face.post_script_name));
    Some(font)
}

/// Collects glyph outlines into a kurbo path.
struct GlyphPath(BezPath);

impl OutlineBuilder for GlyphPath {
    fn move_to(&mut self, x: f32, y: f32) {
        self.0.move_to((x as f64, y as f64));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.0.line_to((x as f64, y as f64));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.0.quad_to((x1 as f64, y1 as f64), (x as f64, y as f64));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.0.curve_to(
            (x1 as f64, y1 as f64),
            (x2 as f64, y2 as f64),
            (x as f64, y as f64),
        );
    }

    fn close(&mut self) {
        self.0.close_path();
    }
}

/// Outline of `content` set at `font_size`, in the same units as `origin`.
///
/// Returns `None` when no font is available.
pub fn text_outline(content: &str, font_size: f64, origin: Point, anchor: TextAnchor) -> Option<BezPath> {
    let font = system_font()?;
    let scale = Scale::uniform(font_size as f32);
    let baseline = match anchor {
        TextAnchor::Top => origin.y as f32 + font.v_metrics(scale).ascent,
        TextAnchor::Baseline => origin.y as f32,
    };

    let mut builder = GlyphPath(BezPath::new());
    for glyph in font.layout(content, scale, rt_point(origin.x as f32, baseline)) {
        glyph.build_outline(&mut builder);
    }
    Some(builder.0)
}
