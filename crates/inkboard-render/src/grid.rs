//! Adaptive background grid.

use inkboard_core::shapes::Rgba;
use kurbo::{Line, Point, Rect};

/// Upper bound on minor lines per axis before the spacing doubles.
pub const MAX_LINES_PER_AXIS: f64 = 100.0;

/// Zoom below which minor lines are hidden and the coarsest spacing is used.
pub const MINOR_VISIBLE_ZOOM: f64 = 0.5;

pub const GRID_COLOR: Rgba = Rgba::rgb(0xe0, 0xe0, 0xe0);
pub const MINOR_OPACITY: f64 = 0.2;
pub const MAJOR_OPACITY: f64 = 0.25;

/// Line spacing for one frame, in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    pub minor: f64,
    pub major: f64,
    pub show_minor: bool,
}

impl GridSpec {
    /// Spacing for `zoom` and the world-space area `visible`.
    pub fn compute(zoom: f64, visible: Rect) -> Self {
        let (mut minor, mut major) = if zoom < MINOR_VISIBLE_ZOOM {
            (100.0, 500.0)
        } else if zoom < 0.75 {
            (50.0, 200.0)
        } else {
            (20.0, 100.0)
        };

        let (width, height) = (visible.width().abs(), visible.height().abs());
        if width.is_finite() && height.is_finite() {
            while width / minor > MAX_LINES_PER_AXIS || height / minor > MAX_LINES_PER_AXIS {
                minor *= 2.0;
                major *= 2.0;
            }
        }

        Self {
            minor,
            major,
            show_minor: zoom >= MINOR_VISIBLE_ZOOM,
        }
    }

    /// Stroke width of minor lines, one device pixel before HiDPI scaling.
    pub fn minor_width(zoom: f64) -> f64 {
        1.0 / zoom
    }

    pub fn major_width(zoom: f64) -> f64 {
        1.5 / zoom
    }

    /// Minor lines across `visible`, skipping those that fall on a major line.
    pub fn minor_lines(&self, visible: Rect) -> Vec<Line> {
        if !self.show_minor {
            return Vec::new();
        }
        let per_major = (self.major / self.minor).round().max(1.0) as i64;
        let mut lines = Vec::new();
        for i in index_range(visible.x0, visible.x1, self.minor) {
            if i % per_major != 0 {
                let x = i as f64 * self.minor;
                lines.push(Line::new(Point::new(x, visible.y0), Point::new(x, visible.y1)));
            }
        }
        for i in index_range(visible.y0, visible.y1, self.minor) {
            if i % per_major != 0 {
                let y = i as f64 * self.minor;
                lines.push(Line::new(Point::new(visible.x0, y), Point::new(visible.x1, y)));
            }
        }
        lines
    }

    /// Major lines across `visible`.
    pub fn major_lines(&self, visible: Rect) -> Vec<Line> {
        let mut lines = Vec::new();
        for i in index_range(visible.x0, visible.x1, self.major) {
            let x = i as f64 * self.major;
            lines.push(Line::new(Point::new(x, visible.y0), Point::new(x, visible.y1)));
        }
        for i in index_range(visible.y0, visible.y1, self.major) {
            let y = i as f64 * self.major;
            lines.push(Line::new(Point::new(visible.x0, y), Point::new(visible.x1, y)));
        }
        lines
    }
}

/// Indices `i` with `i * step` inside `[start, end]`.
fn index_range(start: f64, end: f64, step: f64) -> impl Iterator<Item = i64> {
    let first = (start / step).ceil();
    let last = (end / step).floor();
    let (first, last) = if first.is_finite() && last.is_finite() && first <= last {
        (first as i64, last as i64)
    } else {
        (1, 0)
    };
    first..=last
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(width: f64, height: f64, zoom: f64) -> Rect {
        Rect::new(0.0, 0.0, width / zoom, height / zoom)
    }

    #[test]
    fn test_spacing_by_zoom() {
        let spec = GridSpec::compute(1.0, viewport(800.0, 600.0, 1.0));
        assert_eq!((spec.minor, spec.major, spec.show_minor), (20.0, 100.0, true));

        let spec = GridSpec::compute(0.6, viewport(800.0, 600.0, 0.6));
        assert_eq!((spec.minor, spec.major, spec.show_minor), (50.0, 200.0, true));

        let spec = GridSpec::compute(0.4, viewport(800.0, 600.0, 0.4));
        assert_eq!((spec.minor, spec.major), (100.0, 500.0));
        assert!(!spec.show_minor);
        assert!(spec.minor_lines(viewport(800.0, 600.0, 0.4)).is_empty());
    }

    #[test]
    fn test_spacing_doubles_for_wide_views() {
        // 20000 world units wide at zoom 0.1: 100 spacing gives 200 lines.
        let spec = GridSpec::compute(0.1, viewport(2000.0, 600.0, 0.1));
        assert_eq!((spec.minor, spec.major), (200.0, 1000.0));
    }

    #[test]
    fn test_minor_skips_major_positions() {
        let visible = Rect::new(0.0, 0.0, 200.0, 40.0);
        let spec = GridSpec::compute(1.0, visible);
        let minor = spec.minor_lines(visible);
        let xs: Vec<f64> = minor
            .iter()
            .filter(|line| line.p0.x == line.p1.x)
            .map(|line| line.p0.x)
            .collect();
        assert_eq!(xs, vec![20.0, 40.0, 60.0, 80.0, 120.0, 140.0, 160.0, 180.0]);

        let major = spec.major_lines(visible);
        let xs: Vec<f64> = major
            .iter()
            .filter(|line| line.p0.x == line.p1.x)
            .map(|line| line.p0.x)
            .collect();
        assert_eq!(xs, vec![0.0, 100.0, 200.0]);
    }

    #[test]
    fn test_negative_coordinates() {
        let visible = Rect::new(-50.0, -50.0, 50.0, 50.0);
        let spec = GridSpec::compute(1.0, visible);
        let major = spec.major_lines(visible);
        assert_eq!(major.len(), 2);
        assert!(major.iter().all(|line| line.p0.x == 0.0 || line.p0.y == 0.0));
    }

    #[test]
    fn test_widths_scale_with_zoom() {
        assert_eq!(GridSpec::minor_width(2.0), 0.5);
        assert_eq!(GridSpec::major_width(0.5), 3.0);
    }
}
