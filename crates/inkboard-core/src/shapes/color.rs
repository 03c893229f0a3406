//! RGBA color with hex parsing and formatting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Color parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("color must start with '#': {0}")]
    MissingHash(String),
    #[error("expected 3, 6 or 8 hex digits, got {0}")]
    BadLength(usize),
    #[error("invalid hex digit in {0}")]
    BadDigit(String),
}

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| ColorError::MissingHash(hex.to_string()))?;

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::BadDigit(hex.to_string()));
        }

        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16);
        let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).map(|v| v * 17);
        let bad = |_| ColorError::BadDigit(hex.to_string());

        match digits.len() {
            3 => Ok(Self::rgb(
                nibble(0).map_err(bad)?,
                nibble(1).map_err(bad)?,
                nibble(2).map_err(bad)?,
            )),
            6 => Ok(Self::rgb(
                byte(0).map_err(bad)?,
                byte(2).map_err(bad)?,
                byte(4).map_err(bad)?,
            )),
            8 => Ok(Self::new(
                byte(0).map_err(bad)?,
                byte(2).map_err(bad)?,
                byte(4).map_err(bad)?,
                byte(6).map_err(bad)?,
            )),
            n => Err(ColorError::BadLength(n)),
        }
    }

    /// Format as lowercase `#rrggbb`, appending alpha only when not opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Hex string without the alpha channel, for formats that carry opacity separately.
    pub fn to_rgb_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Alpha as a fraction in `[0, 1]`.
    pub fn opacity(&self) -> f64 {
        self.a as f64 / 255.0
    }

    /// Same color with the alpha scaled by `factor`.
    pub fn with_opacity(self, factor: f64) -> Self {
        let a = (self.a as f64 * factor.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::black()
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgba {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/// Color used for eraser strokes. Erasing happens at render time through
/// compositing; the model still records a color.
pub const ERASE_COLOR: Rgba = Rgba::white();

/// Swatches offered by the toolbar.
pub const PALETTE: [Rgba; 12] = [
    Rgba::rgb(0x00, 0x00, 0x00),
    Rgba::rgb(0xFF, 0x00, 0x00),
    Rgba::rgb(0x00, 0xFF, 0x00),
    Rgba::rgb(0x00, 0x00, 0xFF),
    Rgba::rgb(0xFF, 0xFF, 0x00),
    Rgba::rgb(0xFF, 0x00, 0xFF),
    Rgba::rgb(0x00, 0xFF, 0xFF),
    Rgba::rgb(0xFF, 0xA5, 0x00),
    Rgba::rgb(0x80, 0x00, 0x80),
    Rgba::rgb(0xFF, 0xC0, 0xCB),
    Rgba::rgb(0xA5, 0x2A, 0x2A),
    Rgba::rgb(0x80, 0x80, 0x80),
];
