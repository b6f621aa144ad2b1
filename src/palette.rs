//! Particle colours.
//!
//! Each particle takes `palette[index % len]` when it is created and keeps that
//! colour for its whole life, even when the slot is reused for another image.

use glam::Vec3;

use crate::error::ConfigError;

/// Warm orange, coral, raspberry, steel blue, lavender.
pub const DEFAULT_COLORS: [&str; 5] = ["#F7A541", "#F45D4C", "#FA2E59", "#4783c3", "#9c6cb7"];

/// Fixed list of RGB colours (each channel 0.0-1.0).
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Vec3>,
}

impl Palette {
    /// Build a palette from `#RRGGBB` strings.
    pub fn from_hex<S: AsRef<str>>(colors: &[S]) -> Result<Self, ConfigError> {
        let colors = colors
            .iter()
            .map(|c| parse_hex(c.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    pub fn new(colors: Vec<Vec3>) -> Result<Self, ConfigError> {
        if colors.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    /// Colour for particle slot `index`.
    #[inline]
    pub fn color(&self, index: usize) -> Vec3 {
        self.colors[index % self.colors.len()]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; an empty palette cannot be constructed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS
                .iter()
                .filter_map(|c| parse_hex(c).ok())
                .collect(),
        }
    }
}

/// Parse `#RRGGBB` (leading `#` optional, case-insensitive).
pub fn parse_hex(hex: &str) -> Result<Vec3, ConfigError> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(ConfigError::HexColor(hex.to_string()));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map(|v| v as f32 / 255.0)
            .map_err(|_| ConfigError::HexColor(hex.to_string()))
    };

    Ok(Vec3::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
