//! Configuration for the morphing field.
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```json
//! {
//!   "images": ["assets/apple.png", "assets/rebel.png"],
//!   "settle_delay_ms": 300,
//!   "easing": { "kind": "exponential", "rate": 13.4 }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::motion::Easing;
use crate::palette::{Palette, DEFAULT_COLORS};
use crate::pool::DEFAULT_MAX_SPIN;

/// What existing particles do the moment the image changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwitchStyle {
    /// Head straight for the new image's points.
    #[default]
    Retarget,
    /// Burst into a random cloud, then reform once the settle delay passes.
    Scatter,
}

/// Tunable parameters for sampling, mapping and motion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MorphConfig {
    /// Width of the sampling canvas in pixels.
    pub canvas_width: u32,
    /// Height of the sampling canvas in pixels.
    pub canvas_height: u32,
    /// Image-space x that maps to world x = 0 (before jitter).
    pub offset_x: f32,
    /// Image-space y that maps to world y = 0 (before jitter).
    pub offset_y: f32,
    /// `#RRGGBB` colours assigned round-robin to new particles.
    pub palette: Vec<String>,
    /// Image files to cycle through. Empty means use the built-in glyphs.
    pub images: Vec<PathBuf>,
    /// Pause between an image switch and full pool reconciliation.
    pub settle_delay_ms: u64,
    pub easing: Easing,
    /// Upper bound of per-frame spin around each axis (radians).
    pub max_spin: f32,
    pub switch_style: SwitchStyle,
    /// Fixed RNG seed. `None` seeds from the clock.
    pub seed: Option<u64>,
}

impl Default for MorphConfig {
    fn default() -> Self {
        Self {
            canvas_width: 240,
            canvas_height: 240,
            offset_x: 240.0 / 2.0,
            offset_y: 240.0 / 3.0,
            palette: DEFAULT_COLORS.iter().map(|c| c.to_string()).collect(),
            images: Vec::new(),
            settle_delay_ms: 500,
            easing: Easing::default(),
            max_spin: DEFAULT_MAX_SPIN,
            switch_style: SwitchStyle::default(),
            seed: None,
        }
    }
}

impl MorphConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Check values that would otherwise fail later, deep inside the core.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(ConfigError::CanvasSize {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        Palette::from_hex(&self.palette)?;
        Ok(())
    }

    #[inline]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    // ========== Builder ==========

    pub fn with_canvas_size(mut self, width: u32, height: u32) -> Self {
        self.canvas_width = width;
        self.canvas_height = height;
        self
    }

    pub fn with_offset(mut self, x: f32, y: f32) -> Self {
        self.offset_x = x;
        self.offset_y = y;
        self
    }

    pub fn with_palette<S: Into<String>>(mut self, colors: impl IntoIterator<Item = S>) -> Self {
        self.palette = colors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_images<P: Into<PathBuf>>(mut self, images: impl IntoIterator<Item = P>) -> Self {
        self.images = images.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay_ms = delay.as_millis() as u64;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_max_spin(mut self, max_spin: f32) -> Self {
        self.max_spin = max_spin;
        self
    }

    pub fn with_switch_style(mut self, style: SwitchStyle) -> Self {
        self.switch_style = style;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}
