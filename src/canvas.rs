//! The fixed-size RGBA working surface images are drawn onto before sampling.
//!
//! Every source image, whatever its native size, is drawn scaled into the same
//! `width x height` canvas so that target points live in one stable image space.
//!
//! ```ignore
//! let mut canvas = Canvas::new(240, 240);
//! canvas.draw_scaled(&image::open("assets/apple.png")?.into_rgba8());
//! let points = ThresholdSampler::default().sample(&canvas);
//! ```

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::error::AssetError;

/// Raw RGBA pixel surface (`width * height * 4` bytes, row-major, top row first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Canvas {
    /// Create a fully transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize) * 4],
        }
    }

    /// Wrap existing RGBA data.
    ///
    /// # Example
    ///
    /// ```ignore
    /// // 2x1: a black opaque pixel next to a transparent one
    /// let canvas = Canvas::from_rgba(vec![0, 0, 0, 255, 0, 0, 0, 0], 2, 1)?;
    /// ```
    pub fn from_rgba(data: Vec<u8>, width: u32, height: u32) -> Result<Self, AssetError> {
        let expected = (width as usize) * (height as usize) * 4;
        if data.len() != expected {
            return Err(AssetError::BufferSize {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { width, height, data })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.data
    }

    /// Number of pixels on the surface.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// RGBA value at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let offset = self.offset(x, y)?;
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.data[offset..offset + 4]);
        Some(rgba)
    }

    /// Overwrite the pixel at `(x, y)`. Writes outside the surface are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if let Some(offset) = self.offset(x, y) {
            self.data[offset..offset + 4].copy_from_slice(&rgba);
        }
    }

    /// Reset every pixel to transparent black.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Clear the canvas and draw `image` stretched to cover it exactly.
    pub fn draw_scaled(&mut self, image: &RgbaImage) {
        self.clear();
        if image.width() == 0 || image.height() == 0 {
            return;
        }

        if image.dimensions() == (self.width, self.height) {
            self.data.copy_from_slice(image.as_raw());
        } else {
            let scaled = imageops::resize(image, self.width, self.height, FilterType::Triangle);
            self.data.copy_from_slice(scaled.as_raw());
        }
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(((y as usize) * (self.width as usize) + x as usize) * 4)
    }
}
