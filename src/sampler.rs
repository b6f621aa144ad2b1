//! Turning a drawn canvas into a sparse list of target points.
//!
//! The default [`ThresholdSampler`] treats opaque black pixels on a transparent
//! background as the silhouette. Anything implementing [`Sampler`] can replace it
//! without touching the pool or motion code.

use crate::canvas::Canvas;

/// Image-space coordinate of a sampled foreground pixel.
///
/// `x` grows to the right, `y` grows upward (row order is flipped during
/// sampling to match the Y-up world).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetPoint {
    pub x: u32,
    pub y: u32,
}

impl TargetPoint {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Strategy that extracts target points from a canvas.
pub trait Sampler {
    fn sample(&self, canvas: &Canvas) -> Vec<TargetPoint>;
}

impl<F> Sampler for F
where
    F: Fn(&Canvas) -> Vec<TargetPoint>,
{
    fn sample(&self, canvas: &Canvas) -> Vec<TargetPoint> {
        self(canvas)
    }
}

/// Single-channel threshold test with coarse grid subsampling.
///
/// A pixel is foreground when `red <= max_red` and `alpha >= min_alpha`.
/// Only points whose coordinates are both nonzero multiples of `stride`
/// are kept, which thins the silhouette and skips the border row/column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdSampler {
    pub max_red: u8,
    pub min_alpha: u8,
    pub stride: u32,
}

impl Default for ThresholdSampler {
    fn default() -> Self {
        Self {
            max_red: 0,
            min_alpha: 1,
            stride: 2,
        }
    }
}

impl ThresholdSampler {
    #[inline]
    fn is_foreground(&self, rgba: &[u8]) -> bool {
        rgba[0] <= self.max_red && rgba[3] >= self.min_alpha
    }

    #[inline]
    fn on_grid(&self, v: u32) -> bool {
        v != 0 && v % self.stride.max(1) == 0
    }
}

impl Sampler for ThresholdSampler {
    /// Scan pixels last to first, so the bottom-right of the image comes out first.
    fn sample(&self, canvas: &Canvas) -> Vec<TargetPoint> {
        let width = canvas.width() as usize;
        let height = canvas.height();
        if width == 0 || height == 0 {
            return Vec::new();
        }

        let mut points = Vec::new();
        for (idx, rgba) in canvas.pixels().chunks_exact(4).enumerate().rev() {
            if !self.is_foreground(rgba) {
                continue;
            }

            let x = (idx % width) as u32;
            let y = height - (idx / width) as u32;

            // Row 0 maps to y == height, which lies outside the image.
            if y < height && self.on_grid(x) && self.on_grid(y) {
                points.push(TargetPoint { x, y });
            }
        }

        log::debug!(
            "sampled {} target points from {}x{} canvas",
            points.len(),
            width,
            height
        );
        points
    }
}
