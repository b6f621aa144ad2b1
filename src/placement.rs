//! Random placement of particles around the origin.
//!
//! Used twice: to give newly created particles a scattered start position
//! inside the frame, and to send surplus particles out past the edge of the
//! frame when an image needs fewer of them.

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// Polar random placement scaled by the viewport width.
///
/// With viewport width `W` the planar radius is drawn as `W + bound * u`
/// where `u` is uniform in `[0, 1)` and `bound` is `-2W` inside the frame
/// or `+2W` out of frame. Inside the frame the radius lands in `(-W, W]`
/// (a negative radius just mirrors the angle); out of frame it lands in
/// `[W, 3W)`. Depth is uniform in `[0, W)`.
#[derive(Debug, Clone)]
pub struct FieldPlacer {
    viewport_width: f32,
    rng: SmallRng,
}

impl FieldPlacer {
    /// Create a placer seeded from the clock.
    pub fn new(viewport_width: f32) -> Self {
        Self::with_seed(viewport_width, clock_seed())
    }

    /// Create a placer with a fixed seed for reproducible layouts.
    pub fn with_seed(viewport_width: f32, seed: u64) -> Self {
        Self {
            viewport_width,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    /// Track a host window resize.
    pub fn set_viewport_width(&mut self, width: f32) {
        self.viewport_width = width;
    }

    /// Overwrite `position` with a random point.
    pub fn place(&mut self, position: &mut Vec3, out_of_frame: bool) {
        let w = self.viewport_width;
        let bound = if out_of_frame { 2.0 * w } else { -2.0 * w };

        // Drawing r linearly over the annulus favours larger radii, which keeps
        // areal density roughly even.
        let r = w + bound * self.rng.gen::<f32>();
        let angle = self.rng.gen::<f32>() * TAU;

        position.x = r * angle.cos();
        position.y = r * angle.sin();
        position.z = self.rng.gen::<f32>() * w;
    }

    /// Convenience wrapper returning a fresh point.
    pub fn random_point(&mut self, out_of_frame: bool) -> Vec3 {
        let mut v = Vec3::ZERO;
        self.place(&mut v, out_of_frame);
        v
    }
}

/// Seed that differs on every run.
pub(crate) fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(42)
}
