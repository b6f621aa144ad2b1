//! Image space to world space.

use glam::{Vec2, Vec3};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::sampler::TargetPoint;

/// World units per image pixel.
pub const WORLD_SCALE: f32 = 3.0;
/// Per-axis jitter is drawn uniformly from this range (image pixels).
pub const JITTER_MIN: f32 = 2.0;
pub const JITTER_MAX: f32 = 6.0;
/// Target depth is drawn uniformly from `(DEPTH_NEAR - DEPTH_SPAN, DEPTH_NEAR]`.
pub const DEPTH_NEAR: f32 = 40.0;
pub const DEPTH_SPAN: f32 = 20.0;

/// Converts target points into jittered world positions.
///
/// `world = (point - offset - jitter) * 3` on x and y, with a random depth
/// between 20 and 40. Every call draws fresh jitter, so the same point maps
/// to a slightly different spot each time and the silhouette shimmers a little
/// instead of sitting on a rigid grid.
#[derive(Debug, Clone)]
pub struct CoordinateMapper {
    offset: Vec2,
    rng: SmallRng,
}

impl CoordinateMapper {
    pub fn new(offset: Vec2) -> Self {
        Self::with_seed(offset, crate::placement::clock_seed())
    }

    pub fn with_seed(offset: Vec2, seed: u64) -> Self {
        Self {
            offset,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Map `point` to a world-space target.
    pub fn map(&mut self, point: TargetPoint) -> Vec3 {
        let jitter_x = self.rng.gen::<f32>() * (JITTER_MAX - JITTER_MIN) + JITTER_MIN;
        let jitter_y = self.rng.gen::<f32>() * (JITTER_MAX - JITTER_MIN) + JITTER_MIN;
        let depth = DEPTH_NEAR - DEPTH_SPAN * self.rng.gen::<f32>();

        Vec3::new(
            (point.x as f32 - self.offset.x - jitter_x) * WORLD_SCALE,
            (point.y as f32 - self.offset.y - jitter_y) * WORLD_SCALE,
            depth,
        )
    }

    /// Axis-aligned box containing every value [`map`](Self::map) can return for `point`.
    pub fn envelope(&self, point: TargetPoint) -> (Vec3, Vec3) {
        let base = Vec2::new(point.x as f32, point.y as f32) - self.offset;
        let min = (base - Vec2::splat(JITTER_MAX)) * WORLD_SCALE;
        let max = (base - Vec2::splat(JITTER_MIN)) * WORLD_SCALE;
        (
            min.extend(DEPTH_NEAR - DEPTH_SPAN),
            max.extend(DEPTH_NEAR),
        )
    }

    /// Whether `position` could have been produced by mapping `point`.
    pub fn contains(&self, point: TargetPoint, position: Vec3) -> bool {
        const EPS: f32 = 1e-3;
        let (min, max) = self.envelope(point);
        position.cmpge(min - Vec3::splat(EPS)).all() && position.cmple(max + Vec3::splat(EPS)).all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_within_envelope() {
        let mut mapper = CoordinateMapper::with_seed(Vec2::new(120.0, 80.0), 7);
        let point = TargetPoint::new(100, 110);
        for _ in 0..500 {
            let pos = mapper.map(point);
            assert!(mapper.contains(point, pos), "{pos:?} outside envelope");
        }
    }

    #[test]
    fn test_envelope_values() {
        let mapper = CoordinateMapper::with_seed(Vec2::new(120.0, 80.0), 0);
        let (min, max) = mapper.envelope(TargetPoint::new(120, 80));
        assert_eq!(min, Vec3::new(-18.0, -18.0, 20.0));
        assert_eq!(max, Vec3::new(-6.0, -6.0, 40.0));
    }

    #[test]
    fn test_repeated_maps_differ() {
        let mut mapper = CoordinateMapper::with_seed(Vec2::ZERO, 11);
        let point = TargetPoint::new(10, 20);
        let a = mapper.map(point);
        let b = mapper.map(point);
        assert_ne!(a, b);
    }

    #[test]
    fn test_y_up_preserved() {
        let mut mapper = CoordinateMapper::with_seed(Vec2::new(120.0, 80.0), 5);
        let low = mapper.map(TargetPoint::new(50, 10));
        let high = mapper.map(TargetPoint::new(50, 200));
        assert!(high.y > low.y);
    }
}
