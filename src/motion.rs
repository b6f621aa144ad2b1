//! Per-frame easing and spin.

use serde::{Deserialize, Serialize};

use crate::pool::ParticlePool;

/// How far a particle closes the gap to its target in one step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Easing {
    /// Fixed fraction per frame, regardless of frame time.
    ///
    /// Visual speed therefore scales with the display refresh rate.
    PerFrame { factor: f32 },
    /// `1 - exp(-rate * interval)`, independent of frame rate.
    Exponential { rate: f32 },
}

impl Default for Easing {
    fn default() -> Self {
        Easing::PerFrame { factor: 0.2 }
    }
}

impl Easing {
    /// Lerp factor for a frame that took `interval` seconds.
    pub fn factor(&self, interval: f32) -> f32 {
        match *self {
            Easing::PerFrame { factor } => factor.clamp(0.0, 1.0),
            Easing::Exponential { rate } => 1.0 - (-rate.max(0.0) * interval.max(0.0)).exp(),
        }
    }

    /// Exponential easing that matches `PerFrame { factor }` at `fps` frames per second.
    pub fn matching_frame_rate(factor: f32, fps: f32) -> Self {
        let factor = factor.clamp(0.0, 0.999_999);
        Easing::Exponential {
            rate: -(1.0 - factor).ln() * fps,
        }
    }
}

/// Advances every particle by one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MotionIntegrator {
    easing: Easing,
}

impl MotionIntegrator {
    pub fn new(easing: Easing) -> Self {
        Self { easing }
    }

    #[inline]
    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Spin each particle by its angular velocity and ease it toward its target.
    ///
    /// Targets are never touched here.
    pub fn step(&self, pool: &mut ParticlePool, interval: f32) {
        let t = self.easing.factor(interval);
        for (particle, motion) in pool.bodies_mut() {
            particle.rotation.x += motion.vx;
            particle.rotation.y += motion.vy;
            particle.position = particle.position.lerp(particle.target, t);
        }
    }
}
