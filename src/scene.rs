//! The context object a host drives once per frame.
//!
//! `MorphScene` owns every moving part of the core (pool, integrator, switch
//! controller) and exposes the host-facing lifecycle:
//!
//! ```ignore
//! let mut scene = MorphScene::new(MorphConfig::default(), builtin_glyphs(), 1280.0)?;
//! let mut graph: Vec<ParticleHandle> = Vec::new();
//! scene.init_scene(&mut graph);
//!
//! loop {
//!     let (interval, elapsed) = clock.tick();
//!     scene.update_scene(interval, elapsed, &mut graph);
//!     if user_clicked_next {
//!         scene.next_image();
//!     }
//! }
//! ```

use std::time::Duration;

use image::RgbaImage;

use crate::canvas::Canvas;
use crate::config::MorphConfig;
use crate::controller::ImageSwitchController;
use crate::error::SceneError;
use crate::motion::MotionIntegrator;
use crate::pool::{Particle, ParticlePool, ReconcileReport, SceneGraph};
use crate::sampler::{Sampler, ThresholdSampler};

/// Everything needed to morph a particle field between images.
#[derive(Debug)]
pub struct MorphScene<S = ThresholdSampler> {
    config: MorphConfig,
    pool: ParticlePool,
    integrator: MotionIntegrator,
    controller: ImageSwitchController<S>,
    /// Host elapsed time as of the last frame.
    clock: Duration,
}

impl MorphScene<ThresholdSampler> {
    /// Build a scene with the default black-on-transparent sampler.
    pub fn new(
        config: MorphConfig,
        images: Vec<RgbaImage>,
        viewport_width: f32,
    ) -> Result<Self, SceneError> {
        Self::with_sampler(config, images, viewport_width, ThresholdSampler::default())
    }
}

impl<S: Sampler> MorphScene<S> {
    /// Build a scene with a custom segmentation strategy.
    pub fn with_sampler(
        config: MorphConfig,
        images: Vec<RgbaImage>,
        viewport_width: f32,
        sampler: S,
    ) -> Result<Self, SceneError> {
        config.validate()?;

        let pool = ParticlePool::from_config(&config, viewport_width)?;
        let canvas = Canvas::new(config.canvas_width, config.canvas_height);
        let controller = ImageSwitchController::new(images, canvas, sampler, config.settle_delay())?
            .with_style(config.switch_style);

        Ok(Self {
            integrator: MotionIntegrator::new(config.easing),
            config,
            pool,
            controller,
            clock: Duration::ZERO,
        })
    }

    /// Sample the first image. Particles appear once the settle delay passes.
    ///
    /// Returns the number of target points in the first image.
    pub fn init_scene<G>(&mut self, scene: &mut G) -> usize
    where
        G: SceneGraph + ?Sized,
    {
        let count = self.controller.load_current(&mut self.pool, self.clock);
        // Nothing exists yet, so an immediate reconcile cannot pop anything.
        if self.config.settle_delay_ms == 0 {
            self.controller.settle_now(&mut self.pool, scene);
        }
        count
    }

    /// Advance one frame.
    ///
    /// `interval` is the time since the previous frame and `elapsed` the time
    /// since start, both in seconds. Any reconciliation that came due runs
    /// before particles move.
    pub fn update_scene<G>(&mut self, interval: f32, elapsed: f32, scene: &mut G) -> Option<ReconcileReport>
    where
        G: SceneGraph + ?Sized,
    {
        self.clock = Duration::from_secs_f32(elapsed.max(0.0));
        let report = self.controller.poll(&mut self.pool, scene, self.clock);
        self.integrator.step(&mut self.pool, interval);
        report
    }

    /// Switch to the next image. Returns its target point count.
    pub fn next_image(&mut self) -> usize {
        self.controller.on_image_change(&mut self.pool, self.clock)
    }

    /// Track a host viewport resize; affects future random placement only.
    pub fn set_viewport_width(&mut self, width: f32) {
        self.pool.placer_mut().set_viewport_width(width);
    }

    pub fn particles(&self) -> &[Particle] {
        self.pool.particles()
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn controller(&self) -> &ImageSwitchController<S> {
        &self.controller
    }

    pub fn config(&self) -> &MorphConfig {
        &self.config
    }
}
