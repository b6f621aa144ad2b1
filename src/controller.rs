//! Two-phase image switching.
//!
//! When the image changes the new silhouette is sampled straight away and the
//! particles that already exist react immediately. Growing or shrinking the
//! pool is deferred by a settle delay, so particles are not spawned or sent
//! away in the middle of the transition.
//!
//! Each switch schedules its own deferred reconciliation tagged with a
//! generation number. Only the reconciliation of the most recent switch is
//! applied; older ones are discarded when they come due.

use std::collections::VecDeque;
use std::time::Duration;

use image::RgbaImage;

use crate::canvas::Canvas;
use crate::config::SwitchStyle;
use crate::error::AssetError;
use crate::pool::{ParticlePool, ReconcileReport, SceneGraph};
use crate::sampler::{Sampler, TargetPoint, ThresholdSampler};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingSettle {
    generation: u64,
    due: Duration,
}

/// Cycles through images and drives the pool through each switch.
#[derive(Debug)]
pub struct ImageSwitchController<S = ThresholdSampler> {
    images: Vec<RgbaImage>,
    current: usize,
    canvas: Canvas,
    sampler: S,
    points: Vec<TargetPoint>,
    settle_delay: Duration,
    style: SwitchStyle,
    generation: u64,
    pending: VecDeque<PendingSettle>,
}

impl<S: Sampler> ImageSwitchController<S> {
    /// Create a controller showing `images[0]` once started.
    pub fn new(
        images: Vec<RgbaImage>,
        canvas: Canvas,
        sampler: S,
        settle_delay: Duration,
    ) -> Result<Self, AssetError> {
        if images.is_empty() {
            return Err(AssetError::NoImages);
        }
        Ok(Self {
            images,
            current: 0,
            canvas,
            sampler,
            points: Vec::new(),
            settle_delay,
            style: SwitchStyle::default(),
            generation: 0,
            pending: VecDeque::new(),
        })
    }

    pub fn with_style(mut self, style: SwitchStyle) -> Self {
        self.style = style;
        self
    }

    /// Index of the image currently shown.
    #[inline]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[inline]
    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Target points of the current image.
    pub fn points(&self) -> &[TargetPoint] {
        &self.points
    }

    /// Whether a deferred reconciliation is still waiting.
    pub fn is_settling(&self) -> bool {
        self.pending.iter().any(|p| p.generation == self.generation)
    }

    /// Number of switches so far (including the initial load).
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Sample the current image without advancing. Used for the first frame.
    pub fn load_current(&mut self, pool: &mut ParticlePool, now: Duration) -> usize {
        self.begin_switch(pool, now)
    }

    /// Advance to the next image (wrapping) and start the switch.
    ///
    /// Returns the number of target points in the new image.
    pub fn on_image_change(&mut self, pool: &mut ParticlePool, now: Duration) -> usize {
        self.current = (self.current + 1) % self.images.len();
        self.begin_switch(pool, now)
    }

    fn begin_switch(&mut self, pool: &mut ParticlePool, now: Duration) -> usize {
        self.canvas.draw_scaled(&self.images[self.current]);
        self.points = self.sampler.sample(&self.canvas);

        let touched = match self.style {
            SwitchStyle::Retarget => pool.retarget(&self.points),
            SwitchStyle::Scatter => pool.scatter(),
        };

        self.generation += 1;
        if !self.pending.is_empty() {
            log::debug!("image switch supersedes a pending reconciliation");
        }
        self.pending.push_back(PendingSettle {
            generation: self.generation,
            due: now + self.settle_delay,
        });

        log::debug!(
            "switched to image {} ({} points, {} particles moved immediately)",
            self.current,
            self.points.len(),
            touched
        );
        self.points.len()
    }

    /// Fire every deferred reconciliation that is due at `now`.
    ///
    /// Stale ones (from superseded switches) are dropped. Returns the report
    /// of the reconciliation that ran, if any.
    pub fn poll<G>(
        &mut self,
        pool: &mut ParticlePool,
        scene: &mut G,
        now: Duration,
    ) -> Option<ReconcileReport>
    where
        G: SceneGraph + ?Sized,
    {
        let mut report = None;
        while let Some(pending) = self.pending.front().copied() {
            if pending.due > now {
                break;
            }
            self.pending.pop_front();

            if pending.generation == self.generation {
                report = Some(pool.reconcile(&self.points, scene));
            } else {
                log::debug!(
                    "dropping stale reconciliation (generation {} < {})",
                    pending.generation,
                    self.generation
                );
            }
        }
        report
    }

    /// Run the current reconciliation immediately, skipping the wait.
    pub fn settle_now<G>(&mut self, pool: &mut ParticlePool, scene: &mut G) -> ReconcileReport
    where
        G: SceneGraph + ?Sized,
    {
        self.pending.clear();
        pool.reconcile(&self.points, scene)
    }
}
