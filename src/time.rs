//! Frame clock for hosts.
//!
//! Produces the `(interval, elapsed)` pair that
//! [`MorphScene::update_scene`](crate::MorphScene::update_scene) expects.
//!
//! # Example
//!
//! ```ignore
//! use glyph_swarm::time::FrameClock;
//!
//! let mut clock = FrameClock::new();
//!
//! // In your render loop:
//! let (interval, elapsed) = clock.tick();
//! scene.update_scene(interval, elapsed, &mut graph);
//! ```

use std::time::{Duration, Instant};

/// Wall-clock frame timing with optional pause and fixed step.
#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
    last_frame: Instant,
    elapsed: f32,
    interval: f32,
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
    paused: bool,
    /// Time spent paused, excluded from `elapsed`.
    paused_total: Duration,
    fixed_interval: Option<f32>,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            elapsed: 0.0,
            interval: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
            paused: false,
            paused_total: Duration::ZERO,
            fixed_interval: None,
        }
    }

    /// Advance one frame. Returns `(interval, elapsed)` in seconds.
    ///
    /// With a fixed interval set, elapsed advances by exactly that amount
    /// each frame instead of following the wall clock.
    pub fn tick(&mut self) -> (f32, f32) {
        let now = Instant::now();

        if self.paused {
            self.interval = 0.0;
            return (self.interval, self.elapsed);
        }

        match self.fixed_interval {
            Some(step) => {
                self.interval = step;
                self.elapsed += step;
            }
            None => {
                self.interval = now.duration_since(self.last_frame).as_secs_f32();
                self.elapsed = (now.duration_since(self.start) - self.paused_total).as_secs_f32();
            }
        }
        self.last_frame = now;
        self.frame_count += 1;

        let since_fps = now.duration_since(self.fps_update_time);
        if since_fps >= self.fps_update_interval {
            let frames = self.frame_count - self.fps_frame_count;
            self.fps = frames as f32 / since_fps.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        (self.interval, self.elapsed)
    }

    /// Seconds since start, excluding pauses.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Seconds covered by the last frame.
    #[inline]
    pub fn interval(&self) -> f32 {
        self.interval
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second, refreshed twice a second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Freeze time. While paused `tick` reports a zero interval.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        if self.paused {
            let now = Instant::now();
            self.paused_total += now.duration_since(self.last_frame);
            self.last_frame = now;
            self.paused = false;
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Step by a constant interval (seconds) instead of the wall clock.
    /// `None` returns to real timing.
    pub fn set_fixed_interval(&mut self, interval: Option<f32>) {
        self.fixed_interval = interval;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clock_new() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.elapsed(), 0.0);
        assert!(!clock.is_paused());
    }

    #[test]
    fn test_tick_advances() {
        let mut clock = FrameClock::new();
        thread::sleep(Duration::from_millis(10));
        let (interval, elapsed) = clock.tick();

        assert!(interval > 0.0);
        assert!(elapsed >= interval);
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn test_pause_freezes_elapsed() {
        let mut clock = FrameClock::new();
        clock.tick();
        clock.pause();

        let before = clock.elapsed();
        thread::sleep(Duration::from_millis(10));
        let (interval, elapsed) = clock.tick();

        assert_eq!(elapsed, before);
        assert_eq!(interval, 0.0);
    }

    #[test]
    fn test_resume_excludes_paused_time() {
        let mut clock = FrameClock::new();
        clock.tick();
        clock.pause();
        thread::sleep(Duration::from_millis(50));
        clock.resume();
        let (_, elapsed) = clock.tick();
        assert!(elapsed < 0.045, "paused time leaked into elapsed: {elapsed}");
    }

    #[test]
    fn test_fixed_interval() {
        let mut clock = FrameClock::new();
        clock.set_fixed_interval(Some(1.0 / 60.0));

        thread::sleep(Duration::from_millis(30));
        let (interval, _) = clock.tick();
        let (_, elapsed) = clock.tick();

        assert!((interval - 1.0 / 60.0).abs() < 1e-6);
        assert!((elapsed - 2.0 / 60.0).abs() < 1e-6);
    }
}
