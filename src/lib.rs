//! # glyph-swarm
//!
//! A particle field that gathers into the silhouette of an image, then
//! dissolves and regathers whenever the image changes.
//!
//! The crate is the CPU side of the effect: sampling images into target
//! points, keeping a pool of particles in step with those points, and easing
//! the particles every frame. Rendering is left to a host, which only needs to
//! implement [`SceneGraph`] and call two lifecycle hooks. The `glyph-swarm`
//! binary is one such host, built on winit and wgpu.
//!
//! ## Quick Start
//!
//! ```ignore
//! use glyph_swarm::prelude::*;
//!
//! let mut scene = MorphScene::new(MorphConfig::default(), builtin_glyphs(), 1280.0)?;
//! let mut graph: Vec<ParticleHandle> = Vec::new();
//! let mut clock = FrameClock::new();
//!
//! scene.init_scene(&mut graph);
//! loop {
//!     let (interval, elapsed) = clock.tick();
//!     scene.update_scene(interval, elapsed, &mut graph);
//!     draw(scene.particles());
//! }
//! ```
//!
//! ## Pipeline
//!
//! | Stage | Type |
//! |-------|------|
//! | Draw image onto a fixed canvas | [`Canvas`] |
//! | Pick foreground pixels | [`Sampler`], [`ThresholdSampler`] |
//! | Image space to world space | [`CoordinateMapper`] |
//! | Random scatter / exile | [`FieldPlacer`] |
//! | Grow, retarget, exile | [`ParticlePool`] |
//! | Per-frame easing and spin | [`MotionIntegrator`] |
//! | Debounced image switching | [`ImageSwitchController`] |
//! | Host-facing context | [`MorphScene`] |

pub mod assets;
pub mod canvas;
pub mod config;
pub mod controller;
pub mod error;
pub mod mapper;
pub mod motion;
pub mod palette;
pub mod placement;
pub mod pool;
pub mod sampler;
pub mod scene;
pub mod time;

pub use canvas::Canvas;
pub use config::{MorphConfig, SwitchStyle};
pub use controller::ImageSwitchController;
pub use error::{AppError, AssetError, ConfigError, GpuError, SceneError};
pub use glam::{Vec2, Vec3};
pub use mapper::CoordinateMapper;
pub use motion::{Easing, MotionIntegrator};
pub use palette::Palette;
pub use placement::FieldPlacer;
pub use pool::{
    MotionInfo, Particle, ParticleHandle, ParticlePool, ReconcileReport, SceneGraph, SlotTransition,
};
pub use sampler::{Sampler, TargetPoint, ThresholdSampler};
pub use scene::MorphScene;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use glyph_swarm::prelude::*;
/// ```
pub mod prelude {
    pub use crate::assets::{builtin_glyphs, load_images};
    pub use crate::config::{MorphConfig, SwitchStyle};
    pub use crate::motion::Easing;
    pub use crate::pool::{Particle, ParticleHandle, SceneGraph};
    pub use crate::sampler::{Sampler, TargetPoint, ThresholdSampler};
    pub use crate::scene::MorphScene;
    pub use crate::time::FrameClock;
    pub use crate::{Vec2, Vec3};
}
