//! End-to-end tests for the morphing core.
//!
//! These drive the public API only, the way a host would.

use std::time::Duration;

use glyph_swarm::assets::builtin_glyphs;
use glyph_swarm::prelude::*;
use glyph_swarm::{
    Canvas, CoordinateMapper, FieldPlacer, MotionIntegrator, Palette, ParticlePool,
};
use image::{Rgba, RgbaImage};

const VIEWPORT: f32 = 1000.0;

fn pool(seed: u64) -> ParticlePool {
    ParticlePool::new(
        Palette::default(),
        FieldPlacer::with_seed(VIEWPORT, seed),
        CoordinateMapper::with_seed(Vec2::new(120.0, 80.0), seed + 1),
    )
    .with_spin_seed(seed + 2)
}

fn points(coords: &[(u32, u32)]) -> Vec<TargetPoint> {
    coords.iter().map(|&(x, y)| TargetPoint::new(x, y)).collect()
}

fn grid(n: u32) -> Vec<TargetPoint> {
    (0..n).map(|i| TargetPoint::new(2 + 2 * (i % 50), 2 + 2 * (i / 50))).collect()
}

// ============================================================================
// Pool reconciliation
// ============================================================================

#[test]
fn test_first_image_creates_one_particle_per_point() {
    let mut pool = pool(1);
    let mut scene: Vec<ParticleHandle> = Vec::new();
    let targets = points(&[(10, 20), (50, 60), (100, 110)]);

    let report = pool.reconcile(&targets, &mut scene);

    assert_eq!(report.created, 3);
    assert_eq!(report.total, 3);
    assert_eq!(pool.len(), 3);

    // Each particle handed to the scene exactly once, in slot order
    let indices: Vec<usize> = scene.iter().map(|h| h.index()).collect();
    assert_eq!(indices, vec![0, 1, 2]);

    for (i, point) in targets.iter().enumerate() {
        let particle = pool.particles()[i];
        assert!(pool.mapper().contains(*point, particle.target));
        assert_eq!(particle.rotation, Vec2::ZERO);
        assert_eq!(particle.color, pool.palette().color(i));
    }
}

#[test]
fn test_shrinking_exiles_surplus_slots() {
    let mut pool = pool(2);
    let mut scene: Vec<ParticleHandle> = Vec::new();

    pool.reconcile(&grid(10), &mut scene);
    let four = grid(4);
    let report = pool.reconcile(&four, &mut scene);

    assert_eq!(report.retargeted, 4);
    assert_eq!(report.exiled, 6);
    assert_eq!(report.created, 0);
    assert_eq!(pool.len(), 10);
    assert_eq!(scene.len(), 10);

    for (i, point) in four.iter().enumerate() {
        assert!(pool.mapper().contains(*point, pool.particles()[i].target));
    }
    for (handle, particle) in pool.iter().skip(4) {
        assert!(pool.is_exiled(handle));
        let planar = Vec2::new(particle.target.x, particle.target.y).length();
        assert!(planar >= VIEWPORT - 1e-2, "slot {} too close: {}", handle.index(), planar);
        assert!(planar < 3.0 * VIEWPORT);
    }
}

#[test]
fn test_growing_creates_only_missing_slots() {
    let mut pool = pool(3);
    let mut scene: Vec<ParticleHandle> = Vec::new();

    pool.reconcile(&grid(4), &mut scene);
    let report = pool.reconcile(&grid(10), &mut scene);

    assert_eq!(report.retargeted, 4);
    assert_eq!(report.created, 6);
    assert_eq!(scene.len(), 10);
    assert_eq!(pool.in_frame_count(), 10);
}

#[test]
fn test_reconcile_is_idempotent() {
    let mut pool = pool(4);
    let mut scene: Vec<ParticleHandle> = Vec::new();

    pool.reconcile(&grid(12), &mut scene);
    let targets = grid(5);
    pool.reconcile(&targets, &mut scene);
    let exiled: Vec<Vec3> = pool.particles()[5..].iter().map(|p| p.target).collect();

    let again = pool.reconcile(&targets, &mut scene);

    assert_eq!(again.created, 0);
    assert_eq!(again.exiled, 0);
    assert_eq!(again.retargeted, 5);
    assert_eq!(pool.len(), 12);
    assert_eq!(scene.len(), 12);

    let still: Vec<Vec3> = pool.particles()[5..].iter().map(|p| p.target).collect();
    assert_eq!(exiled, still);
}

#[test]
fn test_pool_never_shrinks() {
    let mut pool = pool(5);
    let mut scene: Vec<ParticleHandle> = Vec::new();

    let mut longest = 0;
    for n in [30, 5, 0, 18, 42, 1] {
        pool.reconcile(&grid(n), &mut scene);
        longest = longest.max(n as usize);
        assert_eq!(pool.len(), longest);
    }
}

// ============================================================================
// Motion
// ============================================================================

#[test]
fn test_per_frame_easing_converges_geometrically() {
    let mut pool = pool(6);
    let mut scene: Vec<ParticleHandle> = Vec::new();
    pool.reconcile(&grid(20), &mut scene);

    let start: Vec<f32> = pool
        .particles()
        .iter()
        .map(|p| p.position.distance(p.target))
        .collect();

    let integrator = MotionIntegrator::new(Easing::PerFrame { factor: 0.2 });
    let steps = 10;
    for _ in 0..steps {
        integrator.step(&mut pool, 1.0 / 60.0);
    }

    let expected = 0.8f32.powi(steps);
    for (particle, d0) in pool.particles().iter().zip(start) {
        let d = particle.position.distance(particle.target);
        assert!((d - d0 * expected).abs() <= 1e-2 + d0 * 1e-4, "{d} vs {}", d0 * expected);
    }
}

#[test]
fn test_exponential_easing_ignores_frame_rate() {
    let mut fast = pool(7);
    let mut slow = pool(7);
    let mut scene: Vec<ParticleHandle> = Vec::new();
    fast.reconcile(&grid(8), &mut scene);
    slow.reconcile(&grid(8), &mut scene);

    let integrator = MotionIntegrator::new(Easing::Exponential { rate: 5.0 });
    for _ in 0..4 {
        integrator.step(&mut fast, 0.01);
    }
    integrator.step(&mut slow, 0.04);

    for (a, b) in fast.particles().iter().zip(slow.particles()) {
        assert!(a.position.distance(b.position) < 1e-2);
    }
}

#[test]
fn test_spin_accumulates_every_frame() {
    let mut pool = pool(8).with_max_spin(0.05);
    let mut scene: Vec<ParticleHandle> = Vec::new();
    pool.reconcile(&grid(6), &mut scene);

    let integrator = MotionIntegrator::default();
    for _ in 0..3 {
        integrator.step(&mut pool, 1.0 / 60.0);
    }

    for (handle, particle) in pool.iter() {
        let motion = pool.motion(handle).unwrap();
        assert!((0.0..0.05).contains(&motion.vx));
        assert!((particle.rotation.x - 3.0 * motion.vx).abs() < 1e-5);
        assert!((particle.rotation.y - 3.0 * motion.vy).abs() < 1e-5);
    }
}

// ============================================================================
// Sampling
// ============================================================================

#[test]
fn test_sampled_points_stay_in_bounds_and_on_grid() {
    let sampler = ThresholdSampler::default();
    let mut canvas = Canvas::new(240, 240);

    for glyph in builtin_glyphs() {
        canvas.draw_scaled(&glyph);
        let sampled = sampler.sample(&canvas);
        assert!(!sampled.is_empty());
        for p in sampled {
            assert!(p.x < canvas.width() && p.y < canvas.height());
            assert!(p.x != 0 && p.y != 0);
            assert!(p.x % 2 == 0 && p.y % 2 == 0);
        }
    }
}

#[test]
fn test_empty_and_white_canvases_have_no_points() {
    let sampler = ThresholdSampler::default();
    let mut canvas = Canvas::new(64, 64);
    assert!(sampler.sample(&canvas).is_empty());

    let white = RgbaImage::from_pixel(64, 64, Rgba([255, 255, 255, 255]));
    canvas.draw_scaled(&white);
    assert!(sampler.sample(&canvas).is_empty());
}

// ============================================================================
// Whole scene
// ============================================================================

fn scene_config() -> MorphConfig {
    MorphConfig::default().with_seed(Some(11))
}

#[test]
fn test_rapid_switches_reconcile_once_for_latest_image() {
    let mut scene = MorphScene::new(scene_config(), builtin_glyphs(), VIEWPORT).unwrap();
    let mut graph: Vec<ParticleHandle> = Vec::new();

    scene.init_scene(&mut graph);
    assert!(scene.update_scene(0.6, 0.6, &mut graph).is_some());

    // Two switches 100 ms apart, both inside the settle window
    scene.update_scene(0.1, 0.7, &mut graph);
    scene.next_image();
    scene.update_scene(0.1, 0.8, &mut graph);
    let latest = scene.next_image();

    let mut reports = Vec::new();
    let mut elapsed = 0.8;
    for _ in 0..60 {
        elapsed += 1.0 / 60.0;
        if let Some(report) = scene.update_scene(1.0 / 60.0, elapsed, &mut graph) {
            reports.push(report);
        }
    }

    assert_eq!(reports.len(), 1);
    assert_eq!(scene.pool().in_frame_count(), latest);
    assert_eq!(scene.controller().current_index(), 2);
    assert_eq!(graph.len(), scene.particles().len());
}

#[test]
fn test_switch_wraps_around() {
    let images = builtin_glyphs();
    let count = images.len();
    let mut scene = MorphScene::new(scene_config(), images, VIEWPORT).unwrap();
    let mut graph: Vec<ParticleHandle> = Vec::new();
    scene.init_scene(&mut graph);

    for _ in 0..count {
        scene.next_image();
    }
    assert_eq!(scene.controller().current_index(), 0);
}

#[test]
fn test_scatter_style_sends_particles_into_frame() {
    let config = scene_config()
        .with_switch_style(SwitchStyle::Scatter)
        .with_settle_delay(Duration::ZERO);
    let mut scene = MorphScene::new(config, builtin_glyphs(), VIEWPORT).unwrap();
    let mut graph: Vec<ParticleHandle> = Vec::new();
    scene.init_scene(&mut graph);

    scene.next_image();
    assert_eq!(scene.pool().in_frame_count(), scene.particles().len());
    for particle in scene.particles() {
        let planar = Vec2::new(particle.target.x, particle.target.y).length();
        assert!(planar <= VIEWPORT + 1e-2);
    }
}

#[test]
fn test_particles_approach_targets_after_settling() {
    let config = scene_config().with_settle_delay(Duration::ZERO);
    let mut scene = MorphScene::new(config, builtin_glyphs(), VIEWPORT).unwrap();
    let mut graph: Vec<ParticleHandle> = Vec::new();
    scene.init_scene(&mut graph);

    let mut elapsed = 0.0;
    for _ in 0..120 {
        elapsed += 1.0 / 60.0;
        scene.update_scene(1.0 / 60.0, elapsed, &mut graph);
    }

    for particle in scene.particles() {
        assert!(particle.position.distance(particle.target) < 1e-3);
    }
}
