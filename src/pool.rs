//! The particle arena and its reconciliation against a target list.
//!
//! Slots are only ever appended. When an image needs fewer particles than the
//! pool holds, the surplus slots are *exiled*: their target moves far outside
//! the frame and they drift away, but they stay allocated (and stay in the
//! host's scene graph) so a later image can pull them back in.
//!
//! # Slot transitions
//!
//! For target list `T`, reconciliation walks every slot index `i`:
//!
//! | condition                                  | transition  |
//! |--------------------------------------------|-------------|
//! | `i < len(T)`, slot exists                  | `Retarget`  |
//! | `i < len(T)`, slot missing                 | `Create`    |
//! | `i >= len(T)`, slot exists and is in frame | `Exile`     |
//! | anything else                              | nothing     |

use glam::{Vec2, Vec3};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::MorphConfig;
use crate::error::ConfigError;
use crate::mapper::CoordinateMapper;
use crate::palette::Palette;
use crate::placement::{clock_seed, FieldPlacer};
use crate::sampler::TargetPoint;

/// Default upper bound for per-frame spin, in radians.
pub const DEFAULT_MAX_SPIN: f32 = 0.05;

/// Stable reference to a particle slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParticleHandle(usize);

impl ParticleHandle {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single renderable particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Current world position, eased toward `target` every frame.
    pub position: Vec3,
    /// Where the particle is heading.
    pub target: Vec3,
    /// Accumulated rotation around the x and y axes (radians).
    pub rotation: Vec2,
    /// RGB colour, fixed at creation.
    pub color: Vec3,
}

/// Constant angular velocity of one particle (radians per frame).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionInfo {
    pub vx: f32,
    pub vy: f32,
}

/// What reconciliation does to one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotTransition {
    /// Existing particle gets a fresh target from the new list.
    Retarget,
    /// A new particle is allocated for this target.
    Create,
    /// Particle has no target any more and is sent out of frame.
    Exile,
}

impl SlotTransition {
    /// Decide what happens to slot `index`.
    ///
    /// `in_frame` is the number of leading slots that may currently be
    /// heading somewhere visible; slots at or past it are already exiled.
    pub fn classify(
        index: usize,
        target_count: usize,
        pool_len: usize,
        in_frame: usize,
    ) -> Option<Self> {
        if index < target_count {
            if index < pool_len {
                Some(SlotTransition::Retarget)
            } else {
                Some(SlotTransition::Create)
            }
        } else if index < pool_len && index < in_frame {
            Some(SlotTransition::Exile)
        } else {
            None
        }
    }
}

/// Counts of what one reconciliation pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub retargeted: usize,
    pub created: usize,
    pub exiled: usize,
    /// Pool length after the pass.
    pub total: usize,
}

/// Host-side container that renders particles.
///
/// `add` is called exactly once per particle, when its slot is created.
pub trait SceneGraph {
    fn add(&mut self, handle: ParticleHandle, particle: &Particle);
}

/// Records the handles it was given, in order.
impl SceneGraph for Vec<ParticleHandle> {
    fn add(&mut self, handle: ParticleHandle, _particle: &Particle) {
        self.push(handle);
    }
}

/// Growable arena of particles plus their motion parameters.
#[derive(Debug, Clone)]
pub struct ParticlePool {
    particles: Vec<Particle>,
    motion: Vec<MotionInfo>,
    /// Slots `[in_frame..]` are exiled.
    in_frame: usize,
    palette: Palette,
    placer: FieldPlacer,
    mapper: CoordinateMapper,
    spin_rng: SmallRng,
    max_spin: f32,
}

impl ParticlePool {
    pub fn new(palette: Palette, placer: FieldPlacer, mapper: CoordinateMapper) -> Self {
        Self {
            particles: Vec::new(),
            motion: Vec::new(),
            in_frame: 0,
            palette,
            placer,
            mapper,
            spin_rng: SmallRng::seed_from_u64(clock_seed()),
            max_spin: DEFAULT_MAX_SPIN,
        }
    }

    /// Build a pool from configuration.
    ///
    /// With `config.seed` set, every random stream is derived from it and the
    /// whole animation is reproducible.
    pub fn from_config(config: &MorphConfig, viewport_width: f32) -> Result<Self, ConfigError> {
        let palette = Palette::from_hex(&config.palette)?;
        let offset = Vec2::new(config.offset_x, config.offset_y);

        let pool = match config.seed {
            Some(seed) => Self::new(
                palette,
                FieldPlacer::with_seed(viewport_width, seed),
                CoordinateMapper::with_seed(offset, seed.wrapping_add(1)),
            )
            .with_spin_seed(seed.wrapping_add(2)),
            None => Self::new(
                palette,
                FieldPlacer::new(viewport_width),
                CoordinateMapper::new(offset),
            ),
        };
        Ok(pool.with_max_spin(config.max_spin))
    }

    /// Set the upper bound for per-frame spin of new particles.
    pub fn with_max_spin(mut self, max_spin: f32) -> Self {
        self.max_spin = max_spin.max(0.0);
        self
    }

    /// Seed the spin generator.
    pub fn with_spin_seed(mut self, seed: u64) -> Self {
        self.spin_rng = SmallRng::seed_from_u64(seed);
        self
    }

    // ========== Reconciliation ==========

    /// Point existing slots at the new targets, one to one.
    ///
    /// Slots beyond `targets.len()` are left alone and no slots are created.
    /// Returns the number of slots retargeted.
    pub fn retarget(&mut self, targets: &[TargetPoint]) -> usize {
        let n = targets.len().min(self.particles.len());
        for (particle, &point) in self.particles.iter_mut().zip(targets) {
            particle.target = self.mapper.map(point);
        }
        self.in_frame = self.in_frame.max(n);
        n
    }

    /// Send every particle, exiled ones included, to a random spot inside the frame.
    ///
    /// All slots count as in frame afterwards, so the next
    /// [`reconcile`](Self::reconcile) exiles whatever the new image leaves over.
    pub fn scatter(&mut self) -> usize {
        for particle in &mut self.particles {
            self.placer.place(&mut particle.target, false);
        }
        self.in_frame = self.particles.len();
        self.particles.len()
    }

    /// Resize and retarget the pool so that slot `i` serves `targets[i]`.
    ///
    /// New slots are created (and handed to `scene`) as needed, surplus slots
    /// are exiled. The pool never shrinks.
    pub fn reconcile<S>(&mut self, targets: &[TargetPoint], scene: &mut S) -> ReconcileReport
    where
        S: SceneGraph + ?Sized,
    {
        let target_count = targets.len();
        let mut report = ReconcileReport::default();

        let end = target_count.max(self.particles.len());
        for index in 0..end {
            let transition =
                SlotTransition::classify(index, target_count, self.particles.len(), self.in_frame);

            match transition {
                Some(SlotTransition::Retarget) => {
                    self.particles[index].target = self.mapper.map(targets[index]);
                    report.retargeted += 1;
                }
                Some(SlotTransition::Create) => {
                    self.create(index, targets[index], scene);
                    report.created += 1;
                }
                Some(SlotTransition::Exile) => {
                    self.placer.place(&mut self.particles[index].target, true);
                    report.exiled += 1;
                }
                None => {}
            }
        }

        self.in_frame = target_count;
        report.total = self.particles.len();

        log::info!("total particles: {}", report.total);
        log::debug!(
            "reconciled: {} retargeted, {} created, {} exiled",
            report.retargeted,
            report.created,
            report.exiled
        );
        report
    }

    fn create<S>(&mut self, index: usize, point: TargetPoint, scene: &mut S)
    where
        S: SceneGraph + ?Sized,
    {
        debug_assert_eq!(index, self.particles.len());

        let mut position = Vec3::ZERO;
        self.placer.place(&mut position, false);

        let particle = Particle {
            position,
            target: self.mapper.map(point),
            rotation: Vec2::ZERO,
            color: self.palette.color(index),
        };
        let motion = MotionInfo {
            vx: self.spin_rng.gen::<f32>() * self.max_spin,
            vy: self.spin_rng.gen::<f32>() * self.max_spin,
        };

        self.particles.push(particle);
        self.motion.push(motion);
        scene.add(ParticleHandle(index), &particle);
    }

    // ========== Access ==========

    /// Number of allocated slots, exiled ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Number of leading slots that are not exiled.
    #[inline]
    pub fn in_frame_count(&self) -> usize {
        self.in_frame.min(self.particles.len())
    }

    /// Whether the slot has been sent out of frame.
    pub fn is_exiled(&self, handle: ParticleHandle) -> bool {
        handle.0 >= self.in_frame
    }

    pub fn get(&self, handle: ParticleHandle) -> Option<&Particle> {
        self.particles.get(handle.0)
    }

    pub fn motion(&self, handle: ParticleHandle) -> Option<&MotionInfo> {
        self.motion.get(handle.0)
    }

    /// All particles in slot order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Handle for slot `index`, if it exists.
    pub fn handle(&self, index: usize) -> Option<ParticleHandle> {
        (index < self.particles.len()).then_some(ParticleHandle(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParticleHandle, &Particle)> {
        self.particles
            .iter()
            .enumerate()
            .map(|(i, p)| (ParticleHandle(i), p))
    }

    /// Particles paired with their motion parameters, for integration.
    pub(crate) fn bodies_mut(&mut self) -> impl Iterator<Item = (&mut Particle, &MotionInfo)> {
        self.particles.iter_mut().zip(self.motion.iter())
    }

    pub fn placer(&self) -> &FieldPlacer {
        &self.placer
    }

    pub fn placer_mut(&mut self) -> &mut FieldPlacer {
        &mut self.placer
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTH: f32 = 800.0;

    fn pool() -> ParticlePool {
        ParticlePool::new(
            Palette::default(),
            FieldPlacer::with_seed(WIDTH, 1),
            CoordinateMapper::with_seed(Vec2::new(120.0, 80.0), 2),
        )
        .with_spin_seed(3)
    }

    fn no_scene() -> Vec<ParticleHandle> {
        Vec::new()
    }

    fn points(n: u32) -> Vec<TargetPoint> {
        (1..=n).map(|i| TargetPoint::new(i * 2, i * 2)).collect()
    }

    #[test]
    fn test_classify() {
        use SlotTransition::*;
        assert_eq!(SlotTransition::classify(0, 3, 1, 1), Some(Retarget));
        assert_eq!(SlotTransition::classify(1, 3, 1, 1), Some(Create));
        assert_eq!(SlotTransition::classify(3, 3, 5, 5), Some(Exile));
        assert_eq!(SlotTransition::classify(3, 3, 5, 3), None);
        assert_eq!(SlotTransition::classify(6, 3, 5, 5), None);
    }

    #[test]
    fn test_reconcile_creates_into_empty_pool() {
        let mut pool = pool();
        let mut scene: Vec<ParticleHandle> = Vec::new();
        let targets = points(4);

        let report = pool.reconcile(&targets, &mut scene);

        assert_eq!(report, ReconcileReport { retargeted: 0, created: 4, exiled: 0, total: 4 });
        assert_eq!(scene, (0..4).map(ParticleHandle).collect::<Vec<_>>());
        for (handle, particle) in pool.iter() {
            assert!(pool.mapper().contains(targets[handle.index()], particle.target));
            assert!(particle.position.truncate().length() <= WIDTH + 0.01);
        }
    }

    #[test]
    fn test_colors_follow_slot_index() {
        let mut pool = pool();
        pool.reconcile(&points(7), &mut no_scene());
        let palette = Palette::default();
        for (handle, particle) in pool.iter() {
            assert_eq!(particle.color, palette.color(handle.index()));
        }
        assert_eq!(pool.particles()[5].color, pool.particles()[0].color);
    }

    #[test]
    fn test_colors_survive_reuse() {
        let mut pool = pool();
        pool.reconcile(&points(3), &mut no_scene());
        let before: Vec<_> = pool.particles().iter().map(|p| p.color).collect();

        pool.reconcile(&points(1), &mut no_scene());
        pool.reconcile(&[TargetPoint::new(100, 100); 3], &mut no_scene());

        let after: Vec<_> = pool.particles().iter().map(|p| p.color).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_spin_within_bounds() {
        let mut pool = pool().with_max_spin(0.05);
        pool.reconcile(&points(50), &mut no_scene());
        for i in 0..pool.len() {
            let m = pool.motion(ParticleHandle(i)).unwrap();
            assert!((0.0..0.05).contains(&m.vx));
            assert!((0.0..0.05).contains(&m.vy));
        }
    }

    #[test]
    fn test_shrink_exiles_tail() {
        let mut pool = pool();
        pool.reconcile(&points(10), &mut no_scene());
        let mut scene: Vec<ParticleHandle> = Vec::new();
        let report = pool.reconcile(&points(4), &mut scene);

        assert_eq!(report, ReconcileReport { retargeted: 4, created: 0, exiled: 6, total: 10 });
        assert!(scene.is_empty());
        assert_eq!(pool.in_frame_count(), 4);
        for particle in &pool.particles()[4..] {
            assert!(particle.target.truncate().length() >= WIDTH - 0.01);
        }
    }

    #[test]
    fn test_empty_targets_exile_everyone() {
        let mut pool = pool();
        pool.reconcile(&points(5), &mut no_scene());
        let report = pool.reconcile(&[], &mut no_scene());
        assert_eq!(report.exiled, 5);
        assert_eq!(pool.len(), 5);
        assert!(pool.iter().all(|(h, _)| pool.is_exiled(h)));
    }

    #[test]
    fn test_reconcile_is_idempotent_in_size() {
        let mut pool = pool();
        pool.reconcile(&points(10), &mut no_scene());
        pool.reconcile(&points(6), &mut no_scene());

        let report = pool.reconcile(&points(6), &mut no_scene());
        assert_eq!(report.created, 0);
        assert_eq!(report.exiled, 0);
        assert_eq!(report.retargeted, 6);
        assert_eq!(pool.len(), 10);
    }

    #[test]
    fn test_exiled_slots_come_back() {
        let mut pool = pool();
        pool.reconcile(&points(8), &mut no_scene());
        pool.reconcile(&points(2), &mut no_scene());

        let mut scene: Vec<ParticleHandle> = Vec::new();
        let targets = points(8);
        let report = pool.reconcile(&targets, &mut scene);
        assert_eq!(report.retargeted, 8);
        assert!(scene.is_empty());
        for (handle, particle) in pool.iter() {
            assert!(pool.mapper().contains(targets[handle.index()], particle.target));
        }
    }

    #[test]
    fn test_retarget_never_creates() {
        let mut pool = pool();
        pool.reconcile(&points(3), &mut no_scene());
        let count = pool.retarget(&points(9));
        assert_eq!(count, 3);
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn test_retarget_leaves_tail_untouched() {
        let mut pool = pool();
        pool.reconcile(&points(5), &mut no_scene());
        let tail: Vec<_> = pool.particles()[2..].iter().map(|p| p.target).collect();

        let targets = [TargetPoint::new(200, 200), TargetPoint::new(202, 200)];
        assert_eq!(pool.retarget(&targets), 2);

        for (i, point) in targets.iter().enumerate() {
            assert!(pool.mapper().contains(*point, pool.particles()[i].target));
        }
        let after: Vec<_> = pool.particles()[2..].iter().map(|p| p.target).collect();
        assert_eq!(tail, after);
    }

    #[test]
    fn test_retargeted_exiles_can_be_exiled_again() {
        let mut pool = pool();
        pool.reconcile(&points(6), &mut no_scene());
        pool.reconcile(&points(2), &mut no_scene());

        // Immediate phase pulls slots 2..6 back in frame...
        pool.retarget(&points(6));
        // ...then a smaller image settles before them.
        let report = pool.reconcile(&points(3), &mut no_scene());
        assert_eq!(report.exiled, 3);
    }

    #[test]
    fn test_scatter_recalls_exiles_until_next_settle() {
        let mut pool = pool();
        pool.reconcile(&points(6), &mut no_scene());
        pool.reconcile(&points(2), &mut no_scene());

        assert_eq!(pool.scatter(), 6);
        assert_eq!(pool.in_frame_count(), 6);
        for particle in pool.particles() {
            assert!(particle.target.truncate().length() <= WIDTH + 0.01);
        }

        let report = pool.reconcile(&points(2), &mut no_scene());
        assert_eq!(report.exiled, 4);
        for particle in &pool.particles()[2..] {
            assert!(particle.target.truncate().length() >= WIDTH - 0.01);
        }
    }

    #[test]
    fn test_handle_lookup() {
        let mut pool = pool();
        pool.reconcile(&points(2), &mut no_scene());
        assert_eq!(pool.handle(1).map(ParticleHandle::index), Some(1));
        assert!(pool.handle(2).is_none());
        assert!(pool.get(ParticleHandle(5)).is_none());
    }

    #[test]
    fn test_from_config_is_reproducible() {
        let config = MorphConfig::default().with_seed(Some(42));
        let mut a = ParticlePool::from_config(&config, WIDTH).unwrap();
        let mut b = ParticlePool::from_config(&config, WIDTH).unwrap();
        a.reconcile(&points(5), &mut no_scene());
        b.reconcile(&points(5), &mut no_scene());
        assert_eq!(a.particles(), b.particles());
    }
}
