//! Particle state, the bounded pool, and the shared physics helpers.

use glam::Vec2;
use rand::prelude::*;
use rand::rngs::StdRng;

/// Distances below this produce no pointer force; the guard keeps a pointer
/// sitting exactly on a particle from injecting NaN into the velocity, which
/// would corrupt the animation permanently since state is cumulative.
const MIN_FORCE_DIST: f32 = 1e-3;

/// Smoothing targets closer than this trigger a retarget.
const FLICKER_EPS: f32 = 0.02;

/// One simulated point: position and velocity mutate every frame, the visual
/// attributes decay or oscillate per effect.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub hue: f32,
    pub brightness: f32,
    /// Remaining life fraction, 1.0 down to 0.0 for decaying variants.
    pub life: f32,
    /// Free per-particle phase for oscillation.
    pub phase: f32,
}

impl Particle {
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size: 1.0,
            hue: 0.0,
            brightness: 1.0,
            life: 1.0,
            phase: 0.0,
        }
    }
}

/// Fixed-capacity pool with swap-remove compaction. The alive set can never
/// exceed the capacity chosen at mount, which bounds per-frame cost.
#[derive(Debug, Clone)]
pub struct ParticlePool {
    slots: Vec<Particle>,
    alive: usize,
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Particle::at(Vec2::ZERO); capacity],
            alive: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.alive
    }

    pub fn is_empty(&self) -> bool {
        self.alive == 0
    }

    pub fn is_full(&self) -> bool {
        self.alive >= self.slots.len()
    }

    /// Claim a slot for a fresh particle. Returns `None` when the pool is
    /// full; callers never grow the pool.
    pub fn spawn(&mut self, particle: Particle) -> Option<&mut Particle> {
        if self.is_full() {
            return None;
        }
        let idx = self.alive;
        self.slots[idx] = particle;
        self.alive += 1;
        Some(&mut self.slots[idx])
    }

    /// Remove every particle matching `expired` by swapping it with the last
    /// alive slot. Order is not preserved; nothing about drawing needs it.
    pub fn retire(&mut self, mut expired: impl FnMut(&Particle) -> bool) {
        let mut i = 0;
        while i < self.alive {
            if expired(&self.slots[i]) {
                self.alive -= 1;
                self.slots.swap(i, self.alive);
                // The swapped-in particle still needs checking.
            } else {
                i += 1;
            }
        }
    }

    pub fn clear(&mut self) {
        self.alive = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.slots[..self.alive].iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Particle> {
        self.slots[..self.alive].iter_mut()
    }
}

/// Boundary reflection: a component crossing 0 or the extent has its
/// velocity negated, not clamped, and the position mirrored back inside.
/// The final clamp keeps extreme overshoot in range so positions stay in
/// `[0, extent]` for any velocity.
pub fn reflect(pos: &mut Vec2, vel: &mut Vec2, size: Vec2) {
    reflect_axis(&mut pos.x, &mut vel.x, size.x);
    reflect_axis(&mut pos.y, &mut vel.y, size.y);
}

fn reflect_axis(pos: &mut f32, vel: &mut f32, extent: f32) {
    if extent <= 0.0 {
        *pos = 0.0;
        return;
    }
    if *pos < 0.0 {
        *pos = -*pos;
        *vel = -*vel;
    }
    if *pos > extent {
        *pos = 2.0 * extent - *pos;
        *vel = -*vel;
    }
    *pos = pos.clamp(0.0, extent);
}

/// Pointer force on a particle. Magnitude falls off linearly with distance
/// inside `radius` (`(radius - dist) / radius`); the result is applied to
/// velocity by the caller so motion stays inertial. Positive `strength`
/// pushes away from the pointer, negative pulls toward it. Zero distance is
/// treated as no force.
pub fn pointer_force(pos: Vec2, pointer: Vec2, radius: f32, strength: f32) -> Vec2 {
    let delta = pos - pointer;
    let dist = delta.length();
    if dist < MIN_FORCE_DIST || dist >= radius || radius <= 0.0 {
        return Vec2::ZERO;
    }
    let falloff = (radius - dist) / radius;
    (delta / dist) * falloff * strength
}

/// Brightness breathing by exponential smoothing toward a target. Once the
/// value comes within an epsilon of the target, a new random target is
/// chosen, so there is no visible fixed period.
#[derive(Debug, Clone, Copy)]
pub struct Flicker {
    value: f32,
    target: f32,
    min: f32,
    max: f32,
    rate: f32,
}

impl Flicker {
    pub fn new(rng: &mut StdRng, min: f32, max: f32, rate: f32) -> Self {
        Self {
            value: rng.gen_range(min..=max),
            target: rng.gen_range(min..=max),
            min,
            max,
            rate,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn update(&mut self, dt: f32, rng: &mut StdRng) -> f32 {
        let blend = (self.rate * dt).clamp(0.0, 1.0);
        self.value += (self.target - self.value) * blend;
        if (self.value - self.target).abs() < FLICKER_EPS {
            self.target = rng.gen_range(self.min..=self.max);
        }
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn pool_never_exceeds_capacity() {
        let mut pool = ParticlePool::new(3);
        for _ in 0..10 {
            pool.spawn(Particle::at(Vec2::ZERO));
        }
        assert_eq!(pool.len(), 3);
        assert!(pool.spawn(Particle::at(Vec2::ZERO)).is_none());
    }

    #[test]
    fn retire_compacts_with_swap_remove() {
        let mut pool = ParticlePool::new(4);
        for i in 0..4 {
            let mut p = Particle::at(Vec2::new(i as f32, 0.0));
            p.life = if i % 2 == 0 { 0.0 } else { 1.0 };
            pool.spawn(p);
        }
        pool.retire(|p| p.life <= 0.0);
        assert_eq!(pool.len(), 2);
        assert!(pool.iter().all(|p| p.life > 0.0));
    }

    #[test]
    fn reflect_bounces_instead_of_clamping() {
        let mut pos = Vec2::new(-2.0, 5.0);
        let mut vel = Vec2::new(-1.0, 0.0);
        reflect(&mut pos, &mut vel, Vec2::new(10.0, 10.0));
        assert_eq!(pos, Vec2::new(2.0, 5.0));
        assert_eq!(vel, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn positions_stay_in_bounds_for_any_velocity() {
        let mut rng = StdRng::seed_from_u64(7);
        let size = Vec2::new(80.0, 24.0);
        for _ in 0..200 {
            let mut pos = Vec2::new(rng.gen_range(0.0..80.0), rng.gen_range(0.0..24.0));
            let mut vel = Vec2::new(rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0));
            for _ in 0..500 {
                pos += vel * 0.016;
                reflect(&mut pos, &mut vel, size);
                assert!(pos.x >= 0.0 && pos.x <= size.x, "x escaped: {pos:?}");
                assert!(pos.y >= 0.0 && pos.y <= size.y, "y escaped: {pos:?}");
            }
        }
    }

    #[test]
    fn pointer_on_particle_produces_no_force() {
        let p = Vec2::new(4.0, 4.0);
        let force = pointer_force(p, p, 10.0, 30.0);
        assert_eq!(force, Vec2::ZERO);
        assert!(force.x.is_finite() && force.y.is_finite());
    }

    #[test]
    fn force_falls_off_linearly_and_ends_at_radius() {
        let pointer = Vec2::ZERO;
        let near = pointer_force(Vec2::new(2.0, 0.0), pointer, 10.0, 1.0);
        let far = pointer_force(Vec2::new(8.0, 0.0), pointer, 10.0, 1.0);
        assert!((near.length() - 0.8).abs() < 1e-5);
        assert!((far.length() - 0.2).abs() < 1e-5);
        assert_eq!(
            pointer_force(Vec2::new(10.0, 0.0), pointer, 10.0, 1.0),
            Vec2::ZERO
        );
    }

    #[test]
    fn flicker_retargets_near_the_goal() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut flicker = Flicker::new(&mut rng, 0.2, 1.0, 4.0);
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..2000 {
            let v = flicker.update(0.05, &mut rng);
            assert!((0.2 - FLICKER_EPS..=1.0 + FLICKER_EPS).contains(&v));
            seen.insert((flicker.target * 1000.0) as i32);
        }
        // Retargeting happened; the value is not stuck chasing one goal.
        assert!(seen.len() > 3);
    }
}
