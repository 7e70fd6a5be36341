//! Spawn-on-pointer-move trail with a hard cap on live particles.

use banjak_core::{Effect, Particle, ParticlePool, Rgb, StepCtx, Surface};
use glam::Vec2;
use rand::prelude::*;
use rand::rngs::StdRng;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    /// Hard cap on live trail particles, regardless of pointer input.
    pub max_particles: usize,
    /// Minimum pointer travel before another particle spawns.
    pub min_move: f32,
    /// Life lost per second.
    pub decay: f32,
    /// Fraction of the previous frame kept each repaint.
    pub keep: f32,
    pub scatter: f32,
    pub hue_rate: f32,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            max_particles: 80,
            min_move: 0.5,
            decay: 1.4,
            keep: 0.82,
            scatter: 3.0,
            hue_rate: 40.0,
        }
    }
}

pub struct Trail {
    config: TrailConfig,
    pool: ParticlePool,
    last_spawn: Option<Vec2>,
}

impl Trail {
    pub fn new(mut config: TrailConfig) -> Self {
        // Scatter range must stay non-empty for any user tuning.
        config.scatter = config.scatter.max(f32::EPSILON);
        let pool = ParticlePool::new(config.max_particles);
        Self {
            config,
            pool,
            last_spawn: None,
        }
    }

    pub fn live_particles(&self) -> usize {
        self.pool.len()
    }
}

impl Effect for Trail {
    fn init(&mut self, _size: Vec2, _rng: &mut StdRng) {
        self.pool.clear();
        self.last_spawn = None;
    }

    fn step(&mut self, ctx: &mut StepCtx) {
        let dt = ctx.dt();
        let cfg = &self.config;

        if let Some(ptr) = ctx.pointer {
            let moved = self
                .last_spawn
                .map_or(true, |last| last.distance(ptr) >= cfg.min_move);
            if moved {
                let mut p = Particle::at(ptr);
                p.vel = Vec2::new(
                    ctx.rng.gen_range(-cfg.scatter..cfg.scatter),
                    ctx.rng.gen_range(-cfg.scatter..cfg.scatter) * 0.5,
                );
                p.hue = (ctx.elapsed_ms as f32 / 1000.0 * cfg.hue_rate) % 360.0;
                // Pool full: the spawn is dropped, never grown.
                self.pool.spawn(p);
                self.last_spawn = Some(ptr);
            }
        }

        for p in self.pool.iter_mut() {
            p.pos += p.vel * dt;
            p.life -= cfg.decay * dt;
        }
        self.pool.retire(|p| p.life <= 0.0);
    }

    fn draw(&self, surface: &mut Surface) {
        surface.fade(self.config.keep);
        for p in self.pool.iter() {
            let color = Rgb::from_hsl(p.hue, 0.85, 0.55);
            surface.add(p.pos.x, p.pos.y, color, p.life.clamp(0.0, 1.0));
        }
    }
}
