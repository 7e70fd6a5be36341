//! Click-triggered radial bursts with gravity.

use banjak_core::{Effect, Particle, ParticlePool, Rgb, StepCtx, Surface};
use glam::Vec2;
use rand::prelude::*;
use rand::rngs::StdRng;
use serde::Deserialize;

use crate::glyphs::SPARK_GLYPHS;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SparksConfig {
    /// Particles per click.
    pub burst: usize,
    /// Hard cap across all simultaneous bursts.
    pub max_particles: usize,
    pub speed: f32,
    pub gravity: f32,
    pub decay: f32,
    pub keep: f32,
}

impl Default for SparksConfig {
    fn default() -> Self {
        Self {
            burst: 24,
            max_particles: 192,
            speed: 16.0,
            gravity: 12.0,
            decay: 0.9,
            keep: 0.8,
        }
    }
}

pub struct Sparks {
    config: SparksConfig,
    pool: ParticlePool,
}

impl Sparks {
    pub fn new(config: SparksConfig) -> Self {
        let pool = ParticlePool::new(config.max_particles);
        Self { config, pool }
    }
}

impl Effect for Sparks {
    fn init(&mut self, _size: Vec2, _rng: &mut StdRng) {
        self.pool.clear();
    }

    fn step(&mut self, ctx: &mut StepCtx) {
        let dt = ctx.dt();
        let cfg = &self.config;

        for &click in ctx.clicks {
            for _ in 0..cfg.burst {
                let angle = ctx.rng.gen_range(0.0..std::f32::consts::TAU);
                let speed = cfg.speed * ctx.rng.gen_range(0.3..1.0);
                let mut p = Particle::at(click);
                p.vel = Vec2::new(angle.cos() * speed, angle.sin() * speed * 0.5);
                p.hue = ctx.rng.gen_range(10.0..55.0);
                if self.pool.spawn(p).is_none() {
                    break;
                }
            }
        }

        for p in self.pool.iter_mut() {
            p.vel.y += cfg.gravity * dt;
            p.pos += p.vel * dt;
            p.life -= cfg.decay * dt;
        }
        let floor = ctx.size.y + 2.0;
        self.pool.retire(|p| p.life <= 0.0 || p.pos.y > floor);
    }

    fn draw(&self, surface: &mut Surface) {
        surface.fade(self.config.keep);
        for p in self.pool.iter() {
            let life = p.life.clamp(0.0, 1.0);
            let color = Rgb::from_hsl(p.hue, 1.0, 0.3 + life * 0.3);
            if life > 0.6 {
                let idx = ((life * SPARK_GLYPHS.len() as f32) as usize).min(SPARK_GLYPHS.len() - 1);
                surface.stamp(p.pos.x, p.pos.y, SPARK_GLYPHS[idx], color);
            } else {
                surface.add(p.pos.x, p.pos.y, color, life);
            }
        }
    }
}
