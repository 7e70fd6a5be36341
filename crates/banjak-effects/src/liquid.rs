//! Slow metaball-like blobs on a persistently faded surface.

use banjak_core::{pointer_force, reflect, Effect, Particle, ParticlePool, Rgb, StepCtx, Surface};
use glam::Vec2;
use rand::prelude::*;
use rand::rngs::StdRng;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LiquidConfig {
    pub blobs: usize,
    pub speed: f32,
    pub radius: f32,
    pub pointer_radius: f32,
    pub pointer_strength: f32,
    pub hue: f32,
}

impl Default for LiquidConfig {
    fn default() -> Self {
        Self {
            blobs: 6,
            speed: 3.0,
            radius: 9.0,
            pointer_radius: 16.0,
            pointer_strength: 20.0,
            hue: 265.0,
        }
    }
}

pub struct Liquid {
    config: LiquidConfig,
    pool: ParticlePool,
}

impl Liquid {
    pub fn new(mut config: LiquidConfig) -> Self {
        // Spawn velocity range must stay non-empty for any user tuning.
        config.speed = config.speed.max(f32::EPSILON);
        let pool = ParticlePool::new(config.blobs);
        Self { config, pool }
    }
}

impl Effect for Liquid {
    fn init(&mut self, size: Vec2, rng: &mut StdRng) {
        self.pool.clear();
        for _ in 0..self.config.blobs {
            let mut p = Particle::at(Vec2::new(
                rng.gen_range(0.0..size.x),
                rng.gen_range(0.0..size.y),
            ));
            let s = self.config.speed;
            p.vel = Vec2::new(rng.gen_range(-s..s), rng.gen_range(-s..s) * 0.5);
            p.size = self.config.radius * rng.gen_range(0.7..1.3);
            p.hue = self.config.hue + rng.gen_range(-25.0..25.0);
            if self.pool.spawn(p).is_none() {
                break;
            }
        }
    }

    fn step(&mut self, ctx: &mut StepCtx) {
        let dt = ctx.dt();
        let cfg = &self.config;
        for p in self.pool.iter_mut() {
            if let Some(ptr) = ctx.pointer {
                p.vel += pointer_force(p.pos, ptr, cfg.pointer_radius, cfg.pointer_strength) * dt;
            }
            p.vel = p.vel.clamp_length_max(cfg.speed * 2.0);
            p.pos += p.vel * dt;
            reflect(&mut p.pos, &mut p.vel, ctx.size);
        }
    }

    fn draw(&self, surface: &mut Surface) {
        surface.fade(0.88);
        for p in self.pool.iter() {
            let color = Rgb::from_hsl(p.hue, 0.75, 0.45);
            surface.fill_soft(p.pos, p.size, color, 0.45);
        }
        // Kept per-frame, same as the aurora pass.
        surface.blur();
    }
}
