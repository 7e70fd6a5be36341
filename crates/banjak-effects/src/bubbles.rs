//! Rising wobbling rings that pop near the top and respawn below.

use banjak_core::{Effect, Particle, ParticlePool, Rgb, StepCtx, Surface};
use glam::Vec2;
use rand::prelude::*;
use rand::rngs::StdRng;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BubblesConfig {
    pub count: usize,
    pub rise_speed: f32,
    pub wobble: f32,
    /// Fraction of the surface height where bubbles start popping.
    pub pop_line: f32,
    pub hue: f32,
}

impl Default for BubblesConfig {
    fn default() -> Self {
        Self {
            count: 14,
            rise_speed: 4.0,
            wobble: 2.0,
            pop_line: 0.12,
            hue: 185.0,
        }
    }
}

pub struct Bubbles {
    config: BubblesConfig,
    pool: ParticlePool,
}

impl Bubbles {
    pub fn new(config: BubblesConfig) -> Self {
        let pool = ParticlePool::new(config.count);
        Self { config, pool }
    }

    fn respawn(p: &mut Particle, size: Vec2, rise: f32, rng: &mut StdRng) {
        p.pos = Vec2::new(rng.gen_range(0.0..size.x), size.y + rng.gen_range(0.0..4.0));
        p.vel.y = -rise * rng.gen_range(0.6..1.3);
        p.size = rng.gen_range(1.5..4.0);
        p.phase = rng.gen_range(0.0..std::f32::consts::TAU);
    }
}

impl Effect for Bubbles {
    fn init(&mut self, size: Vec2, rng: &mut StdRng) {
        self.pool.clear();
        for _ in 0..self.config.count {
            let Some(p) = self.pool.spawn(Particle::at(Vec2::ZERO)) else {
                break;
            };
            Self::respawn(p, size, self.config.rise_speed, rng);
            // Scatter initial depths so the first frames are not a wall.
            p.pos.y = rng.gen_range(0.0..size.y.max(1.0));
        }
    }

    fn step(&mut self, ctx: &mut StepCtx) {
        let dt = ctx.dt();
        let t = ctx.elapsed_ms as f32 / 1000.0;
        let cfg = &self.config;
        let size = ctx.size;
        let pop_y = size.y * cfg.pop_line;

        for p in self.pool.iter_mut() {
            p.pos.y += p.vel.y * dt;
            p.pos.x += (t * 2.0 + p.phase).sin() * cfg.wobble * dt;
            let popped = p.pos.y < pop_y && ctx.rng.gen_bool(0.15);
            if popped || p.pos.y < -1.0 {
                Self::respawn(p, size, cfg.rise_speed, ctx.rng);
            }
        }
    }

    fn draw(&self, surface: &mut Surface) {
        surface.clear();
        let color = Rgb::from_hsl(self.config.hue, 0.6, 0.5);
        for p in self.pool.iter() {
            // Ring outline as discrete points around the circumference.
            let steps = (p.size * 6.0) as usize;
            for i in 0..steps.max(4) {
                let a = i as f32 / steps.max(4) as f32 * std::f32::consts::TAU;
                let x = p.pos.x + a.cos() * p.size;
                let y = p.pos.y + a.sin() * p.size * 0.5;
                surface.add(x, y, color, 0.5);
            }
        }
    }
}
