//! Wandering glows that breathe and drift toward the pointer.

use banjak_core::{
    pointer_force, reflect, Effect, Flicker, Particle, ParticlePool, Rgb, StepCtx, Surface,
};
use glam::Vec2;
use rand::prelude::*;
use rand::rngs::StdRng;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FirefliesConfig {
    pub count: usize,
    pub wander: f32,
    pub max_speed: f32,
    pub pointer_radius: f32,
    /// Attraction strength; applied with a negative sign so flies drift
    /// toward the pointer.
    pub pointer_strength: f32,
    pub glow_radius: f32,
    pub hue: f32,
}

impl Default for FirefliesConfig {
    fn default() -> Self {
        Self {
            count: 24,
            wander: 18.0,
            max_speed: 5.0,
            pointer_radius: 18.0,
            pointer_strength: 14.0,
            glow_radius: 3.5,
            hue: 55.0,
        }
    }
}

pub struct Fireflies {
    config: FirefliesConfig,
    pool: ParticlePool,
    flickers: Vec<Flicker>,
}

impl Fireflies {
    pub fn new(config: FirefliesConfig) -> Self {
        let pool = ParticlePool::new(config.count);
        Self {
            config,
            pool,
            flickers: Vec::new(),
        }
    }
}

impl Effect for Fireflies {
    fn init(&mut self, size: Vec2, rng: &mut StdRng) {
        self.pool.clear();
        self.flickers.clear();
        for _ in 0..self.config.count {
            let mut p = Particle::at(Vec2::new(
                rng.gen_range(0.0..size.x),
                rng.gen_range(0.0..size.y),
            ));
            p.hue = self.config.hue + rng.gen_range(-12.0..12.0);
            if self.pool.spawn(p).is_none() {
                break;
            }
            self.flickers.push(Flicker::new(rng, 0.15, 1.0, 2.5));
        }
    }

    fn step(&mut self, ctx: &mut StepCtx) {
        let dt = ctx.dt();
        let cfg = &self.config;
        for (p, flicker) in self.pool.iter_mut().zip(self.flickers.iter_mut()) {
            let jitter = Vec2::new(
                ctx.rng.gen_range(-1.0..1.0),
                ctx.rng.gen_range(-0.5..0.5),
            ) * cfg.wander;
            p.vel += jitter * dt;
            if let Some(ptr) = ctx.pointer {
                p.vel += pointer_force(p.pos, ptr, cfg.pointer_radius, -cfg.pointer_strength) * dt;
            }
            p.vel = p.vel.clamp_length_max(cfg.max_speed);
            p.pos += p.vel * dt;
            reflect(&mut p.pos, &mut p.vel, ctx.size);
            p.brightness = flicker.update(dt, ctx.rng);
        }
    }

    fn draw(&self, surface: &mut Surface) {
        surface.fade(0.85);
        for p in self.pool.iter() {
            let color = Rgb::from_hsl(p.hue, 0.85, 0.55);
            surface.fill_soft(p.pos, self.config.glow_radius, color, p.brightness * 0.7);
        }
    }
}
