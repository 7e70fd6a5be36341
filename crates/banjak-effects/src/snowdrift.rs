//! Falling flakes with sinusoidal drift, respawning at the top.

use banjak_core::{Effect, Particle, ParticlePool, Rgb, StepCtx, Surface};
use glam::Vec2;
use rand::prelude::*;
use rand::rngs::StdRng;
use serde::Deserialize;

use crate::glyphs::SNOW_GLYPHS;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SnowdriftConfig {
    pub count: usize,
    /// Base fall speed in cells per second.
    pub fall_speed: f32,
    pub drift_amp: f32,
    pub drift_period_s: f32,
}

impl Default for SnowdriftConfig {
    fn default() -> Self {
        Self {
            count: 70,
            fall_speed: 3.5,
            drift_amp: 1.2,
            drift_period_s: 3.0,
        }
    }
}

pub struct Snowdrift {
    config: SnowdriftConfig,
    pool: ParticlePool,
}

impl Snowdrift {
    pub fn new(config: SnowdriftConfig) -> Self {
        let pool = ParticlePool::new(config.count);
        Self { config, pool }
    }
}

impl Effect for Snowdrift {
    fn init(&mut self, size: Vec2, rng: &mut StdRng) {
        self.pool.clear();
        for _ in 0..self.config.count {
            let mut p = Particle::at(Vec2::new(
                rng.gen_range(0.0..size.x),
                rng.gen_range(0.0..size.y),
            ));
            // vel.y carries this flake's personal fall factor; size picks
            // the glyph category.
            p.vel.y = self.config.fall_speed * rng.gen_range(0.4..1.2);
            p.size = rng.gen_range(0.0..3.0);
            p.phase = rng.gen_range(0.0..std::f32::consts::TAU);
            if self.pool.spawn(p).is_none() {
                break;
            }
        }
    }

    fn step(&mut self, ctx: &mut StepCtx) {
        let dt = ctx.dt();
        let t = ctx.elapsed_ms as f32 / 1000.0;
        let period = self.config.drift_period_s.max(0.1);
        let amp = self.config.drift_amp;
        let (w, h) = (ctx.size.x, ctx.size.y);

        for p in self.pool.iter_mut() {
            p.pos.y += p.vel.y * dt;
            p.pos.x += (t * std::f32::consts::TAU / period + p.phase).cos() * amp * dt;
            if p.pos.x < 0.0 {
                p.pos.x += w;
            } else if p.pos.x >= w {
                p.pos.x -= w;
            }
            if p.pos.y > h + 1.0 {
                p.pos.y = -1.0;
                p.pos.x = ctx.rng.gen_range(0.0..w);
            }
        }
    }

    fn draw(&self, surface: &mut Surface) {
        surface.clear();
        for p in self.pool.iter() {
            let category = (p.size as usize).min(2);
            let glyph = SNOW_GLYPHS[category * 2 + (p.phase as usize) % 2];
            let lightness = 0.45 + category as f32 * 0.15;
            let color = Rgb::from_hsl(215.0, 0.55, lightness);
            surface.stamp(p.pos.x, p.pos.y, glyph, color);
        }
    }
}
