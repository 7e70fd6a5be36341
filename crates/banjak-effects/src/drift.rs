//! Bouncing particle field with constellation links and pointer repulsion.

use banjak_core::{pointer_force, reflect, Effect, Particle, ParticlePool, Rgb, StepCtx, Surface};
use glam::Vec2;
use rand::prelude::*;
use rand::rngs::StdRng;
use serde::Deserialize;

use crate::glyphs::DOT_GLYPHS;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    /// Fixed pool size.
    pub count: usize,
    /// Base speed in cells per second.
    pub max_speed: f32,
    /// Particles closer than this get a link line.
    pub link_dist: f32,
    pub pointer_radius: f32,
    /// Repulsion applied to velocity, cells per second squared.
    pub pointer_strength: f32,
    pub hue: f32,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            count: 60,
            max_speed: 7.0,
            link_dist: 14.0,
            pointer_radius: 12.0,
            pointer_strength: 60.0,
            hue: 210.0,
        }
    }
}

pub struct Drift {
    config: DriftConfig,
    pool: ParticlePool,
}

impl Drift {
    pub fn new(mut config: DriftConfig) -> Self {
        // Spawn velocity range must stay non-empty for any user tuning.
        config.max_speed = config.max_speed.max(f32::EPSILON);
        let pool = ParticlePool::new(config.count);
        Self { config, pool }
    }

    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.pool.iter()
    }
}

impl Effect for Drift {
    fn init(&mut self, size: Vec2, rng: &mut StdRng) {
        self.pool.clear();
        for _ in 0..self.config.count {
            let mut p = Particle::at(Vec2::new(
                rng.gen_range(0.0..size.x),
                rng.gen_range(0.0..size.y),
            ));
            let speed = self.config.max_speed;
            p.vel = Vec2::new(rng.gen_range(-speed..speed), rng.gen_range(-speed..speed) * 0.5);
            p.hue = self.config.hue + rng.gen_range(-20.0..20.0);
            p.brightness = rng.gen_range(0.5..1.0);
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
            p.vel = p.vel.clamp_length_max(cfg.max_speed * 2.5);
            p.pos += p.vel * dt;
            reflect(&mut p.pos, &mut p.vel, ctx.size);
        }
    }

    fn draw(&self, surface: &mut Surface) {
        surface.clear();

        let link = self.config.link_dist;
        let points: Vec<Vec2> = self.pool.iter().map(|p| p.pos).collect();
        for (i, &a) in points.iter().enumerate() {
            for &b in &points[i + 1..] {
                let dist = a.distance(b);
                if dist < link {
                    let weight = (1.0 - dist / link) * 0.25;
                    let color = Rgb::from_hsl(self.config.hue, 0.5, 0.5);
                    surface.line(a, b, color, weight);
                }
            }
        }

        for p in self.pool.iter() {
            let color = Rgb::from_hsl(p.hue, 0.7, 0.3 + p.brightness * 0.4);
            let glyph = DOT_GLYPHS[((p.brightness * DOT_GLYPHS.len() as f32) as usize)
                .min(DOT_GLYPHS.len() - 1)];
            surface.stamp(p.pos.x, p.pos.y, glyph, color);
        }
    }
}
