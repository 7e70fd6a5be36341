//! Particles on slowly precessing ellipses around the surface center.

use banjak_core::{Effect, Rgb, StepCtx, Surface};
use glam::Vec2;
use rand::prelude::*;
use rand::rngs::StdRng;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OrbitsConfig {
    pub count: usize,
    /// Orbital angular speed range, radians per second.
    pub min_rate: f32,
    pub max_rate: f32,
    /// Ellipse precession, radians per second.
    pub precession: f32,
    pub keep: f32,
}

impl Default for OrbitsConfig {
    fn default() -> Self {
        Self {
            count: 18,
            min_rate: 0.3,
            max_rate: 1.2,
            precession: 0.08,
            keep: 0.7,
        }
    }
}

struct Orbiter {
    semi_major: f32,
    semi_minor: f32,
    angle: f32,
    rate: f32,
    tilt: f32,
    hue: f32,
}

pub struct Orbits {
    config: OrbitsConfig,
    orbiters: Vec<Orbiter>,
}

impl Orbits {
    pub fn new(mut config: OrbitsConfig) -> Self {
        // Rate range must stay non-empty for any user tuning.
        if config.max_rate <= config.min_rate {
            config.max_rate = config.min_rate + 0.01;
        }
        Self {
            config,
            orbiters: Vec::new(),
        }
    }

    fn position(orbiter: &Orbiter, center: Vec2) -> Vec2 {
        let local = Vec2::new(
            orbiter.angle.cos() * orbiter.semi_major,
            orbiter.angle.sin() * orbiter.semi_minor,
        );
        let (sin, cos) = orbiter.tilt.sin_cos();
        center
            + Vec2::new(
                local.x * cos - local.y * sin,
                (local.x * sin + local.y * cos) * 0.5,
            )
    }
}

impl Effect for Orbits {
    fn init(&mut self, size: Vec2, rng: &mut StdRng) {
        let reach = size.x.min(size.y * 2.0) * 0.45;
        self.orbiters = (0..self.config.count)
            .map(|_| {
                let semi_major = rng.gen_range(reach * 0.3..reach.max(1.0));
                Orbiter {
                    semi_major,
                    semi_minor: semi_major * rng.gen_range(0.4..0.9),
                    angle: rng.gen_range(0.0..std::f32::consts::TAU),
                    rate: rng.gen_range(self.config.min_rate..self.config.max_rate),
                    tilt: rng.gen_range(0.0..std::f32::consts::TAU),
                    hue: rng.gen_range(20.0..60.0),
                }
            })
            .collect();
    }

    fn step(&mut self, ctx: &mut StepCtx) {
        let dt = ctx.dt();
        for orbiter in &mut self.orbiters {
            orbiter.angle += orbiter.rate * dt;
            orbiter.tilt += self.config.precession * dt;
        }
    }

    fn draw(&self, surface: &mut Surface) {
        surface.fade(self.config.keep);
        let center = surface.size() / 2.0;
        for orbiter in &self.orbiters {
            let pos = Self::position(orbiter, center);
            let color = Rgb::from_hsl(orbiter.hue, 0.8, 0.55);
            surface.add(pos.x, pos.y, color, 0.9);
        }
    }
}
