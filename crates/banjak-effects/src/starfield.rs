//! Twinkling stars; the breathing comes from exponential smoothing toward
//! re-chosen targets, never a fixed period.

use banjak_core::{Effect, Flicker, Rgb, StepCtx, Surface};
use glam::Vec2;
use rand::prelude::*;
use rand::rngs::StdRng;
use serde::Deserialize;

use crate::glyphs::STAR_GLYPHS;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    pub count: usize,
    pub hue: f32,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count: 90,
            hue: 230.0,
        }
    }
}

struct Star {
    pos: Vec2,
    glyph: char,
    flicker: Flicker,
}

pub struct Starfield {
    config: StarfieldConfig,
    stars: Vec<Star>,
}

impl Starfield {
    pub fn new(config: StarfieldConfig) -> Self {
        Self {
            config,
            stars: Vec::new(),
        }
    }
}

impl Effect for Starfield {
    fn init(&mut self, size: Vec2, rng: &mut StdRng) {
        self.stars = (0..self.config.count)
            .map(|_| {
                let rate = rng.gen_range(1.0..4.0);
                Star {
                    pos: Vec2::new(rng.gen_range(0.0..size.x), rng.gen_range(0.0..size.y)),
                    glyph: STAR_GLYPHS[rng.gen_range(0..STAR_GLYPHS.len())],
                    flicker: Flicker::new(rng, 0.1, 1.0, rate),
                }
            })
            .collect();
    }

    fn step(&mut self, ctx: &mut StepCtx) {
        let dt = ctx.dt();
        for star in &mut self.stars {
            star.flicker.update(dt, ctx.rng);
        }
    }

    fn draw(&self, surface: &mut Surface) {
        surface.clear();
        for star in &self.stars {
            let v = star.flicker.value();
            let color = Rgb::from_hsl(self.config.hue, 0.3, 0.2 + v * 0.6);
            surface.stamp(star.pos.x, star.pos.y, star.glyph, color);
        }
    }
}
