//! Scrolling sine ribbons, phase-shifted per layer.

use banjak_core::{Effect, Rgb, StepCtx, Surface};
use glam::Vec2;
use rand::prelude::*;
use rand::rngs::StdRng;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RibbonsConfig {
    pub layers: usize,
    pub scroll_speed: f32,
    pub amp: f32,
    pub hue: f32,
}

impl Default for RibbonsConfig {
    fn default() -> Self {
        Self {
            layers: 5,
            scroll_speed: 1.4,
            amp: 0.18,
            hue: 290.0,
        }
    }
}

struct Ribbon {
    base: f32,
    wavelength: f32,
    phase: f32,
    speed: f32,
    hue: f32,
}

pub struct Ribbons {
    config: RibbonsConfig,
    ribbons: Vec<Ribbon>,
}

impl Ribbons {
    pub fn new(config: RibbonsConfig) -> Self {
        Self {
            config,
            ribbons: Vec::new(),
        }
    }
}

impl Effect for Ribbons {
    fn init(&mut self, _size: Vec2, rng: &mut StdRng) {
        let layers = self.config.layers.max(1);
        self.ribbons = (0..layers)
            .map(|i| Ribbon {
                base: (i as f32 + 0.5) / layers as f32,
                wavelength: rng.gen_range(10.0..24.0),
                phase: rng.gen_range(0.0..std::f32::consts::TAU),
                speed: self.config.scroll_speed * rng.gen_range(0.7..1.3),
                hue: self.config.hue + i as f32 * 14.0,
            })
            .collect();
    }

    fn step(&mut self, ctx: &mut StepCtx) {
        let dt = ctx.dt();
        for ribbon in &mut self.ribbons {
            ribbon.phase += ribbon.speed * dt;
        }
    }

    fn draw(&self, surface: &mut Surface) {
        surface.clear();
        let h = surface.height() as f32;
        for ribbon in &self.ribbons {
            let color = Rgb::from_hsl(ribbon.hue, 0.7, 0.45);
            for x in 0..surface.width() {
                let xf = x as f32;
                let y = ribbon.base * h
                    + (xf / ribbon.wavelength - ribbon.phase).sin() * self.config.amp * h;
                surface.add(xf, y, color, 0.8);
                surface.add(xf, y - 1.0, color, 0.25);
                surface.add(xf, y + 1.0, color, 0.25);
            }
        }
    }
}
