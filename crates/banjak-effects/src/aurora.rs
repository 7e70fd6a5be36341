//! Layered sine curtains drifting across the sky.
//!
//! The per-frame blur after every draw is kept even though the filter never
//! changes; it is part of the look.

use banjak_core::{Effect, Rgb, StepCtx, Surface};
use glam::Vec2;
use rand::prelude::*;
use rand::rngs::StdRng;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuroraConfig {
    pub bands: usize,
    pub drift_speed: f32,
    /// Curtain half-height in cells.
    pub thickness: f32,
}

impl Default for AuroraConfig {
    fn default() -> Self {
        Self {
            bands: 4,
            drift_speed: 0.35,
            thickness: 4.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Band {
    /// Vertical anchor as a fraction of the surface height.
    base: f32,
    amp: f32,
    wavelength: f32,
    phase: f32,
    speed: f32,
    hue: f32,
}

pub struct Aurora {
    config: AuroraConfig,
    bands: Vec<Band>,
}

impl Aurora {
    pub fn new(config: AuroraConfig) -> Self {
        Self {
            config,
            bands: Vec::new(),
        }
    }
}

impl Effect for Aurora {
    fn init(&mut self, _size: Vec2, rng: &mut StdRng) {
        self.bands = (0..self.config.bands)
            .map(|i| Band {
                base: 0.2 + 0.5 * i as f32 / self.config.bands.max(1) as f32,
                amp: rng.gen_range(0.08..0.2),
                wavelength: rng.gen_range(12.0..28.0),
                phase: rng.gen_range(0.0..std::f32::consts::TAU),
                speed: self.config.drift_speed * rng.gen_range(0.6..1.4),
                hue: rng.gen_range(100.0..200.0),
            })
            .collect();
    }

    fn step(&mut self, ctx: &mut StepCtx) {
        let dt = ctx.dt();
        for band in &mut self.bands {
            band.phase += band.speed * dt;
        }
    }

    fn draw(&self, surface: &mut Surface) {
        surface.clear();
        let h = surface.height() as f32;
        let thickness = self.config.thickness;

        for band in &self.bands {
            let color = Rgb::from_hsl(band.hue, 0.8, 0.4);
            for x in 0..surface.width() {
                let xf = x as f32;
                let center = band.base * h + (xf / band.wavelength + band.phase).sin() * band.amp * h;
                let reach = thickness.ceil() as i32;
                for dy in -reach..=reach {
                    let y = center + dy as f32;
                    let falloff = 1.0 - (dy as f32).abs() / (thickness + 1.0);
                    surface.add(xf, y, color, falloff * 0.35);
                }
            }
        }

        // Filter state never changes frame to frame, but the pass runs every
        // frame anyway.
        surface.blur();
    }
}
