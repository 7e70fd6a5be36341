//! Breathing radial glow at the center of the surface.

use banjak_core::{Effect, Flicker, Rgb, StepCtx, Surface};
use glam::Vec2;
use rand::rngs::StdRng;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PulseConfig {
    /// Glow radius as a fraction of the smaller surface dimension.
    pub reach: f32,
    pub hue: f32,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            reach: 0.8,
            hue: 350.0,
        }
    }
}

pub struct Pulse {
    config: PulseConfig,
    breath: Option<Flicker>,
}

impl Pulse {
    pub fn new(config: PulseConfig) -> Self {
        Self {
            config,
            breath: None,
        }
    }
}

impl Effect for Pulse {
    fn init(&mut self, _size: Vec2, rng: &mut StdRng) {
        self.breath = Some(Flicker::new(rng, 0.3, 1.0, 1.6));
    }

    fn step(&mut self, ctx: &mut StepCtx) {
        if let Some(breath) = &mut self.breath {
            breath.update(ctx.dt(), ctx.rng);
        }
    }

    fn draw(&self, surface: &mut Surface) {
        surface.fade(0.6);
        let Some(breath) = &self.breath else {
            return;
        };
        let size = surface.size();
        let center = size / 2.0;
        let base = size.x.min(size.y * 2.0) * 0.5 * self.config.reach;
        let radius = base * (0.7 + 0.3 * breath.value());
        let color = Rgb::from_hsl(self.config.hue, 0.8, 0.45);
        surface.fill_soft(center, radius.max(1.0), color, breath.value() * 0.6);
    }
}
