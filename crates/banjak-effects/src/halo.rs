//! Cursor glow following the pointer with inertial lag.

use banjak_core::{Effect, Flicker, Rgb, StepCtx, Surface};
use glam::Vec2;
use rand::rngs::StdRng;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HaloConfig {
    pub radius: f32,
    /// How quickly the glow catches up to the pointer, per second.
    pub lag_rate: f32,
    pub keep: f32,
    pub hue: f32,
}

impl Default for HaloConfig {
    fn default() -> Self {
        Self {
            radius: 7.0,
            lag_rate: 5.0,
            keep: 0.78,
            hue: 42.0,
        }
    }
}

pub struct Halo {
    config: HaloConfig,
    pos: Option<Vec2>,
    breath: Option<Flicker>,
}

impl Halo {
    pub fn new(config: HaloConfig) -> Self {
        Self {
            config,
            pos: None,
            breath: None,
        }
    }
}

impl Effect for Halo {
    fn init(&mut self, _size: Vec2, rng: &mut StdRng) {
        self.pos = None;
        self.breath = Some(Flicker::new(rng, 0.5, 1.0, 3.0));
    }

    fn step(&mut self, ctx: &mut StepCtx) {
        let dt = ctx.dt();
        if let Some(ptr) = ctx.pointer {
            let pos = self.pos.get_or_insert(ptr);
            *pos += (ptr - *pos) * (self.config.lag_rate * dt).min(1.0);
        }
        if let Some(breath) = &mut self.breath {
            breath.update(dt, ctx.rng);
        }
    }

    fn draw(&self, surface: &mut Surface) {
        surface.fade(self.config.keep);
        let (Some(pos), Some(breath)) = (self.pos, &self.breath) else {
            return;
        };
        let color = Rgb::from_hsl(self.config.hue, 0.9, 0.55);
        surface.fill_soft(pos, self.config.radius, color, breath.value() * 0.8);
    }
}
