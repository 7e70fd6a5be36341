//! Rotating double helix with rungs, deterministic by construction.

use banjak_core::{Effect, Rgb, StepCtx, Surface};
use glam::Vec2;
use rand::rngs::StdRng;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HelixConfig {
    /// Radians per second of rotation.
    pub spin: f32,
    /// Radians of twist per row.
    pub twist: f32,
    /// Draw a rung every this many rows.
    pub rung_every: u16,
    pub hue_a: f32,
    pub hue_b: f32,
}

impl Default for HelixConfig {
    fn default() -> Self {
        Self {
            spin: 1.1,
            twist: 0.35,
            rung_every: 4,
            hue_a: 190.0,
            hue_b: 330.0,
        }
    }
}

pub struct Helix {
    config: HelixConfig,
    phase: f32,
}

impl Helix {
    pub fn new(config: HelixConfig) -> Self {
        Self { config, phase: 0.0 }
    }

    fn strand_x(&self, width: f32, y: u16, offset: f32) -> (f32, f32) {
        let angle = self.phase + y as f32 * self.config.twist + offset;
        let radius = (width / 4.0).max(2.0);
        (width / 2.0 + angle.cos() * radius, angle.sin())
    }
}

impl Effect for Helix {
    fn init(&mut self, _size: Vec2, _rng: &mut StdRng) {
        self.phase = 0.0;
    }

    fn step(&mut self, ctx: &mut StepCtx) {
        self.phase += self.config.spin * ctx.dt();
    }

    fn draw(&self, surface: &mut Surface) {
        surface.clear();
        let width = surface.width() as f32;
        let color_a = Rgb::from_hsl(self.config.hue_a, 0.7, 0.5);
        let color_b = Rgb::from_hsl(self.config.hue_b, 0.7, 0.5);

        for y in 0..surface.height() {
            let (xa, depth_a) = self.strand_x(width, y, 0.0);
            let (xb, depth_b) = self.strand_x(width, y, std::f32::consts::PI);

            if self.config.rung_every > 0 && y % self.config.rung_every == 0 {
                let rung = color_a.lerp(color_b, 0.5);
                surface.line(
                    Vec2::new(xa, y as f32),
                    Vec2::new(xb, y as f32),
                    rung,
                    0.12,
                );
            }

            // Strand in front of the axis draws brighter.
            let glyph_a = if depth_a > 0.0 { '●' } else { '·' };
            let glyph_b = if depth_b > 0.0 { '●' } else { '·' };
            surface.stamp(xa, y as f32, glyph_a, color_a.scale(0.6 + 0.4 * depth_a.max(0.0)));
            surface.stamp(xb, y as f32, glyph_b, color_b.scale(0.6 + 0.4 * depth_b.max(0.0)));
        }
    }
}
