//! Depth layers of dots counter-shifting against pointer movement; deeper
//! layers move less.

use banjak_core::{Effect, Rgb, StepCtx, Surface};
use glam::Vec2;
use rand::prelude::*;
use rand::rngs::StdRng;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    pub layers: usize,
    pub dots_per_layer: usize,
    /// Shift of the nearest layer, in cells, when the pointer reaches an
    /// edge.
    pub reach: f32,
    pub hue: f32,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            layers: 3,
            dots_per_layer: 40,
            reach: 6.0,
            hue: 215.0,
        }
    }
}

struct Layer {
    /// 1.0 is the nearest layer; deeper layers approach 0.
    depth: f32,
    dots: Vec<Vec2>,
}

pub struct Parallax {
    config: ParallaxConfig,
    layers: Vec<Layer>,
    offset: Vec2,
}

impl Parallax {
    pub fn new(config: ParallaxConfig) -> Self {
        Self {
            config,
            layers: Vec::new(),
            offset: Vec2::ZERO,
        }
    }
}

impl Effect for Parallax {
    fn init(&mut self, size: Vec2, rng: &mut StdRng) {
        let layer_count = self.config.layers.max(1);
        self.layers = (0..layer_count)
            .map(|i| Layer {
                depth: (i + 1) as f32 / layer_count as f32,
                dots: (0..self.config.dots_per_layer)
                    .map(|_| Vec2::new(rng.gen_range(0.0..size.x), rng.gen_range(0.0..size.y)))
                    .collect(),
            })
            .collect();
        self.offset = Vec2::ZERO;
    }

    fn step(&mut self, ctx: &mut StepCtx) {
        let dt = ctx.dt();
        let target = match ctx.pointer {
            Some(ptr) => {
                let center = ctx.size / 2.0;
                let half = (ctx.size / 2.0).max(Vec2::ONE);
                // Normalized -1..1 pointer offset from center.
                ((ptr - center) / half).clamp(-Vec2::ONE, Vec2::ONE) * self.config.reach
            }
            None => Vec2::ZERO,
        };
        self.offset += (target - self.offset) * (4.0 * dt).min(1.0);
    }

    fn draw(&self, surface: &mut Surface) {
        surface.clear();
        for layer in &self.layers {
            let shift = -self.offset * layer.depth;
            let lightness = 0.2 + layer.depth * 0.35;
            let color = Rgb::from_hsl(self.config.hue, 0.4, lightness);
            for &dot in &layer.dots {
                let p = dot + shift;
                surface.add(p.x, p.y, color, 0.5 + layer.depth * 0.5);
            }
        }
    }
}
