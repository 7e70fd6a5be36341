//! Grid-light: a node lattice that brightens near the pointer, with pulses
//! traveling along grid lines.
//!
//! The grid is built once at mount. After a resize it keeps its mount-time
//! geometry and simply clips, matching the accepted post-resize drift of the
//! other effects.

use banjak_core::{Effect, Particle, ParticlePool, Rgb, StepCtx, Surface};
use glam::Vec2;
use rand::prelude::*;
use rand::rngs::StdRng;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LatticeConfig {
    /// Horizontal node spacing in cells; vertical spacing is half of it to
    /// compensate for the cell aspect.
    pub spacing: f32,
    pub pointer_radius: f32,
    /// Expected pulses spawned per second.
    pub pulse_rate: f32,
    pub pulse_speed: f32,
    pub max_pulses: usize,
    pub hue: f32,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            spacing: 8.0,
            pointer_radius: 14.0,
            pulse_rate: 1.5,
            pulse_speed: 22.0,
            max_pulses: 16,
            hue: 160.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Node {
    pos: Vec2,
    glow: f32,
}

pub struct Lattice {
    config: LatticeConfig,
    nodes: Vec<Node>,
    cols: usize,
    rows: usize,
    pulses: ParticlePool,
}

impl Lattice {
    pub fn new(config: LatticeConfig) -> Self {
        let pulses = ParticlePool::new(config.max_pulses);
        Self {
            config,
            nodes: Vec::new(),
            cols: 0,
            rows: 0,
            pulses,
        }
    }

    fn spawn_pulse(&mut self, size: Vec2, rng: &mut StdRng) {
        if self.cols == 0 || self.rows == 0 {
            return;
        }
        let horizontal = rng.gen_bool(0.5);
        let (pos, vel) = if horizontal {
            let row = rng.gen_range(0..self.rows);
            let y = row as f32 * self.config.spacing * 0.5;
            (Vec2::new(0.0, y), Vec2::new(self.config.pulse_speed, 0.0))
        } else {
            let col = rng.gen_range(0..self.cols);
            let x = col as f32 * self.config.spacing;
            (Vec2::new(x, 0.0), Vec2::new(0.0, self.config.pulse_speed * 0.5))
        };
        let mut p = Particle::at(pos);
        p.vel = vel;
        p.life = (size.x.max(size.y) / self.config.pulse_speed).max(0.5);
        self.pulses.spawn(p);
    }
}

impl Effect for Lattice {
    fn init(&mut self, size: Vec2, _rng: &mut StdRng) {
        let spacing = self.config.spacing.max(2.0);
        self.cols = (size.x / spacing).ceil() as usize + 1;
        self.rows = (size.y / (spacing * 0.5)).ceil() as usize + 1;
        self.nodes = (0..self.cols * self.rows)
            .map(|i| Node {
                pos: Vec2::new(
                    (i % self.cols) as f32 * spacing,
                    (i / self.cols) as f32 * spacing * 0.5,
                ),
                glow: 0.0,
            })
            .collect();
        self.pulses.clear();
    }

    fn step(&mut self, ctx: &mut StepCtx) {
        let dt = ctx.dt();
        let radius = self.config.pointer_radius;

        for node in &mut self.nodes {
            let target = match ctx.pointer {
                Some(ptr) => {
                    let dist = node.pos.distance(ptr);
                    if dist < radius { (radius - dist) / radius } else { 0.0 }
                }
                None => 0.0,
            };
            node.glow += (target - node.glow) * (6.0 * dt).min(1.0);
        }

        if ctx.rng.gen_bool((self.config.pulse_rate as f64 * dt as f64).clamp(0.0, 1.0)) {
            let size = ctx.size;
            self.spawn_pulse(size, ctx.rng);
        }

        for p in self.pulses.iter_mut() {
            p.pos += p.vel * dt;
            p.life -= dt;
        }
        let size = ctx.size;
        self.pulses
            .retire(|p| p.life <= 0.0 || p.pos.x > size.x + 1.0 || p.pos.y > size.y + 1.0);
    }

    fn draw(&self, surface: &mut Surface) {
        surface.clear();
        let base = Rgb::from_hsl(self.config.hue, 0.6, 0.35);

        // Grid lines, faint.
        if self.cols > 1 && self.rows > 1 {
            let spacing = self.config.spacing.max(2.0);
            let far_x = (self.cols - 1) as f32 * spacing;
            let far_y = (self.rows - 1) as f32 * spacing * 0.5;
            for c in 0..self.cols {
                let x = c as f32 * spacing;
                surface.line(Vec2::new(x, 0.0), Vec2::new(x, far_y), base, 0.05);
            }
            for r in 0..self.rows {
                let y = r as f32 * spacing * 0.5;
                surface.line(Vec2::new(0.0, y), Vec2::new(far_x, y), base, 0.05);
            }
        }

        for node in &self.nodes {
            surface.add(node.pos.x, node.pos.y, base, 0.25 + node.glow * 0.75);
        }

        let bright = Rgb::from_hsl(self.config.hue, 0.9, 0.65);
        for p in self.pulses.iter() {
            surface.fill_soft(p.pos, 2.5, bright, 0.8);
        }
    }
}
