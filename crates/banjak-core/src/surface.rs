//! Full-viewport cell grid the effects paint into.
//!
//! Every cell carries a blendable color field and an optional glyph. Painting
//! primitives clip silently and tolerate non-finite input; a zero-area
//! surface turns every operation into a no-op, the terminal analog of a
//! missing drawing context.

use glam::Vec2;

use crate::color::Rgb;

/// Luminance below which a faded cell resets fully, so trails do not leave
/// ghost glyphs behind.
const FADE_FLOOR: f32 = 0.012;

/// One surface cell: accumulated light plus an optional discrete glyph.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cell {
    pub color: Rgb,
    pub glyph: Option<char>,
}

/// Row-major cell grid mirroring the viewport size.
#[derive(Debug, Clone)]
pub struct Surface {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
    /// Scratch buffer reused by [`Surface::blur`], never reallocated per
    /// frame once sized.
    scratch: Vec<Rgb>,
}

impl Surface {
    pub fn new(width: u16, height: u16) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
            scratch: vec![Rgb::BLACK; len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Surface extent as a float vector, the coordinate space particles live
    /// in.
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Resize to the new viewport dimensions, clearing content. Particle
    /// positions are the effect's business and are left untouched.
    pub fn resize(&mut self, width: u16, height: u16) {
        let len = width as usize * height as usize;
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells.resize(len, Cell::default());
        self.scratch.clear();
        self.scratch.resize(len, Rgb::BLACK);
    }

    /// Hard cut to black.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Low-opacity veil over the previous frame: every cell color is scaled
    /// by `keep`, producing exponential decay of old frames instead of a
    /// hard cut.
    pub fn fade(&mut self, keep: f32) {
        let keep = keep.clamp(0.0, 1.0);
        for cell in &mut self.cells {
            cell.color = cell.color.scale(keep);
            if cell.color.luminance() < FADE_FLOOR {
                *cell = Cell::default();
            }
        }
    }

    fn index(&self, x: f32, y: f32) -> Option<usize> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let (xi, yi) = (x.floor() as i64, y.floor() as i64);
        if xi < 0 || yi < 0 || xi >= self.width as i64 || yi >= self.height as i64 {
            return None;
        }
        Some(yi as usize * self.width as usize + xi as usize)
    }

    /// Additive splat at a single cell. Out-of-range or non-finite
    /// coordinates are silently clipped.
    pub fn add(&mut self, x: f32, y: f32, color: Rgb, weight: f32) {
        if let Some(i) = self.index(x, y) {
            self.cells[i].color = self.cells[i].color.add(color, weight);
        }
    }

    /// Place a discrete glyph cell.
    pub fn stamp(&mut self, x: f32, y: f32, glyph: char, color: Rgb) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = Cell {
                color,
                glyph: Some(glyph),
            };
        }
    }

    /// Radial falloff splat. Vertical distances count double because a
    /// terminal cell is roughly twice as tall as it is wide.
    pub fn fill_soft(&mut self, center: Vec2, radius: f32, color: Rgb, strength: f32) {
        if self.is_empty() || !center.is_finite() || radius <= 0.0 {
            return;
        }
        let x0 = (center.x - radius).floor().max(0.0) as u16;
        let x1 = ((center.x + radius).ceil() as i64).clamp(0, self.width as i64) as u16;
        let y0 = (center.y - radius * 0.5).floor().max(0.0) as u16;
        let y1 = ((center.y + radius * 0.5).ceil() as i64).clamp(0, self.height as i64) as u16;

        for y in y0..y1 {
            for x in x0..x1 {
                let dx = x as f32 + 0.5 - center.x;
                let dy = (y as f32 + 0.5 - center.y) * 2.0;
                let dist = (dx * dx + dy * dy).sqrt();
                if dist < radius {
                    let w = (1.0 - dist / radius) * strength;
                    self.add(x as f32, y as f32, color, w);
                }
            }
        }
    }

    /// Additive Bresenham segment between two points.
    pub fn line(&mut self, a: Vec2, b: Vec2, color: Rgb, weight: f32) {
        if !a.is_finite() || !b.is_finite() {
            return;
        }
        let (mut x0, mut y0) = (a.x.floor() as i64, a.y.floor() as i64);
        let (x1, y1) = (b.x.floor() as i64, b.y.floor() as i64);

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.add(x0 as f32, y0 as f32, color, weight);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// One 3x3 box blur pass over the color field, separable, scratch buffer
    /// reused. Glyphs are untouched.
    pub fn blur(&mut self) {
        let (w, h) = (self.width as usize, self.height as usize);
        if w == 0 || h == 0 {
            return;
        }

        // Horizontal pass into scratch.
        for y in 0..h {
            let row = y * w;
            for x in 0..w {
                let mut sum = Rgb::BLACK;
                let mut n = 0.0;
                for xn in x.saturating_sub(1)..(x + 2).min(w) {
                    let c = self.cells[row + xn].color;
                    sum = Rgb::new(sum.r + c.r, sum.g + c.g, sum.b + c.b);
                    n += 1.0;
                }
                self.scratch[row + x] = sum.scale(1.0 / n);
            }
        }

        // Vertical pass back into the cells.
        for y in 0..h {
            for x in 0..w {
                let mut sum = Rgb::BLACK;
                let mut n = 0.0;
                for yn in y.saturating_sub(1)..(y + 2).min(h) {
                    let c = self.scratch[yn * w + x];
                    sum = Rgb::new(sum.r + c.r, sum.g + c.g, sum.b + c.b);
                    n += 1.0;
                }
                self.cells[y * w + x].color = sum.scale(1.0 / n);
            }
        }
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<&Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(&self.cells[y as usize * self.width as usize + x as usize])
    }

    /// Total accumulated luminance, handy for asserting "nothing was drawn".
    pub fn total_luminance(&self) -> f32 {
        self.cells.iter().map(|c| c.color.luminance()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_decays_exponentially() {
        let mut s = Surface::new(4, 4);
        s.add(1.0, 1.0, Rgb::WHITE, 1.0);
        let before = s.cell(1, 1).unwrap().color.luminance();
        s.fade(0.5);
        let after = s.cell(1, 1).unwrap().color.luminance();
        assert!((after - before * 0.5).abs() < 1e-5);
    }

    #[test]
    fn fade_floor_clears_ghost_glyphs() {
        let mut s = Surface::new(4, 4);
        s.stamp(2.0, 2.0, '*', Rgb::new(0.02, 0.02, 0.02));
        s.fade(0.1);
        assert!(s.cell(2, 2).unwrap().glyph.is_none());
        assert_eq!(s.cell(2, 2).unwrap().color, Rgb::BLACK);
    }

    #[test]
    fn add_clips_out_of_range_and_non_finite() {
        let mut s = Surface::new(4, 4);
        s.add(-1.0, 0.0, Rgb::WHITE, 1.0);
        s.add(4.0, 0.0, Rgb::WHITE, 1.0);
        s.add(f32::NAN, 0.0, Rgb::WHITE, 1.0);
        s.add(0.0, f32::INFINITY, Rgb::WHITE, 1.0);
        assert_eq!(s.total_luminance(), 0.0);
    }

    #[test]
    fn resize_reports_new_dimensions_and_clears() {
        let mut s = Surface::new(3, 3);
        s.add(1.0, 1.0, Rgb::WHITE, 1.0);
        s.resize(7, 11);
        assert_eq!((s.width(), s.height()), (7, 11));
        assert_eq!(s.total_luminance(), 0.0);
        s.resize(0, 5);
        assert_eq!((s.width(), s.height()), (0, 5));
    }

    #[test]
    fn zero_area_surface_is_a_silent_no_op() {
        let mut s = Surface::new(0, 0);
        s.clear();
        s.fade(0.5);
        s.add(0.0, 0.0, Rgb::WHITE, 1.0);
        s.stamp(0.0, 0.0, '*', Rgb::WHITE);
        s.fill_soft(Vec2::ZERO, 3.0, Rgb::WHITE, 1.0);
        s.line(Vec2::ZERO, Vec2::new(5.0, 5.0), Rgb::WHITE, 1.0);
        s.blur();
        assert!(s.is_empty());
    }

    #[test]
    fn blur_stays_in_bounds_and_spreads_light() {
        let mut s = Surface::new(5, 5);
        s.add(2.0, 2.0, Rgb::WHITE, 1.0);
        s.blur();
        assert!(s.cell(2, 2).unwrap().color.luminance() < 1.0);
        assert!(s.cell(1, 2).unwrap().color.luminance() > 0.0);
        for y in 0..5 {
            for x in 0..5 {
                let c = s.cell(x, y).unwrap().color;
                assert!(c.r.is_finite() && c.r >= 0.0 && c.r <= 1.0);
            }
        }
    }

    #[test]
    fn line_touches_both_endpoints() {
        let mut s = Surface::new(8, 8);
        s.line(Vec2::new(1.0, 1.0), Vec2::new(6.0, 4.0), Rgb::WHITE, 0.5);
        assert!(s.cell(1, 1).unwrap().color.luminance() > 0.0);
        assert!(s.cell(6, 4).unwrap().color.luminance() > 0.0);
    }
}
