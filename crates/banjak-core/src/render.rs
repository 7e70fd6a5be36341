//! ratatui widget that writes a [`Surface`] into the frame buffer.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;

use crate::surface::Surface;

/// Density ramp for pure color-field cells, dimmest to brightest.
const RAMP: &[char] = &['·', '░', '▒', '▓', '█'];

/// Cells dimmer than this are skipped entirely so stacked surfaces layer
/// without erasing whatever sits below them.
const VISIBILITY_FLOOR: f32 = 0.02;

/// Renders a surface into a frame area. Glyph cells print their glyph; field
/// cells map luminance through the density ramp.
pub struct SurfaceWidget<'a>(pub &'a Surface);

impl Widget for SurfaceWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let surface = self.0;
        let w = area.width.min(surface.width());
        let h = area.height.min(surface.height());

        for y in 0..h {
            for x in 0..w {
                let Some(cell) = surface.cell(x, y) else {
                    continue;
                };
                let luma = cell.color.luminance();
                if cell.glyph.is_none() && luma < VISIBILITY_FLOOR {
                    continue;
                }

                let ch = match cell.glyph {
                    Some(g) => g,
                    None => {
                        let idx = ((luma * RAMP.len() as f32) as usize).min(RAMP.len() - 1);
                        RAMP[idx]
                    }
                };

                if let Some(target) = buf.cell_mut((area.x + x, area.y + y)) {
                    target.set_char(ch);
                    target.set_fg(cell.color.to_terminal());
                }
            }
        }
    }
}
