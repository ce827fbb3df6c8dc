//! Effects overlay widget
//!
//! Painted over the map after the board so sparks and floating text
//! sit on top of tiles. Uses the same world-to-cell mapping as the map
//! widget's inner area.

use glam::Vec2;
use ratatui::prelude::*;
use ratatui::widgets::Widget;

use warren_core::TILE_SIZE;
use warren_core::config::ArenaConfig;

use crate::fx::EffectsView;
use crate::theme::Theme;

/// Big floating text (bounty credits, level banners) renders bold.
const BOLD_TEXT_SIZE: u16 = 33;

pub struct FxOverlay<'a> {
    fx: &'a EffectsView,
    config: ArenaConfig,
    theme: &'a Theme,
}

impl<'a> FxOverlay<'a> {
    pub fn new(fx: &'a EffectsView, config: ArenaConfig, theme: &'a Theme) -> Self {
        Self { fx, config, theme }
    }

    fn cell_of(&self, pos: Vec2, inner: Rect) -> Option<(u16, u16)> {
        let col = (pos.x / TILE_SIZE).round() as i32;
        let row = self.config.height - 1 - (pos.y / TILE_SIZE).round() as i32;
        if col < 0 || row < 0 || col >= self.config.width || row >= self.config.height {
            return None;
        }
        let (col, row) = (col as u16, row as u16);
        if col >= inner.width || row >= inner.height {
            return None;
        }
        Some((col, row))
    }
}

impl Widget for FxOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = area.inner(Margin {
            horizontal: 1,
            vertical: 1,
        });

        for spark in self.fx.sparks() {
            let Some((col, row)) = self.cell_of(spark.pos, inner) else {
                continue;
            };
            if let Some(cell) = buf.cell_mut(Position::new(inner.x + col, inner.y + row)) {
                cell.set_char('*');
                cell.set_style(Style::default().fg(self.theme.game_rgb(spark.color)));
            }
        }

        // Text after sparks so it stays legible inside a burst.
        for floater in self.fx.floaters() {
            let Some((col, row)) = self.cell_of(floater.pos, inner) else {
                continue;
            };
            let mut style = Style::default().fg(self.theme.game_rgb(floater.color));
            if floater.size >= BOLD_TEXT_SIZE {
                style = style.bold();
            }
            buf.set_stringn(
                inner.x + col,
                inner.y + row,
                &floater.text,
                (inner.width - col) as usize,
                style,
            );
        }
    }
}
