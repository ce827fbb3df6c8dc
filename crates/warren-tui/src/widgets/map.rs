//! Board display widget

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Widget};

use warren_core::GameSession;
use warren_core::effects::Color as GameColor;
use warren_core::entity::{Entity, EntityKind};

use crate::theme::Theme;

/// Widget for rendering the board. One terminal cell per tile; the
/// grid's +y (north) points up the screen.
pub struct MapWidget<'a> {
    session: &'a GameSession,
    theme: &'a Theme,
}

impl<'a> MapWidget<'a> {
    pub fn new(session: &'a GameSession, theme: &'a Theme) -> Self {
        Self { session, theme }
    }

    fn entity_display(&self, entity: &Entity) -> (char, Style) {
        match entity.kind {
            EntityKind::Player => {
                let mut style = Style::default().fg(self.theme.map_player).bold();
                if entity.striking() {
                    style = style.reversed();
                }
                ('@', style)
            }
            EntityKind::Wall => (
                '#',
                Style::default().fg(wall_shade(GameColor::RUBBLE, entity.hp_fraction())),
            ),
            EntityKind::BorderWall => (
                '#',
                Style::default().fg(wall_shade(GameColor::BORDER, entity.hp_fraction())),
            ),
            EntityKind::Shop => ('$', Style::default().fg(self.theme.map_shop).bold()),
            EntityKind::Fireball => ('*', Style::default().fg(self.theme.map_fireball).bold()),
            EntityKind::HealthBar => (' ', Style::default()),
            kind => {
                let glyph = match kind {
                    EntityKind::Chest => 'c',
                    EntityKind::Rat => 'r',
                    EntityKind::Serpent => 's',
                    EntityKind::Warden => 'W',
                    _ => '?',
                };
                let mut style = Style::default().fg(self.hp_color(entity.hp_fraction()));
                if kind == EntityKind::Warden {
                    style = style.bold();
                }
                if entity.striking() {
                    style = style.reversed();
                }
                (glyph, style)
            }
        }
    }

    fn hp_color(&self, fraction: f32) -> Color {
        if fraction > 0.66 {
            self.theme.hp_high
        } else if fraction > 0.33 {
            self.theme.hp_mid
        } else {
            self.theme.hp_low
        }
    }

    fn draw_entity(&self, entity: &Entity, inner: Rect, buf: &mut Buffer) {
        let config = self.session.config;
        let tile = entity.tile();
        let row = config.height - 1 - tile.y;
        if tile.x < 0 || row < 0 || tile.x >= config.width || row >= config.height {
            return;
        }
        let (col, row) = (tile.x as u16, row as u16);
        if col >= inner.width || row >= inner.height {
            return;
        }
        let (ch, style) = self.entity_display(entity);
        if let Some(cell) = buf.cell_mut(Position::new(inner.x + col, inner.y + row)) {
            cell.set_char(ch);
            cell.set_style(style);
        }
    }
}

/// Walls darken as they are chipped away.
fn wall_shade(color: GameColor, fraction: f32) -> Color {
    let k = 0.35 + 0.65 * fraction.clamp(0.0, 1.0);
    Color::Rgb(
        (color.0 as f32 * k) as u8,
        (color.1 as f32 * k) as u8,
        (color.2 as f32 * k) as u8,
    )
}

impl Widget for MapWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default().borders(Borders::ALL).title("warren");
        let inner = block.inner(area);
        block.render(area, buf);

        let config = self.session.config;
        let cols = (config.width.max(0) as u16).min(inner.width);
        let rows = (config.height.max(0) as u16).min(inner.height);
        let floor = Style::default().fg(self.theme.map_floor);
        for row in 0..rows {
            for col in 0..cols {
                if let Some(cell) = buf.cell_mut(Position::new(inner.x + col, inner.y + row)) {
                    cell.set_char('.');
                    cell.set_style(floor);
                }
            }
        }

        // Architecture first, then whatever stands on it, the player on top.
        let registry = &self.session.registry;
        for entity in registry
            .iter()
            .filter(|e| e.kind.is_wall() || e.kind == EntityKind::Shop)
        {
            self.draw_entity(entity, inner, buf);
        }
        for entity in registry
            .iter()
            .filter(|e| e.kind.is_hostile() || e.kind == EntityKind::Fireball)
        {
            self.draw_entity(entity, inner, buf);
        }
        if let Some(player) = registry.player() {
            self.draw_entity(player, inner, buf);
        }
    }
}
