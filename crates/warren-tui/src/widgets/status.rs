//! Status line widget

use ratatui::prelude::*;
use ratatui::widgets::Widget;

use warren_core::GameSession;
use warren_core::entity::Facing;

use crate::theme::Theme;

/// Widget for rendering the status lines
pub struct StatusWidget<'a> {
    session: &'a GameSession,
    theme: &'a Theme,
}

impl<'a> StatusWidget<'a> {
    pub fn new(session: &'a GameSession, theme: &'a Theme) -> Self {
        Self { session, theme }
    }
}

impl Widget for StatusWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let s = self.session;

        // Line 1: vitals and progress
        let line1 = match s.registry.player() {
            Some(p) => format!(
                "HP:{}/{} $:{} Lvl:{} T:{}",
                p.hp, p.hp_max, p.gold, s.level, s.turn
            ),
            None => format!("HP:--/-- $:-- Lvl:{} T:{}", s.level, s.turn),
        };

        // Line 2: board situation
        let mut line2 = format!("foes:{} seed:{}", s.registry.hostile_count(), s.rng.seed());
        if let Some(p) = s.registry.player() {
            line2.push_str(match p.facing {
                Facing::Left => " facing:west",
                Facing::Right => " facing:east",
            });
        }

        let style = Style::default().fg(self.theme.text);
        buf.set_string(area.x, area.y, &line1, style);
        if area.height > 1 {
            buf.set_string(
                area.x,
                area.y + 1,
                &line2,
                Style::default().fg(self.theme.text_dim),
            );
        }
    }
}
