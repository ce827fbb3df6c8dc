//! Combat log widget

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use warren_core::effects::CombatLog;

use crate::theme::Theme;

/// Widget for rendering the combat log tail. `scroll` is how many
/// lines of history to step back from the newest entry.
pub struct LogWidget<'a> {
    log: &'a CombatLog,
    scroll: usize,
    theme: &'a Theme,
}

impl<'a> LogWidget<'a> {
    pub fn new(log: &'a CombatLog, scroll: usize, theme: &'a Theme) -> Self {
        Self { log, scroll, theme }
    }
}

impl Widget for LogWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.scroll > 0 {
            format!("log (-{})", self.scroll)
        } else {
            "log".to_string()
        };
        let block = Block::default().borders(Borders::TOP).title(title);
        let inner = block.inner(area);
        block.render(area, buf);

        let visible = inner.height as usize;
        let end = self.log.len().saturating_sub(self.scroll);
        let start = end.saturating_sub(visible);
        let lines: Vec<Line> = self
            .log
            .lines()
            .skip(start)
            .take(end - start)
            .map(|line| {
                Line::from(Span::styled(
                    line.text.as_str(),
                    Style::default().fg(self.theme.game_rgb(line.color)),
                ))
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}
