//! Modal menu widget

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Widget};

use crate::theme::Theme;

/// Widget for rendering a modal menu with a cursor row.
pub struct MenuWidget<'a> {
    title: &'a str,
    items: &'a [String],
    cursor: usize,
    theme: &'a Theme,
}

impl<'a> MenuWidget<'a> {
    pub fn new(title: &'a str, items: &'a [String], cursor: usize, theme: &'a Theme) -> Self {
        Self {
            title,
            items,
            cursor,
            theme,
        }
    }
}

impl Widget for MenuWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_action));
        let inner = block.inner(area);
        block.render(area, buf);

        let rows: Vec<ListItem> = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let style = if i == self.cursor {
                    Style::default()
                        .fg(self.theme.cursor_fg)
                        .bg(self.theme.cursor_bg)
                        .bold()
                } else {
                    Style::default().fg(self.theme.text)
                };
                ListItem::new(Line::from(Span::styled(item.as_str(), style)))
            })
            .collect();

        Widget::render(List::new(rows), inner, buf);
    }
}
