//! Message log widget.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Widget};

use crate::theme::Theme;

/// Scrolling log of session messages, newest at the bottom.
pub struct MessagesWidget<'a> {
    history: &'a [String],
    theme: Theme,
}

impl<'a> MessagesWidget<'a> {
    pub fn new(history: &'a [String], theme: Theme) -> Self {
        Self { history, theme }
    }
}

impl Widget for MessagesWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Messages ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border));
        let inner = block.inner(area);

        let visible = inner.height as usize;
        let start = self.history.len().saturating_sub(visible);
        let last = self.history.len().saturating_sub(1);

        let items: Vec<ListItem> = self.history[start..]
            .iter()
            .enumerate()
            .map(|(i, line)| {
                // Only the newest line gets full brightness.
                let color = if start + i == last {
                    self.theme.text
                } else {
                    self.theme.text_dim
                };
                ListItem::new(line.as_str()).style(Style::default().fg(color))
            })
            .collect();

        Widget::render(List::new(items).block(block), area, buf);
    }
}
