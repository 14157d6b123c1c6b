//! Headline number card used on the dashboard and run detail pages

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Widget};

use crate::theme::styles;

pub struct StatCard {
    title: &'static str,
    value: String,
    value_style: Style,
}

impl StatCard {
    pub fn new(title: &'static str, value: impl ToString) -> Self {
        Self {
            title,
            value: value.to_string(),
            value_style: styles::text_primary(),
        }
    }

    pub fn value_style(mut self, style: Style) -> Self {
        self.value_style = style;
        self
    }
}

impl Widget for StatCard {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false);
        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(vec![
            Line::styled(self.title, styles::text_secondary()),
            Line::styled(self.value, self.value_style.add_modifier(Modifier::BOLD)),
        ])
        .render(inner, buf);
    }
}

/// Render cards side by side with equal widths
pub fn render_row(cards: Vec<StatCard>, area: Rect, buf: &mut Buffer) {
    let count = cards.len().max(1) as u32;
    let columns = Layout::horizontal(vec![Constraint::Ratio(1, count); cards.len()]).split(area);
    for (card, column) in cards.into_iter().zip(columns.iter()) {
        card.render(*column, buf);
    }
}
