//! Centered placeholder for loading, empty, and error states

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Widget, Wrap};

use crate::theme::styles;

pub struct EmptyState<'a> {
    title: &'a str,
    hint: Option<&'a str>,
    detail: Option<&'a str>,
    title_style: Style,
}

impl<'a> EmptyState<'a> {
    pub fn new(title: &'a str) -> Self {
        Self {
            title,
            hint: None,
            detail: None,
            title_style: styles::text_bright_bold(),
        }
    }

    pub fn loading(title: &'a str) -> Self {
        Self::new(title).title_style(styles::text_muted())
    }

    /// Error placeholder with the failure text underneath
    pub fn error(title: &'a str, detail: &'a str) -> Self {
        Self::new(title)
            .title_style(styles::status_red())
            .detail(detail)
            .hint("Press r to retry")
    }

    pub fn hint(mut self, hint: &'a str) -> Self {
        self.hint = Some(hint);
        self
    }

    pub fn detail(mut self, detail: &'a str) -> Self {
        self.detail = Some(detail);
        self
    }

    pub fn title_style(mut self, style: Style) -> Self {
        self.title_style = style;
        self
    }
}

impl Widget for EmptyState<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = vec![Line::styled(self.title, self.title_style)];
        if let Some(detail) = self.detail {
            lines.push(Line::styled(detail, styles::text_secondary()));
        }
        if let Some(hint) = self.hint {
            lines.push(Line::default());
            lines.push(Line::styled(hint, styles::text_muted()));
        }

        let height = lines.len() as u16;
        let top = area.y + area.height.saturating_sub(height) / 2;
        let inner = Rect::new(area.x, top, area.width, area.height.min(height + 2));
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}
