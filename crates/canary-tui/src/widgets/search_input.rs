//! Search box shown above the test case and test run lists

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::theme::styles;

pub struct SearchInput<'a> {
    query: &'a str,
    placeholder: &'a str,
    /// Capturing keystrokes
    active: bool,
}

impl<'a> SearchInput<'a> {
    pub fn new(query: &'a str, placeholder: &'a str) -> Self {
        Self {
            query,
            placeholder,
            active: false,
        }
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}

impl Widget for SearchInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(self.active);
        let inner = block.inner(area);
        block.render(area, buf);

        let mut spans = vec![Span::styled("/ ", styles::accent_bold())];
        if self.query.is_empty() && !self.active {
            spans.push(Span::styled(self.placeholder, styles::text_muted()));
        } else {
            spans.push(Span::styled(self.query, styles::text_primary()));
        }
        if self.active {
            spans.push(Span::styled("_", styles::accent()));
        }

        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}
