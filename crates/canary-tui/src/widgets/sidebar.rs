//! Navigation sidebar

use canary_app::state::AppState;
use canary_app::Route;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use super::text::truncate;
use crate::theme::styles;

pub struct Sidebar<'a> {
    state: &'a AppState,
}

impl<'a> Sidebar<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn nav_lines(&self, width: usize) -> Vec<Line<'static>> {
        let active = self.state.route.nav_index();
        Route::NAV
            .iter()
            .enumerate()
            .map(|(i, route)| {
                let label = format!(" {} {}", i + 1, route.title());
                let padded = format!("{:<width$}", label, width = width);
                if i == active {
                    Line::styled(padded, styles::focused_selected())
                } else {
                    Line::styled(padded, styles::text_secondary())
                }
            })
            .collect()
    }
}

impl Widget for Sidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false);
        let inner = block.inner(area);
        block.render(area, buf);

        let [brand, nav, footer] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .areas(inner);

        Paragraph::new(vec![
            Line::from(vec![Span::styled(" Canary", styles::accent_bold())]),
            Line::styled(" LLM regression testing", styles::text_muted()),
        ])
        .render(brand, buf);

        Paragraph::new(self.nav_lines(nav.width as usize)).render(nav, buf);

        let width = footer.width.saturating_sub(1) as usize;
        Paragraph::new(vec![
            Line::styled(" Backend", styles::text_muted()),
            Line::styled(
                format!(" {}", truncate(&self.state.settings.api.base_url, width)),
                styles::text_secondary(),
            ),
        ])
        .render(footer, buf);
    }
}
