//! Status bar widget
//!
//! Shows the transient status message when there is one, otherwise the
//! keybindings for the current page and mode.

use canary_app::state::AppState;
use canary_app::{Route, UiMode};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use super::text::truncate;
use crate::theme::{palette, styles};

pub struct StatusBar<'a> {
    state: &'a AppState,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// `(key, action)` pairs for the current context
    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.state.ui_mode {
            UiMode::SearchInput => &[("type", "filter"), ("enter", "done"), ("esc", "clear")],
            UiMode::Form => &[
                ("tab", "next"),
                ("←/→", "change"),
                ("ctrl+s", "save"),
                ("esc", "cancel"),
            ],
            UiMode::ConfirmDialog => &[("y", "confirm"), ("n", "cancel")],
            UiMode::Normal => match self.state.route {
                Route::Dashboard => &[
                    ("x", "run tests"),
                    ("enter", "open"),
                    ("c", "cases"),
                    ("t", "runs"),
                    ("r", "refresh"),
                    ("q", "quit"),
                ],
                Route::TestCases => &[
                    ("/", "search"),
                    ("n", "new"),
                    ("e", "edit"),
                    ("d", "delete"),
                    ("r", "refresh"),
                    ("q", "quit"),
                ],
                Route::TestRuns => &[
                    ("/", "search"),
                    ("s", "status"),
                    ("x", "run tests"),
                    ("enter", "details"),
                    ("r", "refresh"),
                    ("q", "quit"),
                ],
                Route::TestRunDetail(_) => &[
                    ("f", "severity"),
                    ("esc", "back"),
                    ("r", "refresh"),
                    ("q", "quit"),
                ],
            },
        }
    }

    fn hint_line(&self) -> Line<'static> {
        let mut spans = Vec::new();
        for (i, (key, action)) in self.hints().iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(*key, styles::keybinding()));
            spans.push(Span::styled(format!(" {}", action), styles::text_muted()));
        }
        Line::from(spans)
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = match &self.state.status {
            Some(status) => Line::styled(
                format!(" {}", truncate(&status.text, area.width.saturating_sub(1) as usize)),
                styles::status_message(status.kind),
            ),
            None => {
                let mut line = self.hint_line();
                line.spans.insert(0, Span::raw(" "));
                line
            }
        };

        Paragraph::new(line)
            .style(Style::default().bg(palette::CARD_BG))
            .render(area, buf);
    }
}
