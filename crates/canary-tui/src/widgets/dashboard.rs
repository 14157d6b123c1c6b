//! Dashboard page: headline stats, recent runs, quick actions

use canary_app::pages::PageLoad;
use canary_app::state::{AppState, DashboardView};
use canary_core::{format_optional_timestamp, TestRun};
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use super::empty_state::EmptyState;
use super::stat_card::{self, StatCard};
use super::text::{scroll_offset, truncate};
use super::badges;
use crate::theme::styles;

pub struct Dashboard<'a> {
    state: &'a AppState,
}

impl<'a> Dashboard<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn render_ready(&self, view: &DashboardView<'_>, area: Rect, buf: &mut Buffer) {
        let [cards, recent, actions] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Min(4),
            Constraint::Length(3),
        ])
        .areas(area);

        let stats = view.stats;
        stat_card::render_row(
            vec![
                StatCard::new("Total Test Cases", stats.total_test_cases),
                StatCard::new("Test Runs", stats.total_test_runs),
                StatCard::new("Passed Tests", stats.passed_tests)
                    .value_style(styles::status_green()),
                StatCard::new("Failed Tests", stats.failed_tests).value_style(styles::status_red()),
            ],
            cards,
            buf,
        );

        self.render_recent(view.recent_runs, recent, buf);
        render_quick_actions(actions, buf);
    }

    fn render_recent(&self, runs: &[TestRun], area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(true).title(Span::styled(
            " Recent Test Runs ",
            styles::text_bright_bold(),
        ));
        let inner = block.inner(area);
        block.render(area, buf);

        if runs.is_empty() {
            EmptyState::new("No test runs yet")
                .title_style(styles::text_muted())
                .hint("Press x to execute a test run")
                .render(inner, buf);
            return;
        }

        let height = inner.height as usize;
        let selected = self.state.dashboard.selected;
        let offset = scroll_offset(selected, height);
        let width = inner.width as usize;
        let lines: Vec<Line> = runs
            .iter()
            .enumerate()
            .skip(offset)
            .take(height)
            .map(|(i, run)| recent_run_line(run, i == selected, width, self.state))
            .collect();
        Paragraph::new(lines).render(inner, buf);
    }
}

fn recent_run_line(run: &TestRun, selected: bool, width: usize, state: &AppState) -> Line<'static> {
    let marker = if selected { "▶ " } else { "  " };
    let mut spans = vec![
        Span::styled(marker, styles::accent()),
        Span::styled(
            format!("{:<28}", truncate(&run.name, 28)),
            if selected {
                styles::accent_bold()
            } else {
                styles::text_primary()
            },
        ),
        Span::styled(format!("{:>4} tests  ", run.total_tests), styles::text_secondary()),
        Span::styled(format!("{:>4} passed  ", run.passed_tests), styles::status_green()),
        Span::styled(format!("{:>4} failed  ", run.failed_tests), styles::status_red()),
        badges::run_status(run.status),
    ];
    if state.settings.ui.show_timestamps && width > 90 {
        spans.push(Span::styled(
            format!("  {}", format_optional_timestamp(run.created_at.as_deref())),
            styles::text_muted(),
        ));
    }
    Line::from(spans)
}

fn render_quick_actions(area: Rect, buf: &mut Buffer) {
    let block = styles::glass_block(false).title(Span::styled(
        " Quick Actions ",
        styles::text_bright_bold(),
    ));
    let inner = block.inner(area);
    block.render(area, buf);

    let action = |key: &'static str, label: &'static str| {
        [
            Span::styled(format!("[{}] ", key), styles::keybinding()),
            Span::styled(label, styles::text_primary()),
            Span::raw("    "),
        ]
    };
    let spans: Vec<Span> = [
        action("c", "Manage Test Cases"),
        action("t", "View All Test Runs"),
        action("x", "Run Tests"),
    ]
    .into_iter()
    .flatten()
    .collect();
    Paragraph::new(Line::from(spans)).render(inner, buf);
}

impl Widget for Dashboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.state.dashboard_view() {
            PageLoad::Loading => EmptyState::loading("Loading dashboard...").render(area, buf),
            PageLoad::Failed(error) => {
                EmptyState::error("Failed to load dashboard", &error).render(area, buf)
            }
            PageLoad::Ready(view) => self.render_ready(&view, area, buf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{loaded_state, TestTerminal};
    use canary_app::ResourceKey;
    use std::time::Instant;

    fn render(state: &AppState) -> TestTerminal {
        let mut term = TestTerminal::with_size(100, 20);
        term.render_widget(Dashboard::new(state), term.area());
        term
    }

    #[test]
    fn test_loading_until_both_collections_arrive() {
        let mut state = AppState::new();
        state.cache.begin(ResourceKey::TestCases);
        state.cache.begin(ResourceKey::TestRuns);
        let term = render(&state);
        assert!(term.buffer_contains("Loading dashboard..."));
        assert!(!term.buffer_contains("Total Test Cases"));
    }

    #[test]
    fn test_stats_and_recent_runs() {
        let state = loaded_state();
        let term = render(&state);

        assert!(term.buffer_contains("Total Test Cases"));
        assert!(term.buffer_contains("Passed Tests"));
        // 8 + 0 + 3 passed, 2 + 0 + 7 failed
        assert!(term.buffer_contains("11"));
        assert!(term.buffer_contains("9"));
        assert!(term.buffer_contains("Recent Test Runs"));
        assert!(term.buffer_contains("▶ Nightly"));
        assert!(term.buffer_contains("Release gate"));
        assert!(term.buffer_contains("Manage Test Cases"));
        assert!(term.buffer_contains("View All Test Runs"));
    }

    #[test]
    fn test_empty_runs_message() {
        let mut state = AppState::new();
        let now = Instant::now();
        let gen = state.cache.begin(ResourceKey::TestCases);
        state.cache.resolve_test_cases(gen, Ok(vec![]), now);
        let gen = state.cache.begin(ResourceKey::TestRuns);
        state.cache.resolve_test_runs(gen, Ok(vec![]), now);

        let term = render(&state);
        assert!(term.buffer_contains("No test runs yet"));
    }

    #[test]
    fn test_either_failure_fails_page() {
        let mut state = AppState::new();
        let now = Instant::now();
        let gen = state.cache.begin(ResourceKey::TestCases);
        state.cache.resolve_test_cases(gen, Ok(vec![]), now);
        let gen = state.cache.begin(ResourceKey::TestRuns);
        state
            .cache
            .resolve_test_runs(gen, Err("Backend returned 500: boom".into()), now);

        let term = render(&state);
        assert!(term.buffer_contains("Failed to load dashboard"));
        assert!(term.buffer_contains("Backend returned 500: boom"));
        assert!(!term.buffer_contains("Total Test Cases"));
    }
}
