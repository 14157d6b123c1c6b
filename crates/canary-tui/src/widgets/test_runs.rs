//! Test runs page: search, status filter, and the run list

use canary_app::pages::PageLoad;
use canary_app::state::AppState;
use canary_app::UiMode;
use canary_core::{format_cost, format_optional_timestamp, short_commit, StatusFilter, TestRun};
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use super::badges;
use super::empty_state::EmptyState;
use super::search_input::SearchInput;
use super::text::{scroll_offset, truncate};
use crate::theme::styles;

/// Each run takes a title row and a metadata row
const ROWS_PER_RUN: usize = 2;

pub struct TestRunsPage<'a> {
    state: &'a AppState,
}

impl<'a> TestRunsPage<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn render_filters(&self, area: Rect, buf: &mut Buffer) {
        let [search, status] =
            Layout::horizontal([Constraint::Min(10), Constraint::Length(22)]).areas(area);

        SearchInput::new(&self.state.test_runs_page.search, "Search test runs...")
            .active(self.state.ui_mode == UiMode::SearchInput)
            .render(search, buf);

        let filter = self.state.test_runs_page.status_filter;
        let block = styles::glass_block(false);
        let inner = block.inner(status);
        block.render(status, buf);
        let style = if filter == StatusFilter::All {
            styles::text_secondary()
        } else {
            styles::accent_bold()
        };
        Paragraph::new(Line::from(vec![
            Span::styled("s ", styles::keybinding()),
            Span::styled(filter.label(), style),
        ]))
        .render(inner, buf);
    }

    fn render_list(&self, runs: &[&TestRun], area: Rect, buf: &mut Buffer) {
        let title = format!(" Test Runs ({}) ", runs.len());
        let block = styles::glass_block(self.state.ui_mode == UiMode::Normal)
            .title(Span::styled(title, styles::text_bright_bold()));
        let inner = block.inner(area);
        block.render(area, buf);

        if runs.is_empty() {
            let page = &self.state.test_runs_page;
            let hint = if page.search.is_empty() && page.status_filter == StatusFilter::All {
                "Get started by executing your first test run (press x)"
            } else {
                "Try adjusting your filters"
            };
            EmptyState::new("No test runs found")
                .hint(hint)
                .render(inner, buf);
            return;
        }

        let visible = (inner.height as usize / ROWS_PER_RUN).max(1);
        let selected = self.state.test_runs_page.selected;
        let width = inner.width as usize;
        let show_timestamps = self.state.settings.ui.show_timestamps;
        let lines: Vec<Line> = runs
            .iter()
            .enumerate()
            .skip(scroll_offset(selected, visible))
            .take(visible)
            .flat_map(|(i, run)| run_lines(run, i == selected, width, show_timestamps))
            .collect();
        Paragraph::new(lines).render(inner, buf);
    }
}

fn run_lines(
    run: &TestRun,
    selected: bool,
    width: usize,
    show_timestamps: bool,
) -> [Line<'static>; 2] {
    let title = Line::from(vec![
        Span::styled(if selected { "▶ " } else { "  " }, styles::accent()),
        Span::styled(
            truncate(&run.name, width.saturating_sub(16)),
            if selected {
                styles::accent_bold()
            } else {
                styles::text_bright_bold()
            },
        ),
        Span::raw(" "),
        badges::run_status(run.status),
    ]);

    let mut meta = vec![Span::raw("    ")];
    if show_timestamps {
        meta.push(Span::styled(
            format!("{}  ", format_optional_timestamp(run.created_at.as_deref())),
            styles::text_muted(),
        ));
    }
    meta.extend([
        Span::styled(format!("{} tests  ", run.total_tests), styles::text_secondary()),
        Span::styled(format!("{} passed", run.passed_tests), styles::status_green()),
        Span::styled(" / ", styles::text_muted()),
        Span::styled(format!("{} failed", run.failed_tests), styles::status_red()),
        Span::styled(
            format!("  {} cost", format_cost(run.total_cost)),
            styles::text_secondary(),
        ),
    ]);
    if let Some(commit) = run.git_commit.as_deref().filter(|c| !c.is_empty()) {
        meta.push(Span::styled(
            format!("  #{}", short_commit(commit)),
            styles::text_muted(),
        ));
    }
    if let Some(branch) = run.git_branch.as_deref().filter(|b| !b.is_empty()) {
        meta.push(Span::styled(format!("  {}", branch), styles::text_muted()));
    }

    [title, Line::from(meta)]
}

impl Widget for TestRunsPage<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [filters, list] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(4)]).areas(area);

        self.render_filters(filters, buf);

        match self.state.visible_test_runs() {
            PageLoad::Loading => EmptyState::loading("Loading test runs...").render(list, buf),
            PageLoad::Failed(error) => {
                EmptyState::error("Failed to load test runs", &error).render(list, buf)
            }
            PageLoad::Ready(runs) => self.render_list(&runs, list, buf),
        }
    }
}
