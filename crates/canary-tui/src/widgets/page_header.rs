//! Page title bar with subtitle and activity indicator

use canary_app::pages::PageLoad;
use canary_app::state::AppState;
use canary_app::Route;
use canary_core::{format_optional_timestamp, short_commit, TestRun};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use super::badges;
use crate::theme::styles;

pub struct PageHeader<'a> {
    state: &'a AppState,
}

impl<'a> PageHeader<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn title_line(&self) -> Line<'a> {
        match self.state.route {
            Route::TestRunDetail(id) => match self.loaded_run(id) {
                Some(run) => Line::from(vec![
                    Span::styled(run.name.clone(), styles::text_bright_bold()),
                    Span::raw(" "),
                    badges::run_status(run.status),
                ]),
                None => Line::styled(format!("Test Run #{}", id), styles::text_bright_bold()),
            },
            route => Line::styled(route.title(), styles::text_bright_bold()),
        }
    }

    fn subtitle_line(&self) -> Line<'a> {
        let text = match self.state.route {
            Route::Dashboard => "Monitor your AI model performance and test results".to_string(),
            Route::TestCases => "Manage your golden dataset of test cases".to_string(),
            Route::TestRuns => "Monitor and execute test runs".to_string(),
            Route::TestRunDetail(id) => match self.loaded_run(id) {
                Some(run) => run_metadata(run),
                None => "Esc to go back".to_string(),
            },
        };
        Line::styled(text, styles::text_secondary())
    }

    fn loaded_run(&self, id: canary_core::RunId) -> Option<&'a TestRun> {
        match self.state.run_detail_view(id) {
            PageLoad::Ready(view) => Some(&view.detail.test_run),
            _ => None,
        }
    }

    fn activity(&self) -> Option<Span<'static>> {
        if self.state.executing {
            Some(Span::styled("Executing test run...", styles::accent_bold()))
        } else if self.state.is_page_loading() {
            Some(Span::styled("Loading...", styles::text_muted()))
        } else {
            None
        }
    }
}

/// `created · #commit · branch` line under a run title
fn run_metadata(run: &TestRun) -> String {
    let mut parts = vec![format_optional_timestamp(run.created_at.as_deref())];
    if let Some(commit) = run.git_commit.as_deref().filter(|c| !c.is_empty()) {
        parts.push(format!("#{}", short_commit(commit)));
    }
    if let Some(branch) = run.git_branch.as_deref().filter(|b| !b.is_empty()) {
        parts.push(branch.to_string());
    }
    parts.join(" · ")
}

impl Widget for PageHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false);
        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(vec![self.title_line(), self.subtitle_line()]).render(inner, buf);

        if let Some(activity) = self.activity() {
            let row = Rect::new(inner.x, inner.y, inner.width, inner.height.min(1));
            Paragraph::new(Line::from(activity))
                .alignment(Alignment::Right)
                .render(row, buf);
        }
    }
}
