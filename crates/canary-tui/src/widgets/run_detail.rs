//! Run detail page: summary cards, severity distribution, judged results

use canary_app::pages::PageLoad;
use canary_app::state::{AppState, RunDetailView};
use canary_core::{format_cost, format_score, RunId, SeverityFilter, TestResult};
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget, Wrap};

use super::badges;
use super::empty_state::EmptyState;
use super::stat_card::{self, StatCard};
use super::text::{scroll_offset, truncate};
use crate::theme::styles;

pub struct RunDetailPage<'a> {
    state: &'a AppState,
    id: RunId,
}

impl<'a> RunDetailPage<'a> {
    pub fn new(state: &'a AppState, id: RunId) -> Self {
        Self { state, id }
    }

    fn render_ready(&self, view: &RunDetailView<'_>, area: Rect, buf: &mut Buffer) {
        let [cards, histogram, results, reasoning] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(5),
        ])
        .areas(area);

        let run = &view.detail.test_run;
        stat_card::render_row(
            vec![
                StatCard::new("Total Tests", run.total_tests),
                StatCard::new("Passed", run.passed_tests).value_style(styles::status_green()),
                StatCard::new("Failed", run.failed_tests).value_style(styles::status_red()),
                StatCard::new("Total Cost", format_cost(run.total_cost)),
            ],
            cards,
            buf,
        );

        render_histogram(view, histogram, buf);
        self.render_results(view, results, buf);
        render_reasoning(
            view.results.get(self.state.run_detail_page.selected).copied(),
            reasoning,
            buf,
        );
    }

    fn render_results(&self, view: &RunDetailView<'_>, area: Rect, buf: &mut Buffer) {
        let filter = self.state.run_detail_page.severity_filter;
        let filter_label = match filter {
            SeverityFilter::All => "All Severity".to_string(),
            SeverityFilter::Only(label) => label.as_str().to_string(),
        };
        let block = styles::glass_block(true).title(Line::from(vec![
            Span::styled(
                format!(" Test Results ({}) ", view.results.len()),
                styles::text_bright_bold(),
            ),
            Span::styled("f ", styles::keybinding()),
            Span::styled(format!("{} ", filter_label), styles::accent()),
        ]));
        let inner = block.inner(area);
        block.render(area, buf);

        if view.results.is_empty() {
            let hint = if filter == SeverityFilter::All {
                "No test results available"
            } else {
                "Try adjusting the severity filter"
            };
            EmptyState::new("No results found")
                .hint(hint)
                .render(inner, buf);
            return;
        }

        let height = inner.height as usize;
        let selected = self.state.run_detail_page.selected;
        let width = inner.width as usize;
        let lines: Vec<Line> = view
            .results
            .iter()
            .enumerate()
            .skip(scroll_offset(selected, height))
            .take(height)
            .map(|(i, result)| result_line(result, i == selected, width))
            .collect();
        Paragraph::new(lines).render(inner, buf);
    }
}

fn render_histogram(view: &RunDetailView<'_>, area: Rect, buf: &mut Buffer) {
    let mut spans = vec![Span::styled(
        format!("Regressions: {}", view.regressions),
        if view.regressions > 0 {
            styles::status_red()
        } else {
            styles::status_green()
        },
    )];
    for (label, count) in view.histogram.iter() {
        spans.push(Span::raw("   "));
        spans.push(badges::severity(label));
        spans.push(Span::styled(format!(" {} tests", count), styles::text_secondary()));
    }

    let block = styles::glass_block(false).title(Span::styled(
        " Severity Distribution ",
        styles::text_bright_bold(),
    ));
    let inner = block.inner(area);
    block.render(area, buf);
    Paragraph::new(Line::from(spans)).render(inner, buf);
}

fn result_line(result: &TestResult, selected: bool, width: usize) -> Line<'static> {
    let case = match result.test_case_id {
        Some(id) => format!("Test Case #{}", id),
        None => format!("Result #{}", result.id),
    };
    let mut spans = vec![
        Span::styled(if selected { "▶ " } else { "  " }, styles::accent()),
        Span::styled(
            format!("{:<16}", case),
            if selected {
                styles::accent_bold()
            } else {
                styles::text_primary()
            },
        ),
        badges::severity(result.severity_label),
        Span::raw("  "),
        badges::regression(result.is_regression),
        Span::styled(
            format!("  Score: {}", format_score(result.severity_score)),
            styles::text_secondary(),
        ),
    ];
    let used: usize = spans.iter().map(Span::width).sum();
    if let Some(change) = result.change_type.as_deref() {
        spans.push(Span::styled(
            format!("  {}", truncate(change, width.saturating_sub(used + 2))),
            styles::text_muted(),
        ));
    }
    Line::from(spans)
}

/// Change type and judge reasoning for the selected result
fn render_reasoning(result: Option<&TestResult>, area: Rect, buf: &mut Buffer) {
    let block = styles::glass_block(false).title(Span::styled(" Judge ", styles::text_muted()));
    let inner = block.inner(area);
    block.render(area, buf);

    let Some(result) = result else {
        return;
    };
    let mut lines = Vec::new();
    if let Some(change) = result.change_type.as_deref() {
        lines.push(Line::from(vec![
            Span::styled("Change Type: ", styles::text_secondary()),
            Span::styled(change.to_string(), styles::text_primary()),
        ]));
    }
    if let Some(reasoning) = result.reasoning.as_deref() {
        lines.push(Line::from(vec![
            Span::styled("Reasoning: ", styles::text_secondary()),
            Span::styled(reasoning.to_string(), styles::text_primary()),
        ]));
    }
    lines.push(Line::styled(
        format!("Judge cost: {}", format_cost(result.judge_cost)),
        styles::text_muted(),
    ));
    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .render(inner, buf);
}

impl Widget for RunDetailPage<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.state.run_detail_view(self.id) {
            PageLoad::Loading => EmptyState::loading("Loading test run...").render(area, buf),
            PageLoad::Failed(error) => EmptyState::new("Test run not found")
                .title_style(styles::status_red())
                .detail(&error)
                .hint("Press Esc to go back or r to retry")
                .render(area, buf),
            PageLoad::Ready(view) => self.render_ready(&view, area, buf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{sample_detail, with_detail, TestTerminal};
    use canary_app::{ResourceKey, Route};
    use canary_core::SeverityLabel;

    fn render(state: &AppState, id: RunId) -> TestTerminal {
        let mut term = TestTerminal::with_size(100, 22);
        term.render_widget(RunDetailPage::new(state, id), term.area());
        term
    }

    fn detail_state() -> (AppState, RunId) {
        let mut state = AppState::new();
        let id = with_detail(&mut state, sample_detail());
        state.route = Route::TestRunDetail(id);
        (state, id)
    }

    #[test]
    fn test_summary_cards_and_histogram() {
        let (state, id) = detail_state();
        let term = render(&state, id);

        assert!(term.buffer_contains("Total Tests"));
        assert!(term.buffer_contains("Total Cost"));
        assert!(term.buffer_contains("$0.0000"));
        assert!(term.buffer_contains("Severity Distribution"));
        assert!(term.buffer_contains("Regressions: 1"));
        assert!(term.buffer_contains("[critical] 1 tests"));
        assert!(term.buffer_contains("[none] 1 tests"));
    }

    #[test]
    fn test_results_and_reasoning() {
        let (state, id) = detail_state();
        let term = render(&state, id);

        assert!(term.buffer_contains("Test Results (2)"));
        assert!(term.buffer_contains("▶ Test Case #1"));
        assert!(term.buffer_contains("Score: 92.0%"));
        assert!(term.buffer_contains("No Regression"));
        assert!(term.buffer_contains("Reasoning: Model now refuses a benign request"));
    }

    #[test]
    fn test_judge_cost_shown_for_selected_result() {
        let (state, id) = detail_state();
        assert!(render(&state, id).buffer_contains("Judge cost: $0.0010"));
    }

    #[test]
    fn test_missing_judge_cost_renders_zero() {
        let mut detail = sample_detail();
        detail.results[0].judge_cost = None;
        let mut state = AppState::new();
        let id = with_detail(&mut state, detail);
        state.route = Route::TestRunDetail(id);

        assert!(render(&state, id).buffer_contains("Judge cost: $0.0000"));
    }

    #[test]
    fn test_filter_keeps_histogram_unfiltered() {
        let (mut state, id) = detail_state();
        state.run_detail_page.severity_filter = SeverityFilter::Only(SeverityLabel::Critical);
        let term = render(&state, id);

        assert!(term.buffer_contains("Test Results (1)"));
        assert!(term.buffer_contains("[none] 1 tests"));
        assert!(!term.buffer_contains("Test Case #2"));
    }

    #[test]
    fn test_filter_with_no_matches() {
        let (mut state, id) = detail_state();
        state.run_detail_page.severity_filter = SeverityFilter::Only(SeverityLabel::Low);
        let term = render(&state, id);

        assert!(term.buffer_contains("No results found"));
        assert!(term.buffer_contains("Try adjusting the severity filter"));
    }

    #[test]
    fn test_not_found() {
        let mut state = AppState::new();
        let id = RunId(99);
        let gen = state.cache.begin(ResourceKey::RunDetail(id));
        state.cache.resolve_run_detail(
            id,
            gen,
            Err("test run 99 not found".into()),
            std::time::Instant::now(),
        );
        let term = render(&state, id);

        assert!(term.buffer_contains("Test run not found"));
        assert!(term.buffer_contains("test run 99 not found"));
    }
}
