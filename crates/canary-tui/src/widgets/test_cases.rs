//! Test cases page: search box, case list, and the selected case's prompt

use canary_app::pages::PageLoad;
use canary_app::state::AppState;
use canary_app::UiMode;
use canary_core::TestCase;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget, Wrap};

use super::badges;
use super::empty_state::EmptyState;
use super::search_input::SearchInput;
use super::text::{scroll_offset, truncate};
use crate::theme::styles;

const NAME_WIDTH: usize = 30;
const CATEGORY_WIDTH: usize = 10;
const STATUS_WIDTH: usize = 10;

pub struct TestCasesPage<'a> {
    state: &'a AppState,
}

impl<'a> TestCasesPage<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn render_list(&self, cases: &[&TestCase], area: Rect, buf: &mut Buffer) {
        let title = format!(" Test Cases ({}) ", cases.len());
        let block = styles::glass_block(self.state.ui_mode == UiMode::Normal)
            .title(Span::styled(title, styles::text_bright_bold()));
        let inner = block.inner(area);
        block.render(area, buf);

        if cases.is_empty() {
            let hint = if self.state.test_cases_page.search.is_empty() {
                "Get started by creating your first test case (press n)"
            } else {
                "Try adjusting your search terms"
            };
            EmptyState::new("No test cases found")
                .hint(hint)
                .render(inner, buf);
            return;
        }

        let [header, rows] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);
        Paragraph::new(Line::styled(
            format!(
                "  {:<name$} {:<cat$} {:<status$} Description",
                "Name",
                "Category",
                "Status",
                name = NAME_WIDTH,
                cat = CATEGORY_WIDTH,
                status = STATUS_WIDTH
            ),
            styles::text_muted(),
        ))
        .render(header, buf);

        let height = rows.height as usize;
        let selected = self.state.test_cases_page.selected;
        let description_width =
            (rows.width as usize).saturating_sub(NAME_WIDTH + CATEGORY_WIDTH + STATUS_WIDTH + 5);
        let lines: Vec<Line> = cases
            .iter()
            .enumerate()
            .skip(scroll_offset(selected, height))
            .take(height)
            .map(|(i, case)| case_line(case, i == selected, description_width))
            .collect();
        Paragraph::new(lines).render(rows, buf);
    }
}

fn case_line(case: &TestCase, selected: bool, description_width: usize) -> Line<'static> {
    let name = format!("{:<width$}", truncate(&case.name, NAME_WIDTH), width = NAME_WIDTH);
    let category = badges::category(case.category);
    let category_pad = CATEGORY_WIDTH.saturating_sub(category.width()) + 1;
    let status = badges::active(case.is_active);
    let status_pad = STATUS_WIDTH.saturating_sub(status.width()) + 1;

    Line::from(vec![
        Span::styled(if selected { "▶ " } else { "  " }, styles::accent()),
        Span::styled(
            name,
            if selected {
                styles::accent_bold()
            } else {
                styles::text_primary()
            },
        ),
        Span::raw(" "),
        category,
        Span::raw(" ".repeat(category_pad)),
        status,
        Span::raw(" ".repeat(status_pad)),
        Span::styled(
            truncate(case.description_text(), description_width),
            styles::text_secondary(),
        ),
    ])
}

/// Prompt and expected behavior of the selected case
fn render_preview(case: Option<&TestCase>, area: Rect, buf: &mut Buffer) {
    let block = styles::glass_block(false).title(Span::styled(" Details ", styles::text_muted()));
    let inner = block.inner(area);
    block.render(area, buf);

    let Some(case) = case else {
        return;
    };
    Paragraph::new(vec![
        Line::styled("Input Prompt:", styles::text_secondary()),
        Line::styled(case.input_prompt.clone(), styles::text_primary()),
        Line::styled("Expected Behavior:", styles::text_secondary()),
        Line::styled(case.expected_behavior.clone(), styles::text_primary()),
    ])
    .wrap(Wrap { trim: false })
    .render(inner, buf);
}

impl Widget for TestCasesPage<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [search, list, preview] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(6),
        ])
        .areas(area);

        SearchInput::new(&self.state.test_cases_page.search, "Search test cases...")
            .active(self.state.ui_mode == UiMode::SearchInput)
            .render(search, buf);

        match self.state.visible_test_cases() {
            PageLoad::Loading => EmptyState::loading("Loading test cases...").render(list, buf),
            PageLoad::Failed(error) => {
                EmptyState::error("Failed to load test cases", &error).render(list, buf)
            }
            PageLoad::Ready(cases) => {
                self.render_list(&cases, list, buf);
                render_preview(self.state.selected_test_case(), preview, buf);
            }
        }
    }
}
