//! Test utilities for TUI rendering verification
//!
//! Wraps ratatui's TestBackend so widgets and full frames can be rendered
//! into an in-memory buffer and searched for text.
//!
//! ```ignore
//! let mut term = TestTerminal::new();
//! term.draw_with(|frame| view(frame, &state));
//! assert!(term.buffer_contains("Dashboard"));
//! ```

use std::time::Instant;

use canary_api::test_utils::{test_case, test_result, test_run};
use canary_app::state::AppState;
use canary_app::ResourceKey;
use canary_core::{RunDetail, RunId, RunStatus, SeverityLabel};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use ratatui::Frame;
use ratatui::Terminal;

/// Standard test terminal size
pub const TEST_WIDTH: u16 = 100;
pub const TEST_HEIGHT: u16 = 30;

/// Compact terminal for testing responsive layouts
pub const COMPACT_WIDTH: u16 = 40;
pub const COMPACT_HEIGHT: u16 = 12;

/// Test wrapper around a `Terminal<TestBackend>`
pub struct TestTerminal {
    pub terminal: Terminal<TestBackend>,
}

impl TestTerminal {
    pub fn new() -> Self {
        Self::with_size(TEST_WIDTH, TEST_HEIGHT)
    }

    pub fn compact() -> Self {
        Self::with_size(COMPACT_WIDTH, COMPACT_HEIGHT)
    }

    pub fn with_size(width: u16, height: u16) -> Self {
        let backend = TestBackend::new(width, height);
        let terminal = Terminal::new(backend).expect("Failed to create test terminal");
        Self { terminal }
    }

    pub fn area(&self) -> Rect {
        let size = self.terminal.size().expect("Failed to get terminal size");
        Rect::new(0, 0, size.width, size.height)
    }

    pub fn render_widget<W: Widget>(&mut self, widget: W, area: Rect) {
        self.terminal
            .draw(|frame| frame.render_widget(widget, area))
            .expect("Failed to render widget");
    }

    /// Draw a full frame, e.g. `render::view`
    pub fn draw_with<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(f).expect("Failed to draw frame");
    }

    pub fn buffer(&self) -> &Buffer {
        self.terminal.backend().buffer()
    }

    /// Check if the buffer contains a string anywhere
    pub fn buffer_contains(&self, text: &str) -> bool {
        buffer_to_string(self.buffer()).contains(text)
    }

    /// Check if a specific line contains text
    pub fn line_contains(&self, line: u16, text: &str) -> bool {
        get_line_content(self.buffer(), line).contains(text)
    }

    /// Index of the first line containing `text`
    pub fn find_line(&self, text: &str) -> Option<u16> {
        (0..self.buffer().area.height).find(|y| self.line_contains(*y, text))
    }

    /// All content as a string (for debugging failed assertions)
    pub fn content(&self) -> String {
        buffer_to_string(self.buffer())
    }
}

impl Default for TestTerminal {
    fn default() -> Self {
        Self::new()
    }
}

fn buffer_to_string(buffer: &Buffer) -> String {
    let mut result = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            result.push_str(buffer[(x, y)].symbol());
        }
        result.push('\n');
    }
    result
}

fn get_line_content(buffer: &Buffer, line: u16) -> String {
    let mut result = String::new();
    if line < buffer.area.height {
        for x in 0..buffer.area.width {
            result.push_str(buffer[(x, line)].symbol());
        }
    }
    result
}

// ─────────────────────────────────────────────────────────
// State fixtures
// ─────────────────────────────────────────────────────────

/// State with two test cases and three runs resolved in the cache
pub fn loaded_state() -> AppState {
    let mut state = AppState::new();
    let now = Instant::now();

    let gen = state.cache.begin(ResourceKey::TestCases);
    let mut inactive = test_case(2, "Haiku about autumn");
    inactive.is_active = false;
    state.cache.resolve_test_cases(
        gen,
        Ok(vec![test_case(1, "Capital of France"), inactive]),
        now,
    );

    let gen = state.cache.begin(ResourceKey::TestRuns);
    state.cache.resolve_test_runs(
        gen,
        Ok(vec![
            test_run(3, "Nightly", RunStatus::Completed, 8, 2),
            test_run(2, "Manual Test Run", RunStatus::Running, 0, 0),
            test_run(1, "Release gate", RunStatus::Failed, 3, 7),
        ]),
        now,
    );
    state
}

/// Run detail for run 3 with one critical regression and one clean result
pub fn sample_detail() -> RunDetail {
    let mut critical = test_result(1, SeverityLabel::Critical, true);
    critical.change_type = Some("refusal".to_string());
    critical.reasoning = Some("Model now refuses a benign request".to_string());
    critical.severity_score = Some(0.92);
    RunDetail {
        test_run: test_run(3, "Nightly", RunStatus::Completed, 8, 2),
        results: vec![critical, test_result(2, SeverityLabel::None, false)],
        summary: None,
    }
}

/// Resolve a run detail into the cache
pub fn with_detail(state: &mut AppState, detail: RunDetail) -> RunId {
    let id = detail.test_run.id;
    let gen = state.cache.begin(ResourceKey::RunDetail(id));
    state
        .cache
        .resolve_run_detail(id, gen, Ok(detail), Instant::now());
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_sizes() {
        let term = TestTerminal::new();
        assert_eq!(term.area().width, TEST_WIDTH);
        assert_eq!(term.area().height, TEST_HEIGHT);

        let term = TestTerminal::compact();
        assert_eq!(term.area().width, COMPACT_WIDTH);
        assert_eq!(term.area().height, COMPACT_HEIGHT);
    }

    #[test]
    fn test_buffer_contains() {
        use ratatui::widgets::Paragraph;

        let mut term = TestTerminal::with_size(20, 5);
        term.render_widget(Paragraph::new("Hello World"), term.area());

        assert!(term.buffer_contains("Hello World"));
        assert!(!term.buffer_contains("Goodbye"));
        assert_eq!(term.find_line("Hello"), Some(0));
    }

    #[test]
    fn test_loaded_state_fixture() {
        let state = loaded_state();
        assert_eq!(state.dashboard_stats().total_test_runs, 3);
        assert_eq!(state.dashboard_stats().total_test_cases, 2);
    }
}
