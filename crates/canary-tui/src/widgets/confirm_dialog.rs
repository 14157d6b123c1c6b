//! Confirmation dialog widget (delete test case)

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use canary_app::confirm_dialog::ConfirmDialogState;

use super::modal_overlay;
use crate::theme::styles;

const MODAL_WIDTH: u16 = 56;
const MODAL_HEIGHT: u16 = 9;

pub struct ConfirmDialog<'a> {
    state: &'a ConfirmDialogState,
}

impl<'a> ConfirmDialog<'a> {
    pub fn new(state: &'a ConfirmDialogState) -> Self {
        Self { state }
    }
}

impl Widget for ConfirmDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal_area = modal_overlay::open_modal(MODAL_WIDTH, MODAL_HEIGHT, area, buf);

        let title = format!(" {} ", self.state.title);
        let block = styles::modal_block(&title).title_alignment(Alignment::Center);
        let inner = block.inner(modal_area);
        block.render(modal_area, buf);

        let [_, message, warning, _, buttons] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        Paragraph::new(self.state.message.as_str())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(styles::text_primary())
            .render(message, buf);

        Paragraph::new("This cannot be undone.")
            .alignment(Alignment::Center)
            .style(styles::text_muted())
            .render(warning, buf);

        let line = Line::from(vec![
            Span::styled("[", styles::text_muted()),
            Span::styled("y", styles::status_red().add_modifier(Modifier::BOLD)),
            Span::styled("] Delete  ", styles::text_muted()),
            Span::styled("[", styles::text_muted()),
            Span::styled("n", styles::status_green().add_modifier(Modifier::BOLD)),
            Span::styled("] Cancel", styles::text_muted()),
        ]);
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .render(buttons, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use canary_core::TestCaseId;

    #[test]
    fn test_delete_dialog_renders_name_and_buttons() {
        let state = ConfirmDialogState::delete_test_case(TestCaseId(3), "Capital of France");
        let mut term = TestTerminal::new();
        term.render_widget(ConfirmDialog::new(&state), term.area());

        assert!(term.buffer_contains("Delete Test Case?"));
        assert!(term.buffer_contains("\"Capital of France\""));
        assert!(term.buffer_contains("] Delete"));
        assert!(term.buffer_contains("] Cancel"));
    }

    #[test]
    fn test_dialog_fits_compact_terminal() {
        let state = ConfirmDialogState::delete_test_case(TestCaseId(3), "x");
        let mut term = TestTerminal::compact();
        term.render_widget(ConfirmDialog::new(&state), term.area());

        assert!(term.buffer_contains("Delete Test Case?"));
    }
}
