//! Main render/view function (View in TEA pattern)


use canary_app::state::AppState;
use canary_app::{Route, UiMode};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use super::{layout, widgets};
use crate::theme::palette;

/// Render the complete UI.
///
/// Pure with respect to `state`: everything shown is derived from the
/// cache and the page states.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    frame.render_widget(
        Block::default().style(Style::default().bg(palette::DEEPEST_BG)),
        area,
    );

    let areas = layout::create(area);
    if areas.has_sidebar() {
        frame.render_widget(widgets::Sidebar::new(state), areas.sidebar);
    }
    frame.render_widget(widgets::PageHeader::new(state), areas.header);

    match state.route {
        Route::Dashboard => frame.render_widget(widgets::Dashboard::new(state), areas.body),
        Route::TestCases => frame.render_widget(widgets::TestCasesPage::new(state), areas.body),
        Route::TestRuns => frame.render_widget(widgets::TestRunsPage::new(state), areas.body),
        Route::TestRunDetail(id) => {
            frame.render_widget(widgets::RunDetailPage::new(state, id), areas.body)
        }
    }

    frame.render_widget(widgets::StatusBar::new(state), areas.status);

    // Modal overlays
    match state.ui_mode {
        UiMode::Form => {
            if let Some(form) = &state.form {
                frame.render_widget(widgets::TestCaseFormModal::new(form), area);
            }
        }
        UiMode::ConfirmDialog => {
            if let Some(dialog_state) = &state.confirm_dialog_state {
                frame.render_widget(widgets::ConfirmDialog::new(dialog_state), area);
            }
        }
        // Search and normal mode render inline in the page
        UiMode::SearchInput | UiMode::Normal => {}
    }
}
