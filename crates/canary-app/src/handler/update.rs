//! Main update function - handles state transitions (TEA pattern)

use std::time::Instant;

use crate::message::Message;
use crate::pages::step_selection;
use crate::route::Route;
use crate::state::{AppState, UiMode};

use super::{fetch, keys::handle_key, mutations, navigation, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::RequestQuit | Message::Quit => {
            state.request_quit();
            UpdateResult::none()
        }

        Message::Key(key) => {
            if let Some(msg) = handle_key(state, key) {
                UpdateResult::message(msg)
            } else {
                UpdateResult::none()
            }
        }

        Message::Tick => {
            state.clear_expired_status(Instant::now());
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Navigation
        // ─────────────────────────────────────────────────────────
        Message::NavigateTo(route) => navigation::handle_navigate(state, route),
        Message::NextPage => navigation::handle_next_page(state),
        Message::PrevPage => navigation::handle_prev_page(state),
        Message::GoBack => navigation::handle_go_back(state),
        Message::LoadPage { force } => navigation::handle_load_page(state, force),
        Message::OpenSelected => navigation::handle_open_selected(state),

        // ─────────────────────────────────────────────────────────
        // Fetch Completions
        // ─────────────────────────────────────────────────────────
        Message::TestCasesFetched { generation, result } => {
            fetch::handle_test_cases_fetched(state, generation, result)
        }
        Message::TestRunsFetched { generation, result } => {
            fetch::handle_test_runs_fetched(state, generation, result)
        }
        Message::RunDetailFetched {
            id,
            generation,
            result,
        } => fetch::handle_run_detail_fetched(state, id, generation, result),

        // ─────────────────────────────────────────────────────────
        // List Selection & Filters
        // ─────────────────────────────────────────────────────────
        Message::SelectNext | Message::SelectPrevious => {
            let forward = matches!(message, Message::SelectNext);
            let len = state.list_len();
            let selected = state.selection_mut();
            *selected = step_selection(*selected, len, forward);
            UpdateResult::none()
        }

        Message::StartSearch => {
            if state.search_text().is_some() {
                state.ui_mode = UiMode::SearchInput;
            }
            UpdateResult::none()
        }

        Message::SearchInput { text } => {
            if let Some(search) = state.search_text_mut() {
                *search = text;
                *state.selection_mut() = 0;
            }
            UpdateResult::none()
        }

        Message::EndSearch => {
            if state.ui_mode == UiMode::SearchInput {
                state.ui_mode = UiMode::Normal;
            }
            UpdateResult::none()
        }

        Message::ClearSearch => {
            if let Some(search) = state.search_text_mut() {
                search.clear();
                *state.selection_mut() = 0;
            }
            if state.ui_mode == UiMode::SearchInput {
                state.ui_mode = UiMode::Normal;
            }
            UpdateResult::none()
        }

        Message::CycleStatusFilter => {
            if state.route == Route::TestRuns {
                let page = &mut state.test_runs_page;
                page.status_filter = page.status_filter.next();
                page.selected = 0;
            }
            UpdateResult::none()
        }

        Message::CycleSeverityFilter { forward } => {
            if let Route::TestRunDetail(_) = state.route {
                let page = &mut state.run_detail_page;
                page.severity_filter = if forward {
                    page.severity_filter.next()
                } else {
                    page.severity_filter.prev()
                };
                page.selected = 0;
            }
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Test Case Form
        // ─────────────────────────────────────────────────────────
        Message::OpenCreateForm => mutations::handle_open_create_form(state),
        Message::OpenEditForm => mutations::handle_open_edit_form(state),
        Message::FormChar(c) => mutations::with_form(state, |f| f.insert_char(c)),
        Message::FormBackspace => mutations::with_form(state, |f| f.backspace()),
        Message::FormClearField => mutations::with_form(state, |f| f.clear_field()),
        Message::FormNextField => mutations::with_form(state, |f| f.focus_next()),
        Message::FormPrevField => mutations::with_form(state, |f| f.focus_prev()),
        Message::FormCycleOption { forward } => {
            mutations::with_form(state, |f| f.cycle_option(forward))
        }
        Message::FormEnter => mutations::handle_form_enter(state),
        Message::SubmitForm => mutations::handle_submit_form(state),
        Message::CancelForm => mutations::handle_cancel_form(state),
        Message::TestCaseSaved { created, result } => {
            mutations::handle_test_case_saved(state, created, result)
        }

        // ─────────────────────────────────────────────────────────
        // Delete Confirmation
        // ─────────────────────────────────────────────────────────
        Message::RequestDelete => mutations::handle_request_delete(state),
        Message::ConfirmDialogAccept => mutations::handle_confirm_accept(state),
        Message::ConfirmDialogCancel => {
            state.cancel_dialog();
            UpdateResult::none()
        }
        Message::DeleteTestCase(id) => mutations::handle_delete_test_case(state, id),
        Message::TestCaseDeleted { id, result } => {
            mutations::handle_test_case_deleted(state, id, result)
        }

        // ─────────────────────────────────────────────────────────
        // Test Run Execution
        // ─────────────────────────────────────────────────────────
        Message::ExecuteRun(origin) => mutations::handle_execute_run(state, origin),
        Message::RunExecuted { result } => mutations::handle_run_executed(state, result),
    }
}
