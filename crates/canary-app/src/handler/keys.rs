//! Key event handlers for different UI modes

use crate::input_key::InputKey;
use crate::message::{Message, RunOrigin};
use crate::route::Route;
use crate::state::{AppState, UiMode};

/// Convert key events to messages based on current UI mode
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    match state.ui_mode {
        UiMode::Normal => handle_key_normal(state, key),
        UiMode::SearchInput => handle_key_search_input(state, key),
        UiMode::Form => handle_key_form(key),
        UiMode::ConfirmDialog => handle_key_confirm_dialog(key),
    }
}

/// Handle key events in confirmation dialog mode
fn handle_key_confirm_dialog(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('y' | 'Y') | InputKey::Enter => Some(Message::ConfirmDialogAccept),
        InputKey::Char('n' | 'N') | InputKey::Esc => Some(Message::ConfirmDialogCancel),
        // Force quit with Ctrl+C even in dialog
        InputKey::CharCtrl('c') => Some(Message::Quit),
        _ => None,
    }
}

/// Handle key events in search input mode
fn handle_key_search_input(state: &AppState, key: InputKey) -> Option<Message> {
    let current = state.search_text()?;
    match key {
        // Cancel search input and clear the term
        InputKey::Esc => Some(Message::ClearSearch),

        // Keep the term, exit input mode
        InputKey::Enter => Some(Message::EndSearch),

        InputKey::Backspace => {
            let mut text = current.to_string();
            text.pop();
            Some(Message::SearchInput { text })
        }

        // Clear all input
        InputKey::CharCtrl('u') => Some(Message::SearchInput {
            text: String::new(),
        }),

        InputKey::CharCtrl('c') => Some(Message::Quit),

        key => key.printable().map(|c| {
            let mut text = current.to_string();
            text.push(c);
            Message::SearchInput { text }
        }),
    }
}

/// Handle key events while the test case form is open
fn handle_key_form(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc => Some(Message::CancelForm),
        InputKey::CharCtrl('c') => Some(Message::Quit),
        InputKey::CharCtrl('s') => Some(Message::SubmitForm),
        InputKey::CharCtrl('u') => Some(Message::FormClearField),

        InputKey::Tab | InputKey::Down => Some(Message::FormNextField),
        InputKey::BackTab | InputKey::Up => Some(Message::FormPrevField),
        InputKey::Left => Some(Message::FormCycleOption { forward: false }),
        InputKey::Right => Some(Message::FormCycleOption { forward: true }),

        InputKey::Enter => Some(Message::FormEnter),
        InputKey::Backspace => Some(Message::FormBackspace),

        key => key.printable().map(Message::FormChar),
    }
}

/// Handle key events in normal mode
fn handle_key_normal(state: &AppState, key: InputKey) -> Option<Message> {
    // Global bindings first
    match key {
        InputKey::CharCtrl('c') => return Some(Message::Quit),
        InputKey::Char('q') => return Some(Message::RequestQuit),
        InputKey::Char(c @ '1'..='3') => {
            let idx = (c as usize) - ('1' as usize);
            return Some(Message::NavigateTo(Route::NAV[idx]));
        }
        InputKey::Tab => return Some(Message::NextPage),
        InputKey::BackTab => return Some(Message::PrevPage),
        InputKey::Char('r') => return Some(Message::LoadPage { force: true }),
        InputKey::Up | InputKey::Char('k') => return Some(Message::SelectPrevious),
        InputKey::Down | InputKey::Char('j') => return Some(Message::SelectNext),
        _ => {}
    }

    match state.route {
        Route::Dashboard => match key {
            InputKey::Char('x') => Some(Message::ExecuteRun(RunOrigin::Dashboard)),
            InputKey::Enter => Some(Message::OpenSelected),
            InputKey::Char('c') => Some(Message::NavigateTo(Route::TestCases)),
            InputKey::Char('t') => Some(Message::NavigateTo(Route::TestRuns)),
            _ => None,
        },

        Route::TestCases => match key {
            InputKey::Char('/') => Some(Message::StartSearch),
            InputKey::Char('n') => Some(Message::OpenCreateForm),
            InputKey::Char('e') | InputKey::Enter => Some(Message::OpenEditForm),
            InputKey::Char('d') => Some(Message::RequestDelete),
            InputKey::Esc => Some(Message::ClearSearch),
            _ => None,
        },

        Route::TestRuns => match key {
            InputKey::Char('/') => Some(Message::StartSearch),
            InputKey::Char('s') => Some(Message::CycleStatusFilter),
            InputKey::Char('x') => Some(Message::ExecuteRun(RunOrigin::RunList)),
            InputKey::Enter => Some(Message::OpenSelected),
            InputKey::Esc => Some(Message::ClearSearch),
            _ => None,
        },

        Route::TestRunDetail(_) => match key {
            InputKey::Char('f') | InputKey::Right => {
                Some(Message::CycleSeverityFilter { forward: true })
            }
            InputKey::Left => Some(Message::CycleSeverityFilter { forward: false }),
            InputKey::Esc | InputKey::Backspace => Some(Message::GoBack),
            _ => None,
        },
    }
}
