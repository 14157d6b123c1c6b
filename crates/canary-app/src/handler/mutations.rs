//! Test case form, delete confirmation and run execution handlers

use canary_api::{ExecuteRunRequest, ExecuteRunResponse};
use canary_core::{TestCase, TestCaseId};
use tracing::{error, info, warn};

use crate::cache::ResourceKey;
use crate::confirm_dialog::ConfirmDialogState;
use crate::form::{FormMode, TestCaseForm};
use crate::message::{Message, RunOrigin};
use crate::pages::StatusKind;
use crate::route::Route;
use crate::state::{AppState, UiMode};

use super::{FetchRequest, Task, UpdateAction, UpdateResult};

/// Mark `key` stale and refetch it now if the current page shows it.
///
/// A fetch already in flight was sent before the mutation landed, so it is
/// superseded by a new generation instead of being waited on.
fn refetch_after_mutation(state: &mut AppState, key: ResourceKey) -> UpdateResult {
    state.cache.invalidate(key);
    if !state.route.required_resources().contains(&key) {
        return UpdateResult::none();
    }
    let generation = state.cache.begin(key);
    UpdateResult::action(UpdateAction::Fetch(vec![FetchRequest { key, generation }]))
}

// ─────────────────────────────────────────────────────────
// Form
// ─────────────────────────────────────────────────────────

pub fn handle_open_create_form(state: &mut AppState) -> UpdateResult {
    if state.route != Route::TestCases {
        return UpdateResult::none();
    }
    state.form = Some(TestCaseForm::create());
    state.ui_mode = UiMode::Form;
    UpdateResult::none()
}

pub fn handle_open_edit_form(state: &mut AppState) -> UpdateResult {
    if state.route != Route::TestCases {
        return UpdateResult::none();
    }
    let Some(case) = state.selected_test_case() else {
        return UpdateResult::none();
    };
    let form = TestCaseForm::edit(case);
    state.form = Some(form);
    state.ui_mode = UiMode::Form;
    UpdateResult::none()
}

/// Apply an edit to the open form, if any
pub fn with_form(state: &mut AppState, f: impl FnOnce(&mut TestCaseForm)) -> UpdateResult {
    if let Some(form) = state.form.as_mut() {
        f(form);
    }
    UpdateResult::none()
}

pub fn handle_form_enter(state: &mut AppState) -> UpdateResult {
    match state.form.as_mut() {
        Some(form) if form.is_last_field() => UpdateResult::message(Message::SubmitForm),
        Some(form) => {
            form.focus_next();
            UpdateResult::none()
        }
        None => UpdateResult::none(),
    }
}

/// Validate and send the form. Invalid input issues no request.
pub fn handle_submit_form(state: &mut AppState) -> UpdateResult {
    let Some(form) = state.form.as_mut() else {
        return UpdateResult::none();
    };
    if form.submitting {
        return UpdateResult::none();
    }
    if !form.validate() {
        return UpdateResult::none();
    }

    form.submitting = true;
    let draft = form.draft.clone();
    let task = match form.mode {
        FormMode::Create => Task::CreateTestCase(draft),
        FormMode::Edit(id) => Task::UpdateTestCase { id, draft },
    };
    UpdateResult::action(UpdateAction::SpawnTask(task))
}

pub fn handle_cancel_form(state: &mut AppState) -> UpdateResult {
    state.form = None;
    if state.ui_mode == UiMode::Form {
        state.ui_mode = UiMode::Normal;
    }
    UpdateResult::none()
}

/// The open form is the one waiting on this save
fn awaiting_save(form: &TestCaseForm, created: bool, id: Option<TestCaseId>) -> bool {
    form.submitting
        && match form.mode {
            FormMode::Create => created,
            FormMode::Edit(edited) => !created && id.map_or(true, |id| id == edited),
        }
}

pub fn handle_test_case_saved(
    state: &mut AppState,
    created: bool,
    result: Result<TestCase, String>,
) -> UpdateResult {
    match result {
        Ok(case) => {
            info!("Saved test case {} ({})", case.id, case.name);
            if state
                .form
                .as_ref()
                .is_some_and(|f| awaiting_save(f, created, Some(case.id)))
            {
                handle_cancel_form(state);
            }
            let verb = if created { "created" } else { "updated" };
            state.set_status(
                StatusKind::Success,
                format!("Test case \"{}\" {}", case.name, verb),
            );
            refetch_after_mutation(state, ResourceKey::TestCases)
        }
        Err(e) => {
            error!("Failed to save test case: {}", e);
            if let Some(form) = state
                .form
                .as_mut()
                .filter(|f| awaiting_save(f, created, None))
            {
                form.submitting = false;
                form.error = Some(e.clone());
            }
            state.set_status(StatusKind::Error, format!("Failed to save test case: {}", e));
            UpdateResult::none()
        }
    }
}

// ─────────────────────────────────────────────────────────
// Delete
// ─────────────────────────────────────────────────────────

pub fn handle_request_delete(state: &mut AppState) -> UpdateResult {
    if state.route != Route::TestCases {
        return UpdateResult::none();
    }
    let Some(case) = state.selected_test_case() else {
        return UpdateResult::none();
    };
    let dialog = ConfirmDialogState::delete_test_case(case.id, &case.name);
    state.confirm_dialog_state = Some(dialog);
    state.ui_mode = UiMode::ConfirmDialog;
    UpdateResult::none()
}

pub fn handle_confirm_accept(state: &mut AppState) -> UpdateResult {
    let dialog = state.confirm_dialog_state.take();
    state.ui_mode = UiMode::Normal;
    match dialog {
        Some(dialog) => UpdateResult::message(dialog.on_confirm),
        None => UpdateResult::none(),
    }
}

/// The backend may not expose a delete endpoint; requests are only sent
/// when deletion is enabled in settings.
pub fn handle_delete_test_case(state: &mut AppState, id: TestCaseId) -> UpdateResult {
    if !state.settings.api.enable_delete {
        warn!("Delete of test case {} skipped: deletion disabled", id);
        state.set_status(
            StatusKind::Error,
            "Deleting test cases is not supported by this backend (set api.enable_delete)",
        );
        return UpdateResult::none();
    }
    state.set_status(StatusKind::Info, "Deleting test case...");
    UpdateResult::action(UpdateAction::SpawnTask(Task::DeleteTestCase(id)))
}

pub fn handle_test_case_deleted(
    state: &mut AppState,
    id: TestCaseId,
    result: Result<(), String>,
) -> UpdateResult {
    match result {
        Ok(()) => {
            info!("Deleted test case {}", id);
            state.set_status(StatusKind::Success, "Test case deleted");
            refetch_after_mutation(state, ResourceKey::TestCases)
        }
        Err(e) => {
            error!("Failed to delete test case {}: {}", id, e);
            state.set_status(StatusKind::Error, format!("Failed to delete test case: {}", e));
            UpdateResult::none()
        }
    }
}

// ─────────────────────────────────────────────────────────
// Execute
// ─────────────────────────────────────────────────────────

pub fn handle_execute_run(state: &mut AppState, origin: RunOrigin) -> UpdateResult {
    if state.executing {
        return UpdateResult::none();
    }
    let branch = state.settings.runs.default_branch.as_str();
    let request = match origin {
        RunOrigin::Dashboard => ExecuteRunRequest::quick(branch),
        RunOrigin::RunList => ExecuteRunRequest::manual(branch),
    };
    info!(
        "Executing test run {:?} ({} on {})",
        request.run_name, request.git_commit, request.git_branch
    );
    state.executing = true;
    state.set_status(StatusKind::Info, "Starting test run...");
    UpdateResult::action(UpdateAction::SpawnTask(Task::ExecuteRun(request)))
}

pub fn handle_run_executed(
    state: &mut AppState,
    result: Result<ExecuteRunResponse, String>,
) -> UpdateResult {
    state.executing = false;
    match result {
        Ok(response) => {
            state.set_status(StatusKind::Success, response.summary());
            refetch_after_mutation(state, ResourceKey::TestRuns)
        }
        Err(e) => {
            error!("Failed to execute test run: {}", e);
            state.set_status(StatusKind::Error, format!("Failed to execute test run: {}", e));
            UpdateResult::none()
        }
    }
}
