//! Tests for handler module

use super::*;
use crate::form::FormField;
use crate::input_key::InputKey;
use crate::message::RunOrigin;
use crate::pages::StatusKind;
use crate::route::Route;
use crate::state::{AppState, UiMode};
use canary_api::test_utils::{test_case, test_run};
use canary_api::ExecuteRunResponse;
use canary_core::{
    RunId, RunStatus, SeverityFilter, SeverityLabel, StatusFilter, TestCase, TestCaseId, TestRun,
};

/// Drive a message and its follow-ups, collecting every action
fn run(state: &mut AppState, msg: Message) -> Vec<UpdateAction> {
    let mut actions = Vec::new();
    let mut next = Some(msg);
    while let Some(m) = next {
        let result = update(state, m);
        if let Some(action) = result.action {
            actions.push(action);
        }
        next = result.message;
    }
    actions
}

fn fetches(actions: &[UpdateAction]) -> Vec<FetchRequest> {
    actions
        .iter()
        .flat_map(|a| match a {
            UpdateAction::Fetch(reqs) => reqs.clone(),
            _ => Vec::new(),
        })
        .collect()
}

fn tasks(actions: &[UpdateAction]) -> Vec<Task> {
    actions
        .iter()
        .filter_map(|a| match a {
            UpdateAction::SpawnTask(t) => Some(t.clone()),
            _ => None,
        })
        .collect()
}

fn complete(
    state: &mut AppState,
    reqs: &[FetchRequest],
    cases: Vec<TestCase>,
    runs: Vec<TestRun>,
) {
    for req in reqs {
        let msg = match req.key {
            ResourceKey::TestCases => Message::TestCasesFetched {
                generation: req.generation,
                result: Ok(cases.clone()),
            },
            ResourceKey::TestRuns => Message::TestRunsFetched {
                generation: req.generation,
                result: Ok(runs.clone()),
            },
            ResourceKey::RunDetail(_) => continue,
        };
        run(state, msg);
    }
}

fn sample_cases() -> Vec<TestCase> {
    vec![
        test_case(1, "Capital of France"),
        test_case(2, "Haiku about rain"),
        test_case(3, "JSON output"),
    ]
}

fn sample_runs() -> Vec<TestRun> {
    vec![
        test_run(2, "Nightly", RunStatus::Running, 0, 0),
        test_run(1, "Manual Test Run", RunStatus::Completed, 3, 1),
    ]
}

/// State on the test cases page with data loaded
fn cases_page() -> AppState {
    let mut state = AppState::new();
    let actions = run(&mut state, Message::NavigateTo(Route::TestCases));
    complete(&mut state, &fetches(&actions), sample_cases(), vec![]);
    state
}

// ─────────────────────────────────────────────────────────
// Lifecycle
// ─────────────────────────────────────────────────────────

#[test]
fn test_quit_sets_phase() {
    let mut state = AppState::new();
    run(&mut state, Message::Key(InputKey::Char('q')));
    assert!(state.should_quit());

    let mut state = AppState::new();
    run(&mut state, Message::Quit);
    assert!(state.should_quit());
}

#[test]
fn test_ctrl_c_quits_from_any_mode() {
    let mut state = cases_page();
    run(&mut state, Message::OpenCreateForm);
    assert_eq!(state.ui_mode, UiMode::Form);
    assert!(matches!(
        handle_key(&state, InputKey::CharCtrl('c')),
        Some(Message::Quit)
    ));
}

// ─────────────────────────────────────────────────────────
// Navigation & Fetch Planning
// ─────────────────────────────────────────────────────────

#[test]
fn test_dashboard_entry_fetches_both_collections() {
    let mut state = AppState::new();
    let actions = run(&mut state, Message::LoadPage { force: false });
    let keys: Vec<_> = fetches(&actions).into_iter().map(|r| r.key).collect();
    assert_eq!(keys, vec![ResourceKey::TestCases, ResourceKey::TestRuns]);
    assert!(state.is_page_loading());
}

#[test]
fn test_fresh_cache_skips_refetch() {
    let mut state = AppState::new();
    let actions = run(&mut state, Message::LoadPage { force: false });
    complete(&mut state, &fetches(&actions), sample_cases(), sample_runs());

    let actions = run(&mut state, Message::NavigateTo(Route::TestCases));
    assert!(fetches(&actions).is_empty());

    let actions = run(&mut state, Message::Key(InputKey::Char('r')));
    assert_eq!(fetches(&actions).len(), 1);
}

#[test]
fn test_leaving_page_cancels_unneeded_fetches() {
    let mut state = AppState::new();
    run(&mut state, Message::LoadPage { force: false });

    let actions = run(&mut state, Message::NavigateTo(Route::TestRuns));
    let cancelled: Vec<_> = actions
        .iter()
        .flat_map(|a| match a {
            UpdateAction::CancelFetches(keys) => keys.clone(),
            _ => Vec::new(),
        })
        .collect();
    assert_eq!(cancelled, vec![ResourceKey::TestCases]);
    // Runs fetch stays in flight and is reused by the new page
    assert!(fetches(&actions).is_empty());
    assert!(state.cache.is_loading(ResourceKey::TestRuns));
}

#[test]
fn test_late_result_after_cancel_is_dropped() {
    let mut state = AppState::new();
    let actions = run(&mut state, Message::NavigateTo(Route::TestCases));
    let req = fetches(&actions)[0];

    run(&mut state, Message::NavigateTo(Route::TestRuns));
    run(
        &mut state,
        Message::TestCasesFetched {
            generation: req.generation,
            result: Ok(sample_cases()),
        },
    );
    assert!(state.cache.test_cases.state.value().is_none());
}

#[test]
fn test_superseded_refresh_result_is_dropped() {
    let mut state = AppState::new();
    let first = fetches(&run(&mut state, Message::NavigateTo(Route::TestRuns)))[0];
    let second = fetches(&run(&mut state, Message::LoadPage { force: true }))[0];

    run(
        &mut state,
        Message::TestRunsFetched {
            generation: first.generation,
            result: Ok(vec![]),
        },
    );
    assert!(state.cache.is_loading(ResourceKey::TestRuns));

    run(
        &mut state,
        Message::TestRunsFetched {
            generation: second.generation,
            result: Ok(sample_runs()),
        },
    );
    assert_eq!(state.cache.test_runs.state.value().map(Vec::len), Some(2));
}

#[test]
fn test_number_keys_switch_pages() {
    let mut state = AppState::new();
    run(&mut state, Message::Key(InputKey::Char('2')));
    assert_eq!(state.route, Route::TestCases);
    run(&mut state, Message::Key(InputKey::Char('3')));
    assert_eq!(state.route, Route::TestRuns);
    run(&mut state, Message::Key(InputKey::Tab));
    assert_eq!(state.route, Route::Dashboard);
}

#[test]
fn test_enter_on_dashboard_opens_run_detail() {
    let mut state = AppState::new();
    let actions = run(&mut state, Message::LoadPage { force: false });
    complete(&mut state, &fetches(&actions), sample_cases(), sample_runs());

    run(&mut state, Message::Key(InputKey::Down));
    let actions = run(&mut state, Message::Key(InputKey::Enter));
    assert_eq!(state.route, Route::TestRunDetail(RunId(1)));
    assert_eq!(
        fetches(&actions).iter().map(|r| r.key).collect::<Vec<_>>(),
        vec![ResourceKey::RunDetail(RunId(1))]
    );

    run(&mut state, Message::Key(InputKey::Esc));
    assert_eq!(state.route, Route::TestRuns);
}

#[test]
fn test_fetch_failure_is_kept_as_error() {
    let mut state = AppState::new();
    let actions = run(&mut state, Message::NavigateTo(Route::TestRuns));
    let req = fetches(&actions)[0];
    run(
        &mut state,
        Message::TestRunsFetched {
            generation: req.generation,
            result: Err("could not connect to backend".into()),
        },
    );
    assert_eq!(
        state.visible_test_runs().error(),
        Some("could not connect to backend")
    );
}

// ─────────────────────────────────────────────────────────
// Search & Filters
// ─────────────────────────────────────────────────────────

#[test]
fn test_search_typing_filters_cases() {
    let mut state = cases_page();
    run(&mut state, Message::Key(InputKey::Char('/')));
    assert_eq!(state.ui_mode, UiMode::SearchInput);

    for c in "HAIKU".chars() {
        run(&mut state, Message::Key(InputKey::Char(c)));
    }
    assert_eq!(state.test_cases_page.search, "HAIKU");
    let visible = state.visible_test_cases();
    assert_eq!(visible.ready().map(Vec::len), Some(1));

    run(&mut state, Message::Key(InputKey::Enter));
    assert_eq!(state.ui_mode, UiMode::Normal);
    assert_eq!(state.test_cases_page.search, "HAIKU");

    run(&mut state, Message::Key(InputKey::Esc));
    assert!(state.test_cases_page.search.is_empty());
}

#[test]
fn test_search_unavailable_on_dashboard() {
    let mut state = AppState::new();
    run(&mut state, Message::StartSearch);
    assert_eq!(state.ui_mode, UiMode::Normal);
}

#[test]
fn test_status_filter_cycles_on_run_list() {
    let mut state = AppState::new();
    run(&mut state, Message::NavigateTo(Route::TestRuns));
    run(&mut state, Message::Key(InputKey::Char('s')));
    assert_eq!(state.test_runs_page.status_filter, StatusFilter::Running);
}

#[test]
fn test_selection_clamps_to_list() {
    let mut state = cases_page();
    for _ in 0..10 {
        run(&mut state, Message::SelectNext);
    }
    assert_eq!(state.test_cases_page.selected, 2);
    run(&mut state, Message::SearchInput { text: "json".into() });
    assert_eq!(state.test_cases_page.selected, 0);
}

// ─────────────────────────────────────────────────────────
// Form
// ─────────────────────────────────────────────────────────

#[test]
fn test_submit_with_missing_fields_issues_no_request() {
    let mut state = cases_page();
    run(&mut state, Message::Key(InputKey::Char('n')));
    for c in "new case".chars() {
        run(&mut state, Message::Key(InputKey::Char(c)));
    }

    let actions = run(&mut state, Message::Key(InputKey::CharCtrl('s')));
    assert!(tasks(&actions).is_empty());
    let form = state.form.as_ref().unwrap();
    assert_eq!(form.focus, FormField::InputPrompt);
    assert_eq!(form.error.as_deref(), Some("Input Prompt is required"));
    assert!(!form.submitting);
}

#[test]
fn test_create_flow_closes_form_and_refetches() {
    let mut state = cases_page();
    run(&mut state, Message::OpenCreateForm);
    {
        let form = state.form.as_mut().unwrap();
        form.draft.name = "tone".into();
        form.draft.input_prompt = "Say hi".into();
        form.draft.expected_behavior = "Friendly".into();
    }

    let actions = run(&mut state, Message::SubmitForm);
    match tasks(&actions).as_slice() {
        [Task::CreateTestCase(draft)] => assert_eq!(draft.name, "tone"),
        other => panic!("unexpected tasks: {:?}", other),
    }
    assert!(state.form.as_ref().unwrap().submitting);

    // Double submit while in flight is ignored
    assert!(tasks(&run(&mut state, Message::SubmitForm)).is_empty());

    let saved = test_case(4, "tone");
    let actions = run(
        &mut state,
        Message::TestCaseSaved {
            created: true,
            result: Ok(saved),
        },
    );
    assert!(state.form.is_none());
    assert_eq!(state.ui_mode, UiMode::Normal);
    assert_eq!(
        fetches(&actions).iter().map(|r| r.key).collect::<Vec<_>>(),
        vec![ResourceKey::TestCases]
    );
    assert_eq!(state.status.as_ref().map(|s| s.kind), Some(StatusKind::Success));
}

#[test]
fn test_failed_save_keeps_form_open() {
    let mut state = cases_page();
    run(&mut state, Message::OpenEditForm);
    let actions = run(&mut state, Message::SubmitForm);
    assert!(matches!(
        tasks(&actions).as_slice(),
        [Task::UpdateTestCase { id, .. }] if id.0 == 1
    ));

    run(
        &mut state,
        Message::TestCaseSaved {
            created: false,
            result: Err("API error 422: name: field required".into()),
        },
    );
    let form = state.form.as_ref().unwrap();
    assert!(!form.submitting);
    assert!(form.error.as_deref().unwrap().contains("422"));
    assert_eq!(state.ui_mode, UiMode::Form);
}

#[test]
fn test_form_enter_advances_then_submits() {
    let mut state = cases_page();
    run(&mut state, Message::OpenCreateForm);
    run(&mut state, Message::Key(InputKey::Enter));
    assert_eq!(state.form.as_ref().unwrap().focus, FormField::Description);

    state.form.as_mut().unwrap().focus = FormField::Status;
    let result = update(&mut state, Message::FormEnter);
    assert!(matches!(result.message, Some(Message::SubmitForm)));
}

#[test]
fn test_escape_cancels_form() {
    let mut state = cases_page();
    run(&mut state, Message::OpenCreateForm);
    run(&mut state, Message::Key(InputKey::Esc));
    assert!(state.form.is_none());
    assert_eq!(state.ui_mode, UiMode::Normal);
}

#[test]
fn test_save_result_leaves_newer_form_open() {
    let mut state = cases_page();
    run(&mut state, Message::OpenCreateForm);
    {
        let form = state.form.as_mut().unwrap();
        form.draft.name = "tone".into();
        form.draft.input_prompt = "Say hi".into();
        form.draft.expected_behavior = "Friendly".into();
    }
    run(&mut state, Message::SubmitForm);

    // Abandon the in-flight save and start another case
    run(&mut state, Message::Key(InputKey::Esc));
    run(&mut state, Message::OpenCreateForm);
    for c in "follow".chars() {
        run(&mut state, Message::Key(InputKey::Char(c)));
    }

    let actions = run(
        &mut state,
        Message::TestCaseSaved {
            created: true,
            result: Ok(test_case(4, "tone")),
        },
    );
    let form = state.form.as_ref().unwrap();
    assert_eq!(form.draft.name, "follow");
    assert!(!form.submitting);
    assert_eq!(state.ui_mode, UiMode::Form);
    assert_eq!(
        fetches(&actions).iter().map(|r| r.key).collect::<Vec<_>>(),
        vec![ResourceKey::TestCases]
    );
}

#[test]
fn test_save_failure_ignores_newer_form() {
    let mut state = cases_page();
    run(&mut state, Message::OpenEditForm);
    run(&mut state, Message::SubmitForm);
    run(&mut state, Message::Key(InputKey::Esc));
    run(&mut state, Message::OpenCreateForm);

    run(
        &mut state,
        Message::TestCaseSaved {
            created: false,
            result: Err("API error 500: boom".into()),
        },
    );
    assert!(state.form.as_ref().unwrap().error.is_none());
}

// ─────────────────────────────────────────────────────────
// Delete
// ─────────────────────────────────────────────────────────

#[test]
fn test_delete_disabled_issues_no_request() {
    let mut state = cases_page();
    run(&mut state, Message::Key(InputKey::Char('d')));
    assert_eq!(state.ui_mode, UiMode::ConfirmDialog);

    let actions = run(&mut state, Message::Key(InputKey::Char('y')));
    assert!(tasks(&actions).is_empty());
    assert_eq!(state.ui_mode, UiMode::Normal);
    assert_eq!(state.status.as_ref().map(|s| s.kind), Some(StatusKind::Error));
}

#[test]
fn test_delete_enabled_spawns_task_and_refetches() {
    let mut state = cases_page();
    state.settings.api.enable_delete = true;
    run(&mut state, Message::SelectNext);
    run(&mut state, Message::RequestDelete);

    let actions = run(&mut state, Message::ConfirmDialogAccept);
    assert!(matches!(
        tasks(&actions).as_slice(),
        [Task::DeleteTestCase(id)] if id.0 == 2
    ));

    let actions = run(
        &mut state,
        Message::TestCaseDeleted {
            id: TestCaseId(2),
            result: Ok(()),
        },
    );
    assert_eq!(fetches(&actions).len(), 1);
}

#[test]
fn test_cancel_delete_dialog() {
    let mut state = cases_page();
    run(&mut state, Message::RequestDelete);
    run(&mut state, Message::Key(InputKey::Char('n')));
    assert!(state.confirm_dialog_state.is_none());
    assert_eq!(state.ui_mode, UiMode::Normal);
}

// ─────────────────────────────────────────────────────────
// Execute
// ─────────────────────────────────────────────────────────

#[test]
fn test_execute_from_dashboard_uses_quick_run() {
    let mut state = AppState::new();
    let actions = run(&mut state, Message::Key(InputKey::Char('x')));
    match tasks(&actions).as_slice() {
        [Task::ExecuteRun(req)] => {
            assert_eq!(req.run_name, "Quick Test Run");
            assert!(req.git_commit.starts_with("dashboard-"));
            assert_eq!(req.git_branch, "main");
        }
        other => panic!("unexpected tasks: {:?}", other),
    }
    assert!(state.executing);

    // Second trigger while in flight is ignored
    assert!(tasks(&run(&mut state, Message::ExecuteRun(RunOrigin::Dashboard))).is_empty());
}

#[test]
fn test_execute_from_run_list_uses_manual_run_and_branch_setting() {
    let mut state = AppState::new();
    state.settings.runs.default_branch = "release".into();
    run(&mut state, Message::NavigateTo(Route::TestRuns));
    let actions = run(&mut state, Message::Key(InputKey::Char('x')));
    match tasks(&actions).as_slice() {
        [Task::ExecuteRun(req)] => {
            assert_eq!(req.run_name, "Manual Test Run");
            assert!(req.git_commit.starts_with("manual-"));
            assert_eq!(req.git_branch, "release");
        }
        other => panic!("unexpected tasks: {:?}", other),
    }
}

#[test]
fn test_run_executed_invalidates_runs() {
    let mut state = AppState::new();
    let actions = run(&mut state, Message::NavigateTo(Route::TestRuns));
    complete(&mut state, &fetches(&actions), vec![], sample_runs());
    run(&mut state, Message::ExecuteRun(RunOrigin::RunList));

    let response = ExecuteRunResponse {
        test_run_id: Some(RunId(3)),
        status: Some("running".into()),
        total_tests: Some(3),
        message: Some("Test execution started in background".into()),
    };
    let actions = run(
        &mut state,
        Message::RunExecuted {
            result: Ok(response),
        },
    );
    assert!(!state.executing);
    assert_eq!(
        fetches(&actions).iter().map(|r| r.key).collect::<Vec<_>>(),
        vec![ResourceKey::TestRuns]
    );
}

#[test]
fn test_run_executed_supersedes_in_flight_list_fetch() {
    let mut state = AppState::new();
    let before = fetches(&run(&mut state, Message::NavigateTo(Route::TestRuns)))[0];
    run(&mut state, Message::ExecuteRun(RunOrigin::RunList));

    let actions = run(
        &mut state,
        Message::RunExecuted {
            result: Ok(ExecuteRunResponse {
                test_run_id: Some(RunId(3)),
                status: Some("running".into()),
                total_tests: Some(3),
                message: None,
            }),
        },
    );
    let after = match fetches(&actions).as_slice() {
        [req] if req.key == ResourceKey::TestRuns => *req,
        other => panic!("unexpected fetches: {:?}", other),
    };
    assert_ne!(after.generation, before.generation);

    // The list fetched before the run started no longer settles the page
    run(
        &mut state,
        Message::TestRunsFetched {
            generation: before.generation,
            result: Ok(sample_runs()),
        },
    );
    assert!(state.cache.is_loading(ResourceKey::TestRuns));

    let mut runs = sample_runs();
    runs.insert(0, test_run(3, "Manual Test Run", RunStatus::Running, 0, 0));
    complete(&mut state, &[after], vec![], runs);
    assert_eq!(state.cache.test_runs.state.value().map(Vec::len), Some(3));
    assert!(!state.cache.test_runs.stale);
}

#[test]
fn test_run_executed_off_page_marks_runs_stale() {
    let mut state = AppState::new();
    let actions = run(&mut state, Message::NavigateTo(Route::TestRuns));
    complete(&mut state, &fetches(&actions), vec![], sample_runs());
    let actions = run(&mut state, Message::NavigateTo(Route::TestCases));
    complete(&mut state, &fetches(&actions), sample_cases(), vec![]);

    run(&mut state, Message::ExecuteRun(RunOrigin::RunList));
    let actions = run(
        &mut state,
        Message::RunExecuted {
            result: Ok(ExecuteRunResponse {
                test_run_id: Some(RunId(3)),
                status: None,
                total_tests: None,
                message: None,
            }),
        },
    );
    assert!(fetches(&actions).is_empty());
    assert!(state.cache.test_runs.stale);

    let actions = run(&mut state, Message::NavigateTo(Route::TestRuns));
    assert_eq!(
        fetches(&actions).iter().map(|r| r.key).collect::<Vec<_>>(),
        vec![ResourceKey::TestRuns]
    );
}

#[test]
fn test_run_execute_failure_reports_status() {
    let mut state = AppState::new();
    run(&mut state, Message::ExecuteRun(RunOrigin::Dashboard));
    run(
        &mut state,
        Message::RunExecuted {
            result: Err("No active test cases found".into()),
        },
    );
    assert!(!state.executing);
    let status = state.status.as_ref().unwrap();
    assert_eq!(status.kind, StatusKind::Error);
    assert!(status.text.contains("No active test cases found"));
}

// ─────────────────────────────────────────────────────────
// Run Detail
// ─────────────────────────────────────────────────────────

#[test]
fn test_leaving_detail_page_drops_its_detail() {
    let mut state = AppState::new();
    for id in 1..=3 {
        run(&mut state, Message::NavigateTo(Route::TestRunDetail(RunId(id))));
    }
    assert!(state.cache.run_detail(RunId(3)).is_some());
    assert!(state.cache.run_detail(RunId(1)).is_none());
    assert!(state.cache.run_detail(RunId(2)).is_none());

    run(&mut state, Message::NavigateTo(Route::TestRuns));
    assert!(state.cache.run_detail(RunId(3)).is_none());
}

#[test]
fn test_severity_filter_keys_on_detail_page() {
    let mut state = AppState::new();
    run(&mut state, Message::NavigateTo(Route::TestRunDetail(RunId(5))));
    run(&mut state, Message::Key(InputKey::Char('f')));
    assert_eq!(
        state.run_detail_page.severity_filter,
        SeverityFilter::Only(SeverityLabel::Critical)
    );
    run(&mut state, Message::Key(InputKey::Left));
    run(&mut state, Message::Key(InputKey::Left));
    assert_eq!(
        state.run_detail_page.severity_filter,
        SeverityFilter::Only(SeverityLabel::None)
    );
}
