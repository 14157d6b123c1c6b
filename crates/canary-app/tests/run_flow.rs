//! End-to-end flows through the Engine against an in-memory backend

use std::time::Duration;

use canary_api::test_utils::{test_case, test_run, MockBackend};
use canary_app::config::Settings;
use canary_app::{Engine, InputKey, Message, ResourceKey, Route, UiMode};
use canary_core::{RunStatus, TestRun};

/// Process messages until `done` holds or the deadline passes
async fn pump_until<F>(engine: &mut Engine<MockBackend>, mut done: F)
where
    F: FnMut(&Engine<MockBackend>) -> bool,
{
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while !done(engine) {
        let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
        match tokio::time::timeout(remaining, engine.msg_rx.recv()).await {
            Ok(Some(msg)) => engine.process_message(msg),
            Ok(None) => panic!("message channel closed"),
            Err(_) => panic!("timed out waiting for engine state"),
        }
    }
}

fn runs(engine: &Engine<MockBackend>) -> Vec<TestRun> {
    engine
        .state
        .cache
        .test_runs
        .state
        .value()
        .cloned()
        .unwrap_or_default()
}

fn backend() -> MockBackend {
    MockBackend::new()
        .with_cases(vec![test_case(1, "Capital of France"), test_case(2, "Haiku")])
        .with_runs(vec![test_run(1, "Nightly", RunStatus::Completed, 2, 0)])
}

#[tokio::test]
async fn execute_then_refetch_includes_new_run() {
    let backend = backend();
    let mut engine = Engine::new(Settings::default(), backend.clone());
    engine.start(Route::TestRuns);
    pump_until(&mut engine, |e| !runs(e).is_empty()).await;
    assert_eq!(runs(&engine).len(), 1);

    engine.process_message(Message::Key(InputKey::Char('x')));
    assert!(engine.state.executing);

    pump_until(&mut engine, |e| runs(e).len() == 2).await;
    let list = runs(&engine);
    assert_eq!(list[0].name, "Manual Test Run");
    assert_eq!(list[0].status, RunStatus::Running);
    assert!(!engine.state.executing);
    assert_eq!(backend.call_count("list_test_runs"), 2);

    engine.shutdown().await;
}

#[tokio::test]
async fn dashboard_loads_both_collections() {
    let backend = backend();
    let mut engine = Engine::new(Settings::default(), backend.clone());
    engine.start(Route::Dashboard);
    pump_until(&mut engine, |e| e.state.dashboard_view().ready().is_some()).await;

    let stats = engine.state.dashboard_stats();
    assert_eq!(stats.total_test_cases, 2);
    assert_eq!(stats.total_test_runs, 1);
    assert_eq!(stats.passed_tests, 2);
    assert_eq!(backend.call_count("list_test_cases"), 1);
    assert_eq!(backend.call_count("list_test_runs"), 1);

    engine.shutdown().await;
}

#[tokio::test]
async fn create_test_case_refreshes_list() {
    let backend = backend();
    let mut engine = Engine::new(Settings::default(), backend.clone());
    engine.start(Route::TestCases);
    pump_until(&mut engine, |e| e.state.cache.test_cases.state.value().is_some()).await;

    engine.process_message(Message::Key(InputKey::Char('n')));
    assert_eq!(engine.state.ui_mode, UiMode::Form);
    let fields = ["tone", "", "Say hello", "Friendly greeting"];
    for (i, text) in fields.iter().enumerate() {
        for c in text.chars() {
            engine.process_message(Message::Key(InputKey::Char(c)));
        }
        if i + 1 < fields.len() {
            engine.process_message(Message::Key(InputKey::Tab));
        }
    }
    engine.process_message(Message::Key(InputKey::CharCtrl('s')));

    pump_until(&mut engine, |e| {
        e.state
            .cache
            .test_cases
            .state
            .value()
            .is_some_and(|cases| cases.len() == 3)
    })
    .await;
    assert!(engine.state.form.is_none());
    assert_eq!(backend.cases()[2].name, "tone");

    engine.shutdown().await;
}

#[tokio::test]
async fn invalid_form_sends_nothing() {
    let backend = backend();
    let mut engine = Engine::new(Settings::default(), backend.clone());
    engine.start(Route::TestCases);
    pump_until(&mut engine, |e| e.state.cache.test_cases.state.value().is_some()).await;

    engine.process_message(Message::OpenCreateForm);
    engine.process_message(Message::SubmitForm);
    tokio::time::sleep(Duration::from_millis(50)).await;
    engine.drain_pending_messages();

    assert_eq!(backend.call_count("create_test_case"), 0);
    assert!(engine.state.form.is_some());

    engine.shutdown().await;
}

#[tokio::test]
async fn navigating_away_aborts_pending_detail_fetch() {
    let backend = backend();
    let mut engine = Engine::new(Settings::default(), backend.clone());
    engine.start(Route::TestRunDetail(canary_core::RunId(1)));
    let key = ResourceKey::RunDetail(canary_core::RunId(1));
    assert!(engine.state.cache.is_loading(key));

    engine.process_message(Message::NavigateTo(Route::TestCases));
    assert!(!engine.state.cache.is_loading(key));

    pump_until(&mut engine, |e| e.state.cache.test_cases.state.value().is_some()).await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    engine.drain_pending_messages();
    assert!(engine.state.cache.run_detail(canary_core::RunId(1)).is_none());

    engine.shutdown().await;
}

#[tokio::test]
async fn execute_without_active_cases_reports_error() {
    let backend = MockBackend::new();
    let mut engine = Engine::new(Settings::default(), backend.clone());
    engine.start(Route::Dashboard);
    engine.process_message(Message::Key(InputKey::Char('x')));

    pump_until(&mut engine, |e| !e.state.executing).await;
    let status = engine.state.status.clone().expect("status message");
    assert!(status.text.contains("No active test cases found"));

    engine.shutdown().await;
}
