//! Fetch completion handlers
//!
//! Completions are applied only when their generation is still current;
//! anything else belongs to an aborted or superseded request.

use std::time::Instant;

use canary_core::{RunDetail, RunId, TestCase, TestRun};
use tracing::{debug, error};

use crate::cache::ResourceKey;
use crate::state::AppState;

use super::UpdateResult;

fn log_outcome<T>(key: ResourceKey, generation: u64, result: &Result<T, String>) {
    if let Err(e) = result {
        error!("Failed to fetch {} (generation {}): {}", key, generation, e);
    }
}

fn log_dropped(key: ResourceKey, generation: u64) {
    debug!("Dropping stale {} result (generation {})", key, generation);
}

/// Keep the page's selection inside its (possibly shrunk) list
fn clamp_selection(state: &mut AppState) {
    let len = state.list_len();
    let selected = state.selection_mut();
    if *selected >= len {
        *selected = len.saturating_sub(1);
    }
}

pub fn handle_test_cases_fetched(
    state: &mut AppState,
    generation: u64,
    result: Result<Vec<TestCase>, String>,
) -> UpdateResult {
    log_outcome(ResourceKey::TestCases, generation, &result);
    if state
        .cache
        .resolve_test_cases(generation, result, Instant::now())
    {
        clamp_selection(state);
    } else {
        log_dropped(ResourceKey::TestCases, generation);
    }
    UpdateResult::none()
}

pub fn handle_test_runs_fetched(
    state: &mut AppState,
    generation: u64,
    result: Result<Vec<TestRun>, String>,
) -> UpdateResult {
    log_outcome(ResourceKey::TestRuns, generation, &result);
    if state
        .cache
        .resolve_test_runs(generation, result, Instant::now())
    {
        clamp_selection(state);
    } else {
        log_dropped(ResourceKey::TestRuns, generation);
    }
    UpdateResult::none()
}

pub fn handle_run_detail_fetched(
    state: &mut AppState,
    id: RunId,
    generation: u64,
    result: Result<RunDetail, String>,
) -> UpdateResult {
    let key = ResourceKey::RunDetail(id);
    log_outcome(key, generation, &result);
    if state
        .cache
        .resolve_run_detail(id, generation, result, Instant::now())
    {
        clamp_selection(state);
    } else {
        log_dropped(key, generation);
    }
    UpdateResult::none()
}
