//! Page switching and page-entry fetch planning

use std::time::Instant;

use tracing::debug;

use crate::cache::ResourceKey;
use crate::message::Message;
use crate::pages::{RunDetailPage, TestCasesPage, TestRunsPage};
use crate::route::Route;
use crate::state::{AppState, UiMode};

use super::{FetchRequest, UpdateAction, UpdateResult};

/// Switch to `route`, aborting fetches only the old page needed, then load
/// the new page.
pub fn handle_navigate(state: &mut AppState, route: Route) -> UpdateResult {
    if route == state.route {
        return UpdateResult::message(Message::LoadPage { force: false });
    }

    let needed = route.required_resources();
    let now = Instant::now();
    let cancelled: Vec<ResourceKey> = state
        .route
        .required_resources()
        .into_iter()
        .filter(|key| !needed.contains(key))
        .filter(|key| state.cache.cancel(*key, now))
        .collect();

    // Details are only kept while their page is open
    if let Route::TestRunDetail(id) = state.route {
        state.cache.evict_run_detail(id);
    }

    debug!("Navigating {} -> {}", state.route, route);
    state.route = route;
    state.ui_mode = UiMode::Normal;
    reset_page(state, route);

    let result = if cancelled.is_empty() {
        UpdateResult::none()
    } else {
        debug!("Cancelling fetches: {:?}", cancelled);
        UpdateResult::action(UpdateAction::CancelFetches(cancelled))
    };
    result.with_message(Message::LoadPage { force: false })
}

/// Pages start fresh on entry
fn reset_page(state: &mut AppState, route: Route) {
    match route {
        Route::Dashboard => state.dashboard.selected = 0,
        Route::TestCases => state.test_cases_page = TestCasesPage::default(),
        Route::TestRuns => state.test_runs_page = TestRunsPage::default(),
        Route::TestRunDetail(_) => state.run_detail_page = RunDetailPage::default(),
    }
}

/// Start fetches for the current page's resources.
///
/// Without `force`, only entries that are idle, failed, stale or expired
/// are fetched.
pub fn handle_load_page(state: &mut AppState, force: bool) -> UpdateResult {
    let now = Instant::now();
    let mut requests = Vec::new();
    for key in state.route.required_resources() {
        if force || state.cache.needs_fetch(key, now) {
            let generation = state.cache.begin(key);
            requests.push(FetchRequest { key, generation });
        }
    }

    if requests.is_empty() {
        UpdateResult::none()
    } else {
        UpdateResult::action(UpdateAction::Fetch(requests))
    }
}

pub fn handle_next_page(state: &mut AppState) -> UpdateResult {
    handle_navigate(state, state.route.next_nav())
}

pub fn handle_prev_page(state: &mut AppState) -> UpdateResult {
    handle_navigate(state, state.route.prev_nav())
}

/// Detail pages return to their list
pub fn handle_go_back(state: &mut AppState) -> UpdateResult {
    match state.route {
        Route::TestRunDetail(_) => handle_navigate(state, Route::TestRuns),
        _ => UpdateResult::none(),
    }
}

/// Enter on the selected row
pub fn handle_open_selected(state: &mut AppState) -> UpdateResult {
    match state.route {
        Route::Dashboard | Route::TestRuns => match state.selected_run() {
            Some(run) => UpdateResult::message(Message::NavigateTo(Route::TestRunDetail(run.id))),
            None => UpdateResult::none(),
        },
        Route::TestCases => UpdateResult::message(Message::OpenEditForm),
        Route::TestRunDetail(_) => UpdateResult::none(),
    }
}
