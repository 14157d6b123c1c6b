//! Application state (Model in TEA pattern)

use std::time::Instant;

use canary_core::{
    filter_results, filter_test_cases, filter_test_runs, recent_runs, regression_count,
    DashboardStats, RunDetail, RunId, SeverityHistogram, TestCase, TestResult, TestRun,
};

use crate::cache::ResourceCache;
use crate::config::Settings;
use crate::confirm_dialog::ConfirmDialogState;
use crate::form::TestCaseForm;
use crate::pages::{
    DashboardPage, PageLoad, RunDetailPage, StatusKind, StatusMessage, TestCasesPage,
    TestRunsPage,
};
use crate::route::Route;

/// Application lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Running,
    Quitting,
}

/// Current UI mode/screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    /// Page navigation and list keys
    #[default]
    Normal,

    /// Search input mode - capturing text for the page's search box
    SearchInput,

    /// Test case create/edit modal
    Form,

    /// Confirmation dialog (delete)
    ConfirmDialog,
}

/// Dashboard data once both collections are in
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView<'a> {
    pub stats: DashboardStats,
    pub recent_runs: &'a [TestRun],
}

/// Run detail data with its derived metrics
#[derive(Debug, Clone)]
pub struct RunDetailView<'a> {
    pub detail: &'a RunDetail,
    /// Results passing the severity filter
    pub results: Vec<&'a TestResult>,
    /// Histogram over the unfiltered results
    pub histogram: SeverityHistogram,
    pub regressions: usize,
}

/// Complete application state (the Model in TEA)
#[derive(Debug)]
pub struct AppState {
    pub phase: AppPhase,
    pub ui_mode: UiMode,
    pub route: Route,
    pub settings: Settings,
    pub cache: ResourceCache,

    pub dashboard: DashboardPage,
    pub test_cases_page: TestCasesPage,
    pub test_runs_page: TestRunsPage,
    pub run_detail_page: RunDetailPage,

    /// Open create/edit modal
    pub form: Option<TestCaseForm>,
    pub confirm_dialog_state: Option<ConfirmDialogState>,
    pub status: Option<StatusMessage>,

    /// An execute request is in flight
    pub executing: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            phase: AppPhase::Running,
            ui_mode: UiMode::Normal,
            route: Route::Dashboard,
            cache: ResourceCache::new(settings.cache.max_age()),
            settings,
            dashboard: DashboardPage::default(),
            test_cases_page: TestCasesPage::default(),
            test_runs_page: TestRunsPage::default(),
            run_detail_page: RunDetailPage::default(),
            form: None,
            confirm_dialog_state: None,
            status: None,
            executing: false,
        }
    }

    // ─────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────

    pub fn request_quit(&mut self) {
        self.phase = AppPhase::Quitting;
    }

    /// Close the confirmation dialog without acting
    pub fn cancel_dialog(&mut self) {
        self.confirm_dialog_state = None;
        self.ui_mode = UiMode::Normal;
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }

    // ─────────────────────────────────────────────────────────
    // Status Bar
    // ─────────────────────────────────────────────────────────

    pub fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(StatusMessage::new(kind, text));
    }

    pub fn clear_expired_status(&mut self, now: Instant) {
        if self.status.as_ref().is_some_and(|s| s.is_expired(now)) {
            self.status = None;
        }
    }

    // ─────────────────────────────────────────────────────────
    // Derived Views
    // ─────────────────────────────────────────────────────────

    /// Dashboard stats and recent runs.
    ///
    /// Both collections must be present; a failure of either fails the whole
    /// load.
    pub fn dashboard_view(&self) -> PageLoad<DashboardView<'_>> {
        let cases = &self.cache.test_cases.state;
        let runs = &self.cache.test_runs.state;
        if let Some(error) = cases.error().or(runs.error()) {
            return PageLoad::Failed(error.to_string());
        }
        match (cases.value(), runs.value()) {
            (Some(cases), Some(runs)) => PageLoad::Ready(DashboardView {
                stats: DashboardStats::from_collections(cases, runs),
                recent_runs: recent_runs(runs, self.settings.runs.recent_runs),
            }),
            _ => PageLoad::Loading,
        }
    }

    /// Stats shown in the dashboard cards; zero unless fully loaded
    pub fn dashboard_stats(&self) -> DashboardStats {
        self.dashboard_view()
            .ready()
            .map(|v| v.stats)
            .unwrap_or_default()
    }

    /// Test cases matching the search term, in backend order
    pub fn visible_test_cases(&self) -> PageLoad<Vec<&TestCase>> {
        let term = self.test_cases_page.search.as_str();
        PageLoad::from_fetch(&self.cache.test_cases.state, |cases| {
            filter_test_cases(cases, term)
        })
    }

    pub fn selected_test_case(&self) -> Option<&TestCase> {
        match self.visible_test_cases() {
            PageLoad::Ready(cases) => cases.get(self.test_cases_page.selected).copied(),
            _ => None,
        }
    }

    /// Runs matching search and status filter, in backend order
    pub fn visible_test_runs(&self) -> PageLoad<Vec<&TestRun>> {
        let page = &self.test_runs_page;
        PageLoad::from_fetch(&self.cache.test_runs.state, |runs| {
            filter_test_runs(runs, &page.search, page.status_filter)
        })
    }

    /// Run under the cursor on the dashboard or the run list
    pub fn selected_run(&self) -> Option<&TestRun> {
        match self.route {
            Route::Dashboard => match self.dashboard_view() {
                PageLoad::Ready(view) => view.recent_runs.get(self.dashboard.selected),
                _ => None,
            },
            Route::TestRuns => match self.visible_test_runs() {
                PageLoad::Ready(runs) => runs.get(self.test_runs_page.selected).copied(),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn run_detail_view(&self, id: RunId) -> PageLoad<RunDetailView<'_>> {
        let Some(entry) = self.cache.run_detail(id) else {
            return PageLoad::Loading;
        };
        let filter = self.run_detail_page.severity_filter;
        PageLoad::from_fetch(&entry.state, |detail| RunDetailView {
            detail,
            results: filter_results(&detail.results, filter),
            histogram: SeverityHistogram::from_results(&detail.results),
            regressions: regression_count(&detail.results),
        })
    }

    /// Number of selectable rows on the current page
    pub fn list_len(&self) -> usize {
        match self.route {
            Route::Dashboard => self
                .dashboard_view()
                .ready()
                .map_or(0, |v| v.recent_runs.len()),
            Route::TestCases => self.visible_test_cases().ready().map_or(0, Vec::len),
            Route::TestRuns => self.visible_test_runs().ready().map_or(0, Vec::len),
            Route::TestRunDetail(id) => self
                .run_detail_view(id)
                .ready()
                .map_or(0, |v| v.results.len()),
        }
    }

    /// Mutable selection index for the current page
    pub fn selection_mut(&mut self) -> &mut usize {
        match self.route {
            Route::Dashboard => &mut self.dashboard.selected,
            Route::TestCases => &mut self.test_cases_page.selected,
            Route::TestRuns => &mut self.test_runs_page.selected,
            Route::TestRunDetail(_) => &mut self.run_detail_page.selected,
        }
    }

    /// Search term of the current page, if it has a search box
    pub fn search_text(&self) -> Option<&str> {
        match self.route {
            Route::TestCases => Some(&self.test_cases_page.search),
            Route::TestRuns => Some(&self.test_runs_page.search),
            _ => None,
        }
    }

    pub fn search_text_mut(&mut self) -> Option<&mut String> {
        match self.route {
            Route::TestCases => Some(&mut self.test_cases_page.search),
            Route::TestRuns => Some(&mut self.test_runs_page.search),
            _ => None,
        }
    }

    /// Whether any resource of the current page is being fetched
    pub fn is_page_loading(&self) -> bool {
        self.route
            .required_resources()
            .into_iter()
            .any(|key| self.cache.is_loading(key))
    }
}
