//! Page routing
//!
//! Each page is addressed by a path, mirroring the web front-end's URLs so
//! `--route /test-runs/12` opens the same view a bookmark would.

use std::fmt;

use canary_core::RunId;

use crate::cache::ResourceKey;

/// The page currently occupying the content area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Dashboard,
    TestCases,
    TestRuns,
    TestRunDetail(RunId),
}

impl Route {
    /// Top-level pages listed in the side navigation, in order
    pub const NAV: [Route; 3] = [Route::Dashboard, Route::TestCases, Route::TestRuns];

    /// Resolve a path. Unknown paths fall back to the dashboard.
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim().trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Dashboard,
            ["test-cases"] => Route::TestCases,
            ["test-runs"] => Route::TestRuns,
            ["test-runs", id] => match id.parse::<RunId>() {
                Ok(id) => Route::TestRunDetail(id),
                Err(_) => Route::TestRuns,
            },
            _ => Route::Dashboard,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Dashboard => "/".to_string(),
            Route::TestCases => "/test-cases".to_string(),
            Route::TestRuns => "/test-runs".to_string(),
            Route::TestRunDetail(id) => format!("/test-runs/{}", id),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::TestCases => "Test Cases",
            Route::TestRuns => "Test Runs",
            Route::TestRunDetail(_) => "Test Run",
        }
    }

    /// Navigation entry highlighted while this route is active
    pub fn nav_index(&self) -> usize {
        match self {
            Route::Dashboard => 0,
            Route::TestCases => 1,
            Route::TestRuns | Route::TestRunDetail(_) => 2,
        }
    }

    pub fn next_nav(&self) -> Route {
        Self::NAV[(self.nav_index() + 1) % Self::NAV.len()]
    }

    pub fn prev_nav(&self) -> Route {
        Self::NAV[(self.nav_index() + Self::NAV.len() - 1) % Self::NAV.len()]
    }

    /// Backend resources this page renders
    pub fn required_resources(&self) -> Vec<ResourceKey> {
        match self {
            Route::Dashboard => vec![ResourceKey::TestCases, ResourceKey::TestRuns],
            Route::TestCases => vec![ResourceKey::TestCases],
            Route::TestRuns => vec![ResourceKey::TestRuns],
            Route::TestRunDetail(id) => vec![ResourceKey::RunDetail(*id)],
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
