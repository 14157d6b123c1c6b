//! Backend operations and the request/response shapes they exchange
//!
//! [`Backend`] is the seam between the application layer and the HTTP
//! service. The engine only needs something that implements it, which is
//! how tests swap in the in-memory mock.

use serde::{Deserialize, Serialize};

use canary_core::prelude::*;
use canary_core::{RunDetail, RunId, TestCase, TestCaseDraft, TestCaseId, TestRun};

/// Query parameters for `POST /test-runs/execute`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteRunRequest {
    pub run_name: String,
    pub git_commit: String,
    pub git_branch: String,
}

impl ExecuteRunRequest {
    /// Build a request whose commit is `<prefix>-<unix millis>`
    pub fn stamped(run_name: &str, commit_prefix: &str, branch: &str) -> Self {
        Self {
            run_name: run_name.to_string(),
            git_commit: format!(
                "{}-{}",
                commit_prefix,
                chrono::Utc::now().timestamp_millis()
            ),
            git_branch: branch.to_string(),
        }
    }

    /// The request the dashboard's "Run Tests" button sends
    pub fn quick(branch: &str) -> Self {
        Self::stamped("Quick Test Run", "dashboard", branch)
    }

    /// The request the run list's "Execute Test Run" button sends
    pub fn manual(branch: &str) -> Self {
        Self::stamped("Manual Test Run", "manual", branch)
    }
}

/// Acknowledgement returned once a run has been started
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteRunResponse {
    #[serde(default)]
    pub test_run_id: Option<RunId>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub total_tests: Option<u32>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ExecuteRunResponse {
    /// One-line summary for the status bar
    pub fn summary(&self) -> String {
        match (&self.message, self.test_run_id) {
            (Some(msg), _) => msg.clone(),
            (None, Some(id)) => format!("Test run {} started", id),
            (None, None) => "Test run started".to_string(),
        }
    }
}

/// `GET /test-cases/` payload.
///
/// The page expects `{ "test_cases": [...] }` while the reference backend
/// returns a bare array; both are accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TestCaseList {
    Wrapped { test_cases: Vec<TestCase> },
    Bare(Vec<TestCase>),
}

impl TestCaseList {
    pub fn into_vec(self) -> Vec<TestCase> {
        match self {
            TestCaseList::Wrapped { test_cases } => test_cases,
            TestCaseList::Bare(cases) => cases,
        }
    }
}

/// Operations the dashboard performs against the regression backend
#[trait_variant::make(Backend: Send)]
pub trait LocalBackend {
    /// `GET /test-cases/`
    async fn list_test_cases(&self) -> Result<Vec<TestCase>>;

    /// `POST /test-cases/`
    async fn create_test_case(&self, draft: &TestCaseDraft) -> Result<TestCase>;

    /// `PUT /test-cases/{id}`
    async fn update_test_case(&self, id: TestCaseId, draft: &TestCaseDraft) -> Result<TestCase>;

    /// `DELETE /test-cases/{id}`
    async fn delete_test_case(&self, id: TestCaseId) -> Result<()>;

    /// `GET /test-runs/`
    async fn list_test_runs(&self) -> Result<Vec<TestRun>>;

    /// `POST /test-runs/execute`
    async fn execute_run(&self, request: &ExecuteRunRequest) -> Result<ExecuteRunResponse>;

    /// `GET /test-runs/{id}/results`
    async fn run_detail(&self, id: RunId) -> Result<RunDetail>;
}
