//! Test utilities: an in-memory backend and fixture builders
//!
//! Available to other crates through the `test-helpers` feature.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use canary_core::prelude::*;
use canary_core::{
    Category, RunDetail, RunId, RunStatus, SeverityLabel, TestCase, TestCaseDraft, TestCaseId,
    TestResult, TestRun,
};

use crate::backend::{Backend, ExecuteRunRequest, ExecuteRunResponse};

/// Creates an active test case with placeholder prompt text.
pub fn test_case(id: i64, name: &str) -> TestCase {
    TestCase {
        id: TestCaseId(id),
        name: name.to_string(),
        description: None,
        input_prompt: format!("prompt for {}", name),
        expected_behavior: format!("behavior for {}", name),
        category: Some(Category::Factual),
        is_active: true,
        created_at: None,
        updated_at: None,
    }
}

/// Creates a run with the given counts.
pub fn test_run(id: i64, name: &str, status: RunStatus, passed: u32, failed: u32) -> TestRun {
    TestRun {
        id: RunId(id),
        name: name.to_string(),
        status,
        total_tests: passed + failed,
        passed_tests: passed,
        failed_tests: failed,
        total_cost: None,
        created_at: Some("2024-05-01T10:00:00".to_string()),
        completed_at: None,
        git_commit: Some(format!("commit{:08}", id)),
        git_branch: Some("main".to_string()),
    }
}

/// Creates a judge result with the given label.
pub fn test_result(id: i64, label: SeverityLabel, regression: bool) -> TestResult {
    TestResult {
        id,
        test_run_id: None,
        test_case_id: Some(TestCaseId(id)),
        severity_label: label,
        severity_score: Some(0.5),
        is_regression: regression,
        change_type: Some("semantic".to_string()),
        reasoning: Some(format!("reasoning {}", id)),
        judge_cost: Some(0.001),
        created_at: None,
    }
}

#[derive(Debug, Default)]
struct MockState {
    cases: Vec<TestCase>,
    runs: Vec<TestRun>,
    details: HashMap<RunId, RunDetail>,
    next_case_id: i64,
    next_run_id: i64,
    failure: Option<(u16, String)>,
    calls: Vec<String>,
}

/// In-memory [`Backend`] that behaves like the reference service.
///
/// Clones share state, so a test can hold one handle while the engine
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cases(self, cases: Vec<TestCase>) -> Self {
        {
            let mut state = self.lock();
            state.next_case_id = cases.iter().map(|c| c.id.0).max().unwrap_or(0);
            state.cases = cases;
        }
        self
    }

    pub fn with_runs(self, runs: Vec<TestRun>) -> Self {
        {
            let mut state = self.lock();
            state.next_run_id = runs.iter().map(|r| r.id.0).max().unwrap_or(0);
            state.runs = runs;
        }
        self
    }

    pub fn with_results(self, run: RunId, results: Vec<TestResult>) -> Self {
        {
            let mut state = self.lock();
            if let Some(test_run) = state.runs.iter().find(|r| r.id == run).cloned() {
                state.details.insert(
                    run,
                    RunDetail {
                        test_run,
                        results,
                        summary: None,
                    },
                );
            }
        }
        self
    }

    /// Make every subsequent call fail with the given status
    pub fn fail_with(&self, status: u16, message: &str) {
        self.lock().failure = Some((status, message.to_string()));
    }

    pub fn clear_failure(&self) {
        self.lock().failure = None;
    }

    /// Names of the operations called so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self, op: &str) -> usize {
        self.lock().calls.iter().filter(|c| c.as_str() == op).count()
    }

    pub fn cases(&self) -> Vec<TestCase> {
        self.lock().cases.clone()
    }

    pub fn runs(&self) -> Vec<TestRun> {
        self.lock().runs.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Record the call and return the configured failure, if any
    fn begin(&self, op: &str) -> Result<MutexGuard<'_, MockState>> {
        let mut state = self.lock();
        state.calls.push(op.to_string());
        match &state.failure {
            Some((status, message)) => Err(Error::api(*status, message.clone())),
            None => Ok(state),
        }
    }
}

impl Backend for MockBackend {
    async fn list_test_cases(&self) -> Result<Vec<TestCase>> {
        let state = self.begin("list_test_cases")?;
        Ok(state.cases.clone())
    }

    async fn create_test_case(&self, draft: &TestCaseDraft) -> Result<TestCase> {
        let mut state = self.begin("create_test_case")?;
        state.next_case_id += 1;
        let case = draft.clone().into_case(TestCaseId(state.next_case_id));
        state.cases.push(case.clone());
        Ok(case)
    }

    async fn update_test_case(&self, id: TestCaseId, draft: &TestCaseDraft) -> Result<TestCase> {
        let mut state = self.begin("update_test_case")?;
        let slot = state
            .cases
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| Error::not_found(format!("Test case {}", id)))?;
        *slot = draft.clone().into_case(id);
        Ok(slot.clone())
    }

    async fn delete_test_case(&self, id: TestCaseId) -> Result<()> {
        let mut state = self.begin("delete_test_case")?;
        let before = state.cases.len();
        state.cases.retain(|c| c.id != id);
        if state.cases.len() == before {
            return Err(Error::not_found(format!("Test case {}", id)));
        }
        Ok(())
    }

    async fn list_test_runs(&self) -> Result<Vec<TestRun>> {
        let state = self.begin("list_test_runs")?;
        Ok(state.runs.clone())
    }

    async fn execute_run(&self, request: &ExecuteRunRequest) -> Result<ExecuteRunResponse> {
        let mut state = self.begin("execute_run")?;
        let active = state.cases.iter().filter(|c| c.is_active).count() as u32;
        if active == 0 {
            return Err(Error::api(400, "No active test cases found"));
        }

        state.next_run_id += 1;
        let id = RunId(state.next_run_id);
        let run = TestRun {
            id,
            name: request.run_name.clone(),
            status: RunStatus::Running,
            total_tests: active,
            passed_tests: 0,
            failed_tests: 0,
            total_cost: None,
            created_at: Some(chrono::Utc::now().naive_utc().to_string()),
            completed_at: None,
            git_commit: Some(request.git_commit.clone()),
            git_branch: Some(request.git_branch.clone()),
        };
        // Newest first, matching the backend's ordering
        state.runs.insert(0, run);

        Ok(ExecuteRunResponse {
            test_run_id: Some(id),
            status: Some("started".to_string()),
            total_tests: Some(active),
            message: Some("Test execution started in background".to_string()),
        })
    }

    async fn run_detail(&self, id: RunId) -> Result<RunDetail> {
        let state = self.begin("run_detail")?;
        if let Some(detail) = state.details.get(&id) {
            return Ok(detail.clone());
        }
        state
            .runs
            .iter()
            .find(|r| r.id == id)
            .map(|run| RunDetail {
                test_run: run.clone(),
                results: Vec::new(),
                summary: None,
            })
            .ok_or_else(|| Error::not_found(format!("Test run {}", id)))
    }
}
