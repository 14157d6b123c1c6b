//! One-shot dashboard load for headless mode

use canary_api::Backend;
use canary_core::{recent_runs, DashboardStats, Result, TestRun};
use serde::Serialize;
use tracing::info;

/// Dashboard snapshot printed by `--headless`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub stats: DashboardStats,
    pub recent_runs: Vec<TestRun>,
}

/// Fetch both collections concurrently and derive the dashboard.
///
/// Fails if either request fails.
pub async fn load_dashboard<B: Backend>(backend: &B, recent: usize) -> Result<DashboardSummary> {
    let (cases, runs) = tokio::try_join!(backend.list_test_cases(), backend.list_test_runs())?;
    info!(
        "Loaded dashboard: {} test cases, {} test runs",
        cases.len(),
        runs.len()
    );
    Ok(DashboardSummary {
        stats: DashboardStats::from_collections(&cases, &runs),
        recent_runs: recent_runs(&runs, recent).to_vec(),
    })
}
