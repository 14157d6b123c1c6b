//! Headless mode - one-shot JSON dashboard summary
//!
//! Loads the dashboard once and prints NDJSON events to stdout, one per line:
//!
//! ```json
//! {"event":"dashboard","backend":"http://localhost:8000/api/v1","stats":{...},"recent_runs":[...],"timestamp":1704700001000}
//! {"event":"error","message":"Failed to connect to http://localhost:8000","fatal":true,"timestamp":1704700001000}
//! ```

use std::io::{self, Write};

use canary_api::Backend;
use canary_app::config::Settings;
use canary_app::{load_dashboard, DashboardSummary};
use canary_core::prelude::*;
use canary_core::{DashboardStats, TestRun};
use chrono::Utc;
use serde::Serialize;

/// Events emitted in headless mode
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// Dashboard loaded
    Dashboard {
        backend: String,
        stats: DashboardStats,
        recent_runs: Vec<TestRun>,
        timestamp: i64,
    },

    /// Loading failed
    Error {
        message: String,
        fatal: bool,
        timestamp: i64,
    },
}

impl HeadlessEvent {
    /// Emit this event to stdout as JSON
    pub fn emit(&self) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize headless event: {}", e);
                return;
            }
        };

        let mut stdout = io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", json) {
            error!("Failed to write headless event to stdout: {}", e);
            return;
        }
        if let Err(e) = stdout.flush() {
            error!("Failed to flush headless stdout: {}", e);
        }
    }

    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    pub fn dashboard(backend: &str, summary: DashboardSummary) -> Self {
        Self::Dashboard {
            backend: backend.to_string(),
            stats: summary.stats,
            recent_runs: summary.recent_runs,
            timestamp: Self::now(),
        }
    }

    pub fn error(err: &Error) -> Self {
        Self::Error {
            message: err.to_string(),
            fatal: err.is_fatal(),
            timestamp: Self::now(),
        }
    }
}

/// Load the dashboard from `backend` and print it.
///
/// A failed fetch is printed as an error event and returned, so the process
/// exits non-zero.
pub async fn run<B: Backend>(settings: &Settings, backend: &B, label: &str) -> Result<()> {
    info!("Headless dashboard load from {}", label);
    match load_dashboard(backend, settings.runs.recent_runs).await {
        Ok(summary) => {
            HeadlessEvent::dashboard(label, summary).emit();
            Ok(())
        }
        Err(e) => {
            error!("Headless dashboard load failed: {}", e);
            HeadlessEvent::error(&e).emit();
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canary_api::test_utils::{test_case, test_run, MockBackend};
    use canary_core::RunStatus;

    fn summary() -> DashboardSummary {
        let runs = vec![
            test_run(1, "Nightly", RunStatus::Completed, 8, 2),
            test_run(2, "Release gate", RunStatus::Failed, 3, 7),
        ];
        DashboardSummary {
            stats: DashboardStats::from_collections(&[test_case(1, "a")], &runs),
            recent_runs: runs,
        }
    }

    #[test]
    fn test_dashboard_event_shape() {
        let event = HeadlessEvent::dashboard("http://localhost:8000/api/v1", summary());
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "dashboard");
        assert_eq!(json["backend"], "http://localhost:8000/api/v1");
        assert_eq!(json["stats"]["total_test_cases"], 1);
        assert_eq!(json["stats"]["passed_tests"], 11);
        assert_eq!(json["stats"]["failed_tests"], 9);
        assert_eq!(json["recent_runs"][1]["name"], "Release gate");
        assert!(json["timestamp"].as_i64().unwrap() > 0);
    }

    #[test]
    fn test_error_event_shape() {
        let event = HeadlessEvent::error(&Error::api(503, "unavailable"));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "error");
        assert_eq!(json["message"], "Backend returned 503: unavailable");
        assert_eq!(json["fatal"], false);
    }

    #[tokio::test]
    async fn test_run_succeeds_against_backend() {
        let backend = MockBackend::new().with_cases(vec![test_case(1, "a")]);
        assert!(run(&Settings::default(), &backend, "mock").await.is_ok());
        assert_eq!(backend.call_count("list_test_runs"), 1);
    }

    #[tokio::test]
    async fn test_run_returns_fetch_error() {
        let backend = MockBackend::new();
        backend.fail_with(503, "unavailable");
        let err = run(&Settings::default(), &backend, "mock").await.unwrap_err();
        assert_eq!(err.status(), Some(503));
    }
}
