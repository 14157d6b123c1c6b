//! Client-side filtering and aggregation over fetched collections
//!
//! Every function here is pure: it takes the last-fetched snapshot and
//! produces a derived view without touching the backend.

use crate::types::{RunStatus, SeverityLabel, TestCase, TestResult, TestRun};

// ─────────────────────────────────────────────────────────────────────────────
// Test case search
// ─────────────────────────────────────────────────────────────────────────────

/// Test cases whose name or description contains `term` (case-insensitive).
///
/// Order is preserved; an empty term returns the whole list.
pub fn filter_test_cases<'a>(cases: &'a [TestCase], term: &str) -> Vec<&'a TestCase> {
    cases.iter().filter(|c| c.matches_search(term)).collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Run status filter
// ─────────────────────────────────────────────────────────────────────────────

/// Status dropdown on the test runs page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Running,
    Completed,
    Failed,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 4] = [
        StatusFilter::All,
        StatusFilter::Running,
        StatusFilter::Completed,
        StatusFilter::Failed,
    ];

    pub fn matches(&self, status: RunStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Running => status == RunStatus::Running,
            StatusFilter::Completed => status == RunStatus::Completed,
            StatusFilter::Failed => status == RunStatus::Failed,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All Status",
            StatusFilter::Running => "Running",
            StatusFilter::Completed => "Completed",
            StatusFilter::Failed => "Failed",
        }
    }

    /// Next option in dropdown order, wrapping
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

/// Runs whose name contains `term` AND whose status passes `status`
pub fn filter_test_runs<'a>(
    runs: &'a [TestRun],
    term: &str,
    status: StatusFilter,
) -> Vec<&'a TestRun> {
    runs.iter()
        .filter(|r| r.matches_search(term) && status.matches(r.status))
        .collect()
}

/// The first `limit` runs in backend order (most recent first)
pub fn recent_runs(runs: &[TestRun], limit: usize) -> &[TestRun] {
    &runs[..runs.len().min(limit)]
}

// ─────────────────────────────────────────────────────────────────────────────
// Severity filter
// ─────────────────────────────────────────────────────────────────────────────

/// Severity dropdown on the run detail page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeverityFilter {
    #[default]
    All,
    Only(SeverityLabel),
}

impl SeverityFilter {
    /// Dropdown options, in display order
    pub const OPTIONS: [SeverityFilter; 6] = [
        SeverityFilter::All,
        SeverityFilter::Only(SeverityLabel::Critical),
        SeverityFilter::Only(SeverityLabel::High),
        SeverityFilter::Only(SeverityLabel::Medium),
        SeverityFilter::Only(SeverityLabel::Low),
        SeverityFilter::Only(SeverityLabel::None),
    ];

    pub fn matches(&self, label: SeverityLabel) -> bool {
        match self {
            SeverityFilter::All => true,
            SeverityFilter::Only(wanted) => *wanted == label,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SeverityFilter::All => "all",
            SeverityFilter::Only(l) => l.as_str(),
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::OPTIONS.iter().position(|f| *f == self).unwrap_or(0);
        Self::OPTIONS[(idx + 1) % Self::OPTIONS.len()]
    }

    pub fn prev(self) -> Self {
        let len = Self::OPTIONS.len();
        let idx = Self::OPTIONS.iter().position(|f| *f == self).unwrap_or(0);
        Self::OPTIONS[(idx + len - 1) % len]
    }
}

/// Results whose label passes `filter`, order preserved
pub fn filter_results(results: &[TestResult], filter: SeverityFilter) -> Vec<&TestResult> {
    results
        .iter()
        .filter(|r| filter.matches(r.severity_label))
        .collect()
}

/// Number of results flagged as regressions
pub fn regression_count(results: &[TestResult]) -> usize {
    results.iter().filter(|r| r.is_regression).count()
}

// ─────────────────────────────────────────────────────────────────────────────
// Severity histogram
// ─────────────────────────────────────────────────────────────────────────────

/// Per-label counts over a run's full result set.
///
/// Labels appear in the order they were first seen. The histogram is always
/// computed from unfiltered results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeverityHistogram {
    buckets: Vec<(SeverityLabel, usize)>,
}

impl SeverityHistogram {
    pub fn from_results(results: &[TestResult]) -> Self {
        let mut buckets: Vec<(SeverityLabel, usize)> = Vec::new();
        for result in results {
            match buckets.iter_mut().find(|(l, _)| *l == result.severity_label) {
                Some((_, count)) => *count += 1,
                None => buckets.push((result.severity_label, 1)),
            }
        }
        Self { buckets }
    }

    pub fn count(&self, label: SeverityLabel) -> usize {
        self.buckets
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SeverityLabel, usize)> + '_ {
        self.buckets.iter().copied()
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().map(|(_, c)| c).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Dashboard stats
// ─────────────────────────────────────────────────────────────────────────────

/// Headline figures on the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct DashboardStats {
    pub total_test_cases: usize,
    pub total_test_runs: usize,
    pub passed_tests: u64,
    pub failed_tests: u64,
}

impl DashboardStats {
    /// Sum pass/fail counts over every run.
    ///
    /// Counts missing from the backend were already decoded as zero.
    pub fn from_collections(cases: &[TestCase], runs: &[TestRun]) -> Self {
        Self {
            total_test_cases: cases.len(),
            total_test_runs: runs.len(),
            passed_tests: runs.iter().map(|r| u64::from(r.passed_tests)).sum(),
            failed_tests: runs.iter().map(|r| u64::from(r.failed_tests)).sum(),
        }
    }
}
