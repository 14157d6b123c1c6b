//! Domain types mirrored from the regression-testing backend
//!
//! The backend owns every entity. These are ephemeral, non-authoritative
//! copies that a page holds after fetching them.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

/// Decode JSON `null` as the type's default value.
///
/// The backend leaves several columns nullable (counts, names, labels) and
/// the dashboard treats a null the same as a missing value.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_true<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

fn default_true() -> bool {
    true
}

// ─────────────────────────────────────────────────────────────────────────────
// Identifiers
// ─────────────────────────────────────────────────────────────────────────────

/// Backend identity of a test case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestCaseId(pub i64);

impl fmt::Display for TestCaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Backend identity of a test run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub i64);

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RunId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().parse().map(RunId)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Cases
// ─────────────────────────────────────────────────────────────────────────────

/// Test case category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Factual,
    Creative,
    Safety,
    Format,
    #[serde(other)]
    Other,
}

impl Category {
    /// All categories in form order
    pub const ALL: [Category; 5] = [
        Category::Factual,
        Category::Creative,
        Category::Safety,
        Category::Format,
        Category::Other,
    ];

    /// Wire value (`"factual"`, `"creative"`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Factual => "factual",
            Category::Creative => "creative",
            Category::Safety => "safety",
            Category::Format => "format",
            Category::Other => "other",
        }
    }

    /// Human-readable label used in the form selector
    pub fn label(&self) -> &'static str {
        match self {
            Category::Factual => "Factual",
            Category::Creative => "Creative",
            Category::Safety => "Safety",
            Category::Format => "Format",
            Category::Other => "Other",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A regression fixture: a prompt plus the behavior expected from the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub id: TestCaseId,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub input_prompt: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub expected_behavior: String,

    #[serde(default)]
    pub category: Option<Category>,

    #[serde(default = "default_true", deserialize_with = "null_as_true")]
    pub is_active: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl TestCase {
    /// Description text, empty when the backend sent none
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Case-insensitive substring match against name OR description.
    ///
    /// An empty term matches every case.
    pub fn matches_search(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.description_text().to_lowercase().contains(&needle)
    }
}

/// Form payload for creating or updating a test case.
///
/// Submitted verbatim as the JSON body of `POST /test-cases/` and
/// `PUT /test-cases/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCaseDraft {
    pub name: String,
    pub description: String,
    pub input_prompt: String,
    pub expected_behavior: String,
    pub category: Category,
    pub is_active: bool,
}

impl Default for TestCaseDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            input_prompt: String::new(),
            expected_behavior: String::new(),
            category: Category::Factual,
            is_active: true,
        }
    }
}

impl TestCaseDraft {
    /// Pre-populate a draft from an existing record (edit flow)
    pub fn from_case(case: &TestCase) -> Self {
        Self {
            name: case.name.clone(),
            description: case.description_text().to_string(),
            input_prompt: case.input_prompt.clone(),
            expected_behavior: case.expected_behavior.clone(),
            category: case.category.unwrap_or_default(),
            is_active: case.is_active,
        }
    }

    /// Labels of required fields that are still empty, in form order
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.is_empty() {
            missing.push("Name");
        }
        if self.input_prompt.is_empty() {
            missing.push("Input Prompt");
        }
        if self.expected_behavior.is_empty() {
            missing.push("Expected Behavior");
        }
        missing
    }

    /// Reject the draft if a required field is empty
    pub fn validate(&self) -> Result<()> {
        match self.missing_fields().first() {
            Some(field) => Err(Error::missing_field(*field)),
            None => Ok(()),
        }
    }

    /// Build the record the backend would return after a create
    pub fn into_case(self, id: TestCaseId) -> TestCase {
        TestCase {
            id,
            name: self.name,
            description: Some(self.description),
            input_prompt: self.input_prompt,
            expected_behavior: self.expected_behavior,
            category: Some(self.category),
            is_active: self.is_active,
            created_at: None,
            updated_at: None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Runs
// ─────────────────────────────────────────────────────────────────────────────

/// Lifecycle state of a test run (transitions happen server-side)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Running,
    Completed,
    Failed,
    #[default]
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Running => "running",
            RunStatus::Completed => "completed",
            RunStatus::Failed => "failed",
            RunStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One execution of the active test-case set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRun {
    pub id: RunId,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub status: RunStatus,

    #[serde(default, deserialize_with = "null_as_default")]
    pub total_tests: u32,

    #[serde(default, deserialize_with = "null_as_default")]
    pub passed_tests: u32,

    #[serde(default, deserialize_with = "null_as_default")]
    pub failed_tests: u32,

    #[serde(default)]
    pub total_cost: Option<f64>,

    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,

    #[serde(default)]
    pub git_commit: Option<String>,

    #[serde(default)]
    pub git_branch: Option<String>,
}

impl TestRun {
    /// Case-insensitive substring match on the run name
    pub fn matches_search(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(&term.to_lowercase())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Results
// ─────────────────────────────────────────────────────────────────────────────

/// Judge's categorical severity for a detected behavior change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLabel {
    Critical,
    High,
    Medium,
    Low,
    None,
    /// Label missing or not recognized
    #[default]
    #[serde(other)]
    Unknown,
}

impl SeverityLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityLabel::Critical => "critical",
            SeverityLabel::High => "high",
            SeverityLabel::Medium => "medium",
            SeverityLabel::Low => "low",
            SeverityLabel::None => "none",
            SeverityLabel::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SeverityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Judge verdict for one test case within a run (read-only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub id: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_run_id: Option<RunId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_case_id: Option<TestCaseId>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub severity_label: SeverityLabel,

    /// Fraction in `[0, 1]`; higher is more severe
    #[serde(default)]
    pub severity_score: Option<f64>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub is_regression: bool,

    #[serde(default)]
    pub change_type: Option<String>,

    #[serde(default)]
    pub reasoning: Option<String>,

    #[serde(default)]
    pub judge_cost: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Server-computed aggregates sent alongside run results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    #[serde(default)]
    pub severity_counts: std::collections::BTreeMap<String, usize>,

    #[serde(default)]
    pub regression_count: usize,
}

/// `GET /test-runs/{id}/results` payload: run metadata plus its results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunDetail {
    pub test_run: TestRun,

    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<TestResult>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<RunSummary>,
}
