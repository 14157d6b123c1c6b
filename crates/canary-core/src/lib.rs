//! # canary-core - Core Domain Types
//!
//! Foundation crate for Canary. Provides the backend entity types, error
//! handling, logging setup, and the pure filtering/formatting helpers the
//! pages use to derive their views.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, chrono, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`TestCase`], [`TestCaseDraft`], [`Category`] - Regression fixtures and the form payload
//! - [`TestRun`], [`RunStatus`] - One execution of the active suite
//! - [`TestResult`], [`SeverityLabel`] - Judge verdicts
//! - [`RunDetail`], [`RunSummary`] - Run metadata plus its results
//!
//! ### Filtering (`filter`)
//! - [`filter_test_cases()`], [`filter_test_runs()`], [`filter_results()`]
//! - [`StatusFilter`], [`SeverityFilter`] - Dropdown states
//! - [`SeverityHistogram`] - First-seen-order label counts
//! - [`DashboardStats`] - Headline counts over all runs
//!
//! ### Formatting (`format`)
//! - [`format_cost()`], [`format_score()`], [`short_commit()`], [`format_timestamp()`]
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use canary_core::prelude::*;
//! ```

pub mod error;
pub mod filter;
pub mod format;
pub mod logging;
pub mod prelude;
pub mod types;

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result};
pub use filter::{
    filter_results, filter_test_cases, filter_test_runs, recent_runs, regression_count,
    DashboardStats, SeverityFilter, SeverityHistogram, StatusFilter,
};
pub use format::{
    format_cost, format_optional_timestamp, format_score, format_timestamp,
    short_commit,
};
pub use types::{
    Category, RunDetail, RunId, RunStatus, RunSummary, SeverityLabel, TestCase, TestCaseDraft,
    TestCaseId, TestResult, TestRun,
};
