//! # canary-api - Backend Client
//!
//! Typed access to the regression-testing backend's REST API.
//!
//! Depends on [`canary_core`] for domain types and error handling.
//!
//! ## Public API
//!
//! ### Seam
//! - [`Backend`] / [`LocalBackend`] - Operations the application performs against the backend
//!
//! ### HTTP
//! - [`ApiClient`] - `reqwest` implementation with a configurable timeout and path prefix
//!
//! ### Wire Shapes
//! - [`ExecuteRunRequest`], [`ExecuteRunResponse`] - Trigger a run and read the acknowledgement
//! - [`TestCaseList`] - Accepts both the wrapped and bare list forms
//!
//! ### Testing (`test-helpers` feature)
//! - `MockBackend` - In-memory backend with failure injection and a call log

pub mod backend;
pub mod client;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use backend::{Backend, ExecuteRunRequest, ExecuteRunResponse, LocalBackend, TestCaseList};
pub use client::{ApiClient, DEFAULT_TIMEOUT};
