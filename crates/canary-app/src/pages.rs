//! Per-page UI state (selection, search terms, filters)
//!
//! Fetched data lives in [`crate::cache::ResourceCache`]; these structs only
//! hold what the user has typed or selected on each page.

use std::time::{Duration, Instant};

use canary_core::{SeverityFilter, StatusFilter};

use crate::cache::FetchState;

/// How long a status bar message stays visible
pub const STATUS_TTL: Duration = Duration::from_secs(6);

/// Render-ready load state of a page
#[derive(Debug, Clone, PartialEq)]
pub enum PageLoad<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> PageLoad<T> {
    /// Collapse a fetch state. A refresh in progress keeps showing the
    /// previous value.
    pub fn from_fetch<'a, S>(state: &'a FetchState<S>, f: impl FnOnce(&'a S) -> T) -> Self {
        match state {
            FetchState::Failed { error } => PageLoad::Failed(error.clone()),
            other => match other.value() {
                Some(value) => PageLoad::Ready(f(value)),
                None => PageLoad::Loading,
            },
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, PageLoad::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            PageLoad::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            PageLoad::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Move a selection index by one within `len` rows, clamping at the ends
pub fn step_selection(selected: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (selected + 1).min(len - 1)
    } else {
        selected.saturating_sub(1)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardPage {
    /// Selected row in the recent runs list
    pub selected: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestCasesPage {
    pub search: String,
    pub selected: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestRunsPage {
    pub search: String,
    pub status_filter: StatusFilter,
    pub selected: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunDetailPage {
    pub severity_filter: SeverityFilter,
    pub selected: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// Transient status bar message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    pub shown_at: Instant,
}

impl StatusMessage {
    pub fn new(kind: StatusKind, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind,
            shown_at: Instant::now(),
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= STATUS_TTL
    }
}
