//! Resource cache with generation-based staleness
//!
//! Every backend collection (or run detail) a page renders lives in one
//! [`CacheEntry`]. Starting a fetch stamps the entry with a fresh
//! generation; a completion is only applied when its generation still
//! matches, so results from aborted or superseded requests are dropped.

use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

use canary_core::{RunDetail, RunId, TestCase, TestRun};

/// Cache identity of one backend collection or detail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKey {
    TestCases,
    TestRuns,
    RunDetail(RunId),
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKey::TestCases => write!(f, "test-cases"),
            ResourceKey::TestRuns => write!(f, "test-runs"),
            ResourceKey::RunDetail(id) => write!(f, "test-run-{}", id),
        }
    }
}

/// Lifecycle of one fetched resource
#[derive(Debug, Clone)]
pub enum FetchState<T> {
    /// Never requested
    Idle,
    /// Request in flight; `previous` keeps the last value visible meanwhile
    Loading { previous: Option<T> },
    Ready { value: T, fetched_at: Instant },
    Failed { error: String },
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Idle
    }
}

impl<T> FetchState<T> {
    /// Last known value, including one being refreshed
    pub fn value(&self) -> Option<&T> {
        match self {
            FetchState::Ready { value, .. } => Some(value),
            FetchState::Loading { previous } => previous.as_ref(),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed { error } => Some(error),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading { .. })
    }

    /// Loading with nothing to show yet
    pub fn is_initial_load(&self) -> bool {
        matches!(self, FetchState::Loading { previous: None })
    }
}

/// One cached resource plus its request bookkeeping
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub state: FetchState<T>,
    /// Generation of the most recent request
    pub generation: u64,
    /// Set by a mutation; forces a refetch on next page entry
    pub stale: bool,
}

impl<T> Default for CacheEntry<T> {
    fn default() -> Self {
        Self {
            state: FetchState::Idle,
            generation: 0,
            stale: false,
        }
    }
}

impl<T> CacheEntry<T> {
    /// Whether page entry should issue a request for this entry
    pub fn needs_fetch(&self, now: Instant, max_age: Duration) -> bool {
        match &self.state {
            FetchState::Idle | FetchState::Failed { .. } => true,
            FetchState::Loading { .. } => false,
            FetchState::Ready { fetched_at, .. } => {
                self.stale || now.saturating_duration_since(*fetched_at) >= max_age
            }
        }
    }

    fn begin(&mut self, generation: u64) {
        let previous = match std::mem::take(&mut self.state) {
            FetchState::Ready { value, .. } => Some(value),
            FetchState::Loading { previous } => previous,
            FetchState::Idle | FetchState::Failed { .. } => None,
        };
        self.state = FetchState::Loading { previous };
        self.generation = generation;
        self.stale = false;
    }

    /// Apply a completion. Returns `false` (and changes nothing) when the
    /// result belongs to a request that is no longer current.
    fn resolve(&mut self, generation: u64, result: Result<T, String>, now: Instant) -> bool {
        if generation != self.generation || !self.state.is_loading() {
            return false;
        }
        self.state = match result {
            Ok(value) => FetchState::Ready {
                value,
                fetched_at: now,
            },
            Err(error) => FetchState::Failed { error },
        };
        true
    }

    /// Abandon the in-flight request, keeping any previous value
    fn cancel(&mut self, now: Instant) {
        if !self.state.is_loading() {
            return;
        }
        if let FetchState::Loading { previous } = std::mem::take(&mut self.state) {
            self.state = match previous {
                Some(value) => {
                    self.stale = true;
                    FetchState::Ready {
                        value,
                        fetched_at: now,
                    }
                }
                None => FetchState::Idle,
            };
        }
    }
}

/// All resources fetched from the backend, keyed by [`ResourceKey`]
#[derive(Debug, Clone)]
pub struct ResourceCache {
    pub test_cases: CacheEntry<Vec<TestCase>>,
    pub test_runs: CacheEntry<Vec<TestRun>>,
    pub run_details: HashMap<RunId, CacheEntry<RunDetail>>,
    max_age: Duration,
    next_generation: u64,
}

impl Default for ResourceCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(60))
    }
}

impl ResourceCache {
    pub fn new(max_age: Duration) -> Self {
        Self {
            test_cases: CacheEntry::default(),
            test_runs: CacheEntry::default(),
            run_details: HashMap::new(),
            max_age,
            next_generation: 0,
        }
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    pub fn run_detail(&self, id: RunId) -> Option<&CacheEntry<RunDetail>> {
        self.run_details.get(&id)
    }

    /// Whether `key` is idle, failed, stale, or older than the max age
    pub fn needs_fetch(&self, key: ResourceKey, now: Instant) -> bool {
        match key {
            ResourceKey::TestCases => self.test_cases.needs_fetch(now, self.max_age),
            ResourceKey::TestRuns => self.test_runs.needs_fetch(now, self.max_age),
            ResourceKey::RunDetail(id) => self
                .run_details
                .get(&id)
                .map_or(true, |e| e.needs_fetch(now, self.max_age)),
        }
    }

    pub fn is_loading(&self, key: ResourceKey) -> bool {
        match key {
            ResourceKey::TestCases => self.test_cases.state.is_loading(),
            ResourceKey::TestRuns => self.test_runs.state.is_loading(),
            ResourceKey::RunDetail(id) => self
                .run_details
                .get(&id)
                .is_some_and(|e| e.state.is_loading()),
        }
    }

    /// Mark `key` as loading under a new generation and return it
    pub fn begin(&mut self, key: ResourceKey) -> u64 {
        self.next_generation += 1;
        let generation = self.next_generation;
        match key {
            ResourceKey::TestCases => self.test_cases.begin(generation),
            ResourceKey::TestRuns => self.test_runs.begin(generation),
            ResourceKey::RunDetail(id) => self.run_details.entry(id).or_default().begin(generation),
        }
        generation
    }

    pub fn resolve_test_cases(
        &mut self,
        generation: u64,
        result: Result<Vec<TestCase>, String>,
        now: Instant,
    ) -> bool {
        self.test_cases.resolve(generation, result, now)
    }

    pub fn resolve_test_runs(
        &mut self,
        generation: u64,
        result: Result<Vec<TestRun>, String>,
        now: Instant,
    ) -> bool {
        self.test_runs.resolve(generation, result, now)
    }

    pub fn resolve_run_detail(
        &mut self,
        id: RunId,
        generation: u64,
        result: Result<RunDetail, String>,
        now: Instant,
    ) -> bool {
        match self.run_details.get_mut(&id) {
            Some(entry) => entry.resolve(generation, result, now),
            None => false,
        }
    }

    /// Abandon the in-flight request for `key`, if any.
    ///
    /// Returns whether a request was cancelled.
    pub fn cancel(&mut self, key: ResourceKey, now: Instant) -> bool {
        if !self.is_loading(key) {
            return false;
        }
        match key {
            ResourceKey::TestCases => self.test_cases.cancel(now),
            ResourceKey::TestRuns => self.test_runs.cancel(now),
            ResourceKey::RunDetail(id) => {
                if let Some(entry) = self.run_details.get_mut(&id) {
                    entry.cancel(now);
                }
            }
        }
        true
    }

    /// Drop a run detail entry. A late completion for it is then ignored.
    pub fn evict_run_detail(&mut self, id: RunId) {
        self.run_details.remove(&id);
    }

    /// Mark `key` stale so the next page entry refetches it
    pub fn invalidate(&mut self, key: ResourceKey) {
        match key {
            ResourceKey::TestCases => self.test_cases.stale = true,
            ResourceKey::TestRuns => self.test_runs.stale = true,
            ResourceKey::RunDetail(id) => {
                if let Some(entry) = self.run_details.get_mut(&id) {
                    entry.stale = true;
                }
            }
        }
    }
}
