//! Configuration types for Canary
//!
//! Defines `Settings` and one sub-struct per TOML table.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Application settings (`.canary/config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub cache: CacheSettings,

    #[serde(default)]
    pub runs: RunSettings,

    #[serde(default)]
    pub ui: UiSettings,
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ApiSettings {
    /// Backend origin, e.g. `http://localhost:8000`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path prefix shared by every endpoint
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Send `DELETE /test-cases/{id}` when a delete is confirmed.
    /// The reference backend has no such endpoint.
    #[serde(default)]
    pub enable_delete: bool,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            prefix: default_prefix(),
            timeout_secs: default_timeout_secs(),
            enable_delete: false,
        }
    }
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_prefix() -> String {
    "/api/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Resource cache tuning
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CacheSettings {
    /// Ready entries older than this are refetched on page entry
    #[serde(default = "default_max_age_secs")]
    pub max_age_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            max_age_secs: default_max_age_secs(),
        }
    }
}

impl CacheSettings {
    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_secs)
    }
}

fn default_max_age_secs() -> u64 {
    60
}

/// Test-run triggering and listing
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RunSettings {
    /// Branch reported when a run is triggered from the dashboard
    #[serde(default = "default_branch")]
    pub default_branch: String,

    /// Number of runs listed on the dashboard
    #[serde(default = "default_recent_runs")]
    pub recent_runs: usize,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            default_branch: default_branch(),
            recent_runs: default_recent_runs(),
        }
    }
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_recent_runs() -> usize {
    5
}

/// Display settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UiSettings {
    #[serde(default = "default_true")]
    pub show_timestamps: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            show_timestamps: true,
        }
    }
}

fn default_true() -> bool {
    true
}
