//! Configuration file parsing for Canary
//!
//! Supports:
//! - `.canary/config.toml` - Project-local settings
//! - `<config_dir>/canary/config.toml` - Per-user settings
//! - `CANARY_API_URL` - Backend URL override

pub mod settings;
pub mod types;

pub use settings::{
    apply_api_url, apply_env_overrides, config_search_paths, init_config, load_settings,
    load_settings_from, API_URL_ENV,
};
pub use types::*;
