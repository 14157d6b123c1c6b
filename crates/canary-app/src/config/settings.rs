//! Settings loading, overrides, and default config generation

use std::path::{Path, PathBuf};

use canary_core::prelude::*;

use super::types::Settings;

const CONFIG_FILENAME: &str = "config.toml";
const CANARY_DIR: &str = ".canary";
const APP_DIR: &str = "canary";

/// Environment variable that overrides `api.base_url`
pub const API_URL_ENV: &str = "CANARY_API_URL";

const DEFAULT_CONFIG: &str = r#"# Canary Configuration

[api]
base_url = "http://localhost:8000"
prefix = "/api/v1"
timeout_secs = 30
# The reference backend has no DELETE endpoint; enable only if yours does
enable_delete = false

[cache]
max_age_secs = 60       # Ready entries older than this are refetched on page entry

[runs]
default_branch = "main" # Branch reported for runs triggered from Canary
recent_runs = 5         # Runs listed on the dashboard

[ui]
show_timestamps = true
"#;

/// Candidate config files in priority order.
///
/// The project-local `.canary/config.toml` wins over the user's
/// `<config_dir>/canary/config.toml`.
pub fn config_search_paths(project_path: &Path) -> Vec<PathBuf> {
    let mut paths = vec![project_path.join(CANARY_DIR).join(CONFIG_FILENAME)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join(APP_DIR).join(CONFIG_FILENAME));
    }
    paths
}

/// Load settings from the first config file that exists
pub fn load_settings(project_path: &Path) -> Settings {
    load_settings_from(&config_search_paths(project_path))
}

/// Load settings from the first existing path in `paths`.
///
/// A file that fails to read or parse yields defaults rather than falling
/// through to the next candidate.
pub fn load_settings_from(paths: &[PathBuf]) -> Settings {
    let Some(config_path) = paths.iter().find(|p| p.exists()) else {
        debug!("No config file found in {:?}, using defaults", paths);
        return Settings::default();
    };

    match std::fs::read_to_string(config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Apply the `CANARY_API_URL` override, if set and non-empty
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(url) = std::env::var(API_URL_ENV) {
        apply_api_url(settings, Some(&url));
    }
}

/// Replace `api.base_url` when `url` is present and non-blank
pub fn apply_api_url(settings: &mut Settings, url: Option<&str>) {
    if let Some(url) = url.map(str::trim).filter(|u| !u.is_empty()) {
        debug!("Overriding backend URL: {}", url);
        settings.api.base_url = url.to_string();
    }
}

/// Write a commented default `.canary/config.toml`.
///
/// Returns the path of the config file. An existing file is left untouched.
pub fn init_config(project_path: &Path) -> Result<PathBuf> {
    let canary_dir = project_path.join(CANARY_DIR);

    if !canary_dir.exists() {
        std::fs::create_dir_all(&canary_dir)
            .map_err(|e| Error::config(format!("Failed to create .canary dir: {}", e)))?;
    }

    let config_path = canary_dir.join(CONFIG_FILENAME);
    if config_path.exists() {
        info!("Config already exists at {:?}", config_path);
        return Ok(config_path);
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .map_err(|e| Error::config(format!("Failed to write config.toml: {}", e)))?;
    info!("Wrote default config to {:?}", config_path);
    Ok(config_path)
}
