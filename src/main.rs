//! Canary - a terminal dashboard for LLM regression testing
//!
//! This is the binary entry point. Pages, state and rendering live in the
//! workspace crates.

mod headless;

use std::path::{Path, PathBuf};

use canary_api::ApiClient;
use canary_app::config::{self, Settings};
use canary_app::Route;
use canary_core::prelude::*;
use clap::Parser;

/// Canary - a terminal dashboard for LLM regression testing
#[derive(Parser, Debug)]
#[command(name = "canary")]
#[command(about = "A terminal dashboard for LLM regression testing", long_about = None)]
struct Args {
    /// Backend origin, e.g. http://localhost:8000 (overrides config and CANARY_API_URL)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Initial page: /, /test-cases, /test-runs or /test-runs/<id>
    #[arg(long, value_name = "PATH", default_value = "/")]
    route: String,

    /// Print a JSON dashboard summary and exit (no TUI)
    #[arg(long)]
    headless: bool,

    /// Write a default .canary/config.toml in the current directory and exit
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    color_eyre::install().map_err(|e| Error::terminal(e.to_string()))?;
    let _log_guard = canary_core::logging::init()?;

    let project_path = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    if args.init_config {
        let path = config::init_config(&project_path)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let settings = resolve_settings(&project_path, args.api_url.as_deref());
    let client = ApiClient::new(
        &settings.api.base_url,
        &settings.api.prefix,
        settings.api.timeout(),
    )?;

    info!("═══════════════════════════════════════════════════════");
    info!("Canary {} starting", env!("CARGO_PKG_VERSION"));
    info!("Backend: {}", client.root());
    info!("═══════════════════════════════════════════════════════");

    let result = if args.headless {
        let label = client.root().to_string();
        headless::run(&settings, &client, &label).await
    } else {
        canary_tui::run(settings, client, Route::from_path(&args.route)).await
    };

    if let Err(ref e) = result {
        error!("Canary exited with error: {}", e);
    }
    info!("Canary exiting");
    result
}

/// Config files, then `CANARY_API_URL`, then `--api-url`
fn resolve_settings(project_path: &Path, api_url: Option<&str>) -> Settings {
    let mut settings = config::load_settings(project_path);
    config::apply_env_overrides(&mut settings);
    config::apply_api_url(&mut settings, api_url);
    settings
}
