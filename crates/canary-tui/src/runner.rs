//! Main TUI runner - entry point and event loop

use canary_api::Backend;
use canary_app::config::Settings;
use canary_app::{Engine, Route};
use canary_core::prelude::*;

use super::{event, render, terminal};

/// Run the TUI against `backend`, starting on `route`.
///
/// Restores the terminal and waits for in-flight fetches on the way out,
/// including when the loop fails.
pub async fn run<B>(settings: Settings, backend: B, route: Route) -> Result<()>
where
    B: Backend + Clone + Send + Sync + 'static,
{
    terminal::install_panic_hook();
    info!(
        "Starting TUI against {} (timeout {}s)",
        settings.api.base_url, settings.api.timeout_secs
    );

    let mut term = ratatui::init();
    let mut engine = Engine::new(settings, backend);
    engine.start(route);

    let result = run_loop(&mut term, &mut engine);
    if let Err(ref e) = result {
        error!("TUI loop failed: {}", e);
    }

    engine.shutdown().await;
    ratatui::restore();
    info!("TUI stopped");

    result
}

/// Drain → draw → poll until the state asks to quit
fn run_loop<B>(terminal: &mut ratatui::DefaultTerminal, engine: &mut Engine<B>) -> Result<()>
where
    B: Backend + Clone + Send + Sync + 'static,
{
    while !engine.should_quit() {
        // Fetch/mutation completions and signals
        engine.drain_pending_messages();

        terminal.draw(|frame| render::view(frame, &engine.state))?;

        if let Some(message) = event::poll()? {
            engine.process_message(message);
        }
    }

    Ok(())
}
