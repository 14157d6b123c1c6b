//! Engine - shared orchestration state for the TUI and headless runners
//!
//! The Engine owns the TEA state, the message channel, the in-flight fetch
//! task map, the shutdown signal and the backend handle.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use canary_api::Backend;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::actions::FetchTaskMap;
use crate::config::Settings;
use crate::message::Message;
use crate::process;
use crate::route::Route;
use crate::signals;
use crate::state::AppState;

/// How long shutdown waits for each in-flight fetch to stop
const TASK_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(2);

/// Orchestration engine for Canary.
///
/// Encapsulates everything shared between the TUI and headless runners:
/// - TEA state management
/// - Message channel
/// - Fetch task tracking
/// - Shutdown signaling
pub struct Engine<B> {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the unified message channel.
    /// Clone this to give to input sources (signal handler, key poller).
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the unified message channel.
    pub msg_rx: mpsc::Receiver<Message>,

    /// In-flight fetch tasks keyed by resource
    pub fetch_tasks: FetchTaskMap,

    /// Sender for the shutdown signal. Send `true` to initiate shutdown.
    pub shutdown_tx: watch::Sender<bool>,

    /// Receiver for the shutdown signal. Clone for background tasks.
    pub shutdown_rx: watch::Receiver<bool>,

    backend: B,
}

impl<B> Engine<B>
where
    B: Backend + Clone + Send + Sync + 'static,
{
    /// Create a new Engine.
    ///
    /// Must be called inside a tokio runtime (spawns the signal handler).
    pub fn new(settings: Settings, backend: B) -> Self {
        let state = AppState::with_settings(settings);

        let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let fetch_tasks: FetchTaskMap = Arc::new(std::sync::Mutex::new(HashMap::new()));

        signals::spawn_signal_handler(msg_tx.clone(), shutdown_rx.clone());

        Self {
            state,
            msg_tx,
            msg_rx,
            fetch_tasks,
            shutdown_tx,
            shutdown_rx,
            backend,
        }
    }

    /// Open the initial page and start its fetches
    pub fn start(&mut self, route: Route) {
        info!("Starting at {}", route);
        self.process_message(Message::NavigateTo(route));
    }

    /// Process a single message through the TEA update cycle.
    pub fn process_message(&mut self, msg: Message) {
        process::process_message(
            &mut self.state,
            msg,
            &self.backend,
            &self.msg_tx,
            &self.fetch_tasks,
            &self.shutdown_rx,
        );
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Returns the number of messages processed. Used by the TUI runner
    /// which needs to drain all pending messages before rendering.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Wait for the next message and process it.
    ///
    /// Returns `false` once the channel is closed.
    pub async fn process_next(&mut self) -> bool {
        match self.msg_rx.recv().await {
            Some(msg) => {
                self.process_message(msg);
                true
            }
            None => false,
        }
    }

    /// Check if the application should quit.
    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    /// Number of fetches still running
    pub fn in_flight_fetches(&self) -> usize {
        match self.fetch_tasks.lock() {
            Ok(guard) => guard.values().filter(|h| !h.is_finished()).count(),
            Err(_) => 0,
        }
    }

    /// Signal background tasks to stop and wait for tracked fetches.
    pub async fn shutdown(&mut self) {
        let _ = self.shutdown_tx.send(true);

        let tasks: Vec<_> = match self.fetch_tasks.lock() {
            Ok(mut map) => map.drain().collect(),
            Err(e) => {
                warn!("Fetch tasks could not be drained (poisoned lock): {}", e);
                Vec::new()
            }
        };

        for (key, handle) in tasks {
            match tokio::time::timeout(TASK_SHUTDOWN_TIMEOUT, handle).await {
                Ok(Ok(())) => debug!("Fetch of {} stopped", key),
                Ok(Err(e)) if e.is_cancelled() => debug!("Fetch of {} was aborted", key),
                Ok(Err(e)) => warn!("Fetch of {} panicked: {}", key, e),
                Err(_) => warn!("Fetch of {} did not stop in time", key),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ResourceKey;
    use canary_api::test_utils::{test_case, MockBackend};

    fn engine(backend: MockBackend) -> Engine<MockBackend> {
        Engine::new(Settings::default(), backend)
    }

    #[tokio::test]
    async fn test_engine_new() {
        let engine = engine(MockBackend::new());
        assert!(!engine.should_quit());
        assert_eq!(engine.state.route, Route::Dashboard);
    }

    #[tokio::test]
    async fn test_drain_empty_channel() {
        let mut engine = engine(MockBackend::new());
        assert_eq!(engine.drain_pending_messages(), 0);
    }

    #[tokio::test]
    async fn test_process_quit() {
        let mut engine = engine(MockBackend::new());
        engine.process_message(Message::Quit);
        assert!(engine.should_quit());
    }

    #[tokio::test]
    async fn test_start_fetches_and_resolves_page() {
        let backend = MockBackend::new().with_cases(vec![test_case(1, "a")]);
        let mut engine = engine(backend.clone());
        engine.start(Route::TestCases);
        assert!(engine.state.cache.is_loading(ResourceKey::TestCases));

        assert!(engine.process_next().await);
        assert_eq!(
            engine.state.cache.test_cases.state.value().map(Vec::len),
            Some(1)
        );
        assert_eq!(backend.call_count("list_test_cases"), 1);
    }

    #[tokio::test]
    async fn test_shutdown_clears_tasks() {
        let mut engine = engine(MockBackend::new());
        engine.start(Route::Dashboard);
        engine.shutdown().await;
        assert_eq!(engine.in_flight_fetches(), 0);
        assert!(*engine.shutdown_rx.borrow());
    }
}
