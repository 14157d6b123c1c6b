//! Ctrl+C / SIGTERM handling

use tokio::sync::{mpsc, watch};

use crate::message::Message;
use canary_core::prelude::*;

/// Listen for a termination signal and turn it into [`Message::Quit`].
///
/// The listener exits on its own once `shutdown_rx` flips, so an engine that
/// quit through the keyboard does not leave it behind.
pub fn spawn_signal_handler(tx: mpsc::Sender<Message>, mut shutdown_rx: watch::Receiver<bool>) {
    tokio::spawn(async move {
        let name = tokio::select! {
            signal = next_signal() => signal,
            _ = shutdown_rx.changed() => return,
        };

        match name {
            Ok(name) => {
                info!("Received {}, quitting", name);
                if tx.send(Message::Quit).await.is_err() {
                    debug!("Engine gone before {} could be delivered", name);
                }
            }
            Err(e) => warn!("Signal listener unavailable: {}", e),
        }
    });
}

#[cfg(unix)]
async fn next_signal() -> Result<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};

    let listen = |kind: SignalKind, name: &str| {
        signal(kind).map_err(|e| Error::terminal(format!("{} handler: {}", name, e)))
    };
    let mut interrupt = listen(SignalKind::interrupt(), "SIGINT")?;
    let mut terminate = listen(SignalKind::terminate(), "SIGTERM")?;

    Ok(tokio::select! {
        _ = interrupt.recv() => "SIGINT",
        _ = terminate.recv() => "SIGTERM",
    })
}

#[cfg(not(unix))]
async fn next_signal() -> Result<&'static str> {
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| Error::terminal(format!("Ctrl+C handler: {}", e)))?;
    Ok("Ctrl+C")
}
