//! Message processing: runs the TEA update loop and dispatches actions

use canary_api::Backend;
use tokio::sync::{mpsc, watch};

use crate::actions::{handle_action, FetchTaskMap};
use crate::handler;
use crate::message::Message;
use crate::state::AppState;

/// Process a message through the TEA update function, following up
/// messages until the chain ends
pub fn process_message<B>(
    state: &mut AppState,
    message: Message,
    backend: &B,
    msg_tx: &mpsc::Sender<Message>,
    fetch_tasks: &FetchTaskMap,
    shutdown_rx: &watch::Receiver<bool>,
) where
    B: Backend + Clone + Send + Sync + 'static,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(
                action,
                backend,
                msg_tx.clone(),
                fetch_tasks,
                shutdown_rx.clone(),
            );
        }

        msg = result.message;
    }
}
