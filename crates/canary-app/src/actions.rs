//! Action handlers: UpdateAction dispatch and background task spawning

use std::collections::HashMap;
use std::sync::Arc;

use canary_api::Backend;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::ResourceKey;
use crate::handler::{FetchRequest, Task};
use crate::message::Message;
use crate::UpdateAction;

/// In-flight fetch tasks, one per resource key
pub type FetchTaskMap = Arc<std::sync::Mutex<HashMap<ResourceKey, JoinHandle<()>>>>;

/// Execute an action by spawning background tasks
pub fn handle_action<B>(
    action: UpdateAction,
    backend: &B,
    msg_tx: mpsc::Sender<Message>,
    fetch_tasks: &FetchTaskMap,
    shutdown_rx: watch::Receiver<bool>,
) where
    B: Backend + Clone + Send + Sync + 'static,
{
    match action {
        UpdateAction::Fetch(requests) => {
            for request in requests {
                spawn_fetch(
                    request,
                    backend.clone(),
                    msg_tx.clone(),
                    fetch_tasks,
                    shutdown_rx.clone(),
                );
            }
        }

        UpdateAction::CancelFetches(keys) => cancel_fetches(&keys, fetch_tasks),

        UpdateAction::SpawnTask(task) => {
            // Mutations are not tracked and run to completion
            let backend = backend.clone();
            tokio::spawn(async move {
                execute_task(task, &backend, msg_tx).await;
            });
        }
    }
}

/// Spawn one fetch, replacing (and aborting) any earlier fetch for the key
fn spawn_fetch<B>(
    request: FetchRequest,
    backend: B,
    msg_tx: mpsc::Sender<Message>,
    fetch_tasks: &FetchTaskMap,
    mut shutdown_rx: watch::Receiver<bool>,
) where
    B: Backend + Clone + Send + Sync + 'static,
{
    let FetchRequest { key, generation } = request;
    debug!("Fetching {} (generation {})", key, generation);

    let handle = tokio::spawn(async move {
        let msg = tokio::select! {
            msg = fetch_resource(&backend, request) => msg,
            _ = shutdown_rx.changed() => {
                debug!("Fetch of {} stopped by shutdown", key);
                return;
            }
        };
        if msg_tx.send(msg).await.is_err() {
            debug!("Message channel closed before {} fetch completed", key);
        }
    });

    match fetch_tasks.lock() {
        Ok(mut guard) => {
            guard.retain(|_, h| !h.is_finished());
            if let Some(previous) = guard.insert(key, handle) {
                previous.abort();
                debug!("Superseded in-flight fetch of {}", key);
            }
        }
        Err(e) => {
            warn!(
                "Fetch of {} could not be tracked (poisoned lock): {}",
                key, e
            );
        }
    }
}

/// Abort tracked fetches for `keys`
fn cancel_fetches(keys: &[ResourceKey], fetch_tasks: &FetchTaskMap) {
    match fetch_tasks.lock() {
        Ok(mut guard) => {
            for key in keys {
                if let Some(handle) = guard.remove(key) {
                    handle.abort();
                    debug!("Aborted fetch of {}", key);
                }
            }
        }
        Err(e) => warn!("Could not cancel fetches (poisoned lock): {}", e),
    }
}

/// Perform one fetch and wrap the outcome in its completion message
pub async fn fetch_resource<B: Backend>(backend: &B, request: FetchRequest) -> Message {
    let generation = request.generation;
    match request.key {
        ResourceKey::TestCases => Message::TestCasesFetched {
            generation,
            result: backend.list_test_cases().await.map_err(|e| e.to_string()),
        },
        ResourceKey::TestRuns => Message::TestRunsFetched {
            generation,
            result: backend.list_test_runs().await.map_err(|e| e.to_string()),
        },
        ResourceKey::RunDetail(id) => Message::RunDetailFetched {
            id,
            generation,
            result: backend.run_detail(id).await.map_err(|e| e.to_string()),
        },
    }
}

/// Execute a mutation and report its outcome
pub async fn execute_task<B: Backend>(task: Task, backend: &B, msg_tx: mpsc::Sender<Message>) {
    let msg = match task {
        Task::CreateTestCase(draft) => {
            info!("Creating test case {:?}", draft.name);
            Message::TestCaseSaved {
                created: true,
                result: backend
                    .create_test_case(&draft)
                    .await
                    .map_err(|e| e.to_string()),
            }
        }
        Task::UpdateTestCase { id, draft } => {
            info!("Updating test case {}", id);
            Message::TestCaseSaved {
                created: false,
                result: backend
                    .update_test_case(id, &draft)
                    .await
                    .map_err(|e| e.to_string()),
            }
        }
        Task::DeleteTestCase(id) => {
            info!("Deleting test case {}", id);
            Message::TestCaseDeleted {
                id,
                result: backend.delete_test_case(id).await.map_err(|e| e.to_string()),
            }
        }
        Task::ExecuteRun(request) => Message::RunExecuted {
            result: backend
                .execute_run(&request)
                .await
                .map_err(|e| e.to_string()),
        },
    };

    if msg_tx.send(msg).await.is_err() {
        debug!("Message channel closed before task completed");
    }
}
