//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers for UI modes
//! - `navigation`: Page switching and page-entry fetch planning
//! - `fetch`: Fetch completion handlers
//! - `mutations`: Form, delete and execute handlers

pub(crate) mod fetch;
pub(crate) mod keys;
pub(crate) mod mutations;
pub(crate) mod navigation;
pub(crate) mod update;

#[cfg(test)]
mod tests;

use canary_api::ExecuteRunRequest;
use canary_core::{TestCaseDraft, TestCaseId};

use crate::cache::ResourceKey;
use crate::message::Message;

// Re-export main entry point
pub use update::update;

#[cfg(test)]
pub(crate) use keys::handle_key;

/// One fetch to start, stamped with the cache generation it will resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub key: ResourceKey,
    pub generation: u64,
}

/// Actions that the event loop should perform after update
#[derive(Debug, Clone)]
pub enum UpdateAction {
    /// Start background fetches (one task per resource key)
    Fetch(Vec<FetchRequest>),

    /// Abort in-flight fetches the current page no longer needs
    CancelFetches(Vec<ResourceKey>),

    /// Spawn a background mutation
    SpawnTask(Task),
}

/// Background mutations to spawn
#[derive(Debug, Clone)]
pub enum Task {
    CreateTestCase(TestCaseDraft),
    UpdateTestCase {
        id: TestCaseId,
        draft: TestCaseDraft,
    },
    DeleteTestCase(TestCaseId),
    ExecuteRun(ExecuteRunRequest),
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }

    pub fn with_message(mut self, msg: Message) -> Self {
        self.message = Some(msg);
        self
    }
}
