//! canary-app - Application state and orchestration for Canary
//!
//! This crate implements the TEA (The Elm Architecture) pattern for state management,
//! the Engine abstraction for shared orchestration, the resource cache that backs
//! every page, and configuration loading.

pub mod actions;
pub mod cache;
pub mod config;
pub mod confirm_dialog;
pub mod engine;
pub mod form;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod pages;
pub mod process;
pub mod route;
pub mod signals;
pub mod state;
pub mod summary;

// Re-export primary types
pub use cache::{FetchState, ResourceCache, ResourceKey};
pub use engine::Engine;
pub use handler::{FetchRequest, Task, UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::{Message, RunOrigin};
pub use route::Route;
pub use state::{AppState, UiMode};
pub use summary::{load_dashboard, DashboardSummary};
