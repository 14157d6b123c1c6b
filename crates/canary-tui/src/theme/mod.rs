//! Centralized theme for the Canary TUI.
//!
//! - `palette` holds the raw color constants
//! - `styles` builds semantic styles (badges, borders, text) from them

pub mod palette;
pub mod styles;
