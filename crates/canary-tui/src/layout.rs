//! Screen layout definitions for the TUI
//!
//! The main screen is a navigation sidebar beside the page, with a one-line
//! status bar along the bottom. Narrow terminals drop the sidebar.

use ratatui::layout::{Constraint, Layout, Rect};

/// Sidebar width when shown
pub const SIDEBAR_WIDTH: u16 = 24;

/// Terminals narrower than this hide the sidebar
pub const MIN_WIDTH_FOR_SIDEBAR: u16 = 60;

/// Page header height (border + title + subtitle + border)
const HEADER_HEIGHT: u16 = 4;

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Navigation sidebar; zero width on narrow terminals
    pub sidebar: Rect,

    /// Page title and subtitle
    pub header: Rect,

    /// Page content
    pub body: Rect,

    /// Status bar (keybinding hints and transient messages)
    pub status: Rect,
}

impl ScreenAreas {
    pub fn has_sidebar(&self) -> bool {
        self.sidebar.width > 0
    }
}

/// Split the terminal into the main screen areas
pub fn create(area: Rect) -> ScreenAreas {
    let [main, status] = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(area);

    let sidebar_width = if area.width >= MIN_WIDTH_FOR_SIDEBAR {
        SIDEBAR_WIDTH
    } else {
        0
    };
    let [sidebar, page] =
        Layout::horizontal([Constraint::Length(sidebar_width), Constraint::Min(0)]).areas(main);

    let [header, body] =
        Layout::vertical([Constraint::Length(HEADER_HEIGHT), Constraint::Min(0)]).areas(page);

    ScreenAreas {
        sidebar,
        header,
        body,
        status,
    }
}
