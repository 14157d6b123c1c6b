//! Semantic style builders.

use canary_app::pages::StatusKind;
use canary_core::{RunStatus, SeverityLabel};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use super::palette;

// --- Text styles ---
pub fn text_primary() -> Style {
    Style::default().fg(palette::TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(palette::TEXT_SECONDARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

pub fn text_bright_bold() -> Style {
    Style::default()
        .fg(palette::TEXT_BRIGHT)
        .add_modifier(Modifier::BOLD)
}

// --- Border styles ---
pub fn border_inactive() -> Style {
    Style::default().fg(palette::BORDER_DIM)
}

pub fn border_active() -> Style {
    Style::default().fg(palette::BORDER_ACTIVE)
}

// --- Accent styles ---
pub fn accent() -> Style {
    Style::default().fg(palette::ACCENT)
}

pub fn accent_bold() -> Style {
    Style::default()
        .fg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

/// Black on yellow, used for the selected row and the active nav entry
pub fn focused_selected() -> Style {
    Style::default()
        .fg(palette::CONTRAST_FG)
        .bg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn keybinding() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

// --- Status styles ---
pub fn status_green() -> Style {
    Style::default().fg(palette::STATUS_GREEN)
}

pub fn status_red() -> Style {
    Style::default().fg(palette::STATUS_RED)
}

pub fn status_blue() -> Style {
    Style::default().fg(palette::STATUS_BLUE)
}

// --- Block builders ---
pub fn glass_block(focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            border_active()
        } else {
            border_inactive()
        })
}

pub fn modal_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .title_style(accent_bold())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_active())
        .style(Style::default().bg(palette::POPUP_BG))
}

// --- Badge mapping ---

/// Run status badge: completed green, running blue, failed red, anything else gray
pub fn run_status_badge(status: RunStatus) -> Style {
    let color = match status {
        RunStatus::Completed => palette::STATUS_GREEN,
        RunStatus::Running => palette::STATUS_BLUE,
        RunStatus::Failed => palette::STATUS_RED,
        RunStatus::Unknown => palette::STATUS_GRAY,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

pub fn severity_badge(label: SeverityLabel) -> Style {
    let color = match label {
        SeverityLabel::Critical => palette::STATUS_RED,
        SeverityLabel::High => palette::STATUS_ORANGE,
        SeverityLabel::Medium => palette::STATUS_YELLOW,
        SeverityLabel::Low => palette::STATUS_BLUE,
        SeverityLabel::None | SeverityLabel::Unknown => palette::STATUS_GRAY,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

pub fn regression_badge(is_regression: bool) -> Style {
    if is_regression {
        status_red().add_modifier(Modifier::BOLD)
    } else {
        status_green()
    }
}

pub fn active_badge(is_active: bool) -> Style {
    if is_active {
        status_green()
    } else {
        Style::default().fg(palette::STATUS_GRAY)
    }
}

/// Status bar message color by kind
pub fn status_message(kind: StatusKind) -> Style {
    match kind {
        StatusKind::Info => status_blue(),
        StatusKind::Success => status_green(),
        StatusKind::Error => status_red().add_modifier(Modifier::BOLD),
    }
}
