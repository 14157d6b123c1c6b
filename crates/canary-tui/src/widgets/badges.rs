//! Inline badges for statuses, severities, and flags

use canary_core::{Category, RunStatus, SeverityLabel};
use ratatui::text::Span;

use crate::theme::styles;

pub fn run_status(status: RunStatus) -> Span<'static> {
    Span::styled(format!("[{}]", status.as_str()), styles::run_status_badge(status))
}

pub fn severity(label: SeverityLabel) -> Span<'static> {
    Span::styled(format!("[{}]", label.as_str()), styles::severity_badge(label))
}

pub fn regression(is_regression: bool) -> Span<'static> {
    let text = if is_regression {
        "Regression"
    } else {
        "No Regression"
    };
    Span::styled(text, styles::regression_badge(is_regression))
}

pub fn active(is_active: bool) -> Span<'static> {
    let text = if is_active { "Active" } else { "Inactive" };
    Span::styled(text, styles::active_badge(is_active))
}

/// Category label; records without one show `-`
pub fn category(category: Option<Category>) -> Span<'static> {
    match category {
        Some(c) => Span::styled(c.label(), styles::accent()),
        None => Span::styled("-", styles::text_muted()),
    }
}
