//! Confirm dialog state.
//!
//! Data model for confirmation dialogs. The rendering widget
//! lives in canary-tui's widgets/confirm_dialog.rs.

use canary_core::TestCaseId;

use crate::message::Message;

#[derive(Debug, Clone)]
pub struct ConfirmDialogState {
    pub title: String,
    pub message: String,
    /// Sent when the user confirms
    pub on_confirm: Message,
}

impl ConfirmDialogState {
    pub fn new(title: impl Into<String>, message: impl Into<String>, on_confirm: Message) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            on_confirm,
        }
    }

    /// "Delete test case?" prompt
    pub fn delete_test_case(id: TestCaseId, name: &str) -> Self {
        Self::new(
            "Delete Test Case?",
            format!("Are you sure you want to delete \"{}\"?", name),
            Message::DeleteTestCase(id),
        )
    }
}
