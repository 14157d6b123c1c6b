//! Message types for the application (TEA pattern)

use canary_api::ExecuteRunResponse;
use canary_core::{RunDetail, RunId, TestCase, TestCaseId, TestRun};

use crate::input_key::InputKey;
use crate::route::Route;

/// Where a run was triggered from; decides the run name and commit prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOrigin {
    /// "Run Tests" on the dashboard
    Dashboard,
    /// "Execute Test Run" on the run list
    RunList,
}

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Tick event for periodic updates
    Tick,

    /// Quit (key binding)
    RequestQuit,

    /// Force quit (Ctrl+C, signal handler)
    Quit,

    // ─────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────
    /// Switch the content area to another page
    NavigateTo(Route),
    NextPage,
    PrevPage,
    /// Leave a detail page for its parent list
    GoBack,
    /// Fetch the current page's resources; `force` ignores freshness
    LoadPage { force: bool },

    // ─────────────────────────────────────────────────────────
    // Fetch Completions
    // ─────────────────────────────────────────────────────────
    TestCasesFetched {
        generation: u64,
        result: Result<Vec<TestCase>, String>,
    },
    TestRunsFetched {
        generation: u64,
        result: Result<Vec<TestRun>, String>,
    },
    RunDetailFetched {
        id: RunId,
        generation: u64,
        result: Result<RunDetail, String>,
    },

    // ─────────────────────────────────────────────────────────
    // List Selection & Filters
    // ─────────────────────────────────────────────────────────
    SelectNext,
    SelectPrevious,
    /// Enter on the selected row
    OpenSelected,
    StartSearch,
    /// Search text changed (whole text)
    SearchInput { text: String },
    /// Leave search input mode, keeping the term
    EndSearch,
    /// Leave search input mode and clear the term
    ClearSearch,
    CycleStatusFilter,
    CycleSeverityFilter { forward: bool },

    // ─────────────────────────────────────────────────────────
    // Test Case Form
    // ─────────────────────────────────────────────────────────
    OpenCreateForm,
    /// Edit the selected test case
    OpenEditForm,
    FormChar(char),
    FormBackspace,
    FormClearField,
    FormNextField,
    FormPrevField,
    FormCycleOption { forward: bool },
    /// Enter: advance, or submit from the last field
    FormEnter,
    SubmitForm,
    CancelForm,
    TestCaseSaved {
        created: bool,
        result: Result<TestCase, String>,
    },

    // ─────────────────────────────────────────────────────────
    // Delete Confirmation
    // ─────────────────────────────────────────────────────────
    /// Ask to delete the selected test case
    RequestDelete,
    ConfirmDialogAccept,
    ConfirmDialogCancel,
    /// Confirmed deletion
    DeleteTestCase(TestCaseId),
    TestCaseDeleted {
        id: TestCaseId,
        result: Result<(), String>,
    },

    // ─────────────────────────────────────────────────────────
    // Test Run Execution
    // ─────────────────────────────────────────────────────────
    ExecuteRun(RunOrigin),
    RunExecuted {
        result: Result<ExecuteRunResponse, String>,
    },
}
