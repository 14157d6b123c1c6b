//! Custom widget components

mod badges;
mod confirm_dialog;
mod dashboard;
mod empty_state;
pub mod modal_overlay;
mod page_header;
mod run_detail;
mod search_input;
mod sidebar;
mod stat_card;
mod status_bar;
mod test_case_form;
mod test_cases;
mod test_runs;
pub mod text;

pub use confirm_dialog::ConfirmDialog;
pub use dashboard::Dashboard;
pub use empty_state::EmptyState;
pub use page_header::PageHeader;
pub use run_detail::RunDetailPage;
pub use search_input::SearchInput;
pub use sidebar::Sidebar;
pub use stat_card::StatCard;
pub use status_bar::StatusBar;
pub use test_case_form::TestCaseFormModal;
pub use test_cases::TestCasesPage;
pub use test_runs::TestRunsPage;
