//! UI Components
//!
//! Reusable Leptos components.

mod actions_menu;
mod add_record_button;
mod delete_confirm_button;
mod pager;
mod quotes_table;
mod record_form_modal;
mod record_table;
mod sidebar;
mod skeleton_rows;
mod toast_stack;

pub use actions_menu::ActionsMenu;
pub use add_record_button::AddRecordButton;
pub use delete_confirm_button::DeleteConfirmButton;
pub use pager::Pager;
pub use quotes_table::QuotesTable;
pub use record_form_modal::RecordFormModal;
pub use record_table::RecordTable;
pub use sidebar::Sidebar;
pub use skeleton_rows::SkeletonRows;
pub use toast_stack::ToastStack;
