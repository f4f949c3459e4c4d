//! UI Components
//!
//! Leptos components for the dashboard and list detail views.

mod api_toggle;
mod dashboard;
mod delete_confirm_button;
mod error_message;
mod list_card;
mod list_detail;
mod loading_spinner;
mod members_panel;
mod new_list_form;

pub use api_toggle::ApiToggle;
pub use dashboard::Dashboard;
pub use delete_confirm_button::DeleteConfirmButton;
pub use error_message::ErrorMessage;
pub use list_card::ListCard;
pub use list_detail::ListDetail;
pub use loading_spinner::LoadingSpinner;
pub use members_panel::MembersPanel;
pub use new_list_form::NewListForm;
