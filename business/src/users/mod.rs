//! User-management tab: paginated table, details modal and create modal.

mod controller;
mod state;

pub use controller::UserListController;
pub use state::{CreateFormState, DetailView, UserListPage, UsersViewState};
