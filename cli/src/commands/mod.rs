//! Command implementations for the `sphere-admin` CLI.
//!
//! Each subcommand group is implemented in its own module.

pub mod completions;
pub mod login;
pub mod open;
pub mod roles;
pub mod stats;
pub mod users;

pub use completions::generate_completions;
pub use login::{run_login, run_logout, run_whoami};
pub use open::run_open;
pub use roles::run_roles;
pub use stats::run_stats;
pub use users::{run_users_browse, run_users_create, run_users_list, run_users_view};
