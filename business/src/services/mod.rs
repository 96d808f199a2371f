//! Typed wrappers around the backend endpoints.
//!
//! Every method makes exactly one gateway call. Failures are logged here and returned
//! unchanged; deciding what to show is the caller's job.

mod auth;
mod static_data;
mod stats;
mod users;

pub use auth::{AUTH_FALLBACK, AuthService};
pub use static_data::{STATIC_DATA_FALLBACK, StaticDataService};
pub use stats::{STATS_FALLBACK, StatsService};
pub use users::{USERS_FALLBACK, UserService};
