//! Async plumbing shared by the Sphere Admin view-state controllers.
//!
//! Controllers own their state and are driven from a single place (a UI frame loop or a
//! CLI command). Network work is spawned through an [`UpdateQueue`], tagged with a
//! [`TaskId`] from a [`TaskSlot`], and its result is applied back by the owner.

mod runtime;
mod task;
mod updater;

pub use runtime::spawn;
pub use task::{TaskHandle, TaskId, TaskSlot, run_cancellable};
pub use tokio_util::sync::CancellationToken;
pub use updater::{UpdateQueue, Updater};
