//! Task identity and cooperative cancellation.
//!
//! - `TaskId`: identifies one spawned request by the kind of work that issued it and a
//!   generation counter.
//! - `TaskHandle`: a `TaskId` plus the `CancellationToken` the task listens on.
//! - `TaskSlot`: "latest wins" bookkeeping for one kind of work. Starting a new task in a
//!   slot cancels the previous one, and results can be checked against the slot to drop
//!   responses that arrive after they were superseded.

use std::any::TypeId;
use std::future::Future;

use log::debug;
use tokio_util::sync::CancellationToken;

/// Unique identifier for a spawned task.
///
/// Two ids with the same `type_id` come from the same kind of work; the higher
/// generation was issued later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId {
    type_id: TypeId,
    generation: u64,
}

impl TaskId {
    pub fn new(type_id: TypeId, generation: u64) -> Self {
        Self {
            type_id,
            generation,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Handle to a spawned async task with cooperative cancellation support.
///
/// Cancelling does not abort anything by itself: the task has to observe the token,
/// usually through [`run_cancellable`].
#[derive(Debug, Clone)]
pub struct TaskHandle {
    id: TaskId,
    cancel_token: CancellationToken,
}

impl TaskHandle {
    pub fn new(id: TaskId, cancel_token: CancellationToken) -> Self {
        Self { id, cancel_token }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Returns a clone of the cancellation token to move into the async work.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}

/// Tracks the single live task for one kind of work.
#[derive(Debug)]
pub struct TaskSlot {
    type_id: TypeId,
    generation: u64,
    current: Option<TaskHandle>,
}

impl TaskSlot {
    /// Creates a slot for work identified by `K`.
    pub fn of<K: 'static>() -> Self {
        Self {
            type_id: TypeId::of::<K>(),
            generation: 0,
            current: None,
        }
    }

    /// Issues a new task id, cancelling whichever task currently owns the slot.
    pub fn begin(&mut self) -> TaskHandle {
        if let Some(previous) = self.current.take() {
            debug!(
                "superseding task generation {} with {}",
                previous.id().generation(),
                self.generation + 1
            );
            previous.cancel();
        }

        self.generation += 1;
        let handle = TaskHandle::new(
            TaskId::new(self.type_id, self.generation),
            CancellationToken::new(),
        );
        self.current = Some(handle.clone());
        handle
    }

    /// Returns true if `id` is the task that currently owns the slot.
    pub fn is_current(&self, id: TaskId) -> bool {
        self.current.as_ref().is_some_and(|handle| handle.id() == id)
    }

    /// Releases the slot if `id` still owns it. Returns whether it did.
    pub fn finish(&mut self, id: TaskId) -> bool {
        if self.is_current(id) {
            self.current = None;
            true
        } else {
            false
        }
    }

    /// Cancels the running task, if any, and empties the slot.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.current.take() {
            handle.cancel();
        }
    }

    pub fn current(&self) -> Option<TaskId> {
        self.current.as_ref().map(TaskHandle::id)
    }

    pub fn is_busy(&self) -> bool {
        self.current.is_some()
    }
}

/// Runs `work` until it completes or `token` is cancelled.
///
/// Returns `None` when cancellation won the race.
pub async fn run_cancellable<F>(token: CancellationToken, work: F) -> Option<F::Output>
where
    F: Future,
{
    tokio::select! {
        biased;
        () = token.cancelled() => None,
        output = work => Some(output),
    }
}
