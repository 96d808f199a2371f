//! Delivery of async results back to the owner of view state.
//!
//! View state has exactly one owner (the UI loop or a CLI command). Network work runs as
//! spawned tasks which must not touch that state directly; instead each task sends its
//! outcome through an [`Updater`] and the owner applies it when it drains the
//! [`UpdateQueue`], either once per frame (`try_next`) or by awaiting (`next`).

use std::future::Future;

use flume::{Receiver, Sender};
use log::warn;

use crate::runtime;

/// A queued value and whether it settles a spawned task.
#[derive(Debug)]
struct Delivery<T> {
    value: T,
    spawned: bool,
}

/// Sending half handed to spawned work.
#[derive(Debug)]
pub struct Updater<T> {
    send: Sender<Delivery<T>>,
    spawned: bool,
}

impl<T> Clone for Updater<T> {
    fn clone(&self) -> Self {
        Self {
            send: self.send.clone(),
            spawned: self.spawned,
        }
    }
}

impl<T> Updater<T> {
    /// Publishes a result. A dropped queue means nobody is interested any more.
    pub fn set(&self, value: T) {
        let delivery = Delivery {
            value,
            spawned: self.spawned,
        };
        if self.send.send(delivery).is_err() {
            warn!("update dropped: queue owner is gone");
        }
    }
}

/// Owner-side queue of finished work.
#[derive(Debug)]
pub struct UpdateQueue<T> {
    send: Sender<Delivery<T>>,
    recv: Receiver<Delivery<T>>,
    in_flight: usize,
}

impl<T> Default for UpdateQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> UpdateQueue<T> {
    pub fn new() -> Self {
        let (send, recv) = flume::unbounded();
        Self {
            send,
            recv,
            in_flight: 0,
        }
    }

    /// Returns an updater for pushing values from outside [`UpdateQueue::spawn`].
    ///
    /// Values pushed this way are delivered but not counted as in-flight work.
    pub fn updater(&self) -> Updater<T> {
        Updater {
            send: self.send.clone(),
            spawned: false,
        }
    }

    fn task_updater(&mut self) -> Updater<T> {
        self.in_flight += 1;
        Updater {
            send: self.send.clone(),
            spawned: true,
        }
    }

    fn take(&mut self, delivery: Delivery<T>) -> T {
        if delivery.spawned {
            self.in_flight = self.in_flight.saturating_sub(1);
        }
        delivery.value
    }

    /// Number of spawned tasks whose result has not been taken yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight == 0 && self.recv.is_empty()
    }

    /// Takes one finished result without waiting.
    pub fn try_next(&mut self) -> Option<T> {
        let delivery = self.recv.try_recv().ok()?;
        Some(self.take(delivery))
    }

    /// Waits for the next finished result.
    ///
    /// Returns `None` once nothing is queued and nothing is in flight.
    pub async fn next(&mut self) -> Option<T> {
        if let Some(value) = self.try_next() {
            return Some(value);
        }
        if self.in_flight == 0 {
            return None;
        }

        let delivery = self.recv.recv_async().await.ok()?;
        Some(self.take(delivery))
    }
}

impl<T> UpdateQueue<T>
where
    T: Send + 'static,
{
    /// Spawns `work`; its output is delivered through this queue.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn spawn<F>(&mut self, work: F)
    where
        F: Future<Output = T> + Send + 'static,
    {
        let updater = self.task_updater();
        runtime::spawn(async move {
            updater.set(work.await);
        });
    }

    /// Spawns `work`; its output is delivered through this queue.
    #[cfg(target_arch = "wasm32")]
    pub fn spawn<F>(&mut self, work: F)
    where
        F: Future<Output = T> + 'static,
    {
        let updater = self.task_updater();
        runtime::spawn(async move {
            updater.set(work.await);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn try_next_on_empty_queue_is_none() {
        let mut queue = UpdateQueue::<u32>::new();
        assert!(queue.try_next().is_none());
        assert!(queue.is_idle());
    }

    #[test]
    fn external_updates_are_delivered_but_not_counted() {
        let mut queue = UpdateQueue::new();
        queue.updater().set(5_u32);

        assert_eq!(queue.in_flight(), 0);
        assert!(!queue.is_idle());
        assert_eq!(queue.try_next(), Some(5));
        assert!(queue.is_idle());
    }

    #[tokio::test]
    async fn external_update_does_not_settle_spawned_work() {
        let mut queue = UpdateQueue::new();
        queue.updater().set(1_u8);
        queue.spawn(async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            2_u8
        });

        assert_eq!(queue.next().await, Some(1));
        assert_eq!(queue.in_flight(), 1);
        assert_eq!(queue.next().await, Some(2));
        assert_eq!(queue.in_flight(), 0);
        assert_eq!(queue.next().await, None);
    }

    #[tokio::test]
    async fn spawned_work_is_counted_until_taken() {
        let mut queue = UpdateQueue::new();
        queue.spawn(async { "done" });

        assert_eq!(queue.in_flight(), 1);
        assert_eq!(queue.next().await, Some("done"));
        assert_eq!(queue.in_flight(), 0);
        assert_eq!(queue.next().await, None);
    }

    #[tokio::test]
    async fn next_waits_for_slow_work() {
        let mut queue = UpdateQueue::new();
        queue.spawn(async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            1_u8
        });
        queue.spawn(async { 2_u8 });

        let mut seen = vec![
            queue.next().await.unwrap_or_default(),
            queue.next().await.unwrap_or_default(),
        ];
        seen.sort_unstable();

        assert_eq!(seen, vec![1, 2]);
        assert!(queue.is_idle());
    }
}
