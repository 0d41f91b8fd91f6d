//! Task lifecycle helpers.

use std::fmt::Display;

use tokio::sync::mpsc;
use tracing::error;

use crate::sequence::{pipe, Sequence};

/// Relay `input` through a queue holding up to `size` values, so a slow
/// consumer does not immediately stall the producer.
pub fn buffered<T>(mut input: Sequence<T>, size: usize) -> Sequence<T>
where
    T: Send + 'static,
{
    let (tx, rx) = mpsc::channel(size.max(1));

    tokio::spawn(async move {
        pipe(&mut input, &tx).await;
    });

    rx
}

/// Consume and discard a sequence until it terminates.
pub async fn drain<T>(mut input: Sequence<T>) {
    while input.recv().await.is_some() {}
}

/// Drain a sequence on a detached task.
pub fn spawn_drain<T>(input: Sequence<T>)
where
    T: Send + 'static,
{
    tokio::spawn(drain(input));
}

/// Join barrier over any number of guarded tasks.
///
/// Each [`WaitGuard`] handed out holds the barrier open; [`WaitGroup::wait`]
/// resolves once every guard has been dropped.
#[derive(Debug)]
pub struct WaitGroup {
    tx: mpsc::Sender<()>,
    rx: mpsc::Receiver<()>,
}

/// Keeps a [`WaitGroup`] open until dropped.
#[derive(Debug, Clone)]
pub struct WaitGuard {
    _tx: mpsc::Sender<()>,
}

impl WaitGroup {
    /// Create a barrier with no guards.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(1);
        Self { tx, rx }
    }

    /// Register one more task with the barrier.
    pub fn guard(&self) -> WaitGuard {
        WaitGuard {
            _tx: self.tx.clone(),
        }
    }

    /// Wait until every guard has been dropped.
    pub async fn wait(self) {
        let Self { tx, mut rx } = self;
        drop(tx);
        // Guards never send, so this only returns once all of them are gone.
        while rx.recv().await.is_some() {}
    }
}

impl Default for WaitGroup {
    fn default() -> Self {
        Self::new()
    }
}

/// Relay `input` while holding a slot in `group`.
///
/// The slot is released exactly once, after the relay finished: either the
/// wrapped sequence terminated or the consumer went away.
pub fn waitable<T>(group: &WaitGroup, mut input: Sequence<T>) -> Sequence<T>
where
    T: Send + 'static,
{
    let guard = group.guard();
    let (tx, rx) = crate::sequence::channel();

    tokio::spawn(async move {
        pipe(&mut input, &tx).await;
        drop(tx);
        drop(guard);
    });

    rx
}

/// Log a failed close of a scoped resource instead of propagating it.
pub fn close_and_log_error<E: Display>(resource: &str, result: Result<(), E>) {
    if let Err(e) = result {
        error!(resource, error = %e, "Failed to close resource");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::{from_vec, to_vec};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_buffered_gives_slack() {
        let (tx, rx) = mpsc::channel::<i32>(1);
        let output = buffered(rx, 5);

        // The producer gets well ahead of a consumer that has not started.
        for i in 0..5 {
            tx.send(i).await.unwrap();
        }
        drop(tx);

        assert_eq!(to_vec(output).await, vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_drain() {
        let (tx, rx) = mpsc::channel::<i32>(1);
        let producer = tokio::spawn(async move {
            for i in 0..10 {
                tx.send(i).await.unwrap();
            }
        });

        drain(rx).await;
        producer.await.unwrap();
    }

    #[tokio::test]
    async fn test_waitable_releases_after_relay() {
        let group = WaitGroup::new();
        let relayed = Arc::new(AtomicBool::new(false));

        let output = waitable(&group, from_vec(vec![1, 2, 3]));
        let flag = relayed.clone();
        let consumer = tokio::spawn(async move {
            let values = to_vec(output).await;
            flag.store(true, Ordering::SeqCst);
            values
        });

        group.wait().await;
        assert_eq!(consumer.await.unwrap(), vec![1, 2, 3]);
        assert!(relayed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_wait_group_without_guards() {
        WaitGroup::new().wait().await;
    }

    #[tokio::test]
    async fn test_wait_group_multiple_waitables() {
        let group = WaitGroup::new();
        let a = waitable(&group, from_vec(vec![1, 2]));
        let b = waitable(&group, from_vec(vec![3]));

        let (a, b) = tokio::join!(to_vec(a), to_vec(b));
        group.wait().await;

        assert_eq!(a, vec![1, 2]);
        assert_eq!(b, vec![3]);
    }

    #[test]
    fn test_close_and_log_error() {
        close_and_log_error::<std::io::Error>("ok", Ok(()));
        close_and_log_error("broken", Err(std::io::Error::other("disk full")));
    }
}
