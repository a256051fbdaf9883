//! Shared wake-up signal for waits between assertion checks.

use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Notify;

/// A handle that cuts the pause between two assertion checks short.
///
/// Producers that change the state under test can call
/// [`notify_all`](WaitSignal::notify_all) to wake every waiter bound to this
/// signal, so the assertions are re-evaluated right away instead of after the
/// full check interval.
///
/// Clones share the same underlying signal.
///
/// # Example
///
/// ```rust
/// use assertkit_async::clock::WaitSignal;
///
/// let signal = WaitSignal::new();
/// let producer = signal.clone();
/// assert!(producer.ptr_eq(&signal));
///
/// // nobody waits yet, so this is a no-op
/// producer.notify_all();
/// ```
#[derive(Debug, Clone, Default)]
pub struct WaitSignal {
    inner: Arc<SignalInner>,
}

#[derive(Debug, Default)]
struct SignalInner {
    /// Bumped on every notification
    generation: Mutex<u64>,
    condvar: Condvar,
    notify: Notify,
}

impl WaitSignal {
    /// Creates a new signal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wakes all threads and tasks currently waiting on this signal.
    pub fn notify_all(&self) {
        {
            let mut generation = self.inner.generation.lock();
            *generation = generation.wrapping_add(1);
            self.inner.condvar.notify_all();
        }
        self.inner.notify.notify_waiters();
    }

    /// Returns `true` if both handles refer to the same signal.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Blocks until notified or until `timeout` passes.
    ///
    /// Returns `true` when woken by a notification.
    pub(crate) fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now().checked_add(timeout);
        let mut generation = self.inner.generation.lock();
        let start = *generation;
        while *generation == start {
            let Some(deadline) = deadline else {
                // beyond the representable range: only a notification ends the wait
                self.inner.condvar.wait(&mut generation);
                continue;
            };
            if self
                .inner
                .condvar
                .wait_until(&mut generation, deadline)
                .timed_out()
            {
                return *generation != start;
            }
        }
        true
    }

    /// Resolves on the next notification.
    pub(crate) async fn notified(&self) {
        self.inner.notify.notified().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_wait_times_out_without_notification() {
        let signal = WaitSignal::new();
        let start = Instant::now();

        let notified = signal.wait_timeout(Duration::from_millis(30));

        assert!(!notified);
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn test_notify_wakes_blocked_waiter() {
        let signal = WaitSignal::new();
        let waiter = signal.clone();

        let handle = thread::spawn(move || {
            let start = Instant::now();
            let notified = waiter.wait_timeout(Duration::from_secs(5));
            (notified, start.elapsed())
        });

        // retry in case the first notify lands before the waiter blocks
        for _ in 0..50 {
            thread::sleep(Duration::from_millis(20));
            signal.notify_all();
            if handle.is_finished() {
                break;
            }
        }

        let (notified, elapsed) = handle.join().unwrap();
        assert!(notified);
        assert!(elapsed < Duration::from_secs(5));
    }

    #[test]
    fn test_unbounded_wait_ends_on_notify() {
        let signal = WaitSignal::new();
        let waiter = signal.clone();

        let handle = thread::spawn(move || waiter.wait_timeout(Duration::MAX));

        for _ in 0..50 {
            thread::sleep(Duration::from_millis(20));
            signal.notify_all();
            if handle.is_finished() {
                break;
            }
        }

        assert!(handle.join().unwrap());
    }

    #[test]
    fn test_clones_share_state() {
        let signal = WaitSignal::new();
        let other = WaitSignal::new();

        assert!(signal.ptr_eq(&signal.clone()));
        assert!(!signal.ptr_eq(&other));
    }

    #[tokio::test]
    async fn test_notified_resolves_on_notify() {
        let signal = WaitSignal::new();
        let waiter = signal.clone();

        let task = tokio::spawn(async move { waiter.notified().await });
        tokio::task::yield_now().await;

        // notify until the spawned waiter has registered and completed
        for _ in 0..50 {
            signal.notify_all();
            if task.is_finished() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("waiter should complete")
            .unwrap();
    }
}
