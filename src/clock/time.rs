//! Time source used by the assertion loop.

use futures::future::BoxFuture;
use std::fmt;
use std::time::{Duration, Instant};

use super::WaitSignal;

/// Source of elapsed time and of waits between assertion checks.
///
/// [`SystemTime`] is the real implementation; [`MockClock`](super::MockClock)
/// replaces both measuring and waiting with virtual time.
pub trait Time: Send + Sync {
    /// Starts measuring elapsed time.
    fn measure(&self) -> ElapsedTime;

    /// Creates a wait condition that can be cut short through `signal`.
    fn wait_condition(&self, signal: &WaitSignal) -> Box<dyn WaitCondition>;
}

/// Pause between two assertion checks.
pub trait WaitCondition: Send + Sync {
    /// Blocks the current thread for at most `interval`.
    ///
    /// A zero interval returns immediately.
    fn wait_for(&self, interval: Duration);

    /// Waits for at most `interval` without blocking the executor.
    fn wait_for_async(&self, interval: Duration) -> BoxFuture<'_, ()>;
}

/// Time elapsed since [`Time::measure`] was called.
pub struct ElapsedTime {
    source: Box<dyn Fn() -> Duration + Send + Sync>,
}

impl ElapsedTime {
    /// Wraps a function returning the time elapsed since the start.
    pub fn new(source: impl Fn() -> Duration + Send + Sync + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    /// Returns the elapsed time.
    #[must_use]
    pub fn get(&self) -> Duration {
        (self.source)()
    }

    /// Returns `true` if the elapsed time is strictly lower than `duration`.
    #[must_use]
    pub fn is_lower_than(&self, duration: Duration) -> bool {
        self.get() < duration
    }

    /// Returns `true` if the elapsed time is lower than or equal to `duration`.
    #[must_use]
    pub fn is_lower_than_or_equal_to(&self, duration: Duration) -> bool {
        self.get() <= duration
    }
}

impl fmt::Debug for ElapsedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElapsedTime")
            .field("elapsed", &self.get())
            .finish()
    }
}

/// Wall-clock time.
///
/// Elapsed time is the larger of the [`Instant`] and `tokio` clock readings,
/// so async loops follow a paused tokio clock while blocking loops still see
/// real time pass. Blocking waits park the thread on the wait signal; async
/// waits race a `tokio` sleep against the signal, so they need a tokio
/// runtime with the time driver enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTime;

impl Time for SystemTime {
    fn measure(&self) -> ElapsedTime {
        let start = Instant::now();
        let runtime_start = tokio::time::Instant::now();
        ElapsedTime::new(move || start.elapsed().max(runtime_start.elapsed()))
    }

    fn wait_condition(&self, signal: &WaitSignal) -> Box<dyn WaitCondition> {
        Box::new(SignalWaitCondition {
            signal: signal.clone(),
        })
    }
}

struct SignalWaitCondition {
    signal: WaitSignal,
}

impl WaitCondition for SignalWaitCondition {
    fn wait_for(&self, interval: Duration) {
        if interval.is_zero() {
            return;
        }
        tracing::trace!(?interval, "waiting before next check");
        if self.signal.wait_timeout(interval) {
            tracing::debug!("wait cut short by signal");
        }
    }

    fn wait_for_async(&self, interval: Duration) -> BoxFuture<'_, ()> {
        Box::pin(async move {
            if interval.is_zero() {
                return;
            }
            tracing::trace!(?interval, "waiting before next check");
            tokio::select! {
                () = tokio::time::sleep(interval) => {}
                () = self.signal.notified() => {
                    tracing::debug!("wait cut short by signal");
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_elapsed_time_comparisons() {
        let values = Arc::new(Mutex::new(vec![
            Duration::from_secs(15),
            Duration::from_secs(15),
            Duration::from_secs(15),
            Duration::from_secs(15),
            Duration::from_secs(15),
            Duration::from_secs(15),
            Duration::from_secs(5),
        ]));
        let source = Arc::clone(&values);
        let elapsed = ElapsedTime::new(move || source.lock().pop().unwrap_or_default());

        assert_eq!(elapsed.get(), Duration::from_secs(5));

        let limit = Duration::from_secs(15);
        let one_ms = Duration::from_millis(1);
        assert!(!elapsed.is_lower_than(limit));
        assert!(elapsed.is_lower_than(limit + one_ms));
        assert!(!elapsed.is_lower_than(limit - one_ms));

        assert!(elapsed.is_lower_than_or_equal_to(limit));
        assert!(elapsed.is_lower_than_or_equal_to(limit + one_ms));
        assert!(!elapsed.is_lower_than_or_equal_to(limit - one_ms));
    }

    #[test]
    fn test_system_time_measures_real_time() {
        let elapsed = SystemTime.measure();
        thread::sleep(Duration::from_millis(20));
        assert!(elapsed.get() >= Duration::from_millis(20));
    }

    #[test]
    fn test_zero_wait_returns_immediately() {
        let signal = WaitSignal::new();
        let condition = SystemTime.wait_condition(&signal);

        let start = Instant::now();
        condition.wait_for(Duration::ZERO);

        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[test]
    fn test_waits_for_five_hundred_milliseconds() {
        let signal = WaitSignal::new();
        let condition = SystemTime.wait_condition(&signal);

        let start = Instant::now();
        condition.wait_for(Duration::from_millis(500));

        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(500), "{elapsed:?}");
        assert!(elapsed < Duration::from_millis(600), "{elapsed:?}");
    }

    #[test]
    fn test_stops_waiting_when_signal_is_notified() {
        let signal = WaitSignal::new();
        let condition = SystemTime.wait_condition(&signal);

        let handle = thread::spawn(move || {
            let start = Instant::now();
            condition.wait_for(Duration::from_secs(5));
            start.elapsed()
        });
        thread::sleep(Duration::from_millis(50));
        assert!(!handle.is_finished());

        for _ in 0..20 {
            signal.notify_all();
            if handle.is_finished() {
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }

        let elapsed = handle.join().unwrap();
        assert!(elapsed < Duration::from_secs(1), "{elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_async_wait_sleeps_for_interval() {
        let signal = WaitSignal::new();
        let condition = SystemTime.wait_condition(&signal);

        let start = tokio::time::Instant::now();
        condition.wait_for_async(Duration::from_secs(3)).await;

        assert!(start.elapsed() >= Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_system_time_follows_paused_runtime_clock() {
        let elapsed = SystemTime.measure();

        tokio::time::advance(Duration::from_secs(10)).await;

        assert!(elapsed.get() >= Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_async_wait_ends_on_notify() {
        let signal = WaitSignal::new();
        let notifier = signal.clone();
        let condition = SystemTime.wait_condition(&signal);

        let task = tokio::spawn(async move {
            let start = std::time::Instant::now();
            condition.wait_for_async(Duration::from_secs(5)).await;
            start.elapsed()
        });

        for _ in 0..50 {
            tokio::time::sleep(Duration::from_millis(10)).await;
            notifier.notify_all();
            if task.is_finished() {
                break;
            }
        }

        let elapsed = task.await.unwrap();
        assert!(elapsed < Duration::from_secs(1), "{elapsed:?}");
    }
}
