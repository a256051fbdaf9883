//! `MockClock` implementation for virtual time control.

use futures::future::BoxFuture;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

use super::{ElapsedTime, Time, WaitCondition, WaitSignal};

/// A mock clock that provides virtual time for assertion loops.
///
/// Waiting on a `MockClock` never sleeps: the requested interval is recorded
/// and the virtual time jumps forward by it. Tests can then inspect exactly
/// which pauses an assertion loop asked for.
///
/// # Thread Safety
///
/// `MockClock` is thread-safe and can be cloned and shared across threads.
/// All clones share the same underlying time state.
///
/// # Example
///
/// ```rust
/// use assertkit_async::clock::MockClock;
/// use std::time::Duration;
///
/// // Create a new clock starting at time zero
/// let clock = MockClock::new();
/// assert_eq!(clock.now(), Duration::ZERO);
///
/// // Advance time by 10 seconds
/// clock.advance(Duration::from_secs(10));
/// assert_eq!(clock.now(), Duration::from_secs(10));
///
/// // Clone shares the same time
/// let clock2 = clock.clone();
/// clock2.advance(Duration::from_secs(5));
/// assert_eq!(clock.now(), Duration::from_secs(15));
/// ```
#[derive(Debug, Clone)]
pub struct MockClock {
    inner: Arc<ClockInner>,
}

#[derive(Debug)]
struct ClockInner {
    /// Current time as duration since clock creation
    current_time: Mutex<Duration>,
    /// Intervals passed to wait conditions, in call order
    waits: Mutex<Vec<Duration>>,
    /// Signals bound through `wait_condition`, in call order
    signals: Mutex<Vec<WaitSignal>>,
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MockClock {
    /// Creates a new `MockClock` starting at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::with_start_time(Duration::ZERO)
    }

    /// Creates a new `MockClock` starting at the specified time.
    ///
    /// # Example
    ///
    /// ```rust
    /// use assertkit_async::clock::MockClock;
    /// use std::time::Duration;
    ///
    /// let clock = MockClock::with_start_time(Duration::from_secs(100));
    /// assert_eq!(clock.now(), Duration::from_secs(100));
    /// ```
    #[must_use]
    pub fn with_start_time(start: Duration) -> Self {
        Self {
            inner: Arc::new(ClockInner {
                current_time: Mutex::new(start),
                waits: Mutex::new(Vec::new()),
                signals: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Returns the current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        *self.inner.current_time.lock()
    }

    /// Advances the clock by the specified duration.
    ///
    /// Measurements started with [`Time::measure`] observe the new time
    /// immediately.
    pub fn advance(&self, duration: Duration) {
        *self.inner.current_time.lock() += duration;
    }

    /// Returns every interval waited so far, in order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use assertkit_async::clock::{MockClock, Time, WaitSignal};
    /// use std::time::Duration;
    ///
    /// let clock = MockClock::new();
    /// let condition = clock.wait_condition(&WaitSignal::new());
    /// condition.wait_for(Duration::from_millis(300));
    ///
    /// assert_eq!(clock.wait_intervals(), vec![Duration::from_millis(300)]);
    /// assert_eq!(clock.now(), Duration::from_millis(300));
    /// ```
    #[must_use]
    pub fn wait_intervals(&self) -> Vec<Duration> {
        self.inner.waits.lock().clone()
    }

    /// Returns every signal a wait condition was created for, in order.
    #[must_use]
    pub fn wait_signals(&self) -> Vec<WaitSignal> {
        self.inner.signals.lock().clone()
    }

    fn record_wait(&self, interval: Duration) {
        self.inner.waits.lock().push(interval);
        self.advance(interval);
    }
}

impl Time for MockClock {
    fn measure(&self) -> ElapsedTime {
        let clock = self.clone();
        let start = self.now();
        ElapsedTime::new(move || clock.now().saturating_sub(start))
    }

    fn wait_condition(&self, signal: &WaitSignal) -> Box<dyn WaitCondition> {
        self.inner.signals.lock().push(signal.clone());
        Box::new(MockWaitCondition {
            clock: self.clone(),
        })
    }
}

struct MockWaitCondition {
    clock: MockClock,
}

impl WaitCondition for MockWaitCondition {
    fn wait_for(&self, interval: Duration) {
        self.clock.record_wait(interval);
    }

    fn wait_for_async(&self, interval: Duration) -> BoxFuture<'_, ()> {
        self.clock.record_wait(interval);
        Box::pin(std::future::ready(()))
    }
}
