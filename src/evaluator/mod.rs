//! Re-evaluation of assertions until they pass or time out.
//!
//! An [`AsyncAssert`] runs an assertion block against fresh
//! [`SoftAssertions`] over and over, pausing for the configured check interval
//! between attempts. It stops as soon as a check passes. When the timeout is
//! exceeded it reports the failures of the last check.
//!
//! # Example
//!
//! ```rust
//! use assertkit_async::await_at_most_one_second;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//! use std::thread;
//! use std::time::Duration;
//!
//! let counter = Arc::new(AtomicUsize::new(0));
//! let producer = Arc::clone(&counter);
//! thread::spawn(move || {
//!     thread::sleep(Duration::from_millis(50));
//!     producer.store(3, Ordering::SeqCst);
//! });
//!
//! await_at_most_one_second().until_assertions(|soft| {
//!     soft.assert_eq(counter.load(Ordering::SeqCst), 3);
//! });
//! ```

mod config;
mod result;

pub use config::AwaitConfig;

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::assertions::SoftAssertions;
use crate::clock::{SystemTime, Time, WaitSignal};
use crate::error::{AsyncAssertionError, Error, Result};
use result::CheckResult;

/// Asynchronous assertion with a fixed timeout.
///
/// Instances are immutable; the `with_*` and `using_*` methods return
/// modified copies.
#[derive(Clone)]
pub struct AsyncAssert {
    time: Arc<dyn Time>,
    config: AwaitConfig,
    signal: WaitSignal,
}

impl AsyncAssert {
    /// Creates an assertion measuring real time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTimeout`] if `timeout` is zero.
    pub fn new(timeout: Duration) -> Result<Self> {
        Ok(Self::with_time(SystemTime, AwaitConfig::with_timeout(timeout)?))
    }

    /// Creates an assertion driven by a custom time source.
    ///
    /// # Example
    ///
    /// ```rust
    /// use assertkit_async::clock::MockClock;
    /// use assertkit_async::evaluator::{AsyncAssert, AwaitConfig};
    /// use std::time::Duration;
    ///
    /// let clock = MockClock::new();
    /// let config = AwaitConfig::with_timeout(Duration::from_secs(30)).unwrap();
    ///
    /// let result = AsyncAssert::with_time(clock.clone(), config)
    ///     .try_until_assertions(|soft| {
    ///         soft.fail("never passes");
    ///     });
    ///
    /// // thirty virtual seconds went by instantly
    /// assert!(result.is_err());
    /// assert_eq!(clock.now(), Duration::from_secs(30));
    /// ```
    pub fn with_time(time: impl Time + 'static, config: AwaitConfig) -> Self {
        Self {
            time: Arc::new(time),
            config,
            signal: WaitSignal::new(),
        }
    }

    /// Returns a copy pausing `check_interval` between checks.
    ///
    /// # Panics
    ///
    /// Panics if the interval is zero or longer than the timeout. Use
    /// [`try_with_check_interval`](Self::try_with_check_interval) to handle
    /// that case.
    #[must_use]
    pub fn with_check_interval(self, check_interval: Duration) -> Self {
        match self.try_with_check_interval(check_interval) {
            Ok(assert) => assert,
            Err(err) => panic!("{err}"),
        }
    }

    /// Returns a copy pausing `check_interval` between checks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCheckInterval`] or
    /// [`Error::CheckIntervalExceedsTimeout`] for an invalid interval.
    pub fn try_with_check_interval(self, check_interval: Duration) -> Result<Self> {
        let config = self.config.with_check_interval(check_interval)?;
        Ok(Self { config, ..self })
    }

    /// Returns a copy whose pauses end early when `signal` is notified.
    ///
    /// # Example
    ///
    /// ```rust
    /// use assertkit_async::await_at_most_five_seconds;
    /// use assertkit_async::clock::WaitSignal;
    /// use std::sync::atomic::{AtomicBool, Ordering};
    /// use std::sync::Arc;
    /// use std::thread;
    /// use std::time::Duration;
    ///
    /// let signal = WaitSignal::new();
    /// let done = Arc::new(AtomicBool::new(false));
    ///
    /// let (producer_signal, producer_done) = (signal.clone(), Arc::clone(&done));
    /// thread::spawn(move || {
    ///     thread::sleep(Duration::from_millis(100));
    ///     producer_done.store(true, Ordering::SeqCst);
    ///     producer_signal.notify_all();
    /// });
    ///
    /// await_at_most_five_seconds()
    ///     .with_check_interval(Duration::from_secs(5))
    ///     .using_wait_signal(&signal)
    ///     .until_assertions(|soft| {
    ///         soft.assert_true(done.load(Ordering::SeqCst));
    ///     });
    /// ```
    #[must_use]
    pub fn using_wait_signal(self, signal: &WaitSignal) -> Self {
        Self {
            signal: signal.clone(),
            ..self
        }
    }

    /// Timeout and check interval in use.
    #[must_use]
    pub fn config(&self) -> AwaitConfig {
        self.config
    }

    /// Signal that cuts pauses short.
    #[must_use]
    pub fn wait_signal(&self) -> &WaitSignal {
        &self.signal
    }

    /// Re-evaluates `assertions` until they all pass.
    ///
    /// # Panics
    ///
    /// Panics with the failures of the last check when the timeout is
    /// exceeded.
    pub fn until_assertions<F>(&self, assertions: F)
    where
        F: FnMut(&mut SoftAssertions),
    {
        if let Err(err) = self.try_until_assertions(assertions) {
            panic!("{err}");
        }
    }

    /// Re-evaluates `assertions` until they all pass, blocking the thread
    /// between checks.
    ///
    /// # Errors
    ///
    /// Returns the failures of the last check when the timeout is exceeded.
    pub fn try_until_assertions<F>(
        &self,
        mut assertions: F,
    ) -> std::result::Result<(), AsyncAssertionError>
    where
        F: FnMut(&mut SoftAssertions),
    {
        let timeout = self.config.timeout();
        let elapsed = self.time.measure();
        let wait = self.time.wait_condition(&self.signal);

        let mut attempts = 0_usize;
        let mut result = CheckResult::undefined();
        while result.has_failed() && elapsed.is_lower_than_or_equal_to(timeout) {
            attempts += 1;
            result = CheckResult::evaluate(&mut assertions);
            if result.has_failed() {
                tracing::debug!(attempts, elapsed = ?elapsed.get(), "async assertion check failed");
                if !elapsed.is_lower_than(timeout) {
                    break;
                }
                wait.wait_for(self.config.check_interval_at(elapsed.get()));
            }
        }
        self.finish(result, attempts)
    }

    /// Async variant of [`until_assertions`](Self::until_assertions).
    ///
    /// # Panics
    ///
    /// Panics with the failures of the last check when the timeout is
    /// exceeded.
    pub async fn until_assertions_async<F>(&self, assertions: F)
    where
        F: FnMut(&mut SoftAssertions),
    {
        if let Err(err) = self.try_until_assertions_async(assertions).await {
            panic!("{err}");
        }
    }

    /// Re-evaluates `assertions` until they all pass, yielding to the
    /// executor between checks.
    ///
    /// With [`SystemTime`] this needs a tokio runtime with timers enabled.
    ///
    /// # Errors
    ///
    /// Returns the failures of the last check when the timeout is exceeded.
    pub async fn try_until_assertions_async<F>(
        &self,
        mut assertions: F,
    ) -> std::result::Result<(), AsyncAssertionError>
    where
        F: FnMut(&mut SoftAssertions),
    {
        let timeout = self.config.timeout();
        let elapsed = self.time.measure();
        let wait = self.time.wait_condition(&self.signal);

        let mut attempts = 0_usize;
        let mut result = CheckResult::undefined();
        while result.has_failed() && elapsed.is_lower_than_or_equal_to(timeout) {
            attempts += 1;
            result = CheckResult::evaluate(&mut assertions);
            if result.has_failed() {
                tracing::debug!(attempts, elapsed = ?elapsed.get(), "async assertion check failed");
                if !elapsed.is_lower_than(timeout) {
                    break;
                }
                wait.wait_for_async(self.config.check_interval_at(elapsed.get()))
                    .await;
            }
        }
        self.finish(result, attempts)
    }

    /// Drives `future` to completion within the timeout.
    ///
    /// The future is polled before every pause, so a future that is already
    /// complete returns without waiting.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timeout`] if the future is still pending once the
    /// timeout is exceeded.
    ///
    /// # Example
    ///
    /// ```rust
    /// use assertkit_async::await_at_most_one_second;
    /// use std::time::Duration;
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let value = await_at_most_one_second()
    ///     .until_ready(async {
    ///         tokio::time::sleep(Duration::from_millis(20)).await;
    ///         42
    ///     })
    ///     .await
    ///     .unwrap();
    /// assert_eq!(value, 42);
    /// # }
    /// ```
    pub async fn until_ready<Fut>(&self, future: Fut) -> Result<Fut::Output>
    where
        Fut: Future,
    {
        let timeout = self.config.timeout();
        let elapsed = self.time.measure();
        let wait = self.time.wait_condition(&self.signal);

        tokio::pin!(future);
        loop {
            let interval = self.config.check_interval_at(elapsed.get());
            tokio::select! {
                biased;
                output = &mut future => return Ok(output),
                () = wait.wait_for_async(interval) => {}
            }
            if !elapsed.is_lower_than(timeout) {
                tracing::debug!(?timeout, "future did not complete in time");
                return Err(Error::Timeout(timeout));
            }
        }
    }

    fn finish(
        &self,
        result: CheckResult,
        attempts: usize,
    ) -> std::result::Result<(), AsyncAssertionError> {
        let outcome = result.into_result(&self.config);
        if outcome.is_err() {
            tracing::debug!(
                attempts,
                timeout = ?self.config.timeout(),
                "async assertion timed out"
            );
        }
        outcome
    }
}

impl fmt::Debug for AsyncAssert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncAssert")
            .field("config", &self.config)
            .field("signal", &self.signal)
            .finish_non_exhaustive()
    }
}

/// Entry point for asynchronous assertions with the given timeout.
///
/// # Panics
///
/// Panics if `timeout` is zero. Use [`try_await_at_most`] to handle that case.
#[must_use]
pub fn await_at_most(timeout: Duration) -> AsyncAssert {
    match try_await_at_most(timeout) {
        Ok(assert) => assert,
        Err(err) => panic!("{err}"),
    }
}

/// Entry point for asynchronous assertions with the given timeout.
///
/// # Errors
///
/// Returns [`Error::InvalidTimeout`] if `timeout` is zero.
pub fn try_await_at_most(timeout: Duration) -> Result<AsyncAssert> {
    AsyncAssert::new(timeout)
}

/// Entry point with a timeout given in milliseconds.
///
/// # Panics
///
/// Panics if `millis` is zero.
#[must_use]
pub fn await_at_most_millis(millis: u64) -> AsyncAssert {
    await_at_most(Duration::from_millis(millis))
}

/// Entry point with a 1 second timeout.
#[must_use]
pub fn await_at_most_one_second() -> AsyncAssert {
    await_at_most(Duration::from_secs(1))
}

/// Entry point with a 2 seconds timeout.
#[must_use]
pub fn await_at_most_two_seconds() -> AsyncAssert {
    await_at_most(Duration::from_secs(2))
}

/// Entry point with a 5 seconds timeout.
#[must_use]
pub fn await_at_most_five_seconds() -> AsyncAssert {
    await_at_most(Duration::from_secs(5))
}

/// Entry point with a 15 seconds timeout.
#[must_use]
pub fn await_at_most_fifteen_seconds() -> AsyncAssert {
    await_at_most(Duration::from_secs(15))
}

/// Entry point with a 30 seconds timeout.
#[must_use]
pub fn await_at_most_thirty_seconds() -> AsyncAssert {
    await_at_most(Duration::from_secs(30))
}
