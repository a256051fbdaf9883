//! Timeout and check interval of an assertion loop.

use std::time::Duration;

use crate::error::{Error, Result};

const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_millis(100);
const DEFAULT_SHORT_CHECK_INTERVAL: Duration = Duration::from_millis(50);

/// How long to keep checking and how long to pause between checks.
///
/// # Example
///
/// ```rust
/// use assertkit_async::evaluator::AwaitConfig;
/// use std::time::Duration;
///
/// let config = AwaitConfig::with_timeout(Duration::from_secs(1)).unwrap();
/// assert_eq!(config.check_interval(), Duration::from_millis(100));
///
/// let config = config.with_check_interval(Duration::from_millis(300)).unwrap();
/// assert_eq!(config.check_interval(), Duration::from_millis(300));
///
/// // the last pause is shortened so it ends exactly at the timeout
/// assert_eq!(
///     config.check_interval_at(Duration::from_millis(900)),
///     Duration::from_millis(100)
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AwaitConfig {
    timeout: Duration,
    check_interval: Duration,
}

impl AwaitConfig {
    /// Creates a config with the default check interval for `timeout`.
    ///
    /// The default is 100ms, or 50ms for timeouts up to 100ms, or the timeout
    /// itself when it is 50ms or less.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTimeout`] if `timeout` is zero.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        if timeout.is_zero() {
            return Err(Error::InvalidTimeout);
        }
        Ok(Self {
            timeout,
            check_interval: default_check_interval(timeout),
        })
    }

    /// Returns a copy using `check_interval` between checks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCheckInterval`] if `check_interval` is zero and
    /// [`Error::CheckIntervalExceedsTimeout`] if it is longer than the timeout.
    pub fn with_check_interval(self, check_interval: Duration) -> Result<Self> {
        if check_interval.is_zero() {
            return Err(Error::InvalidCheckInterval);
        }
        if check_interval > self.timeout {
            return Err(Error::CheckIntervalExceedsTimeout);
        }
        Ok(Self {
            check_interval,
            ..self
        })
    }

    /// Total time the assertions are retried for.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Pause between two checks.
    #[must_use]
    pub fn check_interval(&self) -> Duration {
        self.check_interval
    }

    /// Pause to take after `elapsed` time, never reaching past the timeout.
    #[must_use]
    pub fn check_interval_at(&self, elapsed: Duration) -> Duration {
        let overshoots = elapsed
            .checked_add(self.check_interval)
            .map_or(true, |end| end > self.timeout);
        if overshoots {
            self.timeout.saturating_sub(elapsed)
        } else {
            self.check_interval
        }
    }
}

fn default_check_interval(timeout: Duration) -> Duration {
    if timeout <= DEFAULT_CHECK_INTERVAL {
        if timeout > DEFAULT_SHORT_CHECK_INTERVAL {
            return DEFAULT_SHORT_CHECK_INTERVAL;
        }
        return timeout;
    }
    DEFAULT_CHECK_INTERVAL
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        assert_eq!(
            AwaitConfig::with_timeout(Duration::ZERO),
            Err(Error::InvalidTimeout)
        );
    }

    #[test]
    fn test_default_check_interval() {
        let cases = [
            (ms(30_000), ms(100)),
            (ms(5_000), ms(100)),
            (ms(1_000), ms(100)),
            (ms(101), ms(100)),
            (ms(100), ms(50)),
            (ms(90), ms(50)),
            (ms(50), ms(50)),
            (ms(40), ms(40)),
            (ms(30), ms(30)),
            (ms(1), ms(1)),
        ];
        for (timeout, expected) in cases {
            let config = AwaitConfig::with_timeout(timeout).unwrap();
            assert_eq!(config.timeout(), timeout);
            assert_eq!(config.check_interval(), expected, "timeout {timeout:?}");
        }
    }

    #[test]
    fn test_custom_check_interval() {
        let config = AwaitConfig::with_timeout(ms(5_000))
            .unwrap()
            .with_check_interval(ms(5_000))
            .unwrap();

        assert_eq!(config.check_interval(), ms(5_000));
        assert_eq!(config.timeout(), ms(5_000));
    }

    #[test]
    fn test_check_interval_longer_than_timeout_is_rejected() {
        let config = AwaitConfig::with_timeout(ms(500)).unwrap();
        assert_eq!(
            config.with_check_interval(ms(501)),
            Err(Error::CheckIntervalExceedsTimeout)
        );
    }

    #[test]
    fn test_zero_check_interval_is_rejected() {
        let config = AwaitConfig::with_timeout(ms(500)).unwrap();
        assert_eq!(
            config.with_check_interval(Duration::ZERO),
            Err(Error::InvalidCheckInterval)
        );
    }

    #[test]
    fn test_check_interval_is_shortened_near_timeout() {
        let config = AwaitConfig::with_timeout(ms(5_000))
            .unwrap()
            .with_check_interval(ms(1_777))
            .unwrap();

        assert_eq!(config.check_interval_at(Duration::ZERO), ms(1_777));
        assert_eq!(config.check_interval_at(ms(3_223)), ms(1_777));
        assert_eq!(config.check_interval_at(ms(3_554)), ms(1_446));
        assert_eq!(config.check_interval_at(ms(5_000)), Duration::ZERO);
        assert_eq!(config.check_interval_at(ms(6_000)), Duration::ZERO);
    }

    #[test]
    fn test_maximum_check_interval_does_not_overflow() {
        let config = AwaitConfig::with_timeout(Duration::MAX)
            .unwrap()
            .with_check_interval(Duration::MAX)
            .unwrap();

        assert_eq!(config.check_interval_at(Duration::ZERO), Duration::MAX);
        assert_eq!(config.check_interval_at(ms(1)), Duration::MAX - ms(1));
        assert_eq!(config.check_interval_at(Duration::MAX), Duration::ZERO);
    }
}
