//! Error definitions
//!
//! This module provides error types for assertkit-async.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Main error type for assertkit-async
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Timeout was zero
    #[error("timeout must be greater than zero")]
    InvalidTimeout,

    /// Check interval was zero
    #[error("check interval must be greater than zero")]
    InvalidCheckInterval,

    /// Check interval was longer than the timeout
    #[error("check interval must be lower than or equal to timeout")]
    CheckIntervalExceedsTimeout,

    /// Assertions were still failing when the timeout was exceeded
    #[error(transparent)]
    Assertion(#[from] AsyncAssertionError),

    /// Awaited future did not complete in time
    #[error("Future did not complete within {}ms timeout", .0.as_millis())]
    Timeout(Duration),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Failure of an asynchronous assertion.
///
/// Carries the timeout that was exceeded and the failures reported by the
/// last evaluation of the assertions, in the order they were recorded.
///
/// # Example
///
/// ```rust
/// use assertkit_async::await_at_most;
/// use std::time::Duration;
///
/// let err = await_at_most(Duration::from_millis(20))
///     .try_until_assertions(|soft| {
///         soft.assert_true(false);
///     })
///     .unwrap_err();
///
/// assert_eq!(err.failures().len(), 1);
/// assert!(err
///     .to_string()
///     .starts_with("Async assertion failed after exceeding 20ms timeout (1 failure)"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsyncAssertionError {
    timeout: Duration,
    failures: Vec<String>,
}

impl AsyncAssertionError {
    pub(crate) fn new(timeout: Duration, failures: Vec<String>) -> Self {
        Self { timeout, failures }
    }

    /// The timeout that was exceeded.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Failure messages of the last evaluation.
    #[must_use]
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    /// First line of the report, without the failure count.
    #[must_use]
    pub fn heading(&self) -> String {
        format!(
            "Async assertion failed after exceeding {}ms timeout",
            self.timeout.as_millis()
        )
    }
}

impl fmt::Display for AsyncAssertionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_failures(f, &self.heading(), &self.failures)
    }
}

impl std::error::Error for AsyncAssertionError {}

/// Writes `heading (n failures)` followed by one numbered block per failure.
pub(crate) fn write_failures(
    f: &mut impl fmt::Write,
    heading: &str,
    failures: &[String],
) -> fmt::Result {
    let noun = if failures.len() == 1 {
        "failure"
    } else {
        "failures"
    };
    write!(f, "{heading} ({} {noun})", failures.len())?;
    for (index, failure) in failures.iter().enumerate() {
        write!(f, "\n-- failure {} --{failure}", index + 1)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_failure_report() {
        let err = AsyncAssertionError::new(Duration::from_millis(1500), vec!["test".into()]);

        let message = err.to_string();
        assert!(message.contains("Async assertion failed after exceeding 1500ms timeout (1 failure)"));
        assert!(message.contains("-- failure 1 --test"));
    }

    #[test]
    fn test_multiple_failures_report() {
        let err = AsyncAssertionError::new(
            Duration::from_millis(1500),
            vec!["error-1".into(), "error-2".into(), "error-3".into()],
        );

        let message = err.to_string();
        assert!(message.contains("Async assertion failed after exceeding 1500ms timeout (3 failures)"));
        assert!(message.contains("-- failure 1 --error-1"));
        assert!(message.contains("-- failure 2 --error-2"));
        assert!(message.contains("-- failure 3 --error-3"));
    }

    #[test]
    fn test_failures_keep_order() {
        let err = AsyncAssertionError::new(Duration::from_secs(1), vec!["a".into(), "b".into()]);
        assert_eq!(err.failures(), ["a".to_string(), "b".to_string()]);
        assert_eq!(err.timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::InvalidTimeout.to_string(),
            "timeout must be greater than zero"
        );
        assert_eq!(
            Error::InvalidCheckInterval.to_string(),
            "check interval must be greater than zero"
        );
        assert_eq!(
            Error::CheckIntervalExceedsTimeout.to_string(),
            "check interval must be lower than or equal to timeout"
        );
        assert_eq!(
            Error::Timeout(Duration::from_millis(250)).to_string(),
            "Future did not complete within 250ms timeout"
        );
    }

    #[test]
    fn test_assertion_error_is_transparent() {
        let inner = AsyncAssertionError::new(Duration::from_millis(10), vec!["boom".into()]);
        let err = Error::from(inner.clone());
        assert_eq!(err.to_string(), inner.to_string());
    }
}
