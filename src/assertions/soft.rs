//! Soft assertions that collect failures instead of panicking.

use std::fmt::Debug;

use super::matcher::Matcher;
use crate::error::write_failures;

/// Collector of assertion failures.
///
/// Every `assert_*` method records a failure message and returns `&mut Self`
/// so checks can be chained. Nothing panics until [`assert_all`] is called.
///
/// [`assert_all`]: SoftAssertions::assert_all
///
/// # Example
///
/// ```rust
/// use assertkit_async::assertions::{matcher::gt, SoftAssertions};
///
/// let mut soft = SoftAssertions::new();
/// soft.assert_eq(1 + 1, 2)
///     .assert_that(&10, gt(20))
///     .assert_true(false);
///
/// assert_eq!(soft.errors().len(), 2);
/// assert!(!soft.was_success());
/// ```
#[derive(Debug, Default)]
pub struct SoftAssertions {
    failures: Vec<String>,
    /// Set once `assert_all` has reported the collected failures
    reported: bool,
}

impl SoftAssertions {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks `value` against `matcher`.
    pub fn assert_that<T, M>(&mut self, value: &T, matcher: M) -> &mut Self
    where
        T: Debug + ?Sized,
        M: Matcher<T>,
    {
        if !matcher.matches(value) {
            self.failures.push(format!(
                "{}\n  expected: {}\n  got: {:?}",
                matcher.describe_mismatch(value),
                matcher.describe(),
                value
            ));
        }
        self
    }

    /// Checks that `actual` equals `expected`.
    pub fn assert_eq<T: PartialEq + Debug>(&mut self, actual: T, expected: T) -> &mut Self {
        if actual != expected {
            self.failures
                .push(format!("\nexpected: {expected:?}\n but was: {actual:?}"));
        }
        self
    }

    /// Checks that `actual` differs from `unexpected`.
    pub fn assert_ne<T: PartialEq + Debug>(&mut self, actual: T, unexpected: T) -> &mut Self {
        if actual == unexpected {
            self.failures.push(format!(
                "\nExpecting actual:\n  {actual:?}\nnot to be equal to:\n  {unexpected:?}"
            ));
        }
        self
    }

    /// Checks that `actual` is `true`.
    pub fn assert_true(&mut self, actual: bool) -> &mut Self {
        self.check(actual, "Expecting value to be true but was false")
    }

    /// Checks that `actual` is `false`.
    pub fn assert_false(&mut self, actual: bool) -> &mut Self {
        self.check(!actual, "Expecting value to be false but was true")
    }

    /// Checks that `actual` is `Some`.
    pub fn assert_some<T: Debug>(&mut self, actual: &Option<T>) -> &mut Self {
        self.check(actual.is_some(), "Expecting actual not to be None")
    }

    /// Checks that `actual` is `None`.
    pub fn assert_none<T: Debug>(&mut self, actual: &Option<T>) -> &mut Self {
        if let Some(value) = actual {
            self.failures
                .push(format!("Expecting actual to be None but was Some({value:?})"));
        }
        self
    }

    /// Records `message` as a failure unless `condition` holds.
    pub fn check(&mut self, condition: bool, message: impl Into<String>) -> &mut Self {
        if !condition {
            self.failures.push(message.into());
        }
        self
    }

    /// Records an unconditional failure.
    pub fn fail(&mut self, message: impl Into<String>) -> &mut Self {
        self.failures.push(message.into());
        self
    }

    /// Failure messages collected so far, in order.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.failures
    }

    /// Returns `true` if no assertion failed.
    #[must_use]
    pub fn was_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Panics with every collected failure, if any.
    ///
    /// Inside an asynchronous assertion block the panic is caught and the
    /// individual failures are reported by the block's error.
    ///
    /// # Panics
    ///
    /// Panics if at least one assertion failed.
    pub fn assert_all(&mut self) {
        if self.failures.is_empty() {
            return;
        }
        self.reported = true;
        let mut message = String::new();
        write_failures(&mut message, "\nMultiple Failures", &self.failures)
            .expect("writing to a String cannot fail");
        panic!("{message}");
    }

    pub(crate) fn was_reported(&self) -> bool {
        self.reported
    }

    pub(crate) fn into_failures(self) -> Vec<String> {
        self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assertions::matcher::{contains_exactly, eq, lte};

    #[test]
    fn test_passing_assertions_record_nothing() {
        let mut soft = SoftAssertions::new();
        soft.assert_eq(1, 1)
            .assert_ne(1, 2)
            .assert_true(true)
            .assert_false(false)
            .assert_some(&Some(1))
            .assert_none(&None::<i32>)
            .assert_that(&vec!["A", "B"], contains_exactly(vec!["A", "B"]))
            .check(true, "unused");

        assert!(soft.was_success());
        soft.assert_all();
    }

    #[test]
    fn test_failures_are_recorded_in_order() {
        let mut soft = SoftAssertions::new();
        soft.assert_true(false)
            .assert_some(&None::<i32>)
            .fail("explicit");

        assert_eq!(
            soft.errors(),
            [
                "Expecting value to be true but was false".to_string(),
                "Expecting actual not to be None".to_string(),
                "explicit".to_string(),
            ]
        );
    }

    #[test]
    fn test_assert_eq_message() {
        let mut soft = SoftAssertions::new();
        soft.assert_eq("a", "b");
        assert_eq!(soft.errors()[0], "\nexpected: \"b\"\n but was: \"a\"");
    }

    #[test]
    fn test_assert_that_message() {
        let mut soft = SoftAssertions::new();
        soft.assert_that(&3, lte(0)).assert_that(&3, eq(3));

        assert_eq!(soft.errors().len(), 1);
        assert_eq!(
            soft.errors()[0],
            "3 is greater than 0\n  expected: is less than or equal to 0\n  got: 3"
        );
    }

    #[test]
    fn test_assert_all_panics_with_every_failure() {
        let mut soft = SoftAssertions::new();
        soft.fail("error-1").fail("error-2");

        let payload = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| soft.assert_all()))
            .unwrap_err();
        let message = payload.downcast_ref::<String>().unwrap();

        assert!(message.contains("Multiple Failures (2 failures)"));
        assert!(message.contains("-- failure 1 --error-1"));
        assert!(message.contains("-- failure 2 --error-2"));
        assert!(soft.was_reported());
    }

    #[test]
    #[should_panic(expected = "-- failure 1 --Expecting value to be false but was true")]
    fn test_assert_all_panics() {
        let mut soft = SoftAssertions::new();
        soft.assert_false(true);
        soft.assert_all();
    }
}
