// Allow must_use_candidate for matcher factory functions since returning the matcher
// without using it is the common pattern for test setup
#![allow(clippy::must_use_candidate)]

//! Matchers used by [`SoftAssertions::assert_that`](super::SoftAssertions::assert_that).
//!
//! - [`Matcher`] trait for custom matchers
//! - Built-in matchers: [`eq`], [`gt`], [`lt`], [`contains`], [`contains_exactly`], etc.
//! - Combinators: [`all_of`], [`any_of`], [`not`]
//!
//! # Example
//!
//! ```rust
//! use assertkit_async::assertions::matcher::{eq, gt, not, Matcher};
//!
//! let m = eq(42);
//! assert!(m.matches(&42));
//!
//! let m = gt(0);
//! assert!(m.matches(&50));
//!
//! let m = not(eq(0));
//! assert!(m.matches(&1));
//! ```

use std::fmt::Debug;
use std::marker::PhantomData;

/// A matcher for testing values.
///
/// # Implementing Custom Matchers
///
/// ```rust
/// use assertkit_async::assertions::matcher::Matcher;
///
/// struct IsEven;
///
/// impl Matcher<i32> for IsEven {
///     fn matches(&self, value: &i32) -> bool {
///         value % 2 == 0
///     }
///
///     fn describe(&self) -> String {
///         "is even".to_string()
///     }
///
///     fn describe_mismatch(&self, value: &i32) -> String {
///         format!("{} is not even", value)
///     }
/// }
///
/// assert!(IsEven.matches(&4));
/// assert!(!IsEven.matches(&3));
/// ```
pub trait Matcher<T: ?Sized> {
    /// Check if the value matches.
    fn matches(&self, value: &T) -> bool;

    /// Describe what this matcher expects.
    fn describe(&self) -> String;

    /// Describe why a value didn't match.
    fn describe_mismatch(&self, value: &T) -> String;
}

// =============================================================================
// Comparison Matchers
// =============================================================================

/// Create an equality matcher.
pub fn eq<T: PartialEq + Debug>(expected: T) -> EqMatcher<T> {
    EqMatcher { expected }
}

/// Matcher for equality.
pub struct EqMatcher<T> {
    expected: T,
}

impl<T: PartialEq + Debug> Matcher<T> for EqMatcher<T> {
    fn matches(&self, value: &T) -> bool {
        value == &self.expected
    }

    fn describe(&self) -> String {
        format!("equals {:?}", self.expected)
    }

    fn describe_mismatch(&self, value: &T) -> String {
        format!("{:?} does not equal {:?}", value, self.expected)
    }
}

/// Create an inequality matcher.
///
/// ```rust
/// use assertkit_async::assertions::matcher::{Matcher, ne};
///
/// assert!(ne(0).matches(&1));
/// assert!(!ne(0).matches(&0));
/// ```
pub fn ne<T: PartialEq + Debug>(unexpected: T) -> NeMatcher<T> {
    NeMatcher { unexpected }
}

/// Matcher for inequality.
pub struct NeMatcher<T> {
    unexpected: T,
}

impl<T: PartialEq + Debug> Matcher<T> for NeMatcher<T> {
    fn matches(&self, value: &T) -> bool {
        value != &self.unexpected
    }

    fn describe(&self) -> String {
        format!("does not equal {:?}", self.unexpected)
    }

    fn describe_mismatch(&self, value: &T) -> String {
        format!("{value:?} equals {:?}", self.unexpected)
    }
}

macro_rules! ordering_matcher {
    ($(#[$doc:meta])* $name:ident, $matcher:ident, $op:tt, $describe:literal, $mismatch:literal) => {
        $(#[$doc])*
        pub fn $name<T: PartialOrd + Debug>(threshold: T) -> $matcher<T> {
            $matcher { threshold }
        }

        #[doc = concat!("Matcher returned by [`", stringify!($name), "`].")]
        pub struct $matcher<T> {
            threshold: T,
        }

        impl<T: PartialOrd + Debug> Matcher<T> for $matcher<T> {
            fn matches(&self, value: &T) -> bool {
                value $op &self.threshold
            }

            fn describe(&self) -> String {
                format!(concat!($describe, " {:?}"), self.threshold)
            }

            fn describe_mismatch(&self, value: &T) -> String {
                format!(concat!("{:?} ", $mismatch, " {:?}"), value, self.threshold)
            }
        }
    };
}

ordering_matcher!(
    /// Create a greater-than matcher.
    gt, GtMatcher, >, "is greater than", "is not greater than"
);
ordering_matcher!(
    /// Create a greater-than-or-equal matcher.
    gte, GteMatcher, >=, "is greater than or equal to", "is less than"
);
ordering_matcher!(
    /// Create a less-than matcher.
    lt, LtMatcher, <, "is less than", "is not less than"
);
ordering_matcher!(
    /// Create a less-than-or-equal matcher.
    ///
    /// ```rust
    /// use assertkit_async::assertions::matcher::{Matcher, lte};
    ///
    /// assert!(lte(0).matches(&-1));
    /// assert!(lte(0).matches(&0));
    /// assert!(!lte(0).matches(&1));
    /// ```
    lte, LteMatcher, <=, "is less than or equal to", "is greater than"
);

// =============================================================================
// String Matchers
// =============================================================================

/// Create a substring matcher.
pub fn contains_str(substring: &str) -> ContainsStrMatcher {
    ContainsStrMatcher {
        substring: substring.to_string(),
    }
}

/// Matcher for string contains substring.
pub struct ContainsStrMatcher {
    substring: String,
}

impl Matcher<str> for ContainsStrMatcher {
    fn matches(&self, value: &str) -> bool {
        value.contains(&self.substring)
    }

    fn describe(&self) -> String {
        format!("contains {:?}", self.substring)
    }

    fn describe_mismatch(&self, value: &str) -> String {
        format!("{:?} does not contain {:?}", value, self.substring)
    }
}

impl Matcher<String> for ContainsStrMatcher {
    fn matches(&self, value: &String) -> bool {
        Matcher::<str>::matches(self, value)
    }

    fn describe(&self) -> String {
        Matcher::<str>::describe(self)
    }

    fn describe_mismatch(&self, value: &String) -> String {
        Matcher::<str>::describe_mismatch(self, value)
    }
}

// =============================================================================
// Collection Matchers
// =============================================================================

/// Implements a slice matcher for `Vec<T>` by delegating to the `[T]` impl.
macro_rules! delegate_vec_to_slice {
    ($matcher:ident<$t:ident>, $($bound:ident),+) => {
        impl<$t: $($bound +)+> Matcher<Vec<$t>> for $matcher<$t> {
            fn matches(&self, value: &Vec<$t>) -> bool {
                Matcher::<[$t]>::matches(self, value.as_slice())
            }

            fn describe(&self) -> String {
                Matcher::<[$t]>::describe(self)
            }

            fn describe_mismatch(&self, value: &Vec<$t>) -> String {
                Matcher::<[$t]>::describe_mismatch(self, value.as_slice())
            }
        }
    };
}

/// Create a collection length matcher.
pub fn has_length<T>(len: usize) -> HasLengthMatcher<T> {
    HasLengthMatcher {
        len,
        _phantom: PhantomData,
    }
}

/// Matcher for collection length.
pub struct HasLengthMatcher<T> {
    len: usize,
    _phantom: PhantomData<T>,
}

impl<T: Debug> Matcher<[T]> for HasLengthMatcher<T> {
    fn matches(&self, value: &[T]) -> bool {
        value.len() == self.len
    }

    fn describe(&self) -> String {
        format!("has length {}", self.len)
    }

    fn describe_mismatch(&self, value: &[T]) -> String {
        format!("{:?} has length {}, expected {}", value, value.len(), self.len)
    }
}

delegate_vec_to_slice!(HasLengthMatcher<T>, Debug);

/// Create an empty collection matcher.
pub fn is_empty<T>() -> IsEmptyMatcher<T> {
    IsEmptyMatcher {
        _phantom: PhantomData,
    }
}

/// Matcher for empty collections.
pub struct IsEmptyMatcher<T> {
    _phantom: PhantomData<T>,
}

impl<T: Debug> Matcher<[T]> for IsEmptyMatcher<T> {
    fn matches(&self, value: &[T]) -> bool {
        value.is_empty()
    }

    fn describe(&self) -> String {
        "is empty".to_string()
    }

    fn describe_mismatch(&self, value: &[T]) -> String {
        format!("{value:?} is not empty")
    }
}

delegate_vec_to_slice!(IsEmptyMatcher<T>, Debug);

/// Create a collection contains element matcher.
///
/// ```rust
/// use assertkit_async::assertions::matcher::{Matcher, contains};
///
/// let m = contains(2);
/// assert!(m.matches(&vec![1, 2, 3]));
/// assert!(!m.matches(&vec![1, 3]));
/// ```
pub fn contains<T: PartialEq + Debug>(element: T) -> ContainsMatcher<T> {
    ContainsMatcher { element }
}

/// Matcher for collection contains element.
pub struct ContainsMatcher<T> {
    element: T,
}

impl<T: PartialEq + Debug> Matcher<[T]> for ContainsMatcher<T> {
    fn matches(&self, value: &[T]) -> bool {
        value.contains(&self.element)
    }

    fn describe(&self) -> String {
        format!("contains {:?}", self.element)
    }

    fn describe_mismatch(&self, value: &[T]) -> String {
        format!("{:?} does not contain {:?}", value, self.element)
    }
}

delegate_vec_to_slice!(ContainsMatcher<T>, PartialEq, Debug);

/// Create a matcher for a collection holding exactly the given elements, in order.
///
/// ```rust
/// use assertkit_async::assertions::matcher::{Matcher, contains_exactly};
///
/// let m = contains_exactly(vec!["A", "B", "C"]);
/// assert!(m.matches(&vec!["A", "B", "C"]));
/// assert!(!m.matches(&vec!["A", "C", "B"]));
/// assert!(!m.matches(&vec!["A", "B"]));
/// ```
pub fn contains_exactly<T: PartialEq + Debug>(elements: Vec<T>) -> ContainsExactlyMatcher<T> {
    ContainsExactlyMatcher { elements }
}

/// Matcher for collection equal to a sequence of elements.
pub struct ContainsExactlyMatcher<T> {
    elements: Vec<T>,
}

impl<T: PartialEq + Debug> Matcher<[T]> for ContainsExactlyMatcher<T> {
    fn matches(&self, value: &[T]) -> bool {
        value == self.elements.as_slice()
    }

    fn describe(&self) -> String {
        format!("contains exactly {:?}", self.elements)
    }

    fn describe_mismatch(&self, value: &[T]) -> String {
        let missing: Vec<_> = self
            .elements
            .iter()
            .filter(|e| !value.contains(e))
            .collect();
        let unexpected: Vec<_> = value
            .iter()
            .filter(|e| !self.elements.contains(e))
            .collect();
        if missing.is_empty() && unexpected.is_empty() {
            format!(
                "{value:?} has the expected elements but not in order {:?}",
                self.elements
            )
        } else {
            format!(
                "{value:?} does not contain exactly {:?}, missing {missing:?}, unexpected {unexpected:?}",
                self.elements
            )
        }
    }
}

delegate_vec_to_slice!(ContainsExactlyMatcher<T>, PartialEq, Debug);

// =============================================================================
// Option Matchers
// =============================================================================

/// Create a matcher for `Some(_)`.
pub fn is_some<T>() -> IsSomeMatcher<T> {
    IsSomeMatcher {
        _phantom: PhantomData,
    }
}

/// Matcher for `Option::Some`.
pub struct IsSomeMatcher<T> {
    _phantom: PhantomData<T>,
}

impl<T: Debug> Matcher<Option<T>> for IsSomeMatcher<T> {
    fn matches(&self, value: &Option<T>) -> bool {
        value.is_some()
    }

    fn describe(&self) -> String {
        "is Some".to_string()
    }

    fn describe_mismatch(&self, _value: &Option<T>) -> String {
        "Expecting actual not to be None".to_string()
    }
}

/// Create a matcher for `None`.
pub fn is_none<T>() -> IsNoneMatcher<T> {
    IsNoneMatcher {
        _phantom: PhantomData,
    }
}

/// Matcher for `Option::None`.
pub struct IsNoneMatcher<T> {
    _phantom: PhantomData<T>,
}

impl<T: Debug> Matcher<Option<T>> for IsNoneMatcher<T> {
    fn matches(&self, value: &Option<T>) -> bool {
        value.is_none()
    }

    fn describe(&self) -> String {
        "is None".to_string()
    }

    fn describe_mismatch(&self, value: &Option<T>) -> String {
        format!("Expecting actual to be None but was {value:?}")
    }
}

// =============================================================================
// Predicate Matchers
// =============================================================================

/// Create a predicate-based matcher.
///
/// ```rust
/// use assertkit_async::assertions::matcher::{Matcher, satisfies};
///
/// let m = satisfies(|x: &i32| *x % 2 == 0, "is even");
/// assert!(m.matches(&4));
/// assert!(!m.matches(&3));
/// ```
pub fn satisfies<T, F>(predicate: F, description: &str) -> PredicateMatcher<T, F>
where
    F: Fn(&T) -> bool,
{
    PredicateMatcher {
        predicate,
        description: description.to_string(),
        _phantom: PhantomData,
    }
}

/// Matcher based on a predicate function.
pub struct PredicateMatcher<T, F> {
    predicate: F,
    description: String,
    _phantom: PhantomData<T>,
}

impl<T: Debug, F: Fn(&T) -> bool> Matcher<T> for PredicateMatcher<T, F> {
    fn matches(&self, value: &T) -> bool {
        (self.predicate)(value)
    }

    fn describe(&self) -> String {
        self.description.clone()
    }

    fn describe_mismatch(&self, value: &T) -> String {
        format!("{:?} does not satisfy: {}", value, self.description)
    }
}

// =============================================================================
// Combinators
// =============================================================================

/// Create a matcher that matches when all matchers match.
///
/// All matchers in the vector must have the same type; box them as
/// `Box<dyn Matcher<T>>` to mix different matchers.
///
/// ```rust
/// use assertkit_async::assertions::matcher::{Matcher, all_of, gt, lt};
///
/// let matchers: Vec<Box<dyn Matcher<i32>>> = vec![Box::new(gt(0)), Box::new(lt(100))];
/// let m = all_of(matchers);
/// assert!(m.matches(&50));
/// assert!(!m.matches(&0));
/// ```
pub fn all_of<T, M>(matchers: Vec<M>) -> AllOfMatcher<T>
where
    M: Matcher<T> + 'static,
    T: Debug,
{
    AllOfMatcher {
        matchers: matchers
            .into_iter()
            .map(|m| Box::new(m) as Box<dyn Matcher<T>>)
            .collect(),
    }
}

/// Matcher that requires all inner matchers to match.
pub struct AllOfMatcher<T: ?Sized> {
    matchers: Vec<Box<dyn Matcher<T>>>,
}

impl<T: Debug> Matcher<T> for AllOfMatcher<T> {
    fn matches(&self, value: &T) -> bool {
        self.matchers.iter().all(|m| m.matches(value))
    }

    fn describe(&self) -> String {
        let descriptions: Vec<_> = self.matchers.iter().map(|m| m.describe()).collect();
        format!("all of [{}]", descriptions.join(", "))
    }

    fn describe_mismatch(&self, value: &T) -> String {
        let failures: Vec<_> = self
            .matchers
            .iter()
            .filter(|m| !m.matches(value))
            .map(|m| m.describe_mismatch(value))
            .collect();
        format!("failed: {}", failures.join("; "))
    }
}

/// Create a matcher that matches when any matcher matches.
///
/// ```rust
/// use assertkit_async::assertions::matcher::{Matcher, any_of, eq};
///
/// let m = any_of(vec![eq(1), eq(2), eq(3)]);
/// assert!(m.matches(&2));
/// assert!(!m.matches(&4));
/// ```
pub fn any_of<T>(matchers: Vec<impl Matcher<T> + 'static>) -> AnyOfMatcher<T>
where
    T: Debug,
{
    AnyOfMatcher {
        matchers: matchers
            .into_iter()
            .map(|m| Box::new(m) as Box<dyn Matcher<T>>)
            .collect(),
    }
}

/// Matcher that requires at least one inner matcher to match.
pub struct AnyOfMatcher<T: ?Sized> {
    matchers: Vec<Box<dyn Matcher<T>>>,
}

impl<T: Debug> Matcher<T> for AnyOfMatcher<T> {
    fn matches(&self, value: &T) -> bool {
        self.matchers.iter().any(|m| m.matches(value))
    }

    fn describe(&self) -> String {
        let descriptions: Vec<_> = self.matchers.iter().map(|m| m.describe()).collect();
        format!("any of [{}]", descriptions.join(", "))
    }

    fn describe_mismatch(&self, value: &T) -> String {
        format!("{:?} matched none of: {}", value, self.describe())
    }
}

/// Create a negating matcher.
pub fn not<T, M: Matcher<T> + 'static>(matcher: M) -> NotMatcher<T> {
    NotMatcher {
        inner: Box::new(matcher),
    }
}

/// Matcher that negates another matcher.
pub struct NotMatcher<T: ?Sized> {
    inner: Box<dyn Matcher<T>>,
}

impl<T: Debug> Matcher<T> for NotMatcher<T> {
    fn matches(&self, value: &T) -> bool {
        !self.inner.matches(value)
    }

    fn describe(&self) -> String {
        format!("not {}", self.inner.describe())
    }

    fn describe_mismatch(&self, value: &T) -> String {
        format!("{:?} unexpectedly matched: {}", value, self.inner.describe())
    }
}

impl<T: ?Sized> Matcher<T> for Box<dyn Matcher<T>> {
    fn matches(&self, value: &T) -> bool {
        (**self).matches(value)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }

    fn describe_mismatch(&self, value: &T) -> String {
        (**self).describe_mismatch(value)
    }
}
