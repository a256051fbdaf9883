//! Soft assertions and matchers.
//!
//! - [`SoftAssertions`] - collects failures instead of panicking on the first one
//! - [`matcher`] - custom matcher system for flexible assertions
//!
//! A fresh [`SoftAssertions`] is handed to the assertion block on every check
//! of an [`AsyncAssert`](crate::AsyncAssert).
//!
//! # Example
//!
//! ```rust
//! use assertkit_async::assertions::{matcher::{all_of, gt, lt, Matcher}, SoftAssertions};
//!
//! let mut soft = SoftAssertions::new();
//! let bounds: Vec<Box<dyn Matcher<i32>>> = vec![Box::new(gt(0)), Box::new(lt(100))];
//! soft.assert_that(&50, all_of(bounds));
//! assert!(soft.was_success());
//! ```

pub mod matcher;
mod soft;

pub use soft::SoftAssertions;
