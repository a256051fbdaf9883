//! # assertkit-async
//!
//! > Soft assertions that wait for asynchronous work
//!
//! **assertkit-async** re-evaluates a block of soft assertions until every
//! check passes or a timeout is exceeded. It is meant for tests whose state is
//! changed by other threads or tasks: instead of sleeping for a fixed time,
//! the test asserts on the expected end state and returns as soon as it is
//! reached.
//!
//! ## Quick Start
//!
//! ```rust
//! use assertkit_async::prelude::*;
//! use std::sync::{Arc, Mutex};
//! use std::thread;
//! use std::time::Duration;
//!
//! let received = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&received);
//! thread::spawn(move || {
//!     for message in ["A", "B", "C"] {
//!         thread::sleep(Duration::from_millis(30));
//!         sink.lock().unwrap().push(message);
//!     }
//! });
//!
//! await_at_most_one_second().until_assertions(|soft| {
//!     soft.assert_that(&*received.lock().unwrap(), contains_exactly(vec!["A", "B", "C"]));
//! });
//! ```
//!
//! ## Features
//!
//! - **Soft assertions** - every failure of the last check is reported
//! - **Blocking and async** - `until_assertions` and `until_assertions_async`
//! - **Wait signals** - wake the assertion loop as soon as state changes
//! - **Mock clock** - test timing behaviour without real waits

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod assertions;
pub mod clock;
pub mod error;
pub mod evaluator;

/// Prelude for convenient imports
///
/// ```rust
/// use assertkit_async::prelude::*;
/// ```
pub mod prelude {
    pub use crate::assertions::matcher::*;
    pub use crate::assertions::SoftAssertions;
    pub use crate::clock::WaitSignal;
    pub use crate::error::{AsyncAssertionError, Error, Result};
    pub use crate::evaluator::{
        await_at_most, await_at_most_fifteen_seconds, await_at_most_five_seconds,
        await_at_most_millis, await_at_most_one_second, await_at_most_thirty_seconds,
        await_at_most_two_seconds, try_await_at_most, AsyncAssert, AwaitConfig,
    };
}

// Re-exports
pub use error::{AsyncAssertionError, Error, Result};
pub use evaluator::{
    await_at_most, await_at_most_fifteen_seconds, await_at_most_five_seconds,
    await_at_most_millis, await_at_most_one_second, await_at_most_thirty_seconds,
    await_at_most_two_seconds, try_await_at_most, AsyncAssert,
};
