//! Time control for assertion loops
//!
//! The `clock` module abstracts how an assertion loop measures elapsed time
//! and pauses between checks:
//!
//! - [`Time`] - source of [`ElapsedTime`] and [`WaitCondition`]s
//! - [`SystemTime`] - real time, used by default
//! - [`MockClock`] - virtual time that records every requested wait
//! - [`WaitSignal`] - wakes waiters early when the observed state changes
//!
//! # Example
//!
//! ```rust
//! use assertkit_async::clock::MockClock;
//! use std::time::Duration;
//!
//! let clock = MockClock::new();
//! assert_eq!(clock.now(), Duration::ZERO);
//!
//! clock.advance(Duration::from_secs(10));
//! assert_eq!(clock.now(), Duration::from_secs(10));
//! ```

mod mock_clock;
mod signal;
mod time;

pub use mock_clock::MockClock;
pub use signal::WaitSignal;
pub use time::{ElapsedTime, SystemTime, Time, WaitCondition};
