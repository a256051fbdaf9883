//! Outcome of a single evaluation of an assertion block.

use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

use super::AwaitConfig;
use crate::assertions::SoftAssertions;
use crate::error::AsyncAssertionError;

const UNDEFINED_FAILURE: &str = "Failed to evaluate async assertions";

thread_local! {
    /// Set while this thread runs an assertion block
    static CAPTURING: Cell<bool> = const { Cell::new(false) };
}

static HOOK: Once = Once::new();

/// Wraps the panic hook so panics caught as check failures are not printed.
fn install_quiet_hook() {
    HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !CAPTURING.with(Cell::get) {
                previous(info);
            }
        }));
    });
}

/// Marks the current thread as capturing panics until dropped.
struct CaptureGuard {
    was_capturing: bool,
}

impl CaptureGuard {
    fn enter() -> Self {
        install_quiet_hook();
        Self {
            was_capturing: CAPTURING.with(|flag| flag.replace(true)),
        }
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        CAPTURING.with(|flag| flag.set(self.was_capturing));
    }
}

#[derive(Debug)]
pub(crate) struct CheckResult {
    failures: Vec<String>,
}

impl CheckResult {
    /// Failed result used before the first evaluation.
    pub(crate) fn undefined() -> Self {
        Self {
            failures: vec![UNDEFINED_FAILURE.to_string()],
        }
    }

    /// Runs `assertions` against fresh soft assertions.
    ///
    /// A panic inside the block counts as a failure. When the panic comes from
    /// an explicit `assert_all`, the collected failures are kept as they are.
    /// Such panics are not passed to the panic hook, so retried checks stay
    /// silent on stderr.
    pub(crate) fn evaluate<F>(assertions: &mut F) -> Self
    where
        F: FnMut(&mut SoftAssertions),
    {
        let mut soft = SoftAssertions::new();
        let outcome = {
            let _guard = CaptureGuard::enter();
            panic::catch_unwind(AssertUnwindSafe(|| assertions(&mut soft)))
        };
        let reported = soft.was_reported();
        let mut failures = soft.into_failures();
        if let Err(payload) = outcome {
            if !reported {
                failures.push(panic_message(payload.as_ref()));
            }
        }
        Self { failures }
    }

    pub(crate) fn has_failed(&self) -> bool {
        !self.failures.is_empty()
    }

    pub(crate) fn into_result(self, config: &AwaitConfig) -> Result<(), AsyncAssertionError> {
        if self.has_failed() {
            Err(AsyncAssertionError::new(config.timeout(), self.failures))
        } else {
            Ok(())
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "assertion block panicked".to_string()
    }
}
