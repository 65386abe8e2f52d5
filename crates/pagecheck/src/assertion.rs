//! Assertions for page validation.
//!
//! Immediate comparisons live here; polling goes through a [`Waiter`].

mod retry;

pub use retry::{AssertionCheckResult, RetryConfig, RetryError, RetryResult, SingleAttempt, Waiter};

use crate::result::{CheckError, CheckResult, Property};

/// Immediate (non-retrying) assertion helpers
#[derive(Debug, Clone, Copy)]
pub struct Assertion;

impl Assertion {
    /// Assert a condition is true
    pub fn is_true(property: Property, condition: bool, message: &str) -> CheckResult<()> {
        if condition {
            Ok(())
        } else {
            Err(CheckError::assertion(property, message))
        }
    }

    /// Assert an Option is Some, yielding its value
    pub fn is_some<T>(property: Property, opt: Option<T>, message: &str) -> CheckResult<T> {
        opt.ok_or_else(|| CheckError::assertion(property, message))
    }
}
