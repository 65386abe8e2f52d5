//! Polling for eventually-consistent page state.
//!
//! The checkers never poll by themselves: they hand a check closure to a
//! [`Waiter`], which owns the timeout and the polling cadence.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::result::{CheckError, Property};

/// Outcome of a single poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionCheckResult {
    /// The condition holds
    Pass,
    /// The condition does not hold yet
    Fail(String),
}

/// Polling budget of the default waiter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total time to keep polling
    pub timeout: Duration,
    /// Pause between polls
    pub poll_interval: Duration,
    /// Maximum number of polls (0 = bounded by the timeout only)
    pub max_retries: usize,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

impl RetryConfig {
    /// Poll every 100ms for up to `timeout`
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            poll_interval: Duration::from_millis(100),
            max_retries: 0,
        }
    }

    /// Set the poll interval
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Half a second of polling every 50ms
    #[must_use]
    pub const fn fast() -> Self {
        Self::new(Duration::from_millis(500)).with_poll_interval(Duration::from_millis(50))
    }

    fn exhausted(&self, attempts: usize, elapsed: Duration) -> bool {
        elapsed >= self.timeout || (self.max_retries > 0 && attempts >= self.max_retries)
    }
}

/// A condition that eventually held
#[derive(Debug, Clone, Copy)]
pub struct RetryResult {
    /// Polls made, including the passing one
    pub attempts: usize,
    /// Time spent polling
    pub duration: Duration,
}

/// A condition that never held within the waiter's budget
#[derive(Debug, Clone)]
pub struct RetryError {
    /// What was being waited for
    pub description: String,
    /// Failure message of the last poll
    pub message: String,
    /// Polls made
    pub attempts: usize,
    /// Time spent polling
    pub duration: Duration,
}

impl RetryError {
    /// Surface this polling failure through the checker error channel
    #[must_use]
    pub fn into_check_error(self, property: Property) -> CheckError {
        CheckError::Timeout {
            property,
            attempts: self.attempts,
            elapsed_ms: u64::try_from(self.duration.as_millis()).unwrap_or(u64::MAX),
            message: format!("{}: {}", self.description, self.message),
        }
    }
}

/// Timeout-bounded "wait until the check passes" capability.
///
/// Checkers take a `Waiter` instead of polling directly, so a fake page can
/// be checked without sleeping and a real engine adapter can plug in its own
/// auto-waiting.
///
/// ```
/// use pagecheck::{AssertionCheckResult, MockPage, Page, RetryConfig, Waiter};
///
/// let page = MockPage::new().with_title("Home Page Title");
/// let check = || match page.title() {
///     Ok(title) if title == "Home Page Title" => AssertionCheckResult::Pass,
///     Ok(title) => AssertionCheckResult::Fail(format!("got '{title}'")),
///     Err(err) => AssertionCheckResult::Fail(err.to_string()),
/// };
/// let result = RetryConfig::fast().wait_until("page title", &check)?;
/// assert_eq!(result.attempts, 1);
/// # Ok::<(), pagecheck::RetryError>(())
/// ```
pub trait Waiter {
    /// Evaluate `check` until it passes or the waiter gives up
    ///
    /// # Errors
    ///
    /// Returns the last failure once the budget is exhausted
    fn wait_until(
        &self,
        description: &str,
        check: &dyn Fn() -> AssertionCheckResult,
    ) -> Result<RetryResult, RetryError>;
}

impl Waiter for RetryConfig {
    fn wait_until(
        &self,
        description: &str,
        check: &dyn Fn() -> AssertionCheckResult,
    ) -> Result<RetryResult, RetryError> {
        let start = Instant::now();
        let mut attempts = 0;

        loop {
            attempts += 1;
            let message = match check() {
                AssertionCheckResult::Pass => {
                    return Ok(RetryResult {
                        attempts,
                        duration: start.elapsed(),
                    })
                }
                AssertionCheckResult::Fail(message) => message,
            };

            if self.exhausted(attempts, start.elapsed()) {
                return Err(RetryError {
                    description: description.to_string(),
                    message,
                    attempts,
                    duration: start.elapsed(),
                });
            }

            tracing::trace!(description, attempts, %message, "retrying assertion");
            std::thread::sleep(self.poll_interval);
        }
    }
}

/// A waiter that evaluates the check exactly once
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SingleAttempt;

impl Waiter for SingleAttempt {
    fn wait_until(
        &self,
        description: &str,
        check: &dyn Fn() -> AssertionCheckResult,
    ) -> Result<RetryResult, RetryError> {
        match check() {
            AssertionCheckResult::Pass => Ok(RetryResult {
                attempts: 1,
                duration: Duration::ZERO,
            }),
            AssertionCheckResult::Fail(message) => Err(RetryError {
                description: description.to_string(),
                message,
                attempts: 1,
                duration: Duration::ZERO,
            }),
        }
    }
}

impl<W: Waiter + ?Sized> Waiter for &W {
    fn wait_until(
        &self,
        description: &str,
        check: &dyn Fn() -> AssertionCheckResult,
    ) -> Result<RetryResult, RetryError> {
        (**self).wait_until(description, check)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// A check that fails `failures` times, then passes
    fn settles_after(
        polls: &AtomicUsize,
        failures: usize,
    ) -> impl Fn() -> AssertionCheckResult + '_ {
        move || {
            if polls.fetch_add(1, Ordering::SeqCst) >= failures {
                AssertionCheckResult::Pass
            } else {
                AssertionCheckResult::Fail("not yet".into())
            }
        }
    }

    mod retry_config_tests {
        use super::*;

        #[test]
        fn test_default_budget() {
            let config = RetryConfig::default();
            assert_eq!(config.timeout, Duration::from_secs(5));
            assert_eq!(config.poll_interval, Duration::from_millis(100));
            assert_eq!(config.max_retries, 0);
        }

        #[test]
        fn test_fast_budget() {
            let config = RetryConfig::fast();
            assert_eq!(config.timeout, Duration::from_millis(500));
            assert_eq!(config.poll_interval, Duration::from_millis(50));
        }

        #[test]
        fn test_passes_once_condition_holds() {
            let polls = AtomicUsize::new(0);
            let config = RetryConfig::new(Duration::from_secs(1))
                .with_poll_interval(Duration::from_millis(5));
            let result = config
                .wait_until("settles", &settles_after(&polls, 2))
                .unwrap();
            assert_eq!(result.attempts, 3);
            assert_eq!(polls.load(Ordering::SeqCst), 3);
        }

        #[test]
        fn test_gives_up_after_timeout() {
            let config = RetryConfig::new(Duration::from_millis(60))
                .with_poll_interval(Duration::from_millis(10));
            let started = Instant::now();
            let err = config
                .wait_until("never", &|| AssertionCheckResult::Fail("still hidden".into()))
                .unwrap_err();
            assert!(started.elapsed() >= Duration::from_millis(60));
            assert!(err.attempts > 1);
            assert_eq!(err.description, "never");
            assert_eq!(err.message, "still hidden");
        }

        #[test]
        fn test_max_retries_caps_polls() {
            let polls = AtomicUsize::new(0);
            let config = RetryConfig {
                timeout: Duration::from_secs(10),
                poll_interval: Duration::from_millis(1),
                max_retries: 3,
            };
            let err = config
                .wait_until("capped", &settles_after(&polls, usize::MAX))
                .unwrap_err();
            assert_eq!(err.attempts, 3);
            assert_eq!(polls.load(Ordering::SeqCst), 3);
        }
    }

    mod single_attempt_tests {
        use super::*;

        #[test]
        fn test_polls_exactly_once() {
            let polls = AtomicUsize::new(0);
            let err = SingleAttempt
                .wait_until("once", &settles_after(&polls, 1))
                .unwrap_err();
            assert_eq!(polls.load(Ordering::SeqCst), 1);
            assert_eq!(err.attempts, 1);
            assert_eq!(err.duration, Duration::ZERO);
        }

        #[test]
        fn test_passing_check() {
            let result = SingleAttempt
                .wait_until("once", &|| AssertionCheckResult::Pass)
                .unwrap();
            assert_eq!(result.attempts, 1);
        }

        #[test]
        fn test_waiter_behind_reference() {
            fn poll_with<W: Waiter>(waiter: W, polls: &AtomicUsize) -> bool {
                waiter.wait_until("ref", &settles_after(polls, 0)).is_ok()
            }
            let polls = AtomicUsize::new(0);
            let waiter: &dyn Waiter = &SingleAttempt;
            assert!(poll_with(waiter, &polls));
            assert!(poll_with(&RetryConfig::fast(), &polls));
        }
    }

    mod retry_error_tests {
        use super::*;

        #[test]
        fn test_into_check_error_keeps_property_and_counts() {
            let err = RetryError {
                description: "a#home".into(),
                message: "still hidden".into(),
                attempts: 7,
                duration: Duration::from_millis(250),
            };
            match err.into_check_error(Property::Visibility) {
                CheckError::Timeout {
                    property,
                    attempts,
                    elapsed_ms,
                    message,
                } => {
                    assert_eq!(property, Property::Visibility);
                    assert_eq!(attempts, 7);
                    assert_eq!(elapsed_ms, 250);
                    assert_eq!(message, "a#home: still hidden");
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }
}
