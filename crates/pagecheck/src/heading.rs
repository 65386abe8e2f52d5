//! Heading checks.

use serde::{Deserialize, Serialize};

use crate::assertion::{Assertion, RetryConfig, Waiter};
use crate::config::CheckConfig;
use crate::expect::expect_locator;
use crate::page::Page;
use crate::result::{CheckError, CheckResult, Property};

/// A heading selector and the exact text it must show
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedHeading {
    /// Selector resolving to the heading
    pub selector: String,
    /// Exact expected text content
    pub text: String,
}

impl ExpectedHeading {
    /// Create a new heading expectation
    #[must_use]
    pub fn new(selector: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            text: text.into(),
        }
    }
}

/// Validates the text and visibility of a heading
#[derive(Debug, Clone, Default)]
pub struct HeadingChecker<W = RetryConfig> {
    waiter: W,
}

impl HeadingChecker {
    /// Checker with default polling
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checker built from shared configuration
    #[must_use]
    pub const fn from_config(config: &CheckConfig) -> Self {
        Self {
            waiter: config.waiter(),
        }
    }
}

impl<W: Waiter> HeadingChecker<W> {
    /// Replace the polling capability
    #[must_use]
    pub fn with_waiter<V: Waiter>(self, waiter: V) -> HeadingChecker<V> {
        HeadingChecker { waiter }
    }

    /// Check text (polled, then read immediately), visibility (polled, then
    /// read immediately) and presence
    pub fn check(&self, page: &dyn Page, expected: &ExpectedHeading) -> CheckResult<()> {
        let ExpectedHeading { selector, text } = expected;
        let locator = page.locator(selector);

        expect_locator(locator.as_ref(), &self.waiter).to_have_text(text)?;
        let actual = locator.text_content()?;
        if actual.as_deref() != Some(text.as_str()) {
            return Err(CheckError::assertion(
                Property::Text,
                format!(
                    "expected text of '{selector}' to be '{text}', but got {}",
                    actual.map_or_else(|| "no element".to_string(), |t| format!("'{t}'"))
                ),
            ));
        }

        expect_locator(locator.as_ref(), &self.waiter).to_be_visible()?;
        Assertion::is_true(
            Property::Visibility,
            locator.is_visible()?,
            &format!("expected '{selector}' to be visible"),
        )?;

        let count = locator.count()?;
        Assertion::is_true(
            Property::ElementPresence,
            count > 0,
            &format!("expected '{selector}' to be present"),
        )?;

        tracing::info!(%selector, count, "heading is present and correct");
        Ok(())
    }
}

/// Check a heading with default polling
pub fn check_heading(page: &dyn Page, selector: &str, expected_text: &str) -> CheckResult<()> {
    HeadingChecker::new().check(page, &ExpectedHeading::new(selector, expected_text))
}
