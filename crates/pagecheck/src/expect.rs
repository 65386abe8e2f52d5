//! Playwright-style `expect()` assertions.
//!
//! Every assertion here polls through the injected [`Waiter`] until its
//! condition holds, then reports the outcome as a [`CheckResult`]. Errors
//! raised by the page while polling count as a failed poll, not a hard
//! failure, so a page that is still settling gets the full budget.

use std::fmt;

use crate::assertion::{AssertionCheckResult, RetryResult, Waiter};
use crate::page::{Locator, Page};
use crate::result::{CheckResult, Property};

/// Smart assertion builder for a page
pub struct PageExpect<'a> {
    page: &'a dyn Page,
    waiter: &'a dyn Waiter,
}

impl<'a> PageExpect<'a> {
    /// Create a new expectation for a page
    #[must_use]
    pub fn new(page: &'a dyn Page, waiter: &'a dyn Waiter) -> Self {
        Self { page, waiter }
    }

    /// Assert the page title equals `expected`
    pub fn to_have_title(&self, expected: &str) -> CheckResult<RetryResult> {
        let check = || match self.page.title() {
            Ok(actual) if actual == expected => AssertionCheckResult::Pass,
            Ok(actual) => AssertionCheckResult::Fail(format!(
                "expected page title '{expected}', got '{actual}'"
            )),
            Err(err) => AssertionCheckResult::Fail(err.to_string()),
        };
        self.waiter
            .wait_until("page title", &check)
            .map_err(|err| err.into_check_error(Property::Title))
    }
}

impl fmt::Debug for PageExpect<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageExpect").finish_non_exhaustive()
    }
}

/// Smart assertion builder for a locator
pub struct LocatorExpect<'a> {
    locator: &'a dyn Locator,
    waiter: &'a dyn Waiter,
}

impl<'a> LocatorExpect<'a> {
    /// Create a new expectation for a locator
    #[must_use]
    pub fn new(locator: &'a dyn Locator, waiter: &'a dyn Waiter) -> Self {
        Self { locator, waiter }
    }

    /// Assert the first match carries attribute `name` with value `expected`
    pub fn to_have_attribute(&self, name: &str, expected: &str) -> CheckResult<RetryResult> {
        let selector = self.locator.selector();
        let check = || match self.locator.get_attribute(name) {
            Ok(Some(actual)) if actual == expected => AssertionCheckResult::Pass,
            Ok(Some(actual)) => AssertionCheckResult::Fail(format!(
                "expected {name} of '{selector}' to be '{expected}', got '{actual}'"
            )),
            Ok(None) => AssertionCheckResult::Fail(format!(
                "expected {name} of '{selector}' to be '{expected}', but the attribute is missing"
            )),
            Err(err) => AssertionCheckResult::Fail(err.to_string()),
        };
        let property = if name == "href" {
            Property::Href
        } else {
            Property::Attribute
        };
        self.waiter
            .wait_until(selector, &check)
            .map_err(|err| err.into_check_error(property))
    }

    /// Assert the first match is visible
    pub fn to_be_visible(&self) -> CheckResult<RetryResult> {
        let selector = self.locator.selector();
        let check = || match self.locator.is_visible() {
            Ok(true) => AssertionCheckResult::Pass,
            Ok(false) => AssertionCheckResult::Fail(format!("expected '{selector}' to be visible")),
            Err(err) => AssertionCheckResult::Fail(err.to_string()),
        };
        self.waiter
            .wait_until(selector, &check)
            .map_err(|err| err.into_check_error(Property::Visibility))
    }

    /// Assert the first match has exactly the text `expected`
    pub fn to_have_text(&self, expected: &str) -> CheckResult<RetryResult> {
        let selector = self.locator.selector();
        let check = || match self.locator.text_content() {
            Ok(Some(actual)) if actual == expected => AssertionCheckResult::Pass,
            Ok(Some(actual)) => AssertionCheckResult::Fail(format!(
                "expected text of '{selector}' to be '{expected}', got '{actual}'"
            )),
            Ok(None) => {
                AssertionCheckResult::Fail(format!("expected '{selector}' to match an element"))
            }
            Err(err) => AssertionCheckResult::Fail(err.to_string()),
        };
        self.waiter
            .wait_until(selector, &check)
            .map_err(|err| err.into_check_error(Property::Text))
    }
}

impl fmt::Debug for LocatorExpect<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocatorExpect")
            .field("selector", &self.locator.selector())
            .finish_non_exhaustive()
    }
}

/// Create an expectation for a page (Playwright-style)
#[must_use]
pub fn expect_page<'a>(page: &'a dyn Page, waiter: &'a dyn Waiter) -> PageExpect<'a> {
    PageExpect::new(page, waiter)
}

/// Create an expectation for a locator (Playwright-style)
#[must_use]
pub fn expect_locator<'a>(locator: &'a dyn Locator, waiter: &'a dyn Waiter) -> LocatorExpect<'a> {
    LocatorExpect::new(locator, waiter)
}
