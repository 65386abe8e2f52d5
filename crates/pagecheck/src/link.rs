//! Navigation link checks.

use serde::{Deserialize, Serialize};

use crate::assertion::{Assertion, RetryConfig, Waiter};
use crate::config::CheckConfig;
use crate::expect::expect_locator;
use crate::page::Page;
use crate::result::{CheckError, CheckResult, Property};

/// A link selector and the `href` it must carry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedLink {
    /// Selector resolving to one or more anchors
    pub selector: String,
    /// Exact expected `href` attribute
    pub href: String,
}

impl ExpectedLink {
    /// Create a new link expectation
    #[must_use]
    pub fn new(selector: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            href: href.into(),
        }
    }
}

/// Validates that a link exists, is visible, is enabled and points where
/// it should
#[derive(Debug, Clone, Default)]
pub struct LinkChecker<W = RetryConfig> {
    waiter: W,
}

impl LinkChecker {
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

impl<W: Waiter> LinkChecker<W> {
    /// Replace the polling capability
    #[must_use]
    pub fn with_waiter<V: Waiter>(self, waiter: V) -> LinkChecker<V> {
        LinkChecker { waiter }
    }

    /// Run every link check, failing on the first violated property
    pub fn check(&self, page: &dyn Page, expected: &ExpectedLink) -> CheckResult<()> {
        let ExpectedLink { selector, href } = expected;
        tracing::info!(%selector, "checking navigation link");

        let element = Assertion::is_some(
            Property::LinkPresence,
            page.query_selector(selector)?,
            &format!("expected to find a link matching '{selector}'"),
        )?;

        let locator = page.locator(selector);
        let count = locator.count()?;
        Assertion::is_true(
            Property::LinkPresence,
            count > 0,
            &format!("expected '{selector}' to match at least one element, but it matched none"),
        )?;
        tracing::debug!(%selector, count, "link located");

        expect_locator(locator.as_ref(), &self.waiter).to_have_attribute("href", href)?;

        match locator.get_attribute("href")? {
            Some(actual) if actual == *href => {}
            Some(actual) => {
                return Err(CheckError::assertion(
                    Property::Href,
                    format!("expected href of '{selector}' to be '{href}', but got '{actual}'"),
                ))
            }
            None => {
                return Err(CheckError::assertion(
                    Property::Href,
                    format!("expected href of '{selector}' to be '{href}', but it has no href"),
                ))
            }
        }

        expect_locator(locator.as_ref(), &self.waiter).to_be_visible()?;

        Assertion::is_true(
            Property::EnabledState,
            element.is_enabled()?,
            &format!("expected link '{selector}' to be enabled"),
        )?;

        tracing::info!(%selector, %href, "navigation link is correct");
        Ok(())
    }

    /// Check that a link exists and carries an `href`, returning it
    ///
    /// Lighter than [`Self::check`]: no visibility or enabled checks, and
    /// any `href` value is accepted.
    pub fn check_present(&self, page: &dyn Page, selector: &str) -> CheckResult<String> {
        tracing::info!(%selector, "checking link presence");

        let element = Assertion::is_some(
            Property::LinkPresence,
            page.query_selector(selector)?,
            &format!("expected to find a link matching '{selector}'"),
        )?;
        let href = Assertion::is_some(
            Property::Href,
            element.get_attribute("href")?,
            &format!("expected link '{selector}' to have an href attribute"),
        )?;

        tracing::debug!(%selector, %href, "link is present");
        Ok(href)
    }
}

/// Check a link with default polling
pub fn check_link(page: &dyn Page, selector: &str, expected_href: &str) -> CheckResult<()> {
    LinkChecker::new().check(page, &ExpectedLink::new(selector, expected_href))
}

/// Check that a link exists and has an `href`, returning the `href`
pub fn check_link_present(page: &dyn Page, selector: &str) -> CheckResult<String> {
    LinkChecker::new().check_present(page, selector)
}
