//! Page title checks.
//!
//! A title passes when it matches exactly (first through a polling
//! `expect`, then through an immediate read so a title that changes right
//! after the poll is still caught), its length lies within the configured
//! bounds, and it carries no surrounding whitespace.

use serde::{Deserialize, Serialize};

use crate::assertion::{Assertion, RetryConfig, Waiter};
use crate::config::{CheckConfig, TitleBounds};
use crate::expect::expect_page;
use crate::page::Page;
use crate::result::{CheckError, CheckResult, Property};

/// Expected title text and its length bounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedTitle {
    /// Exact expected title
    pub text: String,
    /// Inclusive character-count bounds
    #[serde(default)]
    pub bounds: TitleBounds,
}

impl ExpectedTitle {
    /// Expect `text` with the default bounds
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bounds: TitleBounds::default(),
        }
    }

    /// Override the length bounds
    #[must_use]
    pub const fn with_bounds(mut self, bounds: TitleBounds) -> Self {
        self.bounds = bounds;
        self
    }
}

/// Validates a page title
#[derive(Debug, Clone)]
pub struct TitleChecker<W = RetryConfig> {
    bounds: TitleBounds,
    waiter: W,
}

impl Default for TitleChecker {
    fn default() -> Self {
        Self::new(TitleBounds::default())
    }
}

impl TitleChecker {
    /// Checker with the given bounds and default polling
    #[must_use]
    pub fn new(bounds: TitleBounds) -> Self {
        Self {
            bounds,
            waiter: RetryConfig::default(),
        }
    }

    /// Checker built from shared configuration
    #[must_use]
    pub const fn from_config(config: &CheckConfig) -> Self {
        Self {
            bounds: config.title_bounds,
            waiter: config.waiter(),
        }
    }
}

impl<W: Waiter> TitleChecker<W> {
    /// Replace the polling capability
    #[must_use]
    pub fn with_waiter<V: Waiter>(self, waiter: V) -> TitleChecker<V> {
        TitleChecker {
            bounds: self.bounds,
            waiter,
        }
    }

    /// The bounds applied by [`Self::check`]
    #[must_use]
    pub const fn bounds(&self) -> TitleBounds {
        self.bounds
    }

    /// Check the title against `expected` using this checker's bounds
    pub fn check(&self, page: &dyn Page, expected: &str) -> CheckResult<()> {
        self.verify(page, expected, self.bounds)
    }

    /// Check the title against an [`ExpectedTitle`], using its own bounds
    pub fn check_expected(&self, page: &dyn Page, expected: &ExpectedTitle) -> CheckResult<()> {
        self.verify(page, &expected.text, expected.bounds)
    }

    fn verify(&self, page: &dyn Page, expected: &str, bounds: TitleBounds) -> CheckResult<()> {
        expect_page(page, &self.waiter).to_have_title(expected)?;

        let title = page.title()?;
        if title != expected {
            return Err(CheckError::assertion(
                Property::Title,
                format!("expected title to be '{expected}', but got '{title}'"),
            ));
        }

        let length = title.chars().count();
        Assertion::is_true(
            Property::TitleLength,
            bounds.contains(length),
            &format!(
                "expected title length to be between {} and {} characters, but got {length} characters",
                bounds.min_length, bounds.max_length
            ),
        )?;

        // Padding on both sides is reported as one violation, before the
        // one-sided checks get a chance to claim it.
        let leading = title != title.trim_start();
        let trailing = title != title.trim_end();
        Assertion::is_true(
            Property::SurroundingWhitespace,
            !(leading && trailing),
            &format!("expected title to have no leading or trailing whitespace, but got '{title}'"),
        )?;
        Assertion::is_true(
            Property::TrailingWhitespace,
            !trailing,
            &format!("expected title to have no trailing whitespace, but got '{title}'"),
        )?;
        Assertion::is_true(
            Property::LeadingWhitespace,
            !leading,
            &format!("expected title to have no leading whitespace, but got '{title}'"),
        )?;

        tracing::info!(
            %title,
            length,
            "title is correct, has appropriate length, and has no leading or trailing whitespace"
        );
        Ok(())
    }
}

/// Check the page title with explicit bounds and default polling
pub fn check_page_title(
    page: &dyn Page,
    expected: &str,
    min_length: usize,
    max_length: usize,
) -> CheckResult<()> {
    TitleChecker::new(TitleBounds::new(min_length, max_length)).check(page, expected)
}
