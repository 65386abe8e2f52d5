//! pagecheck: page assertion helpers for end-to-end browser tests
//!
//! Reusable checks for an already-navigated page: the title, headings and
//! navigation links. The browser engine stays outside the crate; it is
//! reached through the [`Page`], [`Element`] and [`Locator`] traits, and its
//! auto-waiting through the [`Waiter`] trait.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────────────┐   ┌─────────────────┐
//! │ Test case    │──►│ TitleChecker             │──►│ Page / Locator  │
//! │ (harness     │   │ LinkChecker              │   │ (engine adapter │
//! │  fixture)    │   │ HeadingChecker           │   │  or MockPage)   │
//! └──────────────┘   │ PageContract             │   └─────────────────┘
//!                    └────────────┬─────────────┘
//!                                 │ expect_page / expect_locator
//!                                 ▼
//!                    ┌──────────────────────────┐
//!                    │ Waiter (RetryConfig,     │
//!                    │         SingleAttempt)   │
//!                    └──────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use pagecheck::{check_link, check_page_title, MockElement, MockPage};
//!
//! let page = MockPage::new()
//!     .with_title("Basic Web Page Title")
//!     .with_element(
//!         r#"div.page-navigation a[href="index.html"]"#,
//!         MockElement::link("index.html"),
//!     );
//!
//! check_page_title(&page, "Basic Web Page Title", 10, 60)?;
//! check_link(&page, r#"div.page-navigation a[href="index.html"]"#, "index.html")?;
//! # Ok::<(), pagecheck::CheckError>(())
//! ```

#![warn(missing_docs)]

mod assertion;
mod config;
mod expect;
mod heading;
mod link;
mod page;
mod page_object;
mod result;
mod title;

/// In-memory page for tests
pub mod mock;

/// Tracing subscriber setup
pub mod logging;

pub use assertion::{
    Assertion, AssertionCheckResult, RetryConfig, RetryError, RetryResult, SingleAttempt, Waiter,
};
pub use config::{CheckConfig, TitleBounds, DEFAULT_MAX_TITLE_LENGTH, DEFAULT_MIN_TITLE_LENGTH};
pub use expect::{expect_locator, expect_page, LocatorExpect, PageExpect};
pub use heading::{check_heading, ExpectedHeading, HeadingChecker};
pub use link::{check_link, check_link_present, ExpectedLink, LinkChecker};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use mock::{MockElement, MockLocator, MockPage};
pub use page::{Element, Locator, Page};
pub use page_object::{LinkExpectation, PageContract, BASIC_WEB_PAGE_URL};
pub use result::{CheckError, CheckResult, Property};
pub use title::{check_page_title, ExpectedTitle, TitleChecker};
