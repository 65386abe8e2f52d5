//! Page capability traits.
//!
//! These are the seams to the browser-automation engine. An adapter for a
//! real engine implements them on top of its own page and element handles;
//! [`crate::mock::MockPage`] implements them in memory. Checkers only read
//! through these traits and never mutate the page.

use crate::result::CheckResult;

/// A live page that has already been navigated by the test harness
pub trait Page {
    /// Current document title (immediate read)
    fn title(&self) -> CheckResult<String>;

    /// One-shot query for the first element matching `selector`
    fn query_selector(&self, selector: &str) -> CheckResult<Option<Box<dyn Element>>>;

    /// Live, re-resolvable reference to the elements matching `selector`
    fn locator(&self, selector: &str) -> Box<dyn Locator>;
}

/// A snapshot handle to a single DOM element
pub trait Element {
    /// Attribute value, `None` when the attribute is absent
    fn get_attribute(&self, name: &str) -> CheckResult<Option<String>>;

    /// Whether the element is enabled (interactable)
    fn is_enabled(&self) -> CheckResult<bool>;
}

/// A live locator. Single-element reads resolve to the first match at the
/// time of the call.
pub trait Locator {
    /// The selector this locator resolves
    fn selector(&self) -> &str;

    /// Number of elements currently matching
    fn count(&self) -> CheckResult<usize>;

    /// Attribute of the first match, `None` when absent or nothing matches
    fn get_attribute(&self, name: &str) -> CheckResult<Option<String>>;

    /// Whether the first match is visible, `false` when nothing matches
    fn is_visible(&self) -> CheckResult<bool>;

    /// Text content of the first match, `None` when nothing matches
    fn text_content(&self) -> CheckResult<Option<String>>;
}
