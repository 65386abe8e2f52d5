//! In-memory page for exercising checks without a browser.
//!
//! `MockPage` matches selectors by exact string: an element registered under
//! `div.nav a` is found by `div.nav a` and nothing else. Titles can be
//! scripted as a sequence to emulate a page whose title settles over time,
//! and reads can be switched to fail the way a closed target would.
//!
//! ## Example
//!
//! ```rust,ignore
//! let page = MockPage::new()
//!     .with_title("Basic Web Page Title")
//!     .with_element("h1", MockElement::new("h1").with_text("Basic Web Page Example"));
//! check_page_title(&page, "Basic Web Page Title", 10, 60)?;
//! ```

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::page::{Element, Locator, Page};
use crate::result::{CheckError, CheckResult};

/// A scripted DOM element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockElement {
    /// Tag name
    pub tag: String,
    /// Attributes by name
    pub attributes: BTreeMap<String, String>,
    /// Text content
    pub text: Option<String>,
    /// Whether the element is rendered visibly
    pub visible: bool,
    /// Whether the element is enabled
    pub enabled: bool,
}

impl MockElement {
    /// Create a visible, enabled element with no attributes
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            text: None,
            visible: true,
            enabled: true,
        }
    }

    /// Create an anchor with the given `href`
    #[must_use]
    pub fn link(href: impl Into<String>) -> Self {
        Self::new("a").with_attribute("href", href)
    }

    /// Set an attribute
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set the text content
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Mark the element as hidden
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Mark the element as disabled
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

impl Element for MockElement {
    fn get_attribute(&self, name: &str) -> CheckResult<Option<String>> {
        Ok(self.attributes.get(name).cloned())
    }

    fn is_enabled(&self) -> CheckResult<bool> {
        Ok(self.enabled)
    }
}

#[derive(Debug, Default)]
struct MockState {
    titles: VecDeque<String>,
    title_reads: usize,
    title_failure: Option<(usize, String)>,
    attribute_failure: Option<String>,
    elements: Vec<(String, MockElement)>,
}

impl MockState {
    fn first(&self, selector: &str) -> Option<&MockElement> {
        self.elements
            .iter()
            .find(|(registered, _)| registered == selector)
            .map(|(_, element)| element)
    }
}

/// In-memory [`Page`]
///
/// Clones share state, so a test can keep a handle and change the page
/// while a check holds another.
#[derive(Debug, Clone, Default)]
pub struct MockPage {
    state: Arc<Mutex<MockState>>,
}

impl MockPage {
    /// Create an empty page with an empty title
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a fixed title
    #[must_use]
    pub fn with_title(self, title: impl Into<String>) -> Self {
        self.set_title(title);
        self
    }

    /// Script successive title reads; the last entry sticks
    #[must_use]
    pub fn with_title_sequence<I, S>(self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lock().titles = titles.into_iter().map(Into::into).collect();
        self
    }

    /// Register an element under `selector`; later registrations match after
    /// earlier ones
    #[must_use]
    pub fn with_element(self, selector: impl Into<String>, element: MockElement) -> Self {
        self.lock().elements.push((selector.into(), element));
        self
    }

    /// Replace the title
    pub fn set_title(&self, title: impl Into<String>) {
        let mut state = self.lock();
        state.titles.clear();
        state.titles.push_back(title.into());
    }

    /// Apply `update` to every element registered under `selector`
    pub fn update_elements(&self, selector: &str, mut update: impl FnMut(&mut MockElement)) {
        let mut state = self.lock();
        state
            .elements
            .iter_mut()
            .filter(|(registered, _)| registered == selector)
            .for_each(|(_, element)| update(element));
    }

    /// Make every title read after the first `reads` fail with `message`
    pub fn fail_title_reads_after(&self, reads: usize, message: impl Into<String>) {
        self.lock().title_failure = Some((reads, message.into()));
    }

    /// Make locator attribute reads fail with `message`
    pub fn fail_attribute_reads(&self, message: impl Into<String>) {
        self.lock().attribute_failure = Some(message.into());
    }

    /// Number of times the title has been read
    #[must_use]
    pub fn title_reads(&self) -> usize {
        self.lock().title_reads
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Page for MockPage {
    fn title(&self) -> CheckResult<String> {
        let mut state = self.lock();
        state.title_reads += 1;
        if let Some((reads, message)) = &state.title_failure {
            if state.title_reads > *reads {
                return Err(CheckError::page(message.clone()));
            }
        }
        let title = if state.titles.len() > 1 {
            state.titles.pop_front()
        } else {
            state.titles.front().cloned()
        };
        Ok(title.unwrap_or_default())
    }

    fn query_selector(&self, selector: &str) -> CheckResult<Option<Box<dyn Element>>> {
        Ok(self
            .lock()
            .first(selector)
            .cloned()
            .map(|element| Box::new(element) as Box<dyn Element>))
    }

    fn locator(&self, selector: &str) -> Box<dyn Locator> {
        Box::new(MockLocator {
            selector: selector.to_string(),
            page: self.clone(),
        })
    }
}

/// Live locator over a [`MockPage`]
#[derive(Debug, Clone)]
pub struct MockLocator {
    selector: String,
    page: MockPage,
}

impl MockLocator {
    fn with_first<T>(&self, read: impl FnOnce(&MockElement) -> T) -> Option<T> {
        self.page.lock().first(&self.selector).map(read)
    }
}

impl Locator for MockLocator {
    fn selector(&self) -> &str {
        &self.selector
    }

    fn count(&self) -> CheckResult<usize> {
        Ok(self
            .page
            .lock()
            .elements
            .iter()
            .filter(|(registered, _)| *registered == self.selector)
            .count())
    }

    fn get_attribute(&self, name: &str) -> CheckResult<Option<String>> {
        let failure = self.page.lock().attribute_failure.clone();
        if let Some(message) = failure {
            return Err(CheckError::page(message));
        }
        Ok(self
            .with_first(|element| element.attributes.get(name).cloned())
            .flatten())
    }

    fn is_visible(&self) -> CheckResult<bool> {
        Ok(self.with_first(|element| element.visible).unwrap_or(false))
    }

    fn text_content(&self) -> CheckResult<Option<String>> {
        Ok(self.with_first(|element| element.text.clone().unwrap_or_default()))
    }
}
