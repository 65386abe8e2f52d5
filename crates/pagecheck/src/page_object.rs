//! Page contracts
//!
//! A [`PageContract`] describes everything a page must satisfy (title,
//! headings, links) and runs the matching checkers in that order, stopping
//! at the first failure. Contracts are plain data, so they can live in YAML
//! or JSON next to the tests that use them.
//!
//! ```yaml
//! url: https://testpages.eviltester.com/styled/basic-web-page-test.html
//! title:
//!   text: Basic Web Page Title
//! headings:
//!   - selector: h1
//!     text: Basic Web Page Example
//! links:
//!   - selector: div.page-navigation a[href="index.html"]
//!     href: index.html
//!   - selector: div.app-navigation a:has-text("Page")
//! ```

use serde::{Deserialize, Serialize};

use crate::assertion::Waiter;
use crate::heading::{ExpectedHeading, HeadingChecker};
use crate::link::{ExpectedLink, LinkChecker};
use crate::page::Page;
use crate::result::{CheckError, CheckResult};
use crate::title::{ExpectedTitle, TitleChecker};

/// URL of the basic web page used by [`PageContract::basic_web_page`]
pub const BASIC_WEB_PAGE_URL: &str =
    "https://testpages.eviltester.com/styled/basic-web-page-test.html";

/// A link entry in a contract
///
/// With an `href`, the link gets the full link check. Without one, it only
/// has to exist and carry some `href`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkExpectation {
    /// Selector resolving to the link
    pub selector: String,
    /// Exact expected `href`, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl LinkExpectation {
    /// Link that must point at `href`
    #[must_use]
    pub fn to(selector: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            href: Some(href.into()),
        }
    }

    /// Link that only has to exist with some `href`
    #[must_use]
    pub fn present(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            href: None,
        }
    }
}

/// Everything a page must satisfy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageContract {
    /// Page the contract describes; informational, navigation is up to the
    /// harness
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Title expectation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<ExpectedTitle>,
    /// Heading expectations
    pub headings: Vec<ExpectedHeading>,
    /// Link expectations
    pub links: Vec<LinkExpectation>,
}

impl PageContract {
    /// Create an empty contract
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page URL
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the title expectation
    #[must_use]
    pub fn with_title(mut self, title: ExpectedTitle) -> Self {
        self.title = Some(title);
        self
    }

    /// Add a heading expectation
    #[must_use]
    pub fn with_heading(mut self, heading: ExpectedHeading) -> Self {
        self.headings.push(heading);
        self
    }

    /// Add a link expectation
    #[must_use]
    pub fn with_link(mut self, link: LinkExpectation) -> Self {
        self.links.push(link);
        self
    }

    /// Contract for the basic web page test page
    #[must_use]
    pub fn basic_web_page() -> Self {
        Self::new()
            .with_url(BASIC_WEB_PAGE_URL)
            .with_title(ExpectedTitle::new("Basic Web Page Title"))
            .with_heading(ExpectedHeading::new("h1", "Basic Web Page Example"))
            .with_link(LinkExpectation::to(
                r#"div.page-navigation a[href="index.html"]"#,
                "index.html",
            ))
            .with_link(LinkExpectation::present(
                r#"div.app-navigation a:has-text("Page")"#,
            ))
            .with_link(LinkExpectation::present(
                r#"div.app-navigation a[href="page?app=basicwebpageexample&t=About"]"#,
            ))
    }

    /// Parse a contract from YAML
    pub fn from_yaml_str(yaml: &str) -> CheckResult<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Parse a contract from JSON
    pub fn from_json_str(json: &str) -> CheckResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the contract to YAML
    pub fn to_yaml(&self) -> CheckResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Run title, heading and link checks in order, failing on the first
    /// violation
    pub fn verify(&self, page: &dyn Page, waiter: &dyn Waiter) -> CheckResult<()> {
        tracing::info!(
            url = self.url.as_deref().unwrap_or("<unspecified>"),
            "verifying page contract"
        );

        if let Some(title) = &self.title {
            if title.bounds.min_length > title.bounds.max_length {
                tracing::warn!(
                    min_length = title.bounds.min_length,
                    max_length = title.bounds.max_length,
                    "title bounds are inverted; no title can satisfy them"
                );
            }
            TitleChecker::new(title.bounds)
                .with_waiter(waiter)
                .check_expected(page, title)?;
        }

        let headings = HeadingChecker::new().with_waiter(waiter);
        for heading in &self.headings {
            headings.check(page, heading)?;
        }

        let links = LinkChecker::new().with_waiter(waiter);
        for link in &self.links {
            match &link.href {
                Some(href) => links.check(page, &ExpectedLink::new(&link.selector, href))?,
                None => {
                    let _ = links.check_present(page, &link.selector)?;
                }
            }
        }

        tracing::info!(
            headings = self.headings.len(),
            links = self.links.len(),
            "page contract satisfied"
        );
        Ok(())
    }

    /// Like [`Self::verify`], prefixing assertion and timeout messages with
    /// the contract URL
    pub fn verify_labeled(&self, page: &dyn Page, waiter: &dyn Waiter) -> CheckResult<()> {
        let Some(url) = &self.url else {
            return self.verify(page, waiter);
        };
        self.verify(page, waiter).map_err(|err| match err {
            CheckError::AssertionFailed { property, message } => CheckError::AssertionFailed {
                property,
                message: format!("{url}: {message}"),
            },
            CheckError::Timeout {
                property,
                attempts,
                elapsed_ms,
                message,
            } => CheckError::Timeout {
                property,
                attempts,
                elapsed_ms,
                message: format!("{url}: {message}"),
            },
            other => other,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::assertion::SingleAttempt;
    use crate::config::TitleBounds;
    use crate::mock::{MockElement, MockPage};
    use crate::result::Property;

    fn basic_page() -> MockPage {
        MockPage::new()
            .with_title("Basic Web Page Title")
            .with_element("h1", MockElement::new("h1").with_text("Basic Web Page Example"))
            .with_element(
                r#"div.page-navigation a[href="index.html"]"#,
                MockElement::link("index.html"),
            )
            .with_element(
                r#"div.app-navigation a:has-text("Page")"#,
                MockElement::link("page?app=basicwebpageexample&t=Page").with_text("Page"),
            )
            .with_element(
                r#"div.app-navigation a[href="page?app=basicwebpageexample&t=About"]"#,
                MockElement::link("page?app=basicwebpageexample&t=About").with_text("About"),
            )
    }

    mod builder_tests {
        use super::*;

        #[test]
        fn test_basic_web_page_preset() {
            let contract = PageContract::basic_web_page();
            assert_eq!(contract.url.as_deref(), Some(BASIC_WEB_PAGE_URL));
            assert_eq!(contract.headings.len(), 1);
            assert_eq!(contract.links.len(), 3);
            assert_eq!(contract.links[0].href.as_deref(), Some("index.html"));
            assert!(contract.links[1].href.is_none());
        }

        #[test]
        fn test_yaml_roundtrip_of_preset() {
            let contract = PageContract::basic_web_page();
            let yaml = contract.to_yaml().unwrap();
            assert_eq!(PageContract::from_yaml_str(&yaml).unwrap(), contract);
        }

        #[test]
        fn test_from_yaml_with_bounds() {
            let yaml = r#"
title:
  text: Short
  bounds:
    min_length: 1
    max_length: 10
links:
  - selector: a.home
"#;
            let contract = PageContract::from_yaml_str(yaml).unwrap();
            let title = contract.title.unwrap();
            assert_eq!(title.bounds, TitleBounds::new(1, 10));
            assert!(contract.headings.is_empty());
            assert_eq!(contract.links, vec![LinkExpectation::present("a.home")]);
        }

        #[test]
        fn test_from_json() {
            let json = r#"{"title": {"text": "Basic Web Page Title"}, "headings": [{"selector": "h1", "text": "Hi"}]}"#;
            let contract = PageContract::from_json_str(json).unwrap();
            assert_eq!(contract.title.unwrap().bounds, TitleBounds::default());
            assert_eq!(contract.headings[0].text, "Hi");
        }
    }

    mod verify_tests {
        use super::*;

        #[test]
        fn test_basic_page_satisfies_contract() {
            let result = PageContract::basic_web_page().verify(&basic_page(), &SingleAttempt);
            assert!(result.is_ok(), "{result:?}");
        }

        #[test]
        fn test_empty_contract_passes_anything() {
            assert!(PageContract::new()
                .verify(&MockPage::new(), &SingleAttempt)
                .is_ok());
        }

        #[test]
        fn test_title_failure_stops_before_links() {
            let page = basic_page();
            page.set_title("Hi");
            let err = PageContract::basic_web_page()
                .verify(&page, &SingleAttempt)
                .unwrap_err();
            assert_eq!(err.property(), Some(Property::Title));
        }

        #[test]
        fn test_presence_only_link_missing_href() {
            let page = basic_page();
            page.update_elements(r#"div.app-navigation a:has-text("Page")"#, |element| {
                let _ = element.attributes.remove("href");
            });
            let err = PageContract::basic_web_page()
                .verify(&page, &SingleAttempt)
                .unwrap_err();
            assert_eq!(err.property(), Some(Property::Href));
        }

        #[test]
        fn test_verify_labeled_prefixes_url() {
            let page = basic_page();
            page.update_elements("h1", |element| element.visible = false);
            let err = PageContract::basic_web_page()
                .verify_labeled(&page, &SingleAttempt)
                .unwrap_err();
            assert!(err.to_string().contains(BASIC_WEB_PAGE_URL));
            assert_eq!(err.property(), Some(Property::Visibility));
        }
    }
}
