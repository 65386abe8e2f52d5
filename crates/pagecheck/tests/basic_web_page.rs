//! End-to-end checks of the basic web page, run against an in-memory copy
//! of its structure.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::time::Duration;

use pagecheck::{
    check_heading, check_link, check_link_present, check_page_title, init_logging, CheckError,
    LinkChecker, LoggingConfig, MockElement, MockPage, PageContract, Property, RetryConfig,
    SingleAttempt, TitleBounds, TitleChecker,
};

const INDEX_LINK: &str = r#"div.page-navigation a[href="index.html"]"#;
const PAGE_LINK: &str = r#"div.app-navigation a:has-text("Page")"#;
const ABOUT_LINK: &str = r#"div.app-navigation a[href="page?app=basicwebpageexample&t=About"]"#;
const FOOTER_LINK: &str = "div.page-footer a";

/// The page as the harness fixture would hand it over after navigation
fn page() -> MockPage {
    let _ = init_logging(&LoggingConfig::for_tests());
    MockPage::new()
        .with_title("Basic Web Page Title")
        .with_element(
            "h1",
            MockElement::new("h1").with_text("Basic Web Page Example"),
        )
        .with_element(INDEX_LINK, MockElement::link("index.html").with_text("Index"))
        .with_element(
            PAGE_LINK,
            MockElement::link("page?app=basicwebpageexample&t=Page").with_text("Page"),
        )
        .with_element(
            ABOUT_LINK,
            MockElement::link("page?app=basicwebpageexample&t=About").with_text("About"),
        )
        .with_element(
            FOOTER_LINK,
            MockElement::link("https://eviltester.com").with_text("EvilTester.com"),
        )
}

// ============================================================================
// Page scenarios
// ============================================================================

#[test]
fn test_example_page_title() {
    check_page_title(&page(), "Basic Web Page Title", 10, 60).unwrap();
}

#[test]
fn test_navigation_links() {
    check_link(&page(), INDEX_LINK, "index.html").unwrap();
}

#[test]
fn test_footer_link() {
    check_link(&page(), FOOTER_LINK, "https://eviltester.com").unwrap();
}

#[test]
fn test_app_navigation_links() {
    let page = page();
    check_link_present(&page, PAGE_LINK).unwrap();
    let about = check_link_present(&page, ABOUT_LINK).unwrap();
    assert_eq!(about, "page?app=basicwebpageexample&t=About");
}

#[test]
fn test_example_page_heading() {
    check_heading(&page(), "h1", "Basic Web Page Example").unwrap();
}

#[test]
fn test_whole_page_contract() {
    PageContract::basic_web_page()
        .verify(&page(), &RetryConfig::fast())
        .unwrap();
}

// ============================================================================
// Failure scenarios
// ============================================================================

#[test]
fn test_wrong_footer_href_names_href() {
    let err = LinkChecker::new()
        .with_waiter(SingleAttempt)
        .check(
            &page(),
            &pagecheck::ExpectedLink::new(FOOTER_LINK, "https://wrong.example"),
        )
        .unwrap_err();
    assert_eq!(err.property(), Some(Property::Href));
    assert!(err.to_string().contains("https://wrong.example"));
}

#[test]
fn test_short_title_names_length() {
    let page = page().with_title("Hi");
    let err = check_page_title(&page, "Hi", 10, 60).unwrap_err();
    assert_eq!(err.property(), Some(Property::TitleLength));
}

#[test]
fn test_missing_link_never_passes() {
    let err = check_link(&MockPage::new(), INDEX_LINK, "index.html").unwrap_err();
    assert_eq!(err.property(), Some(Property::LinkPresence));
}

#[test]
fn test_page_closing_after_title_settles() {
    let page = page();
    page.fail_title_reads_after(1, "target page, context or browser has been closed");
    let err = TitleChecker::new(TitleBounds::default())
        .with_waiter(SingleAttempt)
        .check(&page, "Basic Web Page Title")
        .unwrap_err();
    assert!(matches!(err, CheckError::Page { .. }));
    assert!(err.to_string().contains("has been closed"));
}

#[test]
fn test_late_heading_is_waited_for() {
    let page = page();
    page.update_elements("h1", |element| element.text = Some("Loading".into()));
    let handle = page.clone();
    let settle = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(40));
        handle.update_elements("h1", |element| {
            element.text = Some("Basic Web Page Example".into());
        });
    });

    let result = check_heading(&page, "h1", "Basic Web Page Example");
    settle.join().unwrap();
    result.unwrap();
}

#[test]
fn test_title_checker_with_custom_bounds() {
    let checker = TitleChecker::new(TitleBounds::new(5, 25)).with_waiter(SingleAttempt);
    assert_eq!(checker.bounds(), TitleBounds::new(5, 25));
    checker.check(&page(), "Basic Web Page Title").unwrap();
}

#[test]
fn test_checks_are_repeatable() {
    let page = page();
    for _ in 0..2 {
        check_page_title(&page, "Basic Web Page Title", 10, 60).unwrap();
        check_link(&page, INDEX_LINK, "index.html").unwrap();
    }
}
