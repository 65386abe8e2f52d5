//! Result and error types for pagecheck.

use std::fmt;

use thiserror::Error;

/// Result type for pagecheck operations
pub type CheckResult<T> = Result<T, CheckError>;

/// The page property a check was verifying when it failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    /// Exact title text
    Title,
    /// Title character count bounds
    TitleLength,
    /// Whitespace at the start of the title
    LeadingWhitespace,
    /// Whitespace at the end of the title
    TrailingWhitespace,
    /// Whitespace on both sides of the title
    SurroundingWhitespace,
    /// A link selector resolving to an element
    LinkPresence,
    /// A non-link selector resolving to an element
    ElementPresence,
    /// The `href` attribute of a link
    Href,
    /// Any other attribute value
    Attribute,
    /// Element visibility
    Visibility,
    /// Element enabled / interactable state
    EnabledState,
    /// Element text content
    Text,
}

impl Property {
    /// Human-readable property name used in failure messages
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::TitleLength => "title length",
            Self::LeadingWhitespace => "leading whitespace",
            Self::TrailingWhitespace => "trailing whitespace",
            Self::SurroundingWhitespace => "surrounding whitespace",
            Self::LinkPresence => "link presence",
            Self::ElementPresence => "element presence",
            Self::Href => "href",
            Self::Attribute => "attribute",
            Self::Visibility => "visibility",
            Self::EnabledState => "enabled state",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors that can occur while checking a page
#[derive(Debug, Error)]
pub enum CheckError {
    /// A property did not hold on an immediate read
    #[error("Assertion failed ({property}): {message}")]
    AssertionFailed {
        /// Violated property
        property: Property,
        /// Expected vs. actual description
        message: String,
    },

    /// A polled condition never held within the waiter's budget
    #[error(
        "Assertion did not hold ({property}) after {attempts} attempt(s) in {elapsed_ms}ms: {message}"
    )]
    Timeout {
        /// Violated property
        property: Property,
        /// Number of polls made
        attempts: usize,
        /// Time spent polling in milliseconds
        elapsed_ms: u64,
        /// Last failure message from the poll
        message: String,
    },

    /// The page adapter itself failed
    #[error("Page error: {message}")]
    Page {
        /// Error message
        message: String,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Logging could not be initialised
    #[error("Logging setup failed: {message}")]
    Logging {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl CheckError {
    /// Build an assertion failure for `property`
    pub fn assertion(property: Property, message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            property,
            message: message.into(),
        }
    }

    /// Build a page adapter error
    pub fn page(message: impl Into<String>) -> Self {
        Self::Page {
            message: message.into(),
        }
    }

    /// The violated property, for assertion and timeout failures
    #[must_use]
    pub const fn property(&self) -> Option<Property> {
        match self {
            Self::AssertionFailed { property, .. } | Self::Timeout { property, .. } => {
                Some(*property)
            }
            _ => None,
        }
    }

    /// Whether this error came from an exhausted polling assertion
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
