//! Check configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::assertion::RetryConfig;
use crate::result::{CheckError, CheckResult};

/// Default minimum title length in characters
pub const DEFAULT_MIN_TITLE_LENGTH: usize = 10;

/// Default maximum title length in characters
pub const DEFAULT_MAX_TITLE_LENGTH: usize = 60;

/// Inclusive character-count bounds for a page title
///
/// The defaults follow common SEO guidance. Checkers apply the bounds as
/// given: with `min_length > max_length` every title fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleBounds {
    /// Minimum acceptable length
    pub min_length: usize,
    /// Maximum acceptable length
    pub max_length: usize,
}

impl Default for TitleBounds {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_TITLE_LENGTH,
            max_length: DEFAULT_MAX_TITLE_LENGTH,
        }
    }
}

impl TitleBounds {
    /// Create bounds
    #[must_use]
    pub const fn new(min_length: usize, max_length: usize) -> Self {
        Self {
            min_length,
            max_length,
        }
    }

    /// Whether `length` lies within the bounds
    #[must_use]
    pub const fn contains(&self, length: usize) -> bool {
        self.min_length <= length && length <= self.max_length
    }
}

/// Configuration shared by all checkers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Title length bounds
    pub title_bounds: TitleBounds,
    /// Polling behavior of `expect` assertions
    pub retry: RetryConfig,
}

impl CheckConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set title bounds
    #[must_use]
    pub const fn with_title_bounds(mut self, bounds: TitleBounds) -> Self {
        self.title_bounds = bounds;
        self
    }

    /// Set retry behavior
    #[must_use]
    pub const fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// The configured waiter for polling assertions
    #[must_use]
    pub const fn waiter(&self) -> RetryConfig {
        self.retry
    }

    /// Reject configurations no page could satisfy
    pub fn validate(&self) -> CheckResult<()> {
        if self.title_bounds.min_length > self.title_bounds.max_length {
            return Err(CheckError::Config {
                message: format!(
                    "title min_length ({}) exceeds max_length ({})",
                    self.title_bounds.min_length, self.title_bounds.max_length
                ),
            });
        }
        if self.retry.timeout.is_zero() {
            return Err(CheckError::Config {
                message: "retry timeout must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Parse and validate YAML configuration
    pub fn from_yaml_str(yaml: &str) -> CheckResult<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate JSON configuration
    pub fn from_json_str(json: &str) -> CheckResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a `.json`, `.yaml` or `.yml` file
    pub fn from_path(path: impl AsRef<Path>) -> CheckResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&contents),
            Some("yaml" | "yml") => Self::from_yaml_str(&contents),
            _ => Err(CheckError::Config {
                message: format!("unsupported config format: {}", path.display()),
            }),
        }
    }
}
