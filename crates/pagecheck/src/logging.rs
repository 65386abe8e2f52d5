//! Tracing subscriber setup for hosts of the checks.
//!
//! The checkers only emit `tracing` events; a test binary that wants to see
//! them calls [`init_logging`] once.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::result::{CheckError, CheckResult};

/// Environment variable consulted after `RUST_LOG`
pub const LOG_ENV_VAR: &str = "PAGECHECK_LOG";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    /// Filter directive used when neither `RUST_LOG` nor `PAGECHECK_LOG` is set
    pub level: Option<String>,
    /// Output format
    pub format: LogFormat,
    /// Route output through the test harness capture
    pub test_writer: bool,
}

impl LoggingConfig {
    /// Configuration suited to `cargo test`: captured output, debug level
    #[must_use]
    pub fn for_tests() -> Self {
        Self {
            level: Some("pagecheck=debug".to_string()),
            format: LogFormat::Pretty,
            test_writer: true,
        }
    }

    /// Resolve the filter: `RUST_LOG`, then `PAGECHECK_LOG`, then the
    /// configured level, then `info`
    pub fn env_filter(&self) -> CheckResult<EnvFilter> {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
        let directive = std::env::var(LOG_ENV_VAR)
            .ok()
            .or_else(|| self.level.clone())
            .unwrap_or_else(|| "info".to_string());
        EnvFilter::try_new(&directive).map_err(|err| CheckError::Logging {
            message: format!("invalid filter '{directive}': {err}"),
        })
    }
}

/// Install a global subscriber
///
/// Fails if a subscriber is already installed or the filter is invalid.
pub fn init_logging(config: &LoggingConfig) -> CheckResult<()> {
    let filter = config.env_filter()?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match (config.format, config.test_writer) {
        (LogFormat::Pretty, false) => registry.with(fmt::layer()).try_init(),
        (LogFormat::Pretty, true) => registry.with(fmt::layer().with_test_writer()).try_init(),
        (LogFormat::Json, false) => registry.with(fmt::layer().json()).try_init(),
        (LogFormat::Json, true) => registry
            .with(fmt::layer().json().with_test_writer())
            .try_init(),
    };
    installed.map_err(|err| CheckError::Logging {
        message: err.to_string(),
    })
}
