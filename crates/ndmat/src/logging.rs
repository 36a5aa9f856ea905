//! Logging setup for applications built on ndmat
//!
//! The library crates only emit `tracing` events: validation failures and
//! sentinel results (NaN determinant, singular inverse, malformed text
//! lines) are reported at `warn`, progress at `debug`. Nothing is printed
//! until the application installs a subscriber, which [`init_logging`] does.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: filter directive (e.g. `ndmat_linalg=debug,warn`)
//! - `NDMAT_LOG_FORMAT`: `pretty`, `json` or `compact` (default: `compact`)
//!
//! # Example
//!
//! ```no_run
//! use ndmat::logging::{init_logging, LoggingConfig, LoggingFormat};
//!
//! init_logging(LoggingConfig {
//!     format: LoggingFormat::Json,
//!     filter: "ndmat_io=debug,warn".to_string(),
//!     ..LoggingConfig::default()
//! })?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::Result;
#[cfg(feature = "subscriber")]
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "warn";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoggingFormat {
    /// Multi-line human-readable format
    Pretty,
    /// One JSON object per event
    Json,
    /// One line per event
    #[default]
    Compact,
}

impl LoggingFormat {
    /// Parse a format name, falling back to [`LoggingFormat::Compact`]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "pretty" => LoggingFormat::Pretty,
            "json" => LoggingFormat::Json,
            _ => LoggingFormat::Compact,
        }
    }
}

/// Subscriber configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Output format
    pub format: LoggingFormat,
    /// `EnvFilter` directive
    pub filter: String,
    /// Enable ANSI colors (ignored for JSON)
    pub with_ansi: bool,
    /// Show target module paths
    pub with_target: bool,
    /// Show source file and line
    pub with_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        let format = std::env::var("NDMAT_LOG_FORMAT")
            .map(|s| LoggingFormat::parse(&s))
            .unwrap_or_default();
        let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_FILTER.to_string());

        Self {
            format,
            filter,
            with_ansi: true,
            with_target: true,
            with_location: false,
        }
    }
}

/// Install a global subscriber for ndmat's `tracing` events
///
/// Call once at startup. Fails if the filter directive does not parse or a
/// global subscriber is already installed.
#[cfg(feature = "subscriber")]
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.filter)?;

    match config.format {
        LoggingFormat::Pretty => {
            let layer = fmt::layer()
                .pretty()
                .with_ansi(config.with_ansi)
                .with_target(config.with_target)
                .with_file(config.with_location)
                .with_line_number(config.with_location)
                .with_filter(filter);
            tracing_subscriber::registry().with(layer).try_init()?;
        }
        LoggingFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_target(config.with_target)
                .with_file(config.with_location)
                .with_line_number(config.with_location)
                .with_filter(filter);
            tracing_subscriber::registry().with(layer).try_init()?;
        }
        LoggingFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_ansi(config.with_ansi)
                .with_target(config.with_target)
                .with_file(config.with_location)
                .with_line_number(config.with_location)
                .with_filter(filter);
            tracing_subscriber::registry().with(layer).try_init()?;
        }
    }

    tracing::debug!(format = ?config.format, filter = %config.filter, "logging initialized");
    Ok(())
}

/// No-op without the `subscriber` feature; install a subscriber directly
#[cfg(not(feature = "subscriber"))]
pub fn init_logging(_config: LoggingConfig) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse() {
        assert_eq!(LoggingFormat::parse("json"), LoggingFormat::Json);
        assert_eq!(LoggingFormat::parse(" Pretty "), LoggingFormat::Pretty);
        assert_eq!(LoggingFormat::parse("compact"), LoggingFormat::Compact);
        assert_eq!(LoggingFormat::parse("xml"), LoggingFormat::Compact);
    }

    #[test]
    fn test_default_config_flags() {
        let config = LoggingConfig::default();
        assert!(config.with_ansi);
        assert!(config.with_target);
        assert!(!config.with_location);
        assert!(!config.filter.is_empty());
    }

    #[cfg(feature = "subscriber")]
    #[test]
    fn test_bad_filter_is_rejected() {
        let config = LoggingConfig {
            filter: "ndmat_core=notalevel".to_string(),
            ..LoggingConfig::default()
        };
        assert!(init_logging(config).is_err());
    }
}
