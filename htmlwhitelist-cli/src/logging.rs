//! Logging setup for the command line.
//!
//! Log lines go to stderr so they never mix with sanitized output.
//!
//! # Environment Variables
//!
//! - `HTMLWHITELIST_LOG` - Primary log level/filter (takes precedence)
//! - `RUST_LOG` - Fallback log level/filter

use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("failed to parse log filter: {0}")]
    FilterParse(#[from] tracing_subscriber::filter::ParseError),
    #[error("failed to initialize subscriber: {0}")]
    TryInit(String),
}

/// Checks `HTMLWHITELIST_LOG`, then `RUST_LOG`, falling back to `default_level`.
fn build_env_filter(default_level: Level) -> Result<EnvFilter, LoggingError> {
    for var in ["HTMLWHITELIST_LOG", "RUST_LOG"] {
        if let Ok(filter) = std::env::var(var) {
            return Ok(EnvFilter::try_new(filter)?);
        }
    }
    Ok(EnvFilter::try_new(
        default_level.as_str().to_lowercase(),
    )?)
}

pub fn init_logging(verbose: bool) -> Result<(), LoggingError> {
    let default_level = if verbose { Level::DEBUG } else { Level::WARN };
    let filter = build_env_filter(default_level)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| LoggingError::TryInit(e.to_string()))
}
