//! Tracing subscriber setup.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber.
///
/// `log_level` is used when `RUST_LOG` holds no valid directive.
/// `log_format` is `text` (ANSI, human readable) or `json` (one object per line).
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(log_level: &str, log_format: &str) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true);

    let result = if log_format == "json" {
        builder.json().with_current_span(true).try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| anyhow!("Failed to initialize tracing: {}", e))
}
