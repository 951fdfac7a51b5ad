//! Tracing subscriber setup for the CLI.
//!
//! Logs go to stderr so they never mix with data written by the tool.
//!
//! # Telemetry invariants
//!
//! - **No key, IV, nonce or plaintext bytes** in any log field; lengths,
//!   mode and direction only.
//! - Log level is configurable via `PSCRYPT_LOG_LEVEL` (default: `warn`) and
//!   overridden by `RUST_LOG`.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, LogFormat};

/// Initialise the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the subscriber has already been set.
pub fn init(cfg: &Config) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match cfg.log_format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    }
    .map_err(|e| anyhow::anyhow!("failed to initialise tracing subscriber: {e}"))
}
