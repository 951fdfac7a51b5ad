//! Configuration loading and validation for the `pscrypt` CLI.
//!
//! Values come from `PSCRYPT_*` environment variables; every field has a
//! default so the tool runs with no environment set at all.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Prefix shared by every configuration variable (`PSCRYPT_LOG_LEVEL`, ...).
pub const ENV_PREFIX: &str = "PSCRYPT";

/// Output format of the diagnostic log on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

/// Validated CLI configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Tracing log level; `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Human-readable or JSON log lines.
    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,

    /// Whether an existing output file may be replaced.
    #[serde(default = "default_overwrite")]
    pub overwrite: bool,
}

fn default_log_level() -> String {
    "warn".into()
}
fn default_log_format() -> LogFormat {
    LogFormat::Text
}
fn default_overwrite() -> bool {
    true
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or fails validation.
    pub fn from_env() -> Result<Self> {
        Self::load(config::Environment::with_prefix(ENV_PREFIX))
    }

    fn load(env: config::Environment) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(env.try_parsing(true))
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    fn validate(&self) -> Result<()> {
        if self.log_level.trim().is_empty() {
            anyhow::bail!("{ENV_PREFIX}_LOG_LEVEL must not be empty");
        }
        Ok(())
    }
}
