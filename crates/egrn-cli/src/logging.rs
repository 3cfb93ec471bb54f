//! Structured logging setup
//!
//! Logs go to stderr so stdout carries nothing but conversion JSON.

use crate::config::LoggingConfig;
use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.filter)
        .with_context(|| format!("Invalid log filter '{}'", config.filter))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    let initialized =
        if config.json { builder.json().try_init() } else { builder.compact().try_init() };
    initialized.map_err(|e| anyhow!("Failed to initialize logging: {e}"))
}
