//! Tracing setup for hosts that have none
//!
//! Diagnostics go to stderr; stdout carries the build report itself.

use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::error::{ReportError, Result};

/// Install a global `fmt` subscriber filtered by `RUST_LOG`, defaulting to
/// `default_level`.
///
/// Fails if a global subscriber is already set.
pub fn init_tracing(default_level: Level) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| ReportError::Telemetry {
            reason: e.to_string(),
        })
}
