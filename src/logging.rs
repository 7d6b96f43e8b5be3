//! Diagnostic logging setup.
//!
//! Logs go to stderr so stdout carries only the report. The filter comes from
//! `PAGESPEED_LOG` (same syntax as `RUST_LOG`) and defaults to `warn`.

use tracing_subscriber::{fmt, EnvFilter};

use crate::constants;

/// Installs the global subscriber. Safe to call more than once.
pub fn init() {
    let filter = EnvFilter::try_from_env(constants::ENV_LOG)
        .unwrap_or_else(|_| EnvFilter::new(constants::DEFAULT_LOG_LEVEL));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
