//! Tracing setup: structured logging and named pipeline events.

pub mod events;

use tracing_subscriber::EnvFilter;

use crate::config::defaults::{DEFAULT_LOG_LEVEL, LOG_FILTER_ENV};

/// Initialize the tracing subscriber with structured JSON output.
///
/// Respects the `KYRA_LOG` environment variable for filtering.
/// Defaults to `info` level if not set.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .json()
        .init();
}

/// Initialize tracing with a custom filter string (for testing or embedding).
///
/// Returns `false` when a global subscriber is already installed.
pub fn init_tracing_with_filter(filter: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(true)
        .json()
        .try_init()
        .is_ok()
}
