//! Log output
//!
//! Hosts install one `tracing` subscriber at startup. The filter comes from
//! the `FOLIO_LOG` environment variable (`EnvFilter` syntax, for example
//! `folio_content=debug,info`) and falls back to the given default. Logs go
//! to stderr so command output on stdout stays clean.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "FOLIO_LOG";

/// Filter used when `FOLIO_LOG` is unset
pub const DEFAULT_FILTER: &str = "info";

/// Build the filter from `FOLIO_LOG`, or `default` when it is unset or invalid
pub fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the global subscriber with the default filter.
///
/// Returns `false` if a subscriber was already installed.
pub fn init() -> bool {
    init_with_default(DEFAULT_FILTER)
}

/// Install the global subscriber, falling back to `default` as the filter
pub fn init_with_default(default: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default))
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
