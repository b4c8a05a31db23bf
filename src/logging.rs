//! Diagnostic logging to stderr
//!
//! Reports go to stdout; tracing output never mixes with them.

use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Environment variable holding the log filter directive
pub const LOG_ENV: &str = "STEPCI_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Build the filter from `STEPCI_LOG`, falling back to `RUST_LOG`, then `warn`.
fn filter_from_env() -> EnvFilter {
    std::env::var(LOG_ENV)
        .or_else(|_| std::env::var("RUST_LOG"))
        .map_or_else(
            |_| EnvFilter::new(DEFAULT_FILTER),
            |value| EnvFilter::try_new(value).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
}

/// Install the global subscriber; later calls are no-ops
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter_from_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("global subscriber already installed");
    }
}
