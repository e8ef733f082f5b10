//! Logging setup
//!
//! Verbose mode raises the crate's default level to debug. `RUST_LOG`
//! overrides everything when set.

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber for one CLI invocation
pub fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ums_client={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
