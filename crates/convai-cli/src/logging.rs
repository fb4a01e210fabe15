//! Tracing subscriber setup
//!
//! Logs go to stderr so they never mix with command output. `RUST_LOG`
//! wins over the built-in level.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Calling it twice is harmless.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .compact()
        .try_init()
        .is_ok();
    if installed && verbose {
        tracing::debug!("Verbose mode enabled");
    }
}
