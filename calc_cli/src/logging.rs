//! Logging bootstrap for the CLI.
//!
//! Events go to stderr so stdout stays clean for results and `--json`
//! output. `RUST_LOG` wins over the `-v` count when set.

use tracing_subscriber::EnvFilter;

/// Map the `-v` count to a default filter directive
pub fn default_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
