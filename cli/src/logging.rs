//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt};

/// Filter used when `RUST_LOG` is not set.
#[must_use]
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "launchkit=debug" } else { "launchkit=warn" }
}

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over `--verbose`. Calling this twice is a no-op.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
