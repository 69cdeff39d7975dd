//! Tracing setup for the command line binary.

use tracing_subscriber::EnvFilter;

/// Default filter directive for the given verbosity.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "projman=debug"
    } else {
        "projman=warn"
    }
}

/// `RUST_LOG` when set and valid, otherwise [`default_directive`].
pub fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}

/// Install the global subscriber. Events go to stderr so that reports on
/// stdout stay clean. Calling this twice is harmless.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
