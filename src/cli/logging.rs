//! Tracing setup for the `signup` binary

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_LOG_FILTER: &str = "warn";
const VERBOSE_LOG_FILTER: &str = "warn,signup=debug";

/// Initialize tracing on stderr
///
/// `RUST_LOG` wins over the flags; `--verbose` turns on debug events for this
/// crate and `--quiet` limits output to errors.
pub fn init_logging(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new(VERBOSE_LOG_FILTER)
        } else if quiet {
            EnvFilter::new("error")
        } else {
            EnvFilter::new(DEFAULT_LOG_FILTER)
        }
    });

    // A second init (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(filter),
        )
        .try_init();
}
