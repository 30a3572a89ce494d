//! # Structured Logging
//!
//! Initializes the `tracing` subscriber with environment-based filtering
//! via `RUST_LOG`. All log output goes to stderr so stdout stays clean for
//! verification reports (which may be piped or parsed as JSON).

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// Call this exactly once, early in `main()`. The `RUST_LOG` environment
/// variable overrides `default_level` when set, using the usual
/// `tracing_subscriber::EnvFilter` directives, e.g.:
///
/// ```text
/// RUST_LOG=sello_cli=debug,sello_protocol=debug
/// ```
pub fn init_logging(default_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();
}
