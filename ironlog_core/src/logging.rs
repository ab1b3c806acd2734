//! Tracing setup for the `ironlog` binary.
//!
//! Log lines go to stderr so that stdout carries only the ingestion
//! progress the demo prints.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber at `info`, or whatever `RUST_LOG` asks for
pub fn init() {
    init_with_level("info")
}

/// Install the global subscriber with `default_level` when `RUST_LOG` is unset
///
/// Per-id insert lines are logged at `debug`; run with `RUST_LOG=debug`
/// to see them.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

/// Route log output through the test harness at `debug`
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
