//! Logging setup.
//!
//! All progress is reported through `tracing`. Lines go to stderr with a
//! local timestamp, so stdout only carries the final summary table.

use std::io::IsTerminal;
use tracing::Level;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Timestamp layout for log lines, e.g. `2024-05-01 13:37:00`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Install the global subscriber.
///
/// The level defaults to `info` (`debug` when `verbose` is set) and can be
/// overridden with `RUST_LOG`.
pub fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false)
                .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string())),
        )
        .init();
}
