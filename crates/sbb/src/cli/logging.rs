//! Log output for the `sbb` binary.
//!
//! Library crates emit `tracing` events; this installs the only subscriber.

use std::io;

use tracing_subscriber::EnvFilter;

/// Installs a stderr subscriber. Call once, before any command runs.
///
/// `RUST_LOG` wins when set. Otherwise the level is `warn`, raised to `info` by one `-v`
/// and to `debug` by two or more.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Filter directive for a `-v` count.
fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}
