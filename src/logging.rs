//! Diagnostic output setup
//!
//! The library only emits `tracing` events. Applications that want them on
//! stderr call [`init_logging`] once at startup.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is not set
const DEFAULT_FILTER: &str = "info";

/// Install a stderr fmt subscriber filtered by `RUST_LOG`
///
/// Does nothing if a global subscriber is already installed.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
