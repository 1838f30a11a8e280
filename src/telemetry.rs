//! Tracing subscriber installation.

use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global `tracing` subscriber, filtered by `RUST_LOG`.
///
/// Returns `false` when a subscriber was already installed, in which case
/// the existing one stays in place.
#[must_use]
pub fn init_tracing(json: bool) -> bool {
    let builder = fmt().with_env_filter(EnvFilter::from_default_env());
    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.is_ok()
}
