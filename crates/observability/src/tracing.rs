//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the process, filtering via `RUST_LOG` and
/// falling back to `default_directives` when the variable is unset or
/// malformed.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init_with_default(default_directives: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    // JSON lines on stdout; one object per event.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}

/// [`init_with_default`] at `info` level.
pub fn init() {
    init_with_default("info");
}
