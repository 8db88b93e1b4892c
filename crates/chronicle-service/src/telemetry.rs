//! Tracing initialization. Call once at process startup.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber, honouring `RUST_LOG` and falling back to
/// `info`. Safe to call more than once; later calls are no-ops.
pub fn init() {
    init_with_filter("info");
}

/// Install with an explicit fallback filter.
pub fn init_with_filter(fallback: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback.to_string()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
