//! Tracing setup for hosting applications.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber.
///
/// Honors `RUST_LOG`, defaulting to `info`. Does nothing if a subscriber is
/// already installed.
pub fn init() {
    let result = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    if result.is_ok() {
        tracing::debug!("Tracing initialized for sensor-arbiter v{}", env!("CARGO_PKG_VERSION"));
    }
}
