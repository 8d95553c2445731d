//! Tracing initialisation for binaries and integration tests.

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// Install the global tracing subscriber, filtered by `RUST_LOG`.
///
/// Initialisation failures (usually a subscriber installed twice) are logged
/// and otherwise ignored so test harnesses can call this repeatedly.
pub fn init() {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}
