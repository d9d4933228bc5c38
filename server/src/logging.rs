//! Process-wide `tracing` subscriber.

use tracing_subscriber::EnvFilter;

/// Installs a fmt subscriber. `RUST_LOG` wins over `default_filter` when set.
pub fn init(default_filter: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_filter))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
}
