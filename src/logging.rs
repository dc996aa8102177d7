//! Logging Setup
//!
//! Subscriber initialization for host processes embedding the feature.
//! The crate itself only emits through the `tracing` facade; hosts that
//! already install their own subscriber can skip this entirely.

use tracing_subscriber::EnvFilter;

/// Install a global subscriber honoring the configured level
///
/// The level string accepts anything `EnvFilter` does (`"info"`,
/// `"filebridge=debug"`, ...). Returns an error if a global subscriber is
/// already set.
pub fn init(level: &str) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
