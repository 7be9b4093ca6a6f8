//! Logging setup for embeddings that want console output.
//!
//! The engine itself only emits `tracing` events; installing a subscriber
//! is the embedding application's choice. This helper wires up a plain
//! console subscriber filtered via the `RUST_LOG` environment variable,
//! defaulting to `info`.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

/// Install a console subscriber for the whole process.
///
/// # Errors
///
/// Fails when a global subscriber is already set, so tests and embeddings
/// that install their own can call this without panicking.
pub fn init_logging() -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let console_layer = tracing_subscriber::fmt::layer().with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init()
}
