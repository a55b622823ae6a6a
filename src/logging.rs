//! Log output for the command-line tool

use crate::error::{Error, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// Install a stderr subscriber
///
/// `RUST_LOG` wins over `fallback` when it is set and valid.
pub fn init_logging(fallback: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(fallback)
            .map_err(|e| Error::Logging(format!("invalid log filter '{}': {}", fallback, e)))?,
    };

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|_| Error::Logging("logging already initialized".into()))
}
