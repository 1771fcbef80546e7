// File: crates/stripchart-core/src/error.rs
// Summary: Error type for the fallible edges of the core (config files, color strings).

use thiserror::Error;

/// Errors raised while loading configuration. Ingestion and rendering never fail.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("config error: {0}")]
    Config(String),

    #[error("invalid color '{0}'")]
    Color(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = ChartError> = std::result::Result<T, E>;
