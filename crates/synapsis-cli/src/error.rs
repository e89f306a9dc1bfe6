//! Error types for synapsis-cli

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for synapsis-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in synapsis-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from synapsis-core
    #[error(transparent)]
    Core(#[from] synapsis_core::Error),

    /// Error from synapsis-acl
    #[error(transparent)]
    Acl(#[from] synapsis_acl::Error),

    /// Configuration could not be located, read, or written.
    #[error("Config error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Filesystem error on a known path.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Output could not be written.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    /// Output could not be rendered as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Creates a new config error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Wraps an I/O error with the path it happened on.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
