//! Error types for synapsis-core

use thiserror::Error;

/// Result type alias for synapsis-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in synapsis-core
///
/// Usage errors, lookup misses, and shape errors are kept apart so callers
/// can tell a bad call from an expected miss from inconsistent data.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Caller supplied contradictory or insufficient arguments.
    #[error("Usage error: {message}")]
    Usage {
        /// What was wrong with the call
        message: String,
    },

    /// An inspected item has no field with the requested key.
    #[error("Missing key '{key}' on item: {item}")]
    MissingKey {
        /// Key that was looked up
        key: String,
        /// Short rendering of the offending item
        item: String,
    },

    /// A lookup found nothing and the caller asked for a hard failure.
    #[error("Not found: {message}")]
    NotFound {
        /// What was being looked for
        message: String,
    },

    /// A name could not be made valid for the platform.
    #[error("Invalid name: {message}")]
    InvalidName {
        /// Why the name was rejected
        message: String,
    },

    /// An item could not be viewed as JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Creates a new usage error.
    pub fn usage<S: Into<String>>(message: S) -> Self {
        Error::Usage {
            message: message.into(),
        }
    }

    /// Creates a new not-found error.
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Error::NotFound {
            message: message.into(),
        }
    }

    /// Creates a new missing-key error for `item`.
    pub fn missing_key<K: Into<String>>(key: K, item: &serde_json::Value) -> Self {
        let mut rendered = item.to_string();
        if rendered.len() > 80 {
            let cut = (0..=77).rev().find(|i| rendered.is_char_boundary(*i)).unwrap_or(0);
            rendered.truncate(cut);
            rendered.push_str("...");
        }
        Error::MissingKey {
            key: key.into(),
            item: rendered,
        }
    }

    /// Creates a new invalid-name error.
    pub fn invalid_name<S: Into<String>>(message: S) -> Self {
        Error::InvalidName {
            message: message.into(),
        }
    }

    /// Returns whether this error was caused by how the API was called.
    pub fn is_usage(&self) -> bool {
        matches!(self, Error::Usage { .. })
    }

    /// Returns whether this error is a lookup miss.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Returns whether this error comes from an inconsistently shaped item.
    pub fn is_shape(&self) -> bool {
        matches!(self, Error::MissingKey { .. })
    }
}
