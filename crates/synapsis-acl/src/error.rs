//! Error types for synapsis-acl

use thiserror::Error;

/// Result type alias for synapsis-acl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in synapsis-acl
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from synapsis-core
    #[error("Core error: {0}")]
    Core(#[from] synapsis_core::Error),

    /// Caller supplied contradictory or insufficient arguments.
    #[error("Usage error: {message}")]
    Usage {
        /// What was wrong with the call
        message: String,
    },

    /// No catalog permission matched and no default was given.
    #[error("Not found: {message}")]
    NotFound {
        /// What was being looked for
        message: String,
    },

    /// The two permissions are not ranked against each other.
    #[error("{left} and {right} must belong to the same permission set")]
    Incomparable {
        /// Left-hand permission code
        left: String,
        /// Right-hand permission code
        right: String,
    },

    /// The permission client failed.
    #[error("Permission client error: {message}")]
    Client {
        /// What the client was doing
        message: String,
        /// Underlying client error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
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

    /// Creates a new incomparable error for two permission codes.
    pub fn incomparable(left: impl Into<String>, right: impl Into<String>) -> Self {
        Error::Incomparable {
            left: left.into(),
            right: right.into(),
        }
    }

    /// Wraps a permission client failure.
    pub fn client<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Client {
            message: message.into(),
            source: Box::new(source),
        }
    }

    /// Returns whether this is a usage error, here or in synapsis-core.
    pub fn is_usage(&self) -> bool {
        match self {
            Error::Usage { .. } => true,
            Error::Core(core) => core.is_usage(),
            _ => false,
        }
    }

    /// Returns whether this is a lookup miss, here or in synapsis-core.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::NotFound { .. } => true,
            Error::Core(core) => core.is_not_found(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomparable_display() {
        let err = Error::incomparable("ADMIN", "TEAM_MANAGER");
        assert_eq!(
            err.to_string(),
            "ADMIN and TEAM_MANAGER must belong to the same permission set"
        );
    }

    #[test]
    fn test_classification_sees_through_core() {
        let err = Error::from(synapsis_core::Error::usage("bad"));
        assert!(err.is_usage());
        assert!(!err.is_not_found());

        assert!(Error::not_found("x").is_not_found());
        assert!(!Error::incomparable("a", "b").is_usage());
    }

    #[test]
    fn test_client_keeps_source() {
        let io = std::io::Error::other("boom");
        let err = Error::client("get_permissions syn1", io);
        assert!(err.to_string().contains("get_permissions syn1"));
        assert_eq!(
            std::error::Error::source(&err).map(|s| s.to_string()),
            Some("boom".to_string())
        );
    }
}
