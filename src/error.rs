//! Error types for docstree.

use thiserror::Error;

/// Errors surfaced by the I/O layers around the tree core.
///
/// The core itself (build, filter, flatten) has no failure modes; every
/// variant here belongs to authentication, the storage provider, config or
/// preference persistence.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Token acquisition or consent failed. The user may retry sign-in.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Storage API answered with a non-success status.
    #[error("Drive API error ({status}): {message}")]
    Provider { status: u16, message: String },

    /// Request never produced a status (DNS, TLS, timeout, body decode).
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Preference error: {0}")]
    PreferenceError(String),

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl ApiError {
    /// Whether re-running sign-in is a sensible next step for the user.
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Auth(_))
            || matches!(self, ApiError::Provider { status: 401, .. })
    }
}
