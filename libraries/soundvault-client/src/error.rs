//! Error types for the SoundVault client.

use soundvault_storage::StorageError;
use thiserror::Error;

/// Errors surfaced to callers of the client.
///
/// Every variant renders as a human-readable sentence suitable for a
/// transient notification.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Server answered with a non-success status. `message` comes from the
    /// body's `error` or `detail` field, or the status line.
    #[error("{message}")]
    Transport { status: u16, message: String },

    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Operation needs a signed-in user
    #[error("You need to be logged in to do that")]
    AuthRequired,

    /// Operation needs an administrator
    #[error("You need admin privileges to do that")]
    AdminRequired,

    /// No refresh token is stored
    #[error("No refresh token")]
    NoRefreshToken,

    /// Server rejected the refresh token
    #[error("Token refresh failed: {0}")]
    RefreshRejected(#[source] Box<ClientError>),

    /// Invalid API base URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Caller-supplied input rejected before any request was made
    #[error("{0}")]
    InvalidInput(String),

    /// A success response carried no usable body where one is required
    #[error("Server returned an empty or malformed response for {0}")]
    MissingBody(String),

    /// Credential store failure
    #[error("Credential storage error: {0}")]
    Storage(#[from] StorageError),

    /// JSON (de)serialization of client-side data failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error while reading an upload
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// HTTP status of a `Transport` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether this error means the refresh token was missing or rejected.
    pub fn is_refresh_failure(&self) -> bool {
        matches!(self, Self::NoRefreshToken | Self::RefreshRejected(_))
    }

    /// Whether the caller should send the user to a login prompt.
    pub fn requires_login(&self) -> bool {
        self.is_refresh_failure()
            || matches!(self, Self::AuthRequired)
            || self.status() == Some(401)
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_displays_server_message() {
        let err = ClientError::Transport {
            status: 400,
            message: "Username already exists.".to_string(),
        };
        assert_eq!(err.to_string(), "Username already exists.");
        assert_eq!(err.status(), Some(400));
        assert!(!err.requires_login());
    }

    #[test]
    fn test_refresh_failures() {
        let rejected = ClientError::RefreshRejected(Box::new(ClientError::Transport {
            status: 401,
            message: "Token is invalid or expired".to_string(),
        }));
        assert!(rejected.is_refresh_failure());
        assert!(rejected.requires_login());
        assert!(rejected.to_string().contains("Token is invalid or expired"));

        assert!(ClientError::NoRefreshToken.is_refresh_failure());
        assert!(!ClientError::AuthRequired.is_refresh_failure());
        assert!(ClientError::AuthRequired.requires_login());
    }
}
