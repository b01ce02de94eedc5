//! Error types for the collaborator API clients.

use thiserror::Error;

/// Errors that can occur while querying a collaborator API.
///
/// These never escape the clients' public methods: every public operation
/// converts them into an empty-but-valid result at the boundary. The typed
/// variants exist so the conversion point can log what actually went wrong.
#[derive(Debug, Error)]
pub enum QueryError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Connection failed.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Timeout waiting for response.
    #[error("Request timed out")]
    Timeout,

    /// The collaborator answered but reported API-level errors.
    #[error("API reported errors: {0}")]
    Api(String),
}

impl From<reqwest::Error> for QueryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            QueryError::Timeout
        } else if err.is_connect() {
            QueryError::Connection(err.to_string())
        } else {
            QueryError::Http(err.to_string())
        }
    }
}
