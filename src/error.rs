/// Error types for Publisher Service
///
/// Business-rule failures (missing post, wrong state, no resolvable
/// platforms) are absorbed at the job boundary and surface only as status
/// strings and post remarks; nothing here ever propagates to the queue
/// worker as a panic or error.
use thiserror::Error;

/// Result type for publisher-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Database operation failed
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Post is not in a state the requested operation accepts
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// No valid platforms resolved for a post
    #[error("{0}")]
    NoPlatforms(String),

    /// Serialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}
