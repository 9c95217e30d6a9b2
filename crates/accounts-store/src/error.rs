//! Error types for account operations.

/// Errors that can occur during account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// A required field is missing or a field is malformed.
    #[error("invalid account: {0}")]
    Validation(String),

    /// No account exists with the given identifier.
    #[error("account not found: {0}")]
    NotFound(i64),

    /// A database operation failed.
    #[error("account database error: {0}")]
    Database(#[from] rusqlite::Error),
}
