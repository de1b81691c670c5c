//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password. Deliberately indistinguishable
    /// so responses cannot be used to enumerate accounts.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Bearer token is malformed, has a bad signature, or expired.
    #[error("invalid or expired token")]
    InvalidToken,

    /// Password hashing failed.
    #[error("hash error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    /// Token encoding or decoding failed unexpectedly.
    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Underlying repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Blocking hash task was cancelled or panicked.
    #[error("task error: {0}")]
    Join(#[from] tokio::task::JoinError),
}
