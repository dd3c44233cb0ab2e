//! Store error model.

use thiserror::Error;

/// Result type used across the store layer.
pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error.
///
/// The taxonomy is deliberately flat: async actions catch failures at the
/// operation boundary and record one of these in the owning store's `error`
/// slot instead of propagating an exception to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A requested catalog entry was not found.
    #[error("artwork not found")]
    NotFound,

    /// Login failed because no account matched.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Registration conflicted with an existing account.
    #[error("email already in use")]
    EmailInUse,

    /// A profile operation was attempted with no user logged in.
    #[error("not authenticated")]
    NotAuthenticated,

    /// An upstream collection could not be loaded.
    #[error("load failed: {0}")]
    LoadFailed(String),
}

impl StoreError {
    pub fn load_failed(msg: impl Into<String>) -> Self {
        Self::LoadFailed(msg.into())
    }
}
