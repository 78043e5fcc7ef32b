//! Error types for the parcel store.

use thiserror::Error;

/// Parcel store result type.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Parcel store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No parcel with this number exists (never created, or deleted).
    #[error("Parcel not found: {0}")]
    NotFound(i64),

    /// Driver-level failure: connection, statement, or row conversion.
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// IO error while preparing the database location
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// True when the error means the requested parcel does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
