//! Error type for the store boundary.

use thiserror::Error;

/// Errors surfaced by [`TodoStore`](super::TodoStore) operations.
///
/// `NotFound` is a domain outcome; the other variants are persistence
/// failures and carry their cause.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No todo with the requested id exists in the collection.
    #[error("Todo not found")]
    NotFound,

    /// I/O failure in the storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot could not be serialized or parsed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
