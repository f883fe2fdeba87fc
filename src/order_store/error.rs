//! Error types for the order store.

use thiserror::Error;

/// Errors that can occur during order store operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderStoreError {
    /// The storage backend could not be read or written.
    #[error("Order storage error: {0}")]
    Storage(String),

    /// An error occurred while communicating with the store actor.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for OrderStoreError {
    fn from(msg: String) -> Self {
        OrderStoreError::ActorCommunicationError(msg)
    }
}
