//! # Framework Errors
//!
//! Common error types shared by the collection actor and its clients.

use crate::storage::StorageError;

/// Errors that can occur within the collection framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Collection actor closed")]
    ActorClosed,
    #[error("Collection actor dropped response channel")]
    ActorDropped,
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
