//! Storage backends for document collections.
//!
//! A [`Storage`] loads a whole collection at startup and writes it back after every
//! mutation. Two backends are provided:
//!
//! - [`JsonFileStorage`] - one JSON array per collection, written atomically
//! - [`MemoryStorage`] - volatile, for tests and throwaway sessions

mod json_file;
mod memory;

pub use json_file::JsonFileStorage;
pub use memory::MemoryStorage;

use async_trait::async_trait;

/// Errors raised by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// A persistent home for the documents of one collection.
#[async_trait]
pub trait Storage<T>: Send + Sync {
    /// Load every stored document in storage order. A missing collection is empty.
    async fn load(&self) -> Result<Vec<T>, StorageError>;

    /// Replace the stored collection with `documents`.
    async fn save(&self, documents: &[T]) -> Result<(), StorageError>;

    /// Human-readable location, used in logs.
    fn describe(&self) -> String;
}
