//! Generic document-collection framework.
//!
//! This module provides the building blocks for a persistent, actor-owned collection
//! of documents with insert, scan, delete and sub-item pull operations.
//!
//! # Main Components
//!
//! - [`Document`] - Trait that record types implement to be stored in a collection
//! - [`CollectionActor`] - Generic actor that owns the documents and their storage
//! - [`CollectionClient`] - Type-safe, cloneable client for a collection actor
//! - [`StoreClient`] - Trait for collection-specific client wrappers
//! - [`FrameworkError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning a real actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod document;
pub mod error;
pub mod message;
pub mod mock;

// Re-export core types for convenience
pub use actor::CollectionActor;
pub use client::CollectionClient;
pub use client_trait::StoreClient;
pub use document::Document;
pub use error::FrameworkError;
pub use message::{CollectionRequest, Response};
