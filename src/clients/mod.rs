//! Type-safe wrappers around [`CollectionClient`](crate::framework::CollectionClient).

pub mod order_client;

pub use order_client::*;
