//! # Order Store
//!
//! The persistent record store for purchase orders: an [`Order`] collection managed by the
//! generic [`CollectionActor`].
//!
//! ## Structure
//!
//! - [`document`] - [`Document`](crate::framework::Document) implementation for [`Order`]
//! - [`error`] - [`OrderStoreError`] type for type-safe error handling
//! - [`open()`] - Factory function that loads the store and creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use purchase_orders::framework::StoreClient;
//! use purchase_orders::model::Order;
//! use purchase_orders::order_store;
//! use purchase_orders::storage::MemoryStorage;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let storage = Arc::new(MemoryStorage::<Order>::new());
//!     let (actor, client) = order_store::open(storage, 32).await?;
//!     tokio::spawn(actor.run());
//!
//!     let orders = client.find_all().await?;
//!     assert!(orders.is_empty());
//!     Ok(())
//! }
//! ```

pub mod document;
pub mod error;

pub use error::*;

use crate::clients::OrderClient;
use crate::framework::CollectionActor;
use crate::model::{Order, OrderId};
use crate::storage::{Storage, StorageError};
use std::sync::Arc;

/// Loads the order collection from `storage` and creates the actor and its client.
///
/// Every inserted order gets a fresh random [`OrderId`].
pub async fn open(
    storage: Arc<dyn Storage<Order>>,
    buffer_size: usize,
) -> Result<(CollectionActor<Order>, OrderClient), StorageError> {
    let (actor, generic_client) = CollectionActor::open(buffer_size, storage, OrderId::new).await?;
    Ok((actor, OrderClient::new(generic_client)))
}
