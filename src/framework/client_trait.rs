//! # StoreClient Trait
//!
//! Common interface for collection-specific clients, adding default `find_all` and
//! `delete_all` methods on top of a generic `CollectionClient`.

use crate::framework::{CollectionClient, Document, FrameworkError};
use async_trait::async_trait;

/// Trait for collection-specific clients to inherit the whole-collection operations.
///
/// Implementors provide access to the inner client and an error mapping; `find_all`
/// and `delete_all` come for free.
#[async_trait]
pub trait StoreClient<T: Document>: Send + Sync {
    /// The collection-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic CollectionClient.
    fn inner(&self) -> &CollectionClient<T>;

    /// Map framework errors to the specific error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch every stored document in storage order.
    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().find_all().await.map_err(Self::map_error)
    }

    /// Remove every stored document. Returns the number removed.
    #[tracing::instrument(skip(self))]
    async fn delete_all(&self) -> Result<usize, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete_all().await.map_err(Self::map_error)
    }
}
