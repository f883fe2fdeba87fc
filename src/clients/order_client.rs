//! # Order Client
//!
//! The record store handle handed to every component that needs persistence.
//! It wraps a `CollectionClient<Order>` and exposes the order-specific operations;
//! `find_all` and `delete_all` come from [`StoreClient`].

use crate::framework::{CollectionClient, FrameworkError, StoreClient};
use crate::model::{LineItemPull, NewOrder, Order, OrderId, OrderSelector};
use crate::order_store::OrderStoreError;
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the order store actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: CollectionClient<Order>,
}

impl OrderClient {
    pub fn new(inner: CollectionClient<Order>) -> Self {
        Self { inner }
    }

    /// Appends a new order and returns its generated id.
    #[instrument(skip(self, order), fields(supplier = %order.supplier_name, items = order.products.len()))]
    pub async fn insert(&self, order: NewOrder) -> Result<OrderId, OrderStoreError> {
        debug!(?order, "insert called");
        info!("Sending insert to store");
        self.inner.insert(order).await.map_err(Self::map_error)
    }

    /// Removes the first order matching `selector`. Returns 0 or 1.
    ///
    /// With [`OrderSelector::Supplier`] and duplicate supplier names, which of the
    /// duplicates goes is storage-order dependent.
    #[instrument(skip(self))]
    pub async fn delete_order(&self, selector: OrderSelector) -> Result<usize, OrderStoreError> {
        debug!("Sending request");
        self.inner.delete_one(selector).await.map_err(Self::map_error)
    }

    /// Removes every line item with `product_id` from the orders matching `selector`.
    ///
    /// Returns the number of orders modified, not the number of items removed. A
    /// supplier selector applies to every order sharing that supplier name.
    #[instrument(skip(self))]
    pub async fn remove_line_item(
        &self,
        selector: OrderSelector,
        product_id: &str,
    ) -> Result<usize, OrderStoreError> {
        debug!("Sending request");
        let pull = LineItemPull {
            product_id: product_id.to_string(),
        };
        self.inner
            .pull(selector, pull)
            .await
            .map_err(Self::map_error)
    }

    /// Deletes several orders in one store request, reporting each id separately.
    #[instrument(skip(self, ids), fields(requested = ids.len()))]
    pub async fn delete_orders(
        &self,
        ids: &[OrderId],
    ) -> Result<Vec<(OrderId, bool)>, OrderStoreError> {
        debug!("Sending request");
        self.inner
            .delete_many(ids.to_vec())
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl StoreClient<Order> for OrderClient {
    type Error = OrderStoreError;

    fn inner(&self) -> &CollectionClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::Storage(e) => OrderStoreError::Storage(e.to_string()),
            other => OrderStoreError::ActorCommunicationError(other.to_string()),
        }
    }
}
