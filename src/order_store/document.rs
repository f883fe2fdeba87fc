//! Document trait implementation for the Order domain type.
//!
//! This is what lets [`Order`] be stored by the generic
//! [`CollectionActor`](crate::framework::CollectionActor).

use crate::framework::Document;
use crate::model::{LineItemPull, NewOrder, Order, OrderId, OrderSelector};

impl Document for Order {
    type Id = OrderId;
    type Insert = NewOrder;
    type Filter = OrderSelector;
    type Pull = LineItemPull;

    fn from_insert(id: OrderId, params: NewOrder) -> Self {
        Self {
            id,
            supplier_name: params.supplier_name,
            order_date: params.order_date,
            products: params.products,
        }
    }

    fn id(&self) -> &OrderId {
        &self.id
    }

    fn matches(&self, filter: &OrderSelector) -> bool {
        match filter {
            OrderSelector::Id(id) => &self.id == id,
            OrderSelector::Supplier(name) => &self.supplier_name == name,
        }
    }

    /// Drops every line item whose product id matches, keeping the rest in order.
    fn pull(&mut self, pull: &LineItemPull) -> usize {
        let before = self.products.len();
        self.products.retain(|item| item.product_id != pull.product_id);
        before - self.products.len()
    }
}
