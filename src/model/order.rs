//! Purchase orders and the payloads used to insert, select and edit them.
//!
//! [`Order`] implements [`Document`](crate::framework::Document) in
//! [`order_store::document`](crate::order_store::document), with [`NewOrder`] as its insert
//! payload, [`OrderSelector`] as its filter and [`LineItemPull`] for line-item removal.

use crate::model::LineItem;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use uuid::Uuid;

/// Longest supplier name the order form accepts.
pub const SUPPLIER_NAME_MAX_CHARS: usize = 20;

/// System-generated identifier for Orders, assigned at insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub Uuid);

impl OrderId {
    /// Generates a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// First eight hex digits, enough to tell orders apart in a listing.
    pub fn short(&self) -> String {
        let mut simple = self.0.simple().to_string();
        simple.truncate(8);
        simple
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for OrderId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OrderId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub supplier_name: String,
    /// Serialized as an ISO calendar date, `YYYY-MM-DD`.
    pub order_date: NaiveDate,
    pub products: Vec<LineItem>,
}

impl Order {
    pub fn total(&self) -> f64 {
        self.products.iter().map(LineItem::total).sum()
    }
}

/// Payload for inserting a new order. The id is assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub supplier_name: String,
    pub order_date: NaiveDate,
    pub products: Vec<LineItem>,
}

/// Selects orders for deletion or line-item removal.
///
/// `Supplier` matches on the business key, which is not unique: several orders may
/// share a supplier name. `Id` always matches at most one order.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderSelector {
    Id(OrderId),
    Supplier(String),
}

impl OrderSelector {
    pub fn supplier(name: impl Into<String>) -> Self {
        Self::Supplier(name.into())
    }
}

/// Removes every line item with a matching product id.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItemPull {
    pub product_id: String,
}
