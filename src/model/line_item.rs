use serde::{Deserialize, Serialize};

/// One product/quantity/price triple belonging to an order.
///
/// The line total is derived on read and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: String,
    pub quantity: u32,
    pub unit_price: f64,
}

impl LineItem {
    pub fn new(product_id: impl Into<String>, quantity: u32, unit_price: f64) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
            unit_price,
        }
    }

    pub fn total(&self) -> f64 {
        f64::from(self.quantity) * self.unit_price
    }
}

impl Default for LineItem {
    /// A blank draft: no product, quantity 1, free.
    fn default() -> Self {
        Self::new("", 1, 0.0)
    }
}
