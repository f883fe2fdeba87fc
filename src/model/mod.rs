//! Pure data structures for purchase orders and their line items.
//!
//! [`Order`] implements the [`Document`](crate::framework::Document) trait in
//! [`order_store`](crate::order_store).

pub mod line_item;
pub mod order;

pub use line_item::*;
pub use order::*;
