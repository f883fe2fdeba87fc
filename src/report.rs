//! # Report
//!
//! Read-only views over a fetched list of orders: the flat table, the detailed listing,
//! the unique order keys and the per-order deletion choices.
//!
//! Every view is computed from the slice it is given. Nothing is cached between fetches.

use crate::model::{LineItem, Order, OrderId};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Shown instead of any view when the store holds no orders.
pub const NO_ORDERS_MESSAGE: &str = "No purchase orders found.";

const COLUMNS: [&str; 5] = [
    "Customer ID",
    "Order Date",
    "Product ID",
    "Quantity",
    "Price per Unit",
];

/// One row of the flat table: an order's header fields repeated for each of its items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatRow<'a> {
    #[serde(rename = "Customer ID")]
    pub customer_id: &'a str,
    #[serde(rename = "Order Date")]
    pub order_date: NaiveDate,
    #[serde(rename = "Product ID")]
    pub product_id: &'a str,
    #[serde(rename = "Quantity")]
    pub quantity: u32,
    #[serde(rename = "Price per Unit")]
    pub price_per_unit: f64,
}

/// Lazy iterator over the flat rows of a slice of orders.
///
/// Orders without products contribute no rows.
pub struct FlatRows<'a> {
    orders: std::slice::Iter<'a, Order>,
    current: Option<(&'a Order, std::slice::Iter<'a, LineItem>)>,
}

impl<'a> Iterator for FlatRows<'a> {
    type Item = FlatRow<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((order, items)) = &mut self.current {
                let order: &'a Order = *order;
                if let Some(item) = items.next() {
                    return Some(FlatRow {
                        customer_id: &order.supplier_name,
                        order_date: order.order_date,
                        product_id: &item.product_id,
                        quantity: item.quantity,
                        price_per_unit: item.unit_price,
                    });
                }
            }
            let order = self.orders.next()?;
            self.current = Some((order, order.products.iter()));
        }
    }
}

/// Flattens orders into table rows, or `None` when there are no orders.
pub fn to_flat_rows(orders: &[Order]) -> Option<FlatRows<'_>> {
    if orders.is_empty() {
        return None;
    }
    Some(FlatRows {
        orders: orders.iter(),
        current: None,
    })
}

/// Fixed-width text table with a header row.
pub fn render_table<'a>(rows: impl IntoIterator<Item = FlatRow<'a>>) -> String {
    let cells: Vec<[String; 5]> = rows
        .into_iter()
        .map(|row| {
            [
                row.customer_id.to_string(),
                row.order_date.to_string(),
                row.product_id.to_string(),
                row.quantity.to_string(),
                format!("{:.2}", row.price_per_unit),
            ]
        })
        .collect();

    let mut widths = COLUMNS.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &COLUMNS.map(String::from), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("  "));
    out.push('\n');
    for row in &cells {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, &width))| {
            // numeric columns right-aligned
            if i >= 3 {
                format!("{cell:>width$}")
            } else {
                format!("{cell:<width$}")
            }
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

/// Flat rows as a pretty JSON array keyed by the table's column names.
pub fn render_json<'a>(
    rows: impl IntoIterator<Item = FlatRow<'a>>,
) -> Result<String, serde_json::Error> {
    let rows: Vec<FlatRow<'a>> = rows.into_iter().collect();
    serde_json::to_string_pretty(&rows)
}

/// Per-order listing with every line item spelled out.
#[derive(Debug, Clone, Copy)]
pub struct DetailView<'a> {
    orders: &'a [Order],
}

pub fn to_detail_view(orders: &[Order]) -> Option<DetailView<'_>> {
    if orders.is_empty() {
        None
    } else {
        Some(DetailView { orders })
    }
}

impl fmt::Display for DetailView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for order in self.orders {
            writeln!(
                f,
                "Order for Customer ID: {} on {}",
                order.supplier_name, order.order_date
            )?;
            for (idx, item) in order.products.iter().enumerate() {
                writeln!(f, "Product {}:", idx + 1)?;
                writeln!(f, "- Product ID: {}", item.product_id)?;
                writeln!(f, "- Quantity: {}", item.quantity)?;
                writeln!(f, "- Price per Unit: {}", item.unit_price)?;
            }
            writeln!(f, "Order Total: {:.2}", order.total())?;
            writeln!(f, "---")?;
        }
        Ok(())
    }
}

/// A distinct (supplier name, order date) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct OrderKey {
    pub supplier_name: String,
    pub order_date: NaiveDate,
}

impl OrderKey {
    pub fn label(&self) -> String {
        format!("{} - {}", self.supplier_name, self.order_date)
    }
}

/// Distinct order keys in first-seen order.
pub fn unique_order_keys(orders: &[Order]) -> Vec<OrderKey> {
    let mut seen = HashSet::new();
    orders
        .iter()
        .map(|order| OrderKey {
            supplier_name: order.supplier_name.clone(),
            order_date: order.order_date,
        })
        .filter(|key| seen.insert(key.clone()))
        .collect()
}

/// One selectable order in the deletion UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderChoice {
    pub id: OrderId,
    pub supplier_name: String,
    pub label: String,
}

/// One choice per stored order, in storage order.
pub fn order_choices(orders: &[Order]) -> Vec<OrderChoice> {
    orders
        .iter()
        .map(|order| OrderChoice {
            id: order.id,
            supplier_name: order.supplier_name.clone(),
            label: format!(
                "{} - {} (#{})",
                order.supplier_name,
                order.order_date,
                order.id.short()
            ),
        })
        .collect()
}
