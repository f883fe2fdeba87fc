//! # Deletion Flows
//!
//! The user-facing delete operations. Each flow validates its input, makes at most one
//! store request and reports the outcome as [`FlowMessage`]s for the caller to render.
//!
//! Store failures are returned as errors, not messages; the caller decides whether they
//! are fatal.

use crate::clients::OrderClient;
use crate::framework::StoreClient;
use crate::model::OrderSelector;
use crate::order_store::OrderStoreError;
use crate::report::OrderChoice;
use std::fmt;
use tracing::{info, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
    Warning,
    Info,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Level::Success => "success",
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Info => "info",
        };
        f.write_str(label)
    }
}

/// A message for the user, tagged with how it should be presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowMessage {
    pub level: Level,
    pub text: String,
}

impl FlowMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self::new(Level::Success, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(Level::Error, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(Level::Warning, text)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(Level::Info, text)
    }

    fn new(level: Level, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

impl fmt::Display for FlowMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.text)
    }
}

/// Deletes every order, but only once the user has confirmed.
#[instrument(skip(store))]
pub async fn delete_all(
    store: &OrderClient,
    confirmed: bool,
) -> Result<Vec<FlowMessage>, OrderStoreError> {
    if !confirmed {
        return Ok(vec![FlowMessage::info(
            "Please confirm before deleting all orders.",
        )]);
    }

    let deleted = store.delete_all().await?;
    info!(deleted, "Deleted all orders");
    Ok(vec![FlowMessage::success(format!(
        "Successfully deleted {deleted} purchase orders."
    ))])
}

/// Removes a product from every order of the named supplier.
#[instrument(skip(store))]
pub async fn delete_line_item(
    store: &OrderClient,
    supplier_name: &str,
    product_id: &str,
) -> Result<Vec<FlowMessage>, OrderStoreError> {
    let supplier_name = supplier_name.trim();
    let product_id = product_id.trim();
    if supplier_name.is_empty() || product_id.is_empty() {
        return Ok(vec![FlowMessage::error(
            "Please provide both a valid Customer ID and Product ID.",
        )]);
    }

    let modified = store
        .remove_line_item(OrderSelector::supplier(supplier_name), product_id)
        .await?;

    if modified > 0 {
        Ok(vec![FlowMessage::success(format!(
            "Successfully deleted Product ID: {product_id} from Customer ID: {supplier_name}'s order."
        ))])
    } else {
        Ok(vec![FlowMessage::error(
            "No matching product found in the given order.",
        )])
    }
}

/// Deletes the checked orders in one batched request, one message per order.
#[instrument(skip(store, selected), fields(selected = selected.len()))]
pub async fn delete_selected_orders(
    store: &OrderClient,
    selected: &[OrderChoice],
) -> Result<Vec<FlowMessage>, OrderStoreError> {
    if selected.is_empty() {
        return Ok(vec![FlowMessage::warning(
            "Please select at least one order to delete.",
        )]);
    }

    let ids: Vec<_> = selected.iter().map(|choice| choice.id).collect();
    let outcomes = store.delete_orders(&ids).await?;

    Ok(selected
        .iter()
        .zip(outcomes)
        .map(|(choice, (_, deleted))| {
            if deleted {
                FlowMessage::success(format!(
                    "Successfully deleted the order for Customer ID: {}",
                    choice.supplier_name
                ))
            } else {
                FlowMessage::error(format!(
                    "Failed to delete the order for Customer ID: {}",
                    choice.supplier_name
                ))
            }
        })
        .collect())
}

/// Deletes the one order picked from the dropdown.
#[instrument(skip(store, choice), fields(id = %choice.id))]
pub async fn delete_selected_order(
    store: &OrderClient,
    choice: &OrderChoice,
) -> Result<Vec<FlowMessage>, OrderStoreError> {
    let deleted = store.delete_order(OrderSelector::Id(choice.id)).await?;
    if deleted > 0 {
        Ok(vec![FlowMessage::success(format!(
            "Successfully deleted the order for Customer ID: {}",
            choice.supplier_name
        ))])
    } else {
        Ok(vec![FlowMessage::error(format!(
            "No order found for Customer ID: {}",
            choice.supplier_name
        ))])
    }
}

/// Deletes the single order named by a typed id, resolved against a fresh listing.
#[instrument(skip(store))]
pub async fn delete_order_by_id(
    store: &OrderClient,
    wanted: &str,
) -> Result<Vec<FlowMessage>, OrderStoreError> {
    let orders = store.find_all().await?;
    let choices = crate::report::order_choices(&orders);
    let (selected, messages) = select_choices(&choices, &[wanted.to_string()]);

    match selected.as_slice() {
        [choice] => delete_selected_order(store, choice).await,
        _ if messages.is_empty() => Ok(vec![FlowMessage::warning(
            "Please select an order to delete.",
        )]),
        _ => Ok(messages),
    }
}

/// Deletes orders named by typed ids, resolved against a fresh listing.
///
/// Entries that resolve to no order, or to several, are reported and skipped. The rest
/// go to [`delete_selected_orders`] as one batch.
#[instrument(skip(store))]
pub async fn delete_orders_by_id(
    store: &OrderClient,
    wanted: &[String],
) -> Result<Vec<FlowMessage>, OrderStoreError> {
    let orders = store.find_all().await?;
    let choices = crate::report::order_choices(&orders);
    let (selected, mut messages) = select_choices(&choices, wanted);

    if selected.is_empty() && !messages.is_empty() {
        return Ok(messages);
    }
    messages.extend(delete_selected_orders(store, &selected).await?);
    Ok(messages)
}

/// Resolves typed order ids against the current listing.
///
/// Each entry may be a full id or a prefix of its hyphen-free hex form, as shown in
/// choice labels. Entries that match nothing, or more than one order, produce an error
/// message instead of a choice. Repeated matches are kept once.
pub fn select_choices(
    choices: &[OrderChoice],
    wanted: &[String],
) -> (Vec<OrderChoice>, Vec<FlowMessage>) {
    let mut selected: Vec<OrderChoice> = Vec::new();
    let mut messages = Vec::new();

    for entry in wanted {
        let needle = entry.trim().trim_start_matches('#').to_ascii_lowercase();
        if needle.is_empty() {
            continue;
        }
        let compact = needle.replace('-', "");
        let matches: Vec<&OrderChoice> = choices
            .iter()
            .filter(|choice| choice.id.0.simple().to_string().starts_with(&compact))
            .collect();

        match matches.as_slice() {
            [] => messages.push(FlowMessage::error(format!("No order found with id {entry}"))),
            [choice] => {
                if !selected.iter().any(|s| s.id == choice.id) {
                    selected.push((*choice).clone());
                }
            }
            _ => messages.push(FlowMessage::error(format!(
                "Order id {entry} matches {} orders, use more characters",
                matches.len()
            ))),
        }
    }

    (selected, messages)
}
