//! # Submission
//!
//! Turns the editor contents plus a supplier name and date into a stored order.

use crate::clients::OrderClient;
use crate::editor::OrderEditor;
use crate::model::{NewOrder, OrderId, SUPPLIER_NAME_MAX_CHARS};
use crate::order_store::OrderStoreError;
use chrono::NaiveDate;
use thiserror::Error;
use tracing::{info, instrument, warn};

/// Prefix of every validation message shown on the form.
pub const SUBMIT_REJECTED_MESSAGE: &str = "Please fill all the required fields correctly.";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmitError {
    #[error("Supplier name is required")]
    MissingSupplierName,

    #[error("Supplier name exceeds {max} characters ({len})", max = SUPPLIER_NAME_MAX_CHARS)]
    SupplierNameTooLong { len: usize },

    #[error("At least one product is required")]
    NoLineItems,

    #[error("Store error: {0}")]
    Store(#[from] OrderStoreError),
}

impl SubmitError {
    /// Message for the form, as opposed to the `Display` text that goes to logs.
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::MissingSupplierName => {
                format!("{SUBMIT_REJECTED_MESSAGE} Customer ID is required.")
            }
            SubmitError::SupplierNameTooLong { len } => format!(
                "{SUBMIT_REJECTED_MESSAGE} Customer ID must be at most {SUPPLIER_NAME_MAX_CHARS} characters, got {len}."
            ),
            SubmitError::NoLineItems => {
                format!("{SUBMIT_REJECTED_MESSAGE} Add at least one product.")
            }
            SubmitError::Store(e) => format!("Failed to submit purchase order: {e}"),
        }
    }
}

/// Confirmation text for a stored order.
pub fn success_message(supplier_name: &str) -> String {
    format!("Purchase order for Customer ID: {supplier_name} successfully submitted!")
}

/// Validates and submits orders through an injected store handle.
#[derive(Clone)]
pub struct SubmissionHandler {
    store: OrderClient,
}

impl SubmissionHandler {
    pub fn new(store: OrderClient) -> Self {
        Self { store }
    }

    /// Inserts the editor's drafts as one order.
    ///
    /// The editor is cleared only after the store accepted the order. On any error it is
    /// left exactly as it was, and validation errors never reach the store.
    #[instrument(skip(self, editor), fields(items = editor.len()))]
    pub async fn submit(
        &self,
        editor: &mut OrderEditor,
        supplier_name: &str,
        order_date: NaiveDate,
    ) -> Result<OrderId, SubmitError> {
        let supplier_name = supplier_name.trim();
        if supplier_name.is_empty() {
            warn!("Rejected submission without supplier name");
            return Err(SubmitError::MissingSupplierName);
        }
        let len = supplier_name.chars().count();
        if len > SUPPLIER_NAME_MAX_CHARS {
            warn!(len, "Rejected submission with long supplier name");
            return Err(SubmitError::SupplierNameTooLong { len });
        }
        if editor.is_empty() {
            warn!("Rejected submission without line items");
            return Err(SubmitError::NoLineItems);
        }

        let order = NewOrder {
            supplier_name: supplier_name.to_string(),
            order_date,
            products: editor.drafts().to_vec(),
        };
        let id = self.store.insert(order).await?;

        editor.clear();
        info!(%id, supplier = supplier_name, "Order submitted");
        Ok(id)
    }
}
