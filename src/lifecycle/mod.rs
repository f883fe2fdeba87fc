//! Runtime orchestration and lifecycle management.
//!
//! - [`PurchaseSystem`] - opens the configured storage, starts the order store actor and
//!   shuts it down again
//! - [`setup_tracing`] - initializes the tracing/logging infrastructure

pub mod purchase_system;
pub mod tracing;

pub use purchase_system::*;
pub use tracing::*;
