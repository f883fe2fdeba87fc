//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging with the `tracing` crate.
//!
//! Log lines go to stderr so that tables and JSON printed on stdout can be piped cleanly.
//! The compact format hides the module prefix (`with_target(false)`); the store actor
//! tags its lines with `entity_type` instead.
//!
//! ## Usage Examples
//!
//! ```bash
//! # Quiet (default, errors only)
//! purchase-orders list
//!
//! # Store activity
//! RUST_LOG=info purchase-orders submit --supplier Acme --item P1:2:3.5
//!
//! # Full request payloads
//! RUST_LOG=debug purchase-orders session
//! ```
//!
//! With `RUST_LOG=info`, a submission reads:
//!
//! ```text
//! INFO Collection loaded storage=file:purchase_orders.json size=0
//! INFO Actor started entity_type="Order" size=0
//! INFO submit:insert: Sending insert to store items=1 supplier=Acme
//! INFO Inserted entity_type="Order" id=5f0c... size=1
//! INFO submit: Order submitted id=5f0c... supplier="Acme" items=1
//! ```

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `RUST_LOG` selects the level, defaulting to `error`.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
