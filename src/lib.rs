//! # Purchase Orders
//!
//! Enter purchase orders (a supplier, a date and a list of line items), store them in a
//! document collection and browse or delete them again.
//!
//! ## Architecture Notes
//!
//! ### 1. One actor owns the collection
//! Orders live in a [`CollectionActor`](framework::CollectionActor) running in its own Tokio
//! task. It processes requests one at a time and persists every mutation before replying,
//! so each store operation is atomic with respect to other clients. A failed write rolls
//! the in-memory collection back.
//!
//! ### 2. Injected store handle
//! Nothing reaches for a global connection. The [`OrderClient`](clients::OrderClient) is
//! created by the [`lifecycle`] layer and cloned into the submission handler, the deletion
//! flows and the interactive session.
//!
//! ### 3. Type-safe error handling
//! Each layer has its own `thiserror` enum: [`StorageError`](storage::StorageError),
//! [`FrameworkError`](framework::FrameworkError), [`OrderStoreError`](order_store::OrderStoreError),
//! [`SubmitError`](submission::SubmitError) and [`CliError`](cli::CliError). Validation
//! failures and not-found results are not errors; they come back as
//! [`FlowMessage`](deletion::FlowMessage)s.
//!
//! ## Module Tour
//!
//! ### 1. The Engine ([`framework`], [`storage`])
//! The generic collection actor, its client and mock, and the backends it persists to.
//!
//! ### 2. The Record Store ([`model`], [`order_store`], [`clients`])
//! The order documents and the domain client wrapping the generic one.
//!
//! ### 3. The Flows ([`editor`], [`submission`], [`report`], [`deletion`])
//! The order form, its submission, the read-only views and the delete operations.
//!
//! ### 4. The Shell ([`config`], [`lifecycle`], [`cli`], [`session`])
//! Configuration, startup and shutdown, tracing, and the command-line front ends.
//!
//! ## Quick Start
//!
//! ```bash
//! purchase-orders submit --supplier Acme --item P1:2:3.5 --item P2:1:10
//! purchase-orders list
//! purchase-orders list --view orders
//! purchase-orders delete-orders 5f0c1a2b
//! purchase-orders session
//! ```

pub mod cli;
pub mod clients;
pub mod config;
pub mod deletion;
pub mod editor;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod order_store;
pub mod report;
pub mod session;
pub mod storage;
pub mod submission;
