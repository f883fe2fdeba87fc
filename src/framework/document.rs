//! # Document Trait
//!
//! The `Document` trait is the contract a record type implements to be managed by the
//! generic [`CollectionActor`](crate::framework::CollectionActor). Documents are kept in
//! insertion order, matched by a filter, and can have embedded sub-items pulled out.
//!
//! We use associated types to keep every request type-safe. An `Order` collection takes
//! a `NewOrder` insert payload and an `OrderSelector` filter; you can't send it anything
//! else.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any record type must implement to be stored by a `CollectionActor`.
pub trait Document:
    Clone + Debug + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// System-generated identifier, unique per document.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The data required to insert a new document.
    type Insert: Send + Sync + Debug;

    /// Selects documents for deletion or sub-item removal.
    type Filter: Send + Sync + Debug;

    /// Describes the embedded sub-items to remove from a matching document.
    type Pull: Send + Sync + Debug;

    /// Build the stored document from its freshly generated id and the insert payload.
    fn from_insert(id: Self::Id, params: Self::Insert) -> Self;

    fn id(&self) -> &Self::Id;

    fn matches(&self, filter: &Self::Filter) -> bool;

    /// Remove every embedded sub-item selected by `pull`. Returns how many were removed.
    fn pull(&mut self, pull: &Self::Pull) -> usize;
}
