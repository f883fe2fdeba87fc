//! # Collection Messages
//!
//! The request type sent from a [`CollectionClient`](crate::framework::CollectionClient)
//! to its [`CollectionActor`](crate::framework::CollectionActor).

use crate::framework::document::Document;
use crate::framework::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// Each variant is one store-level operation. The actor handles them one at a time,
/// so every request (including `DeleteMany`) is applied atomically with respect to
/// other clients of the same collection.
///
/// - **Insert**: appends a new document built from [`Document::Insert`].
/// - **FindAll**: full scan, returned in insertion order.
/// - **DeleteAll**: empties the collection, replies with the count removed.
/// - **DeleteOne**: removes the first document matching [`Document::Filter`].
/// - **DeleteMany**: removes documents by id, one outcome per requested id.
/// - **Pull**: removes embedded sub-items from every matching document, replies with the
///   number of documents modified.
#[derive(Debug)]
pub enum CollectionRequest<T: Document> {
    Insert {
        params: T::Insert,
        respond_to: Response<T::Id>,
    },
    FindAll {
        respond_to: Response<Vec<T>>,
    },
    DeleteAll {
        respond_to: Response<usize>,
    },
    DeleteOne {
        filter: T::Filter,
        respond_to: Response<usize>,
    },
    DeleteMany {
        ids: Vec<T::Id>,
        respond_to: Response<Vec<(T::Id, bool)>>,
    },
    Pull {
        filter: T::Filter,
        pull: T::Pull,
        respond_to: Response<usize>,
    },
}
