//! # Collection Actor
//!
//! This module defines the `CollectionActor`, the server half of the framework. It owns the
//! documents of one collection and the storage backend they are persisted to, and processes
//! requests sequentially so no locking is needed around the collection.

use crate::framework::client::CollectionClient;
use crate::framework::document::Document;
use crate::framework::error::FrameworkError;
use crate::framework::message::CollectionRequest;
use crate::storage::{Storage, StorageError};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// The generic actor that manages a persistent collection of documents.
///
/// # Concurrency Model
/// Every client shares one actor. Requests are processed one at a time in `run`, and
/// each mutating request is persisted before its reply is sent. Two sessions racing on
/// `DeleteAll` or on deleting the same order therefore see a consistent order of
/// operations, and the loser simply observes a count of zero.
///
/// # Persistence
/// The whole collection is written back to the [`Storage`] backend after each mutation.
/// If that write fails, the in-memory documents are rolled back to their state before the
/// request and the error is returned to the caller. Nothing is retried.
///
/// # Usage Pattern
///
/// 1. **Open**: call [`CollectionActor::open`] to load the stored documents and get the
///    actor plus its client.
/// 2. **Run**: spawn `actor.run()` in a background task.
/// 3. **Use**: clone the client wherever persistence is needed.
pub struct CollectionActor<T: Document> {
    receiver: mpsc::Receiver<CollectionRequest<T>>,
    documents: Vec<T>,
    storage: Arc<dyn Storage<T>>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Document> CollectionActor<T> {
    /// Loads the collection from `storage` and creates the actor with its client.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - capacity of the request channel. When it is full, client calls
    ///   wait for space.
    /// * `storage` - backend the collection is loaded from and written back to.
    /// * `next_id_fn` - generates the id of every inserted document.
    pub async fn open(
        buffer_size: usize,
        storage: Arc<dyn Storage<T>>,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> Result<(Self, CollectionClient<T>), StorageError> {
        let documents = storage.load().await?;
        info!(
            storage = %storage.describe(),
            size = documents.len(),
            "Collection loaded"
        );

        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            documents,
            storage,
            next_id_fn: Box::new(next_id_fn),
        };
        Ok((actor, CollectionClient::new(sender)))
    }

    /// Runs the actor's event loop until every client has been dropped.
    pub async fn run(mut self) {
        // Extract just the type name (e.g., "Order" instead of "purchase_orders::model::order::Order")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, size = self.documents.len(), "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CollectionRequest::Insert { params, respond_to } => {
                    debug!(entity_type, ?params, "Insert");
                    let id = (self.next_id_fn)();
                    let before = self.documents.clone();
                    self.documents.push(T::from_insert(id.clone(), params));

                    let result = self.commit(before).await.map(|_| id);
                    match &result {
                        Ok(id) => info!(entity_type, %id, size = self.documents.len(), "Inserted"),
                        Err(e) => error!(entity_type, error = %e, "Insert failed"),
                    }
                    let _ = respond_to.send(result);
                }
                CollectionRequest::FindAll { respond_to } => {
                    debug!(entity_type, size = self.documents.len(), "FindAll");
                    let _ = respond_to.send(Ok(self.documents.clone()));
                }
                CollectionRequest::DeleteAll { respond_to } => {
                    let deleted = self.documents.len();
                    let before = std::mem::take(&mut self.documents);

                    let result = if deleted > 0 {
                        self.commit(before).await.map(|_| deleted)
                    } else {
                        Ok(0)
                    };
                    match &result {
                        Ok(deleted) => info!(entity_type, deleted, "Deleted all"),
                        Err(e) => error!(entity_type, error = %e, "DeleteAll failed"),
                    }
                    let _ = respond_to.send(result);
                }
                CollectionRequest::DeleteOne { filter, respond_to } => {
                    debug!(entity_type, ?filter, "DeleteOne");
                    let result = match self.documents.iter().position(|doc| doc.matches(&filter)) {
                        Some(index) => {
                            let before = self.documents.clone();
                            let removed = self.documents.remove(index);
                            self.commit(before).await.map(|_| {
                                info!(entity_type, id = %removed.id(), size = self.documents.len(), "Deleted");
                                1
                            })
                        }
                        None => {
                            warn!(entity_type, ?filter, "No document matched");
                            Ok(0)
                        }
                    };
                    if let Err(e) = &result {
                        error!(entity_type, error = %e, "DeleteOne failed");
                    }
                    let _ = respond_to.send(result);
                }
                CollectionRequest::DeleteMany { ids, respond_to } => {
                    debug!(entity_type, requested = ids.len(), "DeleteMany");
                    let before = self.documents.clone();
                    let outcomes: Vec<(T::Id, bool)> = ids
                        .into_iter()
                        .map(|id| match self.documents.iter().position(|doc| doc.id() == &id) {
                            Some(index) => {
                                self.documents.remove(index);
                                (id, true)
                            }
                            None => {
                                warn!(entity_type, %id, "Not found");
                                (id, false)
                            }
                        })
                        .collect();

                    let deleted = outcomes.iter().filter(|(_, removed)| *removed).count();
                    let result = if deleted > 0 {
                        self.commit(before).await.map(|_| outcomes)
                    } else {
                        Ok(outcomes)
                    };
                    match &result {
                        Ok(_) => info!(entity_type, deleted, size = self.documents.len(), "Deleted many"),
                        Err(e) => error!(entity_type, error = %e, "DeleteMany failed"),
                    }
                    let _ = respond_to.send(result);
                }
                CollectionRequest::Pull {
                    filter,
                    pull,
                    respond_to,
                } => {
                    debug!(entity_type, ?filter, ?pull, "Pull");
                    let before = self.documents.clone();
                    let modified = self
                        .documents
                        .iter_mut()
                        .filter(|doc| doc.matches(&filter))
                        .map(|doc| doc.pull(&pull))
                        .filter(|removed| *removed > 0)
                        .count();

                    let result = if modified > 0 {
                        self.commit(before).await.map(|_| modified)
                    } else {
                        Ok(0)
                    };
                    match &result {
                        Ok(modified) => info!(entity_type, modified, "Pulled"),
                        Err(e) => error!(entity_type, error = %e, "Pull failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.documents.len(), "Shutdown");
    }

    /// Persists the current documents, restoring `before` if the write fails.
    async fn commit(&mut self, before: Vec<T>) -> Result<(), FrameworkError> {
        if let Err(e) = self.storage.save(&self.documents).await {
            self.documents = before;
            return Err(FrameworkError::Storage(e));
        }
        Ok(())
    }
}
