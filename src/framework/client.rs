//! # Generic Client
//!
//! This module defines the generic client for communicating with a collection actor.

use crate::framework::document::Document;
use crate::framework::error::FrameworkError;
use crate::framework::message::CollectionRequest;
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for interacting with a `CollectionActor`.
///
/// Holds only a sender, so cloning is cheap. Every clone keeps the actor alive; the actor
/// shuts down once the last clone is dropped.
#[derive(Clone)]
pub struct CollectionClient<T: Document> {
    sender: mpsc::Sender<CollectionRequest<T>>,
}

impl<T: Document> CollectionClient<T> {
    pub fn new(sender: mpsc::Sender<CollectionRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn insert(&self, params: T::Insert) -> Result<T::Id, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CollectionRequest::Insert { params, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn find_all(&self) -> Result<Vec<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CollectionRequest::FindAll { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn delete_all(&self) -> Result<usize, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CollectionRequest::DeleteAll { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn delete_one(&self, filter: T::Filter) -> Result<usize, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CollectionRequest::DeleteOne { filter, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn delete_many(
        &self,
        ids: Vec<T::Id>,
    ) -> Result<Vec<(T::Id, bool)>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CollectionRequest::DeleteMany { ids, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn pull(&self, filter: T::Filter, pull: T::Pull) -> Result<usize, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CollectionRequest::Pull {
                filter,
                pull,
                respond_to,
            })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }
}
