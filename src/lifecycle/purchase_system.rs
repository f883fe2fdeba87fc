use crate::clients::OrderClient;
use crate::config::{StoreBackend, StoreConfig};
use crate::model::Order;
use crate::storage::{JsonFileStorage, MemoryStorage, Storage, StorageError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

#[derive(Error, Debug)]
pub enum SystemError {
    #[error("Failed to open order store: {0}")]
    Open(#[from] StorageError),

    #[error("Actor task failed: {0}")]
    ActorTask(#[from] tokio::task::JoinError),
}

/// Owns the running order store.
///
/// `PurchaseSystem` is responsible for:
/// - **Storage selection**: building the backend named by [`StoreConfig`]
/// - **Startup**: loading the stored orders and spawning the store actor
/// - **Shutdown**: closing the store's channel and waiting for the actor to finish
///
/// # Example
///
/// ```ignore
/// let system = PurchaseSystem::start(&config.store).await?;
///
/// let orders = system.order_client.find_all().await?;
///
/// system.shutdown().await?;
/// ```
pub struct PurchaseSystem {
    /// Store handle. Clone it into every component that needs persistence.
    pub order_client: OrderClient,

    handle: tokio::task::JoinHandle<()>,
}

impl PurchaseSystem {
    /// Opens the configured backend and starts the store actor.
    pub async fn start(config: &StoreConfig) -> Result<Self, SystemError> {
        let storage: Arc<dyn Storage<Order>> = match config.backend {
            StoreBackend::File => Arc::new(JsonFileStorage::<Order>::new(config.path.clone())),
            StoreBackend::Memory => Arc::new(MemoryStorage::<Order>::new()),
        };
        Self::with_storage(storage, config.buffer_size).await
    }

    /// Starts the store actor on an already-built backend.
    pub async fn with_storage(
        storage: Arc<dyn Storage<Order>>,
        buffer_size: usize,
    ) -> Result<Self, SystemError> {
        let (actor, order_client) = crate::order_store::open(storage, buffer_size).await?;
        let handle = tokio::spawn(actor.run());
        Ok(Self {
            order_client,
            handle,
        })
    }

    /// Gracefully shuts down the store.
    ///
    /// Dropping this handle's client closes the channel once every clone handed out has
    /// been dropped too. The actor then drains its queue and exits. Returns an error if
    /// the actor task panicked.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down purchase order system...");
        drop(self.order_client);

        if let Err(e) = self.handle.await {
            error!("Actor task failed: {:?}", e);
            return Err(e.into());
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
