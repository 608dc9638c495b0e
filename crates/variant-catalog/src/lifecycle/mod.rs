//! # System Lifecycle
//!
//! Starts the catalog store, wires the clients to it and shuts it down again.
//!
//! ## The CatalogSystem Pattern
//!
//! ```rust,ignore
//! impl CatalogSystem {
//!     pub fn new(config: &CatalogConfig) -> Self {
//!         // 1. Create the store task and its client
//!         let (actor, client) = store::with_buffer(config.store.buffer_size, initial);
//!
//!         // 2. Start it with the settings injected as reducer context
//!         let handle = tokio::spawn(actor.run(config.settings()));
//!
//!         // 3. Hand out typed clients over the same channel
//!         Self { category_client, product_client, handle }
//!     }
//! }
//! ```
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - closes the sender side of the request channel
//! 2. **Store detects closure** - `receiver.recv()` returns `None` once queued requests
//!    are answered
//! 3. **Await completion** - the task returns the final snapshot
//!
//! Clones of the clients held elsewhere keep the store alive; `shutdown` waits for them.

use crate::clients::{CategoryClient, ProductClient};
use crate::config::CatalogConfig;
use crate::store::{self, CatalogSettings, CatalogState};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error("Store task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// A running catalog: one store task and the clients that talk to it.
pub struct CatalogSystem {
    pub category_client: CategoryClient,
    pub product_client: ProductClient,
    settings: CatalogSettings,
    handle: JoinHandle<Arc<CatalogState>>,
}

impl CatalogSystem {
    /// Starts an empty catalog. Must be called inside a Tokio runtime.
    pub fn new(config: &CatalogConfig) -> Self {
        Self::with_state(config, CatalogState::default())
    }

    /// Starts a catalog seeded with `initial`.
    pub fn with_state(config: &CatalogConfig, initial: CatalogState) -> Self {
        let settings = config.settings();
        info!(
            buffer_size = config.store.buffer_size,
            formulation = %settings.stock_formulation,
            deletion_policy = ?settings.deletion_policy,
            categories = initial.categories.len(),
            products = initial.products.len(),
            "Starting catalog system"
        );

        let (actor, client) = store::with_buffer(config.store.buffer_size, initial);
        let handle = tokio::spawn(actor.run(settings));

        Self {
            category_client: CategoryClient::new(client.clone()),
            product_client: ProductClient::new(client, settings),
            settings,
            handle,
        }
    }

    pub fn settings(&self) -> &CatalogSettings {
        &self.settings
    }

    /// Drops the clients, waits for the store to drain and returns the final snapshot.
    pub async fn shutdown(self) -> Result<Arc<CatalogState>, LifecycleError> {
        info!("Shutting down catalog system");
        drop(self.category_client);
        drop(self.product_client);

        let state = self.handle.await?;
        info!(
            categories = state.categories.len(),
            products = state.products.len(),
            "Catalog system shut down"
        );
        Ok(state)
    }
}
