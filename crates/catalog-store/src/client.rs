//! # Store Client
//!
//! The cloneable handle used to talk to a [`StoreActor`](crate::StoreActor).

use crate::error::StoreError;
use crate::message::StoreRequest;
use crate::reducer::Reducer;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

/// A type-safe handle for dispatching actions to a store and reading snapshots.
///
/// Holds only the channel sender, so cloning is cheap and clones can be handed to any
/// number of tasks. The store shuts down once the last clone is dropped.
pub struct StoreClient<S: Reducer> {
    sender: mpsc::Sender<StoreRequest<S>>,
}

impl<S: Reducer> Clone for StoreClient<S> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<S: Reducer> StoreClient<S> {
    pub fn new(sender: mpsc::Sender<StoreRequest<S>>) -> Self {
        Self { sender }
    }

    /// Sends `action` through the reducer and waits for the outcome.
    pub async fn dispatch(&self, action: S::Action) -> Result<S::Outcome, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Dispatch { action, respond_to })
            .await
            .map_err(|_| StoreError::StoreClosed)?;
        response.await.map_err(|_| StoreError::StoreDropped)?
    }

    /// Fetches the current snapshot.
    pub async fn snapshot(&self) -> Result<Arc<S>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Snapshot { respond_to })
            .await
            .map_err(|_| StoreError::StoreClosed)?;
        response.await.map_err(|_| StoreError::StoreDropped)?
    }
}
