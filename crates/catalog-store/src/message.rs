//! # Store Messages
//!
//! Message types exchanged between a [`StoreClient`](crate::StoreClient) and its
//! [`StoreActor`](crate::StoreActor).

use crate::error::StoreError;
use crate::reducer::Reducer;
use std::sync::Arc;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the store.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Request sent to the store task.
///
/// - **Dispatch**: run the reducer against the current snapshot and, on success, swap the
///   snapshot for the new one.
/// - **Snapshot**: hand back a shared pointer to the current snapshot. Readers never block
///   writers beyond the time it takes to clone the `Arc`.
#[derive(Debug)]
pub enum StoreRequest<S: Reducer> {
    Dispatch {
        action: S::Action,
        respond_to: Response<S::Outcome>,
    },
    Snapshot {
        respond_to: Response<Arc<S>>,
    },
}
