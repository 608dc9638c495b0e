//! # Store Actor
//!
//! This module defines the `StoreActor`, the task that owns the current snapshot of a
//! [`Reducer`] state. It processes requests sequentially, so every dispatch sees the result
//! of the one before it and no lock guards the state.

use crate::client::StoreClient;
use crate::error::StoreError;
use crate::message::StoreRequest;
use crate::reducer::Reducer;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The task-side half of a store.
///
/// Holds the receiving end of the request channel, the current snapshot and a revision
/// counter that increments on every applied action. Snapshots are handed out as `Arc<S>`;
/// a dispatch builds a new `S` and swaps the pointer, so readers holding an older snapshot
/// keep a consistent view.
///
/// # Usage Pattern
///
/// 1.  **Create**: `StoreActor::new()` returns the actor and a client.
/// 2.  **Wire**: pass the reducer context into `actor.run(context)`.
/// 3.  **Run**: spawn the run loop in a background task.
///
/// ```rust
/// use catalog_store::{Reducer, StoreActor};
///
/// #[derive(Clone, Debug, Default)]
/// struct Tally(u32);
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("never")]
/// struct Never;
///
/// impl Reducer for Tally {
///     type Action = u32;
///     type Outcome = u32;
///     type Context = ();
///     type Error = Never;
///     fn reduce(&self, n: u32, _: &()) -> Result<(Self, u32), Never> {
///         Ok((Tally(self.0 + n), self.0 + n))
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = StoreActor::new(8, Tally::default());
///     let handle = tokio::spawn(actor.run(()));
///
///     assert_eq!(client.dispatch(2).await.unwrap(), 2);
///     assert_eq!(client.snapshot().await.unwrap().0, 2);
///
///     drop(client);
///     assert_eq!(handle.await.unwrap().0, 2);
/// }
/// ```
pub struct StoreActor<S: Reducer> {
    receiver: mpsc::Receiver<StoreRequest<S>>,
    state: Arc<S>,
    revision: u64,
}

impl<S: Reducer> StoreActor<S> {
    /// Creates a new `StoreActor` seeded with `initial` and its associated `StoreClient`.
    ///
    /// `buffer_size` is the capacity of the request channel. When it is full, client calls
    /// wait until there is room.
    pub fn new(buffer_size: usize, initial: S) -> (Self, StoreClient<S>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            state: Arc::new(initial),
            revision: 0,
        };
        (actor, StoreClient::new(sender))
    }

    /// Runs the request loop until every client has been dropped, then returns the final
    /// snapshot.
    ///
    /// # Context Injection
    /// `context` is passed to every `reduce` call. It is supplied here rather than in `new()`
    /// so settings loaded after the store was created can still be wired in.
    pub async fn run(mut self, context: S::Context) -> Arc<S> {
        let state_type = std::any::type_name::<S>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(state_type, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Dispatch { action, respond_to } => {
                    debug!(state_type, revision = self.revision, ?action, "Dispatch");
                    match self.state.reduce(action, &context) {
                        Ok((next, outcome)) => {
                            self.state = Arc::new(next);
                            self.revision += 1;
                            info!(state_type, revision = self.revision, ?outcome, "Applied");
                            let _ = respond_to.send(Ok(outcome));
                        }
                        Err(e) => {
                            warn!(state_type, revision = self.revision, error = %e, "Rejected");
                            let _ = respond_to.send(Err(StoreError::Rejected(Box::new(e))));
                        }
                    }
                }
                StoreRequest::Snapshot { respond_to } => {
                    debug!(state_type, revision = self.revision, "Snapshot");
                    let _ = respond_to.send(Ok(Arc::clone(&self.state)));
                }
            }
        }

        info!(state_type, revision = self.revision, "Shutdown");
        self.state
    }
}
