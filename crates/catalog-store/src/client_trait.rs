//! # StoreHandle Trait
//!
//! Common interface for domain clients that wrap a [`StoreClient`]. Implementors pick their
//! own error type and say how a [`StoreError`] maps into it; `dispatch` and `snapshot` then
//! come for free.
use crate::{Reducer, StoreClient, StoreError};
use async_trait::async_trait;
use std::sync::Arc;

/// Trait for domain-specific clients built on a shared store.
///
/// # Example
///
/// ```rust
/// use catalog_store::{Reducer, StoreClient, StoreError, StoreHandle};
///
/// #[derive(Clone, Debug, Default)]
/// struct Tags(Vec<String>);
///
/// #[derive(Debug, thiserror::Error)]
/// enum TagError {
///     #[error("duplicate tag {0}")]
///     Duplicate(String),
///     #[error("store error: {0}")]
///     Store(String),
/// }
///
/// impl Reducer for Tags {
///     type Action = String;
///     type Outcome = usize;
///     type Context = ();
///     type Error = TagError;
///     fn reduce(&self, tag: String, _: &()) -> Result<(Self, usize), TagError> {
///         if self.0.contains(&tag) {
///             return Err(TagError::Duplicate(tag));
///         }
///         let mut next = self.0.clone();
///         next.push(tag);
///         let len = next.len();
///         Ok((Tags(next), len))
///     }
/// }
///
/// struct TagClient { inner: StoreClient<Tags> }
///
/// impl StoreHandle<Tags> for TagClient {
///     type Error = TagError;
///     fn inner(&self) -> &StoreClient<Tags> { &self.inner }
///     fn map_error(e: StoreError) -> TagError {
///         e.downcast::<TagError>().unwrap_or_else(|other| TagError::Store(other.to_string()))
///     }
/// }
///
/// async fn usage(client: TagClient) {
///     // dispatch() and snapshot() are provided automatically
///     let _ = client.dispatch("new".to_string()).await;
///     let _ = client.snapshot().await;
/// }
/// ```
#[async_trait]
pub trait StoreHandle<S: Reducer>: Send + Sync {
    /// The domain-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic StoreClient.
    fn inner(&self) -> &StoreClient<S>;

    /// Map store errors to the domain error type.
    fn map_error(e: StoreError) -> Self::Error;

    /// Dispatch an action through the reducer.
    #[tracing::instrument(skip(self))]
    async fn dispatch(&self, action: S::Action) -> Result<S::Outcome, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().dispatch(action).await.map_err(Self::map_error)
    }

    /// Fetch the current snapshot.
    #[tracing::instrument(skip(self))]
    async fn snapshot(&self) -> Result<Arc<S>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().snapshot().await.map_err(Self::map_error)
    }
}
