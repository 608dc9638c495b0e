//! # Store Errors
//!
//! Errors raised by the store runtime itself. A reducer rejection travels inside
//! [`StoreError::Rejected`] so the caller can downcast it back to the domain error.

/// Errors that can occur while talking to a store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store closed")]
    StoreClosed,
    #[error("Store dropped response channel")]
    StoreDropped,
    #[error("Action rejected: {0}")]
    Rejected(Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Recovers the reducer's own error type from a rejection.
    ///
    /// Returns `Err(self)` unchanged when the error is a transport failure or carries a
    /// different error type.
    pub fn downcast<E: std::error::Error + Send + Sync + 'static>(self) -> Result<E, Self> {
        match self {
            StoreError::Rejected(inner) => match inner.downcast::<E>() {
                Ok(e) => Ok(*e),
                Err(other) => Err(StoreError::Rejected(other)),
            },
            other => Err(other),
        }
    }
}
