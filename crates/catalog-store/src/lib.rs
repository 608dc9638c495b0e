//! # Catalog Store
//!
//! A small runtime for keeping application state in an explicit, injected container instead
//! of an ambient global. State changes go through a **pure reducer**; the current snapshot
//! is owned by a single Tokio task and reached only through cloneable client handles.
//!
//! ## Architecture Overview
//!
//! 1. **State Layer** ([`Reducer`]) - your snapshot type and its pure `reduce` function
//! 2. **Runtime Layer** ([`StoreActor`]) - sequential request processing and snapshot ownership
//! 3. **Interface Layer** ([`StoreClient`], [`StoreHandle`]) - typed dispatch and snapshot reads
//!
//! ## Why a reducer behind an actor?
//!
//! - The reducer never mutates its input, so it is testable as a plain function and a
//!   rejected action cannot leave half-applied state behind.
//! - The actor serialises dispatches, so two writers never interleave.
//! - Readers receive an `Arc` snapshot; a computation that runs against it sees a consistent
//!   view for its whole duration even while new actions are applied.
//!
//! ## Context Injection
//!
//! Settings the reducer needs (policies, thresholds) are injected through
//! [`StoreActor::run`], not through a global:
//!
//! ```rust
//! use catalog_store::{Reducer, StoreActor};
//!
//! #[derive(Clone, Debug, Default)]
//! struct Level(u32);
//!
//! struct Limits { max: u32 }
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("over the limit")]
//! struct OverLimit;
//!
//! impl Reducer for Level {
//!     type Action = u32;
//!     type Outcome = u32;
//!     type Context = Limits;
//!     type Error = OverLimit;
//!     fn reduce(&self, add: u32, limits: &Limits) -> Result<(Self, u32), OverLimit> {
//!         let next = self.0 + add;
//!         if next > limits.max { return Err(OverLimit); }
//!         Ok((Level(next), next))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = StoreActor::new(8, Level::default());
//!     tokio::spawn(actor.run(Limits { max: 5 }));
//!
//!     assert_eq!(client.dispatch(4).await.unwrap(), 4);
//!     assert!(client.dispatch(4).await.is_err());
//!     assert_eq!(client.snapshot().await.unwrap().0, 4);
//! }
//! ```
//!
//! ## Testing
//!
//! See the [`mock`] module for a scripted [`mock::MockStore`] and manual request helpers.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod error;
pub mod message;
pub mod mock;
pub mod reducer;
pub mod tracing;

pub use actor::StoreActor;
pub use client::StoreClient;
pub use client_trait::StoreHandle;
pub use error::StoreError;
pub use message::{Response, StoreRequest};
pub use reducer::Reducer;
