//! # Catalog Store
//!
//! The catalog lives in a single [`CatalogState`] snapshot owned by a
//! [`StoreActor`](catalog_store::StoreActor). Every edit is a [`CatalogAction`] run through
//! the pure [`Reducer`](catalog_store::Reducer) implementation in [`reducer`], with the
//! [`CatalogSettings`] injected as context when the store is started.
//!
//! ## Structure
//!
//! - [`state`] - the snapshot and its lookups
//! - [`actions`] - [`CatalogAction`] and [`CatalogOutcome`]
//! - [`settings`] - [`CatalogSettings`] and [`DeletionPolicy`]
//! - [`error`] - [`CatalogError`]
//! - [`new()`] - factory for the store task and its client
//!
//! ## Usage
//!
//! ```rust
//! use variant_catalog::model::Category;
//! use variant_catalog::store::{self, CatalogAction, CatalogSettings, CatalogState};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = store::new(CatalogState::default());
//!     tokio::spawn(actor.run(CatalogSettings::default()));
//!
//!     client
//!         .dispatch(CatalogAction::AddCategory(Category::new("apparel", "Apparel")))
//!         .await
//!         .unwrap();
//!     assert_eq!(client.snapshot().await.unwrap().categories.len(), 1);
//! }
//! ```

pub mod actions;
pub mod error;
pub mod reducer;
pub mod settings;
pub mod state;

pub use actions::*;
pub use error::*;
pub use settings::*;
pub use state::*;

use catalog_store::{StoreActor, StoreClient};

/// Request channel capacity used by [`new`].
pub const DEFAULT_BUFFER_SIZE: usize = 32;

/// Creates the catalog store task, seeded with `initial`, and its client.
pub fn new(initial: CatalogState) -> (StoreActor<CatalogState>, StoreClient<CatalogState>) {
    with_buffer(DEFAULT_BUFFER_SIZE, initial)
}

pub fn with_buffer(
    buffer_size: usize,
    initial: CatalogState,
) -> (StoreActor<CatalogState>, StoreClient<CatalogState>) {
    StoreActor::new(buffer_size, initial)
}
