//! # Catalog Clients
//!
//! Typed handles over the shared catalog store. Both clients wrap the same
//! `StoreClient<CatalogState>`, so writes through one are visible to reads through the other.
//!
//! Rejected dispatches come back as the [`CatalogError`] the reducer produced; transport
//! failures (store gone, response dropped) become [`CatalogError::Store`].

pub mod category_client;
pub mod product_client;

pub use catalog_store::StoreHandle;
pub use category_client::CategoryClient;
pub use product_client::ProductClient;

use crate::store::CatalogError;
use catalog_store::StoreError;

pub(crate) fn map_store_error(e: StoreError) -> CatalogError {
    e.downcast::<CatalogError>()
        .unwrap_or_else(|other| CatalogError::Store(other.to_string()))
}
