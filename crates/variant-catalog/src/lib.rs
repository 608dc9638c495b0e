//! # Variant Catalog
//!
//! Stock aggregation, SKU derivation and combination generation for products whose
//! variants span several independent dimensions (size, color, volume...), plus the catalog
//! store those computations run against.
//!
//! ## Core Components
//!
//! - **[model]**: categories, variant templates and values, products and their selections.
//! - **[inventory]**: pure computations: [`combinations`](inventory::combinations),
//!   [`total_stock`](inventory::total_stock), [`derive_sku`](inventory::derive_sku) and the
//!   [`ProductSummary`](inventory::ProductSummary).
//! - **[validation]**: the checks run before every write.
//! - **[store]**: the [`CatalogState`](store::CatalogState) reducer behind a
//!   [`catalog_store::StoreActor`].
//! - **[clients]**: typed handles ([`CategoryClient`](clients::CategoryClient),
//!   [`ProductClient`](clients::ProductClient)).
//! - **[lifecycle]**: starting and stopping the whole thing.
//! - **[config]**, **[rows]**, **[fixtures]**: configuration, the relational row layout and
//!   sample data.
//!
//! ## Quick Start
//!
//! ```rust
//! use variant_catalog::config::CatalogConfig;
//! use variant_catalog::fixtures;
//! use variant_catalog::lifecycle::CatalogSystem;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let system = CatalogSystem::with_state(&CatalogConfig::default(), fixtures::empty_catalog());
//!
//!     let id = system.product_client.create_product(fixtures::phone()).await?;
//!     assert_eq!(system.product_client.total_stock(&id).await?, 15);
//!
//!     system.shutdown().await?;
//!     Ok(())
//! }
//! ```

pub mod clients;
pub mod config;
pub mod fixtures;
pub mod inventory;
pub mod lifecycle;
pub mod model;
pub mod rows;
pub mod store;
pub mod validation;
