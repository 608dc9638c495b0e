//! # Inventory
//!
//! Pure computations over a product's variant selections: combination enumeration, total
//! stock, SKU derivation and the summary built from them. Nothing here touches the store;
//! every function takes plain data and returns plain data.

pub mod combinations;
pub mod sku;
pub mod stock;
pub mod summary;

pub use combinations::{combination_count, combinations, Combination, Combinations};
pub use sku::{combination_sku, derive_sku, derive_sku_in, kind_prefix};
pub use stock::{
    combination_stock, compute_total_stock, resolved_selections, stock_by_template, total_stock,
    total_stock_in, StockFormulation, StockLevel,
};
pub use summary::{PriceRange, ProductSummary};
