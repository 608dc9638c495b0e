use crate::inventory::StockFormulation;
use serde::{Deserialize, Serialize};

/// What happens to product selections when the template, value or category they point at
/// is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeletionPolicy {
    /// Remove the dangling selections (and the products of a deleted category).
    #[default]
    Cascade,
    /// Refuse the deletion while any product still references the target.
    Restrict,
    /// Delete the target and leave products pointing at it; aggregation skips the
    /// dangling references.
    Orphan,
}

/// Reducer context for [`CatalogState`](super::CatalogState).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSettings {
    pub deletion_policy: DeletionPolicy,
    pub stock_formulation: StockFormulation,
    /// A total at or below this (and above zero) is reported as low stock.
    pub low_stock_threshold: u32,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            deletion_policy: DeletionPolicy::default(),
            stock_formulation: StockFormulation::default(),
            low_stock_threshold: 10,
        }
    }
}
