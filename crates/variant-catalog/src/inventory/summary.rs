//! The derived figures shown in a product's summary panel.

use super::combinations::{combination_count, combinations};
use super::sku::derive_sku_in;
use super::stock::{resolved_selections, total_stock_in, StockFormulation, StockLevel};
use crate::model::{Category, Product, TemplateId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

/// Everything the summary panel needs for one product, computed against its category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub total_stock: u32,
    pub level: StockLevel,
    /// Derived SKU per template the product has a selection for.
    pub skus: Vec<(TemplateId, String)>,
    pub combination_count: usize,
    /// Cheapest and dearest combination price; the base price alone when there are no
    /// combinations.
    pub price_range: PriceRange,
}

impl ProductSummary {
    pub fn compute(
        product: &Product,
        category: &Category,
        formulation: StockFormulation,
        low_stock_threshold: u32,
    ) -> Self {
        let selections = resolved_selections(product, category);
        let total_stock = if product.has_variants() {
            total_stock_in(product, category, formulation)
        } else {
            product.stock
        };

        let skus = selections
            .iter()
            .map(|s| {
                (
                    s.variant_template_id.clone(),
                    derive_sku_in(&product.sku, s, category),
                )
            })
            .collect();

        let price_range = combinations(&selections)
            .map(|c| c.unit_price(product.base_price))
            .fold(None, |range: Option<PriceRange>, price| {
                Some(match range {
                    None => PriceRange {
                        min: price,
                        max: price,
                    },
                    Some(r) => PriceRange {
                        min: r.min.min(price),
                        max: r.max.max(price),
                    },
                })
            })
            .unwrap_or(PriceRange {
                min: product.base_price,
                max: product.base_price,
            });

        Self {
            total_stock,
            level: StockLevel::classify(total_stock, low_stock_threshold),
            skus,
            combination_count: combination_count(&selections),
            price_range,
        }
    }
}
