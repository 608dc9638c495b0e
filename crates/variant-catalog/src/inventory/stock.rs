//! Total sellable stock for a product with variants.
//!
//! Two formulations are supported:
//!
//! - [`StockFormulation::TemplateMinimum`] sums the stock of every selected value of a
//!   template and takes the smallest sum. Stock is entered per value of one dimension,
//!   independent of the other dimensions, and the scarcest dimension caps availability.
//! - [`StockFormulation::CombinationSum`] walks every combination, takes the smallest value
//!   stock inside it and sums those minima.
//!
//! They agree when every template has exactly one selected value.

use super::combinations::combinations;
use crate::model::{Category, Product, ProductVariantSelection, TemplateId};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// Which aggregation the catalog uses for `Product::stock`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockFormulation {
    #[default]
    TemplateMinimum,
    CombinationSum,
}

impl Display for StockFormulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StockFormulation::TemplateMinimum => "template-minimum",
            StockFormulation::CombinationSum => "combination-sum",
        })
    }
}

impl FromStr for StockFormulation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "template-minimum" => Ok(StockFormulation::TemplateMinimum),
            "combination-sum" => Ok(StockFormulation::CombinationSum),
            other => Err(format!("unknown stock formulation: {other}")),
        }
    }
}

/// Stock per template, merged by template id, in first-appearance order.
///
/// A template whose selection is empty is reported with a sum of 0.
pub fn stock_by_template(selections: &[ProductVariantSelection]) -> Vec<(&TemplateId, u32)> {
    let mut sums: Vec<(&TemplateId, u32)> = Vec::new();
    for selection in selections {
        let stock = selection.stock_sum();
        match sums
            .iter_mut()
            .find(|(id, _)| *id == &selection.variant_template_id)
        {
            Some((_, sum)) => *sum = sum.saturating_add(stock),
            None => sums.push((&selection.variant_template_id, stock)),
        }
    }
    sums
}

/// Template-sum-then-minimum total.
///
/// Returns 0 when the product has no selections, and 0 when any template has nothing
/// selected.
pub fn total_stock(product: &Product) -> u32 {
    template_minimum(&product.variants)
}

/// Combination-minimum-then-sum total.
pub fn combination_stock(product: &Product) -> u32 {
    combination_sum(&product.variants)
}

pub fn compute_total_stock(product: &Product, formulation: StockFormulation) -> u32 {
    compute(&product.variants, formulation)
}

/// Like [`compute_total_stock`], but first drops selections and values that do not exist
/// in `category`. A dangling reference is ignored rather than treated as an error.
pub fn total_stock_in(
    product: &Product,
    category: &Category,
    formulation: StockFormulation,
) -> u32 {
    compute(&resolved_selections(product, category), formulation)
}

/// The product's selections restricted to templates and values `category` knows about.
pub fn resolved_selections(product: &Product, category: &Category) -> Vec<ProductVariantSelection> {
    resolve(&product.variants, category)
}

pub(crate) fn resolve(
    selections: &[ProductVariantSelection],
    category: &Category,
) -> Vec<ProductVariantSelection> {
    selections
        .iter()
        .filter_map(|selection| {
            let template = category.template(&selection.variant_template_id)?;
            Some(ProductVariantSelection {
                variant_template_id: selection.variant_template_id.clone(),
                selected_values: selection
                    .selected_values
                    .iter()
                    .filter(|v| template.has_value(&v.value_id))
                    .cloned()
                    .collect(),
            })
        })
        .collect()
}

pub(crate) fn compute(selections: &[ProductVariantSelection], formulation: StockFormulation) -> u32 {
    match formulation {
        StockFormulation::TemplateMinimum => template_minimum(selections),
        StockFormulation::CombinationSum => combination_sum(selections),
    }
}

fn template_minimum(selections: &[ProductVariantSelection]) -> u32 {
    stock_by_template(selections)
        .into_iter()
        .map(|(_, sum)| sum)
        .min()
        .unwrap_or(0)
}

fn combination_sum(selections: &[ProductVariantSelection]) -> u32 {
    combinations(selections).fold(0u32, |total, c| total.saturating_add(c.min_stock()))
}

/// Coarse availability bucket shown next to a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockLevel {
    /// `0` is out of stock, anything above `threshold` is in stock, the rest is low.
    pub fn classify(total: u32, threshold: u32) -> Self {
        if total == 0 {
            StockLevel::OutOfStock
        } else if total > threshold {
            StockLevel::InStock
        } else {
            StockLevel::LowStock
        }
    }
}
