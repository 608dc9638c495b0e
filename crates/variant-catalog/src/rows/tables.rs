//! One struct per table of the relational catalog layout.
//!
//! Columns follow the table definitions (`snake_case`, nullable columns as `Option`).
//! `image`, `slug` and `status` on categories and `stock` on products are carried so a
//! catalog survives the trip through rows unchanged. Stock columns are signed because the
//! database does not constrain them.

use crate::model::{
    CategoryId, CategoryStatus, DisplayType, ProductId, ProductStatus, TemplateId, ValueId,
    VariantKind,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRow {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub status: CategoryStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantTemplateRow {
    pub id: TemplateId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: VariantKind,
    #[serde(default)]
    pub display_type: DisplayType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub allow_multiple: bool,
    pub category_id: CategoryId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantValueRow {
    pub id: ValueId,
    pub template_id: TemplateId,
    pub value: String,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRow {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub category_id: CategoryId,
    #[serde(default)]
    pub vendor_id: Option<String>,
    pub base_price: f64,
    pub sku: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub status: ProductStatus,
    /// Own stock of a product without variants.
    #[serde(default)]
    pub stock: i64,
}

/// One offered value of one template for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVariantRow {
    pub id: String,
    pub product_id: ProductId,
    pub template_id: TemplateId,
    /// `None` records a template the product selected with no value chosen, which holds
    /// the template-minimum total at 0.
    #[serde(default)]
    pub value_id: Option<ValueId>,
    #[serde(default)]
    pub price_adjustment: f64,
    #[serde(default)]
    pub stock: i64,
    pub sku: Option<String>,
}
