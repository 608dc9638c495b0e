//! Products and the variant values they offer.
//!
//! A [`Product`] belongs to exactly one category. For each of that category's templates it
//! may carry a [`ProductVariantSelection`] listing the values it actually sells, each with
//! its own stock, price adjustment and SKU suffix.
use super::ids::{CategoryId, ProductId, TemplateId, ValueId};
use serde::{Deserialize, Serialize};

/// One offered value of a template, with per-value inventory data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedValue {
    pub value_id: ValueId,
    /// Negative for a discount, positive for a surcharge.
    #[serde(default, rename = "price_adjustment")]
    pub price_adjustment: f64,
    #[serde(default)]
    pub stock: u32,
    /// SKU suffix for this value; may be blank.
    #[serde(default)]
    pub sku: String,
}

impl SelectedValue {
    pub fn new(value_id: impl Into<ValueId>, stock: u32) -> Self {
        Self {
            value_id: value_id.into(),
            price_adjustment: 0.0,
            stock,
            sku: String::new(),
        }
    }

    pub fn with_price_adjustment(mut self, price_adjustment: f64) -> Self {
        self.price_adjustment = price_adjustment;
        self
    }

    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = sku.into();
        self
    }
}

/// The subset of one template's values that a product offers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariantSelection {
    pub variant_template_id: TemplateId,
    #[serde(default)]
    pub selected_values: Vec<SelectedValue>,
}

impl ProductVariantSelection {
    pub fn new(variant_template_id: impl Into<TemplateId>) -> Self {
        Self {
            variant_template_id: variant_template_id.into(),
            selected_values: Vec::new(),
        }
    }

    pub fn with_value(mut self, value: SelectedValue) -> Self {
        self.selected_values.push(value);
        self
    }

    pub fn value(&self, id: &ValueId) -> Option<&SelectedValue> {
        self.selected_values.iter().find(|v| &v.value_id == id)
    }

    /// Sum of stock over every selected value.
    pub fn stock_sum(&self) -> u32 {
        self.selected_values
            .iter()
            .fold(0u32, |sum, v| sum.saturating_add(v.stock))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    Active,
    #[default]
    Draft,
    OutOfStock,
}

impl ProductStatus {
    /// `Active` and `OutOfStock` follow `stock` across zero; `Draft` is kept as is.
    pub fn reconciled(self, stock: u32) -> Self {
        match (self, stock) {
            (ProductStatus::Active, 0) => ProductStatus::OutOfStock,
            (ProductStatus::OutOfStock, n) if n > 0 => ProductStatus::Active,
            (status, _) => status,
        }
    }
}

/// A sellable product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category_id: CategoryId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
    pub base_price: f64,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub variants: Vec<ProductVariantSelection>,
    /// Units on hand. For a product with variants the store keeps this equal to the
    /// aggregated variant stock.
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub status: ProductStatus,
}

impl Product {
    /// Creates a draft product with no variants and no stock.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        category_id: impl Into<CategoryId>,
        base_price: f64,
        sku: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            category_id: category_id.into(),
            vendor_id: None,
            base_price,
            sku: sku.into(),
            images: Vec::new(),
            variants: Vec::new(),
            stock: 0,
            status: ProductStatus::Draft,
        }
    }

    pub fn with_status(mut self, status: ProductStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_variant(mut self, selection: ProductVariantSelection) -> Self {
        self.variants.push(selection);
        self
    }

    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }

    pub fn selection(&self, template_id: &TemplateId) -> Option<&ProductVariantSelection> {
        self.variants
            .iter()
            .find(|s| &s.variant_template_id == template_id)
    }
}
