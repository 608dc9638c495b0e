//! # Relational Rows
//!
//! Flattens a [`CatalogState`] into the five-table relational layout (`categories`,
//! `variant_templates`, `variant_values`, `products`, `product_variants`) and reassembles
//! it. No database is involved; the rows are plain data that serialize to JSON.
//!
//! Reassembly is forgiving: rows pointing at parents that do not exist are dropped, and a
//! negative stock column is read as 0. Both are logged at `warn`. A `product_variants` row
//! naming a template or value its category does not define is kept on the product but left
//! out of every stock figure, as the store does.

pub mod tables;

pub use tables::*;

use crate::inventory::stock::{compute, resolve};
use crate::inventory::StockFormulation;
use crate::model::{
    Category, CategoryId, Product, ProductId, ProductVariantSelection, SelectedValue,
    TemplateId, ValueMetadata, VariantTemplate, VariantValue,
};
use crate::store::CatalogState;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogRows {
    pub categories: Vec<CategoryRow>,
    pub variant_templates: Vec<VariantTemplateRow>,
    pub variant_values: Vec<VariantValueRow>,
    pub products: Vec<ProductRow>,
    pub product_variants: Vec<ProductVariantRow>,
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

fn stock_column(stock: i64, table: &str, id: &str) -> u32 {
    if stock < 0 {
        warn!(table, id, stock, "Negative stock read as 0");
        return 0;
    }
    u32::try_from(stock).unwrap_or(u32::MAX)
}

impl CatalogRows {
    pub fn from_state(state: &CatalogState) -> Self {
        let mut rows = CatalogRows::default();

        for category in state.categories.values() {
            rows.categories.push(CategoryRow {
                id: category.id.clone(),
                name: category.name.clone(),
                description: non_empty(&category.description),
                image: non_empty(&category.image),
                slug: non_empty(&category.slug),
                status: category.status,
            });
            for template in &category.variants {
                rows.variant_templates.push(VariantTemplateRow {
                    id: template.id.clone(),
                    name: template.name.clone(),
                    kind: template.kind,
                    display_type: template.display_type,
                    required: template.required,
                    allow_multiple: template.allow_multiple,
                    category_id: category.id.clone(),
                });
                rows.variant_values
                    .extend(template.values.iter().map(|value| VariantValueRow {
                        id: value.id.clone(),
                        template_id: template.id.clone(),
                        value: value.value.clone(),
                        metadata: serde_json::to_value(&value.metadata)
                            .unwrap_or(serde_json::Value::Null),
                    }));
            }
        }

        for product in state.products.values() {
            rows.products.push(ProductRow {
                id: product.id.clone(),
                name: product.name.clone(),
                description: non_empty(&product.description),
                category_id: product.category_id.clone(),
                vendor_id: product.vendor_id.clone(),
                base_price: product.base_price,
                sku: non_empty(&product.sku),
                images: product.images.clone(),
                status: product.status,
                stock: if product.has_variants() {
                    0
                } else {
                    i64::from(product.stock)
                },
            });
            for selection in &product.variants {
                if selection.selected_values.is_empty() {
                    rows.product_variants.push(ProductVariantRow {
                        id: format!("{}:{}", product.id, selection.variant_template_id),
                        product_id: product.id.clone(),
                        template_id: selection.variant_template_id.clone(),
                        value_id: None,
                        price_adjustment: 0.0,
                        stock: 0,
                        sku: None,
                    });
                    continue;
                }
                rows.product_variants
                    .extend(selection.selected_values.iter().map(|value| ProductVariantRow {
                        id: format!(
                            "{}:{}:{}",
                            product.id, selection.variant_template_id, value.value_id
                        ),
                        product_id: product.id.clone(),
                        template_id: selection.variant_template_id.clone(),
                        value_id: Some(value.value_id.clone()),
                        price_adjustment: value.price_adjustment,
                        stock: i64::from(value.stock),
                        sku: non_empty(&value.sku),
                    }));
            }
        }

        rows
    }

    /// Rebuilds the catalog.
    ///
    /// Stock of products with variants is recomputed from their `product_variants` rows
    /// with `formulation`, counting only templates and values their category defines.
    /// Status is then reconciled with that stock.
    pub fn into_state(self, formulation: StockFormulation) -> CatalogState {
        let categories = self.assemble_categories();
        let mut selections = self.selections_by_product();

        let mut products = BTreeMap::new();
        for row in self.products {
            let mut product = Product::new(
                row.id.clone(),
                row.name,
                row.category_id,
                row.base_price,
                row.sku.unwrap_or_default(),
            );
            product.description = row.description.unwrap_or_default();
            product.vendor_id = row.vendor_id;
            product.images = row.images;
            product.variants = selections.remove(&row.id).unwrap_or_default();
            product.stock = if product.has_variants() {
                stock_in(
                    &product.variants,
                    categories.get(&product.category_id),
                    formulation,
                )
            } else {
                stock_column(row.stock, "products", row.id.as_str())
            };
            product.status = row.status.reconciled(product.stock);
            products.insert(row.id, product);
        }
        for product_id in selections.keys() {
            warn!(%product_id, "Variant rows without product skipped");
        }

        CatalogState {
            categories,
            products,
        }
    }

    /// Total stock of one product computed from its `product_variants` rows.
    ///
    /// Rows naming a template or value that the product's category does not define are
    /// skipped. Returns 0 for a product with no variant rows.
    pub fn calculate_total_stock(&self, product_id: &ProductId, formulation: StockFormulation) -> u32 {
        let Some(selections) = self.selections_by_product().remove(product_id) else {
            return 0;
        };
        let categories = self.assemble_categories();
        let category = self
            .products
            .iter()
            .find(|p| &p.id == product_id)
            .and_then(|p| categories.get(&p.category_id));
        stock_in(&selections, category, formulation)
    }

    /// Categories with their templates and values, dropping rows whose parent is missing.
    fn assemble_categories(&self) -> BTreeMap<CategoryId, Category> {
        let mut values: BTreeMap<&TemplateId, Vec<VariantValue>> = BTreeMap::new();
        for row in &self.variant_values {
            let metadata = match &row.metadata {
                serde_json::Value::Null => ValueMetadata::default(),
                raw => serde_json::from_value(raw.clone()).unwrap_or_else(|e| {
                    warn!(value_id = %row.id, error = %e, "Unreadable value metadata dropped");
                    ValueMetadata::default()
                }),
            };
            values.entry(&row.template_id).or_default().push(VariantValue {
                id: row.id.clone(),
                value: row.value.clone(),
                metadata,
            });
        }

        let mut categories: BTreeMap<CategoryId, Category> = self
            .categories
            .iter()
            .map(|row| {
                let mut category = Category::new(row.id.clone(), row.name.clone());
                category.description = row.description.clone().unwrap_or_default();
                category.image = row.image.clone().unwrap_or_default();
                if let Some(slug) = &row.slug {
                    category.slug = slug.clone();
                }
                category.status = row.status;
                (row.id.clone(), category)
            })
            .collect();

        for row in &self.variant_templates {
            let Some(category) = categories.get_mut(&row.category_id) else {
                warn!(template_id = %row.id, category_id = %row.category_id, "Template row without category skipped");
                continue;
            };
            let mut template = VariantTemplate::new(row.id.clone(), row.name.clone(), row.kind)
                .display_type(row.display_type)
                .required(row.required)
                .allow_multiple(row.allow_multiple);
            template.values = values.remove(&row.id).unwrap_or_default();
            category.variants.push(template);
        }
        for template_id in values.keys() {
            warn!(%template_id, "Value rows without template skipped");
        }

        categories
    }

    /// Groups `product_variants` rows into selections, keeping row order.
    fn selections_by_product(&self) -> BTreeMap<ProductId, Vec<ProductVariantSelection>> {
        let mut grouped: BTreeMap<ProductId, Vec<ProductVariantSelection>> = BTreeMap::new();
        for row in &self.product_variants {
            let selections = grouped.entry(row.product_id.clone()).or_default();
            let index = match selections
                .iter()
                .position(|s| s.variant_template_id == row.template_id)
            {
                Some(index) => index,
                None => {
                    selections.push(ProductVariantSelection::new(row.template_id.clone()));
                    selections.len() - 1
                }
            };
            let Some(value_id) = &row.value_id else {
                continue;
            };
            selections[index].selected_values.push(
                SelectedValue::new(
                    value_id.clone(),
                    stock_column(row.stock, "product_variants", &row.id),
                )
                .with_price_adjustment(row.price_adjustment)
                .with_sku(row.sku.clone().unwrap_or_default()),
            );
        }
        grouped
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Aggregated stock of `selections`, restricted to what `category` defines when it exists.
fn stock_in(
    selections: &[ProductVariantSelection],
    category: Option<&Category>,
    formulation: StockFormulation,
) -> u32 {
    match category {
        Some(category) => compute(&resolve(selections, category), formulation),
        None => compute(selections, formulation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProductStatus, VariantKind};
    use crate::store::{CatalogAction, CatalogSettings};
    use catalog_store::Reducer;

    fn catalog() -> CatalogState {
        let electronics = Category::new("electronics", "Electronics")
            .with_description("Phones and accessories")
            .with_template(
                VariantTemplate::new("storage", "Storage", VariantKind::Custom)
                    .allow_multiple(true)
                    .with_value(VariantValue::new("64gb", "64GB"))
                    .with_value(VariantValue::new("128gb", "128GB").with_surcharge(100.0)),
            )
            .with_template(
                VariantTemplate::new("color", "Color", VariantKind::Color)
                    .allow_multiple(true)
                    .with_value(VariantValue::new("black", "Black").with_hex("#000000"))
                    .with_value(VariantValue::new("silver", "Silver").with_hex("#C0C0C0")),
            );
        let phone = Product::new("p-phone", "Phone X", "electronics", 699.0, "PHX")
            .with_status(ProductStatus::Active)
            .with_stock(15)
            .with_variant(
                ProductVariantSelection::new("storage")
                    .with_value(SelectedValue::new("64gb", 10))
                    .with_value(
                        SelectedValue::new("128gb", 5)
                            .with_price_adjustment(100.0)
                            .with_sku("128"),
                    ),
            )
            .with_variant(
                ProductVariantSelection::new("color")
                    .with_value(SelectedValue::new("black", 8))
                    .with_value(SelectedValue::new("silver", 20)),
            );
        let case = Product::new("p-case", "Case", "electronics", 19.0, "CASE").with_stock(30);
        CatalogState::from_parts([electronics], [phone, case])
    }

    #[test]
    fn test_rows_reassemble_to_the_same_catalog() {
        let state = catalog();
        let rows = CatalogRows::from_state(&state);

        assert_eq!(rows.categories.len(), 1);
        assert_eq!(rows.variant_templates.len(), 2);
        assert_eq!(rows.variant_values.len(), 4);
        assert_eq!(rows.products.len(), 2);
        assert_eq!(rows.product_variants.len(), 4);

        let json = rows.to_json().unwrap();
        let back = CatalogRows::from_json(&json)
            .unwrap()
            .into_state(StockFormulation::TemplateMinimum);
        assert_eq!(back, state);
    }

    #[test]
    fn test_calculate_total_stock_from_rows() {
        let rows = CatalogRows::from_state(&catalog());
        let phone = ProductId::from("p-phone");

        assert_eq!(
            rows.calculate_total_stock(&phone, StockFormulation::TemplateMinimum),
            15
        );
        assert_eq!(
            rows.calculate_total_stock(&phone, StockFormulation::CombinationSum),
            28
        );
        assert_eq!(
            rows.calculate_total_stock(&"p-case".into(), StockFormulation::TemplateMinimum),
            0
        );
    }

    #[test]
    fn test_negative_stock_reads_as_zero() {
        let mut rows = CatalogRows::from_state(&catalog());
        for row in rows
            .product_variants
            .iter_mut()
            .filter(|r| r.template_id.as_str() == "storage")
        {
            row.stock = -4;
        }
        if let Some(case) = rows.products.iter_mut().find(|p| p.id.as_str() == "p-case") {
            case.stock = -1;
        }

        let state = rows.into_state(StockFormulation::TemplateMinimum);
        assert_eq!(state.product(&"p-phone".into()).unwrap().stock, 0);
        assert_eq!(state.product(&"p-case".into()).unwrap().stock, 0);
    }

    #[test]
    fn test_dangling_variant_rows_are_not_counted() {
        let mut rows = CatalogRows::from_state(&catalog());
        rows.variant_values.retain(|v| v.id.as_str() != "silver");
        let phone = ProductId::from("p-phone");

        // Color only counts black (8) once silver has no value row
        assert_eq!(
            rows.calculate_total_stock(&phone, StockFormulation::TemplateMinimum),
            8
        );
        let state = rows.clone().into_state(StockFormulation::TemplateMinimum);
        let product = state.product(&phone).unwrap();
        assert_eq!(product.stock, 8);
        assert_eq!(product.selection(&"color".into()).unwrap().selected_values.len(), 2);

        // Without a template row the whole dimension is ignored
        rows.variant_templates.retain(|t| t.id.as_str() != "color");
        assert_eq!(
            rows.calculate_total_stock(&phone, StockFormulation::TemplateMinimum),
            15
        );
        let state = rows.into_state(StockFormulation::TemplateMinimum);
        assert_eq!(state.product(&phone).unwrap().stock, 15);
    }

    #[test]
    fn test_emptied_selection_survives_round_trip() {
        let settings = CatalogSettings::default();
        let delete = |value: &str| CatalogAction::DeleteVariantValue {
            category_id: "electronics".into(),
            template_id: "color".into(),
            value_id: value.into(),
        };
        let (state, _) = catalog().reduce(delete("black"), &settings).unwrap();
        let (state, _) = state.reduce(delete("silver"), &settings).unwrap();
        let phone = ProductId::from("p-phone");
        assert_eq!(state.product(&phone).unwrap().stock, 0);

        let rows = CatalogRows::from_state(&state);
        let placeholder = rows
            .product_variants
            .iter()
            .find(|r| r.template_id.as_str() == "color")
            .unwrap();
        assert_eq!(placeholder.value_id, None);
        assert_eq!(
            rows.calculate_total_stock(&phone, StockFormulation::TemplateMinimum),
            0
        );

        let back = CatalogRows::from_json(&rows.to_json().unwrap())
            .unwrap()
            .into_state(StockFormulation::TemplateMinimum);
        assert_eq!(back, state);
        assert_eq!(back.product(&phone).unwrap().status, ProductStatus::OutOfStock);
    }

    #[test]
    fn test_status_is_reconciled_with_recomputed_stock() {
        let mut rows = CatalogRows::from_state(&catalog());
        for row in rows
            .product_variants
            .iter_mut()
            .filter(|r| r.template_id.as_str() == "storage")
        {
            row.stock = 0;
        }
        if let Some(case) = rows.products.iter_mut().find(|p| p.id.as_str() == "p-case") {
            case.status = ProductStatus::OutOfStock;
        }

        let state = rows.into_state(StockFormulation::TemplateMinimum);
        let phone = state.product(&"p-phone".into()).unwrap();
        assert_eq!(phone.stock, 0);
        assert_eq!(phone.status, ProductStatus::OutOfStock);
        let case = state.product(&"p-case".into()).unwrap();
        assert_eq!(case.stock, 30);
        assert_eq!(case.status, ProductStatus::Active);
    }

    #[test]
    fn test_rows_without_parents_are_dropped() {
        let mut rows = CatalogRows::from_state(&catalog());
        rows.product_variants.push(ProductVariantRow {
            id: "ghost".into(),
            product_id: "p-ghost".into(),
            template_id: "color".into(),
            value_id: Some("black".into()),
            price_adjustment: 0.0,
            stock: 3,
            sku: None,
        });
        rows.variant_templates.push(VariantTemplateRow {
            id: "finish".into(),
            name: "Finish".into(),
            kind: VariantKind::Material,
            display_type: Default::default(),
            required: false,
            allow_multiple: false,
            category_id: "garden".into(),
        });

        let state = rows.into_state(StockFormulation::TemplateMinimum);
        assert_eq!(state, catalog());
    }

    #[test]
    fn test_rows_from_database_json() {
        let json = r##"{
            "categories": [{ "id": "c1", "name": "Fragrances", "description": null }],
            "variant_templates": [{
                "id": "t1", "name": "Volume", "type": "volume", "display_type": "button",
                "required": true, "allow_multiple": false, "category_id": "c1"
            }],
            "variant_values": [
                { "id": "50ml", "template_id": "t1", "value": "50ml", "metadata": { "weight": "50g" } }
            ],
            "products": [{
                "id": "p1", "name": "Eau", "description": null, "category_id": "c1",
                "base_price": 80.0, "sku": "EAU", "images": [], "status": "active"
            }],
            "product_variants": [{
                "id": "pv1", "product_id": "p1", "template_id": "t1", "value_id": "50ml",
                "price_adjustment": 0, "stock": 12, "sku": null
            }]
        }"##;

        let state = CatalogRows::from_json(json)
            .unwrap()
            .into_state(StockFormulation::TemplateMinimum);
        let category = state.category(&"c1".into()).unwrap();
        assert_eq!(category.slug, "fragrances");
        let volume = category.template(&"t1".into()).unwrap();
        assert_eq!(volume.values[0].metadata.weight.as_deref(), Some("50g"));
        assert_eq!(state.product(&"p1".into()).unwrap().stock, 12);
    }
}
