use crate::model::{Category, CategoryId, Product, ProductId, TemplateId, ValueId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One immutable snapshot of the catalog.
///
/// Keyed maps keep iteration order stable, so two snapshots built from the same actions
/// compare and serialize identically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogState {
    pub categories: BTreeMap<CategoryId, Category>,
    pub products: BTreeMap<ProductId, Product>,
}

impl CatalogState {
    pub fn from_parts(
        categories: impl IntoIterator<Item = Category>,
        products: impl IntoIterator<Item = Product>,
    ) -> Self {
        Self {
            categories: categories.into_iter().map(|c| (c.id.clone(), c)).collect(),
            products: products.into_iter().map(|p| (p.id.clone(), p)).collect(),
        }
    }

    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.get(id)
    }

    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.get(id)
    }

    pub fn category_of(&self, product: &Product) -> Option<&Category> {
        self.categories.get(&product.category_id)
    }

    pub fn products_in<'a>(
        &'a self,
        category_id: &'a CategoryId,
    ) -> impl Iterator<Item = &'a Product> + 'a {
        self.products
            .values()
            .filter(move |p| &p.category_id == category_id)
    }

    /// Products of `category_id` with a selection for `template_id`.
    pub fn products_using_template(
        &self,
        category_id: &CategoryId,
        template_id: &TemplateId,
    ) -> Vec<ProductId> {
        self.products_in(category_id)
            .filter(|p| p.selection(template_id).is_some())
            .map(|p| p.id.clone())
            .collect()
    }

    /// Products of `category_id` offering `value_id` of `template_id`.
    pub fn products_using_value(
        &self,
        category_id: &CategoryId,
        template_id: &TemplateId,
        value_id: &ValueId,
    ) -> Vec<ProductId> {
        self.products_in(category_id)
            .filter(|p| {
                p.variants.iter().any(|s| {
                    &s.variant_template_id == template_id && s.value(value_id).is_some()
                })
            })
            .map(|p| p.id.clone())
            .collect()
    }
}
