//! The catalog reducer.
//!
//! `reduce` clones the snapshot, applies the action to the clone and hands the clone back.
//! Any error discards the clone, so a rejected action never leaves a partial write behind.
//!
//! Every template or category edit is funnelled through `replace_category`, which diffs the
//! old and new category and applies the [`DeletionPolicy`] to whatever disappeared. Every
//! product write goes through `put_product`, which validates and then recomputes the derived
//! `stock` and `status`.

use super::actions::{CatalogAction, CatalogOutcome};
use super::error::CatalogError;
use super::settings::{CatalogSettings, DeletionPolicy};
use super::state::CatalogState;
use crate::inventory::{compute_total_stock, total_stock_in};
use crate::model::{
    Category, CategoryId, Direction, Product, ProductId, StockMovement, TemplateId, ValueId,
    VariantRef,
};
use crate::validation::{validate_category, validate_product};
use catalog_store::Reducer;
use std::collections::BTreeSet;
use std::fmt::{self, Display};
use tracing::debug;

impl Reducer for CatalogState {
    type Action = CatalogAction;
    type Outcome = CatalogOutcome;
    type Context = CatalogSettings;
    type Error = CatalogError;

    fn reduce(
        &self,
        action: CatalogAction,
        settings: &CatalogSettings,
    ) -> Result<(Self, CatalogOutcome), CatalogError> {
        let mut next = self.clone();
        let outcome = next.apply(action, settings)?;
        Ok((next, outcome))
    }
}

/// Something an edit removed from a category.
#[derive(Debug, Clone, PartialEq)]
enum Removal {
    Template(TemplateId),
    Value(TemplateId, ValueId),
}

impl Removal {
    fn kind(&self) -> &'static str {
        match self {
            Removal::Template(_) => "Variant template",
            Removal::Value(..) => "Variant value",
        }
    }

    fn users(&self, state: &CatalogState, category_id: &CategoryId) -> Vec<ProductId> {
        match self {
            Removal::Template(t) => state.products_using_template(category_id, t),
            Removal::Value(t, v) => state.products_using_value(category_id, t, v),
        }
    }

    /// Drops the removed reference from `product`. A selection whose last value was removed
    /// stays behind empty and so holds the template-minimum total at zero.
    fn prune(&self, product: &mut Product) {
        match self {
            Removal::Template(t) => product.variants.retain(|s| &s.variant_template_id != t),
            Removal::Value(t, v) => product
                .variants
                .iter_mut()
                .filter(|s| &s.variant_template_id == t)
                .for_each(|s| s.selected_values.retain(|x| &x.value_id != v)),
        }
    }
}

impl Display for Removal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Removal::Template(t) => write!(f, "{t}"),
            Removal::Value(t, v) => write!(f, "{t}/{v}"),
        }
    }
}

/// Templates and values present in `old` but not in `new`.
fn removed_references(old: &Category, new: &Category) -> Vec<Removal> {
    let mut removals = Vec::new();
    for template in &old.variants {
        match new.template(&template.id) {
            None => removals.push(Removal::Template(template.id.clone())),
            Some(kept) => removals.extend(
                template
                    .values
                    .iter()
                    .filter(|v| !kept.has_value(&v.id))
                    .map(|v| Removal::Value(template.id.clone(), v.id.clone())),
            ),
        }
    }
    removals
}

/// Recomputes the fields derived from a product's selections.
///
/// Products with variants get their stock from the configured formulation. A product
/// that `had_variants` and now has none starts over at 0 own stock. `Active` and
/// `OutOfStock` follow the total across zero; `Draft` is never changed here.
fn refresh(
    product: &mut Product,
    had_variants: bool,
    category: Option<&Category>,
    settings: &CatalogSettings,
) {
    if product.has_variants() {
        product.stock = match category {
            Some(category) => total_stock_in(product, category, settings.stock_formulation),
            None => compute_total_stock(product, settings.stock_formulation),
        };
    } else if had_variants {
        product.stock = 0;
    }
    product.status = product.status.reconciled(product.stock);
}

fn apply_quantity(current: u32, movement: &StockMovement) -> Result<u32, CatalogError> {
    match movement.direction {
        Direction::In => Ok(current.saturating_add(movement.quantity)),
        Direction::Out => {
            current
                .checked_sub(movement.quantity)
                .ok_or(CatalogError::InsufficientStock {
                    requested: movement.quantity,
                    available: current,
                })
        }
    }
}

impl CatalogState {
    fn apply(
        &mut self,
        action: CatalogAction,
        settings: &CatalogSettings,
    ) -> Result<CatalogOutcome, CatalogError> {
        match action {
            CatalogAction::AddCategory(category) => {
                if self.categories.contains_key(&category.id) {
                    return Err(CatalogError::AlreadyExists {
                        kind: "Category",
                        id: category.id.to_string(),
                    });
                }
                self.replace_category(category, settings)
            }
            CatalogAction::UpdateCategory(category) => {
                self.existing_category(&category.id)?;
                self.replace_category(category, settings)
            }
            CatalogAction::DeleteCategory(id) => self.delete_category(&id, settings.deletion_policy),
            CatalogAction::AddVariantTemplate {
                category_id,
                template,
            } => {
                let mut category = self.existing_category(&category_id)?.clone();
                if category.has_template(&template.id) {
                    return Err(CatalogError::AlreadyExists {
                        kind: "Variant template",
                        id: template.id.to_string(),
                    });
                }
                category.variants.push(template);
                self.replace_category(category, settings)
            }
            CatalogAction::UpdateVariantTemplate {
                category_id,
                template,
            } => {
                let mut category = self.existing_category(&category_id)?.clone();
                let slot = category
                    .variants
                    .iter_mut()
                    .find(|t| t.id == template.id)
                    .ok_or_else(|| CatalogError::TemplateNotFound {
                        category: category_id.clone(),
                        template: template.id.clone(),
                    })?;
                *slot = template;
                self.replace_category(category, settings)
            }
            CatalogAction::DeleteVariantTemplate {
                category_id,
                template_id,
            } => {
                let mut category = self.existing_category(&category_id)?.clone();
                if !category.has_template(&template_id) {
                    return Err(CatalogError::TemplateNotFound {
                        category: category_id,
                        template: template_id,
                    });
                }
                category.variants.retain(|t| t.id != template_id);
                self.replace_category(category, settings)
            }
            CatalogAction::AddVariantValue {
                category_id,
                template_id,
                value,
            } => {
                let mut category = self.existing_category(&category_id)?.clone();
                let template = category
                    .variants
                    .iter_mut()
                    .find(|t| t.id == template_id)
                    .ok_or_else(|| CatalogError::TemplateNotFound {
                        category: category_id.clone(),
                        template: template_id.clone(),
                    })?;
                if template.has_value(&value.id) {
                    return Err(CatalogError::AlreadyExists {
                        kind: "Variant value",
                        id: format!("{template_id}/{}", value.id),
                    });
                }
                template.values.push(value);
                self.replace_category(category, settings)
            }
            CatalogAction::DeleteVariantValue {
                category_id,
                template_id,
                value_id,
            } => {
                let mut category = self.existing_category(&category_id)?.clone();
                let template = category
                    .variants
                    .iter_mut()
                    .find(|t| t.id == template_id)
                    .ok_or_else(|| CatalogError::TemplateNotFound {
                        category: category_id.clone(),
                        template: template_id.clone(),
                    })?;
                if !template.has_value(&value_id) {
                    return Err(CatalogError::ValueNotFound {
                        template: template_id,
                        value: value_id,
                    });
                }
                template.values.retain(|v| v.id != value_id);
                self.replace_category(category, settings)
            }
            CatalogAction::AddProduct(product) => {
                if self.products.contains_key(&product.id) {
                    return Err(CatalogError::AlreadyExists {
                        kind: "Product",
                        id: product.id.to_string(),
                    });
                }
                self.put_product(product, settings)
            }
            CatalogAction::UpdateProduct(product) => {
                self.existing_product(&product.id)?;
                self.put_product(product, settings)
            }
            CatalogAction::DeleteProduct(id) => {
                self.products
                    .remove(&id)
                    .ok_or(CatalogError::ProductNotFound(id))?;
                Ok(CatalogOutcome::Applied)
            }
            CatalogAction::UpdateProductVariants {
                product_id,
                variants,
            } => {
                let mut product = self.existing_product(&product_id)?.clone();
                product.variants = variants;
                self.put_product(product, settings)
            }
            CatalogAction::ChangeProductCategory {
                product_id,
                category_id,
            } => {
                let mut product = self.existing_product(&product_id)?.clone();
                if product.category_id != category_id {
                    product.variants.clear();
                    product.category_id = category_id;
                }
                self.put_product(product, settings)
            }
            CatalogAction::RecordStockMovement(movement) => {
                self.record_movement(&movement, settings)
            }
        }
    }

    fn existing_category(&self, id: &CategoryId) -> Result<&Category, CatalogError> {
        self.categories
            .get(id)
            .ok_or_else(|| CatalogError::CategoryNotFound(id.clone()))
    }

    fn existing_product(&self, id: &ProductId) -> Result<&Product, CatalogError> {
        self.products
            .get(id)
            .ok_or_else(|| CatalogError::ProductNotFound(id.clone()))
    }

    /// Validates `category`, releases whatever it dropped compared to the stored version and
    /// stores it.
    fn replace_category(
        &mut self,
        category: Category,
        settings: &CatalogSettings,
    ) -> Result<CatalogOutcome, CatalogError> {
        let violations = validate_category(&category);
        if !violations.is_empty() {
            return Err(CatalogError::InvalidCategory(violations));
        }

        let removals = self
            .categories
            .get(&category.id)
            .map(|old| removed_references(old, &category))
            .unwrap_or_default();
        let pruned = self.release(&category.id, &removals, settings.deletion_policy)?;

        let category_id = category.id.clone();
        self.categories.insert(category_id.clone(), category);
        self.refresh_category(&category_id, settings);

        Ok(if pruned.is_empty() {
            CatalogOutcome::Applied
        } else {
            CatalogOutcome::Cascaded {
                pruned,
                deleted: Vec::new(),
            }
        })
    }

    /// Applies `policy` to the products that reference any of `removals`.
    fn release(
        &mut self,
        category_id: &CategoryId,
        removals: &[Removal],
        policy: DeletionPolicy,
    ) -> Result<Vec<ProductId>, CatalogError> {
        let mut pruned = BTreeSet::new();
        for removal in removals {
            let users = removal.users(self, category_id);
            if users.is_empty() {
                continue;
            }
            match policy {
                DeletionPolicy::Restrict => {
                    return Err(CatalogError::InUse {
                        kind: removal.kind(),
                        id: removal.to_string(),
                        products: users,
                    });
                }
                DeletionPolicy::Orphan => {
                    debug!(reference = %removal, products = users.len(), "Leaving orphaned references");
                }
                DeletionPolicy::Cascade => {
                    for id in users {
                        if let Some(product) = self.products.get_mut(&id) {
                            let had_variants = product.has_variants();
                            removal.prune(product);
                            if had_variants && !product.has_variants() {
                                product.stock = 0;
                            }
                        }
                        pruned.insert(id);
                    }
                }
            }
        }
        Ok(pruned.into_iter().collect())
    }

    fn delete_category(
        &mut self,
        id: &CategoryId,
        policy: DeletionPolicy,
    ) -> Result<CatalogOutcome, CatalogError> {
        self.existing_category(id)?;
        let users: Vec<ProductId> = self.products_in(id).map(|p| p.id.clone()).collect();

        let deleted = match policy {
            DeletionPolicy::Restrict if !users.is_empty() => {
                return Err(CatalogError::InUse {
                    kind: "Category",
                    id: id.to_string(),
                    products: users,
                });
            }
            DeletionPolicy::Cascade => {
                for product_id in &users {
                    self.products.remove(product_id);
                }
                users
            }
            _ => Vec::new(),
        };
        self.categories.remove(id);

        Ok(if deleted.is_empty() {
            CatalogOutcome::Applied
        } else {
            CatalogOutcome::Cascaded {
                pruned: Vec::new(),
                deleted,
            }
        })
    }

    fn refresh_category(&mut self, category_id: &CategoryId, settings: &CatalogSettings) {
        let category = self.categories.get(category_id);
        for product in self
            .products
            .values_mut()
            .filter(|p| &p.category_id == category_id)
        {
            refresh(product, false, category, settings);
        }
    }

    /// Validates and stores a product with its derived fields recomputed.
    fn put_product(
        &mut self,
        mut product: Product,
        settings: &CatalogSettings,
    ) -> Result<CatalogOutcome, CatalogError> {
        let category = self
            .categories
            .get(&product.category_id)
            .ok_or_else(|| CatalogError::CategoryNotFound(product.category_id.clone()))?;

        let violations = validate_product(&product, category);
        if !violations.is_empty() {
            return Err(CatalogError::InvalidProduct(violations));
        }

        let had_variants = self
            .products
            .get(&product.id)
            .is_some_and(Product::has_variants);
        refresh(&mut product, had_variants, Some(category), settings);
        self.products.insert(product.id.clone(), product);
        Ok(CatalogOutcome::Applied)
    }

    fn record_movement(
        &mut self,
        movement: &StockMovement,
        settings: &CatalogSettings,
    ) -> Result<CatalogOutcome, CatalogError> {
        let mut product = self.existing_product(&movement.product_id)?.clone();

        match &movement.variant {
            None => {
                if product.has_variants() {
                    return Err(CatalogError::VariantRequired(product.id));
                }
                product.stock = apply_quantity(product.stock, movement)?;
            }
            Some(VariantRef {
                template_id,
                value_id,
            }) => {
                let value = product
                    .variants
                    .iter_mut()
                    .filter(|s| &s.variant_template_id == template_id)
                    .flat_map(|s| s.selected_values.iter_mut())
                    .find(|v| &v.value_id == value_id)
                    .ok_or_else(|| CatalogError::ValueNotFound {
                        template: template_id.clone(),
                        value: value_id.clone(),
                    })?;
                value.stock = apply_quantity(value.stock, movement)?;
            }
        }

        let category = self.categories.get(&product.category_id);
        refresh(&mut product, false, category, settings);
        let outcome = CatalogOutcome::StockRecorded {
            product_id: product.id.clone(),
            stock: product.stock,
            status: product.status,
        };
        self.products.insert(product.id.clone(), product);
        Ok(outcome)
    }
}
