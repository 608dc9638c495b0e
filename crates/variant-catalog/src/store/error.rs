use crate::model::{CategoryId, ProductId, TemplateId, ValueId};
use crate::validation::Violation;

/// Errors surfaced by the catalog store and its clients.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("Category not found: {0}")]
    CategoryNotFound(CategoryId),
    #[error("Variant template {template} not found in category {category}")]
    TemplateNotFound {
        category: CategoryId,
        template: TemplateId,
    },
    #[error("Variant value {value} not found in template {template}")]
    ValueNotFound { template: TemplateId, value: ValueId },
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),
    #[error("{kind} already exists: {id}")]
    AlreadyExists { kind: &'static str, id: String },
    #[error("{kind} {id} is still used by {} product(s)", .products.len())]
    InUse {
        kind: &'static str,
        id: String,
        products: Vec<ProductId>,
    },
    #[error("Invalid category: {}", describe(.0))]
    InvalidCategory(Vec<Violation>),
    #[error("Invalid product: {}", describe(.0))]
    InvalidProduct(Vec<Violation>),
    #[error("Product {0} tracks stock per variant value; the movement must name one")]
    VariantRequired(ProductId),
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },
    #[error("Store error: {0}")]
    Store(String),
}

fn describe(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
