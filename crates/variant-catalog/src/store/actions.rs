//! Actions accepted by the catalog reducer and the outcomes it reports.

use crate::model::{
    Category, CategoryId, Product, ProductId, ProductStatus, ProductVariantSelection,
    StockMovement, TemplateId, ValueId, VariantTemplate, VariantValue,
};

#[derive(Debug, Clone)]
pub enum CatalogAction {
    AddCategory(Category),
    /// Replaces the category wholesale. Templates or values missing from the replacement
    /// are treated as deleted.
    UpdateCategory(Category),
    DeleteCategory(CategoryId),
    AddVariantTemplate {
        category_id: CategoryId,
        template: VariantTemplate,
    },
    /// Replaces the template with the same id. Values missing from the replacement are
    /// treated as deleted.
    UpdateVariantTemplate {
        category_id: CategoryId,
        template: VariantTemplate,
    },
    DeleteVariantTemplate {
        category_id: CategoryId,
        template_id: TemplateId,
    },
    AddVariantValue {
        category_id: CategoryId,
        template_id: TemplateId,
        value: VariantValue,
    },
    DeleteVariantValue {
        category_id: CategoryId,
        template_id: TemplateId,
        value_id: ValueId,
    },
    AddProduct(Product),
    UpdateProduct(Product),
    DeleteProduct(ProductId),
    UpdateProductVariants {
        product_id: ProductId,
        variants: Vec<ProductVariantSelection>,
    },
    /// Moves a product to another category and clears its selections.
    ChangeProductCategory {
        product_id: ProductId,
        category_id: CategoryId,
    },
    RecordStockMovement(StockMovement),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogOutcome {
    Applied,
    /// A deletion that also rewrote or removed products under the cascade policy.
    Cascaded {
        pruned: Vec<ProductId>,
        deleted: Vec<ProductId>,
    },
    StockRecorded {
        product_id: ProductId,
        stock: u32,
        status: ProductStatus,
    },
}
