//! # Product Client
//!
//! Product writes go through the store; the inventory queries (total stock, SKUs,
//! combinations, summaries) are computed here against one snapshot, so each answer is
//! consistent even while other tasks keep dispatching.
use super::map_store_error;
use crate::inventory::{
    combinations, compute_total_stock, derive_sku_in, resolved_selections, total_stock_in,
    ProductSummary,
};
use crate::model::{
    Category, CategoryId, Product, ProductId, ProductStatus, ProductVariantSelection, StockMovement,
    TemplateId, ValueId,
};
use crate::store::{CatalogAction, CatalogError, CatalogOutcome, CatalogSettings, CatalogState};
use async_trait::async_trait;
use catalog_store::{StoreClient, StoreError, StoreHandle};
use tracing::{debug, instrument};

/// Client for products and their variant inventory.
///
/// Carries the same [`CatalogSettings`] the store runs with so read-side totals use the
/// same formulation and threshold as the reducer. It is only built together with its store,
/// by [`CatalogSystem`](crate::lifecycle::CatalogSystem), so the two cannot disagree.
#[derive(Clone)]
pub struct ProductClient {
    inner: StoreClient<CatalogState>,
    settings: CatalogSettings,
}

impl ProductClient {
    pub(crate) fn new(inner: StoreClient<CatalogState>, settings: CatalogSettings) -> Self {
        Self { inner, settings }
    }

    pub fn settings(&self) -> &CatalogSettings {
        &self.settings
    }
}

#[async_trait]
impl StoreHandle<CatalogState> for ProductClient {
    type Error = CatalogError;

    fn inner(&self) -> &StoreClient<CatalogState> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        map_store_error(e)
    }
}

/// Result of a recorded stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockChange {
    pub stock: u32,
    pub status: ProductStatus,
}

impl ProductClient {
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn create_product(&self, product: Product) -> Result<ProductId, CatalogError> {
        let id = product.id.clone();
        self.dispatch(CatalogAction::AddProduct(product)).await?;
        debug!("Product created");
        Ok(id)
    }

    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn update_product(&self, product: Product) -> Result<CatalogOutcome, CatalogError> {
        self.dispatch(CatalogAction::UpdateProduct(product)).await
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ProductId) -> Result<CatalogOutcome, CatalogError> {
        self.dispatch(CatalogAction::DeleteProduct(id)).await
    }

    /// Replaces the product's variant selections. The write is validated against the
    /// product's category first.
    #[instrument(skip(self, variants))]
    pub async fn set_variants(
        &self,
        id: ProductId,
        variants: Vec<ProductVariantSelection>,
    ) -> Result<CatalogOutcome, CatalogError> {
        debug!(selections = variants.len(), "Setting variants");
        self.dispatch(CatalogAction::UpdateProductVariants {
            product_id: id,
            variants,
        })
        .await
    }

    /// Moves the product to another category. Its selections are cleared.
    #[instrument(skip(self))]
    pub async fn change_category(
        &self,
        id: ProductId,
        category_id: CategoryId,
    ) -> Result<CatalogOutcome, CatalogError> {
        self.dispatch(CatalogAction::ChangeProductCategory {
            product_id: id,
            category_id,
        })
        .await
    }

    /// Applies a stock movement and returns the product's new total and status.
    #[instrument(skip(self))]
    pub async fn record_movement(
        &self,
        movement: StockMovement,
    ) -> Result<StockChange, CatalogError> {
        match self
            .dispatch(CatalogAction::RecordStockMovement(movement))
            .await?
        {
            CatalogOutcome::StockRecorded { stock, status, .. } => Ok(StockChange { stock, status }),
            _ => unreachable!("RecordStockMovement must return StockRecorded"),
        }
    }

    pub async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, CatalogError> {
        let state = self.snapshot().await?;
        Ok(state.product(id).cloned())
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        let state = self.snapshot().await?;
        Ok(state.products.values().cloned().collect())
    }

    /// Aggregated variant stock, or the product's own stock when it has no variants.
    ///
    /// References to templates or values the category no longer has are skipped.
    #[instrument(skip(self))]
    pub async fn total_stock(&self, id: &ProductId) -> Result<u32, CatalogError> {
        let state = self.snapshot().await?;
        let product = Self::find(&state, id)?;
        Ok(self.total_for(&state, product))
    }

    /// Derived SKU per selected template.
    #[instrument(skip(self))]
    pub async fn derive_skus(
        &self,
        id: &ProductId,
    ) -> Result<Vec<(TemplateId, String)>, CatalogError> {
        let state = self.snapshot().await?;
        let product = Self::find(&state, id)?;
        let category = Self::category(&state, product)?;
        Ok(product
            .variants
            .iter()
            .filter(|s| category.has_template(&s.variant_template_id))
            .map(|s| {
                (
                    s.variant_template_id.clone(),
                    derive_sku_in(&product.sku, s, category),
                )
            })
            .collect())
    }

    /// Every purchasable combination as owned `(template, value)` pairs.
    #[instrument(skip(self))]
    pub async fn combinations(
        &self,
        id: &ProductId,
    ) -> Result<Vec<Vec<(TemplateId, ValueId)>>, CatalogError> {
        let state = self.snapshot().await?;
        let product = Self::find(&state, id)?;
        let category = Self::category(&state, product)?;
        let selections = resolved_selections(product, category);
        Ok(combinations(&selections).map(|c| c.key()).collect())
    }

    #[instrument(skip(self))]
    pub async fn summary(&self, id: &ProductId) -> Result<ProductSummary, CatalogError> {
        let state = self.snapshot().await?;
        let product = Self::find(&state, id)?;
        let category = Self::category(&state, product)?;
        Ok(ProductSummary::compute(
            product,
            category,
            self.settings.stock_formulation,
            self.settings.low_stock_threshold,
        ))
    }

    /// Products whose total is at or below the low-stock threshold, scarcest first.
    #[instrument(skip(self))]
    pub async fn low_stock(&self) -> Result<Vec<(ProductId, u32)>, CatalogError> {
        let state = self.snapshot().await?;
        let mut low: Vec<(ProductId, u32)> = state
            .products
            .values()
            .map(|p| (p.id.clone(), self.total_for(&state, p)))
            .filter(|(_, total)| *total <= self.settings.low_stock_threshold)
            .collect();
        low.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        Ok(low)
    }

    fn find<'a>(state: &'a CatalogState, id: &ProductId) -> Result<&'a Product, CatalogError> {
        state
            .product(id)
            .ok_or_else(|| CatalogError::ProductNotFound(id.clone()))
    }

    fn category<'a>(
        state: &'a CatalogState,
        product: &Product,
    ) -> Result<&'a Category, CatalogError> {
        state
            .category_of(product)
            .ok_or_else(|| CatalogError::CategoryNotFound(product.category_id.clone()))
    }

    fn total_for(&self, state: &CatalogState, product: &Product) -> u32 {
        if !product.has_variants() {
            return product.stock;
        }
        let formulation = self.settings.stock_formulation;
        match state.category_of(product) {
            Some(category) => total_stock_in(product, category, formulation),
            None => compute_total_stock(product, formulation),
        }
    }
}
