//! # Category Client
//!
//! Category and variant template editing on top of the catalog store.
use super::map_store_error;
use crate::model::{Category, CategoryId, TemplateId, ValueId, VariantTemplate, VariantValue};
use crate::store::{CatalogAction, CatalogError, CatalogOutcome, CatalogState};
use catalog_store::{StoreClient, StoreError, StoreHandle};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for categories, their variant templates and template values.
#[derive(Clone)]
pub struct CategoryClient {
    inner: StoreClient<CatalogState>,
}

impl CategoryClient {
    pub fn new(inner: StoreClient<CatalogState>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl StoreHandle<CatalogState> for CategoryClient {
    type Error = CatalogError;

    fn inner(&self) -> &StoreClient<CatalogState> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        map_store_error(e)
    }
}

impl CategoryClient {
    #[instrument(skip(self, category), fields(category_id = %category.id))]
    pub async fn create_category(&self, category: Category) -> Result<CategoryId, CatalogError> {
        let id = category.id.clone();
        self.dispatch(CatalogAction::AddCategory(category)).await?;
        debug!("Category created");
        Ok(id)
    }

    /// Replaces a category. Templates or values it no longer lists are released under the
    /// configured deletion policy.
    #[instrument(skip(self, category), fields(category_id = %category.id))]
    pub async fn update_category(&self, category: Category) -> Result<CatalogOutcome, CatalogError> {
        self.dispatch(CatalogAction::UpdateCategory(category)).await
    }

    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: CategoryId) -> Result<CatalogOutcome, CatalogError> {
        self.dispatch(CatalogAction::DeleteCategory(id)).await
    }

    #[instrument(skip(self))]
    pub async fn get_category(&self, id: &CategoryId) -> Result<Option<Category>, CatalogError> {
        let state = self.snapshot().await?;
        Ok(state.category(id).cloned())
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        let state = self.snapshot().await?;
        Ok(state.categories.values().cloned().collect())
    }

    #[instrument(skip(self, template), fields(template_id = %template.id))]
    pub async fn add_template(
        &self,
        category_id: CategoryId,
        template: VariantTemplate,
    ) -> Result<CatalogOutcome, CatalogError> {
        self.dispatch(CatalogAction::AddVariantTemplate {
            category_id,
            template,
        })
        .await
    }

    #[instrument(skip(self, template), fields(template_id = %template.id))]
    pub async fn update_template(
        &self,
        category_id: CategoryId,
        template: VariantTemplate,
    ) -> Result<CatalogOutcome, CatalogError> {
        self.dispatch(CatalogAction::UpdateVariantTemplate {
            category_id,
            template,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete_template(
        &self,
        category_id: CategoryId,
        template_id: TemplateId,
    ) -> Result<CatalogOutcome, CatalogError> {
        self.dispatch(CatalogAction::DeleteVariantTemplate {
            category_id,
            template_id,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn add_value(
        &self,
        category_id: CategoryId,
        template_id: TemplateId,
        value: VariantValue,
    ) -> Result<CatalogOutcome, CatalogError> {
        self.dispatch(CatalogAction::AddVariantValue {
            category_id,
            template_id,
            value,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete_value(
        &self,
        category_id: CategoryId,
        template_id: TemplateId,
        value_id: ValueId,
    ) -> Result<CatalogOutcome, CatalogError> {
        self.dispatch(CatalogAction::DeleteVariantValue {
            category_id,
            template_id,
            value_id,
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_store::mock::{create_mock_client, expect_dispatch, MockStore};

    #[tokio::test]
    async fn test_create_category_sends_add_action() {
        let (client, mut receiver) = create_mock_client::<CatalogState>(10);
        let categories = CategoryClient::new(client);

        let task = tokio::spawn(async move {
            categories
                .create_category(Category::new("apparel", "Apparel"))
                .await
        });

        let (action, responder) = expect_dispatch(&mut receiver)
            .await
            .expect("Expected Dispatch request");
        match action {
            CatalogAction::AddCategory(category) => assert_eq!(category.slug, "apparel"),
            other => panic!("Expected AddCategory, got {other:?}"),
        }
        responder.send(Ok(CatalogOutcome::Applied)).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), CategoryId::from("apparel"));
    }

    #[tokio::test]
    async fn test_rejection_is_recovered_as_catalog_error() {
        let mut mock = MockStore::<CatalogState>::new();
        mock.expect_dispatch()
            .return_rejected(CatalogError::CategoryNotFound("garden".into()));
        mock.expect_dispatch().return_err(StoreError::StoreDropped);

        let categories = CategoryClient::new(mock.client());
        let err = categories
            .delete_category("garden".into())
            .await
            .unwrap_err();
        assert_eq!(err, CatalogError::CategoryNotFound("garden".into()));

        let err = categories
            .delete_template("apparel".into(), "t-size".into())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            CatalogError::Store("Store dropped response channel".into())
        );

        mock.verify();
    }

    #[tokio::test]
    async fn test_get_category_reads_snapshot() {
        let mut mock = MockStore::<CatalogState>::new();
        mock.expect_snapshot().return_ok(CatalogState::from_parts(
            [Category::new("apparel", "Apparel")],
            [],
        ));
        mock.expect_snapshot().return_ok(CatalogState::default());

        let categories = CategoryClient::new(mock.client());
        let found = categories.get_category(&"apparel".into()).await.unwrap();
        assert_eq!(found.map(|c| c.name), Some("Apparel".to_string()));
        assert!(categories.list_categories().await.unwrap().is_empty());

        mock.verify();
    }
}
