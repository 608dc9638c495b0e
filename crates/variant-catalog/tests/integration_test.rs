use variant_catalog::config::CatalogConfig;
use variant_catalog::fixtures;
use variant_catalog::inventory::{StockFormulation, StockLevel};
use variant_catalog::lifecycle::CatalogSystem;
use variant_catalog::model::{
    MovementReason, ProductId, ProductStatus, ProductVariantSelection, SelectedValue,
    StockMovement, TemplateId, VariantValue,
};
use variant_catalog::rows::CatalogRows;
use variant_catalog::store::{CatalogError, CatalogOutcome, DeletionPolicy};
use variant_catalog::validation::Violation;

async fn seeded(config: CatalogConfig) -> CatalogSystem {
    let system = CatalogSystem::with_state(&config, fixtures::empty_catalog());
    for product in fixtures::products() {
        system
            .product_client
            .create_product(product)
            .await
            .expect("Failed to create fixture product");
    }
    system
}

fn with_policy(policy: DeletionPolicy) -> CatalogConfig {
    let mut config = CatalogConfig::default();
    config.inventory.deletion_policy = policy;
    config
}

/// Seeds the catalog, sells from one variant and checks every derived figure along the way.
#[tokio::test]
async fn test_full_catalog_integration() {
    let system = seeded(CatalogConfig::default()).await;
    let products = &system.product_client;
    let phone = ProductId::from("p-phone");

    // Template minimum: storage 10+5, color 8+20
    assert_eq!(products.total_stock(&phone).await.unwrap(), 15);
    assert_eq!(products.total_stock(&"p-tee".into()).await.unwrap(), 27);
    assert_eq!(products.total_stock(&"p-charger".into()).await.unwrap(), 60);

    // Derived stock is written back to the product
    let stored = products.get_product(&phone).await.unwrap().unwrap();
    assert_eq!(stored.stock, 15);
    assert_eq!(stored.status, ProductStatus::Active);

    let summary = products.summary(&"p-tee".into()).await.unwrap();
    assert_eq!(summary.total_stock, 27);
    assert_eq!(summary.level, StockLevel::InStock);
    assert_eq!(summary.combination_count, 6);
    assert_eq!(summary.price_range.min, 24.0);
    assert_eq!(summary.price_range.max, 26.0);
    assert_eq!(
        summary.skus,
        vec![
            (TemplateId::from("clothing-sizes"), "TS-001-SIZ-m-s-xl".to_string()),
            (TemplateId::from("basic-colors"), "TS-001-COL-black-white".to_string()),
            (TemplateId::from("fabric-materials"), "TS-001-MAT-cotton".to_string()),
        ]
    );

    let combos = products.combinations(&phone).await.unwrap();
    assert_eq!(combos.len(), 4);

    // Sell three of the 128GB model
    let change = products
        .record_movement(
            StockMovement::outbound("p-phone", 3, MovementReason::Sale).for_variant("storage", "128gb"),
        )
        .await
        .expect("Failed to record sale");
    assert_eq!(change.stock, 12);
    assert_eq!(change.status, ProductStatus::Active);

    // Overselling is refused and nothing changes
    let err = products
        .record_movement(
            StockMovement::outbound("p-phone", 20, MovementReason::Sale).for_variant("storage", "128gb"),
        )
        .await
        .unwrap_err();
    assert_eq!(
        err,
        CatalogError::InsufficientStock {
            requested: 20,
            available: 2
        }
    );
    assert_eq!(products.total_stock(&phone).await.unwrap(), 12);

    assert_eq!(
        products.low_stock().await.unwrap(),
        vec![(ProductId::from("p-eau"), 4)]
    );

    let state = system.shutdown().await.expect("Failed to shut down");
    assert_eq!(state.products.len(), 4);
    assert_eq!(state.categories.len(), 3);
}

#[tokio::test]
async fn test_combination_sum_configuration() {
    let mut config = CatalogConfig::default();
    config.inventory.stock_formulation = StockFormulation::CombinationSum;
    let system = seeded(config).await;

    // min(10,8) + min(10,20) + min(5,8) + min(5,20)
    assert_eq!(
        system.product_client.total_stock(&"p-phone".into()).await.unwrap(),
        28
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_invalid_variant_write_is_rejected() {
    let system = seeded(CatalogConfig::default()).await;
    let products = &system.product_client;

    let two_fabrics = vec![
        ProductVariantSelection::new("clothing-sizes").with_value(SelectedValue::new("m", 5)),
        ProductVariantSelection::new("basic-colors").with_value(SelectedValue::new("red", 5)),
        ProductVariantSelection::new("fabric-materials")
            .with_value(SelectedValue::new("cotton", 5))
            .with_value(SelectedValue::new("silk", 5)),
    ];
    match products.set_variants("p-tee".into(), two_fabrics).await {
        Err(CatalogError::InvalidProduct(violations)) => {
            assert_eq!(
                violations,
                vec![Violation::TooManyValues {
                    template: "fabric-materials".into(),
                    count: 2
                }]
            );
        }
        other => panic!("Expected InvalidProduct, got {other:?}"),
    }

    // The stored product is untouched
    assert_eq!(products.total_stock(&"p-tee".into()).await.unwrap(), 27);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_cascade_value_deletion_prunes_products() {
    let system = seeded(CatalogConfig::default()).await;

    let outcome = system
        .category_client
        .delete_value("electronics".into(), "color".into(), "silver".into())
        .await
        .expect("Failed to delete value");
    assert_eq!(
        outcome,
        CatalogOutcome::Cascaded {
            pruned: vec!["p-phone".into()],
            deleted: vec![],
        }
    );

    let phone = system
        .product_client
        .get_product(&"p-phone".into())
        .await
        .unwrap()
        .unwrap();
    let color = phone.selection(&"color".into()).unwrap();
    assert_eq!(color.selected_values.len(), 1);
    // storage 15, color now only black 8
    assert_eq!(phone.stock, 8);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_restrict_policy_refuses_deletion_in_use() {
    let system = seeded(with_policy(DeletionPolicy::Restrict)).await;

    let err = system
        .category_client
        .delete_value("electronics".into(), "color".into(), "silver".into())
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::InUse { ref products, .. } if products == &vec![ProductId::from("p-phone")]));

    let err = system
        .category_client
        .delete_category("electronics".into())
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::InUse { kind: "Category", .. }));

    // Unused values can still go
    system
        .category_client
        .add_value("fragrances".into(), "volume".into(), VariantValue::new("200ml", "200ml"))
        .await
        .unwrap();
    assert_eq!(
        system
            .category_client
            .delete_value("fragrances".into(), "volume".into(), "200ml".into())
            .await
            .unwrap(),
        CatalogOutcome::Applied
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_orphan_policy_keeps_references_but_skips_them() {
    let system = seeded(with_policy(DeletionPolicy::Orphan)).await;

    system
        .category_client
        .delete_value("electronics".into(), "color".into(), "silver".into())
        .await
        .unwrap();

    let phone = system
        .product_client
        .get_product(&"p-phone".into())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(phone.selection(&"color".into()).unwrap().selected_values.len(), 2);
    assert_eq!(phone.stock, 8);
    assert_eq!(
        system.product_client.total_stock(&"p-phone".into()).await.unwrap(),
        8
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_category_deletion_cascades_to_products() {
    let system = seeded(CatalogConfig::default()).await;

    let outcome = system
        .category_client
        .delete_category("electronics".into())
        .await
        .unwrap();
    assert_eq!(
        outcome,
        CatalogOutcome::Cascaded {
            pruned: vec![],
            deleted: vec!["p-charger".into(), "p-phone".into()],
        }
    );

    let state = system.shutdown().await.unwrap();
    assert_eq!(state.products.len(), 2);
    assert!(state.category(&"electronics".into()).is_none());
}

#[tokio::test]
async fn test_category_change_clears_variants() {
    let system = seeded(CatalogConfig::default()).await;
    let products = &system.product_client;

    products
        .change_category("p-tee".into(), "fragrances".into())
        .await
        .unwrap();
    let tee = products.get_product(&"p-tee".into()).await.unwrap().unwrap();
    assert!(tee.variants.is_empty());
    assert_eq!(tee.stock, 0);
    assert_eq!(tee.status, ProductStatus::OutOfStock);

    // Without variants, movements apply to the product's own stock
    let change = products
        .record_movement(StockMovement::inbound("p-tee", 5, MovementReason::Purchase))
        .await
        .unwrap();
    assert_eq!(change.stock, 5);
    assert_eq!(change.status, ProductStatus::Active);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_movement_without_variant_on_variant_product() {
    let system = seeded(CatalogConfig::default()).await;

    let err = system
        .product_client
        .record_movement(StockMovement::inbound("p-phone", 5, MovementReason::Purchase))
        .await
        .unwrap_err();
    assert_eq!(err, CatalogError::VariantRequired("p-phone".into()));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_final_state_survives_row_round_trip() {
    let system = seeded(CatalogConfig::default()).await;
    let state = system.shutdown().await.unwrap();

    let json = CatalogRows::from_state(&state).to_json().unwrap();
    let rows = CatalogRows::from_json(&json).unwrap();
    assert_eq!(
        rows.calculate_total_stock(&"p-phone".into(), StockFormulation::TemplateMinimum),
        15
    );
    assert_eq!(rows.into_state(StockFormulation::TemplateMinimum), *state);
}

#[tokio::test]
async fn test_product_client_uses_the_store_settings() {
    let mut config = CatalogConfig::default();
    config.inventory.stock_formulation = StockFormulation::CombinationSum;
    config.inventory.low_stock_threshold = 30;
    let system = seeded(config).await;
    let products = &system.product_client;

    assert_eq!(products.settings(), system.settings());
    assert_eq!(products.settings().low_stock_threshold, 30);

    // Read-side totals agree with the stock the store derived
    let stored = products.get_product(&"p-phone".into()).await.unwrap().unwrap();
    assert_eq!(stored.stock, 28);
    assert_eq!(products.total_stock(&"p-phone".into()).await.unwrap(), 28);
    assert_eq!(products.summary(&"p-phone".into()).await.unwrap().level, StockLevel::LowStock);

    system.shutdown().await.unwrap();
}
