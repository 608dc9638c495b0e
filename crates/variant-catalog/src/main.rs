//! # Variant Catalog Demo
//!
//! Seeds the sample catalog, prints what the summary panel would show for each product,
//! then runs a few edits (a sale, a rejected write, a cascading delete) so their effect can
//! be followed in the logs.
//!
//! ```bash
//! variant-catalog --config catalog.toml --formulation combination-sum
//! RUST_LOG=debug variant-catalog --dump-rows
//! ```

use catalog_store::tracing::setup_tracing;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info, warn, Instrument};
use variant_catalog::config::CatalogConfig;
use variant_catalog::fixtures;
use variant_catalog::inventory::StockFormulation;
use variant_catalog::lifecycle::CatalogSystem;
use variant_catalog::model::{MovementReason, ProductVariantSelection, SelectedValue, StockMovement};
use variant_catalog::rows::CatalogRows;

#[derive(Debug, Parser)]
#[command(name = "variant-catalog", about = "Variant stock and SKU demo catalog")]
struct Args {
    /// Config file (TOML, or JSON with a .json extension).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides the configured stock formulation.
    #[arg(short, long)]
    formulation: Option<StockFormulation>,

    /// Overrides the configured low-stock threshold.
    #[arg(long)]
    low_stock_threshold: Option<u32>,

    /// Print the final catalog as relational rows (JSON) on exit.
    #[arg(long)]
    dump_rows: bool,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => CatalogConfig::load(path).map_err(|e| e.to_string())?,
        None => CatalogConfig::default(),
    };
    if let Some(formulation) = args.formulation {
        config.inventory.stock_formulation = formulation;
    }
    if let Some(threshold) = args.low_stock_threshold {
        config.inventory.low_stock_threshold = threshold;
    }

    setup_tracing(&config.logging.filter);
    info!(config = ?args.config, "Starting variant catalog");

    let system = CatalogSystem::with_state(&config, fixtures::empty_catalog());
    let products = &system.product_client;

    let span = tracing::info_span!("seeding");
    async {
        for product in fixtures::products() {
            let id = products.create_product(product).await?;
            info!(product_id = %id, "Product created");
        }
        Ok::<_, variant_catalog::store::CatalogError>(())
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    for product in products.list_products().await.map_err(|e| e.to_string())? {
        let summary = products
            .summary(&product.id)
            .await
            .map_err(|e| e.to_string())?;
        info!(
            product_id = %product.id,
            total_stock = summary.total_stock,
            level = ?summary.level,
            combinations = summary.combination_count,
            min_price = summary.price_range.min,
            max_price = summary.price_range.max,
            "Summary"
        );
        for (template_id, sku) in &summary.skus {
            info!(product_id = %product.id, %template_id, %sku, "Derived SKU");
        }
    }

    let span = tracing::info_span!("edits");
    async {
        let sale = StockMovement::outbound("p-phone", 3, MovementReason::Sale)
            .for_variant("storage", "128gb")
            .with_notes("Online order");
        match products.record_movement(sale).await {
            Ok(change) => info!(stock = change.stock, status = ?change.status, "Sale recorded"),
            Err(e) => error!(error = %e, "Sale failed"),
        }

        let two_fabrics = vec![
            ProductVariantSelection::new("clothing-sizes").with_value(SelectedValue::new("m", 5)),
            ProductVariantSelection::new("basic-colors").with_value(SelectedValue::new("red", 5)),
            ProductVariantSelection::new("fabric-materials")
                .with_value(SelectedValue::new("cotton", 5))
                .with_value(SelectedValue::new("silk", 5)),
        ];
        if let Err(e) = products.set_variants("p-tee".into(), two_fabrics).await {
            warn!(error = %e, "Variant update rejected");
        }

        match system
            .category_client
            .delete_value("electronics".into(), "color".into(), "silver".into())
            .await
        {
            Ok(outcome) => info!(?outcome, "Value deleted"),
            Err(e) => warn!(error = %e, "Value deletion refused"),
        }

        match products.low_stock().await {
            Ok(low) => {
                for (product_id, total) in low {
                    warn!(%product_id, total, "Low stock");
                }
            }
            Err(e) => error!(error = %e, "Low stock query failed"),
        }
    }
    .instrument(span)
    .await;

    let state = system.shutdown().await.map_err(|e| e.to_string())?;

    if args.dump_rows {
        let rows = CatalogRows::from_state(&state)
            .to_json()
            .map_err(|e| e.to_string())?;
        println!("{rows}");
    }

    info!("Application completed successfully");
    Ok(())
}
