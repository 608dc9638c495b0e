//! # Observability
//!
//! One-time setup for structured logging with `tracing`.
//!
//! Every store logs its lifecycle and each request with the state type and revision as
//! structured fields:
//!
//! ```text
//! INFO Store started state_type="CatalogState"
//! INFO Applied state_type="CatalogState" revision=4 outcome=Applied
//! WARN Rejected state_type="CatalogState" revision=4 error=Product not found: p-9
//! INFO Shutdown state_type="CatalogState" revision=4
//! ```
//!
//! Run with `RUST_LOG=debug` to also see the full action payload of every dispatch.

use tracing_subscriber::EnvFilter;

/// Installs a compact `fmt` subscriber.
///
/// `RUST_LOG` wins when it is set; otherwise `default_filter` (e.g. `"info"` or
/// `"variant_catalog=debug,catalog_store=info"`) is used.
pub fn setup_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
