mod domain;
mod clients;
mod dispatcher;
mod products;

mod app_system;

#[cfg(test)]
mod mock_framework;

mod store_framework;

use tracing::{error, info, warn, Instrument};
use crate::app_system::{setup_tracing, Storefront, StorefrontConfig};
use crate::products::selectors;

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = StorefrontConfig::from_env().map_err(|e| e.to_string())?;
    let query = std::env::args().skip(1).collect::<Vec<_>>().join(" ");

    info!("Starting storefront client");
    let storefront = Storefront::new(&config).map_err(|e| e.to_string())?;

    if let Some(mut notices) = storefront.notices() {
        tokio::spawn(async move {
            while let Ok(notice) = notices.recv().await {
                info!(level = ?notice.level, display_for = ?notice.display_for, "{}", notice.message);
            }
        });
    }

    let span = tracing::info_span!("catalogue_load");
    let loaded = async {
        info!("Loading products");
        storefront.products.fetch_products().await
    }
    .instrument(span)
    .await;

    match loaded {
        Ok(products) => {
            let matches = selectors::search(&products, &query);
            info!(query = %query, shown = matches.len(), total = products.len(), "Catalogue loaded");
            for product in matches {
                info!(product_id = %product.id, price = product.price, "{}", product.name);
            }
            let categories = selectors::categories(&products);
            if !categories.is_empty() {
                info!(categories = ?categories, "Browse by category");
            }
        }
        Err(e) => error!(error = %e, "Loading products failed"),
    }

    match storefront.products.state().await {
        Ok(state) => {
            if let Some(message) = state.failure_message() {
                warn!(failure = %message, "Store holds a failure");
            }
        }
        Err(e) => error!(error = %e, "Store unavailable"),
    }

    // Shutdown system gracefully
    storefront.shutdown().await?;

    info!("Storefront client finished");
    Ok(())
}
