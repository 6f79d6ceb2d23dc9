use product_dashboard::{setup_tracing, Category, DashboardSystem, ProductDraft, ProductPatch, StoreConfig};
use tracing::{error, info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = StoreConfig::from_env().map_err(|e| e.to_string())?;
    info!(latency_ms = config.latency.as_millis(), "Starting product dashboard");

    let system = DashboardSystem::start(&config);
    let mut view = system.view();

    let span = tracing::info_span!("initial_load");
    async {
        let response = view.load_page(1, 10).await;
        match response.data.as_ref() {
            Some(page) if response.success => {
                let summary = serde_json::json!({
                    "total": page.total,
                    "page": page.page,
                    "totalPages": page.total_pages,
                    "hasMore": page.has_more,
                });
                info!(page = %summary, shown = view.products().len(), "Products loaded");
            }
            _ => error!(message = response.message(), "Failed to fetch products"),
        }
    }
    .instrument(span)
    .await;

    let mice = system.product_client.list_by_category(Category::Mouse).await;
    info!(message = mice.message(), "Category filter");

    let found = system.product_client.search("logitech").await;
    info!(message = found.message(), "Search");

    let draft = ProductDraft::new("Ajazz AK820", "Ajazz", Category::Keyboard, 990_000.0, 12)
        .with_description("Gasket-mounted 75% keyboard with knob")
        .with_image("https://images.example.com/products/ajazz-ak820.jpg")
        .with_spec("switch", "Ajazz Flying Fish");

    let span = tracing::info_span!("product_lifecycle");
    let lifecycle = async {
        let created = view.create(draft).await.into_result()?;
        info!(product_id = %created.id, "Created");

        let opened = view.open(&created.id).await.into_result()?;
        info!(name = %opened.name, brand = %opened.brand, "Opened");

        let updated = view.patch(&created.id, ProductPatch::stock(5)).await.into_result()?;
        info!(
            product_id = %updated.id,
            stock = updated.stock,
            updated_at = %updated.updated_at,
            "Updated"
        );
        let record = serde_json::to_string(&updated).map_err(|e| e.to_string())?;
        info!(record = %record, "Stored record");

        view.delete(&created.id).await.into_result()?;
        info!(remaining = view.products().len(), "Deleted");
        Ok::<(), String>(())
    }
    .instrument(span)
    .await;

    if let Err(message) = lifecycle {
        warn!(message = %message, "Product lifecycle failed");
    }

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
