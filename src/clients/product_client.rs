use tracing::{debug, instrument, warn};

use crate::actor_framework::{FaultMode, ResourceClient};
use crate::domain::{Category, Envelope, Page, Product, ProductDraft, ProductPatch};
use crate::error::StoreError;
use crate::product_actor::ProductQuery;

/// The product API the dashboard talks to.
///
/// Every method resolves to an [`Envelope`]. Expected failures such as an
/// unknown id come back as `success == false` with a message, never as a
/// panic or an `Err`.
#[derive(Debug, Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, page: u32, page_size: u32) -> Envelope<Page<Product>> {
        debug!("Sending request");
        match self.inner.list(page, page_size).await {
            Ok(page) => Envelope::ok(page, "Products fetched successfully"),
            Err(e) => failed(e),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: impl Into<String> + std::fmt::Debug) -> Envelope<Product> {
        debug!("Sending request");
        match self.inner.get(id.into()).await {
            Ok(product) => Envelope::ok(product, "Product found"),
            Err(e) => failed(e),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_by_category(&self, category: Category) -> Envelope<Vec<Product>> {
        debug!("Sending request");
        match self.inner.find(ProductQuery::Category(category)).await {
            Ok(products) => {
                let message = format!("Found {} products in category {}", products.len(), category);
                Envelope::ok(products, message)
            }
            Err(e) => failed(e),
        }
    }

    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Envelope<Vec<Product>> {
        debug!("Sending request");
        match self.inner.find(ProductQuery::text(query)).await {
            Ok(products) => {
                let message = format!("Found {} products matching \"{}\"", products.len(), query);
                Envelope::ok(products, message)
            }
            Err(e) => failed(e),
        }
    }

    #[instrument(skip(self, draft), fields(name = %draft.name, category = %draft.category))]
    pub async fn create(&self, draft: ProductDraft) -> Envelope<Product> {
        debug!("Sending request");
        match self.inner.create(draft).await {
            Ok(product) => Envelope::ok(product, "Product created successfully"),
            Err(e) => failed(e),
        }
    }

    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: impl Into<String> + std::fmt::Debug, patch: ProductPatch) -> Envelope<Product> {
        debug!("Sending request");
        match self.inner.update(id.into(), patch).await {
            Ok(product) => Envelope::ok(product, "Product updated successfully"),
            Err(e) => failed(e),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: impl Into<String> + std::fmt::Debug) -> Envelope<bool> {
        debug!("Sending request");
        match self.inner.delete(id.into()).await {
            Ok(()) => Envelope::ok(true, "Product deleted successfully"),
            Err(e) => {
                warn!(error = %e, "Delete failed");
                Envelope::failed_with(false, e.to_string())
            }
        }
    }

    /// Switch failure injection on or off for every later request.
    #[instrument(skip(self))]
    pub async fn set_fault_mode(&self, mode: FaultMode) -> Envelope<FaultMode> {
        debug!("Sending request");
        match self.inner.set_fault_mode(mode).await {
            Ok(mode) => Envelope::ok(mode, format!("Fault mode set to {mode}")),
            Err(e) => failed(e),
        }
    }

    pub async fn shutdown(&self) -> Result<(), StoreError> {
        self.inner.shutdown().await
    }

    #[cfg(test)]
    pub async fn count(&self) -> Result<usize, StoreError> {
        self.inner.count().await
    }
}

fn failed<T>(error: StoreError) -> Envelope<T> {
    match &error {
        StoreError::NotFound(_) => debug!(error = %error, "Request failed"),
        _ => warn!(error = %error, "Request failed"),
    }
    Envelope::failed(error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_framework::ResourceActor;
    use crate::app_system::StoreConfig;
    use chrono::{TimeZone, Utc};
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    fn start(config: StoreConfig, drafts: Vec<ProductDraft>) -> ProductClient {
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move || counter.fetch_add(1, Ordering::SeqCst).to_string();
        let (actor, inner) = ResourceActor::<Product>::new(config.buffer_size, next_id);
        let actor = actor
            .with_latency(config.latency)
            .with_fault_mode(config.fault_mode)
            .seed(drafts);
        tokio::spawn(actor.run());
        ProductClient::new(inner)
    }

    fn draft(name: &str, category: Category) -> ProductDraft {
        ProductDraft::new(name, "Acme", category, 10.0, 3)
            .with_description(format!("{name} description"))
            .with_image(format!("https://img.example.com/{name}.png"))
    }

    fn numbered(n: usize) -> Vec<ProductDraft> {
        (0..n).map(|i| draft(&format!("item-{i}"), Category::Keyboard)).collect()
    }

    #[tokio::test]
    async fn test_list_pages_through_fifteen_products() {
        let client = start(StoreConfig::instant(), numbered(15));

        let first = client.list(1, 10).await;
        assert!(first.success);
        assert_eq!(first.message(), "Products fetched successfully");
        let first = first.data.unwrap();
        assert_eq!(first.data.len(), 10);
        assert_eq!(first.total_pages, 2);
        assert!(first.has_more);

        let second = client.list(2, 10).await.data.unwrap();
        assert_eq!(second.data.len(), 5);
        assert_eq!(second.data[0].name, "item-10");
        assert!(!second.has_more);

        let beyond = client.list(7, 10).await;
        assert!(beyond.success);
        assert!(beyond.data.unwrap().data.is_empty());
    }

    #[tokio::test]
    async fn test_create_then_get_by_id_round_trips() {
        let client = start(StoreConfig::instant(), Vec::new());

        let created = client.create(draft("Brio", Category::Webcam).with_spec("resolution", "4K")).await;
        assert!(created.success);
        let created = created.data.unwrap();
        assert_eq!(created.created_at, created.updated_at);

        let fetched = client.get_by_id(created.id.clone()).await;
        assert!(fetched.success);
        assert_eq!(fetched.message(), "Product found");
        assert_eq!(fetched.data, Some(created));
    }

    #[tokio::test]
    async fn test_update_merges_and_refreshes_timestamp() {
        let client = start(StoreConfig::instant(), Vec::new());
        let original = client.create(draft("Zowie", Category::Monitor)).await.data.unwrap();

        let updated = client.update(original.id.clone(), ProductPatch::stock(5)).await;
        assert!(updated.success);
        assert_eq!(updated.message(), "Product updated successfully");
        let updated = updated.data.unwrap();

        assert_eq!(updated.stock, 5);
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.name, original.name);
        assert_eq!(updated.brand, original.brand);
        assert_eq!(updated.category, original.category);
        assert_eq!(updated.price, original.price);
        assert_eq!(updated.description, original.description);
        assert_eq!(updated.image, original.image);
        assert_eq!(updated.specifications, original.specifications);
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.updated_at > original.updated_at);
    }

    #[tokio::test]
    async fn test_update_moves_timestamp_forward_on_a_frozen_clock() {
        let frozen = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let (actor, inner) = ResourceActor::<Product>::new(8, || "frozen".to_string());
        tokio::spawn(actor.with_clock(move || frozen).run());
        let client = ProductClient::new(inner);

        let created = client.create(draft("Frozen", Category::Speaker)).await.data.unwrap();
        assert_eq!(created.updated_at, frozen);

        let first = client.update(created.id.clone(), ProductPatch::stock(5)).await.data.unwrap();
        assert!(first.updated_at > created.updated_at);
        assert_eq!(first.created_at, frozen);

        let second = client.update(created.id.clone(), ProductPatch::stock(6)).await.data.unwrap();
        assert!(second.updated_at > first.updated_at);
    }

    #[tokio::test]
    async fn test_missing_ids_fail_with_not_found() {
        let client = start(StoreConfig::instant(), numbered(2));

        let get = client.get_by_id("nope").await;
        assert!(!get.success);
        assert!(get.data.is_none());
        assert!(get.message().contains("not found"));

        let update = client.update("nope", ProductPatch::stock(1)).await;
        assert!(!update.success);
        assert!(update.data.is_none());

        let delete = client.delete("nope").await;
        assert!(!delete.success);
        assert_eq!(delete.data, Some(false));
        assert_eq!(client.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_delete_is_terminal() {
        let client = start(StoreConfig::instant(), Vec::new());
        let product = client.create(draft("HD 560S", Category::Headset)).await.data.unwrap();

        let deleted = client.delete(product.id.clone()).await;
        assert!(deleted.success);
        assert_eq!(deleted.data, Some(true));

        assert!(!client.get_by_id(product.id.clone()).await.success);
        let again = client.delete(product.id.clone()).await;
        assert!(!again.success);
        assert_eq!(again.data, Some(false));
    }

    #[tokio::test]
    async fn test_category_filter_returns_exact_subset_in_order() {
        let client = start(
            StoreConfig::instant(),
            vec![
                draft("a", Category::Mouse),
                draft("b", Category::Keyboard),
                draft("c", Category::Mouse),
                draft("d", Category::Speaker),
                draft("e", Category::Mouse),
            ],
        );

        let mice = client.list_by_category(Category::Mouse).await;
        assert!(mice.success);
        assert_eq!(mice.message(), "Found 3 products in category mouse");
        let names: Vec<String> = mice.data.unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["a", "c", "e"]);

        let webcams = client.list_by_category(Category::Webcam).await;
        assert!(webcams.success);
        assert_eq!(webcams.data, Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let client = start(
            StoreConfig::instant(),
            vec![
                ProductDraft::new("MX Keys", "Logitech", Category::Keyboard, 99.0, 4)
                    .with_description("Low-profile keyboard"),
                ProductDraft::new("Pebble", "LOGITECH", Category::Mouse, 29.0, 9)
                    .with_description("Quiet mouse"),
                ProductDraft::new("Studio", "Razer", Category::Speaker, 199.0, 2)
                    .with_description("Desk speakers"),
            ],
        );

        let found = client.search("logi").await;
        assert_eq!(found.message(), "Found 2 products matching \"logi\"");
        assert_eq!(found.data.unwrap().len(), 2);

        let by_description = client.search("QUIET").await.data.unwrap();
        assert_eq!(by_description.len(), 1);
        assert_eq!(by_description[0].name, "Pebble");
    }

    #[tokio::test]
    async fn test_fault_mode_fails_envelopes() {
        let client = start(StoreConfig::instant(), numbered(1));

        let set = client.set_fault_mode(FaultMode::Always).await;
        assert_eq!(set.data, Some(FaultMode::Always));

        let listed = client.list(1, 10).await;
        assert!(!listed.success);
        assert!(listed.message().contains("unavailable"));

        let deleted = client.delete("1").await;
        assert_eq!(deleted.data, Some(false));

        client.set_fault_mode(FaultMode::Off).await;
        assert!(client.get_by_id("1").await.success);
    }
}
