use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::clients::ProductClient;
use crate::domain::{Envelope, Page, Product, ProductDraft, ProductPatch};
use crate::reducer::{reduce, ProductAction};

/// Cancellation token tied to the lifetime of the view that owns a [`ViewStore`].
///
/// Clones share the same flag. Once closed it stays closed.
#[derive(Debug, Clone, Default)]
pub struct ViewScope {
    closed: Arc<AtomicBool>,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub fn is_active(&self) -> bool {
        !self.closed.load(Ordering::SeqCst)
    }
}

/// Bridge between the product client and the reducer.
///
/// Each operation awaits the store, checks the envelope and, on success,
/// dispatches the matching action, so the snapshot only ever reflects
/// confirmed results. The envelope is handed back to the caller unchanged for
/// it to surface failure messages.
#[derive(Debug)]
pub struct ViewStore {
    client: ProductClient,
    products: Vec<Product>,
    scope: ViewScope,
}

impl ViewStore {
    pub fn new(client: ProductClient) -> Self {
        Self {
            client,
            products: Vec::new(),
            scope: ViewScope::new(),
        }
    }

    /// The current snapshot.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// A handle the owning view can close when it goes away.
    pub fn scope(&self) -> ViewScope {
        self.scope.clone()
    }

    /// Apply an action to the snapshot, unless the view has been closed.
    /// Returns whether the action was applied.
    pub fn dispatch(&mut self, action: ProductAction) -> bool {
        if !self.scope.is_active() {
            debug!(action = action.kind(), "View closed, dropping action");
            return false;
        }
        debug!(action = action.kind(), "Dispatching action");
        self.products = reduce(&self.products, action);
        true
    }

    #[instrument(skip(self))]
    pub async fn load_page(&mut self, page: u32, page_size: u32) -> Envelope<Page<Product>> {
        let response = self.client.list(page, page_size).await;
        match (&response.data, response.success) {
            (Some(page), true) => {
                info!(count = page.data.len(), total = page.total, "Page loaded");
                self.dispatch(ProductAction::ReplaceAll(page.data.clone()));
            }
            _ => warn!(message = response.message(), "Failed to fetch products"),
        }
        response
    }

    /// Fetch one product for a detail view. The snapshot is left alone.
    #[instrument(skip(self))]
    pub async fn open(&self, id: &str) -> Envelope<Product> {
        let response = self.client.get_by_id(id).await;
        if !response.success {
            warn!(message = response.message(), "Failed to open product");
        }
        response
    }

    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create(&mut self, draft: ProductDraft) -> Envelope<Product> {
        if let Err(e) = draft.validate() {
            warn!(error = %e, "Rejected draft");
            return Envelope::failed(e.to_string());
        }
        let response = self.client.create(draft).await;
        match (&response.data, response.success) {
            (Some(product), true) => {
                info!(product_id = %product.id, "Product created");
                self.dispatch(ProductAction::Add(product.clone()));
            }
            _ => warn!(message = response.message(), "Failed to create product"),
        }
        response
    }

    /// Save a full form edit for `id`.
    #[instrument(skip(self, draft))]
    pub async fn update(&mut self, id: &str, draft: ProductDraft) -> Envelope<Product> {
        if let Err(e) = draft.validate() {
            warn!(error = %e, "Rejected draft");
            return Envelope::failed(e.to_string());
        }
        self.patch(id, ProductPatch::from_draft(draft)).await
    }

    /// Send a partial update for `id` without form validation.
    #[instrument(skip(self, patch))]
    pub async fn patch(&mut self, id: &str, patch: ProductPatch) -> Envelope<Product> {
        let response = self.client.update(id, patch).await;
        match (&response.data, response.success) {
            (Some(product), true) => {
                info!(product_id = %product.id, "Product updated");
                self.dispatch(ProductAction::patch_from(product));
            }
            _ => warn!(message = response.message(), "Failed to update product"),
        }
        response
    }

    #[instrument(skip(self))]
    pub async fn delete(&mut self, id: &str) -> Envelope<bool> {
        let response = self.client.delete(id).await;
        if response.success {
            info!("Product deleted");
            self.dispatch(ProductAction::remove(id));
        } else {
            warn!(message = response.message(), "Failed to delete product");
        }
        response
    }
}
