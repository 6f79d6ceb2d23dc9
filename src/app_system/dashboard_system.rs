use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, instrument};

use super::StoreConfig;
use crate::actor_framework::ResourceActor;
use crate::clients::ProductClient;
use crate::domain::Product;
use crate::seed;
use crate::view_store::ViewStore;

/// Starts the product store and hands out clients for it.
#[derive(Debug)]
pub struct DashboardSystem {
    pub product_client: ProductClient,
    handle: tokio::task::JoinHandle<()>,
}

impl DashboardSystem {
    /// Spawn the store actor. Must be called inside a tokio runtime.
    #[instrument(name = "dashboard_system", skip(config))]
    pub fn start(config: &StoreConfig) -> Self {
        info!(
            latency_ms = config.latency.as_millis(),
            fault_mode = %config.fault_mode,
            seed = config.seed,
            "Starting dashboard system"
        );

        // Ids are time-seeded and strictly increasing; the actor still
        // rejects any candidate that is already taken.
        let seed_millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        let id_counter = Arc::new(AtomicU64::new(seed_millis));
        let next_product_id = move || id_counter.fetch_add(1, Ordering::SeqCst).to_string();

        let (actor, resource_client) = ResourceActor::<Product>::new(config.buffer_size, next_product_id);
        let actor = actor
            .with_latency(config.latency)
            .with_fault_mode(config.fault_mode);
        let actor = if config.seed {
            actor.seed(seed::catalog())
        } else {
            actor
        };
        let handle = tokio::spawn(actor.run());

        info!("Dashboard system started");
        Self {
            product_client: ProductClient::new(resource_client),
            handle,
        }
    }

    /// A fresh view bound to this system's store.
    pub fn view(&self) -> ViewStore {
        ViewStore::new(self.product_client.clone())
    }

    /// Stop the store and wait for it to finish.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down dashboard system");
        if let Err(e) = self.product_client.shutdown().await {
            error!(error = %e, "Store already stopped");
        }
        if let Err(e) = self.handle.await {
            error!(error = ?e, "Store task failed");
            return Err(format!("Store task failed: {e:?}"));
        }
        info!("Dashboard system shutdown complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_system_lists_catalog() {
        let system = DashboardSystem::start(&StoreConfig::instant().with_seed(true));

        let page = system.product_client.list(1, 100).await.data.unwrap();
        assert_eq!(page.total, seed::catalog().len());
        assert!(!page.has_more);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_shutdown_with_live_views() {
        let system = DashboardSystem::start(&StoreConfig::instant());
        let mut view = system.view();
        let client = system.product_client.clone();

        system.shutdown().await.unwrap();

        let response = view.load_page(1, 10).await;
        assert!(!response.success);
        assert!(response.message().contains("Actor"));
        assert!(!client.delete("1").await.success);
    }
}
