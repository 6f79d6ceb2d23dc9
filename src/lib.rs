//! # Product Dashboard Core
//!
//! State and persistence for a single-page inventory dashboard.
//!
//! - **Store** - a resource actor owning the canonical product list, reached
//!   through [`ProductClient`], which answers every call with an [`Envelope`]
//! - **Reducer** - [`reduce`] moves the UI snapshot forward on confirmed results
//! - **View bridge** - [`ViewStore`] calls the store, checks the envelope and
//!   dispatches, and stops dispatching once its [`ViewScope`] is closed
//! - **System** - [`DashboardSystem`] wires configuration, seed data and
//!   shutdown together
//!
//! ```no_run
//! # async fn demo() -> Result<(), String> {
//! use product_dashboard::{DashboardSystem, StoreConfig};
//!
//! let system = DashboardSystem::start(&StoreConfig::default());
//! let mut view = system.view();
//! let page = view.load_page(1, 10).await.into_result()?;
//! assert_eq!(page.data.len(), view.products().len());
//! system.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod actor_framework;
pub mod app_system;
pub mod clients;
pub mod domain;
pub mod error;
pub mod product_actor;
pub mod reducer;
pub mod seed;
pub mod view_store;

#[cfg(test)]
mod mock_framework;

pub use actor_framework::FaultMode;
pub use app_system::{setup_tracing, DashboardSystem, StoreConfig};
pub use clients::ProductClient;
pub use domain::{Category, Envelope, Page, Product, ProductDraft, ProductPatch};
pub use reducer::{reduce, reduce_at, ProductAction};
pub use view_store::{ViewScope, ViewStore};
