use chrono::{DateTime, Utc};

use super::ProductQuery;
use crate::actor_framework::Entity;
use crate::domain::{Product, ProductDraft, ProductPatch};

impl Entity for Product {
    type Draft = ProductDraft;
    type Patch = ProductPatch;
    type Query = ProductQuery;

    fn id(&self) -> &str {
        &self.id
    }

    /// Creates a new Product from a draft. `created_at` and `updated_at` are both `now`.
    fn from_draft(id: String, draft: ProductDraft, now: DateTime<Utc>) -> Self {
        Product::from_draft(id, draft, now)
    }

    /// Shallow-merges the patch. The id and creation time are never touched.
    fn on_update(&mut self, patch: ProductPatch, now: DateTime<Utc>) {
        self.apply_patch(patch, now);
    }

    fn matches(&self, query: &ProductQuery) -> bool {
        match query {
            ProductQuery::Category(category) => self.category == *category,
            ProductQuery::Text(needle) => self.contains_lowercase(needle),
        }
    }
}
