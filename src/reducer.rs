//! Client-side product snapshot and the actions that move it forward.
//!
//! The reducer only reacts to results the store has already confirmed. It
//! never talks to the store itself and never fails: an action that matches
//! nothing leaves the snapshot as it was.

use chrono::{DateTime, Utc};

use crate::domain::{Product, ProductPatch};

/// The four ways a snapshot can change.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductAction {
    /// Replace the whole snapshot, keeping the given order.
    ReplaceAll(Vec<Product>),
    /// Append one record. No de-duplication.
    Add(Product),
    /// Merge fields over the record with this id.
    Patch { id: String, patch: ProductPatch },
    /// Drop the record with this id.
    Remove { id: String },
}

impl ProductAction {
    /// A patch carrying every editable field of a store-confirmed record.
    pub fn patch_from(product: &Product) -> Self {
        ProductAction::Patch {
            id: product.id.clone(),
            patch: ProductPatch::from_product(product),
        }
    }

    pub fn remove(id: impl Into<String>) -> Self {
        ProductAction::Remove { id: id.into() }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ProductAction::ReplaceAll(_) => "replace_all",
            ProductAction::Add(_) => "add",
            ProductAction::Patch { .. } => "patch",
            ProductAction::Remove { .. } => "remove",
        }
    }
}

/// Apply `action` to `products`, stamping patched records with the current time.
pub fn reduce(products: &[Product], action: ProductAction) -> Vec<Product> {
    reduce_at(products, action, Utc::now())
}

/// Deterministic form of [`reduce`]: same input, same output.
pub fn reduce_at(products: &[Product], action: ProductAction, now: DateTime<Utc>) -> Vec<Product> {
    match action {
        ProductAction::ReplaceAll(list) => list,
        ProductAction::Add(product) => {
            let mut next = Vec::with_capacity(products.len() + 1);
            next.extend_from_slice(products);
            next.push(product);
            next
        }
        ProductAction::Patch { id, patch } => products
            .iter()
            .map(|product| {
                if product.id == id {
                    let mut patched = product.clone();
                    patched.apply_patch(patch.clone(), now);
                    patched
                } else {
                    product.clone()
                }
            })
            .collect(),
        ProductAction::Remove { id } => products
            .iter()
            .filter(|product| product.id != id)
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, ProductDraft};
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn product(id: &str) -> Product {
        let draft = ProductDraft::new(format!("name-{id}"), "Acme", Category::Speaker, 20.0, 2);
        Product::from_draft(id, draft, at(100))
    }

    #[test]
    fn test_replace_all_takes_list_verbatim() {
        let state = vec![product("1")];
        let replacement = vec![product("3"), product("2")];
        assert_eq!(
            reduce(&state, ProductAction::ReplaceAll(replacement.clone())),
            replacement
        );
    }

    #[test]
    fn test_add_appends_without_dedup() {
        let (p1, p2, p3) = (product("1"), product("2"), product("3"));
        let state = vec![p1.clone(), p2.clone()];

        let next = reduce(&state, ProductAction::Add(p3.clone()));
        assert_eq!(next, vec![p1.clone(), p2.clone(), p3]);

        let doubled = reduce(&next, ProductAction::Add(p1.clone()));
        assert_eq!(doubled.len(), 4);
        assert_eq!(state, vec![p1, p2]);
    }

    #[test]
    fn test_patch_touches_only_the_matching_record() {
        let state = vec![product("1"), product("2")];
        let action = ProductAction::Patch {
            id: "2".to_string(),
            patch: ProductPatch::stock(9),
        };

        let next = reduce_at(&state, action, at(200));
        assert_eq!(next[0], state[0]);
        assert_eq!(next[1].stock, 9);
        assert_eq!(next[1].name, "name-2");
        assert_eq!(next[1].created_at, at(100));
        assert_eq!(next[1].updated_at, at(200));
    }

    #[test]
    fn test_patch_from_confirmed_record() {
        let state = vec![product("1")];
        let mut confirmed = product("1");
        confirmed.price = 15.5;
        confirmed.description = "on sale".to_string();

        let next = reduce_at(&state, ProductAction::patch_from(&confirmed), at(300));
        assert_eq!(next[0].price, 15.5);
        assert_eq!(next[0].description, "on sale");
        assert_eq!(next[0].updated_at, at(300));
    }

    #[test]
    fn test_unmatched_actions_leave_state_unchanged() {
        let state = vec![product("1"), product("2")];

        assert_eq!(reduce(&state, ProductAction::remove("nonexistent")), state);

        let patch = ProductAction::Patch {
            id: "nonexistent".to_string(),
            patch: ProductPatch::stock(0),
        };
        assert_eq!(reduce(&state, patch), state);
    }

    #[test]
    fn test_remove_keeps_relative_order() {
        let state = vec![product("1"), product("2"), product("3")];
        let next = reduce(&state, ProductAction::remove("2"));
        let ids: Vec<&str> = next.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_reduce_at_is_deterministic() {
        let state = vec![product("1"), product("2")];
        let action = ProductAction::Patch {
            id: "1".to_string(),
            patch: ProductPatch::price(1.0),
        };
        assert_eq!(
            reduce_at(&state, action.clone(), at(500)),
            reduce_at(&state, action, at(500))
        );
    }
}
