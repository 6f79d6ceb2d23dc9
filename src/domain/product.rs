use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The closed set of product categories the dashboard knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Keyboard,
    Mouse,
    Monitor,
    Headset,
    Webcam,
    Speaker,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Keyboard,
        Category::Mouse,
        Category::Monitor,
        Category::Headset,
        Category::Webcam,
        Category::Speaker,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Keyboard => "keyboard",
            Category::Mouse => "mouse",
            Category::Monitor => "monitor",
            Category::Headset => "headset",
            Category::Webcam => "webcam",
            Category::Speaker => "speaker",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Represents a product record held by the store.
///
/// `id` and `created_at` are stamped once by the store when the record is
/// created. `updated_at` moves forward on every successful mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub category: Category,
    pub price: f64,
    pub stock: u32,
    pub description: String,
    pub image: String,
    pub specifications: HashMap<String, String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Builds a stored record from a draft. Both timestamps are set to `now`.
    pub fn from_draft(id: impl Into<String>, draft: ProductDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: draft.name,
            brand: draft.brand,
            category: draft.category,
            price: draft.price,
            stock: draft.stock,
            description: draft.description,
            image: draft.image,
            specifications: draft.specifications,
            created_at: now,
            updated_at: now,
        }
    }

    /// Shallow-merges `patch` over this record and moves `updated_at` to `now`.
    ///
    /// `updated_at` always ends up strictly later than before, even when the
    /// clock stalls or goes backwards.
    pub fn apply_patch(&mut self, patch: ProductPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(brand) = patch.brand {
            self.brand = brand;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
        if let Some(specifications) = patch.specifications {
            self.specifications = specifications;
        }
        self.touch(now);
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::nanoseconds(1)
        };
    }

    /// Case-insensitive substring match over name, brand and description.
    pub fn matches_text(&self, query: &str) -> bool {
        self.contains_lowercase(&query.to_lowercase())
    }

    /// Like [`Product::matches_text`], for a needle that is already lowercase.
    pub fn contains_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.brand.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

/// Payload for creating a new product: every field except the id and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub brand: String,
    pub category: Category,
    pub price: f64,
    pub stock: u32,
    pub description: String,
    pub image: String,
    #[serde(default)]
    pub specifications: HashMap<String, String>,
}

impl ProductDraft {
    pub fn new(
        name: impl Into<String>,
        brand: impl Into<String>,
        category: Category,
        price: f64,
        stock: u32,
    ) -> Self {
        Self {
            name: name.into(),
            brand: brand.into(),
            category,
            price,
            stock,
            description: String::new(),
            image: String::new(),
            specifications: HashMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_spec(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.specifications.insert(key.into(), value.into());
        self
    }

    /// Checks the fields a product form requires before anything is sent to the store.
    ///
    /// The store itself accepts any draft; this is for callers that want to
    /// reject incomplete input up front.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("name", &self.name),
            ("brand", &self.brand),
            ("image", &self.image),
            ("description", &self.description),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ValidationError::MissingField(*field));
        }
        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(ValidationError::NotPositive("price"));
        }
        if self.stock == 0 {
            return Err(ValidationError::NotPositive("stock"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Field must be positive: {0}")]
    NotPositive(&'static str),
}

/// Partial update for a product. Absent fields keep their current value.
///
/// There is no way to express a new `id` or `createdAt`; both are dropped
/// when present in deserialized input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifications: Option<HashMap<String, String>>,
}

impl ProductPatch {
    pub fn stock(stock: u32) -> Self {
        Self {
            stock: Some(stock),
            ..Self::default()
        }
    }

    pub fn price(price: f64) -> Self {
        Self {
            price: Some(price),
            ..Self::default()
        }
    }

    /// Every editable field of `product`, as a patch.
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: Some(product.name.clone()),
            brand: Some(product.brand.clone()),
            category: Some(product.category),
            price: Some(product.price),
            stock: Some(product.stock),
            description: Some(product.description.clone()),
            image: Some(product.image.clone()),
            specifications: Some(product.specifications.clone()),
        }
    }

    /// Form edits arrive as a full draft; the update keeps every field from it.
    pub fn from_draft(draft: ProductDraft) -> Self {
        Self {
            name: Some(draft.name),
            brand: Some(draft.brand),
            category: Some(draft.category),
            price: Some(draft.price),
            stock: Some(draft.stock),
            description: Some(draft.description),
            image: Some(draft.image),
            specifications: Some(draft.specifications),
        }
    }
}
