use crate::domain::Category;

/// Filters the product store can answer in a single pass over its collection.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductQuery {
    /// Exact category match.
    Category(Category),
    /// Case-insensitive substring of name, brand or description. Holds the
    /// lowercased needle; build it with [`ProductQuery::text`].
    Text(String),
}

impl ProductQuery {
    pub fn text(query: &str) -> Self {
        ProductQuery::Text(query.to_lowercase())
    }
}
