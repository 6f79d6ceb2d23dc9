use serde::{Deserialize, Serialize};

/// Uniform result wrapper returned by every store operation.
///
/// Callers must check `success` before trusting `data`. On failure only the
/// message is meaningful.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }

    /// A failure that still carries a payload, e.g. `false` for a delete.
    pub fn failed_with(data: T, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: Some(data),
        }
    }

    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }

    /// The payload of a successful envelope, or its message otherwise.
    pub fn into_result(self) -> Result<T, String> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (_, _) => Err(self.message.unwrap_or_else(|| "Unknown failure".to_string())),
        }
    }
}

/// One page of a listing plus the metadata needed to page through the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: usize,
    pub page: u32,
    pub limit: u32,
    pub total_pages: usize,
    pub has_more: bool,
}

impl<T: Clone> Page<T> {
    /// Cuts the 1-based `page` of size `limit` out of `items`.
    ///
    /// Out-of-range pages produce an empty slice rather than an error. A
    /// `limit` of zero produces an empty page with no page count.
    pub fn slice(items: &[T], page: u32, limit: u32) -> Self {
        let total = items.len();
        let size = limit as usize;
        let total_pages = if size == 0 { 0 } else { total.div_ceil(size) };

        let data = match (page as usize).checked_sub(1) {
            Some(index) if size > 0 => {
                let start = index.saturating_mul(size).min(total);
                let end = start.saturating_add(size).min(total);
                items[start..end].to_vec()
            }
            _ => Vec::new(),
        };

        Self {
            data,
            total,
            page,
            limit,
            total_pages,
            has_more: (page as usize) < total_pages,
        }
    }
}
