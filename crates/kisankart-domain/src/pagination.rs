//! Pagination types.

use serde::{Deserialize, Serialize};

/// Pagination parameters shared across all list endpoints.
///
/// - `per_page`: 1–100, default 25
/// - `page`: ≥ 1, default 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default = "default_per_page", rename = "per-page")]
    pub per_page: u32,
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_per_page() -> u32 {
    25
}

fn default_page() -> u32 {
    1
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            page: default_page(),
        }
    }
}

impl PageRequest {
    /// Clamp `per_page` to the valid range 1–100 and `page` to ≥ 1.
    ///
    /// Call after deserializing from query params to enforce bounds.
    pub fn clamped(self) -> Self {
        Self {
            per_page: self.per_page.clamp(1, 100),
            page: self.page.max(1),
        }
    }

    /// Number of records to skip for this page (clamps first).
    ///
    /// Computed in u64: `page` is caller-supplied and only bounded below, so
    /// u32 arithmetic could overflow.
    pub fn offset(self) -> u64 {
        let p = self.clamped();
        u64::from(p.page - 1) * u64::from(p.per_page)
    }

    /// Select this page from an in-memory result set.
    pub fn slice<T: Clone>(self, items: &[T]) -> Vec<T> {
        let p = self.clamped();
        let skip = usize::try_from(p.offset()).unwrap_or(usize::MAX);
        items
            .iter()
            .skip(skip)
            .take(p.per_page as usize)
            .cloned()
            .collect()
    }
}
