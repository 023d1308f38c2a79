use serde::{Deserialize, Serialize};

/// Default page size used by list endpoints.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 25;

/// Page selection applied to repository list queries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pagination {
    /// 1-based page number.
    pub page: usize,
    /// Number of items per page.
    pub per_page: usize,
}
