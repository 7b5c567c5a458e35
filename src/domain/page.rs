//! Paginated list envelope.
//!
//! Every list endpoint (entities and the audit log) answers with the same shape:
//!
//! ```json
//! { "data": [...], "pageNumber": 0, "pageSize": 10, "totalElements": 42, "totalPages": 5 }
//! ```
//!
//! Only `data` and `totalElements` are consumed. Both default when absent so a
//! sparse body parses as an empty page rather than failing the screen.

use serde::{Deserialize, Serialize};

/// Page sizes offered by the entity list screens.
pub const PAGE_SIZE_CHOICES: [u32; 3] = [10, 25, 50];

/// One page of records plus the server-reported total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub page_number: Option<u32>,
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: Option<u32>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            page_number: None,
            page_size: None,
            total_elements: 0,
            total_pages: None,
        }
    }
}

impl<T> Page<T> {
    /// Builds a page from rows and a total, as a server would.
    #[must_use]
    pub fn new(data: Vec<T>, total_elements: u64) -> Self {
        Self {
            data,
            total_elements,
            ..Self::default()
        }
    }
}

/// Number of pages needed to show `total` rows at `size` rows per page.
///
/// A zero page size yields zero pages.
#[must_use]
pub const fn page_count(total: u64, size: u32) -> u64 {
    if size == 0 {
        return 0;
    }
    total.div_ceil(size as u64)
}
