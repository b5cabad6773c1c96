//! Deterministic dish catalog behind the mock server and the offline source

use super::{dish::DishRecord, page::ListResponse};

pub const DEFAULT_TOTAL_PAGES: u32 = 5;

/// Generates pages of synthetic dishes.
///
/// Page `n` of size `s` holds ids `(n - 1) * s + 1 ..= n * s`. The catalog
/// ends after `total_pages`; any page past that is empty and flagged as the
/// end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockCatalog {
    total_pages: u32,
}

impl MockCatalog {
    pub fn new(total_pages: u32) -> Self {
        Self { total_pages }
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn is_past_end(&self, page: u32) -> bool {
        page > self.total_pages
    }

    pub fn page(&self, page: u32, page_size: u32) -> ListResponse<DishRecord> {
        if self.is_past_end(page) {
            return ListResponse {
                data: Vec::new(),
                page,
                is_end: true,
            };
        }

        ListResponse {
            data: generate_records(page, page_size),
            page,
            is_end: page == self.total_pages,
        }
    }
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_TOTAL_PAGES)
    }
}

fn generate_records(page: u32, page_size: u32) -> Vec<DishRecord> {
    let start_id = u64::from(page.saturating_sub(1)) * u64::from(page_size) + 1;
    (0..page_size)
        .map(|i| {
            let id = start_id + u64::from(i);
            DishRecord {
                id,
                title: format!("列表项 #{id}"),
                content: format!("这是第 {page} 页的第 {} 个数据。", i + 1),
            }
        })
        .collect()
}
