//! In-process data source over the mock catalog

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{
    catalog::MockCatalog,
    dish::Dish,
    page::PageResult,
    source::{DataSource, TransportError},
};

/// Serves the same pages as the mock server without any networking
#[derive(Debug, Clone, Default)]
pub struct MockDataSource {
    catalog: MockCatalog,
    delay: Option<Duration>,
}

impl MockDataSource {
    pub fn new(catalog: MockCatalog) -> Self {
        Self {
            catalog,
            delay: None,
        }
    }

    /// Wait `delay` before answering pages inside the catalog
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl DataSource for MockDataSource {
    type Item = Dish;

    async fn fetch_page(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<PageResult<Dish>, TransportError> {
        if let Some(delay) = self.delay {
            if !self.catalog.is_past_end(page) {
                tokio::time::sleep(delay).await;
            }
        }

        let response = self.catalog.page(page, page_size);
        let items = response
            .data
            .into_iter()
            .enumerate()
            .map(|(index, record)| Dish::from_record(record, index))
            .collect();
        Ok(PageResult::new(items, response.is_end))
    }
}
