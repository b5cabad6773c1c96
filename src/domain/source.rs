//! Data source contract of the paged list

use async_trait::async_trait;
use thiserror::Error;

use super::{dish::ListItem, page::PageResult};

/// Everything that can go wrong while fetching a page.
///
/// The controller treats every variant the same way; the distinction only
/// shows up in logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Decode(String),
}

/// A provider of numbered pages.
///
/// Pages are 1-based. Fetching the same page twice must be harmless: results
/// of a superseded generation are simply dropped by the controller.
#[async_trait]
pub trait DataSource: Send + Sync + 'static {
    type Item: ListItem;

    async fn fetch_page(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<PageResult<Self::Item>, TransportError>;
}
