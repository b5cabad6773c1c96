//! Data source backed by the list endpoint of an HTTP server

use std::time::Duration;

use async_trait::async_trait;
use color_eyre::eyre::Result;

use crate::domain::{
    dish::{Dish, DishRecord},
    page::{ListResponse, PageResult},
    source::{DataSource, TransportError},
};

pub const LIST_PATH: &str = "/api/list/data";

/// Fetches dish pages with `GET {base_url}/api/list/data?page=&pageSize=`
#[derive(Debug, Clone)]
pub struct HttpDataSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDataSource {
    /// Create a source whose requests give up after `timeout`
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn page_url(&self) -> String {
        format!("{}{LIST_PATH}", self.base_url)
    }

    /// Fetch one raw page without converting the records
    pub async fn fetch_records(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<ListResponse<DishRecord>, TransportError> {
        let response = self
            .client
            .get(self.page_url())
            .query(&[("page", page), ("pageSize", page_size)])
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        response
            .json::<ListResponse<DishRecord>>()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }
}

#[async_trait]
impl DataSource for HttpDataSource {
    type Item = Dish;

    async fn fetch_page(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<PageResult<Dish>, TransportError> {
        let response = self.fetch_records(page, page_size).await?;
        let items = response
            .data
            .into_iter()
            .enumerate()
            .map(|(index, record)| Dish::from_record(record, index))
            .collect();
        Ok(PageResult::new(items, response.is_end))
    }
}
