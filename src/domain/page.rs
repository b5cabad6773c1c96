//! Paging protocol types
//!
//! [`ListResponse`] is the JSON body of `GET /api/list/data`, [`PageResult`]
//! is what a data source hands back to the controller once decoded.

use serde::{Deserialize, Serialize};

/// One page of items as seen by the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub is_end: bool,
}

impl<T> PageResult<T> {
    pub fn new(items: Vec<T>, is_end: bool) -> Self {
        Self { items, is_end }
    }

    /// A page that carries nothing but the end marker
    pub fn end() -> Self {
        Self {
            items: Vec::new(),
            is_end: true,
        }
    }
}

/// Wire format of the list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub page: u32,
    pub is_end: bool,
}

/// Query string of the list endpoint.
///
/// Both parameters are kept as raw strings: anything that does not parse to
/// a positive integer falls back to the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
}

pub const DEFAULT_PAGE: u32 = 1;

impl ListQuery {
    pub fn page(&self) -> u32 {
        parse_positive(self.page.as_deref()).unwrap_or(DEFAULT_PAGE)
    }

    pub fn page_size(&self, default: u32) -> u32 {
        parse_positive(self.page_size.as_deref()).unwrap_or(default)
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|n| *n > 0)
}
