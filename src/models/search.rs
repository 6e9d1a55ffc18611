//! Search results
//!
//! Holds the hits for one query in server order and hands out page-sized
//! windows over them. Paging never modifies the underlying results.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::types::SearchHit;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("Invalid search data: {0}")]
    InvalidSearchData(String),
}

/// Position of a page within the results, for previous/next controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub page: usize,
    pub total_pages: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResultSet {
    query: String,
    items: Vec<SearchHit>,
}

impl SearchResultSet {
    pub fn new(query: impl Into<String>, items: Vec<SearchHit>) -> Self {
        Self {
            query: query.into(),
            items,
        }
    }

    /// Build from a raw search payload: either an array of hits or an object
    /// with a `recipes` array
    pub fn from_payload(query: impl Into<String>, payload: &Value) -> Result<Self, SearchError> {
        let hits = match payload {
            Value::Array(hits) => hits,
            Value::Object(obj) => obj
                .get("recipes")
                .and_then(Value::as_array)
                .ok_or_else(|| SearchError::InvalidSearchData("missing 'recipes' array".to_string()))?,
            _ => {
                return Err(SearchError::InvalidSearchData(
                    "payload is neither an array nor an object".to_string(),
                ))
            }
        };

        let items = hits
            .iter()
            .enumerate()
            .map(|(index, hit)| {
                serde_json::from_value::<SearchHit>(hit.clone()).map_err(|e| {
                    SearchError::InvalidSearchData(format!("result {}: {}", index, e))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let query = query.into();
        tracing::debug!("Search '{}' returned {} results", query, items.len());
        Ok(Self::new(query, items))
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn items(&self) -> &[SearchHit] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Hits on a 1-indexed page
    ///
    /// Page 0, a zero page size, or a page past the end all give an empty slice.
    pub fn page(&self, page_number: usize, page_size: usize) -> &[SearchHit] {
        if page_number == 0 || page_size == 0 {
            return &[];
        }
        let start = match (page_number - 1).checked_mul(page_size) {
            Some(start) if start < self.items.len() => start,
            _ => return &[],
        };
        let end = start.saturating_add(page_size).min(self.items.len());
        &self.items[start..end]
    }

    pub fn page_count(&self, page_size: usize) -> usize {
        if page_size == 0 {
            return 0;
        }
        self.items.len().div_ceil(page_size)
    }

    pub fn page_info(&self, page_number: usize, page_size: usize) -> PageInfo {
        let total_pages = self.page_count(page_size);
        PageInfo {
            page: page_number,
            total_pages,
            has_prev: page_number > 1 && page_number <= total_pages,
            has_next: page_number >= 1 && page_number < total_pages,
        }
    }
}
