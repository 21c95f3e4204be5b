//! Paged list envelope returned by listing endpoints.

use serde::{Deserialize, Serialize};

/// One page of a server-side paginated list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub size: u32,
    /// Zero-based page index
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub number_of_elements: u32,
    #[serde(default)]
    pub first: bool,
    #[serde(default)]
    pub last: bool,
    #[serde(default)]
    pub empty: bool,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        !self.last && self.number + 1 < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_ignores_pageable_block() {
        let page: Page<u32> = serde_json::from_value(json!({
            "content": [1, 2],
            "pageable": { "pageNumber": 0, "pageSize": 2, "offset": 0 },
            "totalPages": 3,
            "totalElements": 5,
            "size": 2,
            "number": 0,
            "first": true,
            "last": false,
            "numberOfElements": 2,
            "empty": false
        }))
        .unwrap();

        assert_eq!(page.content, vec![1, 2]);
        assert!(page.has_next());
    }

    #[test]
    fn test_page_metadata_defaults() {
        let page: Page<u32> = serde_json::from_value(json!({ "content": [] })).unwrap();
        assert_eq!(page.total_elements, 0);
        assert!(!page.has_next());
    }
}
