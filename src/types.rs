//! Shared wire types

use serde::{Deserialize, Serialize};

/// Envelope returned by every list endpoint.
///
/// There is no total count or cursor: a page shorter than the requested
/// `limit` is the only sign that the list is exhausted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn into_inner(self) -> Vec<T> {
        self.data
    }
}

/// A `limit`/`offset` window over a list endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: u32,
    pub offset: u32,
}

impl PageRequest {
    pub fn first(limit: u32) -> Self {
        Self { limit, offset: 0 }
    }

    /// Whether a page of `returned` items means more may follow
    pub fn has_more(&self, returned: usize) -> bool {
        returned as u64 == u64::from(self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_page_ends_the_list() {
        let page = PageRequest::first(30);
        assert!(page.has_more(30));
        assert!(!page.has_more(12));
        assert!(!page.has_more(0));
    }
}
