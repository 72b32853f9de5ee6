use crate::error::{BookingError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

/// Raw `page` / `page_size` query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based.
    pub page: u64,
    pub page_size: u64,
}

impl PageRequest {
    /// Unparseable or non-positive `page_size` falls back to the default;
    /// oversized values are capped at `MAX_PAGE_SIZE`. A malformed `page` is
    /// a 404, matching an out-of-range page.
    pub fn from_query(query: &PageQuery, default_size: u64) -> Result<Self> {
        let page = match query.page.as_deref() {
            None | Some("") => 1,
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|p| *p >= 1)
                .ok_or_else(|| BookingError::NotFound("Invalid page.".to_string()))?,
        };

        let page_size = query
            .page_size
            .as_deref()
            .and_then(|raw| raw.parse::<u64>().ok())
            .filter(|size| *size >= 1)
            .map_or(default_size, |size| size.min(MAX_PAGE_SIZE));

        Ok(Self { page, page_size })
    }

    pub fn num_pages(&self, count: u64) -> u64 {
        count.div_ceil(self.page_size).max(1)
    }

    /// Row offset of this page, or 404 when the page lies past the end of a
    /// collection of `count` rows.
    pub fn offset(&self, count: u64) -> Result<u64> {
        if self.page > self.num_pages(count) {
            return Err(BookingError::NotFound("Invalid page.".to_string()));
        }
        Ok((self.page - 1) * self.page_size)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Build a page and its neighbour links relative to `base_path`.
    ///
    /// Page 1 of an empty collection is valid; any other page past the end
    /// is rejected.
    pub fn build(
        base_path: &str,
        request: PageRequest,
        count: u64,
        results: Vec<T>,
    ) -> Result<Self> {
        request.offset(count)?;
        let num_pages = request.num_pages(count);

        let link = |page: u64| format!("{base_path}?page={page}&page_size={}", request.page_size);

        Ok(Self {
            count,
            next: (request.page < num_pages).then(|| link(request.page + 1)),
            previous: (request.page > 1).then(|| link(request.page - 1)),
            results,
        })
    }
}
