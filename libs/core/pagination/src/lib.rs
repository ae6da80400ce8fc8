//! Translation of REST-style `from`/`size` query parameters into page-based
//! repository queries.
//!
//! The mapping is deliberately compatible with the historical behavior this
//! service replaced rather than with textbook offset/limit semantics: when
//! `from` is non-zero it is used as the *page size*, and iteration starts at
//! page 1. Callers concatenate the fetched pages and truncate to `size`
//! entries. Changing these numbers silently would change the rows existing
//! clients see, so they are pinned by tests.

use std::future::Future;
use thiserror::Error;

/// Page size used to stream all rows when no `size` was requested.
const STREAM_PAGE_SIZE: u64 = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("values must not be negative")]
    Negative,

    #[error("limit must not be zero")]
    ZeroSize,
}

/// A single page to request from a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index.
    pub index: u64,
    /// Rows per page.
    pub size: u64,
}

impl PageRequest {
    /// Number of rows to skip when the backing store wants an offset.
    pub fn offset(&self) -> u64 {
        self.index * self.size
    }

    /// The same page size, one page further.
    pub fn next(&self) -> PageRequest {
        PageRequest {
            index: self.index + 1,
            size: self.size,
        }
    }
}

/// Page-iteration plan derived from a `(from, size)` pair.
///
/// With `size` present the caller walks `pages()` and truncates the
/// concatenated result to `size` rows. With `size` absent the caller starts at
/// [`Pagination::first_page`] and keeps calling [`PageRequest::next`] until a
/// page comes back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page_size: u64,
    pub page_start: u64,
    pub pages_amount: u64,
}

impl Pagination {
    pub fn new(from: i64, size: Option<i64>) -> Result<Self, PaginationError> {
        if let Some(size) = size {
            if from < 0 || size < 0 {
                return Err(PaginationError::Negative);
            }
            if size == 0 {
                return Err(PaginationError::ZeroSize);
            }
        }

        let from = from.max(0) as u64;
        let mut page_size = from;
        let mut page_start = 1;
        let mut pages_amount = 0;

        match size {
            None => {
                if from == 0 {
                    page_size = STREAM_PAGE_SIZE;
                    page_start = 0;
                }
            }
            Some(size) => {
                let size = size as u64;
                if from == 0 {
                    page_size = size;
                    page_start = 0;
                }

                pages_amount = page_start + 1;
                if from < size && from != 0 {
                    pages_amount = size / from + page_start;
                    if size % from != 0 {
                        pages_amount += 1;
                    }
                }
            }
        }

        Ok(Self {
            page_size,
            page_start,
            pages_amount,
        })
    }

    /// Pages to fetch when a `size` was requested.
    pub fn pages(&self) -> impl Iterator<Item = PageRequest> + '_ {
        let size = self.page_size;
        (self.page_start..self.pages_amount).map(move |index| PageRequest { index, size })
    }

    /// First page of the stream-until-empty mode (`size` absent).
    pub fn first_page(&self) -> PageRequest {
        PageRequest {
            index: self.page_start,
            size: self.page_size,
        }
    }
}

/// Drive a page-by-page fetch for a `(from, size)` pair and collect the rows.
///
/// With `size` present the plan's pages are fetched in order and the result is
/// truncated to `size` rows. With `size` absent pages are fetched starting at
/// the plan's first page until one comes back short.
pub async fn fetch_all<T, E, F, Fut>(
    from: i64,
    size: Option<i64>,
    mut fetch: F,
) -> Result<Vec<T>, E>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<Vec<T>, E>>,
    E: From<PaginationError>,
{
    let plan = Pagination::new(from, size)?;
    let mut rows = Vec::new();

    match size {
        None => {
            let mut page = plan.first_page();
            loop {
                let chunk = fetch(page).await?;
                let short = (chunk.len() as u64) < page.size;
                rows.extend(chunk);
                if short {
                    break;
                }
                page = page.next();
            }
        }
        Some(limit) => {
            for page in plan.pages() {
                rows.extend(fetch(page).await?);
            }
            rows.truncate(limit as usize);
        }
    }

    Ok(rows)
}
