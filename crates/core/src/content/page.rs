use serde::Serialize;
use thiserror::Error;

/// Largest page a listing endpoint will serve.
pub const MAX_PAGE_LIMIT: i64 = 10;
pub const DEFAULT_PAGE_LIMIT: i64 = 6;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("offset must be a non-negative integer")]
    InvalidOffset,
    #[error("limit must be an integer between 1 and 10")]
    InvalidLimit,
}

/// A validated `(offset, limit)` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    offset: u64,
    limit: u64,
}

impl PageRequest {
    pub fn new(offset: i64, limit: i64) -> Result<Self, PageError> {
        if offset < 0 {
            return Err(PageError::InvalidOffset);
        }
        if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
            return Err(PageError::InvalidLimit);
        }
        Ok(Self {
            offset: offset as u64,
            limit: limit as u64,
        })
    }

    /// Build from raw query-string values. Absent values take the defaults.
    pub fn parse(offset: Option<&str>, limit: Option<&str>) -> Result<Self, PageError> {
        let offset = match offset.map(str::trim) {
            None | Some("") => 0,
            Some(raw) => raw.parse::<i64>().map_err(|_| PageError::InvalidOffset)?,
        };
        let limit = match limit.map(str::trim) {
            None | Some("") => DEFAULT_PAGE_LIMIT,
            Some(raw) => raw.parse::<i64>().map_err(|_| PageError::InvalidLimit)?,
        };
        Self::new(offset, limit)
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Exclusive end index of the window.
    pub fn end(&self) -> u64 {
        self.offset + self.limit
    }
}

/// One page of a listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub has_more: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: u64, request: &PageRequest) -> Self {
        let has_more = request.offset + (items.len() as u64) < total_count;
        Self {
            items,
            total_count,
            has_more,
        }
    }
}
