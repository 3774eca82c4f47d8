//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

const MAX_OFFSET: u64 = i64::MAX as u64;

/// Raw pagination query parameters.
///
/// Absent or non-positive values fall back to the defaults.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct PaginationParams {
    /// Page number, 1-indexed (default 1)
    pub page: Option<i64>,
    /// Items per page (default 10, max 100)
    pub limit: Option<i64>,
}

impl PaginationParams {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self { page, limit }
    }

    /// Effective page number
    pub fn page(&self) -> u64 {
        match self.page {
            Some(page) if page > 0 => page as u64,
            _ => DEFAULT_PAGE_NUMBER,
        }
    }

    /// Effective page size, capped at maximum
    pub fn limit(&self) -> u64 {
        match self.limit {
            Some(limit) if limit > 0 => (limit as u64).min(MAX_PAGE_SIZE),
            _ => DEFAULT_PAGE_SIZE,
        }
    }

    /// Calculate offset for database query.
    ///
    /// Clamped to `i64::MAX`, the largest offset the database accepts.
    pub fn offset(&self) -> u64 {
        (self.page() - 1)
            .saturating_mul(self.limit())
            .min(MAX_OFFSET)
    }
}

/// Paginated response envelope
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, params: &PaginationParams, total: u64) -> Self {
        let limit = params.limit();

        Self {
            success: true,
            data,
            pagination: PaginationMeta {
                page: params.page(),
                limit,
                total,
                total_pages: total.div_ceil(limit),
            },
        }
    }
}
