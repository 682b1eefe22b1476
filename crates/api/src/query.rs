//! Shared query parameter types for API handlers.

use qna_core::votes::Direction;
use serde::Deserialize;

use crate::error::AppResult;

/// Page size used when `limit` is absent.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Largest accepted page size.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Generic pagination parameters (`?limit=&offset=`).
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// Requested page size clamped to `1..=MAX_PAGE_SIZE`.
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    /// Requested offset, never negative.
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

/// Query parameters for the vote endpoints (`?direction=up|down`).
#[derive(Debug, Deserialize)]
pub struct VoteParams {
    pub direction: String,
}

impl VoteParams {
    pub fn direction(&self) -> AppResult<Direction> {
        Ok(Direction::parse(&self.direction)?)
    }
}
