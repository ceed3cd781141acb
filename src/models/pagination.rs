//! Offset/limit paging for list endpoints

use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    config::PaginationConfig,
    error::{AppError, AppResult},
};

/// `?skip=&limit=` query parameters
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Number of records to skip
    pub skip: Option<i64>,
    /// Maximum number of records to return
    pub limit: Option<i64>,
}

/// Resolved window over a listing ordered by id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: i64,
    pub limit: i64,
}

impl PageQuery {
    /// Apply defaults and clamp `limit` to `1..=max_limit`
    pub fn resolve(&self, config: &PaginationConfig) -> AppResult<Page> {
        let offset = self.skip.unwrap_or(0);
        if offset < 0 {
            return Err(AppError::Validation("skip must not be negative".to_string()));
        }
        let max = config.max_limit.max(1);
        let limit = self.limit.unwrap_or(config.default_limit).clamp(1, max);
        Ok(Page { offset, limit })
    }
}
