//! Page request used by every list query

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::error::AppError;

const DEFAULT_PAGE_SIZE: i64 = 20;

/// Zero-based page request.
///
/// An offset past the end of the table is not an error, the query simply
/// returns nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Page {
    /// Page number, starting at 0
    #[serde(default)]
    pub number: i64,
    /// Entries per page (default: 20)
    #[serde(default = "default_size")]
    pub size: i64,
}

fn default_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Page {
    pub fn new(number: i64, size: i64) -> Self {
        Self { number, size }
    }

    pub fn limit(&self) -> i64 {
        self.size
    }

    /// Saturates at `i64::MAX`; a page past the end reads as empty
    pub fn offset(&self) -> i64 {
        self.number.saturating_mul(self.size)
    }

    /// Rejects negative page numbers and empty pages
    pub fn validate(self) -> Result<Self, AppError> {
        if self.number < 0 || self.size < 1 {
            return Err(AppError::BadRequest(format!(
                "Invalid page: number={} size={}",
                self.number, self.size
            )));
        }
        Ok(self)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}
