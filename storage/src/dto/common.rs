use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Window parameters shared by every listing endpoint.
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct LimitOffsetParams {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

fn default_limit() -> u32 {
    50
}

impl LimitOffsetParams {
    pub fn validate(&self) -> Result<(), String> {
        if self.limit < 1 || self.limit > 100 {
            return Err("limit must be between 1 and 100".to_string());
        }
        Ok(())
    }
}

/// One window of a collection, echoing the window it was cut with.
#[derive(Debug, Serialize, ToSchema)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub limit: u32,
    pub offset: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, params: &LimitOffsetParams) -> Self {
        Self {
            items,
            total,
            limit: params.limit,
            offset: params.offset,
        }
    }
}
