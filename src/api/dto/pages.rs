//! DTOs for the page cache endpoints.

use serde::{Deserialize, Serialize};

/// Query parameters for `GET /pages` and `GET /pages/count`.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub url: String,
}

/// Response for `GET /pages/count`.
#[derive(Debug, Serialize)]
pub struct PageCountResponse {
    pub url: String,
    pub count: i64,
}
