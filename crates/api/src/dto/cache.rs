use serde::{Deserialize, Serialize};

/// Body for `POST /cache/clear`. An absent body clears every namespace.
#[derive(Debug, Default, Deserialize)]
pub struct ClearCacheRequest {
    pub namespace: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ClearCacheResponse {
    pub cleared: String,
}
