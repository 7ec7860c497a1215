pub mod cache;
pub mod health;

pub use cache::{ClearCacheRequest, ClearCacheResponse};
pub use health::HealthResponse;
