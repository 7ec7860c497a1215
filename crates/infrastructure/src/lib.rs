//! Propcast Infrastructure Layer
//!
//! Cache store, concurrent fan-out fetching, upstream source clients, and
//! the per-dataset data providers built on top of them.
pub mod cache;
pub mod fetch;
pub mod providers;
pub mod report;
pub mod sources;

pub use cache::{CacheStore, NamespaceConfig};
pub use fetch::{DataSource, FanoutFetcher, FetchResults};
pub use report::ReportAssembler;
