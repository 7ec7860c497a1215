//! Namespaced in-memory cache with per-namespace TTL, size, and memory
//! policies and LRU eviction.

mod entry;
mod stats;
mod store;

pub use entry::CacheEntry;
pub use stats::{CacheStats, NamespaceStats, SweepStats};
pub use store::{CacheStore, NamespaceConfig};
