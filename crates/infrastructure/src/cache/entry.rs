use serde_json::Value;
use std::time::{Duration, Instant};

/// Approximate size charged to an entry when its value cannot be serialized.
const DEFAULT_SIZE_BYTES: usize = 100;

/// A single cached value with access metadata.
///
/// The size is computed once at creation and never recalculated; cached
/// values are treated as immutable for the entry's lifetime.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    value: Value,
    created_at: Instant,
    last_accessed: Instant,
    max_age: Duration,
    access_count: u64,
    size_bytes: usize,
}

impl CacheEntry {
    pub fn new(value: Value, max_age: Duration) -> Self {
        let size_bytes = serde_json::to_string(&value)
            .map(|s| s.len())
            .unwrap_or(DEFAULT_SIZE_BYTES);
        let now = Instant::now();
        Self {
            value,
            created_at: now,
            last_accessed: now,
            max_age,
            access_count: 0,
            size_bytes,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.max_age
    }

    /// Record an access and return the value.
    pub fn access(&mut self) -> Value {
        self.last_accessed = Instant::now();
        self.access_count += 1;
        self.value.clone()
    }

    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    pub fn last_accessed(&self) -> Instant {
        self.last_accessed
    }

    pub fn access_count(&self) -> u64 {
        self.access_count
    }

    pub fn size_bytes(&self) -> usize {
        self.size_bytes
    }
}
