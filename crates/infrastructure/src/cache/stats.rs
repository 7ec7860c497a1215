use serde::Serialize;
use std::collections::BTreeMap;

/// Point-in-time statistics for one namespace. Approximate, observability
/// only.
#[derive(Debug, Clone, Serialize)]
pub struct NamespaceStats {
    pub entries: usize,
    pub memory_bytes: usize,
    pub max_entries: usize,
    pub max_memory_bytes: usize,
    /// Mean access count per resident entry.
    pub hit_rate: f64,
    pub oldest_entry_age_secs: f64,
    pub newest_entry_age_secs: f64,
}

/// Store-wide statistics snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub total_namespaces: usize,
    pub total_entries: usize,
    pub total_memory_bytes: usize,
    pub namespaces: BTreeMap<String, NamespaceStats>,
}

/// Result of one background sweep pass.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SweepStats {
    pub expired_removed: usize,
    pub evicted: usize,
}
