use super::entry::CacheEntry;
use super::stats::{CacheStats, NamespaceStats, SweepStats};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Per-namespace cache policy, fixed at registration.
#[derive(Debug, Clone)]
pub struct NamespaceConfig {
    pub max_entries: usize,
    pub max_memory_bytes: usize,
    pub default_max_age: Duration,
}

impl NamespaceConfig {
    pub fn new(max_entries: usize, max_memory_bytes: usize, default_max_age: Duration) -> Self {
        Self {
            max_entries,
            max_memory_bytes,
            default_max_age,
        }
    }
}

struct Namespace {
    config: NamespaceConfig,
    entries: HashMap<String, CacheEntry>,
    memory_bytes: usize,
}

impl Namespace {
    fn new(config: NamespaceConfig) -> Self {
        Self {
            config,
            entries: HashMap::new(),
            memory_bytes: 0,
        }
    }

    fn remove(&mut self, key: &str) -> Option<CacheEntry> {
        let entry = self.entries.remove(key)?;
        self.memory_bytes -= entry.size_bytes();
        Some(entry)
    }

    /// Remove the least-recently-accessed entry. Returns false when empty.
    fn evict_lru(&mut self) -> bool {
        let victim = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_accessed())
            .map(|(key, _)| key.clone());
        match victim {
            Some(key) => {
                self.remove(&key);
                true
            }
            None => false,
        }
    }

    /// Evict in LRU order until both caps admit an incoming entry of
    /// `incoming_bytes`.
    fn make_room(&mut self, incoming_bytes: usize) -> usize {
        let mut evicted = 0;
        while self.entries.len() >= self.config.max_entries
            || self.memory_bytes + incoming_bytes > self.config.max_memory_bytes
        {
            if !self.evict_lru() {
                break;
            }
            evicted += 1;
        }
        evicted
    }

    fn remove_expired(&mut self) -> usize {
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            self.remove(key);
        }
        expired.len()
    }

    /// Re-enforce caps after expiry removal, same LRU order as inserts.
    fn enforce_caps(&mut self) -> usize {
        let mut evicted = 0;
        while self.entries.len() > self.config.max_entries
            || self.memory_bytes > self.config.max_memory_bytes
        {
            if !self.evict_lru() {
                break;
            }
            evicted += 1;
        }
        evicted
    }

    fn stats(&self) -> NamespaceStats {
        let total_accesses: u64 = self.entries.values().map(CacheEntry::access_count).sum();
        let hit_rate = if self.entries.is_empty() {
            0.0
        } else {
            total_accesses as f64 / self.entries.len() as f64
        };
        let ages: Vec<f64> = self
            .entries
            .values()
            .map(|entry| entry.age().as_secs_f64())
            .collect();
        let (oldest, newest) = if ages.is_empty() {
            (0.0, 0.0)
        } else {
            (
                ages.iter().copied().fold(0.0_f64, f64::max),
                ages.iter().copied().fold(f64::INFINITY, f64::min),
            )
        };
        NamespaceStats {
            entries: self.entries.len(),
            memory_bytes: self.memory_bytes,
            max_entries: self.config.max_entries,
            max_memory_bytes: self.config.max_memory_bytes,
            hit_rate,
            oldest_entry_age_secs: oldest,
            newest_entry_age_secs: newest,
        }
    }
}

/// Namespaced TTL + LRU cache.
///
/// One coarse lock covers the whole store: every operation on a namespace is
/// linearizable with respect to eviction decisions, and namespaces never
/// affect each other's contents. Constructed once at application root and
/// shared by reference.
pub struct CacheStore {
    inner: Mutex<HashMap<String, Namespace>>,
}

impl CacheStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// Register a namespace. Re-registering replaces the config but keeps
    /// existing entries.
    pub fn register(&self, namespace: &str, config: NamespaceConfig) {
        let mut inner = self.inner.lock().unwrap();
        match inner.get_mut(namespace) {
            Some(existing) => {
                warn!(namespace, "Namespace already registered, updating config");
                existing.config = config;
            }
            None => {
                info!(
                    namespace,
                    max_entries = config.max_entries,
                    max_memory_bytes = config.max_memory_bytes,
                    default_max_age_secs = config.default_max_age.as_secs(),
                    "Registered cache namespace"
                );
                inner.insert(namespace.to_string(), Namespace::new(config));
            }
        }
    }

    /// Look up a value. Expired entries are removed on access; an unknown
    /// namespace is a logged miss, never an error.
    pub fn get(&self, namespace: &str, key: &str) -> Option<Value> {
        let mut inner = self.inner.lock().unwrap();
        let Some(ns) = inner.get_mut(namespace) else {
            warn!(namespace, "Cache namespace not registered");
            return None;
        };

        let expired = ns.entries.get(key).is_some_and(CacheEntry::is_expired);
        if expired {
            ns.remove(key);
            debug!(namespace, key, "Lazily removed expired entry");
            return None;
        }
        ns.entries.get_mut(key).map(CacheEntry::access)
    }

    /// Insert a value, evicting LRU entries until it fits. Returns false for
    /// an unknown namespace.
    pub fn set(&self, namespace: &str, key: &str, value: Value, max_age: Option<Duration>) -> bool {
        let mut inner = self.inner.lock().unwrap();
        let Some(ns) = inner.get_mut(namespace) else {
            warn!(namespace, "Cache namespace not registered");
            return false;
        };

        let max_age = max_age.unwrap_or(ns.config.default_max_age);
        let entry = CacheEntry::new(value, max_age);

        // Cannot fit even in an empty namespace: reject without evicting.
        if entry.size_bytes() > ns.config.max_memory_bytes {
            warn!(
                namespace,
                key,
                size_bytes = entry.size_bytes(),
                max_memory_bytes = ns.config.max_memory_bytes,
                "Entry exceeds namespace memory cap, not cached"
            );
            return false;
        }

        // Replacing a key frees its old footprint before cap checks.
        ns.remove(key);
        let evicted = ns.make_room(entry.size_bytes());
        if evicted > 0 {
            debug!(namespace, key, evicted, "Evicted LRU entries to make room");
        }

        ns.memory_bytes += entry.size_bytes();
        ns.entries.insert(key.to_string(), entry);
        true
    }

    pub fn delete(&self, namespace: &str, key: &str) -> bool {
        let mut inner = self.inner.lock().unwrap();
        inner
            .get_mut(namespace)
            .and_then(|ns| ns.remove(key))
            .is_some()
    }

    /// Clear one namespace (entries only; the namespace stays registered).
    pub fn clear(&self, namespace: &str) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(ns) = inner.get_mut(namespace) {
            ns.entries.clear();
            ns.memory_bytes = 0;
            info!(namespace, "Cleared cache namespace");
        }
    }

    pub fn clear_all(&self) {
        let mut inner = self.inner.lock().unwrap();
        for ns in inner.values_mut() {
            ns.entries.clear();
            ns.memory_bytes = 0;
        }
        info!("Cleared all cache namespaces");
    }

    /// Remove expired entries everywhere, then re-enforce per-namespace caps.
    /// Run periodically by the scheduler; expiry is also checked lazily on
    /// every `get`.
    pub fn sweep(&self) -> SweepStats {
        let mut inner = self.inner.lock().unwrap();
        let mut stats = SweepStats::default();
        for ns in inner.values_mut() {
            stats.expired_removed += ns.remove_expired();
            stats.evicted += ns.enforce_caps();
        }
        if stats.expired_removed > 0 || stats.evicted > 0 {
            info!(
                expired = stats.expired_removed,
                evicted = stats.evicted,
                "Cache sweep completed"
            );
        }
        stats
    }

    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock().unwrap();
        let namespaces: BTreeMap<String, NamespaceStats> = inner
            .iter()
            .map(|(name, ns)| (name.clone(), ns.stats()))
            .collect();
        CacheStats {
            total_namespaces: namespaces.len(),
            total_entries: namespaces.values().map(|s| s.entries).sum(),
            total_memory_bytes: namespaces.values().map(|s| s.memory_bytes).sum(),
            namespaces,
        }
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new()
    }
}
