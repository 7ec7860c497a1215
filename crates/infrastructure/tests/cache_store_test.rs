use propcast_infrastructure::{CacheStore, NamespaceConfig};
use serde_json::json;
use std::thread::sleep;
use std::time::Duration;

fn store_with(namespace: &str, config: NamespaceConfig) -> CacheStore {
    let store = CacheStore::new();
    store.register(namespace, config);
    store
}

#[test]
fn set_then_get_round_trips() {
    let store = store_with("solar", NamespaceConfig::new(10, 1024 * 1024, Duration::from_secs(60)));

    assert!(store.set("solar", "conditions", json!({"sfi": 142}), None));
    assert_eq!(store.get("solar", "conditions"), Some(json!({"sfi": 142})));
    assert_eq!(store.get("solar", "missing"), None);
}

#[test]
fn expired_entry_is_gone_on_read() {
    let store = store_with("spots", NamespaceConfig::new(10, 1024 * 1024, Duration::from_secs(60)));

    store.set("spots", "live", json!(["W1AW"]), Some(Duration::from_millis(40)));
    assert!(store.get("spots", "live").is_some());

    sleep(Duration::from_millis(60));
    assert_eq!(store.get("spots", "live"), None);
    // The lazy expiry also freed the entry.
    assert_eq!(store.stats().total_entries, 0);
}

#[test]
fn per_entry_ttl_overrides_namespace_default() {
    let store = store_with("weather", NamespaceConfig::new(10, 1024 * 1024, Duration::from_millis(40)));

    store.set("weather", "short", json!(1), None);
    store.set("weather", "long", json!(2), Some(Duration::from_secs(60)));

    sleep(Duration::from_millis(60));
    assert_eq!(store.get("weather", "short"), None);
    assert_eq!(store.get("weather", "long"), Some(json!(2)));
}

#[test]
fn entry_cap_evicts_least_recently_accessed() {
    let store = store_with("ns", NamespaceConfig::new(2, 1024 * 1024, Duration::from_secs(60)));

    store.set("ns", "a", json!("a"), None);
    store.set("ns", "b", json!("b"), None);
    // Touch A so B becomes the LRU victim.
    assert!(store.get("ns", "a").is_some());
    store.set("ns", "c", json!("c"), None);

    assert!(store.get("ns", "a").is_some());
    assert_eq!(store.get("ns", "b"), None);
    assert!(store.get("ns", "c").is_some());
}

#[test]
fn memory_cap_evicts_until_room() {
    // Each entry below serializes to roughly 60 bytes; cap admits two.
    let store = store_with("ns", NamespaceConfig::new(100, 150, Duration::from_secs(60)));

    store.set("ns", "a", json!({"payload": "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"}), None);
    store.set("ns", "b", json!({"payload": "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb"}), None);
    store.set("ns", "c", json!({"payload": "cccccccccccccccccccccccccccccccccccccccc"}), None);

    let stats = store.stats();
    let ns = &stats.namespaces["ns"];
    assert!(ns.memory_bytes <= 150);
    assert!(ns.entries < 3);
    // The newest entry always survives its own insert.
    assert!(store.get("ns", "c").is_some());
}

#[test]
fn oversized_entry_is_rejected_not_inserted() {
    let store = store_with("ns", NamespaceConfig::new(10, 60, Duration::from_secs(60)));

    store.set("ns", "a", json!({"payload": "aaaaaaaaaaaaaaaaaaaa"}), None);
    assert_eq!(store.stats().namespaces["ns"].entries, 1);

    // Larger than the whole cap: rejected outright, nothing evicted.
    let huge = "x".repeat(200);
    assert!(!store.set("ns", "huge", json!({ "payload": huge }), None));

    let stats = store.stats();
    assert_eq!(stats.namespaces["ns"].entries, 1);
    assert!(stats.namespaces["ns"].memory_bytes <= 60);
    assert!(store.get("ns", "a").is_some());
    assert_eq!(store.get("ns", "huge"), None);
}

#[test]
fn replacing_a_key_frees_the_old_footprint() {
    let store = store_with("ns", NamespaceConfig::new(10, 1024, Duration::from_secs(60)));

    store.set("ns", "k", json!({"payload": "xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx"}), None);
    let before = store.stats().namespaces["ns"].memory_bytes;
    store.set("ns", "k", json!(1), None);
    let after = store.stats().namespaces["ns"].memory_bytes;

    assert_eq!(store.stats().namespaces["ns"].entries, 1);
    assert!(after < before);
}

#[test]
fn namespaces_are_isolated() {
    let store = CacheStore::new();
    store.register("solar", NamespaceConfig::new(1, 1024 * 1024, Duration::from_secs(60)));
    store.register("spots", NamespaceConfig::new(10, 1024 * 1024, Duration::from_secs(60)));

    store.set("solar", "k", json!("solar"), None);
    store.set("spots", "k", json!("spots"), None);
    // Overflow solar; spots must be untouched.
    store.set("solar", "k2", json!("solar2"), None);

    assert_eq!(store.get("spots", "k"), Some(json!("spots")));
    assert_eq!(store.stats().namespaces["solar"].entries, 1);

    store.clear("solar");
    assert_eq!(store.get("solar", "k2"), None);
    assert_eq!(store.get("spots", "k"), Some(json!("spots")));
}

#[test]
fn unknown_namespace_is_a_noop() {
    let store = CacheStore::new();

    assert!(!store.set("nope", "k", json!(1), None));
    assert_eq!(store.get("nope", "k"), None);
    assert!(!store.delete("nope", "k"));
    store.clear("nope");
}

#[test]
fn re_register_preserves_entries() {
    let store = store_with("ns", NamespaceConfig::new(10, 1024 * 1024, Duration::from_secs(60)));
    store.set("ns", "k", json!(1), None);

    store.register("ns", NamespaceConfig::new(5, 1024, Duration::from_secs(30)));
    assert_eq!(store.get("ns", "k"), Some(json!(1)));
    assert_eq!(store.stats().namespaces["ns"].max_entries, 5);
}

#[test]
fn delete_and_clear_all() {
    let store = CacheStore::new();
    store.register("a", NamespaceConfig::new(10, 1024 * 1024, Duration::from_secs(60)));
    store.register("b", NamespaceConfig::new(10, 1024 * 1024, Duration::from_secs(60)));

    store.set("a", "k", json!(1), None);
    store.set("b", "k", json!(2), None);

    assert!(store.delete("a", "k"));
    assert!(!store.delete("a", "k"));

    store.set("a", "k", json!(1), None);
    store.clear_all();
    assert_eq!(store.stats().total_entries, 0);
    // Namespaces survive a clear.
    assert!(store.set("a", "k", json!(1), None));
}

#[test]
fn sweep_removes_expired_entries() {
    let store = store_with("ns", NamespaceConfig::new(10, 1024 * 1024, Duration::from_secs(60)));

    store.set("ns", "stale", json!(1), Some(Duration::from_millis(30)));
    store.set("ns", "fresh", json!(2), None);
    sleep(Duration::from_millis(50));

    let stats = store.sweep();
    assert_eq!(stats.expired_removed, 1);
    assert_eq!(stats.evicted, 0);
    assert_eq!(store.get("ns", "fresh"), Some(json!(2)));
    assert_eq!(store.stats().total_entries, 1);
}

#[test]
fn stats_reflect_contents() {
    let store = CacheStore::new();
    store.register("a", NamespaceConfig::new(10, 1024, Duration::from_secs(60)));
    store.register("b", NamespaceConfig::new(10, 1024, Duration::from_secs(60)));
    store.set("a", "k1", json!("one"), None);
    store.set("a", "k2", json!("two"), None);

    let stats = store.stats();
    assert_eq!(stats.total_namespaces, 2);
    assert_eq!(stats.total_entries, 2);
    assert!(stats.total_memory_bytes > 0);
    assert_eq!(stats.namespaces["a"].entries, 2);
    assert_eq!(stats.namespaces["b"].entries, 0);
    assert_eq!(stats.namespaces["b"].memory_bytes, 0);
}
