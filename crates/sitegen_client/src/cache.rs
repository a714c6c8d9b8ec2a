//! Session-scoped cache of authoritative section lists, backed by moka.
//!
//! # Invariants
//! - Keys are normalized ideas (see `sitegen_core::normalize_idea`).
//! - An entry is served only while younger than the TTL.
//! - The cache holds at most `capacity` entries once pending maintenance
//!   has run. A capacity of zero disables caching.

use moka::sync::Cache;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct SectionCache {
    inner: Cache<String, Vec<String>>,
}

impl SectionCache {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(capacity as u64)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Returns fresh sections for `key`.
    pub fn get(&self, key: &str) -> Option<Vec<String>> {
        self.inner.get(key)
    }

    pub fn insert(&self, key: String, sections: Vec<String>) {
        self.inner.insert(key, sections);
    }

    /// Number of live entries after applying pending evictions.
    pub fn len(&self) -> u64 {
        self.inner.run_pending_tasks();
        self.inner.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::SectionCache;
    use std::time::Duration;

    const TTL: Duration = Duration::from_secs(300);

    fn sections(name: &str) -> Vec<String> {
        vec![name.to_string()]
    }

    #[test]
    fn fresh_entries_are_served() {
        let cache = SectionCache::new(TTL, 4);
        cache.insert("bakery".to_string(), sections("Menu"));

        assert_eq!(cache.get("bakery"), Some(sections("Menu")));
        assert_eq!(cache.get("restaurant"), None);
    }

    #[test]
    fn entries_expire_after_ttl() {
        let cache = SectionCache::new(Duration::from_millis(50), 4);
        cache.insert("bakery".to_string(), sections("Menu"));

        std::thread::sleep(Duration::from_millis(120));

        assert_eq!(cache.get("bakery"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn capacity_bounds_entry_count() {
        let cache = SectionCache::new(TTL, 2);
        for key in ["a", "b", "c", "d"] {
            cache.insert(key.to_string(), sections(key));
        }

        assert!(cache.len() <= 2);
    }

    #[test]
    fn replacing_a_key_keeps_one_entry() {
        let cache = SectionCache::new(TTL, 4);
        cache.insert("a".to_string(), sections("1"));
        cache.insert("a".to_string(), sections("2"));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("a"), Some(sections("2")));
    }

    #[test]
    fn zero_capacity_disables_caching() {
        let cache = SectionCache::new(TTL, 0);
        cache.insert("a".to_string(), sections("1"));

        assert!(cache.is_empty());
    }
}
