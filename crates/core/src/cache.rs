//! A small time-based expiry map.
//!
//! Not thread-safe; callers wrap it in a mutex.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: HashMap<K, (Instant, V)>,
}

impl<K: Eq + Hash + Clone, V: Clone> TtlCache<K, V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Return a live value. Expired entries are dropped on access.
    pub fn get(&mut self, key: &K) -> Option<V> {
        let fresh = match self.entries.get(key) {
            Some((stored_at, _)) => stored_at.elapsed() < self.ttl,
            None => return None,
        };
        if !fresh {
            self.entries.remove(key);
            return None;
        }
        self.entries.get(key).map(|(_, v)| v.clone())
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.entries.insert(key, (Instant::now(), value));
    }

    pub fn invalidate(&mut self, key: &K) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Empty the cache, returning the keys that were held.
    pub fn clear(&mut self) -> Vec<K> {
        self.entries.drain().map(|(k, _)| k).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_get() {
        let mut cache = TtlCache::new(Duration::from_secs(60));
        cache.insert("chapters_1", vec![1, 2]);
        assert_eq!(cache.get(&"chapters_1"), Some(vec![1, 2]));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn zero_ttl_expires_immediately() {
        let mut cache = TtlCache::new(Duration::ZERO);
        cache.insert(1, "x");
        assert_eq!(cache.get(&1), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn invalidate_removes_key() {
        let mut cache = TtlCache::new(Duration::from_secs(60));
        cache.insert(1, 1);
        assert!(cache.invalidate(&1));
        assert!(!cache.invalidate(&1));
    }

    #[test]
    fn clear_returns_keys() {
        let mut cache = TtlCache::new(Duration::from_secs(60));
        cache.insert("a".to_string(), 1);
        cache.insert("b".to_string(), 2);
        let mut keys = cache.clear();
        keys.sort();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(cache.len(), 0);
    }
}
