use crate::error::{DrillError, Result};
use indexmap::IndexMap;
use std::hash::Hash;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Access-ordered cache. Entries sit in an `IndexMap` from least to most
/// recently used; the front entry is evicted once `len() > capacity`.
#[derive(Debug)]
pub struct LruCache<K, V> {
    capacity: usize,
    entries: IndexMap<K, V>,
    stats: CacheStats,
}

impl<K: Hash + Eq, V> LruCache<K, V> {
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(DrillError::InvalidCapacity { capacity });
        }
        Ok(Self {
            capacity,
            entries: IndexMap::with_capacity(capacity + 1),
            stats: CacheStats::default(),
        })
    }

    /// Looks up `key` and marks it most recently used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        match self.entries.shift_remove_entry(key) {
            Some((k, v)) => {
                self.stats.hits += 1;
                let (idx, _) = self.entries.insert_full(k, v);
                self.entries.get_index(idx).map(|(_, v)| v)
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Looks up `key` without touching recency or stats.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    /// Inserts or updates `key` as most recently used. Returns the evicted
    /// entry when the insert pushed the cache over capacity.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        self.entries.shift_remove(&key);
        self.entries.insert(key, value);

        if self.entries.len() > self.capacity {
            let evicted = self.entries.shift_remove_index(0);
            debug!(capacity = self.capacity, "evicted least recently used entry");
            evicted
        } else {
            None
        }
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.entries.shift_remove(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys from least to most recently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_scenario() {
        let mut cache = LruCache::new(2).unwrap();
        cache.put(1, 1);
        cache.put(2, 2);
        assert_eq!(cache.get(&1), Some(&1));
        assert_eq!(cache.put(3, 3), Some((2, 2)));
        assert_eq!(cache.keys().copied().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            LruCache::<i32, i32>::new(0),
            Err(DrillError::InvalidCapacity { capacity: 0 })
        ));
    }

    #[test]
    fn test_update_refreshes_recency() {
        let mut cache = LruCache::new(2).unwrap();
        cache.put("a", 1);
        cache.put("b", 2);
        assert_eq!(cache.put("a", 10), None);
        assert_eq!(cache.len(), 2);

        // "b" is now the eldest
        assert_eq!(cache.put("c", 3), Some(("b", 2)));
        assert_eq!(cache.peek(&"a"), Some(&10));
    }

    #[test]
    fn test_peek_does_not_refresh() {
        let mut cache = LruCache::new(2).unwrap();
        cache.put(1, "one");
        cache.put(2, "two");
        assert_eq!(cache.peek(&1), Some(&"one"));
        assert_eq!(cache.put(3, "three"), Some((1, "one")));
        assert!(!cache.contains(&1));
    }

    #[test]
    fn test_stats_and_remove() {
        let mut cache = LruCache::new(3).unwrap();
        cache.put("k", 1);
        cache.get(&"k");
        cache.get(&"k");
        cache.get(&"missing");
        let stats = cache.stats();
        assert_eq!((stats.hits, stats.misses), (2, 1));
        assert!((stats.hit_rate() - 2.0 / 3.0).abs() < 1e-9);

        assert_eq!(cache.remove(&"k"), Some(1));
        assert!(cache.is_empty());
        assert_eq!(cache.remove(&"k"), None);
    }

    #[test]
    fn test_capacity_one() {
        let mut cache = LruCache::new(1).unwrap();
        cache.put(1, 'a');
        assert_eq!(cache.put(2, 'b'), Some((1, 'a')));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.capacity(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }
}
