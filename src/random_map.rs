//! An ordered mapping supporting amortised O(1) insert/remove/lookup
//! and, crucially, O(1) uniform random-key selection.
//!
//! Ported from `original_source/CarSharing/RandomDict.py`: a dense
//! array of `(key, value)` pairs plus a side `key -> position` index.
//! Deletion swaps the last element into the vacated slot, exactly as
//! the Python `__delitem__` does, rather than shifting the tail.

use rand::Rng;
use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone)]
pub struct RandomMap<K, V> {
    positions: HashMap<K, usize>,
    entries: Vec<(K, V)>,
}

impl<K, V> Default for RandomMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        RandomMap {
            positions: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<K, V> RandomMap<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.positions.contains_key(key)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.positions.get(key).map(|&i| &self.entries[i].1)
    }

    /// Insert or overwrite `key`. Returns the previous value, if any.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&i) = self.positions.get(&key) {
            let old = std::mem::replace(&mut self.entries[i].1, value);
            Some(old)
        } else {
            self.positions.insert(key.clone(), self.entries.len());
            self.entries.push((key, value));
            None
        }
    }

    /// Remove `key`, swapping the last entry into its slot. A no-op
    /// (returns `None`) if the key is absent.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let i = self.positions.remove(key)?;
        let last = self.entries.len() - 1;
        self.entries.swap(i, last);
        let (_, value) = self.entries.pop().unwrap();
        if i != last {
            let moved_key = self.entries[i].0.clone();
            self.positions.insert(moved_key, i);
        }
        Some(value)
    }

    /// Draw a uniform index in `[0, len)` from `rng` and return that
    /// slot's key. A program bug (panics) if the map is empty — callers
    /// must gate on non-emptiness first.
    pub fn random_key(&self, rng: &mut impl Rng) -> &K {
        assert!(!self.is_empty(), "random_key called on an empty RandomMap");
        let i = rng.gen_range(0..self.entries.len());
        &self.entries[i].0
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn insert_then_get() {
        let mut m: RandomMap<String, i32> = RandomMap::new();
        assert_eq!(m.insert("a".to_string(), 1), None);
        assert_eq!(m.get(&"a".to_string()), Some(&1));
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn insert_overwrites() {
        let mut m: RandomMap<&str, i32> = RandomMap::new();
        m.insert("a", 1);
        assert_eq!(m.insert("a", 2), Some(1));
        assert_eq!(m.len(), 1);
        assert_eq!(m.get(&"a"), Some(&2));
    }

    #[test]
    fn remove_swaps_tail_into_slot() {
        let mut m: RandomMap<&str, i32> = RandomMap::new();
        m.insert("a", 1);
        m.insert("b", 2);
        m.insert("c", 3);
        assert_eq!(m.remove(&"a"), Some(1));
        assert_eq!(m.len(), 2);
        assert!(m.contains_key(&"b"));
        assert!(m.contains_key(&"c"));
        assert!(!m.contains_key(&"a"));
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut m: RandomMap<&str, i32> = RandomMap::new();
        m.insert("a", 1);
        assert_eq!(m.remove(&"z"), None);
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn random_key_is_always_a_member() {
        let mut m: RandomMap<i32, i32> = RandomMap::new();
        for i in 0..20 {
            m.insert(i, i * 10);
        }
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let k = *m.random_key(&mut rng);
            assert!(m.contains_key(&k));
        }
    }

    #[test]
    #[should_panic]
    fn random_key_on_empty_panics() {
        let m: RandomMap<i32, i32> = RandomMap::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        m.random_key(&mut rng);
    }
}
