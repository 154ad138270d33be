use std::collections::BTreeMap;

use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};

use crate::core::types::DocId;

/// Shards a concurrent map spreads its keys over unless told otherwise.
pub const DEFAULT_SHARD_COUNT: usize = 100;

/// Sharded map from document id to a value, used as the per-query score
/// accumulator on the parallel path.
///
/// A key lands in shard `id mod shard_count`. Access locks only the owning
/// shard, so writers touching different shards never contend, and a worker
/// holds at most one shard lock at a time.
pub struct ConcurrentMap<V> {
    shards: Vec<Mutex<BTreeMap<DocId, V>>>,
}

impl<V> ConcurrentMap<V> {
    pub fn new() -> Self {
        Self::with_shards(DEFAULT_SHARD_COUNT)
    }

    pub fn with_shards(shard_count: usize) -> Self {
        assert!(shard_count > 0, "shard count must be greater than zero");
        ConcurrentMap {
            shards: (0..shard_count).map(|_| Mutex::new(BTreeMap::new())).collect(),
        }
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Exclusive access to the value for `key`; the owning shard stays
    /// locked while the guard lives. Missing entries are created with
    /// `V::default()`.
    pub fn at(&self, key: DocId) -> MappedMutexGuard<'_, V>
    where
        V: Default,
    {
        MutexGuard::map(self.shard_for(key).lock(), |shard| {
            shard.entry(key).or_default()
        })
    }

    /// Removes the entry for `key`; returns whether it was present.
    pub fn erase(&self, key: DocId) -> bool {
        self.shard_for(key).lock().remove(&key).is_some()
    }

    /// Merges every shard into a single ordered map, locking shards one at
    /// a time in index order. Callers run this after all workers joined.
    pub fn build_ordinary(&self) -> BTreeMap<DocId, V>
    where
        V: Clone,
    {
        let mut merged = BTreeMap::new();
        for shard in &self.shards {
            let shard = shard.lock();
            merged.extend(shard.iter().map(|(key, value)| (*key, value.clone())));
        }
        merged
    }

    fn shard_for(&self, key: DocId) -> &Mutex<BTreeMap<DocId, V>> {
        let index = i64::from(key.value()).rem_euclid(self.shards.len() as i64) as usize;
        &self.shards[index]
    }
}

impl<V> Default for ConcurrentMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::prelude::*;

    #[test]
    fn accumulates_under_contention() {
        let map = ConcurrentMap::<f64>::with_shards(4);
        (0..1000).into_par_iter().for_each(|i| {
            *map.at(DocId(i % 10)) += 1.0;
        });

        let ordinary = map.build_ordinary();
        assert_eq!(ordinary.len(), 10);
        for value in ordinary.values() {
            assert_eq!(*value, 100.0);
        }
    }

    #[test]
    fn erase_removes_from_the_owning_shard() {
        let map = ConcurrentMap::<f64>::with_shards(3);
        *map.at(DocId(7)) += 1.0;
        assert!(map.erase(DocId(7)));
        assert!(!map.erase(DocId(7)));
        assert!(map.build_ordinary().is_empty());
    }

    #[test]
    fn build_ordinary_is_sorted_by_key() {
        let map = ConcurrentMap::<f64>::new();
        for id in [9, 2, 105, 3] {
            *map.at(DocId(id)) += 1.0;
        }
        let keys: Vec<i32> = map.build_ordinary().keys().map(|id| id.value()).collect();
        assert_eq!(keys, vec![2, 3, 9, 105]);
    }

    #[test]
    fn default_shard_count_is_applied() {
        let map = ConcurrentMap::<f64>::new();
        assert_eq!(map.shard_count(), DEFAULT_SHARD_COUNT);
    }
}
