// Copyright (c) 2026-present, hashkit
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::{AnyTable, ChainedTable, Entry, HashType, OpenTable, RawHash, TableStats};
use enum_dispatch::enum_dispatch;

/// Generic hash table API
///
/// Implemented by [`ChainedTable`] and [`OpenTable`],
/// and forwarded by [`AnyTable`].
#[allow(clippy::module_name_repetitions)]
#[enum_dispatch]
pub trait AbstractTable<K, V> {
    /// Inserts a key-value pair, returning the previous value of the key.
    ///
    /// An existing key has its value replaced in place without changing
    /// the table's length. May grow (rehash) the table.
    fn put(&mut self, key: K, value: V) -> Option<V>;

    /// Returns the value of the key, if it exists.
    fn get(&self, key: &K) -> Option<&V>;

    /// Returns `true` if the key exists.
    fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Removes the key, returning its value.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the table variant does not support removal.
    fn remove(&mut self, key: &K) -> crate::Result<Option<V>>;

    /// Replaces the value of the key with `new_value` if its current value
    /// equals `old_value`. Returns `true` if the value was replaced.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the table variant does not support replacing.
    fn replace(&mut self, key: &K, old_value: &V, new_value: V) -> crate::Result<bool>;

    /// Returns `true` if any key maps to the value.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the table variant does not support value lookups.
    fn contains_value(&self, value: &V) -> crate::Result<bool>;

    /// Removes all items and resets statistics, keeping the capacity.
    fn clear(&mut self);

    /// Returns the number of key-value pairs.
    fn len(&self) -> usize;

    /// Returns `true` if the table holds no key-value pairs.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of buckets or slots.
    fn capacity(&self) -> usize;

    /// Returns the load factor threshold.
    fn load_factor(&self) -> f32;

    /// Returns the hash function in use.
    fn hash_type(&self) -> HashType;

    /// Returns how many times the table has doubled.
    fn rehash_count(&self) -> usize;

    /// Returns the index of the most recently written bucket or slot.
    fn last_updated(&self) -> usize;

    /// Returns the number of non-empty buckets or live slots.
    fn occupied(&self) -> usize;

    /// Returns the longest chain, or `None` if the table has no chains.
    fn max_chain_size(&self) -> Option<usize> {
        None
    }

    /// Returns the entries stored at a bucket or slot, head first.
    ///
    /// An out-of-range index yields no entries.
    fn bucket(&self, index: usize) -> Vec<&Entry<K, V>>;

    /// Collects the table statistics.
    fn stats(&self) -> TableStats {
        TableStats {
            len: self.len(),
            capacity: self.capacity(),
            rehash_count: self.rehash_count(),
            last_updated: self.last_updated(),
            occupied: self.occupied(),
            max_chain_size: self.max_chain_size(),
        }
    }
}
