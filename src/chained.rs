// Copyright (c) 2026-present, hashkit
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::{bucket_index, AbstractTable, Config, Entry, HashType, RawHash};

/// Link to the head of a chain (or the rest of one)
type Link<K, V> = Option<Box<Node<K, V>>>;

#[derive(Debug)]
struct Node<K, V> {
    entry: Entry<K, V>,
    next: Link<K, V>,
}

/// Unlinks a chain node by node, so long chains do not recurse on drop.
fn drop_chain<K, V>(link: &mut Link<K, V>) {
    let mut cursor = link.take();

    while let Some(mut node) = cursor {
        cursor = node.next.take();
    }
}

/// Hash table that resolves collisions by separate chaining
///
/// Every bucket owns a singly linked chain; new keys are pushed at the head
/// of their chain. The table doubles (rehashes) once its length exceeds
/// `capacity * load_factor`.
#[derive(Debug)]
pub struct ChainedTable<K, V> {
    buckets: Vec<Link<K, V>>,

    /// Number of key-value pairs
    len: usize,

    load_factor: f32,
    hash_type: HashType,

    /// Longest chain observed since the last rehash or clear
    max_chain_size: usize,

    rehash_count: usize,

    /// Bucket of the last written key
    last_updated: usize,

    /// Number of non-empty buckets
    occupied: usize,
}

impl<K, V> Drop for ChainedTable<K, V> {
    fn drop(&mut self) {
        for link in &mut self.buckets {
            drop_chain(link);
        }
    }
}

impl<K: RawHash + Eq, V: PartialEq> ChainedTable<K, V> {
    /// Opens an empty table with the given configuration.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the initial capacity or load factor is invalid.
    pub fn open(config: &Config) -> crate::Result<Self> {
        config.validate()?;

        Ok(Self::with_capacity(
            config.initial_capacity,
            config.load_factor,
            config.hash_type,
        ))
    }

    fn with_capacity(capacity: usize, load_factor: f32, hash_type: HashType) -> Self {
        Self {
            buckets: std::iter::repeat_with(|| None).take(capacity).collect(),
            len: 0,
            load_factor,
            hash_type,
            max_chain_size: 0,
            rehash_count: 0,
            last_updated: 0,
            occupied: 0,
        }
    }

    fn bucket_of(&self, key: &K) -> usize {
        bucket_index(key.raw_hash(), self.buckets.len(), self.hash_type)
    }

    #[allow(clippy::cast_precision_loss)]
    fn exceeds_load(&self) -> bool {
        self.len as f64 > self.buckets.len() as f64 * f64::from(self.load_factor)
    }

    fn find(&self, key: &K) -> Option<&Entry<K, V>> {
        let mut cursor = self.buckets.get(self.bucket_of(key))?.as_deref();

        while let Some(node) = cursor {
            if node.entry.key == *key {
                return Some(&node.entry);
            }
            cursor = node.next.as_deref();
        }

        None
    }

    /// Doubles the bucket array by reinserting every entry into a new table.
    fn rehash(&mut self) {
        let mut grown = Self::with_capacity(self.buckets.len() * 2, self.load_factor, self.hash_type);

        for link in &mut self.buckets {
            let mut cursor = link.take();

            while let Some(node) = cursor {
                let Node { entry, next } = *node;
                grown.put(entry.key, entry.value);
                cursor = next;
            }
        }

        self.buckets = std::mem::take(&mut grown.buckets);
        self.max_chain_size = grown.max_chain_size;
        self.occupied = grown.occupied;
        self.last_updated = grown.last_updated;
        self.rehash_count += 1 + grown.rehash_count;

        log::trace!(
            "Rehashed chained table to {} buckets (max chain {}, {} occupied)",
            self.buckets.len(),
            self.max_chain_size,
            self.occupied,
        );
    }
}

impl<K: RawHash + Eq, V: PartialEq> AbstractTable<K, V> for ChainedTable<K, V> {
    fn put(&mut self, key: K, value: V) -> Option<V> {
        let index = self.bucket_of(&key);

        let mut chain_size = 0;
        let mut cursor = self.buckets[index].as_deref_mut();

        while let Some(node) = cursor {
            chain_size += 1;

            if node.entry.key == key {
                self.last_updated = index;
                return Some(std::mem::replace(&mut node.entry.value, value));
            }
            cursor = node.next.as_deref_mut();
        }

        // The chain is about to grow by one
        self.max_chain_size = self.max_chain_size.max(chain_size + 1);

        let link = &mut self.buckets[index];
        if link.is_none() {
            self.occupied += 1;
        }

        let next = link.take();
        *link = Some(Box::new(Node {
            entry: Entry::new(key, value),
            next,
        }));
        self.len += 1;

        if self.exceeds_load() {
            self.rehash();
        } else {
            self.last_updated = index;
        }

        None
    }

    fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|entry| &entry.value)
    }

    fn remove(&mut self, key: &K) -> crate::Result<Option<V>> {
        let index = self.bucket_of(key);
        let mut link = &mut self.buckets[index];

        while link.as_ref().is_some_and(|node| node.entry.key != *key) {
            if let Some(node) = link {
                link = &mut node.next;
            }
        }

        let Some(node) = link.take() else {
            return Ok(None);
        };
        let Node { entry, next } = *node;
        *link = next;

        self.len -= 1;
        if self.buckets[index].is_none() {
            self.occupied -= 1;
        }

        Ok(Some(entry.value))
    }

    fn replace(&mut self, key: &K, old_value: &V, new_value: V) -> crate::Result<bool> {
        let index = self.bucket_of(key);
        let mut cursor = self.buckets[index].as_deref_mut();

        while let Some(node) = cursor {
            if node.entry.key == *key {
                if node.entry.value != *old_value {
                    return Ok(false);
                }

                node.entry.value = new_value;
                self.last_updated = index;
                return Ok(true);
            }
            cursor = node.next.as_deref_mut();
        }

        Ok(false)
    }

    fn contains_value(&self, value: &V) -> crate::Result<bool> {
        for link in &self.buckets {
            let mut cursor = link.as_deref();

            while let Some(node) = cursor {
                if node.entry.value == *value {
                    return Ok(true);
                }
                cursor = node.next.as_deref();
            }
        }

        Ok(false)
    }

    fn clear(&mut self) {
        for link in &mut self.buckets {
            drop_chain(link);
        }

        self.len = 0;
        self.last_updated = 0;
        self.max_chain_size = 0;
        self.rehash_count = 0;
        self.occupied = 0;
    }

    fn len(&self) -> usize {
        self.len
    }

    fn capacity(&self) -> usize {
        self.buckets.len()
    }

    fn load_factor(&self) -> f32 {
        self.load_factor
    }

    fn hash_type(&self) -> HashType {
        self.hash_type
    }

    fn rehash_count(&self) -> usize {
        self.rehash_count
    }

    fn last_updated(&self) -> usize {
        self.last_updated
    }

    fn occupied(&self) -> usize {
        self.occupied
    }

    fn max_chain_size(&self) -> Option<usize> {
        Some(self.max_chain_size)
    }

    fn bucket(&self, index: usize) -> Vec<&Entry<K, V>> {
        let mut entries = Vec::new();
        let mut cursor = self.buckets.get(index).and_then(|link| link.as_deref());

        while let Some(node) = cursor {
            entries.push(&node.entry);
            cursor = node.next.as_deref();
        }

        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn table(capacity: usize, load_factor: f32) -> crate::Result<ChainedTable<i32, &'static str>> {
        Config::new()
            .initial_capacity(capacity)
            .load_factor(load_factor)
            .open_chained()
    }

    fn longest_chain<K: RawHash + Eq, V: PartialEq>(table: &ChainedTable<K, V>) -> usize {
        (0..table.capacity())
            .map(|idx| table.bucket(idx).len())
            .max()
            .unwrap_or_default()
    }

    #[test]
    fn chained_put_get() -> crate::Result<()> {
        let mut table = table(8, 0.75)?;

        assert_eq!(None, table.put(1, "a"));
        assert_eq!(None, table.put(2, "b"));
        assert_eq!(Some(&"a"), table.get(&1));
        assert_eq!(Some(&"b"), table.get(&2));
        assert_eq!(None, table.get(&3));
        assert_eq!(2, table.len());

        Ok(())
    }

    #[test]
    fn chained_overwrite_keeps_len() -> crate::Result<()> {
        let mut table = table(8, 0.75)?;

        table.put(5, "a");
        assert_eq!(Some("a"), table.put(5, "b"));
        assert_eq!(Some("b"), table.put(5, "b"));
        assert_eq!(1, table.len());
        assert_eq!(Some(&"b"), table.get(&5));
        assert_eq!(5, table.last_updated());

        Ok(())
    }

    #[test]
    fn chained_collisions_push_at_head() -> crate::Result<()> {
        let mut table = table(8, 1.0)?;

        // All map to bucket 1
        table.put(1, "a");
        table.put(9, "b");
        table.put(17, "c");

        let chain = table
            .bucket(1)
            .into_iter()
            .map(|entry| entry.key)
            .collect::<Vec<_>>();
        assert_eq!(vec![17, 9, 1], chain);

        assert_eq!(Some(3), table.max_chain_size());
        assert_eq!(1, table.occupied());
        assert_eq!(1, table.last_updated());

        Ok(())
    }

    #[test]
    fn chained_rehash_doubles() -> crate::Result<()> {
        let mut table = table(8, 0.75)?;

        for key in 0..6 {
            table.put(key, "v");
        }
        assert_eq!(8, table.capacity());
        assert_eq!(0, table.rehash_count());

        table.put(6, "v");
        assert_eq!(16, table.capacity());
        assert_eq!(1, table.rehash_count());

        for key in 0..7 {
            assert!(table.contains(&key));
        }

        Ok(())
    }

    #[test]
    fn chained_rehash_rebuilds_statistics() -> crate::Result<()> {
        let mut table = table(4, 1.0)?;

        // 0, 4, 8, 12 share bucket 0 at capacity 4
        for key in [0, 4, 8, 12] {
            table.put(key, "v");
        }
        assert_eq!(Some(4), table.max_chain_size());
        assert_eq!(1, table.occupied());

        // At capacity 8: buckets 0 and 4
        table.put(16, "v");
        assert_eq!(8, table.capacity());
        assert_eq!(Some(3), table.max_chain_size());
        assert_eq!(2, table.occupied());
        assert_eq!(longest_chain(&table), 3);

        Ok(())
    }

    #[test]
    fn chained_max_chain_tracks_true_longest() -> crate::Result<()> {
        use rand::Rng;

        let mut rng = rand::rng();
        let mut table = table(8, 0.75)?;

        for _ in 0..500 {
            let key = rng.random_range(0..200);
            table.put(key, "v");
            assert_eq!(Some(longest_chain(&table)), table.max_chain_size());
        }

        Ok(())
    }

    #[test]
    fn chained_remove() -> crate::Result<()> {
        let mut table = table(8, 1.0)?;

        table.put(1, "a");
        table.put(9, "b");
        table.put(17, "c");

        // Middle of the chain
        assert_eq!(Some("b"), table.remove(&9)?);
        assert_eq!(2, table.len());
        assert!(!table.contains(&9));
        assert!(table.contains(&1));
        assert!(table.contains(&17));

        // Head of the chain
        assert_eq!(Some("c"), table.remove(&17)?);
        assert_eq!(Some("a"), table.remove(&1)?);
        assert_eq!(0, table.occupied());
        assert!(table.is_empty());

        // Absent key in an existing chain
        table.put(1, "a");
        assert_eq!(None, table.remove(&9)?);
        assert_eq!(1, table.len());

        Ok(())
    }

    #[test]
    fn chained_remove_walks_whole_chain() -> crate::Result<()> {
        let mut table = table(8, 1.0)?;

        // Chain of bucket 2, head first: 26, 18, 10, 2
        for key in [2, 10, 18, 26] {
            table.put(key, "v");
        }

        // Tail, then head, then the rest
        assert_eq!(Some("v"), table.remove(&2)?);
        assert_eq!(
            vec![26, 18, 10],
            table.bucket(2).into_iter().map(|e| e.key).collect::<Vec<_>>()
        );
        assert_eq!(Some("v"), table.remove(&26)?);
        assert_eq!(None, table.remove(&34)?);
        assert_eq!(Some("v"), table.remove(&10)?);
        assert_eq!(Some("v"), table.remove(&18)?);

        assert!(table.bucket(2).is_empty());
        assert_eq!(0, table.occupied());
        assert_eq!(0, table.len());

        // The emptied bucket is reusable
        table.put(34, "w");
        assert_eq!(Some(&"w"), table.get(&34));
        assert_eq!(1, table.occupied());

        Ok(())
    }

    #[test]
    fn chained_remove_from_empty_bucket() -> crate::Result<()> {
        let mut table = table(8, 0.75)?;

        assert_eq!(None, table.remove(&3)?);
        assert_eq!(0, table.len());

        Ok(())
    }

    #[test]
    fn chained_replace_compares_values() -> crate::Result<()> {
        let mut table = table(8, 1.0)?;

        table.put(1, "a");
        table.put(9, "b");

        assert!(!table.replace(&1, &"b", "x")?);
        assert_eq!(Some(&"a"), table.get(&1));

        assert!(table.replace(&1, &"a", "x")?);
        assert_eq!(Some(&"x"), table.get(&1));

        assert!(!table.replace(&17, &"a", "x")?);
        assert_eq!(2, table.len());

        Ok(())
    }

    #[test]
    fn chained_contains_value_scans_chains() -> crate::Result<()> {
        let mut table = table(8, 1.0)?;

        table.put(1, "a");
        table.put(9, "b");
        table.put(17, "c");

        assert!(table.contains_value(&"a")?);
        assert!(table.contains_value(&"c")?);
        assert!(!table.contains_value(&"d")?);

        Ok(())
    }

    #[test]
    fn chained_clear() -> crate::Result<()> {
        let mut table = table(2, 0.5)?;

        for key in 0..20 {
            table.put(key, "v");
        }
        let capacity = table.capacity();
        assert!(table.rehash_count() > 0);

        table.clear();
        assert!(table.is_empty());
        assert_eq!(0, table.rehash_count());
        assert_eq!(Some(0), table.max_chain_size());
        assert_eq!(0, table.occupied());
        assert_eq!(0, table.last_updated());
        assert_eq!(capacity, table.capacity());
        assert!(!table.contains(&3));

        Ok(())
    }

    #[test]
    fn chained_long_chain_drop() -> crate::Result<()> {
        let mut table = Config::new()
            .initial_capacity(16_384)
            .load_factor(1.0)
            .open_chained::<i64, u8>()?;

        // Same raw hash for every key: i ^ (i << 32) folds to 0
        for i in 0..10_000_i64 {
            table.put(i | (i << 32), 0);
        }
        assert_eq!(Some(10_000), table.max_chain_size());
        assert_eq!(1, table.occupied());

        drop(table);
        Ok(())
    }
}
