// Copyright (c) 2026-present, hashkit
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::{bucket_index, AbstractTable, Config, Entry, Error, HashType, ProbeType, RawHash};

/// State of a single open-addressing slot
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Slot<K, V> {
    /// Never written
    Empty,

    /// Holds a live entry
    Occupied(Entry<K, V>),

    /// Previously occupied, now logically empty
    ///
    /// Lookups probe past it; inserts may reuse it.
    Tombstone,
}

impl<K, V> Default for Slot<K, V> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<K, V> Slot<K, V> {
    /// Returns the live entry, if any.
    #[must_use]
    pub fn entry(&self) -> Option<&Entry<K, V>> {
        match self {
            Self::Occupied(entry) => Some(entry),
            _ => None,
        }
    }

    /// Returns `true` if the slot is a tombstone.
    #[must_use]
    pub fn is_tombstone(&self) -> bool {
        matches!(self, Self::Tombstone)
    }
}

/// Hash table that resolves collisions by open addressing
///
/// All entries live in one flat slot array; a colliding key probes
/// alternative slots following the configured [`ProbeType`]. Removal is not
/// supported.
#[derive(Debug)]
pub struct OpenTable<K, V> {
    slots: Vec<Slot<K, V>>,

    /// Number of key-value pairs
    len: usize,

    load_factor: f32,
    hash_type: HashType,
    probe_type: ProbeType,

    rehash_count: usize,

    /// Slot of the last written key
    last_updated: usize,

    /// Number of live slots
    occupied: usize,
}

impl<K: RawHash + Eq, V: PartialEq> OpenTable<K, V> {
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
            config.probe_type,
        ))
    }

    fn with_capacity(
        capacity: usize,
        load_factor: f32,
        hash_type: HashType,
        probe_type: ProbeType,
    ) -> Self {
        Self {
            slots: std::iter::repeat_with(Slot::default).take(capacity).collect(),
            len: 0,
            load_factor,
            hash_type,
            probe_type,
            rehash_count: 0,
            last_updated: 0,
            occupied: 0,
        }
    }

    /// Returns the probe sequence in use.
    #[must_use]
    pub fn probe_type(&self) -> ProbeType {
        self.probe_type
    }

    /// Returns the raw slot array.
    #[must_use]
    pub fn slots(&self) -> &[Slot<K, V>] {
        &self.slots
    }

    #[allow(clippy::cast_precision_loss)]
    fn exceeds_load(&self) -> bool {
        self.len as f64 > self.slots.len() as f64 * f64::from(self.load_factor)
    }

    /// Probes for the slot of `key`.
    ///
    /// Returns the first empty slot, the first tombstone (if `stop_at_tombstone`),
    /// or the slot holding `key`, whichever comes first. Returns `None` once
    /// `capacity` slots were examined without a match.
    fn find_position(&self, key: &K, stop_at_tombstone: bool) -> Option<usize> {
        let len = self.slots.len();
        let raw = key.raw_hash();
        let initial = bucket_index(raw, len, self.hash_type);

        let mut position = initial;

        for attempt in 0..len {
            match &self.slots[position] {
                Slot::Empty => return Some(position),
                Slot::Tombstone if stop_at_tombstone => return Some(position),
                Slot::Occupied(entry) if entry.key == *key => return Some(position),
                _ => {}
            }

            position = self.probe_type.position(initial, attempt, raw, len);
        }

        None
    }

    /// Doubles the slot array by reinserting every live entry into a new table.
    ///
    /// Tombstones are dropped.
    fn rehash(&mut self) {
        let mut grown = Self::with_capacity(
            self.slots.len() * 2,
            self.load_factor,
            self.hash_type,
            self.probe_type,
        );

        for slot in std::mem::take(&mut self.slots) {
            if let Slot::Occupied(entry) = slot {
                grown.put(entry.key, entry.value);
            }
        }

        self.slots = grown.slots;
        self.len = grown.len;
        self.occupied = grown.occupied;
        self.last_updated = grown.last_updated;
        self.rehash_count += 1 + grown.rehash_count;

        log::trace!(
            "Rehashed open-addressing table to {} slots ({} occupied)",
            self.slots.len(),
            self.occupied,
        );
    }
}

impl<K: RawHash + Eq, V: PartialEq> AbstractTable<K, V> for OpenTable<K, V> {
    fn put(&mut self, key: K, value: V) -> Option<V> {
        if let Some(position) = self.find_position(&key, false) {
            if let Slot::Occupied(entry) = &mut self.slots[position] {
                self.last_updated = position;
                return Some(std::mem::replace(&mut entry.value, value));
            }
        }

        loop {
            let Some(position) = self.find_position(&key, true) else {
                log::trace!(
                    "{} probe sequence exhausted at capacity {}",
                    self.probe_type,
                    self.slots.len(),
                );
                self.rehash();
                continue;
            };

            self.slots[position] = Slot::Occupied(Entry::new(key, value));
            self.len += 1;

            if self.exceeds_load() {
                self.rehash();
            } else {
                self.occupied += 1;
                self.last_updated = position;
            }

            return None;
        }
    }

    fn get(&self, key: &K) -> Option<&V> {
        let position = self.find_position(key, false)?;

        match &self.slots[position] {
            Slot::Occupied(entry) if entry.key == *key => Some(&entry.value),
            _ => None,
        }
    }

    fn remove(&mut self, _: &K) -> crate::Result<Option<V>> {
        Err(Error::Unsupported("remove"))
    }

    fn replace(&mut self, _: &K, _: &V, _: V) -> crate::Result<bool> {
        Err(Error::Unsupported("replace"))
    }

    fn contains_value(&self, _: &V) -> crate::Result<bool> {
        Err(Error::Unsupported("contains_value"))
    }

    fn clear(&mut self) {
        self.slots.fill_with(Slot::default);

        self.len = 0;
        self.last_updated = 0;
        self.rehash_count = 0;
        self.occupied = 0;
    }

    fn len(&self) -> usize {
        self.len
    }

    fn capacity(&self) -> usize {
        self.slots.len()
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

    fn bucket(&self, index: usize) -> Vec<&Entry<K, V>> {
        self.slots
            .get(index)
            .and_then(Slot::entry)
            .into_iter()
            .collect()
    }
}
