// Copyright (c) 2026-present, hashkit
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

/// A key-value pair stored in a bucket or slot
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Entry<K, V> {
    /// Key
    pub key: K,

    /// Value
    pub value: V,
}

impl<K, V> Entry<K, V> {
    /// Creates a new entry.
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
}

impl<K: std::fmt::Display, V: std::fmt::Display> std::fmt::Display for Entry<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

impl<K, V> From<(K, V)> for Entry<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}
