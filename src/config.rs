// Copyright (c) 2026-present, hashkit
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::{AnyTable, ChainedTable, Error, HashType, OpenTable, ProbeType, RawHash};
use std::str::FromStr;

/// Default number of buckets or slots
pub const DEFAULT_INITIAL_CAPACITY: usize = 8;

/// Default load factor threshold
pub const DEFAULT_LOAD_FACTOR: f32 = 0.75;

/// Collision resolution strategy
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum TableType {
    /// Separate chaining, see [`ChainedTable`]
    #[default]
    Chained,

    /// Open addressing, see [`OpenTable`]
    OpenAddressing,
}

impl std::fmt::Display for TableType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Chained => write!(f, "chained"),
            Self::OpenAddressing => write!(f, "open"),
        }
    }
}

impl FromStr for TableType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "chained" | "chaining" => Ok(Self::Chained),
            "open" | "open-addressing" | "oa" => Ok(Self::OpenAddressing),
            _ => Err(Error::invalid_argument(
                "table_type",
                format!("unknown table type {s:?}"),
            )),
        }
    }
}

/// Table configuration builder
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Number of buckets (chained) or slots (open addressing) to start with
    pub initial_capacity: usize,

    /// Ratio of items to capacity that triggers a rehash, in (0, 1]
    pub load_factor: f32,

    /// Hash function
    pub hash_type: HashType,

    /// Probe sequence, only used by open addressing
    pub probe_type: ProbeType,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
            hash_type: HashType::default(),
            probe_type: ProbeType::default(),
        }
    }
}

impl Config {
    /// Initializes a new config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial number of buckets or slots.
    ///
    /// Must be positive.
    ///
    /// Defaults to 8.
    #[must_use]
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Sets the load factor.
    ///
    /// Once the number of items exceeds `capacity * load_factor`,
    /// the table doubles its capacity. Must be in (0, 1].
    ///
    /// Defaults to 0.75.
    #[must_use]
    pub fn load_factor(mut self, load_factor: f32) -> Self {
        self.load_factor = load_factor;
        self
    }

    /// Sets the hash function.
    ///
    /// Defaults to [`HashType::Division`].
    #[must_use]
    pub fn hash_type(mut self, hash_type: HashType) -> Self {
        self.hash_type = hash_type;
        self
    }

    /// Sets the probe sequence of open-addressing tables.
    ///
    /// Defaults to [`ProbeType::Linear`].
    #[must_use]
    pub fn probe_type(mut self, probe_type: ProbeType) -> Self {
        self.probe_type = probe_type;
        self
    }

    /// Checks the construction parameters.
    ///
    /// # Errors
    ///
    /// Will return `Err` naming the parameter if the initial capacity is zero or
    /// the load factor is outside (0, 1].
    pub fn validate(&self) -> crate::Result<()> {
        if self.initial_capacity == 0 {
            return Err(Error::invalid_argument(
                "initial_capacity",
                format!("illegal initial capacity: {}", self.initial_capacity),
            ));
        }

        // NOTE: also rejects NaN
        if !(self.load_factor > 0.0 && self.load_factor <= 1.0) {
            return Err(Error::invalid_argument(
                "load_factor",
                format!("illegal load factor: {}", self.load_factor),
            ));
        }

        Ok(())
    }

    /// Opens a separate-chaining table.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the configuration is invalid.
    pub fn open_chained<K: RawHash + Eq, V: PartialEq>(&self) -> crate::Result<ChainedTable<K, V>> {
        ChainedTable::open(self)
    }

    /// Opens an open-addressing table.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the configuration is invalid.
    pub fn open_addressed<K: RawHash + Eq, V: PartialEq>(&self) -> crate::Result<OpenTable<K, V>> {
        OpenTable::open(self)
    }

    /// Opens a table of the given type.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the configuration is invalid.
    pub fn open<K: RawHash + Eq, V: PartialEq>(
        &self,
        table_type: TableType,
    ) -> crate::Result<AnyTable<K, V>> {
        Ok(match table_type {
            TableType::Chained => AnyTable::Chained(self.open_chained()?),
            TableType::OpenAddressing => AnyTable::Open(self.open_addressed()?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AbstractTable;
    use test_log::test;

    #[test]
    fn config_defaults() -> crate::Result<()> {
        let table = Config::new().open_chained::<i32, i32>()?;
        assert_eq!(8, table.capacity());
        assert!((table.load_factor() - 0.75).abs() < f32::EPSILON);
        assert_eq!(HashType::Division, table.hash_type());

        let table = Config::new().open_addressed::<i32, i32>()?;
        assert_eq!(ProbeType::Linear, table.probe_type());

        Ok(())
    }

    #[test]
    fn config_rejects_zero_capacity() {
        let result = Config::new().initial_capacity(0).open_chained::<i32, i32>();
        assert!(matches!(
            result,
            Err(Error::InvalidArgument {
                name: "initial_capacity",
                ..
            })
        ));
    }

    #[test]
    fn config_rejects_load_factor() {
        for load_factor in [0.0, -0.5, 1.01, f32::NAN] {
            let result = Config::new().load_factor(load_factor).open_addressed::<i32, i32>();
            assert!(matches!(
                result,
                Err(Error::InvalidArgument {
                    name: "load_factor",
                    ..
                })
            ));
        }

        assert!(Config::new().load_factor(1.0).validate().is_ok());
    }

    #[test]
    fn config_open_any() -> crate::Result<()> {
        let table = Config::new().open::<i32, i32>(TableType::OpenAddressing)?;
        assert_eq!(TableType::OpenAddressing, table.table_type());
        assert_eq!(None, table.max_chain_size());

        let table = Config::new().open::<i32, i32>(TableType::Chained)?;
        assert_eq!(TableType::Chained, table.table_type());
        assert_eq!(Some(0), table.max_chain_size());

        assert_eq!(TableType::OpenAddressing, "oa".parse::<TableType>()?);

        Ok(())
    }
}
