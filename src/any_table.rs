// Copyright (c) 2026-present, hashkit
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::{ChainedTable, OpenTable, RawHash};
use enum_dispatch::enum_dispatch;

/// May be a [`ChainedTable`] or an [`OpenTable`].
#[derive(Debug)]
#[enum_dispatch(AbstractTable<K, V>)]
pub enum AnyTable<K: RawHash + Eq, V: PartialEq> {
    /// Separate chaining, see [`ChainedTable`]
    Chained(ChainedTable<K, V>),

    /// Open addressing, see [`OpenTable`]
    Open(OpenTable<K, V>),
}

impl<K: RawHash + Eq, V: PartialEq> AnyTable<K, V> {
    /// Returns the collision strategy of the table.
    #[must_use]
    pub fn table_type(&self) -> crate::TableType {
        match self {
            Self::Chained(_) => crate::TableType::Chained,
            Self::Open(_) => crate::TableType::OpenAddressing,
        }
    }
}
