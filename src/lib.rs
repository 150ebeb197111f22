// Copyright (c) 2026-present, hashkit
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Instrumented hash tables for teaching and inspection.
//!
//! ##### About
//!
//! This crate exports two hash table engines behind one [`AbstractTable`] API:
//!
//! - [`ChainedTable`] resolves collisions by separate chaining: every bucket owns
//!   a linked chain, new keys are pushed at the head.
//! - [`OpenTable`] resolves collisions by open addressing: a colliding key probes
//!   alternative slots with linear, quadratic or double-hashing steps.
//!
//! Both grow by doubling once `len > capacity * load_factor`, rebuilding themselves
//! by reinserting every live entry. Four bucket-index functions are available
//! (see [`HashType`]).
//!
//! Unlike `std::collections::HashMap`, the tables expose their internals: the
//! longest chain, how often they rehashed, which bucket was touched last, how many
//! buckets are occupied, and a printable [`Snapshot`] of every bucket.
//!
//! [`ParsableTable`] wraps either engine with text constructors for keys and values,
//! and bulk loads one value per line under generated keys (see [`IdGenerator`]).
//!
//! ```
//! use hashkit::{AbstractTable, Config, HashType};
//!
//! let mut table = Config::new()
//!     .initial_capacity(4)
//!     .hash_type(HashType::Multiplication)
//!     .open_chained::<u32, &str>()?;
//!
//! table.put(1, "a");
//! table.put(2, "b");
//! table.put(3, "c");
//! table.put(4, "d");
//!
//! assert_eq!(Some(&"c"), table.get(&3));
//! assert_eq!(8, table.capacity());
//! assert_eq!(1, table.rehash_count());
//! # Ok::<(), hashkit::Error>(())
//! ```

#![deny(clippy::all, missing_docs)]
#![deny(clippy::unwrap_used)]
#![warn(clippy::pedantic, clippy::nursery)]
#![warn(clippy::expect_used)]
#![allow(clippy::missing_const_for_fn)]
#![warn(clippy::multiple_crate_versions)]
#![allow(clippy::option_if_let_else)]
#![warn(clippy::redundant_feature_names)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod any_table;

mod r#abstract;

mod chained;

/// Configuration
pub mod config;

mod entry;
mod error;

/// Raw hashes and bucket index functions
pub mod hash;

mod id;
mod open;
mod parsable;

/// Probe sequences of open addressing
pub mod probe;

mod snapshot;
mod stats;

pub use {
    any_table::AnyTable,
    chained::ChainedTable,
    config::{Config, TableType},
    entry::Entry,
    error::{Error, Result},
    hash::{bucket_index, HashType, RawHash},
    id::IdGenerator,
    open::{OpenTable, Slot},
    parsable::{Constructor, LoadReport, ParsableTable},
    probe::ProbeType,
    r#abstract::AbstractTable,
    snapshot::{Snapshot, ARROW},
    stats::TableStats,
};
