// Copyright (c) 2026-present, hashkit
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use std::sync::{
    atomic::{AtomicU64, Ordering::Acquire, Ordering::Release},
    Arc,
};

/// Default identifier prefix
pub const DEFAULT_ID_PREFIX: &str = "TA";

/// Default first identifier number
pub const DEFAULT_ID_START: u64 = 100;

/// Thread-safe generator of table identifiers
///
/// Hands out `"TA100"`, `"TA101"`, ... Clones share the same counter.
///
/// # Examples
///
/// ```
/// # use hashkit::IdGenerator;
/// let ids = IdGenerator::default();
/// assert_eq!("TA100", ids.next());
/// assert_eq!("TA101", ids.clone().next());
/// assert_eq!("TA102", ids.peek());
/// ```
#[derive(Clone, Debug)]
pub struct IdGenerator {
    prefix: Arc<str>,
    counter: Arc<AtomicU64>,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_ID_PREFIX, DEFAULT_ID_START)
    }
}

impl IdGenerator {
    /// Creates a generator starting at `start`.
    #[must_use]
    pub fn new(prefix: &str, start: u64) -> Self {
        Self {
            prefix: prefix.into(),
            counter: Arc::new(AtomicU64::new(start)),
        }
    }

    /// Gets the would-be-next identifier, without incrementing the counter.
    #[must_use]
    pub fn peek(&self) -> String {
        format!("{}{}", self.prefix, self.counter.load(Acquire))
    }

    /// Gets the next identifier.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn next(&self) -> String {
        let n = self.counter.fetch_add(1, Release);
        format!("{}{n}", self.prefix)
    }
}
