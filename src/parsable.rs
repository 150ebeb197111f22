// Copyright (c) 2026-present, hashkit
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::{AbstractTable, AnyTable, Error, IdGenerator, RawHash, Snapshot};
use std::{
    fmt::Display,
    fs::File,
    io::{BufRead, BufReader},
    ops::{Deref, DerefMut},
    path::Path,
};

/// Builds a key or value from its text form
pub type Constructor<T> = Box<dyn Fn(&str) -> crate::Result<T>>;

/// Outcome of a bulk load
///
/// Loading stops at the first failure; everything inserted before it stays
/// in the table.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Lines inserted
    pub inserted: usize,

    /// Blank lines skipped
    pub skipped: usize,

    /// The failure that stopped the load, if any
    pub error: Option<Error>,
}

impl LoadReport {
    /// Returns `true` if every line was consumed.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// A table that builds its keys and values from text
///
/// Wraps an [`AnyTable`] together with injected key and value constructors,
/// and derefs to the wrapped table for everything else.
///
/// # Examples
///
/// ```
/// # use hashkit::{AbstractTable, Config, IdGenerator, ParsableTable};
/// let table = Config::new().open_chained::<String, u32>()?;
///
/// let mut table = ParsableTable::<String, u32>::new(table)
///     .with_key_constructor(|text| Ok(text.to_owned()))
///     .with_value_constructor(|text| {
///         text.parse().map_err(|e| hashkit::Error::parse(text, format!("{e}")))
///     });
///
/// let report = table.load_from_lines(["1", "", "2"], &IdGenerator::default());
/// assert_eq!(2, report.inserted);
/// assert_eq!(Some(&1), table.get(&"TA100".to_owned()));
/// # Ok::<(), hashkit::Error>(())
/// ```
pub struct ParsableTable<K: RawHash + Eq, V: PartialEq> {
    table: AnyTable<K, V>,
    key_constructor: Option<Constructor<K>>,
    value_constructor: Option<Constructor<V>>,
}

impl<K, V> std::fmt::Debug for ParsableTable<K, V>
where
    K: RawHash + Eq + std::fmt::Debug,
    V: PartialEq + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParsableTable")
            .field("table", &self.table)
            .field("key_constructor", &self.key_constructor.is_some())
            .field("value_constructor", &self.value_constructor.is_some())
            .finish()
    }
}

impl<K: RawHash + Eq, V: PartialEq> Deref for ParsableTable<K, V> {
    type Target = AnyTable<K, V>;

    fn deref(&self) -> &Self::Target {
        &self.table
    }
}

impl<K: RawHash + Eq, V: PartialEq> DerefMut for ParsableTable<K, V> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.table
    }
}

impl<K: RawHash + Eq, V: PartialEq> ParsableTable<K, V> {
    /// Wraps a table, without any constructors.
    pub fn new(table: impl Into<AnyTable<K, V>>) -> Self {
        Self {
            table: table.into(),
            key_constructor: None,
            value_constructor: None,
        }
    }

    /// Sets the key constructor.
    #[must_use]
    pub fn with_key_constructor(mut self, f: impl Fn(&str) -> crate::Result<K> + 'static) -> Self {
        self.key_constructor = Some(Box::new(f));
        self
    }

    /// Sets the value constructor.
    #[must_use]
    pub fn with_value_constructor(
        mut self,
        f: impl Fn(&str) -> crate::Result<V> + 'static,
    ) -> Self {
        self.value_constructor = Some(Box::new(f));
        self
    }

    /// Unwraps the inner table.
    #[must_use]
    pub fn into_inner(self) -> AnyTable<K, V> {
        self.table
    }

    /// Builds the key and value from text and inserts them.
    ///
    /// # Errors
    ///
    /// Will return `Err` if a constructor is missing, if either text is blank,
    /// or if a constructor rejects its text.
    pub fn put_str(&mut self, key_text: &str, value_text: &str) -> crate::Result<Option<V>> {
        let Some(key_constructor) = &self.key_constructor else {
            return Err(Error::MissingConstructor("key"));
        };
        let Some(value_constructor) = &self.value_constructor else {
            return Err(Error::MissingConstructor("value"));
        };

        if key_text.trim().is_empty() {
            return Err(Error::invalid_argument("key", "key text is blank"));
        }
        if value_text.trim().is_empty() {
            return Err(Error::invalid_argument("value", "value text is blank"));
        }

        let key = key_constructor(key_text)?;
        let value = value_constructor(value_text)?;

        Ok(self.table.put(key, value))
    }

    /// Clears the table and inserts one value per non-blank line, each under
    /// a freshly generated key.
    pub fn load_from_lines<I, S>(&mut self, lines: I, ids: &IdGenerator) -> LoadReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.table.clear();
        self.consume(lines.into_iter().map(Ok), ids)
    }

    /// Like [`ParsableTable::load_from_lines`], reading from a buffered reader.
    ///
    /// An I/O error stops the load and is returned in the report.
    pub fn load_from_reader(&mut self, reader: impl BufRead, ids: &IdGenerator) -> LoadReport {
        self.table.clear();
        self.consume(reader.lines(), ids)
    }

    /// Like [`ParsableTable::load_from_lines`], reading from a file.
    ///
    /// A file that cannot be opened is reported, never fatal.
    /// An empty path does nothing.
    pub fn load(&mut self, path: impl AsRef<Path>, ids: &IdGenerator) -> LoadReport {
        let path = path.as_ref();

        if path.as_os_str().is_empty() {
            return LoadReport::default();
        }

        self.table.clear();

        match File::open(path) {
            Ok(file) => {
                log::debug!("Loading table from {}", path.display());
                self.consume(BufReader::new(file).lines(), ids)
            }
            Err(e) => {
                log::warn!("Could not open {}: {e}", path.display());
                LoadReport {
                    error: Some(e.into()),
                    ..Default::default()
                }
            }
        }
    }

    fn consume<S: AsRef<str>>(
        &mut self,
        lines: impl Iterator<Item = std::io::Result<S>>,
        ids: &IdGenerator,
    ) -> LoadReport {
        let mut report = LoadReport::default();

        for (idx, line) in lines.enumerate() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    log::warn!("Bulk load stopped at line {}: {e}", idx + 1);
                    report.error = Some(e.into());
                    break;
                }
            };

            let text = line.as_ref().trim();
            if text.is_empty() {
                report.skipped += 1;
                continue;
            }

            if let Err(e) = self.put_str(&ids.next(), text) {
                log::warn!("Bulk load stopped at line {}: {e}", idx + 1);
                report.error = Some(e);
                break;
            }

            report.inserted += 1;
        }

        log::debug!(
            "Bulk load inserted {} items, skipped {} blank lines",
            report.inserted,
            report.skipped,
        );

        report
    }
}

impl<K, V> ParsableTable<K, V>
where
    K: RawHash + Eq + Display,
    V: PartialEq + Display,
{
    /// Captures the bucket grid of the wrapped table.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of(&self.table)
    }
}
