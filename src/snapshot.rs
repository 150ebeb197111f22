// Copyright (c) 2026-present, hashkit
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::AbstractTable;
use std::fmt::Display;

/// Separator between a bucket label and its entries
pub const ARROW: &str = "➔";

/// Printable grid of a table's buckets
///
/// One row per bucket or slot, laid out as
/// `["[ i ]", "➔", "k=v", "➔", "k=v", ...]` with entries head first.
/// Empty buckets have just the label.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Snapshot {
    rows: Vec<Vec<String>>,
}

impl Snapshot {
    /// Captures the current contents of a table.
    pub fn of<K, V, T>(table: &T) -> Self
    where
        K: Display,
        V: Display,
        T: AbstractTable<K, V> + ?Sized,
    {
        let rows = (0..table.capacity())
            .map(|idx| {
                let mut row = vec![format!("[ {idx} ]")];
                for entry in table.bucket(idx) {
                    row.push(ARROW.to_owned());
                    row.push(entry.to_string());
                }
                row
            })
            .collect();

        Self { rows }
    }

    /// Returns the grid rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Renders the grid with aligned columns.
    ///
    /// If `delimiter` is non-empty, every cell is cut at the first occurrence
    /// of it (unless it starts the cell).
    #[must_use]
    pub fn render(&self, delimiter: &str) -> String {
        let cut = |cell: &str| -> String {
            if delimiter.is_empty() {
                return cell.to_owned();
            }
            match cell.find(delimiter) {
                Some(pos) if pos > 0 => cell[..pos].to_owned(),
                _ => cell.to_owned(),
            }
        };

        let cells = self
            .rows
            .iter()
            .map(|row| row.iter().map(|cell| cut(cell)).collect::<Vec<_>>())
            .collect::<Vec<_>>();

        let width = |cell: &String| cell.chars().count();

        let label_width = cells
            .iter()
            .filter_map(|row| row.first())
            .map(width)
            .max()
            .unwrap_or(0);

        let entry_width = cells
            .iter()
            .flat_map(|row| row.iter().skip(2).step_by(2))
            .map(width)
            .max()
            .unwrap_or(0);

        let mut out = String::new();

        for row in &cells {
            for (col, cell) in row.iter().enumerate() {
                let text = if col == 0 {
                    format!("{cell:>w$}", w = label_width + 1)
                } else if col % 2 == 1 {
                    format!("{cell:<2}")
                } else {
                    format!("{cell:<w$}", w = entry_width + 1)
                };
                out.push_str(&text);
                out.push(' ');
            }
            out.push('\n');
        }

        out
    }
}

impl Display for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Config, HashType};
    use test_log::test;

    #[test]
    fn snapshot_rows_head_first() -> crate::Result<()> {
        let mut table = Config::new()
            .initial_capacity(4)
            .hash_type(HashType::Division)
            .open_chained::<i32, String>()?;

        table.put(1, "a".into());
        table.put(5, "b".into());
        table.put(2, "c".into());

        let snapshot = Snapshot::of(&table);
        let rows = snapshot.rows();

        assert_eq!(4, rows.len());
        assert_eq!(vec!["[ 0 ]"], rows[0]);
        assert_eq!(vec!["[ 1 ]", ARROW, "5=b", ARROW, "1=a"], rows[1]);
        assert_eq!(vec!["[ 2 ]", ARROW, "2=c"], rows[2]);
        assert_eq!(vec!["[ 3 ]"], rows[3]);

        Ok(())
    }

    #[test]
    fn snapshot_render_aligns() {
        let snapshot = Snapshot {
            rows: vec![
                vec!["[ 9 ]".into()],
                vec!["[ 10 ]".into(), ARROW.into(), "a=1".into(), ARROW.into(), "bb=22".into()],
            ],
        };

        let text = snapshot.render("");
        let lines = text.lines().collect::<Vec<_>>();

        assert_eq!("  [ 9 ] ", lines[0]);
        assert_eq!(" [ 10 ] ➔  a=1    ➔  bb=22  ", lines[1]);
        assert_eq!(text, snapshot.to_string());
    }

    #[test]
    fn snapshot_render_truncates_at_delimiter() {
        let snapshot = Snapshot {
            rows: vec![vec![
                "[ 0 ]".into(),
                ARROW.into(),
                "TA100=Car,Ford,Focus".into(),
                ARROW.into(),
                ",lead=x".into(),
            ]],
        };

        let text = snapshot.render(",");
        assert!(text.contains("TA100=Car "));
        assert!(!text.contains("Ford"));
        assert!(text.contains(",lead=x"));
    }

    #[test]
    fn snapshot_open_table() -> crate::Result<()> {
        let mut table = Config::new().initial_capacity(4).open_addressed::<i32, i32>()?;
        table.put(3, 30);
        table.put(7, 70);

        let snapshot = Snapshot::of(&table);
        assert_eq!(vec!["[ 0 ]", ARROW, "7=70"], snapshot.rows()[0]);
        assert_eq!(vec!["[ 3 ]", ARROW, "3=30"], snapshot.rows()[3]);

        Ok(())
    }
}
