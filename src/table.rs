//! Column-oriented result table.
//!
//! The runner accumulates every completed record into a `Table`: one column
//! per field name ever observed, one entry per completed experiment, in the
//! order experiments completed within their dispatch batch. The same type is
//! both the in-flight accumulator and the final result handed back from
//! `run()`.

use crate::value::Value;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Insertion-ordered mapping from column name to column values.
///
/// # Ragged columns
///
/// `append` does not validate column lengths. An experiment function that
/// sets different field sets across calls produces columns of unequal
/// length, and a column first seen mid-run starts at its own index zero
/// rather than at the row that introduced it, so it ends up misaligned with
/// earlier rows. This is a known defect of the permissive merge, kept
/// because rejecting it would change observable behavior; keeping the field
/// set consistent across calls is the caller's responsibility.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<(String, Vec<Value>)>,
}

impl Table {
    /// Create an empty table with no columns.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table with the given columns pre-registered as empty.
    ///
    /// The runner pre-registers parameter-name columns so column presence
    /// and ordering are deterministic even when zero experiments run.
    #[must_use]
    pub fn with_columns<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: names.into_iter().map(|n| (n.into(), Vec::new())).collect(),
        }
    }

    /// Append a value to the named column, creating the column if this is
    /// the first time the name appears.
    pub fn append(&mut self, name: &str, value: Value) {
        match self.columns.iter_mut().find(|(n, _)| n == name) {
            Some((_, col)) => col.push(value),
            None => self.columns.push((name.to_string(), vec![value])),
        }
    }

    /// Get a column's values by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, col)| col.as_slice())
    }

    /// Column names in the order columns were registered.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    /// Number of rows: the length of the longest column.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.columns.iter().map(|(_, col)| col.len()).max().unwrap_or(0)
    }

    /// Number of columns.
    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Whether the table holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    /// Iterate over rows. Each row yields one cell per column, in column
    /// order; `None` marks a cell a short column has no entry for.
    pub fn rows(&self) -> impl Iterator<Item = Vec<Option<&Value>>> {
        (0..self.num_rows()).map(move |i| self.columns.iter().map(|(_, col)| col.get(i)).collect())
    }

    /// Write the table as CSV: a header row of column names, then one line
    /// per row, no index column. Cells missing from short columns render
    /// empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = csv::Writer::from_path(path.as_ref())?;
        writer.write_record(self.column_names())?;
        for row in self.rows() {
            writer.write_record(
                row.iter()
                    .map(|cell| cell.map_or_else(String::new, ToString::to_string)),
            )?;
        }
        writer.flush()?;
        Ok(())
    }
}
