//! An insertion-ordered table of named, typed columns.

use std::collections::HashMap;

use crate::column::Column;
use crate::error::{Error, Result};

/// Record table: named columns in insertion order, all of equal length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: HashMap<String, Column>,
    order: Vec<String>,
    row_count: usize,
}

impl Table {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.order.len()
    }

    /// Column names in insertion order
    pub fn column_names(&self) -> &[String] {
        &self.order
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .get(name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }

    /// Append a new column. The name must be unused and the length must
    /// match the existing rows (the first column fixes the row count).
    pub fn add_column(&mut self, name: impl Into<String>, column: Column) -> Result<()> {
        let name = name.into();
        if self.columns.contains_key(&name) {
            return Err(Error::DuplicateColumnName(name));
        }
        if !self.order.is_empty() && column.len() != self.row_count {
            return Err(Error::InconsistentRowCount {
                expected: self.row_count,
                found: column.len(),
            });
        }
        self.row_count = column.len();
        self.order.push(name.clone());
        self.columns.insert(name, column);
        Ok(())
    }

    /// Replace an existing column in place, or append it if absent
    pub fn replace_or_add_column(
        &mut self,
        name: impl Into<String>,
        column: Column,
    ) -> Result<()> {
        let name = name.into();
        if !self.columns.contains_key(&name) {
            return self.add_column(name, column);
        }
        if column.len() != self.row_count {
            return Err(Error::InconsistentRowCount {
                expected: self.row_count,
                found: column.len(),
            });
        }
        self.columns.insert(name, column);
        Ok(())
    }

    /// Project onto the given columns, in the given order. Row count and
    /// row order are unchanged. Fails without touching `self` if any name
    /// is missing.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Table> {
        let mut projected = Table::new();
        for name in names {
            let name = name.as_ref();
            let column = self.column(name)?.clone();
            projected.add_column(name, column)?;
        }
        // A projection of a non-empty table keeps its row count even when
        // zero columns were requested.
        if projected.order.is_empty() {
            projected.row_count = self.row_count;
        }
        Ok(projected)
    }

    /// Reorder every column's rows by the given permutation
    pub fn reorder_rows(&mut self, permutation: &[usize]) -> Result<()> {
        if permutation.len() != self.row_count {
            return Err(Error::InconsistentRowCount {
                expected: self.row_count,
                found: permutation.len(),
            });
        }
        for name in &self.order {
            let reordered = self.columns[name].take_indices(permutation);
            self.columns.insert(name.clone(), reordered);
        }
        Ok(())
    }

    /// Names of all integer and float columns, in table order
    pub fn numeric_column_names(&self) -> Vec<String> {
        self.order
            .iter()
            .filter(|name| self.columns[*name].is_numeric())
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{Float64Column, Int64Column, StringColumn};

    fn sample_table() -> Table {
        let mut table = Table::new();
        table
            .add_column(
                "name",
                Column::String(StringColumn::new(vec![
                    "a".to_string(),
                    "b".to_string(),
                    "c".to_string(),
                ])),
            )
            .unwrap();
        table
            .add_column("flag", Column::Int64(Int64Column::new(vec![1, 0, 1])))
            .unwrap();
        table
            .add_column(
                "score",
                Column::Float64(Float64Column::new(vec![0.5, 1.5, 2.5])),
            )
            .unwrap();
        table
    }

    #[test]
    fn test_add_column_checks() {
        let mut table = sample_table();
        let err = table
            .add_column("flag", Column::Int64(Int64Column::new(vec![0, 0, 0])))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateColumnName(name) if name == "flag"));

        let err = table
            .add_column("short", Column::Int64(Int64Column::new(vec![0])))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InconsistentRowCount {
                expected: 3,
                found: 1
            }
        ));
    }

    #[test]
    fn test_select_preserves_order_and_rows() {
        let table = sample_table();
        let projected = table.select(&["score", "flag"]).unwrap();
        assert_eq!(projected.column_names(), &["score", "flag"]);
        assert_eq!(projected.row_count(), 3);

        let err = table.select(&["score", "missing"]).unwrap_err();
        assert!(matches!(err, Error::ColumnNotFound(name) if name == "missing"));
    }

    #[test]
    fn test_reorder_rows() {
        let mut table = sample_table();
        table.reorder_rows(&[2, 0, 1]).unwrap();
        let names = table.column("name").unwrap().as_string().unwrap();
        assert_eq!(names.values(), &["c", "a", "b"]);
        let scores = table.column("score").unwrap().as_float64().unwrap();
        assert_eq!(scores.values(), &[2.5, 0.5, 1.5]);
    }

    #[test]
    fn test_numeric_column_names() {
        let table = sample_table();
        assert_eq!(table.numeric_column_names(), vec!["flag", "score"]);
    }
}
