//! Typed column storage for the candy table.
//!
//! Three concrete column types cover the dataset: floats for the score
//! columns, integers for the 0/1 ingredient flags and cluster labels,
//! strings for the product name.

use crate::error::{Error, Result};

/// A column of 64-bit floats.
#[derive(Debug, Clone, PartialEq)]
pub struct Float64Column {
    data: Vec<f64>,
}

impl Float64Column {
    /// Create a new Float64Column
    pub fn new(data: Vec<f64>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get a value by position
    pub fn get(&self, index: usize) -> Option<f64> {
        self.data.get(index).copied()
    }

    pub fn values(&self) -> &[f64] {
        &self.data
    }

    /// Minimum value (errors on an empty column)
    pub fn min(&self) -> Result<f64> {
        if self.data.is_empty() {
            return Err(Error::EmptyTable(
                "cannot take the minimum of an empty column".to_string(),
            ));
        }
        Ok(self.data.iter().copied().fold(f64::INFINITY, f64::min))
    }

    /// Maximum value (errors on an empty column)
    pub fn max(&self) -> Result<f64> {
        if self.data.is_empty() {
            return Err(Error::EmptyTable(
                "cannot take the maximum of an empty column".to_string(),
            ));
        }
        Ok(self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max))
    }

    /// Arithmetic mean (errors on an empty column)
    pub fn mean(&self) -> Result<f64> {
        if self.data.is_empty() {
            return Err(Error::EmptyTable(
                "cannot take the mean of an empty column".to_string(),
            ));
        }
        Ok(self.data.iter().sum::<f64>() / self.data.len() as f64)
    }

    /// Population standard deviation, matching scikit-learn's StandardScaler
    pub fn std(&self) -> Result<f64> {
        let mean = self.mean()?;
        let var = self
            .data
            .iter()
            .map(|&v| (v - mean).powi(2))
            .sum::<f64>()
            / self.data.len() as f64;
        Ok(var.sqrt())
    }
}

/// A column of 64-bit integers.
#[derive(Debug, Clone, PartialEq)]
pub struct Int64Column {
    data: Vec<i64>,
}

impl Int64Column {
    /// Create a new Int64Column
    pub fn new(data: Vec<i64>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get a value by position
    pub fn get(&self, index: usize) -> Option<i64> {
        self.data.get(index).copied()
    }

    pub fn values(&self) -> &[i64] {
        &self.data
    }
}

/// A column of strings.
#[derive(Debug, Clone, PartialEq)]
pub struct StringColumn {
    data: Vec<String>,
}

impl StringColumn {
    /// Create a new StringColumn
    pub fn new(data: Vec<String>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get a value by position
    pub fn get(&self, index: usize) -> Option<&str> {
        self.data.get(index).map(|s| s.as_str())
    }

    pub fn values(&self) -> &[String] {
        &self.data
    }
}

/// A single table column of any supported type.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Float64(Float64Column),
    Int64(Int64Column),
    String(StringColumn),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Float64(col) => col.len(),
            Column::Int64(col) => col.len(),
            Column::String(col) => col.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the column holds integer or float data
    pub fn is_numeric(&self) -> bool {
        matches!(self, Column::Float64(_) | Column::Int64(_))
    }

    /// View as a float column, if it is one
    pub fn as_float64(&self) -> Option<&Float64Column> {
        match self {
            Column::Float64(col) => Some(col),
            _ => None,
        }
    }

    /// View as an integer column, if it is one
    pub fn as_int64(&self) -> Option<&Int64Column> {
        match self {
            Column::Int64(col) => Some(col),
            _ => None,
        }
    }

    /// View as a string column, if it is one
    pub fn as_string(&self) -> Option<&StringColumn> {
        match self {
            Column::String(col) => Some(col),
            _ => None,
        }
    }

    /// Numeric values widened to f64; None for string columns
    pub fn as_f64_vec(&self) -> Option<Vec<f64>> {
        match self {
            Column::Float64(col) => Some(col.values().to_vec()),
            Column::Int64(col) => Some(col.values().iter().map(|&v| v as f64).collect()),
            Column::String(_) => None,
        }
    }

    /// Gather rows at the given positions into a new column.
    ///
    /// Positions must be in range; callers pass permutations they computed
    /// from this column's own length.
    pub(crate) fn take_indices(&self, indices: &[usize]) -> Column {
        match self {
            Column::Float64(col) => Column::Float64(Float64Column::new(
                indices.iter().map(|&i| col.values()[i]).collect(),
            )),
            Column::Int64(col) => Column::Int64(Int64Column::new(
                indices.iter().map(|&i| col.values()[i]).collect(),
            )),
            Column::String(col) => Column::String(StringColumn::new(
                indices.iter().map(|&i| col.values()[i].clone()).collect(),
            )),
        }
    }
}
