//! Scaling transforms: min-max normalization and standardization.

use std::collections::HashMap;

use crate::column::Float64Column;
use crate::error::{Error, Result};
use crate::table::Table;

/// Min-max rescaling of a float column onto [0, 1].
///
/// The observed minimum maps to 0 and the maximum to 1. A zero observed
/// range makes the transform undefined and fails fast rather than
/// propagating non-finite values.
pub fn min_max_normalize(name: &str, column: &Float64Column) -> Result<Vec<f64>> {
    let min = column.min()?;
    let max = column.max()?;
    let range = max - min;
    if range == 0.0 {
        return Err(Error::DegenerateColumn {
            name: name.to_string(),
            context: "zero range, min-max normalization is undefined".to_string(),
        });
    }
    Ok(column.values().iter().map(|&v| (v - min) / range).collect())
}

/// Standardizes a set of table columns to zero mean and unit variance.
///
/// Uses the population standard deviation. A zero-variance column fails
/// fast with the same degenerate-column policy as [`min_max_normalize`].
pub struct StandardScaler {
    /// Columns to standardize
    columns: Vec<String>,
    /// Fitted per-column means
    means: HashMap<String, f64>,
    /// Fitted per-column standard deviations
    stds: HashMap<String, f64>,
}

impl StandardScaler {
    /// Create a scaler over the given column names
    pub fn new(columns: Vec<String>) -> Self {
        StandardScaler {
            columns,
            means: HashMap::new(),
            stds: HashMap::new(),
        }
    }

    /// Learn per-column mean and standard deviation from the table
    pub fn fit(&mut self, table: &Table) -> Result<()> {
        if table.row_count() == 0 {
            return Err(Error::EmptyTable(
                "cannot fit a scaler on an empty table".to_string(),
            ));
        }
        for name in &self.columns {
            let column = table.column(name)?;
            let values = column
                .as_f64_vec()
                .ok_or_else(|| Error::NonNumericColumn(name.clone()))?;
            let column = Float64Column::new(values);
            let mean = column.mean()?;
            let std = column.std()?;
            if std == 0.0 {
                return Err(Error::DegenerateColumn {
                    name: name.clone(),
                    context: "zero variance, standardization is undefined".to_string(),
                });
            }
            self.means.insert(name.clone(), mean);
            self.stds.insert(name.clone(), std);
        }
        Ok(())
    }

    /// Produce the standardized matrix, row-major, one column per fitted name
    pub fn transform(&self, table: &Table) -> Result<Vec<Vec<f64>>> {
        let mut scaled_columns = Vec::with_capacity(self.columns.len());
        for name in &self.columns {
            let column = table.column(name)?;
            let values = column
                .as_f64_vec()
                .ok_or_else(|| Error::NonNumericColumn(name.clone()))?;
            let mean = self
                .means
                .get(name)
                .ok_or_else(|| Error::ColumnNotFound(name.clone()))?;
            let std = self
                .stds
                .get(name)
                .ok_or_else(|| Error::ColumnNotFound(name.clone()))?;
            scaled_columns.push(
                values
                    .iter()
                    .map(|&v| (v - mean) / std)
                    .collect::<Vec<f64>>(),
            );
        }

        let rows = table.row_count();
        let mut matrix = vec![vec![0.0; self.columns.len()]; rows];
        for (col_idx, scaled) in scaled_columns.iter().enumerate() {
            for (row_idx, &value) in scaled.iter().enumerate() {
                matrix[row_idx][col_idx] = value;
            }
        }
        Ok(matrix)
    }

    /// Fit, then transform
    pub fn fit_transform(&mut self, table: &Table) -> Result<Vec<Vec<f64>>> {
        self.fit(table)?;
        self.transform(table)
    }
}
