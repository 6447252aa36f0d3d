//! The stateful candy dataset transformer.
//!
//! [`CandyProcessor`] owns a working table and a pristine post-derivation
//! snapshot. Construction loads the raw rows and derives the normalized
//! score columns plus the composite desirability metric; every later
//! operation mutates the working table in place and returns the processor
//! for chaining, and [`CandyProcessor::reset`] restores the snapshot.

use std::path::Path;

use log::{debug, info};

use crate::column::{Column, Float64Column, Int64Column};
use crate::error::{Error, Result};
use crate::ml::clustering::AgglomerativeClustering;
use crate::ml::preprocessing::{min_max_normalize, StandardScaler};
use crate::table::Table;

/// The nine ingredient-presence predictor columns, fixed order.
const PREDICTOR_COLUMNS: [&str; 9] = [
    "chocolate",
    "fruity",
    "hard",
    "nougat",
    "crispedricewafer",
    "peanutyalmondy",
    "caramel",
    "bar",
    "pluribus",
];

/// Name of the label column appended by clustering.
pub const CLUSTER_COLUMN: &str = "Cluster";

/// Stateful transformer over the candy table.
#[derive(Debug)]
pub struct CandyProcessor {
    /// Working table, mutated by every chained operation
    table: Table,
    /// Post-derivation snapshot restored by reset
    pristine: Table,
    /// Weight of cheapness vs popularity in the desirability metric
    price_percent_weight: f64,
}

impl CandyProcessor {
    /// Build a processor from a raw table and a price weight in [0, 1].
    ///
    /// Derives `winpercent_norm`, `pricepercent_norm`, and `desirability`
    /// (the weighted geometric mean of cheapness and popularity) and
    /// snapshots the result. Weight 0 reduces desirability to pure
    /// popularity, weight 1 to pure cheapness.
    pub fn new(raw: Table, price_percent_weight: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&price_percent_weight) {
            return Err(Error::WeightOutOfRange(price_percent_weight));
        }
        if raw.row_count() == 0 {
            return Err(Error::EmptyTable(
                "cannot derive scores from an empty table".to_string(),
            ));
        }

        let mut table = raw;
        let win_norm = normalized_column(&table, "winpercent")?;
        let price_norm = normalized_column(&table, "pricepercent")?;

        let w = price_percent_weight;
        let desirability: Vec<f64> = win_norm
            .iter()
            .zip(price_norm.iter())
            .map(|(&wn, &pn)| (1.0 - pn).powf(w) * wn.powf(1.0 - w))
            .collect();

        table.replace_or_add_column(
            "winpercent_norm",
            Column::Float64(Float64Column::new(win_norm)),
        )?;
        table.replace_or_add_column(
            "pricepercent_norm",
            Column::Float64(Float64Column::new(price_norm)),
        )?;
        table.replace_or_add_column(
            "desirability",
            Column::Float64(Float64Column::new(desirability)),
        )?;

        let pristine = table.clone();
        info!(
            "derived scores for {} rows (price weight {})",
            table.row_count(),
            price_percent_weight
        );
        Ok(CandyProcessor {
            table,
            pristine,
            price_percent_weight,
        })
    }

    /// Build a processor straight from the candy CSV
    pub fn from_csv<P: AsRef<Path>>(path: P, price_percent_weight: f64) -> Result<Self> {
        let table = crate::io::read_candy_csv(path)?;
        Self::new(table, price_percent_weight)
    }

    /// The current working table
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// The configured price weight
    pub fn price_percent_weight(&self) -> f64 {
        self.price_percent_weight
    }

    /// The fixed list of ingredient predictor column names
    pub fn predictor_column_names() -> [&'static str; 9] {
        PREDICTOR_COLUMNS
    }

    /// Stable sort of the working table by raw `winpercent`.
    ///
    /// `ascending = false` puts the most popular products first; ties
    /// keep their original relative order.
    pub fn sort_by_popularity(&mut self, ascending: bool) -> Result<&mut Self> {
        let win = self
            .table
            .column("winpercent")?
            .as_f64_vec()
            .ok_or_else(|| Error::NonNumericColumn("winpercent".to_string()))?;
        let mut order: Vec<usize> = (0..win.len()).collect();
        if ascending {
            order.sort_by(|&a, &b| win[a].total_cmp(&win[b]));
        } else {
            order.sort_by(|&a, &b| win[b].total_cmp(&win[a]));
        }
        self.table.reorder_rows(&order)?;
        Ok(self)
    }

    /// Destructive projection onto the nine ingredient columns.
    ///
    /// Row set and order are unchanged; every other column is gone from
    /// the working table until reset. Fails without mutating if any of
    /// the nine columns is absent.
    pub fn filter_to_ingredient_columns(&mut self) -> Result<&mut Self> {
        let projected = self.table.select(&PREDICTOR_COLUMNS)?;
        self.table = projected;
        Ok(self)
    }

    /// Standardize every numeric column of the working table.
    ///
    /// Selects integer and float columns in table order, z-scores each
    /// independently (zero mean, unit population variance), and returns
    /// the row-major matrix. Does not mutate the working table.
    pub fn standardized_numeric_matrix(&self) -> Result<Vec<Vec<f64>>> {
        let numeric = self.table.numeric_column_names();
        if numeric.is_empty() {
            return Err(Error::EmptyTable(
                "no numeric columns to standardize".to_string(),
            ));
        }
        debug!("standardizing {} numeric columns", numeric.len());
        let mut scaler = StandardScaler::new(numeric);
        scaler.fit_transform(&self.table)
    }

    /// Split the working table into feature columns and a target column.
    ///
    /// The target must not appear in the feature list; any name missing
    /// from the table is a lookup error.
    pub fn split_features_target(
        &self,
        feature_columns: &[&str],
        target_column: &str,
    ) -> Result<(Table, Column)> {
        if feature_columns.iter().any(|&f| f == target_column) {
            return Err(Error::TargetInFeatures(target_column.to_string()));
        }
        let features = self.table.select(feature_columns)?;
        let target = self.table.column(target_column)?.clone();
        Ok((features, target))
    }

    /// Restore the working table to the post-derivation snapshot.
    /// Idempotent.
    pub fn reset(&mut self) -> &mut Self {
        self.table = self.pristine.clone();
        self
    }

    /// Cluster on every current working-table column.
    ///
    /// All current columns become numeric coordinates, so callers
    /// normally project to the ingredient columns first. A non-numeric
    /// column in the table is a fatal error; prefer
    /// [`CandyProcessor::cluster_on`] to name the coordinates explicitly.
    pub fn cluster(&mut self, n_clusters: usize) -> Result<&mut Self> {
        let names: Vec<String> = self.table.column_names().to_vec();
        let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
        self.cluster_on(&name_refs, n_clusters)
    }

    /// Ward hierarchical clustering on an explicit set of coordinate
    /// columns.
    ///
    /// Partitions the rows into exactly `n_clusters` groups and appends
    /// (or overwrites) the integer `Cluster` column with 1-based labels,
    /// numbered in order of first appearance by row index. The working
    /// table is only touched once the full assignment is computed.
    pub fn cluster_on(
        &mut self,
        coordinate_columns: &[&str],
        n_clusters: usize,
    ) -> Result<&mut Self> {
        let rows = self.coordinate_rows(coordinate_columns)?;
        let mut model = AgglomerativeClustering::new(n_clusters);
        model.fit(&rows)?;

        let labels: Vec<i64> = model.labels().iter().map(|&l| l as i64).collect();
        self.table
            .replace_or_add_column(CLUSTER_COLUMN, Column::Int64(Int64Column::new(labels)))?;
        Ok(self)
    }

    /// Gather the named columns into row-major coordinates, rejecting
    /// non-numeric columns and non-finite values.
    fn coordinate_rows(&self, columns: &[&str]) -> Result<Vec<Vec<f64>>> {
        if columns.is_empty() {
            return Err(Error::EmptyTable(
                "no coordinate columns for clustering".to_string(),
            ));
        }
        let mut matrix = vec![Vec::with_capacity(columns.len()); self.table.row_count()];
        for &name in columns {
            let column = self.table.column(name)?;
            let values = column
                .as_f64_vec()
                .ok_or_else(|| Error::NonNumericColumn(name.to_string()))?;
            for (row, &value) in values.iter().enumerate() {
                if !value.is_finite() {
                    return Err(Error::NonFiniteValue {
                        column: name.to_string(),
                        row,
                    });
                }
                matrix[row].push(value);
            }
        }
        Ok(matrix)
    }
}

/// Min-max normalize a required numeric column of the table.
fn normalized_column(table: &Table, name: &str) -> Result<Vec<f64>> {
    let column = table.column(name)?;
    let values = column
        .as_f64_vec()
        .ok_or_else(|| Error::NonNumericColumn(name.to_string()))?;
    min_max_normalize(name, &Float64Column::new(values))
}
