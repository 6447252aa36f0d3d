use thiserror::Error;

/// Error type covering every failure mode of the candy pipeline
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("duplicate column name: {0}")]
    DuplicateColumnName(String),

    #[error("inconsistent row count: expected {expected}, found {found}")]
    InconsistentRowCount { expected: usize, found: usize },

    #[error("empty table: {0}")]
    EmptyTable(String),

    #[error("price weight out of range: {0} (expected a value in [0, 1])")]
    WeightOutOfRange(f64),

    #[error("target column '{0}' also appears in the feature list")]
    TargetInFeatures(String),

    #[error("invalid cluster count: {requested} (table has {rows} rows)")]
    InvalidClusterCount { requested: usize, rows: usize },

    #[error("column '{name}' is degenerate: {context}")]
    DegenerateColumn { name: String, context: String },

    #[error("column '{0}' is not numeric")]
    NonNumericColumn(String),

    #[error("non-finite value in column '{column}' at row {row}")]
    NonFiniteValue { column: String, row: usize },
}

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, Error>;
