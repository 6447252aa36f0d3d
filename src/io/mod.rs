//! Input handling for the candy dataset.

pub mod csv;

pub use csv::{read_candy_csv, table_from_records, CandyRecord};
