//! CSV ingestion for the raw candy table.

use std::fs::File;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::column::{Column, Float64Column, Int64Column, StringColumn};
use crate::error::Result;
use crate::table::Table;

/// One raw row of the candy CSV, in file column order.
#[derive(Debug, Clone, Deserialize)]
pub struct CandyRecord {
    pub competitorname: String,
    pub chocolate: i64,
    pub fruity: i64,
    pub caramel: i64,
    pub peanutyalmondy: i64,
    pub nougat: i64,
    pub crispedricewafer: i64,
    pub hard: i64,
    pub bar: i64,
    pub pluribus: i64,
    pub sugarpercent: f64,
    pub pricepercent: f64,
    pub winpercent: f64,
}

/// Read the candy CSV into a typed table.
///
/// Expects a header row; fields are trimmed. Schema problems (missing or
/// non-numeric fields) surface as CSV errors from deserialization.
pub fn read_candy_csv<P: AsRef<Path>>(path: P) -> Result<Table> {
    let file = File::open(path.as_ref())?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut records = Vec::new();
    for result in reader.deserialize() {
        let record: CandyRecord = result?;
        records.push(record);
    }
    debug!(
        "loaded {} candy records from {}",
        records.len(),
        path.as_ref().display()
    );
    table_from_records(&records)
}

/// Build the typed table from deserialized records, preserving the raw
/// schema's column order.
pub fn table_from_records(records: &[CandyRecord]) -> Result<Table> {
    let mut table = Table::new();
    table.add_column(
        "competitorname",
        Column::String(StringColumn::new(
            records.iter().map(|r| r.competitorname.clone()).collect(),
        )),
    )?;

    let int_columns: [(&str, fn(&CandyRecord) -> i64); 9] = [
        ("chocolate", |r| r.chocolate),
        ("fruity", |r| r.fruity),
        ("caramel", |r| r.caramel),
        ("peanutyalmondy", |r| r.peanutyalmondy),
        ("nougat", |r| r.nougat),
        ("crispedricewafer", |r| r.crispedricewafer),
        ("hard", |r| r.hard),
        ("bar", |r| r.bar),
        ("pluribus", |r| r.pluribus),
    ];
    for (name, getter) in int_columns {
        table.add_column(
            name,
            Column::Int64(Int64Column::new(records.iter().map(getter).collect())),
        )?;
    }

    let float_columns: [(&str, fn(&CandyRecord) -> f64); 3] = [
        ("sugarpercent", |r| r.sugarpercent),
        ("pricepercent", |r| r.pricepercent),
        ("winpercent", |r| r.winpercent),
    ];
    for (name, getter) in float_columns {
        table.add_column(
            name,
            Column::Float64(Float64Column::new(records.iter().map(getter).collect())),
        )?;
    }

    Ok(table)
}
