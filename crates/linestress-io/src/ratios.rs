//! Externally computed stress values, for classification only.
//!
//! ```csv
//! name,stress
//! L1,0.82
//! L2,1.07
//! ```
//!
//! Values may be fractions or percentages; the scale is detected per table.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, Trim};

use crate::columns::{number, text, Column, ID};
use crate::error::TableError;

const STRESS: Column = Column::new(
    "stress",
    &["stress", "stress_ratio", "utilization", "loading"],
);

/// `(id, value)` pairs in table order; empty cells become NaN
pub fn read_stress_values<R: Read>(reader: R) -> Result<Vec<(String, f64)>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);
    let headers = rdr.headers().context("reading stress table header")?.clone();
    let id_col = ID.require(&headers)?;
    let stress_col = STRESS.require(&headers)?;

    let mut values = Vec::new();
    for (index, result) in rdr.records().enumerate() {
        let row = index + 1;
        let record = result.with_context(|| format!("reading stress table row {}", row))?;
        let id = text(&record, Some(id_col)).ok_or(TableError::EmptyId { row })?;
        let value = number(&record, Some(stress_col), row, STRESS.name)?.unwrap_or(f64::NAN);
        values.push((id.to_string(), value));
    }
    Ok(values)
}

pub fn load_stress_csv(path: &Path) -> Result<Vec<(String, f64)>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening stress table: {}", path.display()))?;
    read_stress_values(file).with_context(|| format!("parsing stress table: {}", path.display()))
}
