//! Header lookup with alternate column names.

use csv::StringRecord;

use crate::error::TableError;

/// One logical column and the header names it may appear under.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Column {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
}

impl Column {
    pub const fn new(name: &'static str, aliases: &'static [&'static str]) -> Self {
        Self { name, aliases }
    }

    /// Position of the first header matching an alias (case-insensitive)
    pub fn find(&self, headers: &StringRecord) -> Option<usize> {
        self.aliases.iter().find_map(|alias| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(alias))
        })
    }

    pub fn require(&self, headers: &StringRecord) -> Result<usize, TableError> {
        self.find(headers).ok_or_else(|| TableError::MissingColumn {
            column: self.name,
            accepted: self.aliases.join(", "),
        })
    }
}

pub(crate) const ID: Column = Column::new("id", &["name", "id", "line_id", "line"]);

/// Text cell; empty and missing cells are `None`
pub(crate) fn text(record: &StringRecord, index: Option<usize>) -> Option<&str> {
    index
        .and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Numeric cell; empty, missing and `nan`/`NaN` cells are `None`
pub(crate) fn number(
    record: &StringRecord,
    index: Option<usize>,
    row: usize,
    column: &str,
) -> Result<Option<f64>, TableError> {
    let Some(raw) = text(record, index) else {
        return Ok(None);
    };
    let value: f64 = raw.parse().map_err(|_| TableError::InvalidNumber {
        row,
        column: column.to_string(),
        value: raw.to_string(),
    })?;
    Ok(Some(value).filter(|v| !v.is_nan()))
}
