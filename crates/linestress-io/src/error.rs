use thiserror::Error;

/// Problems with the shape or content of an input table.
#[derive(Debug, Error, PartialEq)]
pub enum TableError {
    #[error("missing required column '{column}' (accepted names: {accepted})")]
    MissingColumn {
        column: &'static str,
        accepted: String,
    },

    /// `row` is 1-based and counts data rows, not the header
    #[error("row {row}, column '{column}': cannot parse '{value}' as a number")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error("row {row}: empty line identifier")]
    EmptyId { row: usize },
}
