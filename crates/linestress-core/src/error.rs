//! Hard errors for stress evaluation.
//!
//! Only structurally invalid input aborts an evaluation. Everything that can
//! be contained at the line level (a defaulted rating, a failed ampacity
//! computation, a degenerate environment) is recorded in
//! [`Diagnostics`](crate::diagnostics::Diagnostics) instead and never reaches
//! this type.
//!
//! # Example
//!
//! ```
//! use linestress_core::{Line, LineSet, StressError, StressOutcome};
//!
//! fn build(lines: Vec<Line>) -> StressOutcome<LineSet> {
//!     let set = LineSet::new(lines)?;
//!     Ok(set)
//! }
//!
//! assert!(matches!(build(Vec::new()), Err(StressError::EmptyLineSet)));
//! assert_eq!(build(vec![Line::new("L1", 200.0)]).unwrap().len(), 1);
//! ```

use thiserror::Error;

/// Errors that abort a whole evaluation.
#[derive(Error, Debug)]
pub enum StressError {
    /// The line collection has no rows
    #[error("line set is empty")]
    EmptyLineSet,

    /// Two rows share the same line identifier
    #[error("duplicate line id '{0}'")]
    DuplicateLineId(String),

    /// A row is malformed beyond what defaulting can repair
    #[error("invalid line at row {row}: {reason}")]
    InvalidLine { row: usize, reason: String },

    /// Environment values that cannot be evaluated (NaN, infinite)
    #[error("invalid environment: {0}")]
    InvalidEnvironment(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for Results using StressError.
pub type StressOutcome<T> = Result<T, StressError>;
