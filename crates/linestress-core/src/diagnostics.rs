//! Per-line diagnostics collected during an evaluation.
//!
//! Degraded lines never abort a batch. Each containment decision (a defaulted
//! rating, a failed ampacity computation, a clamped radicand, a missing
//! strategy) is recorded here as a warning with:
//!
//! - A kind from the fixed evaluation taxonomy
//! - An optional entity reference (the line id)
//!
//! # Example
//!
//! ```
//! use linestress_core::diagnostics::{Diagnostics, IssueKind};
//!
//! let mut diag = Diagnostics::new();
//! diag.add_warning_with_entity(IssueKind::InvalidLineData, "nominal rating missing, using 200", "L7");
//! diag.add_warning(IssueKind::DegenerateEnvironment, "ambient at or above T_max");
//!
//! assert_eq!(diag.warning_count(), 2);
//! assert_eq!(diag.issues_for_entity("L7").count(), 1);
//! ```

use serde::{Deserialize, Serialize};

/// Kinds of containable evaluation problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    /// Missing or non-positive nominal rating, negative or non-finite flow
    InvalidLineData,
    /// Ampacity subroutine failed or returned a non-positive current
    RatingComputationFailure,
    /// Ambient temperature at or above the simplified model's T_max, or a
    /// negative wind speed treated as calm
    DegenerateEnvironment,
    /// A requested rating strategy cannot run
    StrategyUnavailable,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::InvalidLineData => "invalid-line-data",
            IssueKind::RatingComputationFailure => "rating-computation-failure",
            IssueKind::DegenerateEnvironment => "degenerate-environment",
            IssueKind::StrategyUnavailable => "strategy-unavailable",
        }
    }
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single warning recorded during an evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticIssue {
    pub kind: IssueKind,
    pub message: String,
    /// Line id the issue belongs to, `None` for batch-level issues
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub entity: Option<String>,
}

impl DiagnosticIssue {
    pub fn new(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            entity: None,
        }
    }

    /// Add entity reference to the issue
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }
}

impl std::fmt::Display for DiagnosticIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[warning:{}] {}", self.kind, self.message)?;

        if let Some(entity) = &self.entity {
            write!(f, " ({})", entity)?;
        }

        Ok(())
    }
}

/// Collection of diagnostic issues for an evaluation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub issues: Vec<DiagnosticIssue>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw issue directly
    pub fn add(&mut self, issue: DiagnosticIssue) {
        self.issues.push(issue);
    }

    // =========================================================================
    // Warning Methods
    // =========================================================================

    pub fn add_warning(&mut self, kind: IssueKind, message: &str) {
        self.issues.push(DiagnosticIssue::new(kind, message));
    }

    pub fn add_warning_with_entity(&mut self, kind: IssueKind, message: &str, entity: &str) {
        self.issues
            .push(DiagnosticIssue::new(kind, message).with_entity(entity));
    }

    // =========================================================================
    // Query Methods
    // =========================================================================

    pub fn warning_count(&self) -> usize {
        self.issues.len()
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    /// Get issues of one kind
    pub fn issues_of_kind(&self, kind: IssueKind) -> impl Iterator<Item = &DiagnosticIssue> {
        self.issues.iter().filter(move |i| i.kind == kind)
    }

    /// Get issues attached to one line
    pub fn issues_for_entity<'a>(
        &'a self,
        entity: &'a str,
    ) -> impl Iterator<Item = &'a DiagnosticIssue> {
        self.issues
            .iter()
            .filter(move |i| i.entity.as_deref() == Some(entity))
    }

    // =========================================================================
    // Utility Methods
    // =========================================================================

    /// Merge another diagnostics into this one
    pub fn merge(&mut self, other: Diagnostics) {
        self.issues.extend(other.issues);
    }

    pub fn extend(&mut self, issues: impl IntoIterator<Item = DiagnosticIssue>) {
        self.issues.extend(issues);
    }

    pub fn summary(&self) -> String {
        match self.warning_count() {
            0 => "No issues".to_string(),
            1 => "1 warning".to_string(),
            w => format!("{} warnings", w),
        }
    }
}

impl std::fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Diagnostics: {}", self.summary())?;
        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }
        Ok(())
    }
}
