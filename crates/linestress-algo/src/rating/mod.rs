//! Dynamic line rating strategies.
//!
//! This module defines the Strategy pattern used by the evaluator:
//!
//! - **[`RatingStrategy`]**: turns one line plus the environment into a
//!   dynamic rating (closed-form or physical)
//! - **[`AmpacityModel`]**: the numerical heat-balance boundary the physical
//!   strategy delegates to; treated as a pure but fallible function per line
//! - **[`RatingRegistry`]**: registered strategies, queried by method
//! - **[`RatingPlan`]**: primary strategy plus optional per-line fallback,
//!   resolved once per batch from a [`StrategyKind`]

pub mod ieee738;
pub mod physical;
pub mod registry;
pub mod simplified;

pub use ieee738::Ieee738;
pub use physical::PhysicalRating;
pub use registry::{LineRating, RatingPlan, RatingRegistry};
pub use simplified::SimplifiedRating;

use linestress_core::units::Amperes;
use linestress_core::{DiagnosticIssue, Environment, Line, RatingMethod, StrategyKind};
use thiserror::Error;

use crate::config::ConductorParams;

/// Per-line rating failures. These never abort a batch.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RatingError {
    /// The ampacity subroutine could not produce a current
    #[error("ampacity computation failed: {0}")]
    AmpacityFailed(String),

    /// The computation finished but the rating is not usable
    #[error("rating is not positive: {0}")]
    NonPositive(f64),

    /// The strategy cannot run (e.g., no ampacity model installed)
    #[error("strategy unavailable: {0}")]
    Unavailable(String),
}

/// A line with its nameplate rating already normalized.
#[derive(Debug, Clone, Copy)]
pub struct RatingInput<'a> {
    pub line: &'a Line,
    /// Positive nameplate rating after defaulting
    pub nominal_rating: f64,
}

/// Computes a dynamic rating for a single line.
///
/// Implementations must be pure: the same input and environment always give
/// the same rating, and no state is shared between calls.
pub trait RatingStrategy: Send + Sync {
    /// Unique identifier (e.g., "simplified", "physical")
    fn id(&self) -> &str;

    fn method(&self) -> RatingMethod;

    /// Check if this strategy can run at all
    fn is_available(&self) -> bool;

    /// Rate one line; errors are contained at the line level by the caller
    fn rate(&self, input: &RatingInput<'_>, env: &Environment) -> Result<f64, RatingError>;

    /// Batch-level observations about the environment (recorded once per
    /// evaluation, not once per line)
    fn environment_issues(&self, _env: &Environment) -> Vec<DiagnosticIssue> {
        Vec::new()
    }
}

/// Steady-state thermal ampacity of a bare overhead conductor.
pub trait AmpacityModel: Send + Sync {
    /// Unique identifier (e.g., "ieee738")
    fn id(&self) -> &str;

    /// Current at which the conductor reaches `conductor.max_operating_temp_c`
    fn steady_state_rating(
        &self,
        conductor: &ConductorParams,
        env: &Environment,
    ) -> Result<Amperes, RatingError>;
}

/// Strategies registered for a kind, in the order the plan considers them.
pub(crate) fn preference_order(kind: StrategyKind, has_geometry: bool) -> &'static [RatingMethod] {
    match kind {
        StrategyKind::Simplified => &[RatingMethod::Simplified],
        StrategyKind::Physical => &[RatingMethod::Physical, RatingMethod::Simplified],
        StrategyKind::Auto if has_geometry => &[RatingMethod::Physical, RatingMethod::Simplified],
        StrategyKind::Auto => &[RatingMethod::Simplified, RatingMethod::Physical],
    }
}
