//! Strategy registry and per-batch rating plans.

use std::sync::Arc;

use linestress_core::{
    DiagnosticIssue, Environment, IssueKind, RatingMethod, StrategyKind,
};
use tracing::warn;

use super::{
    preference_order, PhysicalRating, RatingError, RatingInput, RatingStrategy, SimplifiedRating,
};
use crate::config::EngineConfig;

/// Holds the registered rating strategies, at most one per [`RatingMethod`].
///
/// Create with `RatingRegistry::new()` for empty or
/// `RatingRegistry::with_defaults()` for the bundled strategies.
#[derive(Default, Clone)]
pub struct RatingRegistry {
    strategies: Vec<Arc<dyn RatingStrategy>>,
}

impl std::fmt::Debug for RatingRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RatingRegistry")
            .field("strategies", &self.list())
            .finish()
    }
}

impl RatingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the closed-form strategy and the physical strategy backed by
    /// the bundled heat-balance model.
    pub fn with_defaults(config: &EngineConfig) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(SimplifiedRating::new(config.rating.clone())));
        registry.register(Arc::new(PhysicalRating::from_config(config)));
        registry
    }

    /// Register a strategy, replacing any previous one for the same method.
    pub fn register(&mut self, strategy: Arc<dyn RatingStrategy>) {
        let method = strategy.method();
        self.strategies.retain(|s| s.method() != method);
        self.strategies.push(strategy);
    }

    pub fn get(&self, method: RatingMethod) -> Option<Arc<dyn RatingStrategy>> {
        self.strategies.iter().find(|s| s.method() == method).cloned()
    }

    /// List all strategy IDs in registration order.
    pub fn list(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.id()).collect()
    }

    fn available(&self, method: RatingMethod) -> Option<Arc<dyn RatingStrategy>> {
        self.get(method).filter(|s| s.is_available())
    }

    /// Resolve the strategies used for one batch.
    ///
    /// - `Simplified`: closed form only
    /// - `Physical`: physical only, no per-line fallback; when no physical
    ///   strategy can run, the whole batch drops to closed form
    /// - `Auto`: the first available strategy in preference order (physical
    ///   first when any line carries geometry), with the next one as a
    ///   per-line fallback
    ///
    /// When nothing can run the plan is empty and every line ends up unrated.
    pub fn plan(&self, kind: StrategyKind, has_geometry: bool) -> RatingPlan {
        let order = preference_order(kind, has_geometry);
        let mut usable = order.iter().filter_map(|m| self.available(*m));
        let primary = usable.next();
        let fallback = match kind {
            StrategyKind::Auto => usable.next(),
            _ => None,
        };

        let mut notes = Vec::new();
        match &primary {
            None => {
                let message = format!(
                    "no usable rating strategy for '{}' (registered: {}); all lines left unrated",
                    kind,
                    self.list().join(", ")
                );
                warn!("{}", message);
                notes.push(DiagnosticIssue::new(IssueKind::StrategyUnavailable, message));
            }
            Some(p) if kind == StrategyKind::Physical && p.method() != RatingMethod::Physical => {
                let message = format!(
                    "physical rating unavailable; batch rated with '{}' instead",
                    p.id()
                );
                warn!("{}", message);
                notes.push(DiagnosticIssue::new(IssueKind::StrategyUnavailable, message));
            }
            Some(_) => {}
        }

        RatingPlan {
            primary,
            fallback,
            notes,
        }
    }
}

/// Outcome of rating one line under a plan.
#[derive(Debug, Clone, PartialEq)]
pub struct LineRating {
    /// Dynamic rating; 0 when every strategy failed
    pub value: f64,
    pub method: RatingMethod,
    pub issues: Vec<DiagnosticIssue>,
}

impl LineRating {
    fn unrated(issues: Vec<DiagnosticIssue>) -> Self {
        Self {
            value: 0.0,
            method: RatingMethod::Unrated,
            issues,
        }
    }
}

/// Primary strategy plus optional per-line fallback for one batch.
#[derive(Clone)]
pub struct RatingPlan {
    pub primary: Option<Arc<dyn RatingStrategy>>,
    pub fallback: Option<Arc<dyn RatingStrategy>>,
    /// Batch-level notes produced while planning
    pub notes: Vec<DiagnosticIssue>,
}

impl std::fmt::Debug for RatingPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RatingPlan")
            .field("primary", &self.primary.as_ref().map(|s| s.id().to_string()))
            .field("fallback", &self.fallback.as_ref().map(|s| s.id().to_string()))
            .field("notes", &self.notes)
            .finish()
    }
}

impl RatingPlan {
    pub fn is_empty(&self) -> bool {
        self.primary.is_none()
    }

    pub fn primary_method(&self) -> RatingMethod {
        self.primary
            .as_ref()
            .map_or(RatingMethod::Unrated, |s| s.method())
    }

    /// Rate one line. Failures are contained here: the result is always a
    /// rating (possibly 0) plus the warnings explaining it.
    pub fn rate_line(&self, input: &RatingInput<'_>, env: &Environment) -> LineRating {
        let Some(primary) = &self.primary else {
            return LineRating::unrated(Vec::new());
        };
        let id = &input.line.id;

        let first_error = match primary.rate(input, env) {
            Ok(value) => {
                return LineRating {
                    value,
                    method: primary.method(),
                    issues: Vec::new(),
                }
            }
            Err(e) => e,
        };

        let mut issues = vec![failure_issue(primary.as_ref(), id, &first_error)];
        warn!("line {}: {} rating failed: {}", id, primary.id(), first_error);

        let Some(fallback) = &self.fallback else {
            return LineRating::unrated(issues);
        };
        match fallback.rate(input, env) {
            Ok(value) => LineRating {
                value,
                method: fallback.method(),
                issues,
            },
            Err(e) => {
                warn!("line {}: fallback {} rating failed: {}", id, fallback.id(), e);
                issues.push(failure_issue(fallback.as_ref(), id, &e));
                LineRating::unrated(issues)
            }
        }
    }

    /// Batch-level environment observations from the strategies that rated
    /// at least one line.
    pub fn environment_issues(
        &self,
        env: &Environment,
        methods_used: &[RatingMethod],
    ) -> Vec<DiagnosticIssue> {
        let mut issues = Vec::new();
        for strategy in self.primary.iter().chain(self.fallback.iter()) {
            if methods_used.contains(&strategy.method()) {
                issues.extend(strategy.environment_issues(env));
            }
        }
        issues
    }
}

fn failure_issue(strategy: &dyn RatingStrategy, line_id: &str, error: &RatingError) -> DiagnosticIssue {
    DiagnosticIssue::new(
        IssueKind::RatingComputationFailure,
        format!("{} rating failed: {}", strategy.id(), error),
    )
    .with_entity(line_id)
}
