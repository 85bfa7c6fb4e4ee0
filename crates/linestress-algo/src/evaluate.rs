//! Batch evaluation: validate → normalize → synthesize → rate → classify.
//!
//! Only structural problems (empty set, duplicate or blank ids, non-finite
//! environment) abort an evaluation. Everything else is repaired per line and
//! reported in [`StressReport::diagnostics`].

use std::collections::BTreeMap;
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use linestress_core::{
    Diagnostics, Environment, FlowSource, IssueKind, Line, LineSet, RatingMethod, SeverityBand,
    StrategyKind, StressOutcome, StressResult,
};

use crate::classify::{classify, stress_ratio};
use crate::config::EngineConfig;
use crate::rating::{RatingInput, RatingRegistry};
use crate::synth::FlowSynthesizer;

/// Output of one evaluation, one result per input line in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StressReport {
    pub requested: StrategyKind,
    /// True when flows were synthesized for the whole batch
    pub synthetic_flows: bool,
    pub results: Vec<StressResult>,
    pub diagnostics: Diagnostics,
}

impl StressReport {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn get(&self, line_id: &str) -> Option<&StressResult> {
        self.results.iter().find(|r| r.line_id == line_id)
    }

    /// Number of lines per band; every band is present, possibly with 0
    pub fn band_counts(&self) -> BTreeMap<SeverityBand, usize> {
        let mut counts: BTreeMap<SeverityBand, usize> =
            SeverityBand::ALL.iter().map(|b| (*b, 0)).collect();
        for result in &self.results {
            *counts.entry(result.severity).or_default() += 1;
        }
        counts
    }

    pub fn max_stress(&self) -> f64 {
        self.results
            .iter()
            .map(|r| r.stress_ratio)
            .fold(0.0, f64::max)
    }

    pub fn overloaded(&self) -> impl Iterator<Item = &StressResult> {
        self.results.iter().filter(|r| r.is_overloaded())
    }

    pub fn count_by_method(&self, method: RatingMethod) -> usize {
        self.results.iter().filter(|r| r.method == method).count()
    }
}

/// A line after value-level repairs.
struct PreparedLine<'a> {
    line: &'a Line,
    nominal_rating: f64,
    flow: Option<f64>,
}

/// Reusable evaluator: configuration plus registered rating strategies.
#[derive(Debug, Clone)]
pub struct StressEngine {
    registry: Arc<RatingRegistry>,
    config: EngineConfig,
}

impl StressEngine {
    /// Engine with the bundled strategies
    pub fn new(config: EngineConfig) -> StressOutcome<Self> {
        let registry = Arc::new(RatingRegistry::with_defaults(&config));
        Self::with_registry(config, registry)
    }

    pub fn with_registry(
        config: EngineConfig,
        registry: Arc<RatingRegistry>,
    ) -> StressOutcome<Self> {
        config.validate()?;
        Ok(Self { registry, config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &RatingRegistry {
        &self.registry
    }

    /// Validate `lines` into a [`LineSet`] and evaluate it
    pub fn evaluate_lines(
        &self,
        lines: Vec<Line>,
        env: &Environment,
        kind: StrategyKind,
    ) -> StressOutcome<StressReport> {
        let lines = LineSet::new(lines)?;
        self.evaluate(&lines, env, kind)
    }

    pub fn evaluate(
        &self,
        lines: &LineSet,
        env: &Environment,
        kind: StrategyKind,
    ) -> StressOutcome<StressReport> {
        env.validate()?;
        let mut diagnostics = Diagnostics::new();

        let env = self.normalize_environment(env, &mut diagnostics);
        let prepared = self.prepare_lines(lines, &mut diagnostics);

        let synthetic_flows = prepared
            .iter()
            .all(|p| p.flow.map_or(true, |f| f == 0.0));
        let flows: Vec<f64> = if synthetic_flows {
            let ratings: Vec<f64> = prepared.iter().map(|p| p.nominal_rating).collect();
            debug!("no measured flows; synthesizing {} line flows", ratings.len());
            FlowSynthesizer::new(self.config.synthesis.clone()).synthesize(&ratings, &env)
        } else {
            prepared.iter().map(|p| p.flow.unwrap_or(0.0)).collect()
        };
        let flow_source = if synthetic_flows {
            FlowSource::Synthetic
        } else {
            FlowSource::Measured
        };

        let plan = self.registry.plan(kind, lines.any_conductor_geometry());
        diagnostics.extend(plan.notes.iter().cloned());
        debug!(
            "rating {} lines: requested={}, primary={}, fallback={}",
            prepared.len(),
            kind,
            plan.primary_method(),
            plan.fallback
                .as_ref()
                .map_or(RatingMethod::Unrated, |s| s.method())
        );

        let rate_one = |(p, flow): (&PreparedLine<'_>, &f64)| {
            let input = RatingInput {
                line: p.line,
                nominal_rating: p.nominal_rating,
            };
            let rating = plan.rate_line(&input, &env);
            let stress = stress_ratio(*flow, rating.value);
            let result = StressResult {
                line_id: p.line.id.clone(),
                dynamic_rating: rating.value,
                flow: *flow,
                stress_ratio: stress,
                severity: classify(stress),
                method: rating.method,
                flow_source,
            };
            (result, rating.issues)
        };

        #[cfg(feature = "parallel")]
        let rated: Vec<_> = prepared
            .par_iter()
            .zip(flows.par_iter())
            .map(rate_one)
            .collect();
        #[cfg(not(feature = "parallel"))]
        let rated: Vec<_> = prepared.iter().zip(flows.iter()).map(rate_one).collect();

        let mut results = Vec::with_capacity(rated.len());
        let mut line_issues = Vec::new();
        for (result, issues) in rated {
            results.push(result);
            line_issues.extend(issues);
        }

        let mut methods_used: Vec<RatingMethod> = Vec::new();
        for result in &results {
            if !methods_used.contains(&result.method) {
                methods_used.push(result.method);
            }
        }
        diagnostics.extend(plan.environment_issues(&env, &methods_used));
        diagnostics.extend(line_issues);

        let report = StressReport {
            requested: kind,
            synthetic_flows,
            results,
            diagnostics,
        };
        debug!(
            "evaluated {} lines: max stress {:.1}%, {} overloaded, {}",
            report.len(),
            report.max_stress(),
            report.overloaded().count(),
            report.diagnostics.summary()
        );
        Ok(report)
    }

    fn normalize_environment(
        &self,
        env: &Environment,
        diagnostics: &mut Diagnostics,
    ) -> Environment {
        let mut env = env.clone();
        if env.wind_speed_mps < 0.0 {
            let message = format!("negative wind speed {} m/s treated as calm", env.wind_speed_mps);
            warn!("{}", message);
            diagnostics.add_warning(IssueKind::DegenerateEnvironment, &message);
            env.wind_speed_mps = 0.0;
        }
        env
    }

    fn prepare_lines<'a>(
        &self,
        lines: &'a LineSet,
        diagnostics: &mut Diagnostics,
    ) -> Vec<PreparedLine<'a>> {
        let default_rating = self.config.default_nominal_rating;
        lines
            .iter()
            .map(|line| {
                let nominal_rating = match line.nominal_rating {
                    Some(r) if r.is_finite() && r > 0.0 => r,
                    other => {
                        let message = match other {
                            Some(r) => {
                                format!("nominal rating {} replaced by default {}", r, default_rating)
                            }
                            None => {
                                format!("missing nominal rating replaced by default {}", default_rating)
                            }
                        };
                        diagnostics.add_warning_with_entity(
                            IssueKind::InvalidLineData,
                            &message,
                            &line.id,
                        );
                        default_rating
                    }
                };

                let flow = match line.nominal_flow {
                    Some(f) if !f.is_finite() => {
                        diagnostics.add_warning_with_entity(
                            IssueKind::InvalidLineData,
                            &format!("non-finite flow {} treated as absent", f),
                            &line.id,
                        );
                        None
                    }
                    Some(f) if f < 0.0 => {
                        diagnostics.add_warning_with_entity(
                            IssueKind::InvalidLineData,
                            &format!("negative flow {} taken by magnitude", f),
                            &line.id,
                        );
                        Some(-f)
                    }
                    other => other,
                };

                PreparedLine {
                    line,
                    nominal_rating,
                    flow,
                }
            })
            .collect()
    }
}

/// One-shot evaluation with the bundled strategies.
///
/// # Example
///
/// ```rust
/// use linestress_algo::{evaluate, EngineConfig};
/// use linestress_core::{Environment, Line, SeverityBand, StrategyKind};
///
/// let report = evaluate(
///     vec![Line::new("L1", 200.0).with_flow(150.0)],
///     &Environment::new(25.0, 0.0),
///     StrategyKind::Simplified,
///     &EngineConfig::default(),
/// )
/// .unwrap();
///
/// assert_eq!(report.results[0].severity, SeverityBand::CautionHigh);
/// ```
pub fn evaluate(
    lines: Vec<Line>,
    env: &Environment,
    kind: StrategyKind,
    config: &EngineConfig,
) -> StressOutcome<StressReport> {
    StressEngine::new(config.clone())?.evaluate_lines(lines, env, kind)
}
