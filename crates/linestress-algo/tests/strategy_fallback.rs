//! Batch-level strategy selection and degradation.

use std::sync::Arc;

use linestress_algo::{EngineConfig, PhysicalRating, RatingRegistry, StressEngine};
use linestress_core::{
    ConductorGeometry, Environment, IssueKind, Line, LineSet, RatingMethod, SeverityBand,
    StrategyKind,
};

fn lines() -> LineSet {
    LineSet::new(vec![
        Line::new("L1", 200.0)
            .with_flow(150.0)
            .with_conductor(ConductorGeometry {
                diameter_mm: Some(18.82),
                ..ConductorGeometry::default()
            }),
        Line::new("L2", 300.0).with_flow(120.0),
    ])
    .unwrap()
}

fn engine_with(registry: RatingRegistry) -> StressEngine {
    StressEngine::with_registry(EngineConfig::default(), Arc::new(registry)).unwrap()
}

#[test]
fn physical_without_model_uses_simplified_for_whole_batch() {
    let config = EngineConfig::default();
    let mut registry = RatingRegistry::with_defaults(&config);
    registry.register(Arc::new(PhysicalRating::without_model(&config)));

    let report = engine_with(registry)
        .evaluate(&lines(), &Environment::new(25.0, 0.0), StrategyKind::Physical)
        .unwrap();

    assert_eq!(report.count_by_method(RatingMethod::Simplified), 2);
    assert!((report.results[0].stress_ratio - 75.0).abs() < 1e-9);
    assert_eq!(
        report
            .diagnostics
            .issues_of_kind(IssueKind::StrategyUnavailable)
            .count(),
        1
    );
}

#[test]
fn no_strategy_gives_neutral_output() {
    let report = engine_with(RatingRegistry::new())
        .evaluate(&lines(), &Environment::new(25.0, 0.0), StrategyKind::Auto)
        .unwrap();

    for result in &report.results {
        assert_eq!(result.dynamic_rating, 0.0);
        assert_eq!(result.stress_ratio, 0.0);
        assert_eq!(result.severity, SeverityBand::Nominal);
        assert_eq!(result.method, RatingMethod::Unrated);
    }
    assert_eq!(report.diagnostics.warning_count(), 1);
}

#[test]
fn auto_uses_physical_when_geometry_present() {
    let report = StressEngine::new(EngineConfig::default())
        .unwrap()
        .evaluate(&lines(), &Environment::new(25.0, 1.0), StrategyKind::Auto)
        .unwrap();

    // Geometry on one line switches the whole batch to the physical model
    assert_eq!(report.count_by_method(RatingMethod::Physical), 2);
}

#[test]
fn auto_without_geometry_stays_simplified() {
    let lines = LineSet::new(vec![Line::new("L1", 200.0).with_flow(150.0)]).unwrap();
    let report = StressEngine::new(EngineConfig::default())
        .unwrap()
        .evaluate(&lines, &Environment::new(25.0, 0.0), StrategyKind::Auto)
        .unwrap();
    assert_eq!(report.results[0].method, RatingMethod::Simplified);
}

#[test]
fn physical_failure_above_conductor_limit() {
    // 85 °C ambient exceeds the 80 °C conductor limit: physical fails per
    // line, Auto falls back to the floored simplified rating
    let report = StressEngine::new(EngineConfig::default())
        .unwrap()
        .evaluate(&lines(), &Environment::new(85.0, 0.0), StrategyKind::Auto)
        .unwrap();

    assert_eq!(report.count_by_method(RatingMethod::Simplified), 2);
    assert_eq!(
        report
            .diagnostics
            .issues_of_kind(IssueKind::RatingComputationFailure)
            .count(),
        2
    );
    assert_eq!(
        report
            .diagnostics
            .issues_of_kind(IssueKind::DegenerateEnvironment)
            .count(),
        1
    );
    assert!(report.results.iter().all(|r| r.is_overloaded()));
}
