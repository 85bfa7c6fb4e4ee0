//! Property tests for rating and classification.

use linestress_algo::config::ConductorDefaults;
use linestress_algo::{evaluate, stress_ratio, AmpacityModel, EngineConfig, Ieee738, SimplifiedRating};
use linestress_core::{
    CoarseBand, CollapseScheme, Environment, Line, SeverityBand, StrategyKind, STRESS_CEILING,
};
use proptest::prelude::*;

fn simplified(nominal: f64, temp: f64, wind: f64) -> f64 {
    SimplifiedRating::default().dynamic_rating(nominal, &Environment::new(temp, wind))
}

fn ieee738_amps(temp: f64, wind: f64) -> f64 {
    let conductor = ConductorDefaults::default().resolve(None);
    Ieee738
        .steady_state_rating(&conductor, &Environment::new(temp, wind))
        .unwrap()
        .value()
}

proptest! {
    #[test]
    fn simplified_rating_positive_and_finite(
        nominal in 1.0f64..2000.0,
        temp in -40.0f64..120.0,
        wind in -5.0f64..30.0,
    ) {
        let rating = simplified(nominal, temp, wind);
        prop_assert!(rating.is_finite());
        prop_assert!(rating > 0.0);
        if temp >= 75.0 {
            prop_assert_eq!(rating, 1e-3);
        }
    }

    #[test]
    fn simplified_rating_monotone(
        nominal in 1.0f64..2000.0,
        temp in -40.0f64..74.0,
        dt in 0.0f64..20.0,
        wind in 0.0f64..20.0,
        dw in 0.0f64..10.0,
    ) {
        prop_assert!(simplified(nominal, temp + dt, wind) <= simplified(nominal, temp, wind));
        prop_assert!(simplified(nominal, temp, wind + dw) >= simplified(nominal, temp, wind));
    }

    #[test]
    fn stress_stays_in_range(flow in prop::num::f64::ANY, rating in prop::num::f64::ANY) {
        let stress = stress_ratio(flow, rating);
        prop_assert!((0.0..=STRESS_CEILING).contains(&stress));
    }

    #[test]
    fn zero_flow_is_zero_stress_for_any_rating(rating in prop::num::f64::ANY) {
        prop_assert_eq!(stress_ratio(0.0, rating), 0.0);
    }

    #[test]
    fn collapse_schemes_are_monotone(a in 0.0f64..250.0, b in 0.0f64..250.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        for scheme in [CollapseScheme::NodeAggregation, CollapseScheme::MapOverlay] {
            prop_assert!(scheme.classify(lo) <= scheme.classify(hi));
        }
        prop_assert!(SeverityBand::from_ratio(lo) <= SeverityBand::from_ratio(hi));
    }

    #[test]
    fn overload_is_always_critical_when_collapsed(stress in 100.0f64..200.0) {
        prop_assert_eq!(SeverityBand::from_ratio(stress), SeverityBand::CriticalOverload);
        prop_assert_eq!(CollapseScheme::NodeAggregation.classify(stress), CoarseBand::Critical);
        prop_assert_eq!(CollapseScheme::MapOverlay.classify(stress), CoarseBand::Critical);
    }

    #[test]
    fn ieee738_grows_with_wind(temp in -10.0f64..45.0, wind in 0.0f64..15.0, dw in 0.1f64..5.0) {
        prop_assert!(ieee738_amps(temp, wind + dw) >= ieee738_amps(temp, wind));
    }

    #[test]
    fn ieee738_drops_with_temperature(temp in -10.0f64..40.0, dt in 0.5f64..5.0, wind in 0.5f64..10.0) {
        prop_assert!(ieee738_amps(temp + dt, wind) < ieee738_amps(temp, wind));
    }

    #[test]
    fn one_result_per_line_in_order(
        rows in prop::collection::vec((1.0f64..500.0, -100.0f64..600.0), 1..40),
        temp in -20.0f64..90.0,
        wind in 0.0f64..15.0,
    ) {
        let lines: Vec<Line> = rows
            .iter()
            .enumerate()
            .map(|(i, (rating, flow))| Line::new(format!("L{}", i), *rating).with_flow(*flow))
            .collect();
        let report = evaluate(
            lines,
            &Environment::new(temp, wind),
            StrategyKind::Simplified,
            &EngineConfig::default(),
        )
        .unwrap();

        prop_assert_eq!(report.len(), rows.len());
        for (i, result) in report.results.iter().enumerate() {
            prop_assert_eq!(&result.line_id, &format!("L{}", i));
            prop_assert!((0.0..=STRESS_CEILING).contains(&result.stress_ratio));
            prop_assert_eq!(result.severity, SeverityBand::from_ratio(result.stress_ratio));
        }
    }
}
