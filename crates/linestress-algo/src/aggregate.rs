//! Per-bus stress: the worst stress among lines touching each bus.

use std::collections::BTreeMap;

use linestress_core::{CoarseBand, CollapseScheme, LineSet, StressResult};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusStress {
    pub bus: String,
    /// Highest stress (percent) of any incident line
    pub max_stress: f64,
    pub line_count: usize,
    pub band: CoarseBand,
}

/// Aggregate line results onto their endpoint buses, sorted by bus id.
///
/// Results are matched to lines by id; lines without endpoints are skipped.
pub fn aggregate_by_bus(
    results: &[StressResult],
    lines: &LineSet,
    scheme: CollapseScheme,
) -> Vec<BusStress> {
    let mut buses: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for result in results {
        let Some(line) = lines.get(&result.line_id) else {
            continue;
        };
        let mut endpoints = [line.from_bus.as_deref(), line.to_bus.as_deref()];
        if endpoints[0] == endpoints[1] {
            endpoints[1] = None;
        }
        for bus in endpoints.into_iter().flatten() {
            let entry = buses.entry(bus).or_insert((0.0, 0));
            entry.0 = entry.0.max(result.stress_ratio);
            entry.1 += 1;
        }
    }

    buses
        .into_iter()
        .map(|(bus, (max_stress, line_count))| BusStress {
            bus: bus.to_string(),
            max_stress,
            line_count,
            band: scheme.classify(max_stress),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use linestress_core::{FlowSource, Line, RatingMethod, SeverityBand};

    fn result(id: &str, stress: f64) -> StressResult {
        StressResult {
            line_id: id.to_string(),
            dynamic_rating: 100.0,
            flow: stress,
            stress_ratio: stress,
            severity: SeverityBand::from_ratio(stress),
            method: RatingMethod::Simplified,
            flow_source: FlowSource::Measured,
        }
    }

    fn lines() -> LineSet {
        LineSet::new(vec![
            Line::new("L1", 100.0).with_endpoints("B1", "B2"),
            Line::new("L2", 100.0).with_endpoints("B2", "B3"),
            Line::new("L3", 100.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_max_of_incident_lines() {
        let buses = aggregate_by_bus(
            &[result("L1", 40.0), result("L2", 95.0), result("L3", 150.0)],
            &lines(),
            CollapseScheme::NodeAggregation,
        );
        let ids: Vec<_> = buses.iter().map(|b| b.bus.as_str()).collect();
        assert_eq!(ids, vec!["B1", "B2", "B3"]);
        assert_eq!(buses[0].band, CoarseBand::Nominal);
        assert_eq!(buses[1].max_stress, 95.0);
        assert_eq!(buses[1].line_count, 2);
        assert_eq!(buses[1].band, CoarseBand::Critical);
    }

    #[test]
    fn test_map_overlay_thresholds() {
        let buses = aggregate_by_bus(
            &[result("L1", 85.0), result("L2", 85.0)],
            &lines(),
            CollapseScheme::MapOverlay,
        );
        assert!(buses.iter().all(|b| b.band == CoarseBand::Caution));
    }

    #[test]
    fn test_unknown_results_ignored() {
        let buses = aggregate_by_bus(
            &[result("missing", 99.0)],
            &lines(),
            CollapseScheme::NodeAggregation,
        );
        assert!(buses.is_empty());
    }
}
