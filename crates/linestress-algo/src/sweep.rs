//! Re-evaluate one line set over a grid of temperatures and wind speeds.

use std::collections::BTreeMap;

use linestress_core::{Environment, LineSet, SeverityBand, StrategyKind, StressOutcome};
use serde::Serialize;

use crate::evaluate::StressEngine;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepPoint {
    pub ambient_temperature_c: f64,
    pub wind_speed_mps: f64,
    pub band_counts: BTreeMap<SeverityBand, usize>,
    pub max_stress: f64,
    pub synthetic_flows: bool,
}

impl SweepPoint {
    pub fn count(&self, band: SeverityBand) -> usize {
        self.band_counts.get(&band).copied().unwrap_or(0)
    }
}

/// Evaluate every `(temperature, wind)` pair, temperatures outermost.
///
/// `base_env` supplies the extended fields; its temperature and wind are
/// replaced at each grid point. Any hard error aborts the sweep.
pub fn sweep(
    engine: &StressEngine,
    lines: &LineSet,
    base_env: &Environment,
    temperatures: &[f64],
    winds: &[f64],
    kind: StrategyKind,
) -> StressOutcome<Vec<SweepPoint>> {
    let mut points = Vec::with_capacity(temperatures.len() * winds.len());
    for &temperature in temperatures {
        for &wind in winds {
            let env = Environment {
                ambient_temperature_c: temperature,
                wind_speed_mps: wind,
                extended: base_env.extended.clone(),
            };
            let report = engine.evaluate(lines, &env, kind)?;
            points.push(SweepPoint {
                ambient_temperature_c: temperature,
                wind_speed_mps: wind,
                band_counts: report.band_counts(),
                max_stress: report.max_stress(),
                synthetic_flows: report.synthetic_flows,
            });
        }
    }
    Ok(points)
}

/// `steps` evenly spaced values from `start` to `end` inclusive
pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![start],
        n => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}
