//! Stress results, severity bands and rating-strategy selectors.
//!
//! ## Severity bands
//!
//! Bands partition `[0, ∞)` with inclusive lower bounds:
//!
//! | stress ratio (%) | band |
//! |------------------|------|
//! | `>= 100` | [`SeverityBand::CriticalOverload`] |
//! | `[90, 100)` | [`SeverityBand::Critical`] |
//! | `[70, 90)` | [`SeverityBand::CautionHigh`] |
//! | `[50, 70)` | [`SeverityBand::Caution`] |
//! | `< 50` | [`SeverityBand::Nominal`] |
//!
//! Callers that display fewer levels collapse the ratio with a
//! [`CollapseScheme`] instead of re-deriving thresholds.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Upper clamp applied to every stress ratio.
pub const STRESS_CEILING: f64 = 200.0;

/// Five-level stress classification, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeverityBand {
    Nominal,
    Caution,
    CautionHigh,
    Critical,
    CriticalOverload,
}

impl SeverityBand {
    /// All bands in ascending severity
    pub const ALL: [SeverityBand; 5] = [
        SeverityBand::Nominal,
        SeverityBand::Caution,
        SeverityBand::CautionHigh,
        SeverityBand::Critical,
        SeverityBand::CriticalOverload,
    ];

    /// Classify a stress ratio expressed in percent. NaN and negative values
    /// fall into `Nominal`.
    pub fn from_ratio(ratio_percent: f64) -> Self {
        if ratio_percent >= 100.0 {
            SeverityBand::CriticalOverload
        } else if ratio_percent >= 90.0 {
            SeverityBand::Critical
        } else if ratio_percent >= 70.0 {
            SeverityBand::CautionHigh
        } else if ratio_percent >= 50.0 {
            SeverityBand::Caution
        } else {
            SeverityBand::Nominal
        }
    }

    /// Inclusive lower bound of the band in percent
    pub fn lower_bound(self) -> f64 {
        match self {
            SeverityBand::Nominal => 0.0,
            SeverityBand::Caution => 50.0,
            SeverityBand::CautionHigh => 70.0,
            SeverityBand::Critical => 90.0,
            SeverityBand::CriticalOverload => 100.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SeverityBand::Nominal => "nominal",
            SeverityBand::Caution => "caution",
            SeverityBand::CautionHigh => "caution-high",
            SeverityBand::Critical => "critical",
            SeverityBand::CriticalOverload => "critical-overload",
        }
    }
}

impl std::fmt::Display for SeverityBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three-level classification used for node-level and map displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoarseBand {
    Nominal,
    Caution,
    Critical,
}

impl std::fmt::Display for CoarseBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            CoarseBand::Nominal => "nominal",
            CoarseBand::Caution => "caution",
            CoarseBand::Critical => "critical",
        })
    }
}

/// Caller-side collapse of a stress ratio onto [`CoarseBand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollapseScheme {
    /// `< 60` nominal, `[60, 90)` caution, `>= 90` critical
    #[default]
    NodeAggregation,
    /// `< 80` nominal, `[80, 100)` caution, `>= 100` critical
    MapOverlay,
}

impl CollapseScheme {
    /// (caution, critical) lower bounds in percent
    pub fn thresholds(self) -> (f64, f64) {
        match self {
            CollapseScheme::NodeAggregation => (60.0, 90.0),
            CollapseScheme::MapOverlay => (80.0, 100.0),
        }
    }

    pub fn classify(self, ratio_percent: f64) -> CoarseBand {
        let (caution, critical) = self.thresholds();
        if ratio_percent >= critical {
            CoarseBand::Critical
        } else if ratio_percent >= caution {
            CoarseBand::Caution
        } else {
            CoarseBand::Nominal
        }
    }
}

impl FromStr for CollapseScheme {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_ascii_lowercase().as_str() {
            "node" | "node-aggregation" => Ok(CollapseScheme::NodeAggregation),
            "map" | "map-overlay" => Ok(CollapseScheme::MapOverlay),
            other => Err(format!(
                "unknown collapse scheme '{}'; supported values: node, map",
                other
            )),
        }
    }
}

/// How an upstream stress figure is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatioScale {
    /// Utilization fraction, 1.0 = fully loaded
    Fraction,
    /// Percentage, 100.0 = fully loaded
    Percent,
}

impl RatioScale {
    /// Largest value still read as a utilization fraction.
    pub const FRACTION_LIMIT: f64 = 1.5;

    /// Decide the scale once for a whole batch: fractions when every finite
    /// value lies within `[0, 1.5]`.
    pub fn detect(values: &[f64]) -> Self {
        let mut finite = values.iter().filter(|v| v.is_finite()).peekable();
        if finite.peek().is_none() {
            return RatioScale::Percent;
        }
        if finite.all(|v| (0.0..=Self::FRACTION_LIMIT).contains(v)) {
            RatioScale::Fraction
        } else {
            RatioScale::Percent
        }
    }

    pub fn to_percent(self, value: f64) -> f64 {
        match self {
            RatioScale::Fraction => value * 100.0,
            RatioScale::Percent => value,
        }
    }
}

/// Requested rating strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Physical model when possible, simplified otherwise
    #[default]
    Auto,
    Simplified,
    Physical,
}

impl StrategyKind {
    pub fn available() -> &'static [&'static str] {
        &["auto", "simplified", "physical"]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Auto => "auto",
            StrategyKind::Simplified => "simplified",
            StrategyKind::Physical => "physical",
        }
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_ascii_lowercase().as_str() {
            "auto" | "default" => Ok(StrategyKind::Auto),
            "simplified" | "closed-form" => Ok(StrategyKind::Simplified),
            "physical" | "ieee738" | "ieee-738" => Ok(StrategyKind::Physical),
            other => Err(format!(
                "unknown rating strategy '{}'; supported values: {}",
                other,
                StrategyKind::available().join(", ")
            )),
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strategy that actually produced a line's rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingMethod {
    Simplified,
    Physical,
    /// No rating could be produced; the line reports neutral stress
    Unrated,
}

impl std::fmt::Display for RatingMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            RatingMethod::Simplified => "simplified",
            RatingMethod::Physical => "physical",
            RatingMethod::Unrated => "unrated",
        })
    }
}

/// Where a line's flow came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowSource {
    Measured,
    Synthetic,
}

/// One output row per line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressResult {
    pub line_id: String,
    /// Dynamic rating in the line's rating unit; 0 marks a failed rating
    pub dynamic_rating: f64,
    pub flow: f64,
    /// Percent, clamped to `[0, STRESS_CEILING]`
    pub stress_ratio: f64,
    pub severity: SeverityBand,
    pub method: RatingMethod,
    pub flow_source: FlowSource,
}

impl StressResult {
    pub fn is_overloaded(&self) -> bool {
        self.severity == SeverityBand::CriticalOverload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries_lower_inclusive() {
        assert_eq!(SeverityBand::from_ratio(0.0), SeverityBand::Nominal);
        assert_eq!(SeverityBand::from_ratio(49.999), SeverityBand::Nominal);
        assert_eq!(SeverityBand::from_ratio(50.0), SeverityBand::Caution);
        assert_eq!(SeverityBand::from_ratio(70.0), SeverityBand::CautionHigh);
        assert_eq!(SeverityBand::from_ratio(75.0), SeverityBand::CautionHigh);
        assert_eq!(SeverityBand::from_ratio(90.0), SeverityBand::Critical);
        assert_eq!(SeverityBand::from_ratio(99.99), SeverityBand::Critical);
        assert_eq!(SeverityBand::from_ratio(100.0), SeverityBand::CriticalOverload);
        assert_eq!(SeverityBand::from_ratio(200.0), SeverityBand::CriticalOverload);
    }

    #[test]
    fn test_band_degenerate_inputs_are_nominal() {
        assert_eq!(SeverityBand::from_ratio(f64::NAN), SeverityBand::Nominal);
        assert_eq!(SeverityBand::from_ratio(-5.0), SeverityBand::Nominal);
    }

    #[test]
    fn test_lower_bound_classifies_into_own_band() {
        for band in SeverityBand::ALL {
            assert_eq!(SeverityBand::from_ratio(band.lower_bound()), band);
        }
    }

    #[test]
    fn test_band_ordering() {
        assert!(SeverityBand::Nominal < SeverityBand::Caution);
        assert!(SeverityBand::Critical < SeverityBand::CriticalOverload);
    }

    #[test]
    fn test_collapse_schemes() {
        let node = CollapseScheme::NodeAggregation;
        assert_eq!(node.classify(59.9), CoarseBand::Nominal);
        assert_eq!(node.classify(60.0), CoarseBand::Caution);
        assert_eq!(node.classify(90.0), CoarseBand::Critical);

        let map = CollapseScheme::MapOverlay;
        assert_eq!(map.classify(79.0), CoarseBand::Nominal);
        assert_eq!(map.classify(80.0), CoarseBand::Caution);
        assert_eq!(map.classify(100.0), CoarseBand::Critical);
    }

    #[test]
    fn test_ratio_scale_detection() {
        assert_eq!(RatioScale::detect(&[0.2, 0.95, 1.4]), RatioScale::Fraction);
        assert_eq!(RatioScale::detect(&[0.2, 75.0]), RatioScale::Percent);
        assert_eq!(RatioScale::detect(&[]), RatioScale::Percent);
        assert_eq!(RatioScale::detect(&[f64::NAN, 0.5]), RatioScale::Fraction);
        assert_eq!(RatioScale::Fraction.to_percent(0.75), 75.0);
        assert_eq!(RatioScale::Percent.to_percent(75.0), 75.0);
    }

    #[test]
    fn test_strategy_kind_parsing() {
        assert_eq!("auto".parse::<StrategyKind>().unwrap(), StrategyKind::Auto);
        assert_eq!(
            "IEEE738".parse::<StrategyKind>().unwrap(),
            StrategyKind::Physical
        );
        assert_eq!(
            "simplified".parse::<StrategyKind>().unwrap(),
            StrategyKind::Simplified
        );
        assert!("quadratic".parse::<StrategyKind>().is_err());
    }

    #[test]
    fn test_severity_serde_names() {
        let json = serde_json::to_string(&SeverityBand::CautionHigh).unwrap();
        assert_eq!(json, "\"caution-high\"");
    }
}
