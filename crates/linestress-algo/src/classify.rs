//! Stress ratios and severity bands.

use linestress_core::{RatioScale, SeverityBand, STRESS_CEILING};
use serde::Serialize;

/// Utilization in percent, clamped to `[0, STRESS_CEILING]`.
///
/// A non-positive rating (a failed or missing rating) and any NaN
/// intermediate both give 0.
pub fn stress_ratio(flow: f64, dynamic_rating: f64) -> f64 {
    if !(dynamic_rating > 0.0) {
        return 0.0;
    }
    clamp_percent(flow / dynamic_rating * 100.0)
}

/// Clamp a percentage into the reported range; NaN becomes 0
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, STRESS_CEILING)
    }
}

pub fn classify(stress_percent: f64) -> SeverityBand {
    SeverityBand::from_ratio(stress_percent)
}

/// Stress values produced elsewhere, rescaled onto the percent scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRatios {
    /// Scale detected for the whole batch
    pub scale: RatioScale,
    pub percent: Vec<f64>,
}

impl NormalizedRatios {
    pub fn bands(&self) -> impl Iterator<Item = SeverityBand> + '_ {
        self.percent.iter().map(|p| classify(*p))
    }
}

/// Detect fractions vs. percentages once for the batch, then rescale and
/// clamp every value.
pub fn normalize_external(values: &[f64]) -> NormalizedRatios {
    let scale = RatioScale::detect(values);
    let percent = values
        .iter()
        .map(|v| clamp_percent(scale.to_percent(*v)))
        .collect();
    NormalizedRatios { scale, percent }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stress_ratio_basic() {
        assert!((stress_ratio(150.0, 200.0) - 75.0).abs() < 1e-12);
        assert_eq!(stress_ratio(0.0, 200.0), 0.0);
    }

    #[test]
    fn test_failed_rating_gives_zero_stress() {
        assert_eq!(stress_ratio(150.0, 0.0), 0.0);
        assert_eq!(stress_ratio(150.0, -1.0), 0.0);
        assert_eq!(stress_ratio(150.0, f64::NAN), 0.0);
    }

    #[test]
    fn test_ceiling_and_floor() {
        assert_eq!(stress_ratio(150.0, 1e-3), STRESS_CEILING);
        assert_eq!(stress_ratio(-10.0, 100.0), 0.0);
        assert_eq!(stress_ratio(f64::NAN, 100.0), 0.0);
        assert_eq!(stress_ratio(f64::INFINITY, 100.0), STRESS_CEILING);
    }

    #[test]
    fn test_fraction_batch_rescaled_once() {
        let normalized = normalize_external(&[0.2, 0.95, 1.1]);
        assert_eq!(normalized.scale, RatioScale::Fraction);
        assert!((normalized.percent[1] - 95.0).abs() < 1e-9);
        let bands: Vec<_> = normalized.bands().collect();
        assert_eq!(
            bands,
            vec![
                SeverityBand::Nominal,
                SeverityBand::Critical,
                SeverityBand::CriticalOverload
            ]
        );
    }

    #[test]
    fn test_percent_batch_untouched() {
        let normalized = normalize_external(&[0.5, 40.0, 250.0, f64::NAN]);
        assert_eq!(normalized.scale, RatioScale::Percent);
        assert_eq!(normalized.percent, vec![0.5, 40.0, STRESS_CEILING, 0.0]);
    }
}
