//! Closed-form temperature/wind derating.
//!
//! ```text
//! rating = nominal · √((T_max − T_amb) / (T_max − T_ref)) · (1 + k_wind · v_wind)
//! ```
//!
//! At or above `T_max` the radicand is clamped to zero instead of taking a
//! negative root, so the rating collapses onto `rating_floor`.

use linestress_core::{DiagnosticIssue, Environment, IssueKind, RatingMethod};

use super::{RatingError, RatingInput, RatingStrategy};
use crate::config::RatingConstants;

#[derive(Debug, Clone, Default)]
pub struct SimplifiedRating {
    constants: RatingConstants,
}

impl SimplifiedRating {
    pub fn new(constants: RatingConstants) -> Self {
        Self { constants }
    }

    pub fn constants(&self) -> &RatingConstants {
        &self.constants
    }

    /// Temperature derating factor in `[0, ∞)`; zero at or above `T_max`
    pub fn temperature_factor(&self, ambient_c: f64) -> f64 {
        let c = &self.constants;
        ((c.t_max_c - ambient_c) / (c.t_max_c - c.t_ref_c))
            .max(0.0)
            .sqrt()
    }

    /// Wind uplift factor, `>= 1` for non-negative wind
    pub fn wind_factor(&self, wind_mps: f64) -> f64 {
        1.0 + self.constants.k_wind * wind_mps.max(0.0)
    }

    /// Rating for a nameplate value, clamped to the positive floor
    pub fn dynamic_rating(&self, nominal_rating: f64, env: &Environment) -> f64 {
        let rating = nominal_rating
            * self.temperature_factor(env.ambient_temperature_c)
            * self.wind_factor(env.wind_speed_mps);
        // f64::max ignores NaN, so a NaN product also lands on the floor
        rating.max(self.constants.rating_floor)
    }

    pub fn is_degenerate(&self, env: &Environment) -> bool {
        env.ambient_temperature_c >= self.constants.t_max_c
    }
}

impl RatingStrategy for SimplifiedRating {
    fn id(&self) -> &str {
        "simplified"
    }

    fn method(&self) -> RatingMethod {
        RatingMethod::Simplified
    }

    fn is_available(&self) -> bool {
        true
    }

    fn rate(&self, input: &RatingInput<'_>, env: &Environment) -> Result<f64, RatingError> {
        Ok(self.dynamic_rating(input.nominal_rating, env))
    }

    fn environment_issues(&self, env: &Environment) -> Vec<DiagnosticIssue> {
        if !self.is_degenerate(env) {
            return Vec::new();
        }
        vec![DiagnosticIssue::new(
            IssueKind::DegenerateEnvironment,
            format!(
                "ambient {:.1} °C is at or above T_max {:.1} °C; simplified ratings fall to the floor",
                env.ambient_temperature_c, self.constants.t_max_c
            ),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linestress_core::Line;

    fn rate(nominal: f64, temp: f64, wind: f64) -> f64 {
        SimplifiedRating::default().dynamic_rating(nominal, &Environment::new(temp, wind))
    }

    #[test]
    fn test_reference_conditions_keep_nameplate() {
        assert!((rate(200.0, 25.0, 0.0) - 200.0).abs() < 1e-12);
    }

    #[test]
    fn test_hot_day_derates() {
        // √((75-50)/50) = 0.7071
        assert!((rate(200.0, 50.0, 0.0) - 141.421).abs() < 1e-3);
    }

    #[test]
    fn test_wind_uplift() {
        // 1 + 0.04 × 5 = 1.2
        assert!((rate(200.0, 25.0, 5.0) - 240.0).abs() < 1e-9);
    }

    #[test]
    fn test_at_t_max_rating_hits_floor() {
        assert_eq!(rate(200.0, 75.0, 0.0), 1e-3);
        assert_eq!(rate(200.0, 90.0, 10.0), 1e-3);
    }

    #[test]
    fn test_cold_day_uprates() {
        assert!(rate(200.0, 10.0, 0.0) > 200.0);
    }

    #[test]
    fn test_negative_wind_ignored() {
        assert_eq!(rate(200.0, 25.0, -3.0), rate(200.0, 25.0, 0.0));
    }

    #[test]
    fn test_degenerate_environment_reported_once() {
        let strategy = SimplifiedRating::default();
        assert!(strategy
            .environment_issues(&Environment::new(30.0, 0.0))
            .is_empty());
        let issues = strategy.environment_issues(&Environment::new(75.0, 0.0));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::DegenerateEnvironment);
    }

    #[test]
    fn test_strategy_rate_uses_input_rating() {
        let line = Line::unrated("L1");
        let input = RatingInput {
            line: &line,
            nominal_rating: 100.0,
        };
        let rating = SimplifiedRating::default()
            .rate(&input, &Environment::new(25.0, 0.0))
            .unwrap();
        assert!((rating - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_legacy_wind_coefficient() {
        let strategy = SimplifiedRating::new(RatingConstants {
            k_wind: 0.05,
            ..RatingConstants::default()
        });
        let rating = strategy.dynamic_rating(200.0, &Environment::new(25.0, 2.0));
        assert!((rating - 220.0).abs() < 1e-9);
    }
}
