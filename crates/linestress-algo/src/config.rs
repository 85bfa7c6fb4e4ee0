//! Engine constants and defaults.
//!
//! Every field has a default, so a partial TOML table (or none at all) yields
//! a working configuration:
//!
//! ```toml
//! default_nominal_rating = 200.0
//!
//! [rating]
//! k_wind = 0.05
//!
//! [conductor]
//! max_operating_temp_c = 100.0
//! ```

use linestress_core::units::{METERS_PER_MILE, MM_PER_INCH};
use linestress_core::{ConductorGeometry, StressError, StressOutcome};
use serde::{Deserialize, Serialize};

/// Closed-form rating constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConstants {
    /// Maximum allowable conductor temperature (°C)
    pub t_max_c: f64,
    /// Ambient temperature at which the nameplate rating applies (°C)
    pub t_ref_c: f64,
    /// Empirical wind-cooling coefficient (per m/s)
    pub k_wind: f64,
    /// Smallest rating handed to the stress division
    pub rating_floor: f64,
}

impl Default for RatingConstants {
    fn default() -> Self {
        Self {
            t_max_c: 75.0,
            t_ref_c: 25.0,
            k_wind: 0.04,
            rating_floor: 1e-3,
        }
    }
}

/// Conductor parameters used when a line omits its geometry.
///
/// Defaults describe a 0.741 in ACSR conductor: 0.2708 Ω/mile at 25 °C,
/// 0.2974 Ω/mile at 50 °C, rated to 80 °C.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConductorDefaults {
    pub r_low_ohm_per_m: f64,
    pub r_high_ohm_per_m: f64,
    pub t_low_c: f64,
    pub t_high_c: f64,
    pub diameter_mm: f64,
    pub max_operating_temp_c: f64,
}

impl Default for ConductorDefaults {
    fn default() -> Self {
        Self {
            r_low_ohm_per_m: 0.2708 / METERS_PER_MILE,
            r_high_ohm_per_m: 0.2974 / METERS_PER_MILE,
            t_low_c: 25.0,
            t_high_c: 50.0,
            diameter_mm: 0.741 * MM_PER_INCH,
            max_operating_temp_c: 80.0,
        }
    }
}

/// Fully resolved conductor parameters handed to an ampacity model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConductorParams {
    pub r_low_ohm_per_m: f64,
    pub r_high_ohm_per_m: f64,
    pub t_low_c: f64,
    pub t_high_c: f64,
    pub diameter_mm: f64,
    pub max_operating_temp_c: f64,
}

impl ConductorParams {
    /// Resistance at `temp_c`, linearly interpolated (or extrapolated) from
    /// the two reference points
    pub fn resistance_at(&self, temp_c: f64) -> f64 {
        let span = self.t_high_c - self.t_low_c;
        if span.abs() < 1e-9 {
            return self.r_low_ohm_per_m;
        }
        let slope = (self.r_high_ohm_per_m - self.r_low_ohm_per_m) / span;
        self.r_low_ohm_per_m + slope * (temp_c - self.t_low_c)
    }
}

impl ConductorDefaults {
    /// Fill the gaps in a line's geometry; usable fields override defaults
    pub fn resolve(&self, geometry: Option<&ConductorGeometry>) -> ConductorParams {
        let pick = |value: Option<f64>, fallback: f64| {
            value.filter(|v| v.is_finite() && *v > 0.0).unwrap_or(fallback)
        };
        let g = geometry.cloned().unwrap_or_default();
        ConductorParams {
            r_low_ohm_per_m: pick(g.r_low_ohm_per_m, self.r_low_ohm_per_m),
            r_high_ohm_per_m: pick(g.r_high_ohm_per_m, self.r_high_ohm_per_m),
            t_low_c: g.t_low_c.filter(|v| v.is_finite()).unwrap_or(self.t_low_c),
            t_high_c: g.t_high_c.filter(|v| v.is_finite()).unwrap_or(self.t_high_c),
            diameter_mm: pick(g.diameter_mm, self.diameter_mm),
            max_operating_temp_c: g
                .max_operating_temp_c
                .filter(|v| v.is_finite())
                .unwrap_or(self.max_operating_temp_c),
        }
    }
}

/// Synthetic-flow generator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Fixed generator seed; identical seeds give identical flows
    pub seed: u64,
    pub sensitivity_min: f64,
    pub sensitivity_max: f64,
    pub base_load_min: f64,
    pub base_load_max: f64,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            sensitivity_min: 0.3,
            sensitivity_max: 1.2,
            base_load_min: 0.3,
            base_load_max: 0.8,
        }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub rating: RatingConstants,
    pub conductor: ConductorDefaults,
    pub synthesis: SynthesisConfig,
    /// Substituted for missing or non-positive nameplate ratings
    pub default_nominal_rating: f64,
    /// Line-to-line voltage for the amps → MVA conversion (kV)
    pub default_voltage_kv: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rating: RatingConstants::default(),
            conductor: ConductorDefaults::default(),
            synthesis: SynthesisConfig::default(),
            default_nominal_rating: 200.0,
            default_voltage_kv: 138.0,
        }
    }
}

impl EngineConfig {
    /// Validate constants for consistency
    pub fn validate(&self) -> StressOutcome<()> {
        let finite = [
            ("rating.t_max_c", self.rating.t_max_c),
            ("rating.t_ref_c", self.rating.t_ref_c),
            ("rating.k_wind", self.rating.k_wind),
            ("rating.rating_floor", self.rating.rating_floor),
            ("default_nominal_rating", self.default_nominal_rating),
            ("default_voltage_kv", self.default_voltage_kv),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(StressError::Config(format!("{} is not finite: {}", name, value)));
            }
        }

        if self.rating.t_max_c <= self.rating.t_ref_c {
            return Err(StressError::Config(format!(
                "rating.t_max_c ({}) must exceed rating.t_ref_c ({})",
                self.rating.t_max_c, self.rating.t_ref_c
            )));
        }
        if self.rating.k_wind < 0.0 {
            return Err(StressError::Config("rating.k_wind cannot be negative".to_string()));
        }
        if self.rating.rating_floor <= 0.0 {
            return Err(StressError::Config(
                "rating.rating_floor must be positive".to_string(),
            ));
        }
        if self.default_nominal_rating <= 0.0 {
            return Err(StressError::Config(
                "default_nominal_rating must be positive".to_string(),
            ));
        }
        if self.default_voltage_kv <= 0.0 {
            return Err(StressError::Config(
                "default_voltage_kv must be positive".to_string(),
            ));
        }
        if self.conductor.diameter_mm <= 0.0
            || self.conductor.r_low_ohm_per_m <= 0.0
            || self.conductor.r_high_ohm_per_m <= 0.0
        {
            return Err(StressError::Config(
                "conductor defaults must have positive diameter and resistances".to_string(),
            ));
        }

        let s = &self.synthesis;
        if !(s.sensitivity_min < s.sensitivity_max) {
            return Err(StressError::Config(
                "synthesis.sensitivity_min must be below sensitivity_max".to_string(),
            ));
        }
        if !(s.base_load_min < s.base_load_max) {
            return Err(StressError::Config(
                "synthesis.base_load_min must be below base_load_max".to_string(),
            ));
        }

        Ok(())
    }
}
