//! Ambient conditions for a single evaluation.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{StressError, StressOutcome};

/// Day of year used when no calendar date is supplied (June 10).
pub const DEFAULT_DAY_OF_YEAR: u32 = 161;

/// Conductor axis orientation, used for the solar azimuth term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConductorOrientation {
    #[default]
    EastWest,
    NorthSouth,
}

impl ConductorOrientation {
    /// Azimuth of the line axis, degrees clockwise from north
    pub fn azimuth_deg(self) -> f64 {
        match self {
            ConductorOrientation::EastWest => 90.0,
            ConductorOrientation::NorthSouth => 0.0,
        }
    }
}

/// Atmospheric clarity for the solar heat flux polynomial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Atmosphere {
    #[default]
    Clear,
    Industrial,
}

/// Solar, atmospheric and geographic inputs for the physical model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtendedEnvironment {
    /// Angle between wind direction and conductor axis (degrees)
    pub wind_angle_deg: f64,
    /// Local solar time (hours, 0–24)
    pub solar_time_hours: f64,
    /// Conductor elevation above sea level (m)
    pub elevation_m: f64,
    /// Latitude (degrees, north positive)
    pub latitude_deg: f64,
    pub emissivity: f64,
    pub absorptivity: f64,
    pub orientation: ConductorOrientation,
    pub atmosphere: Atmosphere,
    pub date: Option<NaiveDate>,
}

impl Default for ExtendedEnvironment {
    fn default() -> Self {
        Self {
            wind_angle_deg: 90.0,
            solar_time_hours: 12.0,
            elevation_m: 0.0,
            latitude_deg: 30.0,
            emissivity: 0.8,
            absorptivity: 0.8,
            orientation: ConductorOrientation::EastWest,
            atmosphere: Atmosphere::Clear,
            date: None,
        }
    }
}

impl ExtendedEnvironment {
    pub fn day_of_year(&self) -> u32 {
        self.date.map_or(DEFAULT_DAY_OF_YEAR, |d| d.ordinal())
    }
}

/// Ambient conditions for one evaluation; immutable and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    pub ambient_temperature_c: f64,
    pub wind_speed_mps: f64,
    #[serde(default)]
    pub extended: Option<ExtendedEnvironment>,
}

impl Environment {
    pub fn new(ambient_temperature_c: f64, wind_speed_mps: f64) -> Self {
        Self {
            ambient_temperature_c,
            wind_speed_mps,
            extended: None,
        }
    }

    pub fn with_extended(mut self, extended: ExtendedEnvironment) -> Self {
        self.extended = Some(extended);
        self
    }

    /// Extended fields, or their defaults when the caller supplied none
    pub fn extended_or_default(&self) -> ExtendedEnvironment {
        self.extended.clone().unwrap_or_default()
    }

    /// Reject values no evaluation can use. Out-of-range but finite values are
    /// accepted and handled by the rating models.
    pub fn validate(&self) -> StressOutcome<()> {
        if !self.ambient_temperature_c.is_finite() {
            return Err(StressError::InvalidEnvironment(format!(
                "ambient temperature is not finite: {}",
                self.ambient_temperature_c
            )));
        }
        if !self.wind_speed_mps.is_finite() {
            return Err(StressError::InvalidEnvironment(format!(
                "wind speed is not finite: {}",
                self.wind_speed_mps
            )));
        }
        if let Some(ext) = &self.extended {
            if !(0.0..=24.0).contains(&ext.solar_time_hours) {
                return Err(StressError::InvalidEnvironment(format!(
                    "solar time must be within 0-24 h, got {}",
                    ext.solar_time_hours
                )));
            }
            if !(-90.0..=90.0).contains(&ext.latitude_deg) {
                return Err(StressError::InvalidEnvironment(format!(
                    "latitude must be within ±90°, got {}",
                    ext.latitude_deg
                )));
            }
        }
        Ok(())
    }
}
