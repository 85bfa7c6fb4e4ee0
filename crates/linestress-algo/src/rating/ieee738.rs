//! Steady-state conductor heat balance after IEEE Std 738 (SI form).
//!
//! The rating is the current at which resistive heating plus solar gain
//! equals convective plus radiative loss with the conductor at its maximum
//! operating temperature:
//!
//! ```text
//! q_c + q_r = q_s + I² · R(T_c)      ⇒      I = √((q_c + q_r − q_s) / R(T_c))
//! ```
//!
//! | Term | Model |
//! |------|-------|
//! | `q_c` | largest of forced (low/high Reynolds) and natural convection |
//! | `q_r` | grey-body radiation, `17.8 · D₀ · ε · [(T_c/100)⁴ − (T_a/100)⁴]` with `T` in kelvin |
//! | `q_s` | `α · Q_se · sin θ · D₀` from solar altitude/azimuth |
//! | `R(T_c)` | linear interpolation between two reference resistances |
//!
//! All lengths are metres, heat rates W/m, resistance Ω/m.

use linestress_core::units::{Amperes, Celsius};
use linestress_core::{Atmosphere, Environment, ExtendedEnvironment};

use super::{AmpacityModel, RatingError};
use crate::config::ConductorParams;

/// Total solar heat flux polynomial coefficients `A..G` (W/m², altitude in degrees)
const CLEAR_ATMOSPHERE: [f64; 7] = [
    -42.2391, 63.8044, -1.9220, 3.46921e-2, -3.61118e-4, 1.94318e-6, -4.07608e-9,
];
const INDUSTRIAL_ATMOSPHERE: [f64; 7] = [
    53.1821, 14.2110, 6.6138e-1, -3.1658e-2, 5.4654e-4, -4.3446e-6, 1.3236e-8,
];

/// Bundled heat-balance ampacity model.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ieee738;

/// Individual heat-balance terms, exposed for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatBalance {
    /// Convective cooling (W/m)
    pub convective: f64,
    /// Radiative cooling (W/m)
    pub radiative: f64,
    /// Solar heating (W/m)
    pub solar: f64,
    /// AC resistance at the conductor temperature (Ω/m)
    pub resistance: f64,
}

impl HeatBalance {
    pub fn net_cooling(&self) -> f64 {
        self.convective + self.radiative - self.solar
    }
}

impl Ieee738 {
    /// Evaluate every heat-balance term for a conductor held at its limit
    pub fn heat_balance(
        &self,
        conductor: &ConductorParams,
        env: &Environment,
    ) -> Result<HeatBalance, RatingError> {
        let ext = env.extended_or_default();
        let t_c = conductor.max_operating_temp_c;
        let t_a = env.ambient_temperature_c;
        if t_c <= t_a {
            return Err(RatingError::AmpacityFailed(format!(
                "conductor limit {:.1} °C is not above ambient {:.1} °C",
                t_c, t_a
            )));
        }
        let d0 = conductor.diameter_mm / 1000.0;
        if !(d0 > 0.0) {
            return Err(RatingError::AmpacityFailed(format!(
                "conductor diameter must be positive, got {} mm",
                conductor.diameter_mm
            )));
        }

        let convective = convective_cooling(d0, t_c, t_a, env.wind_speed_mps.max(0.0), &ext);
        let radiative = radiative_cooling(d0, t_c, t_a, ext.emissivity);
        let solar = solar_heating(d0, &ext);
        let resistance = conductor.resistance_at(t_c);
        if !(resistance > 0.0) {
            return Err(RatingError::AmpacityFailed(format!(
                "resistance at {:.1} °C is not positive: {:e} Ω/m",
                t_c, resistance
            )));
        }

        Ok(HeatBalance {
            convective,
            radiative,
            solar,
            resistance,
        })
    }
}

impl AmpacityModel for Ieee738 {
    fn id(&self) -> &str {
        "ieee738"
    }

    fn steady_state_rating(
        &self,
        conductor: &ConductorParams,
        env: &Environment,
    ) -> Result<Amperes, RatingError> {
        let balance = self.heat_balance(conductor, env)?;
        let net = balance.net_cooling();
        if !(net > 0.0) {
            return Err(RatingError::AmpacityFailed(format!(
                "solar gain {:.2} W/m exceeds cooling {:.2} W/m",
                balance.solar,
                balance.convective + balance.radiative
            )));
        }
        Ok(Amperes((net / balance.resistance).sqrt()))
    }
}

/// Air properties at the boundary-layer film temperature.
struct FilmProperties {
    /// Dynamic viscosity (kg/m·s)
    viscosity: f64,
    /// Density (kg/m³)
    density: f64,
    /// Thermal conductivity (W/m·°C)
    conductivity: f64,
}

fn film_properties(t_film: f64, elevation_m: f64) -> FilmProperties {
    let viscosity = 1.458e-6 * Celsius(t_film).to_kelvin().powf(1.5) / (t_film + 383.4);
    let density = (1.293 - 1.525e-4 * elevation_m + 6.379e-9 * elevation_m.powi(2))
        / (1.0 + 0.00367 * t_film);
    let conductivity = 2.424e-2 + 7.477e-5 * t_film - 4.407e-9 * t_film.powi(2);
    FilmProperties {
        viscosity,
        density,
        conductivity,
    }
}

/// Wind direction factor; `phi` is the angle between wind and conductor axis
fn wind_direction_factor(phi_deg: f64) -> f64 {
    let phi = phi_deg.to_radians();
    1.194 - phi.cos() + 0.194 * (2.0 * phi).cos() + 0.368 * (2.0 * phi).sin()
}

fn convective_cooling(d0: f64, t_c: f64, t_a: f64, wind: f64, ext: &ExtendedEnvironment) -> f64 {
    let t_film = (t_c + t_a) / 2.0;
    let air = film_properties(t_film, ext.elevation_m);
    let delta = t_c - t_a;

    let reynolds = d0 * air.density * wind / air.viscosity;
    let k_angle = wind_direction_factor(ext.wind_angle_deg);

    let forced_low = k_angle * (1.01 + 1.35 * reynolds.powf(0.52)) * air.conductivity * delta;
    let forced_high = k_angle * 0.754 * reynolds.powf(0.6) * air.conductivity * delta;
    let natural = 3.645 * air.density.sqrt() * d0.powf(0.75) * delta.powf(1.25);

    forced_low.max(forced_high).max(natural)
}

fn radiative_cooling(d0: f64, t_c: f64, t_a: f64, emissivity: f64) -> f64 {
    let conductor = (Celsius(t_c).to_kelvin() / 100.0).powi(4);
    let ambient = (Celsius(t_a).to_kelvin() / 100.0).powi(4);
    17.8 * d0 * emissivity * (conductor - ambient)
}

/// Solar altitude and azimuth in degrees.
pub fn solar_position(ext: &ExtendedEnvironment) -> (f64, f64) {
    let lat = ext.latitude_deg.to_radians();
    let day = ext.day_of_year() as f64;
    let declination = (23.46 * ((284.0 + day) / 365.0 * 360.0).to_radians().sin()).to_radians();
    let hour_angle_deg = (ext.solar_time_hours - 12.0) * 15.0;
    let hour_angle = hour_angle_deg.to_radians();

    let sin_altitude =
        lat.cos() * declination.cos() * hour_angle.cos() + lat.sin() * declination.sin();
    let altitude = sin_altitude.clamp(-1.0, 1.0).asin().to_degrees();

    let denom = lat.sin() * hour_angle.cos() - lat.cos() * declination.tan();
    let chi = if denom.abs() < 1e-12 {
        f64::INFINITY.copysign(hour_angle.sin())
    } else {
        hour_angle.sin() / denom
    };
    let constant = match (hour_angle_deg < 0.0, chi >= 0.0) {
        (true, true) => 0.0,
        (true, false) => 180.0,
        (false, true) => 180.0,
        (false, false) => 360.0,
    };
    let azimuth = constant + chi.atan().to_degrees();

    (altitude, azimuth)
}

fn solar_heating(d0: f64, ext: &ExtendedEnvironment) -> f64 {
    let (altitude, azimuth) = solar_position(ext);
    if altitude <= 0.0 {
        return 0.0;
    }

    let coeffs = match ext.atmosphere {
        Atmosphere::Clear => &CLEAR_ATMOSPHERE,
        Atmosphere::Industrial => &INDUSTRIAL_ATMOSPHERE,
    };
    let flux = coeffs
        .iter()
        .rev()
        .fold(0.0, |acc, c| acc * altitude + c)
        .max(0.0);
    let elevation_factor = 1.0 + 1.148e-4 * ext.elevation_m - 1.108e-8 * ext.elevation_m.powi(2);

    let incidence = (altitude.to_radians().cos()
        * (azimuth - ext.orientation.azimuth_deg()).to_radians().cos())
    .clamp(-1.0, 1.0)
    .acos();

    ext.absorptivity * flux * elevation_factor * incidence.sin() * d0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConductorDefaults;
    use linestress_core::ConductorOrientation;

    fn default_conductor() -> ConductorParams {
        ConductorDefaults::default().resolve(None)
    }

    fn amps(temp: f64, wind: f64) -> f64 {
        Ieee738
            .steady_state_rating(&default_conductor(), &Environment::new(temp, wind))
            .unwrap()
            .value()
    }

    #[test]
    fn test_still_air_rating_is_plausible() {
        // 0.741 in ACSR at 80 °C, 25 °C ambient, noon sun: roughly 400 A
        let rating = amps(25.0, 0.0);
        assert!(rating > 350.0 && rating < 460.0, "rating {rating}");
    }

    #[test]
    fn test_wind_raises_rating() {
        assert!(amps(25.0, 2.0) > amps(25.0, 0.5));
        assert!(amps(25.0, 0.5) > amps(25.0, 0.0));
    }

    #[test]
    fn test_hotter_ambient_lowers_rating() {
        assert!(amps(40.0, 1.0) < amps(20.0, 1.0));
    }

    #[test]
    fn test_ambient_above_limit_fails() {
        let err = Ieee738
            .steady_state_rating(&default_conductor(), &Environment::new(85.0, 1.0))
            .unwrap_err();
        assert!(matches!(err, RatingError::AmpacityFailed(_)));
    }

    #[test]
    fn test_night_has_no_solar_gain() {
        let ext = ExtendedEnvironment {
            solar_time_hours: 0.0,
            ..ExtendedEnvironment::default()
        };
        let env = Environment::new(25.0, 0.0).with_extended(ext);
        let balance = Ieee738.heat_balance(&default_conductor(), &env).unwrap();
        assert_eq!(balance.solar, 0.0);
    }

    #[test]
    fn test_noon_solar_position() {
        // Latitude 30° N, June 10, solar noon: sun nearly overhead, due south
        let (altitude, azimuth) = solar_position(&ExtendedEnvironment::default());
        assert!((altitude - 83.0).abs() < 0.5, "altitude {altitude}");
        assert!((azimuth - 180.0).abs() < 1e-6, "azimuth {azimuth}");
    }

    #[test]
    fn test_morning_sun_is_east() {
        let ext = ExtendedEnvironment {
            solar_time_hours: 9.0,
            ..ExtendedEnvironment::default()
        };
        let (altitude, azimuth) = solar_position(&ext);
        assert!(altitude > 0.0);
        assert!(azimuth > 0.0 && azimuth < 180.0, "azimuth {azimuth}");
    }

    #[test]
    fn test_parallel_wind_cools_less() {
        let conductor = default_conductor();
        let perpendicular = Environment::new(25.0, 2.0);
        let parallel = Environment::new(25.0, 2.0).with_extended(ExtendedEnvironment {
            wind_angle_deg: 0.0,
            ..ExtendedEnvironment::default()
        });
        let a = Ieee738.heat_balance(&conductor, &perpendicular).unwrap();
        let b = Ieee738.heat_balance(&conductor, &parallel).unwrap();
        assert!(b.convective < a.convective);
    }

    #[test]
    fn test_industrial_atmosphere_changes_solar_gain() {
        let conductor = default_conductor();
        let clear = Environment::new(25.0, 0.0);
        let industrial = Environment::new(25.0, 0.0).with_extended(ExtendedEnvironment {
            atmosphere: Atmosphere::Industrial,
            orientation: ConductorOrientation::NorthSouth,
            ..ExtendedEnvironment::default()
        });
        let a = Ieee738.heat_balance(&conductor, &clear).unwrap();
        let b = Ieee738.heat_balance(&conductor, &industrial).unwrap();
        assert!(a.solar > 0.0 && b.solar > 0.0);
        assert!((a.solar - b.solar).abs() > 1e-6);
    }

    #[test]
    fn test_radiative_term_uses_absolute_temperature() {
        let expected = 17.8 * 0.02 * 0.5 * ((353.15f64 / 100.0).powi(4) - (298.15f64 / 100.0).powi(4));
        assert!((radiative_cooling(0.02, 80.0, 25.0, 0.5) - expected).abs() < 1e-9);
        assert_eq!(radiative_cooling(0.02, 30.0, 30.0, 0.5), 0.0);
    }
}
