//! Synthetic flows for line sets without measured data.
//!
//! Each line gets a fixed load profile drawn from a seeded generator, so a
//! given line set always produces the same flows for the same environment.
//! Hot weather raises the load, wind lowers it:
//!
//! ```text
//! flow = rating · (base + sensitivity · (0.01 · (T − 25) − 0.005 · wind)),  flow ≥ 0
//! ```

use linestress_core::Environment;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::SynthesisConfig;

/// Per-line response to weather.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadProfile {
    /// How strongly load follows temperature and wind
    pub sensitivity: f64,
    /// Utilization at reference conditions
    pub base_load_factor: f64,
}

impl LoadProfile {
    pub fn flow(&self, nominal_rating: f64, env: &Environment) -> f64 {
        let weather = 0.01 * (env.ambient_temperature_c - 25.0) - 0.005 * env.wind_speed_mps;
        (nominal_rating * (self.base_load_factor + self.sensitivity * weather)).max(0.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FlowSynthesizer {
    config: SynthesisConfig,
}

impl FlowSynthesizer {
    pub fn new(config: SynthesisConfig) -> Self {
        Self { config }
    }

    /// Draw `count` profiles from a generator created for this call.
    ///
    /// All sensitivities are drawn first, then all base factors, so profile
    /// `i` depends only on the seed, `i` and `count`.
    pub fn profiles(&self, count: usize) -> Vec<LoadProfile> {
        let c = &self.config;
        let mut rng = StdRng::seed_from_u64(c.seed);
        let sensitivities: Vec<f64> = (0..count)
            .map(|_| draw(&mut rng, c.sensitivity_min, c.sensitivity_max))
            .collect();
        let base_factors: Vec<f64> = (0..count)
            .map(|_| draw(&mut rng, c.base_load_min, c.base_load_max))
            .collect();

        sensitivities
            .into_iter()
            .zip(base_factors)
            .map(|(sensitivity, base_load_factor)| LoadProfile {
                sensitivity,
                base_load_factor,
            })
            .collect()
    }

    /// One flow per nominal rating, in input order
    pub fn synthesize(&self, nominal_ratings: &[f64], env: &Environment) -> Vec<f64> {
        self.profiles(nominal_ratings.len())
            .iter()
            .zip(nominal_ratings)
            .map(|(profile, rating)| profile.flow(*rating, env))
            .collect()
    }
}

fn draw(rng: &mut StdRng, min: f64, max: f64) -> f64 {
    if min < max {
        rng.gen_range(min..max)
    } else {
        min
    }
}
