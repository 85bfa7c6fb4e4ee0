//! Conductor-physics rating: ampacity from a heat balance, converted to MVA.

use std::sync::Arc;

use linestress_core::units::Kilovolts;
use linestress_core::{Environment, Line, RatingMethod};

use super::{AmpacityModel, Ieee738, RatingError, RatingInput, RatingStrategy};
use crate::config::{ConductorDefaults, ConductorParams, EngineConfig};

/// Rates lines through an [`AmpacityModel`].
///
/// Without a model installed the strategy reports itself unavailable and the
/// evaluator plans around it.
#[derive(Clone)]
pub struct PhysicalRating {
    model: Option<Arc<dyn AmpacityModel>>,
    defaults: ConductorDefaults,
    default_voltage_kv: f64,
}

impl std::fmt::Debug for PhysicalRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhysicalRating")
            .field("model", &self.model.as_ref().map(|m| m.id().to_string()))
            .field("defaults", &self.defaults)
            .field("default_voltage_kv", &self.default_voltage_kv)
            .finish()
    }
}

impl Default for PhysicalRating {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl PhysicalRating {
    pub fn new(
        model: Arc<dyn AmpacityModel>,
        defaults: ConductorDefaults,
        default_voltage_kv: f64,
    ) -> Self {
        Self {
            model: Some(model),
            defaults,
            default_voltage_kv,
        }
    }

    /// Bundled [`Ieee738`] model with the configured defaults
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            Arc::new(Ieee738),
            config.conductor.clone(),
            config.default_voltage_kv,
        )
    }

    /// Strategy with no ampacity model; `is_available` is false
    pub fn without_model(config: &EngineConfig) -> Self {
        Self {
            model: None,
            defaults: config.conductor.clone(),
            default_voltage_kv: config.default_voltage_kv,
        }
    }

    pub fn model_id(&self) -> Option<&str> {
        self.model.as_deref().map(|m| m.id())
    }

    pub fn conductor_params(&self, line: &Line) -> ConductorParams {
        self.defaults.resolve(line.conductor.as_ref())
    }

    /// Line voltage when positive and finite, the configured default otherwise
    pub fn voltage_for(&self, line: &Line) -> Kilovolts {
        let kv = line
            .nominal_voltage_kv
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(self.default_voltage_kv);
        Kilovolts(kv)
    }
}

impl RatingStrategy for PhysicalRating {
    fn id(&self) -> &str {
        "physical"
    }

    fn method(&self) -> RatingMethod {
        RatingMethod::Physical
    }

    fn is_available(&self) -> bool {
        self.model.is_some()
    }

    fn rate(&self, input: &RatingInput<'_>, env: &Environment) -> Result<f64, RatingError> {
        let model = self
            .model
            .as_deref()
            .ok_or_else(|| RatingError::Unavailable("no ampacity model installed".into()))?;

        let params = self.conductor_params(input.line);
        let amps = model.steady_state_rating(&params, env)?;
        if !amps.is_finite() || amps.value() <= 0.0 {
            return Err(RatingError::NonPositive(amps.value()));
        }

        let mva = amps.to_three_phase_mva(self.voltage_for(input.line));
        Ok(mva.value())
    }
}
