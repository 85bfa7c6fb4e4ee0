//! Line records and the validated line collection.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{StressError, StressOutcome};

/// Optional conductor geometry consumed by the physical rating model.
///
/// Every field may be missing; the rating engine fills gaps from its
/// configured conductor defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConductorGeometry {
    /// AC resistance at the low reference temperature (Ω/m)
    pub r_low_ohm_per_m: Option<f64>,
    /// AC resistance at the high reference temperature (Ω/m)
    pub r_high_ohm_per_m: Option<f64>,
    /// Low reference temperature for `r_low_ohm_per_m` (°C)
    pub t_low_c: Option<f64>,
    /// High reference temperature for `r_high_ohm_per_m` (°C)
    pub t_high_c: Option<f64>,
    /// Outside conductor diameter (mm)
    pub diameter_mm: Option<f64>,
    /// Maximum allowable conductor temperature (°C)
    pub max_operating_temp_c: Option<f64>,
}

impl ConductorGeometry {
    /// True when no field carries data
    pub fn is_empty(&self) -> bool {
        self.r_low_ohm_per_m.is_none()
            && self.r_high_ohm_per_m.is_none()
            && self.t_low_c.is_none()
            && self.t_high_c.is_none()
            && self.diameter_mm.is_none()
            && self.max_operating_temp_c.is_none()
    }
}

/// One transmission or distribution line.
///
/// `nominal_rating` and `nominal_flow` share a unit (amps or MVA); the engine
/// never converts between them except through `nominal_voltage_kv` in the
/// physical model, which rates in MVA.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub id: String,
    #[serde(default)]
    pub nominal_rating: Option<f64>,
    #[serde(default)]
    pub nominal_flow: Option<f64>,
    #[serde(default)]
    pub conductor: Option<ConductorGeometry>,
    #[serde(default)]
    pub nominal_voltage_kv: Option<f64>,
    #[serde(default)]
    pub from_bus: Option<String>,
    #[serde(default)]
    pub to_bus: Option<String>,
}

impl Line {
    pub fn new(id: impl Into<String>, nominal_rating: f64) -> Self {
        Self {
            id: id.into(),
            nominal_rating: Some(nominal_rating),
            nominal_flow: None,
            conductor: None,
            nominal_voltage_kv: None,
            from_bus: None,
            to_bus: None,
        }
    }

    /// Line without a nameplate rating; the engine substitutes its default.
    pub fn unrated(id: impl Into<String>) -> Self {
        Self {
            nominal_rating: None,
            ..Self::new(id, 0.0)
        }
    }

    pub fn with_flow(mut self, flow: f64) -> Self {
        self.nominal_flow = Some(flow);
        self
    }

    pub fn with_conductor(mut self, conductor: ConductorGeometry) -> Self {
        self.conductor = Some(conductor);
        self
    }

    pub fn with_voltage_kv(mut self, kv: f64) -> Self {
        self.nominal_voltage_kv = Some(kv);
        self
    }

    pub fn with_endpoints(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.from_bus = Some(from.into());
        self.to_bus = Some(to.into());
        self
    }

    /// True when the row carries a usable measured flow (finite and non-zero)
    pub fn has_measured_flow(&self) -> bool {
        matches!(self.nominal_flow, Some(f) if f.is_finite() && f != 0.0)
    }

    /// True when the row carries any conductor geometry field
    pub fn has_conductor_geometry(&self) -> bool {
        self.conductor.as_ref().is_some_and(|c| !c.is_empty())
    }
}

/// A non-empty line collection with unique, non-empty identifiers.
///
/// This is the only structural check that rejects input; value-level problems
/// are repaired during evaluation and reported as diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSet {
    lines: Vec<Line>,
}

impl LineSet {
    pub fn new(lines: Vec<Line>) -> StressOutcome<Self> {
        if lines.is_empty() {
            return Err(StressError::EmptyLineSet);
        }

        let mut seen = HashSet::with_capacity(lines.len());
        for (row, line) in lines.iter().enumerate() {
            if line.id.trim().is_empty() {
                return Err(StressError::InvalidLine {
                    row,
                    reason: "line id is empty".to_string(),
                });
            }
            if !seen.insert(line.id.as_str()) {
                return Err(StressError::DuplicateLineId(line.id.clone()));
            }
        }

        Ok(Self { lines })
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Line> {
        self.lines.iter().find(|l| l.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Line> {
        self.lines.iter()
    }

    /// True when no line carries a measured flow, i.e. flows must be synthesized
    pub fn lacks_flow_data(&self) -> bool {
        !self.lines.iter().any(Line::has_measured_flow)
    }

    pub fn any_conductor_geometry(&self) -> bool {
        self.lines.iter().any(Line::has_conductor_geometry)
    }
}

impl<'a> IntoIterator for &'a LineSet {
    type Item = &'a Line;
    type IntoIter = std::slice::Iter<'a, Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
