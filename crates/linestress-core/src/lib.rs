//! # linestress-core: Line Thermal-Stress Data Model
//!
//! Provides the data contracts shared by the rating engine, the file adapters
//! and the command-line front end.
//!
//! ## Design Philosophy
//!
//! An evaluation is a pure function of `(LineSet, Environment)`:
//! - **Inputs**: [`Line`] rows (nameplate rating, optional flow, optional
//!   conductor geometry) and one [`Environment`] (ambient temperature, wind,
//!   optional solar/atmospheric fields)
//! - **Outputs**: one [`StressResult`] per line with its dynamic rating,
//!   stress ratio and [`SeverityBand`]
//!
//! Nothing here holds state between evaluations. Value-level problems are
//! repaired and reported through [`Diagnostics`]; only structurally invalid
//! input surfaces as a [`StressError`].
//!
//! ## Quick Start
//!
//! ```rust
//! use linestress_core::*;
//!
//! let lines = LineSet::new(vec![
//!     Line::new("L1", 200.0).with_flow(150.0),
//!     Line::new("L2", 350.0).with_flow(90.0).with_voltage_kv(138.0),
//! ])
//! .unwrap();
//!
//! let env = Environment::new(25.0, 0.0);
//! assert!(env.validate().is_ok());
//! assert_eq!(lines.len(), 2);
//! assert_eq!(SeverityBand::from_ratio(75.0), SeverityBand::CautionHigh);
//! ```
//!
//! ## Modules
//!
//! - [`line`] - Line records and the validated [`LineSet`]
//! - [`environment`] - Ambient and extended physical conditions
//! - [`stress`] - Results, severity bands, collapse schemes, strategy selectors
//! - [`diagnostics`] - Per-line warning collection
//! - [`units`] - Newtypes for amps, MVA, kV and °C

pub mod diagnostics;
pub mod environment;
pub mod error;
pub mod line;
pub mod stress;
pub mod units;

pub use diagnostics::{DiagnosticIssue, Diagnostics, IssueKind};
pub use environment::{Atmosphere, ConductorOrientation, Environment, ExtendedEnvironment};
pub use error::{StressError, StressOutcome};
pub use line::{ConductorGeometry, Line, LineSet};
pub use stress::{
    CoarseBand, CollapseScheme, FlowSource, RatingMethod, RatioScale, SeverityBand,
    StrategyKind, StressResult, STRESS_CEILING,
};
pub use units::{Amperes, Celsius, Kilovolts, MegavoltAmperes};
