//! # linestress-algo: Dynamic Line Rating and Stress Evaluation
//!
//! Turns a [`LineSet`](linestress_core::LineSet) and an
//! [`Environment`](linestress_core::Environment) into per-line dynamic ratings,
//! stress ratios and severity bands.
//!
//! ## Rating Strategies
//!
//! | Strategy | Model | Needs |
//! |----------|-------|-------|
//! | [`SimplifiedRating`] | `nominal · √((T_max − T)/(T_max − T_ref)) · (1 + k·wind)` | nameplate rating |
//! | [`PhysicalRating`] | IEEE 738 heat balance ([`Ieee738`]), amps → MVA | conductor geometry (or defaults) |
//!
//! ### Architecture
//!
//! - **[`rating::RatingStrategy`]**: one line in, one rating out
//! - **[`rating::AmpacityModel`]**: the numerical boundary behind the physical
//!   strategy; swap it to plug in another thermal model
//! - **[`RatingRegistry`]**: registered strategies, one per method
//! - **[`RatingPlan`]**: primary strategy plus per-line fallback for a batch
//! - **[`StressEngine`]**: validation, normalization, flow synthesis, rating
//!   and classification
//!
//! A failing line never fails the batch: it gets rating 0, stress 0 and a
//! warning in the report's diagnostics.
//!
//! ## Example
//!
//! ```rust
//! use linestress_algo::{EngineConfig, StressEngine};
//! use linestress_core::{Environment, Line, LineSet, StrategyKind};
//!
//! let engine = StressEngine::new(EngineConfig::default()).unwrap();
//! let lines = LineSet::new(vec![
//!     Line::new("L1", 200.0).with_flow(150.0),
//!     Line::new("L2", 200.0).with_flow(190.0),
//! ])
//! .unwrap();
//!
//! let report = engine
//!     .evaluate(&lines, &Environment::new(35.0, 1.0), StrategyKind::Simplified)
//!     .unwrap();
//! assert_eq!(report.len(), 2);
//! assert!(report.max_stress() > 100.0);
//! ```

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod evaluate;
pub mod rating;
pub mod sweep;
pub mod synth;

pub use aggregate::{aggregate_by_bus, BusStress};
pub use classify::{classify, normalize_external, stress_ratio, NormalizedRatios};
pub use config::{ConductorDefaults, ConductorParams, EngineConfig, RatingConstants, SynthesisConfig};
pub use evaluate::{evaluate, StressEngine, StressReport};
pub use rating::{
    AmpacityModel, Ieee738, PhysicalRating, RatingError, RatingPlan, RatingRegistry,
    RatingStrategy, SimplifiedRating,
};
pub use sweep::{linspace, sweep, SweepPoint};
pub use synth::{FlowSynthesizer, LoadProfile};
