//! TOML run configuration.
//!
//! Top-level keys are [`EngineConfig`] fields; an optional `[environment]`
//! table supplies the extended physical conditions:
//!
//! ```toml
//! default_voltage_kv = 230.0
//!
//! [rating]
//! k_wind = 0.05
//!
//! [environment]
//! latitude_deg = 47.6
//! date = "2024-07-15"
//! atmosphere = "industrial"
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use linestress_algo::EngineConfig;
use linestress_core::ExtendedEnvironment;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunConfig {
    pub engine: EngineConfig,
    pub environment: Option<ExtendedEnvironment>,
}

pub fn parse_config(text: &str) -> Result<RunConfig> {
    let mut table: toml::Table = text.parse().context("parsing TOML")?;
    let environment = table
        .remove("environment")
        .map(|value| value.try_into::<ExtendedEnvironment>())
        .transpose()
        .context("parsing [environment] table")?;
    let engine: EngineConfig = toml::Value::Table(table)
        .try_into()
        .context("parsing engine settings")?;
    engine.validate()?;
    Ok(RunConfig {
        engine,
        environment,
    })
}

pub fn load_config(path: &Path) -> Result<RunConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config: {}", path.display()))?;
    parse_config(&text).with_context(|| format!("loading config: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use linestress_core::{Atmosphere, StressError};

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(parse_config("").unwrap(), RunConfig::default());
    }

    #[test]
    fn test_partial_tables() {
        let config = parse_config(
            r#"
            default_voltage_kv = 230.0

            [rating]
            k_wind = 0.05

            [environment]
            latitude_deg = 47.6
            date = "2024-07-15"
            atmosphere = "industrial"
            "#,
        )
        .unwrap();

        assert_eq!(config.engine.default_voltage_kv, 230.0);
        assert_eq!(config.engine.rating.k_wind, 0.05);
        assert_eq!(config.engine.rating.t_max_c, 75.0);
        let env = config.environment.unwrap();
        assert_eq!(env.latitude_deg, 47.6);
        assert_eq!(env.atmosphere, Atmosphere::Industrial);
        assert_eq!(env.day_of_year(), 197);
        assert_eq!(env.emissivity, 0.8);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = parse_config("[rating]\nt_max_c = 10.0\n").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StressError>(),
            Some(StressError::Config(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("linestress.toml");
        std::fs::write(&path, "[synthesis]\nseed = 7\n").unwrap();
        assert_eq!(load_config(&path).unwrap().engine.synthesis.seed, 7);
        assert!(load_config(&dir.path().join("missing.toml")).is_err());
    }
}
