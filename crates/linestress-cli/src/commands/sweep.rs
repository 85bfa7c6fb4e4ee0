use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use linestress_algo::{sweep, StressEngine};
use linestress_core::{SeverityBand, StrategyKind};
use linestress_io::{write_sweep, write_sweep_csv};
use tracing::info;

use linestress_cli::cli::{EnvironmentArgs, Grid, InputArgs};
use crate::commands::common::{build_environment, load_lines, load_run_config};

pub struct SweepArgs<'a> {
    pub config: Option<&'a Path>,
    pub input: &'a InputArgs,
    pub environment: &'a EnvironmentArgs,
    pub temperatures: &'a Grid,
    pub winds: &'a Grid,
    pub strategy: StrategyKind,
    pub out: Option<&'a PathBuf>,
}

pub fn handle(args: SweepArgs<'_>) -> Result<()> {
    let run_config = load_run_config(args.config)?;
    let lines = load_lines(args.input)?;
    let base_env = build_environment(args.environment, &run_config);
    let engine = StressEngine::new(run_config.engine)?;

    info!(
        "Sweeping {} temperatures × {} wind speeds over {} lines",
        args.temperatures.0.len(),
        args.winds.0.len(),
        lines.len()
    );
    let points = sweep(
        &engine,
        &lines,
        &base_env,
        &args.temperatures.0,
        &args.winds.0,
        args.strategy,
    )?;

    match args.out {
        Some(path) => {
            write_sweep_csv(path, &points)?;
            let worst = points
                .iter()
                .max_by(|a, b| a.max_stress.total_cmp(&b.max_stress));
            if let Some(p) = worst {
                println!(
                    "Wrote {} grid points to {}; worst at {} °C / {} m/s: {:.1}% ({} overloaded)",
                    points.len(),
                    path.display(),
                    p.ambient_temperature_c,
                    p.wind_speed_mps,
                    p.max_stress,
                    p.count(SeverityBand::CriticalOverload)
                );
            }
        }
        None => write_sweep(io::stdout(), &points)?,
    }
    Ok(())
}
