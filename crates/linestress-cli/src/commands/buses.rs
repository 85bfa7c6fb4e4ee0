use std::path::{Path, PathBuf};

use anyhow::Result;
use linestress_algo::{aggregate_by_bus, StressEngine};
use linestress_core::{CollapseScheme, StrategyKind};
use linestress_io::write_buses_csv;
use tracing::{info, warn};

use linestress_cli::cli::{EnvironmentArgs, InputArgs};
use crate::commands::common::{
    build_environment, load_lines, load_run_config, print_table, report_diagnostics,
};

pub struct BusesArgs<'a> {
    pub config: Option<&'a Path>,
    pub input: &'a InputArgs,
    pub environment: &'a EnvironmentArgs,
    pub strategy: StrategyKind,
    pub scheme: CollapseScheme,
    pub out: Option<&'a PathBuf>,
}

pub fn handle(args: BusesArgs<'_>) -> Result<()> {
    let run_config = load_run_config(args.config)?;
    let lines = load_lines(args.input)?;
    let env = build_environment(args.environment, &run_config);
    let engine = StressEngine::new(run_config.engine)?;

    let report = engine.evaluate(&lines, &env, args.strategy)?;
    let buses = aggregate_by_bus(&report.results, &lines, args.scheme);
    if buses.is_empty() {
        warn!("No line carries bus endpoints; add from/to (or bus0/bus1) columns");
    }

    print_table(
        "BUS\tMAX STRESS %\tLINES\tBAND",
        buses.iter().map(|b| {
            format!(
                "{}\t{:.1}\t{}\t{}",
                b.bus, b.max_stress, b.line_count, b.band
            )
        }),
    )?;
    report_diagnostics(&report.diagnostics);

    if let Some(path) = args.out {
        write_buses_csv(path, &buses)?;
        info!("Wrote {} buses to {}", buses.len(), path.display());
    }
    Ok(())
}
