use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use linestress_algo::{StressEngine, StressReport};
use linestress_core::StrategyKind;
use linestress_io::{write_report_json, write_results_csv, ReportDocument};
use tracing::info;

use linestress_cli::cli::{EnvironmentArgs, InputArgs, OutputFormat};
use crate::commands::common::{
    build_environment, load_lines, load_run_config, print_table, report_diagnostics,
};

pub struct EvaluateArgs<'a> {
    pub config: Option<&'a Path>,
    pub input: &'a InputArgs,
    pub environment: &'a EnvironmentArgs,
    pub strategy: StrategyKind,
    pub out: Option<&'a PathBuf>,
    pub json: Option<&'a PathBuf>,
    pub format: OutputFormat,
}

pub fn handle(args: EvaluateArgs<'_>) -> Result<()> {
    let run_config = load_run_config(args.config)?;
    let lines = load_lines(args.input)?;
    let env = build_environment(args.environment, &run_config);
    let engine = StressEngine::new(run_config.engine)?;

    info!(
        "Evaluating {} lines at {:.1} °C, {:.1} m/s with strategy {}",
        lines.len(),
        env.ambient_temperature_c,
        env.wind_speed_mps,
        args.strategy
    );
    let report = engine.evaluate(&lines, &env, args.strategy)?;

    match args.format {
        OutputFormat::Plain => print_report(&report)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(io::stdout(), &ReportDocument::new(&env, &report))
                .context("serializing report to JSON")?;
            println!();
        }
    }
    report_diagnostics(&report.diagnostics);

    if let Some(path) = args.out {
        write_results_csv(path, &report.results)?;
        info!("Wrote {} results to {}", report.len(), path.display());
    }
    if let Some(path) = args.json {
        write_report_json(path, &env, &report)?;
        info!("Wrote report to {}", path.display());
    }
    Ok(())
}

fn print_report(report: &StressReport) -> Result<()> {
    print_table(
        "LINE\tRATING\tFLOW\tSTRESS %\tBAND\tMETHOD",
        report.results.iter().map(|r| {
            format!(
                "{}\t{:.2}\t{:.2}\t{:.1}\t{}\t{}",
                r.line_id, r.dynamic_rating, r.flow, r.stress_ratio, r.severity, r.method
            )
        }),
    )?;

    let counts = report
        .band_counts()
        .iter()
        .map(|(band, count)| format!("{}={}", band, count))
        .collect::<Vec<_>>()
        .join(" ");
    println!();
    println!(
        "{} lines ({} flows), max stress {:.1}%: {}",
        report.len(),
        if report.synthetic_flows {
            "synthetic"
        } else {
            "measured"
        },
        report.max_stress(),
        counts
    );
    Ok(())
}
