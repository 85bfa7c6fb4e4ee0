//! Input loading and environment assembly shared by the subcommands.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use linestress_core::{Diagnostics, Environment, Line, LineSet};
use linestress_io::{attach_flows, load_config, load_flows_csv, load_lines_csv, RunConfig};
use tabwriter::TabWriter;
use tracing::{info, warn};

use linestress_cli::cli::{EnvironmentArgs, InputArgs};

pub fn load_run_config(path: Option<&Path>) -> Result<RunConfig> {
    match path {
        Some(path) => {
            info!("Loading config from {}", path.display());
            load_config(path)
        }
        None => Ok(RunConfig::default()),
    }
}

/// Line table plus the optional flow table merged into it.
pub fn load_lines(input: &InputArgs) -> Result<LineSet> {
    let mut lines: Vec<Line> = load_lines_csv(&input.lines)?;
    info!("Loaded {} lines from {}", lines.len(), input.lines.display());

    if let Some(flows_path) = &input.flows {
        let flows = load_flows_csv(flows_path)?;
        let merge = attach_flows(&mut lines, &flows);
        info!(
            "Attached {} flows from {}",
            merge.attached,
            flows_path.display()
        );
        if !merge.unmatched.is_empty() {
            warn!(
                "{} flow rows match no line: {}",
                merge.unmatched.len(),
                merge.unmatched.join(", ")
            );
        }
    }

    Ok(LineSet::new(lines)?)
}

/// Config-file extended fields, then command-line overrides.
pub fn build_environment(args: &EnvironmentArgs, config: &RunConfig) -> Environment {
    let env = Environment::new(args.temperature, args.wind);
    let has_override = args.wind_angle.is_some()
        || args.latitude.is_some()
        || args.solar_time.is_some()
        || args.elevation.is_some()
        || args.date.is_some()
        || args.atmosphere.is_some()
        || args.orientation.is_some();
    if config.environment.is_none() && !has_override {
        return env;
    }

    let mut ext = config.environment.clone().unwrap_or_default();
    if let Some(v) = args.wind_angle {
        ext.wind_angle_deg = v;
    }
    if let Some(v) = args.latitude {
        ext.latitude_deg = v;
    }
    if let Some(v) = args.solar_time {
        ext.solar_time_hours = v;
    }
    if let Some(v) = args.elevation {
        ext.elevation_m = v;
    }
    if let Some(v) = args.date {
        ext.date = Some(v);
    }
    if let Some(v) = args.atmosphere {
        ext.atmosphere = v.into();
    }
    if let Some(v) = args.orientation {
        ext.orientation = v.into();
    }
    env.with_extended(ext)
}

/// Print diagnostics to stderr so stdout stays a clean table
pub fn report_diagnostics(diagnostics: &Diagnostics) {
    if !diagnostics.has_issues() {
        return;
    }
    eprintln!("{}", diagnostics.summary());
    for issue in &diagnostics.issues {
        eprintln!("  {}", issue);
    }
}

/// Render rows through a tab writer and print them
pub fn print_table(header: &str, rows: impl IntoIterator<Item = String>) -> Result<()> {
    let mut writer = TabWriter::new(Vec::new()).padding(2);
    writeln!(writer, "{}", header)?;
    for row in rows {
        writeln!(writer, "{}", row)?;
    }
    writer.flush()?;
    let table = String::from_utf8(writer.into_inner()?)?;
    print!("{table}");
    Ok(())
}
