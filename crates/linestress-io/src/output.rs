//! Result tables and JSON reports.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use linestress_algo::{BusStress, StressReport, SweepPoint};
use linestress_core::{Environment, SeverityBand, StressResult};
use serde::Serialize;

/// Write one row per line result.
///
/// Columns: `line_id,dynamic_rating,flow,stress_ratio,severity,method,flow_source`
pub fn write_results<W: Write>(writer: W, results: &[StressResult]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for result in results {
        wtr.serialize(result)
            .with_context(|| format!("writing result row for {}", result.line_id))?;
    }
    wtr.flush().context("flushing results CSV")?;
    Ok(())
}

pub fn write_results_csv(path: &Path, results: &[StressResult]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating results CSV: {}", path.display()))?;
    write_results(file, results)
}

pub fn write_buses_csv(path: &Path, buses: &[BusStress]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("creating bus CSV: {}", path.display()))?;
    for bus in buses {
        wtr.serialize(bus)
            .with_context(|| format!("writing bus row for {}", bus.bus))?;
    }
    wtr.flush().context("flushing bus CSV")?;
    Ok(())
}

/// One row per grid point with a count column per severity band.
pub fn write_sweep<W: Write>(writer: W, points: &[SweepPoint]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    let mut header = vec!["ambient_temperature_c".to_string(), "wind_speed_mps".to_string()];
    header.extend(SeverityBand::ALL.iter().map(|b| b.as_str().to_string()));
    header.push("max_stress".to_string());
    header.push("synthetic_flows".to_string());
    wtr.write_record(&header).context("writing sweep header")?;

    for point in points {
        let mut record = vec![
            point.ambient_temperature_c.to_string(),
            point.wind_speed_mps.to_string(),
        ];
        record.extend(SeverityBand::ALL.iter().map(|b| point.count(*b).to_string()));
        record.push(format!("{:.3}", point.max_stress));
        record.push(point.synthetic_flows.to_string());
        wtr.write_record(&record).context("writing sweep row")?;
    }
    wtr.flush().context("flushing sweep CSV")?;
    Ok(())
}

pub fn write_sweep_csv(path: &Path, points: &[SweepPoint]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating sweep CSV: {}", path.display()))?;
    write_sweep(file, points)
}

/// JSON document wrapping a report with the conditions that produced it.
#[derive(Debug, Serialize)]
pub struct ReportDocument<'a> {
    pub generated_at: DateTime<Utc>,
    pub environment: &'a Environment,
    #[serde(flatten)]
    pub report: &'a StressReport,
}

impl<'a> ReportDocument<'a> {
    pub fn new(environment: &'a Environment, report: &'a StressReport) -> Self {
        Self {
            generated_at: Utc::now(),
            environment,
            report,
        }
    }
}

pub fn write_report_json(path: &Path, env: &Environment, report: &StressReport) -> Result<()> {
    let json = serde_json::to_string_pretty(&ReportDocument::new(env, report))
        .context("serializing stress report to JSON")?;
    std::fs::write(path, json).with_context(|| format!("writing JSON to {}", path.display()))?;
    Ok(())
}
