use std::path::Path;

use anyhow::Result;
use linestress_algo::normalize_external;
use linestress_core::{CollapseScheme, RatioScale};
use linestress_io::load_stress_csv;
use tracing::info;

use crate::commands::common::print_table;

pub fn handle(input: &Path, scheme: Option<CollapseScheme>) -> Result<()> {
    let rows = load_stress_csv(input)?;
    let values: Vec<f64> = rows.iter().map(|(_, v)| *v).collect();
    let normalized = normalize_external(&values);
    info!("Classifying {} values from {}", rows.len(), input.display());

    let header = match scheme {
        Some(_) => "LINE\tINPUT\tSTRESS %\tBAND\tCOARSE",
        None => "LINE\tINPUT\tSTRESS %\tBAND",
    };
    print_table(
        header,
        rows.iter()
            .zip(normalized.percent.iter().zip(normalized.bands()))
            .map(|((id, raw), (percent, band))| {
                let mut row = format!("{}\t{}\t{:.1}\t{}", id, raw, percent, band);
                if let Some(scheme) = scheme {
                    row.push_str(&format!("\t{}", scheme.classify(*percent)));
                }
                row
            }),
    )?;

    let scale = match normalized.scale {
        RatioScale::Fraction => "fractions (rescaled ×100)",
        RatioScale::Percent => "percent",
    };
    println!();
    println!("{} values read as {}", rows.len(), scale);
    Ok(())
}
