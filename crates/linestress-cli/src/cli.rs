use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use linestress_core::{Atmosphere, CollapseScheme, ConductorOrientation, StrategyKind};

#[derive(Parser, Debug)]
#[command(author, version, about = "Weather-dependent line ratings and stress bands", long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: tracing::Level,

    /// TOML file with engine settings and an optional [environment] table
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rate every line and classify its stress
    Evaluate {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        environment: EnvironmentArgs,
        /// Rating strategy: auto, simplified, physical
        #[arg(long, default_value = "auto")]
        strategy: StrategyKind,
        /// Write per-line results to this CSV file
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Write the full report (results and diagnostics) to this JSON file
        #[arg(long)]
        json: Option<PathBuf>,
        /// Output format for stdout
        #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
        format: OutputFormat,
    },
    /// Classify stress values computed elsewhere (fractions or percent)
    Classify {
        /// CSV with an id column and a stress/utilization column
        input: PathBuf,
        /// Also collapse onto three bands: node or map
        #[arg(long)]
        scheme: Option<CollapseScheme>,
    },
    /// Re-evaluate over a temperature × wind grid
    Sweep {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        environment: EnvironmentArgs,
        /// Temperatures as start:end:steps (°C)
        #[arg(long, default_value = "0:50:6", allow_hyphen_values = true)]
        temperatures: Grid,
        /// Wind speeds as start:end:steps (m/s)
        #[arg(long, default_value = "0:10:3", allow_hyphen_values = true)]
        winds: Grid,
        #[arg(long, default_value = "auto")]
        strategy: StrategyKind,
        /// Write the grid to this CSV file
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Worst incident-line stress per bus
    Buses {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        environment: EnvironmentArgs,
        #[arg(long, default_value = "auto")]
        strategy: StrategyKind,
        /// Collapse scheme: node (60/90) or map (80/100)
        #[arg(long, default_value = "node")]
        scheme: CollapseScheme,
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Line table (CSV)
    pub lines: PathBuf,
    /// Separate nominal-flow table keyed by line id (CSV)
    #[arg(long)]
    pub flows: Option<PathBuf>,
}

/// Ambient conditions. Extended fields override the config file.
#[derive(Args, Debug, Clone)]
pub struct EnvironmentArgs {
    /// Ambient temperature (°C)
    #[arg(short, long, default_value_t = 25.0, allow_hyphen_values = true)]
    pub temperature: f64,
    /// Wind speed (m/s)
    #[arg(short, long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub wind: f64,
    /// Angle between wind and conductor (degrees)
    #[arg(long)]
    pub wind_angle: Option<f64>,
    /// Latitude (degrees, north positive)
    #[arg(long, allow_hyphen_values = true)]
    pub latitude: Option<f64>,
    /// Local solar time (hours)
    #[arg(long)]
    pub solar_time: Option<f64>,
    /// Elevation above sea level (m)
    #[arg(long)]
    pub elevation: Option<f64>,
    /// Date for solar declination (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long, value_enum)]
    pub atmosphere: Option<AtmosphereArg>,
    #[arg(long, value_enum)]
    pub orientation: Option<OrientationArg>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum AtmosphereArg {
    Clear,
    Industrial,
}

impl From<AtmosphereArg> for Atmosphere {
    fn from(value: AtmosphereArg) -> Self {
        match value {
            AtmosphereArg::Clear => Atmosphere::Clear,
            AtmosphereArg::Industrial => Atmosphere::Industrial,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OrientationArg {
    EastWest,
    NorthSouth,
}

impl From<OrientationArg> for ConductorOrientation {
    fn from(value: OrientationArg) -> Self {
        match value {
            OrientationArg::EastWest => ConductorOrientation::EastWest,
            OrientationArg::NorthSouth => ConductorOrientation::NorthSouth,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

/// Evenly spaced values parsed from `start:end:steps`, or a single number.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid(pub Vec<f64>);

impl FromStr for Grid {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = input.split(':').map(str::trim).collect();
        let number = |s: &str| {
            s.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| format!("'{}' is not a finite number", s))
        };
        match parts.as_slice() {
            [single] => Ok(Grid(vec![number(single)?])),
            [start, end, steps] => {
                let steps: usize = steps
                    .parse()
                    .map_err(|_| format!("'{}' is not a step count", steps))?;
                if steps == 0 {
                    return Err("step count must be at least 1".to_string());
                }
                Ok(Grid(linestress_algo::linspace(
                    number(start)?,
                    number(end)?,
                    steps,
                )))
            }
            _ => Err(format!(
                "expected start:end:steps or a single value, got '{}'",
                input
            )),
        }
    }
}
