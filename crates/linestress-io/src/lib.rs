//! # linestress-io: File Adapters
//!
//! CSV line and flow tables in, CSV/JSON results out, TOML configuration.
//!
//! Loaders return [`anyhow::Result`] with the file path in the error context;
//! structural table problems are [`TableError`]s underneath and can be
//! recovered with `downcast_ref`.
//!
//! ```rust
//! use linestress_io::read_lines;
//!
//! let lines = read_lines("name,s_nom,p0_nominal\nL1,200,150\n".as_bytes()).unwrap();
//! assert_eq!(lines[0].nominal_rating, Some(200.0));
//! ```

mod columns;
pub mod config;
pub mod error;
pub mod flows;
pub mod lines;
pub mod output;
pub mod ratios;

pub use config::{load_config, parse_config, RunConfig};
pub use error::TableError;
pub use flows::{attach_flows, load_flows_csv, read_flows, FlowMerge};
pub use lines::{load_lines_csv, read_lines};
pub use output::{
    write_buses_csv, write_report_json, write_results, write_results_csv, write_sweep,
    write_sweep_csv, ReportDocument,
};
pub use ratios::{load_stress_csv, read_stress_values};
