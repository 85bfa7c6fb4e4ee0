//! Separate nominal-flow tables keyed by line id.
//!
//! ```csv
//! name,p0_nominal
//! L1,150
//! L2,-40
//! ```

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, Trim};
use linestress_core::Line;

use crate::columns::{number, text, ID};
use crate::error::TableError;
use crate::lines::FLOW;

/// Parse a flow table. Rows with an empty flow cell are skipped; a repeated
/// id keeps its last value.
pub fn read_flows<R: Read>(reader: R) -> Result<HashMap<String, f64>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);
    let headers = rdr.headers().context("reading flow table header")?.clone();
    let id_col = ID.require(&headers)?;
    let flow_col = FLOW.require(&headers)?;

    let mut flows = HashMap::new();
    for (index, result) in rdr.records().enumerate() {
        let row = index + 1;
        let record = result.with_context(|| format!("reading flow table row {}", row))?;
        let id = text(&record, Some(id_col)).ok_or(TableError::EmptyId { row })?;
        if let Some(flow) = number(&record, Some(flow_col), row, FLOW.name)? {
            flows.insert(id.to_string(), flow);
        }
    }
    Ok(flows)
}

pub fn load_flows_csv(path: &Path) -> Result<HashMap<String, f64>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening flow table: {}", path.display()))?;
    read_flows(file).with_context(|| format!("parsing flow table: {}", path.display()))
}

/// Result of merging a flow table into a line list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowMerge {
    /// Lines whose flow was set from the table
    pub attached: usize,
    /// Table ids with no matching line, sorted
    pub unmatched: Vec<String>,
}

/// Overwrite each line's flow with the table value for its id. Lines missing
/// from the table keep whatever flow they had.
pub fn attach_flows(lines: &mut [Line], flows: &HashMap<String, f64>) -> FlowMerge {
    let mut merge = FlowMerge::default();
    for line in lines.iter_mut() {
        if let Some(flow) = flows.get(&line.id) {
            line.nominal_flow = Some(*flow);
            merge.attached += 1;
        }
    }

    let mut unmatched: Vec<String> = flows
        .keys()
        .filter(|id| !lines.iter().any(|l| &l.id == *id))
        .cloned()
        .collect();
    unmatched.sort();
    merge.unmatched = unmatched;
    merge
}
