//! Line tables.
//!
//! Expected format (only the id column is required; header names are matched
//! case-insensitively against the aliases below):
//!
//! ```csv
//! name,s_nom,p0_nominal,v_nom,bus0,bus1,Diameter,RLo,RHi,MOT
//! L1,200,150,138,B1,B2,0.741,0.0000513,0.0000563,80
//! L2,,,,B2,B3,,,,
//! ```
//!
//! | Field | Aliases | Unit |
//! |-------|---------|------|
//! | id | `name`, `id`, `line_id`, `line` | |
//! | nominal rating | `s_nom`, `rating`, `nominal_rating` | MVA or A |
//! | nominal flow | `p0_nominal`, `flow`, `nominal_flow`, `p0` | same as rating |
//! | voltage | `v_nom`, `voltage_kv`, `nominal_voltage_kv` | kV |
//! | endpoints | `from`/`bus0`/`from_bus`, `to`/`bus1`/`to_bus` | |
//! | diameter | `Diameter` (in), `diameter_mm` (mm) | |
//! | resistance | `RLo`/`RHi` (Ω/ft), `r_low_ohm_per_m`/`r_high_ohm_per_m` | |
//! | resistance temps | `TLo`/`THi`, `t_low_c`/`t_high_c` | °C |
//! | max temperature | `MOT`, `Tc`, `max_operating_temp_c` | °C |

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use linestress_core::units::MM_PER_INCH;
use linestress_core::{ConductorGeometry, Line};

use crate::columns::{number, text, Column, ID};
use crate::error::TableError;

const METERS_PER_FOOT: f64 = 0.3048;

const RATING: Column = Column::new("rating", &["s_nom", "rating", "nominal_rating"]);
pub(crate) const FLOW: Column = Column::new(
    "flow",
    &["p0_nominal", "flow", "nominal_flow", "p0"],
);
const VOLTAGE: Column = Column::new("voltage", &["v_nom", "voltage_kv", "nominal_voltage_kv"]);
const FROM: Column = Column::new("from", &["from", "bus0", "from_bus"]);
const TO: Column = Column::new("to", &["to", "bus1", "to_bus"]);
const DIAMETER_IN: Column = Column::new("diameter", &["Diameter", "diameter_in"]);
const DIAMETER_MM: Column = Column::new("diameter_mm", &["diameter_mm"]);
const R_LOW_FT: Column = Column::new("RLo", &["RLo"]);
const R_HIGH_FT: Column = Column::new("RHi", &["RHi"]);
const R_LOW_M: Column = Column::new("r_low_ohm_per_m", &["r_low_ohm_per_m"]);
const R_HIGH_M: Column = Column::new("r_high_ohm_per_m", &["r_high_ohm_per_m"]);
const T_LOW: Column = Column::new("TLo", &["TLo", "t_low_c"]);
const T_HIGH: Column = Column::new("THi", &["THi", "t_high_c"]);
const MAX_TEMP: Column = Column::new("MOT", &["MOT", "Tc", "max_operating_temp_c"]);

/// Resolved column positions for one table.
struct LineColumns {
    id: usize,
    rating: Option<usize>,
    flow: Option<usize>,
    voltage: Option<usize>,
    from: Option<usize>,
    to: Option<usize>,
    diameter_in: Option<usize>,
    diameter_mm: Option<usize>,
    r_low_ft: Option<usize>,
    r_high_ft: Option<usize>,
    r_low_m: Option<usize>,
    r_high_m: Option<usize>,
    t_low: Option<usize>,
    t_high: Option<usize>,
    max_temp: Option<usize>,
}

impl LineColumns {
    fn resolve(headers: &StringRecord) -> Result<Self, TableError> {
        Ok(Self {
            id: ID.require(headers)?,
            rating: RATING.find(headers),
            flow: FLOW.find(headers),
            voltage: VOLTAGE.find(headers),
            from: FROM.find(headers),
            to: TO.find(headers),
            diameter_in: DIAMETER_IN.find(headers),
            diameter_mm: DIAMETER_MM.find(headers),
            r_low_ft: R_LOW_FT.find(headers),
            r_high_ft: R_HIGH_FT.find(headers),
            r_low_m: R_LOW_M.find(headers),
            r_high_m: R_HIGH_M.find(headers),
            t_low: T_LOW.find(headers),
            t_high: T_HIGH.find(headers),
            max_temp: MAX_TEMP.find(headers),
        })
    }

    fn parse(&self, record: &StringRecord, row: usize) -> Result<Line, TableError> {
        let num = |index: Option<usize>, column: &Column| number(record, index, row, column.name);

        let id = text(record, Some(self.id)).ok_or(TableError::EmptyId { row })?;

        let per_foot = |v: f64| v / METERS_PER_FOOT;
        let conductor = ConductorGeometry {
            r_low_ohm_per_m: num(self.r_low_m, &R_LOW_M)?
                .or(num(self.r_low_ft, &R_LOW_FT)?.map(per_foot)),
            r_high_ohm_per_m: num(self.r_high_m, &R_HIGH_M)?
                .or(num(self.r_high_ft, &R_HIGH_FT)?.map(per_foot)),
            t_low_c: num(self.t_low, &T_LOW)?,
            t_high_c: num(self.t_high, &T_HIGH)?,
            diameter_mm: num(self.diameter_mm, &DIAMETER_MM)?
                .or(num(self.diameter_in, &DIAMETER_IN)?.map(|d| d * MM_PER_INCH)),
            max_operating_temp_c: num(self.max_temp, &MAX_TEMP)?,
        };

        Ok(Line {
            id: id.to_string(),
            nominal_rating: num(self.rating, &RATING)?,
            nominal_flow: num(self.flow, &FLOW)?,
            conductor: (!conductor.is_empty()).then_some(conductor),
            nominal_voltage_kv: num(self.voltage, &VOLTAGE)?,
            from_bus: text(record, self.from).map(str::to_string),
            to_bus: text(record, self.to).map(str::to_string),
        })
    }
}

/// Parse a line table from any reader.
///
/// Values are taken as written: missing ratings stay `None` so the engine can
/// substitute its default and report it.
pub fn read_lines<R: Read>(reader: R) -> Result<Vec<Line>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);
    let headers = rdr.headers().context("reading line table header")?.clone();
    let columns = LineColumns::resolve(&headers)?;

    let mut lines = Vec::new();
    for (index, result) in rdr.records().enumerate() {
        let row = index + 1;
        let record = result.with_context(|| format!("reading line table row {}", row))?;
        lines.push(columns.parse(&record, row)?);
    }
    Ok(lines)
}

/// Load a line table from a CSV file.
pub fn load_lines_csv(path: &Path) -> Result<Vec<Line>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening line table: {}", path.display()))?;
    read_lines(file).with_context(|| format!("parsing line table: {}", path.display()))
}
