//! CSV patient-census loader.
//!
//! # CSV format
//!
//! One row per cell:
//!
//! ```csv
//! cell,patients
//! 0,3
//! 1,1
//! 3,4
//! ```
//!
//! Cells absent from the file get zero patients.  A cell index outside
//! `0..cell_count` is a parse error.  When a cell appears more than once, the
//! counts are summed; a sum past `u32::MAX` is a parse error.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{ScheduleError, ScheduleResult};

#[derive(Deserialize)]
struct CensusRecord {
    cell:     u32,
    patients: u32,
}

/// Load per-cell patient counts from a CSV file.
///
/// Returns a `Vec` of length `cell_count`, indexed by `CellId`.
pub fn load_census_csv(path: &Path, cell_count: usize) -> ScheduleResult<Vec<u32>> {
    let file = std::fs::File::open(path)?;
    load_census_reader(file, cell_count)
}

/// Like [`load_census_csv`] but accepts any `Read` source.
pub fn load_census_reader<R: Read>(reader: R, cell_count: usize) -> ScheduleResult<Vec<u32>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut counts = vec![0u32; cell_count];

    for result in csv_reader.deserialize::<CensusRecord>() {
        let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        let Some(slot) = counts.get_mut(row.cell as usize) else {
            return Err(ScheduleError::Parse(format!(
                "cell {} out of range: hospital has {cell_count} cells",
                row.cell
            )));
        };
        *slot = slot.checked_add(row.patients).ok_or_else(|| {
            ScheduleError::Parse(format!("patient count for cell {} overflows u32", row.cell))
        })?;
    }

    Ok(counts)
}
