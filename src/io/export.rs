//! CSV export for step results and lot snapshots.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::lot::SpotRow;
use crate::sim::types::StepResult;

/// Column header for step telemetry export.
const STEP_HEADER: &str =
    "timestep,arrivals,parked,rejected,departures,occupied,available,occupancy_pct";

/// Column header for spot snapshot export.
const SNAPSHOT_HEADER: &str = "floor,spot,accepted_type,status,license_plate";

/// Exports simulation results to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(results: &[StepResult], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_csv(results, io::BufWriter::new(file))
}

/// Writes simulation results as CSV to any writer.
///
/// One header row, then one row per step. Output is deterministic for
/// identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(results: &[StepResult], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(STEP_HEADER.split(','))?;

    for r in results {
        wtr.write_record(&[
            r.timestep.to_string(),
            r.arrivals.to_string(),
            r.parked.to_string(),
            r.rejected.to_string(),
            r.departures.to_string(),
            r.occupied.to_string(),
            r.available().to_string(),
            format!("{:.2}", r.occupancy_pct()),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports a lot snapshot to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_snapshot_csv(rows: &[SpotRow], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_snapshot_csv(rows, io::BufWriter::new(file))
}

/// Writes one row per spot: floor, index, accepted type, status, and the
/// occupant's plate (empty when available).
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_snapshot_csv(rows: &[SpotRow], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(SNAPSHOT_HEADER.split(','))?;

    for row in rows {
        let status = if row.license_plate.is_some() {
            "occupied"
        } else {
            "available"
        };
        wtr.write_record([
            row.floor.to_string().as_str(),
            row.spot.to_string().as_str(),
            row.accepted_type.as_str(),
            status,
            row.license_plate.as_deref().unwrap_or(""),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
