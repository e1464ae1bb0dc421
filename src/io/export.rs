//! CSV export for dispatch step records.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::types::StepRecord;

/// Column header for CSV telemetry export.
const HEADER: &str = "timestamp,production_mw,charge_mw,discharge_mw,\
                      grid_export_mw,soc_mwh,cycles_used";

/// Exports dispatch records to a CSV file at the given path.
///
/// Writes a header row followed by one data row per record. Produces
/// deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(records: &[StepRecord], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(records, buf)
}

/// Writes dispatch records as CSV to any writer.
///
/// The timestamp column uses the `YYYY-mm-dd HH:MM:SS` layout accepted by
/// the importer, so exported files feed back in unchanged.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(records: &[StepRecord], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    // Header
    wtr.write_record(HEADER.split(',').map(str::trim))?;

    // Data rows
    for r in records {
        wtr.write_record(&[
            r.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            format!("{:.4}", r.production_mw),
            format!("{:.4}", r.charge_mw),
            format!("{:.4}", r.discharge_mw),
            format!("{:.4}", r.grid_export_mw),
            format!("{:.4}", r.soc_mwh),
            format!("{:.4}", r.cycles_used),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
