//! CSV import of hourly production series.

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use chrono::NaiveDateTime;

use crate::sim::types::ProductionRow;

/// Parses a timestamp as `YYYY-mm-dd HH[:MM[:SS]]`.
///
/// The hour-only form matches spreadsheets that log `2025-01-06 13`; chrono
/// refuses to default the minute, so that layout is completed before parsing.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    for layout in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, layout) {
            return Some(ts);
        }
    }
    NaiveDateTime::parse_from_str(&format!("{s}:00"), "%Y-%m-%d %H:%M").ok()
}

/// Import failure with the offending data row when one is known.
#[derive(Debug)]
pub struct ImportError {
    /// 1-based data row number (header excluded), when attributable.
    pub row: Option<usize>,
    /// Human-readable description.
    pub message: String,
}

impl ImportError {
    fn file(message: String) -> Self {
        Self { row: None, message }
    }

    fn at(row: usize, message: String) -> Self {
        Self {
            row: Some(row),
            message,
        }
    }
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.row {
            Some(row) => write!(f, "import error: row {row}: {}", self.message),
            None => write!(f, "import error: {}", self.message),
        }
    }
}

impl std::error::Error for ImportError {}

impl From<csv::Error> for ImportError {
    fn from(e: csv::Error) -> Self {
        Self::file(e.to_string())
    }
}

impl From<io::Error> for ImportError {
    fn from(e: io::Error) -> Self {
        Self::file(e.to_string())
    }
}

/// Reads a production series from a CSV file.
///
/// # Errors
///
/// Returns an `ImportError` if the file cannot be opened or its contents
/// are rejected by [`read_production`].
pub fn read_production_csv(path: &Path) -> Result<Vec<ProductionRow>, ImportError> {
    let file = File::open(path)
        .map_err(|e| ImportError::file(format!("cannot open \"{}\": {e}", path.display())))?;
    read_production(io::BufReader::new(file))
}

/// Reads a production series from any reader.
///
/// The header must contain `timestamp` and `production_mw` columns
/// (case-insensitive); extra columns are ignored. Ordering is the engine's
/// check, not the importer's.
///
/// # Errors
///
/// Returns a row-numbered `ImportError` for unparseable timestamps and for
/// negative or non-finite production values.
pub fn read_production(reader: impl Read) -> Result<Vec<ProductionRow>, ImportError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let col = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| ImportError::file(format!("missing required column \"{name}\"")))
    };
    let ts_idx = col("timestamp")?;
    let prod_idx = col("production_mw")?;

    let mut rows = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let row_no = i + 1;
        let record = record?;

        let ts_field = record
            .get(ts_idx)
            .ok_or_else(|| ImportError::at(row_no, "missing timestamp field".into()))?;
        let timestamp = parse_timestamp(ts_field).ok_or_else(|| {
            ImportError::at(row_no, format!("cannot parse timestamp \"{ts_field}\""))
        })?;

        let prod_field = record
            .get(prod_idx)
            .ok_or_else(|| ImportError::at(row_no, "missing production field".into()))?;
        let production_mw: f32 = prod_field.parse().map_err(|_| {
            ImportError::at(row_no, format!("cannot parse production \"{prod_field}\""))
        })?;
        if !production_mw.is_finite() || production_mw < 0.0 {
            return Err(ImportError::at(
                row_no,
                format!("production must be finite and >= 0, got {production_mw}"),
            ));
        }

        rows.push(ProductionRow {
            timestamp,
            production_mw,
        });
    }
    Ok(rows)
}
