//! Core dispatch types: input rows, per-row results, and run output.

use std::fmt;

use chrono::NaiveDateTime;

use super::battery::BatteryState;
use super::summary::RunSummary;

/// One hourly production reading, ordered by timestamp ascending.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductionRow {
    /// Reading instant; strictly increasing across the input sequence.
    pub timestamp: NaiveDateTime,
    /// Raw generation for the period (MW, non-negative).
    pub production_mw: f32,
}

/// The dispatch decision outcome for one row.
///
/// `charge_mw` and `discharge_mw` are never both nonzero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispatchResult {
    /// Power routed into the battery (MW, non-negative).
    pub charge_mw: f32,
    /// Power drawn from the battery (MW, non-negative).
    pub discharge_mw: f32,
    /// Power delivered to the grid: `production - charge + discharge` (MW).
    pub grid_export_mw: f32,
}

/// Complete record of one processed row: input, decision, and the battery
/// state left behind. This is the join the reporting layer consumes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepRecord {
    /// Timestamp of the input row.
    pub timestamp: NaiveDateTime,
    /// Raw production for the period (MW).
    pub production_mw: f32,
    /// Power routed into the battery (MW).
    pub charge_mw: f32,
    /// Power drawn from the battery (MW).
    pub discharge_mw: f32,
    /// Power delivered to the grid (MW).
    pub grid_export_mw: f32,
    /// State of charge after this row (MWh).
    pub soc_mwh: f32,
    /// Accumulated cycle usage after this row.
    pub cycles_used: f32,
}

impl StepRecord {
    /// The decision triple carried by this record.
    pub fn result(&self) -> DispatchResult {
        DispatchResult {
            charge_mw: self.charge_mw,
            discharge_mw: self.discharge_mw,
            grid_export_mw: self.grid_export_mw,
        }
    }
}

impl fmt::Display for StepRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | prod={:>6.2} MW  grid={:>6.2} MW | charge={:.2}  discharge={:.2} | \
             SoC={:.2} MWh  cycles={:.3}",
            self.timestamp.format("%Y-%m-%d %H:%M"),
            self.production_mw,
            self.grid_export_mw,
            self.charge_mw,
            self.discharge_mw,
            self.soc_mwh,
            self.cycles_used,
        )
    }
}

/// Output of one complete simulation run.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// One record per input row, in input order.
    pub records: Vec<StepRecord>,
    /// Aggregates derived from the full record vector.
    pub summary: RunSummary,
    /// Battery state after the last row.
    pub final_state: BatteryState,
}
