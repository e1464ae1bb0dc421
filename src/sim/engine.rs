//! Dispatch engine: validation and the sequential fold over production rows.

use super::battery::{BatteryConfig, BatteryState};
use super::dispatch;
use super::error::SimError;
use super::summary::RunSummary;
use super::types::{ProductionRow, RunResult, StepRecord};

/// Stateful sequential dispatch processor.
///
/// Owns the single [`BatteryState`] of one in-flight run. Each row's
/// headroom depends on the state left by the previous row, so processing is
/// an intrinsically sequential left fold; concurrent runs must each own
/// their own `Engine`.
pub struct Engine {
    config: BatteryConfig,
    state: BatteryState,
}

impl Engine {
    /// Creates an engine with a validated configuration and an empty battery.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Configuration`] if any config field is
    /// non-positive. Nothing is processed on failure.
    pub fn new(config: BatteryConfig) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self {
            config,
            state: BatteryState::new(),
        })
    }

    /// Returns the run configuration.
    pub fn config(&self) -> &BatteryConfig {
        &self.config
    }

    /// Returns the current battery state snapshot.
    pub fn state(&self) -> &BatteryState {
        &self.state
    }

    /// Processes one row: decide, mutate state, assemble the record.
    ///
    /// Rows must be fed in timestamp order; [`Engine::run`] enforces this
    /// for whole sequences.
    pub fn step(&mut self, row: &ProductionRow) -> StepRecord {
        let action = dispatch::decide(&self.config, &self.state, row.production_mw);
        dispatch::apply(&self.config, &mut self.state, action);

        let charge_mw = action.charge_mw();
        let discharge_mw = action.discharge_mw();
        StepRecord {
            timestamp: row.timestamp,
            production_mw: row.production_mw,
            charge_mw,
            discharge_mw,
            grid_export_mw: row.production_mw - charge_mw + discharge_mw,
            soc_mwh: self.state.soc_mwh,
            cycles_used: self.state.cycles_used,
        }
    }

    /// Processes a complete ordered sequence and returns records, summary,
    /// and the final battery state.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Ordering`] if timestamps are not strictly
    /// increasing, checked before any row is processed.
    pub fn run(&mut self, rows: &[ProductionRow]) -> Result<RunResult, SimError> {
        check_strictly_increasing(rows)?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            records.push(self.step(row));
        }
        let summary = RunSummary::from_records(&records, &self.config);
        Ok(RunResult {
            records,
            summary,
            final_state: self.state,
        })
    }
}

fn check_strictly_increasing(rows: &[ProductionRow]) -> Result<(), SimError> {
    for (i, pair) in rows.windows(2).enumerate() {
        if pair[1].timestamp <= pair[0].timestamp {
            return Err(SimError::Ordering {
                index: i + 1,
                previous: pair[0].timestamp,
                timestamp: pair[1].timestamp,
            });
        }
    }
    Ok(())
}
