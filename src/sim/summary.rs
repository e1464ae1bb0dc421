//! Post-hoc run summary derived from the complete record vector.

use std::fmt;

use super::battery::BatteryConfig;
use super::types::StepRecord;

/// Aggregates an analyst reads off a finished run.
///
/// Computed post-hoc from the full `Vec<StepRecord>` so the reported numbers
/// always agree with the per-step data. Sums of hourly MW values are tallied
/// as MWh, matching the run's one-hour row convention.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Number of rows processed.
    pub steps: usize,
    /// Total power routed into the battery (MWh).
    pub total_charge_mwh: f32,
    /// Total power drawn from the battery (MWh).
    pub total_discharge_mwh: f32,
    /// Net production moved: `total_charge_mwh - total_discharge_mwh`.
    pub total_shifted_mwh: f32,
    /// Highest raw production in the series (MW).
    pub peak_production_mw: f32,
    /// Highest grid export after dispatch (MW).
    pub peak_grid_export_mw: f32,
    /// Highest state of charge reached (MWh).
    pub max_soc_mwh: f32,
    /// Final accumulated cycle usage.
    pub cycles_used: f32,
    /// Rows with nonzero charge or discharge.
    pub dispatch_steps: usize,
    /// Rows where raw production exceeded the interconnection cap.
    pub overcap_steps_before: usize,
    /// Rows where grid export still exceeded the cap after dispatch.
    pub overcap_steps_after: usize,
}

impl RunSummary {
    /// Computes all aggregates from the complete record vector.
    pub fn from_records(records: &[StepRecord], config: &BatteryConfig) -> Self {
        let mut total_charge_mwh = 0.0_f32;
        let mut total_discharge_mwh = 0.0_f32;
        let mut peak_production_mw = 0.0_f32;
        let mut peak_grid_export_mw = 0.0_f32;
        let mut max_soc_mwh = 0.0_f32;
        let mut dispatch_steps = 0_usize;
        let mut overcap_steps_before = 0_usize;
        let mut overcap_steps_after = 0_usize;

        for r in records {
            total_charge_mwh += r.charge_mw;
            total_discharge_mwh += r.discharge_mw;
            peak_production_mw = peak_production_mw.max(r.production_mw);
            peak_grid_export_mw = peak_grid_export_mw.max(r.grid_export_mw);
            max_soc_mwh = max_soc_mwh.max(r.soc_mwh);
            if r.charge_mw > 0.0 || r.discharge_mw > 0.0 {
                dispatch_steps += 1;
            }
            if r.production_mw > config.max_charge_mw {
                overcap_steps_before += 1;
            }
            if r.grid_export_mw > config.max_charge_mw {
                overcap_steps_after += 1;
            }
        }

        Self {
            steps: records.len(),
            total_charge_mwh,
            total_discharge_mwh,
            total_shifted_mwh: total_charge_mwh - total_discharge_mwh,
            peak_production_mw,
            peak_grid_export_mw,
            max_soc_mwh,
            cycles_used: records.last().map_or(0.0, |r| r.cycles_used),
            dispatch_steps,
            overcap_steps_before,
            overcap_steps_after,
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Dispatch Report ---")?;
        writeln!(f, "Charged into storage:  {:.2} MWh", self.total_charge_mwh)?;
        writeln!(
            f,
            "Discharged to grid:    {:.2} MWh",
            self.total_discharge_mwh
        )?;
        writeln!(f, "Production shifted:    {:.2} MWh", self.total_shifted_mwh)?;
        writeln!(f, "Peak production:       {:.2} MW", self.peak_production_mw)?;
        writeln!(
            f,
            "Peak grid export:      {:.2} MW",
            self.peak_grid_export_mw
        )?;
        writeln!(
            f,
            "Steps above cap:       {} before, {} after dispatch",
            self.overcap_steps_before, self.overcap_steps_after
        )?;
        writeln!(f, "Battery peak SoC:      {:.2} MWh", self.max_soc_mwh)?;
        writeln!(f, "Cycle usage:           {:.3}", self.cycles_used)?;
        write!(
            f,
            "Active dispatch steps: {} of {}",
            self.dispatch_steps, self.steps
        )
    }
}
