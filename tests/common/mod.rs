//! Shared test fixtures for integration tests.

use bess_sim::sim::battery::BatteryConfig;
use bess_sim::sim::types::ProductionRow;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

/// First timestamp of every fixture series.
pub fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 6)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid timestamp")
}

/// Hourly rows from a slice of production values.
pub fn hourly_rows(values: &[f32]) -> Vec<ProductionRow> {
    values
        .iter()
        .enumerate()
        .map(|(i, &production_mw)| ProductionRow {
            timestamp: start() + TimeDelta::hours(i as i64),
            production_mw,
        })
        .collect()
}

/// The 10 MW / 20 MWh baseline battery behind a 5 MW interconnection.
pub fn default_battery() -> BatteryConfig {
    BatteryConfig::default()
}
