use serde::Deserialize;

use super::error::SimError;

/// Hours of energy transfer assumed for one hourly production row.
///
/// The SOC update multiplies dispatched power by this constant and the
/// headroom computation divides by it, so the two stay paired. Rows are
/// assumed hourly; timestamp spacing does not enter the arithmetic.
pub const STEP_ENERGY_HOURS: f32 = 0.5;

/// Battery energy storage system parameters, fixed for one simulation run.
///
/// `max_charge_mw` and `max_discharge_mw` are the grid interconnection's
/// import/export thresholds: production above `max_charge_mw` triggers
/// charging, production below `max_discharge_mw` triggers discharging.
///
/// # Examples
///
/// ```
/// use bess_sim::sim::battery::BatteryConfig;
///
/// let config = BatteryConfig::default();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatteryConfig {
    /// Instantaneous power limit of the battery itself (MW).
    pub power_rating_mw: f32,

    /// Usable energy capacity (MWh).
    pub energy_capacity_mwh: f32,

    /// Ceiling on accumulated cycle usage that gates further charging.
    ///
    /// Usage accumulates over the whole run and never resets at day
    /// boundaries; discharging is never blocked by this ceiling.
    pub max_cycles_per_day: f32,

    /// Interconnection threshold above which production is charged away (MW).
    pub max_charge_mw: f32,

    /// Interconnection threshold below which the battery backfills (MW).
    pub max_discharge_mw: f32,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            power_rating_mw: 10.0,
            energy_capacity_mwh: 20.0,
            max_cycles_per_day: 2.0,
            max_charge_mw: 5.0,
            max_discharge_mw: 5.0,
        }
    }
}

impl BatteryConfig {
    /// Checks that every field is strictly positive.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Configuration`] naming the first offending field.
    /// Non-finite values are rejected as well.
    pub fn validate(&self) -> Result<(), SimError> {
        let fields = [
            ("power_rating_mw", self.power_rating_mw),
            ("energy_capacity_mwh", self.energy_capacity_mwh),
            ("max_cycles_per_day", self.max_cycles_per_day),
            ("max_charge_mw", self.max_charge_mw),
            ("max_discharge_mw", self.max_discharge_mw),
        ];
        for (field, value) in fields {
            // NaN fails the finiteness check
            if value <= 0.0 || !value.is_finite() {
                return Err(SimError::Configuration { field, value });
            }
        }
        Ok(())
    }
}

/// Mutable battery state, owned by the engine and mutated once per row.
///
/// The SOC invariant `0 <= soc_mwh <= energy_capacity_mwh` is maintained by
/// the headroom computation; no post-hoc clamping occurs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryState {
    /// Energy currently stored (MWh).
    pub soc_mwh: f32,
    /// Accumulated fractional cycle usage, non-decreasing across a run.
    pub cycles_used: f32,
}

impl BatteryState {
    /// An empty battery with no cycle usage, the state every run starts from.
    pub fn new() -> Self {
        Self {
            soc_mwh: 0.0,
            cycles_used: 0.0,
        }
    }

    /// Maximum additional charging power available this row (MW).
    ///
    /// Bounded by the interconnection charge threshold, the battery power
    /// rating, and the remaining energy capacity converted to power over
    /// the step's energy-transfer window.
    pub fn charge_headroom_mw(&self, config: &BatteryConfig) -> f32 {
        config
            .max_charge_mw
            .min(config.power_rating_mw)
            .min((config.energy_capacity_mwh - self.soc_mwh) / STEP_ENERGY_HOURS)
    }

    /// Maximum discharging power available this row (MW).
    pub fn discharge_headroom_mw(&self, config: &BatteryConfig) -> f32 {
        config
            .max_discharge_mw
            .min(config.power_rating_mw)
            .min(self.soc_mwh / STEP_ENERGY_HOURS)
    }
}

impl Default for BatteryState {
    fn default() -> Self {
        Self::new()
    }
}
