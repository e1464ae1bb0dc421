//! Per-row dispatch decision and battery state transition.
//!
//! The three-way charge/discharge/idle choice is a tagged decision so the
//! mutual-exclusivity invariant is structural: a single [`DispatchAction`]
//! can never carry both a charge and a discharge amount.

use super::battery::{BatteryConfig, BatteryState, STEP_ENERGY_HOURS};

/// Dispatch decision for one row. Amounts are MW, non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DispatchAction {
    /// Route surplus production into the battery.
    Charge(f32),
    /// Backfill grid export from the battery.
    Discharge(f32),
    /// Leave the battery untouched.
    Idle,
}

impl DispatchAction {
    /// Charging power of this decision (MW), zero unless charging.
    pub fn charge_mw(&self) -> f32 {
        match *self {
            Self::Charge(amount_mw) => amount_mw,
            _ => 0.0,
        }
    }

    /// Discharging power of this decision (MW), zero unless discharging.
    pub fn discharge_mw(&self) -> f32 {
        match *self {
            Self::Discharge(amount_mw) => amount_mw,
            _ => 0.0,
        }
    }
}

/// Selects the dispatch branch for one production value.
///
/// Branch priority, first match wins:
/// 1. Charge when production exceeds the interconnection charge threshold
///    and accumulated cycle usage is below the ceiling.
/// 2. Discharge when production is below the discharge threshold and the
///    battery holds energy. The cycle ceiling does not gate this branch.
/// 3. Idle otherwise.
///
/// The charge branch is taken whenever its condition holds, even when
/// headroom clamps the amount to zero; the resulting zero-amount action
/// leaves the state unchanged.
pub fn decide(config: &BatteryConfig, state: &BatteryState, production_mw: f32) -> DispatchAction {
    if production_mw > config.max_charge_mw && state.cycles_used < config.max_cycles_per_day {
        let amount_mw =
            (production_mw - config.max_charge_mw).min(state.charge_headroom_mw(config));
        DispatchAction::Charge(amount_mw)
    } else if production_mw < config.max_discharge_mw && state.soc_mwh > 0.0 {
        let amount_mw =
            (config.max_discharge_mw - production_mw).min(state.discharge_headroom_mw(config));
        DispatchAction::Discharge(amount_mw)
    } else {
        DispatchAction::Idle
    }
}

/// Applies a dispatch decision to the battery state.
///
/// Headroom clamping in [`decide`] guarantees the SOC bounds hold after the
/// update; cycle usage grows by the dispatched energy as a fraction of
/// capacity for both charge and discharge.
pub fn apply(config: &BatteryConfig, state: &mut BatteryState, action: DispatchAction) {
    match action {
        DispatchAction::Charge(amount_mw) => {
            state.soc_mwh += amount_mw * STEP_ENERGY_HOURS;
            state.cycles_used += amount_mw / config.energy_capacity_mwh;
        }
        DispatchAction::Discharge(amount_mw) => {
            state.soc_mwh -= amount_mw * STEP_ENERGY_HOURS;
            state.cycles_used += amount_mw / config.energy_capacity_mwh;
        }
        DispatchAction::Idle => {}
    }
}
