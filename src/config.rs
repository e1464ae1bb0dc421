//! TOML-based scenario configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::io::import::parse_timestamp;
use crate::sim::battery::BatteryConfig;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Battery and interconnection parameters.
    pub battery: BatteryConfig,
    /// Synthetic wind-production profile parameters, used when no input
    /// file is supplied.
    pub profile: ProfileConfig,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self::baseline()
    }
}

/// Synthetic wind-production profile parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileConfig {
    /// Number of hourly rows to generate (must be > 0).
    pub hours: usize,
    /// Timestamp of the first row, `YYYY-mm-dd HH[:MM[:SS]]`.
    pub start: String,
    /// Mean production level (MW).
    pub mean_mw: f32,
    /// Diurnal swing amplitude (MW).
    pub amp_mw: f32,
    /// Phase offset of the diurnal swing (radians).
    pub phase_rad: f32,
    /// Gaussian noise standard deviation (MW).
    pub noise_std_mw: f32,
    /// Random seed for reproducible noise.
    pub seed: u64,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            hours: 168,
            start: "2025-01-06 00:00".to_string(),
            mean_mw: 6.0,
            amp_mw: 3.0,
            phase_rad: 0.0,
            noise_std_mw: 0.8,
            seed: 42,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"battery.power_rating_mw"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl ScenarioConfig {
    /// Returns the baseline scenario: a 10 MW / 20 MWh battery behind a
    /// 5 MW interconnection, one week of moderate wind.
    pub fn baseline() -> Self {
        Self {
            battery: BatteryConfig::default(),
            profile: ProfileConfig::default(),
        }
    }

    /// Returns the high-wind preset: a windier week and a larger battery
    /// behind the same 5 MW connection.
    pub fn high_wind() -> Self {
        Self {
            battery: BatteryConfig {
                power_rating_mw: 15.0,
                energy_capacity_mwh: 30.0,
                max_cycles_per_day: 3.0,
                ..BatteryConfig::default()
            },
            profile: ProfileConfig {
                mean_mw: 9.0,
                amp_mw: 5.0,
                noise_std_mw: 1.2,
                ..ProfileConfig::default()
            },
        }
    }

    /// Returns the small-battery preset: an undersized unit that leaves
    /// residual production above the cap.
    pub fn small_battery() -> Self {
        Self {
            battery: BatteryConfig {
                power_rating_mw: 4.0,
                energy_capacity_mwh: 6.0,
                ..BatteryConfig::default()
            },
            profile: ProfileConfig::default(),
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "high_wind", "small_battery"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "high_wind" => Ok(Self::high_wind()),
            "small_battery" => Ok(Self::small_battery()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let b = &self.battery;
        let battery_fields = [
            ("battery.power_rating_mw", b.power_rating_mw),
            ("battery.energy_capacity_mwh", b.energy_capacity_mwh),
            ("battery.max_cycles_per_day", b.max_cycles_per_day),
            ("battery.max_charge_mw", b.max_charge_mw),
            ("battery.max_discharge_mw", b.max_discharge_mw),
        ];
        for (field, value) in battery_fields {
            if value <= 0.0 || !value.is_finite() {
                errors.push(ConfigError {
                    field: field.into(),
                    message: format!("must be > 0, got {value}"),
                });
            }
        }

        let p = &self.profile;
        if p.hours == 0 {
            errors.push(ConfigError {
                field: "profile.hours".into(),
                message: "must be > 0".into(),
            });
        }
        if p.mean_mw < 0.0 || !p.mean_mw.is_finite() {
            errors.push(ConfigError {
                field: "profile.mean_mw".into(),
                message: "must be >= 0".into(),
            });
        }
        if p.amp_mw < 0.0 || !p.amp_mw.is_finite() {
            errors.push(ConfigError {
                field: "profile.amp_mw".into(),
                message: "must be >= 0".into(),
            });
        }
        if p.noise_std_mw < 0.0 || !p.noise_std_mw.is_finite() {
            errors.push(ConfigError {
                field: "profile.noise_std_mw".into(),
                message: "must be >= 0".into(),
            });
        }
        if parse_timestamp(&p.start).is_none() {
            errors.push(ConfigError {
                field: "profile.start".into(),
                message: format!(
                    "\"{}\" is not a timestamp of the form YYYY-mm-dd HH[:MM[:SS]]",
                    p.start
                ),
            });
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_preset_valid() {
        let cfg = ScenarioConfig::baseline();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "baseline should be valid: {errors:?}");
    }

    #[test]
    fn from_preset_unknown() {
        let err = ScenarioConfig::from_preset("nonexistent");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
    }

    #[test]
    fn all_presets_are_valid() {
        for name in ScenarioConfig::PRESETS {
            let cfg = ScenarioConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[battery]
power_rating_mw = 12.0
energy_capacity_mwh = 24.0
max_cycles_per_day = 1.5
max_charge_mw = 6.0
max_discharge_mw = 4.0

[profile]
hours = 48
start = "2025-03-01 00:00"
mean_mw = 7.0
amp_mw = 2.0
phase_rad = 0.5
noise_std_mw = 0.4
seed = 7
"#;
        let cfg = ScenarioConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.battery.power_rating_mw), Some(12.0));
        assert_eq!(cfg.as_ref().map(|c| c.profile.hours), Some(48));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[battery]
power_rating_mw = 10.0
bogus_field = true
"#;
        let result = ScenarioConfig::from_toml_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[profile]
seed = 99
"#;
        let cfg = ScenarioConfig::from_toml_str(toml);
        assert!(cfg.is_ok());
        let cfg = cfg.ok();
        // seed overridden
        assert_eq!(cfg.as_ref().map(|c| c.profile.seed), Some(99));
        // battery and remaining profile fields kept default
        assert_eq!(cfg.as_ref().map(|c| c.battery.energy_capacity_mwh), Some(20.0));
        assert_eq!(cfg.as_ref().map(|c| c.profile.hours), Some(168));
    }

    #[test]
    fn validation_catches_nonpositive_battery_field() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.battery.max_charge_mw = 0.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "battery.max_charge_mw"));
    }

    #[test]
    fn validation_catches_zero_hours() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.profile.hours = 0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "profile.hours"));
    }

    #[test]
    fn validation_catches_bad_start_timestamp() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.profile.start = "next tuesday".to_string();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "profile.start"));
    }

    #[test]
    fn validation_collects_multiple_errors() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.battery.power_rating_mw = -1.0;
        cfg.battery.max_discharge_mw = 0.0;
        cfg.profile.hours = 0;
        assert!(cfg.validate().len() >= 3);
    }

    #[test]
    fn high_wind_has_windier_profile() {
        let base = ScenarioConfig::baseline();
        let windy = ScenarioConfig::high_wind();
        assert!(windy.profile.mean_mw > base.profile.mean_mw);
        assert!(windy.battery.energy_capacity_mwh > base.battery.energy_capacity_mwh);
    }

    #[test]
    fn small_battery_is_undersized() {
        let base = ScenarioConfig::baseline();
        let small = ScenarioConfig::small_battery();
        assert!(small.battery.power_rating_mw < base.battery.power_rating_mw);
        assert!(small.battery.energy_capacity_mwh < base.battery.energy_capacity_mwh);
    }
}
