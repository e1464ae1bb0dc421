//! Seeded synthetic wind-production profiles.
//!
//! Stands in for a metered series when no input file is supplied: a diurnal
//! sinusoid around a mean level plus Gaussian gust noise, clamped at zero.

use chrono::{NaiveDateTime, TimeDelta};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::config::{ConfigError, ProfileConfig};
use crate::io::import::parse_timestamp;
use crate::sim::types::ProductionRow;

/// A wind-production profile generator with reproducible noise.
#[derive(Debug, Clone)]
pub struct WindProfile {
    /// Mean production level (MW).
    pub mean_mw: f32,

    /// Diurnal swing amplitude (MW).
    pub amp_mw: f32,

    /// Phase offset of the diurnal swing (radians).
    pub phase_rad: f32,

    /// Gaussian gust noise standard deviation (MW).
    pub noise_std_mw: f32,

    /// Random number generator for noise generation
    rng: StdRng,
}

impl WindProfile {
    /// Creates a new profile generator with the specified parameters.
    pub fn new(mean_mw: f32, amp_mw: f32, phase_rad: f32, noise_std_mw: f32, seed: u64) -> Self {
        Self {
            mean_mw,
            amp_mw,
            phase_rad,
            noise_std_mw,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Production at the given hour index, guaranteed non-negative.
    pub fn production_mw(&mut self, hour: usize) -> f32 {
        let day_pos = (hour % 24) as f32 / 24.0; // [0,1)
        let angle = 2.0 * std::f32::consts::PI * day_pos + self.phase_rad;

        let noise = if self.noise_std_mw > 0.0 {
            // simple Gaussian-ish noise via Box-Muller
            let u1: f32 = self.rng.random::<f32>().clamp(1e-6, 1.0);
            let u2: f32 = self.rng.random::<f32>();
            let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f32::consts::PI * u2).cos();
            z0 * self.noise_std_mw
        } else {
            0.0
        };

        let mw = self.mean_mw + self.amp_mw * angle.sin() + noise;
        mw.max(0.0) // no negative production
    }

    /// Generates `hours` hourly rows starting at `start`.
    pub fn generate(&mut self, start: NaiveDateTime, hours: usize) -> Vec<ProductionRow> {
        (0..hours)
            .map(|h| ProductionRow {
                timestamp: start + TimeDelta::hours(h as i64),
                production_mw: self.production_mw(h),
            })
            .collect()
    }
}

/// Builds the production series described by a `[profile]` config section.
///
/// # Errors
///
/// Returns a `ConfigError` if the start timestamp does not parse.
pub fn generate_rows(cfg: &ProfileConfig) -> Result<Vec<ProductionRow>, ConfigError> {
    let start = parse_timestamp(&cfg.start).ok_or_else(|| ConfigError {
        field: "profile.start".to_string(),
        message: format!("\"{}\" is not a valid timestamp", cfg.start),
    })?;
    let mut profile = WindProfile::new(
        cfg.mean_mw,
        cfg.amp_mw,
        cfg.phase_rad,
        cfg.noise_std_mw,
        cfg.seed,
    );
    Ok(profile.generate(start, cfg.hours))
}
