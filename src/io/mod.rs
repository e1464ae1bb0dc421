//! CSV production-series input and telemetry export.

pub mod export;
pub mod import;
