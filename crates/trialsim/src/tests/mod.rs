//! Tests for the command-line front end
//!
//! - `cli` - argument parsing
//! - `config` - YAML parameter files
//! - `logging` - log filter and rotation
//! - `presets` - scenario parameter sets
//! - `report` - text and JSON rendering

mod config;
mod logging;
mod presets;

pub(crate) fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} +/- {tolerance}, got {actual}"
    );
}
