//! Command-line front end for the pipeline simulator
//!
//! The engine lives in `trialsim_core`. This crate supplies the pieces around
//! it:
//! - Named scenario presets (default, conservative, optimistic, oncology,
//!   rare disease)
//! - YAML parameter files
//! - Logging setup with size-rotated log files
//! - Text and JSON reports

pub mod cli;
pub mod config;
pub mod logging;
pub mod presets;
pub mod report;

#[cfg(test)]
mod tests;

pub use cli::Args;
pub use config::{ParametersFile, load_parameters};
pub use logging::init_logging;
pub use presets::Scenario;
