//! Pipeline outcome simulation library
//!
//! This crate provides a Monte Carlo engine for multi-stage development
//! pipelines such as clinical trial programmes. It supports:
//! - Validated cost, duration and revenue distributions (triangular, normal,
//!   lognormal, uniform, beta) with analytic moments
//! - Ordered stages gated by a success probability, stopping at the first failure
//! - Present value and return on investment of successful runs
//! - Seeded, optionally parallel batches with reproducible row order
//! - Summary statistics over the resulting table
//!
//! # Example
//!
//! ```ignore
//! use trialsim_core::{MonteCarloConfig, analyze_results, monte_carlo_simulate};
//!
//! let results = monte_carlo_simulate(&params, &MonteCarloConfig::new(10_000).with_seed(7))?;
//! let summary = analyze_results(&results)?;
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod analysis;
pub mod error;
pub mod financial;
pub mod simulation;
pub mod trial;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use analysis::{SimulationSummary, analyze_results, describe};
pub use config::{PipelineBuilder, PipelineParameters, TimeUnit};
pub use error::{Result, SimError};
pub use financial::{present_value, return_on_investment};
pub use model::{Distribution, DistributionKind, MarketParams, ResultsTable, StageParams};
pub use simulation::{MonteCarloConfig, monte_carlo_simulate, run_simulations};
pub use trial::run_trial;
