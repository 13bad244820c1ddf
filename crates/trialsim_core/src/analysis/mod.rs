//! Aggregation of Monte Carlo results.
//!
//! [`analyze_results`] reduces a results table into the headline report
//! (success rate, cost, NPV and ROI figures). [`describe`] gives the wider
//! per-column picture with quartiles.
//!
//! ```ignore
//! use trialsim_core::analysis::{analyze_results, describe};
//!
//! let results = monte_carlo_simulate(&params, &MonteCarloConfig::new(10_000))?;
//! let summary = analyze_results(&results)?;
//! println!("success rate: {:.1}%", summary.overall.success_rate * 100.0);
//! ```

mod stats;
mod summary;

pub use stats::{mean, median, percentile_sorted, sample_std, sorted};
pub use summary::{
    Column, ColumnSummary, CostStats, FinancialStats, OverallStats, SimulationSummary, TimeStats,
    analyze_results, describe,
};
