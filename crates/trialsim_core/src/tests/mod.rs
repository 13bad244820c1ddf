//! Tests for the pipeline simulation engine
//!
//! Tests are organized by topic:
//! - `distributions` - Parameter validation, analytic moments, sampling
//! - `pipeline` - Stage/market/parameter-set validation and derived queries
//! - `trial` - Single-trial sequencing and failure semantics
//! - `financial` - Present value and ROI edge cases
//! - `monte_carlo` - Batch drivers, ordering and reproducibility
//! - `analysis` - Aggregation and descriptive statistics

mod financial;

use crate::config::{PipelineParameters, TimeUnit};
use crate::model::{Distribution, MarketParams, StageParams};

pub(crate) const STAGE_NAMES: [&str; 4] = ["Phase_1", "Phase_2", "Phase_3", "Regulatory_Review"];

/// Four-stage pipeline with the given per-stage success probabilities.
///
/// Costs are triangular, durations normal (in years), revenue lognormal.
pub(crate) fn four_stage_pipeline(probabilities: [f64; 4]) -> PipelineParameters {
    let costs = [(5.0, 10.0, 15.0), (15.0, 20.0, 30.0), (50.0, 100.0, 150.0), (10.0, 20.0, 30.0)];
    let durations = [(1.0, 0.2), (2.0, 0.3), (3.0, 0.5), (1.0, 0.2)];

    let stages = STAGE_NAMES
        .iter()
        .zip(probabilities)
        .zip(costs.iter().zip(durations))
        .map(|((name, p), (&(low, mode, high), (mean, std)))| {
            StageParams::new(
                *name,
                p,
                Distribution::normal(mean, std).unwrap(),
                Distribution::triangular(low, mode, high).unwrap(),
            )
            .unwrap()
        });

    PipelineParameters::builder()
        .stages(stages)
        .market(test_market())
        .discount_rate(0.10)
        .time_unit(TimeUnit::Years)
        .build()
        .unwrap()
}

pub(crate) fn test_market() -> MarketParams {
    MarketParams::new(
        Distribution::lognormal(1500f64.ln(), 0.4).unwrap(),
        Distribution::triangular(2.0, 3.0, 5.0).unwrap(),
        12.0,
    )
    .unwrap()
}

pub(crate) fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual} (tolerance {tolerance})"
    );
}
