use std::sync::atomic::{AtomicUsize, Ordering};

use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::iter::{IndexedParallelIterator, IntoParallelIterator, ParallelIterator};
use serde::{Deserialize, Serialize};

use crate::config::PipelineParameters;
use crate::error::{Result, SimError};
use crate::financial::{present_value, return_on_investment};
use crate::model::{ResultsTable, TrialOutcome, TrialRecord};
use crate::trial::run_trial;

/// Completed trials between progress reports
pub const PROGRESS_INTERVAL: usize = 1_000;

/// Trials per independently seeded batch
const MAX_BATCH_SIZE: usize = 100;

/// Settings for a seeded Monte Carlo batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonteCarloConfig {
    pub num_iterations: usize,
    /// Master seed; a random one is drawn when absent
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub show_progress: bool,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            num_iterations: 10_000,
            seed: None,
            show_progress: false,
        }
    }
}

impl MonteCarloConfig {
    #[must_use]
    pub fn new(num_iterations: usize) -> Self {
        Self {
            num_iterations,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }
}

fn check_iterations(n: usize) -> Result<()> {
    if n == 0 {
        return Err(SimError::invalid_argument(
            "n",
            "number of simulations must be positive",
        ));
    }
    Ok(())
}

/// Attach the trial index and financial metrics to an outcome.
///
/// Failed trials record zero NPV and ROI. Successful trials discount their
/// revenue over the accumulated pipeline time, converted to years. A negative
/// accumulated time is rejected by [`present_value`].
pub fn record_trial(
    params: &PipelineParameters,
    trial_id: usize,
    outcome: TrialOutcome,
) -> Result<TrialRecord> {
    let (npv, roi) = if outcome.success {
        let delay = params.time_unit().to_years(outcome.total_time);
        (
            present_value(outcome.revenue, delay, params.discount_rate())?,
            return_on_investment(outcome.revenue, outcome.total_cost),
        )
    } else {
        (0.0, 0.0)
    };

    Ok(TrialRecord {
        trial_id,
        outcome,
        npv,
        roi,
    })
}

/// Run `n` trials sequentially from a caller-supplied generator.
///
/// Rows are numbered `1..=n` in generation order. When `show_progress` is
/// set a progress event is logged every [`PROGRESS_INTERVAL`] trials.
pub fn run_simulations<R: Rng + ?Sized>(
    params: &PipelineParameters,
    n: usize,
    rng: &mut R,
    show_progress: bool,
) -> Result<ResultsTable> {
    check_iterations(n)?;

    let mut table = ResultsTable::with_capacity(n);
    for i in 0..n {
        let outcome = run_trial(params, rng);
        table.push(record_trial(params, i + 1, outcome)?);

        if show_progress && (i + 1) % PROGRESS_INTERVAL == 0 {
            tracing::info!(completed = i + 1, total = n, "simulation progress");
        }
    }

    Ok(table)
}

/// Run a seeded Monte Carlo batch.
///
/// Trials are split into batches of 100, each drawing from its own
/// `SmallRng` seeded from a master generator. Batches run on the rayon pool
/// when the `parallel` feature is enabled; the resulting table is the same
/// either way for a given seed.
pub fn monte_carlo_simulate(
    params: &PipelineParameters,
    config: &MonteCarloConfig,
) -> Result<ResultsTable> {
    let n = config.num_iterations;
    check_iterations(n)?;

    let seed = config.seed.unwrap_or_else(rand::random);
    let num_batches = n.div_ceil(MAX_BATCH_SIZE);
    let mut master = SmallRng::seed_from_u64(seed);
    let batch_seeds: Vec<u64> = (0..num_batches).map(|_| master.next_u64()).collect();

    tracing::debug!(
        iterations = n,
        batches = num_batches,
        seed,
        "starting monte carlo batch"
    );

    let completed = AtomicUsize::new(0);
    let run_batch = |(i, batch_seed): (usize, u64)| -> Result<Vec<TrialRecord>> {
        let mut rng = SmallRng::seed_from_u64(batch_seed);
        let start = i * MAX_BATCH_SIZE;
        let batch_size = MAX_BATCH_SIZE.min(n - start);

        let mut records = Vec::with_capacity(batch_size);
        for offset in 0..batch_size {
            let outcome = run_trial(params, &mut rng);
            records.push(record_trial(params, start + offset + 1, outcome)?);
        }

        if config.show_progress {
            let before = completed.fetch_add(batch_size, Ordering::Relaxed);
            let after = before + batch_size;
            if after / PROGRESS_INTERVAL > before / PROGRESS_INTERVAL || after == n {
                tracing::info!(completed = after, total = n, "simulation progress");
            }
        }

        Ok(records)
    };

    #[cfg(feature = "parallel")]
    let batches: Result<Vec<Vec<TrialRecord>>> = batch_seeds
        .into_par_iter()
        .enumerate()
        .map(run_batch)
        .collect();

    #[cfg(not(feature = "parallel"))]
    let batches: Result<Vec<Vec<TrialRecord>>> =
        batch_seeds.into_iter().enumerate().map(run_batch).collect();

    let mut table = ResultsTable::with_capacity(n);
    for batch in batches? {
        table.extend(batch);
    }

    tracing::debug!(rows = table.len(), "monte carlo batch complete");
    Ok(table)
}
