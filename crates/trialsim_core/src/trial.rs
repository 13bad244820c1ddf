//! Single stochastic pass through the pipeline

use rand::Rng;

use crate::config::PipelineParameters;
use crate::model::{StageResult, TrialOutcome};

/// Run one trial: attempt each stage in order and stop at the first failure.
///
/// Cost and duration are drawn for every attempted stage, including the one
/// that fails, so spend before failure is captured. A stage passes when a
/// uniform `[0, 1)` draw is strictly below its success probability. Revenue
/// is the raw peak-revenue draw and is only sampled when every stage passes.
pub fn run_trial<R: Rng + ?Sized>(params: &PipelineParameters, rng: &mut R) -> TrialOutcome {
    let mut total_cost = 0.0;
    let mut total_time = 0.0;
    let mut failed_stage = None;
    let mut stages = Vec::with_capacity(params.stages().len());

    for stage in params.stages() {
        let cost = stage.cost().sample(rng);
        let time = stage.duration().sample(rng);
        total_cost += cost;
        total_time += time;

        let passed = rng.random::<f64>() < stage.success_probability();
        stages.push(StageResult {
            stage: stage.name().to_string(),
            success: passed,
            cost,
            time,
        });

        if !passed {
            failed_stage = Some(stage.name().to_string());
            break;
        }
    }

    let success = failed_stage.is_none();
    let revenue = if success {
        params.market().peak_revenue().sample(rng)
    } else {
        0.0
    };

    TrialOutcome {
        success,
        failed_stage,
        total_cost,
        total_time,
        revenue,
        stages,
    }
}
