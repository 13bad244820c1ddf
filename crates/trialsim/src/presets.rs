//! Named scenario presets
//!
//! Every preset starts from [`default_parameters`], a four-stage clinical
//! programme with industry reference values, and overrides a handful of
//! probabilities and distributions. Costs are in millions, stage durations in
//! months.

use clap::ValueEnum;
use trialsim_core::{
    Distribution, MarketParams, PipelineParameters, Result, SimError, StageParams, TimeUnit,
};

pub const PHASE_1: &str = "Phase_1";
pub const PHASE_2: &str = "Phase_2";
pub const PHASE_3: &str = "Phase_3";
pub const REGULATORY_REVIEW: &str = "Regulatory_Review";

/// Stage names in pipeline order
pub const STAGE_NAMES: [&str; 4] = [PHASE_1, PHASE_2, PHASE_3, REGULATORY_REVIEW];

/// Scenario selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Scenario {
    #[default]
    Default,
    Conservative,
    Optimistic,
    Oncology,
    RareDisease,
}

impl Scenario {
    pub const ALL: [Scenario; 5] = [
        Scenario::Default,
        Scenario::Conservative,
        Scenario::Optimistic,
        Scenario::Oncology,
        Scenario::RareDisease,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Scenario::Default => "default",
            Scenario::Conservative => "conservative",
            Scenario::Optimistic => "optimistic",
            Scenario::Oncology => "oncology",
            Scenario::RareDisease => "rare-disease",
        }
    }

    /// Build a fresh parameter set for this scenario
    pub fn parameters(&self) -> Result<PipelineParameters> {
        match self {
            Scenario::Default => default_parameters(),
            Scenario::Conservative => conservative_parameters(),
            Scenario::Optimistic => optimistic_parameters(),
            Scenario::Oncology => oncology_parameters(),
            Scenario::RareDisease => rare_disease_parameters(),
        }
    }
}

fn lognormal_around(median: f64, sigma: f64) -> Result<Distribution> {
    Distribution::lognormal(median.ln(), sigma)
}

fn stage_mut<'a>(params: &'a mut PipelineParameters, name: &str) -> Result<&'a mut StageParams> {
    params
        .stage_mut(name)
        .ok_or_else(|| SimError::InvalidParameter {
            parameter: name.to_string(),
            reason: "stage is not part of the pipeline".to_string(),
        })
}

/// Overwrite the success probability of every stage, in pipeline order
fn set_probabilities(params: &mut PipelineParameters, probabilities: [f64; 4]) -> Result<()> {
    for (name, probability) in STAGE_NAMES.iter().zip(probabilities) {
        stage_mut(params, name)?.set_success_probability(probability)?;
    }
    Ok(())
}

fn set_cost(params: &mut PipelineParameters, name: &str, cost: Distribution) -> Result<()> {
    stage_mut(params, name)?.set_cost(cost);
    Ok(())
}

/// Industry reference pipeline: roughly a 10% chance from Phase 1 to approval.
pub fn default_parameters() -> Result<PipelineParameters> {
    let phase_1 = StageParams::new(
        PHASE_1,
        0.63,
        Distribution::normal(12.0, 2.4)?,
        Distribution::triangular(5.0, 10.0, 15.0)?,
    )?;
    let phase_2 = StageParams::new(
        PHASE_2,
        0.31,
        Distribution::normal(24.0, 3.6)?,
        lognormal_around(20.0, 0.3)?,
    )?;
    let phase_3 = StageParams::new(
        PHASE_3,
        0.58,
        Distribution::normal(36.0, 6.0)?,
        lognormal_around(100.0, 0.3)?,
    )?;
    let regulatory = StageParams::new(
        REGULATORY_REVIEW,
        0.85,
        Distribution::normal(12.0, 2.4)?,
        Distribution::triangular(10.0, 20.0, 30.0)?,
    )?;

    let market = MarketParams::new(
        lognormal_around(1500.0, 0.4)?,
        Distribution::triangular(2.0, 3.0, 5.0)?,
        MarketParams::DEFAULT_PATENT_LIFE_YEARS,
    )?;

    PipelineParameters::builder()
        .stages([phase_1, phase_2, phase_3, regulatory])
        .market(market)
        .discount_rate(0.10)
        .tax_rate(0.25)
        .manufacturing_setup(Distribution::uniform(20.0, 100.0)?)
        .launch_cost(Distribution::triangular(30.0, 75.0, 150.0)?)
        .time_unit(TimeUnit::Months)
        .build()
}

/// Lower success rates, higher costs and a much weaker revenue outlook.
pub fn conservative_parameters() -> Result<PipelineParameters> {
    let mut params = default_parameters()?;
    set_probabilities(&mut params, [0.60, 0.25, 0.50, 0.75])?;

    set_cost(&mut params, PHASE_1, Distribution::triangular(7.0, 12.0, 18.0)?)?;
    set_cost(&mut params, PHASE_2, lognormal_around(25.0, 0.4)?)?;
    set_cost(&mut params, PHASE_3, lognormal_around(200.0, 0.4)?)?;

    params
        .market_mut()
        .set_peak_revenue(lognormal_around(300.0, 0.9)?);
    Ok(params)
}

/// Higher success rates and cheaper trials on the same market.
pub fn optimistic_parameters() -> Result<PipelineParameters> {
    let mut params = default_parameters()?;
    set_probabilities(&mut params, [0.75, 0.45, 0.70, 0.90])?;

    set_cost(&mut params, PHASE_1, Distribution::triangular(3.0, 7.0, 12.0)?)?;
    set_cost(&mut params, PHASE_2, lognormal_around(15.0, 0.3)?)?;
    // Bounded, so no long cost tail
    set_cost(&mut params, PHASE_3, Distribution::triangular(40.0, 75.0, 120.0)?)?;
    Ok(params)
}

/// Easier early phases, hard survival endpoints in Phase 3, larger market.
pub fn oncology_parameters() -> Result<PipelineParameters> {
    let mut params = default_parameters()?;
    set_probabilities(&mut params, [0.70, 0.40, 0.50, 0.80])?;

    set_cost(&mut params, PHASE_2, lognormal_around(35.0, 0.4)?)?;
    set_cost(&mut params, PHASE_3, Distribution::triangular(100.0, 175.0, 300.0)?)?;

    params
        .market_mut()
        .set_peak_revenue(lognormal_around(2000.0, 0.6)?);
    Ok(params)
}

/// Small, cheap trials with regulatory incentives, a smaller market and faster uptake.
pub fn rare_disease_parameters() -> Result<PipelineParameters> {
    let mut params = default_parameters()?;
    set_probabilities(&mut params, [0.50, 0.45, 0.65, 0.90])?;

    set_cost(&mut params, PHASE_1, Distribution::normal(5.0, 1.5)?)?;
    set_cost(&mut params, PHASE_2, lognormal_around(12.0, 0.4)?)?;
    set_cost(&mut params, PHASE_3, Distribution::triangular(30.0, 60.0, 100.0)?)?;

    let market = params.market_mut();
    market.set_peak_revenue(lognormal_around(800.0, 0.7)?);
    market.set_time_to_peak(Distribution::triangular(1.0, 2.0, 3.0)?);
    Ok(params)
}
