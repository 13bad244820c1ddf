//! Pipeline configuration
//!
//! The main configuration type is [`PipelineParameters`]: an ordered list of
//! stages, the market record and the financial assumptions. A value of this
//! type is always simulatable; every field is validated when it is set.
//!
//! # Builder DSL
//!
//! ```ignore
//! use trialsim_core::config::PipelineBuilder;
//! use trialsim_core::model::{Distribution, MarketParams, StageParams};
//!
//! let params = PipelineBuilder::new()
//!     .stage(StageParams::new(
//!         "Phase_1",
//!         0.63,
//!         Distribution::normal(12.0, 2.4)?,
//!         Distribution::triangular(5.0, 10.0, 15.0)?,
//!     )?)
//!     .market(MarketParams::new(
//!         Distribution::lognormal(1500f64.ln(), 0.4)?,
//!         Distribution::triangular(2.0, 3.0, 5.0)?,
//!         12.0,
//!     )?)
//!     .discount_rate(0.10)
//!     .time_unit(TimeUnit::Months)
//!     .build()?;
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::model::{Distribution, MarketParams, StageParams};

pub mod builder;

pub use builder::PipelineBuilder;

/// Unit in which stage durations are expressed.
///
/// The discount rate is annual, so accumulated time is converted to years
/// before discounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    #[default]
    Years,
    Months,
}

impl TimeUnit {
    #[must_use]
    pub fn periods_per_year(&self) -> f64 {
        match self {
            TimeUnit::Years => 1.0,
            TimeUnit::Months => 12.0,
        }
    }

    #[must_use]
    pub fn to_years(&self, amount: f64) -> f64 {
        amount / self.periods_per_year()
    }
}

pub(crate) fn check_rate(name: &'static str, rate: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&rate) {
        return Err(SimError::invalid_parameter(
            name,
            format!("must be between 0 and 1, got {rate}"),
        ));
    }
    Ok(())
}

/// Complete parameter set for a pipeline simulation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineParameters {
    stages: Vec<StageParams>,
    market: MarketParams,
    discount_rate: f64,
    tax_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    manufacturing_setup: Option<Distribution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    launch_cost: Option<Distribution>,
    time_unit: TimeUnit,
}

impl PipelineParameters {
    pub const DEFAULT_DISCOUNT_RATE: f64 = 0.10;
    pub const DEFAULT_TAX_RATE: f64 = 0.25;

    /// Start a [`PipelineBuilder`]
    #[must_use]
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Stages in execution order
    #[must_use]
    pub fn stages(&self) -> &[StageParams] {
        &self.stages
    }

    /// Look up a stage by name
    #[must_use]
    pub fn stage(&self, name: &str) -> Option<&StageParams> {
        self.stages.iter().find(|s| s.name() == name)
    }

    /// Mutable access to a stage by name, for deriving variants
    pub fn stage_mut(&mut self, name: &str) -> Option<&mut StageParams> {
        self.stages.iter_mut().find(|s| s.name() == name)
    }

    #[must_use]
    pub fn market(&self) -> &MarketParams {
        &self.market
    }

    pub fn market_mut(&mut self) -> &mut MarketParams {
        &mut self.market
    }

    #[must_use]
    pub fn discount_rate(&self) -> f64 {
        self.discount_rate
    }

    #[must_use]
    pub fn tax_rate(&self) -> f64 {
        self.tax_rate
    }

    #[must_use]
    pub fn manufacturing_setup(&self) -> Option<&Distribution> {
        self.manufacturing_setup.as_ref()
    }

    #[must_use]
    pub fn launch_cost(&self) -> Option<&Distribution> {
        self.launch_cost.as_ref()
    }

    #[must_use]
    pub fn time_unit(&self) -> TimeUnit {
        self.time_unit
    }

    pub fn set_discount_rate(&mut self, rate: f64) -> Result<()> {
        check_rate("discount_rate", rate)?;
        self.discount_rate = rate;
        Ok(())
    }

    pub fn set_tax_rate(&mut self, rate: f64) -> Result<()> {
        check_rate("tax_rate", rate)?;
        self.tax_rate = rate;
        Ok(())
    }

    pub fn set_manufacturing_setup(&mut self, dist: Option<Distribution>) {
        self.manufacturing_setup = dist;
    }

    pub fn set_launch_cost(&mut self, dist: Option<Distribution>) {
        self.launch_cost = dist;
    }

    pub fn set_time_unit(&mut self, unit: TimeUnit) {
        self.time_unit = unit;
    }

    /// Sum of the mean stage costs plus the optional setup and launch costs
    #[must_use]
    pub fn total_expected_cost(&self) -> f64 {
        let stage_costs: f64 = self.stages.iter().map(|s| s.cost().mean()).sum();
        let extra_costs: f64 = [&self.manufacturing_setup, &self.launch_cost]
            .into_iter()
            .flatten()
            .map(Distribution::mean)
            .sum();
        stage_costs + extra_costs
    }

    /// Sum of the mean stage durations, in `time_unit`
    #[must_use]
    pub fn total_expected_time(&self) -> f64 {
        self.stages.iter().map(|s| s.duration().mean()).sum()
    }

    /// Probability of passing every stage
    #[must_use]
    pub fn overall_success_probability(&self) -> f64 {
        self.stages.iter().map(StageParams::success_probability).product()
    }
}
