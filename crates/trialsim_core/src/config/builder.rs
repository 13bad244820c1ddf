//! Pipeline Builder
//!
//! Fluent construction of [`PipelineParameters`]. Individual stages and the
//! market record validate themselves when created; `build` checks what only
//! the whole set can know (unique stage names, a market record, rates).

use std::collections::HashSet;

use super::{PipelineParameters, TimeUnit, check_rate};
use crate::error::{Result, SimError};
use crate::model::{Distribution, MarketParams, StageParams};

/// Builder for [`PipelineParameters`]
#[derive(Debug, Clone)]
pub struct PipelineBuilder {
    stages: Vec<StageParams>,
    market: Option<MarketParams>,
    discount_rate: f64,
    tax_rate: f64,
    manufacturing_setup: Option<Distribution>,
    launch_cost: Option<Distribution>,
    time_unit: TimeUnit,
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stages: Vec::new(),
            market: None,
            discount_rate: PipelineParameters::DEFAULT_DISCOUNT_RATE,
            tax_rate: PipelineParameters::DEFAULT_TAX_RATE,
            manufacturing_setup: None,
            launch_cost: None,
            time_unit: TimeUnit::default(),
        }
    }

    /// Append a stage. Stages run in the order they are added.
    #[must_use]
    pub fn stage(mut self, stage: StageParams) -> Self {
        self.stages.push(stage);
        self
    }

    #[must_use]
    pub fn stages(mut self, stages: impl IntoIterator<Item = StageParams>) -> Self {
        self.stages.extend(stages);
        self
    }

    #[must_use]
    pub fn market(mut self, market: MarketParams) -> Self {
        self.market = Some(market);
        self
    }

    /// Annual discount rate in `[0, 1]`
    #[must_use]
    pub fn discount_rate(mut self, rate: f64) -> Self {
        self.discount_rate = rate;
        self
    }

    #[must_use]
    pub fn tax_rate(mut self, rate: f64) -> Self {
        self.tax_rate = rate;
        self
    }

    #[must_use]
    pub fn manufacturing_setup(mut self, dist: Distribution) -> Self {
        self.manufacturing_setup = Some(dist);
        self
    }

    #[must_use]
    pub fn launch_cost(mut self, dist: Distribution) -> Self {
        self.launch_cost = Some(dist);
        self
    }

    #[must_use]
    pub fn time_unit(mut self, unit: TimeUnit) -> Self {
        self.time_unit = unit;
        self
    }

    pub fn build(self) -> Result<PipelineParameters> {
        let market = self
            .market
            .ok_or_else(|| SimError::invalid_parameter("market", "a market record is required"))?;

        check_rate("discount_rate", self.discount_rate)?;
        check_rate("tax_rate", self.tax_rate)?;

        let mut seen = HashSet::with_capacity(self.stages.len());
        for stage in &self.stages {
            if !seen.insert(stage.name()) {
                return Err(SimError::invalid_parameter(
                    format!("{}.name", stage.name()),
                    "stage names must be unique within a pipeline",
                ));
            }
        }

        Ok(PipelineParameters {
            stages: self.stages,
            market,
            discount_rate: self.discount_rate,
            tax_rate: self.tax_rate,
            manufacturing_setup: self.manufacturing_setup,
            launch_cost: self.launch_cost,
            time_unit: self.time_unit,
        })
    }
}
