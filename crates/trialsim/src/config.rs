//! YAML parameter files
//!
//! A parameter file mirrors the parameter set field for field. Distributions
//! use the `{ kind, params }` form:
//!
//! ```yaml
//! time_unit: months
//! stages:
//!   - name: Phase_1
//!     success_probability: 0.63
//!     duration: { kind: normal, params: { mean: 12, std: 2.4 } }
//!     cost: { kind: triangular, params: { low: 5, mode: 10, high: 15 } }
//! market:
//!   peak_revenue: { kind: lognormal, params: { mean: 7.31, sigma: 0.4 } }
//!   time_to_peak: { kind: triangular, params: { low: 2, mode: 3, high: 5 } }
//! ```
//!
//! Distributions are validated as they are parsed. Stage, market and rate
//! checks run in the core constructors when the file is converted.

use std::path::Path;

use color_eyre::eyre::WrapErr;
use serde::{Deserialize, Serialize};
use trialsim_core::{
    Distribution, MarketParams, PipelineParameters, Result, StageParams, TimeUnit,
};

/// Top-level contents of a parameter file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParametersFile {
    /// Stages in pipeline order
    #[serde(default)]
    pub stages: Vec<StageData>,

    pub market: MarketData,

    #[serde(default = "default_discount_rate")]
    pub discount_rate: f64,

    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,

    /// One-off manufacturing setup cost
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturing_setup: Option<Distribution>,

    /// One-off commercial launch cost
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launch_cost: Option<Distribution>,

    /// Unit of the stage durations
    #[serde(default)]
    pub time_unit: TimeUnit,
}

fn default_discount_rate() -> f64 {
    PipelineParameters::DEFAULT_DISCOUNT_RATE
}

fn default_tax_rate() -> f64 {
    PipelineParameters::DEFAULT_TAX_RATE
}

fn default_patent_life() -> f64 {
    MarketParams::DEFAULT_PATENT_LIFE_YEARS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageData {
    pub name: String,
    pub success_probability: f64,
    pub duration: Distribution,
    pub cost: Distribution,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrollment: Option<Distribution>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketData {
    pub peak_revenue: Distribution,
    pub time_to_peak: Distribution,
    #[serde(default = "default_patent_life")]
    pub patent_life_years: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penetration: Option<Distribution>,
}

impl StageData {
    fn into_stage(self) -> Result<StageParams> {
        let stage = StageParams::new(
            self.name,
            self.success_probability,
            self.duration,
            self.cost,
        )?;
        Ok(match self.enrollment {
            Some(enrollment) => stage.with_enrollment(enrollment),
            None => stage,
        })
    }
}

impl MarketData {
    fn into_market(self) -> Result<MarketParams> {
        let market =
            MarketParams::new(self.peak_revenue, self.time_to_peak, self.patent_life_years)?;
        Ok(match self.penetration {
            Some(penetration) => market.with_penetration(penetration),
            None => market,
        })
    }
}

impl ParametersFile {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_saphyr::Error> {
        serde_saphyr::from_str(yaml)
    }

    /// Validate and convert into a parameter set
    pub fn into_parameters(self) -> Result<PipelineParameters> {
        let stages = self
            .stages
            .into_iter()
            .map(StageData::into_stage)
            .collect::<Result<Vec<_>>>()?;

        let mut builder = PipelineParameters::builder()
            .stages(stages)
            .market(self.market.into_market()?)
            .discount_rate(self.discount_rate)
            .tax_rate(self.tax_rate)
            .time_unit(self.time_unit);
        if let Some(dist) = self.manufacturing_setup {
            builder = builder.manufacturing_setup(dist);
        }
        if let Some(dist) = self.launch_cost {
            builder = builder.launch_cost(dist);
        }
        builder.build()
    }
}

/// Read, parse and validate a parameter file.
pub fn load_parameters(path: &Path) -> color_eyre::Result<PipelineParameters> {
    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read parameter file {}", path.display()))?;
    let file = ParametersFile::from_yaml(&content)
        .wrap_err_with(|| format!("failed to parse parameter file {}", path.display()))?;
    let params = file
        .into_parameters()
        .wrap_err_with(|| format!("invalid parameters in {}", path.display()))?;

    tracing::debug!(
        path = %path.display(),
        stages = params.stages().len(),
        "Loaded parameter file"
    );
    Ok(params)
}
