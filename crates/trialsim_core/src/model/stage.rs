//! Pipeline stages and market outcome parameters

use serde::Serialize;

use crate::error::{Result, SimError};
use crate::model::Distribution;

fn check_probability(stage: &str, probability: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&probability) {
        return Err(SimError::invalid_parameter(
            format!("{stage}.success_probability"),
            format!("must be between 0 and 1, got {probability}"),
        ));
    }
    Ok(())
}

/// One gated step of the pipeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageParams {
    name: String,
    success_probability: f64,
    duration: Distribution,
    cost: Distribution,
    #[serde(skip_serializing_if = "Option::is_none")]
    enrollment: Option<Distribution>,
}

impl StageParams {
    /// Create a stage. Fails when the name is blank or the success
    /// probability lies outside `[0, 1]`.
    pub fn new(
        name: impl Into<String>,
        success_probability: f64,
        duration: Distribution,
        cost: Distribution,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SimError::invalid_parameter("stage.name", "must not be empty"));
        }
        check_probability(&name, success_probability)?;

        Ok(Self {
            name,
            success_probability,
            duration,
            cost,
            enrollment: None,
        })
    }

    /// Attach an enrollment-time distribution
    #[must_use]
    pub fn with_enrollment(mut self, enrollment: Distribution) -> Self {
        self.enrollment = Some(enrollment);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn success_probability(&self) -> f64 {
        self.success_probability
    }

    #[must_use]
    pub fn duration(&self) -> &Distribution {
        &self.duration
    }

    #[must_use]
    pub fn cost(&self) -> &Distribution {
        &self.cost
    }

    #[must_use]
    pub fn enrollment(&self) -> Option<&Distribution> {
        self.enrollment.as_ref()
    }

    pub fn set_success_probability(&mut self, probability: f64) -> Result<()> {
        check_probability(&self.name, probability)?;
        self.success_probability = probability;
        Ok(())
    }

    pub fn set_duration(&mut self, duration: Distribution) {
        self.duration = duration;
    }

    pub fn set_cost(&mut self, cost: Distribution) {
        self.cost = cost;
    }

    pub fn set_enrollment(&mut self, enrollment: Option<Distribution>) {
        self.enrollment = enrollment;
    }
}

/// Market outcome parameters for an approved product.
///
/// Only `peak_revenue` feeds the trial outcome. Time to peak, patent life
/// and penetration are carried for callers extending the financial model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketParams {
    peak_revenue: Distribution,
    time_to_peak: Distribution,
    patent_life_years: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    penetration: Option<Distribution>,
}

impl MarketParams {
    pub const DEFAULT_PATENT_LIFE_YEARS: f64 = 12.0;

    pub fn new(
        peak_revenue: Distribution,
        time_to_peak: Distribution,
        patent_life_years: f64,
    ) -> Result<Self> {
        Self::check_patent_life(patent_life_years)?;
        Ok(Self {
            peak_revenue,
            time_to_peak,
            patent_life_years,
            penetration: None,
        })
    }

    fn check_patent_life(years: f64) -> Result<()> {
        if !(years.is_finite() && years > 0.0) {
            return Err(SimError::invalid_parameter(
                "market.patent_life_years",
                format!("must be positive, got {years}"),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn with_penetration(mut self, penetration: Distribution) -> Self {
        self.penetration = Some(penetration);
        self
    }

    #[must_use]
    pub fn peak_revenue(&self) -> &Distribution {
        &self.peak_revenue
    }

    #[must_use]
    pub fn time_to_peak(&self) -> &Distribution {
        &self.time_to_peak
    }

    #[must_use]
    pub fn patent_life_years(&self) -> f64 {
        self.patent_life_years
    }

    #[must_use]
    pub fn penetration(&self) -> Option<&Distribution> {
        self.penetration.as_ref()
    }

    pub fn set_peak_revenue(&mut self, peak_revenue: Distribution) {
        self.peak_revenue = peak_revenue;
    }

    pub fn set_time_to_peak(&mut self, time_to_peak: Distribution) {
        self.time_to_peak = time_to_peak;
    }

    pub fn set_patent_life_years(&mut self, years: f64) -> Result<()> {
        Self::check_patent_life(years)?;
        self.patent_life_years = years;
        Ok(())
    }

    pub fn set_penetration(&mut self, penetration: Option<Distribution>) {
        self.penetration = penetration;
    }
}
