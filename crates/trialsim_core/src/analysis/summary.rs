use std::collections::BTreeMap;

use serde::Serialize;

use super::stats::{mean, median, percentile_sorted, sample_std, sorted};
use crate::error::{Result, SimError};
use crate::model::{ResultsTable, TrialRecord};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallStats {
    pub total_simulations: usize,
    pub successful_trials: usize,
    pub success_rate: f64,
    pub failure_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostStats {
    pub mean_cost: f64,
    pub median_cost: f64,
    pub std_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeStats {
    pub mean_time: f64,
    pub median_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialStats {
    pub mean_npv: f64,
    pub median_npv: f64,
    pub mean_roi: f64,
    /// Share of all trials with strictly positive NPV
    pub positive_npv_rate: f64,
}

/// Summary statistics of a completed results table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub overall: OverallStats,
    pub costs: CostStats,
    pub time: TimeStats,
    pub financial: FinancialStats,
    /// Failed trials per failing stage name
    pub failures_by_stage: BTreeMap<String, usize>,
}

/// Reduce a results table to summary statistics.
///
/// Every statistic is taken over all rows. Cost and time are accumulated
/// whether or not a trial succeeds, and failed trials carry zero NPV and
/// ROI, so an all-failure table still yields well-defined values.
pub fn analyze_results(results: &ResultsTable) -> Result<SimulationSummary> {
    if results.is_empty() {
        return Err(SimError::EmptyInput);
    }

    let total = results.len();
    let successful = results.successes().count();
    let success_rate = successful as f64 / total as f64;

    let costs = results.column(|r| r.outcome.total_cost);
    let times = results.column(|r| r.outcome.total_time);
    let npvs = results.column(|r| r.npv);
    let rois = results.column(|r| r.roi);

    let positive_npv = npvs.iter().filter(|v| **v > 0.0).count();

    let mut failures_by_stage = BTreeMap::new();
    for record in results.failures() {
        if let Some(stage) = &record.outcome.failed_stage {
            *failures_by_stage.entry(stage.clone()).or_insert(0) += 1;
        }
    }

    Ok(SimulationSummary {
        overall: OverallStats {
            total_simulations: total,
            successful_trials: successful,
            success_rate,
            failure_rate: 1.0 - success_rate,
        },
        costs: CostStats {
            mean_cost: mean(&costs),
            median_cost: median(&costs),
            std_cost: sample_std(&costs),
        },
        time: TimeStats {
            mean_time: mean(&times),
            median_time: median(&times),
        },
        financial: FinancialStats {
            mean_npv: mean(&npvs),
            median_npv: median(&npvs),
            mean_roi: mean(&rois),
            positive_npv_rate: positive_npv as f64 / total as f64,
        },
        failures_by_stage,
    })
}

/// Numeric columns of the results table covered by [`describe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    Cost,
    Time,
    Revenue,
    Npv,
    Roi,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Column::Cost,
        Column::Time,
        Column::Revenue,
        Column::Npv,
        Column::Roi,
    ];

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Column::Cost => "cost",
            Column::Time => "time",
            Column::Revenue => "revenue",
            Column::Npv => "npv",
            Column::Roi => "roi",
        }
    }

    #[must_use]
    pub fn value(&self, record: &TrialRecord) -> f64 {
        match self {
            Column::Cost => record.outcome.total_cost,
            Column::Time => record.outcome.total_time,
            Column::Revenue => record.outcome.revenue,
            Column::Npv => record.npv,
            Column::Roi => record.roi,
        }
    }
}

/// Distribution summary of one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: Column,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

impl ColumnSummary {
    fn from_values(column: Column, values: &[f64]) -> Self {
        let ordered = sorted(values);
        Self {
            column,
            count: values.len(),
            mean: mean(values),
            std: sample_std(values),
            min: ordered.first().copied().unwrap_or(0.0),
            p25: percentile_sorted(&ordered, 0.25),
            p50: percentile_sorted(&ordered, 0.50),
            p75: percentile_sorted(&ordered, 0.75),
            max: ordered.last().copied().unwrap_or(0.0),
        }
    }
}

/// Per-column descriptive statistics for cost, time, revenue, NPV and ROI
pub fn describe(results: &ResultsTable) -> Result<Vec<ColumnSummary>> {
    if results.is_empty() {
        return Err(SimError::EmptyInput);
    }

    Ok(Column::ALL
        .iter()
        .map(|column| ColumnSummary::from_values(*column, &results.column(|r| column.value(r))))
        .collect())
}
