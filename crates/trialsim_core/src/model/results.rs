//! Simulation results
//!
//! A [`TrialOutcome`] is what one pass through the pipeline produced. The
//! Monte Carlo driver wraps each outcome with its index and financial
//! metrics into a [`TrialRecord`] and appends it to a [`ResultsTable`].

use serde::Serialize;

/// What happened in a single attempted stage
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageResult {
    pub stage: String,
    pub success: bool,
    pub cost: f64,
    pub time: f64,
}

/// Outcome of one stochastic traversal of the pipeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialOutcome {
    pub success: bool,
    /// Name of the stage that failed, `None` when every stage passed
    pub failed_stage: Option<String>,
    /// Spend accumulated up to and including the last attempted stage
    pub total_cost: f64,
    /// Elapsed time accumulated up to and including the last attempted stage
    pub total_time: f64,
    /// Raw peak-revenue draw for a successful trial, 0 otherwise
    pub revenue: f64,
    /// One entry per attempted stage, in pipeline order
    pub stages: Vec<StageResult>,
}

impl TrialOutcome {
    /// Number of stages that were attempted
    #[must_use]
    pub fn stages_attempted(&self) -> usize {
        self.stages.len()
    }
}

/// One row of the results table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialRecord {
    /// 1-based trial index in generation order
    pub trial_id: usize,
    #[serde(flatten)]
    pub outcome: TrialOutcome,
    pub npv: f64,
    pub roi: f64,
}

/// Ordered, append-only collection of trial records
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResultsTable {
    rows: Vec<TrialRecord>,
}

impl ResultsTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, record: TrialRecord) {
        self.rows.push(record);
    }

    pub(crate) fn extend(&mut self, records: impl IntoIterator<Item = TrialRecord>) {
        self.rows.extend(records);
    }

    #[must_use]
    pub fn rows(&self) -> &[TrialRecord] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrialRecord> {
        self.rows.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Extract one numeric column
    pub fn column(&self, f: impl Fn(&TrialRecord) -> f64) -> Vec<f64> {
        self.rows.iter().map(f).collect()
    }

    /// Records of trials that made it through every stage
    pub fn successes(&self) -> impl Iterator<Item = &TrialRecord> {
        self.rows.iter().filter(|r| r.outcome.success)
    }

    /// Records of trials that stopped at a failing stage
    pub fn failures(&self) -> impl Iterator<Item = &TrialRecord> {
        self.rows.iter().filter(|r| !r.outcome.success)
    }
}

impl<'a> IntoIterator for &'a ResultsTable {
    type Item = &'a TrialRecord;
    type IntoIter = std::slice::Iter<'a, TrialRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl FromIterator<TrialRecord> for ResultsTable {
    fn from_iter<I: IntoIterator<Item = TrialRecord>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}
