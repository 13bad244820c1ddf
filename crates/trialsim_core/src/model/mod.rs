mod distribution;
mod results;
mod stage;

pub use distribution::{Distribution, DistributionKind, DistributionParams, DistributionSpec};
pub use results::{ResultsTable, StageResult, TrialOutcome, TrialRecord};
pub use stage::{MarketParams, StageParams};
