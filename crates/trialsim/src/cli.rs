use std::path::PathBuf;

use clap::Parser;

use crate::presets::Scenario;

/// Number of trials when none is given
pub const DEFAULT_SIMULATIONS: usize = 10_000;

#[derive(Parser, Debug)]
#[command(name = "trialsim")]
#[command(about = "Monte Carlo simulator for multi-stage drug development pipelines")]
pub struct Args {
    /// Number of trials to simulate
    #[arg(default_value_t = DEFAULT_SIMULATIONS)]
    pub n_simulations: usize,

    /// Built-in parameter preset
    #[arg(short, long, value_enum, default_value_t = Scenario::Default)]
    pub scenario: Scenario,

    /// YAML parameter file (takes precedence over --scenario)
    #[arg(short, long)]
    pub params: Option<PathBuf>,

    /// Seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Do not report progress while simulating
    #[arg(short, long)]
    pub quiet: bool,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}
