use clap::Parser;
use color_eyre::eyre::WrapErr;
use trialsim::{Args, init_logging, load_parameters, report};
use trialsim_core::{MonteCarloConfig, analyze_results, describe, monte_carlo_simulate};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    init_logging(&args.log_level, args.log_file.as_deref())?;

    let (source, params) = match &args.params {
        Some(path) => (path.display().to_string(), load_parameters(path)?),
        None => (
            args.scenario.name().to_string(),
            args.scenario
                .parameters()
                .wrap_err_with(|| format!("failed to build scenario {}", args.scenario.name()))?,
        ),
    };

    let mut config = MonteCarloConfig::new(args.n_simulations).with_progress(!args.quiet);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    tracing::info!(
        source = %source,
        n = args.n_simulations,
        seed = ?args.seed,
        "Running trial simulation"
    );

    let results = monte_carlo_simulate(&params, &config).wrap_err("simulation failed")?;
    let summary = analyze_results(&results)?;
    let description = describe(&results)?;

    if args.json {
        println!("{}", report::render_json(&source, &summary, &description)?);
    } else {
        print!("{}", report::render_text(&source, &params, &summary, &description));
    }

    tracing::info!("Simulation complete");
    Ok(())
}
