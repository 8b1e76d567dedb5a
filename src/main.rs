use std::path::PathBuf;

use clap::Parser;
use tracing::{
    error,
    info,
    Level
};
use tracing_subscriber::FmtSubscriber;

use possibility::configuration::EngineConfiguration;
use possibility::engine::possibilityengine::PossibilityEngine;
use possibility::possibilityerror::PossibilityError;

#[derive(Parser)]
#[command(name = "possibility")]
#[command(version)]
#[command(about = "Joint and forward possibility distributions of two triangular marginals")]
struct Cli {
    /// Path to a JSON engine configuration; built-in defaults when omitted
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set subscriber: {err}");
    }
}

fn run(config_path: Option<PathBuf>) -> Result<(), PossibilityError> {
    let config = match config_path {
        Some(path) => EngineConfiguration::from_reader(path)?,
        None => EngineConfiguration::default(),
    };
    let engine = PossibilityEngine::new(&config)?;
    let result = engine.recompute();

    if let Some(peak) = result.peak() {
        info!(
            copula = %engine.copula(),
            z_lo = result.z_range().lo(),
            z_hi = result.z_range().hi(),
            peak_z = peak.z(),
            peak_possibility = peak.possibility(),
            "Forward distribution of x + y"
        );
    }

    println!("{}", serde_json::to_string_pretty(&result.to_json())?);
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    if let Err(err) = run(cli.config) {
        error!(%err, "Recompute failed");
        std::process::exit(1);
    }
}
