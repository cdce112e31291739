//! Rating CLI
//!
//! Rate the engines in a PGN with BayesElo and print relative Elo as JSON.

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rating::{BayesElo, JsonStyle, RateConfig, RateError, Rater, Report};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Source label used when the PGN comes from stdin
const STDIN_LABEL: &str = "<stdin>";

#[derive(Debug, Parser)]
#[command(
    name = "rate",
    version,
    about = "Relative Elo rater (mean-centered) using BayesElo"
)]
struct Cli {
    /// Path to the PGN of finished games, or `-` to read it from stdin
    #[arg(long)]
    pgn: PathBuf,

    /// Path to the BayesElo binary [default: tools/bin/bayeselo]
    #[arg(long, env = "RATE_BAYESELO")]
    bayeselo: Option<PathBuf>,

    /// If set, only output this engine's row
    #[arg(long)]
    engine_name: Option<String>,

    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON layout: auto, pretty or compact
    #[arg(long)]
    json_style: Option<JsonStyle>,

    /// Write the report here instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,

    /// More logging on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), RateError> {
    let config = match &cli.config {
        Some(path) => RateConfig::load(path)?,
        None => RateConfig::default(),
    }
    .with_overrides(cli.bayeselo.clone(), cli.json_style);
    debug!(?config, "resolved configuration");

    let rater = Rater::new(BayesElo::new(&config.bayeselo));
    let engine = cli.engine_name.as_deref();
    let report = rate(&rater, cli, engine)?;

    let mut json = report.to_json(config.json_style)?;
    json.push('\n');
    match &cli.out {
        Some(path) => std::fs::write(path, json)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn rate(rater: &Rater, cli: &Cli, engine: Option<&str>) -> Result<Report, RateError> {
    if cli.pgn.as_os_str() == "-" {
        let mut text = Vec::new();
        io::stdin().read_to_end(&mut text)?;
        rater.rate_pgn_text(&text, STDIN_LABEL, engine)
    } else {
        rater.rate(&cli.pgn, engine)
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
