//! momento - deployment and scenario harness for proxied contracts
//!
//! Deploys contracts behind an upgradeable proxy, runs scenarios against
//! fresh instances, and exits non-zero if any scenario fails.

use std::path::PathBuf;

use clap::Parser;
use momento::common::{config::Config, logging};
use momento::{cli, commands::Commands};

#[derive(Parser)]
#[command(name = "momento", about = "Contract deployment and scenario harness")]
#[command(version, long_about = None)]
struct Cli {
    /// Configuration file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::init_cli(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };

    let result = match config {
        Ok(config) => cli::dispatch(cli.command, &config, cli.verbose).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
