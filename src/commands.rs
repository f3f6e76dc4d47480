//! CLI command definitions
//!
//! Defines the clap commands for the momento CLI.

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the built-in ERC721Momento scenarios
    Suite {
        /// Contract to deploy (default: from config)
        #[arg(long)]
        contract: Option<String>,

        /// Print a JSON report instead of human-readable output
        #[arg(long)]
        json: bool,

        /// Per-scenario time limit in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Run scenarios declared in YAML files
    Test {
        /// Paths to YAML scenario files
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Print a JSON report instead of human-readable output
        #[arg(long)]
        json: bool,

        /// Per-scenario time limit in seconds (scenario files may override)
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// List deployable contracts
    Contracts,
}
