//! CLI command handling
//!
//! Dispatches CLI commands and formats output.

use std::path::Path;
use std::time::Duration;

use colored::Colorize;

use crate::commands::Commands;
use crate::common::config::Config;
use crate::common::{Error, Result};
use crate::runtime::Registry;
use crate::testing::{self, builtin, RunReport, Runner, ScenarioFile};

/// Dispatch a CLI command
///
/// Returns `Ok(false)` when the command ran but at least one scenario failed.
pub async fn dispatch(command: Commands, config: &Config, verbose: bool) -> Result<bool> {
    match command {
        Commands::Suite {
            contract,
            json,
            timeout,
        } => {
            let contract = contract.unwrap_or_else(|| config.defaults.contract.clone());
            let runner = runner(config, timeout, json, verbose)?;

            let scenarios = builtin::momento_suite(&contract);
            let report = RunReport::new(vec![runner.run_suite(&contract, &scenarios).await]);
            finish(report, json)
        }

        Commands::Test {
            paths,
            json,
            timeout,
        } => {
            let runner = runner(config, timeout, json, verbose)?;

            // Parse everything up front so a bad file fails before anything runs
            let files = paths
                .iter()
                .map(|path| ScenarioFile::load(path))
                .collect::<Result<Vec<_>>>()?;

            let mut suites = Vec::with_capacity(files.len());
            for (path, file) in paths.iter().zip(files) {
                if !json {
                    print_file_header(path, &file);
                }
                let name = file.name.clone();
                let scenarios = testing::from_file(file, &config.defaults.contract);
                suites.push(runner.run_suite(&name, &scenarios).await);
            }

            finish(RunReport::new(suites), json)
        }

        Commands::Contracts => {
            let registry = Registry::builtin();
            for def in registry.all() {
                println!(
                    "{:<16} {:<8} {}",
                    def.id.bold(),
                    def.version.to_string().dimmed(),
                    def.description
                );
                println!("  methods: {}", def.implementation().methods().join(", "));
            }
            Ok(true)
        }
    }
}

fn runner(config: &Config, timeout: Option<u64>, json: bool, verbose: bool) -> Result<Runner> {
    let mut runner = Runner::new(config).quiet(json).verbose(verbose);
    if let Some(secs) = timeout {
        if secs == 0 {
            return Err(Error::Config("--timeout must be at least 1 second".to_string()));
        }
        runner = runner.with_timeout(Duration::from_secs(secs));
    }
    Ok(runner)
}

fn print_file_header(path: &Path, file: &ScenarioFile) {
    println!("\n{} {}", "Scenario file:".cyan(), path.display());
    if let Some(desc) = &file.description {
        println!("  {}", desc.dimmed());
    }
}

fn finish(report: RunReport, json: bool) -> Result<bool> {
    if json {
        println!("{}", report.to_json()?);
    } else if report.suites.len() > 1 {
        let failed: usize = report.suites.iter().map(|s| s.failed).sum();
        let passed: usize = report.suites.iter().map(|s| s.passed).sum();
        println!(
            "{} {} suites: {} passed, {} failed",
            "Total:".bold(),
            report.suites.len(),
            passed,
            failed
        );
    }
    Ok(report.success)
}
