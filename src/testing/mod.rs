//! Scenario runner
//!
//! Scenarios come from two places: the built-in ERC721Momento suite and YAML
//! files. Both run through the same [`Runner`], which deploys a fresh
//! instance per scenario and records PASS/FAIL without letting a failure
//! stop the rest of the suite.

pub mod assert;
pub mod builtin;
mod config;
mod declared;
mod runner;
mod scenario;

pub use config::*;
pub use declared::{from_file, DeclaredScenario};
pub use runner::{
    Phase, RunReport, Runner, ScenarioOutcome, ScenarioState, Status, SuiteReport, UNVERIFIED_NOTE,
};
pub use scenario::{Scenario, ScenarioContext};
