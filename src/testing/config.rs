//! Scenario file configuration types
//!
//! Defines the data structures for deserializing YAML scenario files.

use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

use crate::common::{Error, Result};

/// A scenario file: one contract, any number of scenarios
#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct ScenarioFile {
    /// Name of the suite
    pub name: String,
    /// Optional description of what the suite verifies
    pub description: Option<String>,
    /// Contract to deploy for every scenario (default: config defaults.contract)
    pub contract: Option<String>,
    /// Scenarios, run in order
    pub scenarios: Vec<ScenarioSpec>,
}

/// A single declared scenario
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ScenarioSpec {
    /// Name of the scenario
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Overrides the contract named at file level
    pub contract: Option<String>,
    /// Time limit in seconds for the whole scenario
    pub timeout_secs: Option<u64>,
    /// Calls made during the execute phase
    #[serde(default)]
    pub execute: Vec<CallStep>,
    /// Assertions made during the verify phase
    #[serde(default)]
    pub verify: Vec<VerifyStep>,
}

/// A method call made during execute
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct CallStep {
    /// Method name (e.g., "createItem")
    pub call: String,
    /// Call arguments
    #[serde(default)]
    pub args: Vec<Value>,
    /// Index of the calling actor in the pool
    #[serde(default)]
    pub from: usize,
    /// The call is expected to revert
    #[serde(default)]
    pub expect_revert: bool,
}

/// A read compared against an expected value during verify
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct VerifyStep {
    /// Method name (e.g., "name")
    pub call: String,
    /// Call arguments
    #[serde(default)]
    pub args: Vec<Value>,
    /// Index of the calling actor in the pool
    #[serde(default)]
    pub from: usize,
    /// Expected result, compared by string form
    pub equals: Value,
}

impl ScenarioFile {
    /// Load and parse a scenario file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        Self::parse(&content).map_err(|e| match e {
            Error::Yaml(msg) => Error::Yaml(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    pub fn parse(content: &str) -> Result<Self> {
        let file: Self =
            serde_yaml::from_str(content).map_err(|e| Error::Yaml(e.to_string()))?;
        file.validate()?;
        Ok(file)
    }

    fn validate(&self) -> Result<()> {
        for spec in &self.scenarios {
            if spec.timeout_secs == Some(0) {
                return Err(Error::Yaml(format!(
                    "scenario '{}': timeout_secs must be greater than zero",
                    spec.name
                )));
            }
        }
        Ok(())
    }
}
