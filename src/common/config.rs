//! Configuration file handling

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use super::paths::config_path;
use super::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    /// Default settings
    #[serde(default)]
    pub defaults: Defaults,

    /// Timeout settings
    #[serde(default)]
    pub timeouts: Timeouts,

    /// Simulated network settings
    #[serde(default)]
    pub network: NetworkConfig,
}

/// Default settings
#[derive(Debug, Deserialize, Clone)]
pub struct Defaults {
    /// Contract deployed by scenario files that don't name one
    #[serde(default = "default_contract")]
    pub contract: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            contract: default_contract(),
        }
    }
}

fn default_contract() -> String {
    "ERC721Momento".to_string()
}

/// Timeout settings in seconds
#[derive(Debug, Deserialize, Clone)]
pub struct Timeouts {
    /// Upper bound on a single scenario (setup, execute and verify together)
    #[serde(default = "default_scenario")]
    pub scenario_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            scenario_secs: default_scenario(),
        }
    }
}

fn default_scenario() -> u64 {
    60
}

/// Simulated network configuration
#[derive(Debug, Deserialize, Clone)]
pub struct NetworkConfig {
    /// Number of actors in the pool
    #[serde(default = "default_accounts")]
    pub accounts: usize,

    /// Artificial delay applied to every deployment and call
    #[serde(default)]
    pub call_latency_ms: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            accounts: default_accounts(),
            call_latency_ms: 0,
        }
    }
}

fn default_accounts() -> usize {
    20
}

impl NetworkConfig {
    pub fn call_latency(&self) -> Duration {
        Duration::from_millis(self.call_latency_ms)
    }
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }
        Ok(Self::default())
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| super::Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        let config: Self =
            toml::from_str(&content).map_err(|e| super::Error::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.network.accounts == 0 {
            return Err(super::Error::Config(
                "network.accounts must be at least 1".to_string(),
            ));
        }
        if self.timeouts.scenario_secs == 0 {
            return Err(super::Error::Config(
                "timeouts.scenario_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
