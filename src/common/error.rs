//! Error types for the contract harness
//!
//! Every error is scoped to the scenario that raised it. The runner turns
//! errors into FAIL outcomes and keeps going, so messages carry enough
//! context (contract, method, expected/actual values) to be read on their own.

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the harness
#[derive(Error, Debug)]
pub enum Error {
    // === Deployment Errors ===
    #[error("Deployment of '{contract}' failed: {reason}")]
    Deployment { contract: String, reason: String },

    #[error("Contract '{0}' is not registered. Use 'momento contracts' to list known contracts")]
    UnknownContract(String),

    #[error("Contract is already initialized")]
    AlreadyInitialized,

    // === Call Errors ===
    #[error("Call to '{method}' reverted: {reason}")]
    Revert { method: String, reason: String },

    #[error("Contract has no method '{0}'")]
    UnknownMethod(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Actor {0} is not in the actor pool")]
    UnknownActor(usize),

    // === Scenario Errors ===
    #[error("{what}: expected '{expected}', got '{actual}'")]
    AssertionFailure {
        what: String,
        expected: String,
        actual: String,
    },

    #[error("Scenario timed out after {0:?}")]
    Timeout(Duration),

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    #[error("Invalid scenario file: {0}")]
    Yaml(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a deployment error for a contract
    pub fn deployment(contract: &str, reason: impl std::fmt::Display) -> Self {
        Self::Deployment {
            contract: contract.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a revert error for a method call
    pub fn revert(method: &str, reason: &str) -> Self {
        Self::Revert {
            method: method.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an assertion failure capturing both sides
    pub fn assertion(what: &str, expected: impl ToString, actual: impl ToString) -> Self {
        Self::AssertionFailure {
            what: what.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Stable machine-readable code, used in JSON reports
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Deployment { .. } | Error::UnknownContract(_) | Error::AlreadyInitialized => {
                "DEPLOYMENT_ERROR"
            }
            Error::AssertionFailure { .. } => "ASSERTION_FAILURE",
            Error::Timeout(_) => "TIMEOUT",
            Error::Revert { .. } | Error::UnknownMethod(_) => "CALL_REVERTED",
            Error::InvalidArgument(_) | Error::UnknownActor(_) => "INVALID_CALL",
            Error::Config(_) | Error::ConfigParse(_) | Error::Yaml(_) => "CONFIG_ERROR",
            Error::Io(_) | Error::FileRead { .. } | Error::Json(_) => "INTERNAL_ERROR",
        }
    }
}
