//! Momento harness - deploy proxied contracts and verify them with scenarios
//!
//! The harness deploys a named contract behind an upgradeable proxy, hands
//! each scenario its own fresh instance, and reports PASS/FAIL per scenario.

pub mod cli;
pub mod commands;
pub mod common;
pub mod harness;
pub mod runtime;
pub mod testing;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use harness::{deploy_proxied, ContractInstance, MomentoToken};
