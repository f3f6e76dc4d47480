//! Scenario trait and per-scenario context

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::common::Result;
use crate::harness::ContractInstance;
use crate::runtime::{Actor, Network};

/// Everything a scenario may touch, created at setup and dropped at the end
pub struct ScenarioContext {
    pub network: Arc<Network>,
    pub instance: ContractInstance,
}

impl ScenarioContext {
    /// First actor in the pool
    pub fn owner(&self) -> Actor {
        self.network.deployer()
    }

    pub fn actor(&self, index: usize) -> Result<Actor> {
        self.network.actor(index)
    }
}

/// One independent unit of behavior verification
///
/// The runner deploys [`Scenario::contract`] before calling `execute`, then
/// calls `verify`. Neither phase sees state from any other scenario.
#[async_trait]
pub trait Scenario: Send + Sync {
    fn name(&self) -> &str;

    /// Contract to deploy during setup
    fn contract(&self) -> &str;

    /// Per-scenario time limit, overriding the runner default
    fn timeout(&self) -> Option<Duration> {
        None
    }

    /// Whether `verify` asserts anything about the effects of `execute`
    fn has_postcondition(&self) -> bool {
        true
    }

    async fn execute(&self, ctx: &ScenarioContext) -> Result<()>;

    async fn verify(&self, ctx: &ScenarioContext) -> Result<()>;
}
