//! Simulated network: registry, actor pool and address allocation

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use super::registry::Registry;
use super::types::{contract_address, Actor, Address};
use crate::common::config::NetworkConfig;
use crate::common::{Error, Result};

/// The environment contracts are deployed into
#[derive(Debug)]
pub struct Network {
    registry: Registry,
    actors: Vec<Actor>,
    nonce: AtomicU64,
    latency: Duration,
}

impl Network {
    pub fn new(registry: Registry, config: &NetworkConfig) -> Self {
        let actors = (0..config.accounts.max(1)).map(Actor::new).collect();
        Self {
            registry,
            actors,
            nonce: AtomicU64::new(0),
            latency: config.call_latency(),
        }
    }

    /// Network with the builtin registry and default settings
    pub fn local() -> Self {
        Self::new(Registry::builtin(), &NetworkConfig::default())
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Ordered actor pool
    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn actor(&self, index: usize) -> Result<Actor> {
        self.actors
            .get(index)
            .copied()
            .ok_or(Error::UnknownActor(index))
    }

    /// First actor in the pool; deploys contracts and acts as owner
    pub fn deployer(&self) -> Actor {
        self.actors[0]
    }

    /// Allocate the address for the next deployment
    pub fn next_address(&self) -> Address {
        let nonce = self.nonce.fetch_add(1, Ordering::SeqCst) + 1;
        contract_address(nonce)
    }

    /// Wait out the configured per-call latency
    pub async fn settle(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::types::actor_address;

    #[test]
    fn test_actor_pool_is_ordered() {
        let network = Network::local();
        assert_eq!(network.actors().len(), 20);
        assert_eq!(network.deployer().index, 0);
        assert_eq!(network.actor(5).unwrap().address, actor_address(5));
        assert!(matches!(network.actor(20), Err(Error::UnknownActor(20))));
    }

    #[test]
    fn test_addresses_are_unique() {
        let network = Network::local();
        let a = network.next_address();
        let b = network.next_address();
        assert_ne!(a, b);
        assert_eq!(b, contract_address(2));
    }
}
