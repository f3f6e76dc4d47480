//! Proxied deployment

use std::sync::Arc;

use super::instance::ContractInstance;
use crate::common::{Error, Result};
use crate::runtime::{Network, Proxy};

/// Deploy `contract` behind a fresh proxy and run its initializer once
///
/// Any failure, whether the name does not resolve or the initializer
/// rejects, is reported as [`Error::Deployment`]. Nothing is retried.
pub async fn deploy_proxied(network: &Arc<Network>, contract: &str) -> Result<ContractInstance> {
    let definition = network
        .registry()
        .resolve(contract)
        .map_err(|e| Error::deployment(contract, e))?;

    network.settle().await;

    let deployer = network.deployer();
    let mut proxy = Proxy::new(network.next_address(), definition);
    proxy
        .initialize(deployer.address)
        .map_err(|e| Error::deployment(contract, format!("initializer failed: {}", e)))?;

    tracing::debug!(
        contract,
        address = %proxy.address(),
        version = %proxy.version(),
        deployer = %deployer.address,
        "Deployed behind proxy"
    );

    Ok(ContractInstance::new(proxy, Arc::clone(network)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::MomentoToken;

    #[tokio::test]
    async fn test_deploy_runs_initializer() {
        let network = Arc::new(Network::local());
        let instance = deploy_proxied(&network, "ERC721Momento").await.unwrap();

        assert_eq!(instance.contract(), "ERC721Momento");
        assert_eq!(instance.name().await.unwrap(), "Momento NFT");
        assert_eq!(instance.symbol().await.unwrap(), "MNTNFT");
    }

    #[tokio::test]
    async fn test_initializer_is_not_rerunnable() {
        let network = Arc::new(Network::local());
        let instance = deploy_proxied(&network, "ERC721Momento").await.unwrap();

        let err = instance.initialize(&network.deployer()).await.unwrap_err();
        assert!(matches!(err, Error::AlreadyInitialized));
    }

    #[tokio::test]
    async fn test_unknown_contract_is_deployment_error() {
        let network = Arc::new(Network::local());
        let err = deploy_proxied(&network, "ERC20Nothing").await.unwrap_err();

        match err {
            Error::Deployment { contract, reason } => {
                assert_eq!(contract, "ERC20Nothing");
                assert!(reason.contains("not registered"));
            }
            other => panic!("expected deployment error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_two_deployments_have_independent_state() {
        let network = Arc::new(Network::local());
        let first = deploy_proxied(&network, "ERC721Momento").await.unwrap();
        let second = deploy_proxied(&network, "ERC721Momento").await.unwrap();
        assert_ne!(first.address(), second.address());

        let owner = network.deployer();
        first.create_item(&owner, 100).await.unwrap();
        first.create_item(&owner, 3).await.unwrap();

        assert_eq!(first.item_count().await.unwrap(), 2);
        assert_eq!(second.item_count().await.unwrap(), 0);
        assert_eq!(second.balance_of(&owner).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_item_assigns_owner() {
        let network = Arc::new(Network::local());
        let instance = deploy_proxied(&network, "ERC721Momento").await.unwrap();
        let actor = network.actor(3).unwrap();

        let id = instance.create_item(&actor, 100).await.unwrap();
        assert_eq!(id, 1);
        assert_eq!(instance.owner_of(id).await.unwrap(), actor.address);
        assert_eq!(instance.balance_of(&actor).await.unwrap(), 1);
    }
}
