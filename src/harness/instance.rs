//! Deployed contract handles
//!
//! [`ContractInstance`] is the only way scenarios touch a deployment. The
//! typed [`MomentoToken`] surface covers what the built-in scenarios need;
//! [`ContractInstance::call`] stays available for declared (YAML) scenarios.

use async_trait::async_trait;
use semver::Version;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::common::{Error, Result};
use crate::runtime::{address_hex, parse_address, Actor, Address, Network, Proxy};

/// Handle to a proxied deployment, owned by the scenario that created it
#[derive(Debug, Clone)]
pub struct ContractInstance {
    address: Address,
    contract: String,
    version: Version,
    proxy: Arc<Mutex<Proxy>>,
    network: Arc<Network>,
}

impl ContractInstance {
    pub(crate) fn new(proxy: Proxy, network: Arc<Network>) -> Self {
        Self {
            address: proxy.address(),
            contract: proxy.contract().to_string(),
            version: proxy.version().clone(),
            proxy: Arc::new(Mutex::new(proxy)),
            network,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn contract(&self) -> &str {
        &self.contract
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Invoke a method attributed to `from`
    pub async fn call(&self, from: &Actor, method: &str, args: &[Value]) -> Result<Value> {
        self.network.settle().await;

        let mut proxy = self.proxy.lock().await;
        let result = proxy.call(from.address, method, args);

        match &result {
            Ok(value) => tracing::debug!(
                contract = %self.address,
                method,
                from = %from.address,
                result = %value,
                "Call succeeded"
            ),
            Err(e) => tracing::debug!(
                contract = %self.address,
                method,
                from = %from.address,
                error = %e,
                "Call failed"
            ),
        }

        result
    }

    /// Read-only call from the zero address
    pub async fn read(&self, method: &str, args: &[Value]) -> Result<Value> {
        let anonymous = Actor {
            index: usize::MAX,
            address: Address::ZERO,
        };
        self.call(&anonymous, method, args).await
    }

    /// Re-run the initializer; always rejected on a deployed instance
    pub async fn initialize(&self, from: &Actor) -> Result<()> {
        self.proxy.lock().await.initialize(from.address)
    }
}

/// Typed capability surface of ERC721Momento
#[async_trait]
pub trait MomentoToken: Send + Sync {
    async fn name(&self) -> Result<String>;

    async fn symbol(&self) -> Result<String>;

    /// Create an item attributed to `actor`; returns the new item id
    async fn create_item(&self, actor: &Actor, quantity: u64) -> Result<u64>;

    async fn item_count(&self) -> Result<u64>;

    async fn owner_of(&self, item_id: u64) -> Result<Address>;

    async fn balance_of(&self, actor: &Actor) -> Result<u64>;
}

fn expect_string(method: &str, value: Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(Error::revert(
            method,
            &format!("expected a string result, got {}", other),
        )),
    }
}

fn expect_u64(method: &str, value: Value) -> Result<u64> {
    value.as_u64().ok_or_else(|| {
        Error::revert(
            method,
            &format!("expected an integer result, got {}", value),
        )
    })
}

#[async_trait]
impl MomentoToken for ContractInstance {
    async fn name(&self) -> Result<String> {
        expect_string("name", self.read("name", &[]).await?)
    }

    async fn symbol(&self) -> Result<String> {
        expect_string("symbol", self.read("symbol", &[]).await?)
    }

    async fn create_item(&self, actor: &Actor, quantity: u64) -> Result<u64> {
        let value = self.call(actor, "createItem", &[json!(quantity)]).await?;
        expect_u64("createItem", value)
    }

    async fn item_count(&self) -> Result<u64> {
        expect_u64("itemCount", self.read("itemCount", &[]).await?)
    }

    async fn owner_of(&self, item_id: u64) -> Result<Address> {
        let value = self.read("ownerOf", &[json!(item_id)]).await?;
        parse_address(&expect_string("ownerOf", value)?)
    }

    async fn balance_of(&self, actor: &Actor) -> Result<u64> {
        let value = self
            .read("balanceOf", &[json!(address_hex(&actor.address))])
            .await?;
        expect_u64("balanceOf", value)
    }
}
