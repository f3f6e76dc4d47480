//! Upgradeable proxy
//!
//! A proxy owns the address and the storage; the implementation it forwards
//! to only supplies logic. Calls are transactional: a call that fails leaves
//! storage exactly as it was.

use semver::Version;
use serde_json::Value;
use std::sync::Arc;

use super::contract::{ContractDefinition, ContractLogic};
use super::types::{Address, CallContext, Storage};
use crate::common::{Error, Result};

pub struct Proxy {
    address: Address,
    contract: String,
    version: Version,
    implementation: Arc<dyn ContractLogic>,
    storage: Storage,
    initialized: bool,
}

impl Proxy {
    /// Create an uninitialized proxy pointing at a definition's implementation
    pub fn new(address: Address, definition: &ContractDefinition) -> Self {
        Self {
            address,
            contract: definition.id.clone(),
            version: definition.version.clone(),
            implementation: definition.implementation(),
            storage: Storage::default(),
            initialized: false,
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

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Run the implementation's initializer. Only the first call succeeds.
    pub fn initialize(&mut self, caller: Address) -> Result<()> {
        if self.initialized {
            return Err(Error::AlreadyInitialized);
        }

        let ctx = CallContext {
            caller,
            contract: self.address,
        };
        let mut scratch = self.storage.clone();
        self.implementation.initialize(&mut scratch, &ctx)?;

        self.storage = scratch;
        self.initialized = true;
        Ok(())
    }

    /// Forward a call to the implementation
    pub fn call(&mut self, caller: Address, method: &str, args: &[Value]) -> Result<Value> {
        if !self.initialized {
            return Err(Error::revert(method, "contract is not initialized"));
        }

        let ctx = CallContext {
            caller,
            contract: self.address,
        };
        let mut scratch = self.storage.clone();
        let result = self
            .implementation
            .call(&mut scratch, &ctx, method, args)?;

        self.storage = scratch;
        Ok(result)
    }

}

impl std::fmt::Debug for Proxy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Proxy")
            .field("address", &self.address)
            .field("contract", &self.contract)
            .field("version", &self.version)
            .field("initialized", &self.initialized)
            .field("slots", &self.storage.len())
            .finish()
    }
}
