//! Contract implementation trait and deployable definitions

use semver::Version;
use serde_json::Value;
use std::sync::Arc;

use super::types::{CallContext, Storage};
use crate::common::Result;

/// Implementation logic that sits behind a proxy
///
/// Implementations are stateless. Every piece of contract state lives in the
/// [`Storage`] owned by the proxy, which is what keeps the external address
/// stable when the logic behind it changes.
pub trait ContractLogic: Send + Sync {
    /// Run the one-time initializer
    fn initialize(&self, storage: &mut Storage, ctx: &CallContext) -> Result<()>;

    /// Dispatch a method call
    fn call(
        &self,
        storage: &mut Storage,
        ctx: &CallContext,
        method: &str,
        args: &[Value],
    ) -> Result<Value>;

    /// Methods this implementation answers to
    fn methods(&self) -> &'static [&'static str];
}

/// A deployable contract known to the registry
#[derive(Clone)]
pub struct ContractDefinition {
    /// Identifier used to look the contract up (e.g., "ERC721Momento")
    pub id: String,
    /// Implementation version
    pub version: Version,
    /// Brief description
    pub description: String,
    factory: fn() -> Arc<dyn ContractLogic>,
}

impl ContractDefinition {
    pub fn new(
        id: &str,
        version: Version,
        description: &str,
        factory: fn() -> Arc<dyn ContractLogic>,
    ) -> Self {
        Self {
            id: id.to_string(),
            version,
            description: description.to_string(),
            factory,
        }
    }

    /// Create a fresh implementation instance
    pub fn implementation(&self) -> Arc<dyn ContractLogic> {
        (self.factory)()
    }
}

impl std::fmt::Debug for ContractDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractDefinition")
            .field("id", &self.id)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}
