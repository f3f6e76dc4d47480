//! Contract registry
//!
//! Resolves contract identifiers to deployable definitions.

use std::collections::BTreeMap;

use super::contract::ContractDefinition;
use super::momento;
use crate::common::{Error, Result};

/// Known contracts, keyed by identifier
#[derive(Debug, Clone, Default)]
pub struct Registry {
    contracts: BTreeMap<String, ContractDefinition>,
}

impl Registry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every contract shipped in this crate
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(momento::definition());
        registry
    }

    /// Add or replace a definition
    pub fn register(&mut self, definition: ContractDefinition) {
        self.contracts.insert(definition.id.clone(), definition);
    }

    /// Look up a definition by exact identifier
    pub fn resolve(&self, id: &str) -> Result<&ContractDefinition> {
        self.contracts
            .get(id)
            .ok_or_else(|| Error::UnknownContract(id.to_string()))
    }

    /// All definitions, ordered by identifier
    pub fn all(&self) -> impl Iterator<Item = &ContractDefinition> {
        self.contracts.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_momento() {
        let registry = Registry::builtin();
        let def = registry.resolve("ERC721Momento").unwrap();
        assert_eq!(def.version.to_string(), "1.0.0");
        assert_eq!(registry.all().count(), 1);
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let registry = Registry::builtin();
        assert!(matches!(
            registry.resolve("erc721momento"),
            Err(Error::UnknownContract(_))
        ));
    }
}
