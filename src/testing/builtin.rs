//! Built-in ERC721Momento scenarios

use async_trait::async_trait;

use super::assert::assert_equal;
use super::scenario::{Scenario, ScenarioContext};
use crate::common::Result;
use crate::harness::MomentoToken;
use crate::runtime::momento::{TOKEN_NAME, TOKEN_SYMBOL};

/// Quantity passed to `createItem` by the mint scenario
pub const MINT_QUANTITY: u64 = 100;

/// The ERC721Momento suite against `contract`
pub fn momento_suite(contract: &str) -> Vec<Box<dyn Scenario>> {
    vec![
        Box::new(MetadataRead {
            contract: contract.to_string(),
        }),
        Box::new(Mint {
            contract: contract.to_string(),
        }),
    ]
}

/// Reads `name()` and `symbol()` and compares them to the token literals
pub struct MetadataRead {
    contract: String,
}

#[async_trait]
impl Scenario for MetadataRead {
    fn name(&self) -> &str {
        "retrieve returns a name, symbol"
    }

    fn contract(&self) -> &str {
        &self.contract
    }

    async fn execute(&self, _ctx: &ScenarioContext) -> Result<()> {
        Ok(())
    }

    async fn verify(&self, ctx: &ScenarioContext) -> Result<()> {
        assert_equal("name()", ctx.instance.name().await?, TOKEN_NAME)?;
        assert_equal("symbol()", ctx.instance.symbol().await?, TOKEN_SYMBOL)?;
        Ok(())
    }
}

/// Creates an item as the owner.
///
/// No postcondition is asserted: the expected effect of `createItem` has not
/// been specified yet, so the runner reports this scenario as unverified.
pub struct Mint {
    contract: String,
}

#[async_trait]
impl Scenario for Mint {
    fn name(&self) -> &str {
        "mint nft"
    }

    fn contract(&self) -> &str {
        &self.contract
    }

    fn has_postcondition(&self) -> bool {
        false
    }

    async fn execute(&self, ctx: &ScenarioContext) -> Result<()> {
        let owner = ctx.owner();
        ctx.instance.create_item(&owner, MINT_QUANTITY).await?;
        Ok(())
    }

    async fn verify(&self, _ctx: &ScenarioContext) -> Result<()> {
        Ok(())
    }
}
