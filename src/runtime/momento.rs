//! ERC721Momento implementation
//!
//! Metadata plus item creation. Each `createItem` call mints one item owned
//! by the caller and records the requested quantity against it. Transfers
//! and approvals are not modelled.

use semver::Version;
use serde_json::{json, Value};
use std::sync::Arc;

use super::contract::{ContractDefinition, ContractLogic};
use super::types::{address_hex, arg_address, arg_u64, CallContext, Storage};
use crate::common::{Error, Result};

pub const CONTRACT_ID: &str = "ERC721Momento";
pub const TOKEN_NAME: &str = "Momento NFT";
pub const TOKEN_SYMBOL: &str = "MNTNFT";

const NAME: &str = "name";
const SYMBOL: &str = "symbol";
const ITEM_COUNT: &str = "itemCount";

const METHODS: &[&str] = &[
    "name",
    "symbol",
    "createItem",
    "itemCount",
    "ownerOf",
    "balanceOf",
    "quantityOf",
];

fn owner_key(item_id: u64) -> String {
    format!("owner:{}", item_id)
}

fn quantity_key(item_id: u64) -> String {
    format!("quantity:{}", item_id)
}

fn balance_key(owner: &str) -> String {
    format!("balance:{}", owner)
}

/// Registry entry for ERC721Momento
pub fn definition() -> ContractDefinition {
    ContractDefinition::new(
        CONTRACT_ID,
        Version::new(1, 0, 0),
        "Upgradeable ERC721 collection with item creation",
        implementation,
    )
}

fn implementation() -> Arc<dyn ContractLogic> {
    Arc::new(Erc721Momento)
}

/// Stateless logic; state lives in the proxy's storage
#[derive(Debug, Default)]
pub struct Erc721Momento;

impl Erc721Momento {
    fn create_item(
        &self,
        storage: &mut Storage,
        ctx: &CallContext,
        args: &[Value],
    ) -> Result<Value> {
        let quantity = arg_u64("createItem", args, 0)?;
        if quantity == 0 {
            return Err(Error::revert("createItem", "quantity must be greater than zero"));
        }

        let item_id = storage.get_u64(ITEM_COUNT) + 1;
        let owner = address_hex(&ctx.caller);
        let balance = storage.get_u64(&balance_key(&owner));

        storage.set(ITEM_COUNT, json!(item_id));
        storage.set(owner_key(item_id), json!(owner));
        storage.set(quantity_key(item_id), json!(quantity));
        storage.set(balance_key(&owner), json!(balance + 1));

        tracing::debug!(item_id, quantity, owner = %owner, "Item created");
        Ok(json!(item_id))
    }

    fn owner_of(&self, storage: &Storage, args: &[Value]) -> Result<Value> {
        let item_id = arg_u64("ownerOf", args, 0)?;
        storage
            .get(&owner_key(item_id))
            .cloned()
            .ok_or_else(|| Error::revert("ownerOf", &format!("item {} does not exist", item_id)))
    }

    fn quantity_of(&self, storage: &Storage, args: &[Value]) -> Result<Value> {
        let item_id = arg_u64("quantityOf", args, 0)?;
        storage
            .get(&quantity_key(item_id))
            .cloned()
            .ok_or_else(|| {
                Error::revert("quantityOf", &format!("item {} does not exist", item_id))
            })
    }
}

impl ContractLogic for Erc721Momento {
    fn initialize(&self, storage: &mut Storage, _ctx: &CallContext) -> Result<()> {
        storage.set(NAME, json!(TOKEN_NAME));
        storage.set(SYMBOL, json!(TOKEN_SYMBOL));
        storage.set(ITEM_COUNT, json!(0));
        Ok(())
    }

    fn call(
        &self,
        storage: &mut Storage,
        ctx: &CallContext,
        method: &str,
        args: &[Value],
    ) -> Result<Value> {
        match method {
            "name" => Ok(json!(storage.get_str(NAME).unwrap_or_default())),
            "symbol" => Ok(json!(storage.get_str(SYMBOL).unwrap_or_default())),
            "createItem" => self.create_item(storage, ctx, args),
            "itemCount" => Ok(json!(storage.get_u64(ITEM_COUNT))),
            "ownerOf" => self.owner_of(storage, args),
            "balanceOf" => {
                let owner = arg_address("balanceOf", args, 0)?;
                Ok(json!(storage.get_u64(&balance_key(&address_hex(&owner)))))
            }
            "quantityOf" => self.quantity_of(storage, args),
            other => Err(Error::UnknownMethod(other.to_string())),
        }
    }

    fn methods(&self) -> &'static [&'static str] {
        METHODS
    }
}
