//! Core runtime types: addresses, actors, call context and proxy storage

use alloy_primitives::hex;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::common::{Error, Result};

pub use alloy_primitives::Address;

/// Address prefix byte for actor accounts
const ACTOR_DOMAIN: u8 = 0xac;
/// Address prefix byte for deployed proxies
const CONTRACT_DOMAIN: u8 = 0xc0;

/// Deterministic address for slot `n` in a domain
fn derived(domain: u8, n: u64) -> Address {
    let mut bytes = [0u8; 20];
    bytes[0] = domain;
    bytes[12..].copy_from_slice(&n.to_be_bytes());
    Address::from(bytes)
}

/// Address of the actor at `index` in the pool
pub fn actor_address(index: usize) -> Address {
    derived(ACTOR_DOMAIN, index as u64)
}

/// Address of the proxy created with deployment nonce `nonce`
pub fn contract_address(nonce: u64) -> Address {
    derived(CONTRACT_DOMAIN, nonce)
}

/// Canonical `0x`-prefixed lowercase form, used for storage keys and call values
pub fn address_hex(address: &Address) -> String {
    hex::encode_prefixed(address)
}

/// Parse a `0x`-prefixed hex address
pub fn parse_address(s: &str) -> Result<Address> {
    if !s.starts_with("0x") && !s.starts_with("0X") {
        return Err(Error::InvalidArgument(format!(
            "address '{}' must start with 0x",
            s
        )));
    }
    s.parse::<Address>()
        .map_err(|e| Error::InvalidArgument(format!("address '{}': {}", s, e)))
}

/// A caller identity from the actor pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Actor {
    /// Position in the pool (0 is the deployer/owner)
    pub index: usize,
    pub address: Address,
}

impl Actor {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            address: actor_address(index),
        }
    }
}

/// Who is calling which contract
#[derive(Debug, Clone, Copy)]
pub struct CallContext {
    pub caller: Address,
    pub contract: Address,
}

/// Key/value state held by a proxy on behalf of its implementation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Storage {
    slots: BTreeMap<String, Value>,
}

impl Storage {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.slots.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.slots.insert(key.into(), value);
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Integer slot, treating an unset slot as zero
    pub fn get_u64(&self, key: &str) -> u64 {
        self.get(key).and_then(Value::as_u64).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Decode an unsigned integer argument, accepting JSON numbers or decimal strings
pub fn arg_u64(method: &str, args: &[Value], index: usize) -> Result<u64> {
    match args.get(index) {
        Some(Value::Number(n)) => n.as_u64().ok_or_else(|| {
            Error::InvalidArgument(format!("{}: argument {} must be unsigned", method, index))
        }),
        Some(Value::String(s)) => s.trim().parse::<u64>().map_err(|_| {
            Error::InvalidArgument(format!(
                "{}: argument {} '{}' is not an integer",
                method, index, s
            ))
        }),
        Some(other) => Err(Error::InvalidArgument(format!(
            "{}: argument {} must be an integer, got {}",
            method, index, other
        ))),
        None => Err(Error::InvalidArgument(format!(
            "{}: missing argument {}",
            method, index
        ))),
    }
}

/// Decode an address argument
pub fn arg_address(method: &str, args: &[Value], index: usize) -> Result<Address> {
    match args.get(index) {
        Some(Value::String(s)) => parse_address(s),
        Some(other) => Err(Error::InvalidArgument(format!(
            "{}: argument {} must be an address string, got {}",
            method, index, other
        ))),
        None => Err(Error::InvalidArgument(format!(
            "{}: missing argument {}",
            method, index
        ))),
    }
}

/// String form of a call value: strings unquoted, everything else as JSON
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
