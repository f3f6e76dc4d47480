//! In-process contract runtime
//!
//! Provides the collaborators the harness deploys into: a contract registry,
//! proxies that forward to stateless implementations, and a network with an
//! ordered actor pool.

mod contract;
pub mod momento;
mod network;
mod proxy;
mod registry;
mod types;

pub use contract::{ContractDefinition, ContractLogic};
pub use network::Network;
pub use proxy::Proxy;
pub use registry::Registry;
pub use types::{
    actor_address, address_hex, contract_address, display_value, parse_address, Actor, Address,
    CallContext, Storage,
};
