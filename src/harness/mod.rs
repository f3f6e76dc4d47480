//! Deployment harness
//!
//! Turns a contract name into a live, proxied [`ContractInstance`].

mod deploy;
mod instance;

pub use deploy::deploy_proxied;
pub use instance::{ContractInstance, MomentoToken};
