//! # vanity-safe
//!
//! Safe (smart account) vanity address search. Varies the deployment
//! `saltNonce` until the CREATE2-derived proxy address starts with a
//! chosen hex prefix, then emits the `createProxyWithNonce` transaction
//! that deploys the Safe at that address.
//!
//! Uses the same formula as `SafeProxyFactory`:
//! salt = keccak256(keccak256(initializer) || saltNonce), then
//! address = keccak256(0xff || factory || salt || initCodeHash)[12..32].

pub mod abi;
pub mod chain;
pub mod config;
pub mod crypto;
pub mod matcher;
pub mod message;
pub mod safe;
pub mod worker;

pub use chain::Chain;
pub use config::{ConfigError, Configuration, SafeToL2Setup};
pub use matcher::{Address, Prefix, PrefixError};
pub use safe::{Creation, Deployment, Transaction};
pub use worker::{CancelToken, SearchError, SearchWorker};
