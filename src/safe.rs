//! Safe deployment: precomputed hashes and transaction assembly.

use crate::abi;
use crate::config::Configuration;
use crate::crypto::{create2, keccak256};
use crate::matcher::Address;

/// A Safe deployment in hash-ready form.
///
/// Precomputes everything that is fixed across search attempts — the setup
/// initializer, its hash, and the proxy init code hash — so the per-attempt
/// work is two keccak256 invocations.
#[derive(Clone)]
pub struct Deployment {
    factory: Address,
    singleton: Address,
    initializer: Vec<u8>,
    initializer_hash: [u8; 32],
    init_code_hash: [u8; 32],
}

/// The factory call that creates the Safe.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Transaction {
    /// The `to` address for the Ethereum transaction (the proxy factory).
    pub to: Address,
    /// The `createProxyWithNonce` calldata.
    pub calldata: Vec<u8>,
}

/// The result of a successful search: a deployable vanity Safe.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Creation {
    /// The CREATE2 address the Safe will be deployed at.
    pub creation_address: Address,
    /// The winning salt nonce.
    pub salt_nonce: [u8; 32],
    /// The deployment transaction.
    pub transaction: Transaction,
}

impl Deployment {
    /// Builds the hash-ready form of a configuration. The configuration is
    /// assumed validated; encoding itself cannot fail.
    pub fn new(config: &Configuration) -> Self {
        let (to, data) = config
            .setup
            .as_ref()
            .map(|setup| (setup.address, abi::safe_to_l2_setup(setup.singleton_l2)))
            .unwrap_or_default();
        let initializer = abi::safe_setup(
            &config.owners,
            config.threshold,
            to,
            &data,
            config.fallback_handler.unwrap_or_default(),
        );
        let initializer_hash = keccak256(&initializer);
        let init_code_hash = abi::proxy_init_code_hash(&config.proxy_init_code, config.singleton);

        Self {
            factory: config.proxy_factory,
            singleton: config.singleton,
            initializer,
            initializer_hash,
            init_code_hash,
        }
    }

    /// The Safe `setup` initializer calldata.
    pub fn initializer(&self) -> &[u8] {
        &self.initializer
    }

    /// Derives the creation address for a salt nonce.
    #[inline]
    pub fn address_for(&self, salt_nonce: &[u8; 32]) -> Address {
        let salt = create2::safe_salt(&self.initializer_hash, salt_nonce);
        Address(create2::safe_address(
            self.factory.as_bytes(),
            &self.init_code_hash,
            &salt,
        ))
    }

    /// Assembles the full creation result for a salt nonce.
    pub fn creation(&self, salt_nonce: [u8; 32]) -> Creation {
        Creation {
            creation_address: self.address_for(&salt_nonce),
            salt_nonce,
            transaction: Transaction {
                to: self.factory,
                calldata: abi::create_proxy_with_nonce(
                    self.singleton,
                    &self.initializer,
                    salt_nonce,
                ),
            },
        }
    }
}

impl Creation {
    /// Salt nonce as 0x-prefixed hex.
    pub fn salt_nonce_hex(&self) -> String {
        format!("0x{}", hex::encode(self.salt_nonce))
    }
}
