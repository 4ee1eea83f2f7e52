//! Safe deployment configuration and validation.

use crate::matcher::Address;

/// The Safe deployment parameters for a single search run.
///
/// Constructed once per run and read-only thereafter; only the salt nonce
/// varies across attempts.
#[derive(Clone, Debug)]
pub struct Configuration {
    /// The `SafeProxyFactory` contract address.
    pub proxy_factory: Address,
    /// The `SafeProxy` creation code.
    pub proxy_init_code: Vec<u8>,
    /// The `Safe` singleton implementation address.
    pub singleton: Address,
    /// The initial owners, order-significant for the initializer encoding.
    pub owners: Vec<Address>,
    /// The signature threshold.
    pub threshold: usize,
    /// Optional fallback handler (for example `CompatibilityFallbackHandler`).
    pub fallback_handler: Option<Address>,
    /// Optional multi-chain setup via the `SafeToL2Setup` contract.
    pub setup: Option<SafeToL2Setup>,
}

/// Safe multi-chain setup using the `SafeToL2Setup` contract.
#[derive(Clone, Debug)]
pub struct SafeToL2Setup {
    /// The address of the setup contract.
    pub address: Address,
    /// The `SafeL2` singleton for the setup.
    pub singleton_l2: Address,
}

impl Configuration {
    /// Validates the configuration invariants. Runs before any search work
    /// so invalid input never spawns a worker.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.owners.is_empty() {
            return Err(ConfigError::NoOwners);
        }
        if self.threshold == 0 || self.threshold > self.owners.len() {
            return Err(ConfigError::ThresholdOutOfRange {
                threshold: self.threshold,
                owners: self.owners.len(),
            });
        }
        if self.proxy_init_code.is_empty() {
            return Err(ConfigError::EmptyInitCode);
        }
        if self.proxy_factory == Address::zero() {
            return Err(ConfigError::ZeroAddress("proxy factory"));
        }
        if self.singleton == Address::zero() {
            return Err(ConfigError::ZeroAddress("singleton"));
        }
        if let Some(setup) = &self.setup {
            if setup.address == Address::zero() {
                return Err(ConfigError::ZeroAddress("SafeToL2Setup"));
            }
            if setup.singleton_l2 == Address::zero() {
                return Err(ConfigError::ZeroAddress("L2 singleton"));
            }
        }
        Ok(())
    }
}

/// An invalid Safe configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("owners cannot be empty")]
    NoOwners,
    #[error("threshold {threshold} out of range (must be 1..={owners})")]
    ThresholdOutOfRange { threshold: usize, owners: usize },
    #[error("proxy init code cannot be empty")]
    EmptyInitCode,
    #[error("{0} address cannot be zero")]
    ZeroAddress(&'static str),
    #[error("safeToL2Setup and l2Singleton must be provided together")]
    IncompleteL2Setup,
    #[error("invalid {field}: {source}")]
    InvalidHex {
        field: &'static str,
        source: hex::FromHexError,
    },
    #[error(transparent)]
    InvalidPrefix(#[from] crate::matcher::PrefixError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Configuration {
        Configuration {
            proxy_factory: "1111111111111111111111111111111111111111".parse().unwrap(),
            proxy_init_code: vec![0x60, 0x80],
            singleton: "2222222222222222222222222222222222222222".parse().unwrap(),
            owners: vec![
                "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa".parse().unwrap(),
                "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb".parse().unwrap(),
            ],
            threshold: 2,
            fallback_handler: None,
            setup: None,
        }
    }

    #[test]
    fn valid_configuration() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn rejects_empty_owners() {
        let mut c = config();
        c.owners.clear();
        assert!(matches!(c.validate(), Err(ConfigError::NoOwners)));
    }

    #[test]
    fn rejects_threshold_out_of_range() {
        let mut c = config();
        c.threshold = 3;
        assert!(matches!(
            c.validate(),
            Err(ConfigError::ThresholdOutOfRange { threshold: 3, owners: 2 })
        ));
        c.threshold = 0;
        assert!(matches!(
            c.validate(),
            Err(ConfigError::ThresholdOutOfRange { threshold: 0, .. })
        ));
    }

    #[test]
    fn rejects_empty_init_code() {
        let mut c = config();
        c.proxy_init_code.clear();
        assert!(matches!(c.validate(), Err(ConfigError::EmptyInitCode)));
    }

    #[test]
    fn rejects_zero_contract_addresses() {
        let mut c = config();
        c.singleton = Address::zero();
        assert!(matches!(c.validate(), Err(ConfigError::ZeroAddress("singleton"))));
    }
}
