//! Per-chain Safe contract presets.
//!
//! Canonical contract sets from the Safe deployments repository:
//! <https://github.com/safe-global/safe-deployments>. The proxy creation
//! code can be read back from the factory, e.g.
//! <https://etherscan.io/address/0x4e1DCf7AD4e460CfD30791CCC4F9c8a4f820ec67#readContract#F2>.

use std::fmt::{self, Display, Formatter};
use std::num::ParseIntError;
use std::str::FromStr;

use crate::matcher::Address;

/// A chain a Safe can be deployed on, identified by chain ID.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Chain(u128);

/// The canonical contract set for a chain, ready to drop into a
/// [`Configuration`](crate::config::Configuration).
#[derive(Clone, Debug)]
pub struct Contracts {
    /// The `SafeProxyFactory` address.
    pub proxy_factory: Address,
    /// The `SafeProxy` creation code.
    pub proxy_init_code: Vec<u8>,
    /// The singleton for the chain (`Safe` on mainnet, `SafeL2` elsewhere).
    pub singleton: Address,
    /// The `CompatibilityFallbackHandler` address.
    pub fallback_handler: Address,
}

impl Chain {
    /// Ethereum Mainnet.
    pub const fn ethereum() -> Self {
        Self(1)
    }

    pub fn id(&self) -> u128 {
        self.0
    }

    /// Returns the canonical contract set for this chain, or `None` if the
    /// chain has no known deployment.
    pub fn contracts(&self) -> Option<Contracts> {
        let (deployment, singleton) = match self.0 {
            1 => (&V1_4_1, Singleton::Safe),
            10 | 56 | 100 | 130 | 137 | 146 | 196 | 480 | 1101 | 5000 | 8453 | 42161 | 42220
            | 43114 | 57073 | 59144 | 80094 | 81457 | 84532 | 534352 | 11155111 | 1313161554 => {
                (&V1_4_1, Singleton::SafeL2)
            }
            10200 => (&V1_3_0, Singleton::SafeL2),
            _ => return None,
        };
        Some(deployment.contracts(singleton))
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::ethereum()
    }
}

impl Display for Chain {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Chain {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = match s {
            "eth" => 1,
            "oeth" => 10,
            "bnb" => 56,
            "gno" => 100,
            "unichain" => 130,
            "matic" => 137,
            "sonic" => 146,
            "xlayer" => 196,
            "wc" => 480,
            "zkevm" => 1101,
            "mnt" => 5000,
            "base" => 8453,
            "chiado" => 10200,
            "arb1" => 42161,
            "celo" => 42220,
            "avax" => 43114,
            "ink" => 57073,
            "linea" => 59144,
            "berachain" => 80094,
            "blast" => 81457,
            "basesep" => 84532,
            "scr" => 534352,
            "sep" => 11155111,
            "aurora" => 1313161554,
            _ => {
                let (digits, radix) = match s.strip_prefix("0x") {
                    Some(digits) => (digits, 16),
                    None => (s, 10),
                };
                u128::from_str_radix(digits, radix)?
            }
        };
        Ok(Self(id))
    }
}

/// Which singleton a chain deploys behind the proxy.
#[derive(Clone, Copy)]
enum Singleton {
    Safe,
    SafeL2,
}

/// A versioned contract deployment, stored as hex for compile-time
/// embedding and decoded on demand.
struct Deployment {
    proxy_factory: &'static str,
    proxy_init_code: &'static str,
    safe: &'static str,
    safe_l2: &'static str,
    fallback_handler: &'static str,
}

impl Deployment {
    fn contracts(&'static self, singleton: Singleton) -> Contracts {
        // Static table entries are known-good hex.
        let address = |s: &str| s.parse().expect("static address");
        Contracts {
            proxy_factory: address(self.proxy_factory),
            proxy_init_code: hex::decode(self.proxy_init_code).expect("static init code"),
            singleton: address(match singleton {
                Singleton::Safe => self.safe,
                Singleton::SafeL2 => self.safe_l2,
            }),
            fallback_handler: address(self.fallback_handler),
        }
    }
}

static V1_4_1: Deployment = Deployment {
    proxy_factory: "4e1DCf7AD4e460CfD30791CCC4F9c8a4f820ec67",
    proxy_init_code: concat!(
        "608060405234801561001057600080fd5b506040516101e63803806101e68339",
        "818101604052602081101561003357600080fd5b810190808051906020019092",
        "9190505050600073ffffffffffffffffffffffffffffffffffffffff168173ff",
        "ffffffffffffffffffffffffffffffffffffff1614156100ca576040517f08c3",
        "79a0000000000000000000000000000000000000000000000000000000008152",
        "6004018080602001828103825260228152602001806101c46022913960400191",
        "505060405180910390fd5b806000806101000a81548173ffffffffffffffffff",
        "ffffffffffffffffffffff021916908373ffffffffffffffffffffffffffffff",
        "ffffffffff1602179055505060ab806101196000396000f3fe608060405273ff",
        "ffffffffffffffffffffffffffffffffffffff600054167fa619486e00000000",
        "0000000000000000000000000000000000000000000000006000351415605057",
        "8060005260206000f35b3660008037600080366000845af43d6000803e600081",
        "14156070573d6000fd5b3d6000f3fea264697066735822122003d1488ee65e08",
        "fa41e58e888a9865554c535f2c77126a82cb4c0f917f31441364736f6c634300",
        "07060033496e76616c69642073696e676c65746f6e2061646472657373207072",
        "6f7669646564",
    ),
    safe: "41675C099F32341bf84BFc5382aF534df5C7461a",
    safe_l2: "29fcB43b46531BcA003ddC8FCB67FFE91900C762",
    fallback_handler: "fd0732Dc9E303f09fCEf3a7388Ad10A83459Ec99",
};

static V1_3_0: Deployment = Deployment {
    proxy_factory: "a6B71E26C5e0845f74c812102Ca7114b6a896AB2",
    proxy_init_code: concat!(
        "608060405234801561001057600080fd5b506040516101e63803806101e68339",
        "818101604052602081101561003357600080fd5b810190808051906020019092",
        "9190505050600073ffffffffffffffffffffffffffffffffffffffff168173ff",
        "ffffffffffffffffffffffffffffffffffffff1614156100ca576040517f08c3",
        "79a0000000000000000000000000000000000000000000000000000000008152",
        "6004018080602001828103825260228152602001806101c46022913960400191",
        "505060405180910390fd5b806000806101000a81548173ffffffffffffffffff",
        "ffffffffffffffffffffff021916908373ffffffffffffffffffffffffffffff",
        "ffffffffff1602179055505060ab806101196000396000f3fe608060405273ff",
        "ffffffffffffffffffffffffffffffffffffff600054167fa619486e00000000",
        "0000000000000000000000000000000000000000000000006000351415605057",
        "8060005260206000f35b3660008037600080366000845af43d6000803e600081",
        "14156070573d6000fd5b3d6000f3fea2646970667358221220d1429297349653",
        "a4918076d650332de1a1068c5f3e07c5c82360c277770b955264736f6c634300",
        "07060033496e76616c69642073696e676c65746f6e2061646472657373207072",
        "6f7669646564",
    ),
    safe: "d9Db270c1B5E3Bd161E8c8503c55cEABeE709552",
    safe_l2: "3E5c63644E683549055b9Be8653de26E0B4CD36E",
    fallback_handler: "f48f2B2d2a534e402487b3ee7C18c33Aec0Fe5e4",
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi;
    use crate::config::Configuration;
    use crate::safe;

    #[test]
    fn parses_aliases_and_ids() {
        assert_eq!("eth".parse::<Chain>().unwrap(), Chain(1));
        assert_eq!("base".parse::<Chain>().unwrap(), Chain(8453));
        assert_eq!("100".parse::<Chain>().unwrap(), Chain(100));
        assert_eq!("0x64".parse::<Chain>().unwrap(), Chain(100));
        assert!("not-a-chain".parse::<Chain>().is_err());
    }

    #[test]
    fn mainnet_uses_safe_not_safe_l2() {
        let contracts = Chain::ethereum().contracts().unwrap();
        assert_eq!(
            contracts.singleton.to_checksum(),
            "0x41675C099F32341bf84BFc5382aF534df5C7461a"
        );
        let l2 = "base".parse::<Chain>().unwrap().contracts().unwrap();
        assert_eq!(
            l2.singleton.to_checksum(),
            "0x29fcB43b46531BcA003ddC8FCB67FFE91900C762"
        );
        assert_eq!(l2.proxy_factory, contracts.proxy_factory);
    }

    #[test]
    fn unknown_chain_has_no_contracts() {
        assert!("424242".parse::<Chain>().unwrap().contracts().is_none());
    }

    #[test]
    fn v1_4_1_init_code_digest() {
        let contracts = V1_4_1.contracts(Singleton::Safe);
        assert_eq!(
            abi::proxy_init_code_hash(&contracts.proxy_init_code, contracts.singleton),
            hex::decode("76733d705f71b79841c0ee960a0ca880f779cde7ef446c989e6d23efc0a4adfb")
                .unwrap()
                .as_slice(),
        );
    }

    #[test]
    fn v1_3_0_init_code_digest() {
        let contracts = V1_3_0.contracts(Singleton::Safe);
        assert_eq!(
            abi::proxy_init_code_hash(&contracts.proxy_init_code, contracts.singleton),
            hex::decode("56e3081a3d1bb38ed4eed1a39f7729c3cc77c7825794c15bbf326f3047fd779c")
                .unwrap()
                .as_slice(),
        );
    }

    /// Reproduces an actual mainnet v1.3.0 Safe deployment:
    /// <https://etherscan.io/tx/0x7b0615b648cb5b9ee366cd22af4e0e40fe90d67c0e140c6efdaabb20b3033a63>
    #[test]
    fn derives_real_mainnet_deployment_address() {
        let contracts = V1_3_0.contracts(Singleton::Safe);
        let config = Configuration {
            proxy_factory: contracts.proxy_factory,
            proxy_init_code: contracts.proxy_init_code,
            singleton: contracts.singleton,
            owners: vec![
                "5c8c76f2e990f194462dc5f8a8c76ba16966ed42".parse().unwrap(),
                "703f28830eeaaad54e786a839f6602ca098016a5".parse().unwrap(),
                "0e706a98f414f49a412107641c0820b0153ff5dc".parse().unwrap(),
                "173286fafabea063eeb3726ee5efd4ff414057b9".parse().unwrap(),
                "2f2806e8b288428f23707a69faa60f52bc565c17".parse().unwrap(),
                "4507cfb4b077d5dbddd520c701e30173d5b59fad".parse().unwrap(),
            ],
            threshold: 3,
            fallback_handler: Some(contracts.fallback_handler),
            setup: None,
        };

        let salt_nonce: [u8; 32] =
            hex::decode("0000000000000000000000000000000000000000000000000000018bbf9209f3")
                .unwrap()
                .try_into()
                .unwrap();
        assert_eq!(
            safe::Deployment::new(&config).address_for(&salt_nonce),
            "5836152812568244760ba356b5f3838aa5b672e0".parse().unwrap(),
        );
    }
}
