//! The in-process request/response contract.
//!
//! String-typed, camelCase mirrors of the core types. This is the stable
//! boundary between an orchestration layer and the engine: field names and
//! shapes must not change.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, Configuration, SafeToL2Setup};
use crate::matcher::{Address, Prefix};
use crate::safe;
use crate::worker::{SearchError, SearchWorker};

/// A search request: the Safe configuration plus the wanted address prefix.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub configuration: SafeConfiguration,
    pub prefix: String,
}

/// Hex-encoded Safe configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafeConfiguration {
    pub proxy_factory: String,
    pub proxy_init_code: String,
    pub singleton: String,
    pub owners: Vec<String>,
    pub threshold: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_handler: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safe_to_l2_setup: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l2_singleton: Option<String>,
}

/// The single terminal response of a search run: a creation or an error,
/// never both.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub creation: Option<Creation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Creation {
    pub creation_address: String,
    pub salt_nonce: String,
    pub transaction: Transaction,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub to: String,
    pub calldata: String,
}

impl SafeConfiguration {
    /// Decodes into the core configuration, checking every hex field.
    pub fn decode(&self) -> Result<Configuration, ConfigError> {
        let setup = match (&self.safe_to_l2_setup, &self.l2_singleton) {
            (Some(address), Some(singleton_l2)) => Some(SafeToL2Setup {
                address: parse_address(address, "safeToL2Setup")?,
                singleton_l2: parse_address(singleton_l2, "l2Singleton")?,
            }),
            (None, None) => None,
            // A half-specified pair would silently search for a different
            // deployment than the caller meant.
            _ => return Err(ConfigError::IncompleteL2Setup),
        };

        Ok(Configuration {
            proxy_factory: parse_address(&self.proxy_factory, "proxyFactory")?,
            proxy_init_code: hex_decode(&self.proxy_init_code, "proxyInitCode")?,
            singleton: parse_address(&self.singleton, "singleton")?,
            owners: self
                .owners
                .iter()
                .map(|owner| parse_address(owner, "owners"))
                .collect::<Result<_, _>>()?,
            threshold: self.threshold,
            fallback_handler: self
                .fallback_handler
                .as_deref()
                .map(|h| parse_address(h, "fallbackHandler"))
                .transpose()?,
            setup,
        })
    }
}

impl From<&safe::Creation> for Creation {
    fn from(creation: &safe::Creation) -> Self {
        Self {
            creation_address: creation.creation_address.to_checksum(),
            salt_nonce: creation.salt_nonce_hex(),
            transaction: Transaction {
                to: creation.transaction.to.to_checksum(),
                calldata: format!("0x{}", hex::encode(&creation.transaction.calldata)),
            },
        }
    }
}

/// Runs a full search for a request and returns its terminal response.
/// Blocks until a match or an error; cancellation is not reachable through
/// this entry point.
pub fn search(request: &SearchRequest) -> SearchResponse {
    match run(request) {
        Ok(creation) => SearchResponse {
            creation: Some(creation),
            error: None,
        },
        Err(err) => SearchResponse {
            creation: None,
            error: Some(err.to_string()),
        },
    }
}

fn run(request: &SearchRequest) -> Result<Creation, SearchError> {
    let config = request.configuration.decode()?;
    let prefix = Prefix::parse(&request.prefix).map_err(ConfigError::from)?;
    let worker = SearchWorker::start(&config, prefix)?;
    let creation = worker.wait()?;
    Ok(Creation::from(&creation))
}

fn parse_address(s: &str, field: &'static str) -> Result<Address, ConfigError> {
    s.parse()
        .map_err(|source| ConfigError::InvalidHex { field, source })
}

fn hex_decode(s: &str, field: &'static str) -> Result<Vec<u8>, ConfigError> {
    hex::decode(s.strip_prefix("0x").unwrap_or(s))
        .map_err(|source| ConfigError::InvalidHex { field, source })
}
