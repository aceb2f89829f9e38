//! # Application Configuration
//!
//! Contract addresses, supported networks and connector options. The web app
//! compiles a JSON file into the binary and parses it at startup with
//! [`Config::from_json`]; native builds (tests, tooling) may override the
//! contract addresses and networks with environment variables through
//! [`Config::with_env_overrides`]. All configuration is validated on startup
//! to fail fast if misconfigured.
//!
//! ## Global Config Access
//!
//! ```rust,no_run
//! use lib_core::config::{core_config, init_config, Config};
//!
//! let json = std::fs::read_to_string("staking-web/config/app.json").unwrap();
//! let config = Config::from_json(&json).unwrap();
//! init_config(config).unwrap();
//! let staking = core_config().contracts.staking;
//! ```

use std::collections::BTreeMap;
use std::sync::OnceLock;

use alloy_primitives::Address;
use lib_utils::envs;
use lib_utils::validation::validate_address;
use serde::Deserialize;
use tracing::{debug, info};

use crate::connector::ConnectorKind;
use crate::error::ConfigError;
use crate::staking::Collection;

/// Default block polling interval, matching the usual mainnet block time.
pub const DEFAULT_POLLING_INTERVAL_MS: u32 = 12_000;

/// Networks accepted when the configuration does not list its own.
pub const DEFAULT_SUPPORTED_CHAIN_IDS: &[u64] = &[1, 3, 4, 5, 42];

/// Addresses of the three contracts the dApp talks to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractAddresses {
    /// Cranium ERC-721 collection
    pub cranium: Address,
    /// Stallion ERC-721 collection
    pub stallion: Address,
    /// Staking contract, the operator both collections are approved for
    pub staking: Address,
}

impl ContractAddresses {
    /// Address of the ERC-721 contract behind `collection`.
    pub fn collection(&self, collection: Collection) -> Address {
        match collection {
            Collection::Cranium => self.cranium,
            Collection::Stallion => self.stallion,
        }
    }
}

/// Validated application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub contracts: ContractAddresses,

    /// Chain ids a connection may report without being rejected.
    pub supported_chain_ids: Vec<u64>,

    /// Chain the read-only network connector starts on.
    pub default_chain_id: u64,

    /// JSON-RPC endpoint per chain id, used by the network connector and
    /// handed to hosted-wallet libraries that need one.
    pub rpc_urls: BTreeMap<u64, String>,

    /// Block number polling interval for the chain-state display.
    pub polling_interval_ms: u32,

    /// Connectors offered in the selector, in display order.
    pub enabled_connectors: Vec<ConnectorKind>,

    /// Opaque per-connector options (API keys, bridge URLs, app names),
    /// forwarded verbatim to the connector libraries.
    pub connector_options: BTreeMap<ConnectorKind, serde_json::Value>,
}

#[derive(Deserialize)]
struct RawContracts {
    cranium: String,
    stallion: String,
    staking: String,
}

#[derive(Deserialize)]
struct RawConfig {
    contracts: RawContracts,
    #[serde(default)]
    supported_chain_ids: Option<Vec<u64>>,
    #[serde(default)]
    default_chain_id: Option<u64>,
    #[serde(default)]
    rpc_urls: BTreeMap<u64, String>,
    #[serde(default)]
    polling_interval_ms: Option<u32>,
    #[serde(default)]
    enabled_connectors: Option<Vec<ConnectorKind>>,
    #[serde(default)]
    connector_options: BTreeMap<ConnectorKind, serde_json::Value>,
}

impl Config {
    /// Parse and validate configuration from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(json)?;

        let contracts = ContractAddresses {
            cranium: validate_address(&raw.contracts.cranium, "contracts.cranium")
                .map_err(ConfigError::Invalid)?,
            stallion: validate_address(&raw.contracts.stallion, "contracts.stallion")
                .map_err(ConfigError::Invalid)?,
            staking: validate_address(&raw.contracts.staking, "contracts.staking")
                .map_err(ConfigError::Invalid)?,
        };

        let supported_chain_ids = raw
            .supported_chain_ids
            .unwrap_or_else(|| DEFAULT_SUPPORTED_CHAIN_IDS.to_vec());
        let default_chain_id = raw
            .default_chain_id
            .or_else(|| supported_chain_ids.first().copied())
            .unwrap_or(1);

        let config = Self {
            contracts,
            supported_chain_ids,
            default_chain_id,
            rpc_urls: raw.rpc_urls,
            polling_interval_ms: raw.polling_interval_ms.unwrap_or(DEFAULT_POLLING_INTERVAL_MS),
            enabled_connectors: raw
                .enabled_connectors
                .unwrap_or_else(|| ConnectorKind::ALL.to_vec()),
            connector_options: raw.connector_options,
        };

        config.validate()?;
        Ok(config)
    }

    /// Apply `CRANIUM_ADDRESS`, `STALLION_ADDRESS`, `STAKING_ADDRESS`,
    /// `SUPPORTED_CHAIN_IDS` and `POLLING_INTERVAL_MS` when they are set.
    ///
    /// Missing variables keep the current value; malformed ones are errors.
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Some(addr) = env_address("CRANIUM_ADDRESS")? {
            self.contracts.cranium = addr;
        }
        if let Some(addr) = env_address("STALLION_ADDRESS")? {
            self.contracts.stallion = addr;
        }
        if let Some(addr) = env_address("STAKING_ADDRESS")? {
            self.contracts.staking = addr;
        }

        match envs::get_env_list::<u64>("SUPPORTED_CHAIN_IDS") {
            Ok(ids) => self.supported_chain_ids = ids,
            Err(e) if e.is_missing() => {}
            Err(e) => return Err(ConfigError::Invalid(e.to_string())),
        }

        match envs::get_env_parse::<u32>("POLLING_INTERVAL_MS") {
            Ok(ms) => self.polling_interval_ms = ms,
            Err(e) if e.is_missing() => {}
            Err(e) => return Err(ConfigError::Invalid(e.to_string())),
        }

        self.validate()?;
        Ok(self)
    }

    /// Validate configuration values against the rules the dApp relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.contracts;
        if c.cranium == c.stallion || c.cranium == c.staking || c.stallion == c.staking {
            return Err(ConfigError::Invalid(
                "contract addresses must be distinct".to_string(),
            ));
        }

        if self.supported_chain_ids.is_empty() {
            return Err(ConfigError::Invalid(
                "supported_chain_ids cannot be empty".to_string(),
            ));
        }

        if !self.supported_chain_ids.contains(&self.default_chain_id) {
            return Err(ConfigError::Invalid(format!(
                "default_chain_id {} is not in supported_chain_ids",
                self.default_chain_id
            )));
        }

        if self.polling_interval_ms < 1_000 {
            return Err(ConfigError::Invalid(
                "polling_interval_ms must be at least 1000".to_string(),
            ));
        }

        if self.enabled_connectors.is_empty() {
            return Err(ConfigError::Invalid(
                "enabled_connectors cannot be empty".to_string(),
            ));
        }

        if self.enabled_connectors.contains(&ConnectorKind::Network)
            && !self.rpc_urls.contains_key(&self.default_chain_id)
        {
            return Err(ConfigError::Invalid(format!(
                "the network connector needs an rpc_url for chain {}",
                self.default_chain_id
            )));
        }

        Ok(())
    }

    pub fn is_supported_chain(&self, chain_id: u64) -> bool {
        self.supported_chain_ids.contains(&chain_id)
    }

    pub fn rpc_url(&self, chain_id: u64) -> Option<&str> {
        self.rpc_urls.get(&chain_id).map(String::as_str)
    }

    /// Options for one connector, `null` when none are configured.
    pub fn connector_options(&self, kind: ConnectorKind) -> serde_json::Value {
        self.connector_options
            .get(&kind)
            .cloned()
            .unwrap_or(serde_json::Value::Null)
    }
}

fn env_address(name: &'static str) -> Result<Option<Address>, ConfigError> {
    match envs::get_env(name) {
        Ok(value) => validate_address(&value, name)
            .map(Some)
            .map_err(ConfigError::Invalid),
        Err(e) if e.is_missing() => Ok(None),
        Err(e) => Err(ConfigError::Invalid(e.to_string())),
    }
}

/// Global configuration instance (initialized once at startup).
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Install the global configuration.
///
/// # Errors
///
/// Returns [`ConfigError::AlreadyInitialized`] on a second call.
pub fn init_config(config: Config) -> Result<(), ConfigError> {
    info!(
        chains = ?config.supported_chain_ids,
        connectors = config.enabled_connectors.len(),
        "configuration loaded"
    );
    debug!(staking = %config.contracts.staking, "staking contract");
    CONFIG.set(config).map_err(|_| ConfigError::AlreadyInitialized)
}

/// Get a reference to the global configuration.
///
/// # Panics
///
/// Panics if [`init_config()`] has not been called yet.
pub fn core_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Config must be initialized with init_config() before use")
}
