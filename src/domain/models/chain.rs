use alloy::primitives::Address;

use crate::config::{AppConfig, ChainSettings};
use crate::domain::errors::ScannerError;

/// Contract addresses watched on a chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractAddresses {
    /// Registrar emitting registrations, renewals and ownership transfers
    pub registrar: Address,
    /// Resolver emitting text record changes
    pub resolver: Address,
    /// IP asset registry emitting asset registrations
    pub ip_asset_registry: Address,
}

/// Immutable reference data for one chain. One scanner instance owns one
/// `Chain` for its lifetime.
#[derive(Debug, Clone)]
pub struct Chain {
    /// Short identifier used in logs and task keys
    pub name: String,
    /// Numeric EVM chain id
    pub chain_id: u64,
    /// RPC endpoint URL
    pub rpc_url: String,
    /// Block explorer base URL
    pub explorer_url: String,
    /// Watched contract addresses
    pub contracts: ContractAddresses,
    /// Top-level domain appended to registered labels
    pub tld: String,
    /// First block the scanner considers
    pub genesis_block: u64,
}

impl Chain {
    /// Build a chain from its settings block, parsing contract addresses
    pub fn from_settings(settings: &ChainSettings) -> Result<Self, ScannerError> {
        Ok(Self {
            name: settings.name.clone(),
            chain_id: settings.chain_id,
            rpc_url: settings.rpc_url.clone(),
            explorer_url: settings.explorer_url.clone(),
            contracts: ContractAddresses {
                registrar: parse_address(&settings.registrar_address, "registrar")?,
                resolver: parse_address(&settings.resolver_address, "resolver")?,
                ip_asset_registry: parse_address(
                    &settings.ip_asset_registry_address,
                    "ip asset registry",
                )?,
            },
            tld: settings.tld.clone(),
            genesis_block: settings.genesis_block,
        })
    }

    /// Full name for a registered label, e.g. `alice` -> `alice.ip`
    pub fn full_name(&self, label: &str) -> String {
        format!("{}.{}", label, self.tld)
    }
}

/// Read-only collection of configured chains
#[derive(Debug, Clone)]
pub struct ChainRegistry {
    chains: Vec<Chain>,
}

impl ChainRegistry {
    /// Build the registry from every enabled chain in the configuration
    pub fn from_config(config: &AppConfig) -> Result<Self, ScannerError> {
        let chains = config
            .enabled_chains()
            .into_iter()
            .map(Chain::from_settings)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { chains })
    }

    /// All configured chains
    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    /// Look up a chain by network name
    pub fn get(&self, name: &str) -> Option<&Chain> {
        self.chains.iter().find(|c| c.name == name)
    }
}

fn parse_address(value: &str, what: &str) -> Result<Address, ScannerError> {
    value.parse::<Address>().map_err(|e| {
        ScannerError::ConfigError(format!("invalid {} address '{}': {}", what, value, e))
    })
}
