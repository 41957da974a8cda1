use alloy_primitives::Address;
use once_cell::sync::Lazy;
use std::time::Duration;

use super::constants::{DEFAULT_METADATA_URI, RECEIPT_POLL_INTERVAL_MS};

/// Contract configuration baked in at build time.
///
/// `TOKEN_ADDRESS` is required for minting, `TOKEN_METADATA_URI` is an
/// optional override.
#[derive(Debug, Clone)]
pub struct ContractConfig {
    /// Raw contract address text, `None` when the build did not set it
    pub contract_address: Option<String>,
    pub metadata_uri: String,
    pub receipt_poll_interval: Duration,
}

impl ContractConfig {
    fn from_build_env() -> Self {
        Self::from_values(option_env!("TOKEN_ADDRESS"), option_env!("TOKEN_METADATA_URI"))
    }

    pub fn from_values(contract_address: Option<&str>, metadata_uri: Option<&str>) -> Self {
        let non_empty = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        Self {
            contract_address: non_empty(contract_address),
            metadata_uri: non_empty(metadata_uri).unwrap_or_else(|| DEFAULT_METADATA_URI.to_string()),
            receipt_poll_interval: Duration::from_millis(RECEIPT_POLL_INTERVAL_MS),
        }
    }

    /// Parsed contract address
    pub fn contract_address(&self) -> Result<Address, String> {
        let raw = self.contract_address.as_deref().ok_or("not set")?;
        raw.parse().map_err(|e| format!("{:?}: {}", raw, e))
    }
}

static CONTRACT_CONFIG: Lazy<ContractConfig> = Lazy::new(|| {
    let config = ContractConfig::from_build_env();
    log::info!(
        "Contract config: address={}, metadata={}",
        config.contract_address.as_deref().unwrap_or("<unset>"),
        config.metadata_uri
    );
    config
});

/// Global contract configuration
pub fn contract_config() -> &'static ContractConfig {
    &CONTRACT_CONFIG
}
