use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::fmt;
use std::time::Duration;

use super::abi::{self, AbiError};
use super::constants::RECEIPT_POLL_INTERVAL_MS;
use super::timer;
use super::wallet::{Eip1193, WalletError};

#[derive(Debug, Clone, PartialEq)]
pub enum ContractError {
    NotConfigured(String),
    InvalidArgument(String),
    Rpc(WalletError),
    Reverted(String),
    InvalidResponse(String),
}

impl fmt::Display for ContractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractError::NotConfigured(msg) => write!(f, "Token contract not configured: {}", msg),
            ContractError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            ContractError::Rpc(e) => write!(f, "{}", e),
            ContractError::Reverted(hash) => write!(f, "Transaction {} reverted", hash),
            ContractError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl From<WalletError> for ContractError {
    fn from(e: WalletError) -> Self {
        ContractError::Rpc(e)
    }
}

impl From<AbiError> for ContractError {
    fn from(e: AbiError) -> Self {
        ContractError::InvalidResponse(e.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionReceipt {
    pub transaction_hash: String,
    pub block_number: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcReceipt {
    #[serde(default)]
    block_number: Option<String>,
    // absent on pre-byzantium receipts
    #[serde(default)]
    status: Option<String>,
}

/// The token contract's two entry points, plus confirmation of the mint transaction.
#[async_trait(?Send)]
pub trait TokenContract {
    /// Send `mint(recipient, token_id, metadata_uri)`, returning the transaction hash
    async fn mint(&self, recipient: &str, token_id: U256, metadata_uri: &str) -> Result<String, ContractError>;

    /// Wait until the transaction is mined; a reverted transaction is an error
    async fn wait_for_confirmation(&self, tx_hash: &str) -> Result<TransactionReceipt, ContractError>;

    /// Read-only `tokenURI(token_id)`
    async fn token_uri(&self, token_id: U256) -> Result<String, ContractError>;
}

/// Client for the deployed art token, signing through the connected wallet.
pub struct ArtToken<P> {
    provider: P,
    address: Address,
    signer: String,
    poll_interval: Duration,
}

impl<P: Eip1193> ArtToken<P> {
    pub fn new(provider: P, address: Address, signer: &str) -> Self {
        Self {
            provider,
            address,
            signer: signer.to_string(),
            poll_interval: Duration::from_millis(RECEIPT_POLL_INTERVAL_MS),
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

#[async_trait(?Send)]
impl<P: Eip1193> TokenContract for ArtToken<P> {
    async fn mint(&self, recipient: &str, token_id: U256, metadata_uri: &str) -> Result<String, ContractError> {
        let recipient: Address = recipient
            .parse()
            .map_err(|e| ContractError::InvalidArgument(format!("recipient {:?}: {}", recipient, e)))?;

        let data = abi::encode_mint(recipient, token_id, metadata_uri);
        let tx = json!({
            "from": self.signer,
            "to": self.address.to_string(),
            "data": abi::to_hex_data(&data),
        });

        let result = self.provider.request("eth_sendTransaction", json!([tx])).await?;
        let tx_hash = result
            .as_str()
            .ok_or_else(|| ContractError::InvalidResponse(format!("transaction hash: {}", result)))?;

        log::info!("Mint transaction sent: {}", tx_hash);
        Ok(tx_hash.to_string())
    }

    async fn wait_for_confirmation(&self, tx_hash: &str) -> Result<TransactionReceipt, ContractError> {
        loop {
            let result = self
                .provider
                .request("eth_getTransactionReceipt", json!([tx_hash]))
                .await?;

            if result.is_null() {
                log::debug!("Transaction {} pending", tx_hash);
                timer::sleep(self.poll_interval).await;
                continue;
            }

            let receipt: RpcReceipt = serde_json::from_value(result)
                .map_err(|e| ContractError::InvalidResponse(format!("receipt: {}", e)))?;

            return match receipt.status.as_deref() {
                Some("0x0") => Err(ContractError::Reverted(tx_hash.to_string())),
                _ => Ok(TransactionReceipt {
                    transaction_hash: tx_hash.to_string(),
                    block_number: receipt.block_number,
                }),
            };
        }
    }

    async fn token_uri(&self, token_id: U256) -> Result<String, ContractError> {
        let call = json!({
            "to": self.address.to_string(),
            "data": abi::to_hex_data(&abi::encode_token_uri(token_id)),
        });

        let result = self.provider.request("eth_call", json!([call, "latest"])).await?;
        let data = result
            .as_str()
            .ok_or_else(|| ContractError::InvalidResponse(format!("call result: {}", result)))?;

        Ok(abi::decode_token_uri(data)?)
    }
}
