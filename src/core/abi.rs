//! Solidity interface of the art token and the calldata helpers built on it.

use alloy_primitives::{hex, Address, U256};
use alloy_sol_types::{sol, SolCall};
use std::fmt;

sol! {
    function mint(address to, uint256 tokenId, string uri);
    function tokenURI(uint256 tokenId) returns (string);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiError {
    InvalidHex(String),
    Decode(String),
}

impl fmt::Display for AbiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbiError::InvalidHex(msg) => write!(f, "Invalid hex data: {}", msg),
            AbiError::Decode(msg) => write!(f, "Undecodable return data: {}", msg),
        }
    }
}

/// Parse a token id the way an ethers `BigNumber` would: decimal or `0x` hex, up to uint256.
pub fn parse_token_id(text: &str) -> Result<U256, String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err("value is empty".to_string());
    }
    trimmed.parse::<U256>().map_err(|e| e.to_string())
}

pub fn encode_mint(to: Address, token_id: U256, uri: &str) -> Vec<u8> {
    mintCall { to, tokenId: token_id, uri: uri.to_string() }.abi_encode()
}

pub fn encode_token_uri(token_id: U256) -> Vec<u8> {
    tokenURICall { tokenId: token_id }.abi_encode()
}

/// Decode the hex string an `eth_call` to `tokenURI` returned.
pub fn decode_token_uri(data: &str) -> Result<String, AbiError> {
    let bytes = hex::decode(data).map_err(|e| AbiError::InvalidHex(e.to_string()))?;
    tokenURICall::abi_decode_returns(&bytes, true)
        .map(|ret| ret._0)
        .map_err(|e| AbiError::Decode(e.to_string()))
}

/// `0x`-prefixed hex, the form JSON-RPC expects for `data`
pub fn to_hex_data(data: &[u8]) -> String {
    hex::encode_prefixed(data)
}
