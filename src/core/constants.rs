//! Shared constants for the wallet and token contract modules.

// ============================================================================
// Metadata
// ============================================================================

/// Metadata URI sent with every mint, regardless of token id
pub const DEFAULT_METADATA_URI: &str =
    "https://ipfs.infura.io/ipfs/QmWc6YHE815F8kExchG9kd2uSsv7ZF1iQNn23bt5iKC6K3/image";

// ============================================================================
// Wallet
// ============================================================================

/// localStorage key a wallet chooser uses to remember the last provider
pub const CACHED_PROVIDER_KEY: &str = "WEB3_CONNECT_CACHED_PROVIDER";

// ============================================================================
// Transaction confirmation
// ============================================================================

/// Delay between `eth_getTransactionReceipt` polls (ethers default)
pub const RECEIPT_POLL_INTERVAL_MS: u64 = 4_000;
