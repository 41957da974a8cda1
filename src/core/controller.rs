//! Async flows behind the form's buttons.
//!
//! Each flow talks to the outside world once and folds the outcome into an
//! [`Action`] for the session reducer. Nothing here touches UI state directly.

use super::abi;
use super::config::ContractConfig;
use super::contract::{ArtToken, ContractError, TokenContract};
use super::session::{Action, MintRequest, SessionError};
use super::wallet::{Eip1193, WalletConnector};

/// Ask the wallet for a connection.
pub async fn connect<W: WalletConnector>(wallet: &W) -> Action<W::Provider> {
    match wallet.connect().await {
        Ok(connection) => Action::Connected(connection),
        Err(e) => Action::ConnectFailed(SessionError::ConnectionFailed(e.to_string())),
    }
}

/// Mint the token, wait for it to be mined, then read back its URI.
///
/// The lookup only runs after the mint transaction is confirmed.
pub async fn mint_and_lookup<C: TokenContract + ?Sized>(
    contract: &C,
    recipient: &str,
    token_id: &str,
    metadata_uri: &str,
) -> Result<String, SessionError> {
    let token_id = abi::parse_token_id(token_id)
        .map_err(|e| SessionError::MintFailed(format!("token id {:?}: {}", token_id, e)))?;

    log::info!("Minting token {} to {}", token_id, recipient);
    let tx_hash = contract
        .mint(recipient, token_id, metadata_uri)
        .await
        .map_err(|e| SessionError::MintFailed(e.to_string()))?;

    let receipt = contract
        .wait_for_confirmation(&tx_hash)
        .await
        .map_err(|e| SessionError::MintFailed(e.to_string()))?;
    log::info!(
        "Mint {} confirmed in block {}",
        receipt.transaction_hash,
        receipt.block_number.as_deref().unwrap_or("?")
    );

    contract
        .token_uri(token_id)
        .await
        .map_err(|e| SessionError::LookupFailed(e.to_string()))
}

/// Run a captured mint request against the configured token contract.
pub async fn submit_mint<P: Eip1193>(request: MintRequest<P>, config: &ContractConfig) -> Action<P> {
    let epoch = request.epoch;

    let outcome = match config.contract_address() {
        Ok(address) => {
            let contract = ArtToken::new(request.provider, address, &request.signer)
                .with_poll_interval(config.receipt_poll_interval);
            mint_and_lookup(&contract, &request.recipient, &request.token_id, &config.metadata_uri).await
        }
        Err(e) => Err(SessionError::MintFailed(
            ContractError::NotConfigured(format!("TOKEN_ADDRESS: {}", e)).to_string(),
        )),
    };

    match outcome {
        Ok(image_url) => Action::MintSucceeded { epoch, image_url },
        Err(error) => Action::MintFailed { epoch, error },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::contract::TransactionReceipt;
    use alloy_primitives::U256;
    use crate::core::session::{MintStatus, SessionState};
    use crate::core::wallet::{Connection, WalletError};
    use async_trait::async_trait;
    use serde_json::Value;
    use std::cell::RefCell;

    const METADATA: &str = "https://ipfs.infura.io/ipfs/QmWc6YHE815F8kExchG9kd2uSsv7ZF1iQNn23bt5iKC6K3/image";

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Mint { recipient: String, token_id: U256, metadata_uri: String },
        Wait(String),
        TokenUri(U256),
    }

    struct FakeContract {
        calls: RefCell<Vec<Call>>,
        mint_result: Result<String, ContractError>,
        wait_result: Result<(), ContractError>,
        uri_result: Result<String, ContractError>,
    }

    impl FakeContract {
        fn succeeding(image_url: &str) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                mint_result: Ok("0xfeed".to_string()),
                wait_result: Ok(()),
                uri_result: Ok(image_url.to_string()),
            }
        }
    }

    #[async_trait(?Send)]
    impl TokenContract for FakeContract {
        async fn mint(&self, recipient: &str, token_id: U256, metadata_uri: &str) -> Result<String, ContractError> {
            self.calls.borrow_mut().push(Call::Mint {
                recipient: recipient.to_string(),
                token_id,
                metadata_uri: metadata_uri.to_string(),
            });
            self.mint_result.clone()
        }

        async fn wait_for_confirmation(&self, tx_hash: &str) -> Result<TransactionReceipt, ContractError> {
            self.calls.borrow_mut().push(Call::Wait(tx_hash.to_string()));
            self.wait_result.clone().map(|_| TransactionReceipt {
                transaction_hash: tx_hash.to_string(),
                block_number: Some("0x1".to_string()),
            })
        }

        async fn token_uri(&self, token_id: U256) -> Result<String, ContractError> {
            self.calls.borrow_mut().push(Call::TokenUri(token_id));
            self.uri_result.clone()
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct FakeProvider;

    #[async_trait(?Send)]
    impl Eip1193 for FakeProvider {
        async fn request(&self, method: &str, _params: Value) -> Result<Value, WalletError> {
            panic!("unexpected request {}", method)
        }
    }

    struct FakeWallet {
        result: Result<Connection<FakeProvider>, WalletError>,
        cleared: RefCell<bool>,
    }

    #[async_trait(?Send)]
    impl WalletConnector for FakeWallet {
        type Provider = FakeProvider;

        async fn connect(&self) -> Result<Connection<FakeProvider>, WalletError> {
            self.result.clone()
        }

        fn clear_cached_provider(&self) {
            *self.cleared.borrow_mut() = true;
        }
    }

    #[tokio::test]
    async fn test_mint_then_lookup_in_order() {
        let contract = FakeContract::succeeding("ipfs://image/42");

        let url = mint_and_lookup(&contract, "0xABC", "42", METADATA).await.unwrap();
        assert_eq!(url, "ipfs://image/42");
        assert_eq!(
            *contract.calls.borrow(),
            vec![
                Call::Mint {
                    recipient: "0xABC".to_string(),
                    token_id: U256::from(42),
                    metadata_uri: METADATA.to_string(),
                },
                Call::Wait("0xfeed".to_string()),
                Call::TokenUri(U256::from(42)),
            ]
        );
    }

    #[tokio::test]
    async fn test_rejected_mint_skips_lookup() {
        let mut contract = FakeContract::succeeding("ipfs://image/42");
        contract.mint_result = Err(ContractError::Rpc(WalletError::RequestFailed {
            method: "eth_sendTransaction".to_string(),
            message: "User denied transaction signature".to_string(),
        }));

        let result = mint_and_lookup(&contract, "0xABC", "42", METADATA).await;
        assert!(matches!(result, Err(SessionError::MintFailed(_))));
        assert_eq!(contract.calls.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_reverted_mint_skips_lookup() {
        let mut contract = FakeContract::succeeding("ipfs://image/42");
        contract.wait_result = Err(ContractError::Reverted("0xfeed".to_string()));

        let result = mint_and_lookup(&contract, "0xABC", "42", METADATA).await;
        assert!(matches!(result, Err(SessionError::MintFailed(_))));
        assert!(!contract.calls.borrow().iter().any(|c| matches!(c, Call::TokenUri(_))));
    }

    #[tokio::test]
    async fn test_lookup_failure_is_distinct() {
        let mut contract = FakeContract::succeeding("unused");
        contract.uri_result = Err(ContractError::InvalidResponse("call result: null".to_string()));

        let result = mint_and_lookup(&contract, "0xABC", "42", METADATA).await;
        assert!(matches!(result, Err(SessionError::LookupFailed(_))));
    }

    #[tokio::test]
    async fn test_unparsable_token_id_never_reaches_contract() {
        let contract = FakeContract::succeeding("unused");

        let result = mint_and_lookup(&contract, "0xABC", "forty-two", METADATA).await;
        assert!(matches!(result, Err(SessionError::MintFailed(_))));
        assert!(contract.calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_hex_and_blank_token_ids() {
        let contract = FakeContract::succeeding("ipfs://image/42");
        mint_and_lookup(&contract, "0xABC", " 0x2a ", METADATA).await.unwrap();
        assert_eq!(contract.calls.borrow().last(), Some(&Call::TokenUri(U256::from(42))));

        let contract = FakeContract::succeeding("unused");
        let result = mint_and_lookup(&contract, "0xABC", "  ", METADATA).await;
        assert!(matches!(result, Err(SessionError::MintFailed(_))));
        assert!(contract.calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_connect_actions() {
        let wallet = FakeWallet {
            result: Ok(Connection { provider: FakeProvider, address: "0xf39f".to_string() }),
            cleared: RefCell::new(false),
        };
        let action = connect(&wallet).await;
        assert_eq!(
            action,
            Action::Connected(Connection { provider: FakeProvider, address: "0xf39f".to_string() })
        );

        let wallet = FakeWallet {
            result: Err(WalletError::NotInstalled),
            cleared: RefCell::new(false),
        };
        let state = SessionState::new().update(connect(&wallet).await);
        assert!(!state.is_connected());
        assert!(matches!(state.status(), MintStatus::Failed(SessionError::ConnectionFailed(_))));

        wallet.clear_cached_provider();
        assert!(*wallet.cleared.borrow());
    }

    #[tokio::test]
    async fn test_submit_without_contract_address() {
        let config = ContractConfig::from_values(None, None);
        let request = MintRequest {
            provider: FakeProvider,
            signer: "0xf39f".to_string(),
            recipient: "0xABC".to_string(),
            token_id: "42".to_string(),
            epoch: 3,
        };

        match submit_mint(request, &config).await {
            Action::MintFailed { epoch, error: SessionError::MintFailed(msg) } => {
                assert_eq!(epoch, 3);
                assert!(msg.contains("TOKEN_ADDRESS"));
            }
            other => panic!("unexpected action {:?}", other),
        }
    }
}
