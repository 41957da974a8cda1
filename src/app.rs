use dioxus::prelude::*;

use crate::core::controller;
use crate::core::wallet::{EthereumProvider, InjectedWallet, WalletConnector};
use crate::core::{Action, MintStatus, SessionState};
use crate::pages::MintForm;

/// Session state bound to the injected browser wallet
pub type Session = SessionState<EthereumProvider>;

// main app component
#[component]
pub fn App() -> Element {
    let mut session = use_signal(Session::new);

    let handle_wallet = move |_: MouseEvent| {
        let wallet = InjectedWallet::new();

        let connected = session.read().is_connected();
        if connected {
            wallet.clear_cached_provider();
            session.with_mut(|s| s.apply(Action::Disconnect));
            return;
        }

        session.with_mut(|s| s.apply(Action::ConnectStarted));
        spawn(async move {
            let action = controller::connect(&wallet).await;
            session.with_mut(|s| s.apply(action));
        });
    };

    let (connected, connecting, address) = {
        let state = session.read();
        (
            state.is_connected(),
            *state.status() == MintStatus::Connecting,
            state.signed_in_address().to_string(),
        )
    };
    let wallet_installed = InjectedWallet::is_installed();

    rsx! {
        main { class: "container",
            header { class: "app-bar",
                h1 { class: "app-title", "NFT Image Frontend" }
                if connected {
                    span { class: "wallet-address", "{address}" }
                }
                button {
                    class: "wallet-btn",
                    disabled: connecting,
                    onclick: handle_wallet,
                    if connected {
                        "Disconnect Wallet"
                    } else if connecting {
                        "Connecting..."
                    } else {
                        "Connect Wallet"
                    }
                }
            }

            if !wallet_installed && !connected {
                div { class: "wallet-not-installed",
                    "No browser wallet detected. Install a wallet extension to mint."
                }
            }

            MintForm { session }
        }
    }
}
