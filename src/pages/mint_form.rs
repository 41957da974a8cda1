use dioxus::prelude::*;

use crate::app::Session;
use crate::core::controller;
use crate::core::{contract_config, Action, MintStatus};

/// Status line text and css class for the current mint status
fn status_message(status: &MintStatus) -> Option<(String, &'static str)> {
    match status {
        MintStatus::Idle => None,
        MintStatus::Connecting => Some(("Connecting to wallet...".to_string(), "progress")),
        MintStatus::Minting => Some(("Minting, waiting for confirmation...".to_string(), "progress")),
        MintStatus::Minted => Some(("✅ Minted".to_string(), "success")),
        MintStatus::Failed(e) => Some((format!("❌ {}", e), "error")),
    }
}

#[component]
pub fn MintForm(session: Signal<Session>) -> Element {
    let mut session = session;

    let handle_mint = move |_: MouseEvent| {
        let Some(request) = session.with_mut(|s| s.begin_mint()) else {
            return;
        };

        spawn(async move {
            let action = controller::submit_mint(request, contract_config()).await;
            session.with_mut(|s| s.apply(action));
        });
    };

    let (enabled, can_mint, account, selected, token_id, image_url, status) = {
        let state = session.read();
        (
            state.is_form_enabled(),
            state.can_mint(),
            state.selectable_account().map(str::to_string),
            state.selected_account().to_string(),
            state.token_id().to_string(),
            state.image_url().to_string(),
            state.status().clone(),
        )
    };
    let minting = status == MintStatus::Minting;

    rsx! {
        div { class: "mint-form",
            div { class: "form-row",
                div { class: "form-group account-group",
                    label { r#for: "account-address", "Account" }
                    select {
                        id: "account-address",
                        required: true,
                        disabled: !enabled,
                        value: "{selected}",
                        onchange: move |evt: FormEvent| {
                            session.with_mut(|s| s.apply(Action::SelectAccount(evt.value())));
                        },
                        option { value: "", disabled: true, selected: selected.is_empty(), "Select account" }
                        for address in account {
                            option { key: "{address}", value: "{address}", "{address}" }
                        }
                    }
                }

                div { class: "form-group token-group",
                    label { r#for: "token-id", "Token ID" }
                    input {
                        id: "token-id",
                        r#type: "text",
                        required: true,
                        disabled: !enabled,
                        value: "{token_id}",
                        oninput: move |evt: FormEvent| {
                            session.with_mut(|s| s.apply(Action::EditTokenId(evt.value())));
                        },
                    }
                }

                div { class: "button-group",
                    button {
                        r#type: "button",
                        class: "start-minting-btn",
                        disabled: !can_mint,
                        onclick: handle_mint,
                        if minting { "Minting..." } else { "Mint" }
                    }
                }
            }

            for (message, kind) in status_message(&status) {
                div { class: "status-message {kind}", "{message}" }
            }

            if !image_url.is_empty() {
                div { class: "image-box",
                    img { alt: "", src: "{image_url}", width: "100%" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SessionError;

    #[test]
    fn test_status_messages() {
        assert_eq!(status_message(&MintStatus::Idle), None);
        assert_eq!(status_message(&MintStatus::Minting).map(|(_, kind)| kind), Some("progress"));

        let failed = MintStatus::Failed(SessionError::LookupFailed("call result: null".to_string()));
        let (message, kind) = status_message(&failed).unwrap();
        assert_eq!(kind, "error");
        assert!(message.contains("Token URI lookup failed"));
    }
}
