use async_trait::async_trait;
use js_sys::Promise;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::window;

use super::constants::CACHED_PROVIDER_KEY;

#[derive(Debug, Clone, PartialEq)]
pub enum WalletError {
    NotInstalled,
    ConnectionFailed(String),
    NoAccounts,
    RequestFailed { method: String, message: String },
    JavaScriptError(String),
}

impl std::fmt::Display for WalletError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WalletError::NotInstalled => write!(f, "No browser wallet found"),
            WalletError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            WalletError::NoAccounts => write!(f, "Wallet did not report any account"),
            WalletError::RequestFailed { method, message } => {
                write!(f, "Request {} failed: {}", method, message)
            }
            WalletError::JavaScriptError(msg) => write!(f, "JavaScript error: {}", msg),
        }
    }
}

/// EIP-1193 request transport: `provider.request({ method, params })`.
#[async_trait(?Send)]
pub trait Eip1193 {
    async fn request(&self, method: &str, params: Value) -> Result<Value, WalletError>;
}

/// A connected provider plus the address it reported at connection time.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection<P> {
    pub provider: P,
    pub address: String,
}

/// Browser-side wallet chooser.
#[async_trait(?Send)]
pub trait WalletConnector {
    type Provider: Eip1193 + Clone;

    /// Ask the user to connect a wallet
    async fn connect(&self) -> Result<Connection<Self::Provider>, WalletError>;

    /// Forget any provider remembered from an earlier session
    fn clear_cached_provider(&self);
}

fn js_error_message(err: &JsValue) -> String {
    js_sys::Reflect::get(err, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string())
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{:?}", err))
}

/// Provider object injected by the wallet extension at `window.ethereum`
#[derive(Debug, Clone, PartialEq)]
pub struct EthereumProvider {
    inner: JsValue,
}

impl EthereumProvider {
    /// Look up the injected provider, `None` when no wallet extension is present
    pub fn detect() -> Option<Self> {
        window()
            .and_then(|win| js_sys::Reflect::get(&win, &JsValue::from_str("ethereum")).ok())
            .filter(|provider| !provider.is_null() && !provider.is_undefined())
            .map(|inner| Self { inner })
    }

    /// `provider.selectedAddress`, set by most wallets once connected
    pub fn selected_address(&self) -> Option<String> {
        js_sys::Reflect::get(&self.inner, &JsValue::from_str("selectedAddress"))
            .ok()
            .and_then(|address| address.as_string())
            .filter(|address| !address.is_empty())
    }
}

#[async_trait(?Send)]
impl Eip1193 for EthereumProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, WalletError> {
        log::debug!("-> {} {}", method, params);

        let failed = |message: String| WalletError::RequestFailed {
            method: method.to_string(),
            message,
        };

        let args = serde_json::json!({ "method": method, "params": params });
        let args = js_sys::JSON::parse(&args.to_string())
            .map_err(|e| WalletError::JavaScriptError(js_error_message(&e)))?;

        let request_func = js_sys::Reflect::get(&self.inner, &JsValue::from_str("request"))
            .map_err(|e| WalletError::JavaScriptError(format!("Failed to get request function: {}", js_error_message(&e))))?;

        if !request_func.is_function() {
            return Err(WalletError::JavaScriptError("request is not a function".to_string()));
        }

        let func = js_sys::Function::from(request_func);
        let promise = func.call1(&self.inner, &args)
            .map_err(|e| failed(js_error_message(&e)))?;

        let result = JsFuture::from(Promise::from(promise)).await
            .map_err(|e| failed(js_error_message(&e)))?;

        if result.is_undefined() || result.is_null() {
            log::debug!("<- {} null", method);
            return Ok(Value::Null);
        }

        let text: String = js_sys::JSON::stringify(&result)
            .map_err(|e| WalletError::JavaScriptError(js_error_message(&e)))?
            .into();
        log::debug!("<- {} {}", method, text);

        serde_json::from_str(&text)
            .map_err(|e| WalletError::JavaScriptError(format!("Unreadable response: {}", e)))
    }
}

/// Wallet chooser over the injected EIP-1193 provider
#[derive(Debug, Default)]
pub struct InjectedWallet;

impl InjectedWallet {
    pub fn new() -> Self {
        Self
    }

    /// Check if a wallet extension is installed in the browser
    pub fn is_installed() -> bool {
        EthereumProvider::detect().is_some()
    }
}

#[async_trait(?Send)]
impl WalletConnector for InjectedWallet {
    type Provider = EthereumProvider;

    async fn connect(&self) -> Result<Connection<EthereumProvider>, WalletError> {
        let provider = EthereumProvider::detect().ok_or(WalletError::NotInstalled)?;
        log::info!("Requesting wallet connection");

        let accounts = provider
            .request("eth_requestAccounts", Value::Array(Vec::new()))
            .await
            .map_err(|e| match e {
                WalletError::RequestFailed { message, .. } => WalletError::ConnectionFailed(message),
                other => other,
            })?;

        let address = accounts
            .as_array()
            .and_then(|list| list.first())
            .and_then(|first| first.as_str())
            .map(str::to_string)
            .or_else(|| provider.selected_address())
            .ok_or(WalletError::NoAccounts)?;

        Ok(Connection { provider, address })
    }

    fn clear_cached_provider(&self) {
        let storage = window().and_then(|win| win.local_storage().ok().flatten());
        if let Some(storage) = storage {
            if storage.remove_item(CACHED_PROVIDER_KEY).is_err() {
                log::warn!("Failed to clear cached wallet provider");
            }
        }
    }
}
