use std::fmt;

use super::wallet::Connection;

/// User-visible failure of one of the asynchronous boundaries.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    ConnectionFailed(String),
    MintFailed(String),
    LookupFailed(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::ConnectionFailed(msg) => write!(f, "Wallet connection failed: {}", msg),
            SessionError::MintFailed(msg) => write!(f, "Mint failed: {}", msg),
            SessionError::LookupFailed(msg) => write!(f, "Token URI lookup failed: {}", msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum MintStatus {
    #[default]
    Idle,
    Connecting,
    Minting,
    Minted,
    Failed(SessionError),
}

impl MintStatus {
    pub fn is_busy(&self) -> bool {
        matches!(self, MintStatus::Connecting | MintStatus::Minting)
    }
}

/// Everything a submit needs, captured when the mint starts.
#[derive(Debug, Clone, PartialEq)]
pub struct MintRequest<P> {
    pub provider: P,
    pub signer: String,
    pub recipient: String,
    pub token_id: String,
    pub epoch: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action<P> {
    ConnectStarted,
    Connected(Connection<P>),
    ConnectFailed(SessionError),
    Disconnect,
    SelectAccount(String),
    EditTokenId(String),
    MintSucceeded { epoch: u64, image_url: String },
    MintFailed { epoch: u64, error: SessionError },
}

/// Form state of the mint page.
///
/// `P` is the connected provider handle. Every change goes through
/// [`SessionState::update`]; async results carry the `epoch` they were
/// started under and are dropped once a connect or disconnect moved past it.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState<P> {
    connection: Option<P>,
    signed_in_address: String,
    selected_account: String,
    token_id: String,
    image_url: String,
    status: MintStatus,
    epoch: u64,
}

impl<P> Default for SessionState<P> {
    fn default() -> Self {
        Self {
            connection: None,
            signed_in_address: String::new(),
            selected_account: String::new(),
            token_id: String::new(),
            image_url: String::new(),
            status: MintStatus::Idle,
            epoch: 0,
        }
    }
}

impl<P: Clone> SessionState<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Account selector, token id field and mint button share this gate
    pub fn is_form_enabled(&self) -> bool {
        self.is_connected()
    }

    pub fn can_mint(&self) -> bool {
        self.is_form_enabled() && !self.status.is_busy()
    }

    pub fn connection(&self) -> Option<&P> {
        self.connection.as_ref()
    }

    pub fn signed_in_address(&self) -> &str {
        &self.signed_in_address
    }

    /// The single account offered by the selector
    pub fn selectable_account(&self) -> Option<&str> {
        Some(self.signed_in_address.as_str()).filter(|address| !address.is_empty())
    }

    pub fn selected_account(&self) -> &str {
        &self.selected_account
    }

    pub fn token_id(&self) -> &str {
        &self.token_id
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn status(&self) -> &MintStatus {
        &self.status
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Apply one action and return the resulting state.
    pub fn update(mut self, action: Action<P>) -> Self {
        match action {
            Action::ConnectStarted => {
                if !self.is_connected() {
                    self.status = MintStatus::Connecting;
                }
            }
            Action::Connected(connection) => {
                log::info!("Wallet connected: {}", connection.address);
                self.epoch += 1;
                self.connection = Some(connection.provider);
                self.signed_in_address = connection.address;
                self.status = MintStatus::Idle;
            }
            Action::ConnectFailed(error) => {
                log::error!("{}", error);
                self.status = MintStatus::Failed(error);
            }
            Action::Disconnect => {
                log::info!("Wallet disconnected");
                self.epoch += 1;
                self.connection = None;
                self.signed_in_address.clear();
                self.selected_account.clear();
                self.image_url.clear();
                self.status = MintStatus::Idle;
            }
            Action::SelectAccount(account) => {
                if self.is_form_enabled() {
                    self.selected_account = account;
                }
            }
            Action::EditTokenId(token_id) => {
                if self.is_form_enabled() {
                    self.token_id = token_id;
                }
            }
            Action::MintSucceeded { epoch, image_url } => {
                if epoch != self.epoch {
                    log::warn!("Ignoring mint result from a previous wallet session");
                    return self;
                }
                log::info!("Minted, image at {}", image_url);
                self.image_url = image_url;
                self.status = MintStatus::Minted;
            }
            Action::MintFailed { epoch, error } => {
                if epoch != self.epoch {
                    log::warn!("Ignoring mint failure from a previous wallet session: {}", error);
                    return self;
                }
                log::error!("{}", error);
                self.status = MintStatus::Failed(error);
            }
        }
        self
    }

    /// In-place form of [`SessionState::update`], for reactive stores
    pub fn apply(&mut self, action: Action<P>) {
        *self = std::mem::take(self).update(action);
    }

    /// Capture a mint request and mark the mint as pending.
    ///
    /// Returns `None` while disconnected or while another operation is running.
    pub fn begin_mint(&mut self) -> Option<MintRequest<P>> {
        if !self.can_mint() {
            return None;
        }
        let provider = self.connection.clone()?;
        self.status = MintStatus::Minting;

        Some(MintRequest {
            provider,
            signer: self.signed_in_address.clone(),
            recipient: self.selected_account.clone(),
            token_id: self.token_id.clone(),
            epoch: self.epoch,
        })
    }
}
