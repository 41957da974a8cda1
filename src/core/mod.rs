pub mod abi;
pub mod config;
pub mod constants;
pub mod contract;
pub mod controller;
pub mod session;
pub mod timer;
pub mod wallet;

pub use config::{contract_config, ContractConfig};
pub use session::{Action, MintStatus, SessionError, SessionState};
