//! Wallet-connected token transfer flow.
//!
//! The wallet-connection SDK is an external collaborator reached through [`WalletProvider`].
//! This crate owns only what sits around it:
//! - explicit configuration ([`DappConfig`]) instead of process-wide constants,
//! - the single in-flight action rule and per-call timeouts ([`WalletSession`]),
//! - the request/response modal state ([`RequestModal`]).
//!
//! Payload construction is delegated to `erc20-transfer-encoder`.

pub mod config;
pub mod errors;
pub mod mock;
pub mod modal;
pub mod network;
pub mod provider;
pub mod session;

pub use config::{ClientMetadata, DappConfig, Namespace, SessionParams, TransferDefaults};
pub use errors::{ConfigError, SessionError};
pub use modal::{DisplayResponse, RequestModal};
pub use network::NetworkInfo;
pub use provider::{ProviderError, RpcRequest, WalletProvider};
pub use session::{ConnectionState, RpcResponse, TransferRequest, WalletSession};

#[cfg(test)]
mod tests;
