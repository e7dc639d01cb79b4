//! Boundary to the wallet-connection SDK.
//!
//! The provider owns pairing, session state and signing. Nothing here sees private keys.

use alloy_primitives::Address;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const ETH_CHAIN_ID: &str = "eth_chainId";
pub const ETH_ACCOUNTS: &str = "eth_accounts";
pub const ETH_SEND_TRANSACTION: &str = "eth_sendTransaction";

/// JSON-RPC style request forwarded to the wallet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    pub method: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Value>,
}

impl RpcRequest {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            params: Vec::new(),
        }
    }

    pub fn with_params(method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }
}

/// Failures reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("request rejected by the wallet")]
    Rejected,
    #[error("wallet error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("transport failure: {0}")]
    Transport(String),
}

/// Injected wallet provider.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Open (or resume) a session; returns the wallet's accounts.
    async fn connect(&self) -> Result<Vec<Address>, ProviderError>;

    async fn disconnect(&self) -> Result<(), ProviderError>;

    fn is_connected(&self) -> bool;

    async fn request(&self, request: RpcRequest) -> Result<Value, ProviderError>;
}
