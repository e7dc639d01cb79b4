use std::path::PathBuf;

use erc20_transfer_types::TransferError;
use serde_json::Value;
use thiserror::Error;

use crate::provider::ProviderError;

/// Errors from a wallet action.
///
/// Transfer validation errors keep their precise kind; only the modal flattens them for display.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no wallet provider available")]
    MissingProvider,
    #[error("wallet is not connected")]
    NotConnected,
    /// Another connect/disconnect/send is still awaiting the wallet.
    #[error("another wallet action is in flight")]
    Busy,
    #[error("no transfer configured")]
    NoTransferConfigured,
    #[error("wallet returned no accounts")]
    NoAccounts,
    #[error("`{method}` timed out")]
    Timeout { method: String },
    #[error("unexpected `{method}` response: {response}")]
    UnexpectedResponse { method: String, response: Value },
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Transfer(#[from] TransferError),
    #[error("failed serialising transaction: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors while loading [`crate::DappConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed parsing JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}
