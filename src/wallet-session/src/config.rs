//! dApp configuration handed to the wallet-connection layer.

use std::{collections::BTreeMap, fs, path::Path, time::Duration};

use erc20_transfer_types::{TokenAmount, DEFAULT_DECIMALS};
use serde::{Deserialize, Serialize};

use crate::{errors::ConfigError, session::TransferRequest};

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Everything the wallet-connection collaborator is constructed with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DappConfig {
    /// Relay project id issued by the wallet-connection service.
    pub project_id: String,
    #[serde(default)]
    pub metadata: ClientMetadata,
    #[serde(default)]
    pub session: SessionParams,
    /// Upper bound on any single provider call.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Transfer sent by the "send transaction" action.
    #[serde(default)]
    pub transfer: Option<TransferDefaults>,
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl DappConfig {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            metadata: ClientMetadata::default(),
            session: SessionParams::default(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            transfer: None,
        }
    }

    /// Read and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.project_id.trim().is_empty() {
            return Err(ConfigError::Invalid("projectId must not be empty"));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid("requestTimeoutSecs must be non-zero"));
        }
        if self.session.namespaces.is_empty() {
            return Err(ConfigError::Invalid("session must declare at least one namespace"));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Metadata shown by the wallet when pairing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientMetadata {
    pub name: String,
    pub description: String,
    pub url: String,
    #[serde(default)]
    pub icons: Vec<String>,
    #[serde(default)]
    pub redirect: Redirect,
}

impl Default for ClientMetadata {
    fn default() -> Self {
        Self {
            name: "BluePrint_Dev".to_string(),
            description: "RN dApp by WalletConnect".to_string(),
            url: "https://walletconnect.com/".to_string(),
            icons: vec!["https://avatars.githubusercontent.com/u/37784886".to_string()],
            redirect: Redirect {
                native: Some("nxdsns://".to_string()),
            },
        }
    }
}

/// Deep link the wallet returns to after approving a request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redirect {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native: Option<String>,
}

/// Namespaces requested when the session is proposed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionParams {
    pub namespaces: BTreeMap<String, Namespace>,
}

impl Default for SessionParams {
    fn default() -> Self {
        let eip155 = Namespace {
            methods: [
                "eth_sendTransaction",
                "eth_signTransaction",
                "eth_sign",
                "personal_sign",
                "eth_signTypedData",
                "wallet_addEthereumChain",
            ]
            .map(String::from)
            .to_vec(),
            chains: vec!["eip155:1".to_string()],
            events: vec!["chainChanged".to_string(), "accountsChanged".to_string()],
            rpc_map: BTreeMap::new(),
        };
        Self {
            namespaces: BTreeMap::from([("eip155".to_string(), eip155)]),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Namespace {
    pub methods: Vec<String>,
    pub chains: Vec<String>,
    pub events: Vec<String>,
    #[serde(default)]
    pub rpc_map: BTreeMap<String, String>,
}

/// Token, recipient and human-unit amount for the configured transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferDefaults {
    pub token_contract: String,
    pub recipient: String,
    pub amount: String,
    #[serde(default = "default_decimals")]
    pub decimals: u8,
}

fn default_decimals() -> u8 {
    DEFAULT_DECIMALS
}

impl TransferDefaults {
    pub fn to_request(&self) -> TransferRequest {
        TransferRequest {
            token_contract: self.token_contract.clone(),
            recipient: self.recipient.clone(),
            amount: TokenAmount::Decimal {
                amount: self.amount.clone(),
                decimals: self.decimals,
            },
        }
    }
}
