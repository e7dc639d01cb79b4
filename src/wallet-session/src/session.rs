use std::{
    future::Future,
    sync::atomic::{AtomicBool, Ordering},
};

use alloy_primitives::Address;
use erc20_transfer_encoder::build_transfer_transaction;
use erc20_transfer_types::{ChainId, TokenAmount};
use serde::Serialize;
use serde_json::Value;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::{
    config::DappConfig,
    errors::SessionError,
    network::NetworkInfo,
    provider::{
        ProviderError, RpcRequest, WalletProvider, ETH_ACCOUNTS, ETH_CHAIN_ID,
        ETH_SEND_TRANSACTION,
    },
};

/// Token transfer requested by the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferRequest {
    pub token_contract: String,
    pub recipient: String,
    pub amount: TokenAmount,
}

/// Result of a wallet action, as displayed to the user.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RpcResponse {
    pub method: String,
    pub result: Value,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected { accounts: Vec<Address> },
}

/// Wallet session around an injected provider.
///
/// At most one action (connect, disconnect, send) runs at a time; a second caller gets
/// [`SessionError::Busy`] rather than queueing. Every provider call is bounded by the configured
/// request timeout and never retried.
pub struct WalletSession<P> {
    config: DappConfig,
    provider: Option<P>,
    network: Option<Box<dyn NetworkInfo>>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when the action finishes, however it finishes.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<P: WalletProvider> WalletSession<P> {
    pub fn new(config: DappConfig, provider: Option<P>) -> Self {
        Self {
            config,
            provider,
            network: None,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn with_network(mut self, network: Box<dyn NetworkInfo>) -> Self {
        self.network = Some(network);
        self
    }

    pub fn config(&self) -> &DappConfig {
        &self.config
    }

    pub fn provider(&self) -> Option<&P> {
        self.provider.as_ref()
    }

    pub fn is_connected(&self) -> bool {
        self.provider.as_ref().is_some_and(|p| p.is_connected())
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Whether the send action should be enabled.
    pub fn can_send(&self) -> bool {
        self.is_connected() && !self.is_loading()
    }

    /// Connect when disconnected, disconnect when connected.
    pub async fn toggle_connection(&self) -> Result<ConnectionState, SessionError> {
        let provider = self.require_provider()?;
        let _guard = self.begin_action()?;

        if provider.is_connected() {
            self.bounded("disconnect", provider.disconnect()).await?;
            info!("wallet disconnected");
            Ok(ConnectionState::Disconnected)
        } else {
            let accounts = self.bounded("connect", provider.connect()).await?;
            info!(accounts = accounts.len(), "wallet connected");
            Ok(ConnectionState::Connected { accounts })
        }
    }

    /// Send the transfer configured in [`DappConfig::transfer`].
    pub async fn send_configured_transfer(&self) -> Result<RpcResponse, SessionError> {
        let transfer = self
            .config
            .transfer
            .as_ref()
            .ok_or(SessionError::NoTransferConfigured)?
            .to_request();
        self.send_transfer(&transfer).await
    }

    /// Ask the wallet to sign and broadcast an ERC-20 transfer from its first account.
    pub async fn send_transfer(
        &self,
        transfer: &TransferRequest,
    ) -> Result<RpcResponse, SessionError> {
        let provider = self.require_provider()?;
        if !provider.is_connected() {
            return Err(SessionError::NotConnected);
        }
        let _guard = self.begin_action()?;
        self.check_network();

        let chain_id = self.request(provider, RpcRequest::new(ETH_CHAIN_ID)).await?;
        let chain_id = chain_id_from_response(chain_id)?;
        debug!(%chain_id, "resolved chain id");

        let accounts = self.request(provider, RpcRequest::new(ETH_ACCOUNTS)).await?;
        let from = first_account(&accounts)?;

        let envelope = build_transfer_transaction(
            &from,
            &transfer.token_contract,
            &transfer.recipient,
            &transfer.amount,
            chain_id,
        )?;
        info!(
            from = %envelope.from(),
            token = %envelope.to(),
            chain_id = %envelope.chain_id(),
            data = %envelope.data(),
            "submitting token transfer"
        );

        let params = vec![serde_json::to_value(&envelope)?];
        let result = self
            .request(provider, RpcRequest::with_params(ETH_SEND_TRANSACTION, params))
            .await?;
        info!(%result, "transfer submitted");

        Ok(RpcResponse {
            method: "send transaction".to_string(),
            result,
        })
    }

    fn require_provider(&self) -> Result<&P, SessionError> {
        self.provider.as_ref().ok_or_else(|| {
            warn!("no wallet provider available");
            SessionError::MissingProvider
        })
    }

    fn begin_action(&self) -> Result<InFlight<'_>, SessionError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| SessionError::Busy)?;
        Ok(InFlight(&self.in_flight))
    }

    fn check_network(&self) {
        if let Some(network) = &self.network {
            if network.is_connected() == Some(false) {
                warn!("device reports no network connectivity; sending anyway");
            }
        }
    }

    async fn request(&self, provider: &P, request: RpcRequest) -> Result<Value, SessionError> {
        let method = request.method.clone();
        debug!(%method, "provider request");
        self.bounded(&method, provider.request(request)).await
    }

    async fn bounded<T, F>(&self, method: &str, call: F) -> Result<T, SessionError>
    where
        F: Future<Output = Result<T, ProviderError>>,
    {
        match timeout(self.config.request_timeout(), call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => {
                warn!(method, %err, "provider call failed");
                Err(SessionError::Provider(err))
            }
            Err(_) => {
                warn!(method, timeout = ?self.config.request_timeout(), "provider call timed out");
                Err(SessionError::Timeout {
                    method: method.to_string(),
                })
            }
        }
    }
}

/// `eth_chainId` normally answers with a hex string; numeric answers are tolerated.
fn chain_id_from_response(response: Value) -> Result<ChainId, SessionError> {
    if let Some(id) = response.as_str() {
        return Ok(ChainId::new(id));
    }
    if let Some(id) = response.as_u64() {
        return Ok(ChainId::from(id));
    }
    Err(unexpected(ETH_CHAIN_ID, response))
}

fn first_account(response: &Value) -> Result<String, SessionError> {
    response
        .as_array()
        .and_then(|accounts| accounts.first())
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(SessionError::NoAccounts)
}

fn unexpected(method: &str, response: Value) -> SessionError {
    SessionError::UnexpectedResponse {
        method: method.to_string(),
        response,
    }
}
