//! In-memory wallet provider.
//!
//! Lets the session flow be exercised without a wallet app or relay.

use std::{
    sync::atomic::{AtomicBool, AtomicU64, Ordering},
    time::Duration,
};

use alloy_primitives::Address;
use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Mutex;

use crate::provider::{
    ProviderError, RpcRequest, WalletProvider, ETH_ACCOUNTS, ETH_CHAIN_ID, ETH_SEND_TRANSACTION,
};

pub struct MockWalletProvider {
    accounts: Vec<Address>,
    chain_id: u64,
    connected: AtomicBool,
    send_delay: Option<Duration>,
    reject_sends: bool,
    accounts_response: Option<Value>,
    sent: Mutex<Vec<RpcRequest>>,
    tx_counter: AtomicU64,
}

impl MockWalletProvider {
    pub fn new(accounts: Vec<Address>, chain_id: u64) -> Self {
        Self {
            accounts,
            chain_id,
            connected: AtomicBool::new(false),
            send_delay: None,
            reject_sends: false,
            accounts_response: None,
            sent: Mutex::new(Vec::new()),
            tx_counter: AtomicU64::new(0),
        }
    }

    /// Start with an established session.
    pub fn connected(self) -> Self {
        self.connected.store(true, Ordering::Release);
        self
    }

    /// Hold every `eth_sendTransaction` for `delay` before answering.
    pub fn with_send_delay(mut self, delay: Duration) -> Self {
        self.send_delay = Some(delay);
        self
    }

    /// Answer every `eth_sendTransaction` as if the user declined it.
    pub fn rejecting_sends(mut self) -> Self {
        self.reject_sends = true;
        self
    }

    /// Answer `eth_accounts` with `response` instead of the account list.
    pub fn with_accounts_response(mut self, response: Value) -> Self {
        self.accounts_response = Some(response);
        self
    }

    /// `eth_sendTransaction` requests received so far.
    pub async fn sent(&self) -> Vec<RpcRequest> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl WalletProvider for MockWalletProvider {
    async fn connect(&self) -> Result<Vec<Address>, ProviderError> {
        self.connected.store(true, Ordering::Release);
        Ok(self.accounts.clone())
    }

    async fn disconnect(&self) -> Result<(), ProviderError> {
        self.connected.store(false, Ordering::Release);
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    async fn request(&self, request: RpcRequest) -> Result<Value, ProviderError> {
        if !self.is_connected() {
            return Err(ProviderError::Transport("no active session".to_string()));
        }
        let method = request.method.clone();
        match method.as_str() {
            ETH_CHAIN_ID => Ok(json!(format!("{:#x}", self.chain_id))),
            ETH_ACCOUNTS => Ok(self
                .accounts_response
                .clone()
                .unwrap_or_else(|| json!(self.accounts))),
            ETH_SEND_TRANSACTION => {
                self.sent.lock().await.push(request);
                if let Some(delay) = self.send_delay {
                    tokio::time::sleep(delay).await;
                }
                if self.reject_sends {
                    return Err(ProviderError::Rejected);
                }
                let n = self.tx_counter.fetch_add(1, Ordering::Relaxed) + 1;
                Ok(json!(format!("0x{n:064x}")))
            }
            _ => Err(ProviderError::Rpc {
                code: -32601,
                message: format!("method `{method}` not supported"),
            }),
        }
    }
}
