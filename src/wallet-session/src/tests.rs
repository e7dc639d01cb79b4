use std::time::Duration;

use alloy_primitives::{address, Address};
use erc20_transfer_types::{TokenAmount, TransferError};
use serde_json::json;

use crate::{
    mock::MockWalletProvider, provider::ProviderError, ConfigError, ConnectionState, DappConfig,
    DisplayResponse, NetworkInfo, RequestModal, SessionError, TransferDefaults, TransferRequest,
    WalletSession,
};

const TOKEN: &str = "0x228b5C21ac00155cf62c57bcc704c0dA8187950b";
const RECIPIENT: &str = "0x3d564e587F184ff6De6898D0A85344a52743f959";
const ACCOUNT: Address = address!("00000000000000000000000000000000000000aa");

fn transfer() -> TransferRequest {
    TransferRequest {
        token_contract: TOKEN.to_string(),
        recipient: RECIPIENT.to_string(),
        amount: TokenAmount::human("10"),
    }
}

fn session(provider: MockWalletProvider) -> WalletSession<MockWalletProvider> {
    WalletSession::new(DappConfig::new("test-project"), Some(provider))
}

struct Offline;

impl NetworkInfo for Offline {
    fn is_connected(&self) -> Option<bool> {
        Some(false)
    }
}

#[tokio::test]
async fn send_without_provider_is_missing_provider() {
    let session = WalletSession::<MockWalletProvider>::new(DappConfig::new("p"), None);
    let err = session.send_transfer(&transfer()).await.unwrap_err();
    assert!(matches!(err, SessionError::MissingProvider));
    assert!(!session.can_send());
}

#[tokio::test]
async fn send_while_disconnected_is_rejected() {
    let session = session(MockWalletProvider::new(vec![ACCOUNT], 1));
    let err = session.send_transfer(&transfer()).await.unwrap_err();
    assert!(matches!(err, SessionError::NotConnected));
}

#[tokio::test]
async fn send_submits_envelope_to_token_contract() -> eyre::Result<()> {
    let session = session(MockWalletProvider::new(vec![ACCOUNT], 1).connected());
    assert!(session.can_send());

    let response = session.send_transfer(&transfer()).await?;
    assert_eq!(response.method, "send transaction");
    assert_eq!(response.result, json!(format!("0x{:064x}", 1)));

    let sent = session_provider_sent(&session).await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, "eth_sendTransaction");

    let tx = &sent[0].params[0];
    let to: Address = tx["to"].as_str().unwrap().parse()?;
    let from: Address = tx["from"].as_str().unwrap().parse()?;
    assert_eq!(to, address!("228b5c21ac00155cf62c57bcc704c0da8187950b"));
    assert_eq!(from, ACCOUNT);
    assert_eq!(tx["value"], "0x0");
    assert_eq!(tx["chainId"], "0x1");
    assert_eq!(
        tx["data"],
        "0xa9059cbb\
         0000000000000000000000003d564e587f184ff6de6898d0a85344a52743f959\
         0000000000000000000000000000000000000000000000008ac7230489e80000"
    );

    // Flag released once the action settles.
    assert!(session.can_send());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn second_action_while_in_flight_is_busy() {
    let provider = MockWalletProvider::new(vec![ACCOUNT], 1)
        .connected()
        .with_send_delay(Duration::from_secs(5));
    let session = session(provider);
    let request = transfer();

    let (first, second) = tokio::join!(session.send_transfer(&request), async {
        // First send is parked inside the wallet by now.
        assert!(session.is_loading());
        assert!(!session.can_send());
        session.send_transfer(&request).await
    });

    assert!(first.is_ok());
    assert!(matches!(second, Err(SessionError::Busy)));
    assert!(!session.is_loading());
}

#[tokio::test(start_paused = true)]
async fn hung_wallet_times_out_and_releases_flag() {
    let provider = MockWalletProvider::new(vec![ACCOUNT], 1)
        .connected()
        .with_send_delay(Duration::from_secs(600));
    let mut config = DappConfig::new("p");
    config.request_timeout_secs = 30;
    let session = WalletSession::new(config, Some(provider));

    let err = session.send_transfer(&transfer()).await.unwrap_err();
    match err {
        SessionError::Timeout { method } => assert_eq!(method, "eth_sendTransaction"),
        other => panic!("expected timeout, got {other:?}"),
    }
    assert!(session.can_send());
}

#[tokio::test]
async fn invalid_recipient_keeps_precise_error_and_sends_nothing() {
    let session = session(MockWalletProvider::new(vec![ACCOUNT], 1).connected());
    let request = TransferRequest {
        recipient: "0x3d564e587F184ff6De6898D0A85344a52743f9591".to_string(),
        ..transfer()
    };

    let err = session.send_transfer(&request).await.unwrap_err();
    assert!(matches!(
        err,
        SessionError::Transfer(TransferError::InvalidAddress { .. })
    ));
    assert!(session_provider_sent(&session).await.is_empty());
}

#[tokio::test]
async fn wallet_without_accounts_is_no_accounts() {
    let session = session(MockWalletProvider::new(Vec::new(), 1).connected());
    let err = session.send_transfer(&transfer()).await.unwrap_err();
    assert!(matches!(err, SessionError::NoAccounts));
}

#[tokio::test]
async fn malformed_accounts_answer_is_no_accounts() {
    for answer in [json!(null), json!("0xaa"), json!([42]), json!({ "0": "0xaa" })] {
        let provider = MockWalletProvider::new(vec![ACCOUNT], 1)
            .connected()
            .with_accounts_response(answer.clone());
        let session = session(provider);

        let err = session.send_transfer(&transfer()).await.unwrap_err();
        assert!(matches!(err, SessionError::NoAccounts), "answer {answer}: {err:?}");
        assert!(session_provider_sent(&session).await.is_empty());
        assert!(session.can_send());
    }
}

#[tokio::test(start_paused = true)]
async fn toggle_while_send_in_flight_is_busy() {
    let provider = MockWalletProvider::new(vec![ACCOUNT], 1)
        .connected()
        .with_send_delay(Duration::from_secs(5));
    let session = session(provider);
    let request = transfer();

    let (sent, toggled) = tokio::join!(session.send_transfer(&request), async {
        assert!(session.is_loading());
        session.toggle_connection().await
    });

    assert!(sent.is_ok());
    assert!(matches!(toggled, Err(SessionError::Busy)));
    // The rejected toggle left the wallet connected.
    assert!(session.is_connected());
    assert!(!session.is_loading());
}

#[tokio::test]
async fn offline_network_is_advisory_only() {
    let session = session(MockWalletProvider::new(vec![ACCOUNT], 1).connected())
        .with_network(Box::new(Offline));
    assert!(session.send_transfer(&transfer()).await.is_ok());
}

#[tokio::test]
async fn toggle_connection_connects_then_disconnects() -> eyre::Result<()> {
    let session = session(MockWalletProvider::new(vec![ACCOUNT], 1));
    assert!(!session.is_connected());

    let state = session.toggle_connection().await?;
    assert_eq!(state, ConnectionState::Connected { accounts: vec![ACCOUNT] });
    assert!(session.is_connected());

    let state = session.toggle_connection().await?;
    assert_eq!(state, ConnectionState::Disconnected);
    assert!(!session.is_connected());
    Ok(())
}

#[tokio::test]
async fn modal_shows_flattened_error() {
    let session = session(MockWalletProvider::new(vec![ACCOUNT], 1).connected().rejecting_sends());
    let mut modal = RequestModal::default();

    modal.track(session.send_transfer(&transfer())).await;

    assert!(modal.is_visible());
    assert!(!modal.is_loading());
    assert_eq!(
        modal.response(),
        Some(&DisplayResponse::Error {
            error: ProviderError::Rejected.to_string()
        })
    );

    modal.close();
    assert_eq!(modal, RequestModal::default());
}

#[tokio::test]
async fn modal_shows_success_response() {
    let session = session(MockWalletProvider::new(vec![ACCOUNT], 1).connected());
    let mut modal = RequestModal::default();

    modal.begin();
    assert!(modal.is_loading());
    let outcome = session.send_transfer(&transfer()).await;
    modal.finish(outcome);

    let Some(DisplayResponse::Success(response)) = modal.response() else {
        panic!("expected success, got {:?}", modal.response());
    };
    assert_eq!(response.method, "send transaction");
    assert_eq!(
        serde_json::to_value(modal.response().unwrap()).unwrap()["method"],
        "send transaction"
    );
}

#[tokio::test]
async fn configured_transfer_is_sent() -> eyre::Result<()> {
    let mut config = DappConfig::new("p");
    config.transfer = Some(TransferDefaults {
        token_contract: TOKEN.to_string(),
        recipient: RECIPIENT.to_string(),
        amount: "10".to_string(),
        decimals: 18,
    });
    let session = WalletSession::new(
        config,
        Some(MockWalletProvider::new(vec![ACCOUNT], 137).connected()),
    );

    session.send_configured_transfer().await?;
    let sent = session_provider_sent(&session).await;
    assert_eq!(sent[0].params[0]["chainId"], "0x89");

    let bare = WalletSession::new(
        DappConfig::new("p"),
        Some(MockWalletProvider::new(vec![ACCOUNT], 1).connected()),
    );
    assert!(matches!(
        bare.send_configured_transfer().await,
        Err(SessionError::NoTransferConfigured)
    ));
    Ok(())
}

#[test]
fn config_from_json_applies_defaults() -> eyre::Result<()> {
    let config = DappConfig::from_json(
        r#"{
            "projectId": "6399bd18",
            "transfer": {
                "tokenContract": "0x228b5C21ac00155cf62c57bcc704c0dA8187950b",
                "recipient": "0x3d564e587F184ff6De6898D0A85344a52743f959",
                "amount": "10"
            }
        }"#,
    )?;

    assert_eq!(config.project_id, "6399bd18");
    assert_eq!(config.request_timeout(), Duration::from_secs(120));
    assert_eq!(config.metadata.name, "BluePrint_Dev");
    let eip155 = &config.session.namespaces["eip155"];
    assert!(eip155.methods.iter().any(|m| m == "eth_sendTransaction"));
    assert_eq!(eip155.chains, vec!["eip155:1".to_string()]);

    let request = config.transfer.as_ref().unwrap().to_request();
    assert_eq!(request.amount, TokenAmount::human("10"));
    Ok(())
}

#[test]
fn config_validation_rejects_bad_values() {
    assert!(matches!(
        DappConfig::from_json(r#"{ "projectId": "  " }"#),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        DappConfig::from_json(r#"{ "projectId": "p", "requestTimeoutSecs": 0 }"#),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        DappConfig::from_json(r#"{ "projectId": "p", "session": { "namespaces": {} } }"#),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(DappConfig::from_json("{"), Err(ConfigError::Json(_))));
}

#[test]
fn config_load_reports_missing_file() {
    let path = std::path::Path::new("/nonexistent/dapp.json");
    match DappConfig::load(path) {
        Err(ConfigError::Io { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected io error, got {other:?}"),
    }
}

async fn session_provider_sent(
    session: &WalletSession<MockWalletProvider>,
) -> Vec<crate::RpcRequest> {
    session.provider().expect("provider").sent().await
}
