use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use erc20_transfer_encoder::{
    build_transfer_transaction, decode_transfer_call, encode_transfer_call,
};
use erc20_transfer_types::{ChainId, TokenAmount, DEFAULT_DECIMALS};
use serde_json::json;
use wallet_session::DappConfig;

mod record;

/// Build ERC-20 `transfer` call data and `eth_sendTransaction` envelopes.
///
/// Nothing is signed or broadcast: output is meant to be handed to a wallet.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the ABI-encoded `transfer(address,uint256)` call data.
    Encode {
        /// Recipient address (0x...).
        #[arg(long, env = "RECIPIENT_ADDRESS")]
        recipient: String,

        #[command(flatten)]
        amount: AmountArgs,
    },
    /// Decode `transfer` call data back into recipient and amount.
    Decode {
        /// Hex call data, with or without 0x.
        data: String,
    },
    /// Print the transaction envelope for `eth_sendTransaction`.
    Build(BuildArgs),
}

#[derive(Args, Debug)]
struct AmountArgs {
    /// Amount in human units (eg, `10` or `0.5`), unless `--units` is given.
    #[arg(long)]
    amount: Option<String>,

    /// Token decimals used to scale a human-unit amount.
    #[arg(long, default_value_t = DEFAULT_DECIMALS, conflicts_with = "units")]
    decimals: u8,

    /// Treat `--amount` as an integer in the token's smallest unit.
    #[arg(long)]
    units: bool,
}

#[derive(Args, Debug)]
struct BuildArgs {
    /// Sending account (the connected wallet's address).
    #[arg(long, env = "FROM_ADDRESS")]
    from: String,

    /// Token contract address; the envelope's `to`.
    #[arg(long, env = "TOKEN_ADDRESS")]
    token: Option<String>,

    /// Recipient address; encoded inside the call data.
    #[arg(long, env = "RECIPIENT_ADDRESS")]
    recipient: Option<String>,

    #[command(flatten)]
    amount: AmountArgs,

    /// Chain id as reported by the network (eg, 0x1). Passed through as-is.
    #[arg(long, env = "CHAIN_ID", default_value = "0x1")]
    chain_id: String,

    /// dApp config whose `transfer` section fills in missing token/recipient/amount.
    #[arg(long, env = "DAPP_CONFIG")]
    config: Option<PathBuf>,

    /// JSON record file to merge the envelope into (eg, transfers.json).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Key under `transactions` in the record file.
    #[arg(long, default_value = "transfer")]
    label: String,
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("transfer_cli=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Encode { recipient, amount } => {
            let amount = amount.resolve(None)?;
            let data = encode_transfer_call(&recipient, &amount)
                .with_context(|| format!("failed encoding transfer to {recipient}"))?;
            println!("{data}");
        }
        Command::Decode { data } => {
            let bytes = call_data_bytes(&data)?;
            let (recipient, amount) =
                decode_transfer_call(&bytes).context("not a transfer(address,uint256) call")?;
            let out = json!({
                "recipient": recipient.to_checksum(None),
                "amount": amount.to_string(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Command::Build(args) => build(args)?,
    }
    Ok(())
}

fn build(args: BuildArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => Some(
            DappConfig::load(path)
                .with_context(|| format!("failed loading dApp config {}", path.display()))?,
        ),
        None => None,
    };
    let defaults = config.as_ref().and_then(|c| c.transfer.as_ref());

    let token = args
        .token
        .clone()
        .or_else(|| defaults.map(|d| d.token_contract.clone()))
        .ok_or_else(|| anyhow!("missing token: provide --token (or set TOKEN_ADDRESS)"))?;
    let recipient = args
        .recipient
        .clone()
        .or_else(|| defaults.map(|d| d.recipient.clone()))
        .ok_or_else(|| {
            anyhow!("missing recipient: provide --recipient (or set RECIPIENT_ADDRESS)")
        })?;
    let amount = args.amount.resolve(defaults.map(|d| d.to_request().amount))?;
    let chain_id = ChainId::new(args.chain_id.clone());

    let envelope = build_transfer_transaction(&args.from, &token, &recipient, &amount, chain_id)
        .context("failed building transfer transaction")?;
    tracing::info!(
        token = %envelope.to(),
        recipient = %recipient,
        chain_id = %envelope.chain_id(),
        "built transfer envelope"
    );

    let value = serde_json::to_value(&envelope).context("failed serialising envelope")?;
    println!("{}", serde_json::to_string_pretty(&value)?);

    if let Some(out) = &args.out {
        record::write_transaction_record(out, &args.label, &value)?;
        tracing::info!(path = %out.display(), label = %args.label, "wrote transaction record");
    }
    Ok(())
}

/// Hex call data with an optional `0x`/`0X` prefix.
fn call_data_bytes(data: &str) -> Result<Vec<u8>> {
    let digits = data
        .strip_prefix("0x")
        .or_else(|| data.strip_prefix("0X"))
        .unwrap_or(data);
    hex::decode(digits).context("call data is not valid hex")
}

impl AmountArgs {
    /// `fallback` is used when `--amount` is absent.
    fn resolve(&self, fallback: Option<TokenAmount>) -> Result<TokenAmount> {
        match &self.amount {
            Some(amount) if self.units => Ok(TokenAmount::Integer(amount.clone())),
            Some(amount) => Ok(TokenAmount::Decimal {
                amount: amount.clone(),
                decimals: self.decimals,
            }),
            None => fallback.ok_or_else(|| anyhow!("missing amount: provide --amount")),
        }
    }
}
