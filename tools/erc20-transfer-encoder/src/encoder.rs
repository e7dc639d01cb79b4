use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;
use erc20_transfer_types::{
    address_word, parse_address, CallData, ChainId, TokenAmount, TransactionEnvelope,
    TransferError,
};
use sha3::{Digest, Keccak256};

use crate::abi::IERC20;

/// Selector of `transfer(address,uint256)` (`0xa9059cbb`).
pub const TRANSFER_SELECTOR: [u8; 4] = <IERC20::transferCall as SolCall>::SELECTOR;

/// Selector plus two argument words.
pub const TRANSFER_CALL_LEN: usize = 4 + 32 * 2;

/// First 4 bytes of the Keccak-256 of a canonical function signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let mut h = Keccak256::new();
    h.update(signature.as_bytes());
    let out = h.finalize();
    [out[0], out[1], out[2], out[3]]
}

/// Encode `transfer(recipient, amount)` for already-validated inputs.
pub fn encode_transfer_call_with(recipient: Address, amount: U256) -> CallData {
    let mut buf = Vec::with_capacity(TRANSFER_CALL_LEN);
    buf.extend_from_slice(&TRANSFER_SELECTOR);
    // address recipient, left-padded to 32 bytes
    buf.extend_from_slice(&address_word(recipient));
    // uint256 amount, big-endian
    buf.extend_from_slice(&amount.to_be_bytes::<32>());
    CallData::new(buf)
}

/// Validate `recipient` and `amount`, then encode the `transfer` call.
///
/// The result is always [`TRANSFER_CALL_LEN`] bytes and depends only on the inputs.
pub fn encode_transfer_call(
    recipient: &str,
    amount: &TokenAmount,
) -> Result<CallData, TransferError> {
    let recipient = parse_address(recipient)?;
    let amount = amount.to_units()?;
    Ok(encode_transfer_call_with(recipient, amount))
}

/// Build the transaction that asks `from` to move `amount` of `token_contract` to `recipient`.
///
/// The envelope is addressed to the token contract with zero native value; the recipient only
/// appears inside the call data. `chain_id` is passed through untouched. The envelope is not
/// submitted here.
pub fn build_transfer_transaction(
    from: &str,
    token_contract: &str,
    recipient: &str,
    amount: &TokenAmount,
    chain_id: ChainId,
) -> Result<TransactionEnvelope, TransferError> {
    let from = parse_address(from)?;
    let token_contract = parse_address(token_contract)?;
    let data = encode_transfer_call(recipient, amount)?;
    Ok(TransactionEnvelope::token_call(
        from,
        token_contract,
        chain_id,
        data,
    ))
}
