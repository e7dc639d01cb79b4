use alloy_primitives::{Address, U256};
use erc20_transfer_types::DecodeError;

use crate::encoder::TRANSFER_SELECTOR;

/// Decode `transfer(address,uint256)` call data into `(recipient, amount)`.
///
/// Strict: the selector must match, the payload must be exactly two words, and the address
/// word must carry zeros in its high 12 bytes.
pub fn decode_transfer_call(bytes: &[u8]) -> Result<(Address, U256), DecodeError> {
    let mut i = 0usize;

    let selector = read_selector(bytes, &mut i)?;
    if selector != TRANSFER_SELECTOR {
        return Err(DecodeError::UnknownSelector(selector));
    }

    let recipient = read_address_word(bytes, &mut i)?;
    let amount = read_u256(bytes, &mut i)?;
    if i != bytes.len() {
        return Err(DecodeError::TrailingBytes);
    }

    Ok((recipient, amount))
}

fn read_selector(bytes: &[u8], i: &mut usize) -> Result<[u8; 4], DecodeError> {
    if bytes.len() < *i + 4 {
        return Err(DecodeError::Truncated);
    }
    let mut sel = [0u8; 4];
    sel.copy_from_slice(&bytes[*i..*i + 4]);
    *i += 4;
    Ok(sel)
}

fn read_address_word(bytes: &[u8], i: &mut usize) -> Result<Address, DecodeError> {
    if bytes.len() < *i + 32 {
        return Err(DecodeError::Truncated);
    }
    let word = &bytes[*i..*i + 32];
    if word[..12].iter().any(|b| *b != 0) {
        return Err(DecodeError::DirtyAddressWord);
    }
    let addr = Address::from_slice(&word[12..32]);
    *i += 32;
    Ok(addr)
}

fn read_u256(bytes: &[u8], i: &mut usize) -> Result<U256, DecodeError> {
    if bytes.len() < *i + 32 {
        return Err(DecodeError::Truncated);
    }
    let word = &bytes[*i..*i + 32];
    *i += 32;
    Ok(U256::from_be_slice(word))
}
