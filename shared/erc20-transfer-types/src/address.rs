use alloy_primitives::Address;

use crate::errors::TransferError;

/// Hex digits in a full 20-byte address.
const ADDRESS_HEX_LEN: usize = 40;

/// Parse a hex address string.
///
/// Accepts an optional `0x`/`0X` prefix followed by a non-empty, even-length run of at most
/// 40 hex digits (any case). Shorter payloads are left-padded with zero bytes. Whitespace,
/// odd lengths and non-hex characters are rejected; nothing is coerced.
pub fn parse_address(input: &str) -> Result<Address, TransferError> {
    let invalid = || TransferError::InvalidAddress {
        input: input.to_string(),
    };

    let digits = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);

    if digits.is_empty() || digits.len() > ADDRESS_HEX_LEN || digits.len() % 2 != 0 {
        return Err(invalid());
    }
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let raw = hex::decode(digits).map_err(|_| invalid())?;
    let mut out = [0u8; 20];
    out[20 - raw.len()..].copy_from_slice(&raw);
    Ok(Address::from(out))
}

/// ABI word for an address: 12 zero bytes followed by the 20 address bytes.
pub fn address_word(address: Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..32].copy_from_slice(address.as_slice());
    word
}
