use core::fmt;

use alloy_primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

/// Opaque chain identifier, passed through exactly as the network reported it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(String);

impl ChainId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for ChainId {
    /// Hex quantity form, as returned by `eth_chainId`.
    fn from(id: u64) -> Self {
        Self(format!("{id:#x}"))
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ABI call data: 4-byte selector followed by 32-byte argument words.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallData(Bytes);

impl CallData {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(Bytes::from(bytes))
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn selector(&self) -> Option<[u8; 4]> {
        let head = self.0.get(..4)?;
        let mut sel = [0u8; 4];
        sel.copy_from_slice(head);
        Some(sel)
    }

    /// Argument word `index` (0-based, after the selector).
    pub fn word(&self, index: usize) -> Option<&[u8]> {
        let start = 4 + 32 * index;
        self.0.get(start..start + 32)
    }

    /// Low 20 bytes of the first argument word.
    pub fn recipient(&self) -> Option<Address> {
        self.word(0).map(|w| Address::from_slice(&w[12..32]))
    }

    /// Second argument word as a big-endian integer.
    pub fn amount(&self) -> Option<U256> {
        self.word(1).map(U256::from_be_slice)
    }

    pub fn into_bytes(self) -> Bytes {
        self.0
    }
}

impl AsRef<[u8]> for CallData {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for CallData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

/// Transaction handed to the wallet for `eth_sendTransaction`.
///
/// `to` is the token contract; the transfer recipient lives inside `data`. Fields are
/// read-only once built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEnvelope {
    from: Address,
    to: Address,
    value: U256,
    chain_id: ChainId,
    data: CallData,
}

impl TransactionEnvelope {
    /// Envelope for a token call: zero native value, addressed to `token_contract`.
    pub fn token_call(
        from: Address,
        token_contract: Address,
        chain_id: ChainId,
        data: CallData,
    ) -> Self {
        Self {
            from,
            to: token_contract,
            value: U256::ZERO,
            chain_id,
            data,
        }
    }

    pub fn from(&self) -> Address {
        self.from
    }

    pub fn to(&self) -> Address {
        self.to
    }

    pub fn value(&self) -> U256 {
        self.value
    }

    pub fn chain_id(&self) -> &ChainId {
        &self.chain_id
    }

    pub fn data(&self) -> &CallData {
        &self.data
    }
}
