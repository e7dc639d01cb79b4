//! Shared types for ERC-20 transfer payloads.
//!
//! Used by the encoder (to build call data and envelopes) and by the wallet session
//! (to hand envelopes to the provider).

pub mod address;
pub mod amount;
pub mod envelope;
pub mod errors;

pub use address::{address_word, parse_address};
pub use amount::{TokenAmount, DEFAULT_DECIMALS};
pub use envelope::{CallData, ChainId, TransactionEnvelope};
pub use errors::{DecodeError, TransferError};
