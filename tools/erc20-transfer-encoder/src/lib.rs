//! ERC-20 `transfer(address,uint256)` payload builder.
//!
//! Pure functions only: nothing here performs I/O or holds state, so every call may run
//! concurrently with any other.

pub mod abi;
pub mod decoder;
pub mod encoder;

pub use decoder::decode_transfer_call;
pub use encoder::{
    build_transfer_transaction, encode_transfer_call, encode_transfer_call_with, selector,
    TRANSFER_CALL_LEN, TRANSFER_SELECTOR,
};
pub use erc20_transfer_types::{
    CallData, ChainId, DecodeError, TokenAmount, TransactionEnvelope, TransferError,
};
