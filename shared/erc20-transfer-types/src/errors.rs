use thiserror::Error;

/// Errors raised while validating transfer inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// Input is not a well-formed hex address.
    #[error("invalid address `{input}`")]
    InvalidAddress { input: String },
    /// Amount does not fit in a 256-bit word.
    #[error("amount does not fit in 256 bits")]
    AmountOverflow,
    /// Human-unit amount has non-zero digits below the token's precision.
    #[error("amount has more than {decimals} significant fractional digits")]
    AmountPrecisionLoss { decimals: u8 },
    /// Amount string is not a plain non-negative decimal number.
    #[error("invalid amount `{input}`")]
    InvalidAmount { input: String },
}

/// Errors during call data decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unknown selector 0x{}", hex::encode(.0))]
    UnknownSelector([u8; 4]),
    #[error("call data truncated")]
    Truncated,
    #[error("trailing bytes after call arguments")]
    TrailingBytes,
    /// High 12 bytes of an address word are not zero.
    #[error("address word has non-zero high bytes")]
    DirtyAddressWord,
}
