use alloy_primitives::U256;

use crate::errors::TransferError;

/// Decimals used by most ERC-20 tokens (and by ether itself).
pub const DEFAULT_DECIMALS: u8 = 18;

/// Token amount as supplied by a caller, before it is resolved to a 256-bit word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenAmount {
    /// Already in the token's smallest unit.
    Units(U256),
    /// Base-10 integer in the token's smallest unit. May be arbitrarily long.
    Integer(String),
    /// Human-unit decimal (e.g. `"10"`, `"0.25"`) scaled by `10^decimals`.
    Decimal { amount: String, decimals: u8 },
}

impl TokenAmount {
    /// Human-unit amount at [`DEFAULT_DECIMALS`].
    pub fn human(amount: impl Into<String>) -> Self {
        Self::Decimal {
            amount: amount.into(),
            decimals: DEFAULT_DECIMALS,
        }
    }

    /// Resolve to the token's smallest unit.
    ///
    /// Scaling is exact integer arithmetic: fractional digits that would be dropped at the
    /// target precision are an error, never truncated.
    pub fn to_units(&self) -> Result<U256, TransferError> {
        match self {
            Self::Units(units) => Ok(*units),
            Self::Integer(digits) => {
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(TransferError::InvalidAmount {
                        input: digits.clone(),
                    });
                }
                accumulate(U256::ZERO, digits)
            }
            Self::Decimal { amount, decimals } => scale_decimal(amount, *decimals),
        }
    }
}

impl From<U256> for TokenAmount {
    fn from(units: U256) -> Self {
        Self::Units(units)
    }
}

impl From<u128> for TokenAmount {
    fn from(units: u128) -> Self {
        Self::Units(U256::from(units))
    }
}

fn scale_decimal(amount: &str, decimals: u8) -> Result<U256, TransferError> {
    let invalid = || TransferError::InvalidAmount {
        input: amount.to_string(),
    };

    let (int_part, frac_part) = match amount.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (amount, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(invalid());
    }
    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !is_digits(int_part) || !is_digits(frac_part) {
        return Err(invalid());
    }

    // Trailing zeros below the precision carry no value.
    let significant = frac_part.trim_end_matches('0');
    if significant.len() > usize::from(decimals) {
        return Err(TransferError::AmountPrecisionLoss { decimals });
    }

    let mut units = accumulate(U256::ZERO, int_part)?;
    units = accumulate(units, significant)?;
    for _ in significant.len()..usize::from(decimals) {
        units = units
            .checked_mul(U256::from(10u8))
            .ok_or(TransferError::AmountOverflow)?;
    }
    Ok(units)
}

/// Fold ASCII digits into `acc`, failing on 256-bit overflow.
fn accumulate(acc: U256, digits: &str) -> Result<U256, TransferError> {
    let ten = U256::from(10u8);
    digits.bytes().try_fold(acc, |acc, b| {
        acc.checked_mul(ten)
            .and_then(|v| v.checked_add(U256::from(b - b'0')))
            .ok_or(TransferError::AmountOverflow)
    })
}
