//! Fee settlement: split a payment into the platform cut and the remainder.
//!
//! Pure integer arithmetic with explicit floor rounding so settlement
//! amounts are exactly reproducible. `platform + remainder == amount` holds
//! for every input; the fee rate is validated at the registry boundary to
//! stay below [`constants::FEE_SCALE`], so the remainder is positive
//! whenever the amount is.

use openlot_types::{Cash, OpenlotError, Result, constants};

/// Result of splitting one payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSplit {
    /// Platform share: `floor(amount * rate / FEE_SCALE)`.
    pub platform: Cash,
    /// What the counterparty receives: `amount - platform`.
    pub remainder: Cash,
}

/// Split `amount` at `fee_rate_ppm` parts-per-million.
///
/// # Errors
/// Returns [`OpenlotError::AmountOverflow`] if `amount * fee_rate_ppm`
/// does not fit in `u128`.
pub fn split(amount: Cash, fee_rate_ppm: u32) -> Result<FeeSplit> {
    let platform = amount
        .checked_mul(Cash::from(fee_rate_ppm))
        .ok_or(OpenlotError::AmountOverflow)?
        / Cash::from(constants::FEE_SCALE);
    Ok(FeeSplit {
        platform,
        remainder: amount - platform,
    })
}
