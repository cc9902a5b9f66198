//! Fee and time-lock policy. Pure functions, no state.

use crate::errors::Error;

/// Arbitration fee in basis points (150 = 1.5%)
pub const FEE_BPS: u32 = 150;

/// Basis-points denominator
pub const BPS_DENOMINATOR: i128 = 10_000;

/// Seconds a deal must sit in `Running` before the buyer may self-refund
pub const REFUND_WINDOW: u64 = 14 * 24 * 60 * 60;

/// Seconds a deal must sit in `Success` before the seller may force withdrawal
pub const FORCED_WITHDRAWAL_WINDOW: u64 = REFUND_WINDOW;

/// Fee for a deal, truncated toward zero.
///
/// Computed once from the original deal amount, never from a runtime balance.
///
/// # Errors
/// * `Error::FeeOverflow` - If the basis-points multiplication overflows
pub fn arbitration_fee(amount: i128) -> Result<i128, Error> {
    let scaled = amount
        .checked_mul(FEE_BPS as i128)
        .ok_or(Error::FeeOverflow)?;
    Ok(scaled / BPS_DENOMINATOR)
}

/// Split an amount into `(payout, fee)` with `payout + fee == amount`.
pub fn split(amount: i128) -> Result<(i128, i128), Error> {
    let fee = arbitration_fee(amount)?;
    Ok((amount - fee, fee))
}

/// Whether the refund window has elapsed since entering the current phase.
pub fn refund_eligible(now: u64, phase_entered_at: u64) -> bool {
    now >= phase_entered_at.saturating_add(REFUND_WINDOW)
}

/// Whether the forced-withdrawal window has elapsed since entering the
/// current phase.
pub fn forced_withdrawal_eligible(now: u64, phase_entered_at: u64) -> bool {
    now >= phase_entered_at.saturating_add(FORCED_WITHDRAWAL_WINDOW)
}
