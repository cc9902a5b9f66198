//! Outbound fund movement under an operation-scoped reentrancy lock.
//!
//! Every operation that moves value out of custody goes through
//! [`payout_split`] or [`payout_full`]. Both acquire the lock before the
//! first leg and release it after the last; a nested acquisition fails with
//! `Error::ReentrancyBlocked`. A failed leg returns its per-leg error, which
//! aborts the invocation — the Soroban runtime rolls back every prior write
//! and transfer, so mutation and transfer commit as one unit and the lock
//! never outlives the operation.

use soroban_sdk::{token, Address, Env};

use crate::errors::Error;
use crate::fees;
use crate::storage::{is_transfer_locked, set_transfer_lock};

/// Acquire the exclusive transfer lock.
///
/// # Errors
/// * `Error::ReentrancyBlocked` - If the lock is already held
pub fn acquire_lock(e: &Env) -> Result<(), Error> {
    if is_transfer_locked(e) {
        return Err(Error::ReentrancyBlocked);
    }
    set_transfer_lock(e, true);
    Ok(())
}

/// Release the transfer lock after all legs of an operation completed.
pub fn release_lock(e: &Env) {
    set_transfer_lock(e, false);
}

/// Move one leg of value out of custody, surfacing `failure` if the
/// recipient rejects it.
fn send(e: &Env, token: &Address, to: &Address, amount: i128, failure: Error) -> Result<(), Error> {
    let token_client = token::Client::new(e, token);
    match token_client.try_transfer(&e.current_contract_address(), to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(failure),
    }
}

/// Pay `amount - fee` to `recipient` and `fee` to `manager` under the lock.
///
/// The fee is computed once from the original deal amount. Zero-value legs
/// are skipped to avoid no-op token calls. Returns `(payout, fee)`.
///
/// # Errors
/// * `Error::FeeOverflow` - Fee computation overflow
/// * `Error::ReentrancyBlocked` - Lock already held by an in-flight transfer
/// * `recipient_failure` / `Error::TransferToManagerFailed` - A leg failed
pub fn payout_split(
    e: &Env,
    token: &Address,
    recipient: &Address,
    manager: &Address,
    amount: i128,
    recipient_failure: Error,
) -> Result<(i128, i128), Error> {
    let (payout, fee) = fees::split(amount)?;

    acquire_lock(e)?;
    if payout > 0 {
        send(e, token, recipient, payout, recipient_failure)?;
    }
    if fee > 0 {
        send(e, token, manager, fee, Error::TransferToManagerFailed)?;
    }
    release_lock(e);

    Ok((payout, fee))
}

/// Pay the full `amount` to `recipient` under the lock. No fee is taken on
/// this path.
///
/// # Errors
/// * `Error::ReentrancyBlocked` - Lock already held by an in-flight transfer
/// * `failure` - The transfer leg failed
pub fn payout_full(
    e: &Env,
    token: &Address,
    recipient: &Address,
    amount: i128,
    failure: Error,
) -> Result<(), Error> {
    acquire_lock(e)?;
    if amount > 0 {
        send(e, token, recipient, amount, failure)?;
    }
    release_lock(e);

    Ok(())
}
