#![no_std]

mod errors;
mod events;
mod fees;
mod storage;
mod transfer;
mod types;

#[cfg(test)]
mod test;

use soroban_sdk::{contract, contractimpl, token, Address, BytesN, Env};

use crate::errors::Error;
use crate::events::*;
use crate::storage::*;
use crate::types::*;

// ============================================================================
// Constants
// ============================================================================

/// Number of ledgers in a day (assuming ~5 second block time)
const DAY_IN_LEDGERS: u32 = 17280;

/// TTL extension amount for instance storage (30 days)
const INSTANCE_TTL_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;

/// TTL threshold before extending (29 days)
const INSTANCE_TTL_THRESHOLD: u32 = INSTANCE_TTL_AMOUNT - DAY_IN_LEDGERS;

// ============================================================================
// Contract
// ============================================================================

/// Escrow engine for buyer/seller deals on Stellar/Soroban.
///
/// Holds a single fungible asset in custody per deal and drives each deal
/// through `Running -> Success -> Closed`, with a `Dispute` detour arbitrated
/// by a single manager identity. Handles:
/// - Deal creation, confirmation, and the per-participant open-deal index
/// - Time-locked fallback paths (buyer self-refund, seller forced withdrawal)
/// - A deterministic 150 bps arbitration fee, computed once per deal
/// - Dispute arbitration with a fee-free buyer-refund branch
/// - Outbound transfers under an operation-scoped reentrancy lock
/// - Owner-gated in-place logic upgrade preserving registry state
#[contract]
pub struct EscrowContract;

#[contractimpl]
impl EscrowContract {
    // ========================================================================
    // INITIALIZATION
    // ========================================================================

    /// Initialize the escrow engine.
    ///
    /// # Arguments
    /// * `manager` - The administrative identity; sole arbitrator and upgrade
    ///   owner
    /// * `token` - The fungible asset held in custody for every deal
    ///
    /// # Errors
    /// * `Error::AlreadyInitialized` - If the contract has already been
    ///   initialized
    pub fn initialize(e: &Env, manager: Address, token: Address) -> Result<(), Error> {
        manager.require_auth();

        if is_initialized(e) {
            return Err(Error::AlreadyInitialized);
        }

        let config = EscrowConfig {
            manager: manager.clone(),
            token: token.clone(),
        };

        set_config(e, &config);
        set_initialized(e);
        Self::extend_instance_ttl(e);

        InitializedEventData { manager, token }.publish(e);

        Ok(())
    }

    /// Get engine configuration
    pub fn get_config(e: &Env) -> Result<EscrowConfig, Error> {
        get_config(e).ok_or(Error::NotInitialized)
    }

    // ========================================================================
    // DEAL LIFECYCLE
    // ========================================================================

    /// Create a deal and take custody of the escrowed value.
    ///
    /// The buyer deposits exactly `amount` of the custody token; the deal
    /// starts in `Running` and both participants are registered in the
    /// open-deal index, which the implicit operations (`confirm`, `refund`,
    /// `withdraw`) resolve against.
    ///
    /// # Arguments
    /// * `buyer` - Buyer address; funds the deal and must authorize the call
    /// * `seller` - Seller address
    /// * `amount` - Escrowed value; strictly positive, fixed for the deal's
    ///   lifetime
    /// * `deposit` - Value attached to the call; must equal `amount`
    ///
    /// # Returns
    /// * The new deal id
    ///
    /// # Errors
    /// * `Error::ZeroAmount` - `amount` is not strictly positive
    /// * `Error::InsufficientFunds` - `deposit` does not equal `amount`
    /// * `Error::ActiveDealExists` - Either participant already has an open
    ///   deal
    pub fn create_deal(
        e: &Env,
        buyer: Address,
        seller: Address,
        amount: i128,
        deposit: i128,
    ) -> Result<u64, Error> {
        buyer.require_auth();

        let config = get_config(e).ok_or(Error::NotInitialized)?;

        if amount <= 0 {
            return Err(Error::ZeroAmount);
        }

        if deposit != amount {
            return Err(Error::InsufficientFunds);
        }

        if has_active_deal(e, &buyer) || has_active_deal(e, &seller) {
            return Err(Error::ActiveDealExists);
        }

        // Take custody up front; a trap here aborts the whole creation.
        let token_client = token::Client::new(e, &config.token);
        token_client.transfer(&buyer, &e.current_contract_address(), &amount);

        let deal_id = get_next_deal_id(e);

        let deal = Deal {
            id: deal_id,
            buyer: buyer.clone(),
            seller: seller.clone(),
            amount,
            state: DealState::Running,
            phase_entered_at: e.ledger().timestamp(),
        };

        set_deal(e, &deal);
        set_active_deal(e, &buyer, deal_id);
        set_active_deal(e, &seller, deal_id);
        increment_deal_counter(e);
        add_custody(e, amount);

        DealCreatedEventData {
            deal_id,
            buyer,
            seller,
            amount,
        }
        .publish(e);

        Self::extend_instance_ttl(e);
        Ok(deal_id)
    }

    /// Confirm the caller's open deal, advancing it to `Success`.
    ///
    /// Resolved against the open-deal index; no explicit id is taken. No
    /// value moves at this step - confirmation only advances the phase and
    /// restamps the phase timestamp.
    ///
    /// # Errors
    /// * `Error::DealNotFound` - Caller has no open deal
    /// * `Error::Unauthorized` - Caller's open deal names them as the seller
    /// * `Error::AlreadyFunded` - Deal is already confirmed
    /// * `Error::InvalidState` - Deal is past confirmation (in dispute)
    pub fn confirm(e: &Env, buyer: Address) -> Result<(), Error> {
        buyer.require_auth();

        let deal_id = get_active_deal(e, &buyer).ok_or(Error::DealNotFound)?;
        let mut deal = get_deal(e, deal_id).ok_or(Error::DealNotFound)?;

        if buyer != deal.buyer {
            return Err(Error::Unauthorized);
        }

        match deal.state {
            DealState::Running => {}
            DealState::Success => return Err(Error::AlreadyFunded),
            _ => return Err(Error::InvalidState),
        }

        deal.state = DealState::Success;
        deal.phase_entered_at = e.ledger().timestamp();
        set_deal(e, &deal);

        DealConfirmedEventData {
            deal_id,
            amount: deal.amount,
        }
        .publish(e);

        Self::extend_instance_ttl(e);
        Ok(())
    }

    /// Reclaim an unconfirmed deal after the refund window.
    ///
    /// Self-service fallback for a buyer whose deal never left `Running`.
    /// Pays `amount - fee` back to the buyer and `fee` to the manager, then
    /// closes the deal.
    ///
    /// # Errors
    /// * `Error::DealNotFound` - Caller has no open deal
    /// * `Error::Unauthorized` - Caller is not the deal's buyer
    /// * `Error::InvalidState` - Deal is not in `Running`
    /// * `Error::ActionNotAllowed` - The refund window has not elapsed
    pub fn refund(e: &Env, buyer: Address) -> Result<(), Error> {
        buyer.require_auth();

        let config = get_config(e).ok_or(Error::NotInitialized)?;

        let deal_id = get_active_deal(e, &buyer).ok_or(Error::DealNotFound)?;
        let mut deal = get_deal(e, deal_id).ok_or(Error::DealNotFound)?;

        if buyer != deal.buyer {
            return Err(Error::Unauthorized);
        }

        if deal.state != DealState::Running {
            return Err(Error::InvalidState);
        }

        if !fees::refund_eligible(e.ledger().timestamp(), deal.phase_entered_at) {
            return Err(Error::ActionNotAllowed);
        }

        let (refund_amount, fee) = transfer::payout_split(
            e,
            &config.token,
            &deal.buyer,
            &config.manager,
            deal.amount,
            Error::TransferToBuyerFailed,
        )?;

        close_deal(e, &mut deal);

        AutomaticRefundEventData {
            deal_id,
            refund_amount,
            fee,
        }
        .publish(e);

        Self::extend_instance_ttl(e);
        Ok(())
    }

    /// Release a confirmed deal's funds to the seller.
    ///
    /// The buyer may release at any time once the deal is in `Success`; the
    /// seller may force the release only after the forced-withdrawal window
    /// has elapsed without buyer action. Both paths pay `amount - fee` to the
    /// seller and `fee` to the manager.
    ///
    /// # Errors
    /// * `Error::DealNotFound` - Caller has no open deal
    /// * `Error::InvalidState` - Deal is not in `Success`
    /// * `Error::ActionNotAllowed` - Seller called before the window elapsed
    /// * `Error::Unauthorized` - Caller is neither participant of the deal
    pub fn withdraw(e: &Env, caller: Address) -> Result<(), Error> {
        caller.require_auth();

        let config = get_config(e).ok_or(Error::NotInitialized)?;

        let deal_id = get_active_deal(e, &caller).ok_or(Error::DealNotFound)?;
        let mut deal = get_deal(e, deal_id).ok_or(Error::DealNotFound)?;

        if deal.state != DealState::Success {
            return Err(Error::InvalidState);
        }

        match caller_role(&deal, &config.manager, &caller) {
            Role::Buyer => {}
            Role::Seller => {
                if !fees::forced_withdrawal_eligible(e.ledger().timestamp(), deal.phase_entered_at)
                {
                    return Err(Error::ActionNotAllowed);
                }
            }
            _ => return Err(Error::Unauthorized),
        }

        transfer::payout_split(
            e,
            &config.token,
            &deal.seller,
            &config.manager,
            deal.amount,
            Error::TransferToSellerFailed,
        )?;

        close_deal(e, &mut deal);

        Self::extend_instance_ttl(e);
        Ok(())
    }

    // ========================================================================
    // DISPUTE ARBITRATION
    // ========================================================================

    /// Open a dispute on a confirmed deal.
    ///
    /// Either participant may contest a `Success`-phase deal. The initiator
    /// is recorded permanently as an audit trail.
    ///
    /// # Errors
    /// * `Error::DealNotFound` - No deal exists for `deal_id`
    /// * `Error::Unauthorized` - Caller is neither buyer nor seller
    /// * `Error::InvalidState` - Deal is not in `Success`
    pub fn open_dispute(e: &Env, caller: Address, deal_id: u64) -> Result<(), Error> {
        caller.require_auth();

        let mut deal = get_deal(e, deal_id).ok_or(Error::DealNotFound)?;

        if caller != deal.buyer && caller != deal.seller {
            return Err(Error::Unauthorized);
        }

        if deal.state != DealState::Success {
            return Err(Error::InvalidState);
        }

        deal.state = DealState::Dispute;
        deal.phase_entered_at = e.ledger().timestamp();
        set_deal(e, &deal);
        set_dispute_initiator(e, deal_id, &caller);

        DisputeOpenedEventData {
            deal_id,
            initiator: caller,
        }
        .publish(e);

        Self::extend_instance_ttl(e);
        Ok(())
    }

    /// Arbitrate a disputed deal (manager only).
    ///
    /// With `refund_buyer` the full amount goes back to the buyer with no
    /// fee deducted - the dispute refund is deliberately fee-free, unlike the
    /// self-service refund and withdrawal paths. Otherwise the seller is paid
    /// `amount - fee` and the manager collects `fee`, identical to the normal
    /// withdrawal split. Either branch closes the deal.
    ///
    /// # Errors
    /// * `Error::Unauthorized` - Caller is not the manager
    /// * `Error::DealNotFound` - No deal exists for `deal_id`
    /// * `Error::InvalidState` - Deal is not in `Dispute`
    pub fn resolve_dispute(
        e: &Env,
        caller: Address,
        deal_id: u64,
        refund_buyer: bool,
    ) -> Result<(), Error> {
        caller.require_auth();

        let config = get_config(e).ok_or(Error::NotInitialized)?;

        if caller != config.manager {
            return Err(Error::Unauthorized);
        }

        let mut deal = get_deal(e, deal_id).ok_or(Error::DealNotFound)?;

        if deal.state != DealState::Dispute {
            return Err(Error::InvalidState);
        }

        if refund_buyer {
            transfer::payout_full(
                e,
                &config.token,
                &deal.buyer,
                deal.amount,
                Error::TransferToBuyerFailed,
            )?;

            close_deal(e, &mut deal);

            DisputeResolvedBuyerEventData {
                deal_id,
                amount: deal.amount,
            }
            .publish(e);
        } else {
            let (payment, fee) = transfer::payout_split(
                e,
                &config.token,
                &deal.seller,
                &config.manager,
                deal.amount,
                Error::TransferToSellerFailed,
            )?;

            close_deal(e, &mut deal);

            DisputeResolvedSellerEventData {
                deal_id,
                payment,
                fee,
            }
            .publish(e);
        }

        Self::extend_instance_ttl(e);
        Ok(())
    }

    // ========================================================================
    // READS
    // ========================================================================

    /// Get deal record by id
    pub fn get_deal(e: &Env, deal_id: u64) -> Result<Deal, Error> {
        get_deal(e, deal_id).ok_or(Error::DealNotFound)
    }

    /// Get a deal's lifecycle state
    pub fn get_deal_state(e: &Env, deal_id: u64) -> Result<DealState, Error> {
        Ok(get_deal(e, deal_id).ok_or(Error::DealNotFound)?.state)
    }

    /// Get the recorded dispute initiator for a deal. The record survives
    /// closure.
    pub fn get_dispute_initiator(e: &Env, deal_id: u64) -> Result<Address, Error> {
        get_dispute_initiator(e, deal_id).ok_or(Error::DealNotFound)
    }

    /// Get total value held for non-closed deals
    pub fn get_custody_balance(e: &Env) -> Result<i128, Error> {
        let _config = get_config(e).ok_or(Error::NotInitialized)?;
        Ok(get_custody_balance(e))
    }

    // ========================================================================
    // MANAGER CONNECTION PROBE
    // ========================================================================

    /// Connectivity probe reporting who is calling.
    ///
    /// Emits a manager-connected event (with the custody balance) when the
    /// caller is the manager, and an invalid-manager-connection event for
    /// anyone else. The wrong-caller branch is deliberately not an error -
    /// this is a diagnostic, not an authorization gate.
    pub fn connect_manager(e: &Env, caller: Address) -> Result<(), Error> {
        caller.require_auth();

        let config = get_config(e).ok_or(Error::NotInitialized)?;

        if caller == config.manager {
            ManagerConnectedEventData {
                manager: caller,
                custody_balance: get_custody_balance(e),
            }
            .publish(e);
        } else {
            InvalidManagerConnEventData { caller }.publish(e);
        }

        Ok(())
    }

    // ========================================================================
    // UPGRADE GOVERNANCE
    // ========================================================================

    /// Replace the contract's logic in place (owner only).
    ///
    /// Storage - the deal registry, the open-deal index, and the dispute
    /// records - is untouched by the wasm swap and remains readable under the
    /// new logic.
    ///
    /// # Errors
    /// * `Error::OwnerOnly` - Caller is not the owning manager identity
    pub fn upgrade(e: &Env, caller: Address, new_wasm_hash: BytesN<32>) -> Result<(), Error> {
        caller.require_auth();

        let config = get_config(e).ok_or(Error::NotInitialized)?;

        if caller != config.manager {
            return Err(Error::OwnerOnly);
        }

        e.deployer().update_current_contract_wasm(new_wasm_hash);
        Ok(())
    }

    // ========================================================================
    // INTERNAL HELPERS
    // ========================================================================

    /// Extend the TTL of instance storage.
    /// Called internally during state-changing operations.
    fn extend_instance_ttl(e: &Env) {
        e.storage()
            .instance()
            .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_AMOUNT);
    }
}

/// Resolve the caller's role against a deal, once per operation.
fn caller_role(deal: &Deal, manager: &Address, caller: &Address) -> Role {
    if caller == &deal.buyer {
        Role::Buyer
    } else if caller == &deal.seller {
        Role::Seller
    } else if caller == manager {
        Role::Manager
    } else {
        Role::Outsider
    }
}

/// Finalize a deal: mark it `Closed`, release both participants' open-deal
/// slots, and drop its amount from the custody total. The record is never
/// written again after this.
fn close_deal(e: &Env, deal: &mut Deal) {
    deal.state = DealState::Closed;
    deal.phase_entered_at = e.ledger().timestamp();
    set_deal(e, deal);
    clear_active_deal(e, &deal.buyer);
    clear_active_deal(e, &deal.seller);
    subtract_custody(e, deal.amount);
}
