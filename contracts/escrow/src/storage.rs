use soroban_sdk::{Address, Env};

use crate::types::{
    Deal, EscrowConfig, StorageKey, PERSISTENT_TTL_AMOUNT, PERSISTENT_TTL_THRESHOLD,
};

// ============================================================================
// INITIALIZATION STORAGE
// ============================================================================

/// Check if contract is initialized
pub fn is_initialized(e: &Env) -> bool {
    e.storage()
        .instance()
        .get::<_, bool>(&StorageKey::Initialized)
        .unwrap_or(false)
}

/// Mark contract as initialized
pub fn set_initialized(e: &Env) {
    e.storage().instance().set(&StorageKey::Initialized, &true);
}

// ============================================================================
// CONFIG STORAGE
// ============================================================================

/// Get engine configuration
pub fn get_config(e: &Env) -> Option<EscrowConfig> {
    let key = StorageKey::Config;
    let config = e.storage().persistent().get::<_, EscrowConfig>(&key);
    if config.is_some() {
        e.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
    }
    config
}

/// Set engine configuration
pub fn set_config(e: &Env, config: &EscrowConfig) {
    let key = StorageKey::Config;
    e.storage().persistent().set(&key, config);
    e.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
}

// ============================================================================
// DEAL REGISTRY STORAGE
// ============================================================================

/// Get deal record by id
pub fn get_deal(e: &Env, deal_id: u64) -> Option<Deal> {
    let key = StorageKey::Deal(deal_id);
    let deal = e.storage().persistent().get::<_, Deal>(&key);
    if deal.is_some() {
        e.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
    }
    deal
}

/// Set deal record
pub fn set_deal(e: &Env, deal: &Deal) {
    let key = StorageKey::Deal(deal.id);
    e.storage().persistent().set(&key, deal);
    e.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
}

/// Get next deal id
pub fn get_next_deal_id(e: &Env) -> u64 {
    let key = StorageKey::DealCounter;
    let counter = e.storage().persistent().get::<_, u64>(&key).unwrap_or(0);
    if counter > 0 {
        e.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
    }
    counter + 1
}

/// Increment deal counter
pub fn increment_deal_counter(e: &Env) {
    let key = StorageKey::DealCounter;
    let counter = get_next_deal_id(e);
    e.storage().persistent().set(&key, &counter);
    e.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
}

// ============================================================================
// ACTIVE DEAL INDEX STORAGE
// ============================================================================

/// Get a participant's open deal id, if any
pub fn get_active_deal(e: &Env, participant: &Address) -> Option<u64> {
    let key = StorageKey::ActiveDeal(participant.clone());
    let deal_id = e.storage().persistent().get::<_, u64>(&key);
    if deal_id.is_some() {
        e.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
    }
    deal_id
}

/// Check if a participant has an open deal
pub fn has_active_deal(e: &Env, participant: &Address) -> bool {
    let key = StorageKey::ActiveDeal(participant.clone());
    e.storage().persistent().has(&key)
}

/// Register a participant's open deal
pub fn set_active_deal(e: &Env, participant: &Address, deal_id: u64) {
    let key = StorageKey::ActiveDeal(participant.clone());
    e.storage().persistent().set(&key, &deal_id);
    e.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
}

/// Release a participant's open-deal slot on closure
pub fn clear_active_deal(e: &Env, participant: &Address) {
    let key = StorageKey::ActiveDeal(participant.clone());
    e.storage().persistent().remove(&key);
}

// ============================================================================
// DISPUTE RECORD STORAGE
// ============================================================================

/// Get the recorded dispute initiator for a deal
pub fn get_dispute_initiator(e: &Env, deal_id: u64) -> Option<Address> {
    let key = StorageKey::DisputeInitiator(deal_id);
    let initiator = e.storage().persistent().get::<_, Address>(&key);
    if initiator.is_some() {
        e.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
    }
    initiator
}

/// Record the dispute initiator. Written once per deal; the record is an
/// audit trail and is never removed, even after closure.
pub fn set_dispute_initiator(e: &Env, deal_id: u64, initiator: &Address) {
    let key = StorageKey::DisputeInitiator(deal_id);
    e.storage().persistent().set(&key, initiator);
    e.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
}

// ============================================================================
// CUSTODY BALANCE STORAGE
// ============================================================================

/// Get total value held for non-closed deals
pub fn get_custody_balance(e: &Env) -> i128 {
    let key = StorageKey::CustodyBalance;
    let balance = e.storage().persistent().get::<_, i128>(&key).unwrap_or(0);
    if balance > 0 {
        e.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
    }
    balance
}

/// Add a newly escrowed amount to the custody total
pub fn add_custody(e: &Env, amount: i128) {
    let key = StorageKey::CustodyBalance;
    let balance = get_custody_balance(e) + amount;
    e.storage().persistent().set(&key, &balance);
    e.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
}

/// Drop a closed deal's amount from the custody total
pub fn subtract_custody(e: &Env, amount: i128) {
    let key = StorageKey::CustodyBalance;
    let balance = get_custody_balance(e) - amount;
    e.storage().persistent().set(&key, &balance);
    e.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
}

// ============================================================================
// TRANSFER LOCK STORAGE
// ============================================================================

/// Check if the transfer lock is held
pub fn is_transfer_locked(e: &Env) -> bool {
    e.storage()
        .instance()
        .get::<_, bool>(&StorageKey::TransferLock)
        .unwrap_or(false)
}

/// Set or clear the transfer lock
pub fn set_transfer_lock(e: &Env, locked: bool) {
    e.storage().instance().set(&StorageKey::TransferLock, &locked);
}
