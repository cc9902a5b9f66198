use soroban_sdk::{contracttype, Address};

/// Storage keys for the escrow contract.
#[contracttype]
#[derive(Clone)]
pub enum StorageKey {
    /// Initialization flag
    Initialized,
    /// Manager identity and custody token
    Config,
    /// Deal record by id
    Deal(u64),
    /// Open-deal id by participant address
    ActiveDeal(Address),
    /// Dispute initiator by deal id (never removed)
    DisputeInitiator(u64),
    /// Last deal id counter
    DealCounter,
    /// Total value held for non-closed deals
    CustodyBalance,
    /// Exclusive lock held across outbound transfers
    TransferLock,
}

/// Deal lifecycle state.
///
/// `NotFound` is the zero sentinel for an id absent from the registry; it is
/// never stored. Lookups of absent ids surface `Error::DealNotFound` instead.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum DealState {
    /// Sentinel for a non-existent deal
    NotFound = 0,
    /// Created and funded, awaiting buyer confirmation
    Running = 1,
    /// Buyer confirmed, funds releasable
    Success = 2,
    /// Terminal; record is immutable from here on
    Closed = 3,
    /// Contested, awaiting manager arbitration
    Dispute = 4,
}

impl DealState {
    pub fn as_u32(&self) -> u32 {
        match self {
            DealState::NotFound => 0,
            DealState::Running => 1,
            DealState::Success => 2,
            DealState::Closed => 3,
            DealState::Dispute => 4,
        }
    }

    pub fn from_u32(value: u32) -> Option<DealState> {
        match value {
            0 => Some(DealState::NotFound),
            1 => Some(DealState::Running),
            2 => Some(DealState::Success),
            3 => Some(DealState::Closed),
            4 => Some(DealState::Dispute),
            _ => None,
        }
    }
}

/// Caller role relative to a deal, resolved once per operation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    Buyer,
    Seller,
    Manager,
    Outsider,
}

/// One buyer/seller/amount escrow unit.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deal {
    /// Unique deal identifier
    pub id: u64,
    /// Buyer's address; immutable after creation
    pub buyer: Address,
    /// Seller's address; immutable after creation
    pub seller: Address,
    /// Escrowed value, fixed at creation
    pub amount: i128,
    /// Current lifecycle state
    pub state: DealState,
    /// Timestamp of the last state transition; anchors both time-lock windows
    pub phase_entered_at: u64,
}

/// Engine configuration, set at initialization.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EscrowConfig {
    /// The single administrative identity (arbitrator and upgrade owner)
    pub manager: Address,
    /// The fungible asset held in custody
    pub token: Address,
}

/// Number of ledgers in a day (assuming ~5 second block time)
pub const DAY_IN_LEDGERS: u32 = 17280;

/// TTL extension amount for persistent storage (90 days)
pub const PERSISTENT_TTL_AMOUNT: u32 = 90 * DAY_IN_LEDGERS;

/// TTL threshold for persistent storage
pub const PERSISTENT_TTL_THRESHOLD: u32 = PERSISTENT_TTL_AMOUNT - DAY_IN_LEDGERS;
