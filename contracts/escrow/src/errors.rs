use soroban_sdk::contracterror;

/// Error codes for the escrow contract.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// Contract has already been initialized
    AlreadyInitialized = 1,
    /// Contract has not been initialized
    NotInitialized = 2,
    /// Deal amount must be strictly positive
    ZeroAmount = 3,
    /// Attached deposit does not cover the deal amount
    InsufficientFunds = 4,
    /// Deal is in the wrong phase for the requested operation
    InvalidState = 5,
    /// Caller does not hold the required role for this operation
    Unauthorized = 6,
    /// Right role and phase, but the time-lock window has not elapsed
    ActionNotAllowed = 7,
    /// Deal has already been confirmed by the buyer
    AlreadyFunded = 8,
    /// No deal exists for the given id (or for the caller's index slot)
    DealNotFound = 9,
    /// Participant already has an open deal
    ActiveDealExists = 10,
    /// A value-moving operation re-entered while the transfer lock was held
    ReentrancyBlocked = 11,
    /// Logic upgrade is restricted to the owning manager identity
    OwnerOnly = 12,
    /// Fee calculation overflow
    FeeOverflow = 13,
    /// Outbound transfer to the buyer failed
    TransferToBuyerFailed = 14,
    /// Outbound transfer to the seller failed
    TransferToSellerFailed = 15,
    /// Outbound transfer to the manager failed
    TransferToManagerFailed = 16,
}
