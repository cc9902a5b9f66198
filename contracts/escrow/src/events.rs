use soroban_sdk::{contractevent, Address};

/// Event emitted when the engine is initialized
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEventData {
    #[topic]
    pub manager: Address,
    pub token: Address,
}

/// Event emitted when a deal is created and funded
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DealCreatedEventData {
    #[topic]
    pub deal_id: u64,
    pub buyer: Address,
    pub seller: Address,
    pub amount: i128,
}

/// Event emitted when the buyer confirms a deal
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DealConfirmedEventData {
    #[topic]
    pub deal_id: u64,
    pub amount: i128,
}

/// Event emitted when a party opens a dispute
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DisputeOpenedEventData {
    #[topic]
    pub deal_id: u64,
    pub initiator: Address,
}

/// Event emitted when the manager resolves a dispute in the seller's favour
#[contractevent(topics = ["dispute_resolved_seller"])]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DisputeResolvedSellerEventData {
    #[topic]
    pub deal_id: u64,
    pub payment: i128,
    pub fee: i128,
}

/// Event emitted when the manager resolves a dispute in the buyer's favour
#[contractevent(topics = ["dispute_resolved_buyer"])]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DisputeResolvedBuyerEventData {
    #[topic]
    pub deal_id: u64,
    pub amount: i128,
}

/// Event emitted when a buyer reclaims an unconfirmed deal after the window
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AutomaticRefundEventData {
    #[topic]
    pub deal_id: u64,
    pub refund_amount: i128,
    pub fee: i128,
}

/// Event emitted when the manager connects
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ManagerConnectedEventData {
    #[topic]
    pub manager: Address,
    pub custody_balance: i128,
}

/// Event emitted when a non-manager probes the manager connection
#[contractevent(topics = ["invalid_manager_connection"])]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvalidManagerConnEventData {
    #[topic]
    pub caller: Address,
}
