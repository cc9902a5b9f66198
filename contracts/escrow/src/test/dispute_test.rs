use soroban_sdk::testutils::Address as _;
use soroban_sdk::Address;

use crate::errors::Error;
use crate::test::{setup_test, DEAL_AMOUNT};
use crate::types::DealState;

fn confirmed_deal(
    client: &crate::EscrowContractClient,
    buyer: &Address,
    seller: &Address,
) -> u64 {
    let deal_id = client.create_deal(buyer, seller, &DEAL_AMOUNT, &DEAL_AMOUNT);
    client.confirm(buyer);
    deal_id
}

#[test]
fn test_buyer_can_open_dispute() {
    let (_env, client, _, buyer, seller, _, _) = setup_test();

    let deal_id = confirmed_deal(&client, &buyer, &seller);
    client.open_dispute(&buyer, &deal_id);

    assert_eq!(client.get_deal_state(&deal_id), DealState::Dispute);
    assert_eq!(client.get_dispute_initiator(&deal_id), buyer);
}

#[test]
fn test_seller_can_open_dispute() {
    let (_env, client, _, buyer, seller, _, _) = setup_test();

    let deal_id = confirmed_deal(&client, &buyer, &seller);
    client.open_dispute(&seller, &deal_id);

    assert_eq!(client.get_deal_state(&deal_id), DealState::Dispute);
    assert_eq!(client.get_dispute_initiator(&deal_id), seller);
}

#[test]
fn test_open_dispute_requires_success_state() {
    let (_env, client, _, buyer, seller, _, _) = setup_test();

    let deal_id = client.create_deal(&buyer, &seller, &DEAL_AMOUNT, &DEAL_AMOUNT);

    let result = client.try_open_dispute(&buyer, &deal_id);
    assert_eq!(result, Err(Ok(Error::InvalidState)));
}

#[test]
fn test_open_dispute_twice_invalid_state() {
    let (_env, client, _, buyer, seller, _, _) = setup_test();

    let deal_id = confirmed_deal(&client, &buyer, &seller);
    client.open_dispute(&buyer, &deal_id);

    let result = client.try_open_dispute(&seller, &deal_id);
    assert_eq!(result, Err(Ok(Error::InvalidState)));
    assert_eq!(client.get_deal_state(&deal_id), DealState::Dispute);
}

#[test]
fn test_open_dispute_by_stranger_unauthorized() {
    let (env, client, _, buyer, seller, _, _) = setup_test();

    let deal_id = confirmed_deal(&client, &buyer, &seller);

    let stranger = Address::generate(&env);
    let result = client.try_open_dispute(&stranger, &deal_id);
    assert_eq!(result, Err(Ok(Error::Unauthorized)));
}

#[test]
fn test_open_dispute_unknown_deal_not_found() {
    let (_env, client, _, buyer, _, _, _) = setup_test();

    let result = client.try_open_dispute(&buyer, &42);
    assert_eq!(result, Err(Ok(Error::DealNotFound)));
}

#[test]
fn test_resolve_refunds_buyer_in_full() {
    let (_env, client, manager, buyer, seller, _, token) = setup_test();

    let deal_id = confirmed_deal(&client, &buyer, &seller);
    client.open_dispute(&buyer, &deal_id);

    let buyer_before = token.balance(&buyer);
    client.resolve_dispute(&manager, &deal_id, &true);

    // Dispute refund is fee-free: the buyer gets the amount back whole.
    assert_eq!(token.balance(&buyer), buyer_before + DEAL_AMOUNT);
    assert_eq!(token.balance(&manager), 0);
    assert_eq!(client.get_deal_state(&deal_id), DealState::Closed);
    assert_eq!(client.get_custody_balance(), 0);
}

#[test]
fn test_resolve_pays_seller_minus_fee() {
    let (_env, client, manager, buyer, seller, _, token) = setup_test();

    let deal_id = confirmed_deal(&client, &buyer, &seller);
    client.open_dispute(&seller, &deal_id);

    client.resolve_dispute(&manager, &deal_id, &false);

    let fee = DEAL_AMOUNT * 150 / 10_000;
    assert_eq!(token.balance(&seller), DEAL_AMOUNT - fee);
    assert_eq!(token.balance(&manager), fee);
    assert_eq!(client.get_deal_state(&deal_id), DealState::Closed);
}

#[test]
fn test_resolve_by_non_manager_unauthorized() {
    let (_env, client, _, buyer, seller, _, _) = setup_test();

    let deal_id = confirmed_deal(&client, &buyer, &seller);
    client.open_dispute(&buyer, &deal_id);

    assert_eq!(
        client.try_resolve_dispute(&buyer, &deal_id, &true),
        Err(Ok(Error::Unauthorized))
    );
    assert_eq!(
        client.try_resolve_dispute(&seller, &deal_id, &false),
        Err(Ok(Error::Unauthorized))
    );
}

#[test]
fn test_resolve_without_dispute_invalid_state() {
    let (_env, client, manager, buyer, seller, _, _) = setup_test();

    let deal_id = confirmed_deal(&client, &buyer, &seller);

    assert_eq!(
        client.try_resolve_dispute(&manager, &deal_id, &true),
        Err(Ok(Error::InvalidState))
    );
    assert_eq!(
        client.try_resolve_dispute(&manager, &deal_id, &false),
        Err(Ok(Error::InvalidState))
    );
}

#[test]
fn test_resolve_unknown_deal_not_found() {
    let (_env, client, manager, _, _, _, _) = setup_test();

    let result = client.try_resolve_dispute(&manager, &7, &true);
    assert_eq!(result, Err(Ok(Error::DealNotFound)));
}

#[test]
fn test_initiator_record_survives_closure() {
    let (_env, client, manager, buyer, seller, _, _) = setup_test();

    let deal_id = confirmed_deal(&client, &buyer, &seller);
    client.open_dispute(&buyer, &deal_id);
    client.resolve_dispute(&manager, &deal_id, &true);

    // The audit record outlives the deal.
    assert_eq!(client.get_dispute_initiator(&deal_id), buyer);
    assert_eq!(client.get_deal_state(&deal_id), DealState::Closed);
}

#[test]
fn test_closed_deal_cannot_be_disputed() {
    let (_env, client, _, buyer, seller, _, _) = setup_test();

    let deal_id = confirmed_deal(&client, &buyer, &seller);
    client.withdraw(&buyer);

    let result = client.try_open_dispute(&buyer, &deal_id);
    assert_eq!(result, Err(Ok(Error::InvalidState)));
}
