mod common;

use common::*;
use multiversx_sc_scenario::{managed_address, managed_biguint, managed_buffer, rust_biguint};

use prediction_protocol::custody::CustodyModule;
use prediction_protocol::errors::*;
use prediction_protocol::market::MarketModule;
use prediction_protocol::types::{MarketOutcome, MarketStatus};

const END_TIME: u64 = 100;
const RESOLUTION_TIME: u64 = 200;

/// Market 1 created at t=50 by alice, resolved by carol.
fn setup_with_market() -> ProtocolSetup<fn() -> ProtocolContract> {
    let mut setup =
        ProtocolSetup::new(prediction_protocol::contract_obj as fn() -> ProtocolContract);
    let alice = setup.alice.clone();
    let carol = setup.carol.clone();

    setup.set_timestamp(50);
    setup
        .create_market(&alice, END_TIME, RESOLUTION_TIME, &carol)
        .assert_ok();
    setup
}

fn assert_pools_consistent(setup: &mut ProtocolSetup<fn() -> ProtocolContract>, market_id: u64) {
    setup
        .b_mock
        .execute_query(&setup.contract, |sc| {
            let market = sc.get_market(market_id);
            assert_eq!(market.total_pool, &market.yes_pool + &market.no_pool);
        })
        .assert_ok();
}

#[test]
fn create_market_validates_time_ordering() {
    let mut setup = setup_with_market();
    let alice = setup.alice.clone();
    let carol = setup.carol.clone();

    setup
        .create_market(&alice, 40, RESOLUTION_TIME, &carol)
        .assert_user_error(ERR_END_TIME_IN_PAST);
    setup
        .create_market(&alice, 50, RESOLUTION_TIME, &carol)
        .assert_user_error(ERR_END_TIME_IN_PAST);
    setup
        .create_market(&alice, END_TIME, 90, &carol)
        .assert_user_error(ERR_BAD_RESOLUTION_ORDER);
    setup
        .create_market(&alice, END_TIME, END_TIME, &carol)
        .assert_user_error(ERR_BAD_RESOLUTION_ORDER);

    setup
        .b_mock
        .execute_query(&setup.contract, |sc| {
            assert_eq!(sc.get_market_count(), 1);

            let market = sc.get_market(1);
            assert_eq!(market.creator, managed_address!(&alice));
            assert_eq!(market.resolver, managed_address!(&carol));
            assert_eq!(market.end_time, END_TIME);
            assert_eq!(market.resolution_time, RESOLUTION_TIME);
            assert_eq!(market.status, MarketStatus::Active);
            assert_eq!(market.outcome, MarketOutcome::None);
            assert_eq!(market.total_pool, managed_biguint!(0));
        })
        .assert_ok();
}

#[test]
fn market_ids_are_sequential() {
    let mut setup = setup_with_market();
    let bob = setup.bob.clone();
    let carol = setup.carol.clone();

    setup
        .b_mock
        .execute_tx(&bob, &setup.contract, &rust_biguint!(0u64), |sc| {
            let id = sc.create_market(
                managed_buffer!(b"Will the upgrade ship this month?"),
                managed_buffer!(b""),
                500,
                600,
                managed_address!(&carol),
            );
            assert_eq!(id, 2);
        })
        .assert_ok();
}

#[test]
fn bets_fill_pools_and_accumulate_per_side() {
    let mut setup = setup_with_market();
    let bob = setup.bob.clone();
    let dave = setup.dave.clone();

    setup.place_bet(&bob, 1, true, 10_000).assert_ok();
    setup.place_bet(&bob, 1, true, 15_000).assert_ok();
    setup.place_bet(&dave, 1, false, 20_000).assert_ok();

    setup.check_balance(&bob, USER_BALANCE - 25_000);
    setup
        .b_mock
        .execute_query(&setup.contract, |sc| {
            let market = sc.get_market(1);
            assert_eq!(market.yes_pool, managed_biguint!(25_000));
            assert_eq!(market.no_pool, managed_biguint!(20_000));
            assert_eq!(market.total_pool, managed_biguint!(45_000));

            let bet = sc.get_bet(1, &managed_address!(&bob));
            assert!(bet.bet_on_yes);
            assert_eq!(bet.amount, managed_biguint!(25_000));
            assert!(!bet.claimed);
        })
        .assert_ok();
    assert_pools_consistent(&mut setup, 1);
}

#[test]
fn bet_validation() {
    let mut setup = setup_with_market();
    let bob = setup.bob.clone();

    setup
        .place_bet(&bob, 1, true, 9_999)
        .assert_user_error(ERR_BET_TOO_SMALL);
    setup
        .place_bet(&bob, 7, true, 10_000)
        .assert_user_error(ERR_MARKET_NOT_FOUND);

    setup.place_bet(&bob, 1, true, 10_000).assert_ok();
    setup
        .place_bet(&bob, 1, false, 10_000)
        .assert_user_error(ERR_BET_SIDE_MISMATCH);

    setup.set_timestamp(END_TIME);
    setup
        .place_bet(&bob, 1, true, 10_000)
        .assert_user_error(ERR_BETTING_CLOSED);

    setup.check_balance(&bob, USER_BALANCE - 10_000);
    assert_pools_consistent(&mut setup, 1);
}

#[test]
fn resolve_market_checks_resolver_time_and_outcome() {
    let mut setup = setup_with_market();
    let alice = setup.alice.clone();
    let carol = setup.carol.clone();

    setup.set_timestamp(RESOLUTION_TIME - 1);
    setup.resolve(&carol, 1, 1).assert_user_error(ERR_TOO_EARLY);

    setup.set_timestamp(RESOLUTION_TIME);
    setup
        .resolve(&alice, 1, 1)
        .assert_user_error(ERR_UNAUTHORIZED_RESOLVER);
    setup.resolve(&carol, 1, 0).assert_user_error(ERR_INVALID_OUTCOME);
    setup.resolve(&carol, 1, 3).assert_user_error(ERR_INVALID_OUTCOME);

    setup.resolve(&carol, 1, 2).assert_ok();
    setup
        .resolve(&carol, 1, 1)
        .assert_user_error(ERR_MARKET_NOT_ACTIVE);

    setup
        .b_mock
        .execute_query(&setup.contract, |sc| {
            let market = sc.get_market(1);
            assert_eq!(market.status, MarketStatus::Resolved);
            assert_eq!(market.outcome, MarketOutcome::No);
        })
        .assert_ok();
}

#[test]
fn winners_are_paid_proportionally_minus_fee() {
    let mut setup = setup_with_market();
    let alice = setup.alice.clone();
    let bob = setup.bob.clone();
    let carol = setup.carol.clone();
    let dave = setup.dave.clone();

    // winning pool 50_000 of a 100_000 total
    setup.place_bet(&alice, 1, true, 10_000).assert_ok();
    setup.place_bet(&bob, 1, true, 40_000).assert_ok();
    setup.place_bet(&dave, 1, false, 50_000).assert_ok();

    setup
        .b_mock
        .execute_tx(&alice, &setup.contract, &rust_biguint!(0u64), |sc| {
            sc.claim_winnings(1);
        })
        .assert_user_error(ERR_NOT_RESOLVED);

    setup.set_timestamp(RESOLUTION_TIME);
    setup.resolve(&carol, 1, 1).assert_ok();

    // share = 10_000 * 100_000 / 50_000 = 20_000, fee = 400
    setup
        .b_mock
        .execute_tx(&alice, &setup.contract, &rust_biguint!(0u64), |sc| {
            assert_eq!(sc.claim_winnings(1), managed_biguint!(19_600));
        })
        .assert_ok();
    setup.check_balance(&alice, USER_BALANCE - 10_000 + 19_600);

    setup
        .b_mock
        .execute_tx(&alice, &setup.contract, &rust_biguint!(0u64), |sc| {
            sc.claim_winnings(1);
        })
        .assert_user_error(ERR_ALREADY_CLAIMED);

    // share = 80_000, fee = 1_600
    setup
        .b_mock
        .execute_tx(&bob, &setup.contract, &rust_biguint!(0u64), |sc| {
            assert_eq!(sc.claim_winnings(1), managed_biguint!(78_400));
        })
        .assert_ok();

    // Losers are marked claimed with a zero payout.
    setup
        .b_mock
        .execute_tx(&dave, &setup.contract, &rust_biguint!(0u64), |sc| {
            assert_eq!(sc.claim_winnings(1), managed_biguint!(0));
        })
        .assert_ok();
    setup
        .b_mock
        .execute_tx(&dave, &setup.contract, &rust_biguint!(0u64), |sc| {
            sc.claim_winnings(1);
        })
        .assert_user_error(ERR_ALREADY_CLAIMED);
    setup.check_balance(&dave, USER_BALANCE - 50_000);

    setup
        .b_mock
        .execute_tx(&carol, &setup.contract, &rust_biguint!(0u64), |sc| {
            sc.claim_winnings(1);
        })
        .assert_user_error(ERR_NO_BET);

    setup
        .b_mock
        .execute_query(&setup.contract, |sc| {
            assert_eq!(sc.get_protocol_fees(), managed_biguint!(2_000));
            assert!(sc.get_bet(1, &managed_address!(&dave)).claimed);
        })
        .assert_ok();
    assert_pools_consistent(&mut setup, 1);
}

#[test]
fn payout_arithmetic_truncates() {
    let mut setup = setup_with_market();

    setup
        .b_mock
        .execute_query(&setup.contract, |sc| {
            let (payout, fee) = sc.winning_payout(
                &managed_biguint!(100),
                &managed_biguint!(500),
                &managed_biguint!(1_000),
            );
            assert_eq!(payout, managed_biguint!(196));
            assert_eq!(fee, managed_biguint!(4));

            // share = floor(7 * 10 / 3) = 23, fee = floor(23 * 200 / 10_000) = 0
            let (payout, fee) = sc.winning_payout(
                &managed_biguint!(7),
                &managed_biguint!(3),
                &managed_biguint!(10),
            );
            assert_eq!(payout, managed_biguint!(23));
            assert_eq!(fee, managed_biguint!(0));
        })
        .assert_ok();
}

#[test]
fn owner_withdraws_accrued_fees() {
    let mut setup = setup_with_market();
    let owner = setup.owner.clone();
    let alice = setup.alice.clone();
    let carol = setup.carol.clone();
    let dave = setup.dave.clone();

    setup.place_bet(&alice, 1, true, 50_000).assert_ok();
    setup.place_bet(&dave, 1, false, 50_000).assert_ok();
    setup.set_timestamp(RESOLUTION_TIME);
    setup.resolve(&carol, 1, 1).assert_ok();
    setup
        .b_mock
        .execute_tx(&alice, &setup.contract, &rust_biguint!(0u64), |sc| {
            assert_eq!(sc.claim_winnings(1), managed_biguint!(98_000));
        })
        .assert_ok();

    setup
        .b_mock
        .execute_tx(&alice, &setup.contract, &rust_biguint!(0u64), |sc| {
            sc.withdraw_protocol_fees(managed_address!(&alice));
        })
        .assert_user_error(ERR_NOT_OWNER);

    setup
        .b_mock
        .execute_tx(&owner, &setup.contract, &rust_biguint!(0u64), |sc| {
            assert_eq!(
                sc.withdraw_protocol_fees(managed_address!(&owner)),
                managed_biguint!(2_000)
            );
        })
        .assert_ok();
    setup
        .b_mock
        .check_esdt_balance(&owner, TOKEN_ID, &rust_biguint!(2_000u64));

    setup
        .b_mock
        .execute_tx(&owner, &setup.contract, &rust_biguint!(0u64), |sc| {
            sc.withdraw_protocol_fees(managed_address!(&owner));
        })
        .assert_user_error(ERR_NOTHING_TO_WITHDRAW);
}

#[test]
fn cancel_market_rules() {
    let mut setup = setup_with_market();
    let alice = setup.alice.clone();
    let bob = setup.bob.clone();

    setup
        .b_mock
        .execute_tx(&bob, &setup.contract, &rust_biguint!(0u64), |sc| {
            sc.cancel_market(1);
        })
        .assert_user_error(ERR_NOT_CREATOR);

    setup.set_timestamp(END_TIME);
    setup
        .b_mock
        .execute_tx(&alice, &setup.contract, &rust_biguint!(0u64), |sc| {
            sc.cancel_market(1);
        })
        .assert_user_error(ERR_AFTER_END_TIME);

    setup.set_timestamp(END_TIME - 1);
    setup
        .b_mock
        .execute_tx(&alice, &setup.contract, &rust_biguint!(0u64), |sc| {
            sc.cancel_market(1);
        })
        .assert_ok();

    setup
        .place_bet(&bob, 1, true, 10_000)
        .assert_user_error(ERR_MARKET_NOT_ACTIVE);
    setup
        .b_mock
        .execute_tx(&alice, &setup.contract, &rust_biguint!(0u64), |sc| {
            sc.cancel_market(1);
        })
        .assert_user_error(ERR_MARKET_NOT_ACTIVE);
}

#[test]
fn cancelled_market_refunds_each_bet_once() {
    let mut setup = setup_with_market();
    let alice = setup.alice.clone();
    let bob = setup.bob.clone();
    let carol = setup.carol.clone();

    setup.place_bet(&bob, 1, true, 10_000).assert_ok();
    setup.place_bet(&bob, 1, true, 15_000).assert_ok();

    setup
        .b_mock
        .execute_tx(&bob, &setup.contract, &rust_biguint!(0u64), |sc| {
            sc.claim_refund(1);
        })
        .assert_user_error(ERR_MARKET_NOT_CANCELLED);

    setup
        .b_mock
        .execute_tx(&alice, &setup.contract, &rust_biguint!(0u64), |sc| {
            sc.cancel_market(1);
        })
        .assert_ok();

    setup
        .b_mock
        .execute_tx(&bob, &setup.contract, &rust_biguint!(0u64), |sc| {
            assert_eq!(sc.claim_refund(1), managed_biguint!(25_000));
        })
        .assert_ok();
    setup.check_balance(&bob, USER_BALANCE);

    setup
        .b_mock
        .execute_tx(&bob, &setup.contract, &rust_biguint!(0u64), |sc| {
            sc.claim_refund(1);
        })
        .assert_user_error(ERR_ALREADY_CLAIMED);
    setup
        .b_mock
        .execute_tx(&carol, &setup.contract, &rust_biguint!(0u64), |sc| {
            sc.claim_refund(1);
        })
        .assert_user_error(ERR_NO_BET);
    setup
        .b_mock
        .execute_tx(&bob, &setup.contract, &rust_biguint!(0u64), |sc| {
            sc.claim_winnings(1);
        })
        .assert_user_error(ERR_NOT_RESOLVED);
}
